mod action;
mod backend;
mod completion;
mod error;
mod event;
mod exchange;
mod loading;
mod message;
mod notice;
mod project;
mod provider;
mod role;
mod session;
mod slash_commands;
mod textarea;

pub use action::*;
pub use backend::*;
pub use completion::*;
pub use error::*;
pub use event::*;
pub use exchange::*;
pub use loading::*;
pub use message::*;
pub use notice::*;
pub use project::*;
pub use provider::*;
pub use role::*;
pub use session::*;
pub use slash_commands::*;
pub use textarea::*;
