pub mod actions;
mod app_state;
mod assembler;
mod chat_log;
mod conversation_store;
pub mod events;
mod history;
mod invoker;
mod provider_registry;
mod scroll;

pub use app_state::*;
pub use assembler::*;
pub use chat_log::*;
pub use conversation_store::*;
pub use history::*;
pub use invoker::*;
pub use provider_registry::*;
pub use scroll::*;
