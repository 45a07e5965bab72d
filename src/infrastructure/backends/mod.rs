pub mod claude;
pub mod gemini;
pub mod openai;
pub mod raw_http;

use crate::domain::models::BackendBox;
use crate::domain::models::ProviderProfile;
use crate::domain::models::RequestStyle;

pub struct BackendManager {}

impl BackendManager {
    pub fn get(profile: &ProviderProfile) -> BackendBox {
        match profile.request_style {
            RequestStyle::OpenAI => return Box::new(openai::OpenAI::from(profile)),
            RequestStyle::Claude => return Box::new(claude::Claude::from(profile)),
            RequestStyle::Gemini => return Box::new(gemini::Gemini::from(profile)),
            RequestStyle::RawHttp => return Box::new(raw_http::RawHttp::from(profile)),
        }
    }
}
