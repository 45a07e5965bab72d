use super::Message;
use super::Project;
use super::ProviderProfile;

/// Conversation state for a single UI session.
#[derive(Clone, Debug)]
pub struct Session {
    pub id: String,
    pub history: Vec<Message>,
    pub selected_provider: Option<ProviderProfile>,
    pub temperature: f32,
    pub project: Project,
    /// Set while an exchange is in flight.
    pub busy: bool,
}

impl Session {
    pub fn new(
        id: &str,
        persona: &str,
        selected_provider: Option<ProviderProfile>,
        temperature: f32,
    ) -> Session {
        return Session {
            id: id.to_string(),
            history: vec![Message::system(persona)],
            selected_provider,
            temperature,
            project: Project::default(),
            busy: false,
        };
    }
}
