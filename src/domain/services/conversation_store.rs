#[cfg(test)]
#[path = "conversation_store_test.rs"]
mod tests;

use dashmap::DashMap;
use uuid::Uuid;

use super::ProviderRegistry;
use crate::domain::models::ChatError;
use crate::domain::models::Project;
use crate::domain::models::ProviderProfile;
use crate::domain::models::Session;

/// Sessions keyed by id. Every mutation runs while holding the session's map
/// entry, so readers see a session either before or after a change.
#[derive(Default)]
pub struct ConversationStore {
    sessions: DashMap<String, Session>,
}

impl ConversationStore {
    pub fn create_id() -> String {
        return Uuid::new_v4()
            .to_string()
            .split('-')
            .enumerate()
            .filter_map(|(idx, str)| {
                if idx > 1 {
                    return None;
                }
                return Some(str);
            })
            .collect::<Vec<&str>>()
            .join("-");
    }

    pub fn create(
        &self,
        selected_provider: Option<ProviderProfile>,
        temperature: f32,
        persona: &str,
    ) -> String {
        let id = ConversationStore::create_id();
        let session = Session::new(&id, persona, selected_provider, temperature);
        self.sessions.insert(id.to_string(), session);
        tracing::debug!(session_id = id, "Created session");

        return id;
    }

    /// Snapshot of the session as it is right now.
    pub fn get(&self, id: &str) -> Result<Session, ChatError> {
        return self
            .sessions
            .get(id)
            .map(|session| return session.clone())
            .ok_or_else(|| return ChatError::SessionNotFound(id.to_string()));
    }

    pub fn with_session<F, R>(&self, id: &str, f: F) -> Result<R, ChatError>
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| return ChatError::SessionNotFound(id.to_string()))?;

        return Ok(f(session.value_mut()));
    }

    /// Leaves the current selection in place when the label can't be used.
    pub fn select_provider(
        &self,
        id: &str,
        registry: &ProviderRegistry,
        label: &str,
    ) -> Result<ProviderProfile, ChatError> {
        let profile = registry.resolve(label)?;
        self.with_session(id, |session| {
            session.selected_provider = Some(profile.clone());
        })?;
        tracing::debug!(session_id = id, provider = profile.label, "Selected provider");

        return Ok(profile);
    }

    pub fn set_temperature(&self, id: &str, temperature: f32) -> Result<(), ChatError> {
        if !temperature.is_finite() || !(0.0..=2.0).contains(&temperature) {
            return Err(ChatError::Validation(format!(
                "Temperature must be between 0.0 and 2.0, got {temperature}."
            )));
        }

        return self.with_session(id, |session| {
            session.temperature = temperature;
        });
    }

    pub fn set_project(&self, id: &str, project: Project) -> Result<(), ChatError> {
        return self.with_session(id, |session| {
            session.project = project;
        });
    }

    /// Marks the session busy. Only one exchange may be in flight at a time.
    pub fn begin_exchange(&self, id: &str) -> Result<Session, ChatError> {
        return self.with_session(id, |session| {
            if session.busy {
                return Err(ChatError::Busy);
            }
            session.busy = true;

            return Ok(session.clone());
        })?;
    }

    pub fn remove(&self, id: &str) -> Option<Session> {
        return self.sessions.remove(id).map(|(_, session)| return session);
    }
}
