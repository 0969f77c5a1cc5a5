use domain::profile::{Profile, ProfileRole};
use domain::value::ProfileId;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The profile on whose behalf a request runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub profile_id: ProfileId,
    pub email: String,
    pub role: ProfileRole,
}

impl From<&Profile> for Actor {
    fn from(profile: &Profile) -> Self {
        Self {
            profile_id: profile.id.clone(),
            email: profile.email.clone(),
            role: profile.role,
        }
    }
}

/// Request-scoped data handed to every catalog call.
#[derive(Debug, Clone, Default)]
pub struct AppContext {
    pub request_id: RequestId,
    pub actor: Option<Actor>,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            request_id: RequestId::new(),
            actor: None,
        }
    }

    pub fn with_actor(self, profile: &Profile) -> Self {
        Self {
            actor: Some(Actor::from(profile)),
            ..self
        }
    }

    pub fn is_admin(&self) -> bool {
        self.actor
            .as_ref()
            .is_some_and(|actor| actor.role == ProfileRole::Admin)
    }
}

impl fmt::Display for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.actor {
            Some(actor) => write!(f, "request={} actor={}", self.request_id, actor.email),
            None => write!(f, "request={} actor=anonymous", self.request_id),
        }
    }
}
