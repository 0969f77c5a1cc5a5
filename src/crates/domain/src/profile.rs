use crate::value::ProfileId;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Database error: {0}")]
    DbErr(String),
    #[error("Profile not found: {0}")]
    NotFound(String),
    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileRole {
    Admin,
    #[default]
    User,
}

impl ProfileRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileRole::Admin => "ROLE_ADMIN",
            ProfileRole::User => "ROLE_USER",
        }
    }
}

impl FromStr for ProfileRole {
    type Err = ProfileError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROLE_ADMIN" | "ADMIN" => Ok(ProfileRole::Admin),
            "ROLE_USER" | "USER" => Ok(ProfileRole::User),
            _ => Err(ProfileError::UnknownRole(s.to_string())),
        }
    }
}

impl fmt::Display for ProfileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user profile owned by the account system. The catalog only reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    pub email: String,
    pub role: ProfileRole,
    pub deleted_at: Option<NaiveDateTime>,
}

impl Profile {
    pub fn is_admin(&self) -> bool {
        self.role == ProfileRole::Admin
    }

    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Looks up a profile by email, ignoring soft-deleted profiles.
    async fn find_live_by_email(&self, email: &str) -> Result<Option<Profile>, ProfileError>;
}
