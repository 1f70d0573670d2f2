//! # Data Transfer Objects Module
//!
//! Request and response types for API and account endpoints. Resource DTOs
//! mirror their entities minus navigation properties; each one converts from
//! its entity model and back into an active model, which is the only mapping
//! path between the two shapes.

use serde::{de::DeserializeOwned, Serialize};
use validator::{Validate, ValidationError};

pub mod account;
pub mod dashboard;
pub mod managers;
pub mod projects;
pub mod team_members;

pub use managers::ManagerDto;
pub use projects::ProjectDto;
pub use team_members::TeamMemberDto;

/// Required text: rejects empty and whitespace-only values.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// A validated resource shape exchanged on the `/api/{resource}` routes.
pub trait ResourceDto: Serialize + DeserializeOwned + Validate + Send + Sync + 'static {
    /// Identifier carried in the payload, 0 when the client omitted it.
    fn id(&self) -> i32;
}
