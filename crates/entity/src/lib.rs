//! Entity definitions for the portfolio database
//!
//! This crate contains Sea-ORM entity definitions for the database models:
//! managers own projects, projects own team members, and application users
//! hold the sign-in credentials together with their sessions.

pub mod app_users;
pub use app_users::Entity as AppUsers;
pub mod enums;
pub use enums::{Department, Role};
pub mod managers;
pub use managers::Entity as Managers;
pub mod projects;
pub use projects::Entity as Projects;
pub mod team_members;
pub use team_members::Entity as TeamMembers;
pub mod user_sessions;
pub use user_sessions::Entity as UserSessions;
