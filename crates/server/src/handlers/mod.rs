//! # Request Handlers
//!
//! - [`crud`]: the five REST operations, generic over [`CrudService`](crate::services::CrudService)
//! - [`related`]: child collections of a manager or project
//! - [`dashboard`]: portfolio summary for the signed-in user
//! - [`account`]: browser account flows
//! - [`service`]: health and service metadata

pub mod account;
pub mod crud;
pub mod dashboard;
pub mod related;
pub mod service;
