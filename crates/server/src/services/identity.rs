//! # Identity Provider
//!
//! Credential storage for application users. Handlers only see the
//! [`IdentityProvider`] trait; [`DbIdentityProvider`] implements it on the
//! `app_users` table with Argon2id hashes and the default password policy.

use async_trait::async_trait;
use auth::{
    hash_password,
    secrecy::{ExposeSecret, SecretString},
    verify_password,
    PasswordConfig,
    PasswordPolicy,
    PasswordValidationError,
};
use chrono::Utc;
use entity::{app_users, AppUsers, Department};
use sea_orm::{ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter, Set, SqlErr};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// Identity failures. Everything but the storage and hashing variants is a
/// user-facing form error.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Email '{0}' is already taken.")]
    DuplicateEmail(String),

    #[error("{}", join_policy_errors(.0))]
    PasswordPolicy(Vec<PasswordValidationError>),

    #[error("Invalid login attempt.")]
    InvalidCredentials,

    #[error("Incorrect password.")]
    IncorrectPassword,

    #[error("User not found.")]
    UserNotFound,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

fn join_policy_errors(errors: &[PasswordValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl IdentityError {
    /// Messages to show on the form, one per problem.
    pub fn messages(&self) -> Vec<String> {
        match self {
            IdentityError::PasswordPolicy(errors) => errors.iter().map(ToString::to_string).collect(),
            other => vec![other.to_string()],
        }
    }

    /// Storage or hashing faults that should surface as a server error.
    pub fn is_internal(&self) -> bool { matches!(self, IdentityError::Hashing(_) | IdentityError::Database(_)) }
}

impl From<IdentityError> for error::AppError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::Database(e) => e.into(),
            IdentityError::UserNotFound => error::AppError::not_found("User not found"),
            other if other.is_internal() => error::AppError::internal(other.to_string()),
            other => error::AppError::bad_request(other.to_string()),
        }
    }
}

/// Data collected by the registration form.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email:      String,
    pub name:       String,
    pub department: Department,
    pub password:   SecretString,
}

/// Editable profile fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name:       String,
    pub email:      String,
    pub department: Department,
}

/// Credential operations the account flows depend on.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Creates an account whose user name is its email.
    async fn register_user(&self, user: NewUser) -> Result<app_users::Model, IdentityError>;

    async fn verify_credentials(&self, email: &str, password: &SecretString) -> Result<app_users::Model, IdentityError>;

    async fn change_password(
        &self,
        user_id: &str,
        current_password: &SecretString,
        new_password: &SecretString,
    ) -> Result<(), IdentityError>;

    async fn find_user(&self, user_id: &str) -> Result<Option<app_users::Model>, IdentityError>;

    /// Email changes also move the user name and both normalized columns.
    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<app_users::Model, IdentityError>;
}

pub struct DbIdentityProvider {
    db:              DbConn,
    password_config: PasswordConfig,
    policy:          PasswordPolicy,
}

impl DbIdentityProvider {
    pub fn new(db: DbConn, password_config: PasswordConfig) -> Self {
        Self {
            db,
            password_config,
            policy: PasswordPolicy::default(),
        }
    }

    fn hash(&self, password: &SecretString) -> Result<String, IdentityError> {
        self.policy
            .validate(password.expose_secret())
            .map_err(IdentityError::PasswordPolicy)?;
        let hash = hash_password(password, Some(self.password_config.clone()))
            .map_err(|e| IdentityError::Hashing(e.to_string()))?;
        Ok(hash.expose_secret().to_string())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<app_users::Model>, IdentityError> {
        let user = AppUsers::find()
            .filter(app_users::Column::NormalizedEmail.eq(app_users::normalize(email)))
            .one(&self.db)
            .await?;
        Ok(user)
    }

    async fn require_user(&self, user_id: &str) -> Result<app_users::Model, IdentityError> {
        self.find_user(user_id).await?.ok_or(IdentityError::UserNotFound)
    }

    /// Rejects `email` when another account already uses it as email or user name.
    async fn ensure_email_free(&self, email: &str, except_user: Option<&str>) -> Result<(), IdentityError> {
        let normalized = app_users::normalize(email);
        let mut query = AppUsers::find().filter(
            app_users::Column::NormalizedEmail
                .eq(normalized.clone())
                .or(app_users::Column::NormalizedUserName.eq(normalized)),
        );
        if let Some(user_id) = except_user {
            query = query.filter(app_users::Column::Id.ne(user_id));
        }

        if query.one(&self.db).await?.is_some() {
            return Err(IdentityError::DuplicateEmail(email.trim().to_string()));
        }
        Ok(())
    }
}

fn map_unique_violation(err: DbErr, email: &str) -> IdentityError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => IdentityError::DuplicateEmail(email.trim().to_string()),
        _ => IdentityError::Database(err),
    }
}

#[async_trait]
impl IdentityProvider for DbIdentityProvider {
    async fn register_user(&self, user: NewUser) -> Result<app_users::Model, IdentityError> {
        self.ensure_email_free(&user.email, None).await?;
        let password_hash = self.hash(&user.password)?;

        let email = user.email.trim().to_string();
        let now = Utc::now();
        let created = app_users::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_name: Set(email.clone()),
            normalized_user_name: Set(app_users::normalize(&email)),
            email: Set(email.clone()),
            normalized_email: Set(app_users::normalize(&email)),
            name: Set(user.name),
            department: Set(user.department),
            picture: Set(None),
            password_hash: Set(password_hash),
            security_stamp: Set(Uuid::new_v4().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| map_unique_violation(e, &email))?;

        info!(user_id = %created.id, "User registered");
        Ok(created)
    }

    async fn verify_credentials(&self, email: &str, password: &SecretString) -> Result<app_users::Model, IdentityError> {
        let user = self
            .find_by_email(email)
            .await?
            .ok_or(IdentityError::InvalidCredentials)?;

        verify_password(password, &user.password_hash).map_err(|_| IdentityError::InvalidCredentials)?;
        Ok(user)
    }

    async fn change_password(
        &self,
        user_id: &str,
        current_password: &SecretString,
        new_password: &SecretString,
    ) -> Result<(), IdentityError> {
        let user = self.require_user(user_id).await?;
        verify_password(current_password, &user.password_hash).map_err(|_| IdentityError::IncorrectPassword)?;
        let password_hash = self.hash(new_password)?;

        let mut model: app_users::ActiveModel = user.into();
        model.password_hash = Set(password_hash);
        model.security_stamp = Set(Uuid::new_v4().to_string());
        model.updated_at = Set(Utc::now());
        model.update(&self.db).await?;

        info!(user_id = %user_id, "Password changed");
        Ok(())
    }

    async fn find_user(&self, user_id: &str) -> Result<Option<app_users::Model>, IdentityError> {
        Ok(AppUsers::find_by_id(user_id.to_string()).one(&self.db).await?)
    }

    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<app_users::Model, IdentityError> {
        let user = self.require_user(user_id).await?;
        let email = update.email.trim().to_string();
        let email_changed = user.email != email;

        if email_changed {
            self.ensure_email_free(&email, Some(user_id)).await?;
        }

        let mut model: app_users::ActiveModel = user.into();
        model.name = Set(update.name);
        model.department = Set(update.department);
        if email_changed {
            model.email = Set(email.clone());
            model.user_name = Set(email.clone());
            model.normalized_email = Set(app_users::normalize(&email));
            model.normalized_user_name = Set(app_users::normalize(&email));
        }
        model.updated_at = Set(Utc::now());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| map_unique_violation(e, &email))?;

        info!(user_id = %user_id, email_changed, "Profile updated");
        Ok(updated)
    }
}
