//! # Account Data Transfer Objects
//!
//! Form-encoded request bodies for the browser account flows and the JSON
//! shapes returned by the account pages.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use entity::{app_users, Department};
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationErrors};

use super::not_blank;

/// Registration form. Field names also accept the PascalCase names posted
/// by the server-rendered forms.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterForm {
    #[serde(alias = "Email")]
    #[validate(email(message = "Invalid email address."))]
    pub email:            String,
    /// Required by the form; the account's user name is always its email.
    #[serde(alias = "UserName")]
    #[validate(custom(function = "not_blank", message = "Username is required."))]
    pub user_name:        String,
    #[serde(alias = "Name")]
    #[validate(
        custom(function = "not_blank", message = "Name is required."),
        length(max = 100, message = "Name must not exceed 100 characters.")
    )]
    pub name:             String,
    #[serde(alias = "Department")]
    pub department:       Department,
    #[serde(alias = "Password")]
    #[validate(custom(function = "not_blank", message = "Password is required."))]
    pub password:         String,
    #[serde(alias = "ConfirmPassword")]
    #[validate(must_match(other = "password", message = "Passwords do not match."))]
    pub confirm_password: String,
}

/// Sign-in form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(alias = "Email")]
    #[validate(email(message = "Invalid email address."))]
    pub email:       String,
    #[serde(alias = "Password")]
    #[validate(custom(function = "not_blank", message = "Password is required."))]
    pub password:    String,
    #[serde(default, alias = "RememberMe", deserialize_with = "checkbox")]
    pub remember_me: bool,
}

/// Query string of `POST /account/login`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginQuery {
    #[serde(rename = "returnUrl", alias = "ReturnUrl", alias = "return_url", default)]
    pub return_url: Option<String>,
}

/// Profile settings form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SettingsForm {
    #[serde(alias = "Name")]
    #[validate(
        custom(function = "not_blank", message = "Full Name is required."),
        length(max = 100, message = "Full Name must not exceed 100 characters.")
    )]
    pub name:       String,
    #[serde(alias = "Email")]
    #[validate(email(message = "Invalid email address."))]
    pub email:      String,
    #[serde(alias = "Department")]
    pub department: Department,
}

/// Password change form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordForm {
    #[serde(alias = "CurrentPassword")]
    #[validate(custom(function = "not_blank", message = "Current Password is required."))]
    pub current_password: String,
    #[serde(alias = "NewPassword")]
    #[validate(length(
        min = 12,
        max = 100,
        message = "The New Password must be at least 12 characters long."
    ))]
    pub new_password:     String,
    #[serde(alias = "ConfirmPassword")]
    #[validate(must_match(
        other = "new_password",
        message = "The new password and confirmation password do not match."
    ))]
    pub confirm_password: String,
}

/// HTML checkboxes post `on`; hidden-field fallbacks post `true`/`false`.
fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(matches!(
        value.to_ascii_lowercase().as_str(),
        "on" | "true" | "1" | "yes"
    ))
}

/// The signed-in user's profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id:         String,
    pub name:       String,
    pub email:      String,
    pub user_name:  String,
    pub department: Department,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture:    Option<String>,
}

impl From<app_users::Model> for ProfileResponse {
    fn from(user: app_users::Model) -> Self {
        Self {
            id:         user.id,
            name:       user.name,
            email:      user.email,
            user_name:  user.user_name,
            department: user.department,
            picture:    user.picture,
        }
    }
}

/// Current values shown on the settings page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub name:       String,
    pub email:      String,
    pub department: Department,
}

impl From<app_users::Model> for SettingsResponse {
    fn from(user: app_users::Model) -> Self {
        Self {
            name:       user.name,
            email:      user.email,
            department: user.department,
        }
    }
}

/// Form-level errors shown back to the user. Rendered with status 200 since
/// account flows are browser forms, not API calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormErrorResponse {
    pub success: bool,
    pub errors:  Vec<String>,
}

impl FormErrorResponse {
    pub fn new(errors: Vec<String>) -> Self {
        Self {
            success: false,
            errors,
        }
    }

    pub fn single(message: impl ToString) -> Self { Self::new(vec![message.to_string()]) }
}

impl From<ValidationErrors> for FormErrorResponse {
    fn from(errors: ValidationErrors) -> Self {
        let messages = error::FieldError::from_validation_errors(&errors)
            .into_iter()
            .map(|field| field.message)
            .collect();
        Self::new(messages)
    }
}

impl IntoResponse for FormErrorResponse {
    fn into_response(self) -> Response { Json(self).into_response() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_form(password: &str, confirm: &str) -> RegisterForm {
        RegisterForm {
            email:            "ann@x.com".to_string(),
            user_name:        "ann".to_string(),
            name:             "Ann".to_string(),
            department:       Department::Hr,
            password:         password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_register_passwords_must_match() {
        assert!(register_form("Secret123456", "Secret123456").validate().is_ok());

        let response = FormErrorResponse::from(
            register_form("Secret123456", "Secret654321")
                .validate()
                .unwrap_err(),
        );
        assert!(!response.success);
        assert_eq!(response.errors, vec!["Passwords do not match.".to_string()]);
    }

    #[test]
    fn test_register_rejects_whitespace_only_fields() {
        let mut form = register_form("   ", "   ");
        form.user_name = "  ".to_string();
        form.name = "\t".to_string();

        let response = FormErrorResponse::from(form.validate().unwrap_err());
        assert!(response.errors.contains(&"Username is required.".to_string()));
        assert!(response.errors.contains(&"Name is required.".to_string()));
        assert!(response.errors.contains(&"Password is required.".to_string()));
    }

    #[test]
    fn test_settings_rejects_blank_name() {
        let form = SettingsForm {
            name:       "   ".to_string(),
            email:      "ann@x.com".to_string(),
            department: Department::Hr,
        };
        let response = FormErrorResponse::from(form.validate().unwrap_err());
        assert_eq!(response.errors, vec!["Full Name is required.".to_string()]);
    }

    #[test]
    fn test_forms_accept_pascal_case_names() {
        let form: RegisterForm = serde_json::from_value(serde_json::json!({
            "Email": "ann@x.com",
            "UserName": "ann",
            "Name": "Ann",
            "Department": "Hr",
            "Password": "Secret123456",
            "ConfirmPassword": "Secret123456"
        }))
        .unwrap();
        assert_eq!(form.user_name, "ann");
        assert!(form.validate().is_ok());

        let form: LoginForm = serde_json::from_value(serde_json::json!({
            "Email": "ann@x.com",
            "Password": "p",
            "RememberMe": "true"
        }))
        .unwrap();
        assert!(form.remember_me);

        let form: ChangePasswordForm = serde_json::from_value(serde_json::json!({
            "CurrentPassword": "old",
            "NewPassword": "BrandNewSecret77",
            "ConfirmPassword": "BrandNewSecret77"
        }))
        .unwrap();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_change_password_length() {
        let form = ChangePasswordForm {
            current_password: "old".to_string(),
            new_password:     "short".to_string(),
            confirm_password: "short".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("new_password"));
    }

    #[test]
    fn test_remember_me_checkbox_values() {
        let form: LoginForm =
            serde_json::from_value(serde_json::json!({"email": "a@x.com", "password": "p", "remember_me": "on"}))
                .unwrap();
        assert!(form.remember_me);

        let form: LoginForm =
            serde_json::from_value(serde_json::json!({"email": "a@x.com", "password": "p"})).unwrap();
        assert!(!form.remember_me);
    }

    #[test]
    fn test_login_query_aliases() {
        let query: LoginQuery = serde_json::from_value(serde_json::json!({"ReturnUrl": "/account/profile"})).unwrap();
        assert_eq!(query.return_url.as_deref(), Some("/account/profile"));
    }
}
