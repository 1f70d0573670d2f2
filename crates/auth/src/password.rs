//! Password hashing and verification utilities using Argon2id.
//!
//! Hashes are stored as `$argon2id$v=19$m=<kib>,t=<iterations>,p=<lanes>$<salt>$<hash>`
//! with standard base64 salt and hash, so the cost parameters travel with
//! every stored hash and can be raised without invalidating old accounts.

use argon2::{Algorithm, Argon2, Params, Version};
use base64::prelude::*;
use rand::{rng, RngCore};
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;
use thiserror::Error;

/// Errors that can occur during password operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Hashing failed: {0}")]
    HashingFailed(String),

    #[error("Verification failed: password does not match")]
    VerificationFailed,

    #[error("Invalid hash format")]
    InvalidHashFormat,

    #[error("Base64 decoding failed: {0}")]
    DecodingFailed(#[from] base64::DecodeError),
}

/// Configuration for Argon2id password hashing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordConfig {
    /// Memory cost in KiB (default: 15 MiB = 15360 KiB)
    pub memory_cost: u32,
    /// Number of iterations (default: 3)
    pub time_cost:   u32,
    /// Number of lanes (default: 2)
    pub parallelism: u32,
    /// Length of the generated hash (default: 32 bytes)
    pub hash_length: u32,
    /// Length of the salt (default: 16 bytes)
    pub salt_length: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_cost: 15360, // 15 MiB
            time_cost:   3,
            parallelism: 2,
            hash_length: 32,
            salt_length: 16,
        }
    }
}

fn argon2(memory_cost: u32, time_cost: u32, parallelism: u32, hash_length: usize) -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(memory_cost, time_cost, parallelism, Some(hash_length))
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a password using Argon2id.
///
/// # Example
///
/// ```
/// use auth::password::{hash_password, PasswordConfig};
/// use secrecy::SecretString;
///
/// let password = SecretString::from("my_secure_password".to_string());
/// let hash = hash_password(&password, None).unwrap();
/// ```
pub fn hash_password(password: &SecretString, config: Option<PasswordConfig>) -> Result<SecretString, PasswordError> {
    let config = config.unwrap_or_default();

    let mut salt = vec![0u8; config.salt_length as usize];
    rng().fill_bytes(&mut salt);

    let argon2 = argon2(
        config.memory_cost,
        config.time_cost,
        config.parallelism,
        config.hash_length as usize,
    )?;

    let mut output = vec![0u8; config.hash_length as usize];
    argon2
        .hash_password_into(password.expose_secret().as_bytes(), &salt, &mut output)
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

    let hash_format = format!(
        "$argon2id$v=19$m={},t={},p={}${}${}",
        config.memory_cost,
        config.time_cost,
        config.parallelism,
        BASE64_STANDARD.encode(&salt),
        BASE64_STANDARD.encode(&output)
    );

    Ok(SecretString::from(hash_format))
}

/// Cost parameters parsed from the `m=..,t=..,p=..` segment of a stored hash.
fn parse_params(params: &str) -> Result<(u32, u32, u32), PasswordError> {
    let mut memory_cost = None;
    let mut time_cost = None;
    let mut parallelism = None;

    for param in params.split(',') {
        let (key, value) = param.split_once('=').ok_or(PasswordError::InvalidHashFormat)?;
        let value: u32 = value.parse().map_err(|_| PasswordError::InvalidHashFormat)?;
        match key {
            "m" => memory_cost = Some(value),
            "t" => time_cost = Some(value),
            "p" => parallelism = Some(value),
            _ => return Err(PasswordError::InvalidHashFormat),
        }
    }

    match (memory_cost, time_cost, parallelism) {
        (Some(m), Some(t), Some(p)) => Ok((m, t, p)),
        _ => Err(PasswordError::InvalidHashFormat),
    }
}

/// Verifies a password against a stored hash.
///
/// # Example
///
/// ```
/// use auth::password::{hash_password, verify_password};
/// use secrecy::{ExposeSecret, SecretString};
///
/// let password = SecretString::from("my_secure_password".to_string());
/// let hash = hash_password(&password, None).unwrap();
///
/// assert!(verify_password(&password, hash.expose_secret()).is_ok());
/// ```
pub fn verify_password(password: &SecretString, expected_hash: &str) -> Result<(), PasswordError> {
    // ["", "argon2id", "v=19", "m=..,t=..,p=..", "<salt>", "<hash>"]
    let parts: Vec<&str> = expected_hash.split('$').collect();
    let [_, "argon2id", "v=19", params, salt_b64, hash_b64] = parts.as_slice()
    else {
        return Err(PasswordError::InvalidHashFormat);
    };

    let (memory_cost, time_cost, parallelism) = parse_params(params)?;
    let salt = BASE64_STANDARD.decode(salt_b64)?;
    let stored_hash = BASE64_STANDARD.decode(hash_b64)?;

    let argon2 = argon2(memory_cost, time_cost, parallelism, stored_hash.len())?;

    let mut computed_hash = vec![0u8; stored_hash.len()];
    argon2
        .hash_password_into(
            password.expose_secret().as_bytes(),
            &salt,
            &mut computed_hash,
        )
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

    if computed_hash.as_slice().ct_eq(&stored_hash).into() {
        Ok(())
    }
    else {
        Err(PasswordError::VerificationFailed)
    }
}

/// Rules a new password has to satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length:               usize,
    pub max_length:               usize,
    pub require_digit:            bool,
    pub require_uppercase:        bool,
    pub require_lowercase:        bool,
    pub require_non_alphanumeric: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length:               12,
            max_length:               256,
            require_digit:            true,
            require_uppercase:        true,
            require_lowercase:        true,
            require_non_alphanumeric: false,
        }
    }
}

impl PasswordPolicy {
    /// Checks a password, returning every rule it breaks.
    pub fn validate(&self, password: &str) -> Result<(), Vec<PasswordValidationError>> {
        let mut errors = Vec::new();
        let length = password.chars().count();

        if length < self.min_length {
            errors.push(PasswordValidationError::TooShort(self.min_length));
        }
        if length > self.max_length {
            errors.push(PasswordValidationError::TooLong(self.max_length));
        }
        if self.require_uppercase && !password.chars().any(char::is_uppercase) {
            errors.push(PasswordValidationError::MissingUppercase);
        }
        if self.require_lowercase && !password.chars().any(char::is_lowercase) {
            errors.push(PasswordValidationError::MissingLowercase);
        }
        if self.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            errors.push(PasswordValidationError::MissingDigit);
        }
        if self.require_non_alphanumeric &&
            !password
                .chars()
                .any(|c| !c.is_alphanumeric() && !c.is_whitespace())
        {
            errors.push(PasswordValidationError::MissingSpecial);
        }

        if errors.is_empty() {
            Ok(())
        }
        else {
            Err(errors)
        }
    }
}

/// Errors for password validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordValidationError {
    #[error("Password must be at least {0} characters long")]
    TooShort(usize),

    #[error("Password must be at most {0} characters long")]
    TooLong(usize),

    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,

    #[error("Password must contain at least one lowercase letter")]
    MissingLowercase,

    #[error("Password must contain at least one digit")]
    MissingDigit,

    #[error("Password must contain at least one special character")]
    MissingSpecial,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_config() -> Option<PasswordConfig> {
        Some(PasswordConfig {
            memory_cost: 1024,
            time_cost: 1,
            parallelism: 1,
            ..Default::default()
        })
    }

    #[test]
    fn test_hash_and_verify() {
        let password = SecretString::from("TestPassword123".to_string());
        let hash = hash_password(&password, cheap_config()).unwrap();
        assert!(hash.expose_secret().starts_with("$argon2id$v=19$m=1024,t=1,p=1$"));
        let result = verify_password(&password, hash.expose_secret());
        assert!(result.is_ok(), "Verification failed: {:?}", result);
    }

    #[test]
    fn test_default_config_round_trip() {
        let password = SecretString::from("CorrectHorse42Battery".to_string());
        let hash = hash_password(&password, None).unwrap();
        assert!(verify_password(&password, hash.expose_secret()).is_ok());
    }

    #[test]
    fn test_wrong_password_fails() {
        let password = SecretString::from("CorrectPassword".to_string());
        let wrong_password = SecretString::from("WrongPassword".to_string());
        let hash = hash_password(&password, cheap_config()).unwrap();
        assert!(matches!(
            verify_password(&wrong_password, hash.expose_secret()),
            Err(PasswordError::VerificationFailed)
        ));
    }

    #[test]
    fn test_salts_differ() {
        let password = SecretString::from("SamePassword123".to_string());
        let first = hash_password(&password, cheap_config()).unwrap();
        let second = hash_password(&password, cheap_config()).unwrap();
        assert_ne!(first.expose_secret(), second.expose_secret());
    }

    #[test]
    fn test_malformed_hashes_rejected() {
        let password = SecretString::from("irrelevant".to_string());
        for hash in [
            "",
            "plain-text",
            "$argon2i$v=19$m=1024,t=1,p=1$c2FsdA$aGFzaA",
            "$argon2id$v=16$m=1024,t=1,p=1$c2FsdA$aGFzaA",
            "$argon2id$v=19$m=1024,t=1$c2FsdA$aGFzaA",
            "$argon2id$v=19$m=abc,t=1,p=1$c2FsdA$aGFzaA",
        ] {
            assert!(
                matches!(verify_password(&password, hash), Err(PasswordError::InvalidHashFormat)),
                "accepted {hash:?}"
            );
        }
    }

    #[test]
    fn test_parse_params_any_order() {
        assert_eq!(parse_params("p=2,m=4096,t=3").unwrap(), (4096, 3, 2));
    }

    #[test]
    fn test_default_policy() {
        let policy = PasswordPolicy::default();
        assert!(policy.validate("LongEnough123").is_ok());
        // Symbols are allowed but not required.
        assert!(policy.validate("LongEnough123!").is_ok());

        let errors = policy.validate("abc").unwrap_err();
        assert!(errors.contains(&PasswordValidationError::TooShort(12)));
        assert!(errors.contains(&PasswordValidationError::MissingUppercase));
        assert!(errors.contains(&PasswordValidationError::MissingDigit));
        assert!(!errors.contains(&PasswordValidationError::MissingSpecial));
    }

    #[test]
    fn test_policy_requiring_symbols() {
        let policy = PasswordPolicy {
            require_non_alphanumeric: true,
            ..Default::default()
        };
        assert_eq!(
            policy.validate("LongEnough123").unwrap_err(),
            vec![PasswordValidationError::MissingSpecial]
        );
    }

    #[test]
    fn test_policy_counts_characters_not_bytes() {
        let policy = PasswordPolicy::default();
        // 11 characters, more than 12 bytes.
        assert!(policy.validate("Äbcdéfgh1jk").is_err());
    }
}
