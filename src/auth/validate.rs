use lazy_static::lazy_static;
use regex::Regex;

use crate::auth::dto::{Credentials, NewUser};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Signup form as entered. The store itself does not re-validate, so screens
/// run `validate` before calling `register`.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Per-field signup errors; `None` means the field passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupErrors {
    pub full_name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
    pub confirm_password: Option<&'static str>,
}

impl SignupErrors {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.confirm_password.is_none()
    }
}

impl SignupForm {
    /// Check every field, returning trimmed registration input on success.
    /// The password itself is passed through untrimmed.
    pub fn validate(&self) -> Result<NewUser, SignupErrors> {
        let mut errors = SignupErrors::default();
        let name = self.full_name.trim();
        let email = self.email.trim();

        if name.is_empty() {
            errors.full_name = Some("Full name is required");
        }

        if email.is_empty() {
            errors.email = Some("Email is required");
        } else if !is_valid_email(email) {
            errors.email = Some("Enter a valid email");
        }

        if self.password.trim().is_empty() {
            errors.password = Some("Password is required");
        } else if self.password.trim().len() < 6 {
            errors.password = Some("Password must be at least 6 characters");
        }

        if self.confirm_password.trim().is_empty() {
            errors.confirm_password = Some("Confirm your password");
        } else if self.password != self.confirm_password {
            errors.confirm_password = Some("Passwords do not match");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

/// Login form as entered.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Per-field login errors; `None` means the field passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginErrors {
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl LoginErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

impl LoginForm {
    pub fn validate(&self) -> Result<Credentials, LoginErrors> {
        let mut errors = LoginErrors::default();
        let email = self.email.trim();

        if email.is_empty() {
            errors.email = Some("Email is required");
        } else if !is_valid_email(email) {
            errors.email = Some("Enter a valid email");
        }

        if self.password.is_empty() {
            errors.password = Some("Password is required");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Credentials {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}
