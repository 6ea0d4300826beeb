use serde_json::Value;

use crate::core::error::{FieldError, ValidationError};
use crate::models::user::NewUser;
use crate::validation::{finish, missing, optional_text, required_text, FieldReader};

const MIN_PASSWORD_LEN: usize = 6;

/// Body of POST /api/register, before validation
#[derive(Debug, Default)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

impl RegisterRequest {
    /// Read the camelCase JSON body, collecting type errors per field
    pub fn from_json(body: &Value) -> (Self, Vec<FieldError>) {
        let mut reader = FieldReader::new(body);

        let request = Self {
            username: reader.read("username"),
            password: reader.read("password"),
            name: reader.read("name"),
            email: reader.read("email"),
            avatar_url: reader.read("avatarUrl"),
        };

        (request, reader.into_errors())
    }

    /// Read and validate a JSON body in one step
    pub fn parse(body: &Value) -> Result<NewUser, ValidationError> {
        let (request, errors) = Self::from_json(body);
        request.validate_with(errors)
    }

    /// Shape checks only; username uniqueness is checked against the store by the caller
    pub fn validate(self) -> Result<NewUser, ValidationError> {
        self.validate_with(Vec::new())
    }

    fn validate_with(self, mut errors: Vec<FieldError>) -> Result<NewUser, ValidationError> {
        let username = required_text("username", self.username, &mut errors);
        if !username.is_empty() {
            if !(3..=32).contains(&username.chars().count()) {
                errors.push(FieldError::new("username", "must be between 3 and 32 characters"));
            }
            if !username
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
            {
                errors.push(FieldError::new(
                    "username",
                    "may only contain letters, digits, '_' and '.'",
                ));
            }
        }

        // Passwords are taken verbatim, whitespace included
        let password = match self.password {
            Some(password) if password.chars().count() < MIN_PASSWORD_LEN => {
                errors.push(FieldError::new(
                    "password",
                    format!("must be at least {} characters", MIN_PASSWORD_LEN),
                ));
                password
            }
            Some(password) => password,
            None => {
                missing("password", &mut errors);
                String::new()
            }
        };

        let name = required_text("name", self.name, &mut errors);

        let email = required_text("email", self.email, &mut errors);
        if !email.is_empty() && !looks_like_email(&email) {
            errors.push(FieldError::new("email", "must be a valid email address"));
        }

        let avatar_url = optional_text(self.avatar_url);

        finish(errors, || NewUser {
            username,
            password,
            name,
            email,
            avatar_url,
        })
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    }
}
