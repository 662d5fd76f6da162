use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registered user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Caller-supplied timestamp label, stored verbatim
    pub time: String,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted when creating a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub time: String,
}

impl NewUser {
    /// Check that every field has non-whitespace content
    ///
    /// Returns the message naming the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        for (field, value) in [
            ("username", &self.username),
            ("email", &self.email),
            ("time", &self.time),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{} cannot be empty", field));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str, time: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            time: time.to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_complete_user() {
        assert!(new_user("ana", "ana@example.com", "00:42").validate().is_ok());
    }

    #[test]
    fn test_validate_names_offending_field() {
        assert_eq!(
            new_user("", "ana@example.com", "00:42").validate(),
            Err("username cannot be empty".to_string())
        );
        assert_eq!(
            new_user("ana", "  ", "00:42").validate(),
            Err("email cannot be empty".to_string())
        );
        assert_eq!(
            new_user("ana", "ana@example.com", "\t").validate(),
            Err("time cannot be empty".to_string())
        );
    }
}
