use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest name the `users.name` column accepts
pub const MAX_USERNAME_CHARS: usize = 100;

/// bcrypt silently ignores input past this many bytes
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Username value object
///
/// # Invariants
/// - Surrounding whitespace is trimmed
/// - Non-empty
/// - At most 100 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    /// Creates a new Username value object
    ///
    /// # Example
    /// ```
    /// use stamp_api::domain::user::Username;
    ///
    /// let name = Username::new("  alice ").expect("valid name");
    /// assert_eq!(name.as_str(), "alice");
    /// ```
    pub fn new(name: impl AsRef<str>) -> Result<Self, String> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err("Name must not be empty".to_string());
        }
        if name.chars().count() > MAX_USERNAME_CHARS {
            return Err(format!(
                "Name must be at most {} characters",
                MAX_USERNAME_CHARS
            ));
        }
        Ok(Username(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Checks a plaintext password before it is hashed
pub fn check_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password must not be empty".to_string());
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(format!(
            "Password must be at most {} bytes",
            MAX_PASSWORD_BYTES
        ));
    }
    Ok(())
}
