use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::password::hash_password;
use crate::domain::repositories::{NewUser, RepositoryError, UserRepository};
use crate::domain::user::{check_password, Username};

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUserInput {
    pub name: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterUserResult {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Error)]
pub enum RegisterUserError {
    #[error("{0}")]
    Invalid(String),

    #[error("name is already taken")]
    NameTaken,

    #[error("failed to hash password: {0}")]
    Hash(String),

    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for RegisterUserError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(_) => RegisterUserError::NameTaken,
            other => RegisterUserError::Repository(other),
        }
    }
}

/// Registers a user: validate, hash, insert
pub async fn register_user(
    users: &dyn UserRepository,
    input: RegisterUserInput,
) -> Result<RegisterUserResult, RegisterUserError> {
    let name = Username::new(&input.name).map_err(RegisterUserError::Invalid)?;
    check_password(&input.password).map_err(RegisterUserError::Invalid)?;

    let password_hash = hash_password(&input.password).map_err(RegisterUserError::Hash)?;

    let user = users.create(NewUser { name, password_hash }).await?;

    Ok(RegisterUserResult {
        id: user.id,
        name: user.name.to_string(),
    })
}
