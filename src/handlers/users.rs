use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{info, warn};

use crate::auth::PasswordHasher;
use crate::db::models::{NewUser, User, UserForm};
use crate::db::UserRepository;
use crate::types::error::ApiError;

/// Registers a user. The password is hashed before it reaches storage; a
/// taken email is reported by the storage unique constraint.
pub fn create_user<S: UserRepository>(
    session: &mut S,
    hasher: &PasswordHasher,
    form: UserForm,
) -> Result<User, ApiError> {
    let new_user = NewUser {
        password: hasher.hash(&form.password)?,
        email: form.email,
    };
    let email = new_user.email.clone();

    let user = session.create_user(new_user).map_err(|err| match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            warn!("Registration attempted for existing email {}", email);
            ApiError::Conflict(format!("Email {} already exists", email))
        }
        other => other.into(),
    })?;
    info!("registered user {}", user.id);
    Ok(user)
}

pub fn list_users<S: UserRepository>(session: &mut S) -> Result<Vec<User>, ApiError> {
    Ok(session.list_users()?)
}

pub fn get_user<S: UserRepository>(session: &mut S, user_id: i32) -> Result<User, ApiError> {
    session
        .find_user(user_id)?
        .ok_or_else(|| ApiError::NotFound(format!("user {} not found", user_id)))
}
