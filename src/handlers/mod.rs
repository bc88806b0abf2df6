//! Endpoint logic, independent of the HTTP layer. Each function runs one
//! unit of work against the session it is handed.

use crate::auth::{credentials_error, Caller};
use crate::db::models::Post;
use crate::db::Session;
use crate::types::error::ApiError;

pub mod posts;
pub mod users;

/// Session and authenticated caller for a single request.
pub struct RequestContext<'a, S> {
    pub session: &'a mut S,
    pub caller: Caller,
}

impl<'a, S: Session> RequestContext<'a, S> {
    /// Binds a verified token identity to the session, rejecting identities
    /// whose user row no longer exists.
    pub fn open(session: &'a mut S, caller: Caller) -> Result<Self, ApiError> {
        if session.find_user(caller.id)?.is_none() {
            return Err(credentials_error());
        }
        Ok(RequestContext { session, caller })
    }
}

pub fn is_owner(post: &Post, caller: &Caller) -> bool {
    post.owner_id == caller.id
}

pub fn ensure_owner(post: &Post, caller: &Caller) -> Result<(), ApiError> {
    if is_owner(post, caller) {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}
