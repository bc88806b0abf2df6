//! Volatile store behind the same repository traits as PostgreSQL.
//!
//! It mirrors the table constraints (unique email, post owner must exist)
//! and reports violations as diesel errors, so handlers behave the same on
//! either backend. Used by the test-suite and for running without a database.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use diesel::result::{DatabaseErrorKind, Error as DieselError, QueryResult};
use parking_lot::Mutex;

use crate::db::models::{NewPost, NewUser, Post, PostForm, User};
use crate::db::{PostRepository, Session, SessionProvider, UserRepository};
use crate::types::error::ApiError;

#[derive(Debug, Clone, Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    posts: BTreeMap<i32, Post>,
    last_user_id: i32,
    last_post_id: i32,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionProvider for MemoryProvider {
    type Session = MemorySession;
    type Guard = Box<MemorySession>;

    fn acquire(&self) -> Result<Self::Guard, ApiError> {
        Ok(Box::new(MemorySession {
            tables: Arc::clone(&self.tables),
        }))
    }
}

#[derive(Debug)]
pub struct MemorySession {
    tables: Arc<Mutex<Tables>>,
}

fn violation(kind: DatabaseErrorKind, msg: &str) -> DieselError {
    DieselError::DatabaseError(kind, Box::new(msg.to_string()))
}

impl PostRepository for MemorySession {
    fn find_post(&mut self, post_id: i32) -> QueryResult<Option<Post>> {
        Ok(self.tables.lock().posts.get(&post_id).cloned())
    }

    fn list_posts(&mut self) -> QueryResult<Vec<Post>> {
        Ok(self.tables.lock().posts.values().cloned().collect())
    }

    fn create_post(&mut self, new_post: NewPost) -> QueryResult<Post> {
        let mut tables = self.tables.lock();
        if !tables.users.contains_key(&new_post.owner_id) {
            return Err(violation(
                DatabaseErrorKind::ForeignKeyViolation,
                "posts.owner_id does not reference an existing user",
            ));
        }
        tables.last_post_id += 1;
        let post = Post {
            id: tables.last_post_id,
            owner_id: new_post.owner_id,
            title: new_post.title,
            content: new_post.content,
            published: new_post.published,
            created_at: Utc::now(),
        };
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    fn update_post(&mut self, post: Post, form: &PostForm) -> QueryResult<Post> {
        let mut tables = self.tables.lock();
        let stored = tables.posts.get_mut(&post.id).ok_or(DieselError::NotFound)?;
        form.apply_to(stored);
        Ok(stored.clone())
    }

    fn delete_post(&mut self, post: &Post) -> QueryResult<()> {
        self.tables.lock().posts.remove(&post.id);
        Ok(())
    }
}

impl UserRepository for MemorySession {
    fn find_user(&mut self, user_id: i32) -> QueryResult<Option<User>> {
        Ok(self.tables.lock().users.get(&user_id).cloned())
    }

    fn list_users(&mut self) -> QueryResult<Vec<User>> {
        Ok(self.tables.lock().users.values().cloned().collect())
    }

    fn create_user(&mut self, new_user: NewUser) -> QueryResult<User> {
        let mut tables = self.tables.lock();
        if tables.users.values().any(|u| u.email == new_user.email) {
            return Err(violation(
                DatabaseErrorKind::UniqueViolation,
                "duplicate key value violates unique constraint \"users_email_key\"",
            ));
        }
        tables.last_user_id += 1;
        let user = User {
            id: tables.last_user_id,
            email: new_user.email,
            password: new_user.password,
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }
}

impl Session for MemorySession {
    fn transaction<T, F>(&mut self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut Self) -> Result<T, ApiError>,
    {
        let snapshot = self.tables.lock().clone();
        let result = f(self);
        if result.is_err() {
            *self.tables.lock() = snapshot;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Box<MemorySession> {
        MemoryProvider::new().acquire().unwrap()
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password: "hashed".to_string(),
        }
    }

    fn new_post(owner_id: i32) -> NewPost {
        NewPost {
            owner_id,
            title: "T".to_string(),
            content: "C".to_string(),
            published: true,
        }
    }

    #[test]
    fn duplicate_email_is_a_unique_violation() {
        let mut session = session();
        session.create_user(new_user("a@x.com")).unwrap();
        let err = session.create_user(new_user("a@x.com")).unwrap_err();
        assert!(matches!(
            err,
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
        ));
    }

    #[test]
    fn post_owner_must_exist() {
        let mut session = session();
        let err = session.create_post(new_post(42)).unwrap_err();
        assert!(matches!(
            err,
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)
        ));
    }

    #[test]
    fn ids_are_generated_in_order() {
        let mut session = session();
        let owner = session.create_user(new_user("a@x.com")).unwrap();
        let first = session.create_post(new_post(owner.id)).unwrap();
        let second = session.create_post(new_post(owner.id)).unwrap();
        assert_eq!(first.id + 1, second.id);
        let listed: Vec<i32> = session.list_posts().unwrap().iter().map(|p| p.id).collect();
        assert_eq!(listed, vec![first.id, second.id]);
    }

    #[test]
    fn sessions_share_the_same_tables() {
        let provider = MemoryProvider::new();
        let mut writer = provider.acquire().unwrap();
        let user = writer.create_user(new_user("a@x.com")).unwrap();
        let mut reader = provider.acquire().unwrap();
        assert_eq!(reader.find_user(user.id).unwrap().unwrap().email, "a@x.com");
    }

    #[test]
    fn failed_transaction_rolls_back() {
        let mut session = session();
        let result: Result<(), ApiError> = session.transaction(|s| {
            s.create_user(new_user("a@x.com"))?;
            Err(ApiError::Forbidden)
        });
        assert!(result.is_err());
        assert!(session.list_users().unwrap().is_empty());
    }
}
