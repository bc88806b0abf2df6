use std::ops::DerefMut;

use diesel::pg::PgConnection;
use diesel::{
    prelude::*,
    r2d2::{self, ConnectionManager, PooledConnection},
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

use crate::types::error::ApiError;

pub mod memory;
pub mod models;
pub mod posts;
pub mod schema;
pub mod users;

pub use posts::PostRepository;
pub use users::UserRepository;

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// A storage handle scoped to one request.
pub trait Session: PostRepository + UserRepository + Sized {
    /// Runs `f` as one atomic unit of work: committed when it returns `Ok`,
    /// rolled back otherwise.
    fn transaction<T, F>(&mut self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut Self) -> Result<T, ApiError>;
}

impl Session for PgConnection {
    fn transaction<T, F>(&mut self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut Self) -> Result<T, ApiError>,
    {
        Connection::transaction(self, f)
    }
}

/// Hands out sessions. The returned guard releases the session when dropped.
pub trait SessionProvider: Send + Sync + 'static {
    type Session: Session;
    type Guard: DerefMut<Target = Self::Session>;

    fn acquire(&self) -> Result<Self::Guard, ApiError>;
}

impl SessionProvider for DbPool {
    type Session = PgConnection;
    type Guard = PooledConnection<ConnectionManager<PgConnection>>;

    fn acquire(&self) -> Result<Self::Guard, ApiError> {
        Ok(self.get()?)
    }
}

pub fn build_pool(database_url: &str, max_size: u32) -> Result<DbPool, r2d2::PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    r2d2::Pool::builder().max_size(max_size).build(manager)
}

pub fn run_migrations(pool: &DbPool) -> anyhow::Result<()> {
    let mut conn = pool.get()?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| anyhow::anyhow!("failed to run migrations: {}", err))?;
    for migration in applied {
        info!("Applied migration {}", migration);
    }
    Ok(())
}
