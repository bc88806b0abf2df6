#![allow(dead_code)]

use blog_backend::auth::UserClaim;
use jsonwebtoken::{encode, EncodingKey, Header};

pub const SECRET: &str = "integration-test-secret";

/// Builds the full application over a fresh in-memory store.
macro_rules! test_app {
    () => {{
        use actix_web::{middleware, test, web, App};
        use blog_backend::auth::{PasswordHasher, TokenVerifier};
        use blog_backend::db::memory::MemoryProvider;
        use blog_backend::routes::{self, AppState};

        test::init_service(
            App::new()
                .wrap(middleware::NormalizePath::trim())
                .app_data(web::Data::new(AppState::new(
                    MemoryProvider::new(),
                    PasswordHasher::new(4),
                )))
                .app_data(web::Data::new(TokenVerifier::new($crate::common::SECRET)))
                .configure(routes::configure::<MemoryProvider>),
        )
        .await
    }};
}

pub fn token_for(user_id: i32) -> String {
    let exp = (chrono::Utc::now() + chrono::Duration::minutes(30)).timestamp();
    encode(
        &Header::default(),
        &UserClaim { exp, id: user_id },
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn bearer(user_id: i32) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token_for(user_id)))
}
