use actix_web::web;

use crate::auth::PasswordHasher;
use crate::db::SessionProvider;
use crate::types::error::ApiError;

pub mod posts;
pub mod users;

/// Shared state handed to every route: where sessions come from and how
/// passwords are hashed.
pub struct AppState<P> {
    pub sessions: P,
    pub hasher: PasswordHasher,
}

impl<P: SessionProvider> AppState<P> {
    pub fn new(sessions: P, hasher: PasswordHasher) -> Self {
        AppState { sessions, hasher }
    }
}

/// Registers the post and user endpoints for sessions drawn from `P`.
/// Expects `web::Data<AppState<P>>` and `web::Data<TokenVerifier>` in the
/// app data.
pub fn configure<P: SessionProvider>(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _| ApiError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _| ApiError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _| ApiError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::resource("/posts")
            .route(web::get().to(posts::list_posts::<P>))
            .route(web::post().to(posts::create_post::<P>)),
    )
    .service(
        web::resource("/posts/{id}")
            .route(web::get().to(posts::read_post::<P>))
            .route(web::put().to(posts::update_post::<P>))
            .route(web::delete().to(posts::delete_post::<P>)),
    )
    .service(
        web::resource("/users")
            .route(web::get().to(users::get_users::<P>))
            .route(web::post().to(users::create_user::<P>)),
    )
    .service(web::resource("/users/{id}").route(web::get().to(users::get_user_by_id::<P>)));
}
