use actix_web::{web, HttpResponse};

use crate::db::models::{UserForm, UserOut};
use crate::db::SessionProvider;
use crate::handlers;
use crate::routes::AppState;
use crate::types::error::ApiError;

pub async fn create_user<P: SessionProvider>(
    state: web::Data<AppState<P>>,
    new_user_form: web::Json<UserForm>,
) -> Result<HttpResponse, ApiError> {
    let new_user = web::block(move || {
        let mut session = state.sessions.acquire()?;
        handlers::users::create_user(&mut *session, &state.hasher, new_user_form.into_inner())
    })
    .await??;

    Ok(HttpResponse::Created().json(UserOut::from(new_user)))
}

pub async fn get_users<P: SessionProvider>(
    state: web::Data<AppState<P>>,
) -> Result<HttpResponse, ApiError> {
    let fetched_users = web::block(move || {
        let mut session = state.sessions.acquire()?;
        handlers::users::list_users(&mut *session)
    })
    .await??;

    let body: Vec<UserOut> = fetched_users.into_iter().map(UserOut::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

pub async fn get_user_by_id<P: SessionProvider>(
    state: web::Data<AppState<P>>,
    user_id: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let user = web::block(move || {
        let mut session = state.sessions.acquire()?;
        handlers::users::get_user(&mut *session, user_id.into_inner())
    })
    .await??;

    Ok(HttpResponse::Ok().json(UserOut::from(user)))
}
