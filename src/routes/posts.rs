use actix_web::{web, HttpResponse};

use crate::auth::Caller;
use crate::db::models::{ListParams, PostForm, PostOut};
use crate::db::SessionProvider;
use crate::handlers::{self, RequestContext};
use crate::routes::AppState;
use crate::types::error::ApiError;

pub async fn list_posts<P: SessionProvider>(
    state: web::Data<AppState<P>>,
    caller: Caller,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, ApiError> {
    let fetched_posts = web::block(move || {
        let mut session = state.sessions.acquire()?;
        let ctx = RequestContext::open(&mut *session, caller)?;
        handlers::posts::list_posts(ctx, &params)
    })
    .await??;

    let body: Vec<PostOut> = fetched_posts.into_iter().map(PostOut::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

pub async fn create_post<P: SessionProvider>(
    state: web::Data<AppState<P>>,
    caller: Caller,
    post_form: web::Json<PostForm>,
) -> Result<HttpResponse, ApiError> {
    let new_post = web::block(move || {
        let mut session = state.sessions.acquire()?;
        let ctx = RequestContext::open(&mut *session, caller)?;
        handlers::posts::create_post(ctx, post_form.into_inner())
    })
    .await??;

    Ok(HttpResponse::Created().json(PostOut::from(new_post)))
}

pub async fn read_post<P: SessionProvider>(
    state: web::Data<AppState<P>>,
    caller: Caller,
    post_id: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let post = web::block(move || {
        let mut session = state.sessions.acquire()?;
        let ctx = RequestContext::open(&mut *session, caller)?;
        handlers::posts::read_post(ctx, post_id.into_inner())
    })
    .await??;

    Ok(HttpResponse::Ok().json(PostOut::from(post)))
}

pub async fn update_post<P: SessionProvider>(
    state: web::Data<AppState<P>>,
    caller: Caller,
    post_id: web::Path<i32>,
    post_form: web::Json<PostForm>,
) -> Result<HttpResponse, ApiError> {
    let post = web::block(move || {
        let mut session = state.sessions.acquire()?;
        let ctx = RequestContext::open(&mut *session, caller)?;
        handlers::posts::update_post(ctx, post_id.into_inner(), post_form.into_inner())
    })
    .await??;

    Ok(HttpResponse::Ok().json(PostOut::from(post)))
}

pub async fn delete_post<P: SessionProvider>(
    state: web::Data<AppState<P>>,
    caller: Caller,
    post_id: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    web::block(move || {
        let mut session = state.sessions.acquire()?;
        let ctx = RequestContext::open(&mut *session, caller)?;
        handlers::posts::delete_post(ctx, post_id.into_inner())
    })
    .await??;

    Ok(HttpResponse::NoContent().finish())
}
