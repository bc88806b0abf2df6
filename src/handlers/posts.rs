use tracing::{debug, info};

use crate::db::models::{ListParams, NewPost, Post, PostForm};
use crate::db::{PostRepository, Session};
use crate::handlers::{ensure_owner, RequestContext};
use crate::types::error::ApiError;

fn find_post_or_404<S: PostRepository>(session: &mut S, post_id: i32) -> Result<Post, ApiError> {
    session
        .find_post(post_id)?
        .ok_or_else(|| ApiError::NotFound(format!("Post {} not found", post_id)))
}

pub fn list_posts<S: Session>(
    ctx: RequestContext<'_, S>,
    params: &ListParams,
) -> Result<Vec<Post>, ApiError> {
    // TODO: apply limit/skip/search once the filtering semantics are settled.
    debug!(
        "listing posts for user {} (limit={}, skip={}, search={:?} not applied)",
        ctx.caller.id, params.limit, params.skip, params.search
    );
    Ok(ctx.session.list_posts()?)
}

pub fn create_post<S: Session>(ctx: RequestContext<'_, S>, form: PostForm) -> Result<Post, ApiError> {
    let post = ctx
        .session
        .create_post(NewPost::owned_by(ctx.caller.id, form))?;
    info!("user {} created post {}", ctx.caller.id, post.id);
    Ok(post)
}

pub fn read_post<S: Session>(ctx: RequestContext<'_, S>, post_id: i32) -> Result<Post, ApiError> {
    find_post_or_404(ctx.session, post_id)
}

pub fn update_post<S: Session>(
    ctx: RequestContext<'_, S>,
    post_id: i32,
    form: PostForm,
) -> Result<Post, ApiError> {
    let caller = ctx.caller;
    let post = ctx.session.transaction(|session| {
        let post = find_post_or_404(session, post_id)?;
        ensure_owner(&post, &caller)?;
        Ok(session.update_post(post, &form)?)
    })?;
    info!("user {} updated post {}", caller.id, post.id);
    Ok(post)
}

pub fn delete_post<S: Session>(ctx: RequestContext<'_, S>, post_id: i32) -> Result<(), ApiError> {
    let caller = ctx.caller;
    ctx.session.transaction(|session| {
        let post = find_post_or_404(session, post_id)?;
        ensure_owner(&post, &caller)?;
        Ok(session.delete_post(&post)?)
    })?;
    info!("user {} deleted post {}", caller.id, post_id);
    Ok(())
}
