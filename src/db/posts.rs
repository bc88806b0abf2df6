use diesel::pg::PgConnection;
use diesel::prelude::*;

use crate::db::models::{NewPost, Post, PostForm};
use crate::db::schema::posts;

/// Read/write access to post rows. Misses are reported as `Ok(None)`;
/// storage errors are returned untranslated.
pub trait PostRepository {
    fn find_post(&mut self, post_id: i32) -> QueryResult<Option<Post>>;
    fn list_posts(&mut self) -> QueryResult<Vec<Post>>;
    fn create_post(&mut self, new_post: NewPost) -> QueryResult<Post>;
    fn update_post(&mut self, post: Post, form: &PostForm) -> QueryResult<Post>;
    fn delete_post(&mut self, post: &Post) -> QueryResult<()>;
}

impl PostRepository for PgConnection {
    fn find_post(&mut self, post_id: i32) -> QueryResult<Option<Post>> {
        posts::table.find(post_id).first::<Post>(self).optional()
    }

    fn list_posts(&mut self) -> QueryResult<Vec<Post>> {
        posts::table.order(posts::id.asc()).load::<Post>(self)
    }

    fn create_post(&mut self, new_post: NewPost) -> QueryResult<Post> {
        diesel::insert_into(posts::table)
            .values(&new_post)
            .get_result::<Post>(self)
    }

    fn update_post(&mut self, post: Post, form: &PostForm) -> QueryResult<Post> {
        diesel::update(posts::table.find(post.id))
            .set(form)
            .get_result::<Post>(self)
    }

    fn delete_post(&mut self, post: &Post) -> QueryResult<()> {
        diesel::delete(posts::table.find(post.id))
            .execute(self)
            .map(|_| ())
    }
}
