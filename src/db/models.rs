use crate::db::schema::{posts, users};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Stored user row. Not serializable: the password hash must never reach a
/// response body, use [`UserOut`] instead.
#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = users)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct UserForm {
    pub email: String,
    pub password: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct UserOut {
    pub id: i32,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserOut {
    fn from(user: User) -> Self {
        UserOut {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Queryable, Identifiable, Serialize, Deserialize)]
#[diesel(table_name = posts)]
pub struct Post {
    pub id: i32,
    pub owner_id: i32,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

/// Body of both `POST /posts` and `PUT /posts/{id}`. An update overwrites
/// every field, so an omitted `published` resets the post to published.
#[derive(Debug, Clone, Serialize, Deserialize, AsChangeset)]
#[diesel(table_name = posts)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    #[serde(default = "published_by_default")]
    pub published: bool,
}

fn published_by_default() -> bool {
    true
}

impl PostForm {
    /// Overwrites the mutable fields of `post`. Identity, ownership and
    /// creation time are left alone.
    pub fn apply_to(&self, post: &mut Post) {
        post.title = self.title.clone();
        post.content = self.content.clone();
        post.published = self.published;
    }
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = posts)]
pub struct NewPost {
    pub owner_id: i32,
    pub title: String,
    pub content: String,
    pub published: bool,
}

impl NewPost {
    pub fn owned_by(owner_id: i32, form: PostForm) -> Self {
        NewPost {
            owner_id,
            title: form.title,
            content: form.content,
            published: form.published,
        }
    }
}

/// Response envelope nesting a post under the `post` key.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PostOut {
    pub post: Post,
}

impl From<Post> for PostOut {
    fn from(post: Post) -> Self {
        PostOut { post }
    }
}

/// Paging and search parameters of `GET /posts`. They are parsed so that
/// clients sending them are not rejected, but the listing does not apply
/// them yet.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub skip: i64,
    #[serde(default)]
    pub search: String,
}

fn default_limit() -> i64 {
    10
}

impl Default for ListParams {
    fn default() -> Self {
        ListParams {
            limit: default_limit(),
            skip: 0,
            search: String::new(),
        }
    }
}
