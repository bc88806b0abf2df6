use diesel::pg::PgConnection;
use diesel::prelude::*;

use crate::db::models::{NewUser, User};
use crate::db::schema::users;

/// Read/write access to user rows. A duplicate email surfaces as a
/// `UniqueViolation` database error from `create_user`.
pub trait UserRepository {
    fn find_user(&mut self, user_id: i32) -> QueryResult<Option<User>>;
    fn list_users(&mut self) -> QueryResult<Vec<User>>;
    fn create_user(&mut self, new_user: NewUser) -> QueryResult<User>;
}

impl UserRepository for PgConnection {
    fn find_user(&mut self, user_id: i32) -> QueryResult<Option<User>> {
        users::table.find(user_id).first::<User>(self).optional()
    }

    fn list_users(&mut self) -> QueryResult<Vec<User>> {
        users::table.order(users::id.asc()).load::<User>(self)
    }

    fn create_user(&mut self, new_user: NewUser) -> QueryResult<User> {
        diesel::insert_into(users::table)
            .values(&new_user)
            .get_result::<User>(self)
    }
}
