//! Blog backend: CRUD endpoints for posts and users over actix-web and
//! diesel.

pub mod auth;
pub mod config;
pub mod db;
pub mod handlers;
pub mod routes;
pub mod types;
