pub mod auth;
pub mod schedule;
