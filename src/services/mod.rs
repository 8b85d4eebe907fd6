pub mod auth;
pub mod messages;
pub mod projects;
pub mod session;
