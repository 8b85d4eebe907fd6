pub mod auth;
pub mod health;
pub mod messages;
pub mod projects;
pub mod public;
