pub mod credential;
pub mod message;
pub mod project;
pub mod requests;
pub mod responses;
pub mod session;
