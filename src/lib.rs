//! Admin back-office for a portfolio site: a session-gated dashboard over
//! contact messages and portfolio projects, served as a JSON API.

pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod managers;
pub mod middleware;
pub mod models;
pub mod panel;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;
