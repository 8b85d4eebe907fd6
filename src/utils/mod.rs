pub mod password;
pub mod rate_limiter;
pub mod token;
