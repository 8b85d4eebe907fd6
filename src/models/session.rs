use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub authenticated: bool,
    pub login_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: String, login_at: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id,
            authenticated: true,
            login_at,
        }
    }

    pub fn expires_at(&self, ttl: Duration) -> DateTime<Utc> {
        self.login_at + ttl
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.authenticated && within_ttl(now, self.login_at, ttl)
    }
}

/// True while less than `ttl` has elapsed since `login_at`.
pub fn within_ttl(now: DateTime<Utc>, login_at: DateTime<Utc>, ttl: Duration) -> bool {
    now.signed_duration_since(login_at) < ttl
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AuthStatus {
    Checking,
    Authenticated,
    Unauthorized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UnauthorizedReason {
    MissingToken,
    InvalidToken,
    UnknownSession,
    Expired,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthCheck {
    Authenticated(Session),
    Unauthorized(UnauthorizedReason),
}

impl AuthCheck {
    pub fn status(&self) -> AuthStatus {
        match self {
            AuthCheck::Authenticated(_) => AuthStatus::Authenticated,
            AuthCheck::Unauthorized(_) => AuthStatus::Unauthorized,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthCheck::Authenticated(session) => Some(session),
            AuthCheck::Unauthorized(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn login_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn valid_just_before_ttl() {
        let session = Session::new("cred-1".into(), login_time());
        let now = login_time() + Duration::hours(24) - Duration::seconds(1);
        assert!(session.is_valid_at(now, Duration::hours(24)));
    }

    #[test]
    fn expired_at_and_after_ttl() {
        let session = Session::new("cred-1".into(), login_time());
        for elapsed in [24, 25, 24 * 30] {
            let now = login_time() + Duration::hours(elapsed);
            assert!(!session.is_valid_at(now, Duration::hours(24)));
        }
    }

    #[test]
    fn unauthenticated_flag_is_never_valid() {
        let mut session = Session::new("cred-1".into(), login_time());
        session.authenticated = false;
        assert!(!session.is_valid_at(login_time(), Duration::hours(24)));
    }

    #[test]
    fn expiry_is_login_plus_ttl() {
        let session = Session::new("cred-1".into(), login_time());
        assert_eq!(
            session.expires_at(Duration::hours(24)),
            Utc.with_ymd_and_hms(2026, 5, 2, 9, 0, 0).unwrap()
        );
    }
}
