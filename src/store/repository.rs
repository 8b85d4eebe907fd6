use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    models::{
        credential::{Credential, LoginLog},
        message::{ContactMessage, NewContactMessage},
        project::{Project, ProjectFields},
    },
    store::error::StoreResult,
};

pub const CONTACTS: &str = "contacts";
pub const PROJECTS: &str = "projects";
pub const CREDENTIALS: &str = "secret-login";
pub const LOGIN_LOGS: &str = "admin-login-logs";

/// The `contacts` collection.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Every message, newest `timestamp` first.
    async fn list_recent(&self) -> StoreResult<Vec<ContactMessage>>;

    async fn count(&self) -> StoreResult<usize>;

    /// Messages with `timestamp >= since`.
    async fn count_since(&self, since: DateTime<Utc>) -> StoreResult<usize>;

    async fn insert(
        &self,
        message: NewContactMessage,
        timestamp: DateTime<Utc>,
    ) -> StoreResult<ContactMessage>;

    /// Fails with `NotFound` when the id is absent.
    async fn delete(&self, id: &str) -> StoreResult<()>;
}

/// The `projects` collection. Writes are unconditional.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Every project, newest `createdAt` first.
    async fn list_recent(&self) -> StoreResult<Vec<Project>>;

    async fn insert(
        &self,
        fields: ProjectFields,
        created_at: DateTime<Utc>,
    ) -> StoreResult<Project>;

    /// Overwrites every field except `id`; `createdAt` becomes `created_at`.
    async fn update(
        &self,
        id: &str,
        fields: ProjectFields,
        created_at: DateTime<Utc>,
    ) -> StoreResult<Project>;

    async fn delete(&self, id: &str) -> StoreResult<()>;
}

#[async_trait]
pub trait CredentialRepository: Send + Sync {
    async fn list(&self) -> StoreResult<Vec<Credential>>;

    async fn insert(&self, credential: Credential) -> StoreResult<()>;
}

#[async_trait]
pub trait LoginLogRepository: Send + Sync {
    async fn record(&self, entry: LoginLog) -> StoreResult<()>;

    async fn count(&self) -> StoreResult<usize>;
}
