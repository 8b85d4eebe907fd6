use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::{
    models::{
        credential::{Credential, LoginLog},
        message::{ContactMessage, NewContactMessage},
        project::{Project, ProjectFields},
    },
    store::{
        error::{StoreError, StoreResult},
        repository::{
            CONTACTS, CredentialRepository, LoginLogRepository, MessageRepository, PROJECTS,
            ProjectRepository,
        },
    },
};

/// On-disk layout of the data file. Collection names match the hosted store.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub contacts: Vec<ContactMessage>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default, rename = "secret-login")]
    pub credentials: Vec<Credential>,
    #[serde(default, rename = "admin-login-logs")]
    pub login_logs: Vec<LoginLog>,
}

/// Document store held in memory, optionally mirrored to a JSON file.
#[derive(Clone, Default)]
pub struct MemoryStore {
    contacts: Arc<DashMap<String, ContactMessage>>,
    projects: Arc<DashMap<String, Project>>,
    credentials: Arc<DashMap<String, Credential>>,
    login_logs: Arc<DashMap<String, LoginLog>>,
    data_file: Option<PathBuf>,
    write_lock: Arc<Mutex<()>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let store = Self::new();
        for message in snapshot.contacts {
            store.contacts.insert(message.id.clone(), message);
        }
        for project in snapshot.projects {
            store.projects.insert(project.id.clone(), project);
        }
        for credential in snapshot.credentials {
            store.credentials.insert(credential.id.clone(), credential);
        }
        for entry in snapshot.login_logs {
            store.login_logs.insert(entry.id.clone(), entry);
        }
        store
    }

    /// Loads `path` if it exists, and writes every later mutation back to it.
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();

        let mut store = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let snapshot: Snapshot = serde_json::from_slice(&bytes)?;
                tracing::info!(
                    "Loaded data file {} ({} contacts, {} projects)",
                    path.display(),
                    snapshot.contacts.len(),
                    snapshot.projects.len()
                );
                Self::from_snapshot(snapshot)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("Data file {} not found, starting empty", path.display());
                Self::new()
            }
            Err(e) => return Err(e.into()),
        };

        store.data_file = Some(path);
        Ok(store)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            contacts: self.contacts.iter().map(|e| e.value().clone()).collect(),
            projects: self.projects.iter().map(|e| e.value().clone()).collect(),
            credentials: self.credentials.iter().map(|e| e.value().clone()).collect(),
            login_logs: self.login_logs.iter().map(|e| e.value().clone()).collect(),
        }
    }

    /// Writes the current snapshot through a sibling temp file and a rename,
    /// so the data file is never left half-written. Callers hold `write_lock`.
    async fn persist(&self) -> StoreResult<()> {
        let Some(path) = &self.data_file else {
            return Ok(());
        };

        let bytes = serde_json::to_vec_pretty(&self.snapshot())?;
        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let written = match tokio::fs::write(&tmp, bytes).await {
            Ok(()) => tokio::fs::rename(&tmp, path).await,
            Err(e) => Err(e),
        };
        written.map_err(|e| {
            tracing::error!("Failed to write data file {}: {}", path.display(), e);
            StoreError::Io(e)
        })
    }

    /// Persists an already-applied change, running `undo` if the write fails.
    async fn commit(&self, undo: impl FnOnce()) -> StoreResult<()> {
        if let Err(e) = self.persist().await {
            undo();
            return Err(e);
        }
        Ok(())
    }
}

fn new_document_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[async_trait]
impl MessageRepository for MemoryStore {
    async fn list_recent(&self) -> StoreResult<Vec<ContactMessage>> {
        let mut messages: Vec<ContactMessage> =
            self.contacts.iter().map(|e| e.value().clone()).collect();
        messages.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(messages)
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.contacts.len())
    }

    async fn count_since(&self, since: DateTime<Utc>) -> StoreResult<usize> {
        Ok(self
            .contacts
            .iter()
            .filter(|e| e.value().timestamp >= since)
            .count())
    }

    async fn insert(
        &self,
        message: NewContactMessage,
        timestamp: DateTime<Utc>,
    ) -> StoreResult<ContactMessage> {
        let stored = ContactMessage {
            id: new_document_id(),
            name: message.name,
            email: message.email,
            phone: message.phone,
            company: message.company,
            subject: message.subject,
            message: message.message,
            contact_method: message.contact_method,
            timestamp,
        };

        let _guard = self.write_lock.lock().await;
        self.contacts.insert(stored.id.clone(), stored.clone());
        self.commit(|| {
            self.contacts.remove(&stored.id);
        })
        .await?;
        Ok(stored)
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let (key, removed) = self.contacts.remove(id).ok_or_else(|| StoreError::NotFound {
            collection: CONTACTS,
            id: id.to_string(),
        })?;
        self.commit(|| {
            self.contacts.insert(key, removed);
        })
        .await
    }
}

#[async_trait]
impl ProjectRepository for MemoryStore {
    async fn list_recent(&self) -> StoreResult<Vec<Project>> {
        let mut projects: Vec<Project> =
            self.projects.iter().map(|e| e.value().clone()).collect();
        // Option orders None first, so reversing puts undated entries last.
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(projects)
    }

    async fn insert(
        &self,
        fields: ProjectFields,
        created_at: DateTime<Utc>,
    ) -> StoreResult<Project> {
        let project = Project {
            id: new_document_id(),
            fields,
            created_at: Some(created_at),
        };

        let _guard = self.write_lock.lock().await;
        self.projects.insert(project.id.clone(), project.clone());
        self.commit(|| {
            self.projects.remove(&project.id);
        })
        .await?;
        Ok(project)
    }

    async fn update(
        &self,
        id: &str,
        fields: ProjectFields,
        created_at: DateTime<Utc>,
    ) -> StoreResult<Project> {
        let _guard = self.write_lock.lock().await;
        let (previous, updated) = {
            let mut entry = self
                .projects
                .get_mut(id)
                .ok_or_else(|| StoreError::NotFound {
                    collection: PROJECTS,
                    id: id.to_string(),
                })?;
            let previous = entry.clone();
            entry.fields = fields;
            entry.created_at = Some(created_at);
            (previous, entry.clone())
        };

        self.commit(|| {
            self.projects.insert(previous.id.clone(), previous);
        })
        .await?;
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let (key, removed) = self.projects.remove(id).ok_or_else(|| StoreError::NotFound {
            collection: PROJECTS,
            id: id.to_string(),
        })?;
        self.commit(|| {
            self.projects.insert(key, removed);
        })
        .await
    }
}

#[async_trait]
impl CredentialRepository for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Credential>> {
        let mut credentials: Vec<Credential> =
            self.credentials.iter().map(|e| e.value().clone()).collect();
        credentials.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(credentials)
    }

    async fn insert(&self, credential: Credential) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let id = credential.id.clone();
        let previous = self.credentials.insert(id.clone(), credential);
        self.commit(|| match previous {
            Some(previous) => {
                self.credentials.insert(id, previous);
            }
            None => {
                self.credentials.remove(&id);
            }
        })
        .await
    }
}

#[async_trait]
impl LoginLogRepository for MemoryStore {
    async fn record(&self, entry: LoginLog) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let id = entry.id.clone();
        self.login_logs.insert(id.clone(), entry);
        self.commit(|| {
            self.login_logs.remove(&id);
        })
        .await
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.login_logs.len())
    }
}
