use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    clock::Clock,
    error::AdminError,
    models::project::{Project, ProjectForm},
    panel::generation::ListState,
    services::projects,
    store::ProjectRepository,
};

#[derive(Default)]
struct ProjectPanelState {
    list: ListState<Project>,
    search_term: String,
    editing: Option<String>,
}

/// Project editor view. Every write is followed by a full reload.
#[derive(Clone)]
pub struct ProjectPanel {
    repo: Arc<dyn ProjectRepository>,
    clock: Arc<dyn Clock>,
    state: Arc<RwLock<ProjectPanelState>>,
}

impl ProjectPanel {
    pub fn new(repo: Arc<dyn ProjectRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            clock,
            state: Arc::new(RwLock::new(ProjectPanelState::default())),
        }
    }

    pub async fn reload(&self) -> Result<bool, AdminError> {
        let ticket = self.state.write().await.list.begin_load();

        match projects::load_all(self.repo.as_ref()).await {
            Ok(loaded) => Ok(self.state.write().await.list.finish_load(ticket, loaded)),
            Err(e) => {
                self.state.write().await.list.fail_load(ticket);
                Err(e)
            }
        }
    }

    pub async fn projects(&self) -> Vec<Project> {
        self.state.read().await.list.items().to_vec()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.list.is_empty()
    }

    pub async fn set_search_term(&self, term: impl Into<String>) {
        self.state.write().await.search_term = term.into();
    }

    pub async fn visible(&self) -> Vec<Project> {
        let state = self.state.read().await;
        projects::search(state.list.items(), &state.search_term)
    }

    /// Opens `id` in the editor and returns the prefilled form.
    pub async fn begin_edit(&self, id: &str) -> Option<ProjectForm> {
        let mut state = self.state.write().await;
        let form = state
            .list
            .items()
            .iter()
            .find(|p| p.id == id)
            .map(ProjectForm::from)?;
        state.editing = Some(id.to_string());
        Some(form)
    }

    pub async fn cancel_edit(&self) {
        self.state.write().await.editing = None;
    }

    pub async fn editing(&self) -> Option<String> {
        self.state.read().await.editing.clone()
    }

    /// Saves the form against the project being edited, if any, then closes
    /// the editor and reloads. A rejected form keeps the editor open.
    pub async fn save(&self, form: &ProjectForm) -> Result<Project, AdminError> {
        let editing = self.editing().await;
        let saved =
            projects::save(self.repo.as_ref(), self.clock.as_ref(), form, editing.as_deref())
                .await?;

        self.state.write().await.editing = None;
        self.reload_after_write().await;
        Ok(saved)
    }

    /// The caller is responsible for confirming with the user first.
    pub async fn delete(&self, id: &str) -> Result<(), AdminError> {
        projects::delete(self.repo.as_ref(), id).await?;
        self.reload_after_write().await;
        Ok(())
    }

    /// A failed refresh is its own notice; the write already went through.
    async fn reload_after_write(&self) {
        if let Err(e) = self.reload().await {
            tracing::warn!("{}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::{
        clock::ManualClock,
        models::project::{ProjectCategory, ProjectFields},
        store::{MemoryStore, StoreError, StoreResult},
    };

    fn panel() -> ProjectPanel {
        ProjectPanel::new(
            Arc::new(MemoryStore::new()),
            Arc::new(ManualClock::new(Utc::now())),
        )
    }

    fn form(title: &str, tags: &str) -> ProjectForm {
        ProjectForm {
            title: title.to_string(),
            description: format!("{title} description"),
            tags: tags.to_string(),
            category: ProjectCategory::AppDevelopment,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn save_reloads_list() {
        let panel = panel();
        panel.save(&form("Tracker", "Flutter, Firebase")).await.unwrap();
        panel.save(&form("Notes", "Rust")).await.unwrap();

        assert_eq!(panel.projects().await.len(), 2);
        panel.set_search_term("firebase").await;
        let visible = panel.visible().await;
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].fields.title, "Tracker");
    }

    #[tokio::test]
    async fn edit_overwrites_selected_project() {
        let panel = panel();
        let saved = panel.save(&form("Tracker", "Flutter")).await.unwrap();

        let mut prefilled = panel.begin_edit(&saved.id).await.unwrap();
        assert_eq!(prefilled.tags, "Flutter");
        prefilled.title = "Habit Tracker".to_string();

        let updated = panel.save(&prefilled).await.unwrap();
        assert_eq!(updated.id, saved.id);
        assert!(panel.editing().await.is_none());

        let projects = panel.projects().await;
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].fields.title, "Habit Tracker");
    }

    #[tokio::test]
    async fn rejected_form_keeps_editor_open() {
        let panel = panel();
        let saved = panel.save(&form("Tracker", "")).await.unwrap();
        panel.begin_edit(&saved.id).await.unwrap();

        let blank = ProjectForm::default();
        assert!(panel.save(&blank).await.is_err());
        assert_eq!(panel.editing().await, Some(saved.id));
    }

    #[tokio::test]
    async fn delete_reloads_and_unknown_id_fails() {
        let panel = panel();
        let a = panel.save(&form("A", "")).await.unwrap();
        panel.save(&form("B", "")).await.unwrap();

        panel.delete(&a.id).await.unwrap();
        assert_eq!(panel.projects().await.len(), 1);

        assert!(panel.delete(&a.id).await.is_err());
        assert_eq!(panel.projects().await.len(), 1);
    }

    /// Writes land in the inner store but every listing fails.
    struct ListingDown {
        inner: MemoryStore,
    }

    #[async_trait]
    impl ProjectRepository for ListingDown {
        async fn list_recent(&self) -> StoreResult<Vec<Project>> {
            Err(StoreError::Unavailable("listing offline".into()))
        }

        async fn insert(
            &self,
            fields: ProjectFields,
            created_at: DateTime<Utc>,
        ) -> StoreResult<Project> {
            ProjectRepository::insert(&self.inner, fields, created_at).await
        }

        async fn update(
            &self,
            id: &str,
            fields: ProjectFields,
            created_at: DateTime<Utc>,
        ) -> StoreResult<Project> {
            self.inner.update(id, fields, created_at).await
        }

        async fn delete(&self, id: &str) -> StoreResult<()> {
            ProjectRepository::delete(&self.inner, id).await
        }
    }

    #[tokio::test]
    async fn failed_refresh_does_not_fail_the_write() {
        let inner = MemoryStore::new();
        let panel = ProjectPanel::new(
            Arc::new(ListingDown {
                inner: inner.clone(),
            }),
            Arc::new(ManualClock::new(Utc::now())),
        );

        let saved = panel.save(&form("Tracker", "Flutter")).await.unwrap();
        assert_eq!(ProjectRepository::list_recent(&inner).await.unwrap().len(), 1);

        panel.delete(&saved.id).await.unwrap();
        assert!(ProjectRepository::list_recent(&inner).await.unwrap().is_empty());
    }
}
