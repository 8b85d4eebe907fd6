use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    error::AdminError,
    models::message::{ContactMessage, ContactMethodFilter},
    panel::generation::ListState,
    services::messages,
    store::MessageRepository,
};

#[derive(Default)]
struct MessagePanelState {
    list: ListState<ContactMessage>,
    search_term: String,
    method: ContactMethodFilter,
    selected: Option<String>,
}

/// Contact-message view of the dashboard.
#[derive(Clone)]
pub struct MessagePanel {
    repo: Arc<dyn MessageRepository>,
    state: Arc<RwLock<MessagePanelState>>,
}

impl MessagePanel {
    pub fn new(repo: Arc<dyn MessageRepository>) -> Self {
        Self {
            repo,
            state: Arc::new(RwLock::new(MessagePanelState::default())),
        }
    }

    /// Fetches the full list. Returns `false` when a newer load or a delete
    /// landed first and the result was dropped.
    pub async fn reload(&self) -> Result<bool, AdminError> {
        let ticket = self.state.write().await.list.begin_load();

        match messages::load_all(self.repo.as_ref()).await {
            Ok(loaded) => Ok(self.state.write().await.list.finish_load(ticket, loaded)),
            Err(e) => {
                self.state.write().await.list.fail_load(ticket);
                Err(e)
            }
        }
    }

    pub async fn messages(&self) -> Vec<ContactMessage> {
        self.state.read().await.list.items().to_vec()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.list.is_loading()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.list.is_empty()
    }

    /// The list after search and method filtering.
    pub async fn visible(&self) -> Vec<ContactMessage> {
        let state = self.state.read().await;
        messages::filter(state.list.items(), &state.search_term, state.method)
    }

    pub async fn set_search_term(&self, term: impl Into<String>) {
        self.state.write().await.search_term = term.into();
    }

    pub async fn set_method_filter(&self, method: ContactMethodFilter) {
        self.state.write().await.method = method;
    }

    pub async fn select(&self, id: Option<&str>) {
        self.state.write().await.selected = id.map(str::to_string);
    }

    pub async fn selected(&self) -> Option<ContactMessage> {
        let state = self.state.read().await;
        let id = state.selected.as_deref()?;
        state.list.items().iter().find(|m| m.id == id).cloned()
    }

    /// Deletes remotely, then drops the message locally and clears a
    /// selection pointing at it. Nothing changes locally on failure.
    pub async fn delete(&self, id: &str) -> Result<(), AdminError> {
        messages::delete(self.repo.as_ref(), id).await?;

        let mut state = self.state.write().await;
        state.list.mutate(|items| items.retain(|m| m.id != id));
        if state.selected.as_deref() == Some(id) {
            state.selected = None;
        }
        Ok(())
    }
}
