use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::{
    app::state::AppState,
    clock::Clock,
    error::AdminError,
    managers::session::SessionManager,
    models::{
        message::MessageSummary,
        session::{AuthCheck, AuthStatus, Session},
    },
    panel::{messages::MessagePanel, projects::ProjectPanel},
    services::messages,
    store::{LoginLogRepository, MessageRepository},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveView {
    #[default]
    Dashboard,
    Messages,
    Projects,
}

struct DashboardState {
    status: AuthStatus,
    session: Option<Session>,
    view: ActiveView,
    summary: Option<MessageSummary>,
}

/// The admin panel: session gate, summary counters and the two list views.
#[derive(Clone)]
pub struct Dashboard {
    sessions: SessionManager,
    message_repo: Arc<dyn MessageRepository>,
    login_logs: Arc<dyn LoginLogRepository>,
    clock: Arc<dyn Clock>,
    pub messages: MessagePanel,
    pub projects: ProjectPanel,
    state: Arc<RwLock<DashboardState>>,
}

impl Dashboard {
    pub fn new(app: &AppState) -> Self {
        Self {
            sessions: app.sessions.clone(),
            message_repo: app.messages.clone(),
            login_logs: app.login_logs.clone(),
            clock: app.clock.clone(),
            messages: MessagePanel::new(app.messages.clone()),
            projects: ProjectPanel::new(app.projects.clone(), app.clock.clone()),
            state: Arc::new(RwLock::new(DashboardState {
                status: AuthStatus::Checking,
                session: None,
                view: ActiveView::Dashboard,
                summary: None,
            })),
        }
    }

    pub async fn status(&self) -> AuthStatus {
        self.state.read().await.status
    }

    pub async fn session(&self) -> Option<Session> {
        self.state.read().await.session.clone()
    }

    pub async fn view(&self) -> ActiveView {
        self.state.read().await.view
    }

    pub async fn summary(&self) -> Option<MessageSummary> {
        self.state.read().await.summary
    }

    /// Resolves the gate for `token`. When authenticated, the summary and the
    /// message list load before this returns; their failures are logged and
    /// leave the previous values in place.
    pub async fn check_authentication(&self, token: Option<&str>) -> AuthStatus {
        {
            let mut state = self.state.write().await;
            state.status = AuthStatus::Checking;
        }

        let check = self.sessions.check(token).await;
        let status = check.status();

        {
            let mut state = self.state.write().await;
            state.status = status;
            state.session = match check {
                AuthCheck::Authenticated(session) => Some(session),
                AuthCheck::Unauthorized(reason) => {
                    tracing::debug!("Dashboard locked: {:?}", reason);
                    None
                }
            };
        }

        if status == AuthStatus::Authenticated {
            let (summary, loaded) = tokio::join!(self.refresh_summary(), self.messages.reload());
            if let Err(e) = summary {
                tracing::warn!("{}", e);
            }
            if let Err(e) = loaded {
                tracing::warn!("{}", e);
            }
        }

        status
    }

    pub async fn refresh_summary(&self) -> Result<MessageSummary, AdminError> {
        let summary = messages::load_summary(
            self.message_repo.as_ref(),
            self.login_logs.as_ref(),
            self.clock.as_ref(),
        )
        .await?;
        self.state.write().await.summary = Some(summary);
        Ok(summary)
    }

    /// Switches view, loading a list the first time it is shown.
    pub async fn switch_view(&self, view: ActiveView) -> Result<(), AdminError> {
        if self.status().await != AuthStatus::Authenticated {
            return Err(AdminError::Unauthorized);
        }

        self.state.write().await.view = view;

        match view {
            ActiveView::Messages if self.messages.is_empty().await => {
                self.messages.reload().await?;
            }
            ActiveView::Projects if self.projects.is_empty().await => {
                self.projects.reload().await?;
            }
            _ => {}
        }
        Ok(())
    }

    pub async fn logout(&self, token: Option<&str>) {
        if let Some(token) = token {
            self.sessions.revoke(token).await;
        }

        let mut state = self.state.write().await;
        state.status = AuthStatus::Unauthorized;
        state.session = None;
        state.view = ActiveView::Dashboard;
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::{
        clock::ManualClock,
        models::{
            message::{ContactMethod, NewContactMessage},
            project::ProjectForm,
        },
        services::projects,
        store::MemoryStore,
        utils::token::TokenSigner,
    };

    async fn app(clock: &ManualClock) -> AppState {
        let store = MemoryStore::new();
        let now = clock.now();
        for i in 0..3 {
            MessageRepository::insert(
                &store,
                NewContactMessage {
                    name: format!("Sender {i}"),
                    email: "sender@mail.test".into(),
                    phone: None,
                    company: None,
                    subject: "Enquiry".into(),
                    message: "Hello".into(),
                    contact_method: ContactMethod::Email,
                },
                now - Duration::days(i),
            )
            .await
            .unwrap();
        }

        AppState::with_store(
            store,
            TokenSigner::new("dashboard-tests"),
            Arc::new(clock.clone()),
            Duration::hours(24),
        )
    }

    #[tokio::test]
    async fn starts_checking_and_locks_without_token() {
        let clock = ManualClock::new(Utc::now());
        let dashboard = Dashboard::new(&app(&clock).await);
        assert_eq!(dashboard.status().await, AuthStatus::Checking);

        assert_eq!(
            dashboard.check_authentication(None).await,
            AuthStatus::Unauthorized
        );
        assert!(dashboard.messages.is_empty().await);
        assert!(matches!(
            dashboard.switch_view(ActiveView::Messages).await,
            Err(AdminError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn authenticated_check_loads_summary_and_messages() {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 9, 1, 18, 0, 0).unwrap());
        let app = app(&clock).await;
        let (_, token) = app.sessions.create_session("cred-1".into()).await;
        let dashboard = Dashboard::new(&app);

        assert_eq!(
            dashboard.check_authentication(Some(&token)).await,
            AuthStatus::Authenticated
        );
        let summary = dashboard.summary().await.unwrap();
        assert_eq!(summary.total_contacts, 3);
        assert_eq!(summary.today_messages, 1);
        assert_eq!(dashboard.messages.messages().await.len(), 3);
    }

    #[tokio::test]
    async fn expired_session_locks_dashboard() {
        let clock = ManualClock::new(Utc::now());
        let app = app(&clock).await;
        let (_, token) = app.sessions.create_session("cred-1".into()).await;
        let dashboard = Dashboard::new(&app);

        clock.advance(Duration::hours(24));
        assert_eq!(
            dashboard.check_authentication(Some(&token)).await,
            AuthStatus::Unauthorized
        );
        assert!(dashboard.session().await.is_none());
    }

    #[tokio::test]
    async fn projects_view_loads_on_first_visit() {
        let clock = ManualClock::new(Utc::now());
        let app = app(&clock).await;
        projects::save(
            app.projects.as_ref(),
            &clock,
            &ProjectForm {
                title: "Site".into(),
                description: "Company site".into(),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();

        let (_, token) = app.sessions.create_session("cred-1".into()).await;
        let dashboard = Dashboard::new(&app);
        dashboard.check_authentication(Some(&token)).await;

        assert!(dashboard.projects.is_empty().await);
        dashboard.switch_view(ActiveView::Projects).await.unwrap();
        assert_eq!(dashboard.view().await, ActiveView::Projects);
        assert_eq!(dashboard.projects.projects().await.len(), 1);
    }

    #[tokio::test]
    async fn logout_revokes_and_locks() {
        let clock = ManualClock::new(Utc::now());
        let app = app(&clock).await;
        let (_, token) = app.sessions.create_session("cred-1".into()).await;
        let dashboard = Dashboard::new(&app);
        dashboard.check_authentication(Some(&token)).await;

        dashboard.logout(Some(&token)).await;
        assert_eq!(dashboard.status().await, AuthStatus::Unauthorized);
        assert_eq!(
            dashboard.check_authentication(Some(&token)).await,
            AuthStatus::Unauthorized
        );
    }
}
