use crate::{
    clock::Clock,
    error::AdminError,
    models::message::{ContactMessage, ContactMethodFilter, MessageSummary, NewContactMessage},
    store::{LoginLogRepository, MessageRepository},
};

pub async fn load_all(messages: &dyn MessageRepository) -> Result<Vec<ContactMessage>, AdminError> {
    messages
        .list_recent()
        .await
        .map_err(AdminError::store("Failed to load messages"))
}

/// Total contacts, contacts since midnight, and login-log entries, queried
/// concurrently.
pub async fn load_summary(
    messages: &dyn MessageRepository,
    login_logs: &dyn LoginLogRepository,
    clock: &dyn Clock,
) -> Result<MessageSummary, AdminError> {
    let today = clock.start_of_today();

    let (total_contacts, today_messages, login_logs) = tokio::try_join!(
        messages.count(),
        messages.count_since(today),
        login_logs.count(),
    )
    .map_err(AdminError::store("Failed to load dashboard data"))?;

    Ok(MessageSummary {
        total_contacts,
        today_messages,
        login_logs,
    })
}

/// Messages whose name, email, subject or message contain `search_term`
/// (case-insensitive) and whose contact method passes `method`. An empty
/// term matches everything.
pub fn filter(
    messages: &[ContactMessage],
    search_term: &str,
    method: ContactMethodFilter,
) -> Vec<ContactMessage> {
    let needle = search_term.to_lowercase();

    messages
        .iter()
        .filter(|m| needle.is_empty() || m.matches_search(&needle))
        .filter(|m| method.accepts(m.contact_method))
        .cloned()
        .collect()
}

pub async fn delete(messages: &dyn MessageRepository, id: &str) -> Result<(), AdminError> {
    messages
        .delete(id)
        .await
        .map_err(AdminError::store("Failed to delete message"))?;
    tracing::info!("Deleted contact message {}", id);
    Ok(())
}

/// Public intake. Only presence is checked here.
pub async fn submit(
    messages: &dyn MessageRepository,
    clock: &dyn Clock,
    mut draft: NewContactMessage,
) -> Result<ContactMessage, AdminError> {
    for (field, value) in [
        ("name", &draft.name),
        ("email", &draft.email),
        ("subject", &draft.subject),
        ("message", &draft.message),
    ] {
        if value.trim().is_empty() {
            return Err(AdminError::validation(field, format!("{field} is required")));
        }
    }

    draft.phone = draft.phone.filter(|p| !p.trim().is_empty());
    draft.company = draft.company.filter(|c| !c.trim().is_empty());

    messages
        .insert(draft, clock.now())
        .await
        .map_err(AdminError::store("Failed to send message"))
}
