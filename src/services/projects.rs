use crate::{
    clock::Clock,
    error::AdminError,
    models::project::{CategoryFilter, Project, ProjectFields, ProjectForm, showcase_projects},
    store::ProjectRepository,
};

pub async fn load_all(projects: &dyn ProjectRepository) -> Result<Vec<Project>, AdminError> {
    projects
        .list_recent()
        .await
        .map_err(AdminError::store("Failed to load projects"))
}

/// Case-insensitive match on title, description, category or any tag.
pub fn search(projects: &[Project], term: &str) -> Vec<Project> {
    let needle = term.to_lowercase();
    projects
        .iter()
        .filter(|p| p.matches_search(&needle))
        .cloned()
        .collect()
}

/// Splits the comma-separated tag input, trimming each entry and dropping
/// empty ones. Order is preserved.
pub fn normalize_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn validate(form: &ProjectForm) -> Result<ProjectFields, AdminError> {
    if form.title.trim().is_empty() {
        return Err(AdminError::validation(
            "title",
            "Title and description are required",
        ));
    }
    if form.description.trim().is_empty() {
        return Err(AdminError::validation(
            "description",
            "Title and description are required",
        ));
    }

    Ok(ProjectFields {
        title: form.title.clone(),
        description: form.description.clone(),
        tags: normalize_tags(&form.tags),
        category: form.category,
        link: non_empty(&form.link),
        github: non_empty(&form.github),
        is_completed: form.is_completed,
        is_ongoing: form.is_ongoing,
    })
}

/// Inserts a new project, or overwrites `editing_id` when given. Either way
/// the project is stamped with the current time, so an edit moves it to the
/// top of the list. The form is validated before the store is touched.
pub async fn save(
    projects: &dyn ProjectRepository,
    clock: &dyn Clock,
    form: &ProjectForm,
    editing_id: Option<&str>,
) -> Result<Project, AdminError> {
    let fields = validate(form)?;
    let now = clock.now();

    let project = match editing_id {
        Some(id) => projects
            .update(id, fields, now)
            .await
            .map_err(AdminError::store("Failed to save project"))?,
        None => projects
            .insert(fields, now)
            .await
            .map_err(AdminError::store("Failed to save project"))?,
    };

    tracing::info!(
        "{} project {} ({})",
        if editing_id.is_some() { "Updated" } else { "Added" },
        project.id,
        project.fields.title
    );

    Ok(project)
}

pub async fn delete(projects: &dyn ProjectRepository, id: &str) -> Result<(), AdminError> {
    projects
        .delete(id)
        .await
        .map_err(AdminError::store("Failed to delete project"))?;
    tracing::info!("Deleted project {}", id);
    Ok(())
}

/// Store projects followed by the showcase entries. A store failure leaves
/// only the showcase entries.
pub async fn public_listing(
    projects: &dyn ProjectRepository,
    category: CategoryFilter,
) -> Vec<Project> {
    let mut listing = match projects.list_recent().await {
        Ok(stored) => stored,
        Err(e) => {
            tracing::warn!("Serving showcase projects only: {}", e);
            Vec::new()
        }
    };
    listing.extend(showcase_projects());

    match category {
        CategoryFilter::All => listing,
        CategoryFilter::Only(wanted) => listing
            .into_iter()
            .filter(|p| p.fields.category == wanted)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};

    use super::*;
    use crate::{
        clock::ManualClock,
        models::project::ProjectCategory,
        store::{MemoryStore, StoreError, StoreResult},
    };

    #[test]
    fn tags_are_trimmed_and_empties_dropped() {
        assert_eq!(
            normalize_tags("React, Node.js ,  , MongoDB"),
            vec!["React", "Node.js", "MongoDB"]
        );
        assert!(normalize_tags(" , ,").is_empty());
        assert!(normalize_tags("").is_empty());
    }

    #[test]
    fn search_covers_tags_and_category() {
        let projects = showcase_projects();
        assert_eq!(search(&projects, "figma").len(), 1);
        assert_eq!(search(&projects, "data analytics").len(), 2);
        assert_eq!(search(&projects, "BLINKIT")[0].id, "blinkit-data");
        assert!(search(&projects, "kotlin").is_empty());
        assert_eq!(search(&projects, "").len(), 2);
    }

    #[derive(Default)]
    struct CountingRepo {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ProjectRepository for CountingRepo {
        async fn list_recent(&self) -> StoreResult<Vec<Project>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Unavailable("offline".into()))
        }

        async fn insert(&self, _: ProjectFields, _: DateTime<Utc>) -> StoreResult<Project> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Unavailable("offline".into()))
        }

        async fn update(
            &self,
            _: &str,
            _: ProjectFields,
            _: DateTime<Utc>,
        ) -> StoreResult<Project> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Unavailable("offline".into()))
        }

        async fn delete(&self, _: &str) -> StoreResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Unavailable("offline".into()))
        }
    }

    #[tokio::test]
    async fn blank_title_or_description_never_reaches_store() {
        let repo = CountingRepo::default();
        let clock = ManualClock::new(Utc::now());

        let no_title = ProjectForm {
            title: "   ".into(),
            description: "Something".into(),
            ..Default::default()
        };
        let no_description = ProjectForm {
            title: "Something".into(),
            description: "".into(),
            ..Default::default()
        };

        for (form, field) in [(no_title, "title"), (no_description, "description")] {
            for editing in [None, Some("p1")] {
                let err = save(&repo, &clock, &form, editing).await.unwrap_err();
                assert!(matches!(err, AdminError::Validation { field: f, .. } if f == field));
            }
        }
        assert_eq!(repo.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn save_inserts_then_overwrites() {
        let store = MemoryStore::new();
        let clock = ManualClock::new(Utc::now());

        let form = ProjectForm {
            title: "Portfolio".into(),
            description: "Personal site".into(),
            tags: "Next.js, , Tailwind ".into(),
            category: ProjectCategory::FrontendDevelopment,
            link: "  ".into(),
            github: "https://github.com/example/portfolio".into(),
            is_completed: true,
            is_ongoing: true,
        };
        let created = save(&store, &clock, &form, None).await.unwrap();
        assert_eq!(created.fields.tags, vec!["Next.js", "Tailwind"]);
        assert_eq!(created.fields.link, None);
        assert!(created.fields.is_completed && created.fields.is_ongoing);
        assert_eq!(created.created_at, Some(clock.now()));

        let edit = ProjectForm {
            title: "Portfolio v2".into(),
            ..form
        };
        clock.advance(Duration::minutes(5));
        let updated = save(&store, &clock, &edit, Some(&created.id)).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.fields.title, "Portfolio v2");
        assert_eq!(updated.created_at, Some(clock.now()));

        let all = load_all(&store).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn public_listing_falls_back_to_showcase() {
        let repo = Arc::new(CountingRepo::default());
        let listing = public_listing(repo.as_ref(), CategoryFilter::All).await;
        assert_eq!(listing.len(), 2);

        let none = public_listing(
            repo.as_ref(),
            CategoryFilter::Only(ProjectCategory::GenerativeAi),
        )
        .await;
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn public_listing_puts_store_projects_first() {
        let store = MemoryStore::new();
        let clock = ManualClock::new(Utc::now());
        let form = ProjectForm {
            title: "Chatbot".into(),
            description: "LLM assistant".into(),
            category: ProjectCategory::GenerativeAi,
            ..Default::default()
        };
        save(&store, &clock, &form, None).await.unwrap();

        let listing = public_listing(&store, CategoryFilter::All).await;
        assert_eq!(listing.len(), 3);
        assert_eq!(listing[0].fields.title, "Chatbot");

        let ai = public_listing(&store, CategoryFilter::Only(ProjectCategory::GenerativeAi)).await;
        assert_eq!(ai.len(), 1);
    }
}
