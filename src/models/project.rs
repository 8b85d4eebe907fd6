use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize, ToSchema)]
pub enum ProjectCategory {
    #[default]
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "App Development")]
    AppDevelopment,
    #[serde(rename = "Android Development")]
    AndroidDevelopment,
    #[serde(rename = "iOS Development")]
    IosDevelopment,
    #[serde(rename = "Data Analytics")]
    DataAnalytics,
    // Older documents carry the misspelt label.
    #[serde(rename = "Artificial Intelligence", alias = "Aritificial Intelligence")]
    ArtificialIntelligence,
    #[serde(rename = "Generative AI")]
    GenerativeAi,
    #[serde(rename = "Frontend Development")]
    FrontendDevelopment,
}

impl ProjectCategory {
    pub const ALL: [ProjectCategory; 8] = [
        ProjectCategory::WebDevelopment,
        ProjectCategory::AppDevelopment,
        ProjectCategory::AndroidDevelopment,
        ProjectCategory::IosDevelopment,
        ProjectCategory::DataAnalytics,
        ProjectCategory::ArtificialIntelligence,
        ProjectCategory::GenerativeAi,
        ProjectCategory::FrontendDevelopment,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProjectCategory::WebDevelopment => "Web Development",
            ProjectCategory::AppDevelopment => "App Development",
            ProjectCategory::AndroidDevelopment => "Android Development",
            ProjectCategory::IosDevelopment => "iOS Development",
            ProjectCategory::DataAnalytics => "Data Analytics",
            ProjectCategory::ArtificialIntelligence => "Artificial Intelligence",
            ProjectCategory::GenerativeAi => "Generative AI",
            ProjectCategory::FrontendDevelopment => "Frontend Development",
        }
    }
}

impl fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProjectCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "Aritificial Intelligence" {
            return Ok(ProjectCategory::ArtificialIntelligence);
        }
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| format!("Unknown project category: {s}"))
    }
}

/// Public listing filter; "All" shows every category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(ProjectCategory),
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s == "All" {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(flatten)]
    pub fields: ProjectFields,
    /// Absent only for the built-in showcase entries.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Project {
    pub fn matches_search(&self, needle_lower: &str) -> bool {
        let fields = &self.fields;
        fields.title.to_lowercase().contains(needle_lower)
            || fields.description.to_lowercase().contains(needle_lower)
            || fields.category.label().to_lowercase().contains(needle_lower)
            || fields
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle_lower))
    }
}

/// Everything the editor can write. `isCompleted` and `isOngoing` are
/// independent flags.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFields {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: ProjectCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub is_ongoing: bool,
}

/// The editor form as submitted: tags arrive as one comma-separated string.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub category: ProjectCategory,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub is_ongoing: bool,
}

impl From<&Project> for ProjectForm {
    fn from(project: &Project) -> Self {
        let fields = &project.fields;
        Self {
            title: fields.title.clone(),
            description: fields.description.clone(),
            tags: fields.tags.join(", "),
            category: fields.category,
            link: fields.link.clone().unwrap_or_default(),
            github: fields.github.clone().unwrap_or_default(),
            is_completed: fields.is_completed,
            is_ongoing: fields.is_ongoing,
        }
    }
}

/// Entries the public page always lists, whatever the store holds.
pub fn showcase_projects() -> Vec<Project> {
    vec![
        Project {
            id: "spotify-top50".to_string(),
            fields: ProjectFields {
                title: "Spotify Top 50 Analysis Dashboard".to_string(),
                description: "Power BI dashboard analyzing Spotify Top 50 global songs using DAX \
                    measures, trends, artist performance, and ranking insights. Includes a modern \
                    Figma-based dashboard layout."
                    .to_string(),
                tags: vec![
                    "Power BI".to_string(),
                    "DAX".to_string(),
                    "Data Analytics".to_string(),
                    "Figma".to_string(),
                ],
                category: ProjectCategory::DataAnalytics,
                link: None,
                github: Some("https://github.com/MSaini3012/Spotify_Top50.git".to_string()),
                is_completed: true,
                is_ongoing: false,
            },
            created_at: None,
        },
        Project {
            id: "blinkit-data".to_string(),
            fields: ProjectFields {
                title: "BlinkIT Sales Data Analysis".to_string(),
                description: "Comprehensive Power BI analysis of BlinkIT sales data using \
                    advanced DAX measures to track KPIs, sales trends, outlet performance, and \
                    business insights."
                    .to_string(),
                tags: vec![
                    "Power BI".to_string(),
                    "DAX".to_string(),
                    "Business Analytics".to_string(),
                ],
                category: ProjectCategory::DataAnalytics,
                link: None,
                github: Some("https://github.com/MSaini3012/BlinkIT_Data.git".to_string()),
                is_completed: true,
                is_ongoing: false,
            },
            created_at: None,
        },
    ]
}
