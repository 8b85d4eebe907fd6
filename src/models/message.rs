use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    Email,
    Phone,
    Both,
}

impl ContactMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactMethod::Email => "email",
            ContactMethod::Phone => "phone",
            ContactMethod::Both => "both",
        }
    }
}

impl fmt::Display for ContactMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub subject: String,
    pub message: String,
    pub contact_method: ContactMethod,
    pub timestamp: DateTime<Utc>,
}

impl ContactMessage {
    pub fn matches_search(&self, needle_lower: &str) -> bool {
        [&self.name, &self.email, &self.subject, &self.message]
            .iter()
            .any(|field| field.to_lowercase().contains(needle_lower))
    }
}

/// A message as submitted, before the store assigns an id and timestamp.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    pub subject: String,
    pub message: String,
    pub contact_method: ContactMethod,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContactMethodFilter {
    #[default]
    All,
    Only(ContactMethod),
}

impl ContactMethodFilter {
    pub fn accepts(&self, method: ContactMethod) -> bool {
        match self {
            ContactMethodFilter::All => true,
            ContactMethodFilter::Only(wanted) => *wanted == method,
        }
    }
}

impl FromStr for ContactMethodFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ContactMethodFilter::All),
            "email" => Ok(ContactMethodFilter::Only(ContactMethod::Email)),
            "phone" => Ok(ContactMethodFilter::Only(ContactMethod::Phone)),
            "both" => Ok(ContactMethodFilter::Only(ContactMethod::Both)),
            other => Err(format!("Unknown contact method filter: {other}")),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageSummary {
    pub total_contacts: usize,
    pub today_messages: usize,
    pub login_logs: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_parses_known_values() {
        assert_eq!(
            "all".parse::<ContactMethodFilter>(),
            Ok(ContactMethodFilter::All)
        );
        assert_eq!(
            "phone".parse::<ContactMethodFilter>(),
            Ok(ContactMethodFilter::Only(ContactMethod::Phone))
        );
        assert!("fax".parse::<ContactMethodFilter>().is_err());
    }

    #[test]
    fn message_uses_camel_case_fields() {
        let json = serde_json::json!({
            "id": "m1",
            "name": "Ada",
            "email": "ada@example.com",
            "subject": "Hello",
            "message": "Hi there",
            "contactMethod": "both",
            "timestamp": "2026-01-02T03:04:05Z"
        });
        let message: ContactMessage = serde_json::from_value(json).unwrap();
        assert_eq!(message.contact_method, ContactMethod::Both);
        assert!(message.phone.is_none());
    }

    #[test]
    fn summary_uses_camel_case_fields() {
        let summary = MessageSummary {
            total_contacts: 8,
            today_messages: 5,
            login_logs: 2,
        };
        assert_eq!(
            serde_json::to_value(summary).unwrap(),
            serde_json::json!({ "totalContacts": 8, "todayMessages": 5, "loginLogs": 2 })
        );
    }
}
