use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::SubmittedValues;

/// Contact data forwarded to the lead sink.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl LeadInput {
    /// Picks `name`, `email` and `phone` out of submitted form values.
    /// Blank entries are dropped.
    pub fn from_values(values: &SubmittedValues) -> Self {
        let pick = |key: &str| {
            values
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        Self {
            name: pick("name"),
            email: pick("email"),
            phone: pick("phone"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

/// Stored lead record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Lead {
    pub fn new(input: LeadInput, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_values_keeps_contact_fields_only() {
        let mut values = SubmittedValues::new();
        values.insert("name".into(), "  Ana  ".into());
        values.insert("email".into(), "ana@example.com".into());
        values.insert("phone".into(), "   ".into());
        values.insert("consent".into(), "true".into());

        let input = LeadInput::from_values(&values);
        assert_eq!(input.name.as_deref(), Some("Ana"));
        assert_eq!(input.email.as_deref(), Some("ana@example.com"));
        assert_eq!(input.phone, None);
    }

    #[test]
    fn new_lead_copies_input() {
        let input = LeadInput {
            name: Some("Ana".into()),
            ..LeadInput::default()
        };
        let lead = Lead::new(input, Utc::now());
        assert_eq!(lead.name.as_deref(), Some("Ana"));
        assert!(lead.email.is_none());
    }
}
