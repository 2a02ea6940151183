use crate::validation::ValidationError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Only the canonical uppercase names are accepted; `low` or ` LOW` fail.
impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidPriority(s.to_string()))
    }
}

/// One stored todo.
///
/// New records are built by `TodoService::create_todo`, which validates the
/// fields and draws a unique id; the store only accepts records from inside
/// the crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub task: String,
    // Older files may carry `null` here
    #[serde(default, deserialize_with = "null_as_empty")]
    pub labels: Vec<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(with = "due_date")]
    pub due_date: NaiveDate,
    #[serde(default)]
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// A fresh, open, low priority todo with both timestamps set to now.
    pub(crate) fn new(id: String, task: String, due_date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id,
            task,
            labels: Vec::new(),
            completed: false,
            due_date,
            priority: Priority::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Due dates are written as midnight UTC timestamps and read back from either
/// that form or a bare `YYYY-MM-DD`.
mod due_date {
    use crate::validation::DATE_FORMAT;
    use chrono::{DateTime, NaiveDate, SecondsFormat};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let stamp = date
            .and_time(chrono::NaiveTime::MIN)
            .and_utc()
            .to_rfc3339_opts(SecondsFormat::Secs, true);
        serializer.serialize_str(&stamp)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if let Ok(stamp) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(stamp.date_naive());
        }
        NaiveDate::parse_from_str(&raw, DATE_FORMAT)
            .map_err(|_| de::Error::custom(format!("invalid due date: {}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_priority_parse_is_case_sensitive() {
        assert_eq!("HIGH".parse::<Priority>(), Ok(Priority::High));
        assert_eq!("MEDIUM".parse::<Priority>(), Ok(Priority::Medium));
        assert_eq!(
            "high".parse::<Priority>(),
            Err(ValidationError::InvalidPriority("high".to_string()))
        );
        assert!(" LOW".parse::<Priority>().is_err());
        assert!("INVALID".parse::<Priority>().is_err());
    }

    #[test]
    fn test_priority_defaults_to_low() {
        assert_eq!(Priority::default(), Priority::Low);
    }

    #[test]
    fn test_new_todo_timestamps_match() {
        let todo = Todo::new("abc123".into(), "Write tests".into(), date(2025, 3, 1));
        assert_eq!(todo.created_at, todo.updated_at);
        assert!(!todo.completed);
        assert!(todo.labels.is_empty());
        assert_eq!(todo.priority, Priority::Low);
    }

    #[test]
    fn test_serialized_field_names() {
        let mut todo = Todo::new("abc123".into(), "Write tests".into(), date(2025, 3, 1));
        todo.priority = Priority::High;
        let value = serde_json::to_value(&todo).unwrap();

        for key in [
            "id",
            "task",
            "labels",
            "completed",
            "due_date",
            "priority",
            "created_at",
            "updated_at",
        ] {
            assert!(value.get(key).is_some(), "missing key {}", key);
        }
        assert_eq!(value["due_date"], "2025-03-01T00:00:00Z");
        assert_eq!(value["priority"], "HIGH");
    }

    #[test]
    fn test_due_date_accepts_plain_date_and_null_labels() {
        let json = r#"{
            "id": "x1",
            "task": "Legacy",
            "labels": null,
            "completed": true,
            "due_date": "2024-12-31",
            "priority": "MEDIUM",
            "created_at": "2024-12-01T10:00:00Z",
            "updated_at": "2024-12-02T10:00:00+02:00"
        }"#;
        let todo: Todo = serde_json::from_str(json).unwrap();
        assert_eq!(todo.due_date, date(2024, 12, 31));
        assert!(todo.labels.is_empty());
        assert_eq!(todo.priority, Priority::Medium);
        assert!(todo.completed);
    }

    #[test]
    fn test_unknown_priority_in_file_is_rejected() {
        let json = r#"{
            "id": "x1",
            "task": "Legacy",
            "due_date": "2024-12-31T00:00:00Z",
            "priority": "URGENT",
            "created_at": "2024-12-01T10:00:00Z",
            "updated_at": "2024-12-01T10:00:00Z"
        }"#;
        assert!(serde_json::from_str::<Todo>(json).is_err());
    }
}
