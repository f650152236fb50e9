use std::fmt;
use std::str::FromStr;

use jiff::Timestamp;
use jiff::civil::DateTime;
use jiff::tz::TimeZone;
use serde::{Deserialize, Serialize};

use crate::errors::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "L")]
    Low,
    #[default]
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "H")]
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn code(&self) -> &'static str {
        match self {
            Priority::Low => "L",
            Priority::Medium => "M",
            Priority::High => "H",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "l" | "low" => Ok(Priority::Low),
            "m" | "medium" => Ok(Priority::Medium),
            "h" | "high" => Ok(Priority::High),
            other => Err(Error::InvalidRequest(format!(
                "Unknown priority '{}'; expected L, M or H",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub deadline: Option<Timestamp>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub user: Option<u64>,
}

/// Body for `POST /api/tasks/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub priority: Priority,
    pub deadline: Timestamp,
}

impl NewTask {
    pub fn new(title: impl Into<String>, deadline: Timestamp) -> Result<Self, Error> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(Error::InvalidRequest("task title must not be empty".into()));
        }
        Ok(Self {
            title,
            description: String::new(),
            priority: Priority::default(),
            deadline,
        })
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskPatch {
    pub completed: bool,
}

const ORDERING_FIELDS: [&str; 3] = ["deadline", "priority", "created_at"];

/// Search/ordering filters understood by the tasks endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    search: Option<String>,
    ordering: Option<String>,
}

impl TaskQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = (!term.trim().is_empty()).then_some(term);
        self
    }

    /// `field` is one of `deadline`, `priority`, `created_at`, optionally
    /// prefixed with `-` for descending order.
    pub fn ordering(mut self, field: &str) -> Result<Self, Error> {
        let bare = field.strip_prefix('-').unwrap_or(field);
        if !ORDERING_FIELDS.contains(&bare) {
            return Err(Error::InvalidRequest(format!(
                "Cannot order by '{}'; expected one of {}",
                field,
                ORDERING_FIELDS.join(", ")
            )));
        }
        self.ordering = Some(field.to_string());
        Ok(self)
    }

    pub fn query_string(&self) -> String {
        let mut parts = Vec::new();
        if let Some(search) = &self.search {
            parts.push(format!("search={}", urlencoding::encode(search)));
        }
        if let Some(ordering) = &self.ordering {
            parts.push(format!("ordering={}", urlencoding::encode(ordering)));
        }
        if parts.is_empty() {
            String::new()
        } else {
            format!("?{}", parts.join("&"))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityChoice {
    pub value: String,
    pub label: String,
}

/// Extracts priority choices from the tasks endpoint's OPTIONS metadata.
///
/// Accepts `{value, display_name}` objects, `[value, label]` pairs and bare
/// strings. Returns `None` when the metadata carries no choices.
pub fn parse_priority_choices(meta: &serde_json::Value) -> Option<Vec<PriorityChoice>> {
    let choices = meta
        .pointer("/actions/POST/priority/choices")
        .or_else(|| meta.pointer("/fields/priority/choices"))?
        .as_array()?;
    let parsed = choices
        .iter()
        .filter_map(|c| match c {
            serde_json::Value::Array(pair) => {
                let value = scalar(pair.first()?)?;
                let label = pair.get(1).and_then(scalar).unwrap_or_else(|| value.clone());
                Some(PriorityChoice { value, label })
            }
            serde_json::Value::Object(obj) => {
                let value = obj.get("value").or_else(|| obj.get("key")).and_then(scalar)?;
                let label = obj
                    .get("display_name")
                    .or_else(|| obj.get("label"))
                    .and_then(scalar)
                    .unwrap_or_else(|| value.clone());
                Some(PriorityChoice { value, label })
            }
            other => scalar(other).map(|value| PriorityChoice {
                label: value.clone(),
                value,
            }),
        })
        .collect::<Vec<_>>();
    (!parsed.is_empty()).then_some(parsed)
}

fn scalar(v: &serde_json::Value) -> Option<String> {
    match v {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parses an RFC 3339 instant, or a `YYYY-MM-DDTHH:MM[:SS]` wall-clock time in `tz`.
pub fn parse_deadline(raw: &str, tz: &TimeZone) -> Result<Timestamp, Error> {
    let raw = raw.trim();
    if let Ok(ts) = raw.parse::<Timestamp>() {
        return Ok(ts);
    }
    let civil: DateTime = raw
        .parse()
        .map_err(|e| Error::InvalidRequest(format!("Invalid deadline '{}': {}", raw, e)))?;
    let zoned = civil
        .to_zoned(tz.clone())
        .map_err(|e| Error::InvalidRequest(format!("Invalid deadline '{}': {}", raw, e)))?;
    Ok(zoned.timestamp())
}
