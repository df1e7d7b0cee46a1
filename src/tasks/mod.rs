//! Task domain model.
//!
//! A task has three required, strongly-typed fields (`title`, `description`,
//! `completed`) plus an open attribute bag: any additional fields supplied at
//! creation time (`priority`, `date`, anything else) are preserved verbatim
//! and round-tripped on every response.

pub mod seed;
pub mod store;
pub mod validate;

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ── Task ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique, store-assigned, immutable after creation.
    pub id: u64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    /// Everything else from the creation payload, kept as-is.
    /// Well-known optional keys: `priority` (text), `date` (timestamp text).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    /// The task's `priority` attribute, if present and textual.
    pub fn priority(&self) -> Option<&str> {
        self.extra.get("priority").and_then(Value::as_str)
    }

    /// The task's `date` attribute parsed as a UTC timestamp.
    ///
    /// Accepts RFC 3339 (`2024-06-01T12:00:00Z`) or a bare calendar date
    /// (`2024-06-01`, midnight UTC). Missing or unparseable dates yield
    /// `None`; the store sorts those tasks after all dated ones.
    pub fn sort_date(&self) -> Option<DateTime<Utc>> {
        let raw = self.extra.get("date")?.as_str()?;
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
        Some(Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0)?))
    }
}

// ── Priority ─────────────────────────────────────────────────────────────────

/// The closed set of priority levels accepted by the priority lookup.
///
/// Tasks themselves may carry any `priority` text; only the lookup path is
/// restricted to these three levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = ();

    /// Case-insensitive: `"LOW"` and `"low"` parse identically.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(()),
        }
    }
}
