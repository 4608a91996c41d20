use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseStatus {
    #[default]
    Ongoing,
    Completed,
    Planned,
}

impl CourseStatus {
    pub const ALL: [CourseStatus; 3] = [
        CourseStatus::Ongoing,
        CourseStatus::Completed,
        CourseStatus::Planned,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CourseStatus::Ongoing => "Ongoing",
            CourseStatus::Completed => "Completed",
            CourseStatus::Planned => "Planned",
        }
    }
}

impl fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for CourseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CourseStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown status: {}", s.trim()))
    }
}

/// A course record as returned by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedCourse {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub user_id: String,
    pub course_name: String,
    #[serde(default)]
    pub status: CourseStatus,
    #[serde(default)]
    pub instructor: Option<String>,
    #[serde(default, with = "calendar_date")]
    pub completion_date: Option<NaiveDate>,
    #[serde(default)]
    pub certificate_link: Option<String>,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request body shared by the add and update endpoints.
///
/// Optional fields serialize as `null` when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePayload {
    pub user_id: String,
    pub course_name: String,
    pub status: CourseStatus,
    pub instructor: Option<String>,
    #[serde(with = "calendar_date")]
    pub completion_date: Option<NaiveDate>,
    pub certificate_link: Option<String>,
    pub progress: u8,
    pub notes: Option<String>,
}

/// Dates travel as `YYYY-MM-DD`; RFC 3339 timestamps are accepted on input
/// and reduced to their UTC calendar date.
pub(crate) mod calendar_date {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_str(&date.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => parse(value)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", value))),
        }
    }

    pub fn parse(value: &str) -> Option<NaiveDate> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
            return Some(ts.with_timezone(&Utc).date_naive());
        }
        NaiveDate::parse_from_str(value, FORMAT).ok()
    }
}
