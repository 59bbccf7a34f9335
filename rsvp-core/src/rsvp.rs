//! RSVP records and the validation policy applied to incoming submissions.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{RsvpError, RsvpResult};

/// Dietary preference offered by the RSVP form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dietary {
    #[default]
    None,
    Vegetarian,
    Vegan,
    GlutenFree,
    DairyFree,
    NutFree,
}

impl Dietary {
    /// Every option, in the order the form lists them.
    pub const ALL: [Dietary; 6] = [
        Dietary::None,
        Dietary::Vegetarian,
        Dietary::Vegan,
        Dietary::GlutenFree,
        Dietary::DairyFree,
        Dietary::NutFree,
    ];

    /// Wire value, e.g. `gluten-free`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dietary::None => "none",
            Dietary::Vegetarian => "vegetarian",
            Dietary::Vegan => "vegan",
            Dietary::GlutenFree => "gluten-free",
            Dietary::DairyFree => "dairy-free",
            Dietary::NutFree => "nut-free",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Dietary::None => "No preferences",
            Dietary::Vegetarian => "Vegetarian",
            Dietary::Vegan => "Vegan",
            Dietary::GlutenFree => "Gluten-Free",
            Dietary::DairyFree => "Dairy-Free",
            Dietary::NutFree => "Nut-Free",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == name)
    }
}

impl fmt::Display for Dietary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored RSVP. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rsvp {
    /// Store-assigned identifier. Only the Firestore backend has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub attendees: u32,
    #[serde(default)]
    pub dietary: Dietary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests: Option<String>,
    #[serde(with = "iso_millis")]
    pub submitted_at: DateTime<Utc>,
}

/// An RSVP as submitted by the form, before validation.
///
/// Fields are optional on the wire so that a missing field is reported as a
/// validation failure instead of a decode failure. `submittedAt` and `id` are
/// not part of the input; anything the caller sends for them is dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRsvp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_attendees",
        skip_serializing_if = "Option::is_none"
    )]
    pub attendees: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary: Option<Dietary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests: Option<String>,
}

impl NewRsvp {
    /// Apply the validation policy and stamp the record.
    ///
    /// `name` and `email` must be non-blank, `attendees` must be present and
    /// at least 1. Text is trimmed and blank optional fields become `None`.
    pub fn validate(self, submitted_at: DateTime<Utc>) -> RsvpResult<Rsvp> {
        self.validate_then_stamp(|| submitted_at)
    }

    /// Like [`NewRsvp::validate`], but `stamp` only runs once the input has
    /// passed validation.
    pub fn validate_then_stamp(self, stamp: impl FnOnce() -> DateTime<Utc>) -> RsvpResult<Rsvp> {
        let name = non_blank(self.name);
        let email = non_blank(self.email);

        let mut missing = Vec::new();
        if name.is_none() {
            missing.push("name");
        }
        if email.is_none() {
            missing.push("email");
        }
        if self.attendees.is_none() {
            missing.push("attendees");
        }
        if !missing.is_empty() {
            return Err(RsvpError::Validation(format!(
                "Missing required fields ({})",
                missing.join(", ")
            )));
        }

        let attendees = self.attendees.unwrap_or_default();
        let attendees = u32::try_from(attendees)
            .ok()
            .filter(|n| *n >= 1)
            .ok_or_else(|| {
                RsvpError::Validation(format!(
                    "Number of attendees must be at least 1 (got {attendees})"
                ))
            })?;

        Ok(Rsvp {
            id: None,
            name: name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            phone: non_blank(self.phone),
            attendees,
            dietary: self.dietary.unwrap_or_default(),
            requests: non_blank(self.requests),
            submitted_at: stamp(),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Accepts `3`, `"3"` or `null` for the attendee count. Form inputs of type
/// number still arrive as strings from some clients.
fn deserialize_attendees<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Attendees {
        Number(i64),
        Text(String),
    }

    match Option::<Attendees>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Attendees::Number(n)) => Ok(Some(n)),
        Some(Attendees::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Attendees::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid attendee count '{s}'"))),
    }
}

/// `submittedAt` as an ISO-8601 UTC string with millisecond precision,
/// the same shape a browser's `Date.toISOString()` produces.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(dt: &DateTime<Utc>) -> String {
        dt.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn parse(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
    }

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(serde::de::Error::custom)
    }
}
