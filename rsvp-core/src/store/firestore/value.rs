//! Firestore REST document encoding.
//!
//! Firestore wraps every field in a typed value object
//! (`{"stringValue": "Maria"}`, `{"integerValue": "3"}`). `submittedAt`
//! is written as a string; a native `timestampValue` is accepted on read.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{RsvpError, RsvpResult};
use crate::rsvp::{Dietary, Rsvp, iso_millis};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    NullValue(()),
    BooleanValue(bool),
    /// int64 travels as a decimal string.
    IntegerValue(String),
    DoubleValue(f64),
    TimestampValue(String),
    StringValue(String),
    BytesValue(String),
    ReferenceValue(String),
    GeoPointValue(serde_json::Value),
    ArrayValue(serde_json::Value),
    MapValue(serde_json::Value),
}

pub type Fields = BTreeMap<String, Value>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Full resource name, `projects/{p}/databases/{d}/documents/{collection}/{id}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Fields,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

impl Document {
    /// Last path segment of the resource name.
    pub fn id(&self) -> Option<&str> {
        self.name
            .as_deref()
            .and_then(|name| name.rsplit('/').next())
            .filter(|id| !id.is_empty())
    }
}

pub fn encode(rsvp: &Rsvp) -> Document {
    let mut fields = Fields::new();
    fields.insert("name".into(), Value::StringValue(rsvp.name.clone()));
    fields.insert("email".into(), Value::StringValue(rsvp.email.clone()));
    if let Some(phone) = &rsvp.phone {
        fields.insert("phone".into(), Value::StringValue(phone.clone()));
    }
    fields.insert(
        "attendees".into(),
        Value::IntegerValue(rsvp.attendees.to_string()),
    );
    fields.insert(
        "dietary".into(),
        Value::StringValue(rsvp.dietary.as_str().to_string()),
    );
    if let Some(requests) = &rsvp.requests {
        fields.insert("requests".into(), Value::StringValue(requests.clone()));
    }
    fields.insert(
        "submittedAt".into(),
        Value::StringValue(iso_millis::format(&rsvp.submitted_at)),
    );

    Document {
        fields,
        ..Default::default()
    }
}

pub fn decode(document: &Document) -> RsvpResult<Rsvp> {
    let fields = &document.fields;
    let context = document.name.as_deref().unwrap_or("document");

    let submitted_at = match fields.get("submittedAt") {
        Some(Value::StringValue(s)) | Some(Value::TimestampValue(s)) => iso_millis::parse(s)
            .map_err(|e| invalid(context, &format!("submittedAt '{s}': {e}")))?,
        _ => return Err(invalid(context, "missing submittedAt")),
    };

    let attendees = match fields.get("attendees") {
        Some(Value::IntegerValue(s)) => s.parse::<u32>().ok(),
        Some(Value::DoubleValue(n))
            if n.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(n) =>
        {
            Some(*n as u32)
        }
        _ => None,
    }
    .ok_or_else(|| invalid(context, "attendees is not a count"))?;

    let dietary = match optional_string(fields, "dietary") {
        None => Dietary::default(),
        Some(name) => Dietary::from_name(&name)
            .ok_or_else(|| invalid(context, &format!("unknown dietary option '{name}'")))?,
    };

    Ok(Rsvp {
        id: document.id().map(String::from),
        name: required_string(fields, "name", context)?,
        email: required_string(fields, "email", context)?,
        phone: optional_string(fields, "phone"),
        attendees,
        dietary,
        requests: optional_string(fields, "requests"),
        submitted_at,
    })
}

fn optional_string(fields: &Fields, key: &str) -> Option<String> {
    match fields.get(key) {
        Some(Value::StringValue(s)) => Some(s.clone()),
        _ => None,
    }
}

fn required_string(fields: &Fields, key: &str, context: &str) -> RsvpResult<String> {
    optional_string(fields, key).ok_or_else(|| invalid(context, &format!("missing {key}")))
}

fn invalid(context: &str, detail: &str) -> RsvpError {
    RsvpError::Serialization(format!("Firestore {context}: {detail}"))
}
