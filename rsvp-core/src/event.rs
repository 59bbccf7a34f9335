//! Static details of the event guests are responding to.

use serde::{Deserialize, Serialize};

use crate::maps::{self, Location};
use crate::rsvp::Dietary;

fn default_title() -> String {
    "Greek Easter Celebration".to_string()
}

fn default_description() -> String {
    "Join us for a traditional Greek Easter celebration filled with joy, \
     family, and cultural richness."
        .to_string()
}

fn default_date() -> String {
    "April 20, 2025".to_string()
}

fn default_time() -> String {
    "12:00 PM".to_string()
}

fn default_address() -> String {
    "606 Wapato PL SE, Renton, WA".to_string()
}

fn default_map_link() -> String {
    "https://maps.app.goo.gl/rUwzSoex8pKmLfWq5".to_string()
}

fn default_location() -> Location {
    Location {
        lat: 47.4829,
        lng: -122.2171,
    }
}

fn default_menu() -> Vec<String> {
    vec![
        "Tsoureki (Sweet Bread)".to_string(),
        "Red Egg Cracking".to_string(),
        "Roast Lamb".to_string(),
    ]
}

/// Event page content. Every field can be overridden from the `[event]` config table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default = "default_date")]
    pub date: String,
    #[serde(default = "default_time")]
    pub time: String,
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_map_link", alias = "map_link")]
    pub map_link: String,
    #[serde(default = "default_location")]
    pub location: Location,
    #[serde(default = "default_menu")]
    pub menu: Vec<String>,
}

impl Default for EventDetails {
    fn default() -> Self {
        EventDetails {
            title: default_title(),
            description: default_description(),
            date: default_date(),
            time: default_time(),
            address: default_address(),
            map_link: default_map_link(),
            location: default_location(),
            menu: default_menu(),
        }
    }
}

/// A dietary choice as the form renders it.
#[derive(Debug, Clone, Serialize)]
pub struct DietaryOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// What `GET /api/event` returns: the details plus everything the form needs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPage {
    #[serde(flatten)]
    pub details: EventDetails,
    pub map_image_url: String,
    pub dietary_options: Vec<DietaryOption>,
}

impl EventDetails {
    pub fn page(&self) -> EventPage {
        EventPage {
            details: self.clone(),
            map_image_url: maps::map_image_url(&self.location),
            dietary_options: Dietary::ALL
                .iter()
                .map(|d| DietaryOption {
                    value: d.as_str(),
                    label: d.label(),
                })
                .collect(),
        }
    }
}
