//! Map image lookup for the event location.

use serde::{Deserialize, Serialize};

/// Placeholder returned until a real static-map provider is wired in.
pub const PLACEHOLDER_MAP_URL: &str = "https://via.placeholder.com/600x400";

/// A geographical coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// URL of a map image for `location`.
// TODO: call a static maps API with the coordinates instead of the placeholder.
pub fn map_image_url(_location: &Location) -> String {
    PLACEHOLDER_MAP_URL.to_string()
}
