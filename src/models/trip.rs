use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A planned trip: named, optionally bounded by start/end dates, owning its
/// destinations. `destinations` keeps insertion order; the display order is
/// derived from dates (see `ordering`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: i64,
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub destinations: Vec<Destination>,
}

impl Trip {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            start_date: None,
            end_date: None,
            destinations: Vec::new(),
        }
    }

    pub fn export_file_name(&self) -> String {
        let trimmed = self.name.trim();
        let base = if trimmed.is_empty() {
            "trip".to_string()
        } else {
            trimmed
                .chars()
                .map(|c| {
                    if c.is_alphanumeric() || c == '-' || c == '_' || c == ' ' {
                        c
                    } else {
                        '_'
                    }
                })
                .collect()
        };
        format!("{base}_plan.json")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destination {
    pub id: i64,
    pub name: String,
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
    pub lat: f64,
    pub lng: f64,
}

impl Destination {
    pub fn position(&self) -> LatLng {
        LatLng {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}
