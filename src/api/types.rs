use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::patch::Patch;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PackageStatus {
    Active,
    #[default]
    Draft,
    SoldOut,
    Archived,
}

impl PackageStatus {
    pub const ALL: [PackageStatus; 4] = [
        PackageStatus::Active,
        PackageStatus::Draft,
        PackageStatus::SoldOut,
        PackageStatus::Archived,
    ];

    /// Wire value, as used in query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            PackageStatus::Active => "active",
            PackageStatus::Draft => "draft",
            PackageStatus::SoldOut => "sold_out",
            PackageStatus::Archived => "archived",
        }
    }

    pub fn parse(s: &str) -> Option<PackageStatus> {
        let s = s.trim().to_ascii_lowercase();
        PackageStatus::ALL.into_iter().find(|status| status.as_str() == s)
    }
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_max_guests() -> u32 {
    20
}

/// A bookable trip. List responses carry a subset of the fields; the rest
/// fall back to the server's defaults.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Package {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub duration_days: u32,
    pub price: f64,
    #[serde(default = "default_max_guests")]
    pub max_guests: u32,
    #[serde(default)]
    pub status: PackageStatus,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub itinerary: Vec<Itinerary>,
    #[serde(default)]
    pub images: Vec<PackageImage>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub id: String,
    pub package_id: String,
    pub day_number: u32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PackageImage {
    pub id: String,
    pub package_id: String,
    pub image_url: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Create payload. Only `title` is required locally; `duration_days` and
/// `price` are enforced by the server, which answers 422 when they are
/// missing.
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct NewPackage {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_guests: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PackageStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
}

/// Update payload. Each field is tri-state: `Keep` is omitted from the
/// body, `Clear` is sent as `null`, `Set` carries the new value.
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct PackagePatch {
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub title: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub description: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub duration_days: Patch<u32>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub price: Patch<f64>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub max_guests: Patch<u32>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub status: Patch<PackageStatus>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub cover_image: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub start_date: Patch<NaiveDate>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub end_date: Patch<NaiveDate>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub location: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub is_featured: Patch<bool>,
}

impl PackagePatch {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self == &PackagePatch::default()
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewItinerary {
    pub day_number: u32,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewImage {
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
}

/// Filters for the list call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PackageFilter {
    pub status: Option<PackageStatus>,
    pub featured: Option<bool>,
}

impl PackageFilter {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(featured) = self.featured {
            pairs.push(("featured", featured.to_string()));
        }
        pairs
    }
}
