//! Core domain types shared across the workspace.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A geographic point in WGS84 coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    /// Builds a location, rejecting out-of-range coordinates.
    ///
    /// Providers occasionally hallucinate coordinates; anything outside
    /// `[-90, 90] × [-180, 180]` is treated as unknown rather than kept.
    #[must_use]
    pub fn checked(lat: f64, lng: f64) -> Option<Self> {
        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) {
            Some(Self { lat, lng })
        } else {
            None
        }
    }
}

/// What is known about a business. Every optional field means "unknown",
/// never empty-string; adapters normalize at the boundary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BusinessData {
    pub name: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_rating_count: Option<u32>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub place_id: Option<String>,
}

/// An AI-produced assessment of a business, on the canonical 0–100 scale.
///
/// Producers working on other scales (the local heuristic scores 0–10)
/// rescale before an insight leaves their module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiInsight {
    pub score: f64,
    pub analysis_summary: String,
    pub suggested_offer: String,
    pub is_target: bool,
}

/// An ephemeral search hit. Lives only for the duration of a search
/// session; never persisted directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Session-scoped identifier, freshly generated by the aggregator.
    pub source_id: String,
    pub business_data: BusinessData,
    /// Absent when the provider did not return usable coordinates.
    #[serde(default)]
    pub location: Option<Location>,
}

/// Pipeline stage a prospect is in. No transition graph is enforced:
/// any status may be set at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserStatus {
    New,
    Contacted,
    Signed,
    Ignored,
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserStatus::New => write!(f, "New"),
            UserStatus::Contacted => write!(f, "Contacted"),
            UserStatus::Signed => write!(f, "Signed"),
            UserStatus::Ignored => write!(f, "Ignored"),
        }
    }
}

impl FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "new" => Ok(UserStatus::New),
            "contacted" => Ok(UserStatus::Contacted),
            "signed" => Ok(UserStatus::Signed),
            "ignored" => Ok(UserStatus::Ignored),
            other => Err(format!(
                "unknown status '{other}' (expected new, contacted, signed or ignored)"
            )),
        }
    }
}

/// A business saved into the CRM list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prospect {
    pub id: String,
    pub business_data: BusinessData,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub ai_insight: Option<AiInsight>,
    pub user_status: UserStatus,
    pub created_at: DateTime<Utc>,
}

impl Prospect {
    /// Creates a new prospect in status [`UserStatus::New`] with a fresh id
    /// and the current timestamp.
    #[must_use]
    pub fn new(
        business_data: BusinessData,
        location: Option<Location>,
        ai_insight: Option<AiInsight>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            business_data,
            location,
            ai_insight,
            user_status: UserStatus::New,
            created_at: Utc::now(),
        }
    }
}
