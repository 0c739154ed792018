//! Distribution records and the listing response envelope.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Lifecycle status as reported by the server.
///
/// Values outside the known set are kept verbatim in `Unknown` and are
/// presented like `Disabled`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DistributionStatus {
    Provisioning,
    Active,
    Suspended,
    Disabled,
    Unknown(String),
}

impl From<String> for DistributionStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "provisioning" => DistributionStatus::Provisioning,
            "active" => DistributionStatus::Active,
            "suspended" => DistributionStatus::Suspended,
            "disabled" => DistributionStatus::Disabled,
            _ => DistributionStatus::Unknown(s),
        }
    }
}

impl From<DistributionStatus> for String {
    fn from(status: DistributionStatus) -> Self {
        status.as_str().to_string()
    }
}

impl DistributionStatus {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            DistributionStatus::Provisioning => "provisioning",
            DistributionStatus::Active => "active",
            DistributionStatus::Suspended => "suspended",
            DistributionStatus::Disabled => "disabled",
            DistributionStatus::Unknown(raw) => raw,
        }
    }

    /// Display label; unrecognized values fall back to the inactive label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            DistributionStatus::Provisioning => "Provisioning",
            DistributionStatus::Active => "Active",
            DistributionStatus::Suspended => "Suspended",
            DistributionStatus::Disabled | DistributionStatus::Unknown(_) => "Inactive",
        }
    }
}

/// A CDN distribution as returned by the listing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub domain: String,
    pub status: DistributionStatus,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub cache_strategy: String,
    #[serde(default)]
    pub domain_type: String,
}

impl Distribution {
    /// `updated_at` in the local time zone, if it parses as RFC 3339
    #[must_use]
    pub fn updated_at_local(&self) -> Option<DateTime<Local>> {
        parse_timestamp(&self.updated_at)
    }

    /// `created_at` in the local time zone, if it parses as RFC 3339
    #[must_use]
    pub fn created_at_local(&self) -> Option<DateTime<Local>> {
        parse_timestamp(&self.created_at)
    }
}

/// Parse an ISO-8601/RFC 3339 timestamp into local time
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Local))
}

/// Pagination block inside `meta`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub total_pages: u64,
}

/// Response metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMeta {
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// One page of the listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResponse {
    #[serde(default)]
    pub data: Vec<Distribution>,
    #[serde(default)]
    pub meta: Option<ResponseMeta>,
}

impl PageResponse {
    /// Pagination metadata, if the server sent any
    #[must_use]
    pub fn pagination(&self) -> Option<&Pagination> {
        self.meta.as_ref().and_then(|m| m.pagination.as_ref())
    }
}
