use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Review state of an organizer application (stored as a lowercase string)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ApplicationStatus::Pending),
            "approved" => Some(ApplicationStatus::Approved),
            "rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }
}

/// Application to become an event organizer
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(as = OrganizerApplication)]
pub struct OrganizerApplication {
    pub id: u64,
    pub user_id: u64,
    pub organization: String,
    pub contact_phone: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Apply request
#[derive(Debug, Deserialize, ToSchema)]
#[schema(as = ApplyRequest)]
pub struct ApplyRequest {
    #[schema(example = "Acme Events Pvt Ltd")]
    pub organization: String,
    #[schema(example = "+91-9800000000")]
    pub contact_phone: Option<String>,
}

/// Review request (admin decision)
#[derive(Debug, Deserialize, ToSchema)]
#[schema(as = ReviewRequest)]
pub struct ReviewRequest {
    /// "approved" or "rejected"
    #[schema(example = "approved")]
    pub decision: String,
}

/// Application response
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = ApplicationResponse)]
pub struct ApplicationResponse {
    pub application: OrganizerApplication,
}
