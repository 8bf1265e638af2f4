use crate::domains::event::models::{CreateTierRequest, TicketTier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Listed event
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(as = Event)]
pub struct Event {
    pub id: u64,
    /// User id of the approved organizer who listed the event
    pub organizer_id: u64,
    pub title: String,
    pub description: String,
    pub venue: String,
    pub category: String,
    pub starts_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create event request (tiers are created together with the event)
#[derive(Debug, Deserialize, ToSchema)]
#[schema(as = CreateEventRequest)]
pub struct CreateEventRequest {
    #[schema(example = "Rust Meetup 2026")]
    pub title: String,
    pub description: Option<String>,
    #[schema(example = "Community Hall, Pune")]
    pub venue: String,
    #[schema(example = "tech")]
    pub category: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub tiers: Vec<CreateTierRequest>,
}

/// Listing query parameters (offset/limit pagination)
#[derive(Debug, Deserialize)]
pub struct ListEventsQuery {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
    pub category: Option<String>,
}

/// Single event response, with its tiers
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = EventResponse)]
pub struct EventResponse {
    pub event: Event,
    pub tiers: Vec<TicketTier>,
}

/// Paginated listing response
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = EventListResponse)]
pub struct EventListResponse {
    pub events: Vec<Event>,
    /// Total matching rows, regardless of pagination
    pub total: u64,
    pub offset: i64,
    pub limit: i64,
}
