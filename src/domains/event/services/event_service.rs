use crate::domains::auth::models::UserRole;
use crate::domains::event::models::{CreateEventRequest, Event, ListEventsQuery, TicketTier};
use crate::shared::database::{Database, EventCreate, EventRepository, TierCreate};
use crate::shared::errors::EventError;
use rust_decimal::Decimal;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

/// Event listing and lookup.
#[derive(Clone)]
pub struct EventService {
    db: Database,
}

impl EventService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create an event with its ticket tiers. Only approved organizers (or
    /// admins) may list events.
    pub async fn create_event(
        &self,
        organizer_id: u64,
        role: UserRole,
        request: CreateEventRequest,
    ) -> Result<(Event, Vec<TicketTier>), EventError> {
        if role != UserRole::Organizer && role != UserRole::Admin {
            return Err(EventError::NotAnOrganizer);
        }

        if request.title.trim().is_empty() {
            return Err(EventError::InvalidEvent("title must not be empty".into()));
        }
        if request.venue.trim().is_empty() {
            return Err(EventError::InvalidEvent("venue must not be empty".into()));
        }
        if request.tiers.is_empty() {
            return Err(EventError::InvalidTier(
                "an event needs at least one ticket tier".into(),
            ));
        }
        for tier in &request.tiers {
            if tier.name.trim().is_empty() {
                return Err(EventError::InvalidTier("tier name must not be empty".into()));
            }
            if tier.price < Decimal::ZERO {
                return Err(EventError::InvalidTier(format!(
                    "tier '{}' has a negative price",
                    tier.name
                )));
            }
            if tier.quantity == 0 {
                return Err(EventError::InvalidTier(format!(
                    "tier '{}' has zero quantity",
                    tier.name
                )));
            }
        }

        let repo = EventRepository::new(self.db.pool().clone());
        let (event, tiers) = repo
            .create(&EventCreate {
                organizer_id,
                title: request.title,
                description: request.description.unwrap_or_default(),
                venue: request.venue,
                category: request.category.unwrap_or_else(|| "general".to_string()),
                starts_at: request.starts_at,
                tiers: request
                    .tiers
                    .into_iter()
                    .map(|t| TierCreate {
                        name: t.name,
                        price: t.price,
                        quantity: t.quantity,
                    })
                    .collect(),
            })
            .await
            .map_err(|e| EventError::DatabaseError(e.to_string()))?;

        tracing::info!(event_id = event.id, organizer_id, "Event listed");
        Ok((event, tiers))
    }

    /// Public paginated listing. Returns the page plus the total match count.
    pub async fn list_events(
        &self,
        query: &ListEventsQuery,
    ) -> Result<(Vec<Event>, u64, i64, i64), EventError> {
        let offset = query.offset.unwrap_or(0).max(0);
        let limit = query
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        let repo = EventRepository::new(self.db.pool().clone());
        let events = repo
            .list(offset, limit, query.category.as_deref())
            .await
            .map_err(|e| EventError::DatabaseError(e.to_string()))?;
        let total = repo
            .count(query.category.as_deref())
            .await
            .map_err(|e| EventError::DatabaseError(e.to_string()))?;

        Ok((events, total, offset, limit))
    }

    pub async fn get_event(&self, id: u64) -> Result<(Event, Vec<TicketTier>), EventError> {
        let repo = EventRepository::new(self.db.pool().clone());

        let event = repo
            .find_by_id(id)
            .await
            .map_err(|e| EventError::DatabaseError(e.to_string()))?
            .ok_or(EventError::NotFound { id })?;
        let tiers = repo
            .tiers_for_event(id)
            .await
            .map_err(|e| EventError::DatabaseError(e.to_string()))?;

        Ok((event, tiers))
    }
}
