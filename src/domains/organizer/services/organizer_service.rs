use crate::domains::auth::models::UserRole;
use crate::domains::organizer::models::{ApplicationStatus, ApplyRequest, OrganizerApplication};
use crate::shared::database::{Database, OrganizerRepository, UserRepository};
use crate::shared::errors::OrganizerError;

/// Organizer application workflow: users apply, admins review, approval
/// promotes the user's role to organizer.
#[derive(Clone)]
pub struct OrganizerService {
    db: Database,
}

impl OrganizerService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn apply(
        &self,
        user_id: u64,
        request: ApplyRequest,
    ) -> Result<OrganizerApplication, OrganizerError> {
        let repo = OrganizerRepository::new(self.db.pool().clone());

        // One live (pending or approved) application per user
        let existing = repo
            .find_live_by_user(user_id)
            .await
            .map_err(|e| OrganizerError::DatabaseError(e.to_string()))?;
        if existing.is_some() {
            return Err(OrganizerError::AlreadyApplied { user_id });
        }

        let application = repo
            .create(user_id, &request.organization, request.contact_phone.as_deref())
            .await
            .map_err(|e| OrganizerError::DatabaseError(e.to_string()))?;

        tracing::info!(user_id, application_id = application.id, "Organizer application filed");
        Ok(application)
    }

    pub async fn my_application(&self, user_id: u64) -> Result<OrganizerApplication, OrganizerError> {
        let repo = OrganizerRepository::new(self.db.pool().clone());

        repo.find_latest_by_user(user_id)
            .await
            .map_err(|e| OrganizerError::DatabaseError(e.to_string()))?
            .ok_or(OrganizerError::NotFoundForUser { user_id })
    }

    /// Admin review. Approval also promotes the applicant to the organizer
    /// role so they can list events.
    pub async fn review(
        &self,
        reviewer_role: UserRole,
        application_id: u64,
        decision: &str,
    ) -> Result<OrganizerApplication, OrganizerError> {
        if reviewer_role != UserRole::Admin {
            return Err(OrganizerError::Forbidden);
        }

        let status = match ApplicationStatus::parse(decision) {
            Some(ApplicationStatus::Approved) => ApplicationStatus::Approved,
            Some(ApplicationStatus::Rejected) => ApplicationStatus::Rejected,
            _ => return Err(OrganizerError::InvalidDecision(decision.to_string())),
        };

        let repo = OrganizerRepository::new(self.db.pool().clone());
        let application = repo
            .find_by_id(application_id)
            .await
            .map_err(|e| OrganizerError::DatabaseError(e.to_string()))?
            .ok_or(OrganizerError::NotFound { id: application_id })?;

        if application.status != ApplicationStatus::Pending {
            return Err(OrganizerError::AlreadyReviewed);
        }

        let application = repo
            .update_status(application_id, status)
            .await
            .map_err(|e| OrganizerError::DatabaseError(e.to_string()))?;

        if status == ApplicationStatus::Approved {
            let user_repo = UserRepository::new(self.db.pool().clone());
            user_repo
                .update_role(application.user_id, UserRole::Organizer)
                .await
                .map_err(|e| OrganizerError::DatabaseError(e.to_string()))?;
        }

        tracing::info!(
            application_id,
            status = status.as_str(),
            "Organizer application reviewed"
        );
        Ok(application)
    }
}
