// SPDX-License-Identifier: MIT

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Class sessions (day queries, check-in code writes)
//! - Validated check-ins (conditional create for per-day uniqueness)
//! - Challenges and participants (ranking reads, guarded join)
//! - Members (membership cycle and suspension scan)
//! - Venue location configuration

use crate::db::{collections, VENUE_DOC_ID};
use crate::error::AppError;
use crate::models::{
    Challenge, ChallengeParticipant, ClassSession, Member, ValidatedCheckin, VenueLocation,
};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated
        // connection to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Session Operations ──────────────────────────────────────

    /// Get all sessions scheduled for a calendar day.
    pub async fn get_sessions_for_day(&self, day: &str) -> Result<Vec<ClassSession>, AppError> {
        let day = day.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::SESSIONS)
            .filter(move |q| q.for_all([q.field("date").eq(day.clone())]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find today's session carrying the given check-in code.
    ///
    /// Codes are unique among a day's sessions (enforced at issuance), so
    /// at most one document matches.
    pub async fn find_session_by_code(
        &self,
        day: &str,
        code: &str,
    ) -> Result<Option<ClassSession>, AppError> {
        let day = day.to_string();
        let code = code.to_string();
        let mut matches: Vec<ClassSession> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::SESSIONS)
            .filter(move |q| {
                q.for_all([
                    q.field("date").eq(day.clone()),
                    q.field("checkin_code").eq(code.clone()),
                ])
            })
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(matches.pop())
    }

    /// Create or replace a session document (test seeding and staff
    /// scheduling write the full document).
    pub async fn upsert_session(&self, session: &ClassSession) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::SESSIONS)
            .document_id(&session.id)
            .object(session)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Attach a check-in code to a session.
    ///
    /// Writes only the code fields. The issuance run works from a
    /// snapshot; an enrollment landing between its read and this write
    /// must not be clobbered.
    pub async fn set_session_code(&self, session: &ClassSession) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .fields(firestore::paths!(ClassSession::{checkin_code, code_issued_at}))
            .in_col(collections::SESSIONS)
            .document_id(&session.id)
            .object(session)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Check-in Operations ─────────────────────────────────────

    /// Get a user's validated check-in for a day, if any.
    pub async fn get_checkin(
        &self,
        user_id: &str,
        day: &str,
    ) -> Result<Option<ValidatedCheckin>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::CHECKINS)
            .obj()
            .one(&ValidatedCheckin::doc_id(user_id, day))
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Atomically create a check-in unless one already exists for the
    /// same (user, day).
    ///
    /// Runs inside a Firestore transaction: the existence read is
    /// registered against the transaction, so two concurrent validations
    /// for the same user and day cannot both commit a create. Returns
    /// `true` if the check-in was created, `false` if one already existed.
    pub async fn create_checkin_if_absent(
        &self,
        checkin: &ValidatedCheckin,
    ) -> Result<bool, AppError> {
        let doc_id = ValidatedCheckin::doc_id(&checkin.user_id, &checkin.date);

        let mut transaction = self
            .get_client()?
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        // Read within the transaction so the commit conflicts with any
        // concurrent write to the same document.
        let tdb = self.get_client()?.clone_with_consistency_selector(
            firestore::FirestoreConsistencySelector::Transaction(
                transaction.transaction_id().clone(),
            ),
        );
        let existing: Option<ValidatedCheckin> = tdb
            .fluent()
            .select()
            .by_id_in(collections::CHECKINS)
            .obj()
            .one(&doc_id)
            .await
            .map_err(|e| {
                AppError::Database(format!("Failed to read check-in in transaction: {}", e))
            })?;

        if existing.is_some() {
            let _ = transaction.rollback().await;
            return Ok(false);
        }

        self.get_client()?
            .fluent()
            .update()
            .in_col(collections::CHECKINS)
            .document_id(&doc_id)
            .object(checkin)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add check-in to transaction: {}", e))
            })?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        tracing::info!(
            user_id = %checkin.user_id,
            date = %checkin.date,
            session_id = %checkin.session_id,
            "Check-in recorded"
        );

        Ok(true)
    }

    // ─── Challenge Operations ────────────────────────────────────

    /// Get the currently active challenge, if one is running.
    pub async fn get_active_challenge(&self) -> Result<Option<Challenge>, AppError> {
        let mut matches: Vec<Challenge> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::CHALLENGES)
            .filter(|q| q.for_all([q.field("active").eq(true)]))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(matches.pop())
    }

    /// Get the most recently ended challenge (for the historical podium).
    pub async fn get_latest_ended_challenge(&self) -> Result<Option<Challenge>, AppError> {
        let mut matches: Vec<Challenge> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::CHALLENGES)
            .filter(|q| q.for_all([q.field("active").eq(false)]))
            .order_by([("ends_at", firestore::FirestoreQueryDirection::Descending)])
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(matches.pop())
    }

    /// Get all participants of a challenge.
    pub async fn get_participants(
        &self,
        challenge_id: &str,
    ) -> Result<Vec<ChallengeParticipant>, AppError> {
        let challenge_id = challenge_id.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::PARTICIPANTS)
            .filter(move |q| q.for_all([q.field("challenge_id").eq(challenge_id.clone())]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Enroll a user in a challenge unless already participating.
    ///
    /// Guarded create inside a transaction so that re-joining never
    /// resets an existing check-in counter. Returns `true` if the
    /// participant record was created.
    pub async fn create_participant_if_absent(
        &self,
        participant: &ChallengeParticipant,
    ) -> Result<bool, AppError> {
        let doc_id =
            ChallengeParticipant::doc_id(&participant.challenge_id, &participant.user_id);

        let mut transaction = self
            .get_client()?
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        let tdb = self.get_client()?.clone_with_consistency_selector(
            firestore::FirestoreConsistencySelector::Transaction(
                transaction.transaction_id().clone(),
            ),
        );
        let existing: Option<ChallengeParticipant> = tdb
            .fluent()
            .select()
            .by_id_in(collections::PARTICIPANTS)
            .obj()
            .one(&doc_id)
            .await
            .map_err(|e| {
                AppError::Database(format!("Failed to read participant in transaction: {}", e))
            })?;

        if existing.is_some() {
            let _ = transaction.rollback().await;
            return Ok(false);
        }

        self.get_client()?
            .fluent()
            .update()
            .in_col(collections::PARTICIPANTS)
            .document_id(&doc_id)
            .object(participant)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add participant to transaction: {}", e))
            })?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        Ok(true)
    }

    // ─── Member Operations ───────────────────────────────────────

    /// Get a member by user ID.
    pub async fn get_member(&self, user_id: &str) -> Result<Option<Member>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::MEMBERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get all approved members (input to the suspension scan).
    pub async fn get_approved_members(&self) -> Result<Vec<Member>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::MEMBERS)
            .filter(|q| q.for_all([q.field("status").eq("approved")]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update a member.
    pub async fn upsert_member(&self, member: &Member) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::MEMBERS)
            .document_id(&member.id)
            .object(member)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Set a member's status, leaving every other field untouched.
    ///
    /// The suspension scan runs from a snapshot; a payment recorded while
    /// the scan is in flight must survive the status write.
    pub async fn set_member_status(&self, member: &Member) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .fields(firestore::paths!(Member::{status}))
            .in_col(collections::MEMBERS)
            .document_id(&member.id)
            .object(member)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Configuration ───────────────────────────────────────────

    /// Get the venue geofence location, if configured.
    pub async fn get_venue_location(&self) -> Result<Option<VenueLocation>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::CONFIG)
            .obj()
            .one(VENUE_DOC_ID)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
