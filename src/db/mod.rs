// SPDX-License-Identifier: MIT

//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const MEMBERS: &str = "members";
    pub const SESSIONS: &str = "sessions";
    /// Validated check-ins, keyed `{user_id}_{date}`
    pub const CHECKINS: &str = "checkins";
    pub const CHALLENGES: &str = "challenges";
    /// Challenge participants, keyed `{challenge_id}_{user_id}`
    pub const PARTICIPANTS: &str = "challenge_participants";
    /// Singleton configuration documents (venue location lives here)
    pub const CONFIG: &str = "config";
}

/// Document ID of the venue location within [`collections::CONFIG`].
pub const VENUE_DOC_ID: &str = "venue";
