// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod challenge;
pub mod checkin;
pub mod member;
pub mod session;
pub mod venue;

pub use challenge::{Challenge, ChallengeParticipant, RankedParticipant};
pub use checkin::ValidatedCheckin;
pub use member::{Member, MemberStatus};
pub use session::ClassSession;
pub use venue::VenueLocation;
