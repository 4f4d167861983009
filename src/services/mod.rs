// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod checkin;
pub mod codes;
pub mod membership;
pub mod ranking;

pub use checkin::{CheckinRequest, CheckinValidator};
pub use codes::{run_code_issuance, IssuanceSummary};
pub use membership::{membership_view, run_suspension_scan, MembershipView, SuspensionSummary};
pub use ranking::{rank_participants, split_podium};
