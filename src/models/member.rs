// SPDX-License-Identifier: MIT

//! Member model for storage and API.

use serde::{Deserialize, Serialize};

/// Membership lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    /// Registered, awaiting staff approval
    Pending,
    /// Active member
    Approved,
    /// Payment overdue; set by the suspension scan
    Suspended,
}

/// Member profile stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// User ID (also used as document ID)
    pub id: String,
    /// Full display name
    pub display_name: String,
    /// Profile picture URL
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Membership status
    pub status: MemberStatus,
    /// Explicit billing cycle start, if staff set one (`YYYY-MM-DD`)
    #[serde(default)]
    pub cycle_start_date: Option<String>,
    /// Day of the most recent recorded payment (`YYYY-MM-DD`)
    #[serde(default)]
    pub last_payment_date: Option<String>,
    /// Day the member enrolled (`YYYY-MM-DD`)
    #[serde(default)]
    pub enrolled_date: Option<String>,
}
