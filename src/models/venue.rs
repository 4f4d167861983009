// SPDX-License-Identifier: MIT

//! Venue location configuration.

use serde::{Deserialize, Serialize};

/// The single reference point used to geofence in-person check-ins.
///
/// Stored as the `config/venue` document; read-only from this service's
/// perspective and fetched fresh on every validation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VenueLocation {
    pub latitude: f64,
    pub longitude: f64,
}
