//! Liveness response.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::middleware::SurfaceKind;

#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub service: SurfaceKind,
    pub timestamp: Timestamp,
}

impl Health {
    pub fn ok(service: SurfaceKind) -> Self {
        Self {
            status: "ok".to_owned(),
            service,
            timestamp: Timestamp::now(),
        }
    }
}
