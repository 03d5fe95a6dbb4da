//! Enrollment payloads.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payload for `POST /api/enrollments`. The user is always the caller.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEnrollmentRequest {
    pub course_id: Uuid,
}
