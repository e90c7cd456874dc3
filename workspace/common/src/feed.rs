use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of the legacy student activity feed.
///
/// Field names are the wire names the existing client expects
/// (`GET /student/activities`), so they are camelCase and must not change.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct StudentActivityRow {
    #[serde(rename = "activityID")]
    pub activity_id: i32,
    #[serde(rename = "participationID")]
    pub participation_id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    #[serde(rename = "trainingPoint")]
    pub training_point: i32,
    #[serde(rename = "eventStart")]
    pub event_start: NaiveDateTime,
    pub location: String,
    #[serde(rename = "participationStatus")]
    pub participation_status: String,
    /// Vietnamese display label for the participation status.
    #[serde(rename = "statusLabel")]
    pub status_label: String,
}

/// Envelope of the legacy feed endpoint: `{ "activities": [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct StudentActivityFeed {
    pub activities: Vec<StudentActivityRow>,
}
