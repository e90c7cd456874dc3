use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Cumulative training points for one student.
///
/// Only participations whose status is `present` contribute to the total;
/// pending, approved, and rejected rows carry no credit yet.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TrainingPointSummary {
    pub student_id: i32,
    /// Sum of training points over `present` participations.
    pub total: i32,
    /// Number of participations counted into the total.
    pub present_count: u64,
}
