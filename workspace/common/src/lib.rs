//! Common transport-layer types shared between the domain core and the
//! HTTP handlers. The legacy student feed keeps the exact camelCase field
//! names the existing web client deserializes.

mod feed;
mod points;

pub use feed::{StudentActivityFeed, StudentActivityRow};
pub use points::TrainingPointSummary;
