//! Domain core for the activity management service: the activity-type
//! registry, the status state machines, and the transactional operations
//! that enforce capacity and duplicate-registration invariants.

pub mod activity;
pub mod complaint;
pub mod error;
pub mod participation;
pub mod points;
pub mod registry;
pub mod rules;

#[cfg(test)]
pub mod testing;

pub use error::{DomainError, Result};
pub use registry::ActivityTypeRegistry;

/// Returns the registry with the standard category defaults, the
/// configuration used everywhere outside of tests.
pub fn default_registry() -> ActivityTypeRegistry {
    ActivityTypeRegistry::with_defaults()
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::entities::activity::ActivityType;

    #[test]
    fn test_default_registry_matches_standard_defaults() {
        let registry = default_registry();
        assert_eq!(registry.points_for(ActivityType::KyNang), 10);
        assert_eq!(registry.points_for(ActivityType::TinhNguyen), 15);
    }
}
