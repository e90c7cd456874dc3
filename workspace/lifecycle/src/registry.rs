use std::collections::HashMap;

use model::entities::activity::ActivityType;
use sea_orm::Iterable;

use crate::error::{DomainError, Result};

/// Immutable mapping from activity category to its default training-point
/// value. Built once at process start and carried in the application state;
/// activities created without an explicit point override take their value
/// from here.
#[derive(Debug, Clone)]
pub struct ActivityTypeRegistry {
    defaults: HashMap<ActivityType, i32>,
}

impl ActivityTypeRegistry {
    /// Registry with the standard defaults for every category.
    pub fn with_defaults() -> Self {
        let defaults = ActivityType::iter()
            .map(|ty| (ty, standard_points(ty)))
            .collect();
        Self { defaults }
    }

    /// Default training points for a known category.
    pub fn points_for(&self, ty: ActivityType) -> i32 {
        // The map is total over the enum by construction.
        self.defaults.get(&ty).copied().unwrap_or_else(|| standard_points(ty))
    }

    /// Default training points for a category given by its client-facing
    /// name. Strings outside the fixed set yield `UnknownCategory`.
    pub fn points_for_label(&self, label: &str) -> Result<i32> {
        let ty = ActivityType::parse(label)
            .ok_or_else(|| DomainError::UnknownCategory(label.to_string()))?;
        Ok(self.points_for(ty))
    }
}

fn standard_points(ty: ActivityType) -> i32 {
    match ty {
        ActivityType::HocThuat => 10,
        ActivityType::TinhNguyen => 15,
        ActivityType::TheThao => 7,
        ActivityType::KyNang => 10,
        ActivityType::NgheThuat => 7,
        ActivityType::HoiThao => 5,
        ActivityType::Khac => 5,
    }
}
