pub use sea_orm_migration::prelude::*;

mod m20250901_000001_create_tables;
mod m20251005_000001_add_complaints_notifications;
pub mod entity_iden;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_create_tables::Migration),
            Box::new(m20251005_000001_add_complaints_notifications::Migration),
        ]
    }
}
