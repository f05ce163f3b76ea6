pub use sea_orm_migration::prelude::*;

mod m20250612_090000_reference_tables;
mod m20250612_100000_journal_entries;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250612_090000_reference_tables::Migration),
            Box::new(m20250612_100000_journal_entries::Migration),
        ]
    }
}
