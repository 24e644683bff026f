pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_ideas_table;
mod m20250601_000002_create_funding_requests_table;
mod m20250601_000003_create_negotiation_tables;
mod m20250601_000004_create_ideathon_registrations_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_ideas_table::Migration),
            Box::new(m20250601_000002_create_funding_requests_table::Migration),
            Box::new(m20250601_000003_create_negotiation_tables::Migration),
            Box::new(m20250601_000004_create_ideathon_registrations_table::Migration),
        ]
    }
}
