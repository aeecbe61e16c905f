// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod memory_roster_repository;
pub mod postgres_roster_repository;

pub use memory_roster_repository::MemoryRosterRepository;
pub use postgres_roster_repository::PostgresRosterRepository;
