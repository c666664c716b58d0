// Public API exports
pub mod api;
pub mod clusterer;
pub mod config;
pub mod customer;
pub mod export;
pub mod store;

// Re-export main types for convenience
pub use customer::{generate_customers, Customer, Gender, NewCustomer, DEFAULT_SEED};

pub use clusterer::{
    round_tenths, summarize_clusters, summarize_with, ClusterSummary, ProfileTable,
};

pub use store::{
    AgeGroup, CustomerFilters, CustomerStore, FilterError, MemoryStore, ModelPerformance,
    SqliteStore, StoreError, Totals,
};

pub use export::{parse_csv, write_csv, CsvError};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::ServerConfig;
