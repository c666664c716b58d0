mod error;
mod filter;
mod memory;
mod performance;
mod sqlite;


pub use error::{FilterError, StoreError};
pub use filter::{AgeGroup, CustomerFilters, FilterQuery};
pub use memory::MemoryStore;
pub use performance::{ElbowPoint, ModelPerformance, SilhouettePoint};
pub use sqlite::{DatasetMeta, SqliteStore};

use crate::clusterer::{round_tenths, ClusterSummary, ProfileTable};
use crate::customer::{Customer, NewCustomer, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A whole dataset must have unique ids and only reference clusters in `profiles`.
pub fn validate_dataset(
    customers: &[Customer],
    profiles: &ProfileTable,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(customers.len());
    for c in customers {
        if !seen.insert(c.id) {
            return Err(ValidationError::DuplicateId(c.id));
        }
        if let Some(cluster) = c.cluster {
            if !profiles.contains(cluster) {
                return Err(ValidationError::UnknownCluster(cluster));
            }
        }
    }
    Ok(())
}

/// Core trait every customer backend implements.
///
/// Handlers only see this trait, so the in-memory and SQLite backends are
/// interchangeable behind an `Arc<dyn CustomerStore>`.
pub trait CustomerStore: Send + Sync {
    fn all_customers(&self) -> Result<Vec<Customer>, StoreError>;

    /// Customers matching every provided criterion
    fn filtered_customers(&self, filters: &CustomerFilters) -> Result<Vec<Customer>, StoreError> {
        Ok(self
            .all_customers()?
            .into_iter()
            .filter(|c| filters.matches(c))
            .collect())
    }

    /// Assign a fresh id and persist the record
    fn create_customer(&self, customer: NewCustomer) -> Result<Customer, StoreError>;

    /// Summaries computed when the dataset was built
    fn cluster_summaries(&self) -> Result<Vec<ClusterSummary>, StoreError>;

    fn model_performance(&self) -> Result<ModelPerformance, StoreError> {
        Ok(ModelPerformance::reference())
    }

    fn totals(&self) -> Result<Totals, StoreError> {
        let customers = self.all_customers()?;
        let total_clusters = self.cluster_summaries()?.len();
        Ok(Totals::from_customers(&customers, total_clusters))
    }
}

/// Dataset-wide headline figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_customers: usize,
    pub avg_income: f64,
    pub avg_spending: f64,
    pub total_clusters: usize,
}

impl Totals {
    /// Averages over an empty set are reported as 0.0.
    pub fn from_customers(customers: &[Customer], total_clusters: usize) -> Self {
        let n = customers.len();
        let (avg_income, avg_spending) = if n == 0 {
            (0.0, 0.0)
        } else {
            let income: f64 = customers.iter().map(|c| c.annual_income).sum();
            let spending: f64 = customers.iter().map(|c| c.spending_score).sum();
            (income / n as f64, spending / n as f64)
        };

        Self {
            total_customers: n,
            avg_income: round_tenths(avg_income),
            avg_spending: round_tenths(avg_spending),
            total_clusters,
        }
    }
}
