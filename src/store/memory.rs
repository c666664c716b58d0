use crate::clusterer::{summarize_with, ClusterSummary, ProfileTable};
use crate::customer::{generate_customers, Customer, NewCustomer, ValidationError};
use crate::store::{validate_dataset, CustomerStore, StoreError};
use std::collections::BTreeMap;
use std::sync::RwLock;
use tracing::debug;

struct Inner {
    customers: BTreeMap<u32, Customer>,
    next_id: u32,
}

/// Customers held in memory, keyed by id.
///
/// Cluster summaries are computed once at construction and returned
/// verbatim afterwards; later inserts do not change them.
pub struct MemoryStore {
    inner: RwLock<Inner>,
    summaries: Vec<ClusterSummary>,
    profiles: ProfileTable,
}

impl MemoryStore {
    /// Store `customers` under the five mall segments.
    ///
    /// Fails on a repeated id or a cluster id the segment table does not know.
    pub fn new(customers: Vec<Customer>) -> Result<Self, StoreError> {
        Self::with_profiles(customers, ProfileTable::segments())
    }

    pub fn with_profiles(
        customers: Vec<Customer>,
        profiles: ProfileTable,
    ) -> Result<Self, StoreError> {
        validate_dataset(&customers, &profiles)?;
        Ok(Self::assemble(customers, profiles))
    }

    /// Build from the generated mall dataset
    pub fn seeded(seed: u64) -> Self {
        // Generated ids are sequential and every block is a known segment.
        Self::assemble(generate_customers(seed), ProfileTable::segments())
    }

    fn assemble(customers: Vec<Customer>, profiles: ProfileTable) -> Self {
        let summaries = summarize_with(&customers, &profiles);
        let next_id = customers.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let customers = customers.into_iter().map(|c| (c.id, c)).collect();

        Self {
            inner: RwLock::new(Inner { customers, next_id }),
            summaries,
            profiles,
        }
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let guard = self
            .inner
            .read()
            .map_err(|_| StoreError::Storage("customer map lock poisoned".to_string()))?;
        Ok(guard.customers.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl CustomerStore for MemoryStore {
    fn all_customers(&self) -> Result<Vec<Customer>, StoreError> {
        let guard = self
            .inner
            .read()
            .map_err(|_| StoreError::Storage("customer map lock poisoned".to_string()))?;
        Ok(guard.customers.values().cloned().collect())
    }

    fn create_customer(&self, customer: NewCustomer) -> Result<Customer, StoreError> {
        customer.validate()?;
        if let Some(cluster) = customer.cluster {
            if !self.profiles.contains(cluster) {
                return Err(ValidationError::UnknownCluster(cluster).into());
            }
        }

        let mut guard = self
            .inner
            .write()
            .map_err(|_| StoreError::Storage("customer map lock poisoned".to_string()))?;
        let id = guard.next_id;
        guard.next_id += 1;

        let created = customer.with_id(id);
        guard.customers.insert(id, created.clone());
        debug!(id, "customer created");
        Ok(created)
    }

    fn cluster_summaries(&self) -> Result<Vec<ClusterSummary>, StoreError> {
        Ok(self.summaries.clone())
    }
}
