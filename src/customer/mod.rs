mod generator;
mod types;

#[cfg(test)]
mod tests;

pub use generator::{generate_customers, ClusterBlock, MALL_BLOCKS};
pub use types::{Customer, Gender, NewCustomer, ValidationError};

/// Default seed used when none is configured
pub const DEFAULT_SEED: u64 = 42;
