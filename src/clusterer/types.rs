use serde::{Deserialize, Serialize};

/// Small integer cluster identifier
pub type ClusterId = i32;

/// Aggregate statistics and display metadata for one cluster.
///
/// Derived from the customers sharing `cluster`; never authoritative on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSummary {
    /// `cluster + 1`, widened so every `i32` id maps to a distinct value
    pub id: i64,
    pub cluster: ClusterId,
    pub avg_age: f64,
    pub avg_income: f64,
    pub avg_spending: f64,
    pub size: u32,
    pub color: String,
    pub label: String,
    pub description: String,
}
