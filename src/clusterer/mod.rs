mod aggregate;
mod centroid;
mod profile;
mod strategy;
mod types;


pub use aggregate::{round_tenths, summarize_clusters, summarize_with};
pub use centroid::{compute_centroid, Centroid};
pub use profile::{ClusterProfile, FallbackLabel, ProfileTable, NEUTRAL_COLOR};
pub use strategy::{marketing_strategies, MarketingStrategy};
pub use types::{ClusterId, ClusterSummary};
