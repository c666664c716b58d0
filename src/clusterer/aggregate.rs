use crate::clusterer::{compute_centroid, ClusterId, ClusterSummary, ProfileTable};
use crate::customer::Customer;
use std::collections::BTreeMap;

/// Round to one decimal place, halves away from zero.
///
/// `f64::round` already rounds half away from zero, so 49.46 -> 49.5,
/// 49.44 -> 49.4 and -0.25 -> -0.3.
pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Per-cluster statistics for an arbitrary customer set, using the
/// filtered-view profile table.
pub fn summarize_clusters(customers: &[Customer]) -> Vec<ClusterSummary> {
    summarize_with(customers, &ProfileTable::filtered_view())
}

/// Group `customers` by cluster id (absent counts as 0) and summarize each
/// group. Output is ascending by cluster id and independent of input order;
/// empty input yields an empty result.
pub fn summarize_with(customers: &[Customer], profiles: &ProfileTable) -> Vec<ClusterSummary> {
    let mut groups: BTreeMap<ClusterId, Vec<&Customer>> = BTreeMap::new();
    for c in customers {
        groups.entry(c.cluster.unwrap_or(0)).or_default().push(c);
    }

    groups
        .into_iter()
        .filter_map(|(cluster, members)| {
            let centroid = compute_centroid(&members)?;
            let profile = profiles.profile(cluster);
            Some(ClusterSummary {
                id: i64::from(cluster) + 1,
                cluster,
                avg_age: round_tenths(centroid.age),
                avg_income: round_tenths(centroid.income),
                avg_spending: round_tenths(centroid.spending),
                size: members.len() as u32,
                color: profile.color,
                label: profile.label,
                description: profile.description,
            })
        })
        .collect()
}
