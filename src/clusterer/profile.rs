use crate::clusterer::ClusterId;
use std::collections::BTreeMap;

/// Color used for any cluster id missing from a table
pub const NEUTRAL_COLOR: &str = "#6b7280";

/// Display metadata attached to a cluster summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterProfile {
    pub color: String,
    pub label: String,
    pub description: String,
}

/// How a table labels ids it has no entry for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackLabel {
    /// Same label for every unknown id
    Fixed(String),
    /// "Cluster N"
    Numbered,
}

/// Explicit mapping from cluster id to display metadata.
///
/// Lookups never fail: unknown ids get `fallback_label`,
/// `fallback_description` and [`NEUTRAL_COLOR`].
#[derive(Debug, Clone)]
pub struct ProfileTable {
    entries: BTreeMap<ClusterId, ClusterProfile>,
    fallback_label: FallbackLabel,
    fallback_description: String,
}

impl ProfileTable {
    pub fn new(fallback_label: FallbackLabel, fallback_description: impl Into<String>) -> Self {
        Self {
            entries: BTreeMap::new(),
            fallback_label,
            fallback_description: fallback_description.into(),
        }
    }

    pub fn with_entry(
        mut self,
        cluster: ClusterId,
        color: &str,
        label: &str,
        description: &str,
    ) -> Self {
        self.entries.insert(
            cluster,
            ClusterProfile {
                color: color.to_string(),
                label: label.to_string(),
                description: description.to_string(),
            },
        );
        self
    }

    /// Table used when summarizing an arbitrary (e.g. filtered) customer set.
    ///
    /// Ids 0-3 carry segment labels; id 4 only has a color and is reported as "Other".
    pub fn filtered_view() -> Self {
        Self::new(FallbackLabel::Fixed("Other".to_string()), "Other customer segment")
            .with_entry(0, "#ef4444", "Careful Spenders", "Low income, low spending customers")
            .with_entry(1, "#f59e0b", "Splurge Shoppers", "Low income, high spending customers")
            .with_entry(2, "#10b981", "Conservative Rich", "High income, low spending customers")
            .with_entry(3, "#06b6d4", "Premium Customers", "High income, high spending customers")
            .with_entry(4, "#8b5cf6", "Other", "Other customer segment")
    }

    /// The five named mall segments
    pub fn segments() -> Self {
        Self::new(FallbackLabel::Numbered, "")
            .with_entry(
                0,
                "#ef4444",
                "Careful Spenders",
                "Low income, moderate spending customers who are price-conscious",
            )
            .with_entry(
                1,
                "#f59e0b",
                "Splurge Shoppers",
                "Young customers with limited income but high spending behavior",
            )
            .with_entry(
                2,
                "#10b981",
                "Conservative Rich",
                "High-income customers who are conservative with their spending",
            )
            .with_entry(
                3,
                "#06b6d4",
                "Premium Customers",
                "Wealthy customers with high spending power and frequency",
            )
            .with_entry(
                4,
                "#8b5cf6",
                "Standard Customers",
                "Average income customers with modest spending patterns",
            )
    }

    pub fn contains(&self, cluster: ClusterId) -> bool {
        self.entries.contains_key(&cluster)
    }

    pub fn known_ids(&self) -> impl Iterator<Item = ClusterId> + '_ {
        self.entries.keys().copied()
    }

    pub fn profile(&self, cluster: ClusterId) -> ClusterProfile {
        match self.entries.get(&cluster) {
            Some(p) => p.clone(),
            None => ClusterProfile {
                color: NEUTRAL_COLOR.to_string(),
                label: match &self.fallback_label {
                    FallbackLabel::Fixed(label) => label.clone(),
                    FallbackLabel::Numbered => format!("Cluster {}", cluster),
                },
                description: self.fallback_description.clone(),
            },
        }
    }
}
