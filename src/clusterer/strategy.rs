use crate::clusterer::ClusterId;
use serde::Serialize;

/// Suggested marketing actions for one segment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingStrategy {
    pub cluster: ClusterId,
    pub title: &'static str,
    pub description: &'static str,
    pub strategies: [&'static str; 3],
}

const STRATEGIES: [MarketingStrategy; 5] = [
    MarketingStrategy {
        cluster: 0,
        title: "Careful Spenders",
        description: "Low income, moderate spending customers",
        strategies: [
            "Budget-friendly promotions",
            "Value-for-money products",
            "Loyalty programs",
        ],
    },
    MarketingStrategy {
        cluster: 1,
        title: "Splurge Shoppers",
        description: "Low income, high spending customers",
        strategies: [
            "Impulse buying triggers",
            "Flash sales and discounts",
            "Credit options",
        ],
    },
    MarketingStrategy {
        cluster: 2,
        title: "Conservative Rich",
        description: "High income, low spending customers",
        strategies: [
            "Premium quality emphasis",
            "Investment-focused products",
            "Exclusive experiences",
        ],
    },
    MarketingStrategy {
        cluster: 3,
        title: "Premium Customers",
        description: "High income, high spending customers",
        strategies: [
            "Luxury products and services",
            "VIP treatment programs",
            "Personal shopping assistance",
        ],
    },
    MarketingStrategy {
        cluster: 4,
        title: "Standard Customers",
        description: "Average income, average spending customers",
        strategies: [
            "Balanced product offerings",
            "Seasonal promotions",
            "Cross-selling opportunities",
        ],
    },
];

pub fn marketing_strategies() -> &'static [MarketingStrategy] {
    &STRATEGIES
}
