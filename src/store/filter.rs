use crate::clusterer::ClusterId;
use crate::customer::{Customer, Gender};
use crate::store::FilterError;
use serde::Deserialize;
use std::str::FromStr;

/// Fixed, non-overlapping age buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgeGroup {
    #[default]
    All,
    /// 18-30 inclusive
    Young,
    /// 31-45 inclusive
    Adult,
    /// 46-60 inclusive
    Middle,
    /// over 60
    Senior,
}

impl AgeGroup {
    pub fn contains(&self, age: u32) -> bool {
        match self {
            AgeGroup::All => true,
            AgeGroup::Young => (18..=30).contains(&age),
            AgeGroup::Adult => (31..=45).contains(&age),
            AgeGroup::Middle => (46..=60).contains(&age),
            AgeGroup::Senior => age > 60,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::All => "all",
            AgeGroup::Young => "18-30",
            AgeGroup::Adult => "31-45",
            AgeGroup::Middle => "46-60",
            AgeGroup::Senior => "60+",
        }
    }
}

impl FromStr for AgeGroup {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(AgeGroup::All),
            "18-30" => Ok(AgeGroup::Young),
            "31-45" => Ok(AgeGroup::Adult),
            "46-60" => Ok(AgeGroup::Middle),
            "60+" => Ok(AgeGroup::Senior),
            other => Err(FilterError::AgeGroup(other.to_string())),
        }
    }
}

/// Raw query string as received over HTTP, before validation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    pub age_group: Option<String>,
    pub gender: Option<String>,
    pub cluster: Option<String>,
}

/// Validated filter set. Criteria combine with logical AND; `None` and
/// `AgeGroup::All` match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFilters {
    pub age_group: AgeGroup,
    pub gender: Option<Gender>,
    pub cluster: Option<ClusterId>,
}

impl CustomerFilters {
    pub fn parse(query: &FilterQuery) -> Result<Self, FilterError> {
        let age_group = match query.age_group.as_deref() {
            Some(raw) => raw.parse()?,
            None => AgeGroup::All,
        };

        let gender = match query.gender.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) if raw.eq_ignore_ascii_case("all") => None,
            Some(raw) => Some(
                raw.parse::<Gender>()
                    .map_err(|_| FilterError::Gender(raw.to_string()))?,
            ),
        };

        // "-1" is the dashboard's "all clusters" sentinel
        let cluster = match query.cluster.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(raw) => match raw.parse::<ClusterId>() {
                Ok(-1) => None,
                Ok(id) => Some(id),
                Err(_) => return Err(FilterError::Cluster(raw.to_string())),
            },
        };

        Ok(Self {
            age_group,
            gender,
            cluster,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.age_group == AgeGroup::All && self.gender.is_none() && self.cluster.is_none()
    }

    pub fn matches(&self, customer: &Customer) -> bool {
        self.age_group.contains(customer.age)
            && self.gender.is_none_or(|g| customer.gender == g)
            && self.cluster.is_none_or(|id| customer.cluster == Some(id))
    }
}
