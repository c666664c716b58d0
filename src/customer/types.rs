use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A single mall customer record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Store-assigned identifier, immutable once created
    pub id: u32,
    /// External reference number
    pub customer_id: u32,
    pub gender: Gender,
    pub age: u32,
    /// Thousands of currency units
    pub annual_income: f64,
    /// 0-100
    pub spending_score: f64,
    pub cluster: Option<i32>,
}

/// Creation payload: a customer before the store assigns its id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub customer_id: u32,
    pub gender: Gender,
    pub age: u32,
    pub annual_income: f64,
    pub spending_score: f64,
    #[serde(default)]
    pub cluster: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("age must be positive")]
    NonPositiveAge,

    #[error("annual income must be a non-negative number, got {0}")]
    InvalidIncome(f64),

    #[error("spending score must lie in 0-100, got {0}")]
    InvalidSpendingScore(f64),

    #[error("unknown gender: {0}")]
    UnknownGender(String),

    #[error("unknown cluster: {0}")]
    UnknownCluster(i32),

    #[error("duplicate customer id: {0}")]
    DuplicateId(u32),
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    /// Case-insensitive and whitespace-tolerant: "male", " MALE" and "Male" all parse
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("male") {
            Ok(Gender::Male)
        } else if s.eq_ignore_ascii_case("female") {
            Ok(Gender::Female)
        } else {
            Err(ValidationError::UnknownGender(s.to_string()))
        }
    }
}

impl NewCustomer {
    /// Check field ranges. Cluster membership is checked by the store,
    /// which owns the table of known clusters.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.age == 0 {
            return Err(ValidationError::NonPositiveAge);
        }
        if !self.annual_income.is_finite() || self.annual_income < 0.0 {
            return Err(ValidationError::InvalidIncome(self.annual_income));
        }
        if !self.spending_score.is_finite() || !(0.0..=100.0).contains(&self.spending_score) {
            return Err(ValidationError::InvalidSpendingScore(self.spending_score));
        }
        Ok(())
    }

    pub fn with_id(self, id: u32) -> Customer {
        Customer {
            id,
            customer_id: self.customer_id,
            gender: self.gender,
            age: self.age,
            annual_income: self.annual_income,
            spending_score: self.spending_score,
            cluster: self.cluster,
        }
    }
}
