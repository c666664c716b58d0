use super::*;
use std::collections::HashSet;

fn sample_new() -> NewCustomer {
    NewCustomer {
        customer_id: 501,
        gender: Gender::Female,
        age: 33,
        annual_income: 61.5,
        spending_score: 72.0,
        cluster: Some(3),
    }
}

#[test]
fn test_generator_is_deterministic() {
    let a = generate_customers(7);
    let b = generate_customers(7);
    assert_eq!(a, b);
}

#[test]
fn test_generator_seed_changes_output() {
    let a = generate_customers(1);
    let b = generate_customers(2);
    assert_ne!(a, b);
}

#[test]
fn test_generator_block_sizes() {
    let customers = generate_customers(DEFAULT_SEED);
    assert_eq!(customers.len(), 200);

    for block in MALL_BLOCKS.iter() {
        let n = customers
            .iter()
            .filter(|c| c.cluster == Some(block.cluster))
            .count();
        assert_eq!(n as u32, block.count, "cluster {}", block.cluster);
    }
}

#[test]
fn test_generator_ids_unique_and_sequential() {
    let customers = generate_customers(DEFAULT_SEED);
    let ids: HashSet<u32> = customers.iter().map(|c| c.id).collect();
    assert_eq!(ids.len(), customers.len());
    assert_eq!(customers.first().unwrap().id, 1);
    assert_eq!(customers.last().unwrap().id, 200);
    assert!(customers.iter().all(|c| c.id == c.customer_id));
}

#[test]
fn test_generator_values_within_block_ranges() {
    let customers = generate_customers(99);
    for c in &customers {
        let block = MALL_BLOCKS
            .iter()
            .find(|b| Some(b.cluster) == c.cluster)
            .unwrap();
        let age = c.age as f64;
        assert!(age >= block.age.0 && age < block.age.0 + block.age.1);
        assert!(c.annual_income >= block.income.0);
        assert!(c.annual_income < block.income.0 + block.income.1);
        assert!(c.spending_score >= block.spending.0);
        assert!(c.spending_score < block.spending.0 + block.spending.1);
    }
}

#[test]
fn test_gender_parse_case_insensitive() {
    assert_eq!("male".parse::<Gender>().unwrap(), Gender::Male);
    assert_eq!("MALE".parse::<Gender>().unwrap(), Gender::Male);
    assert_eq!("Female".parse::<Gender>().unwrap(), Gender::Female);
    assert_eq!(" male ".parse::<Gender>().unwrap(), Gender::Male);
    assert_eq!("Female\t".parse::<Gender>().unwrap(), Gender::Female);
    assert!("other".parse::<Gender>().is_err());
}

#[test]
fn test_customer_serializes_camel_case() {
    let c = sample_new().with_id(9);
    let json = serde_json::to_value(&c).unwrap();
    assert_eq!(json["id"], 9);
    assert_eq!(json["customerId"], 501);
    assert_eq!(json["gender"], "Female");
    assert_eq!(json["annualIncome"], 61.5);
    assert_eq!(json["spendingScore"], 72.0);
    assert_eq!(json["cluster"], 3);
}

#[test]
fn test_absent_cluster_serializes_null() {
    let mut new = sample_new();
    new.cluster = None;
    let json = serde_json::to_value(new.with_id(1)).unwrap();
    assert!(json["cluster"].is_null());
}

#[test]
fn test_new_customer_cluster_defaults_to_none() {
    let raw = r#"{"customerId":1,"gender":"Male","age":30,"annualIncome":20.0,"spendingScore":50.0}"#;
    let new: NewCustomer = serde_json::from_str(raw).unwrap();
    assert_eq!(new.cluster, None);
}

#[test]
fn test_validate_accepts_sane_record() {
    assert!(sample_new().validate().is_ok());
}

#[test]
fn test_validate_rejects_out_of_range() {
    let mut c = sample_new();
    c.age = 0;
    assert_eq!(c.validate(), Err(ValidationError::NonPositiveAge));

    let mut c = sample_new();
    c.annual_income = -1.0;
    assert!(matches!(c.validate(), Err(ValidationError::InvalidIncome(_))));

    let mut c = sample_new();
    c.spending_score = 100.5;
    assert!(matches!(
        c.validate(),
        Err(ValidationError::InvalidSpendingScore(_))
    ));

    let mut c = sample_new();
    c.spending_score = f64::NAN;
    assert!(c.validate().is_err());
}
