use crate::customer::{Customer, Gender};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Sampling ranges for one block of generated customers.
///
/// Every field is drawn as `base + uniform[0, span)`; age is floored.
#[derive(Debug, Clone, Copy)]
pub struct ClusterBlock {
    pub cluster: i32,
    pub count: u32,
    pub age: (f64, f64),
    pub income: (f64, f64),
    pub spending: (f64, f64),
}

/// The five behavioral segments of the mall dataset, in generation order.
pub const MALL_BLOCKS: [ClusterBlock; 5] = [
    // Careful spenders
    ClusterBlock {
        cluster: 0,
        count: 39,
        age: (35.0, 15.0),
        income: (40.0, 30.0),
        spending: (35.0, 30.0),
    },
    // Splurge shoppers
    ClusterBlock {
        cluster: 1,
        count: 22,
        age: (20.0, 10.0),
        income: (15.0, 20.0),
        spending: (65.0, 30.0),
    },
    // Conservative rich
    ClusterBlock {
        cluster: 2,
        count: 35,
        age: (35.0, 15.0),
        income: (70.0, 35.0),
        spending: (5.0, 25.0),
    },
    // Premium
    ClusterBlock {
        cluster: 3,
        count: 23,
        age: (25.0, 15.0),
        income: (70.0, 35.0),
        spending: (65.0, 30.0),
    },
    // Standard
    ClusterBlock {
        cluster: 4,
        count: 81,
        age: (40.0, 15.0),
        income: (15.0, 20.0),
        spending: (10.0, 25.0),
    },
];

/// Generate the mock mall dataset deterministically from `seed`.
///
/// Ids and customer ids both run from 1 in generation order.
pub fn generate_customers(seed: u64) -> Vec<Customer> {
    generate_blocks(&MALL_BLOCKS, seed)
}

pub(crate) fn generate_blocks(blocks: &[ClusterBlock], seed: u64) -> Vec<Customer> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let total: u32 = blocks.iter().map(|b| b.count).sum();
    let mut out = Vec::with_capacity(total as usize);
    let mut next_id = 1u32;

    for block in blocks {
        for _ in 0..block.count {
            let gender = if rng.gen::<f64>() > 0.5 {
                Gender::Male
            } else {
                Gender::Female
            };
            let age = (block.age.0 + rng.gen::<f64>() * block.age.1).floor() as u32;
            let annual_income = block.income.0 + rng.gen::<f64>() * block.income.1;
            let spending_score = block.spending.0 + rng.gen::<f64>() * block.spending.1;

            out.push(Customer {
                id: next_id,
                customer_id: next_id,
                gender,
                age,
                annual_income,
                spending_score,
                cluster: Some(block.cluster),
            });
            next_id += 1;
        }
    }

    out
}
