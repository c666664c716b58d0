use crate::customer::Customer;

/// Mean position of a group in (age, income, spending) space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Centroid {
    pub age: f64,
    pub income: f64,
    pub spending: f64,
}

/// Returns `None` for an empty group.
pub fn compute_centroid(members: &[&Customer]) -> Option<Centroid> {
    if members.is_empty() {
        return None;
    }

    let mut out = Centroid::default();
    for c in members {
        out.age += c.age as f64;
        out.income += c.annual_income;
        out.spending += c.spending_score;
    }

    let n = members.len() as f64;
    out.age /= n;
    out.income /= n;
    out.spending /= n;

    Some(out)
}
