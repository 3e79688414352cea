use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::ApprovalStatus;

/// A variation to the contracted cost, in minor units.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CostChange {
    pub id: i32,
    pub project_id: i32,
    pub title: String,
    pub original_cost: i64,
    pub new_cost: i64,
    pub status: ApprovalStatus,
    pub estimated_days: i32,
    pub created_at: NaiveDateTime,
}

impl CostChange {
    /// Signed difference introduced by this change.
    pub fn difference(&self) -> i64 {
        self.new_cost - self.original_cost
    }

    /// Whether the change increases the contracted cost.
    pub fn is_increase(&self) -> bool {
        self.difference() > 0
    }
}

#[derive(Clone, Debug)]
pub struct NewCostChange {
    pub project_id: i32,
    pub title: String,
    pub original_cost: i64,
    pub new_cost: i64,
    pub estimated_days: i32,
}

impl NewCostChange {
    #[must_use]
    pub fn new(
        project_id: i32,
        title: String,
        original_cost: i64,
        new_cost: i64,
        estimated_days: i32,
    ) -> Self {
        Self {
            project_id,
            title: title.trim().to_string(),
            original_cost,
            new_cost,
            estimated_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn change(original: i64, new: i64) -> CostChange {
        CostChange {
            id: 1,
            project_id: 1,
            title: "Extra footings".into(),
            original_cost: original,
            new_cost: new,
            status: ApprovalStatus::Pending,
            estimated_days: 3,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn difference_is_new_minus_original() {
        assert_eq!(change(10_000, 12_500).difference(), 2_500);
        assert_eq!(change(12_500, 10_000).difference(), -2_500);
        assert_eq!(change(10_000, 10_000).difference(), 0);
    }

    #[test]
    fn only_positive_differences_are_increases() {
        assert!(change(10_000, 12_500).is_increase());
        assert!(!change(12_500, 10_000).is_increase());
        assert!(!change(10_000, 10_000).is_increase());
    }
}
