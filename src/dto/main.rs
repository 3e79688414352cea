use serde::Serialize;

use crate::domain::activity::Activity;
use crate::domain::cost_change::CostChange;
use crate::domain::project::Project;
use crate::domain::user::User;
use crate::pagination::Paginated;

/// Data required to render the project list.
pub struct IndexPageData {
    /// Projects visible to the signed-in user.
    pub projects: Vec<Project>,
    /// Currently selected project id, if any.
    pub selected: Option<i32>,
}

/// Data required to render a project's dashboard.
pub struct DashboardPageData {
    pub project: Project,
    /// Recent activity with the acting user, newest first.
    pub activity: Paginated<(Activity, User)>,
    pub total_activity: usize,
}

/// A cost change decorated with its display difference.
#[derive(Debug, Serialize)]
pub struct CostChangeDisplay {
    #[serde(flatten)]
    pub change: CostChange,
    pub difference: i64,
    pub is_increase: bool,
}

impl From<CostChange> for CostChangeDisplay {
    fn from(change: CostChange) -> Self {
        let difference = change.difference();
        let is_increase = change.is_increase();
        Self {
            change,
            difference,
            is_increase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ApprovalStatus;
    use chrono::Utc;

    #[test]
    fn display_flags_increases() {
        let change = CostChange {
            id: 1,
            project_id: 1,
            title: "Upgraded windows".into(),
            original_cost: 500_000,
            new_cost: 575_000,
            status: ApprovalStatus::Pending,
            estimated_days: 5,
            created_at: Utc::now().naive_utc(),
        };
        let display = CostChangeDisplay::from(change);
        assert_eq!(display.difference, 75_000);
        assert!(display.is_increase);
    }
}
