use serde_json::json;

use crate::auth::AuthenticatedUser;
use crate::domain::activity::{ActivityAction, ActivityEntity, NewActivity};
use crate::domain::milestone::{Milestone, MilestoneStatus};
use crate::domain::types::CompletionPercent;
use crate::repository::{ActivityWriter, MilestoneReader, MilestoneWriter};
use crate::services::activity::record_activity;
use crate::services::{ServiceError, ServiceResult};

/// Applies a progress report to a milestone, deriving the new status from the
/// percentage and the previous status.
pub fn update_progress<R>(
    repo: &R,
    user: &AuthenticatedUser,
    milestone_id: i32,
    percentage: i32,
) -> ServiceResult<Milestone>
where
    R: MilestoneReader + MilestoneWriter + ActivityWriter + ?Sized,
{
    let percentage = CompletionPercent::new(percentage)?;

    let milestone = repo
        .get_milestone_by_id(milestone_id)?
        .ok_or(ServiceError::NotFound)?;

    let status = MilestoneStatus::derive(milestone.status, percentage);
    let updated = repo.set_milestone_progress(milestone_id, percentage, status)?;

    record_activity(
        repo,
        NewActivity::new(
            updated.project_id,
            user.sub,
            ActivityEntity::Milestone,
            ActivityAction::StatusChanged,
            json!({
                "title": &updated.title,
                "completion_percentage": updated.completion_percentage,
                "status": updated.status.to_string(),
            }),
        ),
    );

    Ok(updated)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::user::UserRole;
    use crate::repository::mock::MockRepository;
    use chrono::{NaiveDate, Utc};
    use mockall::predicate::eq;

    fn claims() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: 5,
            email: "b@example.com".into(),
            name: "Builder".into(),
            role: UserRole::Builder,
            exp: usize::MAX,
        }
    }

    fn milestone(status: MilestoneStatus, percentage: i32) -> Milestone {
        let now = Utc::now().naive_utc();
        Milestone {
            id: 9,
            project_id: 3,
            title: "Lockup".into(),
            due_date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            status,
            completion_percentage: percentage,
            sort_order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn delayed_milestone_stays_delayed_below_full() {
        let mut repo = MockRepository::new();
        repo.expect_get_milestone_by_id()
            .with(eq(9))
            .returning(|_| Ok(Some(milestone(MilestoneStatus::Delayed, 10))));
        repo.expect_set_milestone_progress()
            .withf(|id, pct, status| {
                *id == 9 && pct.get() == 60 && *status == MilestoneStatus::Delayed
            })
            .returning(|id, pct, status| {
                let mut m = milestone(status, pct.get());
                m.id = id;
                Ok(m)
            });
        repo.expect_create_activity()
            .returning(|_| Err(crate::repository::errors::RepositoryError::NotFound));

        let updated = update_progress(&repo, &claims(), 9, 60).unwrap();
        assert_eq!(updated.status, MilestoneStatus::Delayed);
    }

    #[test]
    fn full_completion_completes() {
        let mut repo = MockRepository::new();
        repo.expect_get_milestone_by_id()
            .returning(|_| Ok(Some(milestone(MilestoneStatus::Delayed, 80))));
        repo.expect_set_milestone_progress()
            .withf(|_, pct, status| pct.get() == 100 && *status == MilestoneStatus::Completed)
            .returning(|id, pct, status| {
                let mut m = milestone(status, pct.get());
                m.id = id;
                Ok(m)
            });
        repo.expect_create_activity()
            .returning(|a| {
                Ok(crate::domain::activity::Activity {
                    id: 1,
                    project_id: a.project_id,
                    user_id: a.user_id,
                    entity: a.entity.clone(),
                    action: a.action.clone(),
                    details: a.details.clone(),
                    created_at: Utc::now().naive_utc(),
                })
            });

        let updated = update_progress(&repo, &claims(), 9, 100).unwrap();
        assert_eq!(updated.status, MilestoneStatus::Completed);
    }

    #[test]
    fn out_of_range_percentage_is_rejected() {
        let repo = MockRepository::new();
        assert!(update_progress(&repo, &claims(), 9, 150).is_err());
    }
}
