use chrono::Utc;
use serde_json::json;

use crate::auth::AuthenticatedUser;
use crate::domain::activity::{ActivityAction, ActivityEntity, NewActivity};
use crate::domain::remedial_item::{RemedialItem, RemedialStatus};
use crate::repository::{ActivityWriter, RemedialReader, RemedialWriter};
use crate::services::activity::record_activity;
use crate::services::{ServiceError, ServiceResult};

/// Moves a remedial item through its lifecycle, maintaining the `resolved_at`
/// stamp: set on the first transition into resolved/closed, kept on later
/// resolving transitions, cleared when the item is reopened.
pub fn set_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    item_id: i32,
    status: RemedialStatus,
) -> ServiceResult<RemedialItem>
where
    R: RemedialReader + RemedialWriter + ActivityWriter + ?Sized,
{
    let item = repo
        .get_remedial_item_by_id(item_id)?
        .ok_or(ServiceError::NotFound)?;

    let resolved_at = if status.resolves() {
        item.resolved_at.or_else(|| Some(Utc::now().naive_utc()))
    } else {
        None
    };

    let updated = repo.set_remedial_item_status(item_id, status, resolved_at)?;

    record_activity(
        repo,
        NewActivity::new(
            updated.project_id,
            user.sub,
            ActivityEntity::RemedialItem,
            ActivityAction::StatusChanged,
            json!({
                "title": &updated.title,
                "status": updated.status.to_string(),
            }),
        ),
    );

    Ok(updated)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::remedial_item::Priority;
    use crate::domain::user::UserRole;
    use crate::repository::mock::MockRepository;
    use chrono::NaiveDateTime;

    fn claims() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: 5,
            email: "b@example.com".into(),
            name: "Builder".into(),
            role: UserRole::Builder,
            exp: usize::MAX,
        }
    }

    fn item(status: RemedialStatus, resolved_at: Option<NaiveDateTime>) -> RemedialItem {
        let now = Utc::now().naive_utc();
        RemedialItem {
            id: 4,
            project_id: 2,
            title: "Cracked tile".into(),
            status,
            priority: Priority::Medium,
            resolved_at,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn resolving_sets_the_stamp() {
        let mut repo = MockRepository::new();
        repo.expect_get_remedial_item_by_id()
            .returning(|_| Ok(Some(item(RemedialStatus::Open, None))));
        repo.expect_set_remedial_item_status()
            .withf(|_, status, resolved_at| {
                *status == RemedialStatus::Resolved && resolved_at.is_some()
            })
            .returning(|id, status, resolved_at| {
                let mut updated = item(status, resolved_at);
                updated.id = id;
                Ok(updated)
            });
        repo.expect_create_activity()
            .returning(|_| Err(crate::repository::errors::RepositoryError::NotFound));

        let updated = set_status(&repo, &claims(), 4, RemedialStatus::Resolved).unwrap();
        assert!(updated.resolved_at.is_some());
    }

    #[test]
    fn reopening_clears_the_stamp() {
        let stamp = Utc::now().naive_utc();
        let mut repo = MockRepository::new();
        repo.expect_get_remedial_item_by_id()
            .returning(move |_| Ok(Some(item(RemedialStatus::Resolved, Some(stamp)))));
        repo.expect_set_remedial_item_status()
            .withf(|_, status, resolved_at| {
                *status == RemedialStatus::InProgress && resolved_at.is_none()
            })
            .returning(|id, status, resolved_at| {
                let mut updated = item(status, resolved_at);
                updated.id = id;
                Ok(updated)
            });
        repo.expect_create_activity()
            .returning(|_| Err(crate::repository::errors::RepositoryError::NotFound));

        let updated = set_status(&repo, &claims(), 4, RemedialStatus::InProgress).unwrap();
        assert!(updated.resolved_at.is_none());
    }

    #[test]
    fn closing_a_resolved_item_keeps_the_original_stamp() {
        let stamp = Utc::now().naive_utc();
        let mut repo = MockRepository::new();
        repo.expect_get_remedial_item_by_id()
            .returning(move |_| Ok(Some(item(RemedialStatus::Resolved, Some(stamp)))));
        repo.expect_set_remedial_item_status()
            .withf(move |_, status, resolved_at| {
                *status == RemedialStatus::Closed && *resolved_at == Some(stamp)
            })
            .returning(|id, status, resolved_at| {
                let mut updated = item(status, resolved_at);
                updated.id = id;
                Ok(updated)
            });
        repo.expect_create_activity()
            .returning(|_| Err(crate::repository::errors::RepositoryError::NotFound));

        let updated = set_status(&repo, &claims(), 4, RemedialStatus::Closed).unwrap();
        assert_eq!(updated.resolved_at, Some(stamp));
    }
}
