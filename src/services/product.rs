use serde_json::json;

use crate::auth::AuthenticatedUser;
use crate::domain::activity::{ActivityAction, ActivityEntity, NewActivity};
use crate::domain::product::Product;
use crate::domain::types::ApprovalStatus;
use crate::repository::{ActivityWriter, ProductReader, ProductWriter};
use crate::services::activity::record_activity;
use crate::services::{ServiceError, ServiceResult};

/// Approves or rejects a proposed product. Builders and admins only.
pub fn review_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    status: ApprovalStatus,
) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter + ActivityWriter + ?Sized,
{
    if !user.role.can_approve() {
        return Err(ServiceError::Unauthorized);
    }

    let product = repo
        .get_product_by_id(product_id)?
        .ok_or(ServiceError::NotFound)?;

    let updated = repo.set_product_status(product.id, status)?;

    record_activity(
        repo,
        NewActivity::new(
            updated.project_id,
            user.sub,
            ActivityEntity::Product,
            ActivityAction::StatusChanged,
            json!({
                "name": &updated.name,
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
    use chrono::Utc;

    fn claims(role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: 5,
            email: "u@example.com".into(),
            name: "User".into(),
            role,
            exp: usize::MAX,
        }
    }

    fn product(status: ApprovalStatus) -> Product {
        let now = Utc::now().naive_utc();
        Product {
            id: 8,
            project_id: 2,
            name: "Oak flooring".into(),
            category: "Finishes".into(),
            price: 125_000,
            status,
            image_url: None,
            created_by: 5,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn clients_cannot_review() {
        let repo = MockRepository::new();
        assert!(matches!(
            review_product(&repo, &claims(UserRole::Client), 8, ApprovalStatus::Approved),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn builders_can_approve() {
        let mut repo = MockRepository::new();
        repo.expect_get_product_by_id()
            .returning(|_| Ok(Some(product(ApprovalStatus::Pending))));
        repo.expect_set_product_status()
            .withf(|id, status| *id == 8 && *status == ApprovalStatus::Approved)
            .returning(|_, status| Ok(product(status)));
        repo.expect_create_activity()
            .returning(|_| Err(crate::repository::errors::RepositoryError::NotFound));

        let updated =
            review_product(&repo, &claims(UserRole::Builder), 8, ApprovalStatus::Approved)
                .unwrap();
        assert_eq!(updated.status, ApprovalStatus::Approved);
    }

    #[test]
    fn reviewing_a_missing_product_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_product_by_id().returning(|_| Ok(None));

        assert!(matches!(
            review_product(&repo, &claims(UserRole::Admin), 8, ApprovalStatus::Rejected),
            Err(ServiceError::NotFound)
        ));
    }
}
