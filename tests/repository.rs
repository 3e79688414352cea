use chrono::{NaiveDate, Utc};
use serde_json::json;

use buildsync::domain::activity::{ActivityAction, ActivityEntity, NewActivity};
use buildsync::domain::chat::NewChatMessage;
use buildsync::domain::cost_change::NewCostChange;
use buildsync::domain::decision::{NewDecision, UpdateDecision};
use buildsync::domain::milestone::{MilestoneStatus, NewMilestone, UpdateMilestone};
use buildsync::domain::product::{NewProduct, UpdateProduct};
use buildsync::domain::project::{NewProject, UpdateProject};
use buildsync::domain::remedial_item::{NewRemedialItem, Priority, RemedialStatus};
use buildsync::domain::schedule_item::{NewScheduleItem, ScheduleStatus, UpdateScheduleItem};
use buildsync::domain::types::{ApprovalStatus, CompletionPercent};
use buildsync::domain::user::{NewUser, User, UserRole};
use buildsync::repository::{
    ActivityListQuery, ActivityReader, ActivityWriter, ChatListQuery, ChatReader, ChatWriter,
    CostChangeReader, CostChangeWriter, DecisionReader, DecisionWriter, DieselRepository,
    DrawingReader, DrawingWriter, MilestoneReader, MilestoneWriter, ProductListQuery,
    ProductReader, ProductWriter, ProjectReader, ProjectWriter, RemedialReader, RemedialWriter,
    ScheduleReader, ScheduleWriter, UserReader, UserWriter,
};

mod common;

fn setup(name: &str) -> (common::TestDb, DieselRepository) {
    let test_db = common::TestDb::new(name);
    let repo = DieselRepository::new(test_db.pool().clone());
    (test_db, repo)
}

fn seed_user(repo: &DieselRepository, email: &str, role: UserRole) -> User {
    repo.create_user(&NewUser::new(
        "Test User".into(),
        email.into(),
        "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".into(),
        role,
    ))
    .unwrap()
}

fn seed_project(repo: &DieselRepository, member: &User) -> i32 {
    let project = repo
        .create_project(&NewProject::new(
            "Maple St build".into(),
            "12 Maple St".into(),
            Some("Two storey extension".into()),
        ))
        .unwrap();
    repo.add_project_member(project.id, member.id).unwrap();
    project.id
}

#[test]
fn test_user_repository_crud() {
    let (_db, repo) = setup("test_user_repository_crud.db");

    let user = seed_user(&repo, "alice@example.com", UserRole::Builder);
    assert_eq!(user.role, UserRole::Builder);
    assert!(!user.email_verified);

    // Emails are unique.
    assert!(
        repo.create_user(&NewUser::new(
            "Other".into(),
            "alice@example.com".into(),
            "hash".into(),
            UserRole::Client,
        ))
        .is_err()
    );

    let fetched = repo.get_user_by_email("alice@example.com").unwrap().unwrap();
    assert_eq!(fetched.id, user.id);
    assert!(repo.get_user_by_email("nobody@example.com").unwrap().is_none());

    repo.set_user_password(user.id, "$argon2id$new").unwrap();
    repo.mark_email_verified(user.id).unwrap();
    let updated = repo.get_user_by_id(user.id).unwrap().unwrap();
    assert_eq!(updated.password_hash, "$argon2id$new");
    assert!(updated.email_verified);
}

#[test]
fn test_project_repository_membership() {
    let (_db, repo) = setup("test_project_repository_membership.db");

    let member = seed_user(&repo, "member@example.com", UserRole::Client);
    let outsider = seed_user(&repo, "outsider@example.com", UserRole::Client);
    let project_id = seed_project(&repo, &member);

    assert!(repo.is_project_member(project_id, member.id).unwrap());
    assert!(!repo.is_project_member(project_id, outsider.id).unwrap());

    assert_eq!(repo.list_projects_for_user(member.id).unwrap().len(), 1);
    assert!(repo.list_projects_for_user(outsider.id).unwrap().is_empty());
    assert_eq!(repo.list_all_projects().unwrap().len(), 1);

    // Adding the same member twice is a no-op.
    assert_eq!(repo.add_project_member(project_id, member.id).unwrap(), 0);

    let updated = repo
        .update_project(
            project_id,
            &UpdateProject {
                name: "Maple St stage 2".into(),
                address: "12 Maple St".into(),
                description: None,
            },
        )
        .unwrap();
    assert_eq!(updated.name, "Maple St stage 2");
    assert_eq!(updated.description, None);
}

#[test]
fn test_product_repository_crud() {
    let (_db, repo) = setup("test_product_repository_crud.db");

    let user = seed_user(&repo, "builder@example.com", UserRole::Builder);
    let project_id = seed_project(&repo, &user);
    let other_project_id = seed_project(&repo, &user);

    let oak = repo
        .create_product(&NewProduct::new(
            project_id,
            "Oak flooring".into(),
            "Finishes".into(),
            125_000,
            Some("/uploads/oak.jpg".into()),
            user.id,
        ))
        .unwrap();
    assert_eq!(oak.status, ApprovalStatus::Pending);

    repo.create_product(&NewProduct::new(
        project_id,
        "Cement".into(),
        "Structure".into(),
        8_500,
        None,
        user.id,
    ))
    .unwrap();
    repo.create_product(&NewProduct::new(
        other_project_id,
        "Paint".into(),
        "Finishes".into(),
        4_000,
        None,
        user.id,
    ))
    .unwrap();

    // Lists are scoped by project, newest first.
    let (total, items) = repo
        .list_products(ProductListQuery::new(project_id))
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(items[0].name, "Cement");
    assert_eq!(items[1].name, "Oak flooring");

    let (search_total, search_items) = repo
        .list_products(ProductListQuery::new(project_id).search("oak"))
        .unwrap();
    assert_eq!(search_total, 1);
    assert_eq!(search_items[0].name, "Oak flooring");

    let approved = repo
        .set_product_status(oak.id, ApprovalStatus::Approved)
        .unwrap();
    assert_eq!(approved.status, ApprovalStatus::Approved);

    let (approved_total, _) = repo
        .list_products(ProductListQuery::new(project_id).status(ApprovalStatus::Approved))
        .unwrap();
    assert_eq!(approved_total, 1);

    let updated = repo
        .update_product(
            oak.id,
            &UpdateProduct {
                name: "Oak flooring (wide board)".into(),
                category: "Finishes".into(),
                price: 139_000,
                image_url: oak.image_url.clone(),
            },
        )
        .unwrap();
    assert_eq!(updated.price, 139_000);
    assert_eq!(updated.image_url.as_deref(), Some("/uploads/oak.jpg"));

    repo.delete_product(oak.id).unwrap();
    assert!(repo.get_product_by_id(oak.id).unwrap().is_none());
    let (total_after, _) = repo
        .list_products(ProductListQuery::new(project_id))
        .unwrap();
    assert_eq!(total_after, 1);
}

#[test]
fn test_milestone_repository_crud_and_reorder() {
    let (_db, repo) = setup("test_milestone_repository_crud.db");

    let user = seed_user(&repo, "builder@example.com", UserRole::Builder);
    let project_id = seed_project(&repo, &user);

    let due = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
    let slab = repo
        .create_milestone(&NewMilestone::new(project_id, "Slab poured".into(), due, 0))
        .unwrap();
    let frame = repo
        .create_milestone(&NewMilestone::new(project_id, "Frame up".into(), due, 1))
        .unwrap();
    assert_eq!(slab.status, MilestoneStatus::Upcoming);
    assert_eq!(slab.completion_percentage, 0);

    let listed = repo.list_milestones(project_id).unwrap();
    assert_eq!(listed[0].title, "Slab poured");
    assert_eq!(listed[1].title, "Frame up");

    // Reorder flips the sort order.
    assert_eq!(
        repo.reorder_milestones(project_id, &[frame.id, slab.id])
            .unwrap(),
        2
    );
    let reordered = repo.list_milestones(project_id).unwrap();
    assert_eq!(reordered[0].title, "Frame up");
    assert_eq!(reordered[1].title, "Slab poured");

    let progressed = repo
        .set_milestone_progress(
            slab.id,
            CompletionPercent::new(40).unwrap(),
            MilestoneStatus::InProgress,
        )
        .unwrap();
    assert_eq!(progressed.completion_percentage, 40);
    assert_eq!(progressed.status, MilestoneStatus::InProgress);

    let renamed = repo
        .update_milestone(
            slab.id,
            &UpdateMilestone {
                title: "Slab poured and cured".into(),
                due_date: due,
            },
        )
        .unwrap();
    assert_eq!(renamed.title, "Slab poured and cured");

    repo.delete_milestone(frame.id).unwrap();
    assert!(repo.get_milestone_by_id(frame.id).unwrap().is_none());
}

#[test]
fn test_decision_repository_crud() {
    let (_db, repo) = setup("test_decision_repository_crud.db");

    let user = seed_user(&repo, "client@example.com", UserRole::Client);
    let project_id = seed_project(&repo, &user);

    let decision = repo
        .create_decision(&NewDecision::new(
            project_id,
            "Bench top material".into(),
            "Kitchen".into(),
            NaiveDate::from_ymd_opt(2026, 8, 20),
        ))
        .unwrap();
    assert_eq!(decision.status, ApprovalStatus::Pending);

    let updated = repo
        .update_decision(
            decision.id,
            &UpdateDecision {
                title: "Bench top material".into(),
                category: "Kitchen fitout".into(),
                due_date: None,
            },
        )
        .unwrap();
    assert_eq!(updated.category, "Kitchen fitout");
    assert_eq!(updated.due_date, None);

    let approved = repo
        .set_decision_status(decision.id, ApprovalStatus::Approved)
        .unwrap();
    assert_eq!(approved.status, ApprovalStatus::Approved);

    repo.delete_decision(decision.id).unwrap();
    assert!(repo.list_decisions(project_id).unwrap().is_empty());
}

#[test]
fn test_cost_change_repository_crud() {
    let (_db, repo) = setup("test_cost_change_repository_crud.db");

    let user = seed_user(&repo, "builder@example.com", UserRole::Builder);
    let project_id = seed_project(&repo, &user);

    let change = repo
        .create_cost_change(&NewCostChange::new(
            project_id,
            "Rock excavation".into(),
            500_000,
            575_000,
            4,
        ))
        .unwrap();
    assert_eq!(change.status, ApprovalStatus::Pending);
    assert_eq!(change.difference(), 75_000);
    assert!(change.is_increase());

    let rejected = repo
        .set_cost_change_status(change.id, ApprovalStatus::Rejected)
        .unwrap();
    assert_eq!(rejected.status, ApprovalStatus::Rejected);

    assert_eq!(repo.list_cost_changes(project_id).unwrap().len(), 1);
    repo.delete_cost_change(change.id).unwrap();
    assert!(repo.get_cost_change_by_id(change.id).unwrap().is_none());
}

#[test]
fn test_schedule_repository_crud() {
    let (_db, repo) = setup("test_schedule_repository_crud.db");

    let user = seed_user(&repo, "builder@example.com", UserRole::Builder);
    let project_id = seed_project(&repo, &user);

    let september = |day| NaiveDate::from_ymd_opt(2026, 9, day).unwrap();
    let roofing = repo
        .create_schedule_item(&NewScheduleItem::new(
            project_id,
            "Roofing".into(),
            september(10),
            september(14),
            Some("Roof".into()),
        ))
        .unwrap();
    repo.create_schedule_item(&NewScheduleItem::new(
        project_id,
        "Framing".into(),
        september(1),
        september(9),
        None,
    ))
    .unwrap();

    // Ordered by start date.
    let items = repo.list_schedule_items(project_id).unwrap();
    assert_eq!(items[0].title, "Framing");
    assert_eq!(items[1].title, "Roofing");
    assert_eq!(items[0].status, ScheduleStatus::Scheduled);

    let moved = repo
        .update_schedule_item(
            roofing.id,
            &UpdateScheduleItem {
                title: "Roofing".into(),
                start_date: september(12),
                end_date: september(16),
                location: None,
            },
        )
        .unwrap();
    assert_eq!(moved.start_date, september(12));
    assert_eq!(moved.location, None);

    let started = repo
        .set_schedule_item_status(roofing.id, ScheduleStatus::InProgress)
        .unwrap();
    assert_eq!(started.status, ScheduleStatus::InProgress);

    repo.delete_schedule_item(roofing.id).unwrap();
    assert_eq!(repo.list_schedule_items(project_id).unwrap().len(), 1);
}

#[test]
fn test_remedial_repository_resolution_stamp() {
    let (_db, repo) = setup("test_remedial_repository_crud.db");

    let user = seed_user(&repo, "builder@example.com", UserRole::Builder);
    let project_id = seed_project(&repo, &user);

    let item = repo
        .create_remedial_item(&NewRemedialItem::new(
            project_id,
            "Cracked tile in bathroom".into(),
            Priority::High,
        ))
        .unwrap();
    assert_eq!(item.status, RemedialStatus::Open);
    assert!(item.resolved_at.is_none());

    let stamp = Utc::now().naive_utc();
    let resolved = repo
        .set_remedial_item_status(item.id, RemedialStatus::Resolved, Some(stamp))
        .unwrap();
    assert_eq!(resolved.status, RemedialStatus::Resolved);
    assert_eq!(resolved.resolved_at, Some(stamp));

    let reopened = repo
        .set_remedial_item_status(item.id, RemedialStatus::InProgress, None)
        .unwrap();
    assert!(reopened.resolved_at.is_none());

    repo.delete_remedial_item(item.id).unwrap();
    assert!(repo.list_remedial_items(project_id).unwrap().is_empty());
}

#[test]
fn test_drawing_repository_crud() {
    let (_db, repo) = setup("test_drawing_repository_crud.db");

    let user = seed_user(&repo, "builder@example.com", UserRole::Builder);
    let project_id = seed_project(&repo, &user);

    let drawing = repo
        .create_drawing(&buildsync::domain::drawing::NewDrawing::new(
            project_id,
            "Ground floor plan".into(),
            "/uploads/abc123.pdf".into(),
            "ground-floor-rev3.pdf".into(),
            user.id,
        ))
        .unwrap();
    assert_eq!(drawing.file_name, "ground-floor-rev3.pdf");

    let drawings = repo.list_drawings(project_id).unwrap();
    assert_eq!(drawings.len(), 1);
    assert_eq!(drawings[0].file_url, "/uploads/abc123.pdf");

    repo.delete_drawing(drawing.id).unwrap();
    assert!(repo.get_drawing_by_id(drawing.id).unwrap().is_none());
}

#[test]
fn test_chat_repository_join_and_pagination() {
    let (_db, repo) = setup("test_chat_repository_crud.db");

    let user = seed_user(&repo, "client@example.com", UserRole::Client);
    let project_id = seed_project(&repo, &user);

    let message = NewChatMessage::new(
        project_id,
        user.id,
        "Slab looks great".into(),
        vec!["/uploads/slab.jpg".into()],
    )
    .unwrap();
    let created = repo.create_chat_message(&message).unwrap();
    assert_eq!(created.photo_urls, vec!["/uploads/slab.jpg".to_string()]);

    for n in 0..25 {
        let message =
            NewChatMessage::new(project_id, user.id, format!("update #{n}"), vec![]).unwrap();
        repo.create_chat_message(&message).unwrap();
    }

    let (total, page) = repo
        .list_chat_messages(ChatListQuery::new(project_id).paginate(1, 20))
        .unwrap();
    assert_eq!(total, 26);
    assert_eq!(page.len(), 20);
    // Joined with the author.
    assert_eq!(page[0].1.id, user.id);
    // Newest first.
    assert_eq!(page[0].0.content, "update #24");
}

#[test]
fn test_activity_repository_filter() {
    let (_db, repo) = setup("test_activity_repository_crud.db");

    let user = seed_user(&repo, "builder@example.com", UserRole::Builder);
    let project_id = seed_project(&repo, &user);

    repo.create_activity(&NewActivity::new(
        project_id,
        user.id,
        ActivityEntity::Product,
        ActivityAction::Created,
        json!({ "name": "Oak flooring" }),
    ))
    .unwrap();
    repo.create_activity(&NewActivity::new(
        project_id,
        user.id,
        ActivityEntity::Milestone,
        ActivityAction::StatusChanged,
        json!({ "title": "Slab poured", "status": "completed" }),
    ))
    .unwrap();

    let (total, entries) = repo
        .list_activities(ActivityListQuery::new(project_id))
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(entries[0].1.id, user.id);

    let (product_total, product_entries) = repo
        .list_activities(ActivityListQuery::new(project_id).entity(ActivityEntity::Product))
        .unwrap();
    assert_eq!(product_total, 1);
    assert_eq!(product_entries[0].0.entity, ActivityEntity::Product);
    assert_eq!(
        product_entries[0].0.details,
        json!({ "name": "Oak flooring" })
    );
}
