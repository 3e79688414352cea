//! Mock repository implementations for isolating services in tests.

use chrono::NaiveDateTime;
use mockall::mock;

use crate::domain::activity::{Activity, NewActivity};
use crate::domain::chat::{ChatMessage, NewChatMessage};
use crate::domain::cost_change::{CostChange, NewCostChange};
use crate::domain::decision::{Decision, NewDecision, UpdateDecision};
use crate::domain::drawing::{Drawing, NewDrawing};
use crate::domain::milestone::{Milestone, MilestoneStatus, NewMilestone, UpdateMilestone};
use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::project::{NewProject, Project, UpdateProject};
use crate::domain::remedial_item::{NewRemedialItem, RemedialItem, RemedialStatus};
use crate::domain::schedule_item::{
    NewScheduleItem, ScheduleItem, ScheduleStatus, UpdateScheduleItem,
};
use crate::domain::types::{ApprovalStatus, CompletionPercent};
use crate::domain::user::{NewUser, User};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ActivityListQuery, ActivityReader, ActivityWriter, ChatListQuery, ChatReader, ChatWriter,
    CostChangeReader, CostChangeWriter, DecisionReader, DecisionWriter, DrawingReader,
    DrawingWriter, MilestoneReader, MilestoneWriter, ProductListQuery, ProductReader,
    ProductWriter, ProjectReader, ProjectWriter, RemedialReader, RemedialWriter, ScheduleReader,
    ScheduleWriter, UserReader, UserWriter,
};

mock! {
    pub Repository {}

    impl UserReader for Repository {
        fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
        fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    }

    impl UserWriter for Repository {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn set_user_password(&self, user_id: i32, password_hash: &str) -> RepositoryResult<()>;
        fn mark_email_verified(&self, user_id: i32) -> RepositoryResult<()>;
    }

    impl ProjectReader for Repository {
        fn get_project_by_id(&self, id: i32) -> RepositoryResult<Option<Project>>;
        fn list_all_projects(&self) -> RepositoryResult<Vec<Project>>;
        fn list_projects_for_user(&self, user_id: i32) -> RepositoryResult<Vec<Project>>;
        fn is_project_member(&self, project_id: i32, user_id: i32) -> RepositoryResult<bool>;
    }

    impl ProjectWriter for Repository {
        fn create_project(&self, new_project: &NewProject) -> RepositoryResult<Project>;
        fn update_project(
            &self,
            project_id: i32,
            updates: &UpdateProject,
        ) -> RepositoryResult<Project>;
        fn add_project_member(&self, project_id: i32, user_id: i32) -> RepositoryResult<usize>;
    }

    impl ProductReader for Repository {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }

    impl ProductWriter for Repository {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(
            &self,
            product_id: i32,
            updates: &UpdateProduct,
        ) -> RepositoryResult<Product>;
        fn set_product_status(
            &self,
            product_id: i32,
            status: ApprovalStatus,
        ) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
    }

    impl MilestoneReader for Repository {
        fn get_milestone_by_id(&self, id: i32) -> RepositoryResult<Option<Milestone>>;
        fn list_milestones(&self, project_id: i32) -> RepositoryResult<Vec<Milestone>>;
    }

    impl MilestoneWriter for Repository {
        fn create_milestone(&self, new_milestone: &NewMilestone) -> RepositoryResult<Milestone>;
        fn update_milestone(
            &self,
            milestone_id: i32,
            updates: &UpdateMilestone,
        ) -> RepositoryResult<Milestone>;
        fn set_milestone_progress(
            &self,
            milestone_id: i32,
            percentage: CompletionPercent,
            status: MilestoneStatus,
        ) -> RepositoryResult<Milestone>;
        fn reorder_milestones(
            &self,
            project_id: i32,
            ordered_ids: &[i32],
        ) -> RepositoryResult<usize>;
        fn delete_milestone(&self, milestone_id: i32) -> RepositoryResult<()>;
    }

    impl DecisionReader for Repository {
        fn get_decision_by_id(&self, id: i32) -> RepositoryResult<Option<Decision>>;
        fn list_decisions(&self, project_id: i32) -> RepositoryResult<Vec<Decision>>;
    }

    impl DecisionWriter for Repository {
        fn create_decision(&self, new_decision: &NewDecision) -> RepositoryResult<Decision>;
        fn update_decision(
            &self,
            decision_id: i32,
            updates: &UpdateDecision,
        ) -> RepositoryResult<Decision>;
        fn set_decision_status(
            &self,
            decision_id: i32,
            status: ApprovalStatus,
        ) -> RepositoryResult<Decision>;
        fn delete_decision(&self, decision_id: i32) -> RepositoryResult<()>;
    }

    impl CostChangeReader for Repository {
        fn get_cost_change_by_id(&self, id: i32) -> RepositoryResult<Option<CostChange>>;
        fn list_cost_changes(&self, project_id: i32) -> RepositoryResult<Vec<CostChange>>;
    }

    impl CostChangeWriter for Repository {
        fn create_cost_change(&self, new_change: &NewCostChange) -> RepositoryResult<CostChange>;
        fn set_cost_change_status(
            &self,
            cost_change_id: i32,
            status: ApprovalStatus,
        ) -> RepositoryResult<CostChange>;
        fn delete_cost_change(&self, cost_change_id: i32) -> RepositoryResult<()>;
    }

    impl ScheduleReader for Repository {
        fn get_schedule_item_by_id(&self, id: i32) -> RepositoryResult<Option<ScheduleItem>>;
        fn list_schedule_items(&self, project_id: i32) -> RepositoryResult<Vec<ScheduleItem>>;
    }

    impl ScheduleWriter for Repository {
        fn create_schedule_item(
            &self,
            new_item: &NewScheduleItem,
        ) -> RepositoryResult<ScheduleItem>;
        fn update_schedule_item(
            &self,
            item_id: i32,
            updates: &UpdateScheduleItem,
        ) -> RepositoryResult<ScheduleItem>;
        fn set_schedule_item_status(
            &self,
            item_id: i32,
            status: ScheduleStatus,
        ) -> RepositoryResult<ScheduleItem>;
        fn delete_schedule_item(&self, item_id: i32) -> RepositoryResult<()>;
    }

    impl RemedialReader for Repository {
        fn get_remedial_item_by_id(&self, id: i32) -> RepositoryResult<Option<RemedialItem>>;
        fn list_remedial_items(&self, project_id: i32) -> RepositoryResult<Vec<RemedialItem>>;
    }

    impl RemedialWriter for Repository {
        fn create_remedial_item(
            &self,
            new_item: &NewRemedialItem,
        ) -> RepositoryResult<RemedialItem>;
        fn set_remedial_item_status(
            &self,
            item_id: i32,
            status: RemedialStatus,
            resolved_at: Option<NaiveDateTime>,
        ) -> RepositoryResult<RemedialItem>;
        fn delete_remedial_item(&self, item_id: i32) -> RepositoryResult<()>;
    }

    impl DrawingReader for Repository {
        fn get_drawing_by_id(&self, id: i32) -> RepositoryResult<Option<Drawing>>;
        fn list_drawings(&self, project_id: i32) -> RepositoryResult<Vec<Drawing>>;
    }

    impl DrawingWriter for Repository {
        fn create_drawing(&self, new_drawing: &NewDrawing) -> RepositoryResult<Drawing>;
        fn delete_drawing(&self, drawing_id: i32) -> RepositoryResult<()>;
    }

    impl ChatReader for Repository {
        fn list_chat_messages(
            &self,
            query: ChatListQuery,
        ) -> RepositoryResult<(usize, Vec<(ChatMessage, User)>)>;
    }

    impl ChatWriter for Repository {
        fn create_chat_message(&self, message: &NewChatMessage) -> RepositoryResult<ChatMessage>;
    }

    impl ActivityReader for Repository {
        fn list_activities(
            &self,
            query: ActivityListQuery,
        ) -> RepositoryResult<(usize, Vec<(Activity, User)>)>;
    }

    impl ActivityWriter for Repository {
        fn create_activity(&self, activity: &NewActivity) -> RepositoryResult<Activity>;
    }
}
