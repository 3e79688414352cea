use chrono::NaiveDateTime;

use crate::db::{DbConnection, DbPool};
use crate::domain::activity::{Activity, ActivityEntity, NewActivity};
use crate::domain::chat::{ChatMessage, NewChatMessage};
use crate::domain::cost_change::{CostChange, NewCostChange};
use crate::domain::decision::{Decision, NewDecision, UpdateDecision};
use crate::domain::drawing::{Drawing, NewDrawing};
use crate::domain::milestone::{Milestone, MilestoneStatus, NewMilestone, UpdateMilestone};
use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::project::{NewProject, Project, UpdateProject};
use crate::domain::remedial_item::{NewRemedialItem, RemedialItem, RemedialStatus};
use crate::domain::schedule_item::{NewScheduleItem, ScheduleItem, ScheduleStatus, UpdateScheduleItem};
use crate::domain::types::{ApprovalStatus, CompletionPercent};
use crate::domain::user::{NewUser, User};
use crate::repository::errors::RepositoryResult;

pub mod activity;
pub mod chat;
pub mod cost_change;
pub mod decision;
pub mod drawing;
pub mod errors;
pub mod milestone;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod product;
pub mod project;
pub mod remedial_item;
pub mod schedule_item;
pub mod user;

/// Diesel-backed implementation of every repository trait in this module.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

#[derive(Debug, Clone)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

/// Filter and pagination options for the product list.
#[derive(Debug, Clone)]
pub struct ProductListQuery {
    pub project_id: i32,
    pub status: Option<ApprovalStatus>,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    pub fn new(project_id: i32) -> Self {
        Self {
            project_id,
            status: None,
            search: None,
            pagination: None,
        }
    }

    pub fn status(mut self, status: ApprovalStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Pagination options for the chat feed.
#[derive(Debug, Clone)]
pub struct ChatListQuery {
    pub project_id: i32,
    pub pagination: Option<Pagination>,
}

impl ChatListQuery {
    pub fn new(project_id: i32) -> Self {
        Self {
            project_id,
            pagination: None,
        }
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Filter and pagination options for the activity feed.
#[derive(Debug, Clone)]
pub struct ActivityListQuery {
    pub project_id: i32,
    pub entity: Option<ActivityEntity>,
    pub pagination: Option<Pagination>,
}

impl ActivityListQuery {
    pub fn new(project_id: i32) -> Self {
        Self {
            project_id,
            entity: None,
            pagination: None,
        }
    }

    pub fn entity(mut self, entity: ActivityEntity) -> Self {
        self.entity = Some(entity);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait UserReader {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
}

pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    fn set_user_password(&self, user_id: i32, password_hash: &str) -> RepositoryResult<()>;
    fn mark_email_verified(&self, user_id: i32) -> RepositoryResult<()>;
}

pub trait ProjectReader {
    fn get_project_by_id(&self, id: i32) -> RepositoryResult<Option<Project>>;
    fn list_all_projects(&self) -> RepositoryResult<Vec<Project>>;
    fn list_projects_for_user(&self, user_id: i32) -> RepositoryResult<Vec<Project>>;
    fn is_project_member(&self, project_id: i32, user_id: i32) -> RepositoryResult<bool>;
}

pub trait ProjectWriter {
    fn create_project(&self, new_project: &NewProject) -> RepositoryResult<Project>;
    fn update_project(&self, project_id: i32, updates: &UpdateProject)
    -> RepositoryResult<Project>;
    fn add_project_member(&self, project_id: i32, user_id: i32) -> RepositoryResult<usize>;
}

pub trait ProductReader {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
}

pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(&self, product_id: i32, updates: &UpdateProduct)
    -> RepositoryResult<Product>;
    fn set_product_status(&self, product_id: i32, status: ApprovalStatus)
    -> RepositoryResult<Product>;
    fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
}

pub trait MilestoneReader {
    fn get_milestone_by_id(&self, id: i32) -> RepositoryResult<Option<Milestone>>;
    /// Milestones of a project ordered by `sort_order`.
    fn list_milestones(&self, project_id: i32) -> RepositoryResult<Vec<Milestone>>;
}

pub trait MilestoneWriter {
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
    /// Assigns `sort_order` from the position of each id in the slice.
    fn reorder_milestones(&self, project_id: i32, ordered_ids: &[i32]) -> RepositoryResult<usize>;
    fn delete_milestone(&self, milestone_id: i32) -> RepositoryResult<()>;
}

pub trait DecisionReader {
    fn get_decision_by_id(&self, id: i32) -> RepositoryResult<Option<Decision>>;
    fn list_decisions(&self, project_id: i32) -> RepositoryResult<Vec<Decision>>;
}

pub trait DecisionWriter {
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

pub trait CostChangeReader {
    fn get_cost_change_by_id(&self, id: i32) -> RepositoryResult<Option<CostChange>>;
    fn list_cost_changes(&self, project_id: i32) -> RepositoryResult<Vec<CostChange>>;
}

pub trait CostChangeWriter {
    fn create_cost_change(&self, new_change: &NewCostChange) -> RepositoryResult<CostChange>;
    fn set_cost_change_status(
        &self,
        cost_change_id: i32,
        status: ApprovalStatus,
    ) -> RepositoryResult<CostChange>;
    fn delete_cost_change(&self, cost_change_id: i32) -> RepositoryResult<()>;
}

pub trait ScheduleReader {
    fn get_schedule_item_by_id(&self, id: i32) -> RepositoryResult<Option<ScheduleItem>>;
    /// Schedule items of a project ordered by `start_date`.
    fn list_schedule_items(&self, project_id: i32) -> RepositoryResult<Vec<ScheduleItem>>;
}

pub trait ScheduleWriter {
    fn create_schedule_item(&self, new_item: &NewScheduleItem) -> RepositoryResult<ScheduleItem>;
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

pub trait RemedialReader {
    fn get_remedial_item_by_id(&self, id: i32) -> RepositoryResult<Option<RemedialItem>>;
    fn list_remedial_items(&self, project_id: i32) -> RepositoryResult<Vec<RemedialItem>>;
}

pub trait RemedialWriter {
    fn create_remedial_item(&self, new_item: &NewRemedialItem) -> RepositoryResult<RemedialItem>;
    /// Writes the status together with the caller-computed `resolved_at` stamp.
    fn set_remedial_item_status(
        &self,
        item_id: i32,
        status: RemedialStatus,
        resolved_at: Option<NaiveDateTime>,
    ) -> RepositoryResult<RemedialItem>;
    fn delete_remedial_item(&self, item_id: i32) -> RepositoryResult<()>;
}

pub trait DrawingReader {
    fn get_drawing_by_id(&self, id: i32) -> RepositoryResult<Option<Drawing>>;
    fn list_drawings(&self, project_id: i32) -> RepositoryResult<Vec<Drawing>>;
}

pub trait DrawingWriter {
    fn create_drawing(&self, new_drawing: &NewDrawing) -> RepositoryResult<Drawing>;
    fn delete_drawing(&self, drawing_id: i32) -> RepositoryResult<()>;
}

pub trait ChatReader {
    fn list_chat_messages(
        &self,
        query: ChatListQuery,
    ) -> RepositoryResult<(usize, Vec<(ChatMessage, User)>)>;
}

pub trait ChatWriter {
    fn create_chat_message(&self, message: &NewChatMessage) -> RepositoryResult<ChatMessage>;
}

pub trait ActivityReader {
    fn list_activities(
        &self,
        query: ActivityListQuery,
    ) -> RepositoryResult<(usize, Vec<(Activity, User)>)>;
}

pub trait ActivityWriter {
    fn create_activity(&self, activity: &NewActivity) -> RepositoryResult<Activity>;
}
