use crate::domain::activity::NewActivity;
use crate::repository::ActivityWriter;

/// Records an audit row for a completed mutation.
///
/// A failed insert must not fail the mutation it documents, so errors are
/// logged and swallowed here.
pub fn record_activity<R>(repo: &R, activity: NewActivity)
where
    R: ActivityWriter + ?Sized,
{
    if let Err(err) = repo.create_activity(&activity) {
        log::warn!(
            "Failed to record {} activity for project {}: {err}",
            activity.entity,
            activity.project_id
        );
    }
}
