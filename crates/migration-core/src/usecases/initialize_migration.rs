//! T1: `initialize_migration`

use chrono::{DateTime, Utc};

use crate::domain::{Migration, ToolError};
use crate::ports::IStateRepository;

/// Starts a new migration run.
///
/// # Errors
/// - `invalid_argument` if `user_name` is empty or `years_on_source` is negative.
/// - `already_active` if an uncompleted migration already exists.
pub async fn initialize_migration(
    repo: &dyn IStateRepository,
    user_name: &str,
    years_on_source: i32,
    now: DateTime<Utc>,
) -> Result<Migration, ToolError> {
    if user_name.trim().is_empty() {
        return Err(ToolError::InvalidArgument(
            "user_name must not be empty".to_string(),
        ));
    }
    if years_on_source < 0 {
        return Err(ToolError::InvalidArgument(
            "years_on_source must not be negative".to_string(),
        ));
    }

    repo.create_migration(user_name, years_on_source, now)
        .await
        .map_err(Into::into)
}
