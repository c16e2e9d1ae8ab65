//! Domain model for task tracking.
//!
//! The task domain models validated task input, partial updates, and the
//! listing order while keeping all infrastructure concerns outside of the
//! domain boundary.

mod error;
mod ids;
mod label;
mod listing;
mod task;
pub mod timestamp;

pub use error::{ParseTimestampError, TaskDomainError};
pub use ids::{CommitBy, TaskId, TaskTitle};
pub use label::LabelColor;
pub use listing::{CreationOrder, StatusFilter, listing_order};
pub use task::{PersistedTaskData, Task, TaskChanges, TaskDraft};
