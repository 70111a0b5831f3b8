//! # View Models
//!
//! State holders that sit between the backend and the CLI/TUI views.
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`BucketSync`] | Buckets, element priorities, dirty/clean save cycle |
//! | [`LectureBrowser`] | Cursor-paginated search with debounced input |
//! | [`ResultsView`] | Simulation run list and reports |
//! | [`ReactionTest`] | Five-round reaction-time state machine |
//!
//! ## Error Policy
//!
//! - Reads degrade to bundled fixtures and report [`Source::Fixture`]
//! - Writes return [`SyncError`] and leave local state as it was

mod buckets;
mod lectures;
mod results;
pub mod reaction;
pub mod timer;

#[cfg(test)]
pub(crate) mod testing;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::ApiError;
use crate::domain::{ElementId, ValidationError};

pub use buckets::{BucketSync, SyncState};
pub use lectures::LectureBrowser;
pub use reaction::ReactionTest;
pub use results::ResultsView;
pub use timer::{Debouncer, Timer, SEARCH_DEBOUNCE};

/// Where displayed data came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Answered by the backend
    #[default]
    Live,
    /// Bundled demo data after a failed read
    Fixture,
}

impl Source {
    pub fn is_fixture(self) -> bool {
        self == Source::Fixture
    }
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("No bucket selected. Run 'regsim bucket select <id>' first.")]
    NoBucketSelected,

    #[error("Unsaved priority changes. Save or discard them first.")]
    UnsavedChanges,

    #[error("Element not found in the selected bucket: {0}")]
    UnknownElement(ElementId),
}
