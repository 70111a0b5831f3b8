//! Bucket sync orchestrator
//!
//! Keeps the bucket list and the elements of the selected bucket, applies
//! priority moves locally and pushes them to the backend on an explicit
//! save. Local order is a cache with a dirty flag: it is either in sync
//! with the backend or waiting to be saved.
//!
//! Reads never fail. When the backend cannot answer, bundled fixtures are
//! served and [`Source::Fixture`] records it. Writes return their error
//! and leave local state untouched (or dirty) for the caller to retry.

use serde::{Deserialize, Serialize};

use super::{Source, SyncError};
use crate::api::Backend;
use crate::domain::{
    fixtures, reorder, sort_by_priority, validate_bucket_name, Bucket, BucketElement, BucketId,
    Direction, ElementId, PriorityUpdate, TeachId,
};

/// Serializable state of the orchestrator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncState {
    #[serde(default)]
    pub buckets: Vec<Bucket>,

    #[serde(default)]
    pub buckets_source: Source,

    #[serde(default)]
    pub selected: Option<BucketId>,

    #[serde(default)]
    pub elements: Vec<BucketElement>,

    #[serde(default)]
    pub elements_source: Source,

    /// Local priority order differs from the backend
    #[serde(default)]
    pub dirty: bool,
}

/// View-model for bucket management
pub struct BucketSync<'a> {
    backend: &'a dyn Backend,
    state: SyncState,
}

impl<'a> BucketSync<'a> {
    pub fn new(backend: &'a dyn Backend) -> Self {
        Self::restore(backend, SyncState::default())
    }

    /// Resumes from a previously persisted state
    pub fn restore(backend: &'a dyn Backend, state: SyncState) -> Self {
        Self { backend, state }
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    pub fn into_state(self) -> SyncState {
        self.state
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.state.buckets
    }

    pub fn elements(&self) -> &[BucketElement] {
        &self.state.elements
    }

    pub fn selected(&self) -> Option<BucketId> {
        self.state.selected
    }

    pub fn selected_bucket(&self) -> Option<&Bucket> {
        let id = self.state.selected?;
        self.state.buckets.iter().find(|b| b.id == id)
    }

    pub fn is_dirty(&self) -> bool {
        self.state.dirty
    }

    /// Loads the bucket list, falling back to fixtures
    pub fn fetch_buckets(&mut self) -> Source {
        let (buckets, source) = match self.backend.buckets() {
            Ok(buckets) => (buckets, Source::Live),
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch buckets, using demo data");
                (fixtures::buckets(), Source::Fixture)
            }
        };

        self.state.buckets = buckets;
        self.state.buckets_source = source;
        source
    }

    /// Makes `id` the active bucket and loads its elements.
    ///
    /// `None` clears the selection and the element list. An unsaved
    /// reorder of the previous bucket is dropped.
    pub fn select_bucket(&mut self, id: Option<BucketId>) -> Source {
        if self.state.dirty {
            tracing::warn!(bucket = ?self.state.selected, "dropping unsaved priority changes");
        }

        self.state.selected = id;
        match id {
            Some(id) => self.fetch_elements(id),
            None => {
                self.state.elements.clear();
                self.state.elements_source = Source::Live;
                self.state.dirty = false;
                Source::Live
            }
        }
    }

    /// Loads the elements of `bucket` sorted by priority, falling back to fixtures
    pub fn fetch_elements(&mut self, bucket: BucketId) -> Source {
        let (mut elements, source) = match self.backend.elements(bucket) {
            Ok(elements) => (elements, Source::Live),
            Err(e) => {
                tracing::warn!(bucket, error = %e, "failed to fetch bucket elements, using demo data");
                (fixtures::elements(bucket), Source::Fixture)
            }
        };
        sort_by_priority(&mut elements);

        self.state.elements = elements;
        self.state.elements_source = source;
        self.state.dirty = false;
        source
    }

    /// Moves the element at `index` locally. Returns true if the order changed.
    pub fn reorder(&mut self, index: usize, direction: Direction) -> bool {
        let reordered = reorder(&self.state.elements, index, direction);
        if reordered == self.state.elements {
            return false;
        }

        self.state.elements = reordered;
        self.state.dirty = true;
        true
    }

    /// Throws away local changes by reloading the selected bucket
    pub fn discard(&mut self) -> Result<Source, SyncError> {
        let bucket = self.state.selected.ok_or(SyncError::NoBucketSelected)?;
        Ok(self.fetch_elements(bucket))
    }

    /// Sends the full priority list in one request.
    ///
    /// The dirty flag is cleared only when the backend accepts the update.
    pub fn save(&mut self) -> Result<(), SyncError> {
        let bucket = self.state.selected.ok_or(SyncError::NoBucketSelected)?;
        if !self.state.dirty {
            return Ok(());
        }

        let updates: Vec<PriorityUpdate> = self.state.elements.iter().map(PriorityUpdate::from).collect();
        tracing::debug!(bucket, count = updates.len(), "saving priorities");

        if let Err(e) = self.backend.update_priorities(bucket, &updates) {
            tracing::warn!(bucket, error = %e, "priority save failed, changes kept locally");
            return Err(e.into());
        }

        self.state.dirty = false;
        Ok(())
    }

    /// Creates a bucket and reloads the list
    pub fn create_bucket(&mut self, name: &str) -> Result<(), SyncError> {
        let name = validate_bucket_name(name)?;
        self.backend.create_bucket(&name)?;
        self.fetch_buckets();
        Ok(())
    }

    /// Asks the backend to make `bucket` the best one and reloads the list.
    ///
    /// The best flag is never changed locally; the reloaded list is the
    /// backend's answer.
    pub fn set_best(&mut self, bucket: BucketId) -> Result<(), SyncError> {
        self.backend.select_best(bucket)?;
        self.fetch_buckets();
        Ok(())
    }

    /// Adds a lecture to the selected bucket
    pub fn add_element(&mut self, teach_id: TeachId) -> Result<(), SyncError> {
        let bucket = self.writable_bucket()?;
        self.backend.add_element(bucket, teach_id)?;
        self.fetch_elements(bucket);
        Ok(())
    }

    /// Sets the fallback lecture of an element in the selected bucket
    pub fn set_alternate(&mut self, element: ElementId, alternate: TeachId) -> Result<(), SyncError> {
        let bucket = self.writable_bucket()?;
        if !self.state.elements.iter().any(|e| e.element_id == element) {
            return Err(SyncError::UnknownElement(element));
        }

        self.backend.set_alternate(bucket, element, alternate)?;
        self.fetch_elements(bucket);
        Ok(())
    }

    /// The selected bucket, if element edits are allowed right now
    fn writable_bucket(&self) -> Result<BucketId, SyncError> {
        let bucket = self.state.selected.ok_or(SyncError::NoBucketSelected)?;
        if self.state.dirty {
            return Err(SyncError::UnsavedChanges);
        }
        Ok(bucket)
    }
}
