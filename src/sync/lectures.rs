//! Lecture browser
//!
//! Cursor-paginated lecture search. Typed input goes through a
//! [`Debouncer`] so the backend only sees a term after 500ms of quiet;
//! changing the search field or grade refetches immediately.

use std::time::Instant;

use super::timer::{Debouncer, SEARCH_DEBOUNCE};
use super::Source;
use crate::api::Backend;
use crate::domain::{fixtures, Lecture, LectureQuery, SearchField};

pub struct LectureBrowser<'a> {
    backend: &'a dyn Backend,
    query: LectureQuery,
    lectures: Vec<Lecture>,
    next_cursor: Option<i64>,
    has_next: bool,
    source: Source,
    loaded: bool,
    input: String,
    debouncer: Debouncer<String>,
}

impl<'a> LectureBrowser<'a> {
    pub fn new(backend: &'a dyn Backend) -> Self {
        Self::with_query(backend, LectureQuery::new("", SearchField::Name, None))
    }

    /// Starts from `query`, including its cursor
    pub fn with_query(backend: &'a dyn Backend, query: LectureQuery) -> Self {
        Self {
            backend,
            input: query.term.clone(),
            query,
            lectures: Vec::new(),
            next_cursor: None,
            has_next: false,
            source: Source::Live,
            loaded: false,
            debouncer: Debouncer::new(SEARCH_DEBOUNCE),
        }
    }

    pub fn lectures(&self) -> &[Lecture] {
        &self.lectures
    }

    pub fn query(&self) -> &LectureQuery {
        &self.query
    }

    /// Raw search input, possibly not yet applied
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    /// Cursor for the next page, if the backend sent one
    pub fn next_cursor(&self) -> Option<i64> {
        self.next_cursor
    }

    pub fn source(&self) -> Source {
        self.source
    }

    /// True once the first page has been requested
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Updates the search input; the search runs after the quiet period
    pub fn set_input(&mut self, input: impl Into<String>, now: Instant) {
        self.input = input.into();
        self.debouncer.push(self.input.clone(), now);
    }

    /// Applies a settled search term. Returns true if a fetch happened.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.debouncer.poll(now) {
            Some(term) if term != self.query.term => {
                self.query.term = term;
                self.reset();
                true
            }
            _ => false,
        }
    }

    /// Drops a search term that has not settled yet
    pub fn cancel_pending(&mut self) {
        self.debouncer.cancel();
    }

    pub fn set_field(&mut self, field: SearchField) {
        if self.query.field != field {
            self.query.field = field;
            self.reset();
        }
    }

    pub fn set_grade(&mut self, grade: Option<u8>) {
        if self.query.grade != grade {
            self.query.grade = grade;
            self.reset();
        }
    }

    /// Fetches the first page and replaces the list
    pub fn reset(&mut self) -> Source {
        self.loaded = true;
        match self.backend.lectures(&self.query) {
            Ok(page) => {
                self.lectures = page.lectures;
                self.next_cursor = page.next_cursor;
                self.has_next = page.has_next;
                self.source = Source::Live;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch lectures, using demo data");
                let page = fixtures::lecture_page(&self.query);
                self.lectures = page.lectures;
                self.next_cursor = None;
                self.has_next = false;
                self.source = Source::Fixture;
            }
        }
        self.source
    }

    /// Appends the next page. Returns the number of lectures added.
    pub fn load_more(&mut self) -> usize {
        if !self.has_next {
            return 0;
        }

        match self.backend.lectures(&self.query.at(self.next_cursor)) {
            Ok(page) => {
                let added = page.lectures.len();
                self.lectures.extend(page.lectures);
                self.next_cursor = page.next_cursor;
                self.has_next = page.has_next;
                added
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch next lecture page");
                0
            }
        }
    }
}
