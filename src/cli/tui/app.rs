//! TUI application state and logic

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;

use super::event::{Event, EventHandler};
use super::ui::Terminal;
use super::{views, View};
use crate::api::Backend;
use crate::domain::Direction;
use crate::sync::reaction::{self, Phase, Press, ROUNDS};
use crate::sync::{BucketSync, LectureBrowser, ReactionTest, ResultsView, Source, SyncError, SyncState};

/// Which panel of the buckets view has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Buckets,
    Elements,
}

impl Focus {
    fn toggle(self) -> Self {
        match self {
            Focus::Buckets => Focus::Elements,
            Focus::Elements => Focus::Buckets,
        }
    }
}

/// Input mode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the lecture search box
    Search,
    NewBucket(String),
}

/// Moves a list cursor by `delta`, staying inside `0..len`
fn step(index: usize, len: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    let next = index as isize + delta;
    next.clamp(0, len as isize - 1) as usize
}

/// Grade filter cycle: all, 1, 2, 3, 4, all
fn next_grade(grade: Option<u8>) -> Option<u8> {
    match grade {
        None => Some(1),
        Some(g) if g < 4 => Some(g + 1),
        Some(_) => None,
    }
}

/// Application state
pub struct App<'a> {
    backend: &'a dyn Backend,
    view: View,
    buckets: BucketSync<'a>,
    lectures: LectureBrowser<'a>,
    results: ResultsView<'a>,
    results_loaded: bool,
    reaction: ReactionTest,
    focus: Focus,
    input_mode: InputMode,
    bucket_index: usize,
    element_index: usize,
    lecture_index: usize,
    result_index: usize,
    status_message: Option<String>,
    should_quit: bool,
}

impl<'a> App<'a> {
    /// Creates the app, resuming bucket state from a previous session
    pub fn new(backend: &'a dyn Backend, state: SyncState, view: View) -> Self {
        let mut app = Self {
            backend,
            view: View::Buckets,
            buckets: BucketSync::restore(backend, state),
            lectures: LectureBrowser::new(backend),
            results: ResultsView::new(backend),
            results_loaded: false,
            reaction: ReactionTest::new(),
            focus: Focus::Buckets,
            input_mode: InputMode::Normal,
            bucket_index: 0,
            element_index: 0,
            lecture_index: 0,
            result_index: 0,
            status_message: None,
            should_quit: false,
        };

        app.load_buckets();
        app.enter(view);
        app
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut Terminal, events: EventHandler) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;

            // A pending reaction signal cuts the wait short so it shows on time
            let event = match self.next_wait(Instant::now()) {
                Some(wait) => events.next_timeout(wait)?,
                None => Some(events.next()?),
            };
            match event {
                Some(Event::Key(key)) => self.handle_key(key, Instant::now()),
                Some(Event::Resize) | Some(Event::Tick) | None => {}
            }
            // Timers are polled after every event
            self.on_tick(Instant::now());
        }

        self.reaction.cancel();
        self.lectures.cancel_pending();
        Ok(())
    }

    /// How long the loop may block before a timer is due
    fn next_wait(&self, now: Instant) -> Option<Duration> {
        self.reaction.time_to_signal(now)
    }

    /// Hands the bucket state back for persisting
    pub fn into_bucket_state(self) -> SyncState {
        self.buckets.into_state()
    }

    fn draw(&self, frame: &mut Frame) {
        views::draw(frame, self);
    }

    fn status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    fn note_source(&mut self, source: Source) {
        if source.is_fixture() {
            self.status("Backend unavailable, showing demo data");
        }
    }

    /// Switches views, stopping whatever the old view had running
    fn enter(&mut self, view: View) {
        if self.view == View::Reaction && view != View::Reaction && self.reaction.is_running() {
            self.reaction.cancel();
            self.status("Reaction test cancelled");
        }
        if self.view == View::Lectures && view != View::Lectures {
            self.lectures.cancel_pending();
            self.input_mode = InputMode::Normal;
        }
        self.view = view;

        match view {
            View::Lectures if !self.lectures.is_loaded() => {
                let source = self.lectures.reset();
                self.note_source(source);
            }
            View::Results if !self.results_loaded => {
                let source = self.results.fetch_summaries();
                self.results_loaded = true;
                self.note_source(source);
            }
            _ => {}
        }
    }

    fn on_tick(&mut self, now: Instant) {
        if self.lectures.poll(now) {
            self.lecture_index = 0;
            let source = self.lectures.source();
            self.note_source(source);
        }
        self.reaction.tick(now);
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.input_mode.clone() {
            InputMode::Normal => self.handle_normal_key(key, now),
            InputMode::Search => self.handle_search_key(key, now),
            InputMode::NewBucket(name) => self.handle_new_bucket_key(key, name),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char(c @ '1'..='4') => {
                if let Some(view) = View::from_key(c) {
                    self.enter(view);
                }
                return;
            }
            _ => {}
        }

        match self.view {
            View::Buckets => self.handle_buckets_key(key),
            View::Lectures => self.handle_lectures_key(key),
            View::Results => self.handle_results_key(key),
            View::Reaction => self.handle_reaction_key(key, now),
        }
    }

    // Buckets

    fn load_buckets(&mut self) {
        let source = self.buckets.fetch_buckets();

        if !self.buckets.is_dirty() {
            let listed = |id: &i64| self.buckets.buckets().iter().any(|b| b.id == *id);
            let target = self
                .buckets
                .selected()
                .filter(listed)
                .or_else(|| self.buckets.buckets().iter().find(|b| b.is_best).map(|b| b.id))
                .or_else(|| self.buckets.buckets().first().map(|b| b.id));
            self.buckets.select_bucket(target);
        }

        self.bucket_index = self
            .buckets
            .selected()
            .and_then(|id| self.buckets.buckets().iter().position(|b| b.id == id))
            .unwrap_or(0);
        self.element_index = step(self.element_index, self.buckets.elements().len(), 0);
        self.note_source(source);
    }

    fn handle_buckets_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
                self.focus = self.focus.toggle();
            }
            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-1),
            KeyCode::Enter => {
                if self.focus == Focus::Buckets {
                    self.open_selected_bucket();
                }
            }
            KeyCode::Char('K') => self.move_element(Direction::Up),
            KeyCode::Char('J') => self.move_element(Direction::Down),
            KeyCode::Char('s') => self.save_priorities(),
            KeyCode::Char('d') => self.discard_changes(),
            KeyCode::Char('b') => self.mark_best(),
            KeyCode::Char('n') => self.input_mode = InputMode::NewBucket(String::new()),
            KeyCode::Char('r') => {
                if self.buckets.is_dirty() {
                    self.status("Unsaved changes: press s to save or d to discard first");
                } else {
                    self.load_buckets();
                }
            }
            _ => {}
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        match (self.view, self.focus) {
            (View::Buckets, Focus::Buckets) => {
                self.bucket_index = step(self.bucket_index, self.buckets.buckets().len(), delta);
            }
            (View::Buckets, Focus::Elements) => {
                self.element_index = step(self.element_index, self.buckets.elements().len(), delta);
            }
            (View::Lectures, _) => {
                self.lecture_index = step(self.lecture_index, self.lectures.lectures().len(), delta);
            }
            (View::Results, _) => {
                self.result_index = step(self.result_index, self.results.summaries().len(), delta);
            }
            (View::Reaction, _) => {}
        }
    }

    fn open_selected_bucket(&mut self) {
        let Some(id) = self.buckets.buckets().get(self.bucket_index).map(|b| b.id) else {
            return;
        };
        if self.buckets.selected() == Some(id) {
            // Already open; reloading would drop a draft
            self.focus = Focus::Elements;
            return;
        }
        if self.buckets.is_dirty() {
            self.status("Unsaved changes: press s to save or d to discard first");
            return;
        }

        let source = self.buckets.select_bucket(Some(id));
        self.element_index = 0;
        self.focus = Focus::Elements;
        self.status_message = None;
        self.note_source(source);
    }

    fn move_element(&mut self, direction: Direction) {
        if self.focus != Focus::Elements {
            self.status("Focus the course list first (Tab)");
            return;
        }

        let index = self.element_index;
        if self.buckets.reorder(index, direction) {
            self.element_index = match direction {
                Direction::Up => index.saturating_sub(1),
                Direction::Down => index + 1,
            };
            self.status("Unsaved changes (s to save, d to discard)");
        }
    }

    fn save_priorities(&mut self) {
        if !self.buckets.is_dirty() {
            self.status("Nothing to save");
            return;
        }
        match self.buckets.save() {
            Ok(()) => self.status("Priorities saved"),
            Err(SyncError::Api(e)) if e.is_transport() => {
                self.status(format!("Save failed, backend unreachable; changes kept locally ({})", e))
            }
            Err(e) => self.status(format!("Save failed, changes kept: {}", e)),
        }
    }

    fn discard_changes(&mut self) {
        match self.buckets.discard() {
            Ok(source) => {
                self.status("Changes discarded");
                self.note_source(source);
            }
            Err(e) => self.status(e.to_string()),
        }
        self.element_index = step(self.element_index, self.buckets.elements().len(), 0);
    }

    fn mark_best(&mut self) {
        let Some(bucket) = self.buckets.buckets().get(self.bucket_index).cloned() else {
            return;
        };
        match self.buckets.set_best(bucket.id) {
            Ok(()) => self.status(format!("'{}' is now the best bucket", bucket.name)),
            Err(e) => self.status(format!("Failed to set best bucket: {}", e)),
        }
    }

    fn handle_new_bucket_key(&mut self, key: KeyEvent, mut name: String) {
        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                match self.buckets.create_bucket(&name) {
                    Ok(()) => self.status(format!("Created bucket '{}'", name.trim())),
                    Err(e) => self.status(e.to_string()),
                }
            }
            KeyCode::Backspace => {
                name.pop();
                self.input_mode = InputMode::NewBucket(name);
            }
            KeyCode::Char(c) => {
                name.push(c);
                self.input_mode = InputMode::NewBucket(name);
            }
            _ => {}
        }
    }

    // Lectures

    fn handle_lectures_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('/') => self.input_mode = InputMode::Search,
            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-1),
            KeyCode::Tab => {
                let field = self.lectures.query().field.toggle();
                self.lectures.set_field(field);
                self.lecture_index = 0;
                self.status(format!("Searching by {}", field.label()));
            }
            KeyCode::Char('g') => {
                let grade = next_grade(self.lectures.query().grade);
                self.lectures.set_grade(grade);
                self.lecture_index = 0;
                match grade {
                    Some(g) => self.status(format!("Grade {}", g)),
                    None => self.status("All grades"),
                }
            }
            KeyCode::Char('m') => {
                if !self.lectures.has_next() {
                    self.status("No more lectures");
                } else {
                    let added = self.lectures.load_more();
                    self.status(format!("Loaded {} more", added));
                }
            }
            KeyCode::Char('a') => self.add_selected_lecture(),
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.input_mode = InputMode::Normal,
            KeyCode::Backspace => {
                let mut input = self.lectures.input().to_string();
                input.pop();
                self.lectures.set_input(input, now);
            }
            KeyCode::Char(c) => {
                let input = format!("{}{}", self.lectures.input(), c);
                self.lectures.set_input(input, now);
            }
            _ => {}
        }
    }

    fn add_selected_lecture(&mut self) {
        let Some(lecture) = self.lectures.lectures().get(self.lecture_index).cloned() else {
            return;
        };
        match self.buckets.add_element(lecture.teach_id) {
            Ok(()) => self.status(format!("Added '{}' to the selected bucket", lecture.course_name)),
            Err(e) => self.status(e.to_string()),
        }
    }

    // Results

    fn handle_results_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-1),
            KeyCode::Enter => {
                if let Some(id) = self.results.summaries().get(self.result_index).map(|s| s.test_id) {
                    let source = self.results.open(id);
                    self.note_source(source);
                }
            }
            KeyCode::Esc | KeyCode::Backspace => self.results.close(),
            KeyCode::Char('r') => {
                self.results.close();
                let source = self.results.fetch_summaries();
                self.result_index = 0;
                self.note_source(source);
            }
            _ => {}
        }
    }

    // Reaction

    fn handle_reaction_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => self.reaction_press(now),
            KeyCode::Esc => {
                self.reaction.cancel();
                self.status("Reaction test cancelled");
            }
            _ => {}
        }
    }

    fn reaction_press(&mut self, now: Instant) {
        let mut rng = rand::thread_rng();

        match self.reaction.phase() {
            Phase::Idle | Phase::Finished { .. } => {
                self.reaction.start(now, reaction::random_delay(&mut rng));
                self.status("Wait for the signal...");
            }
            Phase::Waiting => self.status("Too early, wait for the signal"),
            Phase::Armed { .. } => match self.reaction.press(now, reaction::random_delay(&mut rng)) {
                Press::Recorded { latency_ms, round } => {
                    self.status(format!("Round {}/{}: {} ms", round, ROUNDS, latency_ms));
                }
                Press::Finished { average_ms } => match self.reaction.submit(self.backend) {
                    Ok(_) => self.status(format!("Average {} ms, saved", average_ms)),
                    Err(e) => self.status(format!("Average {} ms, not saved: {}", average_ms, e)),
                },
                Press::Ignored => {}
            },
        }
    }

    // Accessors for views

    pub fn view(&self) -> View {
        self.view
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn input_mode(&self) -> &InputMode {
        &self.input_mode
    }

    pub fn buckets(&self) -> &BucketSync<'a> {
        &self.buckets
    }

    pub fn lectures(&self) -> &LectureBrowser<'a> {
        &self.lectures
    }

    pub fn results(&self) -> &ResultsView<'a> {
        &self.results
    }

    pub fn reaction(&self) -> &ReactionTest {
        &self.reaction
    }

    pub fn bucket_index(&self) -> usize {
        self.bucket_index
    }

    pub fn element_index(&self) -> usize {
        self.element_index
    }

    pub fn lecture_index(&self) -> usize {
        self.lecture_index
    }

    pub fn result_index(&self) -> usize {
        self.result_index
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}
