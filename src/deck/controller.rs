use std::fmt;

use super::client::{ApiError, SlideApi};
use super::keys::{KeyPress, command_for};
use crate::models::slide::{DEFAULT_CONTENT, DEFAULT_LAYOUT, NewSlide, Slide, SlidePatch};

pub const LOAD_FAILED: &str = "Failed to load slides. Please refresh the page.";
pub const CREATE_FAILED: &str = "Failed to create new slide. Please try again.";
pub const SAVE_FAILED: &str = "Failed to save changes. Please try again.";
pub const DELETE_FAILED: &str = "Failed to delete slide. Please try again.";
pub const MOVE_FAILED: &str = "Failed to move slide. Please try again.";
pub const NOTHING_TO_SAVE: &str = "No slide to save";
pub const SLIDE_GONE: &str = "This slide no longer exists. Reload the deck to continue.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Viewing,
    Editing,
}

/// Behaviours that differ between deployments of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckPolicy {
    /// Open the editor on a slide right after creating it.
    pub enter_edit_on_create: bool,
    /// Create one placeholder slide when `load` finds the deck empty.
    pub starter_slide_on_empty: bool,
}

impl Default for DeckPolicy {
    fn default() -> Self {
        DeckPolicy {
            enter_edit_on_create: false,
            starter_slide_on_empty: true,
        }
    }
}

/// Towards the start (`Up`) or the end (`Down`) of the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Named UI actions. Every button and shortcut resolves to one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    First,
    Last,
    GoTo(usize),
    Add,
    BeginEdit,
    Save,
    Cancel,
    Delete,
    Move(Direction),
}

/// Position shown in the slide counter and progress bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// 1-based; 0 for an empty deck.
    pub position: usize,
    pub total: usize,
    pub percent: f64,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slide {} of {}", self.position, self.total)
    }
}

/// Everything the view renders from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeckState {
    /// Mirrors the store after the last successful round-trip.
    pub slides: Vec<Slide>,
    /// Always `< slides.len()`, or 0 when the deck is empty.
    pub current_index: usize,
    pub edit_buffer: String,
    pub mode: Mode,
    pub error: Option<String>,
    /// Set from construction until the first `load` completes.
    pub loading: bool,
}

/// Holds the deck and applies UI commands, confirming each mutation with the
/// store before touching local state. Commands take `&mut self`, so only one
/// is ever in flight.
pub struct DeckController<A> {
    api: A,
    policy: DeckPolicy,
    state: DeckState,
}

impl<A: SlideApi> DeckController<A> {
    pub fn new(api: A) -> Self {
        Self::with_policy(api, DeckPolicy::default())
    }

    pub fn with_policy(api: A, policy: DeckPolicy) -> Self {
        DeckController {
            api,
            policy,
            state: DeckState {
                loading: true,
                ..Default::default()
            },
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn policy(&self) -> DeckPolicy {
        self.policy
    }

    pub fn state(&self) -> &DeckState {
        &self.state
    }

    pub fn slides(&self) -> &[Slide] {
        &self.state.slides
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.state.slides.get(self.state.current_index)
    }

    pub fn edit_buffer(&self) -> &str {
        &self.state.edit_buffer
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn is_editing(&self) -> bool {
        self.state.mode == Mode::Editing
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    pub fn progress(&self) -> Progress {
        let total = self.state.slides.len();
        let position = if total == 0 { 0 } else { self.state.current_index + 1 };
        let percent = if total == 0 {
            0.0
        } else {
            position as f64 * 100.0 / total as f64
        };
        Progress {
            position,
            total,
            percent,
        }
    }

    fn record_failure(&mut self, err: &ApiError, fallback: &str) {
        log::warn!("{fallback} ({err})");
        let message = match err {
            ApiError::NotFound => SLIDE_GONE.to_string(),
            ApiError::Validation(details) => format!("Invalid slide: {details}"),
            _ => fallback.to_string(),
        };
        self.state.error = Some(message);
    }

    fn reset_buffer(&mut self) {
        self.state.edit_buffer = self
            .current_slide()
            .map(|s| s.content.clone())
            .unwrap_or_default();
    }

    /// Local mirror of the store's compaction. Only `order` is rewritten:
    /// the store also stamps `updated_at` on shifted neighbours, which the
    /// local copies pick up on the next `load`.
    fn renumber(&mut self) {
        for (position, slide) in self.state.slides.iter_mut().enumerate() {
            slide.order = position as i64;
        }
    }

    async fn fetch_deck(&self) -> Result<Vec<Slide>, ApiError> {
        let mut slides = self.api.list().await?;
        if slides.is_empty() && self.policy.starter_slide_on_empty {
            let starter = self
                .api
                .create(&NewSlide {
                    order: Some(0),
                    ..Default::default()
                })
                .await?;
            slides.push(starter);
        }
        Ok(slides)
    }

    /// Fetch the whole deck and show its first slide. On failure the previous
    /// slides are kept and a retryable error is recorded.
    pub async fn load(&mut self) -> bool {
        self.state.loading = true;
        let fetched = self.fetch_deck().await;
        self.state.loading = false;

        match fetched {
            Ok(slides) => {
                self.state.slides = slides;
                self.state.current_index = 0;
                self.state.mode = Mode::Viewing;
                self.state.error = None;
                self.reset_buffer();
                true
            }
            Err(e) => {
                self.record_failure(&e, LOAD_FAILED);
                false
            }
        }
    }

    /// Append a placeholder slide and make it current.
    pub async fn add_slide(&mut self) -> bool {
        let input = NewSlide {
            content: Some(DEFAULT_CONTENT.to_string()),
            order: Some(self.state.slides.len() as i64),
            layout: Some(DEFAULT_LAYOUT.to_string()),
        };

        match self.api.create(&input).await {
            Ok(created) => {
                self.state.edit_buffer = created.content.clone();
                self.state.slides.push(created);
                self.state.current_index = self.state.slides.len() - 1;
                self.state.mode = if self.policy.enter_edit_on_create {
                    Mode::Editing
                } else {
                    Mode::Viewing
                };
                self.state.error = None;
                true
            }
            Err(e) => {
                self.record_failure(&e, CREATE_FAILED);
                false
            }
        }
    }

    /// Jump to `index`. Out-of-range indices are ignored. Any uncommitted
    /// edit is dropped: the buffer is reloaded from the new slide.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.state.slides.len() {
            return false;
        }
        self.state.current_index = index;
        self.reset_buffer();
        true
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.state.current_index + 1)
    }

    pub fn previous(&mut self) -> bool {
        match self.state.current_index.checked_sub(1) {
            Some(index) => self.go_to(index),
            None => false,
        }
    }

    pub fn first(&mut self) -> bool {
        self.go_to(0)
    }

    pub fn last(&mut self) -> bool {
        match self.state.slides.len().checked_sub(1) {
            Some(index) => self.go_to(index),
            None => false,
        }
    }

    pub fn begin_edit(&mut self) -> bool {
        if self.current_slide().is_none() {
            return false;
        }
        self.reset_buffer();
        self.state.mode = Mode::Editing;
        true
    }

    pub fn set_buffer(&mut self, text: impl Into<String>) {
        self.state.edit_buffer = text.into();
    }

    /// Persist the buffer into the current slide. A failed save stays in
    /// editing mode with the buffer intact.
    pub async fn save_edit(&mut self) -> bool {
        let index = self.state.current_index;
        let Some((id, layout)) = self.current_slide().map(|s| (s.id, s.layout.clone())) else {
            self.state.error = Some(NOTHING_TO_SAVE.to_string());
            return false;
        };
        let patch = SlidePatch {
            content: Some(self.state.edit_buffer.clone()),
            order: Some(index as i64),
            layout: Some(layout),
        };

        match self.api.update(id, &patch).await {
            Ok(saved) => {
                self.state.edit_buffer = saved.content.clone();
                self.state.slides[index] = saved;
                self.state.mode = Mode::Viewing;
                self.state.error = None;
                true
            }
            Err(e) => {
                self.record_failure(&e, SAVE_FAILED);
                false
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.reset_buffer();
        self.state.mode = Mode::Viewing;
        self.state.error = None;
    }

    /// Delete the current slide. The slide after it (or the new last one)
    /// becomes current. Neighbours are renumbered locally without a refetch.
    pub async fn delete_current(&mut self) -> bool {
        let Some(id) = self.current_slide().map(|s| s.id) else {
            return false;
        };

        match self.api.delete(id).await {
            Ok(()) => {
                self.state.slides.remove(self.state.current_index);
                self.renumber();
                self.state.current_index = self
                    .state
                    .current_index
                    .min(self.state.slides.len().saturating_sub(1));
                self.state.mode = Mode::Viewing;
                self.state.error = None;
                self.reset_buffer();
                true
            }
            Err(e) => {
                self.record_failure(&e, DELETE_FAILED);
                false
            }
        }
    }

    /// Swap the current slide with its neighbour. The moved slide stays
    /// current and the edit buffer is untouched. The displaced neighbour is
    /// renumbered locally without a refetch.
    pub async fn move_current(&mut self, direction: Direction) -> bool {
        let index = self.state.current_index;
        let len = self.state.slides.len();
        let target = match direction {
            Direction::Up if index > 0 => index - 1,
            Direction::Down if index + 1 < len => index + 1,
            _ => return false,
        };
        let id = self.state.slides[index].id;

        match self.api.update(id, &SlidePatch::order(target as i64)).await {
            Ok(moved) => {
                self.state.slides.remove(index);
                self.state.slides.insert(target, moved);
                self.renumber();
                self.state.current_index = target;
                self.state.error = None;
                true
            }
            Err(e) => {
                self.record_failure(&e, MOVE_FAILED);
                false
            }
        }
    }

    /// Run one named command. Returns whether it changed anything.
    pub async fn dispatch(&mut self, command: Command) -> bool {
        match command {
            Command::Next => self.next(),
            Command::Previous => self.previous(),
            Command::First => self.first(),
            Command::Last => self.last(),
            Command::GoTo(index) => self.go_to(index),
            Command::Add => self.add_slide().await,
            Command::BeginEdit => self.begin_edit(),
            Command::Save => self.save_edit().await,
            Command::Cancel => {
                self.cancel_edit();
                true
            }
            Command::Delete => self.delete_current().await,
            Command::Move(direction) => self.move_current(direction).await,
        }
    }

    /// Translate a key press for the current mode and run it.
    pub async fn handle_key(&mut self, press: &KeyPress) -> bool {
        match command_for(press, self.state.mode) {
            Some(command) => self.dispatch(command).await,
            None => false,
        }
    }
}
