//! Client-side deck state: the slide sequence, the current position and the
//! edit session, kept in step with the slide store through [`SlideApi`].

pub mod client;
pub mod controller;
pub mod keys;

pub use client::{ApiError, HttpSlideApi, SlideApi, StoreSlideApi};
pub use controller::{Command, DeckController, DeckPolicy, DeckState, Direction, Mode, Progress};
pub use keys::{KeyPress, command_for};
