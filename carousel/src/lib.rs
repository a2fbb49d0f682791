//! Headless interaction core for the Cardflow carousel.
//!
//! Everything in this crate is framework-free: gestures arrive as plain
//! `{x, y}` offsets, keys as a small [`NavKey`] enum, and time as
//! [`std::time::Instant`] values supplied by the caller.  The crate never
//! reads the clock itself, which keeps every state machine deterministic
//! under test.  Pending work (autoplay ticks, transition phases, the
//! interaction debounce) is modeled as deadlines: hosts ask for
//! [`SliderStateMachine::next_deadline`] and call
//! [`SliderStateMachine::poll`] once it passes.  Dropping a controller
//! cancels everything it owns.

pub mod config;
pub mod fullscreen;
pub mod keyboard;
pub mod position;
pub mod slider;
pub mod swipe;
pub mod transform;

pub use config::{CardPosition, PositionPreset, SliderConfig, Spring};
pub use fullscreen::FullscreenController;
pub use keyboard::NavKey;
pub use position::card_position;
pub use slider::{CardDescriptor, DragOffset, SliderStateMachine};
pub use swipe::swipe_target;
pub use transform::{CardTransform, DragState, card_transform};
