//! Graphics context.
//!
//! A graphics context ties a [`Backend`] to the window it renders to: it is where input comes from
//! and where frames are presented.
//!
//! This crate doesn’t provide you with creating such contexts. Instead, platform crates do it.
//!
//! # On context and threads
//!
//! A context is owned by the thread that created it. Polling, state updates and rendering all
//! happen on that thread, one after the other.

use crate::{backend::Backend, event_loop::InputAction};

/// Class of graphics context.
pub trait GraphicsContext {
  type Backend: Backend;

  fn backend(&mut self) -> &mut Self::Backend;

  /// Drain every pending event, without blocking.
  ///
  /// Key presses must carry the modifier state sampled from the live keyboard.
  fn poll_actions(&mut self) -> Vec<InputAction>;

  /// Present the back buffer.
  fn swap_buffers(&mut self);
}
