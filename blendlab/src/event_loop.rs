//! Event dispatch and the main loop.

use crate::{
  backend::{Backend, Viewport},
  binding::Key,
  blend_state::{BlendState, BlendStateMachine},
  compositor::Compositor,
  context::GraphicsContext,
  texture::TextureSet,
};

/// A type used to pass “inputs” to the loop.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InputAction {
  /// Quit the application (window closed or OS quit request).
  Quit,

  /// A key was pressed.
  ///
  /// `alternate` is whether the modifier key was held at the time of the press.
  KeyPressed { key: Key, alternate: bool },

  /// Window size changed.
  Resized { width: u32, height: u32 },
}

#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum LoopState {
  Running,
  /// Terminal state.
  Terminated,
}

/// Main loop.
///
/// Owns the blend state machine and the viewport for the lifetime of the program.
#[derive(Debug)]
pub struct EventLoop {
  machine: BlendStateMachine,
  compositor: Compositor,
  viewport: Viewport,
  state: LoopState,
}

impl EventLoop {
  pub fn new(machine: BlendStateMachine, compositor: Compositor, viewport: Viewport) -> Self {
    EventLoop {
      machine,
      compositor,
      viewport,
      state: LoopState::Running,
    }
  }

  pub fn blend_state(&self) -> &BlendState {
    self.machine.state()
  }

  pub fn viewport(&self) -> Viewport {
    self.viewport
  }

  pub fn state(&self) -> LoopState {
    self.state
  }

  /// Handle a single input action.
  pub fn dispatch<B>(&mut self, action: InputAction, backend: &mut B) -> LoopState
  where
    B: Backend,
  {
    match action {
      InputAction::Quit => {
        log::debug!("quit requested");
        self.state = LoopState::Terminated;
      }

      InputAction::KeyPressed { key, alternate } => {
        if let Some(change) = self.machine.key_pressed(key, alternate) {
          log::info!("{}: {}", change, self.machine.state());
        }
      }

      InputAction::Resized { width, height } => {
        log::debug!("resized to {}×{}", width, height);
        self.viewport = Viewport::new(width, height);
        backend.set_viewport(self.viewport);
      }
    }

    self.state
  }

  /// Run one iteration: drain and dispatch every pending action, then render and present a frame.
  ///
  /// A quit request is honored once the frame is presented.
  pub fn step<C>(
    &mut self,
    context: &mut C,
    textures: &TextureSet<<C::Backend as Backend>::TextureRepr>,
  ) -> LoopState
  where
    C: GraphicsContext,
  {
    for action in context.poll_actions() {
      self.dispatch(action, context.backend());
    }

    self
      .compositor
      .present(context, self.machine.state(), textures);

    self.state
  }

  /// Loop until quit.
  pub fn run<C>(
    &mut self,
    context: &mut C,
    textures: &TextureSet<<C::Backend as Backend>::TextureRepr>,
  ) where
    C: GraphicsContext,
  {
    while self.state == LoopState::Running {
      self.step(context, textures);
    }
  }
}
