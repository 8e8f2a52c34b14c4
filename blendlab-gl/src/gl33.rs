//! OpenGL 3.3 backend.
//!
//! This module implements an OpenGL 3.3 backend for blendlab. The backend type is [`GL33`].

mod buffer;
mod debug;
mod quad;
mod shader;
mod state;
mod texture;

pub use self::shader::{ProgramError, Shading, StageError, StageType};
pub use self::state::GLStateError;
pub use self::texture::Texture;

use self::{
  quad::Quad,
  shader::Program,
  state::GLState,
};
use blendlab::{
  backend::{Backend, Viewport},
  blend_state::BlendState,
  texture::Rgba8Image,
};
use std::{cell::RefCell, error, fmt, rc::Rc};

/// Error that can be risen while creating the backend.
#[non_exhaustive]
#[derive(Debug)]
pub enum GL33Error {
  /// The graphics state is already taken on this thread.
  GraphicsStateError(GLStateError),
  /// The shader program cannot be built.
  ProgramError(ProgramError),
}

impl fmt::Display for GL33Error {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      GL33Error::GraphicsStateError(ref e) => write!(f, "failed to get graphics state: {}", e),
      GL33Error::ProgramError(ref e) => write!(f, "failed to build shader program: {}", e),
    }
  }
}

impl error::Error for GL33Error {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      GL33Error::GraphicsStateError(e) => Some(e),
      GL33Error::ProgramError(e) => Some(e),
    }
  }
}

impl From<GLStateError> for GL33Error {
  fn from(e: GLStateError) -> Self {
    GL33Error::GraphicsStateError(e)
  }
}

impl From<ProgramError> for GL33Error {
  fn from(e: ProgramError) -> Self {
    GL33Error::ProgramError(e)
  }
}

/// An OpenGL 3.3 backend.
///
/// It owns the shading program and the quad geometry; both are created once and kept bound to the
/// context for the backend lifetime.
#[derive(Debug)]
pub struct GL33 {
  // declaration order is drop order: GL objects go before the state they reference
  quad: Quad,
  program: Program,
  state: Rc<RefCell<GLState>>,
}

impl GL33 {
  /// Create a new OpenGL 3.3 backend.
  ///
  /// The OpenGL function pointers must be loaded and a context current. Blending is enabled and
  /// depth testing disabled for the backend lifetime.
  pub fn new(shading: Shading) -> Result<Self, GL33Error> {
    if !debug::install_debug_callback() {
      log::debug!("debug output unavailable");
    }

    let state = Rc::new(RefCell::new(GLState::new()?));

    unsafe {
      let program = Program::new(shading)?;
      let quad = Quad::new(&state);

      state.borrow_mut().use_program(program.handle);
      gl::Disable(gl::DEPTH_TEST);
      gl::Enable(gl::BLEND);

      log::debug!("OpenGL 3.3 backend ready ({:?} shading)", shading);

      Ok(GL33 {
        quad,
        program,
        state,
      })
    }
  }
}

impl Backend for GL33 {
  type TextureRepr = Texture;

  fn new_texture(&mut self, image: &Rgba8Image) -> Texture {
    unsafe { Texture::new(&self.state, image) }
  }

  fn new_unconfigured_texture(&mut self) -> Texture {
    unsafe { Texture::unconfigured(&self.state) }
  }

  fn set_viewport(&mut self, viewport: Viewport) {
    unsafe {
      self.state.borrow_mut().set_viewport(viewport);
    }
  }

  fn clear(&mut self, color: [f32; 4]) {
    unsafe {
      self.state.borrow_mut().set_clear_color(color);
      gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
    }
  }

  fn bind_quad(&mut self) {
    unsafe {
      self.state.borrow_mut().use_program(self.program.handle);
      self.quad.bind();
    }
  }

  fn set_blending(&mut self, blend: &BlendState) {
    unsafe {
      self.state.borrow_mut().set_blending(blend);
    }
  }

  fn bind_texture(&mut self, texture: &Texture) {
    let mut state = self.state.borrow_mut();

    unsafe {
      state.set_texture_unit(0);
      state.bind_texture(texture.handle);
    }
  }

  fn draw_quad(&mut self) {
    unsafe { self.quad.draw() }
  }
}
