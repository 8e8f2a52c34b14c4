//! Cached OpenGL state.
//!
//! Every setter remembers the last value it sent to the driver and skips the call when asked for
//! the same value again. Caches start unknown: nothing is read back from the context, and the first
//! call of each setter always goes through.

use blendlab::{
  backend::Viewport,
  blend_state::BlendState,
  blending::{Equation, Factor},
};
use gl::types::*;
use std::{cell::Cell, error, fmt, marker::PhantomData};

thread_local!(static CONTEXT_LOCKED: Cell<bool> = Cell::new(false));

/// Exclusive right to drive the OpenGL context current on this thread.
///
/// Two caches over the same context would each believe their own view of it, so only one lock can
/// be alive per thread. It is released on drop.
#[derive(Debug)]
struct ContextLock {
  _not_send: PhantomData<*const ()>,
}

impl ContextLock {
  fn acquire() -> Result<Self, GLStateError> {
    CONTEXT_LOCKED.with(|locked| {
      if locked.replace(true) {
        Err(GLStateError::AlreadyAcquired)
      } else {
        Ok(ContextLock {
          _not_send: PhantomData,
        })
      }
    })
  }
}

impl Drop for ContextLock {
  fn drop(&mut self) {
    CONTEXT_LOCKED.with(|locked| locked.set(false));
  }
}

/// Last value sent to the driver, if any.
#[derive(Debug)]
struct Cached<T>(Option<T>);

impl<T> Cached<T>
where
  T: PartialEq,
{
  fn unknown() -> Self {
    Cached(None)
  }

  /// Run `apply` with `value` unless `value` is what was sent last.
  fn update(&mut self, value: T, apply: impl FnOnce(&T)) {
    if self.0.as_ref() != Some(&value) {
      apply(&value);
      self.0 = Some(value);
    }
  }

  fn holds(&self, value: &T) -> bool {
    self.0.as_ref() == Some(value)
  }

  fn forget(&mut self) {
    self.0 = None;
  }
}

/// Blending function and equations, cached apart so that changing one doesn’t resend the other.
#[derive(Debug)]
struct BlendCache {
  funcs: Cached<(Factor, Factor)>,
  equations: Cached<(Equation, Equation)>,
}

impl BlendCache {
  fn unknown() -> Self {
    BlendCache {
      funcs: Cached::unknown(),
      equations: Cached::unknown(),
    }
  }

  fn update(
    &mut self,
    blend: &BlendState,
    set_funcs: impl FnOnce(Factor, Factor),
    set_equations: impl FnOnce(Equation, Equation),
  ) {
    self
      .funcs
      .update((blend.src, blend.dst), |&(src, dst)| set_funcs(src, dst));
    self
      .equations
      .update((blend.rgb_equation, blend.alpha_equation), |&(rgb, alpha)| {
        set_equations(rgb, alpha)
      });
  }
}

/// The graphics state.
///
/// Holds what the backend last told the context: viewport, clear color, blending, and the
/// texture, buffer, vertex array and program bindings. Deleting a bound object makes the context
/// fall back to 0, so the matching `release_*` method only forgets the cached handle.
#[derive(Debug)]
pub(crate) struct GLState {
  _lock: ContextLock,
  viewport: Cached<Viewport>,
  clear_color: Cached<[GLfloat; 4]>,
  blending: BlendCache,
  texture_unit: Cached<GLuint>,
  texture: Cached<GLuint>,
  array_buffer: Cached<GLuint>,
  vertex_array: Cached<GLuint>,
  program: Cached<GLuint>,
}

impl GLState {
  /// Take the state of the current thread’s context.
  ///
  /// Fails if another `GLState` is alive on this thread.
  pub(crate) fn new() -> Result<Self, GLStateError> {
    Ok(GLState {
      _lock: ContextLock::acquire()?,
      viewport: Cached::unknown(),
      clear_color: Cached::unknown(),
      blending: BlendCache::unknown(),
      texture_unit: Cached::unknown(),
      texture: Cached::unknown(),
      array_buffer: Cached::unknown(),
      vertex_array: Cached::unknown(),
      program: Cached::unknown(),
    })
  }

  pub(crate) unsafe fn set_viewport(&mut self, viewport: Viewport) {
    self.viewport.update(viewport, |vp| {
      gl::Viewport(0, 0, vp.width as GLsizei, vp.height as GLsizei)
    });
  }

  pub(crate) unsafe fn set_clear_color(&mut self, color: [GLfloat; 4]) {
    self
      .clear_color
      .update(color, |&[r, g, b, a]| gl::ClearColor(r, g, b, a));
  }

  /// Set the blending factors, shared by color and alpha, and the separate equations.
  pub(crate) unsafe fn set_blending(&mut self, blend: &BlendState) {
    self.blending.update(
      blend,
      |src, dst| gl::BlendFunc(gl_factor(src), gl_factor(dst)),
      |rgb, alpha| gl::BlendEquationSeparate(gl_equation(rgb), gl_equation(alpha)),
    );
  }

  pub(crate) unsafe fn set_texture_unit(&mut self, unit: GLuint) {
    self
      .texture_unit
      .update(unit, |&unit| gl::ActiveTexture(gl::TEXTURE0 + unit));
  }

  /// Bind a 2D texture on the current texture unit.
  pub(crate) unsafe fn bind_texture(&mut self, handle: GLuint) {
    self
      .texture
      .update(handle, |&handle| gl::BindTexture(gl::TEXTURE_2D, handle));
  }

  pub(crate) fn release_texture(&mut self, handle: GLuint) {
    if self.texture.holds(&handle) {
      self.texture.forget();
    }
  }

  pub(crate) unsafe fn bind_array_buffer(&mut self, handle: GLuint) {
    self
      .array_buffer
      .update(handle, |&handle| gl::BindBuffer(gl::ARRAY_BUFFER, handle));
  }

  pub(crate) fn release_array_buffer(&mut self, handle: GLuint) {
    if self.array_buffer.holds(&handle) {
      self.array_buffer.forget();
    }
  }

  pub(crate) unsafe fn bind_vertex_array(&mut self, handle: GLuint) {
    self
      .vertex_array
      .update(handle, |&handle| gl::BindVertexArray(handle));
  }

  pub(crate) fn release_vertex_array(&mut self, handle: GLuint) {
    if self.vertex_array.holds(&handle) {
      self.vertex_array.forget();
    }
  }

  pub(crate) unsafe fn use_program(&mut self, handle: GLuint) {
    self.program.update(handle, |&handle| gl::UseProgram(handle));
  }
}

fn gl_equation(equation: Equation) -> GLenum {
  match equation {
    Equation::Additive => gl::FUNC_ADD,
    Equation::Subtract => gl::FUNC_SUBTRACT,
    Equation::ReverseSubtract => gl::FUNC_REVERSE_SUBTRACT,
    Equation::Min => gl::MIN,
    Equation::Max => gl::MAX,
  }
}

fn gl_factor(factor: Factor) -> GLenum {
  match factor {
    Factor::Zero => gl::ZERO,
    Factor::One => gl::ONE,
    Factor::SrcColor => gl::SRC_COLOR,
    Factor::SrcColorComplement => gl::ONE_MINUS_SRC_COLOR,
    Factor::DestColor => gl::DST_COLOR,
    Factor::DestColorComplement => gl::ONE_MINUS_DST_COLOR,
    Factor::SrcAlpha => gl::SRC_ALPHA,
    Factor::SrcAlphaComplement => gl::ONE_MINUS_SRC_ALPHA,
    Factor::DstAlpha => gl::DST_ALPHA,
    Factor::DstAlphaComplement => gl::ONE_MINUS_DST_ALPHA,
    Factor::ConstantColor => gl::CONSTANT_COLOR,
    Factor::ConstantColorComplement => gl::ONE_MINUS_CONSTANT_COLOR,
    Factor::ConstantAlpha => gl::CONSTANT_ALPHA,
    Factor::ConstantAlphaComplement => gl::ONE_MINUS_CONSTANT_ALPHA,
  }
}

/// Error that can be risen while taking the graphics state.
#[non_exhaustive]
#[derive(Debug, Eq, PartialEq)]
pub enum GLStateError {
  /// Another backend already drives the OpenGL context of this thread.
  AlreadyAcquired,
}

impl fmt::Display for GLStateError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      GLStateError::AlreadyAcquired => {
        f.write_str("graphics state already acquired on this thread")
      }
    }
  }
}

impl error::Error for GLStateError {}
