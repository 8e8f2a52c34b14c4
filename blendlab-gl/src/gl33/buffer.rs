//! OpenGL buffer implementation.

use crate::gl33::state::GLState;
use gl::types::*;
use std::{cell::RefCell, mem, rc::Rc};

/// Static array buffer.
///
/// The data is uploaded once, at creation, and never read back.
#[derive(Debug)]
pub(crate) struct Buffer {
  handle: GLuint,
  len: usize,
  state: Rc<RefCell<GLState>>,
}

impl Drop for Buffer {
  fn drop(&mut self) {
    unsafe {
      self.state.borrow_mut().release_array_buffer(self.handle);
      gl::DeleteBuffers(1, &self.handle);
    }
  }
}

impl Buffer {
  pub(crate) unsafe fn from_slice<T>(state: &Rc<RefCell<GLState>>, data: &[T]) -> Self
  where
    T: Copy,
  {
    let mut handle: GLuint = 0;

    gl::GenBuffers(1, &mut handle);
    state.borrow_mut().bind_array_buffer(handle);

    let bytes = mem::size_of::<T>() * data.len();
    gl::BufferData(
      gl::ARRAY_BUFFER,
      bytes as GLsizeiptr,
      data.as_ptr() as _,
      gl::STATIC_DRAW,
    );

    Buffer {
      handle,
      len: data.len(),
      state: state.clone(),
    }
  }

  pub(crate) fn handle(&self) -> GLuint {
    self.handle
  }

  /// Length of the buffer (number of elements).
  pub(crate) fn len(&self) -> usize {
    self.len
  }
}
