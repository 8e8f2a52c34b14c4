//! Shared full-viewport quad.

use crate::gl33::{
  buffer::Buffer,
  shader::{POSITION_ATTRIB, UV_ATTRIB},
  state::GLState,
};
use gl::types::*;
use std::{cell::RefCell, ptr, rc::Rc};

// triangle strip order: bottom left, bottom right, top left, top right
const POSITIONS: [[f32; 2]; 4] = [[-1., -1.], [1., -1.], [-1., 1.], [1., 1.]];
const UVS: [[f32; 2]; 4] = [[0., 0.], [1., 0.], [0., 1.], [1., 1.]];

/// Unit quad covering normalized device coordinates, with texture coordinates.
///
/// Positions and UVs live in two separate buffers.
#[derive(Debug)]
pub(crate) struct Quad {
  vao: GLuint,
  positions: Buffer,
  uvs: Buffer,
  state: Rc<RefCell<GLState>>,
}

impl Drop for Quad {
  fn drop(&mut self) {
    unsafe {
      self.state.borrow_mut().release_vertex_array(self.vao);
      gl::DeleteVertexArrays(1, &self.vao);
    }
  }
}

impl Quad {
  pub(crate) unsafe fn new(state: &Rc<RefCell<GLState>>) -> Self {
    let mut vao: GLuint = 0;

    gl::GenVertexArrays(1, &mut vao);
    state.borrow_mut().bind_vertex_array(vao);

    let positions = Buffer::from_slice(state, &POSITIONS);
    let uvs = Buffer::from_slice(state, &UVS);

    Quad {
      vao,
      positions,
      uvs,
      state: state.clone(),
    }
  }

  /// Bind the vertex array and point both attributes at their buffers.
  pub(crate) unsafe fn bind(&self) {
    let mut state = self.state.borrow_mut();

    state.bind_vertex_array(self.vao);

    gl::EnableVertexAttribArray(POSITION_ATTRIB);
    gl::EnableVertexAttribArray(UV_ATTRIB);

    state.bind_array_buffer(self.positions.handle());
    gl::VertexAttribPointer(POSITION_ATTRIB, 2, gl::FLOAT, gl::FALSE, 0, ptr::null());

    state.bind_array_buffer(self.uvs.handle());
    gl::VertexAttribPointer(UV_ATTRIB, 2, gl::FLOAT, gl::FALSE, 0, ptr::null());
  }

  /// Draw the quad with whatever program and texture are current.
  pub(crate) unsafe fn draw(&self) {
    gl::DrawArrays(gl::TRIANGLE_STRIP, 0, self.positions.len() as GLsizei);
  }
}
