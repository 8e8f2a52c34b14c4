//! 2D textures.

use crate::gl33::state::GLState;
use blendlab::texture::Rgba8Image;
use gl::types::*;
use std::{cell::RefCell, os::raw::c_void, rc::Rc};

/// 2D texture.
///
/// An unconfigured texture owns a texture name without storage. Sampling it yields opaque black, as
/// for any incomplete texture.
#[derive(Debug)]
pub struct Texture {
  pub(crate) handle: GLuint,
  state: Rc<RefCell<GLState>>,
}

impl Drop for Texture {
  fn drop(&mut self) {
    unsafe {
      self.state.borrow_mut().release_texture(self.handle);
      gl::DeleteTextures(1, &self.handle);
    }
  }
}

impl Texture {
  pub(crate) unsafe fn unconfigured(state: &Rc<RefCell<GLState>>) -> Self {
    let mut handle: GLuint = 0;
    gl::GenTextures(1, &mut handle);

    Texture {
      handle,
      state: state.clone(),
    }
  }

  pub(crate) unsafe fn new(state: &Rc<RefCell<GLState>>, image: &Rgba8Image) -> Self {
    let texture = Self::unconfigured(state);

    {
      let mut st = state.borrow_mut();
      st.set_texture_unit(0);
      st.bind_texture(texture.handle);
    }

    gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::NEAREST as GLint);
    gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::NEAREST as GLint);
    gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as GLint);
    gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as GLint);

    // RGBA8 rows are always 4-byte aligned, which is the default unpack alignment
    gl::TexImage2D(
      gl::TEXTURE_2D,
      0,
      gl::RGBA8 as GLint,
      image.width() as GLsizei,
      image.height() as GLsizei,
      0,
      gl::RGBA,
      gl::UNSIGNED_BYTE,
      image.texels().as_ptr() as *const c_void,
    );

    texture
  }
}
