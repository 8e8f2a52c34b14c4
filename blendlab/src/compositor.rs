//! Per-frame compositing.
//!
//! A frame is cleared, then every texture is drawn over the whole viewport in load order. The
//! blending configuration is set once, before the first draw: every layer of the frame is
//! composited under the same law, against the clear color and the layers drawn before it.

use crate::{
  backend::Backend, blend_state::BlendState, context::GraphicsContext, texture::TextureSet,
};

/// Clear color used when none is configured, which is the OpenGL default.
pub const DEFAULT_CLEAR_COLOR: [f32; 4] = [0., 0., 0., 0.];

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Compositor {
  clear_color: [f32; 4],
}

impl Compositor {
  pub fn new(clear_color: [f32; 4]) -> Self {
    Compositor { clear_color }
  }

  pub fn clear_color(&self) -> [f32; 4] {
    self.clear_color
  }

  /// Issue the draw calls of a frame.
  pub fn render_frame<B>(
    &self,
    backend: &mut B,
    state: &BlendState,
    textures: &TextureSet<B::TextureRepr>,
  ) where
    B: Backend,
  {
    backend.clear(self.clear_color);
    backend.bind_quad();
    backend.set_blending(state);

    for texture in textures {
      backend.bind_texture(texture);
      backend.draw_quad();
    }
  }

  /// Render a frame and present it.
  ///
  /// Swapping buffers may block until the next vertical blank.
  pub fn present<C>(
    &self,
    context: &mut C,
    state: &BlendState,
    textures: &TextureSet<<C::Backend as Backend>::TextureRepr>,
  ) where
    C: GraphicsContext,
  {
    self.render_frame(context.backend(), state, textures);
    context.swap_buffers();
  }
}

impl Default for Compositor {
  fn default() -> Self {
    Compositor::new(DEFAULT_CLEAR_COLOR)
  }
}
