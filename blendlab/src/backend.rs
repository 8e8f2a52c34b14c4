//! Backend interface.
//!
//! A backend owns the GPU side of the tool: the shading program, the shared quad geometry and the
//! textures. The [`Compositor`](crate::compositor::Compositor) only ever talks to the GPU through
//! this trait, which keeps the frame structure independent of the graphics API.

use crate::{blend_state::BlendState, texture::Rgba8Image};

/// Pixel mapping of the rendering surface.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct Viewport {
  pub width: u32,
  pub height: u32,
}

impl Viewport {
  pub fn new(width: u32, height: u32) -> Self {
    Viewport { width, height }
  }
}

/// GPU operations needed to composite textured quads.
///
/// None of these operations can fail once the backend exists: a backend that cannot be created
/// reports it at construction time, which is fatal.
pub trait Backend {
  /// Backend representation of a texture.
  type TextureRepr;

  /// Upload an image as a 2D texture, with nearest filtering and clamp-to-edge wrapping.
  fn new_texture(&mut self, image: &Rgba8Image) -> Self::TextureRepr;

  /// Allocate a texture handle without any storage.
  ///
  /// Such a texture can still be bound and drawn; what it samples to is up to the backend.
  fn new_unconfigured_texture(&mut self) -> Self::TextureRepr;

  /// Remap normalized device coordinates to a new pixel area.
  fn set_viewport(&mut self, viewport: Viewport);

  /// Clear the color and depth buffers.
  fn clear(&mut self, color: [f32; 4]);

  /// Bind the position and UV attributes of the shared quad.
  fn bind_quad(&mut self);

  /// Set the blending function and the separate blending equations.
  fn set_blending(&mut self, state: &BlendState);

  fn bind_texture(&mut self, texture: &Self::TextureRepr);

  /// Draw the shared quad as a 4-vertex triangle strip.
  fn draw_quad(&mut self);
}
