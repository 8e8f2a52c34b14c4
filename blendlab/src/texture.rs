//! Textures to composite.
//!
//! Images are decoded by the platform (see [`PlatformServices`]) and uploaded by the
//! [`Backend`]. The resulting [`TextureSet`] keeps the order of the input paths, which is also the
//! drawing order.

use crate::backend::Backend;
use std::{fmt, path::Path, slice};

/// Decoded image, 8-bit RGBA, rows stored bottom to top.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rgba8Image {
  width: u32,
  height: u32,
  texels: Vec<u8>,
}

impl Rgba8Image {
  /// Wrap raw texels.
  ///
  /// Returns `None` if `texels` doesn’t hold exactly `width * height` RGBA texels.
  pub fn new(width: u32, height: u32, texels: Vec<u8>) -> Option<Self> {
    let expected = (width as usize)
      .checked_mul(height as usize)?
      .checked_mul(4)?;

    if texels.len() == expected {
      Some(Rgba8Image {
        width,
        height,
        texels,
      })
    } else {
      None
    }
  }

  pub fn width(&self) -> u32 {
    self.width
  }

  pub fn height(&self) -> u32 {
    self.height
  }

  pub fn texels(&self) -> &[u8] {
    &self.texels
  }
}

/// Platform-specific services.
///
/// Decoding images is the only one so far.
pub trait PlatformServices {
  type FetchError: fmt::Display;

  /// Decode the image at `path`.
  fn fetch_texture(&mut self, path: &Path) -> Result<Rgba8Image, Self::FetchError>;
}

/// Ordered set of textures, one per input path.
#[derive(Debug)]
pub struct TextureSet<T> {
  textures: Vec<T>,
}

impl<T> TextureSet<T> {
  /// A set without any texture.
  pub fn empty() -> Self {
    TextureSet {
      textures: Vec::new(),
    }
  }

  /// Fetch and upload every image in order.
  ///
  /// An image that fails to decode doesn’t abort loading: its slot gets an unconfigured texture,
  /// which is still drawn.
  pub fn load<B, P, I>(backend: &mut B, platform: &mut P, paths: I) -> Self
  where
    B: Backend<TextureRepr = T>,
    P: PlatformServices,
    I: IntoIterator,
    I::Item: AsRef<Path>,
  {
    let textures = paths
      .into_iter()
      .map(|path| {
        let path = path.as_ref();

        match platform.fetch_texture(path) {
          Ok(image) => {
            log::debug!(
              "uploading {} ({}×{})",
              path.display(),
              image.width(),
              image.height()
            );
            backend.new_texture(&image)
          }

          Err(e) => {
            log::warn!("cannot load {}: {}", path.display(), e);
            backend.new_unconfigured_texture()
          }
        }
      })
      .collect();

    TextureSet { textures }
  }

  pub fn len(&self) -> usize {
    self.textures.len()
  }

  pub fn is_empty(&self) -> bool {
    self.textures.is_empty()
  }

  /// Iterate in drawing order.
  pub fn iter(&self) -> slice::Iter<T> {
    self.textures.iter()
  }
}

impl<'a, T> IntoIterator for &'a TextureSet<T> {
  type Item = &'a T;
  type IntoIter = slice::Iter<'a, T>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn image_size_must_match_texels() {
    assert!(Rgba8Image::new(2, 2, vec![0; 16]).is_some());
    assert!(Rgba8Image::new(2, 2, vec![0; 12]).is_none());
    assert!(Rgba8Image::new(0, 0, Vec::new()).is_some());
  }
}
