//! Platform services implementation.

use blendlab::texture::{PlatformServices, Rgba8Image};
use image::ImageError;
use std::{error::Error, fmt, path::Path};

/// Desktop implementation of the [`PlatformServices`] API.
///
/// Images are read from the file system and flipped so that their first row is the bottom one.
/// They show upright on screen, unlike a direct upload of the decoder’s top-down rows.
#[derive(Debug, Default)]
pub struct DesktopPlatformServices;

#[derive(Debug)]
pub enum DesktopFetchError {
  ImageError(ImageError),
  InvalidSize { width: u32, height: u32 },
}

impl fmt::Display for DesktopFetchError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      DesktopFetchError::ImageError(ref e) => write!(f, "cannot fetch texture: {}", e),
      DesktopFetchError::InvalidSize { width, height } => {
        write!(f, "cannot fetch texture: invalid size {}×{}", width, height)
      }
    }
  }
}

impl Error for DesktopFetchError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      DesktopFetchError::ImageError(e) => Some(e),
      _ => None,
    }
  }
}

impl From<ImageError> for DesktopFetchError {
  fn from(source: ImageError) -> Self {
    Self::ImageError(source)
  }
}

impl PlatformServices for DesktopPlatformServices {
  type FetchError = DesktopFetchError;

  fn fetch_texture(&mut self, path: &Path) -> Result<Rgba8Image, Self::FetchError> {
    let img = image::open(path)?.flipv().to_rgba8();
    let (width, height) = img.dimensions();

    Rgba8Image::new(width, height, img.into_raw())
      .ok_or(DesktopFetchError::InvalidSize { width, height })
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use image::{Rgba, RgbaImage};
  use std::env;

  #[test]
  fn missing_file_is_an_error() {
    let mut platform = DesktopPlatformServices;
    let err = platform
      .fetch_texture(Path::new("does/not/exist.png"))
      .unwrap_err();

    assert!(matches!(err, DesktopFetchError::ImageError(_)));
  }

  #[test]
  fn rows_are_flipped() {
    let path = env::temp_dir().join(format!("blendlab-flip-{}.png", std::process::id()));

    let mut img = RgbaImage::new(1, 2);
    img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
    img.put_pixel(0, 1, Rgba([0, 0, 255, 128]));
    img.save(&path).unwrap();

    let mut platform = DesktopPlatformServices;
    let fetched = platform.fetch_texture(&path);
    std::fs::remove_file(&path).unwrap();

    let fetched = fetched.unwrap();
    assert_eq!((fetched.width(), fetched.height()), (1, 2));
    assert_eq!(fetched.texels(), &[0, 0, 255, 128, 255, 0, 0, 255]);
  }
}
