//! [SDL2](https://crates.io/crates/sdl2) surface for blendlab.
//!
//! The surface owns the window, its OpenGL 3.3 Core context and the [`GL33`] backend, and turns
//! SDL2 events into [`InputAction`]s.

#![deny(missing_docs)]

pub mod events;

use blendlab::{backend::Viewport, context::GraphicsContext, event_loop::InputAction};
pub use blendlab_gl::{GL33Error, Shading};
use blendlab_gl::GL33;
pub use sdl2;
use sdl2::{event::Event, keyboard::Scancode, video::SwapInterval};
use std::{error, fmt, os::raw::c_void};

/// Error that can be risen while creating a surface.
#[non_exhaustive]
#[derive(Debug)]
pub enum Sdl2SurfaceError {
  /// Initialization of the surface went wrong.
  InitError(String),
  /// Window creation failed.
  WindowCreationFailed(sdl2::video::WindowBuildError),
  /// Failed to create an OpenGL context.
  GlContextInitFailed(String),
  /// No available video mode.
  VideoInitError(String),
  /// The OpenGL backend cannot be created.
  BackendError(GL33Error),
}

impl fmt::Display for Sdl2SurfaceError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      Sdl2SurfaceError::InitError(ref e) => write!(f, "initialization error: {}", e),
      Sdl2SurfaceError::WindowCreationFailed(ref e) => write!(f, "failed to create window: {}", e),
      Sdl2SurfaceError::GlContextInitFailed(ref e) => {
        write!(f, "failed to create OpenGL context: {}", e)
      }
      Sdl2SurfaceError::VideoInitError(ref e) => {
        write!(f, "failed to initialize video system: {}", e)
      }
      Sdl2SurfaceError::BackendError(ref e) => write!(f, "failed to create backend: {}", e),
    }
  }
}

impl error::Error for Sdl2SurfaceError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      Sdl2SurfaceError::WindowCreationFailed(e) => Some(e),
      Sdl2SurfaceError::BackendError(e) => Some(e),
      _ => None,
    }
  }
}

impl From<GL33Error> for Sdl2SurfaceError {
  fn from(e: GL33Error) -> Self {
    Sdl2SurfaceError::BackendError(e)
  }
}

/// Surface options.
#[derive(Clone, Copy, Debug)]
pub struct SurfaceOptions {
  /// Fragment shading of the quad.
  pub shading: Shading,
  /// Try to synchronize buffer swaps with the display refresh.
  pub vsync: bool,
}

impl Default for SurfaceOptions {
  fn default() -> Self {
    SurfaceOptions {
      shading: Shading::default(),
      vsync: true,
    }
  }
}

/// A blendlab [`GraphicsContext`] backed by SDL2 and OpenGL 3.3 Core.
///
/// ```ignore
/// use blendlab_sdl2::{GL33Surface, SurfaceOptions};
///
/// let surface = GL33Surface::build_with(
///   |video| video.window("My app", 800, 600),
///   SurfaceOptions::default(),
/// )
/// .expect("failed to create surface");
/// ```
pub struct GL33Surface {
  // the backend must go before the context it was created with
  gl: GL33,
  _gl_context: sdl2::video::GLContext,
  event_pump: sdl2::EventPump,
  window: sdl2::video::Window,
  sdl: sdl2::Sdl,
}

impl GL33Surface {
  /// Create a new [`GL33Surface`] from a [`sdl2::video::WindowBuilder`].
  ///
  /// The callback is passed a reference to [`sdl2::VideoSubsystem`]. The OpenGL attributes are
  /// already set when it runs: core profile 3.3 with the debug and forward-compatible flags, a
  /// double-buffered RGBA8 color buffer, 24-bit depth and 8-bit stencil.
  ///
  /// Failing to enable vsync is not fatal.
  pub fn build_with<WB>(
    window_builder: WB,
    options: SurfaceOptions,
  ) -> Result<Self, Sdl2SurfaceError>
  where
    WB: FnOnce(&sdl2::VideoSubsystem) -> sdl2::video::WindowBuilder,
  {
    let sdl = sdl2::init().map_err(Sdl2SurfaceError::InitError)?;

    let video_system = sdl.video().map_err(Sdl2SurfaceError::VideoInitError)?;

    let gl_attr = video_system.gl_attr();

    gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
    gl_attr.set_context_flags().debug().forward_compatible().set();
    gl_attr.set_context_major_version(3);
    gl_attr.set_context_minor_version(3);
    gl_attr.set_double_buffer(true);
    gl_attr.set_red_size(8);
    gl_attr.set_green_size(8);
    gl_attr.set_blue_size(8);
    gl_attr.set_alpha_size(8);
    gl_attr.set_depth_size(24);
    gl_attr.set_stencil_size(8);

    let window = window_builder(&video_system)
      .opengl()
      .build()
      .map_err(Sdl2SurfaceError::WindowCreationFailed)?;

    let _gl_context = window
      .gl_create_context()
      .map_err(Sdl2SurfaceError::GlContextInitFailed)?;

    gl::load_with(|s| video_system.gl_get_proc_address(s) as *const c_void);

    if options.vsync {
      if let Err(e) = video_system.gl_set_swap_interval(SwapInterval::VSync) {
        log::warn!("cannot enable vsync: {}", e);
      }
    }

    let gl = GL33::new(options.shading)?;
    let event_pump = sdl.event_pump().map_err(Sdl2SurfaceError::InitError)?;

    log::info!(
      "created {}×{} window “{}”",
      window.size().0,
      window.size().1,
      window.title()
    );

    let surface = GL33Surface {
      gl,
      _gl_context,
      event_pump,
      window,
      sdl,
    };

    Ok(surface)
  }

  /// The entry point to most of the SDL2 API.
  pub fn sdl(&self) -> &sdl2::Sdl {
    &self.sdl
  }

  /// Borrow the underlying SDL2 window of this surface.
  pub fn window(&self) -> &sdl2::video::Window {
    &self.window
  }

  /// Current drawable area of the window, in pixels.
  pub fn viewport(&self) -> Viewport {
    let (width, height) = self.window.drawable_size();
    Viewport::new(width, height)
  }
}

impl GraphicsContext for GL33Surface {
  type Backend = GL33;

  fn backend(&mut self) -> &mut Self::Backend {
    &mut self.gl
  }

  fn poll_actions(&mut self) -> Vec<InputAction> {
    let events: Vec<Event> = self.event_pump.poll_iter().collect();
    let event_pump = &self.event_pump;

    events
      .into_iter()
      .filter_map(|event| {
        events::adapt_event(event, || {
          event_pump
            .keyboard_state()
            .is_scancode_pressed(Scancode::LShift)
        })
      })
      .collect()
  }

  fn swap_buffers(&mut self) {
    self.window.gl_swap_window();
  }
}
