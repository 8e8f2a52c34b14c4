mod platform;

use blendlab::{
  binding::{Binding, BindingError, KeyBindings, DEFAULT_EQUATION_KEYS, DEFAULT_FACTOR_KEYS},
  blend_state::BlendStateMachine,
  compositor::Compositor,
  context::GraphicsContext as _,
  event_loop::EventLoop,
  texture::TextureSet,
};
use blendlab_sdl2::{GL33Surface, Sdl2SurfaceError, Shading, SurfaceOptions};
use platform::DesktopPlatformServices;
use std::{fmt, path::PathBuf, process, str::FromStr};
use structopt::StructOpt;

const TITLE: &str = "opengl-blend-demo";

#[derive(Debug, StructOpt)]
pub struct CLIOpts {
  #[structopt(long, default_value = "512")]
  /// Initial window width.
  width: u32,

  #[structopt(long, default_value = "512")]
  /// Initial window height.
  height: u32,

  #[structopt(long)]
  /// Don’t synchronize buffer swaps with the display.
  no_vsync: bool,

  #[structopt(long)]
  /// Shade the quad with its texture coordinates instead of sampling textures.
  uv: bool,

  #[structopt(long, default_value = "0,0,0,0")]
  /// Clear color, as r,g,b,a.
  clear_color: ClearColor,

  #[structopt(short, long)]
  /// List key bindings.
  list_bindings: bool,

  #[structopt(parse(from_os_str))]
  /// Images to composite, drawn in order.
  images: Vec<PathBuf>,
}

/// Clear color read from the command line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClearColor([f32; 4]);

#[derive(Debug, Eq, PartialEq)]
pub enum ClearColorError {
  ChannelCount(usize),
  InvalidChannel(String),
}

impl fmt::Display for ClearColorError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      ClearColorError::ChannelCount(n) => write!(f, "expected 4 channels, got {}", n),
      ClearColorError::InvalidChannel(ref c) => write!(f, "invalid channel value: {}", c),
    }
  }
}

impl FromStr for ClearColor {
  type Err = ClearColorError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let channels = s
      .split(',')
      .map(|c| {
        let c = c.trim();
        c.parse::<f32>().map_err(|_| ClearColorError::InvalidChannel(c.to_owned()))
      })
      .collect::<Result<Vec<_>, _>>()?;

    match channels.as_slice() {
      &[r, g, b, a] => Ok(ClearColor([r, g, b, a])),
      _ => Err(ClearColorError::ChannelCount(channels.len())),
    }
  }
}

fn default_bindings() -> Result<KeyBindings, BindingError> {
  KeyBindings::new(
    DEFAULT_FACTOR_KEYS.iter().copied(),
    DEFAULT_EQUATION_KEYS.iter().copied(),
  )
}

// one line per bound key, in key order
fn binding_lines(bindings: &KeyBindings) -> Vec<String> {
  bindings
    .iter()
    .map(|(key, binding)| match binding {
      Binding::Factor(factor) => format!("  {:?}: {} (source / destination factor)", key, factor),
      Binding::Equation(equation) => format!("  {:?}: {} (RGB / alpha equation)", key, equation),
    })
    .collect()
}

fn show_bindings(bindings: &KeyBindings) {
  println!("key bindings (hold left shift for the second target):");

  for line in binding_lines(bindings) {
    println!("{}", line);
  }
}

fn run(cli_opts: CLIOpts, machine: BlendStateMachine) -> Result<(), Sdl2SurfaceError> {
  let options = SurfaceOptions {
    shading: if cli_opts.uv {
      Shading::Uv
    } else {
      Shading::Texture
    },
    vsync: !cli_opts.no_vsync,
  };

  let (width, height) = (cli_opts.width, cli_opts.height);
  let mut surface = GL33Surface::build_with(
    |video| {
      let mut builder = video.window(TITLE, width, height);
      builder.position_centered().resizable();
      builder
    },
    options,
  )?;

  // textures must be dropped before the surface
  let mut platform = DesktopPlatformServices;
  let textures = TextureSet::load(surface.backend(), &mut platform, &cli_opts.images);
  log::info!("{} texture(s) loaded", textures.len());

  let compositor = Compositor::new(cli_opts.clear_color.0);
  log::debug!("clear color: {:?}", compositor.clear_color());

  let mut event_loop = EventLoop::new(machine, compositor, surface.viewport());
  log::info!("initial blending: {}", event_loop.blend_state());

  event_loop.run(&mut surface, &textures);

  Ok(())
}

fn main() {
  env_logger::builder()
    .filter_level(log::LevelFilter::Info)
    .parse_default_env()
    .init();

  let cli_opts = CLIOpts::from_args();
  let machine = match default_bindings() {
    Ok(bindings) => BlendStateMachine::new(bindings),
    Err(e) => {
      log::error!("invalid key bindings: {}", e);
      process::exit(1);
    }
  };

  if cli_opts.list_bindings {
    show_bindings(machine.bindings());
    return;
  }

  if let Err(e) = run(cli_opts, machine) {
    log::error!("{}", e);
    process::exit(1);
  }
}
