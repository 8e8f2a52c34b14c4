use blendlab::{
  backend::{Backend, Viewport},
  binding::Key,
  blend_state::{BlendState, BlendStateMachine},
  blending::{Equation, Factor},
  compositor::Compositor,
  context::GraphicsContext,
  event_loop::{EventLoop, InputAction, LoopState},
  texture::{PlatformServices, Rgba8Image, TextureSet},
};
use std::{collections::VecDeque, path::Path};

#[derive(Clone, Debug, PartialEq)]
enum Call {
  NewTexture(u32),
  NewUnconfigured(u32),
  Viewport(Viewport),
  Clear([f32; 4]),
  BindQuad,
  Blending(BlendState),
  BindTexture(u32),
  Draw,
  Swap,
}

#[derive(Debug, Default)]
struct RecordingBackend {
  calls: Vec<Call>,
  next_texture: u32,
}

impl RecordingBackend {
  fn next_handle(&mut self) -> u32 {
    self.next_texture += 1;
    self.next_texture
  }
}

impl Backend for RecordingBackend {
  type TextureRepr = u32;

  fn new_texture(&mut self, _: &Rgba8Image) -> u32 {
    let handle = self.next_handle();
    self.calls.push(Call::NewTexture(handle));
    handle
  }

  fn new_unconfigured_texture(&mut self) -> u32 {
    let handle = self.next_handle();
    self.calls.push(Call::NewUnconfigured(handle));
    handle
  }

  fn set_viewport(&mut self, viewport: Viewport) {
    self.calls.push(Call::Viewport(viewport));
  }

  fn clear(&mut self, color: [f32; 4]) {
    self.calls.push(Call::Clear(color));
  }

  fn bind_quad(&mut self) {
    self.calls.push(Call::BindQuad);
  }

  fn set_blending(&mut self, state: &BlendState) {
    self.calls.push(Call::Blending(*state));
  }

  fn bind_texture(&mut self, texture: &u32) {
    self.calls.push(Call::BindTexture(*texture));
  }

  fn draw_quad(&mut self) {
    self.calls.push(Call::Draw);
  }
}

// Hands out one batch of actions per poll, then nothing.
struct ScriptedContext {
  backend: RecordingBackend,
  batches: VecDeque<Vec<InputAction>>,
  polls: usize,
}

impl ScriptedContext {
  fn new(batches: Vec<Vec<InputAction>>) -> Self {
    ScriptedContext {
      backend: RecordingBackend::default(),
      batches: batches.into(),
      polls: 0,
    }
  }

  // calls of each presented frame, starting at its clear
  fn frames(&self) -> Vec<&[Call]> {
    self
      .backend
      .calls
      .split(|call| *call == Call::Swap)
      .filter_map(|calls| {
        calls
          .iter()
          .position(|c| matches!(c, Call::Clear(_)))
          .map(|start| &calls[start..])
      })
      .collect()
  }

  fn swaps(&self) -> usize {
    self.backend.calls.iter().filter(|c| **c == Call::Swap).count()
  }
}

impl GraphicsContext for ScriptedContext {
  type Backend = RecordingBackend;

  fn backend(&mut self) -> &mut RecordingBackend {
    &mut self.backend
  }

  fn poll_actions(&mut self) -> Vec<InputAction> {
    self.polls += 1;
    self.batches.pop_front().unwrap_or_default()
  }

  fn swap_buffers(&mut self) {
    self.backend.calls.push(Call::Swap);
  }
}

// Decodes any path whose name doesn’t start with “broken”.
struct FakePlatform;

impl PlatformServices for FakePlatform {
  type FetchError = String;

  fn fetch_texture(&mut self, path: &Path) -> Result<Rgba8Image, String> {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

    if name.starts_with("broken") {
      Err(format!("{} is not an image", name))
    } else {
      Ok(Rgba8Image::new(1, 1, vec![255, 0, 0, 128]).unwrap())
    }
  }
}

fn key(key: Key) -> InputAction {
  InputAction::KeyPressed {
    key,
    alternate: false,
  }
}

fn shifted(key: Key) -> InputAction {
  InputAction::KeyPressed {
    key,
    alternate: true,
  }
}

fn event_loop() -> EventLoop {
  EventLoop::new(
    BlendStateMachine::default(),
    Compositor::default(),
    Viewport::new(512, 512),
  )
}

fn draws(frame: &[Call]) -> Vec<u32> {
  frame
    .windows(2)
    .filter_map(|pair| match pair {
      [Call::BindTexture(t), Call::Draw] => Some(*t),
      _ => None,
    })
    .collect()
}

#[test]
fn textures_are_drawn_in_argument_order() {
  let mut ctx = ScriptedContext::new(vec![vec![], vec![], vec![InputAction::Quit]]);
  let textures = TextureSet::load(&mut ctx.backend, &mut FakePlatform, &["a.png", "b.png"]);

  assert_eq!(
    ctx.backend.calls,
    vec![Call::NewTexture(1), Call::NewTexture(2)]
  );

  event_loop().run(&mut ctx, &textures);

  let frames = ctx.frames();
  assert_eq!(frames.len(), 3);

  for frame in frames {
    assert_eq!(draws(frame), vec![1, 2]);
  }
}

#[test]
fn blending_is_set_once_per_frame_before_any_draw() {
  let mut ctx = ScriptedContext::new(vec![vec![InputAction::Quit]]);
  let textures = TextureSet::load(
    &mut ctx.backend,
    &mut FakePlatform,
    &["a.png", "b.png", "c.png"],
  );
  ctx.backend.calls.clear();

  event_loop().run(&mut ctx, &textures);

  assert_eq!(
    ctx.backend.calls,
    vec![
      Call::Clear([0., 0., 0., 0.]),
      Call::BindQuad,
      Call::Blending(BlendState::default()),
      Call::BindTexture(1),
      Call::Draw,
      Call::BindTexture(2),
      Call::Draw,
      Call::BindTexture(3),
      Call::Draw,
      Call::Swap,
    ]
  );
}

#[test]
fn broken_image_keeps_its_slot() {
  let mut ctx = ScriptedContext::new(vec![vec![InputAction::Quit]]);
  let textures = TextureSet::load(
    &mut ctx.backend,
    &mut FakePlatform,
    &["a.png", "broken.png", "c.png"],
  );

  assert_eq!(textures.len(), 3);
  assert_eq!(
    ctx.backend.calls,
    vec![
      Call::NewTexture(1),
      Call::NewUnconfigured(2),
      Call::NewTexture(3)
    ]
  );

  event_loop().run(&mut ctx, &textures);

  assert_eq!(draws(ctx.frames()[0]), vec![1, 2, 3]);
}

#[test]
fn zero_textures_clear_and_swap_until_quit() {
  let mut batches = vec![Vec::new(); 9];
  batches.push(vec![InputAction::Quit]);
  let mut ctx = ScriptedContext::new(batches);
  let textures = TextureSet::empty();

  let mut event_loop = event_loop();
  event_loop.run(&mut ctx, &textures);

  assert_eq!(event_loop.state(), LoopState::Terminated);
  assert_eq!(ctx.polls, 10);
  assert_eq!(ctx.swaps(), 10);
  assert!(!ctx.backend.calls.contains(&Call::Draw));
  assert!(!ctx.backend.calls.iter().any(|c| matches!(c, Call::BindTexture(_))));
}

#[test]
fn quit_takes_effect_after_the_frame() {
  let mut ctx = ScriptedContext::new(vec![vec![InputAction::Quit, key(Key::W)]]);
  let textures = TextureSet::empty();
  let mut event_loop = event_loop();

  assert_eq!(event_loop.step(&mut ctx, &textures), LoopState::Terminated);

  // the whole queue is drained and the frame still goes out
  assert_eq!(event_loop.blend_state().src, Factor::One);
  assert_eq!(ctx.swaps(), 1);
  assert_eq!(
    ctx.frames()[0][2],
    Call::Blending(BlendState {
      src: Factor::One,
      ..BlendState::default()
    })
  );
}

#[test]
fn resize_updates_viewport_only() {
  let mut ctx = ScriptedContext::new(vec![
    vec![
      shifted(Key::Q),
      InputAction::Resized {
        width: 300,
        height: 200,
      },
    ],
    vec![],
    vec![InputAction::Quit],
  ]);
  let textures = TextureSet::load(&mut ctx.backend, &mut FakePlatform, &["a.png"]);
  let mut event_loop = event_loop();

  event_loop.step(&mut ctx, &textures);
  let before = *event_loop.blend_state();

  assert_eq!(event_loop.viewport(), Viewport::new(300, 200));
  assert!(ctx
    .backend
    .calls
    .contains(&Call::Viewport(Viewport::new(300, 200))));

  event_loop.run(&mut ctx, &textures);

  assert_eq!(*event_loop.blend_state(), before);
  assert_eq!(event_loop.viewport(), Viewport::new(300, 200));
  assert_eq!(ctx.frames().len(), 3);
}

#[test]
fn keys_drive_the_rendered_blend_state() {
  let mut ctx = ScriptedContext::new(vec![
    vec![key(Key::W)],
    vec![key(Key::X)],
    vec![shifted(Key::I), shifted(Key::B), key(Key::G)],
    vec![InputAction::Quit],
  ]);
  let textures = TextureSet::load(&mut ctx.backend, &mut FakePlatform, &["a.png"]);
  let mut event_loop = event_loop();

  event_loop.run(&mut ctx, &textures);

  let blendings: Vec<_> = ctx
    .frames()
    .iter()
    .map(|frame| frame[2].clone())
    .collect();

  let one = BlendState {
    src: Factor::One,
    ..BlendState::default()
  };
  let one_subtract = BlendState {
    rgb_equation: Equation::Subtract,
    ..one
  };
  let alpha_max = BlendState {
    dst: Factor::SrcAlphaComplement,
    alpha_equation: Equation::Max,
    ..one_subtract
  };

  assert_eq!(
    one_subtract,
    BlendState {
      src: Factor::One,
      dst: Factor::SrcAlphaComplement,
      rgb_equation: Equation::Subtract,
      alpha_equation: Equation::Additive,
    }
  );
  assert_eq!(
    blendings,
    vec![
      Call::Blending(one),
      Call::Blending(one_subtract),
      Call::Blending(alpha_max),
      Call::Blending(alpha_max),
    ]
  );
}

#[test]
fn clear_color_is_configurable() {
  let mut ctx = ScriptedContext::new(vec![vec![InputAction::Quit]]);
  let textures = TextureSet::empty();
  let mut event_loop = EventLoop::new(
    BlendStateMachine::default(),
    Compositor::new([0.2, 0.3, 0.4, 1.]),
    Viewport::new(512, 512),
  );

  event_loop.run(&mut ctx, &textures);

  assert_eq!(ctx.backend.calls[0], Call::Clear([0.2, 0.3, 0.4, 1.]));
}
