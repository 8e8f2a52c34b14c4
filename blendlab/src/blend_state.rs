//! Blend state and the state machine driving it from key presses.

use crate::{
  binding::{Binding, Key, KeyBindings},
  blending::{Equation, Factor},
};
use std::fmt;

/// Frame-global blending configuration.
///
/// Factors apply to both the color and the alpha channels; equations are split between the two.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct BlendState {
  pub src: Factor,
  pub dst: Factor,
  pub rgb_equation: Equation,
  pub alpha_equation: Equation,
}

impl Default for BlendState {
  /// Regular alpha blending.
  ///
  ///   - `src`: `Factor::SrcAlpha`
  ///   - `dst`: `Factor::SrcAlphaComplement`
  ///   - `rgb_equation`: `Equation::Additive`
  ///   - `alpha_equation`: `Equation::Additive`
  fn default() -> Self {
    BlendState {
      src: Factor::SrcAlpha,
      dst: Factor::SrcAlphaComplement,
      rgb_equation: Equation::Additive,
      alpha_equation: Equation::Additive,
    }
  }
}

impl fmt::Display for BlendState {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(
      f,
      "func({}, {}) equation({}, {})",
      self.src, self.dst, self.rgb_equation, self.alpha_equation
    )
  }
}

/// A single-field update of a [`BlendState`].
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum BlendChange {
  Src(Factor),
  Dst(Factor),
  RgbEquation(Equation),
  AlphaEquation(Equation),
}

impl BlendChange {
  /// Pick the field a binding updates.
  ///
  /// Without the alternate modifier a factor goes to the source side and an equation to the color
  /// channels; with it, to the destination side and the alpha channel.
  pub fn select(binding: Binding, alternate: bool) -> Self {
    match (binding, alternate) {
      (Binding::Factor(factor), false) => BlendChange::Src(factor),
      (Binding::Factor(factor), true) => BlendChange::Dst(factor),
      (Binding::Equation(equation), false) => BlendChange::RgbEquation(equation),
      (Binding::Equation(equation), true) => BlendChange::AlphaEquation(equation),
    }
  }

  /// Replace the matching field of `state`.
  pub fn apply(self, state: &mut BlendState) {
    match self {
      BlendChange::Src(factor) => state.src = factor,
      BlendChange::Dst(factor) => state.dst = factor,
      BlendChange::RgbEquation(equation) => state.rgb_equation = equation,
      BlendChange::AlphaEquation(equation) => state.alpha_equation = equation,
    }
  }
}

impl fmt::Display for BlendChange {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      BlendChange::Src(factor) => write!(f, "source factor = {}", factor),
      BlendChange::Dst(factor) => write!(f, "destination factor = {}", factor),
      BlendChange::RgbEquation(equation) => write!(f, "RGB equation = {}", equation),
      BlendChange::AlphaEquation(equation) => write!(f, "alpha equation = {}", equation),
    }
  }
}

/// Maps key presses to blend state updates.
#[derive(Clone, Debug)]
pub struct BlendStateMachine {
  bindings: KeyBindings,
  state: BlendState,
}

impl BlendStateMachine {
  /// Start from the default blend state.
  pub fn new(bindings: KeyBindings) -> Self {
    BlendStateMachine {
      bindings,
      state: BlendState::default(),
    }
  }

  /// Current blend state.
  pub fn state(&self) -> &BlendState {
    &self.state
  }

  /// Bindings the machine looks keys up in.
  pub fn bindings(&self) -> &KeyBindings {
    &self.bindings
  }

  /// Feed a key press.
  ///
  /// `alternate` is whether the modifier key is held at the time of the press. Unbound keys leave
  /// the state untouched and return `None`.
  pub fn key_pressed(&mut self, key: Key, alternate: bool) -> Option<BlendChange> {
    let change = BlendChange::select(self.bindings.lookup(key)?, alternate);
    change.apply(&mut self.state);
    Some(change)
  }
}

impl Default for BlendStateMachine {
  fn default() -> Self {
    Self::new(KeyBindings::default())
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn startup_default() {
    let machine = BlendStateMachine::default();

    assert_eq!(
      *machine.state(),
      BlendState {
        src: Factor::SrcAlpha,
        dst: Factor::SrcAlphaComplement,
        rgb_equation: Equation::Additive,
        alpha_equation: Equation::Additive,
      }
    );
  }

  #[test]
  fn modifier_selects_destination_factor() {
    let mut machine = BlendStateMachine::default();

    assert_eq!(
      machine.key_pressed(Key::Q, true),
      Some(BlendChange::Dst(Factor::Zero))
    );
    assert_eq!(machine.state().src, Factor::SrcAlpha);
    assert_eq!(machine.state().dst, Factor::Zero);
  }

  #[test]
  fn modifier_selects_alpha_equation() {
    let mut machine = BlendStateMachine::default();

    machine.key_pressed(Key::V, true);
    machine.key_pressed(Key::B, false);

    assert_eq!(machine.state().rgb_equation, Equation::Max);
    assert_eq!(machine.state().alpha_equation, Equation::Min);
    assert_eq!(machine.state().src, Factor::SrcAlpha);
    assert_eq!(machine.state().dst, Factor::SrcAlphaComplement);
  }

  #[test]
  fn last_press_wins_per_side() {
    let mut machine = BlendStateMachine::default();
    let presses = [
      (Key::W, false),
      (Key::E, true),
      (Key::A, false),
      (Key::T, true),
      (Key::R, true),
    ];

    for &(key, alternate) in presses.iter() {
      machine.key_pressed(key, alternate);
    }

    assert_eq!(machine.state().src, Factor::ConstantColor);
    assert_eq!(machine.state().dst, Factor::SrcColorComplement);
    assert_eq!(machine.state().rgb_equation, Equation::Additive);
    assert_eq!(machine.state().alpha_equation, Equation::Additive);
  }

  #[test]
  fn unbound_keys_are_ignored() {
    let mut machine = BlendStateMachine::default();
    machine.key_pressed(Key::X, true);
    let before = *machine.state();

    for &key in [Key::G, Key::H, Key::Num1, Key::Space, Key::Escape].iter() {
      assert_eq!(machine.key_pressed(key, false), None);
      assert_eq!(machine.key_pressed(key, true), None);
    }

    assert_eq!(*machine.state(), before);
  }

  #[test]
  fn machine_keeps_its_bindings() {
    let bindings = KeyBindings::new(vec![(Key::G, Factor::One)], Vec::new()).unwrap();
    let mut machine = BlendStateMachine::new(bindings);

    assert_eq!(machine.bindings().len(), 1);
    assert_eq!(machine.key_pressed(Key::W, false), None);
    assert_eq!(
      machine.key_pressed(Key::G, false),
      Some(BlendChange::Src(Factor::One))
    );
  }

  #[test]
  fn one_then_subtract() {
    let mut machine = BlendStateMachine::default();

    machine.key_pressed(Key::W, false);
    machine.key_pressed(Key::X, false);

    assert_eq!(
      *machine.state(),
      BlendState {
        src: Factor::One,
        dst: Factor::SrcAlphaComplement,
        rgb_equation: Equation::Subtract,
        alpha_equation: Equation::Additive,
      }
    );
  }
}
