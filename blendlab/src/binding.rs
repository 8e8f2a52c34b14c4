//! Key bindings.
//!
//! Two static tables map a physical key to either a blending [`Factor`] or a blending
//! [`Equation`]. A key appears in at most one table, so a single lookup tells which kind of value a
//! key selects. Tables are built once and only read afterwards.

use crate::blending::{Equation, Factor};
use std::{collections::HashMap, error, fmt};

/// Platform-agnostic key identity.
///
/// Platform code converts its own key codes into this type; keys it cannot convert are never
/// forwarded.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Key {
  A,
  B,
  C,
  D,
  E,
  F,
  G,
  H,
  I,
  J,
  K,
  L,
  M,
  N,
  O,
  P,
  Q,
  R,
  S,
  T,
  U,
  V,
  W,
  X,
  Y,
  Z,
  Num0,
  Num1,
  Num2,
  Num3,
  Num4,
  Num5,
  Num6,
  Num7,
  Num8,
  Num9,
  Space,
  Escape,
}

/// Value selected by a bound key.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Binding {
  Factor(Factor),
  Equation(Equation),
}

/// Error that can be risen while building a [`KeyBindings`] table.
#[non_exhaustive]
#[derive(Debug, Eq, PartialEq)]
pub enum BindingError {
  /// The key is bound more than once, either twice in a table or once in each table.
  DuplicateKey(Key),
}

impl fmt::Display for BindingError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      BindingError::DuplicateKey(ref key) => write!(f, "key {:?} is bound more than once", key),
    }
  }
}

impl error::Error for BindingError {}

/// Factor and equation binding tables.
#[derive(Clone, Debug)]
pub struct KeyBindings {
  factors: HashMap<Key, Factor>,
  equations: HashMap<Key, Equation>,
}

impl KeyBindings {
  /// Build binding tables from `(key, value)` pairs.
  ///
  /// Fails if any key appears more than once across both tables.
  pub fn new(
    factors: impl IntoIterator<Item = (Key, Factor)>,
    equations: impl IntoIterator<Item = (Key, Equation)>,
  ) -> Result<Self, BindingError> {
    let mut factor_table = HashMap::new();
    let mut equation_table = HashMap::new();

    for (key, factor) in factors {
      if factor_table.insert(key, factor).is_some() {
        return Err(BindingError::DuplicateKey(key));
      }
    }

    for (key, equation) in equations {
      if factor_table.contains_key(&key) || equation_table.insert(key, equation).is_some() {
        return Err(BindingError::DuplicateKey(key));
      }
    }

    Ok(KeyBindings {
      factors: factor_table,
      equations: equation_table,
    })
  }

  /// Look a key up, factor table first.
  pub fn lookup(&self, key: Key) -> Option<Binding> {
    self
      .factors
      .get(&key)
      .map(|&factor| Binding::Factor(factor))
      .or_else(|| {
        self
          .equations
          .get(&key)
          .map(|&equation| Binding::Equation(equation))
      })
  }

  /// All bindings, sorted by key.
  pub fn iter(&self) -> impl Iterator<Item = (Key, Binding)> {
    let mut all: Vec<_> = self
      .factors
      .iter()
      .map(|(&k, &f)| (k, Binding::Factor(f)))
      .chain(self.equations.iter().map(|(&k, &e)| (k, Binding::Equation(e))))
      .collect();

    all.sort_by_key(|&(key, _)| key);
    all.into_iter()
  }

  /// Number of bound keys.
  pub fn len(&self) -> usize {
    self.factors.len() + self.equations.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// Default factor keys: the top two QWERTY letter rows.
pub const DEFAULT_FACTOR_KEYS: [(Key, Factor); 14] = [
  (Key::Q, Factor::Zero),
  (Key::W, Factor::One),
  (Key::E, Factor::SrcColor),
  (Key::R, Factor::SrcColorComplement),
  (Key::T, Factor::DestColor),
  (Key::Y, Factor::DestColorComplement),
  (Key::U, Factor::SrcAlpha),
  (Key::I, Factor::SrcAlphaComplement),
  (Key::O, Factor::DstAlpha),
  (Key::P, Factor::DstAlphaComplement),
  (Key::A, Factor::ConstantColor),
  (Key::S, Factor::ConstantColorComplement),
  (Key::D, Factor::ConstantAlpha),
  (Key::F, Factor::ConstantAlphaComplement),
];

/// Default equation keys: the bottom QWERTY letter row.
pub const DEFAULT_EQUATION_KEYS: [(Key, Equation); 5] = [
  (Key::Z, Equation::Additive),
  (Key::X, Equation::Subtract),
  (Key::C, Equation::ReverseSubtract),
  (Key::V, Equation::Min),
  (Key::B, Equation::Max),
];

impl Default for KeyBindings {
  fn default() -> Self {
    let factors = DEFAULT_FACTOR_KEYS.iter().copied().collect();
    let equations = DEFAULT_EQUATION_KEYS.iter().copied().collect();

    KeyBindings { factors, equations }
  }
}
