//! Blending factors and equations.
//!
//! Given two pixels *src* and *dst* – source and destination, we associate each pixel a blending
//! factor – respectively, *srcK* and *dstK*. *src* is the fragment being computed, and *dst* is the
//! pixel that is already stored in the framebuffer.
//!
//! The pixels can be blended in several ways. See the documentation of [`Equation`] for further
//! details. The factors are encoded with [`Factor`].

use std::fmt;

/// Blending equation. Used to state how blending factors and pixel data should be blended.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Equation {
  /// `Additive` represents the following blending equation:
  ///
  /// > `blended = src * srcK + dst * dstK`
  Additive,
  /// `Subtract` represents the following blending equation:
  ///
  /// > `blended = src * srcK - dst * dstK`
  Subtract,
  /// Because subtracting is not commutative, `ReverseSubtract` represents the following additional
  /// blending equation:
  ///
  /// > `blended = dst * dstK - src * srcK`
  ReverseSubtract,
  /// `Min` represents the following blending equation:
  ///
  /// > `blended = min(src, dst)`
  Min,
  /// `Max` represents the following blending equation:
  ///
  /// > `blended = max(src, dst)`
  Max,
}

impl Equation {
  /// Every equation, in binding order.
  pub const ALL: [Equation; 5] = [
    Equation::Additive,
    Equation::Subtract,
    Equation::ReverseSubtract,
    Equation::Min,
    Equation::Max,
  ];
}

impl fmt::Display for Equation {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let name = match *self {
      Equation::Additive => "FUNC_ADD",
      Equation::Subtract => "FUNC_SUBTRACT",
      Equation::ReverseSubtract => "FUNC_REVERSE_SUBTRACT",
      Equation::Min => "MIN",
      Equation::Max => "MAX",
    };

    f.write_str(name)
  }
}

/// Blending factors. Pixel data are multiplied by these factors to achieve several effects driven
/// by *blending equations*.
///
/// Every factor is legal on both the source and the destination side.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Factor {
  /// `0 * color = 0`
  Zero,
  /// `1 * color = color`
  One,
  /// `src * color`
  SrcColor,
  /// `(1 - src) * color`
  SrcColorComplement,
  /// `dst * color`
  DestColor,
  /// `(1 - dst) * color`
  DestColorComplement,
  /// `srcA * color`
  SrcAlpha,
  /// `(1 - srcA) * color`
  SrcAlphaComplement,
  /// `dstA * color`
  DstAlpha,
  /// `(1 - dstA) * color`
  DstAlphaComplement,
  /// `constant * color`, where `constant` is the blend color of the context.
  ConstantColor,
  /// `(1 - constant) * color`
  ConstantColorComplement,
  /// `constantA * color`
  ConstantAlpha,
  /// `(1 - constantA) * color`
  ConstantAlphaComplement,
}

impl Factor {
  /// Every factor, in binding order.
  pub const ALL: [Factor; 14] = [
    Factor::Zero,
    Factor::One,
    Factor::SrcColor,
    Factor::SrcColorComplement,
    Factor::DestColor,
    Factor::DestColorComplement,
    Factor::SrcAlpha,
    Factor::SrcAlphaComplement,
    Factor::DstAlpha,
    Factor::DstAlphaComplement,
    Factor::ConstantColor,
    Factor::ConstantColorComplement,
    Factor::ConstantAlpha,
    Factor::ConstantAlphaComplement,
  ];
}

impl fmt::Display for Factor {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let name = match *self {
      Factor::Zero => "ZERO",
      Factor::One => "ONE",
      Factor::SrcColor => "SRC_COLOR",
      Factor::SrcColorComplement => "ONE_MINUS_SRC_COLOR",
      Factor::DestColor => "DST_COLOR",
      Factor::DestColorComplement => "ONE_MINUS_DST_COLOR",
      Factor::SrcAlpha => "SRC_ALPHA",
      Factor::SrcAlphaComplement => "ONE_MINUS_SRC_ALPHA",
      Factor::DstAlpha => "DST_ALPHA",
      Factor::DstAlphaComplement => "ONE_MINUS_DST_ALPHA",
      Factor::ConstantColor => "CONSTANT_COLOR",
      Factor::ConstantColorComplement => "ONE_MINUS_CONSTANT_COLOR",
      Factor::ConstantAlpha => "CONSTANT_ALPHA",
      Factor::ConstantAlphaComplement => "ONE_MINUS_CONSTANT_ALPHA",
    };

    f.write_str(name)
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use std::collections::HashSet;

  #[test]
  fn domains_are_complete_and_distinct() {
    let factors: HashSet<_> = Factor::ALL.iter().collect();
    let equations: HashSet<_> = Equation::ALL.iter().collect();

    assert_eq!(factors.len(), 14);
    assert_eq!(equations.len(), 5);
  }

  #[test]
  fn display_uses_gl_names() {
    assert_eq!(Factor::SrcAlphaComplement.to_string(), "ONE_MINUS_SRC_ALPHA");
    assert_eq!(Equation::ReverseSubtract.to_string(), "FUNC_REVERSE_SUBTRACT");
  }
}
