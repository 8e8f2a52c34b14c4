//! # Interactive GPU blending explorer
//!
//! blendlab renders a stack of textured quads and lets you change, in real time, which blending
//! factors and equations the GPU uses to combine each new layer with what is already in the
//! framebuffer.
//!
//! This crate is the backend-agnostic part of the tool:
//!
//! - [`blending`] defines the blending vocabulary: [`Factor`] and [`Equation`].
//! - [`binding`] maps keys to factors and equations.
//! - [`blend_state`] holds the frame-global [`BlendState`] and the [`BlendStateMachine`] that
//!   updates it from key presses.
//! - [`texture`] builds the ordered [`TextureSet`] to composite.
//! - [`compositor`] issues the draw calls of a frame through a [`Backend`].
//! - [`event_loop`] dispatches input and drives frames on a [`GraphicsContext`].
//!
//! Graphics API and windowing live in their own crates.
//!
//! # Controls
//!
//! With the default bindings, the `QWERTYUIOP` and `ASDF` keys pick a blending factor and the
//! `ZXCVB` keys pick a blending equation. A plain press targets the source factor or the color
//! equation; holding left shift targets the destination factor or the alpha equation.
//!
//! [`Factor`]: crate::blending::Factor
//! [`Equation`]: crate::blending::Equation
//! [`BlendState`]: crate::blend_state::BlendState
//! [`BlendStateMachine`]: crate::blend_state::BlendStateMachine
//! [`TextureSet`]: crate::texture::TextureSet
//! [`Backend`]: crate::backend::Backend
//! [`GraphicsContext`]: crate::context::GraphicsContext

pub mod backend;
pub mod binding;
pub mod blend_state;
pub mod blending;
pub mod compositor;
pub mod context;
pub mod event_loop;
pub mod texture;
