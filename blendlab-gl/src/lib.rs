//! OpenGL backend.
//!
//! This crate exports an [OpenGL](https://www.khronos.org/opengl/) 3.3 backend for blendlab. The
//! backend type is [`GL33`]; it expects the OpenGL function pointers to be loaded and a context to
//! be current on the calling thread, which is what a surface crate provides.

pub mod gl33;

pub use gl33::{GL33Error, Shading, GL33};
