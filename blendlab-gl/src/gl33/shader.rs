//! Shader stages and program.
//!
//! The program is fixed: a passthrough vertex stage and one of two fragment stages, picked with
//! [`Shading`].

use gl::types::*;
use std::{
  error,
  ffi::CString,
  fmt,
  ptr::{null, null_mut},
};

/// Vertex attribute index of the quad positions.
pub(crate) const POSITION_ATTRIB: GLuint = 0;

/// Vertex attribute index of the quad texture coordinates.
pub(crate) const UV_ATTRIB: GLuint = 1;

const VS: &str = "#version 330

in vec2 position;
in vec2 uv;

out vec2 vertex_uv;

void main() {
  gl_Position = vec4(position, 0., 1.);
  vertex_uv = uv;
}
";

const TEXTURE_FS: &str = "#version 330

in vec2 vertex_uv;

out vec4 color;

uniform sampler2D sampler;

void main() {
  color = texture(sampler, vertex_uv);
}
";

const UV_FS: &str = "#version 330

in vec2 vertex_uv;

out vec4 color;

void main() {
  color = vec4(vertex_uv, 0., 1.);
}
";

/// What the fragment stage outputs.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Shading {
  /// Sample the bound texture.
  Texture,
  /// Output the texture coordinates as a color; bound textures are ignored.
  Uv,
}

impl Shading {
  fn fragment_source(self) -> &'static str {
    match self {
      Shading::Texture => TEXTURE_FS,
      Shading::Uv => UV_FS,
    }
  }
}

impl Default for Shading {
  fn default() -> Self {
    Shading::Texture
  }
}

/// Shader stage type.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum StageType {
  VertexShader,
  FragmentShader,
}

impl fmt::Display for StageType {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      StageType::VertexShader => f.write_str("vertex shader"),
      StageType::FragmentShader => f.write_str("fragment shader"),
    }
  }
}

/// Errors that shader stages can emit.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StageError {
  /// Occurs when a shader fails to compile.
  CompilationFailed(StageType, String),
}

impl fmt::Display for StageError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      StageError::CompilationFailed(ref ty, ref r) => write!(f, "{} compilation error: {}", ty, r),
    }
  }
}

impl error::Error for StageError {}

/// Errors that a program can generate.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProgramError {
  /// A shader stage failed to compile.
  StageError(StageError),
  /// Program link failed. You can inspect the reason by looking at the contained [`String`].
  LinkFailed(String),
}

impl fmt::Display for ProgramError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      ProgramError::StageError(ref e) => write!(f, "shader program has stage error: {}", e),
      ProgramError::LinkFailed(ref s) => write!(f, "shader program failed to link: {}", s),
    }
  }
}

impl error::Error for ProgramError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      ProgramError::StageError(e) => Some(e),
      _ => None,
    }
  }
}

impl From<StageError> for ProgramError {
  fn from(e: StageError) -> Self {
    ProgramError::StageError(e)
  }
}

#[derive(Debug)]
struct Stage {
  handle: GLuint,
}

impl Drop for Stage {
  fn drop(&mut self) {
    unsafe {
      gl::DeleteShader(self.handle);
    }
  }
}

impl Stage {
  unsafe fn new(ty: StageType, src: &str) -> Result<Self, StageError> {
    let c_src = CString::new(src.as_bytes())
      .map_err(|_| StageError::CompilationFailed(ty, "nul byte in source".to_owned()))?;
    let handle = gl::CreateShader(opengl_shader_type(ty));

    gl::ShaderSource(handle, 1, [c_src.as_ptr()].as_ptr(), null());
    gl::CompileShader(handle);

    let mut compiled: GLint = gl::FALSE.into();
    gl::GetShaderiv(handle, gl::COMPILE_STATUS, &mut compiled);

    if compiled == gl::TRUE.into() {
      Ok(Stage { handle })
    } else {
      let mut log_len: GLint = 0;
      gl::GetShaderiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);

      let mut log: Vec<u8> = vec![0; log_len.max(0) as usize];
      gl::GetShaderInfoLog(handle, log_len, null_mut(), log.as_mut_ptr() as *mut GLchar);

      gl::DeleteShader(handle);

      Err(StageError::CompilationFailed(ty, info_log(log)))
    }
  }
}

#[derive(Debug)]
pub struct Program {
  pub(crate) handle: GLuint,
}

impl Drop for Program {
  fn drop(&mut self) {
    unsafe {
      gl::DeleteProgram(self.handle);
    }
  }
}

impl Program {
  /// Compile and link the program for the given shading.
  pub(crate) unsafe fn new(shading: Shading) -> Result<Self, ProgramError> {
    let vertex = Stage::new(StageType::VertexShader, VS)?;
    let fragment = Stage::new(StageType::FragmentShader, shading.fragment_source())?;

    let program = Program {
      handle: gl::CreateProgram(),
    };

    gl::AttachShader(program.handle, vertex.handle);
    gl::AttachShader(program.handle, fragment.handle);

    // attribute locations must be set before linking
    bind_attrib_location(program.handle, POSITION_ATTRIB, "position");
    bind_attrib_location(program.handle, UV_ATTRIB, "uv");

    program.link()?;

    gl::DetachShader(program.handle, vertex.handle);
    gl::DetachShader(program.handle, fragment.handle);

    Ok(program)
  }

  unsafe fn link(&self) -> Result<(), ProgramError> {
    let handle = self.handle;

    gl::LinkProgram(handle);

    let mut linked: GLint = gl::FALSE.into();
    gl::GetProgramiv(handle, gl::LINK_STATUS, &mut linked);

    if linked == gl::TRUE.into() {
      Ok(())
    } else {
      let mut log_len: GLint = 0;
      gl::GetProgramiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);

      let mut log: Vec<u8> = vec![0; log_len.max(0) as usize];
      gl::GetProgramInfoLog(handle, log_len, null_mut(), log.as_mut_ptr() as *mut GLchar);

      Err(ProgramError::LinkFailed(info_log(log)))
    }
  }
}

unsafe fn bind_attrib_location(program: GLuint, index: GLuint, name: &str) {
  // attribute names are static and never contain a nul byte
  if let Ok(c_name) = CString::new(name) {
    gl::BindAttribLocation(program, index, c_name.as_ptr() as *const GLchar);
  }
}

// Turn a nul-terminated info log into a string.
fn info_log(mut log: Vec<u8>) -> String {
  if let Some(nul) = log.iter().position(|&b| b == 0) {
    log.truncate(nul);
  }

  String::from_utf8_lossy(&log).trim_end().to_owned()
}

fn opengl_shader_type(t: StageType) -> GLenum {
  match t {
    StageType::VertexShader => gl::VERTEX_SHADER,
    StageType::FragmentShader => gl::FRAGMENT_SHADER,
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn info_log_stops_at_nul() {
    assert_eq!(
      info_log(b"0(3) : error C0000: syntax error\n\0\0\0".to_vec()),
      "0(3) : error C0000: syntax error"
    );
    assert_eq!(info_log(Vec::new()), "");
  }

  #[test]
  fn shading_picks_fragment_stage() {
    assert!(Shading::Texture.fragment_source().contains("texture(sampler, vertex_uv)"));
    assert!(Shading::Uv.fragment_source().contains("vec4(vertex_uv, 0., 1.)"));
    assert_eq!(Shading::default(), Shading::Texture);
  }

  #[test]
  fn sources_declare_bound_attributes() {
    assert!(VS.contains("in vec2 position;"));
    assert!(VS.contains("in vec2 uv;"));
  }
}
