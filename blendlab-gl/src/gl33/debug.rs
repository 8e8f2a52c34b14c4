//! Forward driver debug output to the log.

use gl::types::*;
use std::{ffi::CStr, os::raw::c_void, ptr, slice};

/// Install the debug message callback.
///
/// Returns `false` if the driver doesn’t expose `glDebugMessageCallback`.
pub(crate) fn install_debug_callback() -> bool {
  if !gl::DebugMessageCallback::is_loaded() {
    return false;
  }

  unsafe {
    gl::DebugMessageCallback(Some(on_debug_message), ptr::null());
  }

  true
}

extern "system" fn on_debug_message(
  _source: GLenum,
  _ty: GLenum,
  id: GLuint,
  severity: GLenum,
  length: GLsizei,
  message: *const GLchar,
  _user_param: *mut c_void,
) {
  if message.is_null() {
    return;
  }

  let text = unsafe {
    if length >= 0 {
      let bytes = slice::from_raw_parts(message as *const u8, length as usize);
      String::from_utf8_lossy(bytes).into_owned()
    } else {
      CStr::from_ptr(message).to_string_lossy().into_owned()
    }
  };

  log::log!(target: "gl", severity_level(severity), "[{}] {}", id, text.trim_end());
}

fn severity_level(severity: GLenum) -> log::Level {
  match severity {
    gl::DEBUG_SEVERITY_HIGH => log::Level::Error,
    gl::DEBUG_SEVERITY_MEDIUM => log::Level::Warn,
    gl::DEBUG_SEVERITY_LOW => log::Level::Info,
    _ => log::Level::Debug,
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn severity_mapping() {
    assert_eq!(severity_level(gl::DEBUG_SEVERITY_HIGH), log::Level::Error);
    assert_eq!(severity_level(gl::DEBUG_SEVERITY_MEDIUM), log::Level::Warn);
    assert_eq!(severity_level(gl::DEBUG_SEVERITY_LOW), log::Level::Info);
    assert_eq!(
      severity_level(gl::DEBUG_SEVERITY_NOTIFICATION),
      log::Level::Debug
    );
  }
}
