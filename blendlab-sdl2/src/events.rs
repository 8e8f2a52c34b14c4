//! SDL2 event adaptation.

use blendlab::{binding::Key, event_loop::InputAction};
use sdl2::{event::Event, event::WindowEvent, keyboard::Keycode};

/// Convert an SDL2 key code to a blendlab key.
pub fn key_from_keycode(keycode: Keycode) -> Option<Key> {
  let key = match keycode {
    Keycode::A => Key::A,
    Keycode::B => Key::B,
    Keycode::C => Key::C,
    Keycode::D => Key::D,
    Keycode::E => Key::E,
    Keycode::F => Key::F,
    Keycode::G => Key::G,
    Keycode::H => Key::H,
    Keycode::I => Key::I,
    Keycode::J => Key::J,
    Keycode::K => Key::K,
    Keycode::L => Key::L,
    Keycode::M => Key::M,
    Keycode::N => Key::N,
    Keycode::O => Key::O,
    Keycode::P => Key::P,
    Keycode::Q => Key::Q,
    Keycode::R => Key::R,
    Keycode::S => Key::S,
    Keycode::T => Key::T,
    Keycode::U => Key::U,
    Keycode::V => Key::V,
    Keycode::W => Key::W,
    Keycode::X => Key::X,
    Keycode::Y => Key::Y,
    Keycode::Z => Key::Z,
    Keycode::Num0 => Key::Num0,
    Keycode::Num1 => Key::Num1,
    Keycode::Num2 => Key::Num2,
    Keycode::Num3 => Key::Num3,
    Keycode::Num4 => Key::Num4,
    Keycode::Num5 => Key::Num5,
    Keycode::Num6 => Key::Num6,
    Keycode::Num7 => Key::Num7,
    Keycode::Num8 => Key::Num8,
    Keycode::Num9 => Key::Num9,
    Keycode::Space => Key::Space,
    Keycode::Escape => Key::Escape,
    _ => return None,
  };

  Some(key)
}

/// Convert an SDL2 event to an input action.
///
/// `alternate` is only called for key presses; it must report whether the modifier key is held
/// right now.
pub fn adapt_event(event: Event, alternate: impl FnOnce() -> bool) -> Option<InputAction> {
  match event {
    Event::Quit { .. }
    | Event::Window {
      win_event: WindowEvent::Close,
      ..
    } => Some(InputAction::Quit),

    Event::KeyDown {
      keycode: Some(keycode),
      ..
    } => {
      log::debug!("key press: {:?}", keycode);
      key_from_keycode(keycode).map(|key| InputAction::KeyPressed {
        key,
        alternate: alternate(),
      })
    }

    Event::Window {
      win_event: WindowEvent::Resized(width, height),
      ..
    } => Some(InputAction::Resized {
      width: width.max(0) as u32,
      height: height.max(0) as u32,
    }),

    _ => None,
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use sdl2::keyboard::{Mod, Scancode};

  fn key_down(keycode: Keycode) -> Event {
    Event::KeyDown {
      timestamp: 0,
      window_id: 1,
      keycode: Some(keycode),
      scancode: Scancode::from_keycode(keycode),
      keymod: Mod::NOMOD,
      repeat: false,
    }
  }

  #[test]
  fn key_press_samples_live_modifier() {
    assert_eq!(
      adapt_event(key_down(Keycode::W), || true),
      Some(InputAction::KeyPressed {
        key: Key::W,
        alternate: true
      })
    );
    assert_eq!(
      adapt_event(key_down(Keycode::X), || false),
      Some(InputAction::KeyPressed {
        key: Key::X,
        alternate: false
      })
    );
  }

  #[test]
  fn unknown_keys_are_dropped() {
    assert_eq!(adapt_event(key_down(Keycode::F5), || false), None);
    assert_eq!(key_from_keycode(Keycode::LShift), None);
  }

  #[test]
  fn quit_and_close() {
    assert_eq!(
      adapt_event(Event::Quit { timestamp: 0 }, || false),
      Some(InputAction::Quit)
    );

    let close = Event::Window {
      timestamp: 0,
      window_id: 1,
      win_event: WindowEvent::Close,
    };
    assert_eq!(adapt_event(close, || false), Some(InputAction::Quit));
  }

  #[test]
  fn resize() {
    let resized = Event::Window {
      timestamp: 0,
      window_id: 1,
      win_event: WindowEvent::Resized(300, 200),
    };

    assert_eq!(
      adapt_event(resized, || false),
      Some(InputAction::Resized {
        width: 300,
        height: 200
      })
    );
  }

  #[test]
  fn other_window_events_are_ignored() {
    let moved = Event::Window {
      timestamp: 0,
      window_id: 1,
      win_event: WindowEvent::Moved(10, 10),
    };

    assert_eq!(adapt_event(moved, || false), None);
  }
}
