//! Adapter from winit events to the controller's input model, for hosts
//! running under a winit event loop.

use winit::event::{ElementState, KeyEvent, MouseScrollDelta, TouchPhase as WinitTouchPhase};
use winit::keyboard::{Key as WinitKey, NamedKey};

use super::{Key, Touch, TouchPhase, Wheel};

const LINE_HEIGHT_PX: f32 = 20.0;

/// Line-based deltas (classic mouse wheels) are converted to pixels;
/// pixel deltas (trackpads) are converted from physical to logical units.
pub fn map_scroll(delta: MouseScrollDelta, scale_factor: f64) -> Wheel {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => Wheel {
            delta_x: x * LINE_HEIGHT_PX,
            delta_y: y * LINE_HEIGHT_PX,
        },
        MouseScrollDelta::PixelDelta(p) => Wheel {
            delta_x: (p.x / scale_factor) as f32,
            delta_y: (p.y / scale_factor) as f32,
        },
    }
}

pub fn map_touch(touch: &winit::event::Touch, scale_factor: f64) -> Touch {
    let phase = match touch.phase {
        WinitTouchPhase::Started => TouchPhase::Start,
        WinitTouchPhase::Moved => TouchPhase::Move,
        WinitTouchPhase::Ended => TouchPhase::End,
        WinitTouchPhase::Cancelled => TouchPhase::Cancel,
    };
    Touch {
        phase,
        x: (touch.location.x / scale_factor) as f32,
        y: (touch.location.y / scale_factor) as f32,
    }
}

/// Key presses only; releases return `None`. Unmapped keys come back as
/// `Key::Other` so the controller can decline them explicitly.
pub fn map_key(event: &KeyEvent) -> Option<Key> {
    if event.state != ElementState::Pressed {
        return None;
    }
    let key = match &event.logical_key {
        WinitKey::Named(NamedKey::ArrowLeft) => Key::ArrowLeft,
        WinitKey::Named(NamedKey::ArrowRight) => Key::ArrowRight,
        WinitKey::Named(NamedKey::Home) => Key::Home,
        WinitKey::Named(NamedKey::End) => Key::End,
        WinitKey::Named(NamedKey::Escape) => Key::Escape,
        _ => Key::Other,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn line_delta_scales_to_pixels() {
        let w = map_scroll(MouseScrollDelta::LineDelta(2.0, -1.0), 1.0);
        assert_eq!(w, Wheel { delta_x: 40.0, delta_y: -20.0 });
    }

    #[test]
    fn pixel_delta_honors_scale_factor() {
        let w = map_scroll(
            MouseScrollDelta::PixelDelta(PhysicalPosition::new(30.0, 10.0)),
            2.0,
        );
        assert_eq!(w, Wheel { delta_x: 15.0, delta_y: 5.0 });
    }
}
