pub mod winit;

use std::time::Duration;

use crate::config::InteractionProfile;

/// Wheel event in logical pixels. Trackpads report horizontal intent on
/// either axis depending on modifier state, so both deltas are kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wheel {
    pub delta_x: f32,
    pub delta_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    pub phase: TouchPhase,
    pub x: f32,
    pub y: f32,
}

/// Keys the controller reacts to. Everything else maps to `Other` and is
/// left for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    Escape,
    Other,
}

/// Arbitration verdict for one input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Consume the event and move the offset by this many units.
    Scroll { delta: f32 },
    /// The user wants the page back; release capture, do not consume.
    VerticalIntent,
    /// Step by whole slides (negative = toward the first slide).
    Step(i32),
    JumpToStart,
    JumpToEnd,
    Cancel,
    None,
}

/// Wheel arbitration. Vertical intent wins when `|delta_y|` dominates and
/// clears the noise floor; otherwise the event is a horizontal scroll
/// request, falling back to `delta_y` for trackpads that never report a
/// horizontal axis.
pub fn arbitrate_wheel(wheel: Wheel, profile: &InteractionProfile) -> Gesture {
    let dx = wheel.delta_x;
    let dy = wheel.delta_y;
    if dy.abs() > dx.abs() && dy.abs() > profile.wheel_noise_threshold {
        return Gesture::VerticalIntent;
    }
    let raw = if dx != 0.0 { dx } else { dy };
    if raw == 0.0 {
        return Gesture::None;
    }
    Gesture::Scroll { delta: raw * profile.wheel_damping }
}

pub fn arbitrate_key(key: Key) -> Gesture {
    match key {
        Key::ArrowLeft => Gesture::Step(-1),
        Key::ArrowRight => Gesture::Step(1),
        Key::Home => Gesture::JumpToStart,
        Key::End => Gesture::JumpToEnd,
        Key::Escape => Gesture::Cancel,
        Key::Other => Gesture::None,
    }
}

/// Per-gesture drag state. Lives for the duration of one touch sequence;
/// `begin` resets it, `finish` produces the single fling kick.
///
/// Velocity is the instantaneous inter-move rate of the applied offset
/// delta, in offset units per millisecond. A drag that pauses before lifting
/// therefore flings with whatever the last move measured, which for a
/// stationary finger is zero.
#[derive(Debug, Default)]
pub struct TouchTracker {
    origin: Option<(f32, f32)>,
    last: (f32, f32),
    last_time: Duration,
    velocity: f32,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, x: f32, y: f32, now: Duration) {
        self.origin = Some((x, y));
        self.last = (x, y);
        self.last_time = now;
        self.velocity = 0.0;
    }

    /// Feed a touch-move. Returns `Scroll` when horizontal displacement from
    /// the start point dominates, `None` otherwise (vertical-dominant moves
    /// are left to the page but do not force a release; touch is more
    /// ambiguous than wheel).
    pub fn update(&mut self, x: f32, y: f32, now: Duration, profile: &InteractionProfile) -> Gesture {
        let Some((ox, oy)) = self.origin else {
            return Gesture::None;
        };
        let step = self.last.0 - x; // leftward drag advances the strip
        let dt_ms = (now.saturating_sub(self.last_time)).as_secs_f32() * 1000.0;
        self.last = (x, y);
        self.last_time = now;

        if (x - ox).abs() <= (y - oy).abs() {
            return Gesture::None;
        }
        let delta = step * profile.drag_sensitivity;
        if dt_ms > 0.0 {
            self.velocity = delta / dt_ms;
        }
        if delta == 0.0 {
            return Gesture::None;
        }
        Gesture::Scroll { delta }
    }

    /// End of the gesture: one discrete inertial kick if the tracked
    /// velocity clears the threshold, then everything resets. Momentum is a
    /// single projection applied at release, not a decay simulation.
    pub fn finish(&mut self, profile: &InteractionProfile) -> Gesture {
        let velocity = self.velocity;
        self.reset();
        if velocity.abs() > profile.fling_threshold {
            Gesture::Scroll { delta: velocity * profile.fling_projection }
        } else {
            Gesture::None
        }
    }

    pub fn cancel(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.origin = None;
        self.velocity = 0.0;
    }

    pub fn is_dragging(&self) -> bool {
        self.origin.is_some()
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> InteractionProfile {
        InteractionProfile::default()
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    // ── wheel arbitration ───────────────────────────────────────────────

    #[test]
    fn vertical_dominant_wheel_is_intent() {
        let g = arbitrate_wheel(Wheel { delta_x: 2.0, delta_y: 50.0 }, &profile());
        assert_eq!(g, Gesture::VerticalIntent);
    }

    #[test]
    fn horizontal_dominant_wheel_scrolls() {
        let g = arbitrate_wheel(Wheel { delta_x: 50.0, delta_y: 2.0 }, &profile());
        assert_eq!(g, Gesture::Scroll { delta: 50.0 * 0.8 });
    }

    #[test]
    fn small_vertical_delta_is_noise_not_intent() {
        // |dy| > |dx| but under the 10-unit noise floor: treated as a
        // horizontal request via the dy fallback.
        let g = arbitrate_wheel(Wheel { delta_x: 0.0, delta_y: 8.0 }, &profile());
        assert_eq!(g, Gesture::Scroll { delta: 8.0 * 0.8 });
    }

    #[test]
    fn zero_wheel_is_none() {
        let g = arbitrate_wheel(Wheel { delta_x: 0.0, delta_y: 0.0 }, &profile());
        assert_eq!(g, Gesture::None);
    }

    #[test]
    fn negative_horizontal_keeps_sign() {
        let g = arbitrate_wheel(Wheel { delta_x: -25.0, delta_y: 1.0 }, &profile());
        assert_eq!(g, Gesture::Scroll { delta: -20.0 });
    }

    // ── keys ────────────────────────────────────────────────────────────

    #[test]
    fn key_mapping() {
        assert_eq!(arbitrate_key(Key::ArrowLeft), Gesture::Step(-1));
        assert_eq!(arbitrate_key(Key::ArrowRight), Gesture::Step(1));
        assert_eq!(arbitrate_key(Key::Home), Gesture::JumpToStart);
        assert_eq!(arbitrate_key(Key::End), Gesture::JumpToEnd);
        assert_eq!(arbitrate_key(Key::Escape), Gesture::Cancel);
        assert_eq!(arbitrate_key(Key::Other), Gesture::None);
    }

    // ── touch tracking ──────────────────────────────────────────────────

    #[test]
    fn horizontal_drag_scrolls_scaled() {
        let p = profile();
        let mut t = TouchTracker::new();
        t.begin(200.0, 100.0, ms(0));
        // finger moves 10px left in 10ms
        let g = t.update(190.0, 100.0, ms(10), &p);
        assert_eq!(g, Gesture::Scroll { delta: 10.0 * 1.2 });
        assert!((t.velocity() - 1.2).abs() < 1e-6);
    }

    #[test]
    fn vertical_dominant_move_is_not_consumed() {
        let p = profile();
        let mut t = TouchTracker::new();
        t.begin(200.0, 100.0, ms(0));
        let g = t.update(198.0, 160.0, ms(10), &p);
        assert_eq!(g, Gesture::None);
    }

    #[test]
    fn move_without_start_is_ignored() {
        let p = profile();
        let mut t = TouchTracker::new();
        assert_eq!(t.update(100.0, 100.0, ms(5), &p), Gesture::None);
    }

    #[test]
    fn fling_projects_velocity() {
        // sensitivity 1.0 keeps the numbers exact: 6px per 10ms is
        // 0.6 units/ms at release
        let p = InteractionProfile { drag_sensitivity: 1.0, ..profile() };
        let mut t = TouchTracker::new();
        t.begin(400.0, 100.0, ms(0));
        t.update(394.0, 100.0, ms(10), &p);
        t.update(388.0, 100.0, ms(20), &p);
        let g = t.finish(&p);
        assert_eq!(g, Gesture::Scroll { delta: 0.6 * 200.0 });
        // momentum resets immediately after the kick
        assert_eq!(t.velocity(), 0.0);
        assert!(!t.is_dragging());
    }

    #[test]
    fn slow_release_does_not_fling() {
        let p = profile();
        let mut t = TouchTracker::new();
        t.begin(400.0, 100.0, ms(0));
        // 0.5px per 10ms -> 0.06 units/ms, under the 0.1 threshold
        t.update(399.5, 100.0, ms(10), &p);
        assert_eq!(t.finish(&p), Gesture::None);
    }

    #[test]
    fn cancel_discards_momentum() {
        let p = profile();
        let mut t = TouchTracker::new();
        t.begin(400.0, 100.0, ms(0));
        t.update(380.0, 100.0, ms(10), &p);
        t.cancel();
        assert_eq!(t.finish(&p), Gesture::None);
        assert!(!t.is_dragging());
    }

    #[test]
    fn begin_resets_previous_gesture() {
        let p = profile();
        let mut t = TouchTracker::new();
        t.begin(400.0, 100.0, ms(0));
        t.update(380.0, 100.0, ms(10), &p);
        t.begin(100.0, 100.0, ms(500));
        assert_eq!(t.velocity(), 0.0);
        assert!(t.is_dragging());
    }

    #[test]
    fn rightward_drag_scrolls_back() {
        let p = profile();
        let mut t = TouchTracker::new();
        t.begin(100.0, 50.0, ms(0));
        let g = t.update(110.0, 50.0, ms(10), &p);
        assert_eq!(g, Gesture::Scroll { delta: -10.0 * 1.2 });
    }
}
