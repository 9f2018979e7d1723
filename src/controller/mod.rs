use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::animation::offset::OffsetSpring;
use crate::config::{AnimationConfig, InteractionProfile};
use crate::input::{self, Gesture, Key, Touch, TouchPhase, TouchTracker, Wheel};
use crate::lock::{ScrollAuthority, ViewportLock};

static NEXT_CONTROLLER_ID: AtomicU64 = AtomicU64::new(1);

/// Whether the controller owns input capture and the page lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Inactive,
    Active,
}

/// What the host should do with the raw event after the controller saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Handled; suppress the default (page) behaviour.
    Consumed,
    /// Deliberately left to the page (vertical intent, unmapped keys).
    PassedThrough,
    /// Controller inactive, or the event carried nothing actionable.
    Ignored,
}

/// Converts wheel/touch/keyboard input into a clamped, momentum-carrying
/// horizontal offset, owning the page scroll lock while active.
///
/// Lifecycle: the host reports the strip's visibility ratio via
/// [`observe_visibility`](Self::observe_visibility); crossing the activation
/// threshold claims the shared [`ScrollAuthority`], captures the page scroll
/// position into the injected [`ViewportLock`], and starts consuming input.
/// Every exit trigger (visibility loss, vertical wheel intent, Escape, drop)
/// funnels through the same release path, so the page can never be left
/// frozen.
///
/// All timestamps are explicit `Duration`s from a host-chosen epoch; the
/// controller never reads a clock.
pub struct ScrollHijackController {
    id: u64,
    phase: Phase,
    offset: OffsetSpring,
    tracker: TouchTracker,
    profile: InteractionProfile,
    total_slides: usize,
    slide_width: f32,
    /// Signed rate of the last applied input, offset units per ms.
    velocity: f32,
    last_input: Option<Duration>,
    scrolling_until: Option<Duration>,
    is_scrolling: bool,
    current_slide: usize,
    on_slide_change: Option<Box<dyn FnMut(usize)>>,
    lock: Box<dyn ViewportLock>,
    authority: ScrollAuthority,
}

impl ScrollHijackController {
    /// Panics if `total_slides < 1` or `slide_width <= 0`: both indicate a
    /// caller bug, not a runtime condition.
    pub fn new(
        total_slides: usize,
        slide_width: f32,
        profile: InteractionProfile,
        animation: AnimationConfig,
        lock: Box<dyn ViewportLock>,
        authority: ScrollAuthority,
    ) -> Self {
        assert!(total_slides >= 1, "total_slides must be at least 1");
        assert!(
            slide_width > 0.0 && slide_width.is_finite(),
            "slide_width must be a positive finite number"
        );
        let max_offset = (total_slides - 1) as f32 * slide_width;
        Self {
            id: NEXT_CONTROLLER_ID.fetch_add(1, Ordering::Relaxed),
            phase: Phase::Inactive,
            offset: OffsetSpring::new(animation.scroll_spring_frequency, max_offset),
            tracker: TouchTracker::new(),
            profile,
            total_slides,
            slide_width,
            velocity: 0.0,
            last_input: None,
            scrolling_until: None,
            is_scrolling: false,
            current_slide: 0,
            on_slide_change: None,
            lock,
            authority,
        }
    }

    /// Edge-triggered: fires only when the derived slide index changes,
    /// never on every offset mutation.
    pub fn on_slide_change(&mut self, callback: impl FnMut(usize) + 'static) {
        self.on_slide_change = Some(Box::new(callback));
    }

    // ── activation lifecycle ────────────────────────────────────────────

    /// Host-reported visibility of the strip rect, in `[0, 1]`. Crossing the
    /// activation threshold activates; dropping below it deactivates. Both
    /// directions are idempotent, so bouncy intersection reporting near the
    /// threshold cannot stack locks.
    pub fn observe_visibility(&mut self, ratio: f32, page_scroll_y: f32) {
        if ratio >= self.profile.activation_threshold {
            self.activate(page_scroll_y);
        } else {
            self.deactivate();
        }
    }

    fn activate(&mut self, page_scroll_y: f32) {
        if self.phase == Phase::Active {
            return;
        }
        if !self.authority.try_claim(self.id) {
            log::debug!(
                "controller {}: activation refused, scroll authority held by {:?}",
                self.id,
                self.authority.owner()
            );
            return;
        }
        self.lock.acquire(page_scroll_y);
        self.phase = Phase::Active;
        log::info!("controller {}: active, page frozen at y={page_scroll_y}", self.id);
    }

    /// The single release path for every exit trigger. Restores the page to
    /// the scroll position captured at activation and frees the authority
    /// claim. No-op while inactive.
    pub fn deactivate(&mut self) {
        if self.phase == Phase::Inactive {
            return;
        }
        // Flip the phase first: no input can be processed between deciding
        // to deactivate and the side effects completing.
        self.phase = Phase::Inactive;
        let restored = self.lock.release();
        self.authority.release(self.id);
        self.tracker.cancel();
        self.velocity = 0.0;
        self.is_scrolling = false;
        self.scrolling_until = None;
        if let Some(y) = restored {
            log::info!("controller {}: inactive, page restored to y={y}", self.id);
        }
    }

    // ── input entry points ──────────────────────────────────────────────

    pub fn handle_wheel(&mut self, wheel: Wheel, now: Duration) -> Outcome {
        if self.phase != Phase::Active {
            return Outcome::Ignored;
        }
        match input::arbitrate_wheel(wheel, &self.profile) {
            Gesture::VerticalIntent => {
                // Escape hatch: hand the page back and let the event scroll it
                self.deactivate();
                Outcome::PassedThrough
            }
            Gesture::Scroll { delta } => {
                self.apply_scroll(delta, now);
                Outcome::Consumed
            }
            _ => Outcome::Ignored,
        }
    }

    pub fn handle_touch(&mut self, touch: Touch, now: Duration) -> Outcome {
        if self.phase != Phase::Active {
            return Outcome::Ignored;
        }
        match touch.phase {
            TouchPhase::Start => {
                self.tracker.begin(touch.x, touch.y, now);
                Outcome::Ignored
            }
            TouchPhase::Move => {
                match self.tracker.update(touch.x, touch.y, now, &self.profile) {
                    Gesture::Scroll { delta } => {
                        self.apply_scroll(delta, now);
                        Outcome::Consumed
                    }
                    _ => Outcome::PassedThrough,
                }
            }
            TouchPhase::End => match self.tracker.finish(&self.profile) {
                Gesture::Scroll { delta } => {
                    // The fling is a single spent kick, not live input, so it
                    // does not feed back into the velocity estimate.
                    self.offset.scroll_by(delta);
                    self.velocity = 0.0;
                    self.mark_scrolling(now);
                    self.refresh_slide();
                    Outcome::Consumed
                }
                _ => Outcome::Ignored,
            },
            TouchPhase::Cancel => {
                self.tracker.cancel();
                Outcome::Ignored
            }
        }
    }

    pub fn handle_key(&mut self, key: Key, now: Duration) -> Outcome {
        if self.phase != Phase::Active {
            return Outcome::Ignored;
        }
        match input::arbitrate_key(key) {
            Gesture::Step(dir) => {
                let target = self.offset.target() + dir as f32 * self.slide_width;
                self.offset.set_target(target);
                self.mark_scrolling(now);
                self.refresh_slide();
                Outcome::Consumed
            }
            Gesture::JumpToStart => {
                self.offset.set_target(0.0);
                self.mark_scrolling(now);
                self.refresh_slide();
                Outcome::Consumed
            }
            Gesture::JumpToEnd => {
                self.offset.set_target(self.offset.max_offset());
                self.mark_scrolling(now);
                self.refresh_slide();
                Outcome::Consumed
            }
            Gesture::Cancel => {
                self.deactivate();
                Outcome::Consumed
            }
            _ => Outcome::PassedThrough,
        }
    }

    fn apply_scroll(&mut self, delta: f32, now: Duration) {
        let applied = self.offset.scroll_by(delta);
        if let Some(prev) = self.last_input {
            let dt_ms = now.saturating_sub(prev).as_secs_f32() * 1000.0;
            if dt_ms > 0.0 {
                self.velocity = applied / dt_ms;
            }
        }
        self.last_input = Some(now);
        self.mark_scrolling(now);
        self.refresh_slide();
    }

    fn mark_scrolling(&mut self, now: Duration) {
        self.is_scrolling = true;
        self.scrolling_until = Some(now + Duration::from_millis(self.profile.scroll_idle_ms));
    }

    /// Derived from the logical offset, not the smoothed one. A slide counts
    /// as current once its leading boundary has been crossed.
    fn refresh_slide(&mut self) {
        let idx = ((self.offset.target() / self.slide_width) as usize).min(self.total_slides - 1);
        if idx != self.current_slide {
            self.current_slide = idx;
            log::debug!("controller {}: slide -> {idx}", self.id);
            if let Some(cb) = self.on_slide_change.as_mut() {
                cb(idx);
            }
        }
    }

    // ── per-frame update ────────────────────────────────────────────────

    /// Advance the smoother by `dt` seconds and expire the scrolling window.
    /// Safe to call at any cadence; it only ever reads the latest offset.
    pub fn tick(&mut self, dt: f32, now: Duration) {
        self.offset.tick(dt);
        if let Some(until) = self.scrolling_until {
            if now >= until {
                self.scrolling_until = None;
                self.is_scrolling = false;
                // no live input for a full idle window: the velocity is stale
                self.velocity = 0.0;
            }
        }
    }

    // ── outputs ─────────────────────────────────────────────────────────

    /// Negated smoothed offset, ready to use as a horizontal transform.
    pub fn translate_x(&self) -> f32 {
        -self.offset.position()
    }

    pub fn current_slide(&self) -> usize {
        self.current_slide
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    /// True for a short window after the last horizontal input; hosts use it
    /// to suppress hover states during motion.
    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    pub fn is_dragging(&self) -> bool {
        self.tracker.is_dragging()
    }

    /// The logical (unsmoothed) offset.
    pub fn offset(&self) -> f32 {
        self.offset.target()
    }

    pub fn smoothed_offset(&self) -> f32 {
        self.offset.position()
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn max_offset(&self) -> f32 {
        self.offset.max_offset()
    }

    pub fn is_settled(&self) -> bool {
        self.offset.is_settled()
    }
}

impl Drop for ScrollHijackController {
    fn drop(&mut self) {
        // Abrupt teardown takes the same exit path as every other trigger;
        // the page must never stay frozen after the controller is gone.
        self.deactivate();
    }
}
