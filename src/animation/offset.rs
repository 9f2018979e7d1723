use super::spring::Spring;

/// Clamped scroll-offset smoother. `target` is the logical offset the input
/// layer mutates; `position` is the spring-smoothed value the render layer
/// reads. Both are clamped into `[0, max_offset]` at every mutation so no
/// out-of-range value is ever observable, not even transiently.
pub struct OffsetSpring {
    spring: Spring,
    max_offset: f32,
}

impl OffsetSpring {
    pub fn new(omega: f32, max_offset: f32) -> Self {
        Self {
            spring: Spring::resting_at(omega, 0.0),
            max_offset: max_offset.max(0.0),
        }
    }

    /// Add `delta` to the logical offset, clamped. Returns the delta that was
    /// actually applied after clamping.
    pub fn scroll_by(&mut self, delta: f32) -> f32 {
        let before = self.spring.target;
        self.spring.target = (before + delta).clamp(0.0, self.max_offset);
        self.spring.target - before
    }

    pub fn set_target(&mut self, offset: f32) {
        self.spring.target = offset.clamp(0.0, self.max_offset);
    }

    /// Jump both target and smoothed position, killing any in-flight motion.
    pub fn snap(&mut self, offset: f32) {
        self.spring.target = offset.clamp(0.0, self.max_offset);
        self.spring.snap_to_target();
    }

    pub fn tick(&mut self, dt: f32) {
        self.spring.tick(dt);
        self.spring.position = self.spring.position.clamp(0.0, self.max_offset);
    }

    pub fn target(&self) -> f32 {
        self.spring.target
    }

    pub fn position(&self) -> f32 {
        self.spring.position
    }

    pub fn max_offset(&self) -> f32 {
        self.max_offset
    }

    /// Update the range when slide geometry changes, re-clamping both values.
    pub fn set_max_offset(&mut self, max_offset: f32) {
        self.max_offset = max_offset.max(0.0);
        self.spring.target = self.spring.target.clamp(0.0, self.max_offset);
        self.spring.position = self.spring.position.clamp(0.0, self.max_offset);
    }

    pub fn is_settled(&self) -> bool {
        self.spring.is_settled(0.5)
    }
}
