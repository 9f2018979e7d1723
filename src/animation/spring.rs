/// Critically damped spring evaluated with the closed-form solution
/// (Ryan Juckett method). One `exp()` per tick, no oscillation, so the
/// smoothed value can never overshoot its target.
#[derive(Debug, Clone)]
pub struct Spring {
    pub position: f32,
    pub velocity: f32,
    pub target: f32,
    /// Angular frequency (stiffness). Higher = settles faster.
    pub omega: f32,
}

impl Spring {
    pub fn new(omega: f32) -> Self {
        Self { position: 0.0, velocity: 0.0, target: 0.0, omega }
    }

    /// Spring already resting at `position` (target = position, no motion).
    pub fn resting_at(omega: f32, position: f32) -> Self {
        Self { position, velocity: 0.0, target: position, omega }
    }

    /// Advance by `dt` seconds.
    ///
    /// Closed-form critically damped response:
    ///   x(t) = e^(-w t) * (x0 + (v0 + w x0) t)
    ///   v(t) = e^(-w t) * (v0 - w (v0 + w x0) t)
    /// where x is displacement from the target.
    pub fn tick(&mut self, dt: f32) {
        let w = self.omega;
        let x0 = self.position - self.target;
        let v0 = self.velocity;
        let k = v0 + w * x0;
        let decay = (-w * dt).exp();

        self.position = self.target + decay * (x0 + k * dt);
        self.velocity = decay * (v0 - w * k * dt);
    }

    pub fn snap_to_target(&mut self) {
        self.position = self.target;
        self.velocity = 0.0;
    }

    pub fn is_settled(&self, threshold: f32) -> bool {
        (self.position - self.target).abs() < threshold && self.velocity.abs() < threshold
    }
}
