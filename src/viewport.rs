/// A rectangle in logical pixels (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Overlap with `other`, or `None` when the rects are disjoint.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = (self.x + self.width).min(other.x + other.width);
        let y1 = (self.y + self.height).min(other.y + other.height);
        if x1 > x0 && y1 > y0 {
            Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
        } else {
            None
        }
    }

    /// Fraction of this rect covered by `viewport`, in `[0, 1]`.
    /// Degenerate (zero-area) rects are never visible.
    pub fn visible_ratio(&self, viewport: &Rect) -> f32 {
        let own = self.area();
        if own <= 0.0 {
            return 0.0;
        }
        match self.intersection(viewport) {
            Some(overlap) => (overlap.area() / own).clamp(0.0, 1.0),
            None => 0.0,
        }
    }
}
