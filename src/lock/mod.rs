use parking_lot::Mutex;
use std::sync::Arc;

/// Owner of the page-freeze side effect while a controller is active.
///
/// Acquire/release must pair exactly once per activation: the value captured
/// at `acquire` is what `release` restores. Both directions are idempotent so
/// bouncy visibility reporting can never stack locks or double-restore.
pub trait ViewportLock {
    /// Freeze the page at `scroll_y`. No-op if already held.
    fn acquire(&mut self, scroll_y: f32);

    /// Undo the freeze, restoring and returning the position captured at
    /// acquire. Returns `None` (and does nothing) if not held.
    fn release(&mut self) -> Option<f32>;

    fn locked_at(&self) -> Option<f32>;
}

/// Lock over an in-process page-offset cell, shared with the host that owns
/// normal vertical scrolling. Release writes the captured position back so
/// the page lands exactly where it was frozen.
pub struct PageLock {
    page_y: Arc<Mutex<f32>>,
    held_at: Option<f32>,
}

impl PageLock {
    pub fn new(page_y: Arc<Mutex<f32>>) -> Self {
        Self { page_y, held_at: None }
    }
}

impl ViewportLock for PageLock {
    fn acquire(&mut self, scroll_y: f32) {
        if self.held_at.is_some() {
            return;
        }
        self.held_at = Some(scroll_y);
        log::debug!("viewport lock acquired at y={scroll_y}");
    }

    fn release(&mut self) -> Option<f32> {
        let y = self.held_at.take()?;
        *self.page_y.lock() = y;
        log::debug!("viewport lock released, page restored to y={y}");
        Some(y)
    }

    fn locked_at(&self) -> Option<f32> {
        self.held_at
    }
}

/// Lock for hosts with no page to freeze (headless or server-side use).
/// Tracks held-ness so the controller's pairing logic still works.
#[derive(Default)]
pub struct NoopLock {
    held_at: Option<f32>,
}

impl NoopLock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ViewportLock for NoopLock {
    fn acquire(&mut self, scroll_y: f32) {
        if self.held_at.is_none() {
            self.held_at = Some(scroll_y);
        }
    }

    fn release(&mut self) -> Option<f32> {
        self.held_at.take()
    }

    fn locked_at(&self) -> Option<f32> {
        self.held_at
    }
}

/// Arbiter guaranteeing at most one scroll-hijacking component owns page
/// scrolling at a time. Purely cooperative: claimants identify themselves by
/// token, and a non-owner's release never steals the claim.
///
/// Hosts that compose several hijacking mechanisms (a horizontal strip plus a
/// full-page overlay, say) hand each the same authority; whichever claims
/// first wins and the other stays dormant until the claim is released.
#[derive(Clone, Default)]
pub struct ScrollAuthority {
    owner: Arc<Mutex<Option<u64>>>,
}

impl ScrollAuthority {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim for `id`. Succeeds when free or when `id` already owns the
    /// claim (re-entry is a no-op, not an error).
    pub fn try_claim(&self, id: u64) -> bool {
        let mut owner = self.owner.lock();
        match *owner {
            None => {
                *owner = Some(id);
                true
            }
            Some(current) => current == id,
        }
    }

    /// Release `id`'s claim. Returns false if `id` is not the owner, in
    /// which case the claim is untouched.
    pub fn release(&self, id: u64) -> bool {
        let mut owner = self.owner.lock();
        if *owner == Some(id) {
            *owner = None;
            true
        } else {
            false
        }
    }

    pub fn owner(&self) -> Option<u64> {
        *self.owner.lock()
    }
}
