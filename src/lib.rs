pub mod animation;
pub mod config;
pub mod controller;
pub mod input;
pub mod lock;
pub mod viewport;

pub use controller::{Outcome, ScrollHijackController};
pub use lock::{PageLock, ScrollAuthority, ViewportLock};
