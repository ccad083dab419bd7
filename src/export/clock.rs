use std::time::Duration;

/// Source of the waits between animation frames.
pub trait Clock: Send + Sync {
    fn sleep(&self, d: Duration);
}

/// Wall-clock waits on the calling thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&self, d: Duration) {
        std::thread::sleep(d);
    }
}
