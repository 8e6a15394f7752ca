use std::thread;

/// # Pill
///
/// A panic propagation guard held by the worker loop.
///
/// When the worker panics, the `Pill` is dropped during unwinding and
/// re-raises the panic on whoever observes the drop, instead of letting the
/// runner silently lose its only consumer and leave producers blocked on a
/// queue nobody drains.
pub(crate) struct Pill {}

impl Pill {
    pub fn new() -> Self {
        Self {}
    }
}

impl Drop for Pill {
    fn drop(&mut self) {
        if thread::panicking() {
            panic!("Worker panicked - propagating panic to parent thread");
        }
    }
}
