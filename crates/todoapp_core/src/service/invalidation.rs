//! View invalidation hook.
//!
//! Every mutation marks all cached views under [`ROOT_PATH`] stale. The
//! presentation layer decides when to re-fetch.

use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};

/// Root of the view tree; invalidating it marks every view stale.
pub const ROOT_PATH: &str = "/";

/// Receiver of "previously fetched views under `path` are stale" signals.
pub trait ViewInvalidator {
    fn invalidate(&self, path: &str);
}

impl<T: ViewInvalidator + ?Sized> ViewInvalidator for &T {
    fn invalidate(&self, path: &str) {
        (**self).invalidate(path);
    }
}

/// Ignores all invalidation signals.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInvalidator;

impl ViewInvalidator for NoopInvalidator {
    fn invalidate(&self, _path: &str) {}
}

/// Monotonic generation counter bumped on every invalidation.
///
/// A renderer remembers the generation it rendered at and re-fetches once
/// [`ViewGeneration::is_stale`] reports a newer one.
#[derive(Debug, Default)]
pub struct ViewGeneration {
    generation: AtomicU64,
}

impl ViewGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub fn is_stale(&self, rendered_at: u64) -> bool {
        self.current() != rendered_at
    }
}

impl ViewInvalidator for ViewGeneration {
    fn invalidate(&self, path: &str) {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        debug!("event=views_invalidated module=service path={path} generation={generation}");
    }
}

#[cfg(test)]
mod tests {
    use super::{ViewGeneration, ViewInvalidator, ROOT_PATH};

    #[test]
    fn generation_advances_on_each_invalidation() {
        let views = ViewGeneration::new();
        let rendered_at = views.current();
        assert!(!views.is_stale(rendered_at));

        views.invalidate(ROOT_PATH);
        notify(&views);

        assert_eq!(views.current(), rendered_at + 2);
        assert!(views.is_stale(rendered_at));
    }

    fn notify(invalidator: impl ViewInvalidator) {
        invalidator.invalidate(ROOT_PATH);
    }
}
