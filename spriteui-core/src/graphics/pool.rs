// SPDX-License-Identifier: MIT OR Apache-2.0

//! Render target pool.
//!
//! Controls with a unique render target borrow their buffer from here and
//! hand it back when they are hidden, resized or killed, so resizing does
//! not allocate a new GPU object every frame.

use crate::graphics::{RenderBackend, RenderTarget};

/// A pool of released render targets, handed out best-fit.
#[derive(Debug, Default)]
pub struct RenderTargetPool {
    available: Vec<RenderTarget>,
}

impl RenderTargetPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of targets waiting for reuse.
    pub fn len(&self) -> usize {
        self.available.len()
    }

    /// If no target is waiting for reuse.
    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }

    /// Remove and return the smallest pooled target that is at least
    /// `width` x `height`.
    ///
    /// The returned target may be larger than requested. Callers draw into
    /// its top-left `width` x `height` region.
    pub fn take(&mut self, width: u32, height: u32) -> Option<RenderTarget> {
        let index = self
            .available
            .iter()
            .enumerate()
            .filter(|(_, target)| target.fits(width, height))
            .min_by_key(|(_, target)| target.width() as u64 * target.height() as u64)
            .map(|(index, _)| index)?;

        Some(self.available.swap_remove(index))
    }

    /// Take a best-fit target, or create a new one of exactly the requested size.
    pub fn acquire(
        &mut self,
        backend: &mut dyn RenderBackend,
        width: u32,
        height: u32,
    ) -> RenderTarget {
        match self.take(width, height) {
            Some(target) => target,
            None => {
                log::debug!("Allocating new render target of {}x{}", width, height);
                backend.create_render_target(width, height)
            },
        }
    }

    /// Return a target to the pool.
    pub fn release(&mut self, target: RenderTarget) {
        if self.available.iter().any(|t| t.id() == target.id()) {
            log::warn!("Render target {} released twice", target.id());
            return;
        }

        self.available.push(target);
    }

    /// Drop every pooled target.
    pub fn clear(&mut self) {
        self.available.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::headless::HeadlessBackend;

    fn pool_with(backend: &mut HeadlessBackend, sizes: &[u32]) -> RenderTargetPool {
        let mut pool = RenderTargetPool::new();
        for size in sizes {
            pool.release(backend.create_render_target(*size, *size));
        }
        pool
    }

    #[test]
    fn test_best_fit_takes_smallest_that_fits() {
        let mut backend = HeadlessBackend::new();
        let mut pool = pool_with(&mut backend, &[40, 60, 100]);

        let target = pool.acquire(&mut backend, 50, 50);
        assert_eq!((target.width(), target.height()), (60, 60));
        assert_eq!(pool.len(), 2);
        assert!(pool.take(50, 50).is_some_and(|t| t.width() == 100));
    }

    #[test]
    fn test_creates_new_target_when_nothing_fits() {
        let mut backend = HeadlessBackend::new();
        let mut pool = pool_with(&mut backend, &[40, 60, 100]);

        let target = pool.acquire(&mut backend, 200, 200);
        assert_eq!((target.width(), target.height()), (200, 200));
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn test_both_dimensions_must_fit() {
        let mut backend = HeadlessBackend::new();
        let mut pool = RenderTargetPool::new();
        pool.release(backend.create_render_target(300, 10));

        assert!(pool.take(20, 20).is_none());
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_same_target_is_never_pooled_twice() {
        let mut backend = HeadlessBackend::new();
        let mut pool = RenderTargetPool::new();
        let target = backend.create_render_target(10, 10);
        pool.release(target.clone());
        pool.release(target);

        assert_eq!(pool.len(), 1);
        assert!(pool.take(10, 10).is_some());
        assert!(pool.take(10, 10).is_none());
    }
}
