//! Fire-once fade-in bookkeeping
//!
//! An element is observed until it first intersects the viewport, then it is
//! marked visible and dropped from observation for good. Only an explicit
//! [`FadeInAnimator::reset`] makes it eligible to animate again.

use crate::ports::ViewportObserver;

/// CSS `transition-delay` for the `index`-th element of a staggered group
///
/// Rounded to whole milliseconds so `3 * 0.2` reads `0.6s`.
pub fn stagger_delay(index: usize, step_secs: f64) -> String {
    let millis = (index as f64 * step_secs * 1000.0).round();
    format!("{}s", millis / 1000.0)
}

/// Tracks which targets are still observed and which are visible
///
/// Targets are compared with `PartialEq`; pages have a few dozen of them at
/// most, so lookups are linear.
#[derive(Debug)]
pub struct FadeInAnimator<T> {
    observed: Vec<T>,
    visible: Vec<T>,
}

impl<T> Default for FadeInAnimator<T> {
    fn default() -> Self {
        Self {
            observed: Vec::new(),
            visible: Vec::new(),
        }
    }
}

impl<T: PartialEq + Clone> FadeInAnimator<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing a target
    pub fn watch(&mut self, observer: &impl ViewportObserver<T>, target: T) {
        if self.observed.contains(&target) || self.visible.contains(&target) {
            return;
        }
        observer.observe(&target);
        self.observed.push(target);
    }

    /// Handle one intersection notification
    ///
    /// Returns `true` when the target just became visible and should get the
    /// visibility class. Any later notification for it returns `false`.
    pub fn on_intersection(
        &mut self,
        observer: &impl ViewportObserver<T>,
        target: &T,
        intersecting: bool,
    ) -> bool {
        if !intersecting {
            return false;
        }
        self.reveal(observer, target)
    }

    /// Mark a target visible regardless of the viewport
    ///
    /// Observation stops if it was still running. Returns `false` if the
    /// target was already visible.
    pub fn reveal(&mut self, observer: &impl ViewportObserver<T>, target: &T) -> bool {
        if self.visible.contains(target) {
            return false;
        }
        if let Some(pos) = self.observed.iter().position(|t| t == target) {
            let target = self.observed.swap_remove(pos);
            observer.unobserve(&target);
        }
        self.visible.push(target.clone());
        true
    }

    /// Clear a target's visible flag so it can animate again
    ///
    /// Returns whether the target was visible.
    pub fn reset(&mut self, target: &T) -> bool {
        match self.visible.iter().position(|t| t == target) {
            Some(pos) => {
                self.visible.swap_remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn is_visible(&self, target: &T) -> bool {
        self.visible.contains(target)
    }

    pub fn is_observed(&self, target: &T) -> bool {
        self.observed.contains(target)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }
}
