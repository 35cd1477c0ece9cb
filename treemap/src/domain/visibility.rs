//! Zoom-driven label visibility.

/// Zoom level at which labels become visible unless configured otherwise.
pub const DEFAULT_ZOOM_THRESHOLD: u8 = 17;

/// Decides whether a zoom change shows or hides the labels.
///
/// Only a crossing of the threshold matters. Levels at or above the threshold
/// show labels; levels below hide them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityController {
    threshold: u8,
}

impl Default for VisibilityController {
    fn default() -> Self {
        Self::new(DEFAULT_ZOOM_THRESHOLD)
    }
}

impl VisibilityController {
    #[must_use]
    pub const fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    #[must_use]
    pub const fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Returns the visibility to apply for a `previous` to `next` transition.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::domain::VisibilityController;
    ///
    /// let controller = VisibilityController::default();
    /// assert_eq!(controller.transition(16, 18), Some(true));
    /// assert_eq!(controller.transition(18, 19), None);
    /// ```
    #[must_use]
    pub const fn transition(&self, previous: u8, next: u8) -> Option<bool> {
        let was_visible = previous >= self.threshold;
        let is_visible = next >= self.threshold;
        if was_visible == is_visible {
            None
        } else {
            Some(is_visible)
        }
    }
}
