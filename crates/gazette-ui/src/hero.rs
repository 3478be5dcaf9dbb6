//! Homepage hero text rotation.

use std::time::Duration;

/// Delay between the end of one fade-in and the next fade-out.
pub const ROTATION_INTERVAL: Duration = Duration::from_millis(2500);

/// Rotates through the hero headline items one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroRotator {
    len: usize,
    active: usize,
}

/// Visibility changes applied when the fade-out animation ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeroStep {
    /// Item that faded out and is now hidden
    pub hidden: usize,
    /// Item that fades in
    pub shown: usize,
}

impl HeroRotator {
    /// Start on the first item. `None` when there is nothing to rotate.
    pub fn new(len: usize) -> Option<Self> {
        (len > 0).then_some(Self { len, active: 0 })
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Index of the item starting its fade-out when the timer fires.
    pub fn fade_out(&self) -> usize {
        self.active
    }

    /// Move to the next item, wrapping after the last.
    pub fn advance(&mut self) -> HeroStep {
        let hidden = self.active;
        let next = hidden + 1;
        self.active = if next == self.len { 0 } else { next };

        HeroStep {
            hidden,
            shown: self.active,
        }
    }
}
