//! Circular carousel controller
//!
//! Keeps an active index over a fixed list of items and advances it on a
//! timer while the pointer is not over the widget. Time is passed in by the
//! caller, so the controller is polled from the frame loop instead of owning
//! a thread.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// One card in the carousel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselItem {
    pub image: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

/// Where a visible card sits relative to the active one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotPosition {
    Previous,
    Active,
    Next,
}

impl SlotPosition {
    /// Horizontal offset in card widths
    pub fn offset(&self) -> f32 {
        match self {
            Self::Previous => -1.0,
            Self::Active => 0.0,
            Self::Next => 1.0,
        }
    }
}

/// A visible card, computed fresh from the active index
#[derive(Debug, Clone, Copy)]
pub struct Slot<'a> {
    pub item: &'a CarouselItem,
    pub index: usize,
    pub position: SlotPosition,
}

/// Auto-advance timer. Owning one means the timer is live; dropping it
/// cancels it.
#[derive(Debug)]
struct AdvanceTimer {
    interval: Duration,
    deadline: Instant,
}

impl AdvanceTimer {
    fn arm(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            deadline: now + interval,
        }
    }

    /// Count the whole intervals that elapsed by `now` and move the deadline
    /// past them. The count saturates after a long suspend.
    fn fire(&mut self, now: Instant) -> u32 {
        if now < self.deadline {
            return 0;
        }
        let interval = self.interval.as_nanos();
        let late = now.duration_since(self.deadline).as_nanos();
        let fired = u32::try_from(late / interval + 1).unwrap_or(u32::MAX);

        // rem < interval, so it fits back into a Duration
        let rem = (late % interval) as u64;
        self.deadline = now + self.interval - Duration::from_nanos(rem);
        fired
    }
}

/// Carousel controller
#[derive(Debug)]
pub struct Carousel {
    items: Vec<CarouselItem>,
    active: usize,
    hovering: bool,
    interval: Option<Duration>,
    timer: Option<AdvanceTimer>,
    disposed: bool,
}

impl Carousel {
    /// Create a carousel at index 0. A `None` or zero interval disables
    /// automatic advance.
    pub fn new(items: Vec<CarouselItem>, interval: Option<Duration>, now: Instant) -> Self {
        let mut carousel = Self {
            items,
            active: 0,
            hovering: false,
            interval: interval.filter(|i| !i.is_zero()),
            timer: None,
            disposed: false,
        };
        carousel.rearm(now);
        carousel
    }

    pub fn items(&self) -> &[CarouselItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Whether the auto-advance timer is currently held
    pub fn is_auto_advancing(&self) -> bool {
        self.timer.is_some()
    }

    /// When the next automatic advance is due
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.as_ref().map(|t| t.deadline)
    }

    /// Step one item, wrapping at both ends. No-op on an empty list.
    pub fn navigate(&mut self, direction: Direction) {
        let count = self.items.len();
        if count == 0 {
            return;
        }
        self.active = match direction {
            Direction::Forward => (self.active + 1) % count,
            Direction::Backward => (self.active + count - 1) % count,
        };
    }

    /// Jump to `index`. Out-of-range indices are rejected and leave the
    /// state untouched.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            log::debug!(
                "Rejected carousel index {} (have {} items)",
                index,
                self.items.len()
            );
            return false;
        }
        self.active = index;
        true
    }

    /// Pointer entered or left the widget
    pub fn set_hovering(&mut self, hovering: bool, now: Instant) {
        if self.hovering == hovering {
            return;
        }
        self.hovering = hovering;
        self.rearm(now);
    }

    /// Replace the item list, resetting to the first item
    pub fn set_items(&mut self, items: Vec<CarouselItem>, now: Instant) {
        self.items = items;
        self.active = 0;
        self.rearm(now);
    }

    /// Run any automatic advances that are due. Returns how many fired.
    pub fn tick(&mut self, now: Instant) -> u32 {
        let Some(timer) = self.timer.as_mut() else {
            return 0;
        };
        let fired = timer.fire(now);
        let count = self.items.len();
        if fired > 0 && count > 0 {
            self.active = (self.active + fired as usize % count) % count;
        }
        fired
    }

    /// Release the timer for good. A disposed carousel never advances again.
    pub fn dispose(&mut self) {
        self.disposed = true;
        if self.timer.take().is_some() {
            log::debug!("Carousel timer released on dispose");
        }
    }

    /// The previous, active and next cards. Empty when there are no items.
    pub fn visible(&self) -> Vec<Slot<'_>> {
        let count = self.items.len();
        if count == 0 {
            return Vec::new();
        }
        let prev = (self.active + count - 1) % count;
        let next = (self.active + 1) % count;

        [
            (prev, SlotPosition::Previous),
            (self.active, SlotPosition::Active),
            (next, SlotPosition::Next),
        ]
        .into_iter()
        .map(|(index, position)| Slot {
            item: &self.items[index],
            index,
            position,
        })
        .collect()
    }

    /// Drop any held timer and take a new one if advancing is allowed
    fn rearm(&mut self, now: Instant) {
        let released = self.timer.take().is_some();
        let allowed = !self.disposed && !self.hovering && !self.items.is_empty();

        match self.interval.filter(|_| allowed) {
            Some(interval) => {
                self.timer = Some(AdvanceTimer::arm(interval, now));
                log::debug!("Carousel timer armed ({:?})", interval);
            }
            None if released => log::debug!("Carousel timer released"),
            None => {}
        }
    }
}
