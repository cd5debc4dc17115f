//! Mouse hit-testing zones.
//!
//! Each frame, the renderer marks the screen rectangle of every visible list
//! row under an id of the form `<prefix><index>`.  A click is mapped back to a
//! list index by finding the zone that contains it and stripping the prefix.
//!
//! Every [`ZoneManager`] gets its own prefix from a process-local counter, so
//! ids from two tutors can never be confused.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_PREFIX: AtomicU64 = AtomicU64::new(1);

/// A screen rectangle in cells.  `x`/`y` are 0-based column/row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Returns `true` if the cell at (`col`, `row`) lies inside.
    pub fn contains(self, col: u16, row: u16) -> bool {
        col >= self.x
            && row >= self.y
            && u32::from(col) < u32::from(self.x) + u32::from(self.width)
            && u32::from(row) < u32::from(self.y) + u32::from(self.height)
    }

    /// One past the last row.
    pub fn bottom(self) -> u16 {
        self.y.saturating_add(self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Zone {
    id: String,
    rect: Rect,
}

/// Zones for one tutor.  Cleared and re-marked on every redraw.
#[derive(Debug)]
pub struct ZoneManager {
    prefix: String,
    zones: Vec<Zone>,
}

impl ZoneManager {
    /// Allocate a manager with a fresh prefix.
    pub fn new() -> Self {
        let n = NEXT_PREFIX.fetch_add(1, Ordering::Relaxed);
        Self {
            prefix: format!("zone{n}-"),
            zones: Vec::new(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The id for list index `index`.
    pub fn id(&self, index: usize) -> String {
        format!("{}{index}", self.prefix)
    }

    /// Forget every zone (start of a frame).
    pub fn clear(&mut self) {
        self.zones.clear();
    }

    /// Record `rect` as the zone for list index `index`.
    pub fn mark(&mut self, index: usize, rect: Rect) {
        let id = self.id(index);
        self.zones.retain(|z| z.id != id);
        self.zones.push(Zone { id, rect });
    }

    /// The rectangle recorded under `id`, if any.
    pub fn get(&self, id: &str) -> Option<Rect> {
        self.zones.iter().find(|z| z.id == id).map(|z| z.rect)
    }

    /// The list index whose zone contains (`col`, `row`).
    pub fn hit(&self, col: u16, row: u16) -> Option<usize> {
        let zone = self.zones.iter().find(|z| z.rect.contains(col, row))?;
        zone.id.strip_prefix(&self.prefix)?.parse().ok()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl Default for ZoneManager {
    fn default() -> Self {
        Self::new()
    }
}
