//! Screen regions occupied by the interactive controls.
//!
//! The renderer records where it drew each control; input handling resolves
//! pointer presses against those regions.

/// A rectangle of terminal cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitRegion {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl HitRegion {
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn contains(&self, column: u16, row: u16) -> bool {
        let right = u32::from(self.x) + u32::from(self.width);
        let bottom = u32::from(self.y) + u32::from(self.height);
        column >= self.x
            && row >= self.y
            && u32::from(column) < right
            && u32::from(row) < bottom
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Affirmative,
    Negative,
}

/// Where the controls were last drawn. `None` when not on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitRegions {
    pub affirmative: Option<HitRegion>,
    pub negative: Option<HitRegion>,
}

impl HitRegions {
    /// Resolve a press to the control it lands on.
    ///
    /// The negative control is drawn on top, so it wins where the two overlap,
    /// unless it has stopped accepting pointer events; then the press falls
    /// through to whatever lies underneath.
    #[must_use]
    pub fn resolve(&self, column: u16, row: u16, negative_accepts_pointer: bool) -> Option<HitTarget> {
        if negative_accepts_pointer
            && self
                .negative
                .is_some_and(|region| region.contains(column, row))
        {
            return Some(HitTarget::Negative);
        }
        if self
            .affirmative
            .is_some_and(|region| region.contains(column, row))
        {
            return Some(HitTarget::Affirmative);
        }
        None
    }
}
