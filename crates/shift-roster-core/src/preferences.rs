//! Per-week availability preferences.
//!
//! A soldier states, for each of the 28 cells of a week, whether they are
//! unavailable, prefer the cell, or are neutral. Internally this is a grid with
//! exactly one [`SlotPreference`] per cell; on the wire it keeps the three-list
//! shape clients send:
//!
//! ```json
//! {
//!   "unavailable": [{"day": 0, "timeSlot": 3}],
//!   "preferred":   [{"day": 1, "timeSlot": 0}],
//!   "neutral":     [...]
//! }
//! ```
//!
//! When decoding, cells default to neutral and a cell named in more than one list
//! resolves as unavailable, then preferred, then neutral.

use serde::{Deserialize, Serialize};

use crate::slot::{Cell, BANDS_PER_DAY, DAYS_PER_WEEK};

/// A soldier's stance on one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotPreference {
    /// Cannot take shifts in this cell.
    Unavailable,
    /// Would like shifts in this cell.
    Preferred,
    /// No preference.
    #[default]
    Neutral,
}

/// One preference per cell of a week.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "WirePreferences", into = "WirePreferences")]
pub struct AvailabilityGrid {
    cells: [[SlotPreference; BANDS_PER_DAY as usize]; DAYS_PER_WEEK as usize],
}

impl AvailabilityGrid {
    /// A grid with every cell neutral.
    #[must_use]
    pub fn neutral() -> Self {
        Self::default()
    }

    /// A grid with every cell unavailable.
    #[must_use]
    pub fn all_unavailable() -> Self {
        Self {
            cells: [[SlotPreference::Unavailable; BANDS_PER_DAY as usize]; DAYS_PER_WEEK as usize],
        }
    }

    /// The preference for `cell`.
    #[must_use]
    pub fn get(&self, cell: Cell) -> SlotPreference {
        self.cells[usize::from(cell.day.index())][usize::from(cell.band.index())]
    }

    /// Set the preference for `cell`.
    pub fn set(&mut self, cell: Cell, preference: SlotPreference) {
        self.cells[usize::from(cell.day.index())][usize::from(cell.band.index())] = preference;
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, cell: Cell, preference: SlotPreference) -> Self {
        self.set(cell, preference);
        self
    }

    /// Whether the soldier marked `cell` unavailable.
    #[must_use]
    pub fn is_unavailable(&self, cell: Cell) -> bool {
        self.get(cell) == SlotPreference::Unavailable
    }

    /// All cells with the given preference, day-major.
    pub fn cells_with(&self, preference: SlotPreference) -> impl Iterator<Item = Cell> + '_ {
        Cell::all().filter(move |&cell| self.get(cell) == preference)
    }

    /// Number of cells with the given preference.
    #[must_use]
    pub fn count(&self, preference: SlotPreference) -> usize {
        self.cells_with(preference).count()
    }
}

/// The three-list wire shape of an [`AvailabilityGrid`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePreferences {
    /// Cells the soldier cannot take.
    #[serde(default)]
    pub unavailable: Vec<Cell>,
    /// Cells the soldier would like.
    #[serde(default)]
    pub preferred: Vec<Cell>,
    /// Cells without preference.
    #[serde(default)]
    pub neutral: Vec<Cell>,
}

impl From<WirePreferences> for AvailabilityGrid {
    fn from(wire: WirePreferences) -> Self {
        let mut grid = Self::neutral();
        for cell in wire.preferred {
            grid.set(cell, SlotPreference::Preferred);
        }
        for cell in wire.unavailable {
            grid.set(cell, SlotPreference::Unavailable);
        }
        grid
    }
}

impl From<AvailabilityGrid> for WirePreferences {
    fn from(grid: AvailabilityGrid) -> Self {
        Self {
            unavailable: grid.cells_with(SlotPreference::Unavailable).collect(),
            preferred: grid.cells_with(SlotPreference::Preferred).collect(),
            neutral: grid.cells_with(SlotPreference::Neutral).collect(),
        }
    }
}

impl FromIterator<(Cell, SlotPreference)> for AvailabilityGrid {
    fn from_iter<I: IntoIterator<Item = (Cell, SlotPreference)>>(iter: I) -> Self {
        let mut grid = Self::neutral();
        for (cell, preference) in iter {
            grid.set(cell, preference);
        }
        grid
    }
}
