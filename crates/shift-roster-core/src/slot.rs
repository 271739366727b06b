//! The slot domain of a week.
//!
//! A week is covered by a fixed grid of slots: every task, on every day, in each
//! of four six-hour time bands. Slots are generated, never stored; their string
//! form (`"{task}_{day}_{band}"`, e.g. `sg_0_0`) is the slot id used on the wire
//! and in storage keys.
//!
//! ```text
//!            band 0        band 1        band 2        band 3
//!            07:00-13:00   13:00-19:00   19:00-01:00   01:00-07:00
//! day 0      sg patrol..   sg patrol..   ...
//! ...
//! day 6
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of days in a week.
pub const DAYS_PER_WEEK: u8 = 7;

/// Number of time bands in a day.
pub const BANDS_PER_DAY: u8 = 4;

/// A task that needs coverage.
///
/// Declaration order is the order tasks are visited within a time band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Task {
    /// Gate guard.
    Sg,
    /// Patrol.
    Patrol,
    /// Four-hour patrol.
    Patrol4h,
}

impl Task {
    /// All tasks in visiting order.
    pub const ALL: [Self; 3] = [Self::Sg, Self::Patrol, Self::Patrol4h];

    /// The id used in slot ids.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sg => "sg",
            Self::Patrol => "patrol",
            Self::Patrol4h => "patrol4h",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Task {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|task| task.as_str() == s)
            .ok_or_else(|| SlotError::UnknownTask(s.to_string()))
    }
}

/// A day of the week, 0 = first day (Monday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(u8);

impl Day {
    /// Create a day from its index.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is not in `0..7`.
    pub const fn new(index: u8) -> Result<Self, SlotError> {
        if index < DAYS_PER_WEEK {
            Ok(Self(index))
        } else {
            Err(SlotError::DayOutOfRange(index))
        }
    }

    /// The index of this day.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// All days in order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..DAYS_PER_WEEK).map(Self)
    }
}

/// One of the four fixed six-hour bands of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum TimeBand {
    /// 07:00-13:00.
    Morning = 0,
    /// 13:00-19:00.
    Afternoon = 1,
    /// 19:00-01:00.
    Evening = 2,
    /// 01:00-07:00.
    Night = 3,
}

impl TimeBand {
    /// All bands in id order.
    pub const ALL: [Self; 4] = [Self::Morning, Self::Afternoon, Self::Evening, Self::Night];

    /// Convert a band index to a `TimeBand`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is not in `0..4`.
    pub const fn from_index(index: u8) -> Result<Self, SlotError> {
        match index {
            0 => Ok(Self::Morning),
            1 => Ok(Self::Afternoon),
            2 => Ok(Self::Evening),
            3 => Ok(Self::Night),
            _ => Err(SlotError::BandOutOfRange(index)),
        }
    }

    /// The index of this band.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// A (day, time band) pair, independent of task.
///
/// This is the unit soldiers state preferences for. On the wire it is
/// `{"day": 0, "timeSlot": 0}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCell", into = "RawCell")]
pub struct Cell {
    /// The day.
    pub day: Day,
    /// The time band.
    pub band: TimeBand,
}

impl Cell {
    /// Create a cell.
    #[must_use]
    pub const fn new(day: Day, band: TimeBand) -> Self {
        Self { day, band }
    }

    /// Create a cell from raw indexes.
    ///
    /// # Errors
    ///
    /// Returns an error if either index is out of range.
    pub fn from_indexes(day: u8, band: u8) -> Result<Self, SlotError> {
        Ok(Self {
            day: Day::new(day)?,
            band: TimeBand::from_index(band)?,
        })
    }

    /// All 28 cells, day-major.
    pub fn all() -> impl Iterator<Item = Self> {
        Day::all().flat_map(|day| TimeBand::ALL.into_iter().map(move |band| Self { day, band }))
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCell {
    day: u8,
    time_slot: u8,
}

impl TryFrom<RawCell> for Cell {
    type Error = SlotError;

    fn try_from(raw: RawCell) -> Result<Self, Self::Error> {
        Self::from_indexes(raw.day, raw.time_slot)
    }
}

impl From<Cell> for RawCell {
    fn from(cell: Cell) -> Self {
        Self {
            day: cell.day.index(),
            time_slot: cell.band.index(),
        }
    }
}

/// One addressable unit of coverage: a task in a cell.
///
/// Field order makes the derived ordering match the enumeration order of a
/// week: day, then band, then task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slot {
    /// The day.
    pub day: Day,
    /// The time band.
    pub band: TimeBand,
    /// The task.
    pub task: Task,
}

/// Slot ids are the string form of a [`Slot`].
pub type SlotId = Slot;

impl Slot {
    /// Create a slot.
    #[must_use]
    pub const fn new(task: Task, day: Day, band: TimeBand) -> Self {
        Self { day, band, task }
    }

    /// The cell this slot falls in.
    #[must_use]
    pub const fn cell(&self) -> Cell {
        Cell::new(self.day, self.band)
    }

    /// Every slot of a week for the given tasks.
    ///
    /// Days are the outer loop, bands the middle loop and `tasks` (in the order
    /// given) the inner loop.
    pub fn for_tasks(tasks: &[Task]) -> impl Iterator<Item = Self> + '_ {
        Cell::all().flat_map(move |cell| {
            tasks
                .iter()
                .map(move |&task| Self::new(task, cell.day, cell.band))
        })
    }

    /// Every slot of a week for all tasks.
    pub fn all() -> impl Iterator<Item = Self> {
        Cell::all().flat_map(|cell| {
            Task::ALL
                .into_iter()
                .map(move |task| Self::new(task, cell.day, cell.band))
        })
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.task, self.day.index(), self.band.index())
    }
}

impl FromStr for Slot {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.rsplitn(3, '_');
        let (Some(band), Some(day), Some(task)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(SlotError::Malformed(s.to_string()));
        };

        let day: u8 = day
            .parse()
            .map_err(|_| SlotError::Malformed(s.to_string()))?;
        let band: u8 = band
            .parse()
            .map_err(|_| SlotError::Malformed(s.to_string()))?;

        Ok(Self::new(
            task.parse()?,
            Day::new(day)?,
            TimeBand::from_index(band)?,
        ))
    }
}

impl TryFrom<String> for Slot {
    type Error = SlotError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Slot> for String {
    fn from(slot: Slot) -> Self {
        slot.to_string()
    }
}

/// Errors that can occur when parsing slots and cells.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlotError {
    /// The slot id is not of the form `task_day_band`.
    #[error("malformed slot id '{0}'")]
    Malformed(String),

    /// The task is not one of the known tasks.
    #[error("unknown task '{0}'")]
    UnknownTask(String),

    /// The day index is out of range.
    #[error("day {0} is out of range (0..=6)")]
    DayOutOfRange(u8),

    /// The time band index is out of range.
    #[error("time slot {0} is out of range (0..=3)")]
    BandOutOfRange(u8),
}
