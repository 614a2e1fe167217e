//! Caller-supplied timeline configuration.

use crate::calendar::Granularity;
use crate::error::{TimelineError, TimelineResult};
use crate::geometry::{Direction, GeometryConfig};
use crate::grouping::GroupBy;
use crate::pagination::{DEFAULT_PAGE_INCREMENT, DEFAULT_PAGE_SIZE};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Everything a caller chooses about a timeline view.
///
/// All values are plain data; nothing is read from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineConfig {
    pub granularity: Granularity,
    /// Any date inside the window to show.
    pub anchor: NaiveDate,
    pub group_by: GroupBy,
    pub direction: Direction,
    pub geometry: GeometryConfig,
    pub initial_page_size: usize,
    pub page_increment: usize,
    /// Stable-sort the filtered tasks by start date before paginating.
    /// Disable when the task source already delivers the wanted order.
    pub sort_by_start: bool,
}

impl TimelineConfig {
    /// Default configuration anchored on `anchor`: month view grouped by
    /// assignee, left-to-right, pages of 10.
    pub fn new(anchor: NaiveDate) -> Self {
        Self {
            granularity: Granularity::default(),
            anchor,
            group_by: GroupBy::default(),
            direction: Direction::default(),
            geometry: GeometryConfig::default(),
            initial_page_size: DEFAULT_PAGE_SIZE,
            page_increment: DEFAULT_PAGE_INCREMENT,
            sort_by_start: true,
        }
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn with_group_by(mut self, group_by: GroupBy) -> Self {
        self.group_by = group_by;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the initial page size and the load-more increment.
    pub fn with_page_sizes(mut self, initial: usize, increment: usize) -> Self {
        self.initial_page_size = initial;
        self.page_increment = increment;
        self
    }

    /// Check that every size is usable.
    ///
    /// # Errors
    ///
    /// Returns `TimelineError::ZeroValue` for a zero width or page size.
    pub fn validate(&self) -> TimelineResult<()> {
        self.geometry.validate()?;
        if self.initial_page_size == 0 {
            return Err(TimelineError::ZeroValue {
                field: "initial_page_size",
            });
        }
        if self.page_increment == 0 {
            return Err(TimelineError::ZeroValue {
                field: "page_increment",
            });
        }
        Ok(())
    }

    /// Day width for the configured granularity.
    pub fn day_width(&self) -> u32 {
        self.geometry.day_width(self.granularity)
    }
}
