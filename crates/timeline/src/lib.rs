//! Timeline layout engine for Docket
//!
//! Turns task records with incomplete dates into a laid-out Gantt view:
//! a calendar window, the tasks overlapping it, grouped into swimlanes,
//! paginated, with bar geometry for each row. Everything here is pure and
//! synchronous; "today" is always passed in by the caller.

pub mod calendar;
pub mod config;
pub mod error;
pub mod geometry;
pub mod grouping;
pub mod models;
pub mod overlap;
pub mod pagination;
pub mod resolve;
pub mod timeline;

pub use calendar::{DayCell, Granularity, WeekSegment, Window};
pub use config::TimelineConfig;
pub use error::{TimelineError, TimelineResult};
pub use geometry::{BarGeometry, BarTone, Direction, Edge, GeometryConfig, bar_geometry};
pub use grouping::{EnglishLabels, Group, GroupBy, GroupLabels, group_tasks};
pub use models::{Priority, RawTask, Status};
pub use overlap::{filter_overlapping, overlaps};
pub use pagination::{Page, Paginator};
pub use resolve::{DependencyRefs, ResolvedTask, resolve_task, resolve_tasks};
pub use timeline::{RowGroup, Summary, Timeline, TimelineLayout, TimelineRow};
