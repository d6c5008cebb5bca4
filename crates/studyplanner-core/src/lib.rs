//! # Studyplanner Core Library
//!
//! This library assigns study and work tasks to free 30-minute blocks over a
//! 30-day horizon while respecting recurring weekly commitments and simple
//! user preferences. It is a single deterministic greedy pass, not a solver.
//!
//! ## Architecture
//!
//! - **Clock**: "now" is an injected capability read once per pass, so a
//!   frozen clock makes every run reproducible
//! - **Schedule**: Request/response types and weekly commitment expansion
//! - **Timeline**: 30-minute block generation and the availability filter
//! - **Task**: Urgency-adjusted ordering and attention-span splitting
//! - **Scheduler**: The greedy placement pass that ties the stages together
//! - **Storage**: TOML-based configuration for CLI defaults
//!
//! ## Key Components
//!
//! - [`Scheduler`]: Greedy placement over an injected [`Clock`]
//! - [`SchedulePlan`]: Schedule plus the skipped/dropped report
//! - [`Config`]: Application configuration management

pub mod clock;
pub mod error;
pub mod schedule;
pub mod scheduler;
pub mod storage;
pub mod task;
pub mod timeline;

pub use clock::{Clock, FixedClock, SystemClock, TIMESTAMP_FORMAT};
pub use error::{ConfigError, CoreError, ParseError, Result, ValidationError};
pub use schedule::{
    CommitmentSkip, EntryType, ExpandedCommitment, FixedCommitment, Preferences, ScheduleEntry,
    ScheduleRequest, ScheduleResponse, Task,
};
pub use scheduler::{generate_schedule, DroppedTask, SchedulePlan, Scheduler, SchedulerConfig};
pub use storage::Config;
pub use task::{split_task, Chunks};
pub use timeline::{PreferredHours, TimeBlock, TimeOfDay};
