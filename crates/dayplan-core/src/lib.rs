//! # Dayplan Core Library
//!
//! This library computes a single day's (or week's) personal agenda by
//! merging two kinds of commitments: fixed-time regular tasks (classes,
//! meetings) and flexible dynamic tasks (assignments, chores) that are
//! fit into whatever time remains. All operations are available via a
//! standalone CLI binary built on top of this crate.
//!
//! ## Architecture
//!
//! - **Scheduling Engine**: a priority scorer, a free-slot finder over
//!   fixed commitments, and a greedy first-fit packer that places ranked
//!   dynamic tasks into the discovered gaps
//! - **Occurrence Resolver**: decides whether a recurring commitment
//!   materializes on a given date
//! - **Pattern Analyzer**: aggregate statistics and qualitative insights
//!   over a task history window
//! - **Advisory Gateway**: best-effort, timeout-bounded recommendations
//!   from an external text-generation service with a deterministic
//!   fallback
//!
//! The engine is stateless and purely input-driven: every invocation
//! works on caller-supplied, immutable-for-the-call task records and
//! holds nothing between calls.
//!
//! ## Key Components
//!
//! - [`Scheduler`]: daily/weekly schedule building
//! - [`SlotFinder`]: free-interval discovery
//! - [`PriorityScorer`]: urgency scoring
//! - [`PatternAnalyzer`]: work pattern reports
//! - [`AdvisoryClient`]: external recommendation gateway

pub mod advisory;
pub mod clock;
pub mod config;
pub mod error;
pub mod patterns;
pub mod recurrence;
pub mod schedule;
pub mod scoring;
pub mod slots;
pub mod task;

pub use advisory::{Advisory, AdvisoryClient, AdvisoryConfig};
pub use config::Config;
pub use error::{AdvisoryError, ConfigError, CoreError, TimeParseError};
pub use patterns::{PatternAnalyzer, WorkPatternReport};
pub use recurrence::occurs_on;
pub use schedule::{ScheduleItem, Scheduler, SchedulerConfig, WeeklySchedule};
pub use scoring::{confidence, PriorityScorer};
pub use slots::{SlotFinder, TimeSlot};
pub use task::{
    DynamicTask, RegularTask, RepeatRule, Task, TaskId, TaskKind, TaskPriority,
};
