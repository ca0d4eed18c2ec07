//! # placement-engine
//!
//! Scheduling and constraint resolution for intervention-session planning.
//!
//! The engine answers one question at a time: may this session be placed in
//! this (day, time, duration) slot? It represents weekly availability and
//! blackout constraints, resolves schoolwide-versus-personal scope and
//! authorization rules, and expands a single planning action into a dated,
//! linked series of sessions. Persistence, identity, and rendering are
//! external collaborators — the engine is pure computation over data the
//! caller has already loaded.
//!
//! ## Modules
//!
//! - [`time`] — weekday domain, wall-clock times, interval overlap, slot generation
//! - [`constraint`] — blackout constraints, scope/authorization, the constraint store
//! - [`availability`] — declared-availability and blocked-slot queries
//! - [`placement`] — the per-slot accept/reject verdict
//! - [`series`] — multi-day series expansion and lesson-part distribution
//! - [`error`] — error types

pub mod availability;
pub mod constraint;
pub mod error;
pub mod placement;
pub mod series;
pub mod time;

pub use availability::{is_available, is_blocked, AvailabilityBlock};
pub use constraint::{
    ConstraintDraft, ConstraintScope, ConstraintStore, Role, ScheduleConstraint,
};
pub use error::EngineError;
pub use placement::{validate_placement, ExistingSession, SessionStatus, SlotVerdict};
pub use series::{generate_series, SeriesRequest, SessionPayload};
pub use time::{generate_slots, overlaps, TimeBlock, TimeOfDay, WeekDay};
