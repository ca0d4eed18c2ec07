//! Session placement validation: the single accept/reject decision for a
//! proposed (date, time, duration) slot.
//!
//! Checks run in strict priority order — occupancy, then blackout
//! constraints, then declared availability. A slot that is both occupied and
//! blocked reports "occupied": there is nothing to schedule where something
//! already sits, so occupancy is the more specific signal.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::availability::{self, AvailabilityBlock};
use crate::constraint::{ConstraintStore, Grade};
use crate::time::{TimeOfDay, WeekDay};

/// Lifecycle state of an already-persisted session. Cancelled sessions do not
/// occupy their slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Planned,
    Completed,
    Cancelled,
}

/// Read view of an existing session, as fetched from the external session
/// store for the visible week. Only the fields relevant to placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingSession {
    pub date: NaiveDate,
    pub time: TimeOfDay,
    pub status: SessionStatus,
}

/// Per-slot verdict handed to the UI collaborator. Rejections always carry a
/// human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotVerdict {
    pub accepted: bool,
    pub reason: Option<String>,
}

impl SlotVerdict {
    fn accepted() -> SlotVerdict {
        SlotVerdict {
            accepted: true,
            reason: None,
        }
    }

    fn rejected(reason: impl Into<String>) -> SlotVerdict {
        SlotVerdict {
            accepted: false,
            reason: Some(reason.into()),
        }
    }
}

/// Validate a placement attempt against occupancy, constraints, and declared
/// availability, in that order.
///
/// * `existing` — sessions already persisted for the visible week.
/// * `availability` — the target interventionist's declared blocks, or `None`
///   when no interventionist context exists (a bare grid drop); absence
///   bypasses the availability check entirely.
/// * `visible_grades` — grade view for constraint scoping; empty means no
///   grade filter.
///
/// Weekend dates map to no weekday, so no recurring constraint or
/// availability block can match them; occupancy still applies.
pub fn validate_placement(
    date: NaiveDate,
    time: TimeOfDay,
    duration_minutes: u16,
    existing: &[ExistingSession],
    store: &ConstraintStore,
    availability: Option<&[AvailabilityBlock]>,
    visible_grades: &BTreeSet<Grade>,
) -> SlotVerdict {
    // 1. Occupancy: a non-cancelled session at the exact date and time wins
    //    over every other signal.
    let occupied = existing
        .iter()
        .any(|s| s.date == date && s.time == time && s.status != SessionStatus::Cancelled);
    if occupied {
        return SlotVerdict::rejected("slot occupied");
    }

    let day = WeekDay::from_date(date);

    // 2. Blackout constraints. The first active constraint (schoolwide before
    //    personal) names the rejection.
    if let Some(day) = day {
        if let Some(first) = store
            .active_constraints_for(day, time, duration_minutes, visible_grades)
            .first()
        {
            return SlotVerdict::rejected(first.label.clone());
        }
    }

    // 3. Declared availability, only when an interventionist is in context.
    if let Some(blocks) = availability {
        let available = match day {
            Some(day) => availability::is_available(blocks, day, time, duration_minutes),
            // A weekend date is inside no weekly block; default-open still
            // applies when nothing is declared.
            None => blocks.is_empty(),
        };
        if !available {
            return SlotVerdict::rejected("outside declared availability");
        }
    }

    SlotVerdict::accepted()
}
