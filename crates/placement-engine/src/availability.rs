//! Availability resolution: is a candidate slot inside an interventionist's
//! declared weekly availability, and is it free of active blackout constraints?
//!
//! Both queries are pure — they read the constraint store and availability
//! blocks already loaded by the caller and mutate nothing.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::constraint::{ConstraintStore, Grade};
use crate::time::{TimeBlock, TimeOfDay, WeekDay};

/// A recurring weekly interval during which one staff member may be scheduled.
/// Owned by exactly one interventionist; the caller passes that person's
/// blocks as a slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityBlock {
    pub days: BTreeSet<WeekDay>,
    pub window: TimeBlock,
}

impl AvailabilityBlock {
    /// True when this block covers the whole slot on the given day.
    pub fn covers(&self, day: WeekDay, time: TimeOfDay, duration_minutes: u16) -> bool {
        self.days.contains(&day) && self.window.contains(time, duration_minutes)
    }
}

/// Whether the interventionist may be scheduled at the slot.
///
/// An empty block list means no restriction was declared, and the answer is
/// `true` for every slot. Default-open is the intended policy: undeclared
/// availability imposes nothing. Otherwise some block for that day must fully
/// contain `[time, time + duration)`.
pub fn is_available(
    blocks: &[AvailabilityBlock],
    day: WeekDay,
    time: TimeOfDay,
    duration_minutes: u16,
) -> bool {
    if blocks.is_empty() {
        return true;
    }
    blocks.iter().any(|b| b.covers(day, time, duration_minutes))
}

/// Whether any constraint is active for the slot under the grade view.
pub fn is_blocked(
    store: &ConstraintStore,
    day: WeekDay,
    time: TimeOfDay,
    duration_minutes: u16,
    visible_grades: &BTreeSet<Grade>,
) -> bool {
    !store
        .active_constraints_for(day, time, duration_minutes, visible_grades)
        .is_empty()
}
