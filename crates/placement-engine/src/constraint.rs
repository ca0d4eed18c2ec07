//! Schedule constraints: recurring weekly blackout intervals, schoolwide or
//! personal, with grade applicability and creator-based modification rights.
//!
//! The store holds constraints already loaded for one institution and answers
//! the scope/authorization questions the rest of the engine asks. It owns no
//! persistence — the caller loads it and writes changes back through its own
//! repository.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::time::{TimeBlock, TimeOfDay, WeekDay};

/// Grade identifier: 0 is kindergarten, 1-8 are numbered grades.
pub type Grade = u8;

/// Highest grade the planner serves.
pub const MAX_GRADE: Grade = 8;

/// Actor privilege tier. Only the current actor's tier matters to the engine;
/// identity resolution happens upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
}

/// Visibility and authority tier of a constraint.
///
/// Schoolwide constraints bind every grade regardless of the grade filter;
/// personal constraints bind only where their grade set applies. Evaluation
/// matches on this tag in exactly one place, [`ScheduleConstraint::applies_to_grades`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintScope {
    Schoolwide,
    Personal,
}

/// A recurring weekly interval during which scheduling is disallowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConstraint {
    pub id: u64,
    pub scope: ConstraintScope,
    /// Grades the constraint applies to. Non-empty; consulted only for
    /// personal scope (schoolwide binds everyone) but kept for display.
    pub grades: BTreeSet<Grade>,
    /// Short human-readable name, surfaced as the rejection reason when this
    /// constraint blocks a slot.
    pub label: String,
    /// Free-form category from the settings UI ("lunch", "specials", ...).
    pub kind: String,
    pub days: BTreeSet<WeekDay>,
    pub window: TimeBlock,
    pub created_by: String,
}

impl ScheduleConstraint {
    /// Whether the constraint binds the given grade view. An empty view means
    /// "no grade filter" and matches everything.
    pub fn applies_to_grades(&self, visible_grades: &BTreeSet<Grade>) -> bool {
        match self.scope {
            ConstraintScope::Schoolwide => true,
            ConstraintScope::Personal => {
                visible_grades.is_empty() || !self.grades.is_disjoint(visible_grades)
            }
        }
    }

    /// Display info for the UI collaborator.
    pub fn display(&self) -> ConstraintDisplay {
        ConstraintDisplay {
            label: self.label.clone(),
            grades_display: grades_display(&self.grades),
        }
    }
}

/// Per-constraint display contract: label plus a human-readable grade list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintDisplay {
    pub label: String,
    pub grades_display: String,
}

/// Render a grade set for display: kindergarten as `K`, then grade numbers,
/// ascending. `{0, 1, 3}` becomes `"K, 1, 3"`.
pub fn grades_display(grades: &BTreeSet<Grade>) -> String {
    let mut out = String::new();
    for (i, grade) in grades.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if *grade == 0 {
            out.push('K');
        } else {
            let _ = write!(out, "{grade}");
        }
    }
    out
}

/// Input shape for constraint creation, before the store has validated it and
/// assigned an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintDraft {
    pub scope: ConstraintScope,
    pub grades: BTreeSet<Grade>,
    pub label: String,
    pub kind: String,
    pub days: BTreeSet<WeekDay>,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

/// In-memory constraint collection for one institution.
///
/// Mutations (`create`, `delete`) must look atomic to concurrent callers; the
/// store is a plain value, so the caller provides that by not sharing it
/// mutably across threads.
#[derive(Debug, Default, Clone)]
pub struct ConstraintStore {
    constraints: Vec<ScheduleConstraint>,
    next_id: u64,
}

impl ConstraintStore {
    pub fn new() -> ConstraintStore {
        ConstraintStore::default()
    }

    /// Only elevated actors may create schoolwide constraints.
    pub fn can_create_schoolwide(role: Role) -> bool {
        role == Role::Admin
    }

    /// Scope pre-selected in the settings UI for a given role. The store still
    /// re-checks authorization at `create` time; this is a default, not a grant.
    pub fn default_scope_for(role: Role) -> ConstraintScope {
        match role {
            Role::Admin => ConstraintScope::Schoolwide,
            Role::Staff => ConstraintScope::Personal,
        }
    }

    /// Modification rights: the creator, or any elevated actor.
    pub fn can_modify(constraint: &ScheduleConstraint, actor_id: &str, role: Role) -> bool {
        role == Role::Admin || constraint.created_by == actor_id
    }

    /// Validate and add a constraint, assigning its id and creator.
    ///
    /// # Errors
    /// - `Validation` for an empty grade set, a grade above [`MAX_GRADE`], an
    ///   empty day set, or `start_time >= end_time`.
    /// - `AuthorizationDenied` when a non-admin submits schoolwide scope.
    ///
    /// Nothing is added on failure.
    pub fn create(
        &mut self,
        draft: ConstraintDraft,
        actor_id: &str,
        role: Role,
    ) -> Result<ScheduleConstraint> {
        if draft.grades.is_empty() {
            return Err(EngineError::Validation(
                "constraint must apply to at least one grade".into(),
            ));
        }
        if let Some(bad) = draft.grades.iter().find(|g| **g > MAX_GRADE) {
            return Err(EngineError::Validation(format!(
                "grade {bad} is outside the K-{MAX_GRADE} range"
            )));
        }
        if draft.days.is_empty() {
            return Err(EngineError::Validation(
                "constraint must apply to at least one day".into(),
            ));
        }
        let window = TimeBlock::new(draft.start_time, draft.end_time)?;
        if draft.scope == ConstraintScope::Schoolwide && !Self::can_create_schoolwide(role) {
            return Err(EngineError::AuthorizationDenied(
                "only admins may create schoolwide constraints".into(),
            ));
        }

        self.next_id += 1;
        let constraint = ScheduleConstraint {
            id: self.next_id,
            scope: draft.scope,
            grades: draft.grades,
            label: draft.label,
            kind: draft.kind,
            days: draft.days,
            window,
            created_by: actor_id.to_string(),
        };
        self.constraints.push(constraint.clone());
        Ok(constraint)
    }

    /// Remove a constraint.
    ///
    /// # Errors
    /// - `AuthorizationDenied` when the actor neither created it nor holds
    ///   elevated privilege.
    /// - `Validation` when no constraint has the given id.
    pub fn delete(&mut self, id: u64, actor_id: &str, role: Role) -> Result<()> {
        let index = self
            .constraints
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| EngineError::Validation(format!("no constraint with id {id}")))?;
        if !Self::can_modify(&self.constraints[index], actor_id, role) {
            return Err(EngineError::AuthorizationDenied(
                "constraint belongs to another user".into(),
            ));
        }
        self.constraints.remove(index);
        Ok(())
    }

    /// Look up a constraint by id.
    pub fn get(&self, id: u64) -> Option<&ScheduleConstraint> {
        self.constraints.iter().find(|c| c.id == id)
    }

    /// All constraints, insertion-ordered.
    pub fn all(&self) -> &[ScheduleConstraint] {
        &self.constraints
    }

    /// Constraints active for a candidate slot under a grade view.
    ///
    /// A constraint is active when the day is in its day set, its window
    /// overlaps `[time, time + duration)` half-open, and it applies to the
    /// visible grades (schoolwide always does; an empty view matches all).
    ///
    /// Schoolwide constraints sort before personal ones, insertion order
    /// within each tier. Display precedence only — the first match is the
    /// rejection reason shown to the user.
    pub fn active_constraints_for(
        &self,
        day: WeekDay,
        time: TimeOfDay,
        duration_minutes: u16,
        visible_grades: &BTreeSet<Grade>,
    ) -> Vec<&ScheduleConstraint> {
        let mut active: Vec<&ScheduleConstraint> = self
            .constraints
            .iter()
            .filter(|c| {
                c.days.contains(&day)
                    && c.window.overlaps_slot(time, duration_minutes)
                    && c.applies_to_grades(visible_grades)
            })
            .collect();
        // Stable sort preserves insertion order within each scope tier.
        active.sort_by_key(|c| match c.scope {
            ConstraintScope::Schoolwide => 0,
            ConstraintScope::Personal => 1,
        });
        active
    }
}
