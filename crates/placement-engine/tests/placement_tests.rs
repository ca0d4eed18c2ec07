//! Tests for the placement validator: verdict priority ordering, cancelled
//! sessions, and the missing-interventionist bypass.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use placement_engine::availability::AvailabilityBlock;
use placement_engine::constraint::{ConstraintDraft, ConstraintScope, ConstraintStore, Role};
use placement_engine::placement::{validate_placement, ExistingSession, SessionStatus};
use placement_engine::time::{TimeBlock, TimeOfDay, WeekDay};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn t(s: &str) -> TimeOfDay {
    s.parse().unwrap()
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn session(d: &str, time: &str, status: SessionStatus) -> ExistingSession {
    ExistingSession {
        date: date(d),
        time: t(time),
        status,
    }
}

/// Store with one schoolwide "Assembly" constraint, Mondays 10:00-11:00.
fn store_with_assembly() -> ConstraintStore {
    let mut store = ConstraintStore::new();
    store
        .create(
            ConstraintDraft {
                scope: ConstraintScope::Schoolwide,
                grades: [0, 1, 2, 3, 4, 5, 6, 7, 8].into_iter().collect(),
                label: "Assembly".to_string(),
                kind: "assembly".to_string(),
                days: [WeekDay::Monday].into_iter().collect(),
                start_time: t("10:00"),
                end_time: t("11:00"),
            },
            "pat",
            Role::Admin,
        )
        .unwrap();
    store
}

fn no_grades() -> BTreeSet<u8> {
    BTreeSet::new()
}

// 2025-01-06 is a Monday.
const MONDAY: &str = "2025-01-06";

// ── Verdicts ────────────────────────────────────────────────────────────────

#[test]
fn clear_slot_is_accepted() {
    let store = ConstraintStore::new();
    let verdict =
        validate_placement(date(MONDAY), t("09:00"), 30, &[], &store, None, &no_grades());
    assert!(verdict.accepted);
    assert!(verdict.reason.is_none());
}

#[test]
fn occupied_slot_is_rejected() {
    let store = ConstraintStore::new();
    let existing = vec![session(MONDAY, "09:00", SessionStatus::Planned)];
    let verdict =
        validate_placement(date(MONDAY), t("09:00"), 30, &existing, &store, None, &no_grades());
    assert!(!verdict.accepted);
    assert_eq!(verdict.reason.as_deref(), Some("slot occupied"));
}

#[test]
fn cancelled_session_does_not_occupy() {
    let store = ConstraintStore::new();
    let existing = vec![session(MONDAY, "09:00", SessionStatus::Cancelled)];
    let verdict =
        validate_placement(date(MONDAY), t("09:00"), 30, &existing, &store, None, &no_grades());
    assert!(verdict.accepted);
}

#[test]
fn completed_session_still_occupies() {
    let store = ConstraintStore::new();
    let existing = vec![session(MONDAY, "09:00", SessionStatus::Completed)];
    let verdict =
        validate_placement(date(MONDAY), t("09:00"), 30, &existing, &store, None, &no_grades());
    assert_eq!(verdict.reason.as_deref(), Some("slot occupied"));
}

#[test]
fn occupancy_is_exact_time_match() {
    let store = ConstraintStore::new();
    // A session at 09:00 does not occupy the 09:30 slot.
    let existing = vec![session(MONDAY, "09:00", SessionStatus::Planned)];
    let verdict =
        validate_placement(date(MONDAY), t("09:30"), 30, &existing, &store, None, &no_grades());
    assert!(verdict.accepted);
}

#[test]
fn blocked_slot_reports_constraint_label() {
    let store = store_with_assembly();
    let verdict =
        validate_placement(date(MONDAY), t("10:15"), 30, &[], &store, None, &no_grades());
    assert!(!verdict.accepted);
    assert_eq!(verdict.reason.as_deref(), Some("Assembly"));
}

#[test]
fn occupied_wins_over_blocked() {
    // Slot both occupied and inside the assembly window: occupancy is the
    // higher-priority signal and must name the rejection.
    let store = store_with_assembly();
    let existing = vec![session(MONDAY, "10:15", SessionStatus::Planned)];
    let verdict =
        validate_placement(date(MONDAY), t("10:15"), 30, &existing, &store, None, &no_grades());
    assert_eq!(verdict.reason.as_deref(), Some("slot occupied"));
}

#[test]
fn outside_availability_is_rejected() {
    let store = ConstraintStore::new();
    let blocks = vec![AvailabilityBlock {
        days: [WeekDay::Monday].into_iter().collect(),
        window: TimeBlock::new(t("09:00"), t("12:00")).unwrap(),
    }];
    let verdict = validate_placement(
        date(MONDAY),
        t("13:00"),
        30,
        &[],
        &store,
        Some(&blocks),
        &no_grades(),
    );
    assert!(!verdict.accepted);
    assert_eq!(verdict.reason.as_deref(), Some("outside declared availability"));
}

#[test]
fn blocked_wins_over_unavailable() {
    let store = store_with_assembly();
    let blocks = vec![AvailabilityBlock {
        days: [WeekDay::Tuesday].into_iter().collect(),
        window: TimeBlock::new(t("09:00"), t("12:00")).unwrap(),
    }];
    let verdict = validate_placement(
        date(MONDAY),
        t("10:15"),
        30,
        &[],
        &store,
        Some(&blocks),
        &no_grades(),
    );
    assert_eq!(verdict.reason.as_deref(), Some("Assembly"));
}

#[test]
fn missing_interventionist_bypasses_availability() {
    // Advisory check only: with no interventionist context the slot passes
    // even though no availability could ever be declared for it.
    let store = ConstraintStore::new();
    let verdict =
        validate_placement(date(MONDAY), t("06:00"), 30, &[], &store, None, &no_grades());
    assert!(verdict.accepted);
}

#[test]
fn default_open_applies_through_the_validator() {
    let store = ConstraintStore::new();
    let blocks: Vec<AvailabilityBlock> = Vec::new();
    let verdict = validate_placement(
        date(MONDAY),
        t("06:00"),
        30,
        &[],
        &store,
        Some(&blocks),
        &no_grades(),
    );
    assert!(verdict.accepted, "zero declared blocks means no restriction");
}

#[test]
fn grade_scoped_personal_constraint_only_blocks_matching_view() {
    let mut store = ConstraintStore::new();
    store
        .create(
            ConstraintDraft {
                scope: ConstraintScope::Personal,
                grades: [3].into_iter().collect(),
                label: "Grade 3 testing".to_string(),
                kind: "testing".to_string(),
                days: [WeekDay::Monday].into_iter().collect(),
                start_time: t("09:00"),
                end_time: t("10:00"),
            },
            "sam",
            Role::Staff,
        )
        .unwrap();

    let view_12: BTreeSet<u8> = [1, 2].into_iter().collect();
    let verdict =
        validate_placement(date(MONDAY), t("09:15"), 30, &[], &store, None, &view_12);
    assert!(verdict.accepted, "disjoint grade view is not blocked");

    let view_34: BTreeSet<u8> = [3, 4].into_iter().collect();
    let verdict =
        validate_placement(date(MONDAY), t("09:15"), 30, &[], &store, None, &view_34);
    assert_eq!(verdict.reason.as_deref(), Some("Grade 3 testing"));
}

#[test]
fn weekend_date_sees_no_constraints_but_occupancy_still_applies() {
    let store = store_with_assembly();
    // 2025-01-04 is a Saturday: the Monday assembly cannot match.
    let verdict =
        validate_placement(date("2025-01-04"), t("10:15"), 30, &[], &store, None, &no_grades());
    assert!(verdict.accepted);

    let existing = vec![session("2025-01-04", "10:15", SessionStatus::Planned)];
    let verdict = validate_placement(
        date("2025-01-04"),
        t("10:15"),
        30,
        &existing,
        &store,
        None,
        &no_grades(),
    );
    assert_eq!(verdict.reason.as_deref(), Some("slot occupied"));
}
