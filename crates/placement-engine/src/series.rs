//! Series generation: expand one planning request into a dated, linked
//! sequence of session-creation payloads.
//!
//! The date walk is a forward scan, one calendar day at a time — weekend
//! skipping makes the mapping from "N instructional days" to "N calendar
//! dates" non-arithmetic, so there is no closed form. The generator performs
//! no persistence; it hands ordered payloads to the caller's sink and reports
//! how far emission got if the sink fails partway.

use std::collections::BTreeSet;
use std::fmt::Display;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, Result};
use crate::time::{TimeOfDay, WeekDay};

/// Instructional role of a lesson-plan component. Drives the default
/// distribution of parts across a multi-day split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartKind {
    Warmup,
    Review,
    Instruction,
    GuidedPractice,
    IndependentPractice,
    Fluency,
    Assessment,
}

/// One day-assignable component of a lesson plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonPart {
    pub kind: PartKind,
    pub title: String,
    pub detail: String,
    /// Explicit target day (1-based), set by the planner. `None` falls back
    /// to the default table for the split length.
    pub day: Option<u32>,
}

/// One planning action: a single session or a linked multi-day series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesRequest {
    pub group_id: String,
    pub start_date: NaiveDate,
    pub time: TimeOfDay,
    /// Instructional days to generate, 1 upward.
    pub number_of_days: u32,
    /// When true, Saturday/Sunday dates are skipped without counting.
    pub skip_weekends: bool,
    /// When false, only day 1 carries the freeform practice items and
    /// anticipated errors; later days get empty collections.
    pub repeat_activities: bool,
    pub curriculum_position: Option<String>,
    pub parts: Vec<LessonPart>,
    pub practice_items: Vec<String>,
    pub anticipated_errors: Vec<String>,
}

/// One session-creation payload, persisted verbatim by the external session
/// store. Series linkage fields are present only for multi-day requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPayload {
    pub group_id: String,
    pub date: NaiveDate,
    pub time: TimeOfDay,
    pub curriculum_position: Option<String>,
    pub planned_parts: Vec<LessonPart>,
    pub planned_practice: Vec<String>,
    pub planned_errors: Vec<String>,
    pub series_id: Option<Uuid>,
    pub series_order: Option<u32>,
    pub series_total: Option<u32>,
}

/// Default target day for a part kind in an N-day split. Front-loaded:
/// earlier lesson parts land on earlier days, assessment and fluency on the
/// last day. Instructional sequencing, not load balancing.
fn default_day(kind: PartKind, number_of_days: u32) -> u32 {
    use PartKind::*;
    match number_of_days {
        2 => match kind {
            Warmup | Review | Instruction | GuidedPractice => 1,
            IndependentPractice | Fluency | Assessment => 2,
        },
        3 => match kind {
            Warmup | Review | Instruction => 1,
            GuidedPractice | IndependentPractice => 2,
            Fluency | Assessment => 3,
        },
        _ => 1,
    }
}

/// Resolve the day a part lands on: explicit assignment wins, clamped into
/// `1..=number_of_days`; otherwise the default table.
fn resolved_day(part: &LessonPart, number_of_days: u32) -> u32 {
    match part.day {
        Some(day) => day.clamp(1, number_of_days),
        None => default_day(part.kind, number_of_days),
    }
}

/// Walk forward from `start` collecting `count` dates, one calendar day at a
/// time. With `skip_weekends`, dates outside the weekday domain are passed
/// over without counting.
pub fn collect_dates(start: NaiveDate, count: u32, skip_weekends: bool) -> Result<Vec<NaiveDate>> {
    let mut dates = Vec::with_capacity(count as usize);
    let mut cursor = start;
    while dates.len() < count as usize {
        if !skip_weekends || WeekDay::from_date(cursor).is_some() {
            dates.push(cursor);
        }
        cursor = cursor
            .succ_opt()
            .ok_or_else(|| EngineError::Validation("series walked past the last calendar date".into()))?;
    }
    Ok(dates)
}

/// Expand a planning request into dated, linked session payloads, ascending
/// by date.
///
/// A fresh `series_id` is minted only when `number_of_days > 1`; single-day
/// requests carry no linkage fields. Linked payloads get `series_order`
/// `1..=number_of_days` in date order and `series_total = number_of_days`.
///
/// # Errors
/// Returns `EngineError::Validation` when `number_of_days` is zero. No
/// payloads are produced on failure.
pub fn generate_series(request: &SeriesRequest) -> Result<Vec<SessionPayload>> {
    if request.number_of_days == 0 {
        return Err(EngineError::Validation(
            "a series must span at least one day".into(),
        ));
    }

    let dates = collect_dates(request.start_date, request.number_of_days, request.skip_weekends)?;
    let multi_day = request.number_of_days > 1;
    let series_id = multi_day.then(Uuid::new_v4);

    let payloads = dates
        .into_iter()
        .enumerate()
        .map(|(index, date)| {
            let order = index as u32 + 1;
            let planned_parts: Vec<LessonPart> = request
                .parts
                .iter()
                .filter(|p| resolved_day(p, request.number_of_days) == order)
                .cloned()
                .collect();
            // Freeform activities repeat across days only on request; the
            // default is plan-once, execute-across-days.
            let first_day_only = order == 1 || request.repeat_activities;
            SessionPayload {
                group_id: request.group_id.clone(),
                date,
                time: request.time,
                curriculum_position: request.curriculum_position.clone(),
                planned_parts,
                planned_practice: if first_day_only {
                    request.practice_items.clone()
                } else {
                    Vec::new()
                },
                planned_errors: if first_day_only {
                    request.anticipated_errors.clone()
                } else {
                    Vec::new()
                },
                series_id,
                series_order: multi_day.then_some(order),
                series_total: multi_day.then_some(request.number_of_days),
            }
        })
        .collect();

    Ok(payloads)
}

/// Hand generated payloads to a persistence sink, one at a time in ascending
/// series order.
///
/// Emission stops at the first sink failure. Already-persisted sessions are
/// not rolled back — the engine holds no transaction across the external
/// store — and the returned [`EngineError::PartialSeries`] names the orders
/// that succeeded so the caller can offer retry or cleanup.
pub fn emit_series<E, F>(payloads: &[SessionPayload], mut persist: F) -> Result<()>
where
    E: Display,
    F: FnMut(&SessionPayload) -> std::result::Result<(), E>,
{
    let total = payloads.len() as u32;
    let mut succeeded = Vec::new();
    for (index, payload) in payloads.iter().enumerate() {
        let order = payload.series_order.unwrap_or(index as u32 + 1);
        if let Err(e) = persist(payload) {
            return Err(EngineError::PartialSeries {
                succeeded,
                failed_order: order,
                total,
                message: e.to_string(),
            });
        }
        succeeded.push(order);
    }
    Ok(())
}

/// Convenience for callers that already know the weekday spread of a series:
/// the distinct weekdays the generated dates fall on, in schedule order.
pub fn weekdays_covered(payloads: &[SessionPayload]) -> BTreeSet<WeekDay> {
    payloads
        .iter()
        .filter_map(|p| WeekDay::from_date(p.date))
        .collect()
}
