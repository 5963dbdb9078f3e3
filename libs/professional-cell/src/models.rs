use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use scheduling_cell::models::{
    BreakWindow, Professional, ShiftHours, VacationSpan, WorkInterval, WorkSchedule,
};
use shared_models::AppError;

/// Raw storage row for a professional. Legacy rows carry loosely-typed
/// schedule fields: `working_days` and `break_times` arrive either as JSON
/// arrays or as JSON-encoded strings, shift bounds as `"HH:MM"` /
/// `"HH:MM:SS"` strings that may be empty. [`ProfessionalRecord::
/// into_professional`] is the only place those shapes are interpreted; the
/// scheduling engine never sees them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfessionalRecord {
    pub id: Uuid,
    pub full_name: String,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub working_days: Option<Value>,
    #[serde(default)]
    pub first_shift_start: Option<String>,
    #[serde(default)]
    pub first_shift_end: Option<String>,
    #[serde(default)]
    pub second_shift_start: Option<String>,
    #[serde(default)]
    pub second_shift_end: Option<String>,
    #[serde(default)]
    pub weekend_shift_active: Option<bool>,
    #[serde(default)]
    pub weekend_shift_start: Option<String>,
    #[serde(default)]
    pub weekend_shift_end: Option<String>,
    #[serde(default)]
    pub break_times: Option<Value>,
    #[serde(default)]
    pub vacation_active: Option<bool>,
    #[serde(default)]
    pub vacation_start: Option<String>,
    #[serde(default)]
    pub vacation_end: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProfessionalRecord {
    /// Parses the row into the strongly-typed schedule the engine consumes.
    /// Lenient throughout: a malformed shift becomes an absent shift, a
    /// short `working_days` array leaves the missing days closed, malformed
    /// break entries are dropped, and vacation needs the active flag plus
    /// both bounds. A single bad field closes that feature, never the row.
    pub fn into_professional(self) -> Professional {
        let working_days = parse_working_days(self.working_days.as_ref(), self.id);

        let first_shift = parse_shift(
            self.first_shift_start.as_deref(),
            self.first_shift_end.as_deref(),
            self.id,
            "first",
        );
        let second_shift = parse_shift(
            self.second_shift_start.as_deref(),
            self.second_shift_end.as_deref(),
            self.id,
            "second",
        );
        let weekend_shift = if self.weekend_shift_active.unwrap_or(false) {
            parse_shift(
                self.weekend_shift_start.as_deref(),
                self.weekend_shift_end.as_deref(),
                self.id,
                "weekend",
            )
        } else {
            None
        };

        let breaks = parse_break_times(self.break_times.as_ref(), self.id);

        let vacation = if self.vacation_active.unwrap_or(false) {
            match (
                parse_date(self.vacation_start.as_deref()),
                parse_date(self.vacation_end.as_deref()),
            ) {
                (Some(start_date), Some(end_date)) => Some(VacationSpan {
                    start_date,
                    end_date,
                }),
                _ => {
                    warn!(
                        "Professional {} has vacation_active without both bounds, ignoring",
                        self.id
                    );
                    None
                }
            }
        } else {
            None
        };

        Professional {
            id: self.id,
            full_name: self.full_name,
            specialty: self.specialty,
            schedule: WorkSchedule {
                working_days,
                first_shift,
                second_shift,
                weekend_shift,
                breaks,
                vacation,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Sunday-first weekly pattern from a JSON array or a JSON-encoded string.
/// Entries beyond the seventh are ignored; missing entries stay closed.
fn parse_working_days(raw: Option<&Value>, id: Uuid) -> [bool; 7] {
    let mut days = [false; 7];
    let Some(value) = unwrap_json_string(raw) else {
        return days;
    };
    match value.as_array() {
        Some(entries) => {
            if entries.len() != 7 {
                warn!(
                    "Professional {} has {} working_days entries, expected 7",
                    id,
                    entries.len()
                );
            }
            for (index, entry) in entries.iter().take(7).enumerate() {
                days[index] = match entry {
                    Value::Bool(flag) => *flag,
                    Value::Number(n) => n.as_i64() == Some(1),
                    _ => false,
                };
            }
        }
        None => warn!("Professional {} has non-array working_days, treating as closed", id),
    }
    days
}

/// Break entries from a JSON array of `{start, end}` objects or its
/// string-encoded form. Unparseable or inverted entries are dropped.
fn parse_break_times(raw: Option<&Value>, id: Uuid) -> Vec<BreakWindow> {
    let Some(value) = unwrap_json_string(raw) else {
        return Vec::new();
    };
    let Some(entries) = value.as_array() else {
        warn!("Professional {} has non-array break_times, ignoring", id);
        return Vec::new();
    };

    let mut breaks = Vec::with_capacity(entries.len());
    for entry in entries {
        let start = entry.get("start").and_then(Value::as_str).and_then(parse_time);
        let end = entry.get("end").and_then(Value::as_str).and_then(parse_time);
        match (start, end) {
            (Some(start), Some(end)) if end > start => {
                breaks.push(BreakWindow { start, end });
            }
            _ => warn!("Professional {} has a malformed break entry, dropping it", id),
        }
    }
    breaks.sort_by_key(|brk| brk.start);
    breaks
}

/// One shift from its two bound strings. Empty strings mean "not
/// configured"; an unparseable or inverted pair closes the shift.
fn parse_shift(
    start: Option<&str>,
    end: Option<&str>,
    id: Uuid,
    label: &str,
) -> Option<ShiftHours> {
    let start_raw = start.map(str::trim).filter(|s| !s.is_empty())?;
    let end_raw = end.map(str::trim).filter(|s| !s.is_empty())?;

    let (Some(start), Some(end)) = (parse_time(start_raw), parse_time(end_raw)) else {
        warn!(
            "Professional {} has an unparseable {} shift ({:?}..{:?}), treating as closed",
            id, label, start_raw, end_raw
        );
        return None;
    };
    if end <= start {
        warn!(
            "Professional {} has an inverted {} shift ({}..{}), treating as closed",
            id, label, start, end
        );
        return None;
    }
    Some(ShiftHours { start, end })
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Some legacy rows store JSON fields re-encoded as strings. Unwrap one
/// level of that before interpreting the value.
fn unwrap_json_string(raw: Option<&Value>) -> Option<Value> {
    match raw? {
        Value::String(inner) => serde_json::from_str(inner).ok(),
        Value::Null => None,
        other => Some(other.clone()),
    }
}

/// Vacation flag plus the open work intervals for one date, the shape the
/// calendar renders (working-hours bands and vacation overlays).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySchedule {
    pub professional_id: Uuid,
    pub date: NaiveDate,
    pub on_vacation: bool,
    pub work_intervals: Vec<WorkInterval>,
}

#[derive(Debug, thiserror::Error)]
pub enum ProfessionalError {
    #[error("Professional not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<ProfessionalError> for AppError {
    fn from(err: ProfessionalError) -> Self {
        match err {
            ProfessionalError::NotFound => AppError::NotFound("Professional not found".to_string()),
            ProfessionalError::Storage(msg) => AppError::Database(msg),
        }
    }
}
