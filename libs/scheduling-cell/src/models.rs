// libs/scheduling-cell/src/models.rs
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// A scheduled patient encounter on the calendar grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub patient: String,
    pub appointment_type: AppointmentType,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub duration_minutes: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentType {
    Checkup,

    #[serde(alias = "follow_up")]
    Followup,

    #[serde(alias = "general_consultation")]
    Consultation,

    #[serde(alias = "urgent")]
    Emergency,
}

impl AppointmentType {
    pub const ALL: [AppointmentType; 4] = [
        AppointmentType::Checkup,
        AppointmentType::Followup,
        AppointmentType::Consultation,
        AppointmentType::Emergency,
    ];
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentType::Checkup => write!(f, "checkup"),
            AppointmentType::Followup => write!(f, "followup"),
            AppointmentType::Consultation => write!(f, "consultation"),
            AppointmentType::Emergency => write!(f, "emergency"),
        }
    }
}

impl FromStr for AppointmentType {
    type Err = SchedulingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "checkup" => Ok(AppointmentType::Checkup),
            "followup" | "follow_up" => Ok(AppointmentType::Followup),
            "consultation" | "general_consultation" => Ok(AppointmentType::Consultation),
            "emergency" | "urgent" => Ok(AppointmentType::Emergency),
            other => Err(SchedulingError::Validation(format!(
                "unknown appointment type: {other}"
            ))),
        }
    }
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

/// Payload of a submitted "new appointment" form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentDraft {
    pub patient: String,
    pub appointment_type: AppointmentType,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    // Form layers send this as either a number or a numeric string
    #[serde(deserialize_with = "de_duration_minutes")]
    pub duration_minutes: i32,
}

/// Partial update from a submitted "edit appointment" form. The id is taken
/// from the route, never from the payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentPatch {
    #[serde(default)]
    pub patient: Option<String>,
    #[serde(default)]
    pub appointment_type: Option<AppointmentType>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default, with = "hhmm::option")]
    pub time: Option<NaiveTime>,
    #[serde(default, deserialize_with = "de_opt_duration_minutes")]
    pub duration_minutes: Option<i32>,
}

// ==============================================================================
// SESSION STATE MODELS
// ==============================================================================

/// Type restriction applied to the displayed grid. Affects visibility only,
/// never the underlying store contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveFilter {
    #[default]
    All,
    Only(AppointmentType),
}

impl ActiveFilter {
    pub fn admits(&self, appointment_type: AppointmentType) -> bool {
        match self {
            ActiveFilter::All => true,
            ActiveFilter::Only(wanted) => *wanted == appointment_type,
        }
    }
}

impl fmt::Display for ActiveFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveFilter::All => write!(f, "all"),
            ActiveFilter::Only(appointment_type) => write!(f, "{appointment_type}"),
        }
    }
}

impl FromStr for ActiveFilter {
    type Err = SchedulingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(ActiveFilter::All);
        }
        s.parse().map(ActiveFilter::Only)
    }
}

impl Serialize for ActiveFilter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ActiveFilter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// The five business days derived from an anchor date. Recomputed from the
/// anchor on every navigation; never stored between navigations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekWindow {
    pub anchor: NaiveDate,
    pub days: Vec<NaiveDate>,
}

/// Per-dialog state machine: Closed -> Open(prefilled) -> Closed. There is no
/// intermediate "saving" state because store operations are synchronous.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DialogState {
    Closed,
    NewBooking {
        date: NaiveDate,
        #[serde(with = "hhmm")]
        time: NaiveTime,
    },
    EditBooking {
        appointment: Appointment,
    },
}

impl DialogState {
    pub fn is_open(&self) -> bool {
        !matches!(self, DialogState::Closed)
    }
}

/// Human-readable success event emitted after a completed mutation. A
/// notification side channel, not a value callers branch on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

// ==============================================================================
// PRESENTATION FEED MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct GridCell {
    pub date: NaiveDate,
    pub appointments: Vec<Appointment>,
    /// Computed against the unfiltered set; a slot hidden by the active
    /// filter still reports itself as occupied.
    pub available: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GridRow {
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleGrid {
    pub week: WeekWindow,
    pub filter: ActiveFilter,
    pub rows: Vec<GridRow>,
}

// ==============================================================================
// CONFIGURATION
// ==============================================================================

/// Working-day bounds and slot granularity for the calendar grid.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    pub start_hour: u32,
    pub end_hour: u32,
    pub slot_minutes: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            start_hour: 8,
            end_hour: 18,
            slot_minutes: 30,
        }
    }
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum SchedulingError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Invalid slot range: {0}")]
    InvalidRange(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

// ==============================================================================
// SERDE HELPERS
// ==============================================================================

/// Wire format for times-of-day: zero-padded 24-hour `HH:MM`, matching the
/// labels produced by the slot generator.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use chrono::NaiveTime;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match time {
                Some(time) => super::serialize(time, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw = Option::<String>::deserialize(deserializer)?;
            raw.map(|s| {
                NaiveTime::parse_from_str(&s, super::FORMAT).map_err(serde::de::Error::custom)
            })
            .transpose()
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDuration {
    Number(i32),
    Text(String),
}

impl RawDuration {
    fn into_minutes<E: serde::de::Error>(self) -> Result<i32, E> {
        match self {
            RawDuration::Number(minutes) => Ok(minutes),
            RawDuration::Text(raw) => raw
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid duration: {raw}"))),
        }
    }
}

fn de_duration_minutes<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    RawDuration::deserialize(deserializer)?.into_minutes()
}

fn de_opt_duration_minutes<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<RawDuration>::deserialize(deserializer)?
        .map(RawDuration::into_minutes)
        .transpose()
}
