//! Labour register models
//!
//! Workers, their daily attendance, and wage disbursements. Attendance and
//! payments point at a worker by id only; a worker may be deleted while
//! their records remain.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::ids::{AttendanceId, LabourId, PaymentId};
use super::money::Money;
use super::partner::{FundingSource, PaymentMode};

/// Hours in a standard working day; overtime is paid per hour at
/// `daily_wage / STANDARD_DAY_HOURS`
pub const STANDARD_DAY_HOURS: f64 = 8.0;

/// Validation errors for labour records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabourValidationError {
    EmptyName,
    NonPositiveWage,
    InvalidOvertime,
    NonPositiveAmount,
}

impl fmt::Display for LabourValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Labour name cannot be empty"),
            Self::NonPositiveWage => write!(f, "Daily wage must be greater than zero"),
            Self::InvalidOvertime => write!(f, "Overtime hours must be zero or more"),
            Self::NonPositiveAmount => write!(f, "Payment amount must be greater than zero"),
        }
    }
}

impl std::error::Error for LabourValidationError {}

/// A worker and their wage rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabourProfile {
    pub id: LabourId,
    pub name: String,
    #[serde(default)]
    pub mobile: String,
    /// Trade, e.g. "Mistry", "Majdoor", "Plumber"
    #[serde(default)]
    pub work_type: String,
    pub daily_wage: Money,
}

impl LabourProfile {
    pub fn new(name: impl Into<String>, work_type: impl Into<String>, daily_wage: Money) -> Self {
        Self {
            id: LabourId::new(),
            name: name.into(),
            mobile: String::new(),
            work_type: work_type.into(),
            daily_wage,
        }
    }

    pub fn validate(&self) -> Result<(), LabourValidationError> {
        if self.name.trim().is_empty() {
            return Err(LabourValidationError::EmptyName);
        }
        if !self.daily_wage.is_positive() {
            return Err(LabourValidationError::NonPositiveWage);
        }
        Ok(())
    }
}

/// Attendance mark for one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
    #[serde(rename = "Half-Day")]
    HalfDay,
}

impl AttendanceStatus {
    /// Fraction of a day's wage this mark earns
    pub fn day_weight(&self) -> f64 {
        match self {
            Self::Present => 1.0,
            Self::HalfDay => 0.5,
            Self::Absent => 0.0,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "present" | "p" => Some(Self::Present),
            "absent" | "a" => Some(Self::Absent),
            "half-day" | "halfday" | "half" | "h" => Some(Self::HalfDay),
            _ => None,
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
            Self::HalfDay => "Half-Day",
        };
        f.pad(label)
    }
}

/// One attendance mark for one worker on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: AttendanceId,
    pub labour_id: LabourId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub overtime_hours: f64,
}

/// Older backups carry `"overtimeHours": null` for days without overtime
fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

impl Attendance {
    pub fn new(labour_id: LabourId, date: NaiveDate, status: AttendanceStatus) -> Self {
        Self {
            id: AttendanceId::new(),
            labour_id,
            date,
            status,
            overtime_hours: 0.0,
        }
    }

    pub fn with_overtime(mut self, hours: f64) -> Self {
        self.overtime_hours = hours;
        self
    }

    pub fn validate(&self) -> Result<(), LabourValidationError> {
        if !self.overtime_hours.is_finite() || self.overtime_hours < 0.0 {
            return Err(LabourValidationError::InvalidOvertime);
        }
        Ok(())
    }
}

/// Kind of wage disbursement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LabourPaymentType {
    Advance,
    #[default]
    #[serde(rename = "Full Payment")]
    FullPayment,
}

impl LabourPaymentType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "advance" => Some(Self::Advance),
            "full" | "full payment" | "full-payment" => Some(Self::FullPayment),
            _ => None,
        }
    }
}

impl fmt::Display for LabourPaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Advance => "Advance",
            Self::FullPayment => "Full Payment",
        };
        f.pad(label)
    }
}

/// Money handed to a worker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabourPayment {
    pub id: PaymentId,
    pub labour_id: LabourId,
    pub date: NaiveDate,
    pub amount: Money,
    #[serde(rename = "type", default)]
    pub payment_type: LabourPaymentType,
    #[serde(default)]
    pub mode: PaymentMode,
    #[serde(default)]
    pub paid_by: FundingSource,
}

impl LabourPayment {
    pub fn new(labour_id: LabourId, date: NaiveDate, amount: Money, paid_by: FundingSource) -> Self {
        Self {
            id: PaymentId::new(),
            labour_id,
            date,
            amount,
            payment_type: LabourPaymentType::default(),
            mode: PaymentMode::default(),
            paid_by,
        }
    }

    pub fn validate(&self) -> Result<(), LabourValidationError> {
        if !self.amount.is_positive() {
            return Err(LabourValidationError::NonPositiveAmount);
        }
        Ok(())
    }
}
