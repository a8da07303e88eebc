//! Instructor model.
//!
//! Instructors are the human resources sessions are assigned to. The
//! contract's [`WorkShift`] constrains which session shifts are valid;
//! a mismatch is flagged by the conflict classifier, never rejected.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::WorkShift;

/// Technical area of an instructor or course.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TechnicalArea {
    #[serde(alias = "Logística")]
    Logistics,
    #[serde(alias = "Automação")]
    Automation,
    #[serde(alias = "Mecânica")]
    Mechanics,
    #[serde(alias = "Tecnologia da Informação")]
    InformationTechnology,
    #[serde(alias = "Elétrica")]
    Electrical,
    #[serde(alias = "Automotiva")]
    Automotive,
    #[default]
    #[serde(alias = "Não Definida")]
    Undefined,
}

impl TechnicalArea {
    /// Human-readable area name.
    pub fn name(self) -> &'static str {
        match self {
            TechnicalArea::Logistics => "Logistics",
            TechnicalArea::Automation => "Automation",
            TechnicalArea::Mechanics => "Mechanics",
            TechnicalArea::InformationTechnology => "Information Technology",
            TechnicalArea::Electrical => "Electrical",
            TechnicalArea::Automotive => "Automotive",
            TechnicalArea::Undefined => "Undefined",
        }
    }

    /// Whether the area is set to something other than `Undefined`.
    #[inline]
    pub fn is_defined(self) -> bool {
        self != TechnicalArea::Undefined
    }
}

impl fmt::Display for TechnicalArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How an instructor is paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractType {
    /// Fixed monthly salary.
    #[default]
    #[serde(alias = "MENSALISTA")]
    Salaried,
    /// Paid per hour taught.
    #[serde(alias = "HORISTA")]
    Hourly,
}

impl ContractType {
    /// The other contract type.
    pub fn toggled(self) -> Self {
        match self {
            ContractType::Salaried => ContractType::Hourly,
            ContractType::Hourly => ContractType::Salaried,
        }
    }
}

/// Whether the instructor may receive new sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstructorStatus {
    #[default]
    #[serde(alias = "Ativo")]
    Active,
    #[serde(alias = "Inativo")]
    Inactive,
}

impl InstructorStatus {
    /// The other status.
    pub fn toggled(self) -> Self {
        match self {
            InstructorStatus::Active => InstructorStatus::Inactive,
            InstructorStatus::Inactive => InstructorStatus::Active,
        }
    }
}

/// An individual who may teach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instructor {
    /// Unique instructor identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Technical area.
    pub area: TechnicalArea,
    /// Contract type.
    pub contract_type: ContractType,
    /// Contracted weekly hours.
    pub weekly_hours: f64,
    /// Active or inactive.
    pub status: InstructorStatus,
    /// Shifts the contract covers.
    pub work_shift: WorkShift,
}

impl Instructor {
    /// Creates an active, salaried instructor with a 40h week.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            area: TechnicalArea::Undefined,
            contract_type: ContractType::Salaried,
            weekly_hours: 40.0,
            status: InstructorStatus::Active,
            work_shift: WorkShift::default(),
        }
    }

    /// Sets the technical area.
    pub fn with_area(mut self, area: TechnicalArea) -> Self {
        self.area = area;
        self
    }

    /// Sets the contract type.
    pub fn with_contract(mut self, contract_type: ContractType) -> Self {
        self.contract_type = contract_type;
        self
    }

    /// Sets the weekly hours.
    pub fn with_weekly_hours(mut self, hours: f64) -> Self {
        self.weekly_hours = hours;
        self
    }

    /// Sets the work shift.
    pub fn with_work_shift(mut self, work_shift: WorkShift) -> Self {
        self.work_shift = work_shift;
        self
    }

    /// Marks the instructor inactive.
    pub fn inactive(mut self) -> Self {
        self.status = InstructorStatus::Inactive;
        self
    }

    /// Whether the instructor is active.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == InstructorStatus::Active
    }
}
