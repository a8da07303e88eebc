//! Suggestion oracle boundary.
//!
//! Instructor and slot suggestions come from an opaque external service.
//! The planning core depends only on [`SuggestionOracle`]; [`TextOracle`]
//! adapts any text-completion backend by building a prompt and parsing the
//! JSON reply. Backend failures and malformed replies never propagate:
//! they are logged and turned into "no suggestion".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{PlannerError, Result};
use crate::models::{Course, Instructor, Session};
use crate::planner::{Slot, SlotKey};

/// A single instructor proposed for a pending session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructorSuggestion {
    #[serde(alias = "instructorId", alias = "instId")]
    pub instructor_id: String,
    #[serde(default)]
    pub reason: String,
}

/// One proposed allocation for an empty slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSuggestion {
    pub date: NaiveDate,
    #[serde(alias = "slotOrdinal")]
    pub slot_ordinal: u32,
    #[serde(alias = "instructorId")]
    pub instructor_id: String,
    #[serde(alias = "unitId", alias = "curriculumUnitId")]
    pub unit_id: String,
    #[serde(default)]
    pub reason: String,
}

/// Context for a single-session suggestion.
#[derive(Debug, Clone, Copy)]
pub struct PendencyPrompt<'a> {
    pub session: &'a Session,
    /// Current problem description (classifier reasons).
    pub problem: &'a str,
    /// Roster; inactive instructors are left out of the prompt.
    pub roster: &'a [Instructor],
}

/// Context for a batch slot-filling suggestion.
#[derive(Debug, Clone)]
pub struct BatchPrompt<'a> {
    pub course: &'a Course,
    pub slots: &'a [Slot],
    pub empty_slots: &'a [SlotKey],
    /// Instructors the oracle may choose from.
    pub instructors: Vec<&'a Instructor>,
}

/// Capability interface of the suggestion service.
pub trait SuggestionOracle {
    /// Proposes one instructor for a pendency, if any.
    fn suggest_single(&self, request: &PendencyPrompt<'_>) -> Option<InstructorSuggestion>;

    /// Proposes allocations for empty slots; empty when nothing usable.
    fn suggest_batch(&self, request: &BatchPrompt<'_>) -> Vec<SlotSuggestion>;
}

/// A text-completion service answering prompts with JSON text.
pub trait CompletionBackend {
    /// Sends a prompt and returns the raw reply.
    fn complete(&self, prompt: &str) -> Result<String>;
}

/// [`SuggestionOracle`] over a [`CompletionBackend`].
#[derive(Debug, Clone)]
pub struct TextOracle<B> {
    backend: B,
}

impl<B: CompletionBackend> TextOracle<B> {
    /// Wraps a backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: CompletionBackend> SuggestionOracle for TextOracle<B> {
    fn suggest_single(&self, request: &PendencyPrompt<'_>) -> Option<InstructorSuggestion> {
        let prompt = pendency_prompt(request);
        let reply = self.backend.complete(&prompt).and_then(|text| parse_single_response(&text));
        match reply {
            Ok(suggestion) => Some(suggestion),
            Err(e) => {
                tracing::warn!(
                    session = %request.session.id,
                    error = %e,
                    "no instructor suggestion"
                );
                None
            }
        }
    }

    fn suggest_batch(&self, request: &BatchPrompt<'_>) -> Vec<SlotSuggestion> {
        if request.empty_slots.is_empty() {
            return Vec::new();
        }
        let prompt = batch_prompt(request);
        let reply = self.backend.complete(&prompt).and_then(|text| parse_batch_response(&text));
        match reply {
            Ok(suggestions) => suggestions,
            Err(e) => {
                tracing::warn!(course = %request.course.name, error = %e, "no batch suggestions");
                Vec::new()
            }
        }
    }
}

/// Builds the prompt for a single pendency.
pub fn pendency_prompt(request: &PendencyPrompt<'_>) -> String {
    let session = request.session;
    let roster: Vec<_> = request
        .roster
        .iter()
        .filter(|i| i.is_active())
        .map(|i| {
            json!({
                "id": i.id,
                "name": i.name,
                "area": i.area.name(),
                "work_shift": i.work_shift.to_string(),
                "contract": i.contract_type,
            })
        })
        .collect();

    format!(
        "You coordinate a training center's timetable. Suggest the best active instructor \
         for this lesson.\n\
         LESSON:\n\
         - Curricular unit: {unit}\n\
         - Cohort: {cohort}\n\
         - Shift: {shift}\n\
         - Current problem: {problem}\n\
         ACTIVE INSTRUCTORS:\n{roster}\n\
         RULES:\n\
         1. Prefer instructors of the same area or with affinity.\n\
         2. The contract work shift must cover the lesson's shift.\n\
         3. Reply ONLY with JSON: {{\"instructor_id\": \"string\", \"reason\": \"short string\"}}",
        unit = session.curricular_unit,
        cohort = session.cohorts.first().map(String::as_str).unwrap_or("-"),
        shift = session.shift,
        problem = request.problem,
        roster = serde_json::Value::Array(roster),
    )
}

/// Builds the prompt for batch slot filling.
pub fn batch_prompt(request: &BatchPrompt<'_>) -> String {
    let empty: Vec<_> = request
        .empty_slots
        .iter()
        .map(|key| {
            let label = request
                .slots
                .iter()
                .find(|s| s.ordinal == key.ordinal)
                .map(|s| s.label.as_str())
                .unwrap_or("");
            json!({ "date": key.date, "slot_ordinal": key.ordinal, "label": label })
        })
        .collect();
    let curriculum: Vec<_> = request
        .course
        .curriculum
        .iter()
        .map(|u| json!({ "id": u.id, "name": u.name, "total_hours": u.total_hours }))
        .collect();
    let instructors: Vec<_> = request
        .instructors
        .iter()
        .map(|i| json!({ "id": i.id, "name": i.name }))
        .collect();

    format!(
        "Fill these empty slots of cohort {name} ({area}).\n\
         EMPTY SLOTS: {empty}\n\
         CURRICULUM: {curriculum}\n\
         AVAILABLE INSTRUCTORS: {instructors}\n\
         RULES:\n\
         1. Favor the units with the least progress.\n\
         2. Never book the same instructor twice at the same time.\n\
         3. Reply with a JSON array: [{{\"date\": \"YYYY-MM-DD\", \"slot_ordinal\": number, \
         \"instructor_id\": \"string\", \"unit_id\": \"string\", \"reason\": \"string\"}}]",
        name = request.course.name,
        area = request.course.area,
        empty = serde_json::Value::Array(empty),
        curriculum = serde_json::Value::Array(curriculum),
        instructors = serde_json::Value::Array(instructors),
    )
}

/// Parses a single-suggestion reply.
pub fn parse_single_response(text: &str) -> Result<InstructorSuggestion> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(PlannerError::Oracle("empty response".into()));
    }
    let suggestion: InstructorSuggestion =
        serde_json::from_str(body).map_err(|e| PlannerError::Oracle(e.to_string()))?;
    if suggestion.instructor_id.trim().is_empty() {
        return Err(PlannerError::Oracle("suggestion without instructor".into()));
    }
    Ok(suggestion)
}

/// Parses a batch reply.
pub fn parse_batch_response(text: &str) -> Result<Vec<SlotSuggestion>> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(body).map_err(|e| PlannerError::Oracle(e.to_string()))
}

/// Removes a surrounding Markdown code fence, if present.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.trim()
}
