//! Roster and activity management on the board.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::{not_found, PlanningBoard};
use crate::error::Result;
use crate::models::{
    ActivityCode, ContractType, Instructor, InstructorActivity, InstructorStatus, Shift,
    TechnicalArea, WorkShift,
};
use crate::planner::generate_id;

impl PlanningBoard {
    fn instructor_mut(&mut self, id: &str) -> Result<&mut Instructor> {
        self.instructors
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| not_found("instructor", id))
    }

    /// Adds an active 40-hour instructor; the name is stored upper-cased.
    ///
    /// Returns the new instructor's id.
    pub fn add_instructor(
        &mut self,
        name: &str,
        area: TechnicalArea,
        contract_type: ContractType,
        work_shift: WorkShift,
    ) -> String {
        let instructor = Instructor::new(generate_id("inst"), name.trim().to_uppercase())
            .with_area(area)
            .with_contract(contract_type)
            .with_work_shift(work_shift);
        let id = instructor.id.clone();
        tracing::info!(instructor = %instructor.name, %id, "instructor added");
        self.instructors.push(instructor);
        id
    }

    /// Flips Active/Inactive (soft delete). Returns the new status.
    pub fn toggle_instructor_status(&mut self, id: &str) -> Result<InstructorStatus> {
        let instructor = self.instructor_mut(id)?;
        instructor.status = instructor.status.toggled();
        Ok(instructor.status)
    }

    /// Removes the instructor record entirely.
    ///
    /// Sessions and activities keep their dangling references; the
    /// classifier treats those as unresolved.
    pub fn remove_instructor(&mut self, id: &str) -> Result<Instructor> {
        let pos = self
            .instructors
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| not_found("instructor", id))?;
        let removed = self.instructors.remove(pos);
        tracing::info!(instructor = %removed.name, %id, "instructor removed");
        Ok(removed)
    }

    /// Flips Salaried/Hourly. Returns the new contract type.
    pub fn toggle_contract(&mut self, id: &str) -> Result<ContractType> {
        let instructor = self.instructor_mut(id)?;
        instructor.contract_type = instructor.contract_type.toggled();
        Ok(instructor.contract_type)
    }

    pub fn set_work_shift(&mut self, id: &str, work_shift: WorkShift) -> Result<()> {
        self.instructor_mut(id)?.work_shift = work_shift;
        Ok(())
    }

    /// Sets the monthly workload; weekly hours are derived from it.
    ///
    /// Returns the resulting weekly hours.
    pub fn set_monthly_hours(&mut self, id: &str, monthly_hours: f64) -> Result<f64> {
        let weeks = f64::from(self.config.weeks_per_month.max(1));
        let instructor = self.instructor_mut(id)?;
        instructor.weekly_hours = monthly_hours / weeks;
        Ok(instructor.weekly_hours)
    }

    /// Records one activity per distinct date, in date order.
    ///
    /// Returns the ids of the created activities.
    pub fn add_activities(
        &mut self,
        instructor_id: &str,
        dates: impl IntoIterator<Item = NaiveDate>,
        shift: Shift,
        code: ActivityCode,
        hours: f64,
    ) -> Result<Vec<String>> {
        if self.instructor(instructor_id).is_none() {
            return Err(not_found("instructor", instructor_id));
        }

        let dates: BTreeSet<NaiveDate> = dates.into_iter().collect();
        let created: Vec<InstructorActivity> = dates
            .into_iter()
            .map(|date| {
                InstructorActivity::new(generate_id("act"), instructor_id, date, shift, code, hours)
            })
            .collect();
        let ids = created.iter().map(|a| a.id.clone()).collect();

        tracing::info!(
            instructor = instructor_id,
            code = %code,
            count = created.len(),
            "activities recorded"
        );
        self.activities.extend(created);
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use crate::board::PlanningBoard;
    use crate::config::PlannerConfig;
    use crate::error::PlannerError;
    use crate::models::{
        ActivityCode, ContractType, InstructorStatus, Shift, TechnicalArea, WorkShift,
    };
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn board_with_one() -> (PlanningBoard, String) {
        let mut board = PlanningBoard::new(PlannerConfig::default());
        let id = board.add_instructor(
            " maria souza ",
            TechnicalArea::Logistics,
            ContractType::Hourly,
            WorkShift::Evening,
        );
        (board, id)
    }

    #[test]
    fn test_add_instructor() {
        let (board, id) = board_with_one();
        let i = board.instructor(&id).unwrap();
        assert_eq!(i.name, "MARIA SOUZA");
        assert_eq!(i.weekly_hours, 40.0);
        assert_eq!(i.status, InstructorStatus::Active);
        assert_eq!(i.contract_type, ContractType::Hourly);
        assert_eq!(i.work_shift, WorkShift::Evening);
    }

    #[test]
    fn test_toggles_and_updates() {
        let (mut board, id) = board_with_one();

        assert_eq!(board.toggle_instructor_status(&id).unwrap(), InstructorStatus::Inactive);
        assert_eq!(board.toggle_instructor_status(&id).unwrap(), InstructorStatus::Active);
        assert_eq!(board.toggle_contract(&id).unwrap(), ContractType::Salaried);

        board.set_work_shift(&id, WorkShift::MorningAfternoon).unwrap();
        assert_eq!(board.instructor(&id).unwrap().work_shift, WorkShift::MorningAfternoon);

        assert_eq!(board.set_monthly_hours(&id, 120.0).unwrap(), 30.0);

        assert!(matches!(
            board.toggle_contract("ghost"),
            Err(PlannerError::NotFound { kind: "instructor", .. })
        ));
    }

    #[test]
    fn test_remove_instructor() {
        let (mut board, id) = board_with_one();
        let removed = board.remove_instructor(&id).unwrap();
        assert_eq!(removed.id, id);
        assert!(board.instructors().is_empty());
        assert!(board.remove_instructor(&id).is_err());
    }

    #[test]
    fn test_add_activities_sorted_and_deduplicated() {
        let (mut board, id) = board_with_one();
        let ids = board
            .add_activities(&id, [d(5), d(3), d(5), d(4)], Shift::Evening, ActivityCode::Pl, 4.0)
            .unwrap();

        assert_eq!(ids.len(), 3);
        let dates: Vec<_> = board.activities().iter().map(|a| a.date).collect();
        assert_eq!(dates, vec![d(3), d(4), d(5)]);
        assert!(board.activities().iter().all(|a| a.instructor_id == id));

        assert!(board
            .add_activities("ghost", [d(3)], Shift::Morning, ActivityCode::Fer, 4.0)
            .is_err());
    }
}
