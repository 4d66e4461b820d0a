//! Emergency-room guard slots and the cares recorded against them.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{DomainError, DomainResult};

/// A doctor's guard duty on a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EmergencyRoom {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub guard_date: NaiveDate,
}

impl EmergencyRoom {
    pub fn new(doctor_id: Uuid, guard_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            doctor_id,
            guard_date,
        }
    }

    /// Whether a care at `at` falls on this guard.
    pub fn covers(&self, at: NaiveDateTime) -> bool {
        at.date() == self.guard_date
    }

    pub fn reschedule(&mut self, doctor_id: Option<Uuid>, guard_date: Option<NaiveDate>) {
        if let Some(doctor_id) = doctor_id {
            self.doctor_id = doctor_id;
        }
        if let Some(guard_date) = guard_date {
            self.guard_date = guard_date;
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateEmergencyRoom {
    pub doctor_id: Uuid,
    pub guard_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateEmergencyRoom {
    pub doctor_id: Option<Uuid>,
    pub guard_date: Option<NaiveDate>,
}

/// A patient visit attended during a guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EmergencyRoomCare {
    pub id: Uuid,
    pub emergency_room_id: Uuid,
    pub patient_id: Uuid,
    pub care_date: NaiveDateTime,
    pub diagnosis: String,
}

impl EmergencyRoomCare {
    /// Record a care against the guard slot it happened in.
    pub fn new(
        guard: &EmergencyRoom,
        patient_id: Uuid,
        care_date: NaiveDateTime,
        diagnosis: String,
    ) -> DomainResult<Self> {
        ensure_within_guard(guard, care_date)?;

        Ok(Self {
            id: Uuid::new_v4(),
            emergency_room_id: guard.id,
            patient_id,
            care_date,
            diagnosis,
        })
    }

    /// Move the care to another guard slot and/or time.
    pub fn reassign(&mut self, guard: &EmergencyRoom, care_date: NaiveDateTime) -> DomainResult<()> {
        ensure_within_guard(guard, care_date)?;
        self.emergency_room_id = guard.id;
        self.care_date = care_date;
        Ok(())
    }

    pub fn update_diagnosis(&mut self, diagnosis: String) {
        self.diagnosis = diagnosis;
    }
}

fn ensure_within_guard(guard: &EmergencyRoom, care_date: NaiveDateTime) -> DomainResult<()> {
    if !guard.covers(care_date) {
        return Err(DomainError::validation(format!(
            "El doctor no está de guardia el {}",
            care_date.date()
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateEmergencyRoomCare {
    /// Doctor attending the care; must be on guard that day
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    pub care_date: NaiveDateTime,
    #[validate(length(min = 1, max = 1000, message = "El diagnóstico es obligatorio"))]
    pub diagnosis: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateEmergencyRoomCare {
    pub doctor_id: Option<Uuid>,
    pub patient_id: Option<Uuid>,
    pub care_date: Option<NaiveDateTime>,
    #[validate(length(min = 1, max = 1000, message = "El diagnóstico es obligatorio"))]
    pub diagnosis: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, day)
            .unwrap()
            .and_hms_opt(hour, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_guard_covers_any_time_of_its_date() {
        let guard = EmergencyRoom::new(Uuid::new_v4(), NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        assert!(guard.covers(at(3, 0)));
        assert!(guard.covers(at(3, 23)));
        assert!(!guard.covers(at(4, 0)));
    }

    #[test]
    fn test_care_outside_guard_is_rejected() {
        let guard = EmergencyRoom::new(Uuid::new_v4(), NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        let result = EmergencyRoomCare::new(&guard, Uuid::new_v4(), at(5, 10), "Fractura".into());
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_reassign_moves_care_to_new_guard() {
        let first = EmergencyRoom::new(Uuid::new_v4(), NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        let second = EmergencyRoom::new(Uuid::new_v4(), NaiveDate::from_ymd_opt(2024, 6, 4).unwrap());
        let mut care = EmergencyRoomCare::new(&first, Uuid::new_v4(), at(3, 9), "Esguince".into()).unwrap();

        care.reassign(&second, at(4, 11)).unwrap();

        assert_eq!(care.emergency_room_id, second.id);
        assert_eq!(care.care_date, at(4, 11));
    }
}
