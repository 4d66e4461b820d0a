//! Derivations, referrals and the consultations they result in.
//!
//! A derivation moves a patient between two internal departments; a referral
//! brings a patient in from an external medical post. Either one ends in a
//! consultation attended by a doctor and approved by a department head of the
//! destination department.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{DomainError, DomainResult};

// =============================================================================
// Derivation
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Derivation {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub origin_department_id: Uuid,
    pub destination_department_id: Uuid,
    pub derivation_date: NaiveDate,
    pub reason: String,
}

impl Derivation {
    /// Create a derivation between two different departments.
    pub fn new(dto: CreateDerivation) -> DomainResult<Self> {
        ensure_distinct_departments(dto.origin_department_id, dto.destination_department_id)?;

        Ok(Self {
            id: Uuid::new_v4(),
            patient_id: dto.patient_id,
            origin_department_id: dto.origin_department_id,
            destination_department_id: dto.destination_department_id,
            derivation_date: dto.derivation_date,
            reason: dto.reason,
        })
    }

    /// Change origin and/or destination; the result must still differ.
    pub fn change_route(
        &mut self,
        origin_department_id: Option<Uuid>,
        destination_department_id: Option<Uuid>,
    ) -> DomainResult<()> {
        let origin = origin_department_id.unwrap_or(self.origin_department_id);
        let destination = destination_department_id.unwrap_or(self.destination_department_id);
        ensure_distinct_departments(origin, destination)?;

        self.origin_department_id = origin;
        self.destination_department_id = destination;
        Ok(())
    }

    pub fn apply(&mut self, changes: UpdateDerivation) -> DomainResult<()> {
        self.change_route(
            changes.origin_department_id,
            changes.destination_department_id,
        )?;
        if let Some(patient_id) = changes.patient_id {
            self.patient_id = patient_id;
        }
        if let Some(date) = changes.derivation_date {
            self.derivation_date = date;
        }
        if let Some(reason) = changes.reason {
            self.reason = reason;
        }
        Ok(())
    }
}

fn ensure_distinct_departments(origin: Uuid, destination: Uuid) -> DomainResult<()> {
    if origin == destination {
        return Err(DomainError::validation(
            "El departamento de origen y el de destino deben ser distintos",
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateDerivation {
    pub patient_id: Uuid,
    pub origin_department_id: Uuid,
    pub destination_department_id: Uuid,
    pub derivation_date: NaiveDate,
    #[validate(length(min = 1, max = 500, message = "El motivo es obligatorio"))]
    pub reason: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateDerivation {
    pub patient_id: Option<Uuid>,
    pub origin_department_id: Option<Uuid>,
    pub destination_department_id: Option<Uuid>,
    pub derivation_date: Option<NaiveDate>,
    #[validate(length(min = 1, max = 500, message = "El motivo es obligatorio"))]
    pub reason: Option<String>,
}

// =============================================================================
// Referral
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Referral {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub external_post_id: Uuid,
    pub destination_department_id: Uuid,
    pub referral_date: NaiveDate,
    pub reason: String,
}

impl Referral {
    pub fn new(dto: CreateReferral) -> Self {
        Self {
            id: Uuid::new_v4(),
            patient_id: dto.patient_id,
            external_post_id: dto.external_post_id,
            destination_department_id: dto.destination_department_id,
            referral_date: dto.referral_date,
            reason: dto.reason,
        }
    }

    pub fn redirect(&mut self, destination_department_id: Uuid) {
        self.destination_department_id = destination_department_id;
    }

    pub fn apply(&mut self, changes: UpdateReferral) {
        if let Some(patient_id) = changes.patient_id {
            self.patient_id = patient_id;
        }
        if let Some(post_id) = changes.external_post_id {
            self.external_post_id = post_id;
        }
        if let Some(destination) = changes.destination_department_id {
            self.redirect(destination);
        }
        if let Some(date) = changes.referral_date {
            self.referral_date = date;
        }
        if let Some(reason) = changes.reason {
            self.reason = reason;
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateReferral {
    pub patient_id: Uuid,
    pub external_post_id: Uuid,
    pub destination_department_id: Uuid,
    pub referral_date: NaiveDate,
    #[validate(length(min = 1, max = 500, message = "El motivo es obligatorio"))]
    pub reason: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateReferral {
    pub patient_id: Option<Uuid>,
    pub external_post_id: Option<Uuid>,
    pub destination_department_id: Option<Uuid>,
    pub referral_date: Option<NaiveDate>,
    #[validate(length(min = 1, max = 500, message = "El motivo es obligatorio"))]
    pub reason: Option<String>,
}

// =============================================================================
// Consultations
// =============================================================================

/// Consultation resulting from a derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ConsultationDerivation {
    pub id: Uuid,
    pub derivation_id: Uuid,
    pub doctor_id: Uuid,
    pub department_head_id: Uuid,
    pub diagnosis: String,
    pub consultation_date: NaiveDate,
}

impl ConsultationDerivation {
    pub fn new(dto: CreateConsultationDerivation) -> Self {
        Self {
            id: Uuid::new_v4(),
            derivation_id: dto.derivation_id,
            doctor_id: dto.doctor_id,
            department_head_id: dto.department_head_id,
            diagnosis: dto.diagnosis,
            consultation_date: dto.consultation_date,
        }
    }

    pub fn update_diagnosis(&mut self, diagnosis: String) {
        self.diagnosis = diagnosis;
    }

    pub fn apply(&mut self, changes: UpdateConsultation) {
        if let Some(doctor_id) = changes.doctor_id {
            self.doctor_id = doctor_id;
        }
        if let Some(head_id) = changes.department_head_id {
            self.department_head_id = head_id;
        }
        if let Some(diagnosis) = changes.diagnosis {
            self.update_diagnosis(diagnosis);
        }
        if let Some(date) = changes.consultation_date {
            self.consultation_date = date;
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateConsultationDerivation {
    pub derivation_id: Uuid,
    pub doctor_id: Uuid,
    pub department_head_id: Uuid,
    #[validate(length(min = 1, max = 1000, message = "El diagnóstico es obligatorio"))]
    pub diagnosis: String,
    pub consultation_date: NaiveDate,
}

/// Consultation resulting from a referral.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ConsultationReferral {
    pub id: Uuid,
    pub referral_id: Uuid,
    pub doctor_id: Uuid,
    pub department_head_id: Uuid,
    pub diagnosis: String,
    pub consultation_date: NaiveDate,
}

impl ConsultationReferral {
    pub fn new(dto: CreateConsultationReferral) -> Self {
        Self {
            id: Uuid::new_v4(),
            referral_id: dto.referral_id,
            doctor_id: dto.doctor_id,
            department_head_id: dto.department_head_id,
            diagnosis: dto.diagnosis,
            consultation_date: dto.consultation_date,
        }
    }

    pub fn update_diagnosis(&mut self, diagnosis: String) {
        self.diagnosis = diagnosis;
    }

    pub fn apply(&mut self, changes: UpdateConsultation) {
        if let Some(doctor_id) = changes.doctor_id {
            self.doctor_id = doctor_id;
        }
        if let Some(head_id) = changes.department_head_id {
            self.department_head_id = head_id;
        }
        if let Some(diagnosis) = changes.diagnosis {
            self.update_diagnosis(diagnosis);
        }
        if let Some(date) = changes.consultation_date {
            self.consultation_date = date;
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateConsultationReferral {
    pub referral_id: Uuid,
    pub doctor_id: Uuid,
    pub department_head_id: Uuid,
    #[validate(length(min = 1, max = 1000, message = "El diagnóstico es obligatorio"))]
    pub diagnosis: String,
    pub consultation_date: NaiveDate,
}

/// Partial update shared by both consultation kinds.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateConsultation {
    pub doctor_id: Option<Uuid>,
    pub department_head_id: Option<Uuid>,
    #[validate(length(min = 1, max = 1000, message = "El diagnóstico es obligatorio"))]
    pub diagnosis: Option<String>,
    pub consultation_date: Option<NaiveDate>,
}

impl UpdateConsultation {
    /// Whether the update re-points the attending staff.
    pub fn changes_staff(&self) -> bool {
        self.doctor_id.is_some() || self.department_head_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derivation_dto(origin: Uuid, destination: Uuid) -> CreateDerivation {
        CreateDerivation {
            patient_id: Uuid::new_v4(),
            origin_department_id: origin,
            destination_department_id: destination,
            derivation_date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            reason: "Dolor torácico".into(),
        }
    }

    #[test]
    fn test_derivation_requires_distinct_departments() {
        let department = Uuid::new_v4();
        let result = Derivation::new(derivation_dto(department, department));
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_change_route_rejects_same_department() {
        let origin = Uuid::new_v4();
        let mut derivation = Derivation::new(derivation_dto(origin, Uuid::new_v4())).unwrap();

        let result = derivation.change_route(None, Some(origin));

        assert!(result.is_err());
        assert_ne!(derivation.destination_department_id, origin);
    }

    #[test]
    fn test_consultation_update_detects_staff_change() {
        let update = UpdateConsultation {
            diagnosis: Some("Angina estable".into()),
            ..Default::default()
        };
        assert!(!update.changes_staff());

        let update = UpdateConsultation {
            doctor_id: Some(Uuid::new_v4()),
            ..Default::default()
        };
        assert!(update.changes_staff());
    }
}
