//! Storage row shapes and their mapping to API types
//!
//! Rows mirror the tables column for column, with the Spanish column names the
//! schema uses. `into_domain` is the only place where storage naming becomes
//! API naming, so both store backends share it.

use crate::domain::{
    CollaboratorInfo, Cui, FichaError, NewPatient, NewSurgicalEvent, Patient, PatientId,
    PatientSummary, Result, Sex, StudentInfo, SurgicalEvent,
};
use chrono::NaiveDate;

/// `pacientes`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacienteRow {
    pub id: i32,
    pub cui: String,
    pub nombres: String,
    pub apellidos: String,
    pub sexo: String,
    pub fecha_nacimiento: NaiveDate,
}

impl PacienteRow {
    /// Builds the row that an insert of `patient` with identifier `id` stores
    pub fn from_new(id: i32, patient: &NewPatient) -> Self {
        Self {
            id,
            cui: patient.cui.as_str().to_string(),
            nombres: patient.names.clone(),
            apellidos: patient.last_names.clone(),
            sexo: patient.sex.code().to_string(),
            fecha_nacimiento: patient.birthdate,
        }
    }

    /// # Errors
    ///
    /// Returns [`FichaError::Database`] when a stored value violates a domain
    /// rule (for example a CUI that is not 13 digits), which means the table was
    /// written outside this service.
    pub fn into_domain(self) -> Result<Patient> {
        let cui = Cui::new(&self.cui).map_err(|e| corrupt("pacientes.cui", self.id, &e))?;
        let sex = self
            .sexo
            .parse::<Sex>()
            .map_err(|e| corrupt("pacientes.sexo", self.id, &e))?;

        Ok(Patient {
            id: PatientId::new(self.id),
            cui,
            names: self.nombres,
            last_names: self.apellidos,
            sex,
            birthdate: self.fecha_nacimiento,
        })
    }

    pub fn summary(&self) -> PatientSummary {
        PatientSummary {
            id: PatientId::new(self.id),
            nombres: self.nombres.clone(),
            apellidos: self.apellidos.clone(),
        }
    }
}

/// `antecedentes_quirurgicos`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AntecedenteQuirurgicoRow {
    pub id: i32,
    pub id_paciente: i32,
    pub tipo_cirugia: String,
    pub fecha_cirugia: NaiveDate,
    pub complicaciones: Option<String>,
}

impl AntecedenteQuirurgicoRow {
    pub fn from_new(id: i32, patient_id: PatientId, event: &NewSurgicalEvent) -> Self {
        Self {
            id,
            id_paciente: patient_id.value(),
            tipo_cirugia: event.surgery_type.clone(),
            fecha_cirugia: event.surgery_date,
            complicaciones: event.complications.clone(),
        }
    }

    pub fn into_domain(self) -> SurgicalEvent {
        SurgicalEvent {
            id: self.id,
            surgery_type: self.tipo_cirugia,
            surgery_date: self.fecha_cirugia,
            complications: self.complicaciones,
        }
    }
}

/// `estudiantes`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstudianteRow {
    pub id_paciente: i32,
    pub carnet: String,
    pub carrera: String,
    pub correo: Option<String>,
}

impl EstudianteRow {
    pub fn into_domain(self) -> StudentInfo {
        StudentInfo {
            patient_id: PatientId::new(self.id_paciente),
            carnet: self.carnet,
            career: self.carrera,
            email: self.correo,
        }
    }
}

/// `colaboradores`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColaboradorRow {
    pub id_paciente: i32,
    pub codigo: String,
    pub puesto: String,
    pub departamento: String,
}

impl ColaboradorRow {
    pub fn into_domain(self) -> CollaboratorInfo {
        CollaboratorInfo {
            patient_id: PatientId::new(self.id_paciente),
            code: self.codigo,
            position: self.puesto,
            department: self.departamento,
        }
    }
}

fn corrupt(column: &str, id: i32, reason: &str) -> FichaError {
    FichaError::Database(format!("Invalid value in {column} for row {id}: {reason}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> PacienteRow {
        PacienteRow {
            id: 12,
            cui: "1234567890101".to_string(),
            nombres: "José Manuel".to_string(),
            apellidos: "López".to_string(),
            sexo: "M".to_string(),
            fecha_nacimiento: NaiveDate::from_ymd_opt(1999, 12, 31).unwrap(),
        }
    }

    #[test]
    fn test_paciente_row_maps_to_patient() {
        let patient = row().into_domain().unwrap();
        assert_eq!(patient.id, PatientId::new(12));
        assert_eq!(patient.names, "José Manuel");
        assert_eq!(patient.last_names, "López");
        assert_eq!(patient.sex, Sex::Male);
    }

    #[test]
    fn test_paciente_row_with_bad_sex_is_database_error() {
        let mut bad = row();
        bad.sexo = "X".to_string();
        let err = bad.into_domain().unwrap_err();
        assert!(matches!(err, FichaError::Database(ref m) if m.contains("pacientes.sexo")));
    }

    #[test]
    fn test_summary_keeps_storage_names() {
        let summary = row().summary();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["nombres"], "José Manuel");
        assert_eq!(json["apellidos"], "López");
        assert_eq!(json["id"], 12);
    }

    #[test]
    fn test_surgical_row_round_trip_fields() {
        let new = NewSurgicalEvent {
            surgery_type: "Amigdalectomía".to_string(),
            surgery_date: NaiveDate::from_ymd_opt(2010, 5, 4).unwrap(),
            complications: Some("Sangrado leve".to_string()),
        };
        let event = AntecedenteQuirurgicoRow::from_new(3, PatientId::new(12), &new).into_domain();
        assert_eq!(event.id, 3);
        assert_eq!(event.surgery_type, new.surgery_type);
        assert_eq!(event.surgery_date, new.surgery_date);
        assert_eq!(event.complications, new.complications);
    }
}
