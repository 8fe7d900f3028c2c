//! Decoding of `tokio_postgres` rows into storage row types
//!
//! Columns are read by name; the SELECT lists in [`super::store`] must alias
//! them accordingly.

use crate::adapters::database::rows::{
    AntecedenteQuirurgicoRow, ColaboradorRow, EstudianteRow, PacienteRow,
};
use crate::domain::{FichaError, PatientId, PatientSummary, Result};
use tokio_postgres::Row;

fn decode_error(table: &str, e: tokio_postgres::Error) -> FichaError {
    FichaError::Database(format!("Failed to decode {table} row: {e}"))
}

impl TryFrom<&Row> for PacienteRow {
    type Error = FichaError;

    fn try_from(row: &Row) -> Result<Self> {
        let err = |e| decode_error("pacientes", e);
        Ok(Self {
            id: row.try_get("id").map_err(err)?,
            cui: row.try_get("cui").map_err(err)?,
            nombres: row.try_get("nombres").map_err(err)?,
            apellidos: row.try_get("apellidos").map_err(err)?,
            sexo: row.try_get("sexo").map_err(err)?,
            fecha_nacimiento: row.try_get("fecha_nacimiento").map_err(err)?,
        })
    }
}

impl TryFrom<&Row> for AntecedenteQuirurgicoRow {
    type Error = FichaError;

    fn try_from(row: &Row) -> Result<Self> {
        let err = |e| decode_error("antecedentes_quirurgicos", e);
        Ok(Self {
            id: row.try_get("id").map_err(err)?,
            id_paciente: row.try_get("id_paciente").map_err(err)?,
            tipo_cirugia: row.try_get("tipo_cirugia").map_err(err)?,
            fecha_cirugia: row.try_get("fecha_cirugia").map_err(err)?,
            complicaciones: row.try_get("complicaciones").map_err(err)?,
        })
    }
}

impl TryFrom<&Row> for EstudianteRow {
    type Error = FichaError;

    fn try_from(row: &Row) -> Result<Self> {
        let err = |e| decode_error("estudiantes", e);
        Ok(Self {
            id_paciente: row.try_get("id_paciente").map_err(err)?,
            carnet: row.try_get("carnet").map_err(err)?,
            carrera: row.try_get("carrera").map_err(err)?,
            correo: row.try_get("correo").map_err(err)?,
        })
    }
}

impl TryFrom<&Row> for ColaboradorRow {
    type Error = FichaError;

    fn try_from(row: &Row) -> Result<Self> {
        let err = |e| decode_error("colaboradores", e);
        Ok(Self {
            id_paciente: row.try_get("id_paciente").map_err(err)?,
            codigo: row.try_get("codigo").map_err(err)?,
            puesto: row.try_get("puesto").map_err(err)?,
            departamento: row.try_get("departamento").map_err(err)?,
        })
    }
}

/// Decodes a search row (`id`, `nombres`, `apellidos`)
pub fn summary_from_row(row: &Row) -> Result<PatientSummary> {
    let err = |e| decode_error("search", e);
    Ok(PatientSummary {
        id: PatientId::new(row.try_get("id").map_err(err)?),
        nombres: row.try_get("nombres").map_err(err)?,
        apellidos: row.try_get("apellidos").map_err(err)?,
    })
}
