//! PostgreSQL implementation of [`PatientStore`]
//!
//! Every statement is parameterized. Each method takes one pooled connection
//! and lets it drop back into the pool on return.

use crate::adapters::database::rows::{
    AntecedenteQuirurgicoRow, ColaboradorRow, EstudianteRow, PacienteRow,
};
use crate::adapters::database::traits::{PatientStore, SEARCH_LIMIT};
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::adapters::postgresql::models::summary_from_row;
use crate::domain::messages;
use crate::domain::{
    CollaboratorInfo, Cui, FichaError, NewPatient, NewSurgicalEvent, Patient, PatientId,
    PatientSummary, Result, SearchQuery, SearchType, StudentInfo, SurgicalEvent,
};
use async_trait::async_trait;
use tokio_postgres::error::SqlState;

/// PostgreSQL-backed patient store
pub struct PostgreSQLStore {
    client: PostgreSQLClient,
}

impl PostgreSQLStore {
    pub fn new(client: PostgreSQLClient) -> Self {
        Self { client }
    }
}

/// Maps driver errors onto domain errors
///
/// Unique violations become [`FichaError::Conflict`] with `conflict_message`;
/// foreign-key violations become [`FichaError::NotFound`] for the patient.
/// Values too wide for their column become [`FichaError::Validation`].
fn map_db_error(context: &str, conflict_message: &str, e: tokio_postgres::Error) -> FichaError {
    match e.code() {
        Some(code) if *code == SqlState::UNIQUE_VIOLATION => {
            FichaError::Conflict(conflict_message.to_string())
        }
        Some(code) if *code == SqlState::FOREIGN_KEY_VIOLATION => {
            FichaError::NotFound(messages::PATIENT_NOT_FOUND.to_string())
        }
        Some(code) if *code == SqlState::STRING_DATA_RIGHT_TRUNCATION => {
            FichaError::Validation(format!("{context}: {}", truncation_detail(&e)))
        }
        _ => FichaError::Database(format!("{context}: {e}")),
    }
}

fn truncation_detail(e: &tokio_postgres::Error) -> String {
    e.as_db_error()
        .map(|db| db.message().to_string())
        .unwrap_or_else(|| e.to_string())
}

fn query_error(context: &'static str) -> impl Fn(tokio_postgres::Error) -> FichaError {
    move |e| FichaError::Database(format!("{context}: {e}"))
}

/// Escapes LIKE wildcards so user input matches literally
fn like_pattern(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl PatientStore for PostgreSQLStore {
    fn backend_name(&self) -> &'static str {
        "postgresql"
    }

    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await?;
        let pool = self.client.pool_status();
        tracing::debug!(
            size = pool.size,
            available = pool.available,
            max_size = pool.max_size,
            "Connection pool healthy"
        );
        Ok(())
    }

    async fn insert_patient(&self, patient: &NewPatient) -> Result<PatientId> {
        let conn = self.client.get_connection().await?;

        let row = conn
            .query_one(
                r#"
                INSERT INTO pacientes (cui, nombres, apellidos, sexo, fecha_nacimiento)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id
                "#,
                &[
                    &patient.cui.as_str(),
                    &patient.names,
                    &patient.last_names,
                    &patient.sex.code(),
                    &patient.birthdate,
                ],
            )
            .await
            .map_err(|e| map_db_error("Failed to insert patient", messages::CUI_DUPLICATE, e))?;

        let id: i32 = row.try_get("id").map_err(query_error("Failed to read new patient id"))?;
        tracing::debug!(patient_id = id, "Patient inserted");
        Ok(PatientId::new(id))
    }

    async fn find_patient(&self, id: PatientId) -> Result<Option<Patient>> {
        let conn = self.client.get_connection().await?;

        let row = conn
            .query_opt(
                r#"
                SELECT id, cui, nombres, apellidos, sexo, fecha_nacimiento
                FROM pacientes
                WHERE id = $1
                "#,
                &[&id.value()],
            )
            .await
            .map_err(query_error("Failed to fetch patient"))?;

        row.as_ref()
            .map(PacienteRow::try_from)
            .transpose()?
            .map(PacienteRow::into_domain)
            .transpose()
    }

    async fn cui_exists(&self, cui: &Cui) -> Result<bool> {
        let conn = self.client.get_connection().await?;

        let row = conn
            .query_one(
                "SELECT EXISTS (SELECT 1 FROM pacientes WHERE cui = $1) AS existe",
                &[&cui.as_str()],
            )
            .await
            .map_err(query_error("Failed to check CUI"))?;

        row.try_get("existe")
            .map_err(query_error("Failed to read CUI check"))
    }

    async fn search_patients(&self, query: &SearchQuery) -> Result<Vec<PatientSummary>> {
        let conn = self.client.get_connection().await?;
        let limit = SEARCH_LIMIT as i64;

        let rows = match query.search_type {
            SearchType::Nombres => {
                let pattern = like_pattern(&query.query);
                conn.query(
                    r#"
                    SELECT id, nombres, apellidos
                    FROM pacientes
                    WHERE (nombres || ' ' || apellidos) ILIKE $1
                    ORDER BY apellidos, nombres
                    LIMIT $2
                    "#,
                    &[&pattern, &limit],
                )
                .await
            }
            SearchType::Carnet => {
                conn.query(
                    r#"
                    SELECT p.id, p.nombres, p.apellidos
                    FROM pacientes p
                    JOIN estudiantes e ON e.id_paciente = p.id
                    WHERE e.carnet = $1
                    ORDER BY p.apellidos, p.nombres
                    LIMIT $2
                    "#,
                    &[&query.query, &limit],
                )
                .await
            }
            SearchType::CodigoColaborador => {
                conn.query(
                    r#"
                    SELECT p.id, p.nombres, p.apellidos
                    FROM pacientes p
                    JOIN colaboradores c ON c.id_paciente = p.id
                    WHERE c.codigo = $1
                    ORDER BY p.apellidos, p.nombres
                    LIMIT $2
                    "#,
                    &[&query.query, &limit],
                )
                .await
            }
        }
        .map_err(query_error("Failed to search patients"))?;

        rows.iter().map(summary_from_row).collect()
    }

    async fn surgical_history(&self, id: PatientId) -> Result<Vec<SurgicalEvent>> {
        let conn = self.client.get_connection().await?;

        let rows = conn
            .query(
                r#"
                SELECT id, id_paciente, tipo_cirugia, fecha_cirugia, complicaciones
                FROM antecedentes_quirurgicos
                WHERE id_paciente = $1
                ORDER BY fecha_cirugia, id
                "#,
                &[&id.value()],
            )
            .await
            .map_err(query_error("Failed to fetch surgical history"))?;

        rows.iter()
            .map(|row| AntecedenteQuirurgicoRow::try_from(row).map(|r| r.into_domain()))
            .collect()
    }

    async fn insert_surgical_events(
        &self,
        id: PatientId,
        events: &[NewSurgicalEvent],
    ) -> Result<Vec<SurgicalEvent>> {
        let mut conn = self.client.get_connection().await?;
        let client: &mut tokio_postgres::Client = &mut conn;

        let tx = client
            .transaction()
            .await
            .map_err(query_error("Failed to start transaction"))?;

        let statement = tx
            .prepare(
                r#"
                INSERT INTO antecedentes_quirurgicos
                    (id_paciente, tipo_cirugia, fecha_cirugia, complicaciones)
                VALUES ($1, $2, $3, $4)
                RETURNING id, id_paciente, tipo_cirugia, fecha_cirugia, complicaciones
                "#,
            )
            .await
            .map_err(query_error("Failed to prepare surgical event insert"))?;

        let mut inserted = Vec::with_capacity(events.len());
        for event in events {
            let row = tx
                .query_one(
                    &statement,
                    &[
                        &id.value(),
                        &event.surgery_type,
                        &event.surgery_date,
                        &event.complications,
                    ],
                )
                .await
                .map_err(|e| {
                    map_db_error("Failed to insert surgical event", messages::INTERNAL_ERROR, e)
                })?;
            inserted.push(AntecedenteQuirurgicoRow::try_from(&row)?.into_domain());
        }

        tx.commit()
            .await
            .map_err(query_error("Failed to commit surgical events"))?;

        tracing::debug!(
            patient_id = %id,
            count = inserted.len(),
            "Surgical events inserted"
        );
        Ok(inserted)
    }

    async fn student_info(&self, id: PatientId) -> Result<Option<StudentInfo>> {
        let conn = self.client.get_connection().await?;

        let row = conn
            .query_opt(
                r#"
                SELECT id_paciente, carnet, carrera, correo
                FROM estudiantes
                WHERE id_paciente = $1
                "#,
                &[&id.value()],
            )
            .await
            .map_err(query_error("Failed to fetch student info"))?;

        row.as_ref()
            .map(|r| EstudianteRow::try_from(r).map(EstudianteRow::into_domain))
            .transpose()
    }

    async fn collaborator_info(&self, id: PatientId) -> Result<Option<CollaboratorInfo>> {
        let conn = self.client.get_connection().await?;

        let row = conn
            .query_opt(
                r#"
                SELECT id_paciente, codigo, puesto, departamento
                FROM colaboradores
                WHERE id_paciente = $1
                "#,
                &[&id.value()],
            )
            .await
            .map_err(query_error("Failed to fetch collaborator info"))?;

        row.as_ref()
            .map(|r| ColaboradorRow::try_from(r).map(ColaboradorRow::into_domain))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("ana"), "%ana%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
