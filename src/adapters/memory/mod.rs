//! In-memory storage backend
//!
//! Keeps the four tables as row vectors behind a single [`RwLock`], using the
//! same row types and mappers as the PostgreSQL backend. Selected with
//! `database_target = "memory"` for local development, and used by the HTTP
//! tests.

use crate::adapters::database::rows::{
    AntecedenteQuirurgicoRow, ColaboradorRow, EstudianteRow, PacienteRow,
};
use crate::adapters::database::traits::{PatientStore, SEARCH_LIMIT};
use crate::domain::messages;
use crate::domain::{
    CollaboratorInfo, Cui, FichaError, NewPatient, NewSurgicalEvent, Patient, PatientId,
    PatientSummary, Result, SearchQuery, SearchType, StudentInfo, SurgicalEvent,
};
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Tables {
    pacientes: Vec<PacienteRow>,
    estudiantes: Vec<EstudianteRow>,
    colaboradores: Vec<ColaboradorRow>,
    antecedentes: Vec<AntecedenteQuirurgicoRow>,
    next_paciente_id: i32,
    next_antecedente_id: i32,
}

impl Tables {
    fn has_patient(&self, id: i32) -> bool {
        self.pacientes.iter().any(|p| p.id == id)
    }

    fn summaries<'a>(&self, rows: impl Iterator<Item = &'a PacienteRow>) -> Vec<PatientSummary> {
        let mut matches: Vec<&PacienteRow> = rows.collect();
        matches.sort_by(|a, b| {
            a.apellidos
                .cmp(&b.apellidos)
                .then_with(|| a.nombres.cmp(&b.nombres))
        });
        matches
            .into_iter()
            .take(SEARCH_LIMIT)
            .map(PacienteRow::summary)
            .collect()
    }

    fn patients_with_ids<'a>(&'a self, ids: Vec<i32>) -> impl Iterator<Item = &'a PacienteRow> {
        self.pacientes.iter().filter(move |p| ids.contains(&p.id))
    }
}

/// Patient store held in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach student data to an existing patient
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown patient and `Conflict` when the
    /// patient already has student data or the carnet is taken.
    pub async fn insert_student(&self, info: StudentInfo) -> Result<()> {
        let mut tables = self.tables.write().await;
        let id = info.patient_id.value();
        if !tables.has_patient(id) {
            return Err(FichaError::NotFound(messages::PATIENT_NOT_FOUND.to_string()));
        }
        if tables
            .estudiantes
            .iter()
            .any(|e| e.id_paciente == id || e.carnet == info.carnet)
        {
            return Err(FichaError::Conflict(format!(
                "Carnet ya existe: {}.",
                info.carnet
            )));
        }
        tables.estudiantes.push(EstudianteRow {
            id_paciente: id,
            carnet: info.carnet,
            carrera: info.career,
            correo: info.email,
        });
        Ok(())
    }

    /// Attach collaborator data to an existing patient
    ///
    /// # Errors
    ///
    /// Same rules as [`MemoryStore::insert_student`], keyed on the code.
    pub async fn insert_collaborator(&self, info: CollaboratorInfo) -> Result<()> {
        let mut tables = self.tables.write().await;
        let id = info.patient_id.value();
        if !tables.has_patient(id) {
            return Err(FichaError::NotFound(messages::PATIENT_NOT_FOUND.to_string()));
        }
        if tables
            .colaboradores
            .iter()
            .any(|c| c.id_paciente == id || c.codigo == info.code)
        {
            return Err(FichaError::Conflict(format!(
                "Código de colaborador ya existe: {}.",
                info.code
            )));
        }
        tables.colaboradores.push(ColaboradorRow {
            id_paciente: id,
            codigo: info.code,
            puesto: info.position,
            departamento: info.department,
        });
        Ok(())
    }
}

#[async_trait]
impl PatientStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }

    async fn insert_patient(&self, patient: &NewPatient) -> Result<PatientId> {
        let mut tables = self.tables.write().await;
        if tables
            .pacientes
            .iter()
            .any(|p| p.cui == patient.cui.as_str())
        {
            return Err(FichaError::Conflict(messages::CUI_DUPLICATE.to_string()));
        }

        tables.next_paciente_id += 1;
        let id = tables.next_paciente_id;
        tables.pacientes.push(PacienteRow::from_new(id, patient));
        tracing::debug!(patient_id = id, "Patient inserted");
        Ok(PatientId::new(id))
    }

    async fn find_patient(&self, id: PatientId) -> Result<Option<Patient>> {
        let tables = self.tables.read().await;
        tables
            .pacientes
            .iter()
            .find(|p| p.id == id.value())
            .cloned()
            .map(PacienteRow::into_domain)
            .transpose()
    }

    async fn cui_exists(&self, cui: &Cui) -> Result<bool> {
        let tables = self.tables.read().await;
        Ok(tables.pacientes.iter().any(|p| p.cui == cui.as_str()))
    }

    async fn search_patients(&self, query: &SearchQuery) -> Result<Vec<PatientSummary>> {
        let tables = self.tables.read().await;
        let value = query.query.as_str();

        let results = match query.search_type {
            SearchType::Nombres => {
                let needle = value.to_lowercase();
                tables.summaries(tables.pacientes.iter().filter(|p| {
                    format!("{} {}", p.nombres, p.apellidos)
                        .to_lowercase()
                        .contains(&needle)
                }))
            }
            SearchType::Carnet => {
                let ids = tables
                    .estudiantes
                    .iter()
                    .filter(|e| e.carnet == value)
                    .map(|e| e.id_paciente)
                    .collect();
                tables.summaries(tables.patients_with_ids(ids))
            }
            SearchType::CodigoColaborador => {
                let ids = tables
                    .colaboradores
                    .iter()
                    .filter(|c| c.codigo == value)
                    .map(|c| c.id_paciente)
                    .collect();
                tables.summaries(tables.patients_with_ids(ids))
            }
        };
        Ok(results)
    }

    async fn surgical_history(&self, id: PatientId) -> Result<Vec<SurgicalEvent>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<AntecedenteQuirurgicoRow> = tables
            .antecedentes
            .iter()
            .filter(|a| a.id_paciente == id.value())
            .cloned()
            .collect();
        rows.sort_by_key(|a| (a.fecha_cirugia, a.id));
        Ok(rows
            .into_iter()
            .map(AntecedenteQuirurgicoRow::into_domain)
            .collect())
    }

    async fn insert_surgical_events(
        &self,
        id: PatientId,
        events: &[NewSurgicalEvent],
    ) -> Result<Vec<SurgicalEvent>> {
        let mut tables = self.tables.write().await;
        if !tables.has_patient(id.value()) {
            return Err(FichaError::NotFound(messages::PATIENT_NOT_FOUND.to_string()));
        }

        let mut inserted = Vec::with_capacity(events.len());
        for event in events {
            tables.next_antecedente_id += 1;
            let row = AntecedenteQuirurgicoRow::from_new(tables.next_antecedente_id, id, event);
            tables.antecedentes.push(row.clone());
            inserted.push(row.into_domain());
        }
        Ok(inserted)
    }

    async fn student_info(&self, id: PatientId) -> Result<Option<StudentInfo>> {
        let tables = self.tables.read().await;
        Ok(tables
            .estudiantes
            .iter()
            .find(|e| e.id_paciente == id.value())
            .cloned()
            .map(EstudianteRow::into_domain))
    }

    async fn collaborator_info(&self, id: PatientId) -> Result<Option<CollaboratorInfo>> {
        let tables = self.tables.read().await;
        Ok(tables
            .colaboradores
            .iter()
            .find(|c| c.id_paciente == id.value())
            .cloned()
            .map(ColaboradorRow::into_domain))
    }
}
