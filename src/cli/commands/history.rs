//! History command implementation

use super::{connect, exit_code_for};
use crate::cli::exit_codes;
use crate::client::{SharedSession, SurgicalHistoryView};
use crate::domain::{PatientId, PatientPreview, SurgicalEventDraft};
use clap::Args;

/// Arguments for the history command
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Patient id
    pub id: i32,

    /// Record a surgery of this type before showing the history
    #[arg(long, requires = "surgery_date")]
    pub surgery_type: Option<String>,

    /// Date of the recorded surgery, YYYY-MM-DD
    #[arg(long, requires = "surgery_type")]
    pub surgery_date: Option<String>,

    /// Complications of the recorded surgery
    #[arg(long, requires = "surgery_type")]
    pub complications: Option<String>,
}

impl HistoryArgs {
    /// Execute the history command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let client = match connect(config_path).await {
            Ok(client) => client,
            Err(code) => return Ok(code),
        };

        let patient = match client.get_patient(PatientId::new(self.id)).await {
            Ok(patient) => patient,
            Err(e) => {
                println!("❌ {}", e.user_message());
                return Ok(exit_code_for(&e));
            }
        };
        println!("Paciente: {} (CUI {})", patient.full_name(), patient.cui);

        let session = SharedSession::new();
        session
            .update(|state| {
                state.selected_patient = Some(PatientPreview {
                    id: patient.id,
                    names: patient.full_name(),
                })
            })
            .await;
        let mut view = SurgicalHistoryView::new(client, session);

        let outcome = if self.surgery_type.is_some() {
            view.add(vec![SurgicalEventDraft {
                surgery_type: self.surgery_type.clone(),
                surgery_date: self.surgery_date.clone(),
                complications: self.complications.clone(),
            }])
            .await
        } else {
            view.load().await
        };

        println!("{}", view.render());
        Ok(if outcome.is_ok() {
            exit_codes::OK
        } else {
            exit_codes::REJECTED
        })
    }
}
