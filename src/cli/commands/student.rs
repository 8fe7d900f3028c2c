//! Student command implementation

use super::connect;
use crate::cli::exit_codes;
use crate::client::{SharedSession, StudentInfoView};
use crate::domain::{PatientId, PatientPreview};
use clap::Args;

/// Arguments for the student command
#[derive(Args, Debug)]
pub struct StudentArgs {
    /// Patient id
    pub id: i32,
}

impl StudentArgs {
    /// Execute the student command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let client = match connect(config_path).await {
            Ok(client) => client,
            Err(code) => return Ok(code),
        };

        let session = SharedSession::new();
        let id = PatientId::new(self.id);
        session
            .update(|state| {
                state.selected_patient = Some(PatientPreview {
                    id,
                    names: String::new(),
                })
            })
            .await;

        let mut view = StudentInfoView::new(client, session);
        let outcome = view.load().await;
        println!("{}", view.render());
        Ok(if outcome.is_ok() {
            exit_codes::OK
        } else {
            exit_codes::REJECTED
        })
    }
}
