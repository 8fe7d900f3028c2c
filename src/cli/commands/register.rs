//! Register command implementation

use super::connect;
use crate::cli::exit_codes;
use crate::client::{RegistrationView, SharedSession};
use crate::domain::PatientDraft;
use clap::Args;

/// Arguments for the register command
///
/// Every field is optional here so that missing values are reported with the
/// same messages the server uses.
#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// 13-digit CUI
    #[arg(long)]
    pub cui: Option<String>,

    #[arg(long)]
    pub names: Option<String>,

    #[arg(long)]
    pub last_names: Option<String>,

    /// M or F
    #[arg(long)]
    pub sex: Option<String>,

    /// YYYY-MM-DD
    #[arg(long)]
    pub birthdate: Option<String>,
}

impl RegisterArgs {
    fn draft(&self) -> PatientDraft {
        PatientDraft {
            cui: self.cui.clone(),
            names: self.names.clone(),
            last_names: self.last_names.clone(),
            sex: self.sex.clone(),
            birthdate: self.birthdate.clone(),
        }
    }

    /// Execute the register command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let draft = self.draft();
        if let Err(e) = draft.validate() {
            println!("❌ {e}");
            return Ok(exit_codes::REJECTED);
        }

        let client = match connect(config_path).await {
            Ok(client) => client,
            Err(code) => return Ok(code),
        };

        let mut view = RegistrationView::new(client, SharedSession::new());
        view.draft = draft;

        let outcome = view.submit().await;
        println!("{}", view.render());
        Ok(if outcome.is_ok() {
            exit_codes::OK
        } else {
            exit_codes::REJECTED
        })
    }
}
