//! Check-cui command implementation

use super::{connect, exit_code_for};
use crate::cli::exit_codes;
use crate::domain::Cui;
use clap::Args;

/// Arguments for the check-cui command
#[derive(Args, Debug)]
pub struct CheckCuiArgs {
    /// 13-digit CUI
    pub cui: String,
}

impl CheckCuiArgs {
    /// Execute the check-cui command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let cui = match Cui::new(self.cui.as_str()) {
            Ok(cui) => cui,
            Err(message) => {
                println!("❌ {message}");
                return Ok(exit_codes::REJECTED);
            }
        };

        let client = match connect(config_path).await {
            Ok(client) => client,
            Err(code) => return Ok(code),
        };

        match client.check_cui(&cui).await {
            Ok(true) => {
                println!("CUI {cui} ya está registrado.");
                Ok(exit_codes::OK)
            }
            Ok(false) => {
                println!("CUI {cui} no está registrado.");
                Ok(exit_codes::OK)
            }
            Err(e) => {
                println!("❌ {}", e.user_message());
                Ok(exit_code_for(&e))
            }
        }
    }
}
