//! Search command implementation

use super::connect;
use crate::cli::exit_codes;
use crate::client::{ApiOutcome, SearchView, SharedSession};
use crate::domain::SearchType;
use clap::Args;

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Nombres, Carnet or CodigoColaborador
    #[arg(long = "type", default_value = "Nombres")]
    pub search_type: SearchType,

    /// Value to search for
    pub query: String,

    /// Print the `{result}` / `{error}` JSON instead of a list
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    /// Execute the search command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let client = match connect(config_path).await {
            Ok(client) => client,
            Err(code) => return Ok(code),
        };

        let mut view = SearchView::new(client, SharedSession::new());
        view.search_type = self.search_type;
        view.query = self.query.clone();

        let outcome = view.submit().await;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        } else {
            println!("{}", view.render().trim_end());
        }

        Ok(match outcome {
            ApiOutcome::Result(_) => exit_codes::OK,
            ApiOutcome::Error(_) => exit_codes::REJECTED,
        })
    }
}
