use clap::Subcommand;

use crate::domain::{AppError, WifConfig};

use super::{report_create, report_delete};

#[derive(Subcommand)]
pub enum ProviderCommands {
    /// Create a GitHub OIDC provider in an existing pool
    #[clap(visible_alias = "c")]
    Create,
    /// Delete a provider (recoverable for 30 days)
    #[clap(visible_alias = "rm")]
    Delete,
    /// Restore a deleted provider
    Restore,
}

pub fn run_provider(command: ProviderCommands, cfg: WifConfig) -> Result<(), AppError> {
    match command {
        ProviderCommands::Create => {
            let outcome = crate::app::api::provider_create(cfg)?;
            report_create("provider", &outcome);
        }
        ProviderCommands::Delete => {
            let outcome = crate::app::api::provider_delete(cfg)?;
            report_delete("provider", &outcome);
        }
        ProviderCommands::Restore => {
            let provider = crate::app::api::provider_restore(cfg)?;
            println!("✅ Restored provider {}", provider);
        }
    }
    Ok(())
}
