use clap::Subcommand;

use crate::domain::{AppError, WifConfig};

use super::{report_create, report_delete};

#[derive(Subcommand)]
pub enum PoolCommands {
    /// Create a workload identity pool (skipped when it already exists)
    #[clap(visible_alias = "c")]
    Create,
    /// Delete a pool (recoverable for 30 days)
    #[clap(visible_alias = "rm")]
    Delete,
    /// Restore a deleted pool
    Restore,
}

pub fn run_pool(command: PoolCommands, cfg: WifConfig) -> Result<(), AppError> {
    match command {
        PoolCommands::Create => {
            let outcome = crate::app::api::pool_create(cfg)?;
            report_create("pool", &outcome);
        }
        PoolCommands::Delete => {
            let outcome = crate::app::api::pool_delete(cfg)?;
            report_delete("pool", &outcome);
        }
        PoolCommands::Restore => {
            let pool = crate::app::api::pool_restore(cfg)?;
            println!("✅ Restored pool {}", pool);
        }
    }
    Ok(())
}
