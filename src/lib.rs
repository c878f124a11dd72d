//! gcp-wif: interactive setup of Google Cloud Workload Identity Federation for GitHub Actions.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use app::AppContext;
pub use app::commands::auth::Binding;
pub use app::commands::pool::{CreateOutcome, DeleteOutcome};
pub use app::commands::setup::SetupOutcome;
pub use domain::{AppError, BindingAttribute, WifConfig};
