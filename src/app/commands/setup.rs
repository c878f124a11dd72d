//! Full walkthrough: pool, provider, service account binding and workflow snippet.

use crate::app::AppContext;
use crate::domain::{AppError, BindingAttribute, WifConfig};
use crate::ports::{Gcloud, Prompt};

use super::auth::{self, Binding};
use super::pool::{self, CreateOutcome};
use super::{provider, resolve, yaml};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupOutcome {
    pub pool: CreateOutcome,
    pub provider: CreateOutcome,
    pub binding: Binding,
    pub snippet: String,
}

/// Resolve every field up front, then run each stage in order.
///
/// A failure leaves earlier stages in place.
pub fn execute<G: Gcloud, P: Prompt>(
    ctx: &AppContext<G, P>,
    cfg: &mut WifConfig,
    attribute: Option<BindingAttribute>,
    value: Option<String>,
) -> Result<SetupOutcome, AppError> {
    resolve::for_setup(ctx, cfg)?;
    resolve::resolve_project_number(ctx, cfg)?;

    let pool = pool::create_resolved(ctx, cfg)?;
    let provider = provider::create_resolved(ctx, cfg)?;
    let binding = auth::bind_resolved(ctx, cfg, attribute, value)?;

    let snippet = yaml::render(cfg)?;
    Ok(SetupOutcome { pool, provider, binding, snippet })
}
