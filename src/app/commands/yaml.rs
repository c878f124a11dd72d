//! GitHub Actions workflow snippet for the configured provider.

use minijinja::{AutoEscape, Environment, context};

use crate::app::AppContext;
use crate::domain::expression::provider_path;
use crate::domain::{AppError, WifConfig};
use crate::ports::{Gcloud, Prompt};

use super::resolve;

const TEMPLATE_NAME: &str = "github_auth_steps.yml";
const TEMPLATE: &str = include_str!("../../assets/github_auth_steps.yml.j2");

/// Render the snippet from an already-resolved configuration.
pub fn render(cfg: &WifConfig) -> Result<String, AppError> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_template(TEMPLATE_NAME, TEMPLATE).map_err(|e| AppError::Template {
        name: TEMPLATE_NAME,
        details: e.to_string(),
    })?;

    let template = env
        .get_template(TEMPLATE_NAME)
        .map_err(|e| AppError::Template { name: TEMPLATE_NAME, details: e.to_string() })?;

    template
        .render(context! {
            project_id => cfg.project_id()?,
            provider_path => provider_path(cfg.project_number()?, cfg.pool()?, cfg.provider()?),
            service_account => cfg.service_account()?,
        })
        .map_err(|e| AppError::Template { name: TEMPLATE_NAME, details: e.to_string() })
}

/// Resolve everything the snippet references, then render it.
pub fn dump<G: Gcloud, P: Prompt>(
    ctx: &AppContext<G, P>,
    cfg: &mut WifConfig,
) -> Result<String, AppError> {
    resolve::for_yaml(ctx, cfg)?;
    resolve::resolve_project_number(ctx, cfg)?;
    render(cfg)
}
