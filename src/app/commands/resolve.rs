//! Interactive resolution of the fields each subcommand needs.
//!
//! Sub-resolvers leave already-set fields alone. Composite resolvers run them
//! in the fixed order project → pool → provider → service account → GitHub
//! repository and stop at the first failure.

use crate::app::AppContext;
use crate::domain::{AppError, WifConfig, validate_claim_value, validate_resource_name};
use crate::ports::{Gcloud, Prompt};
use crate::services::{prompt_until, select_from_list};

/// Whether an existing-resource menu lists live or soft-deleted entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Active,
    Deleted,
}

impl Lifecycle {
    fn include_deleted(self) -> bool {
        self == Lifecycle::Deleted
    }
}

pub fn resolve_project<G: Gcloud, P: Prompt>(
    ctx: &AppContext<G, P>,
    cfg: &mut WifConfig,
) -> Result<(), AppError> {
    if cfg.project_id.is_some() {
        return Ok(());
    }
    let projects = ctx.lister().list_projects()?;
    if projects.is_empty() {
        return Err(AppError::NoResources { resource: "projects", scope: String::new() });
    }
    let project = select_from_list(ctx.prompt(), projects, "projects")?;
    tracing::debug!(%project, "resolved project");
    cfg.project_id = Some(project);
    Ok(())
}

/// Look up the project number once the project is known.
pub fn resolve_project_number<G: Gcloud, P: Prompt>(
    ctx: &AppContext<G, P>,
    cfg: &mut WifConfig,
) -> Result<(), AppError> {
    if cfg.project_number.is_some() {
        return Ok(());
    }
    let number = ctx.lister().project_number(cfg.project_id()?)?;
    tracing::debug!(%number, "resolved project number");
    cfg.project_number = Some(number);
    Ok(())
}

pub fn resolve_existing_pool<G: Gcloud, P: Prompt>(
    ctx: &AppContext<G, P>,
    cfg: &mut WifConfig,
    lifecycle: Lifecycle,
) -> Result<(), AppError> {
    if cfg.pool.is_some() {
        return Ok(());
    }
    let project = cfg.project_id()?;
    let pools = ctx.lister().list_pools(project, lifecycle.include_deleted())?;
    let resource = match lifecycle {
        Lifecycle::Active => "workload identity pools",
        Lifecycle::Deleted => "deleted workload identity pools",
    };
    if pools.is_empty() {
        return Err(AppError::none_in_project(resource, project));
    }
    let pool = select_from_list(ctx.prompt(), pools, resource)?;
    tracing::debug!(%pool, "resolved pool");
    cfg.pool = Some(pool);
    Ok(())
}

pub fn resolve_existing_provider<G: Gcloud, P: Prompt>(
    ctx: &AppContext<G, P>,
    cfg: &mut WifConfig,
    lifecycle: Lifecycle,
) -> Result<(), AppError> {
    if cfg.provider.is_some() {
        return Ok(());
    }
    let project = cfg.project_id()?;
    let pool = cfg.pool()?;
    let providers = ctx.lister().list_providers(project, pool, lifecycle.include_deleted())?;
    let resource = match lifecycle {
        Lifecycle::Active => "providers",
        Lifecycle::Deleted => "deleted providers",
    };
    if providers.is_empty() {
        return Err(AppError::NoResources {
            resource,
            scope: format!(" in project {} pool {}", project, pool),
        });
    }
    let provider = select_from_list(ctx.prompt(), providers, resource)?;
    tracing::debug!(%provider, "resolved provider");
    cfg.provider = Some(provider);
    Ok(())
}

fn resolve_new_name<P: Prompt>(
    prompt: &P,
    field: &mut Option<String>,
    kind: &'static str,
) -> Result<(), AppError> {
    if let Some(name) = field.as_deref() {
        if !validate_resource_name(name) {
            return Err(AppError::InvalidName { kind, name: name.to_string() });
        }
        return Ok(());
    }
    let question = format!("Enter new {} name (only letters, numbers, and hyphens allowed):", kind);
    let rejection = format!("Invalid {} name. Only letters, numbers, and hyphens are allowed.", kind);
    let name = prompt_until(prompt, &question, &rejection, validate_resource_name)?;
    tracing::debug!(kind, %name, "resolved new name");
    *field = Some(name);
    Ok(())
}

pub fn resolve_new_pool_name<G: Gcloud, P: Prompt>(
    ctx: &AppContext<G, P>,
    cfg: &mut WifConfig,
) -> Result<(), AppError> {
    resolve_new_name(ctx.prompt(), &mut cfg.pool, "pool")
}

pub fn resolve_new_provider_name<G: Gcloud, P: Prompt>(
    ctx: &AppContext<G, P>,
    cfg: &mut WifConfig,
) -> Result<(), AppError> {
    resolve_new_name(ctx.prompt(), &mut cfg.provider, "provider")
}

pub fn resolve_service_account<G: Gcloud, P: Prompt>(
    ctx: &AppContext<G, P>,
    cfg: &mut WifConfig,
) -> Result<(), AppError> {
    if cfg.service_account.is_some() {
        return Ok(());
    }
    let project = cfg.project_id()?;
    let accounts = ctx.lister().list_service_accounts(project)?;
    if accounts.is_empty() {
        return Err(AppError::none_in_project("service accounts", project));
    }
    let account = select_from_list(ctx.prompt(), accounts, "service accounts")?;
    tracing::debug!(%account, "resolved service account");
    cfg.service_account = Some(account);
    Ok(())
}

fn prompt_claim_value<P: Prompt>(
    prompt: &P,
    field: &mut Option<String>,
    question: &str,
    rejection: &str,
) -> Result<(), AppError> {
    if field.is_some() {
        return Ok(());
    }
    let value = prompt_until(prompt, question, rejection, |answer| {
        validate_claim_value(answer.trim())
    })?;
    *field = Some(value.trim().to_string());
    Ok(())
}

pub fn resolve_github_repo<G: Gcloud, P: Prompt>(
    ctx: &AppContext<G, P>,
    cfg: &mut WifConfig,
) -> Result<(), AppError> {
    prompt_claim_value(
        ctx.prompt(),
        &mut cfg.github_owner,
        "Enter GitHub repository owner [CASE SENSITIVE]:",
        "Repository owner cannot be empty or contain quotes or backslashes.",
    )?;
    prompt_claim_value(
        ctx.prompt(),
        &mut cfg.github_repo,
        "Enter GitHub repository name [CASE SENSITIVE]:",
        "Repository name cannot be empty or contain quotes or backslashes.",
    )
}

// Composite resolvers, one per subcommand.

pub fn for_pool_create<G: Gcloud, P: Prompt>(
    ctx: &AppContext<G, P>,
    cfg: &mut WifConfig,
) -> Result<(), AppError> {
    resolve_project(ctx, cfg)?;
    resolve_new_pool_name(ctx, cfg)
}

pub fn for_pool_delete<G: Gcloud, P: Prompt>(
    ctx: &AppContext<G, P>,
    cfg: &mut WifConfig,
) -> Result<(), AppError> {
    resolve_project(ctx, cfg)?;
    resolve_existing_pool(ctx, cfg, Lifecycle::Active)
}

pub fn for_pool_restore<G: Gcloud, P: Prompt>(
    ctx: &AppContext<G, P>,
    cfg: &mut WifConfig,
) -> Result<(), AppError> {
    resolve_project(ctx, cfg)?;
    resolve_existing_pool(ctx, cfg, Lifecycle::Deleted)
}

pub fn for_provider_create<G: Gcloud, P: Prompt>(
    ctx: &AppContext<G, P>,
    cfg: &mut WifConfig,
) -> Result<(), AppError> {
    resolve_project(ctx, cfg)?;
    resolve_existing_pool(ctx, cfg, Lifecycle::Active)?;
    resolve_new_provider_name(ctx, cfg)?;
    resolve_github_repo(ctx, cfg)
}

pub fn for_provider_delete<G: Gcloud, P: Prompt>(
    ctx: &AppContext<G, P>,
    cfg: &mut WifConfig,
) -> Result<(), AppError> {
    resolve_project(ctx, cfg)?;
    resolve_existing_pool(ctx, cfg, Lifecycle::Active)?;
    resolve_existing_provider(ctx, cfg, Lifecycle::Active)
}

pub fn for_provider_restore<G: Gcloud, P: Prompt>(
    ctx: &AppContext<G, P>,
    cfg: &mut WifConfig,
) -> Result<(), AppError> {
    resolve_project(ctx, cfg)?;
    resolve_existing_pool(ctx, cfg, Lifecycle::Active)?;
    resolve_existing_provider(ctx, cfg, Lifecycle::Deleted)
}

pub fn for_auth_bind<G: Gcloud, P: Prompt>(
    ctx: &AppContext<G, P>,
    cfg: &mut WifConfig,
) -> Result<(), AppError> {
    resolve_project(ctx, cfg)?;
    resolve_existing_pool(ctx, cfg, Lifecycle::Active)?;
    resolve_service_account(ctx, cfg)
}

pub fn for_yaml<G: Gcloud, P: Prompt>(
    ctx: &AppContext<G, P>,
    cfg: &mut WifConfig,
) -> Result<(), AppError> {
    resolve_project(ctx, cfg)?;
    resolve_existing_pool(ctx, cfg, Lifecycle::Active)?;
    resolve_existing_provider(ctx, cfg, Lifecycle::Active)?;
    resolve_service_account(ctx, cfg)
}

pub fn for_setup<G: Gcloud, P: Prompt>(
    ctx: &AppContext<G, P>,
    cfg: &mut WifConfig,
) -> Result<(), AppError> {
    resolve_project(ctx, cfg)?;
    resolve_new_pool_name(ctx, cfg)?;
    resolve_new_provider_name(ctx, cfg)?;
    resolve_service_account(ctx, cfg)?;
    resolve_github_repo(ctx, cfg)
}
