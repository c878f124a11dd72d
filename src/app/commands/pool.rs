//! Workload identity pool create / delete / restore.

use crate::app::AppContext;
use crate::domain::{AppError, WifConfig};
use crate::ports::{Gcloud, Prompt};
use crate::services::gcloud_args;
use crate::services::resource_lister::LOCATION;

use super::GRACE_PERIOD_NOTICE;
use super::resolve;

/// What a create call ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(String),
    AlreadyExists(String),
}

/// What a confirmation-gated delete ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(String),
    Cancelled,
}

fn pool_args(verb: &str, pool: &str, project: &str) -> Vec<String> {
    gcloud_args(&[
        "iam",
        "workload-identity-pools",
        verb,
        pool,
        "--project",
        project,
        "--location",
        LOCATION,
    ])
}

/// Resolve project and pool name, then create the pool.
pub fn create<G: Gcloud, P: Prompt>(
    ctx: &AppContext<G, P>,
    cfg: &mut WifConfig,
) -> Result<CreateOutcome, AppError> {
    resolve::for_pool_create(ctx, cfg)?;
    create_resolved(ctx, cfg)
}

/// Create the pool named in `cfg` unless it already exists.
pub fn create_resolved<G: Gcloud, P: Prompt>(
    ctx: &AppContext<G, P>,
    cfg: &WifConfig,
) -> Result<CreateOutcome, AppError> {
    let project = cfg.project_id()?;
    let pool = cfg.pool()?;

    let mut probe = pool_args("describe", pool, project);
    probe.extend(gcloud_args(&["--format", "value(name)"]));
    if ctx.gcloud().probe(&probe) {
        ctx.prompt().say(&format!("Pool {} already exists... skipping", pool));
        return Ok(CreateOutcome::AlreadyExists(pool.to_string()));
    }

    if !ctx.prompt().confirm(&format!("Create pool ({})?", pool))? {
        return Err(AppError::UserDeclined("cannot continue without a pool".to_string()));
    }

    let mut args = pool_args("create", pool, project);
    args.extend(gcloud_args(&["--display-name", pool]));
    ctx.gcloud()
        .mutate(&args)
        .map_err(|source| AppError::Mutation { action: "create pool", source })?;

    tracing::info!(%project, %pool, "created workload identity pool");
    Ok(CreateOutcome::Created(pool.to_string()))
}

pub fn delete<G: Gcloud, P: Prompt>(
    ctx: &AppContext<G, P>,
    cfg: &mut WifConfig,
) -> Result<DeleteOutcome, AppError> {
    resolve::for_pool_delete(ctx, cfg)?;
    let project = cfg.project_id()?;
    let pool = cfg.pool()?;

    let question = format!("Are you sure you want to delete the pool [{} > {}]?", project, pool);
    if !ctx.prompt().confirm(&question)? {
        return Ok(DeleteOutcome::Cancelled);
    }

    let mut args = pool_args("delete", pool, project);
    args.push("--quiet".to_string());
    ctx.gcloud()
        .mutate(&args)
        .map_err(|source| AppError::Mutation { action: "delete pool", source })?;

    ctx.prompt().say(&format!("Pool deleted successfully - {}", GRACE_PERIOD_NOTICE));
    Ok(DeleteOutcome::Deleted(pool.to_string()))
}

/// Undelete a soft-deleted pool. No confirmation is asked.
pub fn restore<G: Gcloud, P: Prompt>(
    ctx: &AppContext<G, P>,
    cfg: &mut WifConfig,
) -> Result<String, AppError> {
    resolve::for_pool_restore(ctx, cfg)?;
    let pool = cfg.pool()?;
    ctx.gcloud()
        .mutate(&pool_args("undelete", pool, cfg.project_id()?))
        .map_err(|source| AppError::Mutation { action: "restore pool", source })?;
    Ok(pool.to_string())
}
