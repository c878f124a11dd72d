//! Workload identity pool provider create / delete / restore.

use crate::app::AppContext;
use crate::domain::expression::{
    self, GITHUB_ISSUER_URI, branch_clause, environment_clause, repository_clause,
    repository_owner_clause, workflow_clause,
};
use crate::domain::{AppError, Expression, WifConfig, validate_claim_value};
use crate::ports::{Gcloud, Prompt};
use crate::services::{gcloud_args, prompt_until};
use crate::services::resource_lister::LOCATION;

use super::pool::{CreateOutcome, DeleteOutcome};
use super::{GRACE_PERIOD_NOTICE, resolve};

const CONDITIONS_BANNER: &str = r#"
|---------------------------------------------------------------------------------------|
|                                 Provider Conditions                                   |
|    You can apply conditions to further restrict the audience of the provider.         |
|    you can later associate service accounts based on some other mapped attribute.     |
|                      e.g. apply a branch condition to provider                        |
|                                        then                                           |
|                        associate service account by workflow                          |
|---------------------------------------------------------------------------------------|

NOTE: Only one attribute can be used for service account assignment

RECOMMENDATION:
- Be as specific as possible with conditions to improve security e.g. If your CI only runs on main,
  then apply a branch condition to the provider.
- Associate the service account with the workflow name. e.g. deploy -> github-deploy@...com
- Create a service account for each workflow and assign minimum permissions to it to run the workflow.
- Create a provider for each repository sharing the Google Cloud project.
"#;

const NO_REPOSITORY_WARNING: &str = "WARNING: Not applying repository condition to the provider - \
MUST use repository full name to associate the service account e.g. owner/repo";

const REPOSITORY_REQUIRED_NOTICE: &str = "It is critical to use the repository for service account \
association if not using repository condition";

const CLAIM_VALUE_REJECTION: &str = "Value cannot be empty or contain quotes or backslashes.";

fn claim_value<'a>(field: &'static str, value: &'a str) -> Result<&'a str, AppError> {
    if validate_claim_value(value) {
        Ok(value)
    } else {
        Err(AppError::InvalidValue { field, value: value.to_string() })
    }
}

fn ask_claim_value<P: Prompt>(prompt: &P, question: &str) -> Result<String, AppError> {
    let answer = prompt_until(prompt, question, CLAIM_VALUE_REJECTION, |answer| {
        validate_claim_value(answer.trim())
    })?;
    Ok(answer.trim().to_string())
}

fn provider_args(verb: &str, provider: &str, project: &str, pool: &str) -> Vec<String> {
    gcloud_args(&[
        "iam",
        "workload-identity-pools",
        "providers",
        verb,
        provider,
        "--project",
        project,
        "--location",
        LOCATION,
        "--workload-identity-pool",
        pool,
    ])
}

/// Gather the attribute condition for a new provider.
///
/// Starts from the repository-owner clause. The repository clause is always
/// added unless `unsafe_conditions` is set, in which case leaving it out needs
/// an explicit acknowledgement of the warning.
pub fn build_condition<P: Prompt>(prompt: &P, cfg: &WifConfig) -> Result<Expression, AppError> {
    let mut condition = Expression::all_of();
    condition.push(repository_owner_clause(claim_value(
        "repository owner",
        cfg.github_owner()?,
    )?));

    let full_name = cfg.github_full_name()?;
    claim_value("repository name", cfg.github_repo.as_deref().unwrap_or_default())?;
    if !cfg.unsafe_conditions {
        condition.push(repository_clause(&full_name));
    } else if prompt.confirm("Apply repository condition to the provider?")? {
        condition.push(repository_clause(&full_name));
    } else {
        prompt.say(NO_REPOSITORY_WARNING);
        if !prompt.confirm("Have you read the warning?")? {
            prompt.say(REPOSITORY_REQUIRED_NOTICE);
            return Err(AppError::UserDeclined(
                "user declined to acknowledge warning".to_string(),
            ));
        }
    }

    if prompt.confirm("[NOT RECOMMENDED] Apply workflow condition to the provider?")? {
        let workflow = ask_claim_value(prompt, "Enter your workflow name:")?;
        condition.push(workflow_clause(&workflow));
    }
    if prompt.confirm("[PROBABLY NOT NEEDED] Apply environment condition to the provider?")? {
        let environment = ask_claim_value(prompt, "Enter your environment name:")?;
        condition.push(environment_clause(&environment));
    }
    if prompt.confirm("[PROBABLY NOT NEEDED] Apply branch condition to the provider?")? {
        let branch = ask_claim_value(prompt, "Enter your branch name:")?;
        condition.push(branch_clause(&branch));
    }

    Ok(condition)
}

/// Resolve project, pool, provider name and repository, then create the provider.
pub fn create<G: Gcloud, P: Prompt>(
    ctx: &AppContext<G, P>,
    cfg: &mut WifConfig,
) -> Result<CreateOutcome, AppError> {
    resolve::for_provider_create(ctx, cfg)?;
    resolve::resolve_project_number(ctx, cfg)?;
    create_resolved(ctx, cfg)
}

/// Create the OIDC provider named in `cfg` unless it already exists.
pub fn create_resolved<G: Gcloud, P: Prompt>(
    ctx: &AppContext<G, P>,
    cfg: &WifConfig,
) -> Result<CreateOutcome, AppError> {
    let project = cfg.project_id()?;
    let pool = cfg.pool()?;
    let provider = cfg.provider()?;

    let mut probe = provider_args("describe", provider, project, pool);
    probe.extend(gcloud_args(&["--format", "value(name)"]));
    if ctx.gcloud().probe(&probe) {
        ctx.prompt().say(&format!("Provider {} already exists... skipping", provider));
        return Ok(CreateOutcome::AlreadyExists(provider.to_string()));
    }

    ctx.prompt().say(CONDITIONS_BANNER);
    let mapping = expression::attribute_mapping(cfg.project_number()?, pool, provider);
    let condition = build_condition(ctx.prompt(), cfg)?;

    if !ctx.prompt().confirm(&format!("Create provider ({})?", provider))? {
        return Err(AppError::UserDeclined("cannot continue without a provider".to_string()));
    }

    let mut args = provider_args("create-oidc", provider, project, pool);
    args.extend([
        "--display-name".to_string(),
        provider.to_string(),
        "--attribute-mapping".to_string(),
        mapping.to_string(),
        "--attribute-condition".to_string(),
        condition.to_string(),
        "--issuer-uri".to_string(),
        GITHUB_ISSUER_URI.to_string(),
    ]);
    ctx.gcloud()
        .mutate(&args)
        .map_err(|source| AppError::Mutation { action: "create provider", source })?;

    tracing::info!(%project, %pool, %provider, %condition, "created provider");
    Ok(CreateOutcome::Created(provider.to_string()))
}

pub fn delete<G: Gcloud, P: Prompt>(
    ctx: &AppContext<G, P>,
    cfg: &mut WifConfig,
) -> Result<DeleteOutcome, AppError> {
    resolve::for_provider_delete(ctx, cfg)?;
    let project = cfg.project_id()?;
    let pool = cfg.pool()?;
    let provider = cfg.provider()?;

    let question = format!(
        "Are you sure you want to delete the provider [{} > {} > {}]?",
        project, pool, provider
    );
    if !ctx.prompt().confirm(&question)? {
        return Ok(DeleteOutcome::Cancelled);
    }

    let mut args = provider_args("delete", provider, project, pool);
    args.push("--quiet".to_string());
    ctx.gcloud()
        .mutate(&args)
        .map_err(|source| AppError::Mutation { action: "delete provider", source })?;

    ctx.prompt().say(&format!("Provider deleted successfully - {}", GRACE_PERIOD_NOTICE));
    Ok(DeleteOutcome::Deleted(provider.to_string()))
}

/// Undelete a soft-deleted provider. No confirmation is asked.
pub fn restore<G: Gcloud, P: Prompt>(
    ctx: &AppContext<G, P>,
    cfg: &mut WifConfig,
) -> Result<String, AppError> {
    resolve::for_provider_restore(ctx, cfg)?;
    let provider = cfg.provider()?;
    ctx.gcloud()
        .mutate(&provider_args("undelete", provider, cfg.project_id()?, cfg.pool()?))
        .map_err(|source| AppError::Mutation { action: "restore provider", source })?;
    Ok(provider.to_string())
}
