//! Service account association via an IAM policy binding.

use crate::app::AppContext;
use crate::domain::expression::principal_set;
use crate::domain::{AppError, BindingAttribute, WifConfig};
use crate::ports::{Gcloud, Prompt};
use crate::services::{gcloud_args, prompt_until, select_index};

use super::resolve;

pub const WORKLOAD_IDENTITY_USER_ROLE: &str = "roles/iam.workloadIdentityUser";

const SERVICE_ACCOUNTS_BANNER: &str = r#"
|--------------------------------------------------------------------------------------|
|                                 Service Accounts                                     |
|    Using an attribute from the generated JWT we can select which service account     |
|    to associate with the GitHub job auth request, and therefore limiting access      |
|    to the permissions associated with that account.                                  |
|                                                                                      |
|        For best security, create a unique service account for each workflow.         |
|--------------------------------------------------------------------------------------|
"#;

/// Attribute and value a service account is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub attribute: BindingAttribute,
    pub value: String,
}

/// Ask which token attribute the binding should match and its value.
///
/// `attribute` and `value` skip their prompts when already known.
pub fn choose_binding<P: Prompt>(
    prompt: &P,
    attribute: Option<BindingAttribute>,
    value: Option<String>,
) -> Result<Binding, AppError> {
    prompt.say(SERVICE_ACCOUNTS_BANNER);

    let attribute = match attribute {
        Some(attribute) => attribute,
        None => {
            let labels: Vec<String> =
                BindingAttribute::ALL.iter().map(BindingAttribute::menu_label).collect();
            BindingAttribute::ALL[select_index(prompt, &labels, "binding attributes")?]
        }
    };

    let value = match value.filter(|v| !v.trim().is_empty()) {
        Some(value) => value,
        None => {
            prompt.say(&format!("\n{}", attribute.guidance()));
            prompt_until(prompt, "Enter value [CASE SENSITIVE]:", "Value cannot be empty.", |v| {
                !v.trim().is_empty()
            })?
        }
    };

    Ok(Binding { attribute, value: value.trim().to_string() })
}

/// Build the `add-iam-policy-binding` call for a resolved configuration.
pub fn binding_args(cfg: &WifConfig, binding: &Binding) -> Result<Vec<String>, AppError> {
    let member = principal_set(
        cfg.project_number()?,
        cfg.pool()?,
        binding.attribute.name(),
        &binding.value,
    );
    Ok(gcloud_args(&[
        "iam",
        "service-accounts",
        "add-iam-policy-binding",
        cfg.service_account()?,
        "--project",
        cfg.project_id()?,
        "--role",
        WORKLOAD_IDENTITY_USER_ROLE,
        "--member",
        &member,
    ]))
}

/// Resolve project, pool and service account, then bind the account.
pub fn bind<G: Gcloud, P: Prompt>(
    ctx: &AppContext<G, P>,
    cfg: &mut WifConfig,
    attribute: Option<BindingAttribute>,
    value: Option<String>,
) -> Result<Binding, AppError> {
    resolve::for_auth_bind(ctx, cfg)?;
    resolve::resolve_project_number(ctx, cfg)?;
    bind_resolved(ctx, cfg, attribute, value)
}

pub fn bind_resolved<G: Gcloud, P: Prompt>(
    ctx: &AppContext<G, P>,
    cfg: &WifConfig,
    attribute: Option<BindingAttribute>,
    value: Option<String>,
) -> Result<Binding, AppError> {
    let binding = choose_binding(ctx.prompt(), attribute, value)?;
    ctx.gcloud()
        .mutate(&binding_args(cfg, &binding)?)
        .map_err(|source| AppError::Mutation { action: "bind service account", source })?;

    tracing::info!(
        account = %cfg.service_account()?,
        attribute = binding.attribute.name(),
        value = %binding.value,
        "bound service account"
    );
    Ok(binding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeGcloud, ScriptedPrompt};

    fn resolved() -> WifConfig {
        WifConfig {
            project_id: Some("p1".into()),
            project_number: Some("123456".into()),
            pool: Some("github".into()),
            service_account: Some("deploy@p1.iam.gserviceaccount.com".into()),
            ..Default::default()
        }
    }

    #[test]
    fn binding_grants_workload_identity_user_to_principal_set() {
        let ctx = AppContext::new(FakeGcloud::new(), ScriptedPrompt::new(&["1", "deploy"]));

        let binding = bind_resolved(&ctx, &resolved(), None, None).unwrap();

        assert_eq!(binding, Binding { attribute: BindingAttribute::Workflow, value: "deploy".into() });
        let mutations = ctx.gcloud().mutations();
        let args = &mutations[0];
        assert_eq!(
            args,
            &gcloud_args(&[
                "iam",
                "service-accounts",
                "add-iam-policy-binding",
                "deploy@p1.iam.gserviceaccount.com",
                "--project",
                "p1",
                "--role",
                "roles/iam.workloadIdentityUser",
                "--member",
                "principalSet://iam.googleapis.com/projects/123456/locations/global/workloadIdentityPools/github/attribute.workflow/deploy",
            ])
        );
    }

    #[test]
    fn menu_shows_guidance_for_the_chosen_attribute() {
        let ctx = AppContext::new(FakeGcloud::new(), ScriptedPrompt::new(&["6", "2", "", "acme/widgets"]));

        let binding = bind_resolved(&ctx, &resolved(), None, None).unwrap();

        assert_eq!(binding.attribute, BindingAttribute::Repository);
        assert_eq!(ctx.prompt().count("Expected format for [repository]: owner/repo"), 1);
        assert_eq!(ctx.prompt().count("Invalid input. Please enter a number between 1 and 5"), 1);
        assert_eq!(ctx.prompt().count("Value cannot be empty."), 1);
    }

    #[test]
    fn supplied_attribute_and_value_skip_prompts() {
        let prompt = ScriptedPrompt::new(&[]);
        let binding =
            choose_binding(&prompt, Some(BindingAttribute::Ref), Some("refs/heads/main".into()))
                .unwrap();
        assert_eq!(binding.value, "refs/heads/main");
        assert_eq!(prompt.remaining(), 0);
    }

    #[test]
    fn failed_binding_is_a_mutation_error() {
        let ctx = AppContext::new(
            FakeGcloud::new().with_failing_mutation(
                "iam service-accounts add-iam-policy-binding deploy@p1.iam.gserviceaccount.com",
            ),
            ScriptedPrompt::new(&["4", "octocat"]),
        );
        let err = bind_resolved(&ctx, &resolved(), None, None).unwrap_err();
        assert!(matches!(err, AppError::Mutation { action: "bind service account", .. }));
    }

    #[test]
    fn bind_resolves_project_pool_and_account_first() {
        let gcloud = FakeGcloud::new()
            .with_listing("projects list", &["p1"])
            .with_listing(
                "iam workload-identity-pools list",
                &["projects/1/locations/global/workloadIdentityPools/github"],
            )
            .with_listing("iam service-accounts list", &["ci@p1.iam.gserviceaccount.com"]);
        let ctx = AppContext::new(gcloud, ScriptedPrompt::new(&["1", "1", "1", "5", "refs/heads/main"]));
        let mut cfg = WifConfig::default();

        bind(&ctx, &mut cfg, None, None).unwrap();

        assert_eq!(cfg.service_account.as_deref(), Some("ci@p1.iam.gserviceaccount.com"));
        let member = ctx.gcloud().mutations()[0].last().cloned().unwrap();
        assert!(member.ends_with("/workloadIdentityPools/github/attribute.ref/refs/heads/main"));
        assert!(member.contains("projects/123456789/"));
    }
}
