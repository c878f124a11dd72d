//! Entry points wiring the real gcloud binary and terminal to each command.

use crate::adapters::{GcloudCommandAdapter, TerminalPrompt};
use crate::app::AppContext;
use crate::app::commands::auth::Binding;
use crate::app::commands::pool::{CreateOutcome, DeleteOutcome};
use crate::app::commands::setup::SetupOutcome;
use crate::app::commands::{auth, pool, provider, setup, yaml};
use crate::domain::{AppError, BindingAttribute, WifConfig};

type TerminalContext = AppContext<GcloudCommandAdapter, TerminalPrompt<std::io::StdinLock<'static>>>;

fn context() -> TerminalContext {
    AppContext::new(GcloudCommandAdapter::from_env(), TerminalPrompt::stdin())
}

pub fn pool_create(mut cfg: WifConfig) -> Result<CreateOutcome, AppError> {
    pool::create(&context(), &mut cfg)
}

pub fn pool_delete(mut cfg: WifConfig) -> Result<DeleteOutcome, AppError> {
    pool::delete(&context(), &mut cfg)
}

pub fn pool_restore(mut cfg: WifConfig) -> Result<String, AppError> {
    pool::restore(&context(), &mut cfg)
}

pub fn provider_create(mut cfg: WifConfig) -> Result<CreateOutcome, AppError> {
    provider::create(&context(), &mut cfg)
}

pub fn provider_delete(mut cfg: WifConfig) -> Result<DeleteOutcome, AppError> {
    provider::delete(&context(), &mut cfg)
}

pub fn provider_restore(mut cfg: WifConfig) -> Result<String, AppError> {
    provider::restore(&context(), &mut cfg)
}

pub fn auth_bind(
    mut cfg: WifConfig,
    attribute: Option<BindingAttribute>,
    value: Option<String>,
) -> Result<Binding, AppError> {
    auth::bind(&context(), &mut cfg, attribute, value)
}

pub fn yaml_dump(mut cfg: WifConfig) -> Result<String, AppError> {
    yaml::dump(&context(), &mut cfg)
}

pub fn run_setup(
    mut cfg: WifConfig,
    attribute: Option<BindingAttribute>,
    value: Option<String>,
) -> Result<SetupOutcome, AppError> {
    setup::execute(&context(), &mut cfg, attribute, value)
}
