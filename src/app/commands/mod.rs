pub mod auth;
pub mod pool;
pub mod provider;
pub mod resolve;
pub mod setup;
pub mod yaml;

pub(crate) const GRACE_PERIOD_NOTICE: &str =
    "it will be removed after a 30 day grace period and can be restored until then.";
