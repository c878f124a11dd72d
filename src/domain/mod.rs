pub mod binding;
pub mod config;
pub mod error;
pub mod expression;
pub mod validation;

pub use binding::BindingAttribute;
pub use config::{WifConfig, WifDefaults};
pub use error::AppError;
pub use expression::Expression;
pub use validation::{trailing_segment, validate_claim_value, validate_resource_name};
