pub mod resource_lister;
pub mod selection;

pub use resource_lister::{ResourceLister, gcloud_args};
pub use selection::{prompt_until, select_from_list, select_index};
