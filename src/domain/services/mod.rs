//! Domain Services
//!
//! Stateless logic over the domain entities. The cascade selector reaches the
//! outside world only through the [`ResourceLoader`](crate::domain::ports::ResourceLoader) port.

mod cascade_selector;
mod tree_transformer;

pub use cascade_selector::{CascadeSelector, LoadPolicy};
pub use tree_transformer::{extract_selected_ids, transform, SelectedIds};
