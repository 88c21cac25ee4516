//! Resource Loader Implementations
//!
//! - `JsonDirResourceLoader`: one `<menuId>.json` file per menu
//! - `InMemoryResourceLoader`: pre-fetched catalog with call accounting

mod json_dir;
mod memory;

pub use json_dir::JsonDirResourceLoader;
pub use memory::InMemoryResourceLoader;
