//! ResourceLoader port
//!
//! Fetches the resource leaves of one menu on demand. The cascade selector
//! awaits it the first time a menu with no known resources is selected or
//! expanded.

use async_trait::async_trait;

use crate::domain::entities::ResourceNode;

#[async_trait]
pub trait ResourceLoader: Send + Sync {
    /// Return the resources owned by `menu_id`; an empty list is valid.
    async fn load_resources(&self, menu_id: &str) -> Result<Vec<ResourceNode>, LoadError>;
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("failed to load resources for menu '{menu_id}': {message}")]
    Failed { menu_id: String, message: String },

    #[error("resource source unavailable for menu '{menu_id}'")]
    Unavailable { menu_id: String },
}

impl LoadError {
    pub fn menu_id(&self) -> &str {
        match self {
            LoadError::Failed { menu_id, .. } | LoadError::Unavailable { menu_id } => menu_id,
        }
    }
}

/// Loader for forests that already carry every resource inline
pub struct NoopResourceLoader;

#[async_trait]
impl ResourceLoader for NoopResourceLoader {
    async fn load_resources(&self, _menu_id: &str) -> Result<Vec<ResourceNode>, LoadError> {
        Ok(Vec::new())
    }
}
