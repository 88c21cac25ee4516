//! Directory-backed resource loader
//!
//! Reads `<root>/<menuId>.json`, an array of resource nodes in the same shape
//! the backend uses inside the permission forest. A missing file means the
//! menu owns no resources.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::entities::{ResourceNode, ResourcePermissionNode};
use crate::domain::ports::{LoadError, ResourceLoader};

pub struct JsonDirResourceLoader {
    root: PathBuf,
}

impl JsonDirResourceLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, menu_id: &str) -> Result<PathBuf, LoadError> {
        let escapes = menu_id.is_empty()
            || menu_id == "."
            || menu_id == ".."
            || menu_id.contains(['/', '\\']);
        if escapes {
            return Err(LoadError::Unavailable {
                menu_id: menu_id.to_string(),
            });
        }
        Ok(self.root.join(format!("{menu_id}.json")))
    }
}

#[async_trait]
impl ResourceLoader for JsonDirResourceLoader {
    async fn load_resources(&self, menu_id: &str) -> Result<Vec<ResourceNode>, LoadError> {
        let path = self.path_for(menu_id)?;
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(menu_id, path = %path.display(), "no resource file for menu");
                return Ok(Vec::new());
            }
            Err(err) => {
                return Err(LoadError::Failed {
                    menu_id: menu_id.to_string(),
                    message: format!("{}: {err}", path.display()),
                })
            }
        };

        let nodes: Vec<ResourcePermissionNode> =
            serde_json::from_str(&content).map_err(|err| LoadError::Failed {
                menu_id: menu_id.to_string(),
                message: format!("{}: {err}", path.display()),
            })?;

        Ok(nodes.iter().map(|node| node.to_resource(menu_id)).collect())
    }
}
