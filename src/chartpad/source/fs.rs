use super::{template_index_path, template_path, SchemaSource, DIVISIONS_FILE};
use crate::error::{ChartpadError, Result};
use crate::model::{DivisionIndex, Template, TemplateIndex};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Component, Path, PathBuf};

pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_json<T: DeserializeOwned>(&self, relative: &Path) -> Result<T> {
        let path = self.root.join(relative);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(ChartpadError::Load {
                path,
                reason: "path leaves the template root".to_string(),
            });
        }

        tracing::debug!(path = %path.display(), "reading schema document");
        let raw = fs::read_to_string(&path).map_err(|e| ChartpadError::Load {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&raw).map_err(|e| ChartpadError::Load {
            path,
            reason: e.to_string(),
        })
    }
}

impl SchemaSource for FsSource {
    fn load_divisions(&self) -> Result<DivisionIndex> {
        self.read_json(Path::new(DIVISIONS_FILE))
    }

    fn load_template_index(&self, folder: &str) -> Result<TemplateIndex> {
        self.read_json(&template_index_path(folder))
    }

    fn load_template(&self, folder: Option<&str>, file: &str) -> Result<Template> {
        self.read_json(&template_path(folder, file))
    }
}
