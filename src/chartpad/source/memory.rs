use super::{template_index_path, template_path, SchemaSource, DIVISIONS_FILE};
use crate::error::{ChartpadError, Result};
use crate::model::{DivisionIndex, Template, TemplateIndex};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Schema documents held in memory.
/// Lookups of documents that were never added fail like a missing file would.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    divisions: Option<DivisionIndex>,
    indexes: HashMap<String, TemplateIndex>,
    templates: HashMap<PathBuf, Template>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_divisions(mut self, divisions: DivisionIndex) -> Self {
        self.divisions = Some(divisions);
        self
    }

    pub fn with_template_index(mut self, folder: &str, index: TemplateIndex) -> Self {
        self.indexes.insert(folder.to_string(), index);
        self
    }

    pub fn with_template(mut self, folder: Option<&str>, file: &str, template: Template) -> Self {
        self.templates.insert(template_path(folder, file), template);
        self
    }
}

fn missing(path: PathBuf) -> ChartpadError {
    ChartpadError::Load {
        path,
        reason: "not found".to_string(),
    }
}

impl SchemaSource for MemorySource {
    fn load_divisions(&self) -> Result<DivisionIndex> {
        self.divisions
            .clone()
            .ok_or_else(|| missing(Path::new(DIVISIONS_FILE).to_path_buf()))
    }

    fn load_template_index(&self, folder: &str) -> Result<TemplateIndex> {
        self.indexes
            .get(folder)
            .cloned()
            .ok_or_else(|| missing(template_index_path(folder)))
    }

    fn load_template(&self, folder: Option<&str>, file: &str) -> Result<Template> {
        let path = template_path(folder, file);
        self.templates.get(&path).cloned().ok_or_else(|| missing(path))
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use serde_json::json;

    /// Two divisions: `im` with an admission and a follow-up template (the second has
    /// no file), and `er` whose template index is missing.
    pub fn clinic() -> MemorySource {
        let divisions: DivisionIndex = serde_json::from_value(json!({"divisions": [
            {"folder": "", "name": "Placeholder"},
            {"folder": "im", "name": "Internal Medicine"},
            {"folder": "er"}
        ]}))
        .unwrap_or_default();
        let index: TemplateIndex = serde_json::from_value(json!({"templates": [
            {"name": "Admission", "file": "adm.json"},
            {"name": "Follow-up (draft)"}
        ]}))
        .unwrap_or_default();
        let template: Template = serde_json::from_value(json!({"sections": {
            "O": [{"type": "input", "id": "bt", "label": "BT", "value": "36.8", "suffix": "°C"}],
            "A+P": [{"type": "textarea", "id": "plan", "prefix": "", "value": "observe"}],
            "S": [
                {"type": "input", "id": "cc", "label": "CC", "value": "cough"},
                {"type": "checkbox-group", "id": "sx", "label": "Sx", "options": [
                    {"value": "Fever", "withInput": true, "detailPrefix": " x", "detailValue": "3d"},
                    {"value": "Dyspnea", "checked": true}
                ]}
            ],
            "Intro": [{"type": "text", "value": "65M"}]
        }}))
        .unwrap_or_default();

        MemorySource::new()
            .with_divisions(divisions)
            .with_template_index("im", index)
            .with_template(Some("im"), "adm.json", template)
    }
}
