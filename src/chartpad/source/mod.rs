//! # Schema Source
//!
//! Where divisions, template indexes and templates come from. The core only sees
//! parsed documents through [`SchemaSource`]; the transport is up to the
//! implementation.
//!
//! ## Implementations
//!
//! - [`fs::FsSource`]: reads JSON files below a root directory
//! - [`memory::MemorySource`]: documents held in memory, for tests and embedding
//!
//! ## Layout
//!
//! ```text
//! <root>/
//! ├── divisions.json                 { "divisions": [{ "folder", "name" }] }
//! └── templates/
//!     ├── <folder>/templates.json    { "templates": [{ "name", "file" }] }
//!     ├── <folder>/<file>            a template
//!     └── <file>                     a template of a division without a folder
//! ```

use crate::error::Result;
use crate::model::{DivisionIndex, Template, TemplateIndex};
use std::path::PathBuf;

pub mod fs;
pub mod memory;

pub const DIVISIONS_FILE: &str = "divisions.json";
pub const TEMPLATES_DIR: &str = "templates";
pub const TEMPLATE_INDEX_FILE: &str = "templates.json";

pub trait SchemaSource {
    fn load_divisions(&self) -> Result<DivisionIndex>;

    fn load_template_index(&self, folder: &str) -> Result<TemplateIndex>;

    /// `folder` is `None` for templates that live directly under `templates/`.
    fn load_template(&self, folder: Option<&str>, file: &str) -> Result<Template>;
}

/// Relative location of a division's template index.
pub fn template_index_path(folder: &str) -> PathBuf {
    PathBuf::from(TEMPLATES_DIR)
        .join(folder)
        .join(TEMPLATE_INDEX_FILE)
}

/// Relative location of a template file.
pub fn template_path(folder: Option<&str>, file: &str) -> PathBuf {
    let mut path = PathBuf::from(TEMPLATES_DIR);
    if let Some(folder) = folder.filter(|f| !f.is_empty()) {
        path.push(folder);
    }
    path.push(file);
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(
            template_index_path("im"),
            PathBuf::from("templates/im/templates.json")
        );
        assert_eq!(
            template_path(Some("im"), "adm.json"),
            PathBuf::from("templates/im/adm.json")
        );
        assert_eq!(template_path(None, "adm.json"), PathBuf::from("templates/adm.json"));
        assert_eq!(template_path(Some(""), "adm.json"), PathBuf::from("templates/adm.json"));
    }
}
