//! `template.yaml` descriptor parsing.
//!
//! # Example
//!
//! ```yaml
//! name: My Awesome Template
//!
//! scripts:
//!     - util.js
//!     - https://cdn.example.com/jquery.js
//!
//! assets: images/**/*.*
//!
//! pages:
//!     index.html: template:index
//!     about.html: template:about person = me
//!
//! hashes:
//!     https://cdn.example.com/jquery.js: sha384-...
//! ```

use super::error::TemplateError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Reserved descriptor file names, in lookup order.
pub const DESCRIPTOR_FILES: [&str; 2] = ["template.yaml", "template.yml"];

/// Entry script every template must provide.
pub const MAIN_SCRIPT: &str = "template.js";

/// Page reference used when neither `pages` nor `index` is given.
const DEFAULT_INDEX: &str = "template:index";

/// Output name of the default page.
const DEFAULT_PAGE: &str = "index.html";

/// `scripts`/`assets` accept a single string or a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }
}

/// Descriptor as written by the template author.
#[derive(Debug, Default, Deserialize)]
struct RawDescriptor {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    scripts: Option<OneOrMany>,
    #[serde(default)]
    assets: Option<OneOrMany>,
    #[serde(default)]
    pages: Option<IndexMap<String, String>>,
    #[serde(default)]
    hashes: Option<IndexMap<String, String>>,
    #[serde(default)]
    index: Option<String>,
}

/// Normalized template configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateDescriptor {
    pub name: Option<String>,
    /// Local glob patterns and remote URLs, as declared.
    pub scripts: Vec<String>,
    /// Local glob patterns and remote URLs, as declared.
    pub assets: Vec<String>,
    /// Output file name → page reference.
    pub pages: IndexMap<String, String>,
    /// Remote URL → integrity hash.
    pub hashes: IndexMap<String, String>,
}

impl TemplateDescriptor {
    /// Parse and normalize descriptor text. `file` names the source for errors.
    pub fn parse(content: &str, file: &str) -> Result<Self, TemplateError> {
        let raw: RawDescriptor = if content.trim().is_empty() {
            RawDescriptor::default()
        } else {
            serde_yaml::from_str(content).map_err(|err| TemplateError::Yaml(file.to_owned(), err))?
        };
        Ok(raw.into())
    }
}

impl From<RawDescriptor> for TemplateDescriptor {
    fn from(raw: RawDescriptor) -> Self {
        let pages = raw.pages.unwrap_or_else(|| {
            let index = raw.index.unwrap_or_else(|| DEFAULT_INDEX.to_owned());
            IndexMap::from([(DEFAULT_PAGE.to_owned(), index)])
        });

        Self {
            name: raw.name,
            scripts: raw.scripts.map(OneOrMany::into_vec).unwrap_or_default(),
            assets: raw.assets.map(OneOrMany::into_vec).unwrap_or_default(),
            pages,
            hashes: raw.hashes.unwrap_or_default(),
        }
    }
}

/// Whether `name` is one of the root files never treated as a dependency.
pub fn is_reserved(name: &str) -> bool {
    name == MAIN_SCRIPT || DESCRIPTOR_FILES.contains(&name)
}
