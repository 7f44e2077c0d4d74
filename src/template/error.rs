//! Template resolution error types.

use thiserror::Error;

/// Errors raised while reading a template descriptor or resolving its
/// dependencies. All of them are authoring-time errors and never retried.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("'{file}' file missing in template at '{root}'")]
    MissingFile { file: String, root: String },

    #[error("Error in processing template: {0}")]
    Config(String),

    #[error("IO error when reading `{0}`")]
    Io(String, #[source] std::io::Error),

    #[error("IO error while walking the template")]
    Walk(#[from] std::io::Error),

    #[error("Descriptor parsing error in `{0}`")]
    Yaml(String, #[source] serde_yaml::Error),
}

impl TemplateError {
    pub(crate) fn missing(file: &str, root: &str) -> Self {
        Self::MissingFile {
            file: file.to_owned(),
            root: root.to_owned(),
        }
    }
}
