//! YAML error types with source-annotated diagnostics

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Errors from reading or parsing a YAML document
#[derive(Debug, Error, Diagnostic)]
pub enum YamlError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] YamlSyntaxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A parse error pointing at the offending location in the file
#[derive(Debug, Error, Diagnostic)]
#[error("Invalid YAML in {filename}: {message}")]
#[diagnostic(code(shq::yaml::syntax), help("Check indentation and field names"))]
pub struct YamlSyntaxError {
    pub filename: String,
    pub message: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("here")]
    pub span: Option<SourceSpan>,
}

impl YamlSyntaxError {
    /// Build from a serde_yml error, keeping the location when one is reported
    pub fn from_serde_error(err: &serde_yml::Error, content: &str, filename: &str) -> Self {
        let span = err.location().map(|loc| {
            let offset = loc.index().min(content.len());
            SourceSpan::from((offset, 1usize.min(content.len() - offset)))
        });

        Self {
            filename: filename.to_string(),
            message: err.to_string(),
            src: NamedSource::new(filename, content.to_string()),
            span,
        }
    }
}
