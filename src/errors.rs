use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum DepsError {
    #[error("{file} is not a syntactically valid Elm module. Try running the compiler on it manually to figure out what the problem is.")]
    #[diagnostic(code(elm_deps::invalid_module))]
    InvalidModuleDeclaration { file: PathBuf },

    #[error("Could not read entry file {file}: {source}")]
    #[diagnostic(code(elm_deps::entry_unreadable))]
    EntryUnreadable {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(elm_deps::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(elm_deps::io))]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(code(elm_deps::json))]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DepsError>;
