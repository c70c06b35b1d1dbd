//! Error types shared across the core crate.
//!
//! Upstream failures (search, generation) are always recoverable: callers turn
//! them into empty results or placeholder text. Template and input errors block
//! the operation that raised them before any network activity happens.

use std::path::PathBuf;
use thiserror::Error;

/// Failures reading or writing the persisted prompt configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write config {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// User input rejected before any remote call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    #[error("검색할 키워드를 입력해주세요.")]
    EmptyKeyword,
    #[error("수동으로 생성할 제목을 입력해주세요.")]
    EmptyTitle,
}

/// Failures talking to the blog search API.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("Naver client id or secret is not configured")]
    MissingCredentials,
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("search API error {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode search response: {0}")]
    Decode(String),
}

/// Failures talking to the text generation API.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("OpenAI API key is not configured")]
    NotConfigured,
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("model returned no content")]
    EmptyResponse,
    #[error("generation task stopped before finishing: {0}")]
    Interrupted(String),
}

/// A prompt template that cannot be rendered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("prompt template is missing the {{{0}}} placeholder")]
    MissingPlaceholder(&'static str),
    #[error("prompt template uses unknown placeholder {{{0}}}")]
    UnknownPlaceholder(String),
    #[error("prompt template has an unmatched '{brace}' at character {position}")]
    UnmatchedBrace { brace: char, position: usize },
}

/// Reasons an article generation request is refused outright.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Template(#[from] TemplateError),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("file name must not be empty")]
    EmptyFilename,
    #[error("file name must not contain a directory: {0:?}")]
    NotAFileName(String),
    #[error("failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
