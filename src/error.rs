use crate::base::FileId;
use std::path::PathBuf;
use thiserror::Error;

/// Exceptional conditions that abort an operation outright, as opposed to
/// [`crate::diagnostics::Diagnostic`]s, which are collected as data during a
/// parse. One public `thiserror` error type, drawing the same split most
/// front ends draw between "parse found something wrong" (a `Diagnostic`)
/// and "the operation itself could not proceed" (this type).
#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("could not read `{path}`: {source}")]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cyclical dependency: including `{to}` from `{from}` closes a cycle")]
    CyclicalDependency { from: PathBuf, to: PathBuf },

    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),

    #[error("no parser registered for file {0:?}")]
    UnknownFile(FileId),
}
