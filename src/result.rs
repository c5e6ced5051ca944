use std::path::PathBuf;

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    #[error("cannot read lexicon file {0}: {1}")]
    LexiconLoad(PathBuf, String),

    #[error("cannot read source file {0}: {1}")]
    SourceLoad(PathBuf, String),

    #[error("duplicate key {0} in a strict fuzzy map")]
    KeyConflict(String),

    #[error("{} error(s) while running", .0.len())]
    BuildErrors(Vec<Error>),
}

pub type Result<T> = std::result::Result<T, Error>;
