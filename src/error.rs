use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::CoercionError;

/// Pipeline step an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    Connect,
    Reset,
    Insert,
    Verify,
    Disconnect,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Load => "load",
            Stage::Connect => "connect",
            Stage::Reset => "reset",
            Stage::Insert => "insert",
            Stage::Verify => "verify",
            Stage::Disconnect => "disconnect",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileRead,
    Parse,
    Connection,
    Storage,
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to connect to MongoDB: {source:#}")]
    Connection {
        #[source]
        source: anyhow::Error,
    },
    #[error("planet at index {index} was rejected: {source}")]
    Rejected {
        index: usize,
        #[source]
        source: CoercionError,
    },
    #[error("{stage} failed: {source:#}")]
    Storage {
        stage: Stage,
        #[source]
        source: anyhow::Error,
    },
}

impl ImportError {
    pub fn storage(stage: Stage, source: anyhow::Error) -> Self {
        ImportError::Storage { stage, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ImportError::FileRead { .. } => ErrorKind::FileRead,
            ImportError::Parse { .. } => ErrorKind::Parse,
            ImportError::Connection { .. } => ErrorKind::Connection,
            ImportError::Rejected { .. } | ImportError::Storage { .. } => ErrorKind::Storage,
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            ImportError::FileRead { .. } | ImportError::Parse { .. } => Stage::Load,
            ImportError::Connection { .. } => Stage::Connect,
            ImportError::Rejected { .. } => Stage::Insert,
            ImportError::Storage { stage, .. } => *stage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn storage_errors_keep_their_stage() {
        let err = ImportError::storage(Stage::Reset, anyhow!("not authorized on test"));
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert_eq!(err.stage(), Stage::Reset);
        assert_eq!(err.to_string(), "reset failed: not authorized on test");
    }

    #[test]
    fn rejected_records_are_storage_errors_in_insert() {
        let err = ImportError::Rejected {
            index: 2,
            source: CoercionError::NotAnObject("array"),
        };
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert_eq!(err.stage(), Stage::Insert);
        assert_eq!(
            err.to_string(),
            "planet at index 2 was rejected: expected an object, found array"
        );
    }

    #[test]
    fn load_errors_mention_the_file() {
        let err = ImportError::FileRead {
            path: PathBuf::from("planets-data.json"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(err.kind(), ErrorKind::FileRead);
        assert_eq!(err.stage(), Stage::Load);
        assert!(err.to_string().starts_with("failed to read planets-data.json"));
    }
}
