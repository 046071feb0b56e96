//! Error types for ifaces

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IfacesError {
    /// A relative filename has no absolute ancestor to resolve against
    #[error("Cannot resolve absolute path for {}", path.display())]
    PathResolution { path: PathBuf },

    /// Malformed stanza layout or unknown stanza keyword
    #[error("Parse error in {}{}: {reason}", path.display(), line_suffix(line))]
    ParseStructure {
        path: PathBuf,
        line: Option<usize>,
        reason: String,
    },

    /// Startup directive naming an interface that is not declared in the same file
    #[error("{}: startup directive references unknown interface '{name}'", path.display())]
    DanglingReference { path: PathBuf, name: String },

    /// Field lookup on a stanza found no entry
    #[error("Field '{key}' not found in stanza '{stanza}'")]
    FieldNotFound { stanza: String, key: String },

    /// Interface or mapping not found anywhere in the inclusion tree
    #[error("Not found: {0}")]
    NotFound(String),

    /// A file sources itself, directly or through its descendants
    #[error("Include cycle detected at {}", path.display())]
    IncludeCycle { path: PathBuf },

    /// IO error on a specific path
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

fn line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(n) => format!(" line {}", n),
        None => String::new(),
    }
}

impl IfacesError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        IfacesError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        IfacesError::ParseStructure {
            path: path.into(),
            line: None,
            reason: reason.into(),
        }
    }

    /// Attach a line number to a parse error that was raised without one
    pub fn at_line(self, n: usize) -> Self {
        match self {
            IfacesError::ParseStructure { path, line: None, reason } => IfacesError::ParseStructure {
                path,
                line: Some(n),
                reason,
            },
            other => other,
        }
    }
}

pub type IfacesResult<T> = Result<T, IfacesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display_with_line() {
        let err = IfacesError::parse("/etc/network/interfaces", "option before any stanza").at_line(3);
        assert_eq!(
            err.to_string(),
            "Parse error in /etc/network/interfaces line 3: option before any stanza"
        );
    }

    #[test]
    fn test_at_line_keeps_existing_line() {
        let err = IfacesError::parse("x", "bad").at_line(1).at_line(9);
        match err {
            IfacesError::ParseStructure { line, .. } => assert_eq!(line, Some(1)),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_at_line_ignores_other_kinds() {
        let err = IfacesError::NotFound("eth0".to_string()).at_line(4);
        assert_eq!(err.to_string(), "Not found: eth0");
    }
}
