use std::io;
use thiserror::Error;

/// The one message users see when anything goes wrong, unless verbose errors are enabled.
pub const ERROR_MESSAGE: &str = "An error has occurred\n";

/// Everything that can go wrong while handling a single segment of a line.
///
/// None of these is fatal to the shell: the interpreter reports the error and moves on
/// to the next segment.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The segment or its redirection is malformed.
    #[error("syntax error: {0}")]
    Syntax(&'static str),

    /// A built-in was given the wrong number of arguments.
    #[error("{command}: wrong number of arguments")]
    Argument { command: &'static str },

    /// A built-in's system call failed.
    #[error("{command}: {target}: {source}")]
    Os {
        command: &'static str,
        target: String,
        #[source]
        source: io::Error,
    },

    /// No directory in the search path holds an executable with this name.
    #[error("{0}: command not found")]
    NotFound(String),

    /// The redirection target cannot be opened for writing.
    #[error("{path}: cannot open for writing: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The OS refused to create the child process.
    #[error("{command}: cannot execute: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_culprit() {
        let err = ShellError::NotFound("frobnicate".to_string());
        assert_eq!(err.to_string(), "frobnicate: command not found");

        let err = ShellError::Argument { command: "cd" };
        assert_eq!(err.to_string(), "cd: wrong number of arguments");
    }

    #[test]
    fn generic_message_is_a_single_line() {
        assert!(ERROR_MESSAGE.ends_with('\n'));
        assert_eq!(ERROR_MESSAGE.matches('\n').count(), 1);
    }
}
