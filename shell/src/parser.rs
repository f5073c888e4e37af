use crate::command::{Invocation, ParsedCommand};
use crate::error::ShellError;
use crate::normalize::normalize;

/// Separates commands that are launched together and awaited as one batch.
pub const PARALLEL_DELIMITER: char = '&';

/// Separates a command from the file its output goes to.
pub const REDIRECT_OPERATOR: char = '>';

/// Split a raw input line into its parallel segments, left to right.
///
/// A line with `k` delimiters always yields `k + 1` segments, some of which may be
/// empty or blank. An empty line yields exactly one empty segment.
pub fn split_segments(line: &str) -> Vec<&str> {
    line.split(PARALLEL_DELIMITER).collect()
}

/// Split a segment on its first redirection operator and normalize both halves.
///
/// The redirection target must be a single non-empty word; anything else (including a
/// second operator) is a syntax error.
pub fn split_redirect(segment: &str) -> Result<ParsedCommand, ShellError> {
    let (command_part, redirect) = match segment.split_once(REDIRECT_OPERATOR) {
        Some((command_part, target_part)) => {
            let target = normalize(target_part);
            if target.is_empty() || target.contains(REDIRECT_OPERATOR) || target.contains(' ')
            {
                return Err(ShellError::Syntax("bad redirection"));
            }
            (command_part, Some(target))
        }
        None => (segment, None),
    };
    Ok(ParsedCommand {
        command_text: normalize(command_part),
        redirect,
    })
}

/// Parse one segment into an [`Invocation`].
///
/// # Returns
///
/// * `Ok(Some(invocation))` for a runnable command.
/// * `Ok(None)` for a blank segment, which is silently skipped.
/// * `Err(_)` for a malformed redirection or a redirection with no command.
pub fn parse_segment(segment: &str) -> Result<Option<Invocation>, ShellError> {
    let parsed = split_redirect(segment)?;
    match Invocation::try_from(parsed) {
        Ok(invocation) => Ok(Some(invocation)),
        Err(ParsedCommand { redirect: None, .. }) => Ok(None),
        Err(ParsedCommand {
            redirect: Some(_), ..
        }) => Err(ShellError::Syntax("empty command with redirect")),
    }
}
