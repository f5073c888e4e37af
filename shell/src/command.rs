//! Data types produced by the segment parser and consumed by the dispatcher.

/// A segment after splitting off its redirection and normalizing the command text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Command text with canonical single-space separation; may be empty.
    pub command_text: String,
    /// File that receives both standard output and standard error of the launched process.
    pub redirect: Option<String>,
}

/// A command ready to be dispatched.
///
/// `args[0]` is always the command name; the remaining entries are its arguments in
/// the order they were typed. An invocation is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    args: Vec<String>,
    redirect: Option<String>,
}

impl Invocation {
    /// Build an invocation from its words, or `None` when there are no words.
    pub fn new(args: Vec<String>, redirect: Option<String>) -> Option<Self> {
        if args.is_empty() {
            return None;
        }
        Some(Self { args, redirect })
    }

    /// Name of the command to run.
    pub fn name(&self) -> &str {
        &self.args[0]
    }

    /// Arguments after the command name.
    pub fn operands(&self) -> &[String] {
        &self.args[1..]
    }

    /// The full argument vector, name included.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn redirect(&self) -> Option<&str> {
        self.redirect.as_deref()
    }

    pub fn into_parts(self) -> (Vec<String>, Option<String>) {
        (self.args, self.redirect)
    }
}

impl TryFrom<ParsedCommand> for Invocation {
    type Error = ParsedCommand;

    /// Tokenize the command text on single spaces. Fails, handing the input back, when
    /// the command text is empty.
    fn try_from(parsed: ParsedCommand) -> Result<Self, Self::Error> {
        if parsed.command_text.is_empty() {
            return Err(parsed);
        }
        let args = parsed.command_text.split(' ').map(str::to_owned).collect();
        Ok(Self {
            args,
            redirect: parsed.redirect,
        })
    }
}
