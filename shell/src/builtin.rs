use crate::command::Invocation;
use crate::error::ShellError;
use crate::interpreter::Control;
use crate::search_path::SearchPath;
use log::debug;
use std::env;

/// Built-in commands known to the shell at compile time.
///
/// Operands are taken exactly as typed: a leading `-` has no special meaning, and the
/// only check made before the command body runs is the operand count. Builtins execute
/// in-process and never spawn a child.
pub(crate) trait BuiltinCommand: Sized {
    /// Canonical name of the command, e.g. "cd".
    fn name() -> &'static str;

    /// Build the command from its operands, or `None` when their number is wrong.
    fn from_operands(operands: &[String]) -> Option<Self>;

    /// Apply the command to the shell state.
    fn execute(self, search_path: &mut SearchPath) -> Result<Control, ShellError>;
}

/// Result of offering an invocation to the built-in dispatcher.
#[derive(Debug)]
pub enum Dispatch {
    /// A built-in ran successfully.
    Done(Control),
    /// A built-in was recognized but failed.
    Failed(ShellError),
    /// The name is not a built-in; resolve it as an external command.
    NotBuiltin,
}

/// Run `invocation` if it names a built-in.
pub fn dispatch(invocation: &Invocation, search_path: &mut SearchPath) -> Dispatch {
    let outcome = try_run::<Exit>(invocation, search_path)
        .or_else(|| try_run::<Cd>(invocation, search_path))
        .or_else(|| try_run::<PathBuiltin>(invocation, search_path));
    match outcome {
        Some(Ok(control)) => Dispatch::Done(control),
        Some(Err(e)) => Dispatch::Failed(e),
        None => Dispatch::NotBuiltin,
    }
}

fn try_run<T: BuiltinCommand>(
    invocation: &Invocation,
    search_path: &mut SearchPath,
) -> Option<Result<Control, ShellError>> {
    if invocation.name() != T::name() {
        return None;
    }
    let operands = invocation.operands();
    Some(match T::from_operands(operands) {
        Some(cmd) => cmd.execute(search_path),
        None => {
            debug!("{}: rejected {} operand(s)", T::name(), operands.len());
            Err(ShellError::Argument { command: T::name() })
        }
    })
}

/// Exit the shell. Takes no operands.
pub struct Exit;

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn from_operands(operands: &[String]) -> Option<Self> {
        operands.is_empty().then_some(Exit)
    }

    fn execute(self, _search_path: &mut SearchPath) -> Result<Control, ShellError> {
        Ok(Control::Exit)
    }
}

/// Change the current working directory of the shell and of every command it launches
/// afterwards. Takes exactly one operand.
pub struct Cd {
    pub target: String,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn from_operands(operands: &[String]) -> Option<Self> {
        match operands {
            [target] => Some(Cd {
                target: target.clone(),
            }),
            _ => None,
        }
    }

    fn execute(self, _search_path: &mut SearchPath) -> Result<Control, ShellError> {
        env::set_current_dir(&self.target).map_err(|source| ShellError::Os {
            command: Self::name(),
            target: self.target,
            source,
        })?;
        Ok(Control::Continue)
    }
}

/// Replace the list of directories searched for commands. Any number of operands is
/// accepted; with none, no external command can be found.
pub struct PathBuiltin {
    pub dirs: Vec<String>,
}

impl BuiltinCommand for PathBuiltin {
    fn name() -> &'static str {
        "path"
    }

    fn from_operands(operands: &[String]) -> Option<Self> {
        Some(PathBuiltin {
            dirs: operands.to_vec(),
        })
    }

    fn execute(self, search_path: &mut SearchPath) -> Result<Control, ShellError> {
        debug!("search path is now {:?}", self.dirs);
        search_path.replace(self.dirs);
        Ok(Control::Continue)
    }
}
