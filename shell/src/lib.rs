//! wish: a small line-oriented shell.
//!
//! Each input line is split on `&` into segments. Segments are parsed and dispatched one
//! after another, left to right: the built-ins `exit`, `cd` and `path` run inside the
//! shell, anything else is looked up in the search path and launched as a child process,
//! optionally with its output redirected to a file by `> file`. Children of one line run
//! concurrently and are all awaited before the next line is read.
//!
//! The main entry point is [`Interpreter`]. Errors never stop the shell; each one is
//! reported as a single line on stderr and the next segment is processed.

mod builtin;
pub mod command;
pub mod config;
pub mod error;
pub mod external;
mod interpreter;
pub mod io_adapters;
pub mod logging;
pub mod normalize;
pub mod parser;
pub mod search_path;

/// Just a convenient re-export of the line interpreter.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::{Control, Interpreter};
pub use search_path::SearchPath;

#[cfg(test)]
fn lock_current_dir() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::{Mutex, OnceLock};
    static MUTEX: OnceLock<Mutex<()>> = OnceLock::new();
    MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
