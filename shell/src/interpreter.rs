use crate::builtin::{self, Dispatch};
use crate::config::Config;
use crate::error::{ERROR_MESSAGE, ShellError};
use crate::external::ExternalCommand;
use crate::parser::{parse_segment, split_segments};
use crate::search_path::SearchPath;
use log::{debug, warn};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, BufRead, Write};
use std::process::Child;

/// Whether the shell keeps reading input after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    /// `exit` ran; stop without waiting for anything else.
    Exit,
}

/// What handling one segment produced.
enum Step {
    Launched(Child),
    Finished(Control),
}

/// Child processes launched from one input line.
///
/// Built-ins, blank segments and failed segments leave an empty slot.
#[derive(Debug, Default)]
struct Job {
    handles: Vec<Option<Child>>,
}

impl Job {
    fn push(&mut self, handle: Option<Child>) {
        self.handles.push(handle);
    }

    /// Block until every launched child has terminated. Exit statuses are only logged.
    fn wait_all(self) {
        for mut child in self.handles.into_iter().flatten() {
            let pid = child.id();
            match child.wait() {
                Ok(status) => debug!("pid {pid} finished: {status}"),
                Err(e) => warn!("cannot wait for pid {pid}: {e}"),
            }
        }
    }
}

/// A line-oriented shell: each line is split on `&`, every segment is dispatched left to
/// right, and the processes it launched are awaited together before the next line.
///
/// The interpreter owns the search path; built-ins mutate it and external command lookup
/// reads it, all on the calling thread.
///
/// Example
/// ```
/// use wish::{Control, Interpreter, SearchPath};
/// let mut sh = Interpreter::new(SearchPath::default());
/// assert_eq!(sh.execute_line("path /usr/bin /bin"), Control::Continue);
/// assert_eq!(sh.search_path().dirs(), ["/usr/bin", "/bin"]);
/// assert_eq!(sh.execute_line("exit"), Control::Exit);
/// ```
pub struct Interpreter {
    search_path: SearchPath,
    errors: Box<dyn Write>,
    verbose_errors: bool,
}

impl Interpreter {
    /// Create an interpreter reporting errors to stderr.
    pub fn new(search_path: SearchPath) -> Self {
        Self {
            search_path,
            errors: Box::new(io::stderr()),
            verbose_errors: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.search_path()).with_verbose_errors(config.verbose_errors)
    }

    /// Send error reports somewhere other than stderr.
    pub fn with_error_sink(mut self, sink: impl Write + 'static) -> Self {
        self.errors = Box::new(sink);
        self
    }

    /// Report `wish: <reason>` instead of the generic message.
    pub fn with_verbose_errors(mut self, verbose: bool) -> Self {
        self.verbose_errors = verbose;
        self
    }

    pub fn search_path(&self) -> &SearchPath {
        &self.search_path
    }

    /// Run one input line and return once everything it launched has terminated.
    ///
    /// Segments are dispatched strictly left to right, so a built-in takes effect before
    /// the next segment is parsed. A failing segment is reported and skipped; its
    /// siblings still run. `exit` returns [`Control::Exit`] at once: later segments are
    /// not dispatched and children already launched are not awaited.
    pub fn execute_line(&mut self, line: &str) -> Control {
        let mut job = Job::default();
        for (index, segment) in split_segments(line).into_iter().enumerate() {
            debug!("segment {index}: {segment:?}");
            match self.execute_segment(segment) {
                Ok(Step::Launched(child)) => job.push(Some(child)),
                Ok(Step::Finished(Control::Continue)) => job.push(None),
                Ok(Step::Finished(Control::Exit)) => return Control::Exit,
                Err(e) => {
                    self.report(&e);
                    job.push(None);
                }
            }
        }
        job.wait_all();
        Control::Continue
    }

    fn execute_segment(&mut self, segment: &str) -> Result<Step, ShellError> {
        let Some(invocation) = parse_segment(segment)? else {
            return Ok(Step::Finished(Control::Continue));
        };
        match builtin::dispatch(&invocation, &mut self.search_path) {
            Dispatch::Done(control) => Ok(Step::Finished(control)),
            Dispatch::Failed(e) => Err(e),
            Dispatch::NotBuiltin => {
                let command = ExternalCommand::resolve(&self.search_path, invocation)?;
                Ok(Step::Launched(command.spawn()?))
            }
        }
    }

    fn report(&mut self, err: &ShellError) {
        debug!("reporting: {err}");
        let written = if self.verbose_errors {
            writeln!(self.errors, "wish: {err}")
        } else {
            self.errors.write_all(ERROR_MESSAGE.as_bytes())
        };
        if let Err(e) = written.and_then(|()| self.errors.flush()) {
            warn!("cannot report error: {e}");
        }
    }

    /// Execute every line of `reader` until end of input or `exit`.
    ///
    /// A last line without a trailing newline is still executed. Bytes that are not valid
    /// UTF-8 are replaced with U+FFFD and the line runs like any other.
    pub fn run_script<R: BufRead>(&mut self, mut reader: R) -> io::Result<Control> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                return Ok(Control::Continue);
            }
            if buf.last() == Some(&b'\n') {
                buf.pop();
            }
            if self.execute_line(&String::from_utf8_lossy(&buf)) == Control::Exit {
                return Ok(Control::Exit);
            }
        }
    }

    /// Read-Eval-Print Loop on the terminal until end of input or `exit`.
    ///
    /// Ctrl-C discards the line being edited; Ctrl-D ends the session.
    pub fn repl(&mut self, prompt: &str) -> rustyline::Result<Control> {
        let mut rl = DefaultEditor::new()?;

        loop {
            match rl.readline(prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str())?;
                    }
                    if self.execute_line(&line) == Control::Exit {
                        return Ok(Control::Exit);
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => return Ok(Control::Continue),
                Err(err) => return Err(err),
            }
        }
    }
}
