use crate::command::Invocation;
use crate::error::ShellError;
use crate::search_path::SearchPath;
use log::debug;
use nix::unistd::{AccessFlags, access};
use std::fs::File;
use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};
use std::process::{Child, Command};

/// Command that is not a builtin, resolved to an executable file.
#[derive(Debug)]
pub struct ExternalCommand {
    path: PathBuf,
    args: Vec<String>,
    redirect: Option<String>,
}

impl ExternalCommand {
    pub fn new(path: PathBuf, invocation: Invocation) -> Self {
        let (args, redirect) = invocation.into_parts();
        Self {
            path,
            args,
            redirect,
        }
    }

    /// Resolve `invocation` against the search path.
    pub fn resolve(search_path: &SearchPath, invocation: Invocation) -> Result<Self, ShellError> {
        let path = find_command_path(search_path, invocation.name())?;
        Ok(Self::new(path, invocation))
    }

    /// Start the command without waiting for it.
    ///
    /// `args[0]` is passed to the child as typed, not replaced by the resolved path. When a
    /// redirection target is set, it is created (or truncated) and receives both standard
    /// output and standard error. The parent's handles on that file are closed before
    /// this returns, whether or not the spawn succeeded.
    pub fn spawn(self) -> Result<Child, ShellError> {
        let mut cmd = Command::new(&self.path);
        cmd.arg0(&self.args[0]).args(&self.args[1..]);

        if let Some(target) = &self.redirect {
            let open_error = |source| ShellError::Io {
                path: target.clone(),
                source,
            };
            let stdout = File::create(target).map_err(open_error)?;
            let stderr = stdout.try_clone().map_err(open_error)?;
            cmd.stdout(stdout).stderr(stderr);
        }

        let child = cmd.spawn().map_err(|source| ShellError::Spawn {
            command: self.args[0].clone(),
            source,
        })?;
        debug!("spawned {} as pid {}", self.path.display(), child.id());
        Ok(child)
    }
}

/// Find the first directory in `search_path` holding an executable called `name`.
///
/// Candidates are formed as `<directory>/<name>` in search-path order and the first one
/// the current user may execute wins.
pub fn find_command_path(search_path: &SearchPath, name: &str) -> Result<PathBuf, ShellError> {
    for dir in search_path.dirs() {
        let candidate = PathBuf::from(format!("{dir}/{name}"));
        if is_executable(&candidate) {
            debug!("resolved {name} to {}", candidate.display());
            return Ok(candidate);
        }
    }
    Err(ShellError::NotFound(name.to_owned()))
}

fn is_executable(path: &Path) -> bool {
    access(path, AccessFlags::X_OK).is_ok()
}
