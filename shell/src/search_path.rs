/// Directory searched when the shell starts and no configuration says otherwise.
pub const DEFAULT_DIR: &str = "/bin";

/// Ordered list of directories consulted to resolve a bare command name.
///
/// Order is lookup priority. Duplicates are allowed, and an empty list is legal: it makes
/// every external command lookup fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<String>,
}

impl SearchPath {
    pub fn new<I, S>(dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    /// Replace the whole list, keeping the given order.
    pub fn replace<I, S>(&mut self, dirs: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dirs = dirs.into_iter().map(Into::into).collect();
    }

    pub fn dirs(&self) -> &[String] {
        &self.dirs
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

impl Default for SearchPath {
    fn default() -> Self {
        Self::new([DEFAULT_DIR])
    }
}
