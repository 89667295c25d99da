//! Locating and loading the Oracle Client library.

use std::path::{Path, PathBuf};
use tracing::debug;
use crate::{Result, Error};
use super::platform::{NativeLibrary, PlatformLoader, DIAG_VARS};

/// Where users are sent when the client library cannot be loaded.
pub const DEFAULT_ERROR_URL: &str = "https://www.oracle.com/database/technologies/instant-client.html";

/**
Parameters of the library search.

```
use ocilink::LoadParams;

let params = LoadParams::new()
    .lib_dir("/opt/oracle/instantclient_21_13")
    .config_dir("/etc/oracle");
assert!(params.get_lib_dir().is_some());
```
*/
#[derive(Debug, Clone)]
pub struct LoadParams {
    lib_dir: Option<PathBuf>,
    config_dir: Option<PathBuf>,
    error_url: String,
}

impl Default for LoadParams {
    fn default() -> Self {
        Self { lib_dir: None, config_dir: None, error_url: DEFAULT_ERROR_URL.to_string() }
    }
}

impl LoadParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the search to this directory.
    pub fn lib_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.lib_dir = Some(dir.into());
        self
    }

    /// Directory with `tnsnames.ora` and friends. Exported as `TNS_ADMIN`
    /// before the library is loaded.
    pub fn config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = Some(dir.into());
        self
    }

    /// URL quoted in the load failure message.
    pub fn error_url(mut self, url: impl Into<String>) -> Self {
        self.error_url = url.into();
        self
    }

    pub fn get_lib_dir(&self) -> Option<&Path> {
        self.lib_dir.as_deref()
    }

    pub fn get_config_dir(&self) -> Option<&Path> {
        self.config_dir.as_deref()
    }

    pub fn get_error_url(&self) -> &str {
        &self.error_url
    }
}

/// One attempt to load a candidate library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadAttempt {
    pub path: PathBuf,
    pub error: Option<String>,
}

/// A successfully loaded library and the name it was loaded by.
pub(crate) struct Loaded {
    pub library: Box<dyn NativeLibrary>,
    pub path: PathBuf,
    pub attempts: Vec<LoadAttempt>,
}

struct Search<'a> {
    loader: &'a dyn PlatformLoader,
    attempts: Vec<LoadAttempt>,
}

impl Search<'_> {
    fn try_path(&mut self, path: PathBuf) -> Option<Box<dyn NativeLibrary>> {
        debug!(name = %path.display(), "load with name");
        match self.loader.open(&path) {
            Ok(lib) => {
                debug!(name = %path.display(), "load by OS successful");
                self.attempts.push(LoadAttempt { path, error: None });
                Some(lib)
            }
            Err(msg) => {
                debug!(name = %path.display(), error = %msg, "load by OS failure");
                self.attempts.push(LoadAttempt { path, error: Some(msg) });
                None
            }
        }
    }

    /// Tries the candidate names in `dir`, or bare names when `dir` is `None`.
    /// Unless `all_names` is set the search stops after the first name.
    fn try_dir(&mut self, dir: Option<&Path>, all_names: bool) -> Option<(Box<dyn NativeLibrary>, PathBuf)> {
        if let Some(dir) = dir {
            debug!(dir = %dir.display(), "load in dir");
        }
        let names = self.loader.lib_names();
        let count = if all_names { names.len() } else { names.len().min(1) };
        for name in &names[..count] {
            let path = match dir {
                Some(dir) => dir.join(name),
                None => PathBuf::from(name),
            };
            if let Some(lib) = self.try_path(path.clone()) {
                return Some((lib, path));
            }
        }
        None
    }

    fn first_failure(&self) -> Option<&str> {
        self.attempts.iter().find_map(|attempt| attempt.error.as_deref())
    }

    fn done(self, lib: Box<dyn NativeLibrary>, path: PathBuf) -> Loaded {
        Loaded { library: lib, path, attempts: self.attempts }
    }
}

fn log_environment(loader: &dyn PlatformLoader, params: &LoadParams) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }
    if let Some(dir) = &params.lib_dir {
        debug!(dir = %dir.display(), "Oracle Client lib dir parameter");
    }
    if let Some(dir) = &params.config_dir {
        debug!(dir = %dir.display(), "Oracle Client config dir parameter");
    }
    for name in DIAG_VARS {
        if let Some(value) = loader.var(name) {
            debug!(var = name, value = %value.to_string_lossy(), "environment");
        }
    }
}

/**
Finds and loads the Oracle Client library.

With an explicit library directory only that directory is searched, with every
candidate name. Otherwise the directory of this module is tried with the
preferred name, then the OS search rules with every name, and finally, except
on Windows, `$ORACLE_HOME/lib` with the preferred name.

If nothing loads, the error quotes the first failure of the whole search.
*/
pub(crate) fn load_library(loader: &dyn PlatformLoader, params: &LoadParams) -> Result<Loaded> {
    log_environment(loader, params);

    if let Some(dir) = &params.config_dir {
        loader.set_var("TNS_ADMIN", dir.as_os_str());
    }

    let mut search = Search { loader, attempts: Vec::new() };

    if let Some(dir) = &params.lib_dir {
        debug!("load in parameter directory");
        if let Some((lib, path)) = search.try_dir(Some(dir), true) {
            return Ok(search.done(lib, path));
        }
    } else {
        debug!("check module directory");
        if let Some(dir) = loader.shim_dir() {
            if let Some((lib, path)) = search.try_dir(Some(&dir), false) {
                return Ok(search.done(lib, path));
            }
        }

        debug!("load with OS search heuristics");
        if let Some((lib, path)) = search.try_dir(None, true) {
            return Ok(search.done(lib, path));
        }

        if loader.searches_home() {
            debug!("check ORACLE_HOME");
            let home = loader.var("ORACLE_HOME").filter(|home| !home.is_empty());
            if let Some(home) = home {
                let dir = PathBuf::from(home).join("lib");
                if let Some((lib, path)) = search.try_dir(Some(&dir), false) {
                    return Ok(search.done(lib, path));
                }
            }
        }
    }

    let bits = if cfg!(target_pointer_width = "64") { 64 } else { 32 };
    let reason = search.first_failure().unwrap_or("no candidate library names");
    Err(Error::LoadLibrary(format!(
        "cannot locate a {}-bit Oracle Client library: \"{}\". See {} for help",
        bits, reason, params.error_url
    )))
}
