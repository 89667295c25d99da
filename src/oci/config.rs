//! Default location of the client network configuration.

use std::{ffi::OsString, path::{Path, PathBuf}};
use tracing::debug;
use super::platform::{PlatformLoader, CONFIG_SUBDIR};

fn non_empty(value: Option<OsString>) -> Option<OsString> {
    value.filter(|v| !v.is_empty())
}

fn with_subdir(base: PathBuf) -> PathBuf {
    CONFIG_SUBDIR.iter().fold(base, |dir, part| dir.join(part))
}

/**
Picks the configuration directory.

An explicit directory wins. Otherwise `TNS_ADMIN` is used as is, then
`$ORACLE_HOME/network/admin`, and finally `network/admin` under the directory
the client library was loaded from. `lib_dir` is only evaluated when needed.
Empty environment values count as unset.
*/
pub fn resolve(
    explicit: Option<&Path>,
    tns_admin: Option<OsString>,
    oracle_home: Option<OsString>,
    lib_dir: impl FnOnce() -> Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(dir) = explicit {
        return Some(dir.to_path_buf());
    }
    if let Some(dir) = non_empty(tns_admin) {
        return Some(PathBuf::from(dir));
    }
    if let Some(home) = non_empty(oracle_home) {
        return Some(with_subdir(PathBuf::from(home)));
    }
    lib_dir().map(with_subdir)
}

/// Computes the configuration directory from the process environment.
pub(crate) fn config_dir(
    loader: &dyn PlatformLoader,
    explicit: Option<&Path>,
    lib_dir: impl FnOnce() -> Option<PathBuf>,
) -> Option<PathBuf> {
    let dir = resolve(explicit, loader.var("TNS_ADMIN"), loader.var("ORACLE_HOME"), lib_dir);
    match &dir {
        Some(dir) => debug!(dir = %dir.display(), "configuration directory"),
        None => debug!("configuration directory cannot be determined"),
    }
    dir
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os(s: &str) -> Option<OsString> {
        Some(OsString::from(s))
    }

    #[test]
    fn explicit_dir_wins() {
        let dir = resolve(Some(Path::new("/etc/ora")), os("/tns"), os("/home"), || panic!("not needed"));
        assert_eq!(dir, Some(PathBuf::from("/etc/ora")));
    }

    #[test]
    fn tns_admin_beats_oracle_home() {
        let dir = resolve(None, os("/tns"), os("/u01/app/oracle"), || Some(PathBuf::from("/lib")));
        assert_eq!(dir, Some(PathBuf::from("/tns")));
    }

    #[test]
    fn oracle_home_beats_library_dir() {
        let dir = resolve(None, None, os("/u01/app/oracle"), || panic!("not needed"));
        assert_eq!(dir, Some(Path::new("/u01/app/oracle").join("network").join("admin")));
    }

    #[test]
    fn library_dir_is_the_last_resort() {
        let dir = resolve(None, os(""), None, || Some(PathBuf::from("/opt/instantclient")));
        assert_eq!(dir, Some(Path::new("/opt/instantclient").join("network").join("admin")));
        assert_eq!(resolve(None, None, os(""), || None), None);
    }
}
