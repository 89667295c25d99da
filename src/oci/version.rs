//! Client version detection and validation.

use std::fmt;
use once_cell::sync::OnceCell;
use tracing::debug;
use crate::{Result, Error};
use super::{entry::{ep, Entry}, symbols::SymbolTable};

/// Oldest client release that is supported.
pub const MIN_CLIENT_VERSION: (i32, i32) = (11, 2);

// Resolved eagerly as they are called far more often than anything else.
const HOT_ENTRIES: [Entry; 3] = [Entry::AttrGet, Entry::AttrSet, Entry::ThreadKeyGet];

// Set once the OCI threading layer has been initialized by any runtime of the process.
static THREAD_INIT: OnceCell<()> = OnceCell::new();

/// Version of the loaded Oracle Client library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct VersionInfo {
    pub version: i32,
    pub release: i32,
    pub update: i32,
    pub port_release: i32,
    pub port_update: i32,
    /// All five components folded into one comparable number
    pub full_version: u32,
}

impl VersionInfo {
    pub fn new(version: i32, release: i32, update: i32, port_release: i32, port_update: i32) -> Self {
        let full_version = version as u32 * 100_000_000
            + release as u32 * 1_000_000
            + update as u32 * 10_000
            + port_release as u32 * 100
            + port_update as u32;
        Self { version, release, update, port_release, port_update, full_version }
    }

    /// Whether the client is at `major.minor` or newer.
    pub fn at_least(&self, major: i32, minor: i32) -> bool {
        (self.version, self.release) >= (major, minor)
    }

    /// Fails with [`Error::ClientTooOld`] unless the client is at `major.minor` or newer.
    pub fn require(&self, major: i32, minor: i32) -> Result<()> {
        if self.at_least(major, minor) {
            Ok(())
        } else {
            Err(Error::ClientTooOld { required: (major, minor), actual: (self.version, self.release) })
        }
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}.{}", self.version, self.release, self.update, self.port_release, self.port_update)
    }
}

/**
Checks that the freshly loaded library is a usable client.

Reads the client version, rejects anything older than 11.2, initializes the
OCI threading layer and resolves the hot entry points. The caller must drop
the library if this fails.

The threading layer is initialized once per process. Later loads only check
that the library exports `OCIThreadProcessInit`.
*/
pub(crate) fn validate(symbols: &SymbolTable) -> Result<VersionInfo> {
    debug!("validating loaded library");

    let client_version = symbols.get::<ep::ClientVersion>()
        .map_err(|_| Error::UnsupportedClient("OCIClientVersion is not exported".to_string()))?;
    let (mut version, mut release, mut update, mut port_release, mut port_update) = (0, 0, 0, 0, 0);
    unsafe {
        client_version(&mut version, &mut release, &mut update, &mut port_release, &mut port_update);
    }
    if version == 0 {
        return Err(Error::UnsupportedClient("the client did not report its version".to_string()));
    }
    let info = VersionInfo::new(version, release, update, port_release, port_update);
    let (major, minor) = MIN_CLIENT_VERSION;
    if !info.at_least(major, minor) {
        return Err(Error::UnsupportedClient(format!(
            "version {}.{} is older than the minimum supported {}.{}", info.version, info.release, major, minor
        )));
    }

    let thread_process_init = symbols.get::<ep::ThreadProcessInit>()
        .map_err(|err| Error::UnsupportedClient(err.to_string()))?;
    THREAD_INIT.get_or_init(|| {
        debug!("initializing OCI threading");
        unsafe { thread_process_init() }
    });

    for entry in HOT_ENTRIES {
        symbols.resolve(entry).map_err(|err| Error::UnsupportedClient(err.to_string()))?;
    }

    debug!(version = %info, "validated Oracle Client library");
    Ok(info)
}
