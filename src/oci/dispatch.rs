//! Uniform calling convention for OCI entry points.
//!
//! Every wrapper goes through [`ErrorContext::call`] (or one of its variants):
//! the entry point is resolved, the error handle is allocated on first use,
//! the native function is invoked and its status is turned into a `Result`.

use std::{ffi::CStr, ptr, sync::Arc};
use libc::c_void;
use once_cell::unsync::OnceCell;
use tracing::{debug, warn};
use crate::{Result, Error, ErrorInfo, env::Runtime};
use super::{*, entry::{ep, Entry, EntryPoint}};

/// How a single call interprets the status it gets back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    /// Additional statuses that are returned to the caller instead of failing
    pub pass: &'static [i32],
    /// When false, failures are logged and the status is returned as is
    pub check: bool,
}

impl Policy {
    pub const STRICT: Policy = Policy { pass: &[], check: true };

    pub const fn pass(codes: &'static [i32]) -> Self {
        Policy { pass: codes, check: true }
    }

    pub const fn best_effort(check: bool) -> Self {
        Policy { pass: &[], check }
    }

    pub const fn check(self, check: bool) -> Self {
        Policy { pass: self.pass, check }
    }
}

/// What an override does with the failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Treatment {
    /// Report `OCI_SUCCESS`
    Success,
    /// Report `OCI_NO_DATA`, which the wrapper turns into an empty result
    Empty,
}

/// A native error code that a specific entry point does not treat as failure.
#[derive(Debug, Clone, Copy)]
pub struct Override {
    pub entry: Entry,
    pub code: i32,
    pub treatment: Treatment,
}

/**
Known error codes that do not indicate a failure of the operation.

- ORA-01010 from `OCIPing`: servers older than 10g cannot ping, but they answered.
- ORA-21602 from `OCIObjectFree`: PL/SQL records cannot be freed this way, and a
  second attempt crashes the process.
- ORA-24801 from `OCISodaDataGuideGet`: the collection has no documents.
*/
pub const OVERRIDES: &[Override] = &[
    Override { entry: Entry::Ping,             code: 1010,  treatment: Treatment::Success },
    Override { entry: Entry::ObjectFree,       code: 21602, treatment: Treatment::Success },
    Override { entry: Entry::SodaDataGuideGet, code: 24801, treatment: Treatment::Empty },
];

fn find_override(entry: Entry, code: i32) -> Option<&'static Override> {
    OVERRIDES.iter().find(|o| o.entry == entry && o.code == code)
}

fn is_success(status: i32) -> bool {
    status == OCI_SUCCESS || status == OCI_SUCCESS_WITH_INFO
}

/**
Decodes the message `OCIErrorGet` wrote into `buf`.

UTF-16 environments deliver native-endian 16-bit units; everything else is a
NUL-terminated byte string. Trailing whitespace is removed either way.
*/
pub fn decode_message(buf: &[u8], utf16: bool) -> String {
    if utf16 {
        let units: Vec<u16> = buf.chunks_exact(2)
            .map(|pair| u16::from_ne_bytes([pair[0], pair[1]]))
            .take_while(|&unit| unit != 0)
            .collect();
        let len = units.iter()
            .rposition(|&unit| unit > 127 || !(unit as u8).is_ascii_whitespace())
            .map_or(0, |pos| pos + 1);
        String::from_utf16_lossy(&units[..len])
    } else {
        let text = match CStr::from_bytes_until_nul(buf) {
            Ok(text) => text.to_string_lossy(),
            Err(_) => String::from_utf8_lossy(buf),
        };
        text.trim_end().to_string()
    }
}

fn status_message(status: i32) -> String {
    match status {
        OCI_NO_DATA         => "No Data".to_string(),
        OCI_NEED_DATA       => "Need Data".to_string(),
        OCI_INVALID_HANDLE  => "Invalid Handle".to_string(),
        OCI_STILL_EXECUTING => "Still Executing".to_string(),
        OCI_CONTINUE        => "Continue".to_string(),
        _ => format!("Error {}", status),
    }
}

/// Reads the first diagnostic record of `handle`.
pub(crate) fn read_error(rt: &Runtime, handle: *mut c_void, htype: u32, utf16: bool) -> Option<(i32, String)> {
    let mut code = 0i32;
    let mut buf = vec![0u8; OCI_ERROR_MAXMSG_SIZE];
    let status = rt.call_raw::<ep::ErrorGet, _>(|error_get| unsafe {
        error_get(handle, 1, ptr::null_mut(), &mut code, buf.as_mut_ptr(), buf.len() as u32, htype)
    }).ok()?;
    if status != OCI_SUCCESS {
        return None;
    }
    Some((code, decode_message(&buf, utf16)))
}

/**
Per-thread context of OCI calls.

Owns the OCI error handle that receives diagnostics. The handle is allocated
the first time a call needs it and freed with the context. A context must not
be shared between threads that call into OCI concurrently.
*/
pub struct ErrorContext {
    errhp: OnceCell<Handle<OCIError>>,
    env: Arc<Handle<OCIEnv>>,
    utf16: bool,
}

impl ErrorContext {
    pub(crate) fn new(env: Arc<Handle<OCIEnv>>, charset_id: u16) -> Self {
        Self { errhp: OnceCell::new(), env, utf16: charset_id == UTF16 }
    }

    pub fn runtime(&self) -> &Arc<Runtime> {
        self.env.runtime()
    }

    /// Raw environment handle the context belongs to.
    pub fn env(&self) -> *mut OCIEnv {
        self.env.get()
    }

    /// Version of the loaded client.
    pub fn version(&self) -> &version::VersionInfo {
        self.runtime().version()
    }

    /// Returns the error handle, allocating it on first use.
    pub fn error_handle(&self) -> Result<*mut OCIError> {
        let handle = self.errhp.get_or_try_init(|| {
            let rt = self.runtime();
            let mut errhp = Ptr::<OCIError>::null();
            let status = rt.call_raw::<ep::HandleAlloc, _>(|handle_alloc| unsafe {
                handle_alloc(self.env() as _, errhp.as_mut_ptr() as _, OCI_HTYPE_ERROR, 0, ptr::null_mut())
            })?;
            if status != OCI_SUCCESS || errhp.is_null() {
                return Err(Error::NoMemory("allocate OCI error"));
            }
            Ok(Handle::from_raw(errhp, rt.clone()))
        })?;
        Ok(handle.get())
    }

    /**
    Calls entry point `E` with the error handle and classifies the outcome.

    Returns the native status when it counts as success under `policy`.
    */
    pub fn call<E: EntryPoint>(
        &self,
        action: &'static str,
        policy: Policy,
        f: impl FnOnce(E::Fn, *mut OCIError) -> i32,
    ) -> Result<i32> {
        let func = self.runtime().symbols().get::<E>()?;
        let errhp = self.error_handle()?;
        let status = f(func, errhp);
        self.classify(E::ENTRY, action, policy, status, errhp as *mut c_void, OCI_HTYPE_ERROR)
    }

    /// Calls entry point `E` that reports diagnostics on the environment handle.
    pub fn call_env<E: EntryPoint>(&self, action: &'static str, f: impl FnOnce(E::Fn) -> i32) -> Result<i32> {
        let func = self.runtime().symbols().get::<E>()?;
        let status = f(func);
        self.classify(E::ENTRY, action, Policy::STRICT, status, self.env() as *mut c_void, OCI_HTYPE_ENV)
    }

    /// Calls entry point `E` that has no error reporting of its own.
    pub fn call_raw<E: EntryPoint, R>(&self, f: impl FnOnce(E::Fn) -> R) -> Result<R> {
        self.runtime().call_raw::<E, R>(f)
    }

    fn classify(&self, entry: Entry, action: &'static str, policy: Policy, status: i32, handle: *mut c_void, htype: u32) -> Result<i32> {
        if is_success(status) || policy.pass.contains(&status) {
            return Ok(status);
        }
        if !policy.check {
            debug!(entry = entry.name(), status, action, "ignored failure");
            return Ok(status);
        }
        let diagnostic = read_error(self.runtime(), handle, htype, self.utf16)
            .filter(|(_, message)| !message.is_empty());
        let (code, message) = match diagnostic {
            Some(diagnostic) => diagnostic,
            None => {
                // the status is not an Oracle error number
                debug!(entry = entry.name(), status, action, "no diagnostic record");
                return Err( Error::msg(format!("{}: {} ({} returned {})", action, status_message(status), entry.name(), status)) );
            }
        };
        if let Some(rule) = find_override(entry, code) {
            warn!(entry = entry.name(), code, action, "treating native error as {:?}", rule.treatment);
            return Ok(match rule.treatment {
                Treatment::Success => OCI_SUCCESS,
                Treatment::Empty => OCI_NO_DATA,
            });
        }
        Err(Error::Oracle(ErrorInfo { code, message, action, entry: entry.name() }))
    }
}
