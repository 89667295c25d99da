#![allow(dead_code)]

//! Stand-in client library for tests that must run without Oracle Client.
//!
//! Exported functions are plain Rust `extern "C"` functions. Their behavior is
//! driven by thread-local state, so every test controls its own client.

use std::{
    cell::RefCell,
    collections::HashMap,
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
    ptr::NonNull,
};
use libc::c_void;
use parking_lot::Mutex;
use ocilink::{NativeLibrary, PlatformLoader};

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Default, Clone)]
pub struct ClientState {
    pub version: [i32; 5],
    pub process_init_calls: usize,
    pub object_free_calls: usize,
    pub lob_temp_calls: usize,
    pub handles_allocated: usize,
    pub handles_freed: usize,
    /// Bind and define entry points in the order they were called
    pub calls: Vec<&'static str>,
    /// Buffer size `OCIRowidToChar` was given
    pub rowid_buf_size: Option<u16>,
    /// Buffer sizes `OCILobFileGetName` was given
    pub file_name_caps: Option<(u16, u16)>,
    /// Error reported by the next `OCIErrorGet`
    pub last_error: Option<(i32, String)>,
}

thread_local! {
    static STATE: RefCell<ClientState> = RefCell::new(ClientState::default());
}

/// Resets the client of the current thread to report `version`.
pub fn reset_client(version: [i32; 5]) {
    STATE.with(|state| *state.borrow_mut() = ClientState { version, ..ClientState::default() });
}

pub fn client_state() -> ClientState {
    STATE.with(|state| state.borrow().clone())
}

fn update(f: impl FnOnce(&mut ClientState)) {
    STATE.with(|state| f(&mut state.borrow_mut()))
}

fn fail(code: i32, message: &str) -> i32 {
    update(|state| state.last_error = Some((code, message.to_string())));
    -1
}

static HANDLE: u64 = 0;

fn dummy_handle() -> *mut c_void {
    &HANDLE as *const u64 as *mut c_void
}

extern "C" fn client_version(v: *mut i32, r: *mut i32, u: *mut i32, pr: *mut i32, pu: *mut i32) {
    let [a, b, c, d, e] = client_state().version;
    unsafe {
        *v = a; *r = b; *u = c; *pr = d; *pu = e;
    }
}

extern "C" fn thread_process_init() {
    update(|state| state.process_init_calls += 1);
}

extern "C" fn attr_get(_: *const c_void, _: u32, _: *mut c_void, _: *mut u32, _: u32, _: *mut c_void) -> i32 {
    0
}

extern "C" fn attr_set(_: *mut c_void, _: u32, _: *mut c_void, _: u32, _: u32, _: *mut c_void) -> i32 {
    0
}

extern "C" fn thread_key_get(_: *mut c_void, _: *mut c_void, _: *mut c_void, value: *mut *mut c_void) -> i32 {
    unsafe { *value = std::ptr::null_mut() };
    0
}

extern "C" fn handle_alloc(_: *const c_void, hndlpp: *mut *mut c_void, _: u32, _: usize, _: *mut *mut c_void) -> i32 {
    update(|state| state.handles_allocated += 1);
    unsafe { *hndlpp = dummy_handle() };
    0
}

extern "C" fn handle_free(_: *mut c_void, _: u32) -> i32 {
    update(|state| state.handles_freed += 1);
    0
}

extern "C" fn env_nls_create(
    envhpp: *mut *mut c_void, _: u32, _: *mut c_void, _: *mut c_void, _: *mut c_void, _: *mut c_void,
    _: usize, _: *mut *mut c_void, _: u16, _: u16
) -> i32 {
    unsafe { *envhpp = dummy_handle() };
    0
}

extern "C" fn error_get(_: *mut c_void, recordno: u32, _: *mut u8, code: *mut i32, buf: *mut u8, bufsiz: u32, _: u32) -> i32 {
    let err = STATE.with(|state| state.borrow().last_error.clone());
    match err {
        Some((errcode, message)) if recordno == 1 => {
            let bytes = message.as_bytes();
            let len = bytes.len().min(bufsiz as usize - 1);
            unsafe {
                *code = errcode;
                std::ptr::copy_nonoverlapping(bytes.as_ptr(), buf, len);
                *buf.add(len) = 0;
            }
            0
        }
        _ => 100,
    }
}

extern "C" fn ping(_: *mut c_void, _: *mut c_void, _: u32) -> i32 {
    fail(1010, "invalid OCI operation\n")
}

extern "C" fn session_begin(_: *mut c_void, _: *mut c_void, _: *mut c_void, _: u32, _: u32) -> i32 {
    fail(1017, "invalid username/password; logon denied\n")
}

extern "C" fn object_free(_: *mut c_void, _: *mut c_void, _: *mut c_void, _: u16) -> i32 {
    update(|state| state.object_free_calls += 1);
    fail(21602, "operation does not support the specified typecode")
}

extern "C" fn lob_trim2(_: *mut c_void, _: *mut c_void, _: *mut c_void, _: u64) -> i32 {
    -2
}

extern "C" fn lob_create_temporary(_: *mut c_void, _: *mut c_void, _: *mut c_void, _: u16, _: u8, _: u8, _: i32, _: u16) -> i32 {
    update(|state| state.lob_temp_calls += 1);
    0
}

extern "C" fn stmt_fetch2(_: *mut c_void, _: *mut c_void, _: u32, orientation: u16, _: i32, _: u32) -> i32 {
    if orientation == 0x08 {
        return fail(1002, "fetch out of sequence");
    }
    100
}

extern "C" fn stmt_execute(_: *mut c_void, _: *mut c_void, _: *mut c_void, _: u32, _: u32, _: *const c_void, _: *mut c_void, _: u32) -> i32 {
    update(|state| state.last_error = Some((24347, "Warning of a NULL column in an aggregate function".to_string())));
    1
}

extern "C" fn break_execution(_: *mut c_void, _: *mut c_void) -> i32 {
    -2
}

extern "C" fn session_end(_: *mut c_void, _: *mut c_void, _: *mut c_void, _: u32) -> i32 {
    fail(3113, "end-of-file on communication channel")
}

extern "C" fn lob_read2(
    _: *mut c_void, _: *mut c_void, _: *mut c_void, byte_amt: *mut u64, char_amt: *mut u64, _: u64,
    _: *mut c_void, _: u64, _: u8, _: *mut c_void, _: *mut c_void, _: u16, _: u8
) -> i32 {
    unsafe {
        *byte_amt = 8000;
        *char_amt = 2000;
    }
    99
}

extern "C" fn lob_file_get_name(_: *mut c_void, _: *mut c_void, _: *const c_void, _: *mut u8, dir_len: *mut u16, _: *mut u8, name_len: *mut u16) -> i32 {
    let caps = unsafe { (*dir_len, *name_len) };
    update(|state| state.file_name_caps = Some(caps));
    unsafe {
        *dir_len = 0;
        *name_len = 0;
    }
    0
}

extern "C" fn rowid_to_char(_: *mut c_void, buf: *mut u8, size: *mut u16, _: *mut c_void) -> i32 {
    let rowid = b"AAAR3sAAEAAAACXAAA";
    let cap = unsafe { *size };
    update(|state| state.rowid_buf_size = Some(cap));
    unsafe {
        if (cap as usize) < rowid.len() {
            *size = rowid.len() as u16;
            return fail(1410, "invalid ROWID");
        }
        std::ptr::copy_nonoverlapping(rowid.as_ptr(), buf, rowid.len());
        *size = rowid.len() as u16;
    }
    0
}

fn called(name: &'static str) -> i32 {
    update(|state| state.calls.push(name));
    0
}

extern "C" fn bind_by_name(
    _: *mut c_void, _: *mut *mut c_void, _: *mut c_void, _: *const u8, _: i32, _: *mut c_void, _: i32, _: u16,
    _: *mut c_void, _: *mut u16, _: *mut u16, _: u32, _: *mut u32, _: u32
) -> i32 {
    called("OCIBindByName")
}

extern "C" fn bind_by_name2(
    _: *mut c_void, _: *mut *mut c_void, _: *mut c_void, _: *const u8, _: i32, _: *mut c_void, _: i64, _: u16,
    _: *mut c_void, _: *mut u32, _: *mut u16, _: u32, _: *mut u32, _: u32
) -> i32 {
    called("OCIBindByName2")
}

extern "C" fn define_by_pos(
    _: *mut c_void, _: *mut *mut c_void, _: *mut c_void, _: u32, _: *mut c_void, _: i32, _: u16,
    _: *mut c_void, _: *mut u16, _: *mut u16, _: u32
) -> i32 {
    called("OCIDefineByPos")
}

extern "C" fn define_by_pos2(
    _: *mut c_void, _: *mut *mut c_void, _: *mut c_void, _: u32, _: *mut c_void, _: u64, _: u16,
    _: *mut c_void, _: *mut u32, _: *mut u16, _: u32
) -> i32 {
    called("OCIDefineByPos2")
}

extern "C" fn soda_data_guide_get(_: *mut c_void, _: *const c_void, _: u32, doc: *mut *mut c_void, _: *mut c_void, _: u32) -> i32 {
    unsafe { *doc = dummy_handle() };
    fail(24801, "illegal parameter value in OCI lob function")
}

fn lookup(name: &[u8]) -> Option<*const ()> {
    let addr = match name {
        b"OCIClientVersion\0"      => client_version as *const (),
        b"OCIThreadProcessInit\0"  => thread_process_init as *const (),
        b"OCIAttrGet\0"            => attr_get as *const (),
        b"OCIAttrSet\0"            => attr_set as *const (),
        b"OCIThreadKeyGet\0"       => thread_key_get as *const (),
        b"OCIHandleAlloc\0"        => handle_alloc as *const (),
        b"OCIHandleFree\0"         => handle_free as *const (),
        b"OCIEnvNlsCreate\0"       => env_nls_create as *const (),
        b"OCIErrorGet\0"           => error_get as *const (),
        b"OCIPing\0"               => ping as *const (),
        b"OCISessionBegin\0"       => session_begin as *const (),
        b"OCIObjectFree\0"         => object_free as *const (),
        b"OCILobTrim2\0"           => lob_trim2 as *const (),
        b"OCILobCreateTemporary\0" => lob_create_temporary as *const (),
        b"OCIStmtFetch2\0"         => stmt_fetch2 as *const (),
        b"OCISodaDataGuideGet\0"   => soda_data_guide_get as *const (),
        b"OCIStmtExecute\0"        => stmt_execute as *const (),
        b"OCIBreak\0"              => break_execution as *const (),
        b"OCISessionEnd\0"         => session_end as *const (),
        b"OCILobRead2\0"           => lob_read2 as *const (),
        b"OCILobFileGetName\0"     => lob_file_get_name as *const (),
        b"OCIRowidToChar\0"        => rowid_to_char as *const (),
        b"OCIBindByName\0"         => bind_by_name as *const (),
        b"OCIBindByName2\0"        => bind_by_name2 as *const (),
        b"OCIDefineByPos\0"        => define_by_pos as *const (),
        b"OCIDefineByPos2\0"       => define_by_pos2 as *const (),
        _ => return None,
    };
    Some(addr)
}

/// Library that exports the stubs above, except for the `hidden` names.
pub struct FakeLibrary {
    hidden: Vec<&'static str>,
}

impl NativeLibrary for FakeLibrary {
    fn symbol(&self, name: &[u8]) -> Option<NonNull<c_void>> {
        let plain = &name[..name.len().saturating_sub(1)];
        if self.hidden.iter().any(|hidden| hidden.as_bytes() == plain) {
            return None;
        }
        lookup(name).and_then(|addr| NonNull::new(addr as *mut c_void))
    }
}

/// Loader that "finds" libraries only at the configured paths and records every attempt.
pub struct FakeLoader {
    pub names: Vec<&'static str>,
    pub loadable: Vec<PathBuf>,
    pub module_dir: Option<PathBuf>,
    pub searches_home: bool,
    pub hidden: Vec<&'static str>,
    pub vars: Mutex<HashMap<String, OsString>>,
    pub opened: Mutex<Vec<PathBuf>>,
}

impl FakeLoader {
    pub fn new() -> Self {
        Self {
            names: vec!["libclntsh.so", "libclntsh.so.19.1", "libclntsh.so.18.1"],
            loadable: Vec::new(),
            module_dir: None,
            searches_home: true,
            hidden: Vec::new(),
            vars: Mutex::new(HashMap::new()),
            opened: Mutex::new(Vec::new()),
        }
    }

    pub fn loadable(mut self, path: impl AsRef<Path>) -> Self {
        self.loadable.push(path.as_ref().to_path_buf());
        self
    }

    pub fn with_module_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.module_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn env(self, name: &str, value: &str) -> Self {
        self.vars.lock().insert(name.to_string(), OsString::from(value));
        self
    }

    pub fn hide(mut self, name: &'static str) -> Self {
        self.hidden.push(name);
        self
    }

    pub fn opened(&self) -> Vec<PathBuf> {
        self.opened.lock().clone()
    }
}

impl PlatformLoader for FakeLoader {
    fn lib_names(&self) -> &[&'static str] {
        &self.names
    }

    fn open(&self, path: &Path) -> Result<Box<dyn NativeLibrary>, String> {
        self.opened.lock().push(path.to_path_buf());
        if self.loadable.iter().any(|p| p == path) {
            Ok(Box::new(FakeLibrary { hidden: self.hidden.clone() }))
        } else {
            Err(format!("{}: cannot open shared object file: No such file or directory", path.display()))
        }
    }

    fn module_dir(&self, _addr: *const c_void) -> Option<PathBuf> {
        self.module_dir.clone()
    }

    fn var(&self, name: &str) -> Option<OsString> {
        self.vars.lock().get(name).cloned()
    }

    fn set_var(&self, name: &str, value: &OsStr) {
        self.vars.lock().insert(name.to_string(), value.to_os_string());
    }

    fn searches_home(&self) -> bool {
        self.searches_home
    }
}
