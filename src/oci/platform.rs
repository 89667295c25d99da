//! OS specific pieces of library loading.
//!
//! The loader itself is platform-agnostic. Everything that differs between
//! operating systems, from candidate file names to the way a module reports
//! its own location, sits behind [`PlatformLoader`].

use std::{
    ffi::{OsStr, OsString},
    fs::File,
    io::{self, Read, Seek, SeekFrom},
    path::{Path, PathBuf},
    ptr::NonNull,
};
use libc::c_void;

/// A loaded dynamic library.
pub trait NativeLibrary: Send + Sync {
    /// Returns the address of the exported symbol. `name` is NUL-terminated.
    fn symbol(&self, name: &[u8]) -> Option<NonNull<c_void>>;
}

/// Operating system services the library search relies on.
pub trait PlatformLoader: Send + Sync {
    /// Candidate library file names, most preferred first.
    fn lib_names(&self) -> &[&'static str];

    /// Loads the library at `path`. A bare file name asks the OS to search
    /// its default locations. Failures are reported as OS error text.
    fn open(&self, path: &Path) -> std::result::Result<Box<dyn NativeLibrary>, String>;

    /// Directory of the module that contains `addr`.
    fn module_dir(&self, addr: *const c_void) -> Option<PathBuf>;

    /// Directory of the module this crate was linked into.
    fn shim_dir(&self) -> Option<PathBuf> {
        self.module_dir(shim_anchor as fn() as *const c_void)
    }

    fn var(&self, name: &str) -> Option<OsString>;

    fn set_var(&self, name: &str, value: &OsStr);

    /// Whether `$ORACLE_HOME/lib` is searched as the last resort.
    fn searches_home(&self) -> bool {
        !cfg!(windows)
    }
}

#[inline(never)]
fn shim_anchor() {}

/// Subdirectory of an Oracle home or client directory with network configuration.
pub const CONFIG_SUBDIR: [&str; 2] = ["network", "admin"];

#[cfg(windows)]
pub const LIB_NAMES: &[&str] = &["oci.dll"];

#[cfg(target_os = "macos")]
pub const LIB_NAMES: &[&str] = &[
    "libclntsh.dylib",
    "libclntsh.dylib.19.1",
    "libclntsh.dylib.18.1",
    "libclntsh.dylib.12.1",
    "libclntsh.dylib.11.1",
    "libclntsh.dylib.20.1",
    "libclntsh.dylib.21.1",
];

#[cfg(all(unix, not(target_os = "macos")))]
pub const LIB_NAMES: &[&str] = &[
    "libclntsh.so",
    "libclntsh.so.19.1",
    "libclntsh.so.18.1",
    "libclntsh.so.12.1",
    "libclntsh.so.11.1",
    "libclntsh.so.20.1",
    "libclntsh.so.21.1",
];

/// Environment variables that influence how the OS finds the library.
#[cfg(windows)]
pub const DIAG_VARS: &[&str] = &["ORACLE_HOME", "ORA_TZFILE", "TNS_ADMIN", "PATH"];

#[cfg(not(windows))]
pub const DIAG_VARS: &[&str] = &[
    "ORACLE_HOME", "ORA_TZFILE", "TNS_ADMIN",
    "LD_LIBRARY_PATH", "DYLD_LIBRARY_PATH", "LIBPATH", "SHLIB_PATH",
];

// Reads and writes of the process environment are serialized.
static ENV_LOCK: parking_lot::Mutex<()> = parking_lot::const_mutex(());

/// Loader backed by the operating system's dynamic linker.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLoader;

struct SystemLibrary(libloading::Library);

impl NativeLibrary for SystemLibrary {
    fn symbol(&self, name: &[u8]) -> Option<NonNull<c_void>> {
        unsafe {
            self.0.get::<*mut c_void>(name).ok().and_then(|sym| NonNull::new(*sym))
        }
    }
}

impl PlatformLoader for SystemLoader {
    fn lib_names(&self) -> &[&'static str] {
        LIB_NAMES
    }

    fn open(&self, path: &Path) -> std::result::Result<Box<dyn NativeLibrary>, String> {
        match sys::open(path) {
            Ok(lib) => Ok(Box::new(SystemLibrary(lib))),
            Err(err) => {
                if cfg!(windows) {
                    let path_var = self.var("PATH");
                    let cwd = std::env::current_dir().ok();
                    if let Some(msg) = find_dll(path, cwd.as_deref(), path_var.as_deref())
                        .and_then(|dll| wrong_architecture(&dll, NATIVE_MACHINE))
                    {
                        return Err(msg);
                    }
                }
                Err(err.to_string())
            }
        }
    }

    fn module_dir(&self, addr: *const c_void) -> Option<PathBuf> {
        let file = sys::module_file(addr)?;
        tracing::debug!(module = %file.display(), "module name");
        file.parent().map(Path::to_path_buf)
    }

    fn var(&self, name: &str) -> Option<OsString> {
        let _guard = ENV_LOCK.lock();
        std::env::var_os(name)
    }

    fn set_var(&self, name: &str, value: &OsStr) {
        let _guard = ENV_LOCK.lock();
        std::env::set_var(name, value);
    }
}

#[cfg(unix)]
mod sys {
    use std::{ffi::{CStr, OsStr}, os::unix::ffi::OsStrExt, path::{Path, PathBuf}};
    use libc::c_void;

    pub(super) fn open(path: &Path) -> Result<libloading::Library, libloading::Error> {
        let lib = unsafe { libloading::os::unix::Library::open(Some(path), libc::RTLD_LAZY)? };
        Ok(lib.into())
    }

    pub(super) fn module_file(addr: *const c_void) -> Option<PathBuf> {
        let mut info = std::mem::MaybeUninit::<libc::Dl_info>::zeroed();
        let res = unsafe { libc::dladdr(addr, info.as_mut_ptr()) };
        if res == 0 {
            return None;
        }
        let info = unsafe { info.assume_init() };
        if info.dli_fname.is_null() {
            return None;
        }
        let name = unsafe { CStr::from_ptr(info.dli_fname) };
        Some(PathBuf::from(OsStr::from_bytes(name.to_bytes())))
    }
}

#[cfg(windows)]
mod sys {
    use std::{ffi::OsString, os::windows::ffi::OsStringExt, path::{Path, PathBuf}};
    use libc::c_void;

    const GET_MODULE_HANDLE_EX_FLAG_FROM_ADDRESS       : u32 = 0x4;
    const GET_MODULE_HANDLE_EX_FLAG_UNCHANGED_REFCOUNT : u32 = 0x2;

    #[link(name = "kernel32")]
    extern "system" {
        fn GetModuleHandleExW(flags: u32, name: *const u16, module: *mut *mut c_void) -> i32;
        fn GetModuleFileNameW(module: *mut c_void, filename: *mut u16, size: u32) -> u32;
    }

    pub(super) fn open(path: &Path) -> Result<libloading::Library, libloading::Error> {
        let lib = unsafe { libloading::os::windows::Library::new(path)? };
        Ok(lib.into())
    }

    pub(super) fn module_file(addr: *const c_void) -> Option<PathBuf> {
        let mut module = std::ptr::null_mut();
        let flags = GET_MODULE_HANDLE_EX_FLAG_FROM_ADDRESS | GET_MODULE_HANDLE_EX_FLAG_UNCHANGED_REFCOUNT;
        if unsafe { GetModuleHandleExW(flags, addr as *const u16, &mut module) } == 0 {
            return None;
        }
        let mut buf = vec![0u16; 260];
        loop {
            let len = unsafe { GetModuleFileNameW(module, buf.as_mut_ptr(), buf.len() as u32) } as usize;
            if len == 0 {
                return None;
            }
            if len < buf.len() {
                buf.truncate(len);
                return Some(PathBuf::from(OsString::from_wide(&buf)));
            }
            let new_len = buf.len() * 2;
            buf.resize(new_len, 0);
        }
    }
}

pub const IMAGE_FILE_MACHINE_I386  : u16 = 0x014c;
pub const IMAGE_FILE_MACHINE_AMD64 : u16 = 0x8664;

#[cfg(target_pointer_width = "64")]
pub const NATIVE_MACHINE: u16 = IMAGE_FILE_MACHINE_AMD64;
#[cfg(not(target_pointer_width = "64"))]
pub const NATIVE_MACHINE: u16 = IMAGE_FILE_MACHINE_I386;

/**
Reads the target machine of a PE image.

Returns `Ok(None)` when the file is not a PE image.
*/
pub fn pe_machine(path: &Path) -> io::Result<Option<u16>> {
    let mut file = File::open(path)?;
    let mut dos = [0u8; 64];
    if file.read_exact(&mut dos).is_err() || &dos[..2] != b"MZ" {
        return Ok(None);
    }
    let e_lfanew = u32::from_le_bytes([dos[0x3c], dos[0x3d], dos[0x3e], dos[0x3f]]);
    file.seek(SeekFrom::Start(e_lfanew as u64))?;
    let mut nt = [0u8; 6];
    if file.read_exact(&mut nt).is_err() || &nt[..4] != b"PE\0\0" {
        return Ok(None);
    }
    Ok(Some(u16::from_le_bytes([nt[4], nt[5]])))
}

/// Returns the load error text for a DLL built for a different machine.
pub fn wrong_architecture(path: &Path, expected: u16) -> Option<String> {
    match pe_machine(path) {
        Ok(Some(machine)) if machine != expected => {
            Some(format!("{} is not the correct architecture", path.display()))
        }
        _ => None,
    }
}

/**
Finds the file the Windows loader would have picked up for `name`.

Absolute names are taken as is. Otherwise the current directory and then each
`;`-separated entry of `PATH` are checked, and the first existing file wins.
*/
pub fn find_dll(name: &Path, cwd: Option<&Path>, path_var: Option<&OsStr>) -> Option<PathBuf> {
    if name.is_absolute() || name.parent().map_or(false, |dir| !dir.as_os_str().is_empty()) {
        return Some(name.to_path_buf()).filter(|p| p.is_file());
    }
    if let Some(candidate) = cwd.map(|dir| dir.join(name)).filter(|p| p.is_file()) {
        return Some(candidate);
    }
    let path_var = path_var?.to_string_lossy().into_owned();
    path_var.split(';')
        .filter(|dir| !dir.is_empty())
        .map(|dir| Path::new(dir).join(name))
        .find(|p| p.is_file())
}
