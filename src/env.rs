//! Loaded client library and OCI environments

use std::{path::{Path, PathBuf}, sync::Arc};
use parking_lot::Mutex;
use tracing::debug;
use crate::{Result, oci::{*, entry::EntryPoint, symbols::SymbolTable, version::VersionInfo, loader::{LoadParams, LoadAttempt}, platform::{PlatformLoader, SystemLoader}}};

/**
The loaded Oracle Client library.

Holds the library, its resolved entry points, its version and the default
configuration directory. Everything that calls into OCI keeps an `Arc` to the
runtime, so the library stays loaded until the last handle is gone.
*/
pub struct Runtime {
    symbols: SymbolTable,
    version: VersionInfo,
    config_dir: Option<PathBuf>,
    lib_path: PathBuf,
    attempts: Vec<LoadAttempt>,
}

impl Runtime {
    /**
    Loads and validates the Oracle Client library using the OS dynamic linker.

    # Example

    ```no_run
    use ocilink::{Runtime, LoadParams};

    let rt = Runtime::load(&LoadParams::new())?;
    println!("Oracle Client {}", rt.version());
    # Ok::<(),ocilink::Error>(())
    ```
    */
    pub fn load(params: &LoadParams) -> Result<Arc<Self>> {
        Self::load_with(&SystemLoader, params)
    }

    /// Loads and validates the Oracle Client library through `loader`.
    pub fn load_with(loader: &dyn PlatformLoader, params: &LoadParams) -> Result<Arc<Self>> {
        let loaded = loader::load_library(loader, params)?;
        let loader::Loaded { library, path: lib_path, attempts } = loaded;
        let symbols = SymbolTable::new(library);

        let version = match version::validate(&symbols) {
            Ok(version) => version,
            Err(err) => {
                debug!(error = %err, "validation failed, unloading {}", lib_path.display());
                symbols.clear();
                return Err(err);
            }
        };

        let config_dir = config::config_dir(loader, params.get_config_dir(), || {
            let addr = symbols.resolve(Entry::ThreadProcessInit).ok()?;
            loader.module_dir(addr as *const libc::c_void)
        });

        Ok(Arc::new(Self { symbols, version, config_dir, lib_path, attempts }))
    }

    /// Version of the loaded client.
    pub fn version(&self) -> &VersionInfo {
        &self.version
    }

    /// Directory with the client network configuration, if one could be determined.
    pub fn config_dir(&self) -> Option<&Path> {
        self.config_dir.as_deref()
    }

    /// Name the library was loaded by.
    pub fn lib_path(&self) -> &Path {
        &self.lib_path
    }

    /// Candidates tried before the library loaded, the successful one last.
    pub fn load_attempts(&self) -> &[LoadAttempt] {
        &self.attempts
    }

    /// Whether the loaded client exports `entry`.
    pub fn is_available(&self, entry: Entry) -> bool {
        self.symbols.resolve(entry).is_ok()
    }

    pub(crate) fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    #[doc(hidden)]
    pub fn lookup_count(&self) -> usize {
        self.symbols.lookups()
    }

    /// Calls entry point `E` with no error handling beyond its resolution.
    pub fn call_raw<E: EntryPoint, R>(&self, f: impl FnOnce(E::Fn) -> R) -> Result<R> {
        let func = self.symbols.get::<E>()?;
        Ok(f(func))
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("lib_path", &self.lib_path)
            .field("version", &self.version)
            .field("config_dir", &self.config_dir)
            .finish()
    }
}

/// Represents an OCI environment.
pub struct Environment {
    env: Arc<Handle<OCIEnv>>,
    charsets: CharSets,
    // serves the environment's own attribute calls
    attr_ctx: Mutex<ErrorContext>,
}

impl Environment {
    /**
    Returns a new threaded, object-mode environment that uses AL32UTF8 for
    both character sets.

    # Example

    ```no_run
    let rt = ocilink::init(&ocilink::LoadParams::new())?;
    let oracle = ocilink::Environment::new(rt)?;
    # Ok::<(),ocilink::Error>(())
    ```
    */
    pub fn new(rt: &Arc<Runtime>) -> Result<Self> {
        Self::with_charset(rt, OCI_OBJECT | OCI_THREADED, AL32UTF8, UTF8)
    }

    /// Returns a new environment created with the given mode and character sets.
    pub fn with_charset(rt: &Arc<Runtime>, mode: u32, charset_id: u16, ncharset_id: u16) -> Result<Self> {
        let mut env = Ptr::<OCIEnv>::null();
        unsafe {
            env_nls_create(rt, &mut env, mode, charset_id, ncharset_id)?;
        }
        let env = Arc::new(Handle::from_raw(env, rt.clone()));
        let attr_ctx = Mutex::new(ErrorContext::new(env.clone(), charset_id));
        Ok(Self { env, charsets: CharSets { charset: charset_id, ncharset: ncharset_id }, attr_ctx })
    }

    pub fn runtime(&self) -> &Arc<Runtime> {
        self.env.runtime()
    }

    /// Raw `OCIEnv` handle.
    pub fn handle(&self) -> *mut OCIEnv {
        self.env.get()
    }

    /// Character sets the environment was created with.
    pub fn charsets(&self) -> CharSets {
        self.charsets
    }

    /// Returns a new call context for the current thread.
    pub fn error_context(&self) -> ErrorContext {
        ErrorContext::new(self.env.clone(), self.charsets.charset)
    }

    fn get_attr<V: attr::AttrGet>(&self, attr_type: u32) -> Result<V> {
        self.env.get_attr(attr_type, &self.attr_ctx.lock())
    }

    fn get_attr_into<V: attr::AttrGetInto>(&self, attr_type: u32, into: &mut V) -> Result<()> {
        self.env.get_attr_into(attr_type, into, &self.attr_ctx.lock())
    }

    fn set_attr<V: attr::AttrSet>(&self, attr_type: u32, attr_val: V) -> Result<()> {
        self.env.set_attr(attr_type, attr_val, &self.attr_ctx.lock())
    }

    /**
    Returns the maximum size (high watermark) for the client-side object cache
    as a percentage of the optimal size.
    */
    pub fn max_cache_size(&self) -> Result<u32> {
        self.get_attr(OCI_ATTR_CACHE_MAX_SIZE)
    }

    /**
    Sets the maximum size (high watermark) for the client-side object cache as a percentage
    of the optimal size. Setting this attribute to 0 results in a value of 10 being used.
    */
    pub fn set_cache_max_size(&self, size: u32) -> Result<()> {
        self.set_attr(OCI_ATTR_CACHE_MAX_SIZE, size)
    }

    /// Returns the optimal size for the client-side object cache in bytes.
    pub fn optimal_cache_size(&self) -> Result<u32> {
        self.get_attr(OCI_ATTR_CACHE_OPT_SIZE)
    }

    /// Sets the optimal size for the client-side object cache in bytes.
    pub fn set_cache_opt_size(&self, size: u32) -> Result<()> {
        self.set_attr(OCI_ATTR_CACHE_OPT_SIZE, size)
    }

    /// Returns the name of the language used for the database sessions created in the current environment.
    pub fn nls_language(&self) -> Result<String> {
        let mut lang = String::with_capacity(32);
        self.get_attr_into(OCI_ATTR_ENV_NLS_LANGUAGE, &mut lang)?;
        Ok(lang)
    }

    pub fn set_nls_language(&self, lang: &str) -> Result<()> {
        self.set_attr(OCI_ATTR_ENV_NLS_LANGUAGE, lang)
    }

    /// Returns the name of the territory used for the database sessions created in the current environment.
    pub fn nls_territory(&self) -> Result<String> {
        let mut territory = String::with_capacity(24);
        self.get_attr_into(OCI_ATTR_ENV_NLS_TERRITORY, &mut territory)?;
        Ok(territory)
    }

    pub fn set_nls_territory(&self, territory: &str) -> Result<()> {
        self.set_attr(OCI_ATTR_ENV_NLS_TERRITORY, territory)
    }
}
