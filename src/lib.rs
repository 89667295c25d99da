/*!
Runtime-loaded Oracle Client (OCI) library.

The Oracle Client shared library is located and opened when the application
asks for it rather than at link time. Each OCI function is looked up the first
time it is called, and every call goes through one dispatcher that turns the
native status into a [`Result`]. The program starts and runs without an
installed client as long as it does not need one.

```no_run
use ocilink::{LoadParams, Environment};

let rt = ocilink::init(&LoadParams::new())?;
println!("using Oracle Client {} from {}", rt.version(), rt.lib_path().display());

let oracle = Environment::new(rt)?;
let ctx = oracle.error_context();
// ...
# Ok::<(),ocilink::Error>(())
```

Raw OCI calls are available as `unsafe` functions in [`oci`]. They take an
[`ErrorContext`] which owns the OCI error handle of the calling thread.
*/

pub mod oci;
mod err;
mod env;

pub use err::{Error, ErrorInfo};
pub use env::{Runtime, Environment};
pub use oci::{
    Entry, ErrorContext,
    dispatch::Policy,
    loader::{LoadParams, LoadAttempt, DEFAULT_ERROR_URL},
    platform::{PlatformLoader, NativeLibrary, SystemLoader},
    version::VersionInfo,
};

use std::sync::Arc;
use once_cell::sync::OnceCell;

pub type Result<T> = std::result::Result<T, Error>;

static RUNTIME: OnceCell<Arc<Runtime>> = OnceCell::new();

/**
Loads the Oracle Client library for the process.

The first successful call loads and validates the library. Subsequent calls
return the same runtime and ignore `params`. A failed load is not remembered,
so a later call may try again, for example after the client was installed.

# Example

```no_run
use ocilink::LoadParams;

let rt = ocilink::init(&LoadParams::new().lib_dir("/opt/oracle/instantclient_23_7"))?;
assert!(rt.version().at_least(11, 2));
# Ok::<(),ocilink::Error>(())
```
*/
pub fn init(params: &LoadParams) -> Result<&'static Arc<Runtime>> {
    RUNTIME.get_or_try_init(|| Runtime::load(params))
}

/**
Returns a new environment handle, which is then used by the OCI functions.

The Oracle Client library is loaded with default parameters if [`init`] has
not loaded it yet.

While there can be multiple environments, most applications most likely will
need only one. It might be created in `main` and passed around, or it might be
created statically:

```no_run
use ocilink::{Environment, Result};
use once_cell::sync::OnceCell;

fn oracle() -> Result<&'static Environment> {
    static OCI_ENV: OnceCell<Environment> = OnceCell::new();
    OCI_ENV.get_or_try_init(||
        ocilink::env()
    )
}

fn main() -> Result<()> {
    let oracle = oracle()?;
    // ...
    Ok(())
}
```
*/
pub fn env() -> Result<Environment> {
    let rt = init(&LoadParams::default())?;
    Environment::new(rt)
}
