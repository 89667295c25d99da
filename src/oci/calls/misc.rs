//! Session memory, session context values and thread keys

use std::ptr;
use libc::c_void;
use tracing::warn;
use crate::{Result, Error, oci::{*, dispatch::Policy, entry::ep}};

/// Allocates zeroed session-duration memory.
pub unsafe fn memory_alloc(ctx: &ErrorContext, usrhp: *mut OCISession, size: u32, check: bool) -> Result<*mut c_void> {
    let mut mem: *mut c_void = ptr::null_mut();
    ctx.call::<ep::MemoryAlloc>("allocate memory", Policy::best_effort(check), |f, err| f(
        usrhp as *mut c_void, err, &mut mem, OCI_DURATION_SESSION, size, OCI_MEMORY_CLEARED
    ))?;
    Ok(mem)
}

/// Frees memory from [`memory_alloc`]. Failures are logged.
pub unsafe fn memory_free(ctx: &ErrorContext, usrhp: *mut OCISession, mem: *mut c_void) {
    let errhp = match ctx.error_handle() {
        Ok(errhp) => errhp,
        Err(err) => {
            warn!("cannot free session memory {:p}: {}", mem, err);
            return;
        }
    };
    match ctx.call_raw::<ep::MemoryFree, _>(|f| f(usrhp as *mut c_void, errhp, mem)) {
        Ok(OCI_SUCCESS) => {}
        Ok(status) => warn!(status, "failed to free session memory {:p}", mem),
        Err(err) => warn!("cannot free session memory {:p}: {}", mem, err),
    }
}

/// Returns the value stored under `key` in the session context, or NULL.
pub unsafe fn context_get_value(ctx: &ErrorContext, usrhp: *mut OCISession, key: &[u8], check: bool) -> Result<*mut c_void> {
    let mut value: *mut c_void = ptr::null_mut();
    ctx.call::<ep::ContextGetValue>("get context value", Policy::best_effort(check), |f, err| f(
        usrhp as *mut c_void, err, key.as_ptr(), key.len() as u8, &mut value
    ))?;
    Ok(value)
}

/// Stores `value` under `key` in the session context for the life of the session.
pub unsafe fn context_set_value(ctx: &ErrorContext, usrhp: *mut OCISession, key: &[u8], value: *mut c_void, check: bool) -> Result<()> {
    ctx.call::<ep::ContextSetValue>("set context value", Policy::best_effort(check), |f, err| f(
        usrhp as *mut c_void, err, OCI_DURATION_SESSION, key.as_ptr(), key.len() as u8, value
    ))?;
    Ok(())
}

/// Creates a thread-local storage key. `destroy` is called with the value when a thread exits.
pub unsafe fn thread_key_init(ctx: &ErrorContext, destroy: *mut c_void) -> Result<*mut c_void> {
    let mut key: *mut c_void = ptr::null_mut();
    ctx.call::<ep::ThreadKeyInit>("initialize thread key", Policy::STRICT, |f, err| f(
        ctx.env() as *mut c_void, err, &mut key, destroy
    ))?;
    Ok(key)
}

pub unsafe fn thread_key_get(ctx: &ErrorContext, key: *mut c_void) -> Result<*mut c_void> {
    let errhp = ctx.error_handle()?;
    let mut value: *mut c_void = ptr::null_mut();
    let status = ctx.call_raw::<ep::ThreadKeyGet, _>(|f| f(ctx.env() as *mut c_void, errhp, key, &mut value))?;
    if status != OCI_SUCCESS {
        return Err( Error::new("get TLS error") );
    }
    Ok(value)
}

pub unsafe fn thread_key_set(ctx: &ErrorContext, key: *mut c_void, value: *mut c_void) -> Result<()> {
    let errhp = ctx.error_handle()?;
    let status = ctx.call_raw::<ep::ThreadKeySet, _>(|f| f(ctx.env() as *mut c_void, errhp, key, value))?;
    if status != OCI_SUCCESS {
        return Err( Error::new("set TLS error") );
    }
    Ok(())
}

/// Destroys a thread key. Whatever the client reports is ignored.
pub unsafe fn thread_key_destroy(ctx: &ErrorContext, key: &mut *mut c_void) -> Result<()> {
    let errhp = ctx.error_handle()?;
    let key_ptr = &mut *key as *mut *mut c_void;
    ctx.call_raw::<ep::ThreadKeyDestroy, _>(|f| f(ctx.env() as *mut c_void, errhp, key_ptr))?;
    Ok(())
}
