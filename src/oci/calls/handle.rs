//! Handles, descriptors, environments and attributes

use std::ptr;
use libc::c_void;
use tracing::warn;
use crate::{Result, Error, ErrorInfo, env::Runtime};
use crate::oci::{*, dispatch::{Policy, read_error}, entry::ep};

pub unsafe fn handle_alloc(ctx: &ErrorContext, parenth: *const c_void, hndlpp: *mut *mut c_void, htype: u32) -> Result<()> {
    let res = ctx.call_env::<ep::HandleAlloc>("allocate handle", |f| f(parenth, hndlpp, htype, 0, ptr::null_mut()));
    match res {
        Err(Error::Oracle(_)) if htype == OCI_HTYPE_ERROR => Err(Error::NoMemory("allocate OCI error")),
        res => res.map(|_| ()),
    }
}

/// Frees a handle. Failures are logged.
pub unsafe fn handle_free(rt: &Runtime, hndlp: *mut c_void, htype: u32) {
    match rt.call_raw::<ep::HandleFree, _>(|f| f(hndlp, htype)) {
        Ok(OCI_SUCCESS) => {}
        Ok(status) => warn!(htype, status, "failed to free handle {:p}", hndlp),
        Err(err) => warn!(htype, "cannot free handle {:p}: {}", hndlp, err),
    }
}

pub unsafe fn descriptor_alloc(ctx: &ErrorContext, parenth: *const c_void, descpp: *mut *mut c_void, dtype: u32) -> Result<()> {
    ctx.call_env::<ep::DescriptorAlloc>("allocate descriptor", |f| f(parenth, descpp, dtype, 0, ptr::null_mut()))?;
    Ok(())
}

/// Frees a descriptor. Failures are logged.
pub unsafe fn descriptor_free(rt: &Runtime, descp: *mut c_void, dtype: u32) {
    match rt.call_raw::<ep::DescriptorFree, _>(|f| f(descp, dtype)) {
        Ok(OCI_SUCCESS) => {}
        Ok(status) => warn!(dtype, status, "failed to free descriptor {:p}", descp),
        Err(err) => warn!(dtype, "cannot free descriptor {:p}: {}", descp, err),
    }
}

pub unsafe fn array_descriptor_alloc(ctx: &ErrorContext, parenth: *const c_void, descpp: *mut *mut c_void, dtype: u32, count: u32) -> Result<()> {
    ctx.call_env::<ep::ArrayDescriptorAlloc>("allocate descriptors", |f| f(parenth, descpp, dtype, count, 0, ptr::null_mut()))?;
    Ok(())
}

/// Frees an array of descriptors. Failures are logged.
pub unsafe fn array_descriptor_free(rt: &Runtime, descpp: *mut *mut c_void, dtype: u32) {
    match rt.call_raw::<ep::ArrayDescriptorFree, _>(|f| f(descpp, dtype)) {
        Ok(OCI_SUCCESS) => {}
        Ok(status) => warn!(dtype, status, "failed to free descriptor array {:p}", descpp),
        Err(err) => warn!(dtype, "cannot free descriptor array {:p}: {}", descpp, err),
    }
}

/**
Creates an OCI environment.

When the client returns a handle together with a failure, the diagnostics are
read from that handle and the handle is freed.
*/
pub unsafe fn env_nls_create(rt: &Runtime, envhp: &mut Ptr<OCIEnv>, mode: u32, charset: u16, ncharset: u16) -> Result<()> {
    *envhp = Ptr::null();
    let status = rt.call_raw::<ep::EnvNlsCreate, _>(|f| f(
        envhp.as_mut_ptr(), mode, ptr::null_mut(), ptr::null_mut(), ptr::null_mut(), ptr::null_mut(), 0, ptr::null_mut(), charset, ncharset
    ))?;
    if envhp.is_null() {
        return Err( Error::new("unable to create an OCI environment") );
    }
    if status == OCI_SUCCESS || status == OCI_SUCCESS_WITH_INFO {
        return Ok(());
    }
    let env = envhp.take() as *mut c_void;
    let diag = read_error(rt, env, OCI_HTYPE_ENV, charset == UTF16);
    handle_free(rt, env, OCI_HTYPE_ENV);
    match diag {
        Some((code, message)) => Err( Error::Oracle(ErrorInfo { code, message, action: "create env", entry: Entry::EnvNlsCreate.name() }) ),
        None => Err( Error::new("unable to create an OCI environment") ),
    }
}

/**
Reads an attribute. `OCI_NO_DATA` is a valid outcome when the caller asked for
the size; the size is then 0.
*/
pub unsafe fn attr_get(ctx: &ErrorContext, trgthndlp: *const c_void, htype: u32, attributep: *mut c_void, sizep: *mut u32, attrtype: u32) -> Result<()> {
    let policy = if sizep.is_null() { Policy::STRICT } else { Policy::pass(&[OCI_NO_DATA]) };
    let status = ctx.call::<ep::AttrGet>("get attribute value", policy, |f, err| f(trgthndlp, htype, attributep, sizep, attrtype, err))?;
    if status == OCI_NO_DATA {
        *sizep = 0;
    }
    Ok(())
}

pub unsafe fn attr_set(ctx: &ErrorContext, trgthndlp: *mut c_void, htype: u32, attributep: *mut c_void, size: u32, attrtype: u32) -> Result<()> {
    ctx.call::<ep::AttrSet>("set attribute value", Policy::STRICT, |f, err| f(trgthndlp, htype, attributep, size, attrtype, err))?;
    Ok(())
}

pub unsafe fn param_get(ctx: &ErrorContext, hndlp: *const c_void, htype: u32, parmdpp: *mut *mut c_void, pos: u32) -> Result<()> {
    ctx.call::<ep::ParamGet>("get parameter", Policy::STRICT, |f, err| f(hndlp, htype, err, parmdpp, pos))?;
    Ok(())
}
