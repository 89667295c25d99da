//! Servers, sessions, pools, transactions, subscriptions and queues

use std::{ffi::CStr, ptr};
use libc::c_void;
use crate::{Result, oci::{*, dispatch::Policy, entry::ep}};

pub unsafe fn server_attach(ctx: &ErrorContext, srvhp: *mut OCIServer, dblink: &[u8], mode: u32) -> Result<()> {
    ctx.call::<ep::ServerAttach>("server attach", Policy::STRICT, |f, err| f(srvhp, err, dblink.as_ptr(), dblink.len() as i32, mode))?;
    Ok(())
}

pub unsafe fn server_detach(ctx: &ErrorContext, srvhp: *mut OCIServer, check: bool) -> Result<()> {
    ctx.call::<ep::ServerDetach>("detach from server", Policy::best_effort(check), |f, err| f(srvhp, err, OCI_DEFAULT))?;
    Ok(())
}

/**
Reads the server banner into `buf` and returns the packed server version.

Clients before 18 use `OCIServerRelease`, newer ones `OCIServerRelease2`.
*/
pub unsafe fn server_release(ctx: &ErrorContext, svchp: *mut OCISvcCtx, buf: &mut [u8], mode: u32) -> Result<u32> {
    let mut version = 0u32;
    if ctx.version().version < 18 {
        ctx.call::<ep::ServerRelease>("get server version", Policy::STRICT, |f, err| f(
            svchp as *mut c_void, err, buf.as_mut_ptr(), buf.len() as u32, OCI_HTYPE_SVCCTX as u8, &mut version
        ))?;
    } else {
        ctx.call::<ep::ServerRelease2>("get server version", Policy::STRICT, |f, err| f(
            svchp as *mut c_void, err, buf.as_mut_ptr(), buf.len() as u32, OCI_HTYPE_SVCCTX as u8, &mut version, mode
        ))?;
    }
    Ok(version)
}

pub unsafe fn session_begin(ctx: &ErrorContext, svchp: *mut OCISvcCtx, usrhp: *mut OCISession, credt: u32, mode: u32) -> Result<()> {
    ctx.call::<ep::SessionBegin>("begin session", Policy::STRICT, |f, err| f(svchp, err, usrhp, credt, mode))?;
    Ok(())
}

pub unsafe fn session_end(ctx: &ErrorContext, svchp: *mut OCISvcCtx, usrhp: *mut OCISession, check: bool) -> Result<()> {
    ctx.call::<ep::SessionEnd>("end session", Policy::best_effort(check), |f, err| f(svchp, err, usrhp, OCI_DEFAULT))?;
    Ok(())
}

/// Output of a successful [`session_get`].
#[derive(Debug)]
pub struct SessionTag {
    pub ret_tag: *const u8,
    pub ret_tag_len: u32,
    pub found: bool,
}

/**
Gets a session from a pool or creates a standalone one.

On failure the returned service context is cleared, as the client may leave a
stale handle there.
*/
pub unsafe fn session_get(
    ctx: &ErrorContext, svchp: *mut *mut OCISvcCtx, authinfo: *mut OCIAuthInfo,
    dbname: &[u8], tag: &[u8], mode: u32
) -> Result<SessionTag> {
    let mut out = SessionTag { ret_tag: ptr::null(), ret_tag_len: 0, found: false };
    let mut found = 0i32;
    let tag_ptr = if tag.is_empty() { ptr::null() } else { tag.as_ptr() };
    let res = ctx.call::<ep::SessionGet>("get session", Policy::STRICT, |f, err| {
        let status = f(
            ctx.env(), err, svchp, authinfo, dbname.as_ptr(), dbname.len() as u32, tag_ptr, tag.len() as u32,
            &mut out.ret_tag, &mut out.ret_tag_len, &mut found, mode
        );
        if status < 0 {
            *svchp = ptr::null_mut();
        }
        status
    });
    res?;
    out.found = found != 0;
    Ok(out)
}

pub unsafe fn session_release(ctx: &ErrorContext, svchp: *mut OCISvcCtx, tag: &[u8], mode: u32, check: bool) -> Result<()> {
    let tag_ptr = if tag.is_empty() { ptr::null() } else { tag.as_ptr() };
    ctx.call::<ep::SessionRelease>("release session", Policy::best_effort(check), |f, err| f(svchp, err, tag_ptr, tag.len() as u32, mode))?;
    Ok(())
}

/// Pool name assigned by the client.
#[derive(Debug)]
pub struct PoolName {
    pub name: *const u8,
    pub len: u32,
}

pub unsafe fn session_pool_create(
    ctx: &ErrorContext, spoolhp: *mut OCISPool, conn_str: &[u8],
    min: u32, max: u32, incr: u32, user: &[u8], pass: &[u8], mode: u32
) -> Result<PoolName> {
    let mut name = PoolName { name: ptr::null(), len: 0 };
    ctx.call::<ep::SessionPoolCreate>("create pool", Policy::STRICT, |f, err| f(
        ctx.env(), err, spoolhp, &mut name.name, &mut name.len,
        conn_str.as_ptr(), conn_str.len() as u32, min, max, incr,
        user.as_ptr(), user.len() as u32, pass.as_ptr(), pass.len() as u32, mode
    ))?;
    Ok(name)
}

/**
Destroys a session pool and frees its handle.

The pool handle is cleared while the pool is being destroyed so that it is not
used concurrently. A failed checked destroy puts the handle back.
*/
pub unsafe fn session_pool_destroy(ctx: &ErrorContext, spoolhp: &mut Ptr<OCISPool>, mode: u32, check: bool) -> Result<()> {
    let handle = spoolhp.take();
    let res = ctx.call::<ep::SessionPoolDestroy>("destroy pool", Policy::best_effort(check), |f, err| f(handle, err, mode));
    if res.is_err() {
        *spoolhp = Ptr::new(handle);
        res?;
    }
    handle_free(ctx.runtime(), handle as *mut c_void, OCI_HTYPE_SPOOL);
    Ok(())
}

pub unsafe fn password_change(ctx: &ErrorContext, svchp: *mut OCISvcCtx, user: &[u8], old: &[u8], new: &[u8], mode: u32) -> Result<()> {
    ctx.call::<ep::PasswordChange>("change password", Policy::STRICT, |f, err| f(
        svchp, err, user.as_ptr(), user.len() as u32, old.as_ptr(), old.len() as u32, new.as_ptr(), new.len() as u32, mode
    ))?;
    Ok(())
}

/// Round-trips to the server. Servers that cannot ping still count as reachable.
pub unsafe fn ping(ctx: &ErrorContext, svchp: *mut OCISvcCtx) -> Result<()> {
    ctx.call::<ep::Ping>("ping", Policy::STRICT, |f, err| f(svchp, err, OCI_DEFAULT))?;
    Ok(())
}

/// Interrupts the call currently executing on the given service context or server.
pub unsafe fn break_execution(ctx: &ErrorContext, hndlp: *mut c_void) -> Result<()> {
    ctx.call::<ep::Break>("break execution", Policy::STRICT, |f, err| f(hndlp, err))?;
    Ok(())
}

pub unsafe fn db_startup(ctx: &ErrorContext, svchp: *mut OCISvcCtx, admhp: *mut c_void, mode: u32) -> Result<()> {
    ctx.call::<ep::DbStartup>("startup database", Policy::STRICT, |f, err| f(svchp, err, admhp, OCI_DEFAULT, mode))?;
    Ok(())
}

pub unsafe fn db_shutdown(ctx: &ErrorContext, svchp: *mut OCISvcCtx, mode: u32) -> Result<()> {
    ctx.call::<ep::DbShutdown>("shutdown database", Policy::STRICT, |f, err| f(svchp, err, ptr::null_mut(), mode))?;
    Ok(())
}

pub unsafe fn trans_commit(ctx: &ErrorContext, svchp: *mut OCISvcCtx, flags: u32) -> Result<()> {
    ctx.call::<ep::TransCommit>("commit", Policy::STRICT, |f, err| f(svchp, err, flags))?;
    Ok(())
}

pub unsafe fn trans_detach(ctx: &ErrorContext, svchp: *mut OCISvcCtx, flags: u32) -> Result<()> {
    ctx.call::<ep::TransDetach>("detach TPC transaction", Policy::STRICT, |f, err| f(svchp, err, flags))?;
    Ok(())
}

pub unsafe fn trans_forget(ctx: &ErrorContext, svchp: *mut OCISvcCtx) -> Result<()> {
    ctx.call::<ep::TransForget>("forget TPC transaction", Policy::STRICT, |f, err| f(svchp, err, OCI_DEFAULT))?;
    Ok(())
}

/// Prepares a transaction for two-phase commit. Returns whether a commit is needed.
pub unsafe fn trans_prepare(ctx: &ErrorContext, svchp: *mut OCISvcCtx) -> Result<bool> {
    let status = ctx.call::<ep::TransPrepare>("prepare transaction", Policy::STRICT, |f, err| f(svchp, err, OCI_DEFAULT))?;
    Ok(status == OCI_SUCCESS)
}

pub unsafe fn trans_rollback(ctx: &ErrorContext, svchp: *mut OCISvcCtx, check: bool) -> Result<()> {
    ctx.call::<ep::TransRollback>("rollback", Policy::best_effort(check), |f, err| f(svchp, err, OCI_DEFAULT))?;
    Ok(())
}

pub unsafe fn trans_start(ctx: &ErrorContext, svchp: *mut OCISvcCtx, timeout: u32, flags: u32) -> Result<()> {
    ctx.call::<ep::TransStart>("start transaction", Policy::STRICT, |f, err| f(svchp, err, timeout, flags))?;
    Ok(())
}

pub unsafe fn subscription_register(ctx: &ErrorContext, svchp: *mut OCISvcCtx, subscrhpp: *mut *mut OCISubscription, mode: u32) -> Result<()> {
    ctx.call::<ep::SubscriptionRegister>("register", Policy::STRICT, |f, err| f(svchp, subscrhpp, 1, err, mode))?;
    Ok(())
}

pub unsafe fn subscription_unregister(ctx: &ErrorContext, svchp: *mut OCISvcCtx, subscrhp: *mut OCISubscription, client_initiated: bool) -> Result<()> {
    let mode = if client_initiated { OCI_SECURE_NOTIFICATION } else { OCI_DEFAULT };
    ctx.call::<ep::SubscriptionUnRegister>("unregister", Policy::STRICT, |f, err| f(svchp, subscrhp, err, mode))?;
    Ok(())
}

pub unsafe fn sharding_key_column_add(ctx: &ErrorContext, sharding_key: *mut c_void, col: *mut c_void, col_len: u32, col_type: u16) -> Result<()> {
    ctx.call::<ep::ShardingKeyColumnAdd>("add sharding column", Policy::STRICT, |f, err| f(sharding_key, err, col, col_len, col_type, OCI_DEFAULT))?;
    Ok(())
}

/// Arguments shared by the single message queue operations.
#[derive(Debug, Clone, Copy)]
pub struct AqMessage {
    pub options: *mut c_void,
    pub msg_props: *mut c_void,
    pub payload_tdo: *mut c_void,
    pub payload: *mut *mut c_void,
    pub payload_ind: *mut *mut c_void,
    pub msg_id: *mut *mut c_void,
}

pub unsafe fn aq_enq(ctx: &ErrorContext, svchp: *mut OCISvcCtx, queue: &CStr, msg: &AqMessage) -> Result<()> {
    ctx.call::<ep::AqEnq>("enqueue message", Policy::STRICT, |f, err| f(
        svchp, err, queue.as_ptr() as *const u8, msg.options, msg.msg_props, msg.payload_tdo, msg.payload, msg.payload_ind, msg.msg_id, OCI_DEFAULT
    ))?;
    Ok(())
}

pub unsafe fn aq_deq(ctx: &ErrorContext, svchp: *mut OCISvcCtx, queue: &CStr, msg: &AqMessage) -> Result<()> {
    ctx.call::<ep::AqDeq>("dequeue message", Policy::STRICT, |f, err| f(
        svchp, err, queue.as_ptr() as *const u8, msg.options, msg.msg_props, msg.payload_tdo, msg.payload, msg.payload_ind, msg.msg_id, OCI_DEFAULT
    ))?;
    Ok(())
}

/// Arguments shared by the array message queue operations.
#[derive(Debug, Clone, Copy)]
pub struct AqMessages {
    pub options: *mut c_void,
    pub num_iters: *mut u32,
    pub msg_props: *mut *mut c_void,
    pub payload_tdo: *mut c_void,
    pub payloads: *mut *mut c_void,
    pub payload_inds: *mut *mut c_void,
    pub msg_ids: *mut *mut c_void,
}

pub unsafe fn aq_enq_array(ctx: &ErrorContext, svchp: *mut OCISvcCtx, queue: &CStr, msgs: &AqMessages) -> Result<()> {
    ctx.call::<ep::AqEnqArray>("enqueue messages", Policy::STRICT, |f, err| f(
        svchp, err, queue.as_ptr() as *const u8, msgs.options, msgs.num_iters, msgs.msg_props,
        msgs.payload_tdo, msgs.payloads, msgs.payload_inds, msgs.msg_ids, ptr::null_mut(), ptr::null_mut(), OCI_DEFAULT
    ))?;
    Ok(())
}

/// Dequeues up to `*num_iters` messages. `*num_iters` is updated with the count received.
pub unsafe fn aq_deq_array(ctx: &ErrorContext, svchp: *mut OCISvcCtx, queue: &CStr, msgs: &AqMessages) -> Result<()> {
    ctx.call::<ep::AqDeqArray>("dequeue messages", Policy::STRICT, |f, err| f(
        svchp, err, queue.as_ptr() as *const u8, msgs.options, msgs.num_iters, msgs.msg_props,
        msgs.payload_tdo, msgs.payloads, msgs.payload_inds, msgs.msg_ids, ptr::null_mut(), ptr::null_mut(), OCI_DEFAULT
    ))?;
    Ok(())
}
