//! Statements, binds and defines

use std::ptr;
use libc::c_void;
use tracing::debug;
use crate::{Result, oci::{*, dispatch::Policy, entry::ep, version::VersionInfo}};

/**
Memory the client reads bind values from or writes fetched values into.

Which fields are passed to the client depends on the call: dynamic binds pass
none of the buffers, fixed-size types pass no length array, and the array
fields are only used when `is_array` is set.
*/
#[derive(Debug, Clone, Copy)]
pub struct VarBuffer {
    /// Oracle external data type
    pub data_type: u16,
    /// Size of one element of `data` in bytes
    pub size: u32,
    /// The type has a fixed size, so there is no length array
    pub fixed_size: bool,
    /// Values are supplied or received piecewise through callbacks
    pub dynamic: bool,
    pub is_array: bool,
    pub max_array_size: u32,
    pub data: *mut c_void,
    pub indicator: *mut c_void,
    /// Lengths for the 64-bit generation of bind and define calls
    pub actual_len32: *mut u32,
    /// Lengths for the legacy generation of bind and define calls
    pub actual_len16: *mut u16,
    pub return_code: *mut u16,
    pub actual_array_size: *mut u32,
}

impl VarBuffer {
    pub fn new(data_type: u16, size: u32) -> Self {
        Self {
            data_type, size, fixed_size: false, dynamic: false, is_array: false, max_array_size: 0,
            data: ptr::null_mut(), indicator: ptr::null_mut(),
            actual_len32: ptr::null_mut(), actual_len16: ptr::null_mut(),
            return_code: ptr::null_mut(), actual_array_size: ptr::null_mut(),
        }
    }
}

/// Whether the client supports the 64-bit length variants of bind and define.
pub fn has_bind2(version: &VersionInfo) -> bool {
    version.version >= 12
}

/// Default mode of `OCIBindByName2` and `OCIBindByPos2`.
pub fn default_bind_mode(version: &VersionInfo) -> u32 {
    if version.at_least(23, 6) { OCI_BIND_DEDICATED_REF_CURSOR } else { OCI_DEFAULT }
}

/// Prepare mode for the given client.
pub fn prepare_mode(version: &VersionInfo) -> u32 {
    if version.at_least(12, 2) { OCI_PREP2_GET_SQL_ID } else { OCI_DEFAULT }
}

/// Arguments common to both bind variants after the placeholder.
struct BindArgs {
    data: *mut c_void,
    indicator: *mut c_void,
    alen32: *mut u32,
    alen16: *mut u16,
    rcode: *mut u16,
    max_arr: u32,
    cur_ele: *mut u32,
    mode: u32,
}

impl BindArgs {
    fn new(var: &VarBuffer, data_at_exec: bool, mode: u32) -> Self {
        let skip_len = data_at_exec || var.fixed_size;
        Self {
            data:      if data_at_exec { ptr::null_mut() } else { var.data },
            indicator: if data_at_exec { ptr::null_mut() } else { var.indicator },
            alen32:    if skip_len { ptr::null_mut() } else { var.actual_len32 },
            alen16:    if skip_len { ptr::null_mut() } else { var.actual_len16 },
            rcode:     if data_at_exec { ptr::null_mut() } else { var.return_code },
            max_arr:   if var.is_array { var.max_array_size } else { 0 },
            cur_ele:   if var.is_array { var.actual_array_size } else { ptr::null_mut() },
            mode:      if data_at_exec { mode | OCI_DATA_AT_EXEC } else { mode },
        }
    }
}

/**
Binds a placeholder by name.

Uses `OCIBindByName2` on clients that have it and `OCIBindByName` otherwise.
With `data_at_exec` the values are provided later through [`bind_dynamic`].
*/
pub unsafe fn bind_by_name(ctx: &ErrorContext, stmtp: *mut OCIStmt, bindpp: *mut *mut OCIBind, name: &[u8], data_at_exec: bool, var: &VarBuffer) -> Result<()> {
    let version = ctx.version();
    if has_bind2(version) {
        let args = BindArgs::new(var, data_at_exec, default_bind_mode(version));
        let size = if var.dynamic { i32::MAX as i64 } else { var.size as i64 };
        ctx.call::<ep::BindByName2>("bind by name", Policy::STRICT, |f, err| f(
            stmtp, bindpp, err, name.as_ptr(), name.len() as i32, args.data, size, var.data_type,
            args.indicator, args.alen32, args.rcode, args.max_arr, args.cur_ele, args.mode
        ))?;
    } else {
        let args = BindArgs::new(var, data_at_exec, OCI_DEFAULT);
        let size = if var.dynamic { i32::MAX } else { var.size as i32 };
        ctx.call::<ep::BindByName>("bind by name", Policy::STRICT, |f, err| f(
            stmtp, bindpp, err, name.as_ptr(), name.len() as i32, args.data, size, var.data_type,
            args.indicator, args.alen16, args.rcode, args.max_arr, args.cur_ele, args.mode
        ))?;
    }
    Ok(())
}

/// Binds a placeholder by its 1-based position. See [`bind_by_name`].
pub unsafe fn bind_by_pos(ctx: &ErrorContext, stmtp: *mut OCIStmt, bindpp: *mut *mut OCIBind, pos: u32, data_at_exec: bool, var: &VarBuffer) -> Result<()> {
    let version = ctx.version();
    if has_bind2(version) {
        let args = BindArgs::new(var, data_at_exec, default_bind_mode(version));
        let size = if var.dynamic { i32::MAX as i64 } else { var.size as i64 };
        ctx.call::<ep::BindByPos2>("bind by position", Policy::STRICT, |f, err| f(
            stmtp, bindpp, err, pos, args.data, size, var.data_type,
            args.indicator, args.alen32, args.rcode, args.max_arr, args.cur_ele, args.mode
        ))?;
    } else {
        let args = BindArgs::new(var, data_at_exec, OCI_DEFAULT);
        let size = if var.dynamic { i32::MAX } else { var.size as i32 };
        ctx.call::<ep::BindByPos>("bind by position", Policy::STRICT, |f, err| f(
            stmtp, bindpp, err, pos, args.data, size, var.data_type,
            args.indicator, args.alen16, args.rcode, args.max_arr, args.cur_ele, args.mode
        ))?;
    }
    Ok(())
}

/// Registers the in and out callbacks of a data-at-execution bind.
pub unsafe fn bind_dynamic(ctx: &ErrorContext, bindp: *mut OCIBind, ictxp: *mut c_void, icbfp: *mut c_void, octxp: *mut c_void, ocbfp: *mut c_void) -> Result<()> {
    ctx.call::<ep::BindDynamic>("bind dynamic", Policy::STRICT, |f, err| f(bindp, err, ictxp, icbfp, octxp, ocbfp))?;
    Ok(())
}

pub unsafe fn bind_object(ctx: &ErrorContext, bindp: *mut OCIBind, tdo: *const OCIType, pgvpp: *mut *mut c_void, pvszsp: *mut u32, indpp: *mut *mut c_void, indszp: *mut u32) -> Result<()> {
    ctx.call::<ep::BindObject>("bind object", Policy::STRICT, |f, err| f(bindp, err, tdo, pgvpp, pvszsp, indpp, indszp))?;
    Ok(())
}

/**
Defines an output column by its 1-based position.

Dynamic variables are fetched piecewise: no buffers are passed and the mode is
`OCI_DYNAMIC_FETCH`.
*/
pub unsafe fn define_by_pos(ctx: &ErrorContext, stmtp: *mut OCIStmt, defnpp: *mut *mut OCIDefine, pos: u32, var: &VarBuffer) -> Result<()> {
    let (data, ind, rcode, mode) = if var.dynamic {
        (ptr::null_mut(), ptr::null_mut(), ptr::null_mut(), OCI_DYNAMIC_FETCH)
    } else {
        (var.data, var.indicator, var.return_code, OCI_DEFAULT)
    };
    if has_bind2(ctx.version()) {
        let size = if var.dynamic { i32::MAX as u64 } else { var.size as u64 };
        let alen = if var.dynamic { ptr::null_mut() } else { var.actual_len32 };
        ctx.call::<ep::DefineByPos2>("define", Policy::STRICT, |f, err| f(stmtp, defnpp, err, pos, data, size, var.data_type, ind, alen, rcode, mode))?;
    } else {
        let size = if var.dynamic { i32::MAX } else { var.size as i32 };
        let alen = if var.dynamic { ptr::null_mut() } else { var.actual_len16 };
        ctx.call::<ep::DefineByPos>("define", Policy::STRICT, |f, err| f(stmtp, defnpp, err, pos, data, size, var.data_type, ind, alen, rcode, mode))?;
    }
    Ok(())
}

pub unsafe fn define_dynamic(ctx: &ErrorContext, defnp: *mut OCIDefine, octxp: *mut c_void, ocbfp: *mut c_void) -> Result<()> {
    ctx.call::<ep::DefineDynamic>("define dynamic", Policy::STRICT, |f, err| f(defnp, err, octxp, ocbfp))?;
    Ok(())
}

pub unsafe fn define_object(ctx: &ErrorContext, defnp: *mut OCIDefine, tdo: *const OCIType, pgvpp: *mut *mut c_void, pvszsp: *mut u32, indpp: *mut *mut c_void, indszp: *mut u32) -> Result<()> {
    ctx.call::<ep::DefineObject>("define object", Policy::STRICT, |f, err| f(defnp, err, tdo, pgvpp, pvszsp, indpp, indszp))?;
    Ok(())
}

/**
Prepares a statement, possibly taking it from the statement cache.

When preparation fails the statement handle is reset to NULL.
*/
pub unsafe fn stmt_prepare2(ctx: &ErrorContext, svchp: *mut OCISvcCtx, stmtp: &mut Ptr<OCIStmt>, sql: &[u8], tag: &[u8]) -> Result<()> {
    let mode = prepare_mode(ctx.version());
    let tag_ptr = if tag.is_empty() { ptr::null() } else { tag.as_ptr() };
    let res = ctx.call::<ep::StmtPrepare2>("prepare SQL", Policy::STRICT, |f, err| f(
        svchp, stmtp.as_mut_ptr(), err, sql.as_ptr(), sql.len() as u32, tag_ptr, tag.len() as u32, OCI_NTV_SYNTAX, mode
    ));
    if res.is_err() {
        *stmtp = Ptr::null();
    }
    res?;
    Ok(())
}

pub unsafe fn stmt_execute(ctx: &ErrorContext, svchp: *mut OCISvcCtx, stmtp: *mut OCIStmt, iters: u32, mode: u32) -> Result<()> {
    ctx.call::<ep::StmtExecute>("execute", Policy::STRICT, |f, err| f(svchp, stmtp, err, iters, 0, ptr::null(), ptr::null_mut(), mode))?;
    Ok(())
}

/**
Fetches rows into the defined buffers.

Returns whether more rows may follow. Running out of rows is not an error and
neither is anything reported by a fetch of the last row.
*/
pub unsafe fn stmt_fetch2(ctx: &ErrorContext, stmtp: *mut OCIStmt, rows: u32, orientation: u16, offset: i32) -> Result<bool> {
    let policy = Policy::pass(&[OCI_NO_DATA]).check(orientation != OCI_FETCH_LAST);
    let status = ctx.call::<ep::StmtFetch2>("fetch", policy, |f, err| f(stmtp, err, rows, orientation, offset, OCI_DEFAULT))?;
    Ok(status != OCI_NO_DATA && orientation != OCI_FETCH_LAST)
}

/// Output arrays of [`stmt_get_bind_info`]. Each must hold at least `size` elements.
#[derive(Debug, Clone, Copy)]
pub struct BindInfo {
    pub names: *mut *mut u8,
    pub name_lens: *mut u8,
    pub ind_names: *mut *mut u8,
    pub ind_name_lens: *mut u8,
    pub dups: *mut u8,
    pub binds: *mut *mut OCIBind,
}

/// Returns the number of placeholders found. Statements without any report 0.
pub unsafe fn stmt_get_bind_info(ctx: &ErrorContext, stmtp: *mut OCIStmt, size: u32, start: u32, info: &BindInfo) -> Result<i32> {
    let mut found = 0i32;
    let status = ctx.call::<ep::StmtGetBindInfo>("get bind info", Policy::pass(&[OCI_NO_DATA]), |f, err| f(
        stmtp, err, size, start, &mut found, info.names, info.name_lens, info.ind_names, info.ind_name_lens, info.dups, info.binds
    ))?;
    if status == OCI_NO_DATA {
        found = 0;
    }
    Ok(found)
}

/// Returns the next implicit result set, or NULL after the last one.
pub unsafe fn stmt_get_next_result(ctx: &ErrorContext, stmtp: *mut OCIStmt) -> Result<*mut OCIStmt> {
    let mut result: *mut c_void = ptr::null_mut();
    let mut rtype = 0u32;
    let status = ctx.call::<ep::StmtGetNextResult>("get next result", Policy::pass(&[OCI_NO_DATA]), |f, err| f(stmtp, err, &mut result, &mut rtype, OCI_DEFAULT))?;
    if status == OCI_NO_DATA {
        return Ok(ptr::null_mut());
    }
    Ok(result as *mut OCIStmt)
}

/**
Returns a statement to the cache or frees it.

Deleting a statement from the cache is only requested when the service
context has a statement cache, as the client rejects the mode otherwise.
*/
pub unsafe fn stmt_release(ctx: &ErrorContext, svchp: *mut OCISvcCtx, stmtp: *mut OCIStmt, tag: &[u8], delete_from_cache: bool, check: bool) -> Result<()> {
    let mut mode = OCI_DEFAULT;
    if delete_from_cache {
        let mut cache_size = 0u32;
        if let Err(err) = attr_get(ctx, svchp as *const c_void, OCI_HTYPE_SVCCTX, &mut cache_size as *mut u32 as _, ptr::null_mut(), OCI_ATTR_STMTCACHESIZE) {
            debug!(error = %err, "cannot read statement cache size");
        }
        if cache_size > 0 {
            mode |= OCI_STRLS_CACHE_DELETE;
        }
    }
    let tag_ptr = if tag.is_empty() { ptr::null() } else { tag.as_ptr() };
    ctx.call::<ep::StmtRelease>("release statement", Policy::best_effort(check), |f, err| f(stmtp, err, tag_ptr, tag.len() as u32, mode))?;
    Ok(())
}

/// Describes a named type (or a REF to one) into `dschp`.
pub unsafe fn describe_any(ctx: &ErrorContext, svchp: *mut OCISvcCtx, obj: *mut c_void, obj_len: u32, obj_type: u8, dschp: *mut OCIDescribe) -> Result<()> {
    ctx.call::<ep::DescribeAny>("describe type", Policy::STRICT, |f, err| f(svchp, err, obj, obj_len, obj_type, 0, OCI_PTYPE_TYPE, dschp))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(version: i32, release: i32) -> VersionInfo {
        VersionInfo::new(version, release, 0, 0, 0)
    }

    #[test]
    fn bind_generation_follows_client_version() {
        assert!(!has_bind2(&client(11, 2)));
        assert!(has_bind2(&client(12, 1)));
        assert!(has_bind2(&client(23, 4)));
    }

    #[test]
    fn dedicated_ref_cursor_mode_needs_23_6() {
        assert_eq!(default_bind_mode(&client(19, 22)), OCI_DEFAULT);
        assert_eq!(default_bind_mode(&client(23, 5)), OCI_DEFAULT);
        assert_eq!(default_bind_mode(&client(23, 6)), OCI_BIND_DEDICATED_REF_CURSOR);
        assert_eq!(default_bind_mode(&client(24, 1)), OCI_BIND_DEDICATED_REF_CURSOR);
    }

    #[test]
    fn sql_id_is_requested_from_12_2() {
        assert_eq!(prepare_mode(&client(12, 1)), OCI_DEFAULT);
        assert_eq!(prepare_mode(&client(12, 2)), OCI_PREP2_GET_SQL_ID);
        assert_eq!(prepare_mode(&client(21, 0)), OCI_PREP2_GET_SQL_ID);
    }

    #[test]
    fn data_at_exec_binds_pass_no_buffers() {
        let mut data = [0u8; 8];
        let mut ind = 0i16;
        let mut len = 0u32;
        let mut var = VarBuffer::new(1, 8);
        var.data = data.as_mut_ptr() as _;
        var.indicator = &mut ind as *mut i16 as _;
        var.actual_len32 = &mut len;

        let args = BindArgs::new(&var, true, OCI_DEFAULT);
        assert!(args.data.is_null());
        assert!(args.indicator.is_null());
        assert!(args.alen32.is_null());
        assert_eq!(args.mode, OCI_DATA_AT_EXEC);

        let args = BindArgs::new(&var, false, OCI_BIND_DEDICATED_REF_CURSOR);
        assert!(!args.data.is_null());
        assert!(!args.alen32.is_null());
        assert_eq!(args.mode, OCI_BIND_DEDICATED_REF_CURSOR);
        assert_eq!(args.max_arr, 0);
        assert!(args.cur_ele.is_null());
    }

    #[test]
    fn fixed_size_binds_pass_no_lengths() {
        let mut len = 0u32;
        let mut count = 0u32;
        let mut var = VarBuffer::new(2, 22);
        var.fixed_size = true;
        var.is_array = true;
        var.max_array_size = 10;
        var.actual_len32 = &mut len;
        var.actual_array_size = &mut count;

        let args = BindArgs::new(&var, false, OCI_DEFAULT);
        assert!(args.alen32.is_null());
        assert_eq!(args.max_arr, 10);
        assert!(!args.cur_ele.is_null());
    }
}
