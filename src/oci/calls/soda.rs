//! Simple Oracle Document Access

use std::ptr;
use libc::c_void;
use crate::{Result, oci::{*, dispatch::Policy, entry::ep}};

/// Runs a SODA call that yields a handle, mapping `OCI_NO_DATA` to NULL.
unsafe fn next_handle<E: EntryPoint>(ctx: &ErrorContext, action: &'static str, f: impl FnOnce(E::Fn, *mut OCIError, *mut *mut c_void) -> i32) -> Result<*mut c_void> {
    let mut handle: *mut c_void = ptr::null_mut();
    let status = ctx.call::<E>(action, Policy::pass(&[OCI_NO_DATA]), |func, err| f(func, err, &mut handle))?;
    if status == OCI_NO_DATA {
        return Ok(ptr::null_mut());
    }
    Ok(handle)
}

pub unsafe fn soda_bulk_insert(ctx: &ErrorContext, svchp: *mut OCISvcCtx, coll: *mut c_void, docs: &mut [*mut c_void], out_opts: *mut c_void, mode: u32) -> Result<()> {
    ctx.call::<ep::SodaBulkInsert>("insert multiple documents", Policy::STRICT, |f, err| f(
        svchp, coll, docs.as_mut_ptr(), docs.len() as u32, out_opts, err, mode
    ))?;
    Ok(())
}

/// Inserts documents and replaces each entry of `docs` with the stored document.
pub unsafe fn soda_bulk_insert_and_get(ctx: &ErrorContext, svchp: *mut OCISvcCtx, coll: *mut c_void, docs: &mut [*mut c_void], out_opts: *mut c_void, mode: u32) -> Result<()> {
    ctx.call::<ep::SodaBulkInsertAndGet>("insert (and get) multiple documents", Policy::STRICT, |f, err| f(
        svchp, coll, docs.as_mut_ptr(), docs.len() as u32, out_opts, err, mode
    ))?;
    Ok(())
}

pub unsafe fn soda_bulk_insert_and_get_with_opts(
    ctx: &ErrorContext, svchp: *mut OCISvcCtx, coll: *mut c_void, docs: &mut [*mut c_void],
    oper_opts: *mut c_void, out_opts: *mut c_void, mode: u32
) -> Result<()> {
    ctx.call::<ep::SodaBulkInsertAndGetWithOpts>("insert (and get) multiple documents with options", Policy::STRICT, |f, err| f(
        svchp, coll, docs.as_mut_ptr(), docs.len() as u32, oper_opts, out_opts, err, mode
    ))?;
    Ok(())
}

/// Creates a collection, or opens it if it exists. Empty `metadata` uses the default.
pub unsafe fn soda_coll_create_with_metadata(ctx: &ErrorContext, svchp: *mut OCISvcCtx, name: &[u8], metadata: &[u8], mode: u32) -> Result<*mut c_void> {
    let mut coll: *mut c_void = ptr::null_mut();
    let meta_ptr = if metadata.is_empty() { ptr::null() } else { metadata.as_ptr() };
    ctx.call::<ep::SodaCollCreateWithMetadata>("create SODA collection", Policy::STRICT, |f, err| f(
        svchp, name.as_ptr(), name.len() as u32, meta_ptr, metadata.len() as u32, &mut coll, err, mode
    ))?;
    Ok(coll)
}

/// Drops a collection. Returns whether it existed.
pub unsafe fn soda_coll_drop(ctx: &ErrorContext, svchp: *mut OCISvcCtx, coll: *mut c_void, mode: u32) -> Result<bool> {
    let mut dropped = 0i32;
    ctx.call::<ep::SodaCollDrop>("drop SODA collection", Policy::STRICT, |f, err| f(svchp, coll, &mut dropped, err, mode))?;
    Ok(dropped != 0)
}

/// Returns the next collection of a collection cursor, or NULL at the end.
pub unsafe fn soda_coll_get_next(ctx: &ErrorContext, svchp: *mut OCISvcCtx, cursor: *const c_void) -> Result<*mut c_void> {
    next_handle::<ep::SodaCollGetNext>(ctx, "get next collection", |f, err, coll| f(svchp, cursor, coll, err, OCI_DEFAULT))
}

/// Opens a cursor over the collections whose names start at `start_name`.
pub unsafe fn soda_coll_list(ctx: &ErrorContext, svchp: *mut OCISvcCtx, start_name: &[u8], mode: u32) -> Result<*mut c_void> {
    let mut cursor: *mut c_void = ptr::null_mut();
    let name_ptr = if start_name.is_empty() { ptr::null() } else { start_name.as_ptr() };
    ctx.call::<ep::SodaCollList>("get SODA collection cursor", Policy::STRICT, |f, err| f(
        svchp, name_ptr, start_name.len() as u32, &mut cursor, err, mode
    ))?;
    Ok(cursor)
}

/// Opens a collection. Returns NULL when there is no collection of that name.
pub unsafe fn soda_coll_open(ctx: &ErrorContext, svchp: *mut OCISvcCtx, name: &[u8], mode: u32) -> Result<*mut c_void> {
    let mut coll: *mut c_void = ptr::null_mut();
    ctx.call::<ep::SodaCollOpen>("open SODA collection", Policy::STRICT, |f, err| f(svchp, name.as_ptr(), name.len() as u32, &mut coll, err, mode))?;
    Ok(coll)
}

pub unsafe fn soda_coll_truncate(ctx: &ErrorContext, svchp: *mut OCISvcCtx, coll: *mut c_void) -> Result<()> {
    ctx.call::<ep::SodaCollTruncate>("truncate SODA collection", Policy::STRICT, |f, err| f(svchp, coll, err, OCI_DEFAULT))?;
    Ok(())
}

/**
Returns the data guide document of a collection.

A collection without documents has no data guide; that yields NULL rather
than an error.
*/
pub unsafe fn soda_data_guide_get(ctx: &ErrorContext, svchp: *mut OCISvcCtx, coll: *const c_void, mode: u32) -> Result<*mut c_void> {
    next_handle::<ep::SodaDataGuideGet>(ctx, "get data guide", |f, err, doc| f(svchp, coll, OCI_SODA_AS_AL32UTF8, doc, err, mode))
}

pub unsafe fn soda_doc_count(ctx: &ErrorContext, svchp: *mut OCISvcCtx, coll: *const c_void, opts: *const c_void, mode: u32) -> Result<u64> {
    let mut count = 0u64;
    ctx.call::<ep::SodaDocCount>("get document count", Policy::STRICT, |f, err| f(svchp, coll, opts, &mut count, err, mode))?;
    Ok(count)
}

/// Returns the next document of a document cursor, or NULL at the end.
pub unsafe fn soda_doc_get_next(ctx: &ErrorContext, svchp: *mut OCISvcCtx, cursor: *const c_void) -> Result<*mut c_void> {
    next_handle::<ep::SodaDocGetNext>(ctx, "get next document", |f, err, doc| f(svchp, cursor, doc, err, OCI_DEFAULT))
}

/// Opens a cursor over the matching documents, or returns NULL when nothing matches.
pub unsafe fn soda_find(ctx: &ErrorContext, svchp: *mut OCISvcCtx, coll: *const c_void, opts: *const c_void, flags: u32, mode: u32) -> Result<*mut c_void> {
    next_handle::<ep::SodaFind>(ctx, "find SODA documents", |f, err, cursor| f(svchp, coll, opts, flags, cursor, err, mode))
}

/// Returns the first matching document, or NULL when nothing matches.
pub unsafe fn soda_find_one(ctx: &ErrorContext, svchp: *mut OCISvcCtx, coll: *const c_void, opts: *const c_void, flags: u32, mode: u32) -> Result<*mut c_void> {
    next_handle::<ep::SodaFindOne>(ctx, "get SODA document", |f, err, doc| f(svchp, coll, opts, flags, doc, err, mode))
}

pub unsafe fn soda_index_create(ctx: &ErrorContext, svchp: *mut OCISvcCtx, coll: *const c_void, spec: &[u8], mode: u32) -> Result<()> {
    ctx.call::<ep::SodaIndexCreate>("create index", Policy::STRICT, |f, err| f(svchp, coll, spec.as_ptr(), spec.len() as u32, err, mode))?;
    Ok(())
}

/// Drops an index. Returns whether it existed.
pub unsafe fn soda_index_drop(ctx: &ErrorContext, svchp: *mut OCISvcCtx, name: &[u8], mode: u32) -> Result<bool> {
    let mut dropped = 0i32;
    ctx.call::<ep::SodaIndexDrop>("drop index", Policy::STRICT, |f, err| f(svchp, name.as_ptr(), name.len() as u32, &mut dropped, err, mode))?;
    Ok(dropped != 0)
}

pub unsafe fn soda_index_list(ctx: &ErrorContext, svchp: *mut OCISvcCtx, coll: *const c_void, flags: u32) -> Result<*mut c_void> {
    let mut list: *mut c_void = ptr::null_mut();
    ctx.call::<ep::SodaIndexList>("get index list", Policy::STRICT, |f, err| f(svchp, coll, flags, &mut list, err, OCI_DEFAULT))?;
    Ok(list)
}

pub unsafe fn soda_insert(ctx: &ErrorContext, svchp: *mut OCISvcCtx, coll: *mut c_void, doc: *mut c_void, mode: u32) -> Result<()> {
    ctx.call::<ep::SodaInsert>("insert SODA document", Policy::STRICT, |f, err| f(svchp, coll, doc, err, mode))?;
    Ok(())
}

/// Inserts `*doc` and replaces it with the stored document.
pub unsafe fn soda_insert_and_get(ctx: &ErrorContext, svchp: *mut OCISvcCtx, coll: *mut c_void, doc: *mut *mut c_void, mode: u32) -> Result<()> {
    ctx.call::<ep::SodaInsertAndGet>("insert and get SODA document", Policy::STRICT, |f, err| f(svchp, coll, doc, err, mode))?;
    Ok(())
}

pub unsafe fn soda_insert_and_get_with_opts(ctx: &ErrorContext, svchp: *mut OCISvcCtx, coll: *mut c_void, doc: *mut *mut c_void, oper_opts: *mut c_void, mode: u32) -> Result<()> {
    ctx.call::<ep::SodaInsertAndGetWithOpts>("insert and get SODA document with options", Policy::STRICT, |f, err| f(svchp, coll, doc, oper_opts, err, mode))?;
    Ok(())
}

/// Restricts an operation options handle to the given document keys.
pub unsafe fn soda_oper_keys_set(ctx: &ErrorContext, opts: *const c_void, keys: &[*const u8], key_lens: &mut [u32]) -> Result<()> {
    let num_keys = keys.len().min(key_lens.len()) as u32;
    ctx.call::<ep::SodaOperKeysSet>("set operation options keys", Policy::STRICT, |f, err| f(
        opts, keys.as_ptr(), key_lens.as_mut_ptr(), num_keys, err, OCI_DEFAULT
    ))?;
    Ok(())
}

/// Removes the matching documents. Returns how many were removed.
pub unsafe fn soda_remove(ctx: &ErrorContext, svchp: *mut OCISvcCtx, coll: *const c_void, opts: *const c_void, mode: u32) -> Result<u64> {
    let mut count = 0u64;
    ctx.call::<ep::SodaRemove>("remove documents from SODA collection", Policy::STRICT, |f, err| f(svchp, coll, opts, &mut count, err, mode))?;
    Ok(count)
}

/// Replaces the matching document. Returns whether a document was replaced.
pub unsafe fn soda_repl_one(ctx: &ErrorContext, svchp: *mut OCISvcCtx, coll: *const c_void, opts: *const c_void, doc: *mut c_void, mode: u32) -> Result<bool> {
    let mut replaced = 0i32;
    ctx.call::<ep::SodaReplOne>("replace SODA document", Policy::STRICT, |f, err| f(svchp, coll, opts, doc, &mut replaced, err, mode))?;
    Ok(replaced != 0)
}

pub unsafe fn soda_repl_one_and_get(ctx: &ErrorContext, svchp: *mut OCISvcCtx, coll: *const c_void, opts: *const c_void, doc: *mut *mut c_void, mode: u32) -> Result<bool> {
    let mut replaced = 0i32;
    ctx.call::<ep::SodaReplOneAndGet>("replace and get SODA document", Policy::STRICT, |f, err| f(svchp, coll, opts, doc, &mut replaced, err, mode))?;
    Ok(replaced != 0)
}

pub unsafe fn soda_save(ctx: &ErrorContext, svchp: *mut OCISvcCtx, coll: *mut c_void, doc: *mut c_void, mode: u32) -> Result<()> {
    ctx.call::<ep::SodaSave>("save SODA document", Policy::STRICT, |f, err| f(svchp, coll, doc, err, mode))?;
    Ok(())
}

pub unsafe fn soda_save_and_get(ctx: &ErrorContext, svchp: *mut OCISvcCtx, coll: *mut c_void, doc: *mut *mut c_void, mode: u32) -> Result<()> {
    ctx.call::<ep::SodaSaveAndGet>("save and get SODA document", Policy::STRICT, |f, err| f(svchp, coll, doc, err, mode))?;
    Ok(())
}

pub unsafe fn soda_save_and_get_with_opts(ctx: &ErrorContext, svchp: *mut OCISvcCtx, coll: *mut c_void, doc: *mut *mut c_void, oper_opts: *mut c_void, mode: u32) -> Result<()> {
    ctx.call::<ep::SodaSaveAndGetWithOpts>("save and get SODA document", Policy::STRICT, |f, err| f(svchp, coll, doc, oper_opts, err, mode))?;
    Ok(())
}
