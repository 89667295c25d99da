//! Object cache, named types and collections

use std::ptr;
use libc::c_void;
use crate::{Result, oci::{*, dispatch::Policy, entry::ep}};

/// Copies an instance and its indicator into another instance of the same type.
pub unsafe fn object_copy(
    ctx: &ErrorContext, svchp: *const OCISvcCtx, src: *mut c_void, src_ind: *mut c_void,
    dst: *mut c_void, dst_ind: *mut c_void, tdo: *mut OCIType
) -> Result<()> {
    ctx.call::<ep::ObjectCopy>("copy object", Policy::STRICT, |f, err| f(
        ctx.env(), err, svchp, src, src_ind, dst, dst_ind, tdo, OCI_DURATION_SESSION, OCI_DEFAULT as u8
    ))?;
    Ok(())
}

/**
Frees an object instance.

PL/SQL records cannot be freed and report ORA-21602, which counts as
success. Freeing such a record a second time crashes the client.
*/
pub unsafe fn object_free(ctx: &ErrorContext, instance: *mut c_void, check: bool) -> Result<()> {
    ctx.call::<ep::ObjectFree>("free instance", Policy::best_effort(check), |f, err| f(ctx.env(), err, instance, OCI_DEFAULT as u16))?;
    Ok(())
}

/// Attribute of an object instance addressed by name.
#[derive(Debug, Clone, Copy)]
pub struct AttrName<'a> {
    pub name: &'a [u8],
}

impl<'a> AttrName<'a> {
    pub fn new(name: &'a [u8]) -> Self {
        Self { name }
    }
}

/// Value of an object attribute as returned by [`object_get_attr`].
#[derive(Debug)]
pub struct AttrValue {
    pub null_status: i16,
    pub value_ind: *mut c_void,
    pub value: *mut c_void,
    pub tdo: *mut OCIType,
}

pub unsafe fn object_get_attr(
    ctx: &ErrorContext, instance: *mut c_void, ind: *mut c_void, tdo: *mut OCIType, attr: AttrName
) -> Result<AttrValue> {
    let mut out = AttrValue { null_status: 0, value_ind: ptr::null_mut(), value: ptr::null_mut(), tdo: ptr::null_mut() };
    let name = attr.name.as_ptr();
    let name_len = attr.name.len() as u32;
    ctx.call::<ep::ObjectGetAttr>("get attribute", Policy::STRICT, |f, err| f(
        ctx.env(), err, instance, ind, tdo, &name, &name_len, 1, ptr::null(), 0,
        &mut out.null_status, &mut out.value_ind, &mut out.value, &mut out.tdo
    ))?;
    Ok(out)
}

pub unsafe fn object_set_attr(
    ctx: &ErrorContext, instance: *mut c_void, ind: *mut c_void, tdo: *mut OCIType, attr: AttrName,
    null_status: i16, value_ind: *const c_void, value: *const c_void
) -> Result<()> {
    let name = attr.name.as_ptr();
    let name_len = attr.name.len() as u32;
    ctx.call::<ep::ObjectSetAttr>("set attribute", Policy::STRICT, |f, err| f(
        ctx.env(), err, instance, ind, tdo, &name, &name_len, 1, ptr::null(), 0, null_status, value_ind, value
    ))?;
    Ok(())
}

/// Returns the top-level null indicator structure of an instance.
pub unsafe fn object_get_ind(ctx: &ErrorContext, instance: *mut c_void) -> Result<*mut c_void> {
    let mut ind: *mut c_void = ptr::null_mut();
    ctx.call::<ep::ObjectGetInd>("get indicator", Policy::STRICT, |f, err| f(ctx.env(), err, instance, &mut ind))?;
    Ok(ind)
}

/// Creates a session-duration instance of the type described by `tdo`.
pub unsafe fn object_new(ctx: &ErrorContext, svchp: *const OCISvcCtx, typecode: u16, tdo: *mut OCIType) -> Result<*mut c_void> {
    let mut instance: *mut c_void = ptr::null_mut();
    ctx.call::<ep::ObjectNew>("create object", Policy::STRICT, |f, err| f(
        ctx.env(), err, svchp, typecode, tdo, ptr::null_mut(), OCI_DURATION_SESSION, 1, &mut instance
    ))?;
    Ok(instance)
}

/// Pins the object a REF points to.
pub unsafe fn object_pin(ctx: &ErrorContext, obj_ref: *mut c_void) -> Result<*mut c_void> {
    let mut obj: *mut c_void = ptr::null_mut();
    ctx.call::<ep::ObjectPin>("pin reference", Policy::STRICT, |f, err| f(
        ctx.env(), err, obj_ref, ptr::null_mut(), OCI_PIN_ANY, OCI_DURATION_SESSION, OCI_LOCK_NONE, &mut obj
    ))?;
    Ok(obj)
}

/// Looks up a type by its (optionally schema qualified) name.
pub unsafe fn type_by_full_name(ctx: &ErrorContext, svchp: *const OCISvcCtx, name: &[u8]) -> Result<*mut OCIType> {
    let mut tdo: *mut OCIType = ptr::null_mut();
    ctx.call::<ep::TypeByFullName>("get type by full name", Policy::STRICT, |f, err| f(
        ctx.env(), err, svchp, name.as_ptr(), name.len() as u32, ptr::null(), 0, OCI_DURATION_SESSION, OCI_TYPEGET_ALL, &mut tdo
    ))?;
    Ok(tdo)
}

pub unsafe fn type_by_name(ctx: &ErrorContext, svchp: *const OCISvcCtx, schema: &[u8], name: &[u8]) -> Result<*mut OCIType> {
    let mut tdo: *mut OCIType = ptr::null_mut();
    ctx.call::<ep::TypeByName>("get type by name", Policy::STRICT, |f, err| f(
        ctx.env(), err, svchp, schema.as_ptr(), schema.len() as u32, name.as_ptr(), name.len() as u32,
        ptr::null(), 0, OCI_DURATION_SESSION, OCI_TYPEGET_ALL, &mut tdo
    ))?;
    Ok(tdo)
}

pub unsafe fn coll_append(ctx: &ErrorContext, elem: *const c_void, elem_ind: *const c_void, coll: *mut c_void) -> Result<()> {
    ctx.call::<ep::CollAppend>("append element", Policy::STRICT, |f, err| f(ctx.env(), err, elem, elem_ind, coll))?;
    Ok(())
}

pub unsafe fn coll_assign_elem(ctx: &ErrorContext, index: i32, elem: *const c_void, elem_ind: *const c_void, coll: *mut c_void) -> Result<()> {
    ctx.call::<ep::CollAssignElem>("assign element", Policy::STRICT, |f, err| f(ctx.env(), err, index, elem, elem_ind, coll))?;
    Ok(())
}

/// Element of a collection: whether it exists, and its value and indicator.
#[derive(Debug)]
pub struct CollElem {
    pub exists: bool,
    pub elem: *mut c_void,
    pub elem_ind: *mut c_void,
}

pub unsafe fn coll_get_elem(ctx: &ErrorContext, coll: *const c_void, index: i32) -> Result<CollElem> {
    let mut exists = 0i32;
    let mut elem: *mut c_void = ptr::null_mut();
    let mut elem_ind: *mut c_void = ptr::null_mut();
    ctx.call::<ep::CollGetElem>("get element", Policy::STRICT, |f, err| f(ctx.env(), err, coll, index, &mut exists, &mut elem, &mut elem_ind))?;
    Ok(CollElem { exists: exists != 0, elem, elem_ind })
}

pub unsafe fn coll_size(ctx: &ErrorContext, coll: *const c_void) -> Result<i32> {
    let mut size = 0i32;
    ctx.call::<ep::CollSize>("get size", Policy::STRICT, |f, err| f(ctx.env(), err, coll, &mut size))?;
    Ok(size)
}

pub unsafe fn coll_trim(ctx: &ErrorContext, num_to_trim: u32, coll: *mut c_void) -> Result<()> {
    ctx.call::<ep::CollTrim>("trim", Policy::STRICT, |f, err| f(ctx.env(), err, num_to_trim as i32, coll))?;
    Ok(())
}

pub unsafe fn table_delete(ctx: &ErrorContext, index: i32, tbl: *mut c_void) -> Result<()> {
    ctx.call::<ep::TableDelete>("delete element", Policy::STRICT, |f, err| f(ctx.env(), err, index, tbl))?;
    Ok(())
}

pub unsafe fn table_exists(ctx: &ErrorContext, tbl: *const c_void, index: i32) -> Result<bool> {
    let mut exists = 0i32;
    ctx.call::<ep::TableExists>("get index exists", Policy::STRICT, |f, err| f(ctx.env(), err, tbl, index, &mut exists))?;
    Ok(exists != 0)
}

pub unsafe fn table_first(ctx: &ErrorContext, tbl: *const c_void) -> Result<i32> {
    let mut index = 0i32;
    ctx.call::<ep::TableFirst>("get first index", Policy::STRICT, |f, err| f(ctx.env(), err, tbl, &mut index))?;
    Ok(index)
}

pub unsafe fn table_last(ctx: &ErrorContext, tbl: *const c_void) -> Result<i32> {
    let mut index = 0i32;
    ctx.call::<ep::TableLast>("get last index", Policy::STRICT, |f, err| f(ctx.env(), err, tbl, &mut index))?;
    Ok(index)
}

/// Returns the index after `index`, if there is one.
pub unsafe fn table_next(ctx: &ErrorContext, index: i32, tbl: *const c_void) -> Result<Option<i32>> {
    let mut next = 0i32;
    let mut exists = 0i32;
    ctx.call::<ep::TableNext>("get next index", Policy::STRICT, |f, err| f(ctx.env(), err, index, tbl, &mut next, &mut exists))?;
    Ok(if exists != 0 { Some(next) } else { None })
}

/// Returns the index before `index`, if there is one.
pub unsafe fn table_prev(ctx: &ErrorContext, index: i32, tbl: *const c_void) -> Result<Option<i32>> {
    let mut prev = 0i32;
    let mut exists = 0i32;
    ctx.call::<ep::TablePrev>("get prev index", Policy::STRICT, |f, err| f(ctx.env(), err, index, tbl, &mut prev, &mut exists))?;
    Ok(if exists != 0 { Some(prev) } else { None })
}

pub unsafe fn table_size(ctx: &ErrorContext, tbl: *const c_void) -> Result<i32> {
    let mut size = 0i32;
    ctx.call::<ep::TableSize>("get size", Policy::STRICT, |f, err| f(ctx.env(), err, tbl, &mut size))?;
    Ok(size)
}
