use crate::{Result, oci};
use super::*;
use libc::c_void;
use std::mem;

pub trait AttrGet {
    type ValueType;
    fn new(val: Self::ValueType, len: usize) -> Self;
}

pub trait AttrSet {
    fn as_ptr(&self) -> *const c_void;
    fn len(&self) -> usize { 0 }
}

pub trait AttrGetInto {
    fn as_mut_ptr(&mut self) -> *mut c_void;
    fn capacity(&self) -> usize { 0 }
    fn set_len(&mut self, _new_len: usize) {}
}

pub(crate) fn get<A: AttrGet>(ctx: &ErrorContext, obj: *const c_void, obj_type: u32, attr_type: u32) -> Result<A> {
    let mut attr_val  = mem::MaybeUninit::<A::ValueType>::zeroed();
    let mut attr_size = 0u32;
    unsafe {
        oci::attr_get(ctx, obj, obj_type, attr_val.as_mut_ptr() as _, &mut attr_size, attr_type)?;
        Ok( AttrGet::new(attr_val.assume_init(), attr_size as usize) )
    }
}

pub(crate) fn get_into<A: AttrGetInto>(ctx: &ErrorContext, obj: *const c_void, obj_type: u32, attr_type: u32, into: &mut A) -> Result<()> {
    let mut size = into.capacity() as u32;
    unsafe {
        oci::attr_get(ctx, obj, obj_type, into.as_mut_ptr(), &mut size, attr_type)?;
    }
    into.set_len(size as usize);
    Ok(())
}

pub(crate) fn set<A: AttrSet>(ctx: &ErrorContext, obj: *mut c_void, obj_type: u32, attr_type: u32, attr_val: A) -> Result<()> {
    unsafe {
        oci::attr_set(ctx, obj, obj_type, attr_val.as_ptr() as *mut c_void, attr_val.len() as u32, attr_type)
    }
}

macro_rules! impl_int_attr {
    ($($t:ty),+) => {
        $(
            impl AttrGet for $t {
                type ValueType = $t;
                fn new(val: $t, _len: usize) -> Self {
                    val
                }
            }
            impl AttrSet for $t {
                fn as_ptr(&self) -> *const c_void {
                    self as *const $t as _
                }
            }
        )+
    };
}

impl_int_attr!{ u8, i8, u16, i16, u32, i32, u64 }

impl AttrGet for String {
    type ValueType = *const u8;
    fn new(ptr: *const u8, len: usize) -> Self {
        if ptr.is_null() || len == 0 {
            return String::new();
        }
        let bytes = unsafe { std::slice::from_raw_parts(ptr, len) };
        String::from_utf8_lossy(bytes).into_owned()
    }
}

impl AttrSet for &str {
    fn as_ptr(&self) -> *const c_void {
        (*self).as_ptr() as _
    }
    fn len(&self) -> usize {
        (*self).len()
    }
}

impl AttrGetInto for String {
    fn as_mut_ptr(&mut self) -> *mut c_void { unsafe { self.as_mut_vec().as_mut_ptr() as _ } }
    fn capacity(&self) -> usize             { self.capacity() }
    fn set_len(&mut self, new_len: usize)   { unsafe { self.as_mut_vec().set_len(new_len) } }
}
