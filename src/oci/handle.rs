//! OCI handles.

use std::sync::Arc;
use libc::c_void;
use crate::{Result, Error, env::Runtime, oci};
use super::*;

pub trait HandleType : OCIStruct {
    fn get_type() -> u32;
}

macro_rules! impl_handle_type {
    ($($oci_handle:ty => $id:ident),+) => {
        $(
            impl HandleType for $oci_handle {
                fn get_type() -> u32 { $id }
            }
        )+
    };
}

impl_handle_type!{
    OCIEnv          => OCI_HTYPE_ENV,
    OCIError        => OCI_HTYPE_ERROR,
    OCISvcCtx       => OCI_HTYPE_SVCCTX,
    OCIStmt         => OCI_HTYPE_STMT,
    OCIBind         => OCI_HTYPE_BIND,
    OCIDefine       => OCI_HTYPE_DEFINE,
    OCIDescribe     => OCI_HTYPE_DESCRIBE,
    OCIServer       => OCI_HTYPE_SERVER,
    OCISession      => OCI_HTYPE_SESSION,
    OCISubscription => OCI_HTYPE_SUBSCRIPTION,
    OCICPool        => OCI_HTYPE_CPOOL,
    OCISPool        => OCI_HTYPE_SPOOL
}

/// Owned OCI handle. Freed through the runtime that allocated it.
pub struct Handle<T: HandleType> {
    ptr: Ptr<T>,
    rt: Arc<Runtime>,
}

impl<T: HandleType> Drop for Handle<T> {
    fn drop(&mut self) {
        let ptr = self.ptr.take();
        if !ptr.is_null() {
            unsafe {
                oci::handle_free(&self.rt, ptr as *mut c_void, T::get_type());
            }
        }
    }
}

impl<T: HandleType> Handle<T> {
    /// Allocates a new handle in the context's environment.
    pub fn new(ctx: &ErrorContext) -> Result<Self> {
        let mut handle_ptr = Ptr::<T>::null();
        unsafe {
            oci::handle_alloc(ctx, ctx.env() as *const c_void, handle_ptr.as_mut_ptr() as _, T::get_type())?;
        }
        if handle_ptr.is_null() {
            Err( Error::msg(format!("OCI returned NULL for handle {}", T::get_type())) )
        } else {
            Ok( Self::from_raw(handle_ptr, ctx.runtime().clone()) )
        }
    }

    // Some handles (like OCIEnv) are allocated by their respective OCI*Create* APIs.
    // But we need to dispose of them (as handles) when it is time to drop them.
    pub(crate) fn from_raw(ptr: Ptr<T>, rt: Arc<Runtime>) -> Self {
        Self { ptr, rt }
    }

    pub fn get(&self) -> *mut T {
        self.ptr.get()
    }

    pub fn runtime(&self) -> &Arc<Runtime> {
        &self.rt
    }

    /// Gives up ownership of the native handle.
    pub fn into_raw(mut self) -> *mut T {
        self.ptr.take()
    }

    pub fn get_attr<V: attr::AttrGet>(&self, attr_type: u32, ctx: &ErrorContext) -> Result<V> {
        attr::get::<V>(ctx, self.get() as *const c_void, T::get_type(), attr_type)
    }

    pub fn get_attr_into<V: attr::AttrGetInto>(&self, attr_type: u32, into: &mut V, ctx: &ErrorContext) -> Result<()> {
        attr::get_into::<V>(ctx, self.get() as *const c_void, T::get_type(), attr_type, into)
    }

    pub fn set_attr<V: attr::AttrSet>(&self, attr_type: u32, attr_val: V, ctx: &ErrorContext) -> Result<()> {
        attr::set::<V>(ctx, self.get() as *mut c_void, T::get_type(), attr_type, attr_val)
    }
}

impl<T: HandleType> std::fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Handle({}, {:?})", T::get_type(), self.ptr)
    }
}
