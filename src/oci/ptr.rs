//! Send-able pointers to OCI handles and descriptors

use std::ptr;

use super::OCIStruct;

/// Send-able cell-like wrapper around a pointer to OCI handle or descriptor.
pub struct Ptr<T: OCIStruct> {
    value: *mut T
}

impl<T: OCIStruct> Ptr<T> {
    pub fn new(ptr: *mut T) -> Self {
        Self{ value: ptr }
    }

    pub fn null() -> Self {
        Self{ value: ptr::null_mut() }
    }

    pub fn swap(&mut self, other: &mut Self) {
        if !ptr::eq(self, other) && !ptr::eq(self.value, other.value) {
            std::mem::swap(&mut self.value, &mut other.value);
        }
    }

    /// Returns the pointer and leaves NULL in its place.
    pub fn take(&mut self) -> *mut T {
        std::mem::replace(&mut self.value, ptr::null_mut())
    }

    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    pub fn get(&self) -> *mut T {
        self.value
    }

    pub fn as_mut_ptr(&mut self) -> *mut *mut T {
        &mut self.value as *mut *mut T
    }
}

impl<T: OCIStruct> Clone for Ptr<T> {
    fn clone(&self) -> Self {
        Self { value: self.value }
    }
}

impl<T: OCIStruct> Copy for Ptr<T> {}

impl<T: OCIStruct> std::fmt::Debug for Ptr<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ptr({:p})", self.value)
    }
}

unsafe impl<T: OCIStruct> Send for Ptr<T> {}
unsafe impl<T: OCIStruct> Sync for Ptr<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oci::OCIStmt;

    #[test]
    fn take_leaves_null() {
        let mut stmt = 0u8;
        let mut p = Ptr::new(&mut stmt as *mut u8 as *mut OCIStmt);
        assert!(!p.is_null());
        let raw = p.take();
        assert!(p.is_null());
        assert!(!raw.is_null());
    }

    #[test]
    fn swap_exchanges_values() {
        let mut a_val = 0u8;
        let mut a = Ptr::new(&mut a_val as *mut u8 as *mut OCIStmt);
        let mut b = Ptr::<OCIStmt>::null();
        a.swap(&mut b);
        assert!(a.is_null());
        assert!(!b.is_null());
    }
}
