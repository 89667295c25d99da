//! Lazily populated table of resolved entry points.

use std::{mem, sync::atomic::{AtomicPtr, AtomicUsize, Ordering}};
use libc::c_void;
use tracing::trace;
use crate::{Result, Error};
use super::{entry::{Entry, EntryPoint}, platform::NativeLibrary};

/**
Resolved entry points of one loaded client library.

Each slot is written at most once with a non-null address. Concurrent first
use of the same entry point may resolve it twice, but both threads store the
same address, so readers never observe a partial value. Failed resolutions are
not remembered and are retried on the next call.
*/
pub struct SymbolTable {
    slots: Box<[AtomicPtr<c_void>]>,
    lookups: AtomicUsize,
    // Declared last so it is unloaded after the slots are gone.
    library: Box<dyn NativeLibrary>,
}

impl SymbolTable {
    pub(crate) fn new(library: Box<dyn NativeLibrary>) -> Self {
        let slots = Entry::ALL.iter().map(|_| AtomicPtr::new(std::ptr::null_mut())).collect();
        Self { slots, lookups: AtomicUsize::new(0), library }
    }

    /// Returns the address of the entry point, resolving it on first use.
    pub fn resolve(&self, entry: Entry) -> Result<*mut c_void> {
        let slot = &self.slots[entry.index()];
        let addr = slot.load(Ordering::Acquire);
        if !addr.is_null() {
            return Ok(addr);
        }
        self.lookups.fetch_add(1, Ordering::Relaxed);
        match self.library.symbol(entry.c_name()) {
            Some(addr) => {
                trace!(symbol = entry.name(), addr = ?addr, "resolved");
                slot.store(addr.as_ptr(), Ordering::Release);
                Ok(addr.as_ptr())
            }
            None => {
                trace!(symbol = entry.name(), "not found");
                Err(Error::NotAvailable(entry.name()))
            }
        }
    }

    /// Returns the typed function pointer of the entry point.
    pub fn get<E: EntryPoint>(&self) -> Result<E::Fn> {
        debug_assert_eq!(mem::size_of::<E::Fn>(), mem::size_of::<*mut c_void>());
        let addr = self.resolve(E::ENTRY)?;
        // SAFETY: the slot holds a non-null address exported under the name
        // declared for `E`, and `E::Fn` is a function pointer of that symbol.
        Ok( unsafe { mem::transmute_copy::<*mut c_void, E::Fn>(&addr) } )
    }

    /// Whether the entry point has already been resolved.
    pub fn is_resolved(&self, entry: Entry) -> bool {
        !self.slots[entry.index()].load(Ordering::Acquire).is_null()
    }

    /// Number of lookups that went to the OS loader.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    /// Forgets every resolved address.
    pub(crate) fn clear(&self) {
        for slot in self.slots.iter() {
            slot.store(std::ptr::null_mut(), Ordering::Release);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oci::entry::ep;
    use std::ptr::NonNull;

    extern "C" fn fake_ping(_: *mut crate::oci::OCISvcCtx, _: *mut crate::oci::OCIError, _: u32) -> i32 {
        1010
    }

    struct OnlyPing;

    impl NativeLibrary for OnlyPing {
        fn symbol(&self, name: &[u8]) -> Option<NonNull<c_void>> {
            if name == b"OCIPing\0" {
                NonNull::new(fake_ping as *mut c_void)
            } else {
                None
            }
        }
    }

    #[test]
    fn second_resolution_is_cached() {
        let table = SymbolTable::new(Box::new(OnlyPing));
        let first = table.resolve(Entry::Ping).unwrap();
        let second = table.resolve(Entry::Ping).unwrap();
        assert_eq!(first, second);
        assert_eq!(table.lookups(), 1);
        assert!(table.is_resolved(Entry::Ping));
    }

    #[test]
    fn missing_symbol_is_not_cached() {
        let table = SymbolTable::new(Box::new(OnlyPing));
        assert_eq!(table.resolve(Entry::VectorToArray), Err(Error::NotAvailable("OCIVectorToArray")));
        assert_eq!(table.resolve(Entry::VectorToArray), Err(Error::NotAvailable("OCIVectorToArray")));
        assert_eq!(table.lookups(), 2);
        assert!(!table.is_resolved(Entry::VectorToArray));
    }

    #[test]
    fn typed_pointer_calls_through() {
        let table = SymbolTable::new(Box::new(OnlyPing));
        let ping = table.get::<ep::Ping>().unwrap();
        let res = unsafe { ping(std::ptr::null_mut(), std::ptr::null_mut(), 0) };
        assert_eq!(res, 1010);
    }

    #[test]
    fn clear_forces_new_lookup() {
        let table = SymbolTable::new(Box::new(OnlyPing));
        table.resolve(Entry::Ping).unwrap();
        table.clear();
        assert!(!table.is_resolved(Entry::Ping));
        table.resolve(Entry::Ping).unwrap();
        assert_eq!(table.lookups(), 2);
    }
}
