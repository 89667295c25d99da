//! LOB and BFILE locators

use libc::c_void;
use crate::{Result, Error, oci::{*, dispatch::Policy, entry::ep}};

/// Character set ids of an environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharSets {
    pub charset: u16,
    pub ncharset: u16,
}

impl CharSets {
    /// Character set that applies to data of the given form.
    pub fn for_form(&self, csfrm: u8) -> u16 {
        if csfrm == SQLCS_NCHAR { self.ncharset } else { self.charset }
    }
}

/// What a temporary LOB is created as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LobKind {
    /// `OCI_TEMP_BLOB` or `OCI_TEMP_CLOB`
    pub lob_type: u8,
    /// `SQLCS_IMPLICIT` or `SQLCS_NCHAR`
    pub csfrm: u8,
}

impl LobKind {
    pub const BLOB: LobKind  = LobKind { lob_type: OCI_TEMP_BLOB, csfrm: SQLCS_IMPLICIT };
    pub const CLOB: LobKind  = LobKind { lob_type: OCI_TEMP_CLOB, csfrm: SQLCS_IMPLICIT };
    pub const NCLOB: LobKind = LobKind { lob_type: OCI_TEMP_CLOB, csfrm: SQLCS_NCHAR };
}

pub unsafe fn lob_close(ctx: &ErrorContext, svchp: *mut OCISvcCtx, locp: *mut OCILobLocator) -> Result<()> {
    ctx.call::<ep::LobClose>("close LOB", Policy::STRICT, |f, err| f(svchp, err, locp))?;
    Ok(())
}

/// Turns `locp` into a session-duration temporary LOB with caching enabled.
pub unsafe fn lob_create_temporary(ctx: &ErrorContext, svchp: *mut OCISvcCtx, locp: *mut OCILobLocator, kind: LobKind) -> Result<()> {
    ctx.call::<ep::LobCreateTemporary>("create temporary LOB", Policy::STRICT, |f, err| f(
        svchp, err, locp, OCI_DEFAULT as u16, kind.csfrm, kind.lob_type, 1, OCI_DURATION_SESSION
    ))?;
    Ok(())
}

pub unsafe fn lob_file_exists(ctx: &ErrorContext, svchp: *mut OCISvcCtx, locp: *mut OCILobLocator) -> Result<bool> {
    let mut exists = 0i32;
    ctx.call::<ep::LobFileExists>("get file exists", Policy::STRICT, |f, err| f(svchp, err, locp, &mut exists))?;
    Ok(exists != 0)
}

/**
Reads the directory alias and file name of a BFILE locator.

On input the lengths hold the capacities of the buffers, on output the number
of bytes written.
*/
pub unsafe fn lob_file_get_name(ctx: &ErrorContext, locp: *const OCILobLocator, dir: &mut [u8], dir_len: &mut u16, name: &mut [u8], name_len: &mut u16) -> Result<()> {
    *dir_len = u16::try_from(dir.len()).unwrap_or(u16::MAX);
    *name_len = u16::try_from(name.len()).unwrap_or(u16::MAX);
    let dir_len = &mut *dir_len as *mut u16;
    let name_len = &mut *name_len as *mut u16;
    ctx.call::<ep::LobFileGetName>("get LOB file name", Policy::STRICT, |f, err| f(
        ctx.env(), err, locp, dir.as_mut_ptr(), dir_len, name.as_mut_ptr(), name_len
    ))?;
    Ok(())
}

pub unsafe fn lob_file_set_name(ctx: &ErrorContext, locpp: *mut *mut OCILobLocator, dir: &[u8], name: &[u8]) -> Result<()> {
    let dir_len = u16::try_from(dir.len()).map_err(|_| Error::new("BFILE directory alias is too long"))?;
    let name_len = u16::try_from(name.len()).map_err(|_| Error::new("BFILE file name is too long"))?;
    ctx.call::<ep::LobFileSetName>("set LOB file name", Policy::STRICT, |f, err| f(
        ctx.env(), err, locpp, dir.as_ptr(), dir_len, name.as_ptr(), name_len
    ))?;
    Ok(())
}

pub unsafe fn lob_free_temporary(ctx: &ErrorContext, svchp: *mut OCISvcCtx, locp: *mut OCILobLocator, check: bool) -> Result<()> {
    ctx.call::<ep::LobFreeTemporary>("free temporary LOB", Policy::best_effort(check), |f, err| f(svchp, err, locp))?;
    Ok(())
}

pub unsafe fn lob_get_chunk_size(ctx: &ErrorContext, svchp: *mut OCISvcCtx, locp: *mut OCILobLocator) -> Result<u32> {
    let mut size = 0u32;
    ctx.call::<ep::LobGetChunkSize>("get chunk size", Policy::STRICT, |f, err| f(svchp, err, locp, &mut size))?;
    Ok(size)
}

pub unsafe fn lob_get_length2(ctx: &ErrorContext, svchp: *mut OCISvcCtx, locp: *mut OCILobLocator) -> Result<u64> {
    let mut len = 0u64;
    ctx.call::<ep::LobGetLength2>("get length", Policy::STRICT, |f, err| f(svchp, err, locp, &mut len))?;
    Ok(len)
}

pub unsafe fn lob_is_open(ctx: &ErrorContext, svchp: *mut OCISvcCtx, locp: *mut OCILobLocator) -> Result<bool> {
    let mut is_open = 0i32;
    ctx.call::<ep::LobIsOpen>("check is open", Policy::STRICT, |f, err| f(svchp, err, locp, &mut is_open))?;
    Ok(is_open != 0)
}

/// Reports whether the locator is temporary. A failed best-effort check reports `false`.
pub unsafe fn lob_is_temporary(ctx: &ErrorContext, locp: *mut OCILobLocator, check: bool) -> Result<bool> {
    let mut is_temp = 0i32;
    ctx.call::<ep::LobIsTemporary>("check is temporary", Policy::best_effort(check), |f, err| f(ctx.env(), err, locp, &mut is_temp))?;
    Ok(is_temp != 0)
}

pub unsafe fn lob_locator_assign(ctx: &ErrorContext, svchp: *mut OCISvcCtx, src: *const OCILobLocator, dst: *mut *mut OCILobLocator) -> Result<()> {
    ctx.call::<ep::LobLocatorAssign>("assign locator", Policy::STRICT, |f, err| f(svchp, err, src, dst))?;
    Ok(())
}

/// Opens a LOB. BFILEs can only be opened read-only.
pub unsafe fn lob_open(ctx: &ErrorContext, svchp: *mut OCISvcCtx, locp: *mut OCILobLocator, is_file: bool) -> Result<()> {
    let mode = if is_file { OCI_LOB_READONLY } else { OCI_LOB_READWRITE };
    ctx.call::<ep::LobOpen>("open LOB", Policy::STRICT, |f, err| f(svchp, err, locp, mode))?;
    Ok(())
}

/**
Reads from a LOB into `buf` in one piece.

`byte_amt` and `char_amt` hold the amounts to read and are updated with the
amounts read. When the client wants to continue piecewise, both are set to 0
and the read succeeds.
*/
pub unsafe fn lob_read2(
    ctx: &ErrorContext, svchp: *mut OCISvcCtx, locp: *mut OCILobLocator, charsets: CharSets, csfrm: u8,
    offset: u64, byte_amt: &mut u64, char_amt: &mut u64, buf: &mut [u8]
) -> Result<()> {
    let csid = charsets.for_form(csfrm);
    let byte_ptr = &mut *byte_amt as *mut u64;
    let char_ptr = &mut *char_amt as *mut u64;
    let status = ctx.call::<ep::LobRead2>("read from LOB", Policy::pass(&[OCI_NEED_DATA]), |f, err| f(
        svchp, err, locp, byte_ptr, char_ptr, offset, buf.as_mut_ptr() as *mut c_void, buf.len() as u64,
        OCI_ONE_PIECE, std::ptr::null_mut(), std::ptr::null_mut(), csid, csfrm
    ))?;
    if status == OCI_NEED_DATA {
        *byte_amt = 0;
        *char_amt = 0;
    }
    Ok(())
}

/**
Trims a LOB to `new_len`.

A locator that was never initialized cannot be trimmed, so it is made into an
empty temporary LOB of the given kind instead.
*/
pub unsafe fn lob_trim2(ctx: &ErrorContext, svchp: *mut OCISvcCtx, locp: *mut OCILobLocator, new_len: u64, kind: LobKind) -> Result<()> {
    let status = ctx.call::<ep::LobTrim2>("trim LOB", Policy::pass(&[OCI_INVALID_HANDLE]), |f, err| f(svchp, err, locp, new_len))?;
    if status == OCI_INVALID_HANDLE {
        return lob_create_temporary(ctx, svchp, locp, kind);
    }
    Ok(())
}

/// Writes all of `data` at `offset` in one piece. Returns the number of bytes written.
pub unsafe fn lob_write2(
    ctx: &ErrorContext, svchp: *mut OCISvcCtx, locp: *mut OCILobLocator, charsets: CharSets, csfrm: u8,
    offset: u64, data: &[u8]
) -> Result<u64> {
    let csid = charsets.for_form(csfrm);
    let mut byte_amt = data.len() as u64;
    let mut char_amt = 0u64;
    ctx.call::<ep::LobWrite2>("write to LOB", Policy::STRICT, |f, err| f(
        svchp, err, locp, &mut byte_amt, &mut char_amt, offset, data.as_ptr() as *mut c_void, data.len() as u64,
        OCI_ONE_PIECE, std::ptr::null_mut(), std::ptr::null_mut(), csid, csfrm
    ))?;
    Ok(byte_amt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn national_character_data_uses_the_ncharset() {
        let cs = CharSets { charset: AL32UTF8, ncharset: UTF16 };
        assert_eq!(cs.for_form(SQLCS_IMPLICIT), AL32UTF8);
        assert_eq!(cs.for_form(SQLCS_NCHAR), UTF16);
        assert_eq!(LobKind::NCLOB.csfrm, SQLCS_NCHAR);
        assert_eq!(LobKind::BLOB.lob_type, OCI_TEMP_BLOB);
    }
}
