//! Datetime, interval, NUMBER, RAW, string, rowid, NLS, vector and JSON data

use std::{ffi::CStr, ptr};
use libc::{c_void, size_t};
use crate::{Result, Error, env::Runtime, oci::{*, dispatch::Policy, entry::ep}};

pub const JZN_INPUT_UTF8                 : u16 = 1;
pub const JZN_ALLOW_SCALAR_DOCUMENTS     : u32 = 0x0080_0000;

fn env_hndl(ctx: &ErrorContext) -> *mut c_void {
    ctx.env() as *mut c_void
}

/// Date and time components of a datetime descriptor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateTimeParts {
    pub year: i16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub fsecond: u32,
}

/// Sets all components of a datetime descriptor. An empty `tz` uses the session time zone.
pub unsafe fn date_time_construct(ctx: &ErrorContext, dtp: *mut OCIDateTime, parts: &DateTimeParts, tz: &[u8]) -> Result<()> {
    let tz_ptr = if tz.is_empty() { ptr::null() } else { tz.as_ptr() };
    ctx.call::<ep::DateTimeConstruct>("construct date", Policy::STRICT, |f, err| f(
        env_hndl(ctx), err, dtp, parts.year, parts.month, parts.day, parts.hour, parts.minute, parts.second, parts.fsecond,
        tz_ptr, tz.len()
    ))?;
    Ok(())
}

pub unsafe fn date_time_convert(ctx: &ErrorContext, src: *mut OCIDateTime, dst: *mut OCIDateTime) -> Result<()> {
    ctx.call::<ep::DateTimeConvert>("convert date", Policy::STRICT, |f, err| f(env_hndl(ctx), err, src, dst))?;
    Ok(())
}

/// Returns the date and time components of a datetime descriptor.
pub unsafe fn date_time_get(ctx: &ErrorContext, dtp: *mut OCIDateTime) -> Result<DateTimeParts> {
    let mut parts = DateTimeParts::default();
    date_time_get_date(ctx, dtp, &mut parts)?;
    date_time_get_time(ctx, dtp, &mut parts)?;
    Ok(parts)
}

pub unsafe fn date_time_get_date(ctx: &ErrorContext, dtp: *const OCIDateTime, parts: &mut DateTimeParts) -> Result<()> {
    ctx.call::<ep::DateTimeGetDate>("get date portion", Policy::STRICT, |f, err| f(
        env_hndl(ctx), err, dtp, &mut parts.year, &mut parts.month, &mut parts.day
    ))?;
    Ok(())
}

pub unsafe fn date_time_get_time(ctx: &ErrorContext, dtp: *mut OCIDateTime, parts: &mut DateTimeParts) -> Result<()> {
    ctx.call::<ep::DateTimeGetTime>("get time portion", Policy::STRICT, |f, err| f(
        env_hndl(ctx), err, dtp, &mut parts.hour, &mut parts.minute, &mut parts.second, &mut parts.fsecond
    ))?;
    Ok(())
}

/// Returns the time zone offset as hours and minutes.
pub unsafe fn date_time_get_time_zone_offset(ctx: &ErrorContext, dtp: *const OCIDateTime) -> Result<(i8, i8)> {
    let mut hours = 0i8;
    let mut minutes = 0i8;
    ctx.call::<ep::DateTimeGetTimeZoneOffset>("get time zone portion", Policy::STRICT, |f, err| f(env_hndl(ctx), err, dtp, &mut hours, &mut minutes))?;
    Ok((hours, minutes))
}

pub unsafe fn date_time_interval_add(ctx: &ErrorContext, dtp: *mut OCIDateTime, intvp: *mut OCIInterval, out: *mut OCIDateTime) -> Result<()> {
    ctx.call::<ep::DateTimeIntervalAdd>("add interval to date", Policy::STRICT, |f, err| f(env_hndl(ctx), err, dtp, intvp, out))?;
    Ok(())
}

pub unsafe fn date_time_subtract(ctx: &ErrorContext, dtp1: *mut OCIDateTime, dtp2: *mut OCIDateTime, out: *mut OCIInterval) -> Result<()> {
    ctx.call::<ep::DateTimeSubtract>("subtract date", Policy::STRICT, |f, err| f(env_hndl(ctx), err, dtp1, dtp2, out))?;
    Ok(())
}

/// Components of a DAY TO SECOND interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DaySecond {
    pub days: i32,
    pub hours: i32,
    pub minutes: i32,
    pub seconds: i32,
    pub fseconds: i32,
}

pub unsafe fn interval_get_day_second(ctx: &ErrorContext, intvp: *const OCIInterval) -> Result<DaySecond> {
    let mut ds = DaySecond::default();
    ctx.call::<ep::IntervalGetDaySecond>("get interval components", Policy::STRICT, |f, err| f(
        env_hndl(ctx), err, &mut ds.days, &mut ds.hours, &mut ds.minutes, &mut ds.seconds, &mut ds.fseconds, intvp
    ))?;
    Ok(ds)
}

/// Returns years and months of a YEAR TO MONTH interval.
pub unsafe fn interval_get_year_month(ctx: &ErrorContext, intvp: *const OCIInterval) -> Result<(i32, i32)> {
    let mut years = 0i32;
    let mut months = 0i32;
    ctx.call::<ep::IntervalGetYearMonth>("get interval components", Policy::STRICT, |f, err| f(env_hndl(ctx), err, &mut years, &mut months, intvp))?;
    Ok((years, months))
}

pub unsafe fn interval_set_day_second(ctx: &ErrorContext, ds: &DaySecond, intvp: *mut OCIInterval) -> Result<()> {
    ctx.call::<ep::IntervalSetDaySecond>("set interval components", Policy::STRICT, |f, err| f(
        env_hndl(ctx), err, ds.days, ds.hours, ds.minutes, ds.seconds, ds.fseconds, intvp
    ))?;
    Ok(())
}

pub unsafe fn interval_set_year_month(ctx: &ErrorContext, years: i32, months: i32, intvp: *mut OCIInterval) -> Result<()> {
    ctx.call::<ep::IntervalSetYearMonth>("set interval components", Policy::STRICT, |f, err| f(env_hndl(ctx), err, years, months, intvp))?;
    Ok(())
}

/// Converts a native integer of `size` bytes. `flags` is `OCI_NUMBER_SIGNED` or `OCI_NUMBER_UNSIGNED`.
pub unsafe fn number_from_int(ctx: &ErrorContext, value: *const c_void, size: u32, flags: u32, num: *mut OCINumber) -> Result<()> {
    ctx.call::<ep::NumberFromInt>("number from integer", Policy::STRICT, |f, err| f(err, value, size, flags, num))?;
    Ok(())
}

pub unsafe fn number_from_real(ctx: &ErrorContext, value: f64, num: *mut OCINumber) -> Result<()> {
    ctx.call::<ep::NumberFromReal>("number from real", Policy::STRICT, |f, err| f(
        err, &value as *const f64 as *const c_void, std::mem::size_of::<f64>() as u32, num
    ))?;
    Ok(())
}

pub unsafe fn number_to_int(ctx: &ErrorContext, num: *const OCINumber, value: *mut c_void, size: u32, flags: u32) -> Result<()> {
    ctx.call::<ep::NumberToInt>("number to integer", Policy::STRICT, |f, err| f(err, num, size, flags, value))?;
    Ok(())
}

pub unsafe fn number_to_real(ctx: &ErrorContext, num: *const OCINumber) -> Result<f64> {
    let mut value = 0f64;
    ctx.call::<ep::NumberToReal>("number to real", Policy::STRICT, |f, err| f(
        err, num, std::mem::size_of::<f64>() as u32, &mut value as *mut f64 as *mut c_void
    ))?;
    Ok(value)
}

pub unsafe fn raw_assign_bytes(ctx: &ErrorContext, value: &[u8], raw: *mut *mut OCIRaw) -> Result<()> {
    ctx.call::<ep::RawAssignBytes>("assign bytes to raw", Policy::STRICT, |f, err| f(ctx.env(), err, value.as_ptr(), value.len() as u32, raw))?;
    Ok(())
}

/// Returns the address of the RAW data.
pub unsafe fn raw_ptr(ctx: &ErrorContext, raw: *const OCIRaw) -> Result<*mut u8> {
    ctx.call_raw::<ep::RawPtr, _>(|f| f(ctx.env(), raw))
}

pub unsafe fn raw_resize(ctx: &ErrorContext, raw: *mut *mut OCIRaw, new_size: u32) -> Result<()> {
    ctx.call::<ep::RawResize>("resize raw", Policy::STRICT, |f, err| f(ctx.env(), err, new_size, raw))?;
    Ok(())
}

pub unsafe fn raw_size(ctx: &ErrorContext, raw: *const OCIRaw) -> Result<u32> {
    ctx.call_raw::<ep::RawSize, _>(|f| f(ctx.env(), raw))
}

pub unsafe fn string_assign_text(ctx: &ErrorContext, value: &[u8], s: *mut *mut OCIString) -> Result<()> {
    ctx.call::<ep::StringAssignText>("assign to string", Policy::STRICT, |f, err| f(ctx.env(), err, value.as_ptr(), value.len() as u32, s))?;
    Ok(())
}

/// Returns the address of the string text.
pub unsafe fn string_ptr(ctx: &ErrorContext, s: *const OCIString) -> Result<*mut u8> {
    ctx.call_raw::<ep::StringPtr, _>(|f| f(ctx.env(), s))
}

pub unsafe fn string_resize(ctx: &ErrorContext, s: *mut *mut OCIString, new_size: u32) -> Result<()> {
    ctx.call::<ep::StringResize>("resize string", Policy::STRICT, |f, err| f(ctx.env(), err, new_size, s))?;
    Ok(())
}

pub unsafe fn string_size(ctx: &ErrorContext, s: *const OCIString) -> Result<u32> {
    ctx.call_raw::<ep::StringSize, _>(|f| f(ctx.env(), s))
}

/**
Writes the text form of a rowid into `buf` and returns its length.

An empty `buf` is a length probe: the client reports the needed size and the
call succeeds whatever status comes back.
*/
pub unsafe fn rowid_to_char(ctx: &ErrorContext, rowid: *mut OCIRowid, buf: &mut [u8]) -> Result<u16> {
    let mut size = u16::try_from(buf.len()).unwrap_or(u16::MAX);
    let policy = Policy::best_effort(size != 0);
    let buf_ptr = if buf.is_empty() { ptr::null_mut() } else { buf.as_mut_ptr() };
    ctx.call::<ep::RowidToChar>("get rowid as string", policy, |f, err| f(rowid, buf_ptr, &mut size, err))?;
    Ok(size)
}

/// Converts `src` from one character set to another. Returns the number of bytes written to `dst`.
pub unsafe fn nls_char_set_convert(ctx: &ErrorContext, dst_cs: u16, dst: &mut [u8], src_cs: u16, src: &[u8]) -> Result<usize> {
    let mut size: size_t = 0;
    ctx.call::<ep::NlsCharSetConvert>("convert text", Policy::STRICT, |f, err| f(
        env_hndl(ctx), err, dst_cs, dst.as_mut_ptr() as *mut c_void, dst.len(), src_cs, src.as_ptr() as *const c_void, src.len(), &mut size
    ))?;
    Ok(size)
}

fn c_text(buf: &[u8]) -> String {
    match CStr::from_bytes_until_nul(buf) {
        Ok(text) => text.to_string_lossy().into_owned(),
        Err(_) => String::from_utf8_lossy(buf).into_owned(),
    }
}

/// Returns the Oracle name of a character set id.
pub unsafe fn nls_char_set_id_to_name(ctx: &ErrorContext, charset_id: u16) -> Result<String> {
    let mut buf = [0u8; 32];
    let status = ctx.call_raw::<ep::NlsCharSetIdToName, _>(|f| f(env_hndl(ctx), buf.as_mut_ptr(), buf.len(), charset_id))?;
    if status != OCI_SUCCESS {
        return Err( Error::msg(format!("character set id {} is not known", charset_id)) );
    }
    Ok(c_text(&buf))
}

/// Returns the id of an Oracle character set name. Unknown names map to 0.
pub unsafe fn nls_char_set_name_to_id(ctx: &ErrorContext, name: &CStr) -> Result<u16> {
    ctx.call_raw::<ep::NlsCharSetNameToId, _>(|f| f(env_hndl(ctx), name.as_ptr() as *const u8))
}

/// Reads the character set id the client derives from the NLS environment variables.
pub unsafe fn nls_environment_variable_get(rt: &Runtime, item: u16) -> Result<u16> {
    let mut value = 0u16;
    let mut ignored: size_t = 0;
    let status = rt.call_raw::<ep::NlsEnvironmentVariableGet, _>(|f| f(&mut value as *mut u16 as *mut c_void, 0, item, 0, &mut ignored))?;
    if status != OCI_SUCCESS {
        return Err( Error::msg(format!("{} failed", Entry::NlsEnvironmentVariableGet)) );
    }
    Ok(value)
}

/// Maps an Oracle NLS name to its IANA equivalent or back, as selected by `flag`.
pub unsafe fn nls_name_map(ctx: &ErrorContext, source: &CStr, flag: u32) -> Result<String> {
    let mut buf = [0u8; 64];
    let status = ctx.call_raw::<ep::NlsNameMap, _>(|f| f(env_hndl(ctx), buf.as_mut_ptr(), buf.len(), source.as_ptr() as *const u8, flag))?;
    if status != OCI_SUCCESS {
        return Err( Error::msg(format!("cannot map NLS name {:?}", source)) );
    }
    Ok(c_text(&buf))
}

pub unsafe fn nls_numeric_info_get(ctx: &ErrorContext, item: u16) -> Result<i32> {
    let mut value = 0i32;
    ctx.call::<ep::NlsNumericInfoGet>("get NLS info", Policy::STRICT, |f, err| f(env_hndl(ctx), err, &mut value, item))?;
    Ok(value)
}

/// Dense vector contents: element format, dimension count and element array.
#[derive(Debug, Clone, Copy)]
pub struct VectorData {
    pub format: u8,
    pub num_dimensions: u32,
    pub dimensions: *mut c_void,
}

/// Sparse vector contents in addition to the dense fields.
#[derive(Debug, Clone, Copy)]
pub struct SparseData {
    pub num_sparse_values: u32,
    pub indices: *mut c_void,
}

pub unsafe fn vector_from_array(ctx: &ErrorContext, vecp: *mut c_void, data: &VectorData) -> Result<()> {
    ctx.call::<ep::VectorFromArray>("vector from array", Policy::STRICT, |f, err| f(
        vecp, err, data.format, data.num_dimensions, data.dimensions, OCI_DEFAULT
    ))?;
    Ok(())
}

/// Fills a vector from sparse data. Needs an Oracle Client 23.7 or later.
pub unsafe fn vector_from_sparse_array(ctx: &ErrorContext, vecp: *mut c_void, data: &VectorData, sparse: &SparseData) -> Result<()> {
    ctx.version().require(23, 7)?;
    ctx.call::<ep::VectorFromSparseArray>("vector from array", Policy::STRICT, |f, err| f(
        vecp, err, data.format, data.num_dimensions, sparse.num_sparse_values, sparse.indices, data.dimensions, OCI_DEFAULT
    ))?;
    Ok(())
}

/// Copies vector elements into `data.dimensions`. Returns the number of dimensions.
pub unsafe fn vector_to_array(ctx: &ErrorContext, vecp: *mut c_void, data: &VectorData) -> Result<u32> {
    let mut num_dimensions = data.num_dimensions;
    ctx.call::<ep::VectorToArray>("vector to array", Policy::STRICT, |f, err| f(
        vecp, err, data.format, &mut num_dimensions, data.dimensions, OCI_DEFAULT
    ))?;
    Ok(num_dimensions)
}

/// Copies sparse vector contents out. Returns the number of sparse values. Needs an Oracle Client 23.7 or later.
pub unsafe fn vector_to_sparse_array(ctx: &ErrorContext, vecp: *mut c_void, data: &VectorData, sparse: &SparseData) -> Result<u32> {
    ctx.version().require(23, 7)?;
    let mut num_dimensions = data.num_dimensions;
    let mut num_sparse = sparse.num_sparse_values;
    ctx.call::<ep::VectorToSparseArray>("vector to sparse array", Policy::STRICT, |f, err| f(
        vecp, err, data.format, &mut num_dimensions, &mut num_sparse, sparse.indices, data.dimensions, OCI_DEFAULT
    ))?;
    Ok(num_sparse)
}

/// Returns the DOM document of a JSON descriptor.
pub unsafe fn json_dom_doc_get(ctx: &ErrorContext, svchp: *mut OCISvcCtx, jsonp: *mut c_void) -> Result<*mut c_void> {
    let mut doc: *mut c_void = ptr::null_mut();
    ctx.call::<ep::JsonDomDocGet>("get JSON DOM doc", Policy::STRICT, |f, err| f(svchp, jsonp, &mut doc, err, OCI_DEFAULT))?;
    Ok(doc)
}

/// Parses UTF-8 JSON text into a JSON descriptor. Scalar documents are always accepted.
pub unsafe fn json_text_buffer_parse(ctx: &ErrorContext, svchp: *mut OCISvcCtx, jsonp: *mut c_void, text: &[u8], flags: u32) -> Result<()> {
    ctx.call::<ep::JsonTextBufferParse>("parse JSON text", Policy::STRICT, |f, err| f(
        svchp as *mut c_void, jsonp, text.as_ptr() as *mut c_void, text.len() as u64,
        flags | JZN_ALLOW_SCALAR_DOCUMENTS, JZN_INPUT_UTF8, err, OCI_DEFAULT
    ))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_names_stop_at_nul() {
        let mut buf = [0u8; 16];
        buf[..8].copy_from_slice(b"AL32UTF8");
        assert_eq!(c_text(&buf), "AL32UTF8");
        assert_eq!(c_text(b"WE8ISO8859P1"), "WE8ISO8859P1");
    }
}
