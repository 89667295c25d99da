mod common;

use std::{ptr, sync::Arc};
use ocilink::{oci, Entry, Environment, Error, LoadParams, Runtime};
use common::*;

fn runtime(version: [i32; 5]) -> Arc<Runtime> {
    init_logging();
    reset_client(version);
    let loader = FakeLoader::new().loadable("libclntsh.so").hide("OCIVectorToArray");
    Runtime::load_with(&loader, &LoadParams::new()).unwrap()
}

#[test]
fn native_errors_carry_code_message_and_action() {
    let rt = runtime([19, 3, 0, 0, 0]);
    let oracle = Environment::new(&rt).unwrap();
    let ctx = oracle.error_context();

    let err = unsafe {
        oci::session_begin(&ctx, ptr::null_mut(), ptr::null_mut(), oci::OCI_DEFAULT, oci::OCI_DEFAULT)
    }.unwrap_err();
    assert_eq!(err.code(), 1017);
    assert_eq!(err.to_string(), "ORA-01017: invalid username/password; logon denied");
    let info = err.info().unwrap();
    assert_eq!(info.action, "begin session");
    assert_eq!(info.entry, "OCISessionBegin");
}

#[test]
fn ping_of_old_servers_succeeds() {
    let rt = runtime([19, 3, 0, 0, 0]);
    let oracle = Environment::new(&rt).unwrap();
    let ctx = oracle.error_context();
    assert!(unsafe { oci::ping(&ctx, ptr::null_mut()) }.is_ok());
}

#[test]
fn records_are_freed_once() {
    let rt = runtime([19, 3, 0, 0, 0]);
    let oracle = Environment::new(&rt).unwrap();
    let ctx = oracle.error_context();

    let res = unsafe { oci::object_free(&ctx, ptr::null_mut(), true) };
    assert!(res.is_ok());
    assert_eq!(client_state().object_free_calls, 1);
}

#[test]
fn trim_of_invalid_locator_creates_temporary_lob() {
    let rt = runtime([19, 3, 0, 0, 0]);
    let oracle = Environment::new(&rt).unwrap();
    let ctx = oracle.error_context();

    let res = unsafe { oci::lob_trim2(&ctx, ptr::null_mut(), ptr::null_mut(), 0, oci::LobKind::CLOB) };
    assert!(res.is_ok());
    assert_eq!(client_state().lob_temp_calls, 1);
}

#[test]
fn end_of_fetch_is_not_an_error() {
    let rt = runtime([19, 3, 0, 0, 0]);
    let oracle = Environment::new(&rt).unwrap();
    let ctx = oracle.error_context();

    let more = unsafe { oci::stmt_fetch2(&ctx, ptr::null_mut(), 1, oci::OCI_FETCH_NEXT, 0) }.unwrap();
    assert!(!more);
}

#[test]
fn empty_collection_has_no_data_guide() {
    let rt = runtime([19, 3, 0, 0, 0]);
    let oracle = Environment::new(&rt).unwrap();
    let ctx = oracle.error_context();

    let doc = unsafe { oci::soda_data_guide_get(&ctx, ptr::null_mut(), ptr::null(), oci::OCI_DEFAULT) }.unwrap();
    assert!(doc.is_null());
}

#[test]
fn missing_entry_point_is_reported_and_retried() {
    let rt = runtime([23, 7, 0, 0, 0]);
    let oracle = Environment::new(&rt).unwrap();
    let ctx = oracle.error_context();

    assert!(!rt.is_available(Entry::VectorToArray));
    let data = oci::VectorData { format: oci::OCI_ATTR_VECTOR_FORMAT_FLOAT32, num_dimensions: 0, dimensions: ptr::null_mut() };
    for _ in 0..2 {
        let lookups = rt.lookup_count();
        let err = unsafe { oci::vector_to_array(&ctx, ptr::null_mut(), &data) }.unwrap_err();
        assert_eq!(err, Error::NotAvailable("OCIVectorToArray"));
        assert_eq!(err.code(), 0);
        assert_eq!(rt.lookup_count(), lookups + 1);
    }
}

#[test]
fn sparse_vectors_need_a_recent_client() {
    let rt = runtime([23, 6, 0, 0, 0]);
    let oracle = Environment::new(&rt).unwrap();
    let ctx = oracle.error_context();

    let data = oci::VectorData { format: oci::OCI_ATTR_VECTOR_FORMAT_FLOAT32, num_dimensions: 0, dimensions: ptr::null_mut() };
    let sparse = oci::SparseData { num_sparse_values: 0, indices: ptr::null_mut() };
    let err = unsafe { oci::vector_from_sparse_array(&ctx, ptr::null_mut(), &data, &sparse) }.unwrap_err();
    assert_eq!(err, Error::ClientTooOld { required: (23, 7), actual: (23, 6) });
}

#[test]
fn handles_are_freed_with_their_owners() {
    let rt = runtime([19, 3, 0, 0, 0]);
    let oracle = Environment::new(&rt).unwrap();
    let ctx = oracle.error_context();
    assert!(unsafe { oci::ping(&ctx, ptr::null_mut()) }.is_ok());
    assert_eq!(client_state().handles_allocated, 1);

    drop(ctx);
    drop(oracle);
    let state = client_state();
    assert_eq!(state.handles_freed, 2);
}

#[test]
fn error_handle_is_allocated_on_first_use() {
    let rt = runtime([19, 3, 0, 0, 0]);
    let oracle = Environment::new(&rt).unwrap();
    let ctx = oracle.error_context();
    assert_eq!(client_state().handles_allocated, 0);
    let first = ctx.error_handle().unwrap();
    let second = ctx.error_handle().unwrap();
    assert_eq!(first, second);
    assert_eq!(client_state().handles_allocated, 1);
}

#[test]
fn failures_without_diagnostics_have_no_native_code() {
    let rt = runtime([19, 3, 0, 0, 0]);
    let oracle = Environment::new(&rt).unwrap();
    let ctx = oracle.error_context();

    let err = unsafe { oci::break_execution(&ctx, ptr::null_mut()) }.unwrap_err();
    assert_eq!(err.code(), 0);
    assert!(err.info().is_none());
    let msg = err.to_string();
    assert!(!msg.starts_with("ORA-"), "{}", msg);
    assert_eq!(msg, "break execution: Invalid Handle (OCIBreak returned -2)");
}

#[test]
fn success_with_info_is_success() {
    let rt = runtime([19, 3, 0, 0, 0]);
    let oracle = Environment::new(&rt).unwrap();
    let ctx = oracle.error_context();
    assert!(unsafe { oci::stmt_execute(&ctx, ptr::null_mut(), ptr::null_mut(), 1, oci::OCI_DEFAULT) }.is_ok());
}

#[test]
fn piecewise_lob_read_reports_nothing_read() {
    let rt = runtime([19, 3, 0, 0, 0]);
    let oracle = Environment::new(&rt).unwrap();
    let ctx = oracle.error_context();

    let mut buf = [0u8; 16];
    let mut byte_amt = 16u64;
    let mut char_amt = 0u64;
    let res = unsafe {
        oci::lob_read2(&ctx, ptr::null_mut(), ptr::null_mut(), oracle.charsets(), oci::SQLCS_IMPLICIT, 1, &mut byte_amt, &mut char_amt, &mut buf)
    };
    assert!(res.is_ok());
    assert_eq!((byte_amt, char_amt), (0, 0));
}

#[test]
fn cleanup_failures_are_only_reported_when_checked() {
    let rt = runtime([19, 3, 0, 0, 0]);
    let oracle = Environment::new(&rt).unwrap();
    let ctx = oracle.error_context();

    assert!(unsafe { oci::session_end(&ctx, ptr::null_mut(), ptr::null_mut(), false) }.is_ok());
    let err = unsafe { oci::session_end(&ctx, ptr::null_mut(), ptr::null_mut(), true) }.unwrap_err();
    assert_eq!(err.code(), 3113);
    assert_eq!(err.info().map(|info| info.action), Some("end session"));
}

#[test]
fn fetch_of_last_row_ignores_errors() {
    let rt = runtime([19, 3, 0, 0, 0]);
    let oracle = Environment::new(&rt).unwrap();
    let ctx = oracle.error_context();

    let more = unsafe { oci::stmt_fetch2(&ctx, ptr::null_mut(), 1, oci::OCI_FETCH_LAST, 0) }.unwrap();
    assert!(!more);
}

fn bind_and_define(version: [i32; 5]) -> Vec<&'static str> {
    let rt = runtime(version);
    let oracle = Environment::new(&rt).unwrap();
    let ctx = oracle.error_context();
    // SQLT_CHR
    let var = oci::VarBuffer::new(1, 32);
    unsafe {
        oci::bind_by_name(&ctx, ptr::null_mut(), ptr::null_mut(), b":name", false, &var).unwrap();
        oci::define_by_pos(&ctx, ptr::null_mut(), ptr::null_mut(), 1, &var).unwrap();
    }
    client_state().calls
}

#[test]
fn bind_and_define_generation_follows_client_version() {
    assert_eq!(bind_and_define([11, 2, 0, 4, 0]), vec!["OCIBindByName", "OCIDefineByPos"]);
    assert_eq!(bind_and_define([12, 1, 0, 2, 0]), vec!["OCIBindByName2", "OCIDefineByPos2"]);
    assert_eq!(bind_and_define([23, 7, 0, 0, 0]), vec!["OCIBindByName2", "OCIDefineByPos2"]);
}

#[test]
fn oversized_buffers_report_the_largest_size() {
    let rt = runtime([19, 3, 0, 0, 0]);
    let oracle = Environment::new(&rt).unwrap();
    let ctx = oracle.error_context();

    let mut buf = vec![0u8; 65536];
    let len = unsafe { oci::rowid_to_char(&ctx, ptr::null_mut(), &mut buf) }.unwrap();
    assert_eq!(len, 18);
    assert_eq!(&buf[..18], b"AAAR3sAAEAAAACXAAA");
    assert_eq!(client_state().rowid_buf_size, Some(u16::MAX));

    // an empty buffer only asks for the length
    let len = unsafe { oci::rowid_to_char(&ctx, ptr::null_mut(), &mut []) }.unwrap();
    assert_eq!(len, 18);
    assert_eq!(client_state().rowid_buf_size, Some(0));

    let mut dir = vec![0u8; 70000];
    let mut name = [0u8; 10];
    let (mut dir_len, mut name_len) = (0u16, 0u16);
    unsafe { oci::lob_file_get_name(&ctx, ptr::null(), &mut dir, &mut dir_len, &mut name, &mut name_len) }.unwrap();
    assert_eq!(client_state().file_name_caps, Some((u16::MAX, 10)));
}

#[test]
fn overlong_file_names_are_rejected() {
    let rt = runtime([19, 3, 0, 0, 0]);
    let oracle = Environment::new(&rt).unwrap();
    let ctx = oracle.error_context();

    let dir = vec![b'D'; 70000];
    let err = unsafe { oci::lob_file_set_name(&ctx, ptr::null_mut(), &dir, b"file.txt") }.unwrap_err();
    assert_eq!(err.code(), 0);
}

#[test]
fn environment_attributes_share_one_error_handle() {
    let rt = runtime([19, 3, 0, 0, 0]);
    let oracle = Environment::new(&rt).unwrap();

    oracle.max_cache_size().unwrap();
    oracle.optimal_cache_size().unwrap();
    oracle.set_cache_max_size(10).unwrap();
    let state = client_state();
    assert_eq!(state.handles_allocated, 1);
    assert_eq!(state.handles_freed, 0);
}
