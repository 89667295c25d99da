mod common;

use std::path::{Path, PathBuf};
use ocilink::{Error, LoadParams, Runtime, DEFAULT_ERROR_URL};
use common::*;

const V19: [i32; 5] = [19, 3, 0, 0, 0];

#[test]
fn search_order_without_lib_dir() {
    init_logging();
    reset_client(V19);
    let loader = FakeLoader::new()
        .with_module_dir("/opt/app/bin")
        .env("ORACLE_HOME", "/u01/app/oracle");

    let err = Runtime::load_with(&loader, &LoadParams::new()).unwrap_err();
    assert_eq!(loader.opened(), vec![
        Path::new("/opt/app/bin").join("libclntsh.so"),
        PathBuf::from("libclntsh.so"),
        PathBuf::from("libclntsh.so.19.1"),
        PathBuf::from("libclntsh.so.18.1"),
        Path::new("/u01/app/oracle").join("lib").join("libclntsh.so"),
    ]);

    let msg = err.to_string();
    assert!(matches!(err, Error::LoadLibrary(_)));
    assert!(msg.starts_with("cannot locate a "), "{}", msg);
    // the first failure of the whole search is quoted
    assert!(msg.contains(&format!("\"{}: cannot open", Path::new("/opt/app/bin").join("libclntsh.so").display())), "{}", msg);
    assert!(msg.ends_with(&format!("See {} for help", DEFAULT_ERROR_URL)), "{}", msg);
}

#[test]
fn oracle_home_is_skipped_where_the_os_does_not_search_it() {
    reset_client(V19);
    let mut loader = FakeLoader::new().env("ORACLE_HOME", "/u01/app/oracle");
    loader.searches_home = false;

    let err = Runtime::load_with(&loader, &LoadParams::new().error_url("https://example.com/help")).unwrap_err();
    assert_eq!(loader.opened().len(), 3);
    assert!(err.to_string().ends_with("See https://example.com/help for help"));
}

#[test]
fn empty_oracle_home_is_ignored() {
    reset_client(V19);
    let loader = FakeLoader::new().env("ORACLE_HOME", "");
    assert!(Runtime::load_with(&loader, &LoadParams::new()).is_err());
    assert_eq!(loader.opened().len(), 3);
}

#[test]
fn module_dir_wins_when_it_has_the_library() {
    reset_client(V19);
    let lib = Path::new("/opt/app/bin").join("libclntsh.so");
    let loader = FakeLoader::new()
        .with_module_dir("/opt/app/bin")
        .loadable(&lib)
        .loadable("libclntsh.so");

    let rt = Runtime::load_with(&loader, &LoadParams::new()).unwrap();
    assert_eq!(rt.lib_path(), lib);
    assert_eq!(loader.opened(), vec![lib.clone()]);
    assert_eq!(rt.load_attempts().len(), 1);
    assert_eq!(rt.load_attempts()[0].error, None);
    assert_eq!(rt.config_dir(), Some(Path::new("/opt/app/bin").join("network").join("admin").as_path()));
}

#[test]
fn lib_dir_is_searched_with_every_name() {
    reset_client(V19);
    let dir = Path::new("/opt/oracle/instantclient_19_3");
    let loader = FakeLoader::new()
        .with_module_dir("/opt/app/bin")
        .loadable(dir.join("libclntsh.so.19.1"))
        .loadable("libclntsh.so");

    let rt = Runtime::load_with(&loader, &LoadParams::new().lib_dir(dir)).unwrap();
    assert_eq!(rt.lib_path(), dir.join("libclntsh.so.19.1"));
    assert_eq!(loader.opened(), vec![dir.join("libclntsh.so"), dir.join("libclntsh.so.19.1")]);

    let attempts = rt.load_attempts();
    assert_eq!(attempts.len(), 2);
    assert!(attempts[0].error.is_some());
    assert!(attempts[1].error.is_none());
}

#[test]
fn first_failure_is_reported_when_every_name_fails() {
    reset_client(V19);
    let loader = FakeLoader::new();
    let dir = Path::new("/opt/oracle/empty");

    let err = Runtime::load_with(&loader, &LoadParams::new().lib_dir(dir)).unwrap_err();
    assert_eq!(loader.opened().len(), 3);
    let first = format!("\"{}: cannot open", dir.join("libclntsh.so").display());
    let last = dir.join("libclntsh.so.18.1").display().to_string();
    let msg = err.to_string();
    assert!(msg.contains(&first), "{}", msg);
    assert!(!msg.contains(&last), "{}", msg);
}

#[test]
fn lib_dir_does_not_fall_back_to_other_locations() {
    reset_client(V19);
    let loader = FakeLoader::new().loadable("libclntsh.so").env("ORACLE_HOME", "/u01");

    let err = Runtime::load_with(&loader, &LoadParams::new().lib_dir("/nowhere")).unwrap_err();
    assert!(matches!(err, Error::LoadLibrary(_)));
    assert!(loader.opened().iter().all(|path| path.starts_with("/nowhere")));
}

#[test]
fn config_dir_parameter_is_exported_before_loading() {
    reset_client(V19);
    let loader = FakeLoader::new()
        .loadable("libclntsh.so")
        .env("TNS_ADMIN", "/etc/old")
        .env("ORACLE_HOME", "/u01");

    let rt = Runtime::load_with(&loader, &LoadParams::new().config_dir("/etc/tns")).unwrap();
    assert_eq!(loader.vars.lock().get("TNS_ADMIN").map(|v| v.to_string_lossy().into_owned()), Some("/etc/tns".to_string()));
    assert_eq!(rt.config_dir(), Some(Path::new("/etc/tns")));
}

#[test]
fn config_dir_from_environment() {
    reset_client(V19);
    let loader = FakeLoader::new()
        .loadable("libclntsh.so")
        .with_module_dir("/opt/app/bin")
        .env("TNS_ADMIN", "/etc/tns")
        .env("ORACLE_HOME", "/u01");
    let rt = Runtime::load_with(&loader, &LoadParams::new()).unwrap();
    assert_eq!(rt.config_dir(), Some(Path::new("/etc/tns")));

    let loader = FakeLoader::new()
        .loadable("libclntsh.so")
        .env("TNS_ADMIN", "")
        .env("ORACLE_HOME", "/u01");
    let rt = Runtime::load_with(&loader, &LoadParams::new()).unwrap();
    assert_eq!(rt.config_dir(), Some(Path::new("/u01").join("network").join("admin").as_path()));

    let loader = FakeLoader::new().loadable("libclntsh.so");
    let rt = Runtime::load_with(&loader, &LoadParams::new()).unwrap();
    assert_eq!(rt.config_dir(), None);
}

#[test]
fn validation_reads_version_and_initializes_threading() {
    reset_client([21, 13, 0, 0, 0]);
    let loader = FakeLoader::new().loadable("libclntsh.so");

    let rt = Runtime::load_with(&loader, &LoadParams::new()).unwrap();
    assert_eq!(rt.version().to_string(), "21.13.0.0.0");
    assert_eq!(rt.version().full_version, 2_113_000_000);
    // other tests of this binary may have initialized threading already
    let inits = client_state().process_init_calls;
    assert!(inits <= 1);
    Runtime::load_with(&loader, &LoadParams::new()).unwrap();
    assert_eq!(client_state().process_init_calls, inits);
    // hot entry points are resolved up front
    let lookups = rt.lookup_count();
    assert!(rt.is_available(ocilink::Entry::AttrGet));
    assert!(rt.is_available(ocilink::Entry::ThreadKeyGet));
    assert_eq!(rt.lookup_count(), lookups);
}

#[test]
fn old_clients_are_rejected() {
    reset_client([10, 0, 0, 0, 0]);
    let loader = FakeLoader::new().loadable("libclntsh.so");
    assert!(matches!(Runtime::load_with(&loader, &LoadParams::new()), Err(Error::UnsupportedClient(_))));

    reset_client([11, 1, 0, 7, 0]);
    let loader = FakeLoader::new().loadable("libclntsh.so");
    match Runtime::load_with(&loader, &LoadParams::new()) {
        Err(Error::UnsupportedClient(msg)) => assert!(msg.contains("11.1"), "{}", msg),
        other => panic!("unexpected {:?}", other.map(|_| ())),
    }
    assert_eq!(client_state().process_init_calls, 0);

    reset_client([11, 2, 0, 4, 0]);
    assert!(Runtime::load_with(&loader, &LoadParams::new()).is_ok());
}

#[test]
fn libraries_without_client_version_are_rejected() {
    reset_client(V19);
    let loader = FakeLoader::new().loadable("libclntsh.so").hide("OCIClientVersion");
    let err = Runtime::load_with(&loader, &LoadParams::new()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedClient(_)));

    reset_client([0, 0, 0, 0, 0]);
    let loader = FakeLoader::new().loadable("libclntsh.so");
    let err = Runtime::load_with(&loader, &LoadParams::new()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedClient(_)));
}

#[test]
fn missing_hot_entry_point_fails_validation() {
    reset_client(V19);
    let loader = FakeLoader::new().loadable("libclntsh.so").hide("OCIThreadKeyGet");
    let err = Runtime::load_with(&loader, &LoadParams::new()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedClient(ref msg) if msg.contains("OCIThreadKeyGet")), "{}", err);
}
