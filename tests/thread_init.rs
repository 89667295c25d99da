// Threading initialization is process-wide state, so these checks run in a
// test binary of their own.
mod common;

use ocilink::{LoadParams, Runtime};
use common::*;

#[test]
fn threading_is_initialized_once_per_process() {
    init_logging();
    reset_client([19, 3, 0, 0, 0]);
    let loader = FakeLoader::new().loadable("libclntsh.so");

    let first = Runtime::load_with(&loader, &LoadParams::new()).unwrap();
    assert_eq!(client_state().process_init_calls, 1);

    let second = Runtime::load_with(&loader, &LoadParams::new()).unwrap();
    assert_eq!(client_state().process_init_calls, 1);

    drop(first);
    drop(second);
    let third = Runtime::load_with(&loader, &LoadParams::new()).unwrap();
    assert_eq!(third.version().version, 19);
    assert_eq!(client_state().process_init_calls, 1);
}
