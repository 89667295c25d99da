use ocilink::*;

#[test]
fn check_client_version() -> Result<()> {
    let rt = match Runtime::load(&LoadParams::new()) {
        Ok(rt) => rt,
        Err(err) => {
            println!("Oracle Client is not installed: {err}");
            return Ok(());
        }
    };
    let client_version = rt.version();
    if let Ok(path) = std::env::var("LD_LIBRARY_PATH").or_else(|_| std::env::var("LIBRARY_PATH")) {
        let items : Vec<&str> = path.split('_').collect();
        if items.len() >= 2 {
            if let (Ok(release), Ok(update)) = (items[items.len() - 2].parse::<i32>(), items[items.len() - 1].parse::<i32>()) {
                assert_eq!(release, client_version.version);
                assert_eq!(update, client_version.release);
            }
        }
    } else {
        println!("client version = {client_version}");
    }
    Ok(())
}

#[test]
fn load_failure_names_the_help_page() {
    let dir = tempfile::tempdir().unwrap();
    let err = Runtime::load(&LoadParams::new().lib_dir(dir.path())).unwrap_err();
    assert!(matches!(err, Error::LoadLibrary(_)));
    let msg = err.to_string();
    let bits = if cfg!(target_pointer_width = "64") { "64-bit" } else { "32-bit" };
    assert!(msg.contains(bits), "{}", msg);
    assert!(msg.ends_with(&format!("See {} for help", DEFAULT_ERROR_URL)), "{}", msg);
}

#[test]
fn failed_init_can_be_retried() {
    let dir = tempfile::tempdir().unwrap();
    let params = LoadParams::new().lib_dir(dir.path());
    if init(&params).is_err() {
        // nothing was cached, so the next attempt searches again
        assert!(init(&params).is_err());
    }
}
