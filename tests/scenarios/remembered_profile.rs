//! Scenario: the profile used for one package is offered again later.

use std::fs;

use crate::common::SignEnv;

#[test]
fn signing_one_file_records_profile_for_next_run() {
    let env = SignEnv::new();
    env.apk("app.apk", "apk");
    let keystore = env.keystore();

    let first = env.run_with_env(
        &[
            "sign",
            "app.apk",
            "--keystore",
            keystore.to_str().unwrap(),
            "--alias",
            "release",
        ],
        &[("APKSIGN_STORE_PASSWORD", "storepw")],
    );
    assert!(first.success, "stderr:\n{}", first.stderr);

    // A fresh process reads the persisted registry.
    let suggest = env.run(&["suggest", "app.apk"]);
    assert!(suggest.success, "stderr:\n{}", suggest.stderr);
    assert!(suggest.stdout.contains("com.example.app"), "{}", suggest.stdout);
    assert!(suggest.stdout.contains("release.jks"), "{}", suggest.stdout);

    // No passwords on screen or in the suggestion.
    assert!(!suggest.stdout.contains("storepw"));

    fs::remove_file(env.path("app-signed.apk")).unwrap();
    let second = env.run(&["sign", "app.apk"]);
    assert!(second.success, "stderr:\n{}", second.stderr);
    assert!(second.stderr.contains("Using recorded profile for com.example.app"));
    assert!(env.path("app-signed.apk").exists());
}

#[test]
fn batch_of_two_records_nothing() {
    let env = SignEnv::new();
    env.apk("one.apk", "apk");
    env.apk("two.apk", "apk");
    let keystore = env.keystore();

    let result = env.run_with_env(
        &[
            "sign",
            "one.apk",
            "two.apk",
            "--keystore",
            keystore.to_str().unwrap(),
            "--alias",
            "release",
        ],
        &[("APKSIGN_STORE_PASSWORD", "storepw")],
    );
    assert!(result.success, "stderr:\n{}", result.stderr);

    let list = env.run(&["profile", "list"]);
    assert!(list.success, "stderr:\n{}", list.stderr);
    assert!(list.stdout.contains("No profiles recorded."), "{}", list.stdout);
}

#[test]
fn profile_put_get_remove() {
    let env = SignEnv::new();
    let keystore = env.keystore();

    let put = env.run(&[
        "profile",
        "put",
        "com.example.app",
        "--keystore",
        keystore.to_str().unwrap(),
        "--alias",
        "upload",
        "--store-password",
        "storepw",
    ]);
    assert!(put.success, "stderr:\n{}", put.stderr);

    let get = env.run(&["--json", "profile", "get", "com.example.app"]);
    assert!(get.success, "stderr:\n{}", get.stderr);
    let json: serde_json::Value = serde_json::from_str(get.stdout.trim()).unwrap();
    assert_eq!(json["alias"], "upload");
    assert!(json.get("store_password").is_none());

    let remove = env.run(&["profile", "remove", "com.example.app"]);
    assert!(remove.stdout.contains("Removed profile for com.example.app"));

    let get = env.run(&["profile", "get", "com.example.app"]);
    assert!(!get.success);
    assert!(get.stderr.contains("no profile recorded for com.example.app"));
}

#[test]
fn sign_without_keystore_or_record_fails() {
    let env = SignEnv::new();
    env.apk("app.apk", "apk");

    let result = env.run(&["sign", "app.apk"]);
    assert!(!result.success);
    assert!(
        result.stderr.contains("no profile recorded for com.example.app"),
        "{}",
        result.stderr
    );
}

#[test]
fn corrupted_registry_is_an_error() {
    let env = SignEnv::new();
    fs::write(env.registry_path(), "this is not toml = = =").unwrap();

    let result = env.run(&["profile", "list"]);
    assert!(!result.success);
    assert!(
        result.stderr.contains("registry file corrupted"),
        "stderr:\n{}",
        result.stderr
    );
    // The broken file is left for the user to inspect.
    assert_eq!(
        fs::read_to_string(env.registry_path()).unwrap(),
        "this is not toml = = ="
    );
}
