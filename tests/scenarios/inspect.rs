//! Scenario: inspect signatures of signed and unsigned files.

use crate::common::SignEnv;

#[test]
fn inspect_prints_certificates() {
    let env = SignEnv::new();
    env.apk("app.apk", "signed apk");

    let result = env.run(&["inspect", "app.apk"]);
    assert!(result.success, "stderr:\n{}", result.stderr);
    assert!(result.stdout.contains("== app.apk =="), "{}", result.stdout);
    assert!(result.stdout.contains("Signer #1 certificate DN: CN=Fake Release"));
}

#[test]
fn inspect_fails_for_unsigned_file() {
    let env = SignEnv::new();
    env.apk("app.apk", "signed apk");
    env.apk("raw.apk", "UNSIGNED");

    let result = env.run(&["inspect", "app.apk", "raw.apk"]);
    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("raw.apk: "), "{}", result.stderr);
    assert!(result.stderr.contains("DOES NOT VERIFY"), "{}", result.stderr);
}
