//! Scenario: sign a batch where one file is broken.

use std::fs;
use std::sync::Arc;

use apksign::domain::ports::RecordingEventSink;
use apksign::infrastructure::{AndroidBuildTools, SystemProcessRunner};
use apksign::{
    BatchSignUseCase, CancellationToken, FailureKind, Outcome, SchemeVersion, SignOptions,
    SignProfile, SignRequest,
};

use crate::common::{FakeTools, SignEnv};

fn use_case(tools: &FakeTools) -> BatchSignUseCase {
    BatchSignUseCase::new(
        Arc::new(SystemProcessRunner::new()),
        Arc::new(AndroidBuildTools::new(tools.zipalign(), tools.apksigner())),
    )
}

#[test]
fn one_broken_file_fails_only_itself() {
    let env = SignEnv::new();
    let good = env.apk("good.apk", "apk bytes");
    let broken = env.apk("broken.apk", "CORRUPT");
    let profile = SignProfile::new(env.keystore(), "release", "storepw", "keypw");
    let request = SignRequest::new(vec![good.clone(), broken.clone()], profile);

    let events = RecordingEventSink::new();
    let report = use_case(&env.tools).execute(&request, &events, &CancellationToken::new());

    assert_eq!(report.outcomes.len(), 2);
    let signed = env.path("good-signed.apk");
    assert_eq!(report.outcomes[0], Outcome::Succeeded(signed.clone()));
    assert_eq!(fs::read_to_string(&signed).unwrap(), "apk bytes");

    let failure = report.outcomes[1].failure().unwrap();
    assert_eq!(failure.kind(), FailureKind::ProcessExecutionFailed);
    assert!(failure.message().contains("not a valid APK"));
    assert!(!env.path("broken-signed.apk").exists());

    let merged = report.merged().unwrap();
    let message = merged.failure().unwrap().message().to_string();
    assert_eq!(message.lines().count(), 1);
    assert!(message.starts_with(&format!("{}: ", broken.display())));

    // Tool output reached the sink line by line.
    assert!(events.lines_for(0).iter().any(|l| l == "Signed"));
}

#[test]
fn parallel_batch_writes_into_output_dir() {
    let env = SignEnv::new();
    let files: Vec<_> = (0..4)
        .map(|i| env.apk(&format!("app{}.apk", i), &format!("apk {}", i)))
        .collect();
    let out = env.path("dist/release");
    let options = SignOptions::new()
        .with_output_dir(&out)
        .with_parallelism(3)
        .with_schemes([SchemeVersion::V2, SchemeVersion::V4].into_iter().collect());
    let profile = SignProfile::new(env.keystore(), "release", "storepw", "keypw");
    let request = SignRequest::new(files, profile).with_options(options);

    let report = use_case(&env.tools).execute(
        &request,
        &RecordingEventSink::new(),
        &CancellationToken::new(),
    );

    assert!(report.is_success(), "{:?}", report.outcomes);
    for i in 0..4 {
        let signed = out.join(format!("app{}-signed.apk", i));
        assert_eq!(report.outcomes[i], Outcome::Succeeded(signed.clone()));
        assert_eq!(fs::read_to_string(&signed).unwrap(), format!("apk {}", i));
        assert!(out.join(format!("app{}-signed.apk.idsig", i)).exists());
    }
    let leftovers: Vec<_> = fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".part"))
        .collect();
    assert!(leftovers.is_empty(), "{:?}", leftovers);
}

#[test]
fn missing_tool_is_launch_failure() {
    let env = SignEnv::new();
    let apk = env.apk("app.apk", "apk");
    let use_case = BatchSignUseCase::new(
        Arc::new(SystemProcessRunner::new()),
        Arc::new(AndroidBuildTools::new(
            env.path("no-such-zipalign"),
            env.tools.apksigner(),
        )),
    );
    let profile = SignProfile::new(env.keystore(), "release", "storepw", "keypw");

    let report = use_case.execute(
        &SignRequest::new(vec![apk], profile),
        &RecordingEventSink::new(),
        &CancellationToken::new(),
    );

    assert_eq!(
        report.outcomes[0].failure().unwrap().kind(),
        FailureKind::ProcessLaunchFailed
    );
}

#[test]
fn cli_sign_prints_output_and_fails_on_broken_file() {
    let env = SignEnv::new();
    env.apk("good.apk", "apk");
    env.apk("broken.apk", "CORRUPT");
    let keystore = env.keystore();

    let result = env.run_with_env(
        &[
            "sign",
            "good.apk",
            "--keystore",
            keystore.to_str().unwrap(),
            "--alias",
            "release",
            "--no-remember",
        ],
        &[("APKSIGN_STORE_PASSWORD", "storepw")],
    );
    assert!(result.success, "stderr:\n{}", result.stderr);
    assert!(result.stdout.contains("good-signed.apk"), "{}", result.stdout);

    let result = env.run_with_env(
        &[
            "sign",
            "good.apk",
            "broken.apk",
            "--keystore",
            keystore.to_str().unwrap(),
            "--alias",
            "release",
        ],
        &[("APKSIGN_STORE_PASSWORD", "storepw")],
    );
    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("broken.apk: "), "{}", result.stderr);
    assert!(result.stderr.contains("not a valid APK"), "{}", result.stderr);
}

#[test]
fn cli_sign_json_events() {
    let env = SignEnv::new();
    env.apk("app.apk", "apk");
    let keystore = env.keystore();

    let result = env.run_with_env(
        &[
            "--json",
            "sign",
            "app.apk",
            "--no-align",
            "--scheme",
            "v2",
            "--keystore",
            keystore.to_str().unwrap(),
            "--alias",
            "release",
            "--no-remember",
        ],
        &[("APKSIGN_STORE_PASSWORD", "storepw")],
    );
    assert!(result.success, "stderr:\n{}", result.stderr);

    let events: Vec<serde_json::Value> = result
        .stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(events.first().unwrap()["event"], "start");
    assert_eq!(events.first().unwrap()["schemes"], serde_json::json!(["v2"]));
    assert!(events.iter().all(|e| e["step"] != "align"));
    assert_eq!(events.last().unwrap()["event"], "complete");
    assert_eq!(events.last().unwrap()["status"], "success");
}

#[test]
fn cli_reports_unconfigured_tool() {
    let env = SignEnv::new();
    env.apk("app.apk", "apk");
    let keystore = env.keystore();
    let missing = env.path("missing/apksigner");

    let result = env.run_with_env(
        &[
            "sign",
            "app.apk",
            "--keystore",
            keystore.to_str().unwrap(),
            "--alias",
            "release",
        ],
        &[
            ("APKSIGN_STORE_PASSWORD", "storepw"),
            ("APKSIGN_APKSIGNER", missing.to_str().unwrap()),
        ],
    );
    assert!(!result.success);
    assert!(
        result.stderr.contains("apksigner is not configured"),
        "{}",
        result.stderr
    );
}
