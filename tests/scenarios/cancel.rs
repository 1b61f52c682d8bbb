//! Scenario: cancel a batch while apksigner is running.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use apksign::domain::ports::RecordingEventSink;
use apksign::infrastructure::{AndroidBuildTools, SystemProcessRunner};
use apksign::{
    BatchSignUseCase, CancellationToken, FailureKind, SignOptions, SignProfile, SignRequest,
};

use crate::common::{FakeTools, SignEnv};

#[test]
fn cancel_kills_running_signer_and_fails_every_file() {
    let env = SignEnv::new();
    let tools = FakeTools::slow();
    let files = vec![env.apk("one.apk", "apk"), env.apk("two.apk", "apk")];
    let profile = SignProfile::new(env.keystore(), "release", "storepw", "keypw");
    let request = SignRequest::new(files, profile)
        .with_options(SignOptions::new().with_zip_align(false));
    let use_case = BatchSignUseCase::new(
        Arc::new(SystemProcessRunner::new()),
        Arc::new(AndroidBuildTools::new(tools.zipalign(), tools.apksigner())),
    );

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(300));
        trigger.cancel();
    });

    let started = Instant::now();
    let report = use_case.execute(&request, &RecordingEventSink::new(), &cancel);
    canceller.join().unwrap();

    assert!(started.elapsed() < Duration::from_secs(10));
    for outcome in &report.outcomes {
        assert_eq!(outcome.failure().unwrap().kind(), FailureKind::Cancelled);
    }
    assert!(!env.path("one-signed.apk").exists());
    assert!(!env.path("two-signed.apk").exists());
    assert_eq!(
        report.merged().unwrap().failure().unwrap().kind(),
        FailureKind::Cancelled
    );
}
