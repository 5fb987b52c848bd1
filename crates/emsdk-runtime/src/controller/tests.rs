use super::*;
use async_trait::async_trait;
use emsdk_core::{ExecMode, ProcessFailure};
use mockall::{Sequence, mock};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

mock! {
    pub Runner {}

    #[async_trait]
    impl ProcessRunner for Runner {
        async fn run(&self, invocation: &CommandInvocation) -> Result<ProcessOutput, ProcessFailure>;
    }
}

const REPO: &str = "https://example.invalid/emsdk.git";

fn controller(path: &Path, runner: MockRunner) -> SdkController {
    SdkController::new(InstallPath::new(path).unwrap(), Arc::new(runner))
        .with_platform(Platform::Unix)
        .with_repo_url(REPO)
        .with_git("git")
}

fn ok() -> Result<ProcessOutput, ProcessFailure> {
    Ok(ProcessOutput::default())
}

fn seed_release(dir: &Path, tag: &str, hash: &str, active: &str) {
    fs::write(
        dir.join("emscripten-releases-tags.txt"),
        format!(r#"{{"latest": "{tag}", "releases": {{"{tag}": "{hash}"}}}}"#),
    )
    .unwrap();
    fs::create_dir_all(dir.join("upstream")).unwrap();
    fs::write(dir.join("upstream").join(".emsdk_version"), active).unwrap();
}

#[test]
fn clones_upstream_unless_told_otherwise() {
    let install = InstallPath::new("/opt/emsdk").unwrap();
    let sdk = SdkController::new(install.clone(), Arc::new(MockRunner::new()));
    assert_eq!(sdk.repo_url(), DEFAULT_SDK_REPO);

    let mirrored = SdkController::new(install, Arc::new(MockRunner::new()))
        .with_repo_url("https://mirror.example/emsdk.git");
    assert_eq!(mirrored.repo_url(), "https://mirror.example/emsdk.git");
}

#[tokio::test]
async fn checkout_is_a_noop_when_path_exists() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("emsdk.py"), "").unwrap();

    let mut runner = MockRunner::new();
    runner.expect_run().times(0);

    controller(dir.path(), runner).checkout(false).await.unwrap();
    assert!(dir.path().join("emsdk.py").exists());
}

#[tokio::test]
async fn checkout_clones_into_missing_path() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("nested").join("emsdk");
    let expected_path = target.to_string_lossy().into_owned();

    let mut runner = MockRunner::new();
    runner
        .expect_run()
        .withf(move |inv| {
            inv.mode == ExecMode::Argv
                && inv.program == "git"
                && inv.args == ["clone", REPO, expected_path.as_str()]
        })
        .times(1)
        .returning(|_| ok());

    controller(&target, runner).checkout(false).await.unwrap();
    assert!(dir.path().join("nested").is_dir());
}

#[tokio::test]
async fn forced_checkout_removes_existing_tree_first() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("emsdk");
    fs::create_dir(&target).unwrap();
    fs::write(target.join("emsdk.py"), "").unwrap();

    let mut runner = MockRunner::new();
    runner
        .expect_run()
        .withf(|inv| inv.args.first().map(String::as_str) == Some("clone"))
        .times(1)
        .returning(|_| ok());

    controller(&target, runner).checkout(true).await.unwrap();
    assert!(!target.exists());
}

#[tokio::test]
async fn install_skips_when_requested_hash_is_active() {
    let dir = tempdir().unwrap();
    seed_release(dir.path(), "v1", "H", "H\n");

    let mut runner = MockRunner::new();
    runner.expect_run().times(0);

    let sdk = controller(dir.path(), runner);
    assert!(sdk.is_installed(&"v1".into()));
    sdk.install(&"v1".into(), false).await.unwrap();
}

#[tokio::test]
async fn forced_install_ignores_active_marker() {
    let dir = tempdir().unwrap();
    seed_release(dir.path(), "v1", "H", "H");
    let script = dir.path().join("emsdk").to_string_lossy().into_owned();

    let mut runner = MockRunner::new();
    runner
        .expect_run()
        .withf(move |inv| inv.program == script && inv.args == ["install", "v1"])
        .times(1)
        .returning(|_| ok());

    controller(dir.path(), runner)
        .install(&"v1".into(), true)
        .await
        .unwrap();
}

#[tokio::test]
async fn install_checks_out_before_installing() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("emsdk");
    let mut seq = Sequence::new();

    let mut runner = MockRunner::new();
    runner
        .expect_run()
        .withf(|inv| inv.program == "git" && inv.args.first().map(String::as_str) == Some("clone"))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| ok());
    runner
        .expect_run()
        .withf(|inv| inv.program.ends_with("emsdk") && inv.args == ["install", "latest"])
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| ok());

    controller(&target, runner)
        .install(&SdkVersionTag::default(), false)
        .await
        .unwrap();
}

#[tokio::test]
async fn update_pulls_then_refreshes_tags() {
    let dir = tempdir().unwrap();
    let path = dir.path().to_string_lossy().into_owned();
    let mut seq = Sequence::new();

    let mut runner = MockRunner::new();
    runner
        .expect_run()
        .withf(move |inv| inv.program == "git" && inv.args == ["-C", path.as_str(), "pull"])
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| ok());
    runner
        .expect_run()
        .withf(|inv| inv.args == ["update-tags"])
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| ok());

    controller(dir.path(), runner).update().await.unwrap();
}

#[tokio::test]
async fn activate_goes_straight_to_the_sdk() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("missing");

    let mut runner = MockRunner::new();
    runner
        .expect_run()
        .withf(|inv| inv.args == ["activate", "3.1.0"])
        .times(1)
        .returning(|_| ok());

    controller(&target, runner)
        .activate(&"3.1.0".into())
        .await
        .unwrap();
}

#[tokio::test]
async fn windows_uses_batch_entry_script() {
    let dir = tempdir().unwrap();

    let mut runner = MockRunner::new();
    runner
        .expect_run()
        .withf(|inv| inv.program.ends_with("emsdk.bat"))
        .times(1)
        .returning(|_| ok());

    controller(dir.path(), runner)
        .with_platform(Platform::Windows)
        .activate(&SdkVersionTag::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn run_composes_env_chain_in_order() {
    let mut runner = MockRunner::new();
    runner
        .expect_run()
        .withf(|inv| {
            inv.mode == ExecMode::Shell
                && inv.program
                    == "cd /opt/emsdk && . /opt/emsdk/emsdk_env.sh && cd /work && echo hi"
                && inv.options.cwd.as_deref() == Some(Path::new("/work"))
        })
        .times(1)
        .returning(|_| ok());

    let options = RunOptions {
        cwd: Some(PathBuf::from("/work")),
        ..RunOptions::default()
    };
    controller(Path::new("/opt/emsdk"), runner)
        .run("echo", &["hi".to_string()], options)
        .await
        .unwrap();
}

#[tokio::test]
async fn run_requires_a_command() {
    let mut runner = MockRunner::new();
    runner.expect_run().times(0);

    let err = controller(Path::new("/opt/emsdk"), runner)
        .run("  ", &[], RunOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::EmptyCommand));
}

#[tokio::test]
async fn process_failures_keep_their_exit_code() {
    let mut runner = MockRunner::new();
    runner.expect_run().times(1).returning(|inv| {
        Err(ProcessFailure {
            program: inv.program.clone(),
            exit_code: Some(7),
            stderr: String::new(),
        })
    });

    let err = controller(Path::new("/opt/emsdk"), runner)
        .run("false", &[], RunOptions::default())
        .await
        .unwrap_err();
    match err {
        SdkError::Process(failure) => assert_eq!(failure.exit_status(), 7),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn remove_deletes_tree_and_tolerates_absence() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("emsdk");
    fs::create_dir_all(target.join("upstream")).unwrap();

    let mut runner = MockRunner::new();
    runner.expect_run().times(0);
    let sdk = controller(&target, runner);

    sdk.remove().await.unwrap();
    assert!(!target.exists());
    sdk.remove().await.unwrap();
}
