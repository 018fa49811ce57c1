//! Flash attempt tests
//!
//! Drive the orchestrator against the scripted toolchain and check the state
//! it reaches, the events it emits, which toolchain verbs ran, and that no
//! workspace is left behind.


use keyflash::config::BOARD_TARGET;
use keyflash::services::{FlashOrchestrator, RecordingSink};
use keyflash::{
    AppEvent, BoardTarget, Credentials, FailedPhase, FlashOutcome, FlashPhase, FlashRequest,
    FlashState, FlasherError, Port,
};
use mock_toolchain::{MockResponse, MockToolchain, TEMPLATE};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::mpsc;

struct Fixture {
    _temp: TempDir,
    template: PathBuf,
    workspace_root: PathBuf,
    mock: Arc<MockToolchain>,
}

impl Fixture {
    fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let template = temp.path().join("main.ino");
        std::fs::write(&template, TEMPLATE).expect("Failed to write template");
        let workspace_root = temp.path().join("workspaces");
        std::fs::create_dir_all(&workspace_root).expect("Failed to create workspace root");

        Self {
            _temp: temp,
            template,
            workspace_root,
            mock: MockToolchain::new(),
        }
    }

    fn orchestrator(&self) -> FlashOrchestrator {
        FlashOrchestrator::new(
            self.mock.toolchain(),
            self.template.clone(),
            BoardTarget::default(),
        )
        .with_workspace_root(Some(self.workspace_root.clone()))
    }

    fn leftover_workspaces(&self) -> usize {
        std::fs::read_dir(&self.workspace_root)
            .expect("workspace root should exist")
            .count()
    }
}

fn request(username: &str, password: &str, port: &str) -> FlashRequest {
    FlashRequest::new(Credentials::new(username, password), Port::from(port))
}

#[tokio::test]
async fn test_successful_attempt() {
    let fixture = Fixture::new();
    let sink = RecordingSink::new();

    let outcome = fixture
        .orchestrator()
        .run(request("alice", "hunter2", "COM3"), &sink)
        .await
        .unwrap();

    assert!(outcome.is_success());
    assert_eq!(outcome.state(), FlashState::Done);
    assert_eq!(fixture.mock.verbs(), vec!["compile", "upload"]);

    let compiled = fixture.mock.compiled();
    assert_eq!(compiled.len(), 1);
    let workspace = &compiled[0].workspace;
    let calls = fixture.mock.calls();
    let dir = workspace.to_string_lossy().into_owned();
    assert_eq!(
        calls[0],
        vec!["compile", "--fqbn", BOARD_TARGET, dir.as_str()]
    );
    assert_eq!(
        calls[1],
        vec!["upload", "-p", "COM3", "--fqbn", BOARD_TARGET, dir.as_str()]
    );

    assert!(compiled[0].content.contains("const char *USERNAME = \"alice\";"));
    assert!(compiled[0].content.contains("const char *PASSWORD = \"hunter2\";"));
    assert!(!compiled[0].content.contains("{{"));

    assert!(!workspace.exists());
    assert_eq!(fixture.leftover_workspaces(), 0);

    assert_eq!(
        sink.phases(),
        vec![
            FlashPhase::Validating,
            FlashPhase::Staging,
            FlashPhase::Staging,
            FlashPhase::Compiling,
            FlashPhase::Compiling,
            FlashPhase::Uploading,
            FlashPhase::Cleanup,
            FlashPhase::Done,
        ]
    );
    let events = sink.events();
    assert!(events[1].message.contains("COM3"));
    assert!(events.last().unwrap().message.contains("Upload complete"));
}

#[tokio::test]
async fn test_empty_username_fails_validation() {
    let fixture = Fixture::new();
    let sink = RecordingSink::new();

    let outcome = fixture
        .orchestrator()
        .run(request("   ", "hunter2", "COM3"), &sink)
        .await
        .unwrap();

    assert_eq!(outcome.failed_phase(), Some(FailedPhase::Validation));
    assert!(matches!(
        outcome,
        FlashOutcome::Failed {
            error: FlasherError::Validation(_),
            ..
        }
    ));
    assert!(fixture.mock.calls().is_empty());
    assert_eq!(fixture.leftover_workspaces(), 0);
    assert_eq!(sink.count(FlashPhase::Staging), 0);
    assert_eq!(sink.count(FlashPhase::Cleanup), 0);
    assert_eq!(sink.phases().last(), Some(&FlashPhase::Failed));
}

#[tokio::test]
async fn test_empty_password_fails_validation() {
    let fixture = Fixture::new();
    let outcome = fixture
        .orchestrator()
        .run(request("alice", "", "COM3"), &RecordingSink::new())
        .await
        .unwrap();

    assert_eq!(outcome.failed_phase(), Some(FailedPhase::Validation));
    assert!(fixture.mock.calls().is_empty());
}

#[tokio::test]
async fn test_placeholder_port_fails_validation() {
    let fixture = Fixture::new();
    let orchestrator = fixture.orchestrator();

    for port in [Port::placeholder(), Port::from("")] {
        let outcome = orchestrator
            .run(
                FlashRequest::new(Credentials::new("alice", "hunter2"), port),
                &RecordingSink::new(),
            )
            .await
            .unwrap();
        assert_eq!(outcome.failed_phase(), Some(FailedPhase::Validation));
    }
    assert!(fixture.mock.calls().is_empty());
    assert_eq!(fixture.leftover_workspaces(), 0);
}

#[tokio::test]
async fn test_compile_failure_skips_upload_and_cleans_up() {
    let fixture = Fixture::new();
    fixture.mock.respond(
        "compile",
        MockResponse::fail(1, "main.ino:2:1: error: 'Keyboard' was not declared"),
    );
    let sink = RecordingSink::new();

    let outcome = fixture
        .orchestrator()
        .run(request("alice", "hunter2", "COM3"), &sink)
        .await
        .unwrap();

    assert_eq!(outcome.state(), FlashState::Failed(FailedPhase::Compile));
    match &outcome {
        FlashOutcome::Failed {
            error: FlasherError::Compile { exit_code, output },
            ..
        } => {
            assert_eq!(*exit_code, Some(1));
            assert!(output.contains("was not declared"));
        }
        other => panic!("Expected compile failure, got: {:?}", other),
    }
    assert_eq!(
        outcome.detail(),
        Some("main.ino:2:1: error: 'Keyboard' was not declared")
    );

    assert_eq!(fixture.mock.verbs(), vec!["compile"]);
    assert_eq!(sink.count(FlashPhase::Uploading), 0);
    assert_eq!(sink.count(FlashPhase::Cleanup), 1);
    assert!(!fixture.mock.compiled()[0].workspace.exists());
    assert_eq!(fixture.leftover_workspaces(), 0);

    let last = sink.events().pop().unwrap();
    assert_eq!(last.phase, FlashPhase::Failed);
    assert!(last.message.contains("was not declared"));
}

#[tokio::test]
async fn test_upload_failure_is_attributed_to_upload() {
    let fixture = Fixture::new();
    fixture.mock.respond(
        "upload",
        MockResponse::fail(2, "No device found on COM3"),
    );
    let sink = RecordingSink::new();

    let outcome = fixture
        .orchestrator()
        .run(request("alice", "hunter2", "COM3"), &sink)
        .await
        .unwrap();

    assert_eq!(outcome.failed_phase(), Some(FailedPhase::Upload));
    assert_eq!(outcome.detail(), Some("No device found on COM3"));
    assert_eq!(fixture.mock.verbs(), vec!["compile", "upload"]);
    assert_eq!(sink.count(FlashPhase::Cleanup), 1);
    assert_eq!(fixture.leftover_workspaces(), 0);
}

#[tokio::test]
async fn test_missing_toolchain_fails_compile_and_cleans_up() {
    let fixture = Fixture::new();
    fixture.mock.respond("compile", MockResponse::SpawnError);

    let outcome = fixture
        .orchestrator()
        .run(request("alice", "hunter2", "COM3"), &RecordingSink::new())
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        FlashOutcome::Failed {
            phase: FailedPhase::Compile,
            error: FlasherError::ToolchainInvocation(_),
        }
    ));
    assert_eq!(fixture.leftover_workspaces(), 0);
}

#[tokio::test]
async fn test_missing_template_fails_staging() {
    let fixture = Fixture::new();
    std::fs::remove_file(&fixture.template).unwrap();
    let sink = RecordingSink::new();

    let outcome = fixture
        .orchestrator()
        .run(request("alice", "hunter2", "COM3"), &sink)
        .await
        .unwrap();

    match outcome {
        FlashOutcome::Failed {
            phase: FailedPhase::Staging,
            error: FlasherError::TemplateNotFound(path),
        } => assert_eq!(path, fixture.template),
        other => panic!("Expected TemplateNotFound, got: {:?}", other),
    }
    assert!(fixture.mock.calls().is_empty());
    assert_eq!(fixture.leftover_workspaces(), 0);
}

#[tokio::test]
async fn test_sequential_attempts_are_independent() {
    let fixture = Fixture::new();
    let orchestrator = fixture.orchestrator();

    let first = orchestrator
        .run(request("alice", "first-secret", "COM3"), &RecordingSink::new())
        .await
        .unwrap();
    let second = orchestrator
        .run(request("bob", "second-secret", "COM4"), &RecordingSink::new())
        .await
        .unwrap();
    assert!(first.is_success());
    assert!(second.is_success());

    let compiled = fixture.mock.compiled();
    assert_eq!(compiled.len(), 2);
    assert_ne!(compiled[0].workspace, compiled[1].workspace);

    assert!(compiled[0].content.contains("alice"));
    assert!(compiled[0].content.contains("first-secret"));
    assert!(compiled[1].content.contains("bob"));
    assert!(compiled[1].content.contains("second-secret"));
    assert!(!compiled[1].content.contains("alice"));
    assert!(!compiled[1].content.contains("first-secret"));

    for sketch in &compiled {
        assert!(!sketch.workspace.exists());
    }
    assert_eq!(fixture.leftover_workspaces(), 0);
}

#[tokio::test]
async fn test_concurrent_attempt_is_rejected() {
    let fixture = Fixture::new();
    let gate = fixture.mock.gate_compile();
    let orchestrator = Arc::new(fixture.orchestrator());

    let running = {
        let orchestrator = orchestrator.clone();
        tokio::spawn(async move {
            orchestrator
                .run(request("alice", "hunter2", "COM3"), &RecordingSink::new())
                .await
        })
    };

    while fixture.mock.compiled().is_empty() {
        tokio::task::yield_now().await;
    }
    assert!(orchestrator.is_busy());

    let rejected = orchestrator
        .run(request("bob", "other", "COM4"), &RecordingSink::new())
        .await;
    assert!(matches!(rejected, Err(FlasherError::AttemptInProgress)));

    gate.notify_one();
    let outcome = running.await.unwrap().unwrap();
    assert!(outcome.is_success());
    assert!(!orchestrator.is_busy());
    // Only the first attempt reached the toolchain
    assert_eq!(fixture.mock.verbs(), vec!["compile", "upload"]);
}

#[tokio::test]
async fn test_spawned_attempt_posts_events_in_order() {
    let fixture = Fixture::new();
    let orchestrator = Arc::new(fixture.orchestrator());
    let (tx, mut rx) = mpsc::unbounded_channel();

    let handle = orchestrator.spawn(request("alice", "hunter2", "COM3"), tx);
    handle.await.unwrap().unwrap();

    let mut phases = Vec::new();
    let mut outcome = None;
    while let Ok(event) = rx.try_recv() {
        match event {
            AppEvent::Progress(event) => {
                assert!(outcome.is_none(), "progress after the outcome");
                phases.push(event.phase);
            }
            AppEvent::FlashFinished(finished) => outcome = Some(finished),
            other => panic!("Unexpected event: {:?}", other),
        }
    }

    assert_eq!(phases.first(), Some(&FlashPhase::Validating));
    assert_eq!(phases.last(), Some(&FlashPhase::Done));
    assert!(outcome.expect("outcome should be posted").is_success());
}
