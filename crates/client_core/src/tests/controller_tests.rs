use super::*;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use async_trait::async_trait;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    routing::post,
    Router,
};
use shared::protocol::{EXCEL_FILE_PART, TARGET_SEQUENCE_PART};
use tokio::{net::TcpListener, sync::mpsc};

use crate::{
    error::ErrorCategory,
    result_view::{render, ResultDisplay},
    transport::HttpTransport,
};

const SAMPLE_RESPONSE: &str = r#"{"dna_matching":{"best_match_name":"Alice","best_match_percentage":97.345},"dna_analysis":{"rmp":1.2,"cpi":3.4,"pi":5.6,"kinship_lr":7.8,"fsi":9.0}}"#;

struct ScriptedTransport {
    calls: AtomicUsize,
    requests: Mutex<Vec<AnalysisRequest>>,
    reply: Result<TransportResponse, String>,
}

impl ScriptedTransport {
    fn replying(status: u16, body: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            reply: Ok(TransportResponse {
                status,
                body: body.as_bytes().to_vec(),
            }),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            reply: Err(message.to_string()),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_part_names(&self) -> Vec<&'static str> {
        self.requests
            .lock()
            .expect("requests lock")
            .last()
            .expect("a request was sent")
            .part_names()
    }
}

#[async_trait]
impl AnalysisTransport for ScriptedTransport {
    async fn send(&self, request: AnalysisRequest) -> Result<TransportResponse, SubmitError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().expect("requests lock").push(request);
        self.reply.clone().map_err(SubmitError::Transport)
    }
}

#[derive(Debug)]
struct ReceivedPart {
    name: String,
    file_name: Option<String>,
    bytes: Vec<u8>,
}

#[derive(Clone)]
struct ServerState {
    tx: mpsc::UnboundedSender<Vec<ReceivedPart>>,
    status: StatusCode,
    body: &'static str,
}

async fn handle_dna_matching(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> (StatusCode, &'static str) {
    let mut parts = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        parts.push(ReceivedPart {
            name,
            file_name,
            bytes,
        });
    }
    let _ = state.tx.send(parts);
    (state.status, state.body)
}

async fn spawn_analysis_server(
    status: StatusCode,
    body: &'static str,
) -> anyhow::Result<(String, mpsc::UnboundedReceiver<Vec<ReceivedPart>>)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (tx, rx) = mpsc::unbounded_channel();
    let state = ServerState { tx, status, body };
    let app = Router::new()
        .route("/dna_matching", post(handle_dna_matching))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), rx))
}

fn store_with(primary: Option<(&str, &[u8])>, reference: Option<(&str, &[u8])>) -> SelectionStore {
    let mut store = SelectionStore::new();
    if let Some((name, bytes)) = primary {
        store.set_primary(SelectedFile::from_bytes(name, bytes.to_vec()));
    }
    store.set_reference(
        reference.map(|(name, bytes)| SelectedFile::from_bytes(name, bytes.to_vec())),
    );
    store
}

#[tokio::test]
async fn submit_without_primary_sends_nothing_and_keeps_outcome() {
    for reference in [None, Some(("list.xlsx", b"xl".as_slice()))] {
        let store = store_with(None, reference);
        let transport = ScriptedTransport::replying(200, SAMPLE_RESPONSE);
        let mut controller = SubmissionController::new();

        let notice = controller
            .submit(&store, &transport)
            .await
            .expect_err("must be rejected");

        assert_eq!(notice, ValidationNotice::MissingPrimaryFile);
        assert_eq!(transport.calls(), 0);
        assert_eq!(controller.outcome(), &SubmissionOutcome::Idle);
    }
}

#[tokio::test]
async fn rejected_submit_leaves_previous_failure_visible() {
    let transport = ScriptedTransport::failing("connection refused");
    let mut controller = SubmissionController::new();
    controller
        .submit(&store_with(Some(("a.txt", b"ACGT".as_slice())), None), &transport)
        .await
        .expect("dispatched");
    let before = controller.outcome().clone();
    assert!(matches!(before, SubmissionOutcome::Failure(_)));

    controller
        .submit(&SelectionStore::new(), &transport)
        .await
        .expect_err("must be rejected");
    assert_eq!(controller.outcome(), &before);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn primary_only_request_has_no_excel_part() {
    let store = store_with(Some(("seq.txt", b"ACGT".as_slice())), None);
    let transport = ScriptedTransport::replying(200, SAMPLE_RESPONSE);
    let mut controller = SubmissionController::new();

    let status = controller.submit(&store, &transport).await.expect("dispatched");

    assert_eq!(status, SubmitStatus::Completed);
    assert_eq!(transport.calls(), 1);
    assert_eq!(transport.last_part_names(), vec![TARGET_SEQUENCE_PART]);
}

#[tokio::test]
async fn reference_file_is_sent_as_excel_part() {
    let store = store_with(Some(("seq.txt", b"ACGT".as_slice())), Some(("people.xlsx", b"PK".as_slice())));
    let transport = ScriptedTransport::replying(200, SAMPLE_RESPONSE);
    let mut controller = SubmissionController::new();

    controller.submit(&store, &transport).await.expect("dispatched");

    assert_eq!(
        transport.last_part_names(),
        vec![TARGET_SEQUENCE_PART, EXCEL_FILE_PART]
    );
}

#[test]
fn second_begin_while_pending_is_ignored() {
    let store = store_with(Some(("seq.txt", b"ACGT".as_slice())), None);
    let mut controller = SubmissionController::new();

    let SubmitDecision::Dispatch(pending) = controller.begin(store.current()) else {
        panic!("expected dispatch");
    };
    assert!(controller.is_pending());
    assert!(!controller.can_submit());
    assert_eq!(controller.in_flight(), Some(pending.ticket));

    assert!(matches!(
        controller.begin(store.current()),
        SubmitDecision::AlreadyPending
    ));
    assert_eq!(controller.in_flight(), Some(pending.ticket));
    assert_eq!(controller.outcome(), &SubmissionOutcome::Pending);
}

#[tokio::test]
async fn single_flight_issues_one_network_call() {
    let store = store_with(Some(("seq.txt", b"ACGT".as_slice())), None);
    let transport = ScriptedTransport::replying(200, SAMPLE_RESPONSE);
    let mut controller = SubmissionController::new();

    let SubmitDecision::Dispatch(pending) = controller.begin(store.current()) else {
        panic!("expected dispatch");
    };
    for _ in 0..3 {
        assert!(matches!(
            controller.begin(store.current()),
            SubmitDecision::AlreadyPending
        ));
        assert_eq!(
            controller.submit(&store, &transport).await,
            Ok(SubmitStatus::AlreadyPending)
        );
    }
    assert_eq!(transport.calls(), 0);

    let result = execute(&transport, &pending).await;
    assert!(controller.finish(pending.ticket, result));
    assert_eq!(transport.calls(), 1);
    assert!(matches!(controller.outcome(), SubmissionOutcome::Success(_)));
    assert!(controller.can_submit());
}

#[test]
fn completion_for_unknown_ticket_is_ignored() {
    let store = store_with(Some(("seq.txt", b"ACGT".as_slice())), None);
    let mut controller = SubmissionController::new();

    let SubmitDecision::Dispatch(first) = controller.begin(store.current()) else {
        panic!("expected dispatch");
    };
    assert!(controller.finish(first.ticket, Err(SubmitError::Transport("boom".into()))));

    let SubmitDecision::Dispatch(second) = controller.begin(store.current()) else {
        panic!("expected dispatch");
    };
    assert_ne!(first.ticket, second.ticket);

    assert!(!controller.finish(first.ticket, Err(SubmitError::Transport("late".into()))));
    assert_eq!(controller.outcome(), &SubmissionOutcome::Pending);
}

#[tokio::test]
async fn success_response_renders_sample_result() {
    let (server_url, mut parts_rx) = spawn_analysis_server(StatusCode::OK, SAMPLE_RESPONSE)
        .await
        .expect("spawn server");
    let transport = HttpTransport::new(&server_url);
    let store = store_with(Some(("target.txt", b"GATTACA".as_slice())), None);
    let mut controller = SubmissionController::new();

    controller.submit(&store, &transport).await.expect("dispatched");

    let lines = render(controller.outcome()).to_lines();
    assert!(lines.contains(&"Best Match Name: Alice".to_string()));
    assert!(lines.contains(&"Best Match Percentage: 97.35%".to_string()));
    let metrics: Vec<_> = lines.iter().skip_while(|l| *l != "DNA Analysis:").skip(1).cloned().collect();
    assert_eq!(
        metrics,
        vec!["RMP: 1.2", "CPI: 3.4", "PI: 5.6", "Kinship LR: 7.8", "FSI: 9"]
    );

    let parts = parts_rx.recv().await.expect("parts");
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].name, TARGET_SEQUENCE_PART);
    assert_eq!(parts[0].file_name.as_deref(), Some("target.txt"));
    assert_eq!(parts[0].bytes, b"GATTACA".to_vec());
}

#[tokio::test]
async fn multipart_body_carries_both_files_over_http() {
    let (server_url, mut parts_rx) = spawn_analysis_server(StatusCode::OK, SAMPLE_RESPONSE)
        .await
        .expect("spawn server");
    let transport = HttpTransport::new(&server_url);
    let store = store_with(Some(("target.txt", b"GATTACA".as_slice())), Some(("db.xlsx", b"PK\x03\x04".as_slice())));
    let mut controller = SubmissionController::new();

    controller.submit(&store, &transport).await.expect("dispatched");

    let parts = parts_rx.recv().await.expect("parts");
    let names: Vec<_> = parts.iter().map(|part| part.name.as_str()).collect();
    assert_eq!(names, vec![TARGET_SEQUENCE_PART, EXCEL_FILE_PART]);
    assert_eq!(parts[1].file_name.as_deref(), Some("db.xlsx"));
    assert_eq!(parts[1].bytes, b"PK\x03\x04".to_vec());
}

#[tokio::test]
async fn error_status_becomes_failure_with_service_detail() {
    let (server_url, _parts_rx) = spawn_analysis_server(
        StatusCode::BAD_REQUEST,
        r#"{"detail":"Excel file must contain 'Name' and 'Sequence' columns"}"#,
    )
    .await
    .expect("spawn server");
    let transport = HttpTransport::new(&server_url);
    let store = store_with(Some(("target.txt", b"GATTACA".as_slice())), Some(("bad.xlsx", b"x".as_slice())));
    let mut controller = SubmissionController::new();

    controller.submit(&store, &transport).await.expect("dispatched");

    let SubmissionOutcome::Failure(message) = controller.outcome() else {
        panic!("expected failure, got {:?}", controller.outcome());
    };
    assert_eq!(
        message,
        "request failed with status 400 Bad Request: Excel file must contain 'Name' and 'Sequence' columns"
    );
}

#[tokio::test]
async fn server_error_without_body_still_has_message() {
    let transport = ScriptedTransport::replying(500, "");
    let store = store_with(Some(("target.txt", b"GATTACA".as_slice())), None);
    let mut controller = SubmissionController::new();

    controller.submit(&store, &transport).await.expect("dispatched");

    let SubmissionOutcome::Failure(message) = controller.outcome() else {
        panic!("expected failure");
    };
    assert_eq!(message, "request failed with status 500 Internal Server Error");
}

#[tokio::test]
async fn unreachable_service_becomes_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let transport = HttpTransport::new(format!("http://{addr}"));
    let store = store_with(Some(("target.txt", b"GATTACA".as_slice())), None);
    let mut controller = SubmissionController::new();

    controller.submit(&store, &transport).await.expect("dispatched");

    let SubmissionOutcome::Failure(message) = controller.outcome() else {
        panic!("expected failure, got {:?}", controller.outcome());
    };
    assert!(!message.trim().is_empty());
    assert!(matches!(render(controller.outcome()), ResultDisplay::Error { .. }));
}

#[tokio::test]
async fn malformed_success_body_becomes_protocol_failure() {
    for body in ["<html>ok</html>", r#"{"dna_matching":{"best_match_name":"A"}}"#] {
        let transport = ScriptedTransport::replying(200, body);
        let store = store_with(Some(("target.txt", b"GATTACA".as_slice())), None);
        let mut controller = SubmissionController::new();

        controller.submit(&store, &transport).await.expect("dispatched");

        let SubmissionOutcome::Failure(message) = controller.outcome() else {
            panic!("expected failure for {body}");
        };
        assert!(
            message.starts_with("failed to fetch data from server"),
            "unexpected message: {message}"
        );
    }
}

#[tokio::test]
async fn protocol_errors_are_classified() {
    let err = interpret_response(TransportResponse {
        status: 200,
        body: b"[]".to_vec(),
    })
    .expect_err("must fail");
    assert_eq!(err.category(), ErrorCategory::Protocol);

    let err = execute(
        &ScriptedTransport::failing("dns error"),
        &PendingSubmission {
            ticket: SubmissionTicket(99),
            primary: SelectedFile::from_bytes("a.txt", b"A".to_vec()),
            reference: None,
        },
    )
    .await
    .expect_err("must fail");
    assert_eq!(err.category(), ErrorCategory::Transport);
    assert_eq!(err.user_message(), "dns error");
}

#[tokio::test]
async fn unreadable_primary_file_fails_without_network_call() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut store = SelectionStore::new();
    store.set_primary(SelectedFile::from_path(dir.path().join("missing.txt")));
    let transport = ScriptedTransport::replying(200, SAMPLE_RESPONSE);
    let mut controller = SubmissionController::new();

    controller.submit(&store, &transport).await.expect("dispatched");

    assert_eq!(transport.calls(), 0);
    let SubmissionOutcome::Failure(message) = controller.outcome() else {
        panic!("expected failure");
    };
    assert!(message.starts_with("could not read missing.txt"));
}

#[tokio::test]
async fn selection_is_retained_after_failure_and_success() {
    let store = store_with(Some(("seq.txt", b"ACGT".as_slice())), Some(("list.xlsx", b"PK".as_slice())));
    let mut controller = SubmissionController::new();

    controller
        .submit(&store, &ScriptedTransport::failing("connection reset"))
        .await
        .expect("dispatched");
    assert!(matches!(controller.outcome(), SubmissionOutcome::Failure(_)));
    assert!(store.current().reference.is_some());

    let transport = ScriptedTransport::replying(200, SAMPLE_RESPONSE);
    controller.submit(&store, &transport).await.expect("dispatched");
    assert!(matches!(controller.outcome(), SubmissionOutcome::Success(_)));
    assert_eq!(
        transport.last_part_names(),
        vec![TARGET_SEQUENCE_PART, EXCEL_FILE_PART]
    );
}

#[test]
fn outcome_labels() {
    assert_eq!(SubmissionOutcome::Idle.label(), "idle");
    assert_eq!(SubmissionOutcome::Pending.label(), "pending");
    assert_eq!(SubmissionOutcome::Failure("x".into()).label(), "failure");
}
