use std::sync::Arc;
use std::time::{Duration, Instant};
use async_trait::async_trait;
use mockall::mock;
use proptest::prelude::*;
use tokio_test::{assert_err, assert_ok};

use specboard_cli::config::constants::{EMPTY_STATE_MESSAGE, INVALID_RESPONSE_MESSAGE, MISSING_SPECS_MESSAGE};
use specboard_cli::enums::ai_provider_error::AiProviderError;
use specboard_cli::enums::board_color::BoardColor;
use specboard_cli::enums::board_row::RowKind;
use specboard_cli::enums::change_type::ChangeType;
use specboard_cli::enums::impact_level::ImpactLevel;
use specboard_cli::enums::overlay_phase::OverlayPhase;
use specboard_cli::enums::request_status::RequestStatus;
use specboard_cli::enums::validation_error::ValidationError;
use specboard_cli::errors::SpecBoardError;
use specboard_cli::services::comparison_orchestrator::ComparisonOrchestrator;
use specboard_cli::services::result_schema::ResultSchema;
use specboard_cli::structs::board_snapshot::BoardSnapshot;
use specboard_cli::structs::board_timings::BoardTimings;
use specboard_cli::traits::comparison_service::ComparisonService;
use specboard_cli::ui::board_session::BoardSession;

mock! {
    pub Engine {}

    #[async_trait]
    impl ComparisonService for Engine {
        async fn compare(&self, old_spec: String, new_spec: String) -> Result<String, AiProviderError>;
    }
}

const WIDGETS_ADDED: &str = r#"{
    "summary": "Added a widget creation endpoint.",
    "versionOld": "1.0.0",
    "versionNew": "1.1.0",
    "changes": [{
        "type": "ADDED",
        "endpoint": "/widgets",
        "method": "POST",
        "description": "Creates a widget",
        "technicalDetail": "New operation createWidget with a WidgetInput body.",
        "impact": "HIGH"
    }]
}"#;

const NO_CHANGES: &str = r#"{"summary": "No differences found.", "changes": []}"#;

fn engine_replying(reply: &'static str) -> MockEngine {
    let mut engine = MockEngine::new();
    engine
        .expect_compare()
        .times(1)
        .returning(move |_, _| Ok(reply.to_string()));
    engine
}

/// Ticks the board with real time until every animation has finished.
async fn run_until_settled(session: &mut BoardSession) -> BoardSnapshot {
    for _ in 0..400 {
        session.refresh(Instant::now());
        if session.is_settled() {
            return session.snapshot();
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("board never settled");
}

#[tokio::test]
async fn added_endpoint_lands_on_the_board_and_opens_detail() {
    let timings = BoardTimings {
        flip_duration: Duration::from_millis(20),
        overlay_open_delay: Duration::from_millis(5),
        overlay_close_delay: Duration::from_millis(20),
        ..BoardTimings::default()
    };
    let mut session = BoardSession::new(Arc::new(engine_replying(WIDGETS_ADDED)), timings);

    assert_ok!(session.submit("openapi: 3.0.0\nv: 1", "openapi: 3.0.0\nv: 2", Instant::now()));
    let loading = session.snapshot();
    assert!(loading.loading);
    assert_eq!(loading.rows.len(), 5);
    assert!(loading.rows.iter().all(|row| row.kind == RowKind::Placeholder));

    let board = run_until_settled(&mut session).await;
    assert!(!board.loading);
    assert_eq!(board.summary.as_deref(), Some("Added a widget creation endpoint."));
    assert_eq!(board.rows.len(), 1);

    let row = &board.rows[0];
    assert_eq!(row.entry, Some(1));
    let texts: Vec<&str> = row.cells.iter().map(|cell| cell.text.as_str()).collect();
    assert_eq!(texts, vec!["ADDED", "POST", "/widgets", "Creates a widget", "HIGH"]);
    assert_eq!(row.cells[0].color, BoardColor::Green);
    assert_eq!(row.cells[4].color, BoardColor::Red);
    assert!(row.cells.iter().all(|cell| !cell.flipping));

    let selected = session.select(0, Instant::now()).map(|change| change.change_type);
    assert_eq!(selected, Some(ChangeType::Added));

    let opened = run_until_settled(&mut session).await;
    let overlay = opened.overlay.expect("overlay mounted");
    assert_eq!(overlay.phase, OverlayPhase::Open);
    assert_eq!(overlay.title, "DATA LOG: ENTRY #1");
    assert_eq!(overlay.impact_label, "IMPACT: HIGH");

    session.backdrop_click(Instant::now());
    let closed = run_until_settled(&mut session).await;
    assert!(closed.overlay.is_none());
}

#[tokio::test]
async fn empty_change_list_shows_the_empty_state() {
    let mut session = BoardSession::new(Arc::new(engine_replying(NO_CHANGES)), BoardTimings::instant());

    assert_ok!(session.submit("a: 1", "a: 1", Instant::now()));
    let board = run_until_settled(&mut session).await;

    assert_eq!(board.summary.as_deref(), Some("No differences found."));
    assert_eq!(board.rows.len(), 1);
    assert_eq!(board.rows[0].kind, RowKind::EmptyState);
    assert_eq!(board.rows[0].message.as_deref(), Some(EMPTY_STATE_MESSAGE));
    assert!(!board.rows[0].selectable);
    assert!(session.select(0, Instant::now()).is_none());
}

#[tokio::test]
async fn malformed_engine_output_is_a_failure_with_no_rows() {
    let mut session = BoardSession::new(
        Arc::new(engine_replying(r#"{"summary": "x", "changes": [{"type": "RENAMED"}]}"#)),
        BoardTimings::instant(),
    );

    assert_ok!(session.submit("a: 1", "a: 2", Instant::now()));
    let status = session.settle().await.clone();
    let board = run_until_settled(&mut session).await;

    assert_eq!(status, RequestStatus::Failed(INVALID_RESPONSE_MESSAGE.to_string()));
    assert_eq!(board.error.as_deref(), Some(INVALID_RESPONSE_MESSAGE));
    assert!(board.summary.is_none());
    assert_eq!(board.rows[0].kind, RowKind::EmptyState);
}

#[tokio::test]
async fn second_submit_while_pending_is_rejected() {
    let mut engine = MockEngine::new();
    engine.expect_compare().times(1).returning(|_, _| Ok(NO_CHANGES.to_string()));
    let mut orchestrator = ComparisonOrchestrator::new(Arc::new(engine));

    let handle = assert_ok!(orchestrator.submit("a: 1", "a: 2"));
    let err = assert_err!(orchestrator.submit("a: 1", "a: 2"));
    assert!(matches!(err, SpecBoardError::RequestInFlight { request_id } if request_id == handle.id()));

    let request_id = handle.id();
    let outcome = handle.wait().await;
    assert!(orchestrator.complete(request_id, outcome).result().is_some());
}

#[tokio::test]
async fn engine_failure_message_reaches_the_board() {
    let mut engine = MockEngine::new();
    engine
        .expect_compare()
        .times(1)
        .returning(|_, _| Err(AiProviderError::TimeoutError("no answer after 120s".to_string())));
    let mut orchestrator = ComparisonOrchestrator::new(Arc::new(engine));

    let status = assert_ok!(orchestrator.compare("a: 1", "a: 2").await).clone();

    assert_eq!(status.error_message(), Some("no answer after 120s"));
}

#[test]
fn invalid_impact_rejects_the_whole_payload() {
    let raw = r#"{
        "summary": "Two changes.",
        "changes": [
            {"type": "ADDED", "endpoint": "/a", "method": "GET", "description": "ok", "impact": "LOW"},
            {"type": "REMOVED", "endpoint": "/b", "method": "GET", "description": "bad", "impact": "SEVERE"}
        ]
    }"#;

    let err = assert_err!(ResultSchema::validate(raw));

    assert_eq!(
        err,
        ValidationError::InvalidEnum {
            field: "changes[1].impact".to_string(),
            value: "SEVERE".to_string(),
        }
    );
}

#[test]
fn valid_payload_keeps_change_order_and_values() {
    let result = assert_ok!(ResultSchema::validate(WIDGETS_ADDED));

    assert_eq!(result.version_old.as_deref(), Some("1.0.0"));
    assert_eq!(result.changes.len(), 1);
    assert_eq!(result.changes[0].impact, ImpactLevel::High);
    assert_eq!(result.changes[0].endpoint, "/widgets");
}

proptest! {
    #[test]
    fn blank_inputs_never_reach_the_engine(old in "[ \t\r\n]*", new in "[ \t\r\n]*") {
        let mut engine = MockEngine::new();
        engine.expect_compare().never();
        let mut orchestrator = ComparisonOrchestrator::new(Arc::new(engine));

        let err = orchestrator.submit(&old, &new).err();

        prop_assert!(matches!(err, Some(SpecBoardError::PreconditionError { .. })), "expected PreconditionError");
        prop_assert_eq!(orchestrator.status().error_message(), Some(MISSING_SPECS_MESSAGE));
    }

    #[test]
    fn one_blank_side_is_enough_to_refuse(spec in "[a-z]{1,12}: [0-9]{1,4}", blank in "[ \t\r\n]*") {
        let mut engine = MockEngine::new();
        engine.expect_compare().never();
        let mut orchestrator = ComparisonOrchestrator::new(Arc::new(engine));

        prop_assert!(orchestrator.submit(&spec, &blank).is_err());
        prop_assert!(orchestrator.submit(&blank, &spec).is_err());
    }

    #[test]
    fn validation_is_deterministic(raw in "\\PC{0,64}") {
        prop_assert_eq!(ResultSchema::validate(&raw), ResultSchema::validate(&raw));
    }

    #[test]
    fn validated_results_survive_reserialization(
        summary in "[A-Za-z][A-Za-z .]{0,40}",
        endpoint in "/[a-z]{1,10}",
        impact in prop::sample::select(vec!["HIGH", "MEDIUM", "LOW"]),
    ) {
        let raw = serde_json::json!({
            "summary": summary,
            "changes": [{
                "type": "MODIFIED", "endpoint": endpoint, "method": "PUT",
                "description": "Updated", "impact": impact
            }]
        })
        .to_string();

        let first = ResultSchema::validate(&raw);
        prop_assert!(first.is_ok());
        let first = first.unwrap_or_else(|_| unreachable!());
        let again = ResultSchema::validate(&serde_json::to_string(&first).unwrap_or_default());
        prop_assert_eq!(again, Ok(first));
    }
}
