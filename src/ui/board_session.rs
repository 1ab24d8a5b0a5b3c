use std::sync::Arc;
use std::time::Instant;
use chrono::{DateTime, Utc};
use crate::config::constants::{BOARD_COLUMNS, SUBMIT_LABEL_IDLE, SUBMIT_LABEL_PENDING};
use crate::enums::request_status::{RequestId, RequestStatus};
use crate::errors::{SpecBoardError, SpecBoardResult};
use crate::services::comparison_orchestrator::ComparisonOrchestrator;
use crate::structs::board_snapshot::BoardSnapshot;
use crate::structs::board_timings::BoardTimings;
use crate::structs::request_handle::{RequestHandle, ServiceOutcome};
use crate::structs::spec_change::SpecChange;
use crate::traits::comparison_service::ComparisonService;
use crate::ui::board_controller::BoardController;

/// One user's board: the orchestrator, the board it feeds and the request
/// currently in flight. Both the terminal and the web surface drive the
/// board through this type.
pub struct BoardSession {
    orchestrator: ComparisonOrchestrator,
    board: BoardController,
    in_flight: Option<RequestHandle>,
    updated_at: Option<DateTime<Utc>>,
}

impl BoardSession {
    pub fn new(service: Arc<dyn ComparisonService>, timings: BoardTimings) -> Self {
        Self {
            orchestrator: ComparisonOrchestrator::new(service),
            board: BoardController::new(timings),
            in_flight: None,
            updated_at: None,
        }
    }

    pub fn status(&self) -> &RequestStatus {
        self.orchestrator.status()
    }

    pub fn is_pending(&self) -> bool {
        self.orchestrator.is_pending()
    }

    pub fn board(&self) -> &BoardController {
        &self.board
    }

    /// Starts a comparison and switches the board to its loading rows.
    /// Must run inside a tokio runtime.
    pub fn submit(&mut self, old_spec: &str, new_spec: &str, now: Instant) -> SpecBoardResult<RequestId> {
        match self.orchestrator.submit(old_spec, new_spec) {
            Ok(handle) => {
                let request_id = handle.id();
                self.in_flight = Some(handle);
                self.board.sync(None, true, now);
                Ok(request_id)
            }
            Err(e @ SpecBoardError::PreconditionError { .. }) => {
                self.board.sync(None, false, now);
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Pulls in the request outcome if it has arrived, then advances every
    /// animation. Never blocks. Returns true when anything visible changed.
    pub fn refresh(&mut self, now: Instant) -> bool {
        let landed = self
            .in_flight
            .as_mut()
            .and_then(|handle| handle.try_outcome().map(|outcome| (handle.id(), outcome)));

        let mut changed = false;
        if let Some((request_id, outcome)) = landed {
            self.in_flight = None;
            self.apply_outcome(request_id, outcome, now);
            changed = true;
        }

        self.board.tick(now) || changed
    }

    /// Waits for the in-flight request, if any, and applies its outcome.
    pub async fn settle(&mut self) -> &RequestStatus {
        if let Some(handle) = self.in_flight.take() {
            let request_id = handle.id();
            let outcome = handle.wait().await;
            self.apply_outcome(request_id, outcome, Instant::now());
        }
        self.orchestrator.status()
    }

    fn apply_outcome(&mut self, request_id: RequestId, outcome: ServiceOutcome, now: Instant) {
        if let RequestStatus::Succeeded(_) = self.orchestrator.complete(request_id, outcome) {
            self.updated_at = Some(Utc::now());
        }
        let result = self.orchestrator.result();
        self.board.sync(result.as_deref(), self.orchestrator.is_pending(), now);
    }

    pub fn select(&mut self, row_index: usize, now: Instant) -> Option<SpecChange> {
        self.board.select(row_index, now)
    }

    pub fn close_overlay(&mut self, now: Instant) {
        self.board.close_overlay(now);
    }

    pub fn backdrop_click(&mut self, now: Instant) {
        self.board.backdrop_click(now);
    }

    pub fn is_settled(&self) -> bool {
        self.in_flight.is_none() && self.board.is_settled()
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let loading = self.orchestrator.is_pending();
        let status = self.orchestrator.status();

        BoardSnapshot {
            status_line: self.board.status_line().to_string(),
            loading,
            submit_enabled: !loading,
            submit_label: if loading { SUBMIT_LABEL_PENDING } else { SUBMIT_LABEL_IDLE }.to_string(),
            columns: BOARD_COLUMNS.iter().map(|column| column.to_string()).collect(),
            rows: self.board.row_views(),
            summary: status.result().map(|result| result.summary.clone()),
            error: status.error_message().map(str::to_string),
            updated_at: status
                .result()
                .and(self.updated_at)
                .map(|at| at.format("UPDATED %H:%M:%S UTC").to_string()),
            overlay: self.board.overlay_view(),
        }
    }

    pub fn teardown(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            log::debug!("Aborting in-flight comparison #{}", handle.id());
            handle.abort();
        }
        self.board.teardown();
    }
}

impl Drop for BoardSession {
    fn drop(&mut self) {
        self.teardown();
    }
}
