use std::sync::Arc;
use std::time::{Duration, Instant};
use dashmap::DashMap;
use uuid::Uuid;
use crate::errors::{SpecBoardError, SpecBoardResult};
use crate::structs::board_snapshot::BoardSnapshot;
use crate::structs::board_timings::BoardTimings;
use crate::traits::comparison_service::ComparisonService;
use crate::ui::board_session::BoardSession;

struct SessionEntry {
    session: BoardSession,
    last_seen: Instant,
}

/// Browser board sessions keyed by UUID. Each browser tab gets its own
/// orchestrator and board; idle sessions are dropped, which aborts any
/// request they still had in flight.
pub struct SessionManager {
    sessions: Arc<DashMap<String, SessionEntry>>,
    service: Arc<dyn ComparisonService>,
    timings: BoardTimings,
    idle_timeout: Duration,
}

impl SessionManager {
    pub fn new(service: Arc<dyn ComparisonService>, timings: BoardTimings, idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            service,
            timings,
            idle_timeout,
        }
    }

    pub fn create_session(&self) -> String {
        let session_id = Uuid::new_v4().to_string();
        let session = BoardSession::new(Arc::clone(&self.service), self.timings);

        self.sessions.insert(session_id.clone(), SessionEntry { session, last_seen: Instant::now() });
        log::info!("🎫 Created board session {}", session_id);
        session_id
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    fn with_session<T>(&self, session_id: &str, action: impl FnOnce(&mut BoardSession, Instant) -> T) -> SpecBoardResult<T> {
        let mut entry = self.sessions.get_mut(session_id).ok_or_else(|| SpecBoardError::SessionNotFound {
            session_id: session_id.to_string(),
        })?;

        let now = Instant::now();
        entry.last_seen = now;
        entry.session.refresh(now);
        Ok(action(&mut entry.session, now))
    }

    /// Current frame of the board, after pulling in any finished request.
    pub fn board(&self, session_id: &str) -> SpecBoardResult<BoardSnapshot> {
        self.with_session(session_id, |session, _| session.snapshot())
    }

    /// A missing input is reported on the board itself; a second submit
    /// while one is pending is an error.
    pub fn submit(&self, session_id: &str, old_spec: &str, new_spec: &str) -> SpecBoardResult<BoardSnapshot> {
        self.with_session(session_id, |session, now| match session.submit(old_spec, new_spec, now) {
            Ok(_) | Err(SpecBoardError::PreconditionError { .. }) => Ok(session.snapshot()),
            Err(e) => Err(e),
        })?
    }

    pub fn select(&self, session_id: &str, row: usize) -> SpecBoardResult<BoardSnapshot> {
        self.with_session(session_id, |session, now| {
            let available = session.board().rows().len();
            if row >= available {
                return Err(SpecBoardError::InvalidSelection { row, available });
            }
            session.select(row, now);
            Ok(session.snapshot())
        })?
    }

    pub fn close_overlay(&self, session_id: &str) -> SpecBoardResult<BoardSnapshot> {
        self.with_session(session_id, |session, now| {
            session.close_overlay(now);
            session.snapshot()
        })
    }

    pub fn backdrop_click(&self, session_id: &str) -> SpecBoardResult<BoardSnapshot> {
        self.with_session(session_id, |session, now| {
            session.backdrop_click(now);
            session.snapshot()
        })
    }

    pub fn remove_session(&self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }

    /// Drops sessions not seen for longer than the idle timeout.
    pub fn cleanup_expired_sessions(&self, now: Instant) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, entry| now.saturating_duration_since(entry.last_seen) <= self.idle_timeout);
        let removed = before.saturating_sub(self.sessions.len());

        if removed > 0 {
            log::info!("🧹 Removed {} idle board session(s)", removed);
        }
        removed
    }

    pub fn clear(&self) {
        self.sessions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::enums::ai_provider_error::AiProviderError;
    use crate::enums::overlay_phase::OverlayPhase;

    struct EchoService;

    #[async_trait]
    impl ComparisonService for EchoService {
        async fn compare(&self, _old_spec: String, _new_spec: String) -> Result<String, AiProviderError> {
            Ok(r#"{"summary": "One change.", "changes": [{"type": "REMOVED", "endpoint": "/legacy",
                "method": "GET", "description": "Gone", "impact": "MEDIUM"}]}"#.to_string())
        }
    }

    fn manager() -> SessionManager {
        SessionManager::new(Arc::new(EchoService), BoardTimings::instant(), Duration::from_secs(60))
    }

    async fn wait_until_landed(manager: &SessionManager, session_id: &str) -> BoardSnapshot {
        for _ in 0..200 {
            let snapshot = manager.board(session_id).unwrap();
            if !snapshot.loading {
                return snapshot;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("comparison never completed");
    }

    #[tokio::test]
    async fn session_runs_a_comparison_and_opens_detail() {
        let manager = manager();
        let id = manager.create_session();

        let pending = manager.submit(&id, "a: 1", "a: 2").unwrap();
        assert!(pending.loading);

        wait_until_landed(&manager, &id).await;
        let snapshot = manager.board(&id).unwrap();
        assert_eq!(snapshot.summary.as_deref(), Some("One change."));

        manager.select(&id, 0).unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
        let opened = manager.board(&id).unwrap();
        assert_eq!(opened.overlay.map(|overlay| overlay.phase), Some(OverlayPhase::Open));
    }

    #[tokio::test]
    async fn missing_input_is_reported_on_the_board() {
        let manager = manager();
        let id = manager.create_session();

        let snapshot = manager.submit(&id, "", "").unwrap();

        assert!(snapshot.error.is_some());
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn out_of_range_selection_is_rejected() {
        let manager = manager();
        let id = manager.create_session();

        let err = manager.select(&id, 7).unwrap_err();

        assert_eq!(err, SpecBoardError::InvalidSelection { row: 7, available: 1 });
    }

    #[test]
    fn unknown_session_is_an_error() {
        let err = manager().board("nope").unwrap_err();

        assert!(matches!(err, SpecBoardError::SessionNotFound { .. }));
    }

    #[test]
    fn idle_sessions_are_removed() {
        let manager = manager();
        manager.create_session();
        manager.create_session();

        assert_eq!(manager.cleanup_expired_sessions(Instant::now()), 0);
        assert_eq!(manager.cleanup_expired_sessions(Instant::now() + Duration::from_secs(61)), 2);
        assert_eq!(manager.session_count(), 0);
    }
}
