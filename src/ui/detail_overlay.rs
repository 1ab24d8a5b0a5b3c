use std::time::Instant;
use crate::config::constants::OVERLAY_CLOSE_LABEL;
use crate::enums::overlay_phase::OverlayPhase;
use crate::structs::board_timings::BoardTimings;
use crate::structs::overlay_view::OverlayView;
use crate::structs::scheduled_timer::ScheduledTimer;
use crate::structs::spec_change::SpecChange;

/// Read-only detail view of one change, with staged enter/exit timing.
///
/// Opening waits `overlay_open_delay` so the closed frame is drawn first;
/// closing keeps the instance mounted for `overlay_close_delay` so the exit
/// animation is never cut short.
#[derive(Debug, Clone)]
pub struct DetailOverlay {
    change: SpecChange,
    entry: usize,
    phase: OverlayPhase,
    timer: Option<ScheduledTimer>,
    timings: BoardTimings,
}

impl DetailOverlay {
    /// Mounts the overlay: Closed → Opening.
    pub fn open(change: SpecChange, entry: usize, timings: BoardTimings, now: Instant) -> Self {
        Self {
            change,
            entry,
            phase: OverlayPhase::Opening,
            timer: Some(ScheduledTimer::schedule(now, timings.overlay_open_delay)),
            timings,
        }
    }

    pub fn change(&self) -> &SpecChange {
        &self.change
    }

    pub fn entry(&self) -> usize {
        self.entry
    }

    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    /// The visual "shown" flag that drives the entrance animation.
    pub fn is_visible(&self) -> bool {
        self.phase == OverlayPhase::Open
    }

    pub fn is_closed(&self) -> bool {
        self.phase == OverlayPhase::Closed
    }

    pub fn is_closing(&self) -> bool {
        self.phase == OverlayPhase::Closing
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        let fired = self.timer.as_mut().is_some_and(|timer| timer.fire(now));
        if !fired {
            return false;
        }

        self.timer = None;
        self.phase = match self.phase {
            OverlayPhase::Opening => OverlayPhase::Open,
            OverlayPhase::Closing => OverlayPhase::Closed,
            other => other,
        };
        true
    }

    /// Close button: starts the exit animation immediately. A close during
    /// Opening drops the pending open so the overlay still ends Closed.
    pub fn request_close(&mut self, now: Instant) {
        match self.phase {
            OverlayPhase::Opening | OverlayPhase::Open => {
                if let Some(timer) = self.timer.as_mut() {
                    timer.cancel();
                }
                self.phase = OverlayPhase::Closing;
                self.timer = Some(ScheduledTimer::schedule(now, self.timings.overlay_close_delay));
            }
            OverlayPhase::Closing | OverlayPhase::Closed => {}
        }
    }

    pub fn backdrop_click(&mut self, now: Instant) {
        self.request_close(now);
    }

    pub fn teardown(&mut self) {
        if let Some(timer) = self.timer.as_mut() {
            timer.cancel();
        }
        self.timer = None;
        self.phase = OverlayPhase::Closed;
    }

    pub fn view(&self) -> OverlayView {
        OverlayView {
            entry: self.entry,
            phase: self.phase,
            visible: self.is_visible(),
            title: format!("DATA LOG: ENTRY #{}", self.entry),
            badge: self.change.change_type.to_string(),
            color: self.change.change_type.color(),
            impact_label: format!("IMPACT: {}", self.change.impact),
            heading: self.change.heading(),
            description: self.change.description.clone(),
            technical_detail: self.change.technical_detail_or_fallback().to_string(),
            close_label: OVERLAY_CLOSE_LABEL.to_string(),
        }
    }
}
