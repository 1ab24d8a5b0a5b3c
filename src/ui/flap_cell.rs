use std::time::{Duration, Instant};
use crate::config::constants::PLACEHOLDER_GLYPHS;
use crate::enums::board_color::BoardColor;
use crate::enums::flap_state::FlapState;
use crate::structs::cell_view::CellView;
use crate::structs::scheduled_timer::ScheduledTimer;

/// One split-flap cell.
///
/// A new target never shows up immediately: the current text stays frozen
/// for `flip_duration` and is then swapped in one step, so no intermediate
/// value is ever visible. A target change mid-flip restarts the timer
/// against the newest target instead of queueing another flip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlapCell {
    state: FlapState,
    flip_duration: Duration,
}

impl FlapCell {
    /// Starts blank, so the first real value flips in from the placeholder.
    pub fn new(flip_duration: Duration) -> Self {
        Self {
            state: FlapState::Settled(String::new()),
            flip_duration,
        }
    }

    pub fn state(&self) -> &FlapState {
        &self.state
    }

    pub fn set_target(&mut self, target: &str, now: Instant) {
        let flip_duration = self.flip_duration;
        self.state = match std::mem::replace(&mut self.state, FlapState::Settled(String::new())) {
            FlapState::Settled(value) if value == target => FlapState::Settled(value),
            FlapState::Settled(value) => FlapState::Transitioning {
                from: value,
                to: target.to_string(),
                timer: ScheduledTimer::schedule(now, flip_duration),
            },
            FlapState::Transitioning { from, to, timer } if to == target => {
                FlapState::Transitioning { from, to, timer }
            }
            FlapState::Transitioning { from, .. } if from == target => FlapState::Settled(from),
            FlapState::Transitioning { from, mut timer, .. } => {
                timer.restart(now, flip_duration);
                FlapState::Transitioning {
                    from,
                    to: target.to_string(),
                    timer,
                }
            }
        };
    }

    /// Reveals the pending target once its timer has run out. Returns true
    /// when the displayed value changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let FlapState::Transitioning { to, timer, .. } = &mut self.state else {
            return false;
        };
        if !timer.fire(now) {
            return false;
        }
        let revealed = std::mem::take(to);
        self.state = FlapState::Settled(revealed);
        true
    }

    pub fn displayed(&self) -> &str {
        match &self.state {
            FlapState::Settled(value) => value,
            FlapState::Transitioning { from, .. } => from,
        }
    }

    pub fn target(&self) -> &str {
        match &self.state {
            FlapState::Settled(value) => value,
            FlapState::Transitioning { to, .. } => to,
        }
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, FlapState::Transitioning { .. })
    }

    pub fn elapsed(&self, now: Instant) -> Option<Duration> {
        match &self.state {
            FlapState::Transitioning { timer, .. } => Some(timer.elapsed(now)),
            FlapState::Settled(_) => None,
        }
    }

    /// Text to draw: the displayed value, or the placeholder glyphs when blank.
    pub fn display_text(&self) -> &str {
        let displayed = self.displayed();
        if displayed.is_empty() {
            PLACEHOLDER_GLYPHS
        } else {
            displayed
        }
    }

    pub fn view(&self, column: &str, color: BoardColor) -> CellView {
        CellView {
            column: column.to_string(),
            text: self.display_text().to_string(),
            flipping: self.is_transitioning(),
            color,
        }
    }

    /// Drops any pending flip; the cell keeps what it currently shows.
    pub fn teardown(&mut self) {
        if let FlapState::Transitioning { from, timer, .. } = &mut self.state {
            timer.cancel();
            let kept = std::mem::take(from);
            self.state = FlapState::Settled(kept);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLIP: Duration = Duration::from_millis(300);

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn settled_cell(value: &str, t0: Instant) -> FlapCell {
        let mut cell = FlapCell::new(FLIP);
        cell.set_target(value, t0);
        cell.tick(t0 + FLIP + ms(1));
        assert_eq!(cell.displayed(), value);
        cell
    }

    #[test]
    fn blank_cell_shows_placeholder() {
        let cell = FlapCell::new(FLIP);

        assert_eq!(cell.display_text(), "---");
        assert!(!cell.is_transitioning());
    }

    #[test]
    fn new_target_is_revealed_only_after_flip_duration() {
        let t0 = Instant::now();
        let mut cell = settled_cell("GET", t0);
        let start = t0 + ms(1000);

        cell.set_target("POST", start);
        assert!(cell.is_transitioning());

        for offset in [0, 100, 299] {
            cell.tick(start + ms(offset));
            assert_eq!(cell.display_text(), "GET");
        }

        assert!(cell.tick(start + ms(301)));
        assert_eq!(cell.display_text(), "POST");
        assert!(!cell.is_transitioning());
        assert!(!cell.tick(start + ms(900)));
    }

    #[test]
    fn retarget_mid_flip_restarts_timer_and_lands_on_newest() {
        let t0 = Instant::now();
        let mut cell = settled_cell("GET", t0);
        let start = t0 + ms(1000);

        cell.set_target("POST", start);
        cell.tick(start + ms(100));
        cell.set_target("DELETE", start + ms(100));

        cell.tick(start + ms(301));
        assert_eq!(cell.display_text(), "GET");
        assert_eq!(cell.target(), "DELETE");

        cell.tick(start + ms(401));
        assert_eq!(cell.display_text(), "DELETE");
        assert!(!cell.is_transitioning());
    }

    #[test]
    fn same_target_does_not_restart_the_flip() {
        let t0 = Instant::now();
        let mut cell = FlapCell::new(FLIP);

        cell.set_target("ADDED", t0);
        cell.set_target("ADDED", t0 + ms(200));

        assert_eq!(cell.elapsed(t0 + ms(250)), Some(ms(250)));
        cell.tick(t0 + ms(301));
        assert_eq!(cell.displayed(), "ADDED");
    }

    #[test]
    fn reverting_to_displayed_value_settles_immediately() {
        let t0 = Instant::now();
        let mut cell = settled_cell("GET", t0);

        cell.set_target("POST", t0 + ms(1000));
        cell.set_target("GET", t0 + ms(1100));

        assert!(!cell.is_transitioning());
        assert_eq!(cell.displayed(), "GET");
    }

    #[test]
    fn clearing_value_flips_back_to_placeholder() {
        let t0 = Instant::now();
        let mut cell = settled_cell("HIGH", t0);

        cell.set_target("", t0 + ms(1000));
        assert_eq!(cell.display_text(), "HIGH");

        cell.tick(t0 + ms(1301));
        assert_eq!(cell.display_text(), "---");
    }

    #[test]
    fn teardown_cancels_pending_flip() {
        let t0 = Instant::now();
        let mut cell = settled_cell("GET", t0);

        cell.set_target("PUT", t0 + ms(1000));
        cell.teardown();

        assert!(!cell.tick(t0 + ms(5000)));
        assert_eq!(cell.displayed(), "GET");
    }

    #[test]
    fn view_reports_flip_state() {
        let t0 = Instant::now();
        let mut cell = FlapCell::new(FLIP);
        cell.set_target("/widgets", t0);

        let view = cell.view("Endpoint", BoardColor::Amber);

        assert_eq!(view.text, "---");
        assert!(view.flipping);
        assert_eq!(view.column, "Endpoint");
    }
}
