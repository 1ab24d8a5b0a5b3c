use std::time::Instant;
use crate::config::constants::{BOARD_COLUMNS, EMPTY_STATE_MESSAGE, STATUS_PROCESSING, STATUS_READY};
use crate::enums::board_color::BoardColor;
use crate::enums::board_row::BoardRow;
use crate::structs::board_timings::BoardTimings;
use crate::structs::comparison_result::ComparisonResult;
use crate::structs::overlay_view::OverlayView;
use crate::structs::row_view::RowView;
use crate::structs::spec_change::SpecChange;
use crate::ui::detail_overlay::DetailOverlay;
use crate::ui::flap_cell::FlapCell;

const COLUMN_COUNT: usize = BOARD_COLUMNS.len();

type RowCells = [FlapCell; COLUMN_COUNT];

/// Maps `(result, loading)` onto board rows.
///
/// Loading always wins over a stale result; a missing or empty result is a
/// single empty-state row. Change rows keep the order they arrived in.
pub fn layout(result: Option<&ComparisonResult>, loading: bool, placeholder_rows: usize) -> Vec<BoardRow> {
    if loading {
        return vec![BoardRow::Placeholder; placeholder_rows];
    }

    match result {
        Some(result) if !result.is_empty() => result
            .changes
            .iter()
            .enumerate()
            .map(|(index, change)| BoardRow::Change { index, change: change.clone() })
            .collect(),
        _ => vec![BoardRow::EmptyState],
    }
}

fn cell_targets(row: &BoardRow) -> Option<[String; COLUMN_COUNT]> {
    match row {
        BoardRow::EmptyState => None,
        BoardRow::Placeholder => Some(Default::default()),
        BoardRow::Change { change, .. } => Some([
            change.change_type.to_string(),
            change.method.to_string(),
            change.endpoint.clone(),
            change.description.clone(),
            change.impact.to_string(),
        ]),
    }
}

fn cell_colors(row: &BoardRow) -> [BoardColor; COLUMN_COUNT] {
    match row {
        BoardRow::Change { change, .. } => [
            change.change_type.color(),
            BoardColor::Amber,
            BoardColor::Amber,
            BoardColor::Amber,
            change.impact.color(),
        ],
        _ => [BoardColor::Gray; COLUMN_COUNT],
    }
}

/// The departure board: one row of flap cells per change plus the single
/// detail overlay.
pub struct BoardController {
    timings: BoardTimings,
    loading: bool,
    rows: Vec<BoardRow>,
    slots: Vec<Option<RowCells>>,
    overlay: Option<DetailOverlay>,
    queued: Option<(usize, SpecChange)>,
}

impl BoardController {
    pub fn new(timings: BoardTimings) -> Self {
        Self {
            timings,
            loading: false,
            rows: vec![BoardRow::EmptyState],
            slots: vec![None],
            overlay: None,
            queued: None,
        }
    }

    pub fn rows(&self) -> &[BoardRow] {
        &self.rows
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn overlay(&self) -> Option<&DetailOverlay> {
        self.overlay.as_ref()
    }

    pub fn status_line(&self) -> &'static str {
        if self.loading {
            STATUS_PROCESSING
        } else {
            STATUS_READY
        }
    }

    /// Re-lays the board. Cells persist by row index, so a value that
    /// changed at an index flips instead of popping in.
    pub fn sync(&mut self, result: Option<&ComparisonResult>, loading: bool, now: Instant) {
        self.loading = loading;
        self.rows = layout(result, loading, self.timings.placeholder_rows);

        for stale in self.slots.iter_mut().skip(self.rows.len()).flatten() {
            stale.iter_mut().for_each(FlapCell::teardown);
        }
        self.slots.resize_with(self.rows.len(), || None);

        let flip_duration = self.timings.flip_duration;
        for (row, slot) in self.rows.iter().zip(self.slots.iter_mut()) {
            let Some(targets) = cell_targets(row) else {
                if let Some(cells) = slot.as_mut() {
                    cells.iter_mut().for_each(FlapCell::teardown);
                }
                *slot = None;
                continue;
            };

            let cells = slot.get_or_insert_with(|| std::array::from_fn(|_| FlapCell::new(flip_duration)));
            for (cell, target) in cells.iter_mut().zip(targets.iter()) {
                cell.set_target(target, now);
            }
        }
    }

    /// Advances every cell and the overlay. A fully closed overlay is
    /// released here, and a queued selection opens in its place.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;

        for cells in self.slots.iter_mut().flatten() {
            for cell in cells.iter_mut() {
                changed |= cell.tick(now);
            }
        }

        if let Some(overlay) = self.overlay.as_mut() {
            changed |= overlay.tick(now);
            if overlay.is_closed() {
                self.overlay = None;
            }
        }

        if self.overlay.is_none() {
            if let Some((entry, change)) = self.queued.take() {
                log::debug!("Opening queued detail for entry #{}", entry);
                self.overlay = Some(DetailOverlay::open(change, entry, self.timings, now));
                changed = true;
            }
        }

        changed
    }

    /// Routes a click on `row_index`. Only change rows emit their change and
    /// open the overlay; a different change waits until the current overlay
    /// has fully closed.
    pub fn select(&mut self, row_index: usize, now: Instant) -> Option<SpecChange> {
        let Some(BoardRow::Change { index, change }) = self.rows.get(row_index) else {
            return None;
        };
        let entry = index + 1;
        let change = change.clone();

        if self.overlay.is_none() {
            self.overlay = Some(DetailOverlay::open(change.clone(), entry, self.timings, now));
            return Some(change);
        }

        if let Some(current) = self.overlay.as_mut() {
            if current.entry() != entry || current.is_closing() {
                current.request_close(now);
                self.queued = Some((entry, change.clone()));
            }
        }

        Some(change)
    }

    pub fn close_overlay(&mut self, now: Instant) {
        self.queued = None;
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.request_close(now);
        }
    }

    pub fn backdrop_click(&mut self, now: Instant) {
        self.queued = None;
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.backdrop_click(now);
        }
    }

    /// True when no cell is flipping and the overlay is either gone or
    /// resting open.
    pub fn is_settled(&self) -> bool {
        let cells_idle = self
            .slots
            .iter()
            .flatten()
            .all(|cells| cells.iter().all(|cell| !cell.is_transitioning()));
        let overlay_idle = self.overlay.as_ref().map_or(true, DetailOverlay::is_visible);

        cells_idle && overlay_idle && self.queued.is_none()
    }

    pub fn row_views(&self) -> Vec<RowView> {
        self.rows
            .iter()
            .zip(self.slots.iter())
            .map(|(row, slot)| {
                let colors = cell_colors(row);
                let cells = slot
                    .as_ref()
                    .map(|cells| {
                        cells
                            .iter()
                            .zip(BOARD_COLUMNS.iter())
                            .zip(colors.iter())
                            .map(|((cell, column), color)| cell.view(column, *color))
                            .collect::<Vec<_>>()
                    })
                    .unwrap_or_default();

                RowView {
                    kind: row.kind(),
                    entry: match row {
                        BoardRow::Change { index, .. } => Some(index + 1),
                        _ => None,
                    },
                    selectable: row.is_selectable(),
                    message: matches!(row, BoardRow::EmptyState).then(|| EMPTY_STATE_MESSAGE.to_string()),
                    cells,
                }
            })
            .collect()
    }

    pub fn overlay_view(&self) -> Option<OverlayView> {
        self.overlay.as_ref().map(DetailOverlay::view)
    }

    pub fn teardown(&mut self) {
        for cells in self.slots.iter_mut().flatten() {
            cells.iter_mut().for_each(FlapCell::teardown);
        }
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.teardown();
        }
        self.overlay = None;
        self.queued = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use crate::enums::board_row::RowKind;
    use crate::enums::change_type::ChangeType;
    use crate::enums::http_method::HttpMethod;
    use crate::enums::impact_level::ImpactLevel;
    use crate::enums::overlay_phase::OverlayPhase;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn change(change_type: ChangeType, method: HttpMethod, endpoint: &str, impact: ImpactLevel) -> SpecChange {
        SpecChange {
            change_type,
            endpoint: endpoint.to_string(),
            method,
            description: format!("{} changed", endpoint),
            technical_detail: String::new(),
            impact,
        }
    }

    fn result_of(changes: Vec<SpecChange>) -> ComparisonResult {
        ComparisonResult {
            summary: "Summary".to_string(),
            version_old: None,
            version_new: None,
            changes,
        }
    }

    fn texts(view: &RowView) -> Vec<&str> {
        view.cells.iter().map(|cell| cell.text.as_str()).collect()
    }

    #[test]
    fn loading_overrides_stale_result() {
        let stale = result_of(vec![change(ChangeType::Added, HttpMethod::Get, "/a", ImpactLevel::Low)]);

        let rows = layout(Some(&stale), true, 5);

        assert_eq!(rows, vec![BoardRow::Placeholder; 5]);
    }

    #[test]
    fn missing_or_empty_result_is_one_empty_state_row() {
        assert_eq!(layout(None, false, 5), vec![BoardRow::EmptyState]);
        assert_eq!(layout(Some(&result_of(vec![])), false, 5), vec![BoardRow::EmptyState]);
    }

    #[test]
    fn change_rows_keep_received_order() {
        let result = result_of(vec![
            change(ChangeType::Removed, HttpMethod::Delete, "/z", ImpactLevel::High),
            change(ChangeType::Added, HttpMethod::Get, "/a", ImpactLevel::Low),
            change(ChangeType::Modified, HttpMethod::Put, "/m", ImpactLevel::Medium),
        ]);

        let endpoints: Vec<String> = layout(Some(&result), false, 5)
            .into_iter()
            .filter_map(|row| match row {
                BoardRow::Change { change, .. } => Some(change.endpoint),
                _ => None,
            })
            .collect();

        assert_eq!(endpoints, vec!["/z", "/a", "/m"]);
    }

    #[test]
    fn placeholder_and_empty_rows_are_not_selectable() {
        let t0 = Instant::now();
        let mut board = BoardController::new(BoardTimings::default());

        board.sync(None, true, t0);
        assert_eq!(board.select(0, t0), None);

        board.sync(None, false, t0);
        assert_eq!(board.select(0, t0), None);
        assert!(board.overlay().is_none());
    }

    #[test]
    fn added_high_change_flips_in_and_opens_detail() {
        let t0 = Instant::now();
        let mut board = BoardController::new(BoardTimings::default());

        board.sync(None, true, t0);
        assert_eq!(board.status_line(), STATUS_PROCESSING);
        let views = board.row_views();
        assert_eq!(views.len(), 5);
        assert!(views.iter().all(|row| texts(row) == vec!["---"; 5]));

        let t1 = t0 + ms(2000);
        let result = result_of(vec![change(ChangeType::Added, HttpMethod::Post, "/widgets", ImpactLevel::High)]);
        board.sync(Some(&result), false, t1);
        assert_eq!(board.status_line(), STATUS_READY);

        board.tick(t1 + ms(299));
        let row = &board.row_views()[0];
        assert_eq!(texts(row), vec!["---"; 5]);
        assert!(row.cells.iter().all(|cell| cell.flipping));

        board.tick(t1 + ms(301));
        let views = board.row_views();
        assert_eq!(views.len(), 1);
        assert_eq!(texts(&views[0]), vec!["ADDED", "POST", "/widgets", "/widgets changed", "HIGH"]);
        assert_eq!(views[0].cells[0].color, BoardColor::Green);
        assert_eq!(views[0].cells[4].color, BoardColor::Red);
        assert!(board.is_settled());

        let selected = board.select(0, t1 + ms(500));
        assert_eq!(selected.map(|c| c.endpoint), Some("/widgets".to_string()));

        board.tick(t1 + ms(551));
        let overlay = board.overlay_view().unwrap();
        assert!(overlay.visible);
        assert_eq!(overlay.heading, "POST /widgets");
        assert_eq!(overlay.impact_label, "IMPACT: HIGH");
    }

    #[test]
    fn empty_changes_show_empty_state_and_release_cells() {
        let t0 = Instant::now();
        let mut board = BoardController::new(BoardTimings::default());
        board.sync(None, true, t0);

        board.sync(Some(&result_of(vec![])), false, t0 + ms(10));

        let views = board.row_views();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].kind, RowKind::EmptyState);
        assert!(views[0].cells.is_empty());
        assert_eq!(views[0].message.as_deref(), Some(EMPTY_STATE_MESSAGE));
        assert!(board.is_settled());
    }

    #[test]
    fn changed_value_at_same_index_flips() {
        let t0 = Instant::now();
        let mut board = BoardController::new(BoardTimings::default());
        let first = result_of(vec![change(ChangeType::Added, HttpMethod::Get, "/a", ImpactLevel::Low)]);
        board.sync(Some(&first), false, t0);
        board.tick(t0 + ms(301));

        let second = result_of(vec![change(ChangeType::Added, HttpMethod::Patch, "/a", ImpactLevel::Low)]);
        board.sync(Some(&second), false, t0 + ms(1000));

        let row = &board.row_views()[0];
        assert_eq!(row.cells[1].text, "GET");
        assert!(row.cells[1].flipping);
        assert!(!row.cells[0].flipping);

        board.tick(t0 + ms(1301));
        assert_eq!(board.row_views()[0].cells[1].text, "PATCH");
    }

    #[test]
    fn vanished_rows_are_dropped() {
        let t0 = Instant::now();
        let mut board = BoardController::new(BoardTimings::instant());
        let three = result_of(vec![
            change(ChangeType::Added, HttpMethod::Get, "/a", ImpactLevel::Low),
            change(ChangeType::Added, HttpMethod::Get, "/b", ImpactLevel::Low),
            change(ChangeType::Added, HttpMethod::Get, "/c", ImpactLevel::Low),
        ]);
        board.sync(Some(&three), false, t0);

        let one = result_of(vec![change(ChangeType::Added, HttpMethod::Get, "/a", ImpactLevel::Low)]);
        board.sync(Some(&one), false, t0 + ms(1));

        assert_eq!(board.row_views().len(), 1);
    }

    #[test]
    fn sequential_selection_never_shows_two_overlays() {
        let t0 = Instant::now();
        let mut board = BoardController::new(BoardTimings::default());
        let result = result_of(vec![
            change(ChangeType::Added, HttpMethod::Get, "/a", ImpactLevel::Low),
            change(ChangeType::Breaking, HttpMethod::Delete, "/b", ImpactLevel::High),
        ]);
        board.sync(Some(&result), false, t0);

        board.select(0, t0);
        board.tick(t0 + ms(51));
        assert_eq!(board.overlay().map(DetailOverlay::entry), Some(1));

        board.select(1, t0 + ms(100));
        assert_eq!(board.overlay().map(DetailOverlay::phase), Some(OverlayPhase::Closing));
        assert_eq!(board.overlay().map(DetailOverlay::entry), Some(1));

        board.tick(t0 + ms(499));
        assert_eq!(board.overlay().map(DetailOverlay::entry), Some(1));

        board.tick(t0 + ms(501));
        let overlay = board.overlay().unwrap();
        assert_eq!(overlay.entry(), 2);
        assert_eq!(overlay.phase(), OverlayPhase::Opening);

        board.tick(t0 + ms(552));
        assert!(board.overlay().unwrap().is_visible());
    }

    #[test]
    fn reselecting_open_entry_keeps_it_open() {
        let t0 = Instant::now();
        let mut board = BoardController::new(BoardTimings::default());
        let result = result_of(vec![change(ChangeType::Added, HttpMethod::Get, "/a", ImpactLevel::Low)]);
        board.sync(Some(&result), false, t0);

        board.select(0, t0);
        board.tick(t0 + ms(51));
        board.select(0, t0 + ms(60));

        assert!(board.overlay().unwrap().is_visible());
    }

    #[test]
    fn backdrop_click_releases_overlay_after_exit() {
        let t0 = Instant::now();
        let mut board = BoardController::new(BoardTimings::default());
        let result = result_of(vec![change(ChangeType::Added, HttpMethod::Get, "/a", ImpactLevel::Low)]);
        board.sync(Some(&result), false, t0);
        board.select(0, t0);
        board.tick(t0 + ms(51));

        board.backdrop_click(t0 + ms(100));
        board.tick(t0 + ms(499));
        assert!(board.overlay().is_some());

        board.tick(t0 + ms(501));
        assert!(board.overlay().is_none());
    }

    #[test]
    fn teardown_stops_all_animation() {
        let t0 = Instant::now();
        let mut board = BoardController::new(BoardTimings::default());
        let result = result_of(vec![change(ChangeType::Added, HttpMethod::Get, "/a", ImpactLevel::Low)]);
        board.sync(Some(&result), false, t0);
        board.select(0, t0);

        board.teardown();

        assert!(board.is_settled());
        assert!(!board.tick(t0 + ms(5000)));
    }
}
