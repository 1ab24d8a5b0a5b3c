use std::io::Write;
use crate::config::constants::{GATE_LABEL, SERVICE_TERMINAL_LABEL};
use crate::structs::board_snapshot::BoardSnapshot;
use crate::structs::cell_view::CellView;
use crate::structs::overlay_view::OverlayView;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const MIN_WIDTH: usize = 60;
const DEFAULT_WIDTH: usize = 100;
const ACTION_WIDTH: usize = 10;
const METHOD_WIDTH: usize = 8;
const IMPACT_WIDTH: usize = 8;

/// Source and target size labels shown in the board header.
pub struct InputLabels {
    pub source: String,
    pub target: String,
}

/// Renders board snapshots as ANSI text for the terminal.
pub struct BoardPrinter {}

impl BoardPrinter {
    /// Width of the attached terminal, or a sane default when piped.
    pub fn terminal_width() -> usize {
        terminal_size::terminal_size()
            .map(|(terminal_size::Width(width), _)| width as usize)
            .unwrap_or(DEFAULT_WIDTH)
            .max(MIN_WIDTH)
    }

    pub fn render(snapshot: &BoardSnapshot, inputs: &InputLabels, width: usize) -> String {
        let width = width.max(MIN_WIDTH);
        let rule = "━".repeat(width);
        let widths = Self::column_widths(width);
        let mut out = String::new();

        out.push_str(&format!("{}{}{}\n", BOLD, Self::spread(SERVICE_TERMINAL_LABEL, GATE_LABEL, width), RESET));
        out.push_str(&format!("SOURCE: {}  |  TARGET: {}\n", inputs.source, inputs.target));
        out.push_str(&format!("{}\n", rule));

        let status_right = snapshot.updated_at.as_deref().unwrap_or("");
        out.push_str(&format!("{}\n", Self::spread(&snapshot.status_line, status_right, width)));

        if let Some(error) = &snapshot.error {
            out.push_str(&format!("{}ERROR: {}{}\n", RED, error, RESET));
        }
        out.push_str(&format!("{}\n", rule));

        let header: Vec<String> = snapshot
            .columns
            .iter()
            .zip(widths.iter())
            .map(|(column, w)| Self::fit(&column.to_uppercase(), *w))
            .collect();
        out.push_str(&format!("{}{}{}\n", DIM, header.join(" "), RESET));

        for row in &snapshot.rows {
            if let Some(message) = &row.message {
                out.push('\n');
                for line in message.lines() {
                    out.push_str(&format!("{}\n", Self::center(line, width)));
                }
                out.push('\n');
                continue;
            }

            let cells: Vec<String> = row
                .cells
                .iter()
                .zip(widths.iter())
                .map(|(cell, w)| Self::paint(cell, *w))
                .collect();
            let marker = row.entry.map(|entry| format!("{:>2} ", entry)).unwrap_or_else(|| "   ".to_string());
            out.push_str(&format!("{}{}\n", marker, cells.join(" ")));
        }

        out.push_str(&format!("{}\n", rule));

        if let Some(summary) = &snapshot.summary {
            out.push_str(&format!("{}Terminal Summary{}\n", BOLD, RESET));
            out.push_str(&format!("{}\n", summary));
            out.push_str(&format!("{}\n", rule));
        }

        if let Some(overlay) = snapshot.overlay.as_ref().filter(|overlay| overlay.visible) {
            out.push_str(&Self::render_overlay(overlay, width));
        }

        out
    }

    fn render_overlay(overlay: &OverlayView, width: usize) -> String {
        let mut out = String::new();
        let color = overlay.color.ansi_code();

        out.push_str(&format!("{}{}{}\n", BOLD, Self::spread(&overlay.title, &overlay.close_label, width), RESET));
        out.push_str(&format!("{}[{}]{}  {}\n", color, overlay.badge, RESET, overlay.impact_label));
        out.push_str(&format!("{}{}{}\n\n", BOLD, overlay.heading, RESET));
        out.push_str("Briefing\n");
        out.push_str(&format!("  {}\n\n", overlay.description));
        out.push_str("Technical Analysis\n");
        for line in overlay.technical_detail.lines() {
            out.push_str(&format!("  {}\n", line));
        }
        out.push_str(&format!("\n{}\n", Self::center("END OF RECORD", width)));
        out
    }

    /// Action, method and impact are fixed; endpoint and description share the rest.
    fn column_widths(width: usize) -> [usize; 5] {
        let fixed = ACTION_WIDTH + METHOD_WIDTH + IMPACT_WIDTH + 3 + 4;
        let flexible = width.saturating_sub(fixed);
        let endpoint = flexible * 2 / 5;
        [ACTION_WIDTH, METHOD_WIDTH, endpoint, flexible - endpoint, IMPACT_WIDTH]
    }

    fn paint(cell: &CellView, width: usize) -> String {
        let text = Self::fit(&cell.text, width);
        if cell.flipping {
            format!("{}{}{}", DIM, text, RESET)
        } else {
            format!("{}{}{}", cell.color.ansi_code(), text, RESET)
        }
    }

    /// Pads or truncates to exactly `width` characters.
    fn fit(text: &str, width: usize) -> String {
        let count = text.chars().count();
        if count <= width {
            format!("{}{}", text, " ".repeat(width - count))
        } else if width > 0 {
            let kept: String = text.chars().take(width - 1).collect();
            format!("{}…", kept)
        } else {
            String::new()
        }
    }

    fn spread(left: &str, right: &str, width: usize) -> String {
        let used = left.chars().count() + right.chars().count();
        format!("{}{}{}", left, " ".repeat(width.saturating_sub(used).max(1)), right)
    }

    fn center(text: &str, width: usize) -> String {
        let pad = width.saturating_sub(text.chars().count()) / 2;
        format!("{}{}", " ".repeat(pad), text)
    }

    /// Clears the screen and draws one frame.
    pub fn draw(frame: &str) -> std::io::Result<()> {
        let mut stdout = std::io::stdout();
        write!(stdout, "\x1b[2J\x1b[H{}", frame)?;
        stdout.flush()
    }
}
