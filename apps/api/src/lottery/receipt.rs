//! Thermal-receipt text layout for a lottery ticket.
//!
//! Output is plain monospace text sized for common roll widths; the host's
//! print dialog does the rest. No line is ever wider than the paper.

use serde::Deserialize;

use crate::lottery::ticket::Ticket;

const TITLE: &str = "KIOSK LOTTERY";
const FOOTER: &str = "GOOD LUCK!";
const CELL_GAP: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum PaperWidth {
    #[serde(rename = "58mm")]
    Mm58,
    #[default]
    #[serde(rename = "80mm")]
    Mm80,
}

impl PaperWidth {
    /// Printable columns at the usual 12x24 font.
    pub fn columns(self) -> usize {
        match self {
            PaperWidth::Mm58 => 32,
            PaperWidth::Mm80 => 48,
        }
    }
}

pub fn render_receipt(ticket: &Ticket, paper: PaperWidth) -> String {
    let width = paper.columns();
    let mut lines = vec![
        center(TITLE, width),
        center(&ticket.draw_name, width),
        "-".repeat(width),
        two_column("TICKET", ticket.id.as_str(), width),
        two_column(
            "ISSUED",
            &ticket.issued_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            width,
        ),
        "-".repeat(width),
    ];

    let cells: Vec<String> = ticket
        .numbers
        .as_slice()
        .iter()
        .map(|n| format!("{n:02}"))
        .collect();
    for row in number_rows(&cells, width) {
        lines.push(center(&row, width));
    }

    lines.push("-".repeat(width));
    lines.push(two_column("PRICE", &format!("{:.2}", ticket.price), width));
    lines.push("=".repeat(width));
    lines.push(center(FOOTER, width));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Packs number cells into rows that fit the width with a fixed gap.
fn number_rows(cells: &[String], width: usize) -> Vec<String> {
    let cell_width = cells.iter().map(|c| c.chars().count()).max().unwrap_or(2);
    let per_row = ((width + CELL_GAP) / (cell_width + CELL_GAP)).max(1);
    let gap = " ".repeat(CELL_GAP);
    cells
        .chunks(per_row)
        .map(|chunk| chunk.join(&gap))
        .collect()
}

fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

fn center(text: &str, width: usize) -> String {
    let text = truncate(text, width);
    let pad = (width - text.chars().count()) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

fn two_column(left: &str, right: &str, width: usize) -> String {
    let right = truncate(right, width);
    let room = width - right.chars().count();
    let left = if room == 0 {
        String::new()
    } else {
        truncate(left, room - 1)
    };
    let pad = width - left.chars().count() - right.chars().count();
    format!("{left}{}{right}", " ".repeat(pad))
}
