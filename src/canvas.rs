//! Braille dot canvas the rings are painted on.
//!
//! Every terminal cell is one braille glyph holding a 2×4 dot matrix. A cell
//! also remembers the strongest [`Ink`] any of its dots was painted with;
//! that ink picks the colour the whole glyph is rendered in. Labels replace
//! cells with plain text.

use crate::layout::{DOTS_PER_COL, DOTS_PER_ROW};
use crate::ring::Ring;
use lipgloss_extras::lipgloss::{self, Color, Style};
use unicode_width::UnicodeWidthChar;

const BRAILLE_BLANK: u32 = 0x2800;

// Bit of each dot, indexed by [row][column] inside a cell.
const DOT_BITS: [[u8; DOTS_PER_COL]; DOTS_PER_ROW] = [
    [0x01, 0x08],
    [0x02, 0x10],
    [0x04, 0x20],
    [0x40, 0x80],
];

// Thinnest band a stroke is drawn with, in dots from the centre line.
const MIN_HALF_WIDTH: f32 = 0.5;

/// What a dot was painted for. Later variants win over earlier ones when a
/// cell holds dots of both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Ink {
    /// Nothing painted.
    #[default]
    None,
    /// The guide circle of the ring with this index.
    Guide(usize),
    /// The progress arc of the ring with this index.
    Progress(usize),
}

#[derive(Debug, Clone)]
enum Cell {
    Dots { bits: u8, ink: Ink },
    Text { ch: char, style: usize },
    // Right half of a wide character.
    Covered,
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Dots {
            bits: 0,
            ink: Ink::None,
        }
    }
}

/// A grid of braille cells with an optional text overlay.
#[derive(Debug, Clone)]
pub struct Canvas {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
    styles: Vec<Style>,
}

impl Canvas {
    /// Creates a blank canvas `cols` cells wide and `rows` cells high.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::default(); cols * rows],
            styles: Vec::new(),
        }
    }

    /// Width in cells.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Height in cells.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Width in dots.
    pub fn dot_width(&self) -> usize {
        self.cols * DOTS_PER_COL
    }

    /// Height in dots.
    pub fn dot_height(&self) -> usize {
        self.rows * DOTS_PER_ROW
    }

    /// Turns on the dot at `(x, y)` and raises the cell's ink to `ink` if it
    /// is stronger. Dots outside the canvas and dots under text are ignored.
    pub fn set_dot(&mut self, x: usize, y: usize, ink: Ink) {
        if x >= self.dot_width() || y >= self.dot_height() {
            return;
        }
        let index = (y / DOTS_PER_ROW) * self.cols + x / DOTS_PER_COL;
        if let Cell::Dots { bits, ink: current } = &mut self.cells[index] {
            *bits |= DOT_BITS[y % DOTS_PER_ROW][x % DOTS_PER_COL];
            *current = (*current).max(ink);
        }
    }

    /// Whether the dot at `(x, y)` is on.
    pub fn dot(&self, x: usize, y: usize) -> bool {
        if x >= self.dot_width() || y >= self.dot_height() {
            return false;
        }
        match self.cells[(y / DOTS_PER_ROW) * self.cols + x / DOTS_PER_COL] {
            Cell::Dots { bits, .. } => bits & DOT_BITS[y % DOTS_PER_ROW][x % DOTS_PER_COL] != 0,
            _ => false,
        }
    }

    /// Ink of the cell at `(col, row)`; text cells report [`Ink::None`].
    pub fn ink(&self, col: usize, row: usize) -> Ink {
        match self.cell(col, row) {
            Some(Cell::Dots { ink, .. }) => *ink,
            _ => Ink::None,
        }
    }

    /// Character shown in the cell at `(col, row)`. Cells without dots are a
    /// plain space; the right half of a wide character is empty.
    pub fn glyph(&self, col: usize, row: usize) -> Option<char> {
        match self.cell(col, row)? {
            Cell::Dots { bits: 0, .. } => Some(' '),
            Cell::Dots { bits, .. } => char::from_u32(BRAILLE_BLANK + u32::from(*bits)),
            Cell::Text { ch, .. } => Some(*ch),
            Cell::Covered => None,
        }
    }

    fn cell(&self, col: usize, row: usize) -> Option<&Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells.get(row * self.cols + col)
    }

    /// Paints the guide circle and the progress arc of `ring` inside its
    /// bounds. Angles are in degrees, 0 pointing right and growing
    /// clockwise.
    pub fn paint_ring(&mut self, ring: &Ring, start_angle: f32) {
        let bounds = ring.bounds;
        if bounds.is_empty() {
            return;
        }

        let cx = bounds.center_x();
        let cy = bounds.center_y();
        let radius = bounds.width().min(bounds.height()) / 2.0;
        let guide_half = (ring.guide_width() / 2.0).max(MIN_HALF_WIDTH);
        let stroke_half = (ring.stroke_width / 2.0).max(MIN_HALF_WIDTH);
        let sweep = ring.sweep_degrees();
        let reach = radius + guide_half.max(stroke_half);

        let x_range = span(cx - reach, cx + reach, self.dot_width());
        let y_range = span(cy - reach, cy + reach, self.dot_height());

        for y in y_range {
            for x in x_range.clone() {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let off_line = ((dx * dx + dy * dy).sqrt() - radius).abs();

                if off_line <= stroke_half && sweep > 0.0 {
                    let angle = dy.atan2(dx).to_degrees();
                    let offset = (f64::from(angle) - f64::from(start_angle)).rem_euclid(360.0);
                    if offset < sweep {
                        self.set_dot(x, y, Ink::Progress(ring.index()));
                        continue;
                    }
                }
                if off_line <= guide_half {
                    self.set_dot(x, y, Ink::Guide(ring.index()));
                }
            }
        }
    }

    /// Writes `text` centred on `anchor`, a point in dots whose `y` is the
    /// text baseline. Characters falling off the canvas are dropped.
    pub fn draw_label(&mut self, anchor: (f32, f32), text: &str, style: Style) {
        if text.is_empty() || self.rows == 0 {
            return;
        }
        let (x, y) = anchor;
        let width = lipgloss::width_visible(text) as f32;
        let row = ((y - 1.0).max(0.0) / DOTS_PER_ROW as f32) as usize;
        let start = (x / DOTS_PER_COL as f32 - width / 2.0).round();

        self.write_text(start as isize, row.min(self.rows - 1), text, style);
    }

    /// Writes `text` from cell `(col, row)`, replacing whatever dots the cells
    /// held.
    pub fn write_text(&mut self, col: isize, row: usize, text: &str, style: Style) {
        if row >= self.rows {
            return;
        }
        let style_index = self.styles.len();
        self.styles.push(style);

        let mut col = col;
        for ch in text.chars() {
            let width = ch.width().unwrap_or(0) as isize;
            if width == 0 {
                continue;
            }
            if col >= 0 && col as usize + width as usize <= self.cols {
                let index = row * self.cols + col as usize;
                self.cells[index] = Cell::Text {
                    ch,
                    style: style_index,
                };
                if width == 2 {
                    self.cells[index + 1] = Cell::Covered;
                }
            }
            col += width;
        }
    }

    /// Renders the canvas, one line per row. Runs of cells with the same ink
    /// or label share one styled span; ring colours are looked up in `rings`.
    pub fn render(&self, rings: &[Ring]) -> String {
        let mut lines = Vec::with_capacity(self.rows);
        for row in 0..self.rows {
            let mut line = String::new();
            let mut run = String::new();
            let mut run_key = RunKey::Blank;

            for col in 0..self.cols {
                let Some(ch) = self.glyph(col, row) else {
                    continue;
                };
                let key = match &self.cells[row * self.cols + col] {
                    Cell::Dots { bits: 0, .. } => RunKey::Blank,
                    Cell::Dots { ink, .. } => RunKey::Ink(*ink),
                    Cell::Text { style, .. } => RunKey::Text(*style),
                    Cell::Covered => run_key,
                };
                if key != run_key && !run.is_empty() {
                    line.push_str(&self.paint_run(run_key, &run, rings));
                    run.clear();
                }
                run_key = key;
                run.push(ch);
            }
            if !run.is_empty() {
                line.push_str(&self.paint_run(run_key, &run, rings));
            }
            lines.push(line);
        }
        lines.join("\n")
    }

    fn paint_run(&self, key: RunKey, run: &str, rings: &[Ring]) -> String {
        let color = match key {
            RunKey::Blank | RunKey::Ink(Ink::None) => return run.to_string(),
            RunKey::Text(style) => {
                return match self.styles.get(style) {
                    Some(style) => style.render(run),
                    None => run.to_string(),
                };
            }
            RunKey::Ink(Ink::Guide(index)) => rings.get(index).map(|r| r.guide_color.as_str()),
            RunKey::Ink(Ink::Progress(index)) => {
                rings.get(index).map(|r| r.progress_color.as_str())
            }
        };
        match color {
            Some(color) => Style::new().foreground(Color::from(color)).render(run),
            None => run.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunKey {
    Blank,
    Ink(Ink),
    Text(usize),
}

// Dot indices covering `[from, to]`, clipped to `0..limit`.
fn span(from: f32, to: f32, limit: usize) -> std::ops::Range<usize> {
    let start = from.floor().max(0.0) as usize;
    let end = (to.ceil().max(0.0) as usize + 1).min(limit);
    start.min(end)..end
}
