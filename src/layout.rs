//! Geometry for the rings and the three text zones.
//!
//! All values are expressed in canvas dots. A terminal cell holds a 2×4
//! braille dot matrix, which makes a dot roughly square on common terminal
//! fonts, so circles stay round.

use crate::text::TextPosition;

/// Horizontal dots per terminal cell.
pub const DOTS_PER_COL: usize = 2;
/// Vertical dots per terminal cell.
pub const DOTS_PER_ROW: usize = 4;

/// An axis-aligned rectangle in dot coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
}

impl Rect {
    /// Creates a rectangle from its four edges.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Width of the rectangle; negative when the edges are inverted.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height of the rectangle; negative when the edges are inverted.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Horizontal centre.
    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    /// Vertical centre.
    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }

    /// True when the rectangle has no positive area.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}

/// Padding reserved around the component, in dots.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    /// Left padding.
    pub left: f32,
    /// Top padding.
    pub top: f32,
    /// Right padding.
    pub right: f32,
    /// Bottom padding.
    pub bottom: f32,
}

impl Insets {
    /// The same padding on every side.
    pub fn uniform(value: f32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }
}

/// Side length of the square the rings are drawn in.
///
/// The component is always square: the smaller of the padded width and
/// height wins.
pub fn square_size(width: f32, height: f32, insets: Insets) -> f32 {
    let w = width - insets.left - insets.right;
    let h = height - insets.top - insets.bottom;
    w.min(h).max(0.0)
}

/// Bounds of the ring at `index`; ring 0 is the outermost one.
///
/// Each ring is inset by its stroke width plus `index * padding`.
pub fn ring_bounds(size: f32, insets: Insets, stroke: f32, padding: f32, index: usize) -> Rect {
    let other = padding * index as f32;
    Rect::new(
        insets.left + stroke + other,
        insets.top + stroke + other,
        size - insets.left - stroke - other,
        size - insets.top - stroke - other,
    )
}

/// The three stacked text zones inside the innermost ring.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextZones {
    /// Zone of the top label.
    pub top: Rect,
    /// Zone of the value readout.
    pub center: Rect,
    /// Zone of the bottom label.
    pub bottom: Rect,
}

impl TextZones {
    /// Zone for the given label position.
    pub fn zone(&self, position: TextPosition) -> Rect {
        match position {
            TextPosition::Top => self.top,
            TextPosition::Center => self.center,
            TextPosition::Bottom => self.bottom,
        }
    }

    /// Anchor point (horizontal centre, baseline) of the label at `position`.
    pub fn anchor(&self, position: TextPosition) -> (f32, f32) {
        let rect = self.zone(position);
        match position {
            TextPosition::Top => (rect.center_x(), rect.top + rect.bottom / 3.0),
            TextPosition::Center => (rect.center_x(), rect.bottom),
            TextPosition::Bottom => (rect.center_x(), rect.center_y()),
        }
    }
}

/// Computes the text zones for `ring_count` rings drawn `padding` dots apart
/// in a component `width` dots wide.
pub fn text_zones(ring_count: usize, padding: f32, insets: Insets, width: f32) -> TextZones {
    let inner = padding * ring_count as f32;

    let left = insets.left + inner * 1.5;
    let right = width - inner * 1.5;
    let top = insets.top + inner * 1.25;
    let bottom = width - inner * 1.25;

    let top_zone = Rect::new(left, top, right, top + (bottom / 3.0) / 1.5);
    let center_zone = Rect::new(
        left,
        top_zone.bottom,
        right,
        top_zone.bottom + top_zone.height(),
    );
    let bottom_zone = Rect::new(
        left,
        center_zone.bottom,
        right,
        center_zone.bottom + center_zone.height(),
    );

    tracing::trace!(?top_zone, ?center_zone, ?bottom_zone, "text zones");

    TextZones {
        top: top_zone,
        center: center_zone,
        bottom: bottom_zone,
    }
}
