//! Marker grid planning
//!
//! Works out how many markers fit on an oriented page and where the grid
//! has to start so that it sits centered on the page.

use std::fmt;

use crate::options::MarkerLayout;
use crate::types::*;

// =============================================================================
// Parity
// =============================================================================

/// Whether an axis has a true center marker.
///
/// With an odd count the crosshair runs through the middle marker; with an
/// even count it straddles the gap between the two middle markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    Odd,
    Even,
}

impl Parity {
    pub fn of(count: u32) -> Self {
        if count % 2 == 1 {
            Parity::Odd
        } else {
            Parity::Even
        }
    }

    /// First marker coordinate for a grid of `2 * half (+ 1)` markers centered on `center`.
    pub fn start(self, center: f32, half: u32, layout: &MarkerLayout) -> f32 {
        let half = half as f32;
        let size = layout.marker_size as f32;
        let spacing = layout.spacing as f32;
        match self {
            Parity::Odd => center - half * spacing - (half + 0.5) * size,
            Parity::Even => center - (half - 0.5) * spacing - half * size,
        }
    }
}

// =============================================================================
// Axis Planning
// =============================================================================

/// Marker count and start coordinate along one page axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisPlan {
    pub count: u32,
    pub half: u32,
    pub start: f32,
}

/// Plan one axis of the grid.
///
/// # Arguments
/// * `dimension` - Page extent along the axis in pixels
/// * `layout` - Marker geometry
/// * `paper` / `axis` - Only used to describe a failure
pub fn plan_axis(
    dimension: u32,
    layout: &MarkerLayout,
    paper: PaperSize,
    axis: Axis,
) -> Result<AxisPlan> {
    if layout.pitch() == 0 {
        return Err(CalibrationError::InvalidLayout(
            "marker size plus spacing must be greater than 0".to_string(),
        ));
    }

    let count = (dimension / layout.pitch()) as i64 - layout.margin_slots as i64;
    if count <= 0 {
        return Err(CalibrationError::InvalidGridConfiguration { paper, axis, count });
    }

    let count = count as u32;
    let half = count / 2;
    let center = (dimension / 2) as f32;
    let start = Parity::of(count).start(center, half, layout);

    Ok(AxisPlan { count, half, start })
}

// =============================================================================
// Marker Grid
// =============================================================================

/// Signed distance of a back marker from the crosshair, in grid steps.
///
/// The back marker is shifted by exactly this many pixels on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerOffset {
    pub dx: i32,
    pub dy: i32,
}

impl fmt::Display for MarkerOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.dx, self.dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerGrid {
    pub columns: u32,
    pub rows: u32,
    pub half_columns: u32,
    pub half_rows: u32,
    pub start_x: f32,
    pub start_y: f32,
    pub layout: MarkerLayout,
}

impl MarkerGrid {
    /// Plan the grid for an oriented page. Both axes are planned independently.
    pub fn plan(page: &PageGeometry, layout: &MarkerLayout) -> Result<Self> {
        let x = plan_axis(page.width, layout, page.paper, Axis::Horizontal)?;
        let y = plan_axis(page.height, layout, page.paper, Axis::Vertical)?;

        Ok(Self {
            columns: x.count,
            rows: y.count,
            half_columns: x.half,
            half_rows: y.half,
            start_x: x.start,
            start_y: y.start,
            layout: *layout,
        })
    }

    /// Top-left corner of the front marker at (col, row)
    pub fn marker_position(&self, col: u32, row: u32) -> (f32, f32) {
        let pitch = self.layout.pitch() as f32;
        (
            self.start_x + col as f32 * pitch,
            self.start_y + row as f32 * pitch,
        )
    }

    pub fn offset(&self, col: u32, row: u32) -> MarkerOffset {
        MarkerOffset {
            dx: col as i32 - self.half_columns as i32,
            dy: row as i32 - self.half_rows as i32,
        }
    }

    /// True for markers on the center column or center row
    pub fn is_crosshair(&self, col: u32, row: u32) -> bool {
        col == self.half_columns || row == self.half_rows
    }

    /// Every (col, row) of the grid, column by column
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..self.columns).flat_map(move |col| (0..self.rows).map(move |row| (col, row)))
    }

    /// Extent from the first marker's leading edge to the last marker's trailing edge
    pub fn span(&self, axis: Axis) -> f32 {
        let count = match axis {
            Axis::Horizontal => self.columns,
            Axis::Vertical => self.rows,
        };
        (count * self.layout.marker_size + (count - 1) * self.layout.spacing) as f32
    }
}

// =============================================================================
// Tests
// =============================================================================
