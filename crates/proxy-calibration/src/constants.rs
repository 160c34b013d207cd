//! Shared constants for calibration sheets
//!
//! All distances are raster pixels of the blank template unless the name
//! says otherwise.

// =============================================================================
// Resolution
// =============================================================================

/// Resolution the templates are drawn at and the PDF is laid out for
pub const OUTPUT_DPI: f32 = 300.0;

/// Points per inch in PDF user space
pub const POINTS_PER_INCH: f32 = 72.0;

/// Convert template pixels to PDF points at the given resolution
#[inline]
pub fn px_to_pt(px: f32, dpi: f32) -> f32 {
    px * POINTS_PER_INCH / dpi
}

// =============================================================================
// Marker Grid
// =============================================================================

/// Side of each square marker
pub const MARKER_SIZE: u32 = 25;

/// Gap between neighbouring markers
pub const MARKER_SPACING: u32 = 75;

/// Marker slots held back per axis to keep the grid clear of the page edges
pub const MARGIN_SLOTS: u32 = 6;

/// Vertical clearance between a back marker's center and its offset label
pub const COORDINATE_LABEL_CLEARANCE: f32 = 30.0;

// =============================================================================
// Labels
// =============================================================================

/// Size of the "front"/"back" page labels
pub const LABEL_FONT_SIZE: f32 = 40.0;

/// Size of the per-marker offset labels
pub const COORDINATE_FONT_SIZE: f32 = 25.0;

/// Distance of the page label's top-right corner from the bottom-right page corner
pub const PAGE_LABEL_INSET: f32 = 180.0;

// =============================================================================
// Colors
// =============================================================================

pub const BASE_COLOR: [u8; 3] = [0, 0, 0];
pub const ACCENT_COLOR: [u8; 3] = [0, 0, 255];
pub const LABEL_COLOR: [u8; 3] = [0, 0, 0];
pub const COORDINATE_COLOR: [u8; 3] = [255, 0, 0];
