//! Calibration marker rendering
//!
//! The front side gets a uniform marker grid. The back side gets the same
//! grid with every marker pushed away from the crosshair by its own grid
//! distance in pixels, and a label naming that offset. Comparing the two
//! sides against the labels shows skew and shear anywhere on the sheet, not
//! only the translation at the center.

use image::Rgb;

use crate::grid::MarkerGrid;
use crate::options::{CalibrationOptions, CoordinateLabelStyle};
use crate::surface::{FontRole, Surface, TextAnchor};

/// Draw the front and back marker sets.
pub fn render_markers(
    grid: &MarkerGrid,
    front: &mut Surface,
    back: &mut Surface,
    accent_color: Rgb<u8>,
    base_color: Rgb<u8>,
    labels: &CoordinateLabelStyle,
) {
    let size = grid.layout.marker_size as f32;
    let half_size = (grid.layout.marker_size / 2) as f32;

    for (col, row) in grid.cells() {
        let (front_x, front_y) = grid.marker_position(col, row);

        let color = if grid.is_crosshair(col, row) {
            accent_color
        } else {
            base_color
        };

        front.fill_square(front_x, front_y, size, color);

        let offset = grid.offset(col, row);
        let back_x = front_x + offset.dx as f32;
        let back_y = front_y + offset.dy as f32;

        back.fill_square(back_x, back_y, size, color);
        back.text(
            offset.to_string(),
            back_x + half_size,
            back_y + half_size + labels.clearance,
            TextAnchor::Middle,
            FontRole::Coordinate,
            labels.font_size,
            labels.color,
        );
    }
}

/// Put the side name near the bottom-right corner of a page.
pub fn render_page_label(surface: &mut Surface, label: &str, options: &CalibrationOptions) {
    let x = surface.width() as f32 - options.page_label_inset;
    let y = surface.height() as f32 - options.page_label_inset;
    surface.text(
        label,
        x,
        y,
        TextAnchor::RightTop,
        FontRole::Label,
        options.label_font_size,
        options.palette.label,
    );
}
