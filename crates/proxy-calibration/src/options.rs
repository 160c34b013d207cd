use crate::constants::*;
use image::Rgb;
use std::path::PathBuf;

/// Marker geometry shared by every paper size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerLayout {
    pub marker_size: u32,
    pub spacing: u32,
    pub margin_slots: u32,
}

impl Default for MarkerLayout {
    fn default() -> Self {
        Self {
            marker_size: MARKER_SIZE,
            spacing: MARKER_SPACING,
            margin_slots: MARGIN_SLOTS,
        }
    }
}

impl MarkerLayout {
    /// Distance between the top-left corners of neighbouring markers
    pub fn pitch(&self) -> u32 {
        self.marker_size + self.spacing
    }
}

/// Colors used on both sides of the sheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Markers on the center row and column
    pub accent: Rgb<u8>,
    /// Every other marker
    pub base: Rgb<u8>,
    /// "front" / "back" page labels
    pub label: Rgb<u8>,
    /// Offset labels under the back markers
    pub coordinate: Rgb<u8>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            accent: Rgb(ACCENT_COLOR),
            base: Rgb(BASE_COLOR),
            label: Rgb(LABEL_COLOR),
            coordinate: Rgb(COORDINATE_COLOR),
        }
    }
}

/// How the offset labels under the back markers are drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateLabelStyle {
    /// Distance from the marker's center down to the label's middle
    pub clearance: f32,
    pub font_size: f32,
    pub color: Rgb<u8>,
}

#[derive(Debug, Clone)]
pub struct CalibrationOptions {
    pub asset_dir: PathBuf,
    pub output_dir: PathBuf,
    pub layout: MarkerLayout,
    pub palette: Palette,
    pub label_font_size: f32,
    pub coordinate_font_size: f32,
    pub page_label_inset: f32,
    pub coordinate_label_clearance: f32,
    pub dpi: f32,
}

impl Default for CalibrationOptions {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets"),
            output_dir: PathBuf::from("calibration"),
            layout: MarkerLayout::default(),
            palette: Palette::default(),
            label_font_size: LABEL_FONT_SIZE,
            coordinate_font_size: COORDINATE_FONT_SIZE,
            page_label_inset: PAGE_LABEL_INSET,
            coordinate_label_clearance: COORDINATE_LABEL_CLEARANCE,
            dpi: OUTPUT_DPI,
        }
    }
}

impl CalibrationOptions {
    pub fn coordinate_labels(&self) -> CoordinateLabelStyle {
        CoordinateLabelStyle {
            clearance: self.coordinate_label_clearance,
            font_size: self.coordinate_font_size,
            color: self.palette.coordinate,
        }
    }
}
