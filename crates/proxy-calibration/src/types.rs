use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalibrationError {
    #[error("Missing asset for {paper}: {path}: {reason}")]
    AssetMissing {
        paper: PaperSize,
        path: PathBuf,
        reason: String,
    },
    #[error("Invalid grid configuration for {paper}: {axis} marker count must be greater than 0; received: {count}")]
    InvalidGridConfiguration {
        paper: PaperSize,
        axis: Axis,
        count: i64,
    },
    #[error("Invalid marker layout: {0}")]
    InvalidLayout(String),
    #[error("IO error at {path}: {source}")]
    IoFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, CalibrationError>;

/// Paper sizes that ship a blank calibration template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaperSize {
    Letter,
    Tabloid,
    A4,
    A3,
    ArchB,
}

impl PaperSize {
    pub const ALL: [PaperSize; 5] = [
        PaperSize::Letter,
        PaperSize::Tabloid,
        PaperSize::A4,
        PaperSize::A3,
        PaperSize::ArchB,
    ];

    /// Identifier used in asset and output file names
    pub fn identifier(self) -> &'static str {
        match self {
            PaperSize::Letter => "letter",
            PaperSize::Tabloid => "tabloid",
            PaperSize::A4 => "a4",
            PaperSize::A3 => "a3",
            PaperSize::ArchB => "archb",
        }
    }

    /// Base dimensions (portrait: width < height)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Tabloid => (279.4, 431.8),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::ArchB => (304.8, 457.2),
        }
    }

    /// Nominal landscape raster size of the template at the given resolution
    pub fn landscape_pixels(self, dpi: f32) -> (u32, u32) {
        let (w, h) = self.dimensions_mm();
        let to_px = |mm: f32| (mm / 25.4 * dpi).round() as u32;
        (to_px(h), to_px(w))
    }

    pub fn template_filename(self) -> String {
        format!("{}_blank.jpg", self.identifier())
    }

    pub fn output_filename(self) -> String {
        format!("{}_calibration.pdf", self.identifier())
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Page axis a grid dimension was planned along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => f.write_str("horizontal"),
            Axis::Vertical => f.write_str("vertical"),
        }
    }
}

/// Oriented (landscape) pixel size of one paper size's template
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub paper: PaperSize,
    pub width: u32,
    pub height: u32,
}

impl PageGeometry {
    pub fn new(paper: PaperSize, width: u32, height: u32) -> Self {
        Self {
            paper,
            width,
            height,
        }
    }

    pub fn is_landscape(&self) -> bool {
        self.width >= self.height
    }
}
