mod assets;
mod constants;
mod generate;
mod grid;
mod io;
mod marks;
mod options;
mod pdf;
mod surface;
mod types;

pub use assets::{AssetDirectory, FontAsset, FontSet, PageAssets, PageTemplateProvider};
pub use constants::*;
pub use generate::{
    CalibrationReport, CalibrationSheet, GeneratedDocument, generate_all, generate_calibration,
    render_sheet,
};
pub use grid::{AxisPlan, MarkerGrid, MarkerOffset, Parity, plan_axis};
pub use io::write_document;
pub use marks::{render_markers, render_page_label};
pub use options::*;
pub use pdf::compose_document;
pub use surface::{DrawCommand, FontRole, Surface, TextAnchor, orient_landscape};
pub use types::*;
