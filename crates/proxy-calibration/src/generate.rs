//! Calibration sheet generation
//!
//! Each paper size runs through the same pipeline:
//! 1. Load the blank template and fonts
//! 2. Turn the template to landscape and plan the marker grid
//! 3. Draw the front and back sides
//! 4. Turn the back side over and write the two-page PDF
//!
//! Paper sizes are independent; a failure for one size is reported and the
//! batch moves on to the next.

use crate::assets::PageTemplateProvider;
use crate::grid::MarkerGrid;
use crate::io::write_document;
use crate::marks::{render_markers, render_page_label};
use crate::options::CalibrationOptions;
use crate::pdf::compose_document;
use crate::surface::{Surface, orient_landscape};
use crate::types::*;
use image::RgbImage;
use std::path::PathBuf;

/// Both sides of one calibration sheet, before the back is turned over
#[derive(Debug, Clone)]
pub struct CalibrationSheet {
    pub grid: MarkerGrid,
    pub front: Surface,
    pub back: Surface,
}

/// A calibration PDF that was written successfully
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedDocument {
    pub paper: PaperSize,
    pub path: PathBuf,
    pub columns: u32,
    pub rows: u32,
}

/// Outcome of a batch run, one entry per requested paper size
#[derive(Debug, Default)]
pub struct CalibrationReport {
    pub generated: Vec<GeneratedDocument>,
    pub failed: Vec<(PaperSize, CalibrationError)>,
}

impl CalibrationReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Draw both sides of the sheet for one paper size.
pub fn render_sheet(
    paper: PaperSize,
    template: RgbImage,
    options: &CalibrationOptions,
) -> Result<CalibrationSheet> {
    let template = orient_landscape(template);
    let page = PageGeometry::new(paper, template.width(), template.height());

    let nominal = paper.landscape_pixels(options.dpi);
    if (page.width, page.height) != nominal {
        log::warn!(
            "{} template is {}x{}px, expected {}x{}px at {} DPI",
            paper,
            page.width,
            page.height,
            nominal.0,
            nominal.1,
            options.dpi
        );
    }

    debug_assert!(page.is_landscape());

    let grid = MarkerGrid::plan(&page, &options.layout)?;

    let mut front = Surface::new(template.clone());
    let mut back = Surface::new(template);
    render_page_label(&mut front, "front", options);
    render_page_label(&mut back, "back", options);

    render_markers(
        &grid,
        &mut front,
        &mut back,
        options.palette.accent,
        options.palette.base,
        &options.coordinate_labels(),
    );

    Ok(CalibrationSheet { grid, front, back })
}

/// Generate and write the calibration PDF for a single paper size.
///
/// Nothing is written unless the whole document was built.
pub async fn generate_calibration<P: PageTemplateProvider>(
    paper: PaperSize,
    provider: &P,
    options: &CalibrationOptions,
) -> Result<GeneratedDocument> {
    let assets = provider.load(paper).await?;
    let render_options = options.clone();

    // Drawing and PDF encoding are CPU-bound
    let (grid, bytes) = tokio::task::spawn_blocking(move || {
        let fonts = assets.fonts(paper)?;
        let sheet = render_sheet(paper, assets.template, &render_options)?;
        let bytes = compose_document(&sheet.front, sheet.back, &fonts, render_options.dpi)?;
        Ok::<_, CalibrationError>((sheet.grid, bytes))
    })
    .await??;

    let path = write_document(bytes, &options.output_dir, paper).await?;
    log::info!(
        "{}: {}x{} markers → {}",
        paper,
        grid.columns,
        grid.rows,
        path.display()
    );

    Ok(GeneratedDocument {
        paper,
        path,
        columns: grid.columns,
        rows: grid.rows,
    })
}

/// Generate a calibration PDF for every paper size in `papers`, one at a time.
pub async fn generate_all<P: PageTemplateProvider>(
    papers: &[PaperSize],
    provider: &P,
    options: &CalibrationOptions,
) -> CalibrationReport {
    let mut report = CalibrationReport::default();

    for &paper in papers {
        match generate_calibration(paper, provider, options).await {
            Ok(document) => report.generated.push(document),
            Err(e) => {
                log::warn!("{}: calibration failed: {}", paper, e);
                report.failed.push((paper, e));
            }
        }
    }

    report
}
