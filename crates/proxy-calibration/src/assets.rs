//! Template and font assets for each paper size

use crate::types::*;
use image::RgbImage;
use printpdf::font::ParsedFont;
use std::future::Future;
use std::path::{Path, PathBuf};

/// Raw bytes of one font file, kept unparsed so assets can cross threads
#[derive(Debug, Clone)]
pub struct FontAsset {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

/// The two fonts used on a calibration sheet
#[derive(Clone)]
pub struct FontSet {
    pub label: ParsedFont,
    pub coordinate: ParsedFont,
}

impl FontSet {
    /// Parse both fonts, reporting an undecodable font as a missing asset.
    pub fn parse(paper: PaperSize, label: &FontAsset, coordinate: &FontAsset) -> Result<Self> {
        Ok(Self {
            label: parse_font(paper, &label.path, &label.bytes)?,
            coordinate: parse_font(paper, &coordinate.path, &coordinate.bytes)?,
        })
    }
}

fn parse_font(paper: PaperSize, path: &Path, bytes: &[u8]) -> Result<ParsedFont> {
    let mut warnings = Vec::new();
    ParsedFont::from_bytes(bytes, 0, &mut warnings).ok_or_else(|| CalibrationError::AssetMissing {
        paper,
        path: path.to_owned(),
        reason: "not a usable TrueType/OpenType font".to_string(),
    })
}

/// Everything one paper size needs before drawing starts
#[derive(Debug, Clone)]
pub struct PageAssets {
    /// Blank page raster, in whatever orientation it was stored
    pub template: RgbImage,
    pub label_font: FontAsset,
    pub coordinate_font: FontAsset,
}

impl PageAssets {
    /// Parse the font files. Parsed fonts stay on the thread that draws the PDF.
    pub fn fonts(&self, paper: PaperSize) -> Result<FontSet> {
        FontSet::parse(paper, &self.label_font, &self.coordinate_font)
    }
}

/// Supplies the blank template and fonts for a paper size.
pub trait PageTemplateProvider {
    fn load(&self, paper: PaperSize) -> impl Future<Output = Result<PageAssets>> + Send;
}

/// Assets laid out as `<root>/<paper>_blank.jpg` plus font files in the same directory
#[derive(Debug, Clone)]
pub struct AssetDirectory {
    root: PathBuf,
    label_font: PathBuf,
    coordinate_font: PathBuf,
}

impl AssetDirectory {
    pub const DEFAULT_FONT: &'static str = "arial.ttf";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            label_font: PathBuf::from(Self::DEFAULT_FONT),
            coordinate_font: PathBuf::from(Self::DEFAULT_FONT),
        }
    }

    /// Use other font files, relative to the asset root
    pub fn with_fonts(mut self, label: impl Into<PathBuf>, coordinate: impl Into<PathBuf>) -> Self {
        self.label_font = label.into();
        self.coordinate_font = coordinate.into();
        self
    }

    pub fn template_path(&self, paper: PaperSize) -> PathBuf {
        self.root.join(paper.template_filename())
    }
}

impl PageTemplateProvider for AssetDirectory {
    async fn load(&self, paper: PaperSize) -> Result<PageAssets> {
        let template_path = self.template_path(paper);
        let label_path = self.root.join(&self.label_font);
        let coordinate_path = self.root.join(&self.coordinate_font);

        let template_bytes = read_asset(paper, &template_path).await?;
        let label_bytes = read_asset(paper, &label_path).await?;
        let coordinate_bytes = if coordinate_path == label_path {
            label_bytes.clone()
        } else {
            read_asset(paper, &coordinate_path).await?
        };

        // Decoding is CPU-bound
        let template = tokio::task::spawn_blocking(move || {
            image::load_from_memory(&template_bytes)
                .map(|image| image.to_rgb8())
                .map_err(|e| CalibrationError::AssetMissing {
                    paper,
                    path: template_path,
                    reason: e.to_string(),
                })
        })
        .await??;

        Ok(PageAssets {
            template,
            label_font: FontAsset {
                path: label_path,
                bytes: label_bytes,
            },
            coordinate_font: FontAsset {
                path: coordinate_path,
                bytes: coordinate_bytes,
            },
        })
    }
}

async fn read_asset(paper: PaperSize, path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .map_err(|e| CalibrationError::AssetMissing {
            paper,
            path: path.to_owned(),
            reason: e.to_string(),
        })
}
