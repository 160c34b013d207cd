//! Two-page calibration PDF assembly

use crate::assets::FontSet;
use crate::constants::px_to_pt;
use crate::surface::{DrawCommand, FontRole, Surface, TextAnchor};
use crate::types::{CalibrationError, Result};
use image::{ImageFormat, RgbImage};
use printpdf::color::Color;
use printpdf::font::{FontMetrics, ParsedFont};
use printpdf::graphics::{LinePoint, PaintMode, Point, Polygon, PolygonRing, WindingOrder};
use printpdf::image::RawImage;
use printpdf::matrix::TextMatrix;
use printpdf::ops::Op;
use printpdf::text::TextItem;
use printpdf::xobject::{XObject, XObjectTransform};
use printpdf::{
    FontId, ImageCompression, ImageOptimizationOptions, Mm, PdfDocument, PdfPage, PdfSaveOptions,
    Pt, Rgb, XObjectId,
};
use std::io::Cursor;

/// Build the calibration PDF: `front` as page 1 and `back`, turned by 180°,
/// as page 2.
pub fn compose_document(
    front: &Surface,
    back: Surface,
    fonts: &FontSet,
    dpi: f32,
) -> Result<Vec<u8>> {
    let back = back.rotated_180();

    let mut doc = PdfDocument::new("Calibration");
    let font_ids = PageFonts {
        label: doc.add_font(&fonts.label),
        coordinate: doc.add_font(&fonts.coordinate),
    };

    for surface in [front, &back] {
        let page = render_page(&mut doc, surface, fonts, &font_ids, dpi)?;
        doc.pages.push(page);
    }

    let save_options = PdfSaveOptions {
        image_optimization: Some(lossless_images()),
        ..Default::default()
    };
    let mut warnings = Vec::new();
    let bytes = doc.save(&save_options, &mut warnings);

    Ok(bytes)
}

struct PageFonts {
    label: FontId,
    coordinate: FontId,
}

/// Maps template pixels (top-left origin) to PDF points (bottom-left origin)
struct PageSpace {
    height_pt: f32,
    dpi: f32,
}

impl PageSpace {
    fn len(&self, px: f32) -> f32 {
        px_to_pt(px, self.dpi)
    }

    fn point(&self, x: f32, y: f32) -> Point {
        Point {
            x: Pt(self.len(x)),
            y: Pt(self.height_pt - self.len(y)),
        }
    }
}

fn render_page(
    doc: &mut PdfDocument,
    surface: &Surface,
    fonts: &FontSet,
    font_ids: &PageFonts,
    dpi: f32,
) -> Result<PdfPage> {
    let page_width_pt = px_to_pt(surface.width() as f32, dpi);
    let page_height_pt = px_to_pt(surface.height() as f32, dpi);
    let space = PageSpace {
        height_pt: page_height_pt,
        dpi,
    };

    let mut ops = Vec::new();

    let background = embed_background(doc, surface.background())?;
    ops.push(Op::UseXobject {
        id: background,
        transform: XObjectTransform {
            translate_x: Some(Pt(0.0)),
            translate_y: Some(Pt(0.0)),
            scale_x: Some(1.0),
            scale_y: Some(1.0),
            rotate: None,
            dpi: Some(dpi),
        },
    });

    for command in surface.commands() {
        match command {
            DrawCommand::FillSquare { x, y, size, color } => {
                let corners = [
                    (*x, *y),
                    (x + size, *y),
                    (x + size, y + size),
                    (*x, y + size),
                ];
                let polygon = Polygon {
                    rings: vec![PolygonRing {
                        points: corners
                            .iter()
                            .map(|&(cx, cy)| LinePoint {
                                p: space.point(cx, cy),
                                bezier: false,
                            })
                            .collect(),
                    }],
                    mode: PaintMode::Fill,
                    winding_order: WindingOrder::NonZero,
                };
                ops.push(Op::SetFillColor {
                    col: pdf_color(*color),
                });
                ops.push(Op::DrawPolygon { polygon });
            }
            DrawCommand::Text {
                text,
                x,
                y,
                anchor,
                font,
                size,
                color,
                upside_down,
            } => {
                let (parsed, font_id) = match font {
                    FontRole::Label => (&fonts.label, &font_ids.label),
                    FontRole::Coordinate => (&fonts.coordinate, &font_ids.coordinate),
                };

                // Baseline start relative to the anchor, in the text's own upright frame
                let width = text_width(parsed, text, *size);
                let dy = baseline_offset(&parsed.font_metrics, *anchor, *size);
                let dx = match anchor {
                    TextAnchor::RightTop => -width,
                    TextAnchor::Middle => -width / 2.0,
                };
                let (origin_x, origin_y) = if *upside_down {
                    (x - dx, y - dy)
                } else {
                    (x + dx, y + dy)
                };
                let origin = space.point(origin_x, origin_y);
                let matrix = if *upside_down {
                    TextMatrix::TranslateRotate(origin.x, origin.y, 180.0)
                } else {
                    TextMatrix::Translate(origin.x, origin.y)
                };

                ops.push(Op::StartTextSection);
                ops.push(Op::SetFillColor {
                    col: pdf_color(*color),
                });
                ops.push(Op::SetFontSize {
                    font: font_id.clone(),
                    size: Pt(space.len(*size)),
                });
                ops.push(Op::SetTextMatrix { matrix });
                ops.push(Op::WriteText {
                    items: vec![TextItem::Text(text.clone())],
                    font: font_id.clone(),
                });
                ops.push(Op::EndTextSection);
            }
        }
    }

    Ok(PdfPage::new(
        Mm::from(Pt(page_width_pt)),
        Mm::from(Pt(page_height_pt)),
        ops,
    ))
}

fn embed_background(doc: &mut PdfDocument, background: &RgbImage) -> Result<XObjectId> {
    // PNG keeps every pixel as-is: no chroma subsampling, no lossy quantization
    let mut png = Vec::new();
    background
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| CalibrationError::Pdf(format!("Failed to encode page background: {}", e)))?;

    let mut warnings = Vec::new();
    let raw_image = RawImage::decode_from_bytes(&png, &mut warnings)
        .map_err(|e| CalibrationError::Pdf(format!("Failed to embed page background: {}", e)))?;

    let xobj_id = XObjectId::new();
    doc.resources
        .xobjects
        .map
        .insert(xobj_id.clone(), XObject::Image(raw_image));

    Ok(xobj_id)
}

fn pdf_color(color: image::Rgb<u8>) -> Color {
    let [r, g, b] = color.0;
    Color::Rgb(Rgb::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        None,
    ))
}

/// Flate-compress the page rasters as they are: no resampling, no JPEG, no
/// greyscale detection.
fn lossless_images() -> ImageOptimizationOptions {
    ImageOptimizationOptions {
        quality: None,
        max_image_size: None,
        dither_greyscale: None,
        convert_to_greyscale: Some(false),
        auto_optimize: Some(false),
        format: Some(ImageCompression::Flate),
    }
}

fn units_per_em(metrics: &FontMetrics) -> f32 {
    match metrics.units_per_em {
        0 => 1000.0,
        units => units as f32,
    }
}

/// Distance from an anchor down to the text baseline, in the same units as `size`.
///
/// `RightTop` hangs the text from the font's ascender line. `Middle` centers
/// the ascender-to-descender box on the anchor.
fn baseline_offset(metrics: &FontMetrics, anchor: TextAnchor, size: f32) -> f32 {
    let scale = size / units_per_em(metrics);
    let ascender = metrics.ascender as f32;
    let descender = metrics.descender as f32;
    match anchor {
        TextAnchor::RightTop => ascender * scale,
        TextAnchor::Middle => (ascender + descender) / 2.0 * scale,
    }
}

/// Advance width of `text` at `size`, in the same units as `size`.
fn text_width(font: &ParsedFont, text: &str, size: f32) -> f32 {
    let units_per_em = units_per_em(&font.font_metrics);

    let mut width = 0.0;
    for ch in text.chars() {
        if let Some(glyph_id) = font.lookup_glyph_index(ch as u32) {
            let advance = font.get_horizontal_advance(glyph_id);
            width += (advance as f32 / units_per_em) * size;
        }
    }
    width
}
