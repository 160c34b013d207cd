use image::{Rgb, RgbImage};
use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};
use proxy_calibration::*;
use std::path::{Path, PathBuf};

const FIXTURE_FONT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/DejaVuSans.ttf");

fn write_template(dir: &Path, paper: PaperSize, width: u32, height: u32) {
    let template = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
    template.save(dir.join(paper.template_filename())).unwrap();
}

fn setup(templates: &[(PaperSize, u32, u32)]) -> (tempfile::TempDir, AssetDirectory, CalibrationOptions) {
    let dir = tempfile::tempdir().unwrap();
    let asset_dir = dir.path().join("assets");
    std::fs::create_dir_all(&asset_dir).unwrap();
    for &(paper, width, height) in templates {
        write_template(&asset_dir, paper, width, height);
    }

    let provider = AssetDirectory::new(&asset_dir).with_fonts(FIXTURE_FONT, FIXTURE_FONT);
    let options = CalibrationOptions {
        asset_dir,
        output_dir: dir.path().join("calibration"),
        ..Default::default()
    };
    (dir, provider, options)
}

fn output_path(options: &CalibrationOptions, paper: PaperSize) -> PathBuf {
    options.output_dir.join(paper.output_filename())
}

#[tokio::test]
async fn test_generate_mixed_parity_sheet() {
    let (_dir, provider, options) = setup(&[(PaperSize::Letter, 1000, 700)]);

    let document = generate_calibration(PaperSize::Letter, &provider, &options)
        .await
        .unwrap();

    assert_eq!(document.paper, PaperSize::Letter);
    assert_eq!(document.columns, 4);
    assert_eq!(document.rows, 1);
    assert_eq!(document.path, output_path(&options, PaperSize::Letter));

    let bytes = std::fs::read(&document.path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_portrait_template_is_turned_to_landscape() {
    let (_dir, provider, options) = setup(&[(PaperSize::A4, 700, 1000)]);

    let document = generate_calibration(PaperSize::A4, &provider, &options)
        .await
        .unwrap();

    assert_eq!(document.columns, 4);
    assert_eq!(document.rows, 1);
}

#[tokio::test]
async fn test_rerun_overwrites_previous_output() {
    let (_dir, provider, options) = setup(&[(PaperSize::Tabloid, 1200, 800)]);
    let path = output_path(&options, PaperSize::Tabloid);
    std::fs::create_dir_all(&options.output_dir).unwrap();
    std::fs::write(&path, b"stale").unwrap();

    generate_calibration(PaperSize::Tabloid, &provider, &options)
        .await
        .unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_missing_template_is_reported() {
    let (_dir, provider, options) = setup(&[]);

    let err = generate_calibration(PaperSize::A3, &provider, &options)
        .await
        .unwrap_err();

    match err {
        CalibrationError::AssetMissing { paper, path, .. } => {
            assert_eq!(paper, PaperSize::A3);
            assert!(path.ends_with("a3_blank.jpg"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!output_path(&options, PaperSize::A3).exists());
}

#[tokio::test]
async fn test_corrupt_font_is_reported() {
    let (dir, _, options) = setup(&[(PaperSize::Letter, 1000, 700)]);
    let bad_font = dir.path().join("broken.ttf");
    std::fs::write(&bad_font, b"definitely not a font").unwrap();
    let provider = AssetDirectory::new(&options.asset_dir).with_fonts(&bad_font, FIXTURE_FONT);

    let err = generate_calibration(PaperSize::Letter, &provider, &options)
        .await
        .unwrap_err();

    match err {
        CalibrationError::AssetMissing { path, .. } => assert_eq!(path, bad_font),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_page_too_small_writes_nothing() {
    let (_dir, provider, options) = setup(&[(PaperSize::ArchB, 1000, 600)]);

    let err = generate_calibration(PaperSize::ArchB, &provider, &options)
        .await
        .unwrap_err();

    match err {
        CalibrationError::InvalidGridConfiguration { paper, axis, count } => {
            assert_eq!(paper, PaperSize::ArchB);
            assert_eq!(axis, Axis::Vertical);
            assert_eq!(count, 0);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!output_path(&options, PaperSize::ArchB).exists());
}

#[tokio::test]
async fn test_batch_isolates_failures() {
    let (_dir, provider, options) = setup(&[
        (PaperSize::Letter, 1000, 700),
        (PaperSize::A3, 500, 500),
        (PaperSize::ArchB, 1300, 900),
    ]);

    let papers = [
        PaperSize::Letter,
        PaperSize::A4,
        PaperSize::A3,
        PaperSize::ArchB,
    ];
    let report = generate_all(&papers, &provider, &options).await;

    assert!(!report.is_success());
    let generated: Vec<_> = report.generated.iter().map(|d| d.paper).collect();
    assert_eq!(generated, vec![PaperSize::Letter, PaperSize::ArchB]);

    assert_eq!(report.failed.len(), 2);
    assert_eq!(report.failed[0].0, PaperSize::A4);
    assert!(matches!(
        report.failed[0].1,
        CalibrationError::AssetMissing { .. }
    ));
    assert_eq!(report.failed[1].0, PaperSize::A3);
    assert!(matches!(
        report.failed[1].1,
        CalibrationError::InvalidGridConfiguration {
            axis: Axis::Horizontal,
            ..
        }
    ));

    assert!(output_path(&options, PaperSize::Letter).exists());
    assert!(output_path(&options, PaperSize::ArchB).exists());
    assert!(!output_path(&options, PaperSize::A4).exists());
    assert!(!output_path(&options, PaperSize::A3).exists());
}

#[test]
fn test_rendering_is_deterministic() {
    let options = CalibrationOptions::default();
    let template = || RgbImage::from_pixel(3300, 2550, Rgb([250, 250, 250]));

    let first = render_sheet(PaperSize::Letter, template(), &options).unwrap();
    let second = render_sheet(PaperSize::Letter, template(), &options).unwrap();

    assert_eq!(first.grid, second.grid);
    assert_eq!(first.front, second.front);
    assert_eq!(first.back, second.back);
    assert_eq!(
        first.back.clone().rotated_180(),
        second.back.clone().rotated_180()
    );
}

#[test]
fn test_sheet_labels_both_sides() {
    let options = CalibrationOptions::default();
    let template = RgbImage::from_pixel(1000, 700, Rgb([255, 255, 255]));
    let sheet = render_sheet(PaperSize::Letter, template, &options).unwrap();

    let page_label = |surface: &Surface| match &surface.commands()[0] {
        DrawCommand::Text { text, font, .. } => {
            assert_eq!(*font, FontRole::Label);
            text.clone()
        }
        other => panic!("unexpected command: {other:?}"),
    };
    assert_eq!(page_label(&sheet.front), "front");
    assert_eq!(page_label(&sheet.back), "back");
}

fn bundled_fonts() -> FontSet {
    let font = FontAsset {
        path: PathBuf::from(FIXTURE_FONT),
        bytes: std::fs::read(FIXTURE_FONT).unwrap(),
    };
    FontSet::parse(PaperSize::Letter, &font, &font).unwrap()
}

fn compose_sheet(width: u32, height: u32) -> Vec<u8> {
    let options = CalibrationOptions::default();
    let template = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
    let sheet = render_sheet(PaperSize::Letter, template, &options).unwrap();
    compose_document(&sheet.front, sheet.back, &bundled_fonts(), options.dpi).unwrap()
}

fn media_box(doc: &Document, page_id: ObjectId) -> Vec<f32> {
    doc.get_dictionary(page_id)
        .unwrap()
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_float().unwrap())
        .collect()
}

fn first_operands(doc: &Document, page_id: ObjectId, operator: &str) -> Vec<f32> {
    let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
    content
        .operations
        .iter()
        .find(|op| op.operator == operator)
        .unwrap_or_else(|| panic!("no {operator} operator on page"))
        .operands
        .iter()
        .map(|v| v.as_float().unwrap())
        .collect()
}

fn assert_close(actual: &[f32], expected: &[f32]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 0.01, "{actual:?} vs {expected:?}");
    }
}

#[test]
fn test_compose_with_bundled_font() {
    let bytes = compose_sheet(1000, 700);
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_document_has_front_and_turned_back_pages() {
    let doc = Document::load_mem(&compose_sheet(1000, 700)).unwrap();
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 2);

    // 1000x700 px at 300 DPI
    for &page_id in pages.values() {
        assert_close(&media_box(&doc, page_id), &[0.0, 0.0, 240.0, 168.0]);
    }

    // Page labels come first: upright on the front, turned over on the back
    let front_label = first_operands(&doc, pages[&1], "Tm");
    assert_close(&front_label[..4], &[1.0, 0.0, 0.0, 1.0]);
    let back_label = first_operands(&doc, pages[&2], "Tm");
    assert_close(&back_label[..4], &[-1.0, 0.0, 0.0, -1.0]);

    // First front marker: (337.5, 337.5) px, top-left corner
    assert_close(&first_operands(&doc, pages[&1], "m"), &[81.0, 87.0]);
    // First back marker: (335.5, 337.5) px, turned to (639.5, 337.5)
    assert_close(&first_operands(&doc, pages[&2], "m"), &[153.48, 87.0]);
}

#[test]
fn test_page_rasters_are_flate_compressed() {
    let doc = Document::load_mem(&compose_sheet(1000, 700)).unwrap();

    let images: Vec<_> = doc
        .objects
        .values()
        .filter_map(|object| object.as_stream().ok())
        .filter(|stream| {
            stream
                .dict
                .get(b"Subtype")
                .and_then(|subtype| subtype.as_name())
                .is_ok_and(|name| name == b"Image")
        })
        .collect();
    assert_eq!(images.len(), 2);

    for image in images {
        let filter = image.dict.get(b"Filter").unwrap();
        let flate = match filter {
            Object::Name(name) => name.as_slice() == b"FlateDecode",
            Object::Array(filters) => filters
                .iter()
                .any(|f| f.as_name().is_ok_and(|name| name == b"FlateDecode")),
            _ => false,
        };
        assert!(flate, "unexpected image filter: {filter:?}");
        // Raw RGB would be 1000 * 700 * 3 bytes
        assert!(image.content.len() < 2_100_000);
    }
}

#[test]
fn test_portrait_template_renders_landscape_surfaces() {
    let options = CalibrationOptions::default();
    let template = RgbImage::from_pixel(700, 1000, Rgb([255, 255, 255]));
    let sheet = render_sheet(PaperSize::A4, template, &options).unwrap();

    assert_eq!((sheet.front.width(), sheet.front.height()), (1000, 700));
    assert_eq!((sheet.back.width(), sheet.back.height()), (1000, 700));
    assert_eq!((sheet.grid.columns, sheet.grid.rows), (4, 1));
}
