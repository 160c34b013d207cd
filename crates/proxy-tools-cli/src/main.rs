use anyhow::{Result, bail};
use clap::Parser;
use proxy_calibration::{AssetDirectory, CalibrationOptions, PaperSize};

/// Generate duplex print calibration sheets for every supported paper size.
///
/// Reads `assets/<paper>_blank.jpg` and `assets/arial.ttf`, writes
/// `calibration/<paper>_calibration.pdf`.
#[derive(Parser)]
#[command(name = "proxy-calibrate", version)]
struct Cli {}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _ = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = CalibrationOptions::default();
    let provider = AssetDirectory::new(&options.asset_dir);

    let report = proxy_calibration::generate_all(&PaperSize::ALL, &provider, &options).await;

    for document in &report.generated {
        println!(
            "Generated {} calibration ({}x{} markers) → {}",
            document.paper,
            document.columns,
            document.rows,
            document.path.display()
        );
    }

    if !report.is_success() {
        for (paper, e) in &report.failed {
            log::error!("{}: {}", paper, e);
        }
        let failed: Vec<_> = report.failed.iter().map(|(p, _)| p.to_string()).collect();
        bail!(
            "calibration failed for {} of {} paper sizes: {}",
            failed.len(),
            PaperSize::ALL.len(),
            failed.join(", ")
        );
    }

    Ok(())
}
