use std::path::PathBuf;

use nivi_backend::pdf_assets::{self, document::LopdfReader, thumbnail::Pdftoppm, ExtractConfig};
use nivi_backend::telemetry;

/// Usage: `extract-pdf-assets [PROJECT_ROOT]` (defaults to the current directory).
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init("nivi_backend=info,extract_pdf_assets=info");

    let root = match std::env::args_os().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => std::env::current_dir()?,
    };
    let cfg = ExtractConfig::for_root(&root);

    let report = pdf_assets::run(&cfg, &LopdfReader, &Pdftoppm::from_env())?;
    tracing::info!(
        written = %report.manifest_path.display(),
        entries = report.manifest.len(),
        skipped = report.skipped.len(),
        "manifest written"
    );
    Ok(())
}
