//! Offline extraction of thumbnails and links from the self-help PDFs.
//!
//! For each configured PDF the first page is rendered to
//! `<out_dir>/<stem>.png` and every link found in page text or link
//! annotations is recorded in `<out_dir>/resources_from_pdfs.json`. A PDF that
//! is missing or unusable is logged and skipped; it never aborts the batch.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info, warn};

pub mod document;
pub mod links;
pub mod manifest;
pub mod thumbnail;

use document::PdfReader;
use manifest::{Manifest, ManifestEntry};
use thumbnail::ThumbnailRenderer;

pub const MANIFEST_FILE: &str = "resources_from_pdfs.json";
pub const DEFAULT_PDFS: [&str; 3] = ["nivi_resouces_vidio.pdf", "nivi_audio.pdf", "nivi_artical.pdf"];

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("pdf: {0}")]
    Parse(#[from] lopdf::Error),
    #[error("render: {0}")]
    Render(String),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a PDF did not make it into the manifest.
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("missing")]
    Missing,
    #[error("empty PDF")]
    Empty,
    #[error("unreadable: {0}")]
    Unreadable(PdfError),
    #[error("thumbnail failed: {0}")]
    Thumbnail(PdfError),
}

#[derive(Debug, Clone)]
pub struct ExtractConfig {
    pub pdfs: Vec<PathBuf>,
    pub out_dir: PathBuf,
    pub dpi: u32,
}

impl ExtractConfig {
    /// The three bundled PDFs under `root`, written to `root/src/assets/selfhelp`.
    pub fn for_root(root: &Path) -> Self {
        Self {
            pdfs: DEFAULT_PDFS.iter().map(|name| root.join(name)).collect(),
            out_dir: root.join("src").join("assets").join("selfhelp"),
            dpi: 150,
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.out_dir.join(MANIFEST_FILE)
    }
}

#[derive(Debug)]
pub struct Report {
    pub manifest_path: PathBuf,
    pub manifest: Manifest,
    pub skipped: Vec<(PathBuf, SkipReason)>,
}

pub fn run(
    cfg: &ExtractConfig,
    reader: &dyn PdfReader,
    renderer: &dyn ThumbnailRenderer,
) -> Result<Report, PdfError> {
    std::fs::create_dir_all(&cfg.out_dir)?;

    let mut manifest = Manifest::default();
    let mut skipped = Vec::new();
    for pdf in &cfg.pdfs {
        match process_one(cfg, pdf, reader, renderer) {
            Ok((name, entry)) => {
                info!(
                    pdf = %pdf.display(),
                    thumbnail = %entry.thumbnail,
                    links = entry.links.len(),
                    "processed"
                );
                manifest.insert(name, entry);
            }
            Err(reason) => {
                match &reason {
                    SkipReason::Missing | SkipReason::Empty => {
                        warn!(pdf = %pdf.display(), %reason, "skipped")
                    }
                    _ => error!(pdf = %pdf.display(), %reason, "skipped"),
                }
                skipped.push((pdf.clone(), reason));
            }
        }
    }

    let manifest_path = cfg.manifest_path();
    manifest.write_to(&manifest_path)?;
    info!(manifest = %manifest_path.display(), entries = manifest.len(), "done");

    Ok(Report {
        manifest_path,
        manifest,
        skipped,
    })
}

fn process_one(
    cfg: &ExtractConfig,
    pdf: &Path,
    reader: &dyn PdfReader,
    renderer: &dyn ThumbnailRenderer,
) -> Result<(String, ManifestEntry), SkipReason> {
    if !pdf.is_file() {
        return Err(SkipReason::Missing);
    }
    let name = pdf
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    info!(pdf = %pdf.display(), "processing");

    let contents = reader.read(pdf).map_err(SkipReason::Unreadable)?;
    if contents.page_count == 0 {
        return Err(SkipReason::Empty);
    }

    let out_png = cfg.out_dir.join(format!("{name}.png"));
    renderer
        .render_first_page(pdf, &out_png, cfg.dpi)
        .map_err(SkipReason::Thumbnail)?;

    let links = links::collect_links(&contents.text, &contents.annotation_uris);
    Ok((
        name,
        ManifestEntry {
            pdf: pdf.display().to_string(),
            thumbnail: out_png.display().to_string(),
            links,
        },
    ))
}
