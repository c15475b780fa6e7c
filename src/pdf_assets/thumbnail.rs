use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use super::PdfError;

/// Rasterises the first page of a PDF to PNG.
pub trait ThumbnailRenderer {
    fn render_first_page(&self, pdf: &Path, out_png: &Path, dpi: u32) -> Result<(), PdfError>;
}

/// Drives poppler's `pdftoppm`.
#[derive(Debug, Clone)]
pub struct Pdftoppm {
    bin: PathBuf,
}

impl Pdftoppm {
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self { bin: bin.into() }
    }

    /// `PDFTOPPM_BIN` if set, else `pdftoppm` from `PATH`.
    pub fn from_env() -> Self {
        Self::new(std::env::var("PDFTOPPM_BIN").unwrap_or_else(|_| "pdftoppm".into()))
    }

    fn args(pdf: &Path, out_png: &Path, dpi: u32) -> Vec<std::ffi::OsString> {
        // pdftoppm appends ".png" to the output root itself
        let root = out_png.with_extension("");
        vec![
            "-png".into(),
            "-singlefile".into(),
            "-f".into(),
            "1".into(),
            "-l".into(),
            "1".into(),
            "-r".into(),
            dpi.to_string().into(),
            pdf.into(),
            root.into(),
        ]
    }
}

impl ThumbnailRenderer for Pdftoppm {
    fn render_first_page(&self, pdf: &Path, out_png: &Path, dpi: u32) -> Result<(), PdfError> {
        let output = Command::new(&self.bin)
            .args(Self::args(pdf, out_png, dpi))
            .output()
            .map_err(|e| PdfError::Render(format!("spawn {}: {e}", self.bin.display())))?;
        if !output.status.success() {
            return Err(PdfError::Render(format!(
                "{} exited with {}: {}",
                self.bin.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        debug!(png = %out_png.display(), "thumbnail rendered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_render_only_first_page_at_dpi() {
        let args = Pdftoppm::args(Path::new("/in/a.pdf"), Path::new("/out/a.png"), 150);
        let args: Vec<_> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(
            args,
            ["-png", "-singlefile", "-f", "1", "-l", "1", "-r", "150", "/in/a.pdf", "/out/a"]
        );
    }

    #[test]
    fn missing_binary_is_a_render_error() {
        let renderer = Pdftoppm::new("/nonexistent/bin/pdftoppm-nope");
        let err = renderer
            .render_first_page(Path::new("a.pdf"), Path::new("a.png"), 150)
            .unwrap_err();
        assert!(matches!(err, PdfError::Render(_)));
    }
}
