//! Document export.
//!
//! Export hands the rendered resume to a [`DocumentExporter`] and writes one
//! file named after the person. The built-in [`HtmlPrintExporter`] writes a
//! standalone HTML page with paged-media rules; rasterizing to PDF is left to
//! whatever prints that page.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::error::{Error, Result};
use crate::model::Resume;
use crate::render::{render_document, Template, Theme};

/// Message shown to the user when an export fails.
pub const EXPORT_FAILURE_MESSAGE: &str = "Error generating document. Please try again.";

/// Base name used when no name has been entered.
const DEFAULT_STEM: &str = "Resume";

/// Paper size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageFormat {
    /// ISO A4, 210 x 297 mm.
    #[default]
    A4,
    /// US Letter, 8.5 x 11 in.
    Letter,
}

impl fmt::Display for PageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A4 => write!(f, "A4"),
            Self::Letter => write!(f, "letter"),
        }
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Taller than wide.
    #[default]
    Portrait,
    /// Wider than tall.
    Landscape,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Portrait => write!(f, "portrait"),
            Self::Landscape => write!(f, "landscape"),
        }
    }
}

/// Options passed to the document exporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Page margin in millimetres.
    pub margin_mm: u32,
    /// Paper size.
    pub page_format: PageFormat,
    /// Page orientation.
    pub orientation: Orientation,
    /// Quality of embedded raster images, in (0, 1].
    pub image_quality: f32,
    /// Render scale used by rasterizing exporters.
    pub scale: f32,
    /// Upper bound on the whole export, in seconds.
    pub timeout_secs: u64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            margin_mm: 10,
            page_format: PageFormat::A4,
            orientation: Orientation::Portrait,
            image_quality: 0.98,
            scale: 3.0,
            timeout_secs: 60,
        }
    }
}

impl ExportOptions {
    /// Value for the CSS `@page { size: ... }` rule.
    #[must_use]
    pub fn page_size(&self) -> String {
        format!("{} {}", self.page_format, self.orientation)
    }

    /// The export timeout as a Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// File name for an exported document.
///
/// `"Ada  King Lovelace"` becomes `Ada_King_Lovelace_Resume.{extension}`;
/// leading and trailing whitespace is dropped rather than turned into `_`,
/// and a missing or blank name gives `Resume.{extension}`. Path separators are
/// replaced as well so the name always stays inside the output directory.
#[must_use]
pub fn document_file_name(full_name: Option<&str>, extension: &str) -> String {
    let words: Vec<&str> = full_name
        .map(str::split_whitespace)
        .into_iter()
        .flatten()
        .collect();
    if words.is_empty() {
        return format!("{DEFAULT_STEM}.{extension}");
    }
    let stem = words.join("_").replace(['/', '\\'], "_");
    format!("{stem}_{DEFAULT_STEM}.{extension}")
}

/// A backend that turns a rendered HTML document into an output file.
#[async_trait]
pub trait DocumentExporter: Send + Sync + fmt::Debug {
    /// Name of this exporter (for logging).
    fn name(&self) -> &'static str;

    /// Extension of the files this exporter writes, without the dot.
    fn extension(&self) -> &'static str;

    /// Wait until fonts and other assets needed for rendering are available.
    ///
    /// # Errors
    ///
    /// Returns an error if the assets cannot be made available.
    async fn ready(&self) -> Result<()> {
        Ok(())
    }

    /// Write `html` to `dest`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be produced or written.
    async fn export(&self, html: &str, options: &ExportOptions, dest: &Path) -> Result<()>;
}

/// Writes the print-ready HTML document as-is.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlPrintExporter;

#[async_trait]
impl DocumentExporter for HtmlPrintExporter {
    fn name(&self) -> &'static str {
        "html-print"
    }

    fn extension(&self) -> &'static str {
        "html"
    }

    async fn export(&self, html: &str, options: &ExportOptions, dest: &Path) -> Result<()> {
        debug!(
            "Writing {} document ({} bytes) to {}",
            options.page_size(),
            html.len(),
            dest.display()
        );
        tokio::fs::write(dest, html.as_bytes()).await?;
        Ok(())
    }
}

/// Marks an export as running for as long as it is alive.
#[derive(Debug)]
struct ExportGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> ExportGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| Error::ExportInProgress)?;
        Ok(Self { flag })
    }
}

impl Drop for ExportGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Runs exports through a backend, one at a time.
#[derive(Debug)]
pub struct Exporter<E = HtmlPrintExporter> {
    backend: E,
    options: ExportOptions,
    theme: Theme,
    in_progress: AtomicBool,
}

impl Exporter<HtmlPrintExporter> {
    /// Create an exporter writing print-ready HTML.
    #[must_use]
    pub fn html(options: ExportOptions, theme: Theme) -> Self {
        Self::new(HtmlPrintExporter, options, theme)
    }
}

impl<E: DocumentExporter> Exporter<E> {
    /// Create an exporter over the given backend.
    #[must_use]
    pub fn new(backend: E, options: ExportOptions, theme: Theme) -> Self {
        Self {
            backend,
            options,
            theme,
            in_progress: AtomicBool::new(false),
        }
    }

    /// Check if an export is currently running.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_progress.load(Ordering::SeqCst)
    }

    /// The options handed to the backend.
    #[must_use]
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Export `resume` rendered with `template` into `dir`.
    ///
    /// Waits for the backend to be ready, renders the document and writes it,
    /// all under the configured timeout. The busy flag is cleared whatever the
    /// outcome.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExportInProgress`] if another export is running,
    /// [`Error::Timeout`] if the export does not finish in time, or the
    /// backend's error.
    pub async fn export(&self, resume: &Resume, template: Template, dir: &Path) -> Result<PathBuf> {
        let _guard = ExportGuard::acquire(&self.in_progress)?;

        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir).map_err(|source| Error::DirectoryCreate {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let file_name =
            document_file_name(resume.personal.display_name(), self.backend.extension());
        let dest = dir.join(file_name);

        info!(
            "Exporting {} template via {} to {}",
            template,
            self.backend.name(),
            dest.display()
        );

        let run = async {
            self.backend.ready().await?;
            let html = render_document(resume, template, &self.theme, &self.options);
            self.backend.export(&html, &self.options, &dest).await
        };

        let outcome = match tokio::time::timeout(self.options.timeout(), run).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout {
                operation: format!("export to {}", dest.display()),
            }),
        };

        if let Err(err) = outcome {
            error!("Error generating document: {err}");
            return Err(err);
        }

        info!("Exported document to {}", dest.display());
        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("resumeforge_export_{name}_{}", std::process::id()))
    }

    #[derive(Debug)]
    struct SlowExporter {
        delay: Duration,
    }

    #[async_trait]
    impl DocumentExporter for SlowExporter {
        fn name(&self) -> &'static str {
            "slow"
        }

        fn extension(&self) -> &'static str {
            "txt"
        }

        async fn export(&self, _html: &str, _options: &ExportOptions, _dest: &Path) -> Result<()> {
            tokio::time::sleep(self.delay).await;
            Ok(())
        }
    }

    #[derive(Debug)]
    struct FailingExporter;

    #[async_trait]
    impl DocumentExporter for FailingExporter {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn extension(&self) -> &'static str {
            "pdf"
        }

        async fn export(&self, _html: &str, _options: &ExportOptions, _dest: &Path) -> Result<()> {
            Err(Error::export("canvas exploded"))
        }
    }

    #[derive(Debug)]
    struct NeverReady;

    #[async_trait]
    impl DocumentExporter for NeverReady {
        fn name(&self) -> &'static str {
            "never-ready"
        }

        fn extension(&self) -> &'static str {
            "pdf"
        }

        async fn ready(&self) -> Result<()> {
            std::future::pending::<()>().await;
            Ok(())
        }

        async fn export(&self, _html: &str, _options: &ExportOptions, _dest: &Path) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_file_name_from_name() {
        assert_eq!(
            document_file_name(Some("Ada  King\tLovelace"), "pdf"),
            "Ada_King_Lovelace_Resume.pdf"
        );
    }

    #[test]
    fn test_file_name_ignores_outer_whitespace() {
        assert_eq!(document_file_name(Some(" Ada "), "pdf"), "Ada_Resume.pdf");
        assert_eq!(
            document_file_name(Some("\tAda Lovelace\n"), "html"),
            "Ada_Lovelace_Resume.html"
        );
    }

    #[test]
    fn test_file_name_default() {
        assert_eq!(document_file_name(None, "pdf"), "Resume.pdf");
        assert_eq!(document_file_name(Some("   "), "html"), "Resume.html");
    }

    #[test]
    fn test_file_name_strips_separators() {
        assert_eq!(
            document_file_name(Some("../etc/passwd"), "html"),
            ".._etc_passwd_Resume.html"
        );
    }

    #[test]
    fn test_default_options() {
        let options = ExportOptions::default();
        assert_eq!(options.margin_mm, 10);
        assert_eq!(options.page_format, PageFormat::A4);
        assert_eq!(options.orientation, Orientation::Portrait);
        assert_eq!(options.page_size(), "A4 portrait");
        assert_eq!(options.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_page_size_letter_landscape() {
        let options = ExportOptions {
            page_format: PageFormat::Letter,
            orientation: Orientation::Landscape,
            ..ExportOptions::default()
        };
        assert_eq!(options.page_size(), "letter landscape");
    }

    #[tokio::test]
    async fn test_html_export_writes_named_file() {
        let dir = temp_dir("html");
        let mut resume = Resume::blank();
        resume.personal.full_name = Some("Grace Hopper".to_string());

        let exporter = Exporter::html(ExportOptions::default(), Theme::default());
        let path = exporter
            .export(&resume, Template::Minimal, &dir)
            .await
            .unwrap();

        assert_eq!(path, dir.join("Grace_Hopper_Resume.html"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("template-minimal"));
        assert!(written.contains("Grace Hopper"));
        assert!(!exporter.is_busy());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_second_export_while_busy_is_rejected() {
        let dir = temp_dir("busy");
        let exporter = Exporter::new(
            SlowExporter {
                delay: Duration::from_millis(50),
            },
            ExportOptions::default(),
            Theme::default(),
        );
        let resume = Resume::blank();

        let (first, second) = tokio::join!(
            exporter.export(&resume, Template::Classic, &dir),
            exporter.export(&resume, Template::Classic, &dir),
        );

        assert!(first.is_ok());
        assert!(matches!(second, Err(Error::ExportInProgress)));
        assert!(!exporter.is_busy());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_failed_export_releases_guard() {
        let dir = temp_dir("failing");
        let exporter = Exporter::new(FailingExporter, ExportOptions::default(), Theme::default());

        let err = exporter
            .export(&Resume::blank(), Template::Classic, &dir)
            .await
            .unwrap_err();

        assert!(err.is_export_error());
        assert!(!exporter.is_busy());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test(start_paused = true)]
    async fn test_export_times_out_waiting_for_ready() {
        let dir = temp_dir("timeout");
        let options = ExportOptions {
            timeout_secs: 1,
            ..ExportOptions::default()
        };
        let exporter = Exporter::new(NeverReady, options, Theme::default());

        let err = exporter
            .export(&Resume::blank(), Template::Classic, &dir)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Timeout { .. }));
        assert!(!exporter.is_busy());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
