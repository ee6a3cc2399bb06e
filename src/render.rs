//! PDF printing through a headless Chrome/Chromium.

use std::io::Write;
use std::path::{Path, PathBuf};

use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};

use crate::branding::PageTemplates;
use crate::error::{Error, Result};

const MM_PER_INCH: f64 = 25.4;
const A4_WIDTH_MM: f64 = 210.0;
const A4_HEIGHT_MM: f64 = 297.0;

/// Resolves once every font the document uses has loaded.
const FONTS_READY: &str = "document.fonts.ready.then(() => document.fonts.status)";

/// Page margins in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMargins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl PageMargins {
    pub const PLAIN: PageMargins = PageMargins {
        top: 20.0,
        bottom: 20.0,
        left: 15.0,
        right: 15.0,
    };

    /// Leaves room for the branded header and footer.
    pub const BRANDED: PageMargins = PageMargins {
        top: 32.0,
        bottom: 28.0,
        left: 15.0,
        right: 15.0,
    };
}

/// A composed document ready to print.
#[derive(Debug, Clone)]
pub struct PrintJob {
    pub html: String,
    pub templates: Option<PageTemplates>,
}

impl PrintJob {
    pub fn margins(&self) -> PageMargins {
        if self.templates.is_some() {
            PageMargins::BRANDED
        } else {
            PageMargins::PLAIN
        }
    }

    /// Chrome print settings: A4 with backgrounds, header/footer only when branded.
    pub fn pdf_options(&self) -> PrintToPdfOptions {
        let margins = self.margins();
        let (header_template, footer_template) = match &self.templates {
            Some(t) => (Some(t.header.clone()), Some(t.footer.clone())),
            None => (None, None),
        };

        PrintToPdfOptions {
            display_header_footer: Some(self.templates.is_some()),
            print_background: Some(true),
            paper_width: Some(A4_WIDTH_MM / MM_PER_INCH),
            paper_height: Some(A4_HEIGHT_MM / MM_PER_INCH),
            margin_top: Some(margins.top / MM_PER_INCH),
            margin_bottom: Some(margins.bottom / MM_PER_INCH),
            margin_left: Some(margins.left / MM_PER_INCH),
            margin_right: Some(margins.right / MM_PER_INCH),
            header_template,
            footer_template,
            ..Default::default()
        }
    }
}

/// Something that turns a print job into PDF bytes.
pub trait PdfPrinter {
    /// `work_dir` is where the document is staged so relative links resolve.
    fn print(&self, job: &PrintJob, work_dir: &Path) -> Result<Vec<u8>>;
}

/// Prints with a locally installed Chrome/Chromium.
#[derive(Debug, Clone)]
pub struct ChromePrinter {
    executable: PathBuf,
    sandbox: bool,
}

impl ChromePrinter {
    /// Find the browser: explicit path first, then `CHROME` and the usual install locations.
    pub fn locate(explicit: Option<&Path>) -> Result<Self> {
        let executable = match explicit {
            Some(path) if path.is_file() => path.to_path_buf(),
            Some(path) => {
                return Err(Error::BrowserNotFound(format!(
                    "{} does not exist",
                    path.display()
                )));
            }
            None => headless_chrome::browser::default_executable().map_err(Error::BrowserNotFound)?,
        };
        log::debug!("Using browser at {}", executable.display());

        Ok(Self {
            executable,
            sandbox: true,
        })
    }

    /// Disable the Chrome sandbox (needed when running as root, e.g. in containers).
    pub fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    fn launch(&self) -> Result<Browser> {
        let options = LaunchOptions::default_builder()
            .path(Some(self.executable.clone()))
            .headless(true)
            .sandbox(self.sandbox)
            .build()
            .map_err(|e| Error::Render(e.to_string()))?;

        Browser::new(options).map_err(|e| Error::Render(format!("failed to launch browser: {e:#}")))
    }
}

impl PdfPrinter for ChromePrinter {
    fn print(&self, job: &PrintJob, work_dir: &Path) -> Result<Vec<u8>> {
        let staged = stage_html(&job.html, work_dir)?;
        let url = file_url(staged.path())?;

        let browser = self.launch()?;
        let tab = browser
            .new_tab()
            .map_err(|e| Error::Render(format!("failed to open tab: {e:#}")))?;

        log::debug!("Loading {}", url);
        tab.navigate_to(&url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|e| Error::Render(format!("failed to load document: {e:#}")))?;

        // Web fonts still loading at print time fall back to system fonts
        tab.evaluate(FONTS_READY, true)
            .map_err(|e| Error::Render(format!("waiting for fonts failed: {e:#}")))?;

        tab.print_to_pdf(Some(job.pdf_options()))
            .map_err(|e| Error::Render(format!("print failed: {e:#}")))
    }
}

/// Write the HTML to a temporary file, removed when the handle drops.
fn stage_html(html: &str, work_dir: &Path) -> Result<tempfile::NamedTempFile> {
    let builder = {
        let mut b = tempfile::Builder::new();
        b.prefix(".md2pdf-").suffix(".html");
        b
    };

    let mut file = match builder.tempfile_in(work_dir) {
        Ok(file) => file,
        Err(e) => {
            log::warn!(
                "Cannot stage HTML in {} ({}); relative images may not resolve",
                work_dir.display(),
                e
            );
            builder.tempfile()?
        }
    };

    file.write_all(html.as_bytes())?;
    file.flush()?;
    Ok(file)
}

fn file_url(path: &Path) -> Result<String> {
    let absolute = path.canonicalize()?;
    let mut raw = absolute.to_string_lossy().replace('\\', "/");
    // Windows verbatim prefix from canonicalize
    if let Some(stripped) = raw.strip_prefix("//?/") {
        raw = stripped.to_string();
    }

    let mut url = String::from("file://");
    if !raw.starts_with('/') {
        url.push('/');
    }
    for ch in raw.chars() {
        match ch {
            ' ' => url.push_str("%20"),
            '#' => url.push_str("%23"),
            '?' => url.push_str("%3F"),
            '%' => url.push_str("%25"),
            _ => url.push(ch),
        }
    }
    Ok(url)
}
