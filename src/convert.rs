use std::fs;
use std::path::{Path, PathBuf};

use crate::branding::page_templates;
use crate::document::{DEFAULT_TITLE, html_document, with_page_templates};
use crate::error::{Error, Result};
use crate::markdown;
use crate::render::{ChromePrinter, PdfPrinter, PrintJob};
use crate::theme::{Theme, ThemeSet};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG: &str = "themes.ini";
pub const DEFAULT_THEME: &str = "Standard";
/// Default theme when branding is requested without `--theme`.
pub const DEFAULT_BRANDED_THEME: &str = "IEE";

const PDF_SIGNATURE: &[u8] = b"%PDF-";

/// Options for a single conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Output path; defaults to the input path with a `.pdf` (or `.html`) extension.
    pub output: Option<PathBuf>,
    /// Add the branded header and footer.
    pub branding: bool,
    pub theme: Option<String>,
    pub config: Option<PathBuf>,
    pub chrome: Option<PathBuf>,
    pub sandbox: bool,
    /// Write the composed HTML instead of printing a PDF.
    pub html_only: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            output: None,
            branding: false,
            theme: None,
            config: None,
            chrome: None,
            sandbox: true,
            html_only: false,
        }
    }
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_branding(mut self, branding: bool) -> Self {
        self.branding = branding;
        self
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn with_config(mut self, config: impl Into<PathBuf>) -> Self {
        self.config = Some(config.into());
        self
    }

    pub fn with_chrome(mut self, chrome: impl Into<PathBuf>) -> Self {
        self.chrome = Some(chrome.into());
        self
    }

    pub fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    pub fn with_html_only(mut self, html_only: bool) -> Self {
        self.html_only = html_only;
        self
    }

    /// Theme to use when none was named explicitly.
    pub fn theme_name(&self) -> &str {
        match &self.theme {
            Some(name) => name.as_str(),
            None if self.branding => DEFAULT_BRANDED_THEME,
            None => DEFAULT_THEME,
        }
    }

    /// Output path for an input file.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None if self.html_only => input.with_extension("html"),
            None => input.with_extension("pdf"),
        }
    }
}

/// A prepared conversion: input read, theme resolved, document composed.
#[derive(Debug)]
pub struct Conversion {
    pub output: PathBuf,
    pub theme: Theme,
    pub job: PrintJob,
    work_dir: PathBuf,
}

impl Conversion {
    pub fn prepare(input: &Path, options: &ConvertOptions) -> Result<Self> {
        if !input.is_file() {
            return Err(Error::InputNotFound(input.to_path_buf()));
        }

        let themes = load_themes(options.config.as_deref())?;
        let theme = themes.theme(options.theme_name(), options.branding)?;
        log::debug!("Using theme '{}' from {}", theme.name, themes.source().display());

        let templates = match &theme.branding {
            Some(branding) => Some(page_templates(branding, &theme.accent_color)?),
            None => None,
        };

        log::info!("Converting '{}' to HTML...", input.display());
        let source = fs::read_to_string(input)?;
        let title = markdown::first_heading(&source)
            .or_else(|| input.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let body = markdown::to_html(&source);
        let html = html_document(&body, &title, &theme);

        let work_dir = match input.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Ok(Self {
            output: options.output_path(input),
            theme,
            job: PrintJob { html, templates },
            work_dir,
        })
    }

    /// Write the composed HTML document to the output path. Branded
    /// header and footer become part of the page.
    pub fn write_html(&self) -> Result<()> {
        let html = match &self.job.templates {
            Some(templates) => with_page_templates(&self.job.html, templates),
            None => self.job.html.clone(),
        };
        fs::write(&self.output, html)?;
        Ok(())
    }

    /// Print to PDF and write the bytes to the output path.
    pub fn write_pdf(&self, printer: &dyn PdfPrinter) -> Result<()> {
        log::info!("Printing to '{}'...", self.output.display());
        let bytes = printer.print(&self.job, &self.work_dir)?;
        if !bytes.starts_with(PDF_SIGNATURE) {
            return Err(Error::Render("browser returned no PDF data".to_string()));
        }
        fs::write(&self.output, bytes)?;
        Ok(())
    }
}

/// Convert a Markdown file and return the path written.
pub fn convert(input: &Path, options: &ConvertOptions) -> Result<PathBuf> {
    let conversion = Conversion::prepare(input, options)?;

    if options.html_only {
        conversion.write_html()?;
    } else {
        let printer = ChromePrinter::locate(options.chrome.as_deref())?.with_sandbox(options.sandbox);
        conversion.write_pdf(&printer)?;
    }

    Ok(conversion.output)
}

fn load_themes(config: Option<&Path>) -> Result<ThemeSet> {
    match config {
        Some(path) => ThemeSet::load(path),
        None if Path::new(DEFAULT_CONFIG).is_file() => ThemeSet::load(Path::new(DEFAULT_CONFIG)),
        None => {
            log::debug!("No {} in working directory, using bundled themes", DEFAULT_CONFIG);
            ThemeSet::bundled()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FakePrinter {
        bytes: Vec<u8>,
        seen: RefCell<Option<PrintJob>>,
    }

    impl FakePrinter {
        fn new(bytes: &[u8]) -> Self {
            Self {
                bytes: bytes.to_vec(),
                seen: RefCell::new(None),
            }
        }
    }

    impl PdfPrinter for FakePrinter {
        fn print(&self, job: &PrintJob, _work_dir: &Path) -> Result<Vec<u8>> {
            *self.seen.borrow_mut() = Some(job.clone());
            Ok(self.bytes.clone())
        }
    }

    const THEMES: &str = "\
[DEFAULT]
heading_line_color = #d1d9e0

[Standard]
accent_color = #0969da

[IEE]
accent_color = #003a70
name = Institute
university = University
address = 1 Road
email = office@example.edu
website = www.example.edu
slogan = Onwards
logo_left = left.png
logo_right = right.png
";

    fn workspace() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("themes.ini"), THEMES).unwrap();
        fs::write(dir.path().join("left.png"), b"png").unwrap();
        fs::write(dir.path().join("right.png"), b"png").unwrap();
        fs::write(dir.path().join("notes.md"), "# Notes\n\n> [!NOTE]\n> Remember.\n").unwrap();
        dir
    }

    #[test]
    fn default_output_is_input_stem_with_pdf() {
        let options = ConvertOptions::new();
        assert_eq!(options.output_path(Path::new("docs/report.md")), PathBuf::from("docs/report.pdf"));
        assert_eq!(options.output_path(Path::new("README")), PathBuf::from("README.pdf"));
    }

    #[test]
    fn html_only_defaults_to_html_extension() {
        let options = ConvertOptions::new().with_html_only(true);
        assert_eq!(options.output_path(Path::new("a.md")), PathBuf::from("a.html"));
    }

    #[test]
    fn default_theme_depends_on_branding() {
        assert_eq!(ConvertOptions::new().theme_name(), "Standard");
        assert_eq!(ConvertOptions::new().with_branding(true).theme_name(), "IEE");
        assert_eq!(
            ConvertOptions::new().with_branding(true).with_theme("Other").theme_name(),
            "Other"
        );
    }

    #[test]
    fn plain_conversion_has_no_branding() {
        let dir = workspace();
        let options = ConvertOptions::new().with_config(dir.path().join("themes.ini"));
        let conversion = Conversion::prepare(&dir.path().join("notes.md"), &options).unwrap();

        assert!(conversion.job.templates.is_none());
        assert!(!conversion.job.html.contains("Institute"));
        assert!(conversion.job.html.contains("<title>Notes</title>"));
        assert_eq!(conversion.job.html.matches("markdown-alert-note\"").count(), 1);
    }

    #[test]
    fn branded_conversion_uses_theme_fields() {
        let dir = workspace();
        let options = ConvertOptions::new()
            .with_config(dir.path().join("themes.ini"))
            .with_branding(true);
        let conversion = Conversion::prepare(&dir.path().join("notes.md"), &options).unwrap();

        let templates = conversion.job.templates.as_ref().unwrap();
        assert!(templates.header.contains(">Institute</div>"));
        assert!(templates.footer.contains("1 Road | office@example.edu | www.example.edu"));
        assert_eq!(conversion.theme.name, "IEE");
    }

    #[test]
    fn unknown_theme_writes_nothing() {
        let dir = workspace();
        let output = dir.path().join("out.pdf");
        let options = ConvertOptions::new()
            .with_config(dir.path().join("themes.ini"))
            .with_theme("Nope")
            .with_output(&output);

        let err = convert(&dir.path().join("notes.md"), &options).unwrap_err();
        assert!(matches!(err, Error::UnknownTheme { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn missing_input_is_reported() {
        let err = Conversion::prepare(Path::new("/nonexistent/in.md"), &ConvertOptions::new()).unwrap_err();
        assert!(matches!(err, Error::InputNotFound(_)));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = workspace();
        let options = ConvertOptions::new().with_config(dir.path().join("missing.ini"));
        let err = Conversion::prepare(&dir.path().join("notes.md"), &options).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn write_pdf_writes_printer_bytes() {
        let dir = workspace();
        let options = ConvertOptions::new().with_config(dir.path().join("themes.ini"));
        let conversion = Conversion::prepare(&dir.path().join("notes.md"), &options).unwrap();
        let printer = FakePrinter::new(b"%PDF-1.7 fake");

        conversion.write_pdf(&printer).unwrap();

        assert_eq!(fs::read(dir.path().join("notes.pdf")).unwrap(), b"%PDF-1.7 fake");
        assert!(printer.seen.borrow().as_ref().unwrap().templates.is_none());
    }

    #[test]
    fn write_pdf_rejects_non_pdf_output() {
        let dir = workspace();
        let options = ConvertOptions::new().with_config(dir.path().join("themes.ini"));
        let conversion = Conversion::prepare(&dir.path().join("notes.md"), &options).unwrap();

        let err = conversion.write_pdf(&FakePrinter::new(b"")).unwrap_err();
        assert!(matches!(err, Error::Render(_)));
        assert!(!dir.path().join("notes.pdf").exists());
    }

    #[test]
    fn html_only_conversion_needs_no_browser() {
        let dir = workspace();
        let options = ConvertOptions::new()
            .with_config(dir.path().join("themes.ini"))
            .with_html_only(true)
            .with_chrome("/nonexistent/chrome");

        let output = convert(&dir.path().join("notes.md"), &options).unwrap();

        assert_eq!(output, dir.path().join("notes.html"));
        let html = fs::read_to_string(output).unwrap();
        assert!(html.contains("<h1 id=\"notes\">Notes</h1>"));
    }

    #[test]
    fn branded_html_output_keeps_header_and_footer() {
        let dir = workspace();
        let options = ConvertOptions::new()
            .with_config(dir.path().join("themes.ini"))
            .with_branding(true)
            .with_html_only(true);

        let output = convert(&dir.path().join("notes.md"), &options).unwrap();

        let html = fs::read_to_string(output).unwrap();
        assert!(html.contains("<header class=\"page-header\">"));
        assert!(html.contains(">Institute</div>"));
        assert!(html.contains("1 Road | office@example.edu | www.example.edu"));
    }
}
