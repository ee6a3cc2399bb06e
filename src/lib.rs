mod alert;
mod branding;
mod convert;
mod document;
pub mod error;
mod markdown;
mod render;
mod style;
mod theme;

pub use alert::AlertKind;
pub use branding::{PageTemplates, page_templates};
pub use convert::{
    Conversion, ConvertOptions, DEFAULT_BRANDED_THEME, DEFAULT_CONFIG, DEFAULT_THEME, convert,
};
pub use document::{html_document, with_page_templates};
pub use error::{Error, Result};
pub use render::{ChromePrinter, PageMargins, PdfPrinter, PrintJob};
pub use style::stylesheet;
pub use theme::{Branding, Logo, Theme, ThemeSet};

/// Convert markdown to an HTML fragment.
pub fn markdown_to_html(markdown: &str) -> String {
    markdown::to_html(markdown)
}

/// Convert markdown to a complete, styled HTML document.
pub fn markdown_to_document(markdown: &str, theme: &Theme) -> String {
    let title = markdown::first_heading(markdown);
    let body = markdown::to_html(markdown);
    html_document(&body, title.as_deref().unwrap_or(document::DEFAULT_TITLE), theme)
}

/// Convert markdown to PDF bytes with the given printer.
pub fn markdown_to_pdf(
    markdown: &str,
    theme: &Theme,
    templates: Option<PageTemplates>,
    printer: &dyn PdfPrinter,
) -> Result<Vec<u8>> {
    let job = PrintJob {
        html: markdown_to_document(markdown, theme),
        templates,
    };
    let work_dir = std::env::current_dir()?;
    printer.print(&job, &work_dir)
}
