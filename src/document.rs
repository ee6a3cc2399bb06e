use html_escape::encode_text;

use crate::branding::PageTemplates;
use crate::style::stylesheet;
use crate::theme::Theme;

/// Title used when neither a heading nor a file name is available.
pub const DEFAULT_TITLE: &str = "Document";

/// Wrap an HTML fragment in a complete, styled document.
pub fn html_document(body: &str, title: &str, theme: &Theme) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
<article class="markdown-body">
{body}
</article>
</body>
</html>
"#,
        title = encode_text(title),
        css = stylesheet(theme),
        body = body
    )
}

/// Place branded header and footer markup around the article, for HTML output
/// where no printer draws them.
pub fn with_page_templates(html: &str, templates: &PageTemplates) -> String {
    let header = format!("<body>\n<header class=\"page-header\">\n{}\n</header>", templates.header);
    let footer = format!("<footer class=\"page-footer\">\n{}\n</footer>\n</body>", templates.footer);
    html.replacen("<body>", &header, 1)
        .replacen("</body>", &footer, 1)
}
