use std::fmt::Write;

use crate::alert::AlertKind;
use crate::theme::Theme;

/// Assemble the GitHub stylesheet for a theme.
pub fn stylesheet(theme: &Theme) -> String {
    let mut css = String::with_capacity(GITHUB_CSS.len() + 2048);

    let _ = writeln!(css, ":root {{");
    let _ = writeln!(css, "    --accent-color: {};", theme.accent_color);
    let _ = writeln!(css, "    --heading-line-color: {};", theme.heading_line_color);
    let _ = writeln!(css, "}}");

    css.push_str(GITHUB_CSS);

    for kind in AlertKind::ALL {
        alert_rules(kind, &mut css);
    }

    css.push_str(PRINT_CSS);
    css
}

fn alert_rules(kind: AlertKind, css: &mut String) {
    let class = kind.class();
    let color = kind.color();
    let _ = writeln!(
        css,
        ".{class} {{ border-left-color: {color}; background-color: {}; }}",
        kind.background()
    );
    let _ = writeln!(css, ".{class} .markdown-alert-title {{ color: {color}; }}");
    let _ = writeln!(css, ".{class} .octicon {{ fill: {color}; }}");
}

const GITHUB_CSS: &str = r#"
* {
    box-sizing: border-box;
}

html, body {
    margin: 0;
    padding: 0;
    background: #ffffff;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", "Noto Sans", Helvetica, Arial, sans-serif, "Apple Color Emoji", "Segoe UI Emoji";
    font-size: 16px;
    line-height: 1.5;
    color: #1f2328;
    word-wrap: break-word;
}

h1, h2, h3, h4, h5, h6 {
    margin-top: 24px;
    margin-bottom: 16px;
    font-weight: 600;
    line-height: 1.25;
    color: #1f2328;
}

h1:first-child, h2:first-child, h3:first-child {
    margin-top: 0;
}

h1 {
    font-size: 2em;
    padding-bottom: 0.3em;
    border-bottom: 1px solid var(--heading-line-color);
}

h2 {
    font-size: 1.5em;
    padding-bottom: 0.3em;
    border-bottom: 1px solid var(--heading-line-color);
}

h3 { font-size: 1.25em; }
h4 { font-size: 1em; }
h5 { font-size: 0.875em; }
h6 { font-size: 0.85em; color: #656d76; }

p {
    margin-top: 0;
    margin-bottom: 16px;
}

a, a code {
    color: var(--accent-color);
    text-decoration: none;
}

strong, b {
    font-weight: 600;
}

del {
    color: #656d76;
}

code, tt {
    font-family: ui-monospace, SFMono-Regular, "SF Mono", Menlo, Consolas, "Liberation Mono", monospace;
    font-size: 85%;
    padding: 0.2em 0.4em;
    margin: 0;
    background-color: #eff1f3;
    border-radius: 6px;
}

pre {
    font-family: ui-monospace, SFMono-Regular, "SF Mono", Menlo, Consolas, "Liberation Mono", monospace;
    font-size: 85%;
    line-height: 1.45;
    padding: 16px;
    margin-top: 0;
    margin-bottom: 16px;
    overflow: auto;
    background-color: #f6f8fa;
    border-radius: 6px;
    white-space: pre-wrap;
}

pre code {
    display: inline;
    padding: 0;
    margin: 0;
    font-size: 100%;
    background-color: transparent;
    border: 0;
    word-wrap: normal;
}

ul, ol {
    padding-left: 2em;
    margin-top: 0;
    margin-bottom: 16px;
}

ul ul, ol ul, ul ol, ol ol {
    margin-top: 0;
    margin-bottom: 0;
}

ul ul, ol ul {
    list-style-type: circle;
}

li + li {
    margin-top: 0.25em;
}

li > p {
    margin-top: 16px;
}

li > p:first-child {
    margin-top: 0;
}

li input[type="checkbox"] {
    margin: 0 0.2em 0.25em -1.4em;
    vertical-align: middle;
}

ul:has(> li > input[type="checkbox"]) {
    list-style-type: none;
}

blockquote {
    margin: 0 0 16px 0;
    padding: 0 1em;
    color: #656d76;
    border-left: 0.25em solid #d0d7de;
}

blockquote > :first-child {
    margin-top: 0;
}

blockquote > :last-child {
    margin-bottom: 0;
}

table {
    display: block;
    width: max-content;
    max-width: 100%;
    margin-top: 0;
    margin-bottom: 16px;
    overflow: auto;
    border-spacing: 0;
    border-collapse: collapse;
}

th, td {
    padding: 6px 13px;
    border: 1px solid #d0d7de;
}

th {
    font-weight: 600;
    background-color: #f6f8fa;
}

tr {
    background-color: #ffffff;
}

tr:nth-child(2n) {
    background-color: #f6f8fa;
}

hr {
    height: 0.25em;
    padding: 0;
    margin: 24px 0;
    background-color: #d0d7de;
    border: 0;
}

img {
    max-width: 100%;
    box-sizing: content-box;
}

.footnote-definition {
    font-size: 12px;
    color: #656d76;
}

.footnote-definition p {
    display: inline;
}

.markdown-alert {
    display: block;
    padding: 8px 16px;
    margin-bottom: 16px;
    border-left: 4px solid;
    border-radius: 0 6px 6px 0;
    color: inherit;
}

.markdown-alert > :first-child {
    margin-top: 0;
}

.markdown-alert > :last-child {
    margin-bottom: 0;
}

.markdown-alert p {
    margin-bottom: 8px;
}

.markdown-alert-title {
    display: flex;
    align-items: center;
    line-height: 1;
    font-weight: 600;
    margin-bottom: 4px;
}

.markdown-alert-title .octicon {
    display: inline-block;
    flex-shrink: 0;
    margin-right: 8px;
    vertical-align: text-bottom;
}

"#;

const PRINT_CSS: &str = r#"
.page-break {
    break-after: page;
}

@media print {
    h1, h2, h3, h4, h5, h6 {
        break-after: avoid;
    }

    pre, table, .markdown-alert, img {
        break-inside: avoid;
    }
}
"#;
