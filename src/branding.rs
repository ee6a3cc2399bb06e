//! Branded page header and footer templates.
//!
//! Chrome renders header/footer templates in an isolated context: they
//! cannot load external resources and start with a font size of zero, so
//! logos are embedded as `data:` URIs and every element sets its own size.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::error::{Error, Result};
use crate::theme::{Branding, Logo};

/// Header and footer markup for the PDF printer.
#[derive(Debug, Clone, PartialEq)]
pub struct PageTemplates {
    pub header: String,
    pub footer: String,
}

/// Build header/footer templates from a theme's branding fields.
pub fn page_templates(branding: &Branding, accent_color: &str) -> Result<PageTemplates> {
    let logo_left = logo_data_uri(&branding.logo_left)?;
    let logo_right = logo_data_uri(&branding.logo_right)?;
    let accent = encode_double_quoted_attribute(accent_color);

    let header = format!(
        r#"<div style="width: 100%; margin: 0 15mm; font-family: Helvetica, Arial, sans-serif; color: #1f2328; -webkit-print-color-adjust: exact;">
  <div style="display: flex; align-items: center; justify-content: space-between; padding-bottom: 2mm; border-bottom: 1.5px solid {accent};">
    <img src="{logo_left}" style="height: 12mm;">
    <div style="text-align: center;">
      <div style="font-size: 12px; font-weight: 600;">{name}</div>
      <div style="font-size: 9px;">{university}</div>
    </div>
    <img src="{logo_right}" style="height: 12mm;">
  </div>
</div>"#,
        name = encode_text(&branding.name),
        university = encode_text(&branding.university),
    );

    let footer = format!(
        r#"<div style="width: 100%; margin: 0 15mm; font-family: Helvetica, Arial, sans-serif; font-size: 8px; color: #656d76; -webkit-print-color-adjust: exact;">
  <div style="padding-top: 2mm; border-top: 1.5px solid {accent}; display: flex; justify-content: space-between;">
    <span>{address} | {email} | {website}</span>
    <span><span class="pageNumber"></span> / <span class="totalPages"></span></span>
  </div>
  <div style="text-align: center; font-style: italic; padding-top: 1mm;">{slogan}</div>
</div>"#,
        address = encode_text(&branding.address),
        email = encode_text(&branding.email),
        website = encode_text(&branding.website),
        slogan = encode_text(&branding.slogan),
    );

    Ok(PageTemplates { header, footer })
}

fn logo_data_uri(logo: &Logo) -> Result<String> {
    let (path, bytes): (&Path, Cow<'_, [u8]>) = match logo {
        Logo::File(path) => {
            if !path.is_file() {
                return Err(Error::LogoNotFound(path.clone()));
            }
            (path, Cow::Owned(fs::read(path)?))
        }
        Logo::Bundled { name, data } => (Path::new(*name), Cow::Borrowed(*data)),
    };
    log::debug!("Embedding logo {} ({} bytes)", path.display(), bytes.len());
    Ok(format!(
        "data:{};base64,{}",
        image_mime(path),
        STANDARD.encode(bytes)
    ))
}

fn image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/png",
    }
}
