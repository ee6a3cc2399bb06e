//! GitHub alert blocks (`> [!NOTE]` and friends).

use pulldown_cmark::BlockQuoteKind;

/// The five alert kinds GitHub recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertKind {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl AlertKind {
    pub const ALL: [AlertKind; 5] = [
        AlertKind::Note,
        AlertKind::Tip,
        AlertKind::Important,
        AlertKind::Warning,
        AlertKind::Caution,
    ];

    /// Lowercase name used in CSS class names.
    pub fn name(self) -> &'static str {
        match self {
            AlertKind::Note => "note",
            AlertKind::Tip => "tip",
            AlertKind::Important => "important",
            AlertKind::Warning => "warning",
            AlertKind::Caution => "caution",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AlertKind::Note => "Note",
            AlertKind::Tip => "Tip",
            AlertKind::Important => "Important",
            AlertKind::Warning => "Warning",
            AlertKind::Caution => "Caution",
        }
    }

    /// Border, title and icon color.
    pub fn color(self) -> &'static str {
        match self {
            AlertKind::Note => "#0969da",
            AlertKind::Tip => "#1a7f37",
            AlertKind::Important => "#8250df",
            AlertKind::Warning => "#9a6700",
            AlertKind::Caution => "#cf222e",
        }
    }

    /// Box background color.
    pub fn background(self) -> &'static str {
        match self {
            AlertKind::Note => "#ddf4ff",
            AlertKind::Tip => "#dafbe1",
            AlertKind::Important => "#fbefff",
            AlertKind::Warning => "#fff8c5",
            AlertKind::Caution => "#ffebe9",
        }
    }

    /// Class applied to the alert container, e.g. `markdown-alert-note`.
    pub fn class(self) -> String {
        format!("markdown-alert-{}", self.name())
    }

    /// Inline octicon SVG for the alert title.
    pub fn icon(self) -> String {
        let path = match self {
            AlertKind::Note => NOTE_ICON,
            AlertKind::Tip => TIP_ICON,
            AlertKind::Important => IMPORTANT_ICON,
            AlertKind::Warning => WARNING_ICON,
            AlertKind::Caution => CAUTION_ICON,
        };
        format!(
            r#"<svg class="octicon" viewBox="0 0 16 16" width="16" height="16" aria-hidden="true"><path d="{path}"></path></svg>"#
        )
    }

    /// Opening markup that replaces `<blockquote>`.
    pub fn open_html(self) -> String {
        format!(
            "<div class=\"markdown-alert {}\">\n<p class=\"markdown-alert-title\">{}{}</p>\n",
            self.class(),
            self.icon(),
            self.title()
        )
    }

    /// Closing markup that replaces `</blockquote>`.
    pub fn close_html(self) -> &'static str {
        "</div>\n"
    }
}

impl From<BlockQuoteKind> for AlertKind {
    fn from(kind: BlockQuoteKind) -> Self {
        match kind {
            BlockQuoteKind::Note => AlertKind::Note,
            BlockQuoteKind::Tip => AlertKind::Tip,
            BlockQuoteKind::Important => AlertKind::Important,
            BlockQuoteKind::Warning => AlertKind::Warning,
            BlockQuoteKind::Caution => AlertKind::Caution,
        }
    }
}

// Octicon path data (16px)
const NOTE_ICON: &str = "M0 8a8 8 0 1 1 16 0A8 8 0 0 1 0 8Zm8-6.5a6.5 6.5 0 1 0 0 13 6.5 6.5 0 0 0 0-13ZM6.5 7.75A.75.75 0 0 1 7.25 7h1a.75.75 0 0 1 .75.75v2.75h.25a.75.75 0 0 1 0 1.5h-2a.75.75 0 0 1 0-1.5h.25v-2h-.25a.75.75 0 0 1-.75-.75ZM8 6a1 1 0 1 1 0-2 1 1 0 0 1 0 2Z";
const TIP_ICON: &str = "M8 1.5c-2.363 0-4 1.69-4 3.75 0 .984.424 1.625.984 2.304l.214.253c.223.264.47.556.673.848.284.411.537.896.621 1.49a.75.75 0 0 1-1.484.211c-.04-.282-.163-.547-.37-.847a8.456 8.456 0 0 0-.542-.68c-.084-.1-.173-.205-.268-.32C3.201 7.75 2.5 6.766 2.5 5.25 2.5 2.31 4.863 0 8 0s5.5 2.31 5.5 5.25c0 1.516-.701 2.5-1.328 3.259-.095.115-.184.22-.268.319-.207.245-.383.453-.541.681-.208.3-.33.565-.37.847a.751.751 0 0 1-1.485-.212c.084-.593.337-1.078.621-1.489.203-.292.45-.584.673-.848.075-.088.147-.173.213-.253.561-.679.985-1.32.985-2.304 0-2.06-1.637-3.75-4-3.75ZM5.75 12h4.5a.75.75 0 0 1 0 1.5h-4.5a.75.75 0 0 1 0-1.5ZM6 15.25a.75.75 0 0 1 .75-.75h2.5a.75.75 0 0 1 0 1.5h-2.5a.75.75 0 0 1-.75-.75Z";
const IMPORTANT_ICON: &str = "M0 1.75C0 .784.784 0 1.75 0h12.5C15.216 0 16 .784 16 1.75v9.5A1.75 1.75 0 0 1 14.25 13H8.06l-2.573 2.573A1.458 1.458 0 0 1 3 14.543V13H1.75A1.75 1.75 0 0 1 0 11.25Zm1.75-.25a.25.25 0 0 0-.25.25v9.5c0 .138.112.25.25.25h2a.75.75 0 0 1 .75.75v2.19l2.72-2.72a.749.749 0 0 1 .53-.22h6.5a.25.25 0 0 0 .25-.25v-9.5a.25.25 0 0 0-.25-.25Zm7 2.25v2.5a.75.75 0 0 1-1.5 0v-2.5a.75.75 0 0 1 1.5 0ZM9 9a1 1 0 1 1-2 0 1 1 0 0 1 2 0Z";
const WARNING_ICON: &str = "M6.457 1.047c.659-1.234 2.427-1.234 3.086 0l6.082 11.378A1.75 1.75 0 0 1 14.082 15H1.918a1.75 1.75 0 0 1-1.543-2.575Zm1.763.707a.25.25 0 0 0-.44 0L1.698 13.132a.25.25 0 0 0 .22.368h12.164a.25.25 0 0 0 .22-.368Zm.53 3.996v2.5a.75.75 0 0 1-1.5 0v-2.5a.75.75 0 0 1 1.5 0ZM9 11a1 1 0 1 1-2 0 1 1 0 0 1 2 0Z";
const CAUTION_ICON: &str = "M4.47.22A.749.749 0 0 1 5 0h6c.199 0 .389.079.53.22l4.25 4.25c.141.14.22.331.22.53v6a.749.749 0 0 1-.22.53l-4.25 4.25A.749.749 0 0 1 11 16H5a.749.749 0 0 1-.53-.22L.22 11.53A.749.749 0 0 1 0 11V5c0-.199.079-.389.22-.53Zm.84 1.28L1.5 5.31v5.38l3.81 3.81h5.38l3.81-3.81V5.31L10.69 1.5ZM8 4a.75.75 0 0 1 .75.75v3.5a.75.75 0 0 1-1.5 0v-3.5A.75.75 0 0 1 8 4Zm0 8a1 1 0 1 1 0-2 1 1 0 0 1 0 2Z";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_kind_has_a_distinct_color() {
        let mut colors: Vec<_> = AlertKind::ALL.iter().map(|k| k.color()).collect();
        colors.sort();
        colors.dedup();
        assert_eq!(colors.len(), 5);
    }

    #[test]
    fn fixed_colors() {
        assert_eq!(AlertKind::Note.color(), "#0969da");
        assert_eq!(AlertKind::Tip.color(), "#1a7f37");
        assert_eq!(AlertKind::Important.color(), "#8250df");
        assert_eq!(AlertKind::Warning.color(), "#9a6700");
        assert_eq!(AlertKind::Caution.color(), "#cf222e");
    }

    #[test]
    fn maps_blockquote_kinds() {
        assert_eq!(AlertKind::from(BlockQuoteKind::Note), AlertKind::Note);
        assert_eq!(AlertKind::from(BlockQuoteKind::Caution), AlertKind::Caution);
    }

    #[test]
    fn open_html_carries_class_icon_and_title() {
        let html = AlertKind::Warning.open_html();
        assert!(html.starts_with("<div class=\"markdown-alert markdown-alert-warning\">"));
        assert!(html.contains("class=\"octicon\""));
        assert!(html.contains(">Warning</p>"));
    }

    #[test]
    fn icons_differ_per_kind() {
        assert_ne!(AlertKind::Note.icon(), AlertKind::Tip.icon());
        assert_ne!(AlertKind::Warning.icon(), AlertKind::Caution.icon());
    }
}
