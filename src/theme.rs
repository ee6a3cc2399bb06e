use std::fs;
use std::path::{Path, PathBuf};

use ini::{Ini, ParseOption, Properties};

use crate::error::{Error, Result};

/// Theme file compiled into the binary; validated by `build.rs`.
static BUNDLED_THEMES: &str = include_str!("../themes.ini");

/// Section whose keys every theme inherits.
const DEFAULT_SECTION: &str = "DEFAULT";

/// GitHub's own heading underline color, used when no section sets one.
const GITHUB_HEADING_LINE: &str = "#d1d9e0";

/// Logos shipped with the bundled themes, keyed by their path in `themes.ini`.
static BUNDLED_LOGOS: [(&str, &[u8]); 2] = [
    ("logos/iee.svg", include_bytes!("../logos/iee.svg")),
    ("logos/university.svg", include_bytes!("../logos/university.svg")),
];

/// Resolved styling parameters for one conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub accent_color: String,
    pub heading_line_color: String,
    pub branding: Option<Branding>,
}

/// Institutional header/footer fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Branding {
    pub name: String,
    pub university: String,
    pub address: String,
    pub email: String,
    pub website: String,
    pub slogan: String,
    pub logo_left: Logo,
    pub logo_right: Logo,
}

/// Where a branding logo comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Logo {
    File(PathBuf),
    /// Compiled into the binary alongside the bundled themes.
    Bundled {
        name: &'static str,
        data: &'static [u8],
    },
}

/// All themes of one INI file.
#[derive(Debug)]
pub struct ThemeSet {
    ini: Ini,
    source: PathBuf,
    base_dir: PathBuf,
    embedded_logos: bool,
}

impl ThemeSet {
    /// Load themes from an INI file. Relative logo paths resolve against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::parse(&content, path, base_dir)
    }

    /// The theme file shipped with the binary.
    pub fn bundled() -> Result<Self> {
        let mut set = Self::parse(BUNDLED_THEMES, Path::new("<bundled themes.ini>"), PathBuf::new())?;
        set.embedded_logos = true;
        Ok(set)
    }

    /// Parse INI text. `source` is only used in error messages.
    pub fn parse(content: &str, source: &Path, base_dir: PathBuf) -> Result<Self> {
        let opt = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(content, opt).map_err(|e| Error::Config {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(Self {
            ini,
            source: source.to_path_buf(),
            base_dir,
            embedded_logos: false,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Theme section names in file order.
    pub fn names(&self) -> Vec<String> {
        self.ini
            .sections()
            .flatten()
            .filter(|name| *name != DEFAULT_SECTION)
            .map(str::to_string)
            .collect()
    }

    /// Resolve a theme. With `branded`, every branding key must be present.
    pub fn theme(&self, name: &str, branded: bool) -> Result<Theme> {
        let (section_name, section) = self.section(name).ok_or_else(|| Error::UnknownTheme {
            name: name.to_string(),
            available: self.names(),
        })?;

        let lookup = ThemeLookup {
            theme: section_name,
            section,
            defaults: self.ini.section(Some(DEFAULT_SECTION)),
        };

        let accent_color = lookup.require("accent_color")?;
        let heading_line_color = lookup
            .get("heading_line_color")
            .unwrap_or(GITHUB_HEADING_LINE)
            .to_string();

        let branding = if branded {
            Some(self.branding(&lookup)?)
        } else {
            None
        };

        Ok(Theme {
            name: section_name.to_string(),
            accent_color,
            heading_line_color,
            branding,
        })
    }

    fn section(&self, name: &str) -> Option<(&str, &Properties)> {
        if name == DEFAULT_SECTION {
            return None;
        }
        let exact = self
            .ini
            .iter()
            .find_map(|(section, props)| section.filter(|s| *s == name).map(|s| (s, props)));
        exact.or_else(|| {
            self.ini.iter().find_map(|(section, props)| {
                section
                    .filter(|s| *s != DEFAULT_SECTION && s.eq_ignore_ascii_case(name))
                    .map(|s| (s, props))
            })
        })
    }

    fn branding(&self, lookup: &ThemeLookup) -> Result<Branding> {
        // Fields are required in order, so the first missing key is reported
        Ok(Branding {
            name: lookup.require("name")?,
            university: lookup.require("university")?,
            address: lookup.require("address")?,
            email: lookup.require("email")?,
            website: lookup.require("website")?,
            slogan: lookup.require("slogan")?,
            logo_left: self.resolve_logo(&lookup.require("logo_left")?),
            logo_right: self.resolve_logo(&lookup.require("logo_right")?),
        })
    }

    fn resolve_logo(&self, value: &str) -> Logo {
        if self.embedded_logos {
            if let Some(&(name, data)) = BUNDLED_LOGOS.iter().find(|(name, _)| *name == value) {
                return Logo::Bundled { name, data };
            }
        }

        let path = Path::new(value);
        if path.is_absolute() {
            Logo::File(path.to_path_buf())
        } else {
            Logo::File(self.base_dir.join(path))
        }
    }
}

/// Key lookup for one section, falling back to `[DEFAULT]`. Keys match case-insensitively.
struct ThemeLookup<'a> {
    theme: &'a str,
    section: &'a Properties,
    defaults: Option<&'a Properties>,
}

impl<'a> ThemeLookup<'a> {
    fn get(&self, key: &str) -> Option<&'a str> {
        find_key(self.section, key)
            .or_else(|| self.defaults.and_then(|d| find_key(d, key)))
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    fn require(&self, key: &'static str) -> Result<String> {
        self.get(key)
            .map(str::to_string)
            .ok_or_else(|| Error::MissingThemeField {
                theme: self.theme.to_string(),
                field: key,
            })
    }
}

fn find_key<'a>(props: &'a Properties, key: &str) -> Option<&'a str> {
    props
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    const THEMES: &str = "\
[DEFAULT]
heading_line_color = #d0d0d0

[Standard]
accent_color = #0969da

[Custom]
accent_color = #ff0000
heading_line_color = #00ff00

[Branded]
accent_color = #003a70
name = Institute
university = University
address = 1 Road
email = a@b.example
website = www.example.org
slogan = Onwards
logo_left = logos/left.png
logo_right = /abs/right.png

[Partial]
accent_color = #111111
name = Only a name
";

    fn themes() -> ThemeSet {
        ThemeSet::parse(THEMES, Path::new("themes.ini"), PathBuf::from("/etc/md2pdf")).unwrap()
    }

    #[test]
    fn lists_theme_names_without_default() {
        assert_eq!(
            themes().names(),
            vec!["Standard", "Custom", "Branded", "Partial"]
        );
    }

    #[test]
    fn inherits_default_section() {
        let theme = themes().theme("Standard", false).unwrap();
        assert_eq!(theme.accent_color, "#0969da");
        assert_eq!(theme.heading_line_color, "#d0d0d0");
        assert!(theme.branding.is_none());
    }

    #[test]
    fn section_overrides_default() {
        let theme = themes().theme("Custom", false).unwrap();
        assert_eq!(theme.heading_line_color, "#00ff00");
    }

    #[test]
    fn theme_name_falls_back_to_case_insensitive_match() {
        let theme = themes().theme("custom", false).unwrap();
        assert_eq!(theme.name, "Custom");
    }

    #[test]
    fn unknown_theme_is_reported() {
        let err = themes().theme("Missing", false).unwrap_err();
        match err {
            Error::UnknownTheme { name, available } => {
                assert_eq!(name, "Missing");
                assert!(available.contains(&"Standard".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn default_section_is_not_a_theme() {
        assert!(matches!(
            themes().theme("DEFAULT", false),
            Err(Error::UnknownTheme { .. })
        ));
    }

    #[test]
    fn branding_fields_and_logo_paths() {
        let theme = themes().theme("Branded", true).unwrap();
        let branding = theme.branding.unwrap();
        assert_eq!(branding.name, "Institute");
        assert_eq!(branding.email, "a@b.example");
        assert_eq!(branding.logo_left, Logo::File(PathBuf::from("/etc/md2pdf/logos/left.png")));
        assert_eq!(branding.logo_right, Logo::File(PathBuf::from("/abs/right.png")));
    }

    #[test]
    fn branding_requires_every_field() {
        let err = themes().theme("Partial", true).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingThemeField { ref theme, field: "university" } if theme == "Partial"
        ));
    }

    #[test]
    fn unbranded_theme_ignores_missing_branding() {
        assert!(themes().theme("Partial", false).is_ok());
    }

    #[test]
    fn missing_accent_color_is_an_error() {
        let set = ThemeSet::parse("[Bare]\nfoo = bar\n", Path::new("t.ini"), PathBuf::new()).unwrap();
        assert!(matches!(
            set.theme("Bare", false),
            Err(Error::MissingThemeField { field: "accent_color", .. })
        ));
    }

    #[test]
    fn bundled_themes_parse() {
        let set = ThemeSet::bundled().unwrap();
        let standard = set.theme("Standard", false).unwrap();
        assert_eq!(standard.accent_color, "#0969da");
        assert_eq!(standard.heading_line_color, "#d1d9e0");
        assert!(set.theme("IEE", true).unwrap().branding.is_some());
    }

    #[test]
    fn bundled_branding_uses_embedded_logos() {
        let branding = ThemeSet::bundled().unwrap().theme("IEE", true).unwrap().branding.unwrap();
        assert!(matches!(branding.logo_left, Logo::Bundled { name: "logos/iee.svg", .. }));
        assert!(matches!(branding.logo_right, Logo::Bundled { name: "logos/university.svg", .. }));
    }

    #[test]
    fn file_themes_never_use_embedded_logos() {
        let set = ThemeSet::parse(
            "[T]\naccent_color = #000\nname = n\nuniversity = u\naddress = a\nemail = e\nwebsite = w\nslogan = s\nlogo_left = logos/iee.svg\nlogo_right = r.png\n",
            Path::new("t.ini"),
            PathBuf::from("/cfg"),
        )
        .unwrap();
        let branding = set.theme("T", true).unwrap().branding.unwrap();
        assert_eq!(branding.logo_left, Logo::File(PathBuf::from("/cfg/logos/iee.svg")));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = ThemeSet::load(Path::new("/nonexistent/themes.ini")).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
