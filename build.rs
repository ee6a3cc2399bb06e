use std::fs;

fn main() {
    // Validate bundled themes at compile time
    let themes_path = "themes.ini";
    println!("cargo:rerun-if-changed={}", themes_path);

    let content = fs::read_to_string(themes_path).expect("Failed to read themes.ini");

    let ini = match ini::Ini::load_from_str(&content) {
        Ok(ini) => ini,
        Err(e) => panic!("Invalid themes.ini: {}", e),
    };

    let default_theme = ini.section(Some("Standard"));
    if default_theme.and_then(|s| s.get("accent_color")).is_none() {
        panic!("themes.ini must define [Standard] with an accent_color");
    }
}
