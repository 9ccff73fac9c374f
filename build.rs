use std::fs;

const DEFAULT_CONFIG: &str = "src/default_config.toml";

/// Sections `Config` reads; a typo here would silently fall back to defaults at runtime.
const SECTIONS: &[&str] = &["parser", "page", "font", "table", "spacing"];

fn main() {
    println!("cargo:rerun-if-changed={DEFAULT_CONFIG}");

    let content = fs::read_to_string(DEFAULT_CONFIG)
        .unwrap_or_else(|e| panic!("reportdoc: cannot read {DEFAULT_CONFIG}: {e}"));

    let table = content
        .parse::<toml::Table>()
        .unwrap_or_else(|e| panic!("reportdoc: invalid {DEFAULT_CONFIG}: {e}"));

    for key in table.keys() {
        if !SECTIONS.contains(&key.as_str()) {
            panic!("reportdoc: unknown section [{key}] in {DEFAULT_CONFIG}");
        }
    }
}
