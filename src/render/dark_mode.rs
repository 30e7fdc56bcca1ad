use std::fs;
use std::path::Path;

use crate::error::Result;

/// Recolors black ink and the white legend box when the viewer prefers a dark scheme.
pub const DARK_MODE_CSS: &str = r##"<style>
@media (prefers-color-scheme: dark) {
  text[fill="#000000"] { fill: #c9d1d9 !important; }
  polyline[stroke="#000000"], path[stroke="#000000"], line[stroke="#000000"] { stroke: #c9d1d9 !important; }
  rect[stroke="#000000"] { stroke: #444c56 !important; }
  rect[fill="#FFFFFF"] { fill: #21262d !important; }
}
</style>"##;

/// Inserts [`DARK_MODE_CSS`] once: before the first `<defs>` when present,
/// otherwise right after the opening `<svg ...>` tag. Markup without an
/// `<svg` element is returned unchanged.
pub fn inject_dark_mode_css(svg: &str) -> String {
    if svg.contains("<defs>") {
        return svg.replacen("<defs>", &format!("{DARK_MODE_CSS}\n<defs>"), 1);
    }

    let Some(open) = svg.find("<svg") else {
        return svg.to_string();
    };
    let Some(close) = svg[open..].find('>') else {
        return svg.to_string();
    };
    let insert_at = open + close + 1;

    let mut out = String::with_capacity(svg.len() + DARK_MODE_CSS.len() + 1);
    out.push_str(&svg[..insert_at]);
    out.push('\n');
    out.push_str(DARK_MODE_CSS);
    out.push_str(&svg[insert_at..]);
    out
}

/// Rewrites the SVG file at `path` in place with the dark-mode style block.
pub fn inject_dark_mode(path: &Path) -> Result<()> {
    let content = fs::read_to_string(path)?;
    fs::write(path, inject_dark_mode_css(&content))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_before_first_defs_only() {
        let svg = "<svg><defs><a/></defs><g/><defs></defs></svg>";
        let out = inject_dark_mode_css(svg);

        assert_eq!(out.matches(DARK_MODE_CSS).count(), 1);
        assert!(out.starts_with(&format!("<svg>{DARK_MODE_CSS}\n<defs><a/>")));
        assert_eq!(out.matches("<defs>").count(), 2);
    }

    #[test]
    fn falls_back_to_after_root_tag_without_defs() {
        let svg = r#"<?xml version="1.0"?><svg width="10" height="10"><rect/></svg>"#;
        let out = inject_dark_mode_css(svg);

        assert_eq!(
            out,
            format!(
                "<?xml version=\"1.0\"?><svg width=\"10\" height=\"10\">\n{DARK_MODE_CSS}<rect/></svg>"
            )
        );
    }

    #[test]
    fn non_svg_text_is_untouched() {
        assert_eq!(inject_dark_mode_css("plain text"), "plain text");
        assert_eq!(inject_dark_mode_css("<svg"), "<svg");
    }

    #[test]
    fn style_block_targets_dark_scheme() {
        assert!(DARK_MODE_CSS.starts_with("<style>"));
        assert!(DARK_MODE_CSS.contains("@media (prefers-color-scheme: dark)"));
        assert!(DARK_MODE_CSS.ends_with("</style>"));
    }

    #[test]
    fn rewrites_file_in_place() {
        let dir = std::env::temp_dir().join(format!("ticket-price-dark-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("chart.svg");
        fs::write(&path, "<svg><defs></defs></svg>").expect("write svg");

        inject_dark_mode(&path).expect("inject");
        let content = fs::read_to_string(&path).expect("read svg");
        assert!(content.contains("prefers-color-scheme"));
        assert!(content.find("<style>") < content.find("<defs>"));

        fs::remove_dir_all(&dir).expect("cleanup");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join("ticket-price-does-not-exist/chart.svg");
        assert!(matches!(
            inject_dark_mode(&path),
            Err(crate::error::TicketError::Io(_))
        ));
    }
}
