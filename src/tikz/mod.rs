//! TikZ in both directions: scenes are compiled to `\draw`/`\node`
//! statements, and pictures found in document text are decoded again for
//! the preview pane.

pub mod decoder;
pub mod encoder;

use once_cell::sync::Lazy;
use regex::Regex;

pub use decoder::{PreviewTransform, TikzCommand, TikzStyle, decode, render_tikz, tikz_bounds};
pub use encoder::{TikzTransform, encode, encode_shape};

static PICTURE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\\begin\{tikzpicture\}(?:\[[^\]]*\])?(.*?)\\end\{tikzpicture\}").unwrap()
});

/// Wrap encoded statements in a `tikzpicture` environment.
pub fn wrap_tikzpicture(body: &str) -> String {
    format!("\\begin{{tikzpicture}}\n{body}\n\\end{{tikzpicture}}")
}

/// Bodies of every `tikzpicture` environment in `text`, in order.
pub fn extract_tikz_blocks(text: &str) -> Vec<&str> {
    PICTURE_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_and_extract() {
        let picture = wrap_tikzpicture("\\draw[] (0, 0) -- (1, 1);");
        assert!(picture.starts_with("\\begin{tikzpicture}\n"));
        assert!(picture.ends_with("\n\\end{tikzpicture}"));

        let document = format!("Intro\n{picture}\nMiddle\n\\begin{{tikzpicture}}[scale=2]\\node[] at (0, 0) {{x}};\\end{{tikzpicture}}");
        let blocks = extract_tikz_blocks(&document);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].trim(), "\\draw[] (0, 0) -- (1, 1);");
        assert_eq!(blocks[1], "\\node[] at (0, 0) {x};");
    }

    #[test]
    fn test_unterminated_picture_is_ignored() {
        assert!(extract_tikz_blocks("\\begin{tikzpicture} \\draw (0,0);").is_empty());
    }
}
