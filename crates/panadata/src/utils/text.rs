//! Text normalization for extracted content.

/// Whether a character is dropped during normalization.
///
/// ASCII controls are removed, except the whitespace controls (tab, newline,
/// vertical tab, form feed, carriage return), which collapse like spaces.
pub fn is_stripped_control(c: char) -> bool {
    c.is_ascii_control() && !c.is_whitespace()
}

/// Normalize extracted text to a single line.
///
/// Strips control characters, collapses every whitespace run (including
/// newlines) into one space, and trims both ends.
pub fn normalize_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for word in raw.split(|c: char| c.is_whitespace()) {
        let mut chars = word.chars().filter(|c| !is_stripped_control(*c)).peekable();
        if chars.peek().is_none() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.extend(chars);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize_text("  Hola \n\n  Mundo\t!  "), "Hola Mundo !");
        assert_eq!(normalize_text("a\r\nb\x0bc\x0cd"), "a b c d");
    }

    #[test]
    fn test_strips_controls() {
        assert_eq!(normalize_text("Ho\x00la\x07 Mun\x1bdo\x7f"), "Hola Mundo");
    }

    #[test]
    fn test_control_only_word_leaves_no_gap() {
        assert_eq!(normalize_text("uno \x00\x01 dos"), "uno dos");
        assert_eq!(normalize_text("\x02\x03"), "");
    }

    #[test]
    fn test_keeps_unicode() {
        assert_eq!(
            normalize_text("--- Página 1 ---\nResolución Nº 5"),
            "--- Página 1 --- Resolución Nº 5"
        );
    }

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text(" \n\t "), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "  Hola \n\n  Mundo  ",
            "a\x00b\tc",
            "\u{a0}no\u{2003}break\u{a0}",
            "--- Página 2 ---\r\nMundo",
            "",
        ];
        for s in samples {
            let once = normalize_text(s);
            assert_eq!(normalize_text(&once), once, "input: {:?}", s);
        }
    }
}
