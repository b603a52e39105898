//! Compiler-style rendering of parse errors
//!
//! ```text
//! error: expected 'end', found end of file
//!   --> loop.rh:3:1
//!    |
//!  3 | if x then y = 1
//!    |                ^
//! ```

use crate::parser::errors::ParseError;
use std::fmt::Write;

/// Render `error` against the `source` it came from. `name` labels the
/// source (a file name, or `<input>` for shell lines).
pub fn render(name: &str, source: &str, error: &ParseError) -> String {
    let location = error.location();
    let src_line = source_line(source, location.line);
    let gutter = location.line.to_string().len().max(2);

    let mut out = String::new();
    let _ = writeln!(out, "error: {}", error.message());
    let _ = writeln!(
        out,
        "{:>width$} {}:{}:{}",
        "-->",
        name,
        location.line,
        location.column,
        width = gutter + 3
    );
    let _ = writeln!(out, "{:>width$} |", "", width = gutter);
    let _ = writeln!(out, "{:>width$} | {}", location.line, src_line, width = gutter);
    let _ = write!(
        out,
        "{:>width$} | {}^",
        "",
        " ".repeat(location.column.saturating_sub(1)),
        width = gutter
    );
    out
}

/// Line `number` (1-based), breaking on CR, LF and CRLF like the scanner
fn source_line(source: &str, number: usize) -> &str {
    let mut rest = source;
    for _ in 1..number {
        match rest.find(['\r', '\n']) {
            Some(at) => {
                let skip = if rest[at..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[at + skip..];
            }
            None => return "",
        }
    }
    rest.find(['\r', '\n']).map_or(rest, |end| &rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::check_source;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_points_at_column() {
        let source = "x = 1;\ny = (2";
        let err = check_source(source).unwrap_err();
        let rendered = render("demo.rh", source, &err);

        let expected = [
            "error: expected ')', found end of file",
            "  --> demo.rh:2:7",
            "   |",
            " 2 | y = (2",
            "   |       ^",
        ];
        assert_eq!(rendered, expected.join("\n"));
    }

    #[test]
    fn test_render_with_cr_line_endings() {
        for source in ["x = 1;\ry = (2", "x = 1;\r\ny = (2", "x = 1;\ny = (2"] {
            let err = check_source(source).unwrap_err();
            let rendered = render("cr.rh", source, &err);
            assert!(rendered.contains("cr.rh:2:7"), "{:?}", rendered);
            assert!(rendered.contains(" 2 | y = (2\n"), "{:?}", rendered);
        }
    }

    #[test]
    fn test_source_line() {
        let source = "one\rtwo\r\nthree\nfour";
        assert_eq!(source_line(source, 1), "one");
        assert_eq!(source_line(source, 2), "two");
        assert_eq!(source_line(source, 3), "three");
        assert_eq!(source_line(source, 4), "four");
        assert_eq!(source_line(source, 5), "");
        assert_eq!(source_line("a\n", 2), "");
    }

    #[test]
    fn test_render_lex_error() {
        let source = "s = \"open";
        let err = check_source(source).unwrap_err();
        let rendered = render("<input>", source, &err);

        assert!(rendered.starts_with("error: string without terminating quotation mark\n"));
        assert!(rendered.contains("<input>:1:5"));
        assert!(rendered.ends_with("    ^"));
    }
}
