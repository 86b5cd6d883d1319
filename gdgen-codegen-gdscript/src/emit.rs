use std::fmt::Display;

/// One level of GDScript indentation.
///
/// Generated statements are indented with spaces throughout, since
/// GDScript rejects files that mix tabs and spaces.
pub const INDENT: &str = "    ";

/// The banner at the top of every generated script.
pub const GENERATED_BANNER: &str = "# Generated by gdgen. Do not edit.";

/// Builds GDScript source line by line, tracking the indentation depth.
#[derive(Debug, Default)]
pub struct GdWriter {
    buf: String,
    depth: usize,
}

impl GdWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a single line at the current depth.
    pub fn line(&mut self, line: impl Display) -> &mut Self {
        let line = line.to_string();
        if !line.is_empty() {
            for _ in 0..self.depth {
                self.buf.push_str(INDENT);
            }
            self.buf.push_str(&line);
        }
        self.buf.push('\n');
        self
    }

    /// Writes a multi-line statement, keeping each line's
    /// relative indentation.
    pub fn lines(&mut self, text: &str) -> &mut Self {
        for line in text.lines() {
            self.line(line);
        }
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    /// Writes a header line that ends with a colon, and the body
    /// one level deeper.
    pub fn block(&mut self, header: impl Display, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.line(format_args!("{header}:"));
        self.indented(body)
    }

    /// Writes the body one level deeper, without a header.
    pub fn indented(&mut self, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.depth += 1;
        body(self);
        self.depth -= 1;
        self
    }

    /// Writes a `##` documentation comment, wrapping at 80 columns.
    pub fn doc(&mut self, text: &str) -> &mut Self {
        for paragraph in text.lines() {
            if paragraph.trim().is_empty() {
                self.line("##");
                continue;
            }
            for line in textwrap::wrap(paragraph.trim(), 80) {
                self.line(format_args!("## {line}"));
            }
        }
        self
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

/// A generated GDScript element that writes itself into a [`GdWriter`].
pub trait ToGdScript {
    fn write_gdscript(&self, w: &mut GdWriter);

    fn to_gdscript(&self) -> String {
        let mut w = GdWriter::new();
        self.write_gdscript(&mut w);
        w.finish()
    }
}

/// Formats a GDScript string literal.
pub fn quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str(r#"\""#),
            '\\' => quoted.push_str(r"\\"),
            '\n' => quoted.push_str(r"\n"),
            '\r' => quoted.push_str(r"\r"),
            '\t' => quoted.push_str(r"\t"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Returns `true` if `name` can be used as a GDScript identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c == '_' || unicode_ident::is_xid_start(c))
        && chars.all(unicode_ident::is_xid_continue)
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_nested_blocks() {
        let mut w = GdWriter::new();
        w.block("func f()", |w| {
            w.block("if x", |w| {
                w.line("pass");
            });
            w.blank();
            w.lines("if y:\n    return");
        });
        assert_eq!(
            w.finish(),
            indoc! {"
                func f():
                    if x:
                        pass

                    if y:
                        return
            "}
        );
    }

    #[test]
    fn test_doc_wraps_long_lines() {
        let mut w = GdWriter::new();
        w.block("class A", |w| {
            w.doc(&"word ".repeat(20));
        });
        let doc = w.finish();
        let lines = doc.lines().skip(1).collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|line| line.starts_with("    ## ")));
    }

    #[test]
    fn test_doc_keeps_paragraph_breaks() {
        let mut w = GdWriter::new();
        w.doc("First.\n\nSecond.");
        assert_eq!(w.finish(), "## First.\n##\n## Second.\n");
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("TitleId"), r#""TitleId""#);
        assert_eq!(quote(r#"say "hi"\n"#), r#""say \"hi\"\\n""#);
        assert_eq!(quote("a\nb"), r#""a\nb""#);
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("Thread_"));
        assert!(is_identifier("_internal"));
        assert!(is_identifier("Größe"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2D"));
        assert!(!is_identifier("Entity.Key"));
        assert!(!is_identifier("has space"));
    }
}
