//! Nested line layout used by the printer.

const INDENT: &str = "    ";

/// One element of printed output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Lines {
    /// A single line at the current indentation.
    Line(String),
    /// Lines indented one level deeper.
    Block(Vec<Lines>),
    /// An empty separator line.
    Blank,
}

impl Lines {
    pub(crate) fn line(s: impl Into<String>) -> Self {
        Lines::Line(s.into())
    }
}

/// Join non-empty groups with a blank line between each pair.
pub(crate) fn space_between(groups: Vec<Vec<Lines>>) -> Vec<Lines> {
    let mut out = Vec::new();
    for group in groups.into_iter().filter(|g| !g.is_empty()) {
        if !out.is_empty() {
            out.push(Lines::Blank);
        }
        out.extend(group);
    }
    out
}

/// Render to text with four-space indentation and a trailing newline.
pub(crate) fn format_lines(lines: &[Lines]) -> String {
    let mut rendered = Vec::new();
    indent_each(0, lines, &mut rendered);
    let mut out = rendered.join("\n");
    out.push('\n');
    out
}

fn indent_each(depth: usize, lines: &[Lines], out: &mut Vec<String>) {
    for line in lines {
        match line {
            Lines::Line(s) => out.push(format!("{}{}", INDENT.repeat(depth), s)),
            Lines::Block(inner) => indent_each(depth + 1, inner, out),
            Lines::Blank => out.push(String::new()),
        }
    }
}
