//! Table layout.
//!
//! Column widths come from [`display_width`], so styled and wide cells
//! line up. Output lines are joined with `\n` and carry no trailing newline.

use super::width::{display_width, pad_to_width, Align};

/// Box-drawing style for table borders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    #[default]
    Single,
    Double,
    Rounded,
    Ascii,
    None,
}

/// Border glyphs: corners, junctions and lines.
struct Glyphs {
    top_left: char,
    top_mid: char,
    top_right: char,
    mid_left: char,
    mid_mid: char,
    mid_right: char,
    bottom_left: char,
    bottom_mid: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
}

impl BorderStyle {
    fn glyphs(self) -> Option<Glyphs> {
        let g = match self {
            Self::Single => Glyphs {
                top_left: '┌',
                top_mid: '┬',
                top_right: '┐',
                mid_left: '├',
                mid_mid: '┼',
                mid_right: '┤',
                bottom_left: '└',
                bottom_mid: '┴',
                bottom_right: '┘',
                horizontal: '─',
                vertical: '│',
            },
            Self::Double => Glyphs {
                top_left: '╔',
                top_mid: '╦',
                top_right: '╗',
                mid_left: '╠',
                mid_mid: '╬',
                mid_right: '╣',
                bottom_left: '╚',
                bottom_mid: '╩',
                bottom_right: '╝',
                horizontal: '═',
                vertical: '║',
            },
            Self::Rounded => Glyphs {
                top_left: '╭',
                top_right: '╮',
                bottom_left: '╰',
                bottom_right: '╯',
                ..Self::Single.glyphs()?
            },
            Self::Ascii => Glyphs {
                top_left: '+',
                top_mid: '+',
                top_right: '+',
                mid_left: '+',
                mid_mid: '+',
                mid_right: '+',
                bottom_left: '+',
                bottom_mid: '+',
                bottom_right: '+',
                horizontal: '-',
                vertical: '|',
            },
            Self::None => return None,
        };
        Some(g)
    }
}

/// Rendering options for [`table`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    pub border: BorderStyle,
    /// Spaces on each side of every cell
    pub padding: usize,
    /// Per-column alignment; missing entries are left-aligned
    pub align: Vec<Align>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            border: BorderStyle::Single,
            padding: 1,
            align: Vec::new(),
        }
    }
}

/// Render `headers` and `rows` as a table.
///
/// Rows shorter than the widest row are padded with empty cells. The
/// header separator is only drawn when there are headers.
pub fn table<S: AsRef<str>>(headers: &[S], rows: &[Vec<S>], options: &TableOptions) -> String {
    let columns = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(headers.len()))
        .max()
        .unwrap_or(0);
    if columns == 0 {
        return String::new();
    }

    let mut widths = vec![0usize; columns];
    for (col, width) in widths.iter_mut().enumerate() {
        let header = if headers.is_empty() { 0 } else { display_width(cell(headers, col)) };
        *width = rows
            .iter()
            .map(|row| display_width(cell(row, col)))
            .chain(std::iter::once(header))
            .max()
            .unwrap_or(0);
    }

    let glyphs = options.border.glyphs();
    let pad = " ".repeat(options.padding);

    let render_row = |row: &[S]| -> String {
        let cells: Vec<String> = (0..columns)
            .map(|col| {
                let align = options.align.get(col).copied().unwrap_or_default();
                format!("{pad}{}{pad}", pad_to_width(cell(row, col), widths[col], align))
            })
            .collect();
        match &glyphs {
            Some(g) => {
                let sep = g.vertical.to_string();
                format!("{sep}{}{sep}", cells.join(&sep))
            }
            None => cells.join("").trim_end().to_string(),
        }
    };

    let rule = |left: char, mid: char, right: char, line: char| -> String {
        let segments: Vec<String> = widths
            .iter()
            .map(|w| line.to_string().repeat(w + 2 * options.padding))
            .collect();
        format!("{left}{}{right}", segments.join(&mid.to_string()))
    };

    let mut lines = Vec::with_capacity(rows.len() + 4);
    if let Some(g) = &glyphs {
        lines.push(rule(g.top_left, g.top_mid, g.top_right, g.horizontal));
    }
    if !headers.is_empty() {
        lines.push(render_row(headers));
        match &glyphs {
            Some(g) => lines.push(rule(g.mid_left, g.mid_mid, g.mid_right, g.horizontal)),
            None => {
                let total: usize = widths.iter().map(|w| w + 2 * options.padding).sum();
                lines.push("-".repeat(total).trim_end().to_string());
            }
        }
    }
    for row in rows {
        lines.push(render_row(row.as_slice()));
    }
    if let Some(g) = &glyphs {
        lines.push(rule(g.bottom_left, g.bottom_mid, g.bottom_right, g.horizontal));
    }

    lines.join("\n")
}

/// Text of cell `col`, or empty when the row is short.
fn cell<S: AsRef<str>>(row: &[S], col: usize) -> &str {
    row.get(col).map(|s| s.as_ref()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Vec<&'static str>, Vec<Vec<&'static str>>) {
        (
            vec!["Name", "Qty"],
            vec![vec!["apple", "3"], vec!["kiwi", "12"]],
        )
    }

    #[test]
    fn single_border_table() {
        let (headers, rows) = sample();
        let out = table(&headers, &rows, &TableOptions::default());
        insta::assert_snapshot!(out, @r###"
        ┌───────┬─────┐
        │ Name  │ Qty │
        ├───────┼─────┤
        │ apple │ 3   │
        │ kiwi  │ 12  │
        └───────┴─────┘
        "###);
    }

    #[test]
    fn ascii_border_with_right_alignment() {
        let (headers, rows) = sample();
        let options = TableOptions {
            border: BorderStyle::Ascii,
            padding: 1,
            align: vec![Align::Left, Align::Right],
        };
        insta::assert_snapshot!(table(&headers, &rows, &options), @r###"
        +-------+-----+
        | Name  | Qty |
        +-------+-----+
        | apple |   3 |
        | kiwi  |  12 |
        +-------+-----+
        "###);
    }

    #[test]
    fn rounded_and_double_corners() {
        let (headers, rows) = sample();
        let rounded = table(
            &headers,
            &rows,
            &TableOptions {
                border: BorderStyle::Rounded,
                ..Default::default()
            },
        );
        assert!(rounded.starts_with('╭'));
        assert!(rounded.ends_with('╯'));
        assert!(rounded.contains('┼'));

        let double = table(
            &headers,
            &rows,
            &TableOptions {
                border: BorderStyle::Double,
                ..Default::default()
            },
        );
        assert!(double.starts_with('╔'));
        assert!(double.contains("║ Name  ║ Qty ║"));
    }

    #[test]
    fn no_border_uses_padding_only() {
        let (headers, rows) = sample();
        let options = TableOptions {
            border: BorderStyle::None,
            padding: 1,
            align: Vec::new(),
        };
        let out = table(&headers, &rows, &options);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], " Name   Qty");
        assert_eq!(lines[1], "------------");
        assert_eq!(lines[2], " apple  3");
        assert_eq!(lines[3], " kiwi   12");
    }

    #[test]
    fn center_alignment_puts_remainder_right() {
        let headers = vec!["Header"];
        let rows = vec![vec!["ab"], vec!["abc"]];
        let options = TableOptions {
            border: BorderStyle::Ascii,
            padding: 0,
            align: vec![Align::Center],
        };
        let out = table(&headers, &rows, &options);
        assert!(out.contains("|  ab  |"));
        assert!(out.contains("| abc  |"));
    }

    #[test]
    fn wide_and_styled_cells_align() {
        let headers = vec!["k", "v"];
        let rows = vec![vec!["中文", "\x1b[31mred\x1b[0m"], vec!["ab", "x"]];
        let out = table(&headers, &rows, &TableOptions::default());
        let widths: Vec<usize> = out.lines().map(display_width).collect();
        assert!(widths.iter().all(|&w| w == widths[0]), "{widths:?}");
    }

    #[test]
    fn ragged_rows_and_missing_headers() {
        let headers: Vec<&str> = Vec::new();
        let rows = vec![vec!["a", "b", "c"], vec!["d"]];
        let out = table(&headers, &rows, &TableOptions::default());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2], "│ d │   │   │");
    }

    #[test]
    fn empty_table_renders_nothing() {
        let headers: Vec<&str> = Vec::new();
        let rows: Vec<Vec<&str>> = Vec::new();
        assert_eq!(table(&headers, &rows, &TableOptions::default()), "");
    }
}
