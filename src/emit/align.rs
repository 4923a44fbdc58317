//! Column alignment of marker-delimited zones in generated text.

/// Marker separating alignment zones within a line.
pub const ALIGN_MARKER: char = '¦';

/// A post-processing pass applied to fully rendered output.
pub trait TextAligner {
    fn align(&self, text: &str) -> String;
}

/// Pads each marker-delimited zone of consecutive marked lines to a common
/// width, then drops the markers. Unmarked lines pass through unchanged and
/// end a block.
#[derive(Debug, Clone, Copy)]
pub struct MarkerAligner {
    marker: char,
}

impl MarkerAligner {
    pub fn new(marker: char) -> Self {
        Self { marker }
    }
}

impl Default for MarkerAligner {
    fn default() -> Self {
        Self::new(ALIGN_MARKER)
    }
}

impl TextAligner for MarkerAligner {
    fn align(&self, text: &str) -> String {
        let lines: Vec<&str> = text.split('\n').collect();
        let mut out: Vec<String> = Vec::with_capacity(lines.len());

        let mut i = 0;
        while i < lines.len() {
            if !lines[i].contains(self.marker) {
                out.push(lines[i].to_string());
                i += 1;
                continue;
            }
            let start = i;
            while i < lines.len() && lines[i].contains(self.marker) {
                i += 1;
            }
            out.extend(align_block(&lines[start..i], self.marker));
        }

        out.join("\n")
    }
}

/// Leaves text untouched. Useful when inspecting raw emitter output.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAlign;

impl TextAligner for NoAlign {
    fn align(&self, text: &str) -> String {
        text.to_string()
    }
}

fn align_block(lines: &[&str], marker: char) -> Vec<String> {
    let rows: Vec<Vec<&str>> = lines.iter().map(|l| l.split(marker).collect()).collect();

    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in &rows {
        // The last zone of a row is never padded.
        for (col, cell) in row.iter().enumerate().take(row.len().saturating_sub(1)) {
            widths[col] = widths[col].max(cell.chars().count());
        }
    }

    rows.iter()
        .map(|row| {
            let mut line = String::new();
            for (col, cell) in row.iter().enumerate() {
                line.push_str(cell);
                if col + 1 < row.len() {
                    let pad = widths[col] - cell.chars().count();
                    line.extend(std::iter::repeat(' ').take(pad));
                }
            }
            line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aligns_consecutive_marked_lines() {
        let text = "x\nif( a¦ != null ¦) add( \"a\"¦, a ¦);\nif( long¦ != null ¦) add( \"long\"¦, long ¦);\ny";
        let aligned = MarkerAligner::default().align(text);
        assert_eq!(
            aligned,
            "x\nif( a    != null ) add( \"a\"   , a    );\nif( long != null ) add( \"long\", long );\ny"
        );
    }

    #[test]
    fn test_unmarked_line_breaks_block() {
        let text = "a¦b\nplain\nlonger¦c";
        let aligned = MarkerAligner::default().align(text);
        assert_eq!(aligned, "ab\nplain\nlongerc");
    }

    #[test]
    fn test_no_markers_is_identity() {
        let text = "one\n\ttwo\n\nthree\n";
        assert_eq!(MarkerAligner::default().align(text), text);
        assert_eq!(NoAlign.align(text), text);
    }
}
