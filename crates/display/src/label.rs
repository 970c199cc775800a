//! One-line summaries of compressed regions.

/// Flattens `lines` into one line and appends the row count.
///
/// Blank lines are dropped and the rest trimmed and joined with single
/// spaces. A `;` is appended to the previous piece unless it already ends
/// in `{` or `;`, or the current line is a lone `{` or `}`.
///
/// ```
/// use errfold_display::compressed_label;
///
/// let label = compressed_label(["if err != nil {", "\treturn err", "}"], 3);
/// assert_eq!(label, "if err != nil { return err } (3 lines)");
/// ```
pub fn compressed_label<I, S>(lines: I, row_count: usize) -> String
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut out = String::new();
	for line in lines {
		let line = line.as_ref().trim();
		if line.is_empty() {
			continue;
		}
		if !out.is_empty() {
			if !out.ends_with(['{', ';']) && line != "{" && line != "}" {
				out.push(';');
			}
			out.push(' ');
		}
		out.push_str(line);
	}

	let unit = if row_count == 1 { "line" } else { "lines" };
	if !out.is_empty() {
		out.push(' ');
	}
	out.push_str(&format!("({row_count} {unit})"));
	out
}
