//! Whitespace normalization shared by every output target.

/// Collapse runs of three or more newlines into exactly two
pub fn collapse_blank_lines(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut newline_count = 0;

    for c in s.chars() {
        if c == '\n' {
            newline_count += 1;
            if newline_count <= 2 {
                result.push(c);
            }
        } else {
            newline_count = 0;
            result.push(c);
        }
    }

    result
}

/// Remove spaces, tabs and carriage returns at the end of every line.
///
/// With `keep_hard_breaks`, a line ending in two or more spaces keeps exactly two
/// when it has text and the next line is not blank: that is a Markdown hard break.
pub fn strip_trailing_whitespace(s: &str, keep_hard_breaks: bool) -> String {
    let lines: Vec<&str> = s.split('\n').collect();
    let mut result = String::with_capacity(s.len());

    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            result.push('\n');
        }
        let trimmed = line.trim_end_matches([' ', '\t', '\r']);
        result.push_str(trimmed);

        if keep_hard_breaks && !trimmed.trim().is_empty() && line.ends_with("  ") {
            let next_has_text = lines
                .get(i + 1)
                .is_some_and(|next| !next.trim().is_empty());
            if next_has_text {
                result.push_str("  ");
            }
        }
    }

    result
}

/// Final stage for text targets: trailing whitespace, blank-line runs, outer trim
pub fn normalize_text(s: &str, keep_hard_breaks: bool) -> String {
    let stripped = strip_trailing_whitespace(s, keep_hard_breaks);
    collapse_blank_lines(&stripped).trim().to_string()
}

/// Collapse runs of ASCII whitespace into a single space (HTML text rules)
pub fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_whitespace = false;

    for c in s.chars() {
        if c.is_ascii_whitespace() {
            if !prev_was_whitespace {
                result.push(' ');
                prev_was_whitespace = true;
            }
        } else {
            result.push(c);
            prev_was_whitespace = false;
        }
    }

    result
}
