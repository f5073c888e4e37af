/// Canonicalize whitespace in a piece of command text.
///
/// Tabs and newlines become spaces, runs of spaces collapse into one, and leading and
/// trailing spaces are dropped. Only space, tab and newline count as whitespace here.
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_space = false;
    for c in input.chars() {
        if matches!(c, ' ' | '\t' | '\n') {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(c);
    }
    out
}
