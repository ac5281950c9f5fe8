//! String and character literal masking.

/// Character written over literal contents.
const FILLER: char = ' ';

/// Returns a copy of `line` with the interiors of `"..."` and `'...'` literals blanked.
///
/// Delimiters are kept and the character count is preserved, so braces and
/// keywords inside literals can no longer be mistaken for code. A backslash
/// inside a literal also blanks the character after it. A literal still open
/// at end of line is closed there.
///
/// # Examples
/// ```
/// use fernstyle::scanner::mask_literals;
///
/// assert_eq!(mask_literals(r#"s = "{";"#), r#"s = " ";"#);
/// assert_eq!(mask_literals(r"c = '\'';"), r"c = '  ';");
/// ```
#[must_use]
pub fn mask_literals(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut open: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match open {
            None => {
                if c == '"' || c == '\'' {
                    open = Some(c);
                }
                out.push(c);
            }
            Some(quote) if c == quote => {
                open = None;
                out.push(c);
            }
            Some(_) if c == '\\' => {
                out.push(FILLER);
                if chars.next().is_some() {
                    out.push(FILLER);
                }
            }
            Some(_) => out.push(FILLER),
        }
    }

    out
}
