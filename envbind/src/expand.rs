//! Shell-style `$VAR` / `${VAR}` expansion

/// Replaces `$NAME` and `${NAME}` references in `input` using `lookup`.
///
/// Names are ASCII alphanumerics and underscores, or one of the single
/// character shell specials (`*#$@!?-` and digits). Unknown names expand to
/// the empty string. A `$` not followed by a name is kept as is, while a
/// malformed `${` (empty or unterminated) is dropped.
pub fn expand<F>(input: &str, mut lookup: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut start = 0;
    let mut j = 0;

    while j < bytes.len() {
        if bytes[j] == b'$' && j + 1 < bytes.len() {
            out.push_str(&input[start..j]);
            let (name, width) = shell_name(&input[j + 1..]);
            if name.is_empty() && width == 0 {
                out.push('$');
            } else if !name.is_empty() {
                out.push_str(&lookup(name).unwrap_or_default());
            }
            j += width;
            start = j + 1;
        }
        j += 1;
    }

    out.push_str(&input[start..]);
    out
}

/// Splits the variable name off the text following a `$`.
///
/// Returns the name and the number of bytes it occupies. An empty name with
/// a non-zero width means malformed braces.
fn shell_name(s: &str) -> (&str, usize) {
    let bytes = s.as_bytes();

    if bytes[0] == b'{' {
        if bytes.len() > 2 && is_special(bytes[1]) && bytes[2] == b'}' {
            return (&s[1..2], 3);
        }
        for (i, &b) in bytes.iter().enumerate().skip(1) {
            if b == b'}' {
                if i == 1 {
                    return ("", 2);
                }
                return (&s[1..i], i + 1);
            }
        }
        return ("", 1);
    }

    if is_special(bytes[0]) {
        return (&s[0..1], 1);
    }

    let len = bytes
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count();
    (&s[..len], len)
}

fn is_special(b: u8) -> bool {
    matches!(b, b'*' | b'#' | b'$' | b'@' | b'!' | b'?' | b'-') || b.is_ascii_digit()
}
