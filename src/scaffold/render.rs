//! scaffold::render
//!
//! `$name` / `${name}` placeholder substitution.
//!
//! Substitution is safe: a placeholder with no matching variable is written
//! back verbatim, as is a lone `$` that does not start a placeholder. `$$`
//! produces a literal `$`.

/// Render `template`, replacing placeholders from `vars`.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let lookup = |name: &str| vars.iter().find(|(k, _)| *k == name).map(|(_, v)| *v);
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(idx) = rest.find('$') {
        out.push_str(&rest[..idx]);
        let after = &rest[idx + 1..];

        if let Some(tail) = after.strip_prefix('$') {
            out.push('$');
            rest = tail;
            continue;
        }

        if let Some(braced) = after.strip_prefix('{') {
            if let Some(end) = braced.find('}') {
                let name = &braced[..end];
                if is_identifier(name) {
                    match lookup(name) {
                        Some(value) => out.push_str(value),
                        None => out.push_str(&rest[idx..idx + end + 3]),
                    }
                    rest = &braced[end + 1..];
                    continue;
                }
            }
        } else {
            let len = identifier_len(after);
            if len > 0 {
                let name = &after[..len];
                match lookup(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('$');
                        out.push_str(name);
                    }
                }
                rest = &after[len..];
                continue;
            }
        }

        out.push('$');
        rest = after;
    }

    out.push_str(rest);
    out
}

/// Length in bytes of the ASCII identifier at the start of `s`.
fn identifier_len(s: &str) -> usize {
    let mut chars = s.char_indices();
    match chars.next() {
        Some((_, c)) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return 0,
    }
    chars
        .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '_'))
        .map_or(s.len(), |(i, _)| i)
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && identifier_len(s) == s.len()
}
