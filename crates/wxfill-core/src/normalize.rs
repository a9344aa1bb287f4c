//! Canonicalization of raw channel messages
//!
//! Upstream publishers that serialize payloads repr-style emit single-quoted
//! keys and the bare token `None` for absent values. Both are rewritten into
//! valid JSON before structured parsing so a missing numeric field never
//! fails the parse.

/// Rewrite a raw message into parseable JSON: single-quote delimiters become
/// double quotes, and the bare token `None` becomes the string `"None"`.
/// Messages that are already valid JSON pass through with their meaning
/// intact.
pub fn normalize_message(raw: &str) -> String {
    quote_bare_none(&raw.replace('\'', "\""))
}

/// Quote every `None` token that sits outside a string literal.
fn quote_bare_none(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut in_string = false;
    let mut chars = text.char_indices();

    while let Some((i, c)) = chars.next() {
        if c == '"' {
            in_string = !in_string;
            out.push(c);
        } else if !in_string && text[i..].starts_with("None") {
            out.push_str("\"None\"");
            chars.nth(2);
        } else {
            out.push(c);
        }
    }

    out
}
