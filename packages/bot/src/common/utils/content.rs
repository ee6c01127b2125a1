/// Pure utility functions for text manipulation
///
/// These functions contain NO side effects - they take inputs and return outputs
/// without touching databases, making API calls, or performing I/O.

/// Longest entity body we try to decode (`&#x10FFFF;` minus the delimiters).
const MAX_ENTITY_LEN: usize = 10;

/// Decode HTML entities in a single pass.
///
/// Handles the named entities Reddit emits (`&amp;`, `&lt;`, `&gt;`, `&quot;`,
/// `&apos;`, `&nbsp;`) plus decimal and hex numeric references. Because the
/// scan never revisits decoded output, `&amp;lt;` becomes `&lt;`, not `<`.
/// Unknown or malformed entities are kept verbatim.
pub fn decode_html_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];

        let decoded = after
            .find(';')
            .filter(|&end| end > 0 && end <= MAX_ENTITY_LEN)
            .and_then(|end| decode_entity(&after[..end]).map(|c| (c, end)));

        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &after[end + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_entity(body: &str) -> Option<char> {
    match body {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let numeric = body.strip_prefix('#')?;
            let code = match numeric.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => numeric.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Truncate to at most `max_chars` characters, ending with `…` when cut.
///
/// Counts `char`s, not bytes, so multi-byte text is never split mid-codepoint.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let keep = max_chars.saturating_sub(1);
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.truncate(truncated.trim_end().len());
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_named_entities() {
        assert_eq!(decode_html_entities("A &amp; B"), "A & B");
        assert_eq!(
            decode_html_entities("&lt;div&gt; &quot;hi&quot; it&apos;s"),
            "<div> \"hi\" it's"
        );
    }

    #[test]
    fn test_decode_numeric_entities() {
        assert_eq!(decode_html_entities("it&#39;s"), "it's");
        assert_eq!(decode_html_entities("&#x1F980; crab"), "🦀 crab");
        assert_eq!(decode_html_entities("&#X41;"), "A");
    }

    #[test]
    fn test_decode_is_single_pass() {
        assert_eq!(decode_html_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_unknown_and_malformed_entities_kept() {
        assert_eq!(decode_html_entities("AT&T rocks"), "AT&T rocks");
        assert_eq!(decode_html_entities("&bogus; &;"), "&bogus; &;");
        assert_eq!(decode_html_entities("tail &amp"), "tail &amp");
        assert_eq!(decode_html_entities("&#xZZ;"), "&#xZZ;");
        assert_eq!(decode_html_entities("&#55296;"), "&#55296;");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(decode_html_entities("no entities here"), "no entities here");
        assert_eq!(decode_html_entities(""), "");
    }

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_chars("Short text", 280), "Short text");
    }

    #[test]
    fn test_truncate_exact_length_unchanged() {
        let exact = "a".repeat(280);
        assert_eq!(truncate_chars(&exact, 280), exact);
    }

    #[test]
    fn test_truncate_long_text() {
        let long = "a".repeat(300);
        let truncated = truncate_chars(&long, 280);
        assert_eq!(truncated.chars().count(), 280);
        assert!(truncated.ends_with('…'));
    }

    #[test]
    fn test_truncate_multibyte() {
        let long = "é".repeat(10);
        assert_eq!(truncate_chars(&long, 4), "ééé…");
    }

    #[test]
    fn test_truncate_trims_trailing_space_before_ellipsis() {
        assert_eq!(truncate_chars("hello world again", 7), "hello…");
    }
}
