//! Query canonicalization for search terms.

/// Interrogative lead-ins removed from the front of a query, checked in order
const LEADING_PHRASES: &[&str] = &["what is", "who is", "tell me about", "information about"];

/// Canonicalize a free-text query for use as a search term.
///
/// Lower-cases and trims the input, strips each interrogative prefix in turn
/// when the remaining text starts with it, then strips one trailing `?`.
pub fn normalize(query: &str) -> String {
    let mut cleaned = query.trim().to_lowercase();

    for phrase in LEADING_PHRASES {
        if let Some(rest) = cleaned.strip_prefix(phrase) {
            cleaned = rest.trim().to_string();
        }
    }

    if let Some(rest) = cleaned.strip_suffix('?') {
        cleaned = rest.trim().to_string();
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("What is closure?", "closure")]
    #[case("  Who Is Ada Lovelace ", "ada lovelace")]
    #[case("Tell me about the Rust borrow checker", "the rust borrow checker")]
    #[case("information about Mount Everest?", "mount everest")]
    #[case("What is who is Ada?", "ada")]
    #[case("who is what is x", "what is x")]
    #[case("Alan Turing", "alan turing")]
    #[case("Why??", "why?")]
    #[case("", "")]
    fn test_normalize(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[test]
    fn test_prefixes_are_checked_in_order() {
        assert_eq!(normalize("what is who is"), "");
        assert_eq!(normalize("tell me about what is rust"), "what is rust");
    }

    #[test]
    fn test_normalize_is_idempotent_for_plain_terms() {
        let once = normalize("Who is Grace Hopper?");
        assert_eq!(normalize(&once), once);
    }
}
