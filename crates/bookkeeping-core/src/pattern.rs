//! Wildcard patterns used by account lookups.
//!
//! `*` stands for any (possibly empty) run of characters; every other
//! character matches itself. Backends that push filtering down to a query
//! language must keep these semantics.

pub const WILDCARD: char = '*';

/// Returns true if `pattern` consists only of digits and `*`.
pub fn is_code_pattern(pattern: &str) -> bool {
    !pattern.is_empty() && pattern.chars().all(|c| c.is_ascii_digit() || c == WILDCARD)
}

/// Matches the whole of `text` against `pattern`.
pub fn wildcard_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let (mut p, mut t) = (0, 0);
    // position of the last `*` seen and the text position it is currently absorbing up to
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && pattern[p] == WILDCARD {
            backtrack = Some((p, t));
            p += 1;
        } else if p < pattern.len() && pattern[p] == text[t] {
            p += 1;
            t += 1;
        } else if let Some((star, absorbed)) = backtrack {
            p = star + 1;
            t = absorbed + 1;
            backtrack = Some((star, absorbed + 1));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|c| *c == WILDCARD)
}

/// Matches `pattern` anywhere inside `text`.
pub fn wildcard_contains(pattern: &str, text: &str) -> bool {
    wildcard_match(&format!("{WILDCARD}{pattern}{WILDCARD}"), text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_patterns() {
        assert!(is_code_pattern("1110"));
        assert!(is_code_pattern("11*"));
        assert!(is_code_pattern("*"));
        assert!(!is_code_pattern(""));
        assert!(!is_code_pattern("11a"));
        assert!(!is_code_pattern("abc1"));
        assert!(!is_code_pattern("11%"));
    }

    #[test]
    fn whole_text_match() {
        assert!(wildcard_match("1110", "1110"));
        assert!(!wildcard_match("111", "1110"));
        assert!(wildcard_match("11*", "1110"));
        assert!(wildcard_match("*10", "1110"));
        assert!(wildcard_match("1*1*", "1110"));
        assert!(!wildcard_match("2*", "1110"));
        assert!(wildcard_match("*", ""));
        assert!(!wildcard_match("", "1"));
    }

    #[test]
    fn substring_match() {
        assert!(wildcard_contains("Cash", "Petty Cash"));
        assert!(wildcard_contains("Acc*Rec", "Accounts Receivable"));
        assert!(!wildcard_contains("cash", "Petty Cash"));
        assert!(wildcard_contains("", "anything"));
    }
}
