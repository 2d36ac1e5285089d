//! Package name patterns.
//!
//! Patterns use dotted package names with two wildcards:
//! - `..` matches any number of segments, including none
//! - `*` matches any run of characters within one segment
//!
//! ```
//! use archrules_core::utils::package_matches;
//!
//! assert!(package_matches("org.gradle.api.internal", "org.gradle.."));
//! assert!(package_matches("org.gradle.api.internal", "..internal.."));
//! assert!(!package_matches("org.gradlex", "org.gradle.."));
//! ```

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    AnySegments,
    Segment(&'a str),
}

fn tokenize(pattern: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    for (i, piece) in pattern.split("..").enumerate() {
        if i > 0 {
            tokens.push(Token::AnySegments);
        }
        tokens.extend(
            piece
                .split('.')
                .filter(|s| !s.is_empty())
                .map(Token::Segment),
        );
    }
    tokens
}

/// Checks if a package name matches a pattern.
#[must_use]
pub fn package_matches(package: &str, pattern: &str) -> bool {
    let segments: Vec<&str> = package.split('.').filter(|s| !s.is_empty()).collect();
    match_tokens(&segments, &tokenize(pattern))
}

/// Checks if a package name matches any of the patterns.
#[must_use]
pub fn package_matches_any<S: AsRef<str>>(package: &str, patterns: &[S]) -> bool {
    patterns.iter().any(|p| package_matches(package, p.as_ref()))
}

fn match_tokens(segments: &[&str], tokens: &[Token<'_>]) -> bool {
    let Some((first, rest)) = tokens.split_first() else {
        return segments.is_empty();
    };

    match first {
        Token::AnySegments => (0..=segments.len()).any(|i| match_tokens(&segments[i..], rest)),
        Token::Segment(pattern) => match segments.split_first() {
            Some((segment, remaining)) => {
                match_segment(segment, pattern) && match_tokens(remaining, rest)
            }
            None => false,
        },
    }
}

/// Glob match of a single segment; `*` matches any run of characters.
fn match_segment(segment: &str, pattern: &str) -> bool {
    let Some((prefix, rest)) = pattern.split_once('*') else {
        return segment == pattern;
    };
    let Some(remaining) = segment.strip_prefix(prefix) else {
        return false;
    };
    remaining
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(remaining.len()))
        .any(|i| match_segment(&remaining[i..], rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_package() {
        assert!(package_matches("com.google.common.base", "com.google.common.base"));
        assert!(!package_matches("com.google.common", "com.google.common.base"));
    }

    #[test]
    fn test_trailing_any_segments() {
        assert!(package_matches("javax.annotation", "javax.."));
        assert!(package_matches("javax", "javax.."));
        assert!(!package_matches("jakarta.annotation", "javax.."));
    }

    #[test]
    fn test_surrounding_any_segments() {
        assert!(package_matches("org.gradle.api.internal.tasks", "..internal.."));
        assert!(package_matches("internal", "..internal.."));
        assert!(!package_matches("org.gradle.internals", "..internal.."));
    }

    #[test]
    fn test_segment_wildcard() {
        assert!(package_matches("com.acme.service", "com.*.service"));
        assert!(package_matches("com.acme.userservice", "com.acme.*service"));
        assert!(!package_matches("com.acme.a.service", "com.*.service"));
        assert!(package_matches("com.acme.anything", "com.acme.*"));
    }

    #[test]
    fn test_default_package() {
        assert!(package_matches("", ".."));
        assert!(!package_matches("", "javax.."));
    }

    #[test]
    fn test_matches_any() {
        assert!(package_matches_any("org.joda.time", &["javax..", "org.joda.time.."]));
        assert!(!package_matches_any::<&str>("org.joda.time", &[]));
    }
}
