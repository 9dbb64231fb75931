/// Parse a comma-separated separator list
///
/// Pieces are trimmed and empty pieces dropped; order is preserved.
pub fn parse_separators(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Check whether a line ends a content block
///
/// A line matches when its trimmed text starts with any configured prefix.
pub fn is_separator_line(line: &str, separators: &[String]) -> bool {
    if separators.is_empty() {
        return false;
    }

    let trimmed = line.trim();
    separators.iter().any(|sep| trimmed.starts_with(sep.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seps(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_separators() {
        assert_eq!(parse_separators("---, %% ,,  foo"), vec!["---", "%%", "foo"]);
    }

    #[test]
    fn test_parse_separators_blank() {
        assert!(parse_separators("").is_empty());
        assert!(parse_separators("   ").is_empty());
        assert!(parse_separators(" , ,").is_empty());
    }

    #[test]
    fn test_separator_prefix_match() {
        let separators = seps(&["---", "%%"]);
        assert!(is_separator_line("---", &separators));
        assert!(is_separator_line("------ end", &separators));
        assert!(is_separator_line("   %% comment", &separators));
        assert!(!is_separator_line("text ---", &separators));
        assert!(!is_separator_line("", &separators));
    }

    #[test]
    fn test_no_separators_matches_nothing() {
        assert!(!is_separator_line("---", &[]));
        assert!(!is_separator_line("", &[]));
    }
}
