use chrono::Timelike;
use regex::Regex;

/// Template used when none is configured
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "# HH:MM";

const HOUR_TOKEN: &str = "HH";
const MINUTE_TOKEN: &str = "MM";
const TWO_DIGITS: &str = "[0-9]{2}";
/// Word boundary and non-boundary at one position: matches nothing
const NEVER_MATCHES: &str = r"\b\B";

/// Render a template, substituting the first `HH` and the first `MM`
///
/// Templates without tokens come back unchanged.
pub fn render(template: &str, hour: u32, minute: u32) -> String {
    template
        .replacen(HOUR_TOKEN, &format!("{hour:02}"), 1)
        .replacen(MINUTE_TOKEN, &format!("{minute:02}"), 1)
}

/// Build the pattern that recognises rendered timestamps at the start of a trimmed line
///
/// The template is escaped first, then the first `HH` and `MM` become two-digit
/// classes. Leading and trailing template whitespace is ignored when matching,
/// unlike [`render`] which keeps it, because lines are trimmed before matching.
/// A whitespace-only template matches no line.
pub fn to_match_pattern(template: &str) -> Result<Regex, regex::Error> {
    let template = template.trim();
    if template.is_empty() {
        return Regex::new(NEVER_MATCHES);
    }
    let pattern = regex::escape(template)
        .replacen(HOUR_TOKEN, TWO_DIGITS, 1)
        .replacen(MINUTE_TOKEN, TWO_DIGITS, 1);
    Regex::new(&format!("^{pattern}"))
}

/// A timestamp template such as `# HH:MM`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampFormat {
    template: String,
}

impl TimestampFormat {
    /// An empty template falls back to [`DEFAULT_TIMESTAMP_FORMAT`]
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        if template.is_empty() {
            Self::default()
        } else {
            Self { template }
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn render(&self, hour: u32, minute: u32) -> String {
        render(&self.template, hour, minute)
    }

    /// Render using the hour and minute of a clock time
    pub fn render_time(&self, time: &impl Timelike) -> String {
        self.render(time.hour(), time.minute())
    }

    pub fn match_pattern(&self) -> Result<Regex, regex::Error> {
        to_match_pattern(&self.template)
    }
}

impl Default for TimestampFormat {
    fn default() -> Self {
        Self {
            template: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_render_default_format() {
        assert_eq!(render("# HH:MM", 9, 5), "# 09:05");
        assert_eq!(render("# HH:MM", 23, 59), "# 23:59");
        assert_eq!(render("# HH:MM", 0, 0), "# 00:00");
    }

    #[test]
    fn test_render_only_first_token() {
        assert_eq!(render("HH HH MM MM", 7, 8), "07 HH 08 MM");
    }

    #[test]
    fn test_render_without_tokens() {
        assert_eq!(render("## Log", 12, 34), "## Log");
        assert_eq!(render("", 12, 34), "");
    }

    #[test]
    fn test_render_minute_before_hour() {
        assert_eq!(render("MM past HH", 14, 30), "30 past 14");
    }

    #[test]
    fn test_pattern_matches_rendered_timestamps() {
        let templates = [
            "# HH:MM",
            "[HH:MM]",
            "**HH.MM** -",
            "$HH^MM+ (log)",
            "HH|MM{1}",
            "  - HH:MM  ",
            "no tokens",
        ];
        for template in templates {
            let pattern = to_match_pattern(template).unwrap();
            for hour in 0..24 {
                for minute in 0..60 {
                    let rendered = render(template, hour, minute);
                    assert!(
                        pattern.is_match(rendered.trim()),
                        "{template:?} did not match {rendered:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_pattern_allows_trailing_content() {
        let pattern = to_match_pattern("# HH:MM").unwrap();
        assert!(pattern.is_match("# 10:15 standup notes"));
        assert!(!pattern.is_match("notes # 10:15"));
        assert!(!pattern.is_match("# 1:15"));
        assert!(!pattern.is_match("# ab:cd"));
    }

    #[test]
    fn test_pattern_escapes_metacharacters() {
        let pattern = to_match_pattern("(HH:MM).*").unwrap();
        assert!(pattern.is_match("(09:30).*"));
        assert!(!pattern.is_match("(09:30)xyz"));
    }

    #[test]
    fn test_pattern_without_tokens_is_literal_prefix() {
        let pattern = to_match_pattern("## Log").unwrap();
        assert!(pattern.is_match("## Log"));
        assert!(pattern.is_match("## Log entry"));
        assert!(!pattern.is_match("# Log"));
    }

    #[test]
    fn test_pattern_second_token_is_literal() {
        let pattern = to_match_pattern("HH-HH").unwrap();
        assert!(pattern.is_match("12-HH"));
        assert!(!pattern.is_match("12-12"));
    }

    #[test]
    fn test_pattern_for_whitespace_template_matches_nothing() {
        let pattern = to_match_pattern("  ").unwrap();
        for line in ["", "a", "  ", "# 09:00", "word boundary"] {
            assert!(!pattern.is_match(line.trim()), "matched {line:?}");
        }
    }

    #[test]
    fn test_timestamp_format_empty_falls_back() {
        assert_eq!(TimestampFormat::new("").template(), DEFAULT_TIMESTAMP_FORMAT);
        assert_eq!(TimestampFormat::new("[HH:MM]").template(), "[HH:MM]");
    }

    #[test]
    fn test_render_time() {
        let format = TimestampFormat::default();
        let time = NaiveTime::from_hms_opt(14, 30, 59).unwrap();
        assert_eq!(format.render_time(&time), "# 14:30");
    }
}
