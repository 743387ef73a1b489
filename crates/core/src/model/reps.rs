use serde::{Deserialize, Serialize};

/// Typed reading of an exercise's free-form reps label.
///
/// Labels come straight from program data ("8-10", "10/leg", "30s/side",
/// "6 minutes", "20 total"). Parsing never fails: anything that does not fit a
/// known shape is kept as `Freeform`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepScheme {
    Count { min: u32, max: u32, per_side: bool },
    Duration { seconds: u32, per_side: bool },
    Steps { count: u32 },
    Freeform(String),
}

const PER_SIDE_SUFFIXES: [&str; 4] = ["/leg", "/side", "/arm", " each"];
const MINUTE_SUFFIXES: [&str; 4] = ["minutes", "minute", "mins", "min"];
const SECOND_SUFFIXES: [&str; 5] = ["seconds", "second", "secs", "sec", "s"];

impl RepScheme {
    #[must_use]
    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();
        let (body, per_side) = strip_any(trimmed, &PER_SIDE_SUFFIXES)
            .map_or((trimmed, false), |rest| (rest, true));
        let body = body.strip_suffix(" total").unwrap_or(body).trim();

        if let Some(count) = body.strip_suffix("steps").and_then(parse_number) {
            return Self::Steps { count };
        }
        if let Some(minutes) = strip_any(body, &MINUTE_SUFFIXES).and_then(parse_number) {
            return Self::Duration {
                seconds: minutes.saturating_mul(60),
                per_side,
            };
        }
        if let Some(seconds) = strip_any(body, &SECOND_SUFFIXES).and_then(parse_number) {
            return Self::Duration { seconds, per_side };
        }
        if let Some((min, max)) = parse_range(body) {
            return Self::Count { min, max, per_side };
        }

        Self::Freeform(trimmed.to_owned())
    }

    /// Upper bound of a counted target, useful as a default reps input.
    #[must_use]
    pub fn target_reps(&self) -> Option<u32> {
        match self {
            Self::Count { max, .. } => Some(*max),
            Self::Steps { count } => Some(*count),
            Self::Duration { .. } | Self::Freeform(_) => None,
        }
    }

    #[must_use]
    pub fn is_timed(&self) -> bool {
        matches!(self, Self::Duration { .. })
    }

    #[must_use]
    pub fn is_per_side(&self) -> bool {
        matches!(
            self,
            Self::Count { per_side: true, .. } | Self::Duration { per_side: true, .. }
        )
    }
}

fn strip_any<'a>(value: &'a str, suffixes: &[&str]) -> Option<&'a str> {
    suffixes
        .iter()
        .find_map(|suffix| value.strip_suffix(suffix))
        .map(str::trim_end)
}

fn parse_number(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}

fn parse_range(value: &str) -> Option<(u32, u32)> {
    let mut parts = value.split(['-', '–']);
    let first = parse_number(parts.next()?)?;
    match parts.next() {
        None => Some((first, first)),
        Some(second) => {
            if parts.next().is_some() {
                return None;
            }
            let second = parse_number(second)?;
            (first <= second).then_some((first, second))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(min: u32, max: u32, per_side: bool) -> RepScheme {
        RepScheme::Count { min, max, per_side }
    }

    #[test]
    fn parses_plain_counts_and_ranges() {
        assert_eq!(RepScheme::parse("8"), count(8, 8, false));
        assert_eq!(RepScheme::parse("8-10"), count(8, 10, false));
        assert_eq!(RepScheme::parse("6–8"), count(6, 8, false));
        assert_eq!(RepScheme::parse("20 total"), count(20, 20, false));
    }

    #[test]
    fn parses_per_side_markers() {
        assert_eq!(RepScheme::parse("10/leg"), count(10, 10, true));
        assert_eq!(RepScheme::parse("10–12/leg"), count(10, 12, true));
        assert_eq!(RepScheme::parse("12/side"), count(12, 12, true));
        assert_eq!(RepScheme::parse("12 each"), count(12, 12, true));
    }

    #[test]
    fn parses_durations() {
        assert_eq!(
            RepScheme::parse("30s"),
            RepScheme::Duration {
                seconds: 30,
                per_side: false
            }
        );
        assert_eq!(
            RepScheme::parse("30s/side"),
            RepScheme::Duration {
                seconds: 30,
                per_side: true
            }
        );
        assert_eq!(
            RepScheme::parse("6 minutes"),
            RepScheme::Duration {
                seconds: 360,
                per_side: false
            }
        );
    }

    #[test]
    fn parses_steps() {
        assert_eq!(RepScheme::parse("30 steps"), RepScheme::Steps { count: 30 });
    }

    #[test]
    fn unknown_labels_stay_freeform() {
        assert_eq!(
            RepScheme::parse(" AMRAP "),
            RepScheme::Freeform("AMRAP".into())
        );
        assert_eq!(
            RepScheme::parse("12-8"),
            RepScheme::Freeform("12-8".into())
        );
    }

    #[test]
    fn target_reps_uses_upper_bound() {
        assert_eq!(RepScheme::parse("8-10").target_reps(), Some(10));
        assert_eq!(RepScheme::parse("30s").target_reps(), None);
        assert!(RepScheme::parse("30s/side").is_timed());
        assert!(RepScheme::parse("8/leg").is_per_side());
    }
}
