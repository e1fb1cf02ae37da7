use std::time::Duration;

/// Values that switch a boolean setting off. Anything else counts as on.
const FALSE_VALUES: [&str; 4] = ["0", "false", "no", "off"];

/// Parses a Discord snowflake, rejecting zero and anything non-numeric.
///
/// # Arguments
/// - `raw` - Candidate ID, surrounding whitespace is ignored
///
/// # Returns
/// - `Some(u64)` - A usable, non-zero ID
/// - `None` - Empty, non-numeric, overflowing or zero input
pub fn parse_snowflake(raw: &str) -> Option<u64> {
    let value = raw.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse::<u64>().ok().filter(|id| *id != 0)
}

/// Parses a user ID given either as a bare number or as a mention (`<@id>` / `<@!id>`).
pub fn parse_user_id(raw: &str) -> Option<u64> {
    let value = raw.trim();
    let value = match value
        .strip_prefix("<@")
        .and_then(|inner| inner.strip_suffix('>'))
    {
        Some(inner) => inner.strip_prefix('!').unwrap_or(inner),
        None => value,
    };
    parse_snowflake(value)
}

/// Parses a boolean setting, falling back to `default` when unset.
pub fn parse_bool(raw: Option<&str>, default: bool) -> bool {
    match raw {
        None => default,
        Some(value) => {
            let value = value.trim().to_ascii_lowercase();
            !FALSE_VALUES.contains(&value.as_str())
        }
    }
}

/// Parses an integer setting.
///
/// Unset or unparsable values yield `default`; values below `minimum` are raised to it.
pub fn parse_int(raw: Option<&str>, default: u64, minimum: u64) -> u64 {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<i64>() {
        Ok(value) if value < minimum as i64 => minimum,
        Ok(value) => value as u64,
        Err(_) => default,
    }
}

/// Parses a comma separated list of delays in (possibly fractional) seconds.
///
/// Blank, non-numeric and non-positive entries are dropped. If nothing usable remains
/// the default list is returned.
pub fn parse_delays(raw: Option<&str>, default: &[f64]) -> Vec<Duration> {
    let parsed: Vec<Duration> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .filter_map(|chunk| chunk.parse::<f64>().ok())
        .filter(|delay| *delay > 0.0)
        .filter_map(|delay| Duration::try_from_secs_f64(delay).ok())
        .collect();

    if parsed.is_empty() {
        default.iter().copied().map(Duration::from_secs_f64).collect()
    } else {
        parsed
    }
}
