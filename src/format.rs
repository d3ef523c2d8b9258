/// Rearranges `YYYY-MM-DD` into `MM/DD/YYYY` without any calendar parsing,
/// so a date never shifts across a timezone boundary.
pub fn format_date(iso: &str) -> String {
    let iso = iso.trim();
    if iso.is_empty() {
        return String::new();
    }

    let mut parts = iso.splitn(3, '-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(year), Some(month), Some(day)) => format!("{month}/{day}/{year}"),
        _ => iso.to_string(),
    }
}

/// Converts 24-hour `HH:MM` (seconds ignored) into `H:MM AM/PM`.
pub fn format_time(hhmm: &str) -> String {
    let hhmm = hhmm.trim();
    if hhmm.is_empty() {
        return String::new();
    }

    let Some((hour, minute)) = split_clock(hhmm) else {
        return hhmm.to_string();
    };

    let suffix = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display_hour}:{minute:02} {suffix}")
}

/// Splits `HH:MM[:SS]` into hour and minute, rejecting out-of-range values.
pub(crate) fn split_clock(value: &str) -> Option<(u32, u32)> {
    let mut parts = value.trim().split(':');
    let hour: u32 = parts.next()?.trim().parse().ok()?;
    let minute: u32 = parts.next()?.trim().parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}
