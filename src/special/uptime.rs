//! # Uptime Formatting
//!
//! Turns a raw second count into `1 day 2 hours 3 min 4 sec`.
//!
//! Leading zero units are skipped; once the first non-zero unit is written
//! every smaller unit follows, zeros included (`3600` → `1 hour 0 min 0 sec`).
//! `days` and `hours` drop their plural `s` for a value of one.

const UNITS: [(u64, &str); 4] = [(86_400, "days"), (3_600, "hours"), (60, "min"), (1, "sec")];

pub fn format_uptime(seconds: u64) -> String {
    let mut remaining = seconds;
    let mut parts: Vec<String> = Vec::with_capacity(UNITS.len());

    for (size, unit) in UNITS {
        let value = remaining / size;
        remaining %= size;

        if value == 0 && parts.is_empty() && size != 1 {
            continue;
        }

        let unit = if value == 1 {
            unit.strip_suffix('s').unwrap_or(unit)
        } else {
            unit
        };
        parts.push(format!("{} {}", value, unit));
    }

    parts.join(" ")
}
