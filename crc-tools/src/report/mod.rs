//! Plain text reports printed to stdout.

mod idle;
mod proposal_end;
mod requests;
mod sus;
mod usage;

#[rustfmt::skip]
pub use {
    idle::format_idle_table,
    proposal_end::format_proposal_end,
    requests::format_request_table,
    sus::format_sus,
    usage::format_usage_table,
};

/// Width of the rules under report headers.
const RULE_WIDTH: usize = 70;

fn rule(c: char) -> String {
    c.to_string().repeat(RULE_WIDTH)
}

/// `1234567` as `1,234,567`.
fn with_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

fn format_count(count: u64) -> String {
    with_thousands(&count.to_string())
}

/// Megabytes as gibibytes with two decimals, e.g. `3.42G`.
fn format_gib(mb: u64) -> String {
    let gib = format!("{:.2}", mb as f64 / 1024.0);
    match gib.split_once('.') {
        Some((whole, fraction)) => format!("{}.{fraction}G", with_thousands(whole)),
        None => format!("{gib}G"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_format_gib() {
        assert_eq!(format_gib(0), "0.00G");
        assert_eq!(format_gib(3500), "3.42G");
        assert_eq!(format_gib(1024), "1.00G");
        assert_eq!(format_gib(2_048_000), "2,000.00G");
    }
}
