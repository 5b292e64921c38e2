use super::domain::Pesos;

/// Formats an amount the way `es-CL` renders CLP: `$` prefix, `.` grouping, no decimals.
pub fn format_clp(amount: Pesos) -> String {
    format!("${}", group_thousands(amount))
}

/// Property values may carry fractions; they are shown rounded like any other amount.
pub fn format_clp_value(value: f64) -> String {
    format_clp(super::domain::round_pesos(value))
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

fn group_thousands(amount: Pesos) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_dots() {
        assert_eq!(format_clp(0), "$0");
        assert_eq!(format_clp(999), "$999");
        assert_eq!(format_clp(1_000), "$1.000");
        assert_eq!(format_clp(221_500), "$221.500");
        assert_eq!(format_clp(100_000_000), "$100.000.000");
    }

    #[test]
    fn rounds_fractional_values() {
        assert_eq!(format_clp_value(300_000.4), "$300.000");
        assert_eq!(format_clp_value(-5.0), "$0");
    }

    #[test]
    fn percent_uses_two_decimals() {
        assert_eq!(format_percent(0.3), "0.30%");
        assert_eq!(format_percent(0.2215), "0.22%");
    }
}
