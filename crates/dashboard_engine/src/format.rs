use chrono::NaiveDate;

pub const CURRENCY_SYMBOL: &str = "₹";

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Groups the integer part by thousands: `1234567` -> `1,234,567`.
fn group_thousands(mut n: u64) -> String {
    let mut groups: Vec<String> = Vec::new();
    loop {
        if n < 1000 {
            groups.push(n.to_string());
            break;
        }
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    groups.reverse();
    groups.join(",")
}

/// Formats a rupee amount: `₹1,000,000`, `₹1,234.5`, `-₹20`.
/// Rounded to paise; trailing zero decimals are dropped.
pub fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 && round2(value) != 0.0 { "-" } else { "" };
    let paise = (value.abs() * 100.0).round() as u64;
    let whole = group_thousands(paise / 100);
    let fraction = paise % 100;

    if fraction == 0 {
        format!("{sign}{CURRENCY_SYMBOL}{whole}")
    } else {
        let decimals = format!("{fraction:02}");
        let decimals = decimals.trim_end_matches('0');
        format!("{sign}{CURRENCY_SYMBOL}{whole}.{decimals}")
    }
}

/// `M/D/YYYY`, the way the claims table and repayment panel show dates.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

pub fn format_percent(value: f64) -> String {
    format!("{}%", round2(value))
}
