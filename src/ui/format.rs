//! Text shown inside the bubbles.

const SI_PREFIXES: [&str; 5] = ["", "k", "M", "B", "T"];

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole dollars with separators; sub-dollar prices keep four decimals.
pub fn format_price(price: f64) -> String {
    if !price.is_finite() || price <= 0.0 {
        return "$0".to_string();
    }
    if price < 1.0 {
        return format!("${price:.4}");
    }
    format!("${}", group_thousands(price.round() as u64))
}

pub fn format_change(change: Option<f64>) -> String {
    match change.filter(|c| c.is_finite()) {
        Some(c) => format!("{c:.1}%"),
        None => "n/a".to_string(),
    }
}

/// Two significant digits and an SI suffix, billions written as `B`.
pub fn format_market_cap(value: f64) -> String {
    if !value.is_finite() || value <= 0.0 {
        return "0.0".to_string();
    }
    let exponent = value.log10().floor() as i32;
    let unit = 10f64.powi(exponent - 1);
    let rounded = (value / unit).round() * unit;
    // Rounding may carry into the next power of ten (99.6 -> 100).
    let exponent = rounded.log10().floor() as i32;

    let tier = exponent.div_euclid(3).clamp(0, SI_PREFIXES.len() as i32 - 1);
    let coefficient = rounded / 10f64.powi(tier * 3);
    let decimals = (1 - (exponent - tier * 3)).max(0) as usize;
    format!("{:.*}{}", decimals, coefficient, SI_PREFIXES[tier as usize])
}
