fn group_thousands(int_part: &str) -> String {
    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    with_commas.chars().rev().collect()
}

/// Format a float as a euro amount with thousands separators: 1,234.56 €
pub fn money(val: f64) -> String {
    let sign = if val < 0.0 { "-" } else { "" };
    let cents = format!("{:.2}", val.abs());
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));
    format!("{sign}{}.{dec_part} €", group_thousands(int_part))
}

/// Whole quantities print without decimals; fractional ones keep two.
pub fn quantity(val: f64) -> String {
    let sign = if val < 0.0 { "-" } else { "" };
    let abs = val.abs();
    if abs.fract() == 0.0 {
        format!("{sign}{}", group_thousands(&format!("{abs:.0}")))
    } else {
        let fixed = format!("{abs:.2}");
        let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        format!("{sign}{}.{dec_part}", group_thousands(int_part))
    }
}

pub fn ratio(val: Option<f64>) -> String {
    val.map_or_else(|| "n/a".to_string(), |v| format!("{v:.4}"))
}
