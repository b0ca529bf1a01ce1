// --- Track geometry ---

pub fn percent_of(value: i64, min: i64, max: i64) -> f64 {
    (value - min) as f64 / (max - min) as f64 * 100.0
}

pub fn value_at_percent(percent: f64, min: i64, max: i64) -> i64 {
    let percent = percent.clamp(0.0, 100.0);
    min + ((max - min) as f64 * percent / 100.0).round() as i64
}

pub fn column_of(percent: f64, width: u16) -> u16 {
    if width <= 1 {
        return 0;
    }
    let last = f64::from(width - 1);
    (percent.clamp(0.0, 100.0) / 100.0 * last).round() as u16
}

pub fn percent_at_column(column: u16, width: u16) -> f64 {
    if width <= 1 {
        return 0.0;
    }
    let last = f64::from(width - 1);
    f64::from(column.min(width - 1)) / last * 100.0
}

// --- Formatting ---

pub fn salary_label(low: i64, high: i64, currency: &str) -> String {
    format!("{currency}{low}k - {currency}{high}k")
}

pub fn format_inr(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let sign = if amount < 0 { "-" } else { "" };
    if digits.len() <= 3 {
        return format!("{sign}₹{digits}");
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{sign}₹{},{}", groups.join(","), tail)
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
