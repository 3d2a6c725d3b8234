use chrono::{Datelike, NaiveDate};

/// Whole amounts without decimals, otherwise two places: `$1250`, `$99.50`
pub fn format_price(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("${:.0}", amount)
    } else {
        format!("${:.2}", amount)
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Long date, e.g. "July 14th, 2025"
pub fn format_long_date(date: NaiveDate) -> String {
    format!("{} {}{}, {}", date.format("%B"), date.day(), ordinal_suffix(date.day()), date.year())
}

/// Short stay label, e.g. "Jul 14 - Jul 16, 2025"
pub fn format_stay(from: NaiveDate, to: NaiveDate) -> String {
    format!("{} - {}", from.format("%b %-d"), to.format("%b %-d, %Y"))
}

pub fn pluralize(count: i64, singular: &str, plural: &str) -> String {
    format!("{} {}", count, if count == 1 { singular } else { plural })
}

/// Five-star bar rounded to the nearest whole star
pub fn rating_stars(rating: f64) -> String {
    let full = rating.clamp(0.0, 5.0).round() as usize;
    format!("{}{}", "★".repeat(full), "☆".repeat(5 - full))
}

/// Truncate text to max length with ellipsis
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        text.chars().take(max_len).collect::<String>() + "..."
    }
}

pub fn map_url(lat: f64, lng: f64) -> String {
    format!("https://www.openstreetmap.org/?mlat={lat}&mlon={lng}#map=14/{lat}/{lng}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(1250.0), "$1250");
        assert_eq!(format_price(99.5), "$99.50");
    }

    #[test]
    fn test_long_date_ordinals() {
        let d = |day| NaiveDate::from_ymd_opt(2025, 7, day).unwrap();
        assert_eq!(format_long_date(d(1)), "July 1st, 2025");
        assert_eq!(format_long_date(d(2)), "July 2nd, 2025");
        assert_eq!(format_long_date(d(13)), "July 13th, 2025");
        assert_eq!(format_long_date(d(23)), "July 23rd, 2025");
        assert_eq!(format_stay(d(14), d(16)), "Jul 14 - Jul 16, 2025");
    }

    #[test]
    fn test_rating_stars_and_truncate() {
        assert_eq!(rating_stars(3.6), "★★★★☆");
        assert_eq!(rating_stars(9.0), "★★★★★");
        assert_eq!(truncate_text("Fjord cabin", 5), "Fjord...");
        assert_eq!(pluralize(1, "night", "nights"), "1 night");
        assert_eq!(pluralize(3, "night", "nights"), "3 nights");
    }
}
