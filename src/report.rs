use chrono::NaiveDate;
use crate::rain::{format_mm, DailyRain, REPORT_DAYS};

/// Outcome of one run
#[derive(Debug, Clone, PartialEq)]
pub struct RainReport {
    pub today: NaiveDate,
    pub total: f64,
    pub daily: Vec<DailyRain>,
    pub message: String,
}

/// Composes the notification text for the rain seen over the report period
///
/// # Arguments
///
/// * 'today' - the reference date
/// * 'total' - rain in mm over the report period
pub fn compose_message(today: NaiveDate, total: f64) -> String {
    let pretty_today = today.format("%b %d, %Y");

    if total > 0.0 {
        format!("Good morning! Here is your rain report for {}: {}mm of rain over the past {} days.",
                pretty_today, format_mm(total), REPORT_DAYS)
    } else {
        format!("Good morning! Today is {} and there was no rain over the past {} days.",
                pretty_today, REPORT_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rain_variant() {
        let today = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        assert_eq!(
            compose_message(today, 3.5),
            "Good morning! Here is your rain report for Jul 04, 2024: 3.5mm of rain over the past 4 days."
        );
    }

    #[test]
    fn whole_millimeters_keep_a_decimal() {
        let today = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        assert_eq!(
            compose_message(today, 4.0),
            "Good morning! Here is your rain report for Jul 04, 2024: 4.0mm of rain over the past 4 days."
        );
    }

    #[test]
    fn no_rain_variant() {
        let today = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        assert_eq!(
            compose_message(today, 0.0),
            "Good morning! Today is Jul 04, 2024 and there was no rain over the past 4 days."
        );
    }
}
