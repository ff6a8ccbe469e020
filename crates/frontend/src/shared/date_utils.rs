/// Утилиты форматирования дат
///
/// Даты периода хранятся как ISO-строки (`YYYY-MM-DD`), в таблице показываются
/// в коротком формате ru-RU. Дата записи трактуется как календарная дата UTC:
/// время и смещение зоны отбрасываются, сдвига на часовой пояс зрителя нет.
use chrono::{Duration, NaiveDate};

/// Длина периода по умолчанию, дней
pub const DEFAULT_PERIOD_DAYS: i64 = 30;

const ISO_DATE: &str = "%Y-%m-%d";

/// Календарная дата из "2024-03-15", "2024-03-15T14:02:26" или
/// "2024-03-15T14:02:26+04:00"
pub fn parse_date(date_str: &str) -> Option<NaiveDate> {
    let date_part = date_str.trim().get(..10)?;
    NaiveDate::parse_from_str(date_part, ISO_DATE).ok()
}

/// ISO дата в формат DD.MM.YYYY
/// Пример: "2024-03-15" или "2024-03-15T14:02:26Z" -> "15.03.2024"
pub fn format_date(date_str: &str) -> String {
    match parse_date(date_str) {
        Some(date) => date.format("%d.%m.%Y").to_string(),
        None => date_str.to_string(),
    }
}

pub fn to_iso(date: NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}

/// Период по умолчанию: последние 30 дней, включая `today`
pub fn trailing_period(today: NaiveDate) -> (String, String) {
    let start = today - Duration::days(DEFAULT_PERIOD_DAYS);
    (to_iso(start), to_iso(today))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15.03.2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15.03.2024");
        assert_eq!(format_date("2024-01-01T00:00:00"), "01.01.2024");
    }

    #[test]
    fn test_offset_does_not_shift_the_day() {
        assert_eq!(format_date("2024-03-15T23:30:00-05:00"), "15.03.2024");
        assert_eq!(format_date("2024-03-15T00:10:00+04:00"), "15.03.2024");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_date("invalid"), "invalid");
        assert_eq!(format_date("2024-13-45"), "2024-13-45");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn test_trailing_period() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(
            trailing_period(today),
            ("2024-01-31".to_string(), "2024-03-01".to_string())
        );
    }
}
