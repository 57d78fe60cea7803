/// Форматирование дат для таблиц и полей формы
use chrono::{NaiveDate, NaiveDateTime};

const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Форматирует дату в формат DD.MM.YYYY
/// Пример: 2024-03-15 -> "15.03.2024"
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Форматирует дату и время в формат DD.MM.YYYY HH:MM
/// Пример: 2024-03-15 14:02:26 -> "15.03.2024 14:02"
pub fn format_datetime(datetime: &NaiveDateTime) -> String {
    datetime.format("%d.%m.%Y %H:%M").to_string()
}

/// Значение для `<input type="date">`
pub fn to_input_date(date: &NaiveDate) -> String {
    date.format(INPUT_DATE_FORMAT).to_string()
}

/// Разбор значения `<input type="date">`; пустое или некорректное значение даёт `None`
pub fn parse_input_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), INPUT_DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(14, 2, 26)
            .unwrap();
        assert_eq!(format_datetime(&dt), "15.03.2024 14:02");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2023, 1, 5).unwrap();
        assert_eq!(format_date(&date), "05.01.2023");
        assert_eq!(to_input_date(&date), "2023-01-05");
    }

    #[test]
    fn test_parse_input_date() {
        assert_eq!(
            parse_input_date(" 2024-08-13 "),
            NaiveDate::from_ymd_opt(2024, 8, 13)
        );
        assert_eq!(parse_input_date(""), None);
        assert_eq!(parse_input_date("13.08.2024"), None);
    }
}
