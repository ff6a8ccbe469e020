//! Утилиты форматирования чисел в стиле ru-RU
//!
//! Разделитель тысяч - неразрывный пробел, десятичный разделитель - запятая.
//! Количество знаков после запятой - это максимум: хвостовые нули отбрасываются,
//! как у `toLocaleString("ru-RU", { maximumFractionDigits })`.

/// Разделитель групп разрядов (U+00A0)
pub const GROUP_SEPARATOR: char = '\u{00a0}';

/// Десятичный разделитель
pub const DECIMAL_SEPARATOR: char = ',';

/// Форматирует число с разделителем тысяч и не более чем `max_fraction_digits`
/// знаками после запятой
///
/// # Примеры
///
/// ```
/// use frontend::shared::components::table::format_number_ru;
/// assert_eq!(format_number_ru(1234.5, 2), "1\u{a0}234,5");
/// ```
pub fn format_number_ru(value: f64, max_fraction_digits: u8) -> String {
    if value.is_nan() {
        return "—".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-∞" } else { "∞" }.to_string();
    }

    let rounded = format!("{:.*}", max_fraction_digits as usize, value.abs());
    let (integer_part, fraction_part) = match rounded.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (rounded.as_str(), ""),
    };

    let mut result = String::new();
    let is_zero = integer_part.chars().all(|c| c == '0') && fraction_part.is_empty();
    if value < 0.0 && !is_zero {
        result.push('-');
    }
    result.push_str(&group_thousands(integer_part));
    if !fraction_part.is_empty() {
        result.push(DECIMAL_SEPARATOR);
        result.push_str(fraction_part);
    }
    result
}

/// Денежное значение: до 2 знаков после запятой
pub fn format_money(value: f64) -> String {
    format_number_ru(value, 2)
}

/// Вес в килограммах: до 2 знаков после запятой
pub fn format_weight(value: f64) -> String {
    format_number_ru(value, 2)
}

/// Количество: без дробной части
pub fn format_count(value: f64) -> String {
    format_number_ru(value, 0)
}

fn group_thousands(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3 * 2);
    let len = digits.chars().count();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(GROUP_SEPARATOR);
        }
        result.push(ch);
    }
    result
}
