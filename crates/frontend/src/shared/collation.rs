//! Сравнение строк в порядке, принятом для ru-RU
//!
//! Повторяет поведение `Intl.Collator("ru")` в объёме, нужном для названий
//! магазинов:
//! - регистр не влияет на основной порядок, при равенстве строчные идут раньше
//! - кириллица раньше латиницы, латиница раньше прочих алфавитов
//! - `ё` на основном уровне равна `е` и отличается от неё только на втором уровне
//! - пробелы и пунктуация раньше цифр, цифры раньше букв

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Separator,
    Digit,
    Cyrillic,
    Latin,
    Other,
}

/// Ключ сортировки: сравнение ключей даёт тот же порядок, что и [`compare_ru`]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: Vec<(CharClass, u32)>,
    secondary: Vec<u8>,
    tertiary: Vec<u8>,
    identical: String,
}

pub fn collation_key(s: &str) -> CollationKey {
    let mut primary = Vec::with_capacity(s.len());
    let mut secondary = Vec::with_capacity(s.len());
    let mut tertiary = Vec::with_capacity(s.len());

    for ch in s.chars() {
        let is_upper = ch.is_uppercase();
        for lower in ch.to_lowercase() {
            let (class, weight, accent) = classify(lower);
            primary.push((class, weight));
            secondary.push(accent);
            tertiary.push(u8::from(is_upper));
        }
    }

    CollationKey {
        primary,
        secondary,
        tertiary,
        identical: s.to_string(),
    }
}

/// Сравнить две строки по правилам ru-RU
pub fn compare_ru(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(&collation_key(b))
}

fn classify(ch: char) -> (CharClass, u32, u8) {
    match ch {
        'ё' => (CharClass::Cyrillic, weight_of('е'), 1),
        'а'..='я' => (CharClass::Cyrillic, weight_of(ch), 0),
        '\u{0400}'..='\u{04FF}' => (CharClass::Cyrillic, 0x100 + ch as u32, 0),
        'a'..='z' => (CharClass::Latin, ch as u32 - 'a' as u32, 0),
        '0'..='9' => (CharClass::Digit, ch as u32 - '0' as u32, 0),
        c if c.is_whitespace() || c.is_ascii_punctuation() => (CharClass::Separator, c as u32, 0),
        c if c.is_alphabetic() && c.is_ascii() => (CharClass::Latin, c as u32, 0),
        c if c.is_alphabetic() && (c as u32) < 0x0250 => (CharClass::Latin, 0x100 + c as u32, 0),
        c => (CharClass::Other, c as u32, 0),
    }
}

fn weight_of(ch: char) -> u32 {
    ch as u32 - 'а' as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(items: &[&str]) -> Vec<String> {
        let mut v: Vec<String> = items.iter().map(|s| s.to_string()).collect();
        v.sort_by(|a, b| compare_ru(a, b));
        v
    }

    #[test]
    fn test_cyrillic_alphabet_order() {
        assert_eq!(sorted(&["Ярко", "Арбат", "Маяк"]), vec!["Арбат", "Маяк", "Ярко"]);
    }

    #[test]
    fn test_yo_sorts_with_ye() {
        // "ё" не уезжает в конец алфавита, как при сравнении по кодам
        assert_eq!(sorted(&["Жук", "Есть", "Ёлка"]), vec!["Ёлка", "Есть", "Жук"]);
        assert_eq!(compare_ru("ель", "ёль"), Ordering::Less);
    }

    #[test]
    fn test_case_is_secondary_to_letters() {
        assert_eq!(sorted(&["b", "A", "a"]), vec!["a", "A", "b"]);
        assert_eq!(compare_ru("магазин", "Магазин"), Ordering::Less);
    }

    #[test]
    fn test_cyrillic_before_latin() {
        assert_eq!(sorted(&["Zoo", "Апрель", "Banana"]), vec!["Апрель", "Banana", "Zoo"]);
    }

    #[test]
    fn test_digits_and_separators_before_letters() {
        assert_eq!(sorted(&["Кафе", "2 Кафе", " Кафе"]), vec![" Кафе", "2 Кафе", "Кафе"]);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(compare_ru("Кофе", "Кофейня"), Ordering::Less);
    }

    #[test]
    fn test_identical_strings_are_equal() {
        assert_eq!(compare_ru("Руставели 12", "Руставели 12"), Ordering::Equal);
    }
}
