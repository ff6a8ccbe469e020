//! Значение карточки сводного показателя

pub const LOADING_PLACEHOLDER: &str = "…";
pub const NO_DATA_LABEL: &str = "Нет данных";

/// Значение карточки
#[derive(Debug, Clone, PartialEq)]
pub enum CardValue<T> {
    /// Источник ещё загружается
    Loading,
    Value(T),
    /// Источник завершился ошибкой и данных нет
    NoData,
}

impl<T> CardValue<T> {
    /// Пока источник загружается - `Loading`, без данных - `NoData`
    pub fn from_source<S>(is_loading: bool, data: Option<&S>, map: impl FnOnce(&S) -> T) -> Self {
        match (is_loading, data) {
            (true, _) => CardValue::Loading,
            (false, Some(data)) => CardValue::Value(map(data)),
            (false, None) => CardValue::NoData,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            CardValue::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CardValue<U> {
        match self {
            CardValue::Loading => CardValue::Loading,
            CardValue::Value(v) => CardValue::Value(f(v)),
            CardValue::NoData => CardValue::NoData,
        }
    }
}

impl CardValue<String> {
    /// Текст для вывода в карточке
    pub fn display(&self) -> String {
        match self {
            CardValue::Loading => LOADING_PLACEHOLDER.to_string(),
            CardValue::Value(v) => v.clone(),
            CardValue::NoData => NO_DATA_LABEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_source() {
        let loading: CardValue<i32> = CardValue::from_source(true, Some(&1), |v| *v);
        assert_eq!(loading, CardValue::Loading);
        assert_eq!(CardValue::from_source(false, Some(&1), |v| *v + 1), CardValue::Value(2));
        assert_eq!(CardValue::from_source(false, None::<&i32>, |v| *v), CardValue::NoData);
    }

    #[test]
    fn test_display() {
        assert_eq!(CardValue::<String>::Loading.display(), "…");
        assert_eq!(CardValue::<String>::NoData.display(), "Нет данных");
        assert_eq!(CardValue::Value(5).map(|v| v.to_string()).display(), "5");
    }
}
