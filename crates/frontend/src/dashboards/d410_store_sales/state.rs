use crate::shared::date_utils::trailing_period;
use chrono::{Local, NaiveDate};
use leptos::prelude::*;
use std::collections::BTreeSet;

/// Фильтры дашборда: период и выбранные магазины
///
/// Пустой `selected_store_ids` означает "все магазины", а не "ни одного".
/// Меняется только через методы ниже, которые вызывают обработчики UI.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterState {
    /// yyyy-mm-dd
    pub start_date: String,
    /// yyyy-mm-dd
    pub end_date: String,
    pub selected_store_ids: BTreeSet<i64>,
}

impl FilterState {
    pub fn new(today: NaiveDate) -> Self {
        let (start_date, end_date) = trailing_period(today);
        Self {
            start_date,
            end_date,
            selected_store_ids: BTreeSet::new(),
        }
    }

    /// Пустое значение (очищенное поле даты) оставляет прежнюю дату
    pub fn set_start_date(&mut self, value: String) {
        if !value.trim().is_empty() {
            self.start_date = value;
        }
    }

    pub fn set_end_date(&mut self, value: String) {
        if !value.trim().is_empty() {
            self.end_date = value;
        }
    }

    pub fn set_period(&mut self, start_date: String, end_date: String) {
        self.set_start_date(start_date);
        self.set_end_date(end_date);
    }

    /// Включить магазин в выборку или исключить из неё
    pub fn toggle_store(&mut self, store_id: i64) {
        if !self.selected_store_ids.remove(&store_id) {
            self.selected_store_ids.insert(store_id);
        }
    }

    /// Магазин участвует в выборке: явно выбран или выбор пуст
    pub fn is_store_active(&self, store_id: i64) -> bool {
        self.selected_store_ids.is_empty() || self.selected_store_ids.contains(&store_id)
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

// Состояние создаётся в области видимости компонента, а не thread-local:
// оно освобождается вместе с компонентом
pub fn create_state() -> RwSignal<FilterState> {
    RwSignal::new(FilterState::default())
}
