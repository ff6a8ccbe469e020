use crate::shared::collation::collation_key;
use contracts::dashboards::d410_store_sales::{SalesRecord, SalesResponse};

/// Записи продаж из ответа; отсутствующий ответ - то же, что пустой
pub fn records_of(response: Option<&SalesResponse>) -> &[SalesRecord] {
    response.map(|r| r.items.as_slice()).unwrap_or(&[])
}

/// Копия записей, упорядоченная по названию магазина (ru-RU)
///
/// Сортировка устойчивая: записи одного магазина сохраняют исходный порядок.
/// Входной срез не меняется.
pub fn sort_by_store_name(records: &[SalesRecord]) -> Vec<SalesRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by_cached_key(|r| collation_key(&r.store_name));
    sorted
}

/// Итоги по набору записей
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SalesTotals {
    pub total_cash: f64,
    pub total_cups: f64,
    pub total_packages_kg: f64,
}

impl SalesTotals {
    pub fn from_records(records: &[SalesRecord]) -> Self {
        records.iter().fold(Self::default(), |acc, r| Self {
            total_cash: acc.total_cash + r.total_cash,
            total_cups: acc.total_cups + r.allcup,
            total_packages_kg: acc.total_packages_kg + r.packages_kg,
        })
    }

    pub fn from_response(response: Option<&SalesResponse>) -> Self {
        Self::from_records(records_of(response))
    }
}
