//! Определение набора магазинов для запроса продаж

use super::query_guard::QueryGuard;
use super::resource::Loadable;
use super::state::FilterState;
use contracts::dashboards::d410_store_sales::{SalesResponse, Store};
use std::collections::BTreeSet;
use std::future::Future;

/// Магазины, по которым нужно запросить продажи
///
/// - есть явный выбор: он возвращается как есть
/// - выбор пуст: все загруженные магазины
/// - список магазинов ещё не загружен: пустой список
pub fn resolve_store_scope(selected: &BTreeSet<i64>, stores: Option<&[Store]>) -> Vec<i64> {
    if !selected.is_empty() {
        return selected.iter().copied().collect();
    }
    stores
        .map(|stores| stores.iter().map(|s| s.id).collect())
        .unwrap_or_default()
}

/// Ключ запроса продаж: (магазины, начало, конец)
///
/// Магазины хранятся отсортированными и без повторов, так что один и тот же
/// набор всегда даёт один и тот же ключ.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SalesQueryKey {
    pub store_ids: Vec<i64>,
    pub start_date: String,
    pub end_date: String,
}

impl SalesQueryKey {
    pub fn new(filter: &FilterState, stores: Option<&[Store]>) -> Self {
        let mut store_ids = resolve_store_scope(&filter.selected_store_ids, stores);
        store_ids.sort_unstable();
        store_ids.dedup();
        Self {
            store_ids,
            start_date: filter.start_date.clone(),
            end_date: filter.end_date.clone(),
        }
    }

    pub fn is_empty_scope(&self) -> bool {
        self.store_ids.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SalesFetchPlan {
    /// Ответ известен без обращения к API
    Resolved(SalesResponse),
    /// Нужен сетевой запрос
    Fetch(SalesQueryKey),
}

pub fn plan_sales_fetch(key: &SalesQueryKey) -> SalesFetchPlan {
    if key.is_empty_scope() {
        SalesFetchPlan::Resolved(SalesResponse::empty())
    } else {
        SalesFetchPlan::Fetch(key.clone())
    }
}

/// Загрузить продажи по ключу; пустой набор магазинов до `fetch` не доходит
pub async fn load_sales<F, Fut>(key: &SalesQueryKey, fetch: F) -> Result<SalesResponse, String>
where
    F: FnOnce(Vec<i64>, String, String) -> Fut,
    Fut: Future<Output = Result<SalesResponse, String>>,
{
    match plan_sales_fetch(key) {
        SalesFetchPlan::Resolved(response) => Ok(response),
        SalesFetchPlan::Fetch(key) => fetch(key.store_ids, key.start_date, key.end_date).await,
    }
}

/// Записать ответ по `key` в `target`, если `key` всё ещё текущий
///
/// Возвращает `false` для ответа на вытесненный запрос: такой ответ не
/// меняет `target`.
pub fn apply_sales_result(
    guard: &QueryGuard<SalesQueryKey>,
    key: &SalesQueryKey,
    result: Result<SalesResponse, String>,
    target: &mut Loadable<SalesResponse>,
) -> bool {
    if !guard.is_current(key) {
        return false;
    }
    match result {
        Ok(response) => target.resolve(response),
        Err(e) => {
            log::error!("Failed to load D410 sales: {}", e);
            target.fail(e);
        }
    }
    true
}
