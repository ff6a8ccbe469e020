//! Сводное состояние дашборда по трём независимым ресурсам
//!
//! Каждая карточка зависит только от своего источника: ошибка продаж не
//! мешает показать состояние API и число магазинов.

use super::aggregation::{records_of, sort_by_store_name, SalesTotals};
use super::resource::Loadable;
use crate::shared::components::table::{format_count, format_money, format_weight};
use crate::shared::date_utils::format_date;
use contracts::dashboards::d410_store_sales::{HealthResponse, SalesResponse, Store};

pub use crate::shared::components::card_value::CardValue;

pub const ERROR_ADVISORY: &str =
    "Обнаружены ошибки загрузки данных. Проверьте соединение с backend и Proxy API.";

/// Карточка по состоянию ресурса
fn card<S, T>(resource: &Loadable<S>, map: impl FnOnce(&S) -> T) -> CardValue<T> {
    CardValue::from_source(resource.is_pending(), resource.data(), map)
}

#[derive(Debug, Clone, PartialEq)]
pub struct HealthSummary {
    pub status: String,
    pub environment: String,
    pub database_connected: bool,
}

impl HealthSummary {
    /// Подпись под статусом API
    pub fn caption(&self) -> String {
        format!(
            "{} · БД доступна: {}",
            self.environment,
            if self.database_connected { "да" } else { "нет" }
        )
    }
}

impl From<&HealthResponse> for HealthSummary {
    fn from(h: &HealthResponse) -> Self {
        Self {
            status: h.status.clone(),
            environment: h.environment.clone(),
            database_connected: h.proxy_api.database_connected,
        }
    }
}

/// Решение о том, что показывать на дашборде
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub is_loading: bool,
    pub has_error: bool,
    pub health: CardValue<HealthSummary>,
    pub store_count: CardValue<String>,
    pub total_cash: CardValue<String>,
    pub total_cups: CardValue<String>,
    /// Итоги без форматирования, 0 если продаж нет
    pub totals: SalesTotals,
}

impl DashboardView {
    pub fn compose(
        health: &Loadable<HealthResponse>,
        stores: &Loadable<Vec<Store>>,
        sales: &Loadable<SalesResponse>,
    ) -> Self {
        let totals = SalesTotals::from_response(sales.data());
        Self {
            is_loading: health.is_pending() || stores.is_pending() || sales.is_pending(),
            has_error: health.is_failed() || stores.is_failed() || sales.is_failed(),
            health: card(health, |h| HealthSummary::from(h)),
            store_count: card(stores, |s| format_count(s.len() as f64)),
            total_cash: card(sales, |_| format_money(totals.total_cash)),
            total_cups: card(sales, |_| format_count(totals.total_cups)),
            totals,
        }
    }
}

/// Строка таблицы в готовом к выводу виде
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRow {
    pub store_name: String,
    pub order_date: String,
    pub cups: String,
    pub packages_kg: String,
    pub total_cash: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TotalsRow {
    pub cups: String,
    pub packages_kg: String,
    pub total_cash: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableState {
    Loading,
    Empty,
    Rows {
        rows: Vec<SalesRow>,
        totals: TotalsRow,
    },
}

impl TableState {
    /// Таблица зависит только от продаж
    pub fn from_sales(sales: &Loadable<SalesResponse>) -> Self {
        if sales.is_pending() {
            return TableState::Loading;
        }
        let records = records_of(sales.data());
        if records.is_empty() {
            return TableState::Empty;
        }

        let totals = SalesTotals::from_records(records);
        let rows = sort_by_store_name(records)
            .into_iter()
            .map(|r| SalesRow {
                order_date: format_date(&r.order_date),
                cups: format_count(r.allcup),
                packages_kg: format_weight(r.packages_kg),
                total_cash: format_money(r.total_cash),
                store_name: r.store_name,
            })
            .collect();

        TableState::Rows {
            rows,
            totals: TotalsRow {
                cups: format_count(totals.total_cups),
                packages_kg: format_weight(totals.total_packages_kg),
                total_cash: format_money(totals.total_cash),
            },
        }
    }
}
