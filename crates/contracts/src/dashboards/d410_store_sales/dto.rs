use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Магазин (группа складов STORGRP)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: i64,
    pub name: String,
}

/// Продажи одного магазина за один день
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub store_name: String,
    /// ISO дата или дата-время, например "2024-01-15" or "2024-01-15T00:00:00"
    pub order_date: String,
    /// Количество чашек
    pub allcup: f64,
    /// Пачки кофе, кг
    pub packages_kg: f64,
    /// Выручка, ₾
    pub total_cash: f64,
}

/// Ответ на запрос продаж
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesResponse {
    pub items: Vec<SalesRecord>,
    /// Только для информации, не обязан совпадать с `items.len()`
    pub count: i64,
}

impl SalesResponse {
    /// Пустой ответ, когда запрашивать нечего
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            count: 0,
        }
    }

    pub fn from_items(items: Vec<SalesRecord>) -> Self {
        let count = items.len() as i64;
        Self { items, count }
    }
}

/// Состояние Proxy API, как его вернул апстрим
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProxyHealth {
    #[serde(default)]
    pub database_connected: bool,
    /// Остальные поля апстрима передаются как есть
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Ответ проверки состояния
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub environment: String,
    pub proxy_api: ProxyHealth,
}
