use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use contracts::dashboards::d410_store_sales::{HealthResponse, SalesRecord, SalesResponse, Store};
use serde_json::Value;
use std::collections::HashMap;

use super::repository;
use crate::shared::proxy_api::{ProxyApi, ProxyApiError, Row};

const ISO_DATETIME: &str = "%Y-%m-%dT%H:%M:%S";

/// Состояние backend вместе с ответом Proxy API
pub async fn health(
    api: &dyn ProxyApi,
    environment: &str,
) -> Result<HealthResponse, ProxyApiError> {
    let proxy_api = api.health().await?;
    Ok(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        environment: environment.to_string(),
        proxy_api,
    })
}

pub async fn list_stores(api: &dyn ProxyApi) -> Result<Vec<Store>, ProxyApiError> {
    repository::fetch_stores(api).await
}

/// Продажи по магазинам и дням: чашки и выручка плюс килограммы пачек кофе
pub async fn get_sales(
    api: &dyn ProxyApi,
    store_ids: &[i64],
    start_date: &str,
    end_date: &str,
) -> Result<SalesResponse, ProxyApiError> {
    let cups = repository::fetch_cups(api, store_ids, start_date, end_date).await?;
    let packages = repository::fetch_packages(api, store_ids, start_date, end_date).await?;
    tracing::debug!(
        "D410 sales: {} cup rows, {} package rows for {} stores",
        cups.len(),
        packages.len(),
        store_ids.len()
    );
    Ok(SalesResponse::from_items(merge_sales(&cups, &packages)?))
}

/// Объединение двух выборок по (магазин, дата)
///
/// Строки чашек создают записи с нулевыми пачками, строки пачек дополняют их
/// или создают запись без чашек. Порядок - первое появление ключа.
pub fn merge_sales(cups: &[Row], packages: &[Row]) -> Result<Vec<SalesRecord>, ProxyApiError> {
    let mut records: Vec<SalesRecord> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for row in cups {
        let record = SalesRecord {
            store_name: text_field(row, "STORE_NAME"),
            order_date: normalize_order_date(row)?,
            allcup: number_field(row, "ALLCUP")?,
            packages_kg: 0.0,
            total_cash: number_field(row, "TOTAL_CASH")?,
        };
        let key = (record.store_name.clone(), record.order_date.clone());
        match index.get(&key) {
            Some(&i) => records[i] = record,
            None => {
                index.insert(key, records.len());
                records.push(record);
            }
        }
    }

    for row in packages {
        let store_name = text_field(row, "STORE_NAME");
        let order_date = normalize_order_date(row)?;
        let packages_kg = number_field(row, "PACKAGES_KG")?;
        let key = (store_name, order_date);
        match index.get(&key) {
            Some(&i) => records[i].packages_kg = packages_kg,
            None => {
                let (store_name, order_date) = key.clone();
                index.insert(key, records.len());
                records.push(SalesRecord {
                    store_name,
                    order_date,
                    allcup: 0.0,
                    packages_kg,
                    total_cash: 0.0,
                });
            }
        }
    }

    Ok(records)
}

fn malformed(row: &Row, reason: &str) -> ProxyApiError {
    ProxyApiError::MalformedRow(format!("{}: {}", reason, Value::Object(row.clone())))
}

fn text_field(row: &Row, key: &str) -> String {
    match row.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// null и отсутствующее поле - 0; строки с числом допускаются
fn number_field(row: &Row, key: &str) -> Result<f64, ProxyApiError> {
    match row.get(key) {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| malformed(row, &format!("{} is out of range", key))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(0.0),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map_err(|_| malformed(row, &format!("{} is not a number", key))),
        Some(_) => Err(malformed(row, &format!("{} is not a number", key))),
    }
}

/// ORDER_DATE в виде `YYYY-MM-DDTHH:MM:SS`
fn normalize_order_date(row: &Row) -> Result<String, ProxyApiError> {
    let raw = match row.get("ORDER_DATE") {
        Some(Value::String(s)) => s.trim(),
        _ => return Err(malformed(row, "ORDER_DATE is missing")),
    };
    parse_order_date(raw)
        .map(|dt| dt.format(ISO_DATETIME).to_string())
        .ok_or_else(|| malformed(row, "ORDER_DATE is not a date"))
}

fn parse_order_date(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(value: Value) -> Vec<Row> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => map,
                    _ => panic!("row must be an object"),
                })
                .collect(),
            _ => panic!("rows must be an array"),
        }
    }

    #[test]
    fn test_merge_cups_and_packages() {
        let cups = rows(json!([
            { "STORE_NAME": "Ваке", "ORDER_DATE": "2024-01-05", "ALLCUP": 40, "TOTAL_CASH": 320.5 },
            { "STORE_NAME": "Сабуртало", "ORDER_DATE": "2024-01-05", "ALLCUP": 12, "TOTAL_CASH": 96 }
        ]));
        let packages = rows(json!([
            { "STORE_NAME": "Сабуртало", "ORDER_DATE": "2024-01-05T00:00:00", "PACKAGES_KG": 1.25 },
            { "STORE_NAME": "Авлабари", "ORDER_DATE": "2024-01-06", "PACKAGES_KG": "0.5" }
        ]));

        let merged = merge_sales(&cups, &packages).unwrap();
        assert_eq!(merged.len(), 3);

        assert_eq!(merged[0].store_name, "Ваке");
        assert_eq!(merged[0].order_date, "2024-01-05T00:00:00");
        assert_eq!(merged[0].allcup, 40.0);
        assert_eq!(merged[0].packages_kg, 0.0);

        assert_eq!(merged[1].store_name, "Сабуртало");
        assert_eq!(merged[1].packages_kg, 1.25);
        assert_eq!(merged[1].total_cash, 96.0);

        assert_eq!(merged[2].store_name, "Авлабари");
        assert_eq!(merged[2].allcup, 0.0);
        assert_eq!(merged[2].total_cash, 0.0);
        assert_eq!(merged[2].packages_kg, 0.5);
    }

    #[test]
    fn test_numeric_tolerance() {
        let cups = rows(json!([
            { "STORE_NAME": "A", "ORDER_DATE": "2024-01-05", "ALLCUP": null, "TOTAL_CASH": " 12.5 " },
            { "STORE_NAME": "B", "ORDER_DATE": "2024-01-05" }
        ]));
        let merged = merge_sales(&cups, &[]).unwrap();
        assert_eq!(merged[0].allcup, 0.0);
        assert_eq!(merged[0].total_cash, 12.5);
        assert_eq!(merged[1].total_cash, 0.0);
    }

    #[test]
    fn test_non_numeric_value_is_malformed() {
        let cups = rows(json!([
            { "STORE_NAME": "A", "ORDER_DATE": "2024-01-05", "ALLCUP": "many" }
        ]));
        assert!(matches!(
            merge_sales(&cups, &[]),
            Err(ProxyApiError::MalformedRow(_))
        ));
    }

    #[test]
    fn test_bad_order_date_is_malformed() {
        for date in [json!(null), json!("05.01.2024"), json!(20240105)] {
            let cups = rows(json!([{ "STORE_NAME": "A", "ORDER_DATE": date }]));
            assert!(matches!(
                merge_sales(&cups, &[]),
                Err(ProxyApiError::MalformedRow(_))
            ));
        }
    }

    #[test]
    fn test_order_date_formats() {
        let cases = [
            ("2024-01-05", "2024-01-05T00:00:00"),
            ("2024-01-05 13:45:10", "2024-01-05T13:45:10"),
            ("2024-01-05T13:45:10.250", "2024-01-05T13:45:10"),
            ("2024-01-05T13:45:10+04:00", "2024-01-05T13:45:10"),
        ];
        for (raw, expected) in cases {
            let packages = rows(json!([{ "STORE_NAME": "A", "ORDER_DATE": raw }]));
            let merged = merge_sales(&[], &packages).unwrap();
            assert_eq!(merged[0].order_date, expected, "input {}", raw);
        }
    }

    #[test]
    fn test_duplicate_cup_rows_keep_first_position() {
        let cups = rows(json!([
            { "STORE_NAME": "A", "ORDER_DATE": "2024-01-05", "ALLCUP": 1 },
            { "STORE_NAME": "B", "ORDER_DATE": "2024-01-05", "ALLCUP": 2 },
            { "STORE_NAME": "A", "ORDER_DATE": "2024-01-05", "ALLCUP": 3 }
        ]));
        let merged = merge_sales(&cups, &[]).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].store_name, "A");
        assert_eq!(merged[0].allcup, 3.0);
    }
}
