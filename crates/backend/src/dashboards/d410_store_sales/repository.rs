use contracts::dashboards::d410_store_sales::Store;
use serde_json::Value;

use crate::shared::proxy_api::{ProxyApi, ProxyApiError, Row};

const STORES_QUERY: &str = "SELECT ID, NAME FROM STORGRP ORDER BY NAME";

/// Типы чеков, учитываемые в продажах
const RECEIPT_KINDS: &str = "('1', '2', '3', '5')";

/// Чашки и выручка по магазину и дню
fn cups_query(store_count: usize) -> String {
    format!(
        r#"
            SELECT
                stgp.NAME AS STORE_NAME,
                D.DAT_ AS ORDER_DATE,
                COUNT(*) AS ALLCUP,
                SUM(D.SUMMA) AS TOTAL_CASH
            FROM STORZAKAZDT D
            JOIN STORGRP stgp ON D.STORGRPID = stgp.ID
            WHERE D.STORGRPID IN ({placeholders})
              AND D.CSDTKTHBID IN {kinds}
              AND D.DAT_ >= ? AND D.DAT_ <= ?
            GROUP BY stgp.NAME, D.DAT_
            ORDER BY stgp.NAME, D.DAT_
        "#,
        placeholders = placeholders(store_count),
        kinds = RECEIPT_KINDS,
    )
}

/// Килограммы фасованного кофе по магазину и дню
///
/// Пачка определяется по весу в названии товара вместе с признаком кофе,
/// либо по группе товаров Caotina.
fn packages_query(store_count: usize) -> String {
    format!(
        r#"
            SELECT
                stgp.NAME AS STORE_NAME,
                D.DAT_ AS ORDER_DATE,
                SUM(GD.SOURCE) AS PACKAGES_KG
            FROM STORZAKAZDT D
            JOIN STORZDTGDS GD ON D.ID = GD.SZID
            JOIN GOODS G ON GD.GODSId = G.ID
            JOIN STORGRP stgp ON D.STORGRPID = stgp.ID
            LEFT JOIN GOODSGROUPS GG ON G.OWNER = GG.ID
            WHERE D.STORGRPID IN ({placeholders})
              AND D.CSDTKTHBID IN {kinds}
              AND D.DAT_ >= ? AND D.DAT_ <= ?
              AND (
                    (
                        (G.NAME LIKE '%250 g%' OR G.NAME LIKE '%250г%' OR
                         G.NAME LIKE '%500 g%' OR G.NAME LIKE '%500г%' OR
                         G.NAME LIKE '%1 kg%' OR G.NAME LIKE '%1кг%' OR
                         G.NAME LIKE '%200 g%' OR G.NAME LIKE '%200г%' OR
                         G.NAME LIKE '%125 g%' OR G.NAME LIKE '%125г%' OR
                         G.NAME LIKE '%80 g%' OR G.NAME LIKE '%80г%' OR
                         G.NAME LIKE '%0.25%' OR G.NAME LIKE '%0.5%' OR
                         G.NAME LIKE '%0.2%' OR G.NAME LIKE '%0.125%' OR
                         G.NAME LIKE '%0.08%')
                        AND (G.NAME LIKE '%Coffee%' OR G.NAME LIKE '%кофе%' OR G.NAME LIKE '%Кофе%' OR G.NAME LIKE '%Blaser%')
                    )
                    OR (GG.NAME LIKE '%Caotina swiss chocolate drink (package)%')
              )
            GROUP BY stgp.NAME, D.DAT_
            ORDER BY stgp.NAME, D.DAT_
        "#,
        placeholders = placeholders(store_count),
        kinds = RECEIPT_KINDS,
    )
}

/// Параметры обоих запросов продаж: id магазинов, затем границы периода
fn sales_params(store_ids: &[i64], start_date: &str, end_date: &str) -> Vec<Value> {
    store_ids
        .iter()
        .map(|id| Value::from(*id))
        .chain([Value::from(start_date), Value::from(end_date)])
        .collect()
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(",")
}

/// Список магазинов (группы STORGRP)
pub async fn fetch_stores(api: &dyn ProxyApi) -> Result<Vec<Store>, ProxyApiError> {
    let rows = api.execute_query(STORES_QUERY, &[]).await?;
    rows.iter().map(parse_store).collect()
}

/// Строки STORE_NAME, ORDER_DATE, ALLCUP, TOTAL_CASH
pub async fn fetch_cups(
    api: &dyn ProxyApi,
    store_ids: &[i64],
    start_date: &str,
    end_date: &str,
) -> Result<Vec<Row>, ProxyApiError> {
    let params = sales_params(store_ids, start_date, end_date);
    api.execute_query(&cups_query(store_ids.len()), &params).await
}

/// Строки STORE_NAME, ORDER_DATE, PACKAGES_KG
pub async fn fetch_packages(
    api: &dyn ProxyApi,
    store_ids: &[i64],
    start_date: &str,
    end_date: &str,
) -> Result<Vec<Row>, ProxyApiError> {
    let params = sales_params(store_ids, start_date, end_date);
    api.execute_query(&packages_query(store_ids.len()), &params).await
}

/// ID должен быть целым числом (или строкой с ним), NAME - непустым значением
fn parse_store(row: &Row) -> Result<Store, ProxyApiError> {
    let malformed = || {
        ProxyApiError::MalformedRow(format!("store record {}", Value::Object(row.clone())))
    };

    let id = match row.get("ID") {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(malformed)?;

    let name = match row.get("NAME") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => return Err(malformed()),
        Some(other) => other.to_string(),
    };

    Ok(Store { id, name })
}
