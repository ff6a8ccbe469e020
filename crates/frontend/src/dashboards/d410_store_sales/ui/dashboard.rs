use super::filters_panel::FiltersPanel;
use super::sales_table::SalesTable;
use super::summary_cards::SummaryCards;
use crate::dashboards::d410_store_sales::api;
use crate::dashboards::d410_store_sales::query_guard::QueryGuard;
use crate::dashboards::d410_store_sales::resource::Loadable;
use crate::dashboards::d410_store_sales::scope::{
    apply_sales_result, load_sales, plan_sales_fetch, SalesFetchPlan, SalesQueryKey,
};
use crate::dashboards::d410_store_sales::state::create_state;
use crate::dashboards::d410_store_sales::view_model::{DashboardView, TableState, ERROR_ADVISORY};
use contracts::dashboards::d410_store_sales::{HealthResponse, SalesResponse, Store};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Store Sales Dashboard component
#[component]
pub fn StoreSalesDashboard() -> impl IntoView {
    let filter = create_state();

    // Data state
    let health = RwSignal::new(Loadable::<HealthResponse>::pending());
    let stores = RwSignal::new(Loadable::<Vec<Store>>::pending());
    let sales = RwSignal::new(Loadable::<SalesResponse>::pending());
    let sales_guard = StoredValue::new(QueryGuard::<SalesQueryKey>::new());

    // Load health and stores on mount
    Effect::new(move |_| {
        spawn_local(async move {
            match api::fetch_health().await {
                Ok(response) => health.update(|r| r.resolve(response)),
                Err(e) => {
                    log::error!("Failed to load D410 health: {}", e);
                    health.update(|r| r.fail(e));
                }
            }
        });

        spawn_local(async move {
            match api::fetch_stores().await {
                Ok(list) => stores.update(|r| r.resolve(list)),
                Err(e) => {
                    log::error!("Failed to load D410 stores: {}", e);
                    stores.update(|r| r.fail(e));
                }
            }
        });
    });

    let sales_key = Memo::new(move |_| {
        let current = filter.get();
        stores.with(|s| SalesQueryKey::new(&current, s.data().map(|list| list.as_slice())))
    });

    // Load sales when the key changes; only the latest key may write the result
    Effect::new(move |_| {
        let key = sales_key.get();
        if !sales_guard
            .try_update_value(|g| g.begin(key.clone()))
            .unwrap_or(false)
        {
            return;
        }

        match plan_sales_fetch(&key) {
            SalesFetchPlan::Resolved(response) => sales.update(|r| r.resolve(response)),
            SalesFetchPlan::Fetch(key) => {
                sales.update(|r| r.begin_fresh());
                spawn_local(async move {
                    let result = load_sales(&key, api::fetch_sales).await;
                    let Some(guard) = sales_guard.try_get_value() else {
                        return;
                    };
                    let applied = sales
                        .try_maybe_update(|target| {
                            let applied = apply_sales_result(&guard, &key, result, target);
                            (applied, applied)
                        })
                        .unwrap_or(false);
                    if !applied {
                        log::debug!("Discarding superseded D410 sales response: {:?}", key);
                    }
                });
            }
        }
    });

    let dashboard_view = Memo::new(move |_| {
        health.with(|h| stores.with(|s| sales.with(|sa| DashboardView::compose(h, s, sa))))
    });
    let table_state = Memo::new(move |_| sales.with(TableState::from_sales));

    view! {
        <div id="d410_store_sales--dashboard" class="d410-dashboard">
            <div class="d410-dashboard__header">
                <h1 class="d410-dashboard__title">"Firebird Sales Dashboard"</h1>
                <p class="d410-dashboard__subtitle">"Продажи по магазинам за выбранный период"</p>
            </div>

            {move || {
                if dashboard_view.get().has_error {
                    view! {
                        <div class="d410-error">
                            <strong>"⚠ "</strong>
                            {ERROR_ADVISORY}
                        </div>
                    }.into_any()
                } else {
                    view! { <></> }.into_any()
                }
            }}

            <FiltersPanel filter=filter stores=stores />

            {move || {
                if dashboard_view.get().is_loading {
                    view! {
                        <div class="d410-loading">
                            <span>"Загрузка данных..."</span>
                        </div>
                    }.into_any()
                } else {
                    view! { <></> }.into_any()
                }
            }}

            <SummaryCards dashboard=dashboard_view filter=filter />
            <SalesTable table=table_state />
        </div>
    }
}
