use crate::dashboards::d410_store_sales::state::FilterState;
use crate::dashboards::d410_store_sales::view_model::DashboardView;
use crate::shared::components::stat_card::StatCard;
use leptos::prelude::*;

#[component]
pub fn SummaryCards(
    #[prop(into)] dashboard: Signal<DashboardView>,
    #[prop(into)] filter: Signal<FilterState>,
) -> impl IntoView {
    let health_status = Signal::derive(move || dashboard.get().health.map(|h| h.status));
    let health_caption =
        Signal::derive(move || dashboard.get().health.value().map(|h| h.caption()));
    let store_count = Signal::derive(move || dashboard.get().store_count);
    let total_cash = Signal::derive(move || dashboard.get().total_cash);
    let total_cups = Signal::derive(move || dashboard.get().total_cups);
    let period = Signal::derive(move || {
        filter.with(|f| Some(format!("Период: {} — {}", f.start_date, f.end_date)))
    });

    view! {
        <div class="d410-summary">
            <StatCard
                label="Состояние API"
                icon_name="activity"
                value=health_status
                subtitle=health_caption
            />
            <StatCard label="Магазины" icon_name="store" value=store_count />
            <StatCard label="Сумма продаж (₾)" icon_name="cash" value=total_cash />
            <StatCard
                label="Всего чашек"
                icon_name="coffee"
                value=total_cups
                subtitle=period
            />
        </div>
    }
}
