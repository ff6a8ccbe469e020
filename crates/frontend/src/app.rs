use crate::dashboards::StoreSalesDashboard;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <ConfigProvider>
            <main class="app-main">
                <StoreSalesDashboard />
            </main>
        </ConfigProvider>
    }
}
