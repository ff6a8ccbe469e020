use crate::dashboards::d410_store_sales::resource::Loadable;
use crate::dashboards::d410_store_sales::state::FilterState;
use crate::shared::components::date_input::DateInput;
use crate::shared::icons::icon;
use contracts::dashboards::d410_store_sales::Store;
use leptos::prelude::*;
use thaw::*;

/// Панель фильтров: период и магазины
#[component]
pub fn FiltersPanel(
    filter: RwSignal<FilterState>,
    #[prop(into)] stores: Signal<Loadable<Vec<Store>>>,
) -> impl IntoView {
    let is_disabled = Signal::derive(move || stores.with(|s| s.is_pending()));
    let store_list = Memo::new(move |_| stores.with(|s| s.data().cloned().unwrap_or_default()));

    let start_date = Signal::derive(move || filter.with(|f| f.start_date.clone()));
    let end_date = Signal::derive(move || filter.with(|f| f.end_date.clone()));
    let on_start_change = Callback::new(move |value: String| {
        filter.update(|f| f.set_start_date(value));
    });
    let on_end_change = Callback::new(move |value: String| {
        filter.update(|f| f.set_end_date(value));
    });

    view! {
        <div class="filter-panel d410-filters">
            <div class="filter-panel-header">
                <div class="filter-panel-header__left">
                    {icon("filter")}
                    <span class="filter-panel__title">"Фильтры"</span>
                </div>
            </div>

            <div class="filter-panel-content d410-filters__content">
                <div class="d410-filters__section">
                    <label class="d410-filters__label">
                        {icon("calendar")}
                        "Период"
                    </label>
                    <Flex gap=FlexGap::Small align=FlexAlign::Center>
                        <DateInput
                            value=start_date
                            on_change=on_start_change
                            disabled=is_disabled
                            aria_label="Начало периода"
                        />
                        <span>"—"</span>
                        <DateInput
                            value=end_date
                            on_change=on_end_change
                            disabled=is_disabled
                            aria_label="Конец периода"
                        />
                    </Flex>
                </div>

                <div class="d410-filters__section">
                    <label class="d410-filters__label">
                        {icon("store")}
                        "Магазины"
                    </label>
                    <div class="d410-filters__chips">
                        {move || {
                            let list = store_list.get();
                            if list.is_empty() {
                                view! {
                                    <p class="d410-filters__empty">"Магазины не загружены"</p>
                                }.into_any()
                            } else {
                                list.into_iter()
                                    .map(|store| {
                                        let store_id = store.id;
                                        let is_active = move || {
                                            filter.with(|f| f.is_store_active(store_id))
                                        };
                                        view! {
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=Signal::derive(move || {
                                                    if is_active() {
                                                        ButtonAppearance::Primary
                                                    } else {
                                                        ButtonAppearance::Secondary
                                                    }
                                                })
                                                disabled=is_disabled
                                                on_click=move |_| {
                                                    filter.update(|f| f.toggle_store(store_id));
                                                }
                                            >
                                                {store.name}
                                            </Button>
                                        }
                                    })
                                    .collect_view()
                                    .into_any()
                            }
                        }}
                    </div>
                    <p class="d410-filters__hint">
                        "Если не выбрано ни одного магазина, будут использованы все доступные."
                    </p>
                </div>
            </div>
        </div>
    }
}
