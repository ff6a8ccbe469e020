use crate::shared::components::card_value::CardValue;
use crate::shared::icons::icon;
use leptos::prelude::*;

/// Карточка сводного показателя
///
/// Пока источник загружается, выводит "…", при ошибке без данных - "Нет данных".
#[component]
pub fn StatCard(
    /// Подпись над значением
    #[prop(into)]
    label: String,
    /// Имя иконки для icon()
    #[prop(into)]
    icon_name: String,
    /// Уже отформатированное значение
    #[prop(into)]
    value: Signal<CardValue<String>>,
    /// Необязательная подпись под значением
    #[prop(into, optional)]
    subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let value_class = move || match value.get() {
        CardValue::NoData => "stat-card__value stat-card__value--no-data",
        CardValue::Loading => "stat-card__value stat-card__value--loading",
        CardValue::Value(_) => "stat-card__value",
    };

    let subtitle_view = move || {
        subtitle.get().map(|s| {
            view! { <div class="stat-card__subtitle">{s}</div> }
        })
    };

    view! {
        <div class="stat-card">
            <div class="stat-card__icon">
                {icon(&icon_name)}
            </div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class=value_class>{move || value.get().display()}</div>
                {subtitle_view}
            </div>
        </div>
    }
}
