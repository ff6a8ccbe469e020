use leptos::prelude::*;

/// Поле даты с нативным календарём
/// Браузер сам показывает дату в формате локали (dd.mm.yyyy для RU)
#[component]
pub fn DateInput(
    /// Значение даты в формате yyyy-mm-dd
    #[prop(into)]
    value: Signal<String>,
    /// Вызывается при изменении даты (получает yyyy-mm-dd)
    on_change: Callback<String>,
    #[prop(into, optional)] disabled: Signal<bool>,
    #[prop(optional, into)] aria_label: String,
) -> impl IntoView {
    view! {
        <input
            type="date"
            class="date-input"
            aria-label=aria_label
            prop:value=value
            prop:disabled=disabled
            on:change=move |ev| {
                on_change.run(event_target_value(&ev));
            }
        />
    }
}
