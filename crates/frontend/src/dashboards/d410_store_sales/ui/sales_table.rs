use crate::dashboards::d410_store_sales::view_model::TableState;
use leptos::prelude::*;
use thaw::*;

/// Таблица продаж по магазинам и дням с итоговой строкой
#[component]
pub fn SalesTable(#[prop(into)] table: Signal<TableState>) -> impl IntoView {
    view! {
        <div class="d410-table">
            {move || match table.get() {
                TableState::Loading => view! {
                    <div class="d410-table__placeholder">"Таблица загружается..."</div>
                }.into_any(),
                TableState::Empty => view! {
                    <div class="d410-table__placeholder">"Нет данных для отображения"</div>
                }.into_any(),
                TableState::Rows { rows, totals } => view! {
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=200.0>"Магазин"</TableHeaderCell>
                                <TableHeaderCell min_width=110.0>"Дата"</TableHeaderCell>
                                <TableHeaderCell min_width=90.0>"Чашки"</TableHeaderCell>
                                <TableHeaderCell min_width=110.0>"Пачки (кг)"</TableHeaderCell>
                                <TableHeaderCell min_width=120.0>"Сумма (₾)"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {rows
                                .into_iter()
                                .map(|row| view! {
                                    <TableRow>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{row.store_name}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{row.order_date}</TableCellLayout>
                                        </TableCell>
                                        <TableCell class="table__cell--right">
                                            <TableCellLayout>{row.cups}</TableCellLayout>
                                        </TableCell>
                                        <TableCell class="table__cell--right">
                                            <TableCellLayout>{row.packages_kg}</TableCellLayout>
                                        </TableCell>
                                        <TableCell class="table__cell--right">
                                            <TableCellLayout>{row.total_cash}</TableCellLayout>
                                        </TableCell>
                                    </TableRow>
                                })
                                .collect_view()}
                            <TableRow>
                                <TableCell>
                                    <TableCellLayout><strong>"Итого"</strong></TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>""</TableCellLayout>
                                </TableCell>
                                <TableCell class="table__cell--right">
                                    <TableCellLayout><strong>{totals.cups}</strong></TableCellLayout>
                                </TableCell>
                                <TableCell class="table__cell--right">
                                    <TableCellLayout><strong>{totals.packages_kg}</strong></TableCellLayout>
                                </TableCell>
                                <TableCell class="table__cell--right">
                                    <TableCellLayout><strong>{totals.total_cash}</strong></TableCellLayout>
                                </TableCell>
                            </TableRow>
                        </TableBody>
                    </Table>
                }.into_any(),
            }}
        </div>
    }
}
