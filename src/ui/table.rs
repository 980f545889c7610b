use eframe::egui::{self, Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{SalaryDataset, COLUMN_NAMES};

/// Render the filtered rows verbatim, in source order.
pub fn detail_table(ui: &mut Ui, dataset: &SalaryDataset, visible: &[usize]) {
    ui.heading("Detailed records");

    if visible.is_empty() {
        ui.label("No records match the current filters.");
        return;
    }

    let row_height = egui::TextStyle::Body.resolve(ui.style()).size + 6.0;

    ui.push_id("detail_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .columns(Column::auto().at_least(60.0).clip(true), COLUMN_NAMES.len())
            .min_scrolled_height(0.0)
            .max_scroll_height(420.0)
            .header(22.0, |mut header| {
                for name in COLUMN_NAMES {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(row_height, visible.len(), |mut row| {
                    let record = &dataset.records[visible[row.index()]];
                    for cell in record.cells() {
                        row.col(|ui| {
                            ui.label(cell);
                        });
                    }
                });
            });
    });
}
