use eframe::egui::{self, RichText, Ui};

use crate::data::summary::SalarySummary;

// ---------------------------------------------------------------------------
// Metric cards
// ---------------------------------------------------------------------------

/// Card titles and formatted values, left to right.
pub fn metric_values(summary: &SalarySummary) -> [(&'static str, String); 5] {
    [
        ("Mean salary", format!("USD {:.2}", summary.mean)),
        ("Highest salary", format!("USD {:.2}", summary.max)),
        ("Lowest salary", format!("USD {:.2}", summary.min)),
        ("Records", summary.count.to_string()),
        ("Most frequent role", summary.top_role.clone()),
    ]
}

/// Render the row of five metric cards.
pub fn metric_cards(ui: &mut Ui, summary: &SalarySummary) {
    ui.heading("Overview (annual salary, USD)");
    ui.add_space(4.0);

    let cards = metric_values(summary);
    ui.columns(cards.len(), |cols: &mut [Ui]| {
        for (ui, (title, value)) in cols.iter_mut().zip(cards) {
            metric_card(ui, title, &value);
        }
    });
}

fn metric_card(ui: &mut Ui, title: &str, value: &str) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new(title).small().weak());
        ui.label(RichText::new(value).size(20.0).strong());
    });
}
