use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::EmptySelection;
use crate::data::model::FilterColumn;
use crate::state::{DashboardState, DashboardView, Event, Session};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the filter panel. Returns the interactions of this frame, in order.
pub fn side_panel(ui: &mut Ui, session: &Session, state: &DashboardState) -> Vec<Event> {
    let mut events = Vec::new();

    ui.heading("Filters");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for col in FilterColumn::ALL {
                let Some(all_values) = session.dataset.values_of(col) else {
                    continue;
                };

                // Show count of selected / total in the header
                let header_text = format!(
                    "{}  ({}/{})",
                    col.label(),
                    state.selected_count(col),
                    all_values.len()
                );

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(col.source_name())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                events.push(Event::SelectAll(col));
                            }
                            if ui.small_button("None").clicked() {
                                events.push(Event::SelectNone(col));
                            }
                        });

                        for val in all_values {
                            let mut checked = state.is_selected(col, val);
                            if ui.checkbox(&mut checked, val.to_string()).changed() {
                                events.push(Event::Toggle {
                                    column: col,
                                    value: val.clone(),
                                });
                            }
                        }
                    });
            }

            ui.separator();

            let mut match_all = state.empty_selection == EmptySelection::MatchAll;
            if ui
                .checkbox(&mut match_all, "Empty filter shows all rows")
                .on_hover_text(
                    "When unchecked, a filter with nothing selected hides every row.",
                )
                .changed()
            {
                let policy = if match_all {
                    EmptySelection::MatchAll
                } else {
                    EmptySelection::ExcludeAll
                };
                events.push(Event::SetEmptySelection(policy));
            }
        });

    events
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Actions requested from the top bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopBarAction {
    OpenFile(PathBuf),
}

/// Render the top menu / status bar.
pub fn top_bar(
    ui: &mut Ui,
    session: &Session,
    view: &DashboardView,
    status_message: Option<&str>,
) -> Option<TopBarAction> {
    let mut action = None;

    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                action = open_file_dialog().map(TopBarAction::OpenFile);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} records loaded, {} visible",
            session.dataset.len(),
            view.visible.len()
        ))
        .on_hover_text(session.source_label.as_str());

        if let Some(msg) = status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });

    action
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open salary data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file()
}
