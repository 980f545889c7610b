use std::path::Path;

use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::data::loader;
use crate::state::{DashboardState, DashboardView, Event, Session};
use crate::ui::panels::{self, TopBarAction};
use crate::ui::{charts, metrics, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalaryDashboardApp {
    session: Session,
    state: DashboardState,
    /// Derived from `session` and `state`; rebuilt after every event.
    view: DashboardView,
    /// Status / error message shown in the top bar.
    status_message: Option<String>,
}

impl SalaryDashboardApp {
    pub fn new(session: Session) -> Self {
        let state = DashboardState::initial(&session.config);
        let view = DashboardView::compute(&session, &state);
        Self {
            session,
            state,
            view,
            status_message: None,
        }
    }

    /// Apply a batch of events, then recompute the view once. Returns whether
    /// anything changed.
    fn dispatch(&mut self, events: Vec<Event>) -> bool {
        if events.is_empty() {
            return false;
        }
        for event in &events {
            log::trace!("{event:?}");
            self.state = self.state.apply(&self.session, event);
        }
        self.view = DashboardView::compute(&self.session, &self.state);
        true
    }

    /// Replace the dataset with a local file and start over with empty filters.
    fn open_file(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(dataset) => {
                log::info!("Loaded {} records from {}", dataset.len(), path.display());
                self.session = self
                    .session
                    .with_dataset(dataset, path.display().to_string());
                self.state = DashboardState::initial(&self.session.config);
                self.view = DashboardView::compute(&self.session, &self.state);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    fn main_area(&self, ui: &mut Ui) {
        ui.heading(RichText::new("Data-industry salary dashboard").size(24.0));
        ui.label("Explore annual salaries in the data field. Use the filters on the left to narrow the records.");
        ui.separator();

        metrics::metric_cards(ui, &self.view.summary);
        ui.separator();

        ui.heading("Charts");
        ui.columns(2, |cols: &mut [Ui]| {
            charts::top_roles_chart(&mut cols[0], &self.view.top_roles);
            charts::salary_histogram_chart(&mut cols[1], self.view.histogram.as_ref());
        });
        ui.separator();
        ui.columns(2, |cols: &mut [Ui]| {
            charts::remote_donut(&mut cols[0], &self.view.remote);
            charts::salary_map(
                &mut cols[1],
                &self.view.country,
                &self.session.config.map_role,
                !self.view.is_empty(),
            );
        });
        ui.separator();

        table::detail_table(ui, &self.session.dataset, &self.view.visible);
    }

    fn show(&mut self, ctx: &egui::Context) {
        // ---- Top panel: menu bar ----
        let action = egui::TopBottomPanel::top("top_bar")
            .show(ctx, |ui| {
                panels::top_bar(
                    ui,
                    &self.session,
                    &self.view,
                    self.status_message.as_deref(),
                )
            })
            .inner;

        // ---- Left side panel: filters ----
        let events = egui::SidePanel::left("filter_panel")
            .default_width(230.0)
            .resizable(true)
            .show(ctx, |ui| panels::side_panel(ui, &self.session, &self.state))
            .inner;

        // Apply before the central panel draws so it shows the new view.
        let mut changed = self.dispatch(events);
        if let Some(TopBarAction::OpenFile(path)) = action {
            self.open_file(&path);
            changed = true;
        }
        if changed {
            // top bar and side panel were drawn from the previous state
            ctx.request_repaint();
        }

        // ---- Central panel: metrics, charts, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| self.main_area(ui));
        });
    }
}

impl eframe::App for SalaryDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}
