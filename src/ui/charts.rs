use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, RichText, Sense, Shape, Stroke, Ui};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

use crate::color::{ColorMap, DivergingScale};
use crate::data::charts::{CategoryCount, CountryMean, Histogram, RoleMean};
use crate::geo;

const CHART_HEIGHT: f32 = 320.0;
const BAR_COLOR: Color32 = Color32::from_rgb(76, 120, 168);
const NO_DATA: &str = "No data to display in this chart.";

fn placeholder(ui: &mut Ui) {
    ui.colored_label(Color32::from_rgb(214, 158, 46), NO_DATA);
}

fn fixed_plot(id: &str) -> Plot<'_> {
    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
}

// ---------------------------------------------------------------------------
// Top roles by mean salary (horizontal bars)
// ---------------------------------------------------------------------------

/// Label for an integer tick on the role axis, blank between roles.
fn role_tick(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

pub fn top_roles_chart(ui: &mut Ui, roles: &[RoleMean]) {
    ui.strong("Top roles by mean salary");
    if roles.is_empty() {
        placeholder(ui);
        return;
    }

    let bars: Vec<Bar> = roles
        .iter()
        .enumerate()
        .map(|(i, r)| Bar::new(i as f64, r.mean).name(&r.role).width(0.7))
        .collect();
    let labels: Vec<String> = roles.iter().map(|r| r.role.clone()).collect();

    let chart = BarChart::new(bars)
        .horizontal()
        .color(BAR_COLOR)
        .element_formatter(Box::new(|bar: &Bar, _: &BarChart| {
            format!("{}\nUSD {:.2}", bar.name, bar.value)
        }));

    fixed_plot("top_roles_chart")
        .x_axis_label("Mean annual salary (USD)")
        .y_axis_min_width(140.0)
        .y_axis_formatter(move |mark, _range| role_tick(&labels, mark.value))
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

// ---------------------------------------------------------------------------
// Salary histogram
// ---------------------------------------------------------------------------

pub fn salary_histogram_chart(ui: &mut Ui, histogram: Option<&Histogram>) {
    ui.strong("Annual salary distribution");
    let Some(hist) = histogram else {
        placeholder(ui);
        return;
    };

    let bars: Vec<Bar> = hist
        .counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let (lo, hi) = hist.bin_range(i);
            Bar::new(hist.bin_center(i), count as f64)
                .width(hist.bin_width)
                .name(format!("USD {lo:.0} to {hi:.0}"))
        })
        .collect();

    let chart = BarChart::new(bars)
        .color(BAR_COLOR)
        .element_formatter(Box::new(|bar: &Bar, _: &BarChart| {
            format!("{}\n{} records", bar.name, bar.value)
        }));

    fixed_plot("salary_histogram")
        .x_axis_label("Salary range (USD)")
        .y_axis_label("Records")
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

// ---------------------------------------------------------------------------
// Remote-work donut
// ---------------------------------------------------------------------------

fn polar(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + egui::vec2(angle.cos(), angle.sin()) * radius
}

/// Index of the slice covering `angle` (radians clockwise from 12 o'clock).
fn slice_at(fractions: &[f32], angle: f32) -> Option<usize> {
    let mut acc = 0.0;
    for (i, f) in fractions.iter().enumerate() {
        acc += f * TAU;
        if angle < acc {
            return Some(i);
        }
    }
    None
}

pub fn remote_donut(ui: &mut Ui, counts: &[CategoryCount]) {
    ui.strong("Share of work arrangements");
    let total: usize = counts.iter().map(|c| c.count).sum();
    if total == 0 {
        placeholder(ui);
        return;
    }

    let colors = ColorMap::new(counts.iter().map(|c| c.label.as_str()));
    let fractions: Vec<f32> = counts
        .iter()
        .map(|c| c.count as f32 / total as f32)
        .collect();

    let size = egui::vec2(ui.available_width(), CHART_HEIGHT - 60.0);
    let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);
    let center = rect.center();
    let outer = (rect.width().min(rect.height()) * 0.5 - 8.0).max(16.0);
    let inner = outer * 0.5;

    let mut start = -FRAC_PI_2;
    for (c, &frac) in counts.iter().zip(&fractions) {
        let sweep = frac * TAU;
        let fill = colors.color_for(&c.label);

        // ring segments of at most ~2° keep every piece convex
        let steps = ((sweep.to_degrees() / 2.0).ceil() as usize).max(1);
        for s in 0..steps {
            let a0 = start + sweep * s as f32 / steps as f32;
            let a1 = start + sweep * (s + 1) as f32 / steps as f32;
            painter.add(Shape::convex_polygon(
                vec![
                    polar(center, outer, a0),
                    polar(center, outer, a1),
                    polar(center, inner, a1),
                    polar(center, inner, a0),
                ],
                fill,
                Stroke::NONE,
            ));
        }

        if frac >= 0.04 {
            painter.text(
                polar(center, (outer + inner) * 0.5, start + sweep * 0.5),
                Align2::CENTER_CENTER,
                format!("{}\n{:.1}%", c.label, frac * 100.0),
                FontId::proportional(12.0),
                Color32::BLACK,
            );
        }
        start += sweep;
    }

    if let Some(pos) = response.hover_pos() {
        let d = pos - center;
        let r = d.length();
        if (inner..=outer).contains(&r) {
            let angle = (d.y.atan2(d.x) + FRAC_PI_2).rem_euclid(TAU);
            if let Some(i) = slice_at(&fractions, angle) {
                let c = &counts[i];
                response.on_hover_text_at_pointer(format!(
                    "{}: {} records ({:.1}%)",
                    c.label,
                    c.count,
                    fractions[i] * 100.0
                ));
            }
        }
    }

    // legend
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for c in counts {
            ui.label(RichText::new("■").color(colors.color_for(&c.label)));
            ui.label(format!("{} ({})", c.label, c.count));
            ui.add_space(8.0);
        }
    });
}

// ---------------------------------------------------------------------------
// Salary map
// ---------------------------------------------------------------------------

/// Split country means into those placed on the map and unknown codes.
fn place_countries(countries: &[CountryMean]) -> (Vec<(&'static geo::Country, &CountryMean)>, Vec<&str>) {
    let mut placed = Vec::new();
    let mut unmapped = Vec::new();
    for cm in countries {
        match geo::lookup(&cm.iso3) {
            Some(country) => placed.push((country, cm)),
            None => unmapped.push(cm.iso3.as_str()),
        }
    }
    (placed, unmapped)
}

/// Mean salary of `role` per residence country. `any_rows` tells whether the
/// filtered view itself is non-empty.
pub fn salary_map(ui: &mut Ui, countries: &[CountryMean], role: &str, any_rows: bool) {
    ui.strong(format!("Mean {role} salary by country"));
    if !any_rows {
        placeholder(ui);
        return;
    }
    if countries.is_empty() {
        ui.label(format!("No {role} records in the current selection."));
        return;
    }

    let min = countries.iter().map(|c| c.mean).fold(f64::INFINITY, f64::min);
    let max = countries.iter().map(|c| c.mean).fold(f64::NEG_INFINITY, f64::max);
    let scale = DivergingScale::rd_yl_gn(min, max);
    let (placed, unmapped) = place_countries(countries);

    Plot::new("salary_map")
        .height(CHART_HEIGHT - 40.0)
        .data_aspect(1.0)
        .include_x(-180.0)
        .include_x(180.0)
        .include_y(-60.0)
        .include_y(85.0)
        .show_axes(false)
        .label_formatter(|name, _value| name.to_owned())
        .show(ui, |plot_ui| {
            let equator: PlotPoints = vec![[-180.0, 0.0], [180.0, 0.0]].into();
            plot_ui.line(Line::new(equator).color(Color32::from_gray(110)).width(0.5));

            for (country, cm) in &placed {
                let radius = 3.0 + (cm.count as f32).sqrt().min(6.0);
                plot_ui.points(
                    Points::new(vec![[country.lon, country.lat]])
                        .radius(radius)
                        .filled(true)
                        .color(scale.color_for(cm.mean))
                        .name(format!(
                            "{} ({}): USD {:.2}, {} records",
                            country.name, cm.iso3, cm.mean, cm.count
                        )),
                );
            }
        });

    color_bar(ui, &scale);

    if !unmapped.is_empty() {
        ui.small(format!("Not on map: {}", unmapped.join(", ")));
    }
}

/// Horizontal gradient legend with the scale's end values.
fn color_bar(ui: &mut Ui, scale: &DivergingScale) {
    const STEPS: usize = 48;
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("USD {:.0}", scale.min()));
        let (rect, _) = ui.allocate_exact_size(egui::vec2(180.0, 12.0), Sense::hover());
        let step_w = rect.width() / STEPS as f32;
        for i in 0..STEPS {
            let x0 = rect.left() + i as f32 * step_w;
            let strip = Rect::from_min_max(
                egui::pos2(x0, rect.top()),
                egui::pos2(x0 + step_w + 0.5, rect.bottom()),
            );
            let t = (i as f64 + 0.5) / STEPS as f64;
            ui.painter().rect_filled(strip, 0.0, scale.color_at(t));
        }
        ui.label(format!("USD {:.0}", scale.max()));
    });
}
