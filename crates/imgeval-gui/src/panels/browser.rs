use egui_plot::{Bar, BarChart, Plot};
use imgeval_core::catalog::{page, page_count, SortOrder};
use imgeval_core::consts::TEMPLATES_PER_PAGE;
use imgeval_core::diff::{DiffClass, DiffLegend};

use crate::app::ImgEvalApp;
use crate::panels::{enum_combo, section_header};

const LEFT_PANEL_WIDTH: f32 = 300.0;

/// Height of the diff legend chart in pixels.
const CHART_HEIGHT: f32 = 110.0;

pub fn show(ctx: &egui::Context, app: &mut ImgEvalApp) {
    egui::SidePanel::left("browser")
        .default_width(LEFT_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(LEFT_PANEL_WIDTH - 20.0);
                template_section(ui, app);
                if let Some(legend) = app.viewport.legend {
                    ui.separator();
                    legend_section(ui, &legend, app);
                }
            });
        });
}

fn template_section(ui: &mut egui::Ui, app: &mut ImgEvalApp) {
    let count = app.ui_state.catalog.as_ref().map(|c| c.len().to_string());
    section_header(ui, "Templates", count.as_deref());
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        let search = ui.add(
            egui::TextEdit::singleline(&mut app.ui_state.search)
                .hint_text("Search title or description"),
        );
        if search.changed() {
            app.ui_state.page = 1;
        }
        if ui
            .add_enabled(!app.ui_state.loading_catalog, egui::Button::new("⟳"))
            .on_hover_text("Refresh")
            .clicked()
        {
            app.refresh_catalog();
        }
    });
    if enum_combo(ui, "Sort", &mut app.ui_state.sort, &SortOrder::ALL) {
        app.ui_state.page = 1;
    }
    ui.add_space(4.0);

    if app.ui_state.loading_catalog {
        let (fraction, text) = match app.ui_state.catalog_progress {
            Some((done, total)) if total > 0 => {
                (done as f32 / total as f32, format!("Loading ({done}/{total})"))
            }
            _ => (0.0, "Loading...".to_string()),
        };
        ui.add(egui::ProgressBar::new(fraction).text(text).animate(true));
        return;
    }

    if let Some(ref message) = app.ui_state.catalog_error {
        ui.colored_label(egui::Color32::from_rgb(220, 120, 80), message);
        return;
    }

    let Some(ref catalog) = app.ui_state.catalog else {
        return;
    };
    let hits = catalog.query(&app.ui_state.search, app.ui_state.sort);
    let pages = page_count(hits.len(), TEMPLATES_PER_PAGE).max(1);
    app.ui_state.page = app.ui_state.page.clamp(1, pages);

    let current = app.session.template_id().map(str::to_string);
    let mut clicked = None;
    for record in page(&hits, app.ui_state.page, TEMPLATES_PER_PAGE) {
        let selected = current.as_deref() == Some(record.template_id.as_str());
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            let title = if record.template_name.is_empty() {
                record.template_id.as_str()
            } else {
                record.template_name.as_str()
            };
            if ui.selectable_label(selected, egui::RichText::new(title).strong()).clicked() {
                clicked = Some(record.template_id.clone());
            }
            if !record.description.is_empty() {
                ui.small(&record.description);
            }
            ui.small(format!(
                "{} · {} → {}",
                record.author(),
                record.start_label(),
                record.end_label()
            ));
        });
    }
    if hits.is_empty() {
        ui.label("No matching templates");
    }

    ui.horizontal(|ui| {
        if ui
            .add_enabled(app.ui_state.page > 1, egui::Button::new("◀"))
            .clicked()
        {
            app.ui_state.page -= 1;
        }
        ui.label(format!("Page {} / {}", app.ui_state.page, pages));
        if ui
            .add_enabled(app.ui_state.page < pages, egui::Button::new("▶"))
            .clicked()
        {
            app.ui_state.page += 1;
        }
    });

    if let Some(template_id) = clicked {
        if current.as_deref() != Some(template_id.as_str()) || app.session.detail_error().is_some()
        {
            app.open_template(&template_id);
        }
    }
}

/// Bar chart of diff pixel classes for the current pair.
fn legend_section(ui: &mut egui::Ui, legend: &DiffLegend, app: &ImgEvalApp) {
    let status = format!("threshold {}", app.session.threshold());
    section_header(ui, "Diff", Some(&status));

    let total = legend.total().max(1) as f64;
    let bars: Vec<Bar> = DiffClass::ALL
        .iter()
        .enumerate()
        .filter(|(_, class)| **class != DiffClass::Other || legend.other > 0)
        .map(|(i, class)| {
            let [r, g, b] = class.rgb().unwrap_or([128, 128, 128]);
            let fill = if *class == DiffClass::Identical {
                egui::Color32::from_gray(70)
            } else {
                egui::Color32::from_rgb(r, g, b)
            };
            Bar::new(i as f64, legend.count(*class) as f64 / total * 100.0)
                .name(class.to_string())
                .fill(fill)
                .width(0.7)
        })
        .collect();

    Plot::new("diff_legend_chart")
        .height(CHART_HEIGHT)
        .include_y(0.0)
        .include_y(100.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_grid(false)
        .show_x(false)
        .y_axis_label("% pixels")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new("diff classes", bars));
        });

    for class in [DiffClass::WithinTolerance, DiffClass::OverTolerance] {
        ui.small(format!(
            "{class}: {:.1}%",
            legend.count(class) as f64 / total * 100.0
        ));
    }
}
