// Main application layout
// Menu bar, view sidebar, the active view, and the toast overlay

use crate::backend::Backend;
use crate::state::{AppState, View};
use crate::ui::components::render_toasts;
use crate::ui::{agents, chat, connectors, gate_log, roi, yards};
use eframe::egui;

/// Render the main application layout
pub fn render_app_layout(ctx: &egui::Context, state: &mut AppState, backend: &Backend) {
    render_menu_bar(ctx, state, backend);

    egui::SidePanel::left("view_sidebar")
        .resizable(true)
        .default_width(200.0)
        .min_width(150.0)
        .show(ctx, |ui| render_sidebar(ui, state));

    egui::CentralPanel::default().show(ctx, |ui| match state.view {
        View::AgentStudio => agents::render(ui, state, backend),
        View::Connectors => connectors::render(ui, state, backend),
        View::MasterChat => chat::render(ui, state, backend),
        View::YardAlert => yards::render(ui, state),
        View::GateLog => gate_log::render(ui, state),
        View::RoiCalculators => roi::render(ui, state),
    });

    render_toasts(ctx, &state.toasts);
}

/// Render the top menu bar
fn render_menu_bar(ctx: &egui::Context, state: &mut AppState, backend: &Backend) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Refresh").clicked() {
                    backend.load_all(state.view_token());
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                let mut dark_mode = ctx.style().visuals.dark_mode;
                if ui.checkbox(&mut dark_mode, "Dark Mode").changed() {
                    ctx.set_visuals(if dark_mode {
                        egui::Visuals::dark()
                    } else {
                        egui::Visuals::light()
                    });
                }
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if state.store.loading {
                    ui.spinner();
                }
                if let Some(error) = &state.store.error {
                    ui.colored_label(egui::Color32::from_rgb(220, 0, 0), error);
                }
            });
        });
    });
}

/// Render the left sidebar with the view list
fn render_sidebar(ui: &mut egui::Ui, state: &mut AppState) {
    ui.add_space(8.0);
    ui.heading("Warehouse Studio");
    ui.add_space(4.0);
    ui.separator();
    ui.add_space(4.0);

    for view in View::ALL {
        let selected = state.view == view;
        if ui.selectable_label(selected, view.title()).clicked() {
            state.navigate(view);
        }
        ui.add_space(2.0);
    }
}
