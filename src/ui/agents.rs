// Agent Studio view
// Agent list, details panel, activity log and flow outline

use crate::backend::Backend;
use crate::state::{AppState, ConfigForm, ConfigInput};
use crate::ui::components::*;
use eframe::egui;
use warehouse_studio_backend::state::{Agent, AgentStatus};

/// Render the Agent Studio view
pub fn render(ui: &mut egui::Ui, state: &mut AppState, backend: &Backend) {
    ui.heading("Agent Studio");
    ui.add_space(8.0);
    ui.separator();

    egui::SidePanel::left("agent_list")
        .resizable(true)
        .default_width(280.0)
        .show_inside(ui, |ui| render_agent_list(ui, state));

    egui::CentralPanel::default().show_inside(ui, |ui| {
        let selected = state
            .selected_agent_id
            .as_deref()
            .and_then(|id| state.store.agent(id))
            .cloned();
        match selected {
            Some(agent) => render_agent_details(ui, state, backend, &agent),
            None => render_welcome_view(ui),
        }
    });
}

fn render_agent_list(ui: &mut egui::Ui, state: &mut AppState) {
    egui::ScrollArea::vertical()
        .id_source("agent_list_scroll")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            // Collect first so the click handler can borrow state mutably
            let rows: Vec<_> = state
                .store
                .agents
                .iter()
                .map(|a| (a.id.clone(), a.name.clone(), a.kpi.clone(), a.status))
                .collect();

            if rows.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.label(egui::RichText::new("No agents").italics().weak());
                });
                return;
            }

            for (id, name, kpi, status) in rows {
                let is_selected = state.selected_agent_id.as_deref() == Some(id.as_str());
                let mut frame = egui::Frame::group(ui.style());
                if is_selected {
                    frame.fill = ui.visuals().selection.bg_fill;
                }
                let response = frame
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(&name).strong());
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                status_badge(ui, status);
                            });
                        });
                        ui.label(egui::RichText::new(&kpi).weak().size(12.0));
                    })
                    .response;

                let row = ui.interact(response.rect, ui.id().with(("agent_row", &id)), egui::Sense::click());
                if row.clicked() {
                    state.toggle_selection(&id);
                }
                ui.add_space(4.0);
            }
        });
}

fn render_welcome_view(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);
        ui.heading(egui::RichText::new("Welcome to Agent Studio").size(24.0));
        ui.add_space(16.0);
        ui.label("Select an agent to view its details, activity and logic");
    });
}

fn render_agent_details(ui: &mut egui::Ui, state: &mut AppState, backend: &Backend, agent: &Agent) {
    egui::ScrollArea::vertical()
        .id_source("agent_details_scroll")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.heading(egui::RichText::new(&agent.name).size(20.0));
                ui.label(egui::RichText::new(&agent.version).weak());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    status_badge(ui, agent.status);
                });
            });
            ui.label(&agent.description);
            ui.add_space(8.0);

            egui::Grid::new("agent_facts").num_columns(2).spacing([12.0, 6.0]).show(ui, |ui| {
                ui.label(egui::RichText::new("ID:").strong());
                ui.label(egui::RichText::new(&agent.id).monospace().weak());
                ui.end_row();
                ui.label(egui::RichText::new("KPI:").strong());
                ui.label(&agent.kpi);
                ui.end_row();
                ui.label(egui::RichText::new("Last activity:").strong());
                ui.label(&agent.last_activity);
                ui.end_row();
                ui.label(egui::RichText::new("Connectors:").strong());
                let names: Vec<&str> = agent
                    .connector_ids
                    .iter()
                    .map(|id| state.store.connector(id).map_or(id.as_str(), |c| c.name.as_str()))
                    .collect();
                ui.label(names.join(", "));
                ui.end_row();
            });

            ui.add_space(8.0);
            ui.label(&agent.details);
            ui.add_space(12.0);

            ui.horizontal(|ui| {
                ui.spacing_mut().button_padding = egui::vec2(12.0, 8.0);
                let toggle = match agent.status {
                    AgentStatus::Running => stop_button(ui),
                    AgentStatus::Warning | AgentStatus::Stopped => start_button(ui),
                };
                if toggle.clicked() {
                    backend.toggle_agent(agent.id.clone(), state.view_token());
                }
                if primary_button(ui, "View Logs").clicked() {
                    backend.fetch_logs(agent.id.clone(), state.view_token());
                }
                if primary_button(ui, "View Logic").clicked() {
                    backend.fetch_flow(agent.id.clone(), state.view_token());
                }
            });

            ui.add_space(12.0);
            ui.separator();
            render_config_editor(ui, state, backend, agent);

            if let Some((_, flow)) = state.agent_flow.as_ref().filter(|(id, _)| *id == agent.id) {
                ui.add_space(12.0);
                ui.separator();
                ui.label(egui::RichText::new("Logic").heading().size(16.0));
                let steps: Vec<&str> = flow.nodes.iter().map(|n| n.data.label.as_str()).collect();
                ui.label(steps.join("  →  "));
            }

            if let Some((_, logs)) = state.agent_logs.as_ref().filter(|(id, _)| *id == agent.id) {
                ui.add_space(12.0);
                ui.separator();
                ui.label(egui::RichText::new("Activity Log").heading().size(16.0));
                egui::Grid::new("agent_logs").num_columns(4).striped(true).show(ui, |ui| {
                    for log in logs {
                        ui.label(log.timestamp.format("%H:%M").to_string());
                        ui.colored_label(log_level_color(log.level), format!("{:?}", log.level));
                        ui.label(&log.message);
                        ui.label(egui::RichText::new(&log.details).weak());
                        ui.end_row();
                    }
                });
            }
        });
}

fn render_config_editor(ui: &mut egui::Ui, state: &mut AppState, backend: &Backend, agent: &Agent) {
    if !state.config_form.is_for(&agent.id) {
        state.config_form = ConfigForm::load(agent);
    }

    ui.label(egui::RichText::new("Configuration").heading().size(16.0));
    egui::Grid::new("agent_config").num_columns(2).striped(true).show(ui, |ui| {
        for (key, input) in state.config_form.fields.iter_mut() {
            ui.label(egui::RichText::new(key.as_str()).monospace());
            match input {
                ConfigInput::Flag(value) => {
                    ui.checkbox(value, "");
                }
                ConfigInput::Number(text) => {
                    ui.add(egui::TextEdit::singleline(text).desired_width(120.0));
                }
                ConfigInput::Text(text) => {
                    let lower = key.to_ascii_lowercase();
                    let hidden = lower.contains("password") || lower.contains("secret");
                    ui.add(egui::TextEdit::singleline(text).password(hidden));
                }
                ConfigInput::Json(text) => {
                    ui.add(egui::TextEdit::singleline(text).code_editor());
                }
            }
            ui.end_row();
        }
    });

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        let saving = state.config_form.saving;
        let label = if saving { "Saving..." } else { "Save Configuration" };
        if ui.add_enabled(!saving, egui::Button::new(label)).clicked() {
            if let Some((id, patch)) = state.save_config() {
                backend.update_agent(id, patch, state.view_token());
            }
        }
        if ui.add_enabled(!saving, egui::Button::new("Reset")).clicked() {
            state.config_form = ConfigForm::load(agent);
        }
    });
}
