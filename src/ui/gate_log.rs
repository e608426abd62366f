// Gate Log view
// Entry table, new-entry form, panic button and the regional alert feed

use crate::state::AppState;
use crate::ui::components::{decision_badge, labeled_field, primary_button};
use eframe::egui;
use warehouse_studio_backend::gate_log::{yard_name, GateDecision};

/// Render the gate log for the configured yard
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading("Gate Log");
        ui.label(egui::RichText::new(yard_name(state.gate_log.yard_id())).weak());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let panic = egui::Button::new(egui::RichText::new("PANIC").strong().color(egui::Color32::WHITE))
                .fill(egui::Color32::from_rgb(200, 0, 0));
            if ui.add(panic).clicked() {
                state.gate_form.panic_open = true;
            }
            if primary_button(ui, "New Entry").clicked() {
                state.gate_form.adding = !state.gate_form.adding;
            }
        });
    });
    ui.label(format!(
        "{} entries today · {} flagged",
        state.gate_log.entries().len(),
        state.gate_log.flagged_count()
    ));
    ui.add_space(8.0);
    ui.separator();

    if state.gate_form.panic_open {
        render_panic_dialog(ui.ctx(), state);
    }

    egui::SidePanel::right("yard_alerts")
        .resizable(true)
        .default_width(300.0)
        .show_inside(ui, |ui| render_alerts(ui, state));

    egui::CentralPanel::default().show_inside(ui, |ui| {
        egui::ScrollArea::vertical()
            .id_source("gate_log_scroll")
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                if state.gate_form.adding {
                    render_entry_form(ui, state);
                    ui.add_space(12.0);
                }
                render_entries(ui, state);
            });
    });
}

fn render_entry_form(ui: &mut egui::Ui, state: &mut AppState) {
    let mut submit = false;
    ui.group(|ui| {
        ui.label(egui::RichText::new("New Gate Entry").heading().size(16.0));
        let entry = &mut state.gate_form.entry;
        ui.columns(2, |cols| {
            labeled_field(&mut cols[0], "Driver name", &mut entry.driver_name);
            labeled_field(&mut cols[0], "Driver DL", &mut entry.driver_dl);
            labeled_field(&mut cols[0], "DL state", &mut entry.dl_state);
            labeled_field(&mut cols[0], "Tractor plate", &mut entry.tractor_plate);
            labeled_field(&mut cols[0], "Trailer plate", &mut entry.trailer_plate);
            labeled_field(&mut cols[0], "Seal number", &mut entry.seal_number);
            labeled_field(&mut cols[1], "Carrier (reported)", &mut entry.carrier_reported);
            labeled_field(&mut cols[1], "Carrier (on file)", &mut entry.carrier_on_file);
            labeled_field(&mut cols[1], "BOL number", &mut entry.bol_number);
            labeled_field(&mut cols[1], "Destination (stated)", &mut entry.destination_stated);
            labeled_field(&mut cols[1], "Destination (BOL)", &mut entry.destination_doc);
            labeled_field(&mut cols[1], "Freight type", &mut entry.freight_type);
        });
        ui.horizontal(|ui| {
            ui.label("Decision");
            for decision in [GateDecision::Cleared, GateDecision::Denied, GateDecision::Escalated] {
                ui.radio_value(&mut entry.decision, decision, decision.label());
            }
            ui.checkbox(&mut entry.panic_alert, "Panic alert");
        });
        labeled_field(ui, "Comments", &mut entry.comments);
        if primary_button(ui, "Log Entry").clicked() {
            submit = true;
        }
    });
    if submit {
        state.submit_gate_entry();
    }
}

fn render_entries(ui: &mut egui::Ui, state: &AppState) {
    egui::Grid::new("gate_entries")
        .num_columns(7)
        .striped(true)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            for header in ["Time", "Driver", "Tractor", "Trailer", "Carrier", "Decision", "Flags"] {
                ui.label(egui::RichText::new(header).strong());
            }
            ui.end_row();

            for entry in state.gate_log.entries() {
                let time = if entry.time_out.is_empty() {
                    format!("{} – on site", entry.time_in)
                } else {
                    format!("{} – {}", entry.time_in, entry.time_out)
                };
                ui.label(time);
                ui.label(&entry.form.driver_name);
                ui.label(&entry.form.tractor_plate);
                ui.label(&entry.form.trailer_plate);
                ui.label(&entry.form.carrier_reported);
                decision_badge(ui, entry.form.decision);
                if entry.red_flag_types.is_empty() {
                    ui.label(egui::RichText::new("None").weak());
                } else {
                    let shown: Vec<&str> = entry.red_flag_types.iter().take(2).map(String::as_str).collect();
                    let mut text = shown.join(", ");
                    if entry.red_flag_types.len() > 2 {
                        text.push_str(&format!(" +{} more", entry.red_flag_types.len() - 2));
                    }
                    ui.colored_label(egui::Color32::from_rgb(220, 0, 0), text);
                }
                ui.end_row();
            }
        });
}

fn render_alerts(ui: &mut egui::Ui, state: &AppState) {
    ui.label(egui::RichText::new("Yard Alerts").heading().size(16.0));
    ui.add_space(4.0);
    egui::ScrollArea::vertical()
        .id_source("yard_alert_scroll")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            for alert in state.gate_log.alerts() {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    let color = if alert.is_emergency() {
                        egui::Color32::from_rgb(220, 0, 0)
                    } else {
                        egui::Color32::from_rgb(220, 140, 0)
                    };
                    ui.colored_label(color, egui::RichText::new(&alert.red_flag_type).strong());
                    ui.label(egui::RichText::new(format!("{} · {}", alert.yard, alert.timestamp)).weak().small());
                    ui.label(egui::RichText::new(&alert.matched_field).small());
                    ui.label(&alert.details);
                });
                ui.add_space(4.0);
            }
        });
}

fn render_panic_dialog(ctx: &egui::Context, state: &mut AppState) {
    let mut open = true;
    let mut send = false;
    egui::Window::new("Panic Alert")
        .collapsible(false)
        .resizable(false)
        .open(&mut open)
        .show(ctx, |ui| {
            ui.label("Broadcast to all yards within 50 miles");
            ui.text_edit_multiline(&mut state.gate_form.panic_message);
            if ui.button("Send Alert").clicked() {
                send = true;
            }
        });
    if send {
        state.send_panic_alert();
    }
    if !open {
        state.gate_form.panic_open = false;
    }
}
