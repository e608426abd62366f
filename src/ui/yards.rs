// Yard Alert view
// Network totals, security activity, and the yard list that opens a gate log

use crate::state::AppState;
use crate::ui::components::primary_button;
use eframe::egui;
use warehouse_studio_backend::gate_log::{NetworkTotals, YardStatus, YardSummary, KNOWN_YARDS};

const NETWORK_ALERTS: [(&str, u32); 4] = [
    ("Stolen Vehicle Reports", 3),
    ("Invalid Insurance", 7),
    ("Blacklisted Carriers", 2),
    ("Destination Mismatches", 5),
];

const RISK_PATTERNS: [(&str, &str); 3] = [
    ("Out-of-state plates", "Nevada plates appearing 3x more than usual"),
    ("Weekend irregularities", "47% more unscheduled arrivals on weekends"),
    ("Repeat offenders", "Same driver denied at 3 different yards"),
];

/// Render the yard network overview
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Yard Alert Security Overview");
    ui.add_space(8.0);
    ui.separator();

    egui::ScrollArea::vertical()
        .id_source("yard_overview_scroll")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            render_totals(ui, &NetworkTotals::from_yards(&KNOWN_YARDS));
            ui.add_space(12.0);

            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.colored_label(
                    egui::Color32::from_rgb(200, 150, 0),
                    egui::RichText::new("Insurance Expiry Warning").strong(),
                );
                ui.label("3 carriers have insurance expiring within 7 days across the network");
            });
            ui.add_space(12.0);

            ui.label(egui::RichText::new("Recent Security Activity").heading().size(16.0));
            ui.columns(2, |cols| {
                cols[0].label(egui::RichText::new("Network-Wide Alerts (24h)").strong());
                egui::Grid::new("network_alerts").num_columns(2).show(&mut cols[0], |ui| {
                    for (label, count) in NETWORK_ALERTS {
                        ui.label(label);
                        ui.label(egui::RichText::new(count.to_string()).strong());
                        ui.end_row();
                    }
                });

                cols[1].label(egui::RichText::new("Top Risk Patterns").strong());
                for (title, detail) in RISK_PATTERNS {
                    cols[1].label(egui::RichText::new(title).strong());
                    cols[1].label(egui::RichText::new(detail).weak());
                }
            });
            ui.add_space(12.0);

            ui.label(egui::RichText::new("Active Yards").heading().size(16.0));
            for yard in KNOWN_YARDS.iter() {
                if render_yard_card(ui, yard, state.gate_log.yard_id() == yard.id) {
                    state.open_yard(yard.id);
                }
                ui.add_space(6.0);
            }
        });
}

fn render_totals(ui: &mut egui::Ui, totals: &NetworkTotals) {
    ui.columns(4, |cols| {
        metric(&mut cols[0], "Total Yards", totals.total_yards.to_string(), "Active monitoring");
        metric(&mut cols[1], "Good Actor Count", totals.good_actors.to_string(), "+12% this week");
        metric(&mut cols[2], "Red Flagged Events", totals.red_flags.to_string(), "Last 24 hours");
        metric(
            &mut cols[3],
            "Avg Dwell Time",
            totals.avg_dwell_minutes.to_string(),
            "minutes per truck",
        );
    });
}

fn metric(ui: &mut egui::Ui, title: &str, value: String, caption: &str) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new(title).weak());
        ui.label(egui::RichText::new(value).size(24.0).strong());
        ui.label(egui::RichText::new(caption).small().weak());
    });
}

/// Returns true when the launch button was clicked
fn render_yard_card(ui: &mut egui::Ui, yard: &YardSummary, is_open: bool) -> bool {
    let mut launch = false;
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(yard.name).strong().size(16.0));
            ui.label(egui::RichText::new(yard.location).weak());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let (text, color) = match yard.status {
                    YardStatus::Active => ("active", egui::Color32::from_rgb(0, 150, 0)),
                    YardStatus::Inactive => ("inactive", egui::Color32::GRAY),
                };
                ui.colored_label(color, text);
            });
        });
        egui::Grid::new(("yard_stats", yard.id)).num_columns(3).spacing([24.0, 4.0]).show(ui, |ui| {
            ui.label(egui::RichText::new("Total Entries").weak());
            ui.label(egui::RichText::new("Today").weak());
            ui.label(egui::RichText::new("Red Flags").weak());
            ui.end_row();
            ui.label(egui::RichText::new(yard.total_entries.to_string()).strong());
            ui.label(egui::RichText::new(yard.today_entries.to_string()).strong());
            ui.colored_label(
                egui::Color32::from_rgb(220, 0, 0),
                egui::RichText::new(yard.red_flag_events.to_string()).strong(),
            );
            ui.end_row();
        });
        let label = if is_open { "Open Gate Log" } else { "Launch Gate Log" };
        launch = primary_button(ui, label).clicked();
    });
    launch
}
