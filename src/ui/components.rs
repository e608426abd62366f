// Reusable UI components
// Badges, buttons and toasts shared by the views

use crate::state::{Toast, ToastKind};
use eframe::egui;
use warehouse_studio_backend::dispatcher::logs::LogLevel;
use warehouse_studio_backend::gate_log::GateDecision;
use warehouse_studio_backend::state::{AgentStatus, ConnectorStatus};

const GREEN: egui::Color32 = egui::Color32::from_rgb(0, 200, 0);
const YELLOW: egui::Color32 = egui::Color32::from_rgb(220, 180, 0);
const RED: egui::Color32 = egui::Color32::from_rgb(220, 0, 0);

/// Render an agent status badge with colored text
/// Colors: Running (green), Warning (yellow), Stopped (red)
pub fn status_badge(ui: &mut egui::Ui, status: AgentStatus) {
    let (text, color) = match status {
        AgentStatus::Running => ("Running", GREEN),
        AgentStatus::Warning => ("Warning", YELLOW),
        AgentStatus::Stopped => ("Stopped", RED),
    };
    ui.colored_label(color, text);
}

/// Render a connector status badge
pub fn connector_badge(ui: &mut egui::Ui, status: ConnectorStatus) {
    let (text, color) = match status {
        ConnectorStatus::Connected => ("Connected", GREEN),
        ConnectorStatus::Disconnected => ("Disconnected", egui::Color32::GRAY),
        ConnectorStatus::Error => ("Error", RED),
    };
    ui.colored_label(color, text);
}

/// Render a gate decision badge
pub fn decision_badge(ui: &mut egui::Ui, decision: GateDecision) {
    let color = match decision {
        GateDecision::Cleared => GREEN,
        GateDecision::Denied => RED,
        GateDecision::Escalated => YELLOW,
    };
    ui.colored_label(color, decision.label());
}

/// Color of a log row's level
pub fn log_level_color(level: LogLevel) -> egui::Color32 {
    match level {
        LogLevel::Info => egui::Color32::GRAY,
        LogLevel::Warning => YELLOW,
        LogLevel::Error => RED,
    }
}

/// Render a primary action button
pub fn primary_button(ui: &mut egui::Ui, text: &str) -> egui::Response {
    ui.button(egui::RichText::new(text).strong())
}

/// Render a start button (typically green)
pub fn start_button(ui: &mut egui::Ui) -> egui::Response {
    ui.button(egui::RichText::new("▶ Resume").color(egui::Color32::from_rgb(0, 180, 0)))
}

/// Render a stop button (typically red)
pub fn stop_button(ui: &mut egui::Ui) -> egui::Response {
    ui.button(egui::RichText::new("⏹ Pause").color(RED))
}

/// Label and single-line text box on one row
pub fn labeled_field(ui: &mut egui::Ui, label: &str, value: &mut String) -> egui::Response {
    ui.horizontal(|ui| {
        ui.add_sized([160.0, 20.0], egui::Label::new(label));
        ui.text_edit_singleline(value)
    })
    .inner
}

/// Stack toasts in the bottom-right corner
pub fn render_toasts(ctx: &egui::Context, toasts: &[Toast]) {
    if toasts.is_empty() {
        return;
    }
    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for toast in toasts {
                let color = match toast.kind {
                    ToastKind::Info => ui.visuals().text_color(),
                    ToastKind::Error | ToastKind::Alert => RED,
                };
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_max_width(320.0);
                    ui.label(egui::RichText::new(&toast.title).strong().color(color));
                    ui.label(&toast.message);
                });
                ui.add_space(6.0);
            }
        });
}
