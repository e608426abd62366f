// Master Chat view

use crate::backend::Backend;
use crate::state::chat::SUGGESTIONS;
use crate::state::{AppState, ToastKind};
use eframe::egui;
use std::time::Instant;
use warehouse_studio_backend::chat::{ChatAction, ChatMessage, MessageKind};

/// Render the chat transcript and input box
pub fn render(ui: &mut egui::Ui, state: &mut AppState, backend: &Backend) {
    ui.heading("Master Chat");
    ui.label(egui::RichText::new("Ask any agent about safety, labour, docks, RFPs or compliance").weak());
    ui.add_space(8.0);
    ui.separator();

    egui::TopBottomPanel::bottom("chat_input")
        .show_inside(ui, |ui| render_input(ui, state, backend));

    egui::CentralPanel::default().show_inside(ui, |ui| {
        let now = Instant::now();
        let active = state.chat.active_step(now);
        let mut clicked: Option<ChatAction> = None;

        egui::ScrollArea::vertical()
            .id_source("chat_scroll")
            .auto_shrink([false; 2])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for message in &state.chat.messages {
                    match message.kind {
                        MessageKind::User => render_user(ui, message),
                        MessageKind::Agent => {
                            if let Some(action) = render_agent(ui, message) {
                                clicked = Some(action);
                            }
                        }
                        MessageKind::Loading => render_loading(ui, message, active),
                    }
                    ui.add_space(8.0);
                }
            });

        if let Some(action) = clicked {
            state.push_toast(ToastKind::Info, format!("{} initiated", action.label), action.description);
        }
    });
}

fn render_input(ui: &mut egui::Ui, state: &mut AppState, backend: &Backend) {
    ui.add_space(8.0);
    let pending = state.chat.is_pending();
    let mut send = false;

    ui.horizontal(|ui| {
        let input = ui.add_enabled(
            !pending,
            egui::TextEdit::singleline(&mut state.chat.input)
                .hint_text("Ask the Master Agent...")
                .desired_width(ui.available_width() - 80.0),
        );
        if input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            send = true;
        }
        let can_send = !pending && !state.chat.input.trim().is_empty();
        if ui.add_enabled(can_send, egui::Button::new("Send")).clicked() {
            send = true;
        }
    });

    if state.chat.messages.is_empty() {
        ui.horizontal_wrapped(|ui| {
            for (label, prompt) in SUGGESTIONS {
                if ui.small_button(label).clicked() {
                    state.chat.input = prompt.to_string();
                }
            }
        });
    }

    if send {
        let text = state.chat.input.clone();
        if let Some(message) = state.chat.begin(&text) {
            backend.send_chat(message, state.view_token());
        }
    }
    ui.add_space(8.0);
}

fn render_user(ui: &mut egui::Ui, message: &ChatMessage) {
    ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().selection.bg_fill)
            .show(ui, |ui| {
                ui.set_max_width(480.0);
                ui.label(&message.content);
            });
        ui.label(egui::RichText::new(message.timestamp.format("%H:%M").to_string()).weak().small());
    });
}

/// Returns the action the user clicked, if any
fn render_agent(ui: &mut egui::Ui, message: &ChatMessage) -> Option<ChatAction> {
    let mut clicked = None;
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_max_width(640.0);
        if let Some(handled_by) = &message.handled_by {
            ui.label(egui::RichText::new(handled_by).strong());
        }
        for line in message.content.lines() {
            if let Some(heading) = line.strip_prefix("**").and_then(|l| l.strip_suffix("**")) {
                ui.label(egui::RichText::new(heading).strong());
            } else {
                ui.label(line);
            }
        }

        let actions = message.actions.as_deref().unwrap_or_default();
        if !actions.is_empty() {
            ui.separator();
            ui.label(egui::RichText::new("Available Actions:").weak());
            ui.horizontal_wrapped(|ui| {
                for action in actions {
                    if ui.button(&action.label).on_hover_text(&action.description).clicked() {
                        clicked = Some(action.clone());
                    }
                }
            });
        }
    });
    ui.label(egui::RichText::new(message.timestamp.format("%H:%M").to_string()).weak().small());
    clicked
}

fn render_loading(ui: &mut egui::Ui, message: &ChatMessage, active: Option<usize>) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(egui::RichText::new("AI Agent is processing your request...").weak());
        });
        for (i, step) in message.loading_steps.iter().flatten().enumerate() {
            let text = if step.completed {
                egui::RichText::new(format!("✔ {}", step.text))
            } else if active.is_some_and(|a| i <= a) {
                egui::RichText::new(format!("• {}", step.text))
            } else {
                egui::RichText::new(format!("• {}", step.text)).weak()
            };
            ui.label(text);
        }
    });
}
