// Connectors view

use crate::backend::Backend;
use crate::state::AppState;
use crate::ui::components::{connector_badge, primary_button};
use eframe::egui;
use warehouse_studio_backend::state::ConnectorStatus;

/// Render the connector catalogue
pub fn render(ui: &mut egui::Ui, state: &mut AppState, backend: &Backend) {
    ui.heading("Connectors");
    ui.add_space(8.0);
    ui.separator();

    egui::ScrollArea::vertical()
        .id_source("connector_scroll")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            egui::Grid::new("connectors")
                .num_columns(6)
                .striped(true)
                .spacing([16.0, 8.0])
                .show(ui, |ui| {
                    for header in ["Name", "Type", "Status", "Last Sync", "Throughput", ""] {
                        ui.label(egui::RichText::new(header).strong());
                    }
                    ui.end_row();

                    for connector in &state.store.connectors {
                        ui.label(&connector.name);
                        ui.label(egui::RichText::new(&connector.connector_type).weak());
                        connector_badge(ui, connector.status);
                        ui.label(&connector.last_sync);
                        ui.label(format!("{} · {} endpoints", connector.data_flow, connector.endpoints));
                        if connector.status == ConnectorStatus::Connected {
                            ui.label("");
                        } else if primary_button(ui, "Fix").clicked() {
                            backend.fix_connector(connector.id.clone(), state.view_token());
                        }
                        ui.end_row();
                    }
                });
        });
}
