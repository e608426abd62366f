// ROI calculator view

use crate::state::{sanitize, AppState};
use crate::ui::components::primary_button;
use eframe::egui;
use warehouse_studio_backend::roi::FieldKind;

fn numeric_field(ui: &mut egui::Ui, label: &str, value: &mut String, kind: FieldKind) -> bool {
    ui.horizontal(|ui| {
        ui.add_sized([180.0, 20.0], egui::Label::new(label));
        let response = ui.text_edit_singleline(value);
        if response.changed() {
            *value = sanitize(kind, value);
        }
        response.changed()
    })
    .inner
}

fn metric(ui: &mut egui::Ui, label: &str, value: String) {
    ui.label(egui::RichText::new(label).weak());
    ui.label(egui::RichText::new(value).strong());
    ui.end_row();
}

fn dollars(amount: f64) -> String {
    let whole = amount.round() as i64;
    let digits = whole.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if whole < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Render both calculators side by side
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("ROI Calculators");
    ui.add_space(8.0);
    ui.separator();

    ui.columns(2, |cols| {
        render_amr(&mut cols[0], state);
        render_wms(&mut cols[1], state);
    });
}

fn render_amr(ui: &mut egui::Ui, state: &mut AppState) {
    let form = &mut state.amr_form;
    ui.label(egui::RichText::new("Locus AMR").heading().size(16.0));
    let mut changed = false;
    changed |= numeric_field(ui, "Daily order volume", &mut form.daily_order_volume, FieldKind::Integer);
    changed |= numeric_field(ui, "Current pick rate (/hr)", &mut form.current_pick_rate, FieldKind::Integer);
    changed |= numeric_field(ui, "Warehouse size (sq ft)", &mut form.warehouse_size, FieldKind::Integer);
    changed |= numeric_field(ui, "Current headcount", &mut form.current_headcount, FieldKind::Integer);
    if changed {
        form.result = None;
    }

    if ui
        .add_enabled(form.is_complete(), egui::Button::new("Calculate ROI"))
        .clicked()
    {
        form.calculate();
    }

    match &form.result {
        Some(Ok(estimate)) => {
            egui::Grid::new("amr_results").num_columns(2).show(ui, |ui| {
                metric(ui, "Robots needed", estimate.robots_needed.to_string());
                metric(ui, "New pick rate", format!("{}/hr (+{}%)", estimate.new_pick_rate, estimate.pick_rate_increase));
                metric(ui, "Productivity gain", format!("{}%", estimate.productivity_gain));
                metric(ui, "Annual labour savings", dollars(estimate.labor_savings as f64));
                metric(ui, "Reduced labour needs", format!("{} FTE", estimate.reduced_labor_needs));
                metric(ui, "Total investment", dollars(estimate.total_investment as f64));
                metric(ui, "Payback period", format!("{} months", estimate.payback_months));
            });
        }
        Some(Err(error)) => {
            ui.colored_label(egui::Color32::from_rgb(220, 0, 0), error);
        }
        None => {}
    }
}

fn render_wms(ui: &mut egui::Ui, state: &mut AppState) {
    let form = &mut state.wms_form;
    ui.label(egui::RichText::new("Logiwa WMS").heading().size(16.0));
    let mut changed = false;
    changed |= numeric_field(ui, "Daily order volume", &mut form.daily_order_volume, FieldKind::Integer);
    changed |= numeric_field(ui, "Current error rate (%)", &mut form.current_error_rate, FieldKind::Decimal);
    changed |= numeric_field(ui, "Number of users", &mut form.number_of_users, FieldKind::Integer);
    changed |= numeric_field(ui, "Avg labour cost ($/yr)", &mut form.avg_labor_cost, FieldKind::Decimal);
    if changed {
        form.result = None;
    }

    if primary_button(ui, "Calculate ROI").clicked() && form.is_complete() {
        form.calculate();
    }

    match &form.result {
        Some(Ok(estimate)) => {
            egui::Grid::new("wms_results").num_columns(2).show(ui, |ui| {
                metric(ui, "Productivity increase", format!("{}%", estimate.productivity_increase));
                metric(
                    ui,
                    "Error rate",
                    format!("{:.2}% → {:.2}%", estimate.new_error_rate + estimate.error_reduction, estimate.new_error_rate),
                );
                metric(ui, "Errors avoided / yr", estimate.error_reduction_count.to_string());
                metric(ui, "Labour savings", dollars(estimate.labor_savings as f64));
                metric(ui, "Licence cost", dollars(estimate.total_license_cost));
                metric(ui, "ROI", format!("{}%", estimate.roi));
                metric(ui, "Hours saved / week", estimate.time_savings_hours.to_string());
                metric(ui, "Total annual savings", dollars(estimate.total_annual_savings));
                metric(ui, "Payback period", format!("{} months", estimate.payback_months));
            });
        }
        Some(Err(error)) => {
            ui.colored_label(egui::Color32::from_rgb(220, 0, 0), error);
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dollars() {
        assert_eq!(dollars(0.0), "$0");
        assert_eq!(dollars(999.4), "$999");
        assert_eq!(dollars(540_000.0), "$540,000");
        assert_eq!(dollars(1_234_567.0), "$1,234,567");
    }
}
