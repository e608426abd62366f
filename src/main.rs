// Warehouse Studio - Main Entry Point
// Native dashboard over the mock agent API, gate log and ROI calculators

mod backend;
mod state;
mod ui;

use backend::Backend;
use eframe::egui;
use state::AppState;
use std::time::{Duration, Instant};
use tracing::info;
use ui::render_app_layout;
use warehouse_studio_backend::config::Config;
use warehouse_studio_backend::gate_log::GateLog;
use warehouse_studio_backend::state::StoreState;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    let app = StudioApp::new(&config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Warehouse Studio")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Warehouse Studio",
        options,
        Box::new(move |cc| {
            let mut app = app;
            app.start(cc.egui_ctx.clone());
            Box::new(app)
        }),
    )
    .map_err(|e| anyhow::anyhow!("GUI exited with error: {e}"))
}

/// Main application struct
/// Owns the UI state and the background runtime
struct StudioApp {
    state: AppState,
    backend: Backend,
}

impl StudioApp {
    fn new(config: &Config) -> std::io::Result<Self> {
        let backend = Backend::new(config)?;
        let state = AppState::new(
            StoreState::seeded(),
            GateLog::with_sample_entries(config.gate.yard_id.clone()),
        );
        Ok(Self { state, backend })
    }

    /// Hook up repaints and fetch fresh lists
    fn start(&mut self, ctx: egui::Context) {
        self.backend.attach(ctx);
        self.backend.load_all(self.state.view_token());
    }

    /// Fold finished background work and the latest store snapshot into state
    fn sync(&mut self, now: Instant) {
        for outcome in self.backend.drain() {
            self.state.apply(outcome);
        }
        if let Some(snapshot) = self.backend.changed_snapshot() {
            self.state.store = snapshot;
        }
        self.state.chat.tick(now);
        self.state.expire_toasts(now);
    }
}

impl eframe::App for StudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync(Instant::now());
        render_app_layout(ctx, &mut self.state, &self.backend);

        // Keep animating while something is time-driven
        if self.state.chat.is_pending() || !self.state.toasts.is_empty() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
