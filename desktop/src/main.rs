mod app;
mod model;
mod worker;

use app::{configure_fonts, RosterApp};

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shift_roster=info,shift_roster_desktop=info".into()),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([680.0, 460.0]),
        ..Default::default()
    };
    eframe::run_native(
        "排班表处理",
        options,
        Box::new(|cc| {
            configure_fonts(&cc.egui_ctx);
            Box::new(RosterApp::new())
        }),
    )
}
