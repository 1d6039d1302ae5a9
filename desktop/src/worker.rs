use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};

use anyhow::{Context, Result};
use eframe::egui;
use shift_roster::config::Config;
use shift_roster::editor::BridgeEditor;
use shift_roster::render::{self, CancelFlag, RenderEvent, RenderSettings, RenderSummary};

pub enum WorkerMessage {
    Started { total: usize },
    Rendered { percent: u8, output: PathBuf },
    Finished(RenderSummary),
    Failed(String),
}

/// 在后台线程执行出图，进度通过channel通知界面
pub fn spawn_render(
    config: Config,
    settings: RenderSettings,
    cancel: CancelFlag,
    ctx: egui::Context,
) -> Receiver<WorkerMessage> {
    let (tx, rx) = mpsc::channel();

    std::thread::spawn(move || {
        let message = match run(&config, &settings, &cancel, &tx, &ctx) {
            Ok(summary) => WorkerMessage::Finished(summary),
            Err(err) => {
                tracing::error!("出图失败: {err:#}");
                WorkerMessage::Failed(format!("{err:#}"))
            }
        };
        let _ = tx.send(message);
        ctx.request_repaint();
    });

    rx
}

fn run(
    config: &Config,
    settings: &RenderSettings,
    cancel: &CancelFlag,
    tx: &Sender<WorkerMessage>,
    ctx: &egui::Context,
) -> Result<RenderSummary> {
    let jobs = render::plan(settings)?;
    if jobs.is_empty() {
        return Ok(RenderSummary::default());
    }

    let editor = BridgeEditor::start(&config.bridge).context("无法连接图像编辑器")?;
    let result = render::render_jobs(&editor, &jobs, settings, cancel, |event| {
        let message = match event {
            RenderEvent::Started { total } => WorkerMessage::Started { total },
            RenderEvent::Rendered {
                output, progress, ..
            } => WorkerMessage::Rendered {
                percent: progress.percent(),
                output,
            },
        };
        let _ = tx.send(message);
        ctx.request_repaint();
    });
    let shutdown = editor.shutdown();

    let summary = result?;
    shutdown?;
    Ok(summary)
}
