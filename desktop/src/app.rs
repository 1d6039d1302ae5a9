use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use eframe::egui::{self, Color32, RichText};
use eframe::egui::{FontData, FontDefinitions, FontFamily};
use image::ImageReader;
use shift_roster::config::Config;
use shift_roster::render::{CancelFlag, RenderSummary};

use crate::model::{FormState, RunState};
use crate::worker::{spawn_render, WorkerMessage};

const TIPS: &str = "Tips：在使用本软件之前，请打开Photoshop，注意格式化排班表，修改模板的带班领导名称";
const ROSTER_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];

#[derive(Debug, Clone, Copy)]
enum PickKind {
    Roster,
    Template,
    Folder,
}

struct PreviewData {
    size: [usize; 2],
    pixels: Vec<u8>,
}

pub struct RosterApp {
    form: FormState,
    config: Config,
    state: RunState,
    percent: u8,
    status: String,
    worker_rx: Option<Receiver<WorkerMessage>>,
    cancel: Option<CancelFlag>,
    preview: Option<egui::TextureHandle>,
    preview_rx: Receiver<PreviewData>,
    preview_tx: Sender<PreviewData>,
}

impl RosterApp {
    pub fn new() -> Self {
        let (config, status) = match Config::load() {
            Ok(config) => (config, String::new()),
            Err(err) => {
                tracing::warn!("读取设置失败: {err}");
                (Config::default(), format!("读取设置失败，使用默认设置: {err}"))
            }
        };
        let (preview_tx, preview_rx) = mpsc::channel();
        Self {
            form: FormState::default(),
            config,
            state: RunState::Idle,
            percent: 0,
            status,
            worker_rx: None,
            cancel: None,
            preview: None,
            preview_rx,
            preview_tx,
        }
    }

    fn start(&mut self, ctx: &egui::Context) {
        let settings = match self.form.to_settings(self.config.output_format) {
            Ok(settings) => settings,
            Err(message) => {
                self.status = message;
                return;
            }
        };

        let cancel = CancelFlag::new();
        self.worker_rx = Some(spawn_render(
            self.config.clone(),
            settings,
            cancel.clone(),
            ctx.clone(),
        ));
        self.cancel = Some(cancel);
        self.state = RunState::Running;
        self.percent = 0;
        self.preview = None;
        self.status = "读取排班表...".to_string();
    }

    fn stop(&mut self) {
        if let Some(cancel) = &self.cancel {
            cancel.cancel();
            self.status = "正在停止（当前这一张完成后停止）...".to_string();
        }
    }

    fn poll_messages(&mut self, ctx: &egui::Context) {
        while let Ok(data) = self.preview_rx.try_recv() {
            let image = egui::ColorImage::from_rgba_unmultiplied(data.size, &data.pixels);
            self.preview = Some(ctx.load_texture("preview", image, egui::TextureOptions::default()));
        }

        let Some(rx) = self.worker_rx.take() else {
            return;
        };
        loop {
            match rx.try_recv() {
                Ok(message) => {
                    if self.handle_message(message) {
                        return;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.finish("处理意外中断".to_string());
                    return;
                }
            }
        }
        self.worker_rx = Some(rx);
    }

    /// 处理结束时返回true
    fn handle_message(&mut self, message: WorkerMessage) -> bool {
        match message {
            WorkerMessage::Started { total } => {
                self.status = format!("处理中... 0/{total}");
                false
            }
            WorkerMessage::Rendered { percent, output } => {
                self.percent = percent;
                self.status = format!("处理中... {}", display_name(&output));
                self.request_preview(output);
                false
            }
            WorkerMessage::Finished(summary) => {
                self.finish(summary_message(&summary));
                true
            }
            WorkerMessage::Failed(message) => {
                self.finish(format!("处理失败: {message}"));
                true
            }
        }
    }

    fn finish(&mut self, status: String) {
        self.status = status;
        self.state = RunState::Idle;
        self.worker_rx = None;
        self.cancel = None;
    }

    fn request_preview(&self, path: PathBuf) {
        let sender = self.preview_tx.clone();
        std::thread::spawn(move || {
            let image = ImageReader::open(&path).ok().and_then(|r| r.decode().ok());
            if let Some(image) = image {
                let thumb = image.thumbnail(320, 200);
                let size = [thumb.width() as usize, thumb.height() as usize];
                let pixels = thumb.to_rgba8().into_raw();
                let _ = sender.send(PreviewData { size, pixels });
            }
        });
    }
}

impl eframe::App for RosterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state == RunState::Running {
            ctx.request_repaint();
        }
        self.poll_messages(ctx);

        let running = self.state == RunState::Running;

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Grid::new("paths")
                .num_columns(3)
                .spacing([8.0, 8.0])
                .show(ui, |ui| {
                    path_row(ui, "Excel文件路径：", &mut self.form.roster_path, PickKind::Roster, !running);
                    path_row(ui, "模板文件路径：", &mut self.form.template_path, PickKind::Template, !running);
                    path_row(ui, "输出文件夹路径：", &mut self.form.output_dir, PickKind::Folder, !running);

                    ui.label("进度：");
                    ui.add(
                        egui::ProgressBar::new(f32::from(self.percent) / 100.0)
                            .text(format!("{}%", self.percent)),
                    );
                    ui.end_row();
                });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.add_enabled(!running, egui::Button::new("开始")).clicked() {
                    self.start(ctx);
                }
                if ui.add_enabled(running, egui::Button::new("停止")).clicked() {
                    self.stop();
                }
                if !self.status.is_empty() {
                    ui.label(RichText::new(&self.status).color(Color32::from_gray(170)));
                }
            });

            ui.add_space(4.0);
            ui.label(RichText::new(TIPS).color(Color32::RED));

            if let Some(texture) = &self.preview {
                ui.separator();
                ui.add(egui::Image::new(texture).fit_to_exact_size(texture.size_vec2()));
            }
        });
    }
}

fn path_row(ui: &mut egui::Ui, label: &str, value: &mut String, kind: PickKind, enabled: bool) {
    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
        ui.label(label);
    });
    ui.add_enabled(enabled, egui::TextEdit::singleline(value).desired_width(360.0));
    if ui.add_enabled(enabled, egui::Button::new("浏览")).clicked() {
        if let Some(path) = pick(kind) {
            *value = path.display().to_string();
        }
    }
    ui.end_row();
}

fn pick(kind: PickKind) -> Option<PathBuf> {
    match kind {
        PickKind::Roster => rfd::FileDialog::new()
            .add_filter("Excel", ROSTER_EXTENSIONS)
            .pick_file(),
        PickKind::Template => rfd::FileDialog::new().pick_file(),
        PickKind::Folder => rfd::FileDialog::new().pick_folder(),
    }
}

fn summary_message(summary: &RenderSummary) -> String {
    if summary.cancelled {
        format!("已停止：完成 {}/{}", summary.rendered.len(), summary.total)
    } else if summary.total == 0 {
        "没有可处理的行（白班和夜班都需要「姓名（11位号码）」）".to_string()
    } else {
        format!("完成：共生成 {} 张图片", summary.rendered.len())
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn configure_fonts(ctx: &egui::Context) {
    let mut fonts = FontDefinitions::default();
    let candidates = [
        r"C:\Windows\Fonts\msyh.ttc",
        r"C:\Windows\Fonts\simhei.ttf",
        r"C:\Windows\Fonts\simsun.ttc",
        "/System/Library/Fonts/PingFang.ttc",
        "/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    ];

    for path in candidates {
        if let Ok(data) = std::fs::read(path) {
            fonts.font_data.insert("cjk_fallback".to_string(), FontData::from_owned(data));
            fonts.families
                .entry(FontFamily::Proportional)
                .or_default()
                .insert(0, "cjk_fallback".to_string());
            fonts.families
                .entry(FontFamily::Monospace)
                .or_default()
                .insert(0, "cjk_fallback".to_string());
            ctx.set_fonts(fonts);
            return;
        }
    }
}
