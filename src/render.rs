//! 出图驱动
//!
//! 每个出图任务:
//! 1. 重新打开模板（模板本身不会被修改）
//! 2. 找到「白班」「夜班」图层，缺少任何一个则中止整个处理
//! 3. 文字图层写入姓名，字号48
//! 4. 导出到 `<输出文件夹>/<YYYYMMDD>.<扩展名>`
//! 5. 关闭文档

use crate::editor::{Document, Editor, ImageFormat, Layer, LayerKind};
use crate::error::{Result, RosterError};
use crate::sheet::read_roster;
use shift_roster_common::{plan_jobs, Progress, RenderJob};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

pub const DAY_SHIFT_LAYER: &str = "白班";
pub const NIGHT_SHIFT_LAYER: &str = "夜班";
pub const SHIFT_FONT_SIZE: f32 = 48.0;

/// 一次处理需要的路径和导出格式
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub roster_path: PathBuf,
    pub template_path: PathBuf,
    pub output_dir: PathBuf,
    pub format: ImageFormat,
}

/// 中止请求（在两个任务之间检查）
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// 处理过程中发出的事件
#[derive(Debug, Clone)]
pub enum RenderEvent {
    Started { total: usize },
    Rendered {
        job: RenderJob,
        output: PathBuf,
        progress: Progress,
    },
}

/// 处理结果
#[derive(Debug, Clone, Default)]
pub struct RenderSummary {
    pub total: usize,
    pub rendered: Vec<PathBuf>,
    pub cancelled: bool,
}

/// 输出文件路径（同一日期总是同一个文件名）
pub fn output_path_for(output_dir: &Path, job: &RenderJob, format: ImageFormat) -> PathBuf {
    output_dir.join(format!("{}.{}", job.file_stem(), format.extension()))
}

/// 读取排班表，生成出图任务（也就是进度条的分母）
///
/// 有任务时也确认模板存在，启动编辑器之前就能报错。
pub fn plan(settings: &RenderSettings) -> Result<Vec<RenderJob>> {
    let rows = read_roster(&settings.roster_path)?;
    let jobs = plan_jobs(&rows)?;
    info!(rows = rows.len(), jobs = jobs.len(), "出图任务已生成");
    if !jobs.is_empty() {
        ensure_template(settings)?;
    }
    Ok(jobs)
}

fn ensure_template(settings: &RenderSettings) -> Result<()> {
    if settings.template_path.exists() {
        Ok(())
    } else {
        Err(RosterError::FileNotFound(
            settings.template_path.display().to_string(),
        ))
    }
}

/// 读取排班表并全部出图
pub fn run(
    editor: &dyn Editor,
    settings: &RenderSettings,
    cancel: &CancelFlag,
    on_event: impl FnMut(RenderEvent),
) -> Result<RenderSummary> {
    let jobs = plan(settings)?;
    render_jobs(editor, &jobs, settings, cancel, on_event)
}

/// 按顺序处理出图任务
pub fn render_jobs(
    editor: &dyn Editor,
    jobs: &[RenderJob],
    settings: &RenderSettings,
    cancel: &CancelFlag,
    mut on_event: impl FnMut(RenderEvent),
) -> Result<RenderSummary> {
    let mut progress = Progress::new(jobs.len());
    let mut summary = RenderSummary {
        total: jobs.len(),
        ..Default::default()
    };
    on_event(RenderEvent::Started { total: jobs.len() });

    if jobs.is_empty() {
        info!("没有有效的行");
        return Ok(summary);
    }

    ensure_template(settings)?;

    for job in jobs {
        if cancel.is_cancelled() {
            info!(
                done = progress.processed(),
                total = progress.total(),
                "处理已中止"
            );
            summary.cancelled = true;
            return Ok(summary);
        }

        let output = render_job(editor, job, settings)?;
        progress.advance();
        info!(
            row = job.row,
            day = %job.day_shift,
            night = %job.night_shift,
            output = %output.display(),
            percent = progress.percent(),
            "出图完成"
        );
        summary.rendered.push(output.clone());
        on_event(RenderEvent::Rendered {
            job: job.clone(),
            output,
            progress,
        });
    }

    Ok(summary)
}

/// 一个任务: 打开 → 写入 → 导出 → 关闭
///
/// 出错时也会关闭文档，先发生的错误优先。
fn render_job(editor: &dyn Editor, job: &RenderJob, settings: &RenderSettings) -> Result<PathBuf> {
    let mut document = editor.open(&settings.template_path)?;
    let outcome = fill_and_export(document.as_mut(), job, settings);
    let closed = document.close();
    let output = outcome?;
    closed?;
    Ok(output)
}

fn fill_and_export(
    document: &mut dyn Document,
    job: &RenderJob,
    settings: &RenderSettings,
) -> Result<PathBuf> {
    let layers = document.layers()?;
    let (day_layer, night_layer) = locate_shift_layers(&layers)?;

    write_name(document, day_layer, &job.day_shift)?;
    write_name(document, night_layer, &job.night_shift)?;

    std::fs::create_dir_all(&settings.output_dir)?;
    let output = output_path_for(&settings.output_dir, job, settings.format);
    document.export(&output, settings.format)?;
    Ok(output)
}

/// 白班・夜班图层（同名时取第一个）
pub fn locate_shift_layers(layers: &[Layer]) -> Result<(&Layer, &Layer)> {
    let find = |name: &str| layers.iter().find(|layer| layer.name == name);
    match (find(DAY_SHIFT_LAYER), find(NIGHT_SHIFT_LAYER)) {
        (Some(day), Some(night)) => Ok((day, night)),
        (day, night) => {
            let mut missing = Vec::new();
            if day.is_none() {
                missing.push(DAY_SHIFT_LAYER.to_string());
            }
            if night.is_none() {
                missing.push(NIGHT_SHIFT_LAYER.to_string());
            }
            Err(RosterError::TemplateLayerMissing { missing })
        }
    }
}

/// 文字图层以外不做任何修改
fn write_name(document: &mut dyn Document, layer: &Layer, name: &str) -> Result<()> {
    if layer.kind != LayerKind::Text {
        debug!(layer = %layer.name, "不是文字图层，跳过");
        return Ok(());
    }
    document.set_text(layer, name, SHIFT_FONT_SIZE)
}
