use std::path::PathBuf;

use shift_roster::editor::ImageFormat;
use shift_roster::render::RenderSettings;

#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub roster_path: String,
    pub template_path: String,
    pub output_dir: String,
}

impl FormState {
    /// 输入框的内容 → 处理设置。空白的项目返回提示文字
    pub fn to_settings(&self, format: ImageFormat) -> Result<RenderSettings, String> {
        let roster_path = non_empty(&self.roster_path, "请选择Excel文件")?;
        let template_path = non_empty(&self.template_path, "请选择模板文件")?;
        let output_dir = non_empty(&self.output_dir, "请选择输出文件夹")?;
        Ok(RenderSettings {
            roster_path,
            template_path,
            output_dir,
            format,
        })
    }
}

fn non_empty(value: &str, message: &str) -> Result<PathBuf, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(message.to_string())
    } else {
        Ok(PathBuf::from(trimmed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
}
