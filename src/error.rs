use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("设置错误: {0}")]
    Config(String),

    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("Excel读取错误: {0}")]
    Sheet(String),

    #[error("Excel文件中没有工作表: {0}")]
    EmptyWorkbook(String),

    #[error("排班表错误: {0}")]
    Roster(#[from] shift_roster_common::Error),

    #[error("未找到白班或夜班图层，请检查Photoshop模板（缺少: {}）", .missing.join("、"))]
    TemplateLayerMissing { missing: Vec<String> },

    #[error("找不到bridge程序: {0}")]
    BridgeNotFound(String),

    #[error("bridge进程启动失败: {0}")]
    BridgeSpawn(std::io::Error),

    #[error("bridge进程未运行")]
    BridgeNotRunning,

    #[error("bridge通信错误: {0}")]
    BridgeIo(String),

    #[error("编辑器返回错误: {0}")]
    Editor(String),

    #[error("bridge返回了意外的响应")]
    UnexpectedResponse,

    #[error("JSON解析错误: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RosterError>;
