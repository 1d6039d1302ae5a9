//! bridge进程之间的通信协议
//!
//! stdin/stdout 上每行一个JSON对象。
//!
//! ```text
//! → {"id":1,"cmd":"OpenDocument","params":{"path":"C:\\模板.psd"}}
//! ← {"id":1,"status":"ok","data":{"document":7}}
//! ```

use serde::{Deserialize, Serialize};

/// 发给bridge的请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// 请求ID（单调递增，用于对应响应）
    pub id: u64,
    #[serde(flatten)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", content = "params")]
pub enum Command {
    /// 连接宿主编辑器
    Init,

    /// 打开文件，返回文档句柄
    OpenDocument { path: String },

    /// 列出文档的顶层图层
    ListLayers { document: u64 },

    /// 改写文字图层的内容和字号
    SetText {
        document: u64,
        layer: u32,
        contents: String,
        size: f32,
    },

    /// 把当前文档导出为图片
    Export {
        document: u64,
        path: String,
        format: ImageFormat,
    },

    /// 不保存直接关闭文档
    CloseDocument { document: u64 },

    /// 关闭所有文档并结束bridge
    Shutdown,
}

/// 导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    /// quality: 1〜100
    Jpeg { quality: u8 },
}

impl ImageFormat {
    /// 输出文件的扩展名
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg { .. } => "jpg",
        }
    }
}

/// 图层种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Text,
    #[serde(other)]
    Other,
}

/// 文字图层的内容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    pub contents: String,
    pub size: f32,
}

/// 图层信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// 顶层图层中的位置
    pub index: u32,
    pub name: String,
    pub kind: LayerKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextItem>,
}

/// bridge的响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub id: u64,
    #[serde(flatten)]
    pub result: ResponseResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum ResponseResult {
    #[serde(rename = "ok")]
    Ok {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<ResponseData>,
    },
    #[serde(rename = "error")]
    Error { message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseData {
    DocumentHandle { document: u64 },
    Layers { layers: Vec<Layer> },
}
