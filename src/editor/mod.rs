//! 图像编辑器的抽象
//!
//! 驱动只通过 `Editor` / `Document` 操作模板，
//! 实际的编辑器（bridge进程）和测试用的假实现都实现这两个trait。

mod bridge;
pub mod protocol;

pub use bridge::{BridgeConfig, BridgeDocument, BridgeEditor};
pub use protocol::{ImageFormat, Layer, LayerKind, TextItem};

use crate::error::Result;
use std::path::Path;

/// 可以打开文档的编辑器
pub trait Editor {
    /// 打开文件。每次调用都是一个新的文档
    fn open(&self, path: &Path) -> Result<Box<dyn Document + '_>>;
}

/// 打开中的文档
pub trait Document {
    /// 顶层图层
    fn layers(&self) -> Result<Vec<Layer>>;

    /// 按名称精确查找（同名时取第一个）
    fn find_layer(&self, name: &str) -> Result<Option<Layer>> {
        Ok(self.layers()?.into_iter().find(|layer| layer.name == name))
    }

    fn set_text(&mut self, layer: &Layer, contents: &str, size: f32) -> Result<()>;

    fn export(&mut self, path: &Path, format: ImageFormat) -> Result<()>;

    /// 不保存关闭
    fn close(self: Box<Self>) -> Result<()>;
}
