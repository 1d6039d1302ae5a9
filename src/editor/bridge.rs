//! bridge子进程的管理和JSON通信
//!
//! bridge是驱动宿主编辑器（Photoshop等）的外部程序，
//! 协议见 `protocol` 模块。

use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::protocol::{Command, ImageFormat, Layer, Request, Response, ResponseData, ResponseResult};
use super::{Document, Editor};
use crate::error::{Result, RosterError};

const BRIDGE_PROGRAM: &str = "photoshop-bridge";

/// bridge进程的启动设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// bridge程序的路径
    pub program: PathBuf,
    /// 额外的命令行参数
    pub args: Vec<String>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            program: find_bridge_program(),
            args: Vec::new(),
        }
    }
}

/// bridge进程的连接
pub struct BridgeEditor {
    child: Option<Mutex<Child>>,
    stdin: Mutex<Box<dyn Write + Send>>,
    stdout: Mutex<Box<dyn BufRead + Send>>,
    next_id: AtomicU64,
}

impl BridgeEditor {
    /// 启动bridge进程并连接编辑器
    pub fn start(config: &BridgeConfig) -> Result<Self> {
        info!(program = %config.program.display(), "启动bridge进程");

        let mut cmd = std::process::Command::new(&config.program);
        cmd.args(&config.args);
        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::inherit());

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RosterError::BridgeNotFound(config.program.display().to_string())
            } else {
                RosterError::BridgeSpawn(e)
            }
        })?;

        let stdin = child.stdin.take().ok_or(RosterError::BridgeNotRunning)?;
        let stdout = child.stdout.take().ok_or(RosterError::BridgeNotRunning)?;

        let mut editor = Self::with_streams(BufReader::new(stdout), stdin);
        editor.child = Some(Mutex::new(child));

        editor.send_command(Command::Init)?;
        Ok(editor)
    }

    /// 使用现成的输入输出流连接（不发送Init）
    pub fn with_streams(
        reader: impl BufRead + Send + 'static,
        writer: impl Write + Send + 'static,
    ) -> Self {
        Self {
            child: None,
            stdin: Mutex::new(Box::new(writer)),
            stdout: Mutex::new(Box::new(reader)),
            next_id: AtomicU64::new(1),
        }
    }

    /// 发送命令并等待响应
    fn send_command(&self, command: Command) -> Result<Option<ResponseData>> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = Request { id, command };
        let json = serde_json::to_string(&request)?;
        debug!(id, request = %json, "bridge请求");

        {
            let mut stdin = lock(&self.stdin)?;
            writeln!(stdin, "{json}").map_err(|e| RosterError::BridgeIo(e.to_string()))?;
            stdin
                .flush()
                .map_err(|e| RosterError::BridgeIo(e.to_string()))?;
        }

        let response: Response = {
            let mut stdout = lock(&self.stdout)?;
            let mut line = String::new();
            stdout
                .read_line(&mut line)
                .map_err(|e| RosterError::BridgeIo(e.to_string()))?;

            if line.trim().is_empty() {
                return Err(RosterError::BridgeNotRunning);
            }

            serde_json::from_str(&line)?
        };

        if response.id != id {
            warn!(expected = id, actual = response.id, "bridge响应ID不一致");
            return Err(RosterError::UnexpectedResponse);
        }

        match response.result {
            ResponseResult::Ok { data } => Ok(data),
            ResponseResult::Error { message } => Err(RosterError::Editor(message)),
        }
    }

    /// 关闭所有文档并结束bridge进程
    pub fn shutdown(self) -> Result<()> {
        if let Err(err) = self.send_command(Command::Shutdown) {
            warn!(error = %err, "bridge结束命令失败");
        }
        if let Some(child) = &self.child {
            let status = lock(child)?.wait()?;
            info!(%status, "bridge进程已结束");
        }
        Ok(())
    }
}

impl Drop for BridgeEditor {
    fn drop(&mut self) {
        // 没有正常shutdown时不留下子进程
        if let Some(child) = &self.child {
            if let Ok(mut child) = child.lock() {
                if let Ok(None) = child.try_wait() {
                    let _ = child.kill();
                    let _ = child.wait();
                }
            }
        }
    }
}

impl Editor for BridgeEditor {
    fn open(&self, path: &Path) -> Result<Box<dyn Document + '_>> {
        let data = self.send_command(Command::OpenDocument {
            path: absolute_path(path)?,
        })?;
        match data {
            Some(ResponseData::DocumentHandle { document }) => Ok(Box::new(BridgeDocument {
                bridge: self,
                handle: document,
            })),
            _ => Err(RosterError::UnexpectedResponse),
        }
    }
}

/// bridge中打开的文档
pub struct BridgeDocument<'a> {
    bridge: &'a BridgeEditor,
    handle: u64,
}

impl BridgeDocument<'_> {
    pub fn handle(&self) -> u64 {
        self.handle
    }
}

impl Document for BridgeDocument<'_> {
    fn layers(&self) -> Result<Vec<Layer>> {
        let data = self.bridge.send_command(Command::ListLayers {
            document: self.handle,
        })?;
        match data {
            Some(ResponseData::Layers { layers }) => Ok(layers),
            _ => Err(RosterError::UnexpectedResponse),
        }
    }

    fn set_text(&mut self, layer: &Layer, contents: &str, size: f32) -> Result<()> {
        self.bridge.send_command(Command::SetText {
            document: self.handle,
            layer: layer.index,
            contents: contents.to_string(),
            size,
        })?;
        Ok(())
    }

    fn export(&mut self, path: &Path, format: ImageFormat) -> Result<()> {
        self.bridge.send_command(Command::Export {
            document: self.handle,
            path: absolute_path(path)?,
            format,
        })?;
        Ok(())
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.bridge.send_command(Command::CloseDocument {
            document: self.handle,
        })?;
        Ok(())
    }
}

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| RosterError::BridgeIo("bridge连接的锁已失效".into()))
}

/// bridge在别的工作目录运行，路径一律转成绝对路径
fn absolute_path(path: &Path) -> Result<String> {
    let abs = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(abs.display().to_string())
}

/// 先找可执行文件旁边的bridge，找不到就交给PATH
fn find_bridge_program() -> PathBuf {
    let file_name = format!("{BRIDGE_PROGRAM}{}", std::env::consts::EXE_SUFFIX);
    if let Ok(mut exe) = std::env::current_exe() {
        exe.pop();
        let candidate = exe.join(&file_name);
        if candidate.exists() {
            return candidate;
        }
    }
    PathBuf::from(BRIDGE_PROGRAM)
}
