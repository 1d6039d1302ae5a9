//! 错误情况测试
//!
//! 各种错误条件下的错误处理

use shift_roster::error::RosterError;
use shift_roster::sheet;
use std::path::Path;
use tempfile::tempdir;

/// 不存在的排班表
#[test]
fn test_read_nonexistent_roster() {
    let result = sheet::read_roster(Path::new("/nonexistent/path/12345.xlsx"));
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, RosterError::FileNotFound(_)));
}

/// 扩展名不支持的文件
#[test]
fn test_read_unsupported_extension() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("roster.txt");
    std::fs::write(&path, "44927,张三,李四").unwrap();

    let result = sheet::read_roster(&path);
    assert!(matches!(result, Err(RosterError::Sheet(_))));
}

/// RosterError的Display实现
#[test]
fn test_error_display() {
    let errors = vec![
        RosterError::Config("测试设置错误".to_string()),
        RosterError::FileNotFound("模板.psd".to_string()),
        RosterError::Sheet("损坏".to_string()),
        RosterError::EmptyWorkbook("排班表.xlsx".to_string()),
        RosterError::BridgeNotFound("photoshop-bridge".to_string()),
        RosterError::BridgeNotRunning,
        RosterError::Editor("Photoshop没有响应".to_string()),
        RosterError::UnexpectedResponse,
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "错误信息为空: {:?}", err);
    }
}

/// 缺少图层的提示
#[test]
fn test_template_layer_missing_message() {
    let err = RosterError::TemplateLayerMissing {
        missing: vec!["夜班".to_string()],
    };
    let display = format!("{}", err);

    assert!(display.contains("未找到白班或夜班图层，请检查Photoshop模板"));
    assert!(display.contains("夜班"));
}

/// Debug实现
#[test]
fn test_error_debug() {
    let err = RosterError::Config("测试".to_string());
    let debug = format!("{:?}", err);

    assert!(debug.contains("Config"));
    assert!(debug.contains("测试"));
}

/// IO错误的转换
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: RosterError = io_err.into();

    assert!(matches!(err, RosterError::Io(_)));
    let display = format!("{}", err);
    assert!(display.contains("IO"));
}

/// JSON错误的转换
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: RosterError = json_err.into();

    assert!(matches!(err, RosterError::JsonParse(_)));
}

/// common::Error的转换
#[test]
fn test_common_error_conversion() {
    let common_err = shift_roster::common::Error::DateOutOfRange(-1);
    let err: RosterError = common_err.into();

    assert!(matches!(err, RosterError::Roster(_)));
    assert!(format!("{}", err).contains("日期序号超出范围"));
}
