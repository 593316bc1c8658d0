//! JSON整形・1行化・修復

mod lenient;

use crate::error::{Result, ToolError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 出力レイアウト
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JsonLayout {
    /// 1行
    #[default]
    Compact,
    /// インデント2
    Pretty,
}

impl JsonLayout {
    fn render(self, value: &Value) -> Result<String> {
        let text = match self {
            JsonLayout::Compact => serde_json::to_string(value)?,
            JsonLayout::Pretty => serde_json::to_string_pretty(value)?,
        };
        Ok(text)
    }
}

/// JSONを2スペースインデントで整形（キーはソートされる）
pub fn beautify(input: &str) -> Result<String> {
    let value: Value = serde_json::from_str(input)?;
    JsonLayout::Pretty.render(&value)
}

/// JSONを1行にまとめる
pub fn minify(input: &str) -> Result<String> {
    let value: Value = serde_json::from_str(input)?;
    JsonLayout::Compact.render(&value)
}

/// 壊れたJSONをできる限り修復して1行のJSONにする
pub fn repair(input: &str) -> Result<String> {
    repair_with_layout(input, JsonLayout::Compact)
}

pub fn repair_with_layout(input: &str, layout: JsonLayout) -> Result<String> {
    if input.trim().is_empty() {
        return Err(ToolError::EmptyInput);
    }

    // 正しいJSONならそのまま使う
    let value = match serde_json::from_str::<Value>(input) {
        Ok(value) => value,
        Err(e) => {
            log::debug!("JSONの解析に失敗したため修復を試みます: {e}");
            lenient::repair_value(input)?
        }
    };

    layout.render(&value)
}
