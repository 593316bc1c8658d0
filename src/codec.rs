use crate::error::Result;
use base64::{engine::general_purpose, Engine as _};

/// 標準アルファベット（パディングあり）でBase64エンコード
pub fn base64_encode(data: &[u8]) -> String {
    general_purpose::STANDARD.encode(data)
}

pub fn base64_decode(encoded: &str) -> Result<Vec<u8>> {
    let bytes = general_purpose::STANDARD.decode(encoded.trim())?;
    log::debug!("Base64デコード完了: {} バイト", bytes.len());
    Ok(bytes)
}

/// Base64をデコードしてUTF-8文字列として返す
pub fn decode_to_string(encoded: &str) -> Result<String> {
    let bytes = base64_decode(encoded)?;
    Ok(String::from_utf8(bytes)?)
}
