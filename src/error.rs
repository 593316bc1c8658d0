use thiserror::Error;

/// ライブラリ全体で使うエラー型
#[derive(Debug, Error)]
pub enum ToolError {
    /// OSの乱数源が使えない（致命的、リトライしない）
    #[error("安全な乱数源が利用できません: {0}")]
    EntropyUnavailable(String),

    #[error("キー長は1以上である必要があります（指定値: {0}）")]
    InvalidLength(usize),

    #[error("文字プールが空です。少なくとも1つの文字種を有効にしてください")]
    EmptyPool,

    #[error("強度 \"{0}\" は存在しません")]
    UnknownStrength(String),

    #[error("入力が空です")]
    EmptyInput,

    #[error("Base64デコードに失敗: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("UTF-8変換に失敗しました: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("bcryptのコストは4〜31の範囲で指定してください（指定値: {0}）")]
    InvalidCost(u32),

    #[error("bcrypt処理に失敗: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("JSONの解析に失敗: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSONの入れ子が深すぎます（上限: {0}）")]
    NestingTooDeep(usize),

    #[error("未対応のRSAキー長です: {0} bit（512, 1024, 2048, 4096のいずれか）")]
    UnsupportedKeySize(u32),

    #[error("RSA処理に失敗: {0}")]
    Rsa(#[from] rsa::Error),

    #[error("PEMブロックのデコードに失敗: {0}")]
    Pem(String),
}

pub type Result<T> = std::result::Result<T, ToolError>;
