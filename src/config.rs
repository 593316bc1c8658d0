use crate::json::JsonLayout;
use crate::password::BatchPolicy;
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// 設定ファイルの構造
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 設定ファイルのバージョン
    pub version: String,
    /// 詳細出力をデフォルトで有効にするか
    pub default_verbose: bool,
    pub bcrypt: BcryptConfig,
    pub rsa: RsaConfig,
    /// パスワード生成設定
    pub generator: GeneratorConfig,
    pub json: JsonConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BcryptConfig {
    /// コスト（2^cost 回のラウンド）
    pub cost: u32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RsaConfig {
    /// キー長（ビット）
    pub key_size: u32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// 強度ごとに生成する件数
    pub batch_count: usize,
    pub batch_policy: BatchPolicy,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonConfig {
    /// 修復結果のレイアウト
    pub layout: JsonLayout,
}

impl Default for BcryptConfig {
    fn default() -> Self {
        Self { cost: 12 }
    }
}

impl Default for RsaConfig {
    fn default() -> Self {
        Self { key_size: 1024 }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            batch_count: 3,
            batch_policy: BatchPolicy::SkipFailures,
        }
    }
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self {
            layout: JsonLayout::Compact,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            default_verbose: false,
            bcrypt: BcryptConfig::default(),
            rsa: RsaConfig::default(),
            generator: GeneratorConfig::default(),
            json: JsonConfig::default(),
        }
    }
}

/// 設定ファイルを読み込み（存在しなければデフォルト）
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(p) => p.to_path_buf(),
        None => get_default_config_path()?,
    };

    if !path.exists() {
        log::debug!("設定ファイルがないためデフォルト設定を使用: {}", path.display());
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("設定ファイルの読み取りに失敗: {}", path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("設定ファイルの解析に失敗: {}", path.display()))?;

    log::debug!("設定ファイルを読み込みました: {}", path.display());
    Ok(config)
}

/// デフォルトの設定ファイルパスを取得
pub fn get_default_config_path() -> Result<PathBuf> {
    let config_dir =
        dirs::config_dir().ok_or_else(|| anyhow!("設定ディレクトリが見つかりません"))?;

    let app_config_dir = config_dir.join("multitool");
    Ok(app_config_dir.join("config.toml"))
}

/// 設定を文字列化
pub fn render_config(config: &Config) -> Result<String> {
    toml::to_string_pretty(config).context("設定ファイルの生成に失敗しました")
}

/// デフォルト設定で設定ファイルを作成
pub fn create_config_file(path: &Path) -> Result<()> {
    // ディレクトリを作成
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("設定ディレクトリの作成に失敗: {}", parent.display()))?;
    }

    let toml_content = render_config(&Config::default())?;

    fs::write(path, toml_content)
        .with_context(|| format!("設定ファイルの書き込みに失敗: {}", path.display()))?;

    Ok(())
}

/// 設定ファイルを削除
pub fn delete_config_file(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)
            .with_context(|| format!("設定ファイルの削除に失敗: {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(Some(&dir.path().join("none.toml"))).unwrap();
        assert_eq!(config.bcrypt.cost, 12);
        assert_eq!(config.rsa.key_size, 1024);
        assert_eq!(config.generator.batch_count, 3);
        assert_eq!(config.generator.batch_policy, BatchPolicy::SkipFailures);
        assert_eq!(config.json.layout, JsonLayout::Compact);
    }

    #[test]
    fn create_load_delete() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        create_config_file(&path).unwrap();
        assert!(path.exists());
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.version, "1.0");
        assert!(!config.default_verbose);

        delete_config_file(&path).unwrap();
        assert!(!path.exists());
        // 2回目の削除はエラーにならない
        delete_config_file(&path).unwrap();
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[generator]\nbatch_policy = \"Propagate\"\n\n[json]\nlayout = \"Pretty\"\n",
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.generator.batch_policy, BatchPolicy::Propagate);
        assert_eq!(config.generator.batch_count, 3);
        assert_eq!(config.json.layout, JsonLayout::Pretty);
        assert_eq!(config.bcrypt.cost, 12);
    }

    #[test]
    fn broken_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "version = [").unwrap();
        assert!(load_config(Some(&path)).is_err());
    }
}
