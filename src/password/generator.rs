use super::catalog::StrengthProfile;
use super::charset::build_pool;
use super::entropy::{EntropySource, SystemEntropy};
use crate::error::{Result, ToolError};
use serde::{Deserialize, Serialize};

/// 一括生成で個々の生成が失敗したときの扱い
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchPolicy {
    /// 失敗した分は捨てて続行する（結果はcount件より少なくなり得る）
    #[default]
    SkipFailures,
    /// 最初のエラーをそのまま返す
    Propagate,
}

/// プールから `length` 文字を復元抽出してキーを作る（OS乱数源を使用）
pub fn generate_key(length: usize, pool: &str) -> Result<String> {
    generate_key_with(&SystemEntropy, length, pool)
}

/// 任意の乱数源でキーを生成
pub fn generate_key_with<E>(source: &E, length: usize, pool: &str) -> Result<String>
where
    E: EntropySource + ?Sized,
{
    if length == 0 {
        return Err(ToolError::InvalidLength(length));
    }
    let chars: Vec<char> = pool.chars().collect();
    if chars.is_empty() {
        return Err(ToolError::EmptyPool);
    }

    let mut key = String::with_capacity(length);
    for _ in 0..length {
        let index = source.next_index(chars.len())?;
        key.push(chars[index]);
    }
    Ok(key)
}

/// プロファイルに従って1件生成
pub fn generate_profile(profile: &StrengthProfile) -> Result<String> {
    generate_key(profile.length, &build_pool(profile.classes))
}

/// 同じプロファイルで `count` 件生成する
///
/// 失敗した生成は黙って除外されるので、戻り値の件数は `count` 以下になる。
pub fn generate_many(count: usize, profile: &StrengthProfile) -> Vec<String> {
    // SkipFailuresはエラーを返さない
    generate_many_with(&SystemEntropy, count, profile, BatchPolicy::SkipFailures)
        .unwrap_or_default()
}

/// 乱数源と失敗時ポリシーを指定して一括生成
pub fn generate_many_with<E>(
    source: &E,
    count: usize,
    profile: &StrengthProfile,
    policy: BatchPolicy,
) -> Result<Vec<String>>
where
    E: EntropySource + ?Sized,
{
    let pool = build_pool(profile.classes);
    log::debug!(
        "{} を {} 件生成（長さ {}, プール {} 文字）",
        profile.name,
        count,
        profile.length,
        pool.chars().count()
    );

    let mut keys = Vec::with_capacity(count);
    for i in 0..count {
        match generate_key_with(source, profile.length, &pool) {
            Ok(key) => keys.push(key),
            Err(e) => match policy {
                BatchPolicy::SkipFailures => {
                    log::warn!("{} の {} 件目の生成をスキップ: {e}", profile.name, i + 1);
                }
                BatchPolicy::Propagate => return Err(e),
            },
        }
    }
    Ok(keys)
}
