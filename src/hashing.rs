use crate::error::{Result, ToolError};

pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

/// パスワードをbcryptでハッシュ化
pub fn hash_password(password: &str, cost: u32) -> Result<String> {
    if !(MIN_COST..=MAX_COST).contains(&cost) {
        return Err(ToolError::InvalidCost(cost));
    }

    let start_time = std::time::Instant::now();
    let hashed = bcrypt::hash(password, cost)?;
    log::debug!(
        "bcryptハッシュ生成完了 (cost {cost}) - 処理時間: {:.2}秒",
        start_time.elapsed().as_secs_f64()
    );

    Ok(hashed)
}

/// ハッシュと平文が一致するか検証
///
/// 不一致は `Ok(false)`、ハッシュ自体が不正な場合はエラー。
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let matched = bcrypt::verify(password, hash.trim())?;
    log::debug!("bcrypt照合結果: {matched}");
    Ok(matched)
}
