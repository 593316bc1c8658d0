use crate::error::{Result, ToolError};
use rand::rngs::OsRng;
use rand::TryRngCore;

/// 2^53（f64の仮数部で正確に表現できる範囲）
const UNIT_SCALE: f64 = (1u64 << 53) as f64;

/// 暗号学的に安全な乱数源
///
/// 実装は `next_u64` だけを提供すればよい。`&self` で呼べるので、
/// 状態を持たない実装はそのままスレッド間で共有できる。
pub trait EntropySource {
    /// 64ビットの一様乱数を1つ取り出す
    fn next_u64(&self) -> Result<u64>;

    /// [0, 1) の一様な浮動小数点数
    fn next_unit(&self) -> Result<f64> {
        let bits = self.next_u64()? >> 11;
        Ok(bits as f64 / UNIT_SCALE)
    }

    /// [0, bound) の一様な整数（棄却サンプリング）
    fn next_index(&self, bound: usize) -> Result<usize> {
        if bound == 0 {
            return Err(ToolError::EmptyPool);
        }
        let n = bound as u64;
        // 2^64 mod n 未満の値を捨てれば、残りはnの倍数個になる
        let reject_below = n.wrapping_neg() % n;
        loop {
            let x = self.next_u64()?;
            if x >= reject_below {
                return Ok((x % n) as usize);
            }
        }
    }
}

/// OSの乱数源（getrandom経由）
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEntropy;

impl EntropySource for SystemEntropy {
    fn next_u64(&self) -> Result<u64> {
        OsRng
            .try_next_u64()
            .map_err(|e| ToolError::EntropyUnavailable(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// 決まった値を順番に返すテスト用の乱数源
    struct Scripted {
        values: Vec<u64>,
        pos: Cell<usize>,
    }

    impl EntropySource for Scripted {
        fn next_u64(&self) -> Result<u64> {
            let i = self.pos.get();
            self.pos.set(i + 1);
            self.values
                .get(i)
                .copied()
                .ok_or_else(|| ToolError::EntropyUnavailable("exhausted".into()))
        }
    }

    #[test]
    fn unit_draws_stay_below_one() {
        let src = Scripted {
            values: vec![u64::MAX, 0],
            pos: Cell::new(0),
        };
        let hi = src.next_unit().unwrap();
        assert!(hi < 1.0);
        assert!(hi > 0.999);
        assert_eq!(src.next_unit().unwrap(), 0.0);
    }

    #[test]
    fn index_draw_rejects_biased_zone() {
        // bound=3: 2^64 mod 3 == 1 なので 0 は棄却される
        let src = Scripted {
            values: vec![0, 5],
            pos: Cell::new(0),
        };
        assert_eq!(src.next_index(3).unwrap(), 2);
        assert_eq!(src.pos.get(), 2);
    }

    #[test]
    fn index_draw_with_zero_bound_fails() {
        assert!(matches!(
            SystemEntropy.next_index(0),
            Err(ToolError::EmptyPool)
        ));
    }

    #[test]
    fn system_draws_are_in_range() {
        for _ in 0..1000 {
            let u = SystemEntropy.next_unit().unwrap();
            assert!((0.0..1.0).contains(&u));
            assert!(SystemEntropy.next_index(97).unwrap() < 97);
        }
    }

    #[test]
    fn exhausted_source_reports_entropy_unavailable() {
        let src = Scripted {
            values: vec![],
            pos: Cell::new(0),
        };
        assert!(matches!(
            src.next_index(10),
            Err(ToolError::EntropyUnavailable(_))
        ));
    }
}
