//! パスワード・キー生成
//!
//! 強度名 → プロファイル → 文字プール → 乱数による抽出、の順に処理する。

pub mod catalog;
pub mod charset;
pub mod entropy;
pub mod generator;

pub use catalog::{list_names, profiles, resolve, StrengthProfile};
pub use charset::{build_pool, CharacterClass, ClassSet};
pub use entropy::{EntropySource, SystemEntropy};
pub use generator::{
    generate_key, generate_key_with, generate_many, generate_many_with, generate_profile,
    BatchPolicy,
};
