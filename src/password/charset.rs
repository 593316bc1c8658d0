//! 文字種とプールの組み立て

const LOWER_CASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPER_CASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const NUMBERS: &str = "1234567890";
const SPECIAL: &str = "`~!@#$%^&*()-=_+[]{}|;':\",./<>?";
const HEX_CHARS: &str = "123456789ABCDEF";

/// 文字種
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterClass {
    Lower,
    Upper,
    Digits,
    Special,
    Hex,
}

impl CharacterClass {
    /// プールに連結する順序
    pub const ALL: [CharacterClass; 5] = [
        CharacterClass::Lower,
        CharacterClass::Upper,
        CharacterClass::Digits,
        CharacterClass::Special,
        CharacterClass::Hex,
    ];

    pub fn alphabet(self) -> &'static str {
        match self {
            CharacterClass::Lower => LOWER_CASE,
            CharacterClass::Upper => UPPER_CASE,
            CharacterClass::Digits => NUMBERS,
            CharacterClass::Special => SPECIAL,
            CharacterClass::Hex => HEX_CHARS,
        }
    }
}

/// 有効にする文字種のフラグ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassSet {
    pub lower: bool,
    pub upper: bool,
    pub digits: bool,
    pub special: bool,
    pub hex: bool,
}

impl ClassSet {
    pub const fn new(lower: bool, upper: bool, digits: bool, special: bool, hex: bool) -> Self {
        Self {
            lower,
            upper,
            digits,
            special,
            hex,
        }
    }

    pub fn contains(&self, class: CharacterClass) -> bool {
        match class {
            CharacterClass::Lower => self.lower,
            CharacterClass::Upper => self.upper,
            CharacterClass::Digits => self.digits,
            CharacterClass::Special => self.special,
            CharacterClass::Hex => self.hex,
        }
    }

    /// 有効な文字種を連結順に列挙
    pub fn classes(&self) -> impl Iterator<Item = CharacterClass> + '_ {
        CharacterClass::ALL
            .into_iter()
            .filter(move |c| self.contains(*c))
    }

    pub fn is_empty(&self) -> bool {
        self.classes().next().is_none()
    }
}

/// 有効な文字種のアルファベットを固定順（小文字、大文字、数字、記号、16進）で連結する
///
/// すべて無効なら空文字列を返す。空のプールはキー生成側で拒否される。
pub fn build_pool(flags: ClassSet) -> String {
    flags.classes().map(CharacterClass::alphabet).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_flags_give_empty_pool() {
        let flags = ClassSet::default();
        assert!(flags.is_empty());
        assert_eq!(build_pool(flags), "");
    }

    #[test]
    fn pool_order_is_fixed() {
        let pool = build_pool(ClassSet::new(true, false, true, false, true));
        assert_eq!(pool, format!("{LOWER_CASE}{NUMBERS}{HEX_CHARS}"));
    }

    #[test]
    fn full_pool_contains_every_alphabet() {
        let pool = build_pool(ClassSet::new(true, true, true, true, true));
        let expected: usize = CharacterClass::ALL.iter().map(|c| c.alphabet().len()).sum();
        assert_eq!(pool.chars().count(), expected);
        assert!(pool.starts_with('a'));
        assert!(pool.ends_with('F'));
    }

    #[test]
    fn hex_alphabet_matches_wep_keys() {
        let pool = build_pool(ClassSet::new(false, false, false, false, true));
        assert_eq!(pool, "123456789ABCDEF");
    }
}
