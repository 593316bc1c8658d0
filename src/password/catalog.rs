use super::charset::ClassSet;
use crate::error::{Result, ToolError};

/// 強度プリセット（長さと文字種の組）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrengthProfile {
    /// 表示名
    pub name: &'static str,
    /// 内部ID
    pub id: &'static str,
    pub length: usize,
    pub classes: ClassSet,
}

const ALNUM: ClassSet = ClassSet::new(true, true, true, false, false);
const ALNUM_SPECIAL: ClassSet = ClassSet::new(true, true, true, true, false);
const HEX: ClassSet = ClassSet::new(false, false, false, false, true);

const fn profile(
    name: &'static str,
    id: &'static str,
    length: usize,
    classes: ClassSet,
) -> StrengthProfile {
    StrengthProfile {
        name,
        id,
        length,
        classes,
    }
}

// 表示順もこの並び
static PROFILES: [StrengthProfile; 10] = [
    profile("Memorable Passwords", "memorable_pwd", 10, ALNUM),
    profile("Strong Passwords", "strong_pwd", 15, ALNUM_SPECIAL),
    profile("Fort Knox Passwords", "ft_knox_pwd", 30, ALNUM_SPECIAL),
    profile("CodeIgniter Encryption Keys", "ci_key", 32, ALNUM),
    profile("160-bit WPA Key", "160_wpa", 20, ALNUM_SPECIAL),
    profile("504-bit WPA Key", "504_wpa", 63, ALNUM_SPECIAL),
    profile("64-bit WEP Keys", "64_wep", 5, HEX),
    profile("128-bit WEP Keys", "128_wep", 13, HEX),
    profile("152-bit WEP Keys", "152_wep", 16, HEX),
    profile("256-bit WEP Keys", "256_wep", 29, HEX),
];

/// 表示名または内部IDからプロファイルを引く
pub fn resolve(name: &str) -> Result<&'static StrengthProfile> {
    PROFILES
        .iter()
        .find(|p| p.name == name || p.id == name)
        .ok_or_else(|| ToolError::UnknownStrength(name.to_string()))
}

/// 表示名を固定順で列挙
pub fn list_names() -> impl Iterator<Item = &'static str> {
    PROFILES.iter().map(|p| p.name)
}

pub fn profiles() -> &'static [StrengthProfile] {
    &PROFILES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_passwords_profile() {
        let p = resolve("Strong Passwords").unwrap();
        assert_eq!(p.length, 15);
        assert_eq!(p.classes, ClassSet::new(true, true, true, true, false));
    }

    #[test]
    fn wep_64_profile() {
        let p = resolve("64-bit WEP Keys").unwrap();
        assert_eq!(p.length, 5);
        assert_eq!(p.classes, ClassSet::new(false, false, false, false, true));
    }

    #[test]
    fn resolves_by_internal_id() {
        assert_eq!(resolve("ft_knox_pwd").unwrap().name, "Fort Knox Passwords");
        assert_eq!(resolve("504_wpa").unwrap().length, 63);
    }

    #[test]
    fn unknown_strength_is_rejected() {
        match resolve("Ultra Passwords") {
            Err(ToolError::UnknownStrength(name)) => assert_eq!(name, "Ultra Passwords"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn names_are_listed_in_display_order() {
        let names: Vec<_> = list_names().collect();
        assert_eq!(names.len(), 10);
        assert_eq!(names[0], "Memorable Passwords");
        assert_eq!(names[3], "CodeIgniter Encryption Keys");
        assert_eq!(names[9], "256-bit WEP Keys");
        // 何度呼んでも同じ順序
        assert_eq!(names, list_names().collect::<Vec<_>>());
    }

    #[test]
    fn every_profile_resolves_and_has_a_pool() {
        for name in list_names() {
            let p = resolve(name).unwrap();
            assert!(p.length > 0);
            assert!(!p.classes.is_empty());
        }
    }
}
