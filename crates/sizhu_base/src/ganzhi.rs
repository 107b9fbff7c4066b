//! Heavenly stems, earthly branches and the 60-pillar sexagenary cycle.
//!
//! Cycle position `i` pairs stem `i mod 10` with branch `i mod 12`, so only
//! stem/branch pairs of equal parity ever occur. [`Pillar`] enforces that;
//! [`StemBranch`] is the unchecked pair used for derived combinations.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::GanzhiError;

/// The ten heavenly stems (天干).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Stem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

/// All 10 stems in cycle order (index 0 = 甲).
pub const ALL_STEMS: [Stem; 10] = [
    Stem::Jia,
    Stem::Yi,
    Stem::Bing,
    Stem::Ding,
    Stem::Wu,
    Stem::Ji,
    Stem::Geng,
    Stem::Xin,
    Stem::Ren,
    Stem::Gui,
];

const STEM_NAMES: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

const STEM_PINYIN: [&str; 10] = [
    "jia", "yi", "bing", "ding", "wu", "ji", "geng", "xin", "ren", "gui",
];

impl Stem {
    /// 0-based index (甲=0 .. 癸=9).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Stem at `index`, taken modulo 10.
    pub const fn from_index(index: i64) -> Self {
        ALL_STEMS[index.rem_euclid(10) as usize]
    }

    /// Chinese character of the stem.
    pub fn name(self) -> &'static str {
        STEM_NAMES[self.index() as usize]
    }

    /// Look up a stem by its character or pinyin (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        STEM_NAMES
            .iter()
            .zip(STEM_PINYIN)
            .position(|(zh, py)| *zh == name || py.eq_ignore_ascii_case(name))
            .map(|i| ALL_STEMS[i])
    }

    /// The stem `n` steps further along the cycle (negative `n` goes back).
    pub const fn offset(self, n: i64) -> Self {
        Self::from_index(self.index() as i64 + n)
    }
}

impl Display for Stem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stem {
    type Err = GanzhiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| GanzhiError::UnknownStem(s.to_string()))
    }
}

/// The twelve earthly branches (地支).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Branch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

/// All 12 branches in cycle order (index 0 = 子).
pub const ALL_BRANCHES: [Branch; 12] = [
    Branch::Zi,
    Branch::Chou,
    Branch::Yin,
    Branch::Mao,
    Branch::Chen,
    Branch::Si,
    Branch::Wu,
    Branch::Wei,
    Branch::Shen,
    Branch::You,
    Branch::Xu,
    Branch::Hai,
];

const BRANCH_NAMES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

const BRANCH_PINYIN: [&str; 12] = [
    "zi", "chou", "yin", "mao", "chen", "si", "wu", "wei", "shen", "you", "xu", "hai",
];

impl Branch {
    /// 0-based index (子=0 .. 亥=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Branch at `index`, taken modulo 12.
    pub const fn from_index(index: i64) -> Self {
        ALL_BRANCHES[index.rem_euclid(12) as usize]
    }

    /// Chinese character of the branch.
    pub fn name(self) -> &'static str {
        BRANCH_NAMES[self.index() as usize]
    }

    /// Look up a branch by its character or pinyin (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        BRANCH_NAMES
            .iter()
            .zip(BRANCH_PINYIN)
            .position(|(zh, py)| *zh == name || py.eq_ignore_ascii_case(name))
            .map(|i| ALL_BRANCHES[i])
    }

    /// The branch `n` steps further along the cycle (negative `n` goes back).
    pub const fn offset(self, n: i64) -> Self {
        Self::from_index(self.index() as i64 + n)
    }

    /// Next branch, wrapping 亥 -> 子.
    pub const fn succ(self) -> Self {
        self.offset(1)
    }

    /// Previous branch, wrapping 子 -> 亥.
    pub const fn pred(self) -> Self {
        self.offset(-1)
    }
}

impl Display for Branch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Branch {
    type Err = GanzhiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| GanzhiError::UnknownBranch(s.to_string()))
    }
}

/// Any stem/branch pair, valid cycle member or not.
///
/// Combination rules can produce pairs of mixed parity (e.g. 己寅) which
/// never occupy a cycle position; they are still reported by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StemBranch {
    pub stem: Stem,
    pub branch: Branch,
}

impl StemBranch {
    pub const fn new(stem: Stem, branch: Branch) -> Self {
        Self { stem, branch }
    }

    /// The cycle pillar for this pair, or `None` when parities differ.
    pub const fn to_pillar(self) -> Option<Pillar> {
        Pillar::new(self.stem, self.branch)
    }
}

impl Display for StemBranch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

impl FromStr for StemBranch {
    type Err = GanzhiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let mut chars = text.chars();
        let (Some(stem), Some(branch), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(GanzhiError::InvalidPillar(s.to_string()));
        };
        let stem = Stem::from_name(stem.encode_utf8(&mut [0; 4]))
            .ok_or_else(|| GanzhiError::InvalidPillar(s.to_string()))?;
        let branch = Branch::from_name(branch.encode_utf8(&mut [0; 4]))
            .ok_or_else(|| GanzhiError::InvalidPillar(s.to_string()))?;
        Ok(Self { stem, branch })
    }
}

impl From<Pillar> for StemBranch {
    fn from(p: Pillar) -> Self {
        Self::new(p.stem, p.branch)
    }
}

/// A member of the sexagenary cycle: stem and branch of equal parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pillar {
    stem: Stem,
    branch: Branch,
}

impl Pillar {
    /// Pair a stem and branch, or `None` if they never meet in the cycle.
    pub const fn new(stem: Stem, branch: Branch) -> Option<Self> {
        if stem.index() % 2 == branch.index() % 2 {
            Some(Self { stem, branch })
        } else {
            None
        }
    }

    /// Pillar at cycle position `index`, taken modulo 60.
    pub const fn from_cycle_index(index: i64) -> Self {
        Self {
            stem: Stem::from_index(index),
            branch: Branch::from_index(index),
        }
    }

    pub const fn stem(self) -> Stem {
        self.stem
    }

    pub const fn branch(self) -> Branch {
        self.branch
    }

    /// Position in the cycle (甲子=0 .. 癸亥=59).
    ///
    /// Solves `i ≡ stem (mod 10)`, `i ≡ branch (mod 12)`: `i = 6·stem − 5·branch (mod 60)`.
    pub const fn index(self) -> u8 {
        (6 * self.stem.index() as i32 - 5 * self.branch.index() as i32).rem_euclid(60) as u8
    }

    /// The pillar `n` positions further along the cycle.
    pub const fn offset(self, n: i64) -> Self {
        Self::from_cycle_index(self.index() as i64 + n)
    }
}

impl Display for Pillar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

impl FromStr for Pillar {
    type Err = GanzhiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<StemBranch>()?
            .to_pillar()
            .ok_or_else(|| GanzhiError::InvalidPillar(s.to_string()))
    }
}

/// The 60 pillars in order, `cycle[i] = stem(i mod 10) + branch(i mod 12)`.
pub const SEXAGENARY_CYCLE: [Pillar; 60] = build_cycle();

const fn build_cycle() -> [Pillar; 60] {
    let mut cycle = [Pillar::from_cycle_index(0); 60];
    let mut i = 0;
    while i < 60 {
        cycle[i] = Pillar::from_cycle_index(i as i64);
        i += 1;
    }
    cycle
}

/// Pillar at cycle position `index` (Euclidean modulo 60, so negative offsets work).
pub fn pillar_at(index: i64) -> Pillar {
    SEXAGENARY_CYCLE[index.rem_euclid(60) as usize]
}

/// Cycle position of a pillar.
pub fn cycle_index(pillar: Pillar) -> u8 {
    pillar.index()
}

/// Cycle position of a pillar written as text, or `None` if the text is not a pillar.
pub fn cycle_index_of(text: &str) -> Option<u8> {
    text.parse::<Pillar>().ok().map(Pillar::index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_starts_and_ends() {
        assert_eq!(SEXAGENARY_CYCLE[0].to_string(), "甲子");
        assert_eq!(SEXAGENARY_CYCLE[1].to_string(), "乙丑");
        assert_eq!(SEXAGENARY_CYCLE[10].to_string(), "甲戌");
        assert_eq!(SEXAGENARY_CYCLE[59].to_string(), "癸亥");
    }

    #[test]
    fn cycle_closure() {
        for i in 0..60 {
            let p = pillar_at(i);
            assert_eq!(i64::from(cycle_index(p)), i);
            assert_eq!(pillar_at(i + 60), p);
            assert_eq!(pillar_at(i - 60), p);
        }
    }

    #[test]
    fn cycle_entries_are_distinct() {
        for (i, a) in SEXAGENARY_CYCLE.iter().enumerate() {
            for b in &SEXAGENARY_CYCLE[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn jia_wu_is_index_30() {
        let p: Pillar = "甲午".parse().unwrap();
        assert_eq!(p.index(), 30);
        assert_eq!(p.stem(), Stem::Jia);
        assert_eq!(p.branch(), Branch::Wu);
    }

    #[test]
    fn mixed_parity_is_not_a_pillar() {
        assert_eq!(Pillar::new(Stem::Jia, Branch::Chou), None);
        assert!("甲丑".parse::<Pillar>().is_err());
        assert_eq!(cycle_index_of("甲丑"), None);
        // ...but it is still a stem/branch pair.
        let sb: StemBranch = "甲丑".parse().unwrap();
        assert_eq!(sb.to_pillar(), None);
        assert_eq!(sb.to_string(), "甲丑");
    }

    #[test]
    fn malformed_text_not_found() {
        assert_eq!(cycle_index_of(""), None);
        assert_eq!(cycle_index_of("甲"), None);
        assert_eq!(cycle_index_of("甲子丑"), None);
        assert_eq!(cycle_index_of("子甲"), None);
        assert_eq!(cycle_index_of("abc"), None);
    }

    #[test]
    fn branch_successor_wraps() {
        assert_eq!(Branch::Hai.succ(), Branch::Zi);
        assert_eq!(Branch::Zi.pred(), Branch::Hai);
        for b in ALL_BRANCHES {
            assert_eq!(b.succ().pred(), b);
        }
    }

    #[test]
    fn names_roundtrip() {
        for s in ALL_STEMS {
            assert_eq!(Stem::from_name(s.name()), Some(s));
        }
        for b in ALL_BRANCHES {
            assert_eq!(b.name().parse::<Branch>(), Ok(b));
        }
    }

    #[test]
    fn pinyin_lookup() {
        assert_eq!(Branch::from_name("Yin"), Some(Branch::Yin));
        assert_eq!(Stem::from_name("GUI"), Some(Stem::Gui));
        assert_eq!(Branch::from_name("x"), None);
    }

    #[test]
    fn from_index_wraps_negative() {
        assert_eq!(Stem::from_index(-1), Stem::Gui);
        assert_eq!(Branch::from_index(-1), Branch::Hai);
        assert_eq!(Branch::from_index(14), Branch::Yin);
    }

    #[test]
    fn pillar_offset() {
        let p: Pillar = "癸亥".parse().unwrap();
        assert_eq!(p.offset(1).to_string(), "甲子");
        assert_eq!(p.offset(-59).to_string(), "甲子");
    }
}
