//! Combination (合) and opposition (冲) rules between stems and branches.
//!
//! - Stem combination: the five unions 甲己, 乙庚, 丙辛, 丁壬, 戊癸.
//! - Stem opposition: 甲庚, 乙辛, 丙壬, 丁癸 only. 戊 and 己 have no partner
//!   in this ruleset.
//! - Branch combination: the six harmonies 子丑, 寅亥, 卯戌, 辰酉, 巳申, 午未.
//! - Branch opposition: the branch six places away.

use crate::ganzhi::{Branch, Stem, StemBranch};

/// Combination partner of a stem. Every stem has one.
pub const fn stem_combination(stem: Stem) -> Stem {
    match stem {
        Stem::Jia => Stem::Ji,
        Stem::Ji => Stem::Jia,
        Stem::Yi => Stem::Geng,
        Stem::Geng => Stem::Yi,
        Stem::Bing => Stem::Xin,
        Stem::Xin => Stem::Bing,
        Stem::Ding => Stem::Ren,
        Stem::Ren => Stem::Ding,
        Stem::Wu => Stem::Gui,
        Stem::Gui => Stem::Wu,
    }
}

/// Opposition partner of a stem, `None` for 戊 and 己.
pub const fn stem_opposition(stem: Stem) -> Option<Stem> {
    match stem {
        Stem::Jia => Some(Stem::Geng),
        Stem::Geng => Some(Stem::Jia),
        Stem::Yi => Some(Stem::Xin),
        Stem::Xin => Some(Stem::Yi),
        Stem::Bing => Some(Stem::Ren),
        Stem::Ren => Some(Stem::Bing),
        Stem::Ding => Some(Stem::Gui),
        Stem::Gui => Some(Stem::Ding),
        Stem::Wu | Stem::Ji => None,
    }
}

/// Six-harmony partner of a branch.
pub const fn branch_combination(branch: Branch) -> Branch {
    match branch {
        Branch::Zi => Branch::Chou,
        Branch::Chou => Branch::Zi,
        Branch::Yin => Branch::Hai,
        Branch::Hai => Branch::Yin,
        Branch::Mao => Branch::Xu,
        Branch::Xu => Branch::Mao,
        Branch::Chen => Branch::You,
        Branch::You => Branch::Chen,
        Branch::Si => Branch::Shen,
        Branch::Shen => Branch::Si,
        Branch::Wu => Branch::Wei,
        Branch::Wei => Branch::Wu,
    }
}

/// Directly opposed branch (`index + 6 mod 12`).
pub const fn branch_opposition(branch: Branch) -> Branch {
    branch.offset(6)
}

/// Favorable pairs implied by one stem/branch: the double combination
/// and the same stem with the next branch ("advance one").
pub fn favorable_pairs(stem: Stem, branch: Branch) -> [StemBranch; 2] {
    let s = stem_combination(stem);
    let b = branch_combination(branch);
    [StemBranch::new(s, b), StemBranch::new(s, b.succ())]
}

/// Unfavorable pairs implied by one stem/branch: the double opposition
/// and the same stem with the previous branch ("retreat one").
/// `None` when the stem has no opposition partner.
pub fn unfavorable_pairs(stem: Stem, branch: Branch) -> Option<[StemBranch; 2]> {
    let s = stem_opposition(stem)?;
    let b = branch_opposition(branch);
    Some([StemBranch::new(s, b), StemBranch::new(s, b.pred())])
}
