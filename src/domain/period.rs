use crate::types::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 記事・クイズを分類する7つの時代区分
///
/// 永続化時は列挙名（`KYIV_RUS` など）で保存する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HistoricalPeriod {
    AncientTimes,
    KyivRus,
    CossackEra,
    ImperialPeriod,
    RevolutionPeriod,
    SovietEra,
    Independence,
}

impl HistoricalPeriod {
    /// 宣言順の全時代区分
    pub const ALL: [HistoricalPeriod; 7] = [
        Self::AncientTimes,
        Self::KyivRus,
        Self::CossackEra,
        Self::ImperialPeriod,
        Self::RevolutionPeriod,
        Self::SovietEra,
        Self::Independence,
    ];

    /// 永続化に使う列挙名
    pub fn name(&self) -> &'static str {
        match self {
            Self::AncientTimes => "ANCIENT_TIMES",
            Self::KyivRus => "KYIV_RUS",
            Self::CossackEra => "COSSACK_ERA",
            Self::ImperialPeriod => "IMPERIAL_PERIOD",
            Self::RevolutionPeriod => "REVOLUTION_PERIOD",
            Self::SovietEra => "SOVIET_ERA",
            Self::Independence => "INDEPENDENCE",
        }
    }

    /// ウクライナ語の年代ラベル
    pub fn year_range(&self) -> &'static str {
        match self {
            Self::AncientTimes => "Стародавні часи (до 882 р).",
            Self::KyivRus => "Київська Русь (882-1240 рр).",
            Self::CossackEra => "Козацька доба (1550-1775 рр).",
            Self::ImperialPeriod => "Імперська доба (1775-1917 рр).",
            Self::RevolutionPeriod => "Українська революція (1917-1922 рр).",
            Self::SovietEra => "Радянський період (1922-1991 рр).",
            Self::Independence => "Незалежність (1991-сьогодення).",
        }
    }

    /// 年代ラベルから時代区分を逆引きする（完全一致）
    pub fn from_year_range(label: &str) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|period| period.year_range() == label)
            .ok_or_else(|| DomainError::unknown_year_range(label))
    }

    /// 学習難易度（1〜3）
    pub fn difficulty_level(&self) -> u8 {
        match self {
            Self::AncientTimes | Self::KyivRus => 3,
            Self::Independence => 1,
            _ => 2,
        }
    }
}

impl FromStr for HistoricalPeriod {
    type Err = DomainError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|period| period.name() == name)
            .ok_or_else(|| DomainError::unknown_period(name))
    }
}

impl fmt::Display for HistoricalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
