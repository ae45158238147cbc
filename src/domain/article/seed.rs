use super::model::Article;
use crate::domain::period::HistoricalPeriod;
use crate::infra::loader::{load_yaml_from_file, load_yaml_from_str};
use crate::types::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};

const DEFAULT_SEED_YAML: &str = include_str!("../data/seed_articles.yaml");

// 初期記事の定義（IDは投入時に生成する）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedArticle {
    pub title: String,
    pub period: HistoricalPeriod,
    pub author: String,
    pub word_count: u32,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SeedArticle {
    pub fn into_article(self) -> Article {
        Article::new(self.title, self.period, self.author, self.word_count, self.tags)
    }
}

/// 初期記事の取得元
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SeedSource {
    /// バイナリに埋め込んだ標準の3記事
    #[default]
    Embedded,
    /// 指定されたYAMLファイル
    File(String),
}

impl SeedSource {
    /// 初期記事を読み込み、新しいIDを付与して返す
    pub fn load(&self) -> CatalogResult<Vec<Article>> {
        let seeds: Vec<SeedArticle> = match self {
            Self::Embedded => load_yaml_from_str("seed_articles.yaml", DEFAULT_SEED_YAML),
            Self::File(path) => load_yaml_from_file(path),
        }
        .map_err(|e| CatalogError::seed(e.to_string()))?;

        Ok(seeds.into_iter().map(SeedArticle::into_article).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_seed_contains_three_articles() {
        let articles = SeedSource::Embedded.load().expect("初期記事の読み込みに失敗");

        let summary: Vec<(&str, HistoricalPeriod)> = articles
            .iter()
            .map(|a| (a.title.as_str(), a.period))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Київська Русь", HistoricalPeriod::KyivRus),
                ("Утворення УНР", HistoricalPeriod::RevolutionPeriod),
                ("Проголошення незалежності", HistoricalPeriod::Independence),
            ]
        );
        assert_eq!(articles[0].word_count, 900);
        assert_eq!(articles[2].tags, vec!["1991", "державність"]);
    }

    #[test]
    fn test_each_load_generates_fresh_ids() {
        let first = SeedSource::Embedded.load().expect("読み込みに失敗");
        let second = SeedSource::Embedded.load().expect("読み込みに失敗");
        assert_ne!(first[0].id, second[0].id);
    }

    #[test]
    fn test_seed_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("一時ファイルの作成に失敗");
        writeln!(
            file,
            "- title: Козацька держава\n  period: COSSACK_ERA\n  author: Богдан Хмельницький\n  word_count: 400"
        )
        .expect("書き込みに失敗");

        let source = SeedSource::File(file.path().to_string_lossy().to_string());
        let articles = source.load().expect("ファイルからの読み込みに失敗");
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].period, HistoricalPeriod::CossackEra);
        assert!(articles[0].tags.is_empty());
    }

    #[test]
    fn test_seed_with_unknown_period_fails() {
        let mut file = tempfile::NamedTempFile::new().expect("一時ファイルの作成に失敗");
        writeln!(
            file,
            "- title: X\n  period: BRONZE_AGE\n  author: Y\n  word_count: 1"
        )
        .expect("書き込みに失敗");

        let source = SeedSource::File(file.path().to_string_lossy().to_string());
        assert!(matches!(source.load(), Err(CatalogError::Seed { .. })));
    }

    #[test]
    fn test_missing_seed_file_fails() {
        let source = SeedSource::File("no/such/seed.yaml".to_string());
        assert!(matches!(source.load(), Err(CatalogError::Seed { .. })));
    }
}
