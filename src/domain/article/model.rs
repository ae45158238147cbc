use crate::domain::period::HistoricalPeriod;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 読了時間の計算に使う1分あたりの語数
const WORDS_PER_MINUTE: u32 = 200;

/// タグを文字列として保存する際の区切り
pub const TAG_SEPARATOR: &str = ", ";

// 永続化される記事レコード（テーブル定義と一致）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub id: String,
    pub title: String,
    pub period: HistoricalPeriod,
    pub author: String,
    pub word_count: u32,
    pub tags: Vec<String>,
}

// 記事エンティティ（画面側に渡すドメイン表現）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub period: HistoricalPeriod,
    pub author: String,
    pub word_count: u32,
    #[serde(default)]
    pub tags: Vec<String>,
}

// 記事の共通操作を定義するトレイト
// 派生値はここで計算し、永続化はしない
pub trait ArticleView {
    fn get_id(&self) -> &str;
    fn get_title(&self) -> &str;
    fn get_period(&self) -> HistoricalPeriod;
    fn get_word_count(&self) -> u32;

    /// 読了時間（分）。語数を200で割って切り捨て、1を足す
    fn read_time_minutes(&self) -> u32 {
        self.get_word_count() / WORDS_PER_MINUTE + 1
    }

    /// 時代区分から決まる学習難易度
    fn difficulty_level(&self) -> u8 {
        self.get_period().difficulty_level()
    }
}

impl ArticleView for Article {
    fn get_id(&self) -> &str {
        &self.id
    }
    fn get_title(&self) -> &str {
        &self.title
    }
    fn get_period(&self) -> HistoricalPeriod {
        self.period
    }
    fn get_word_count(&self) -> u32 {
        self.word_count
    }
}

impl ArticleView for ArticleRecord {
    fn get_id(&self) -> &str {
        &self.id
    }
    fn get_title(&self) -> &str {
        &self.title
    }
    fn get_period(&self) -> HistoricalPeriod {
        self.period
    }
    fn get_word_count(&self) -> u32 {
        self.word_count
    }
}

/// 新しい記事IDを生成する
pub fn generate_article_id() -> String {
    Uuid::new_v4().to_string()
}

impl Article {
    /// IDを自動生成して記事を作成
    pub fn new<T, A>(
        title: T,
        period: HistoricalPeriod,
        author: A,
        word_count: u32,
        tags: Vec<String>,
    ) -> Self
    where
        T: Into<String>,
        A: Into<String>,
    {
        Self::with_id(generate_article_id(), title, period, author, word_count, tags)
    }

    /// 呼び出し側が指定したIDで記事を作成
    pub fn with_id<I, T, A>(
        id: I,
        title: T,
        period: HistoricalPeriod,
        author: A,
        word_count: u32,
        tags: Vec<String>,
    ) -> Self
    where
        I: Into<String>,
        T: Into<String>,
        A: Into<String>,
    {
        Self {
            id: id.into(),
            title: title.into(),
            period,
            author: author.into(),
            word_count,
            tags,
        }
    }

    /// 一覧表示用の詳細情報
    pub fn full_info(&self) -> String {
        format!(
            "ID:{}, '{}', період: {}, автор: {}, слів: {}",
            self.id,
            self.title,
            self.period.name(),
            self.author,
            self.word_count
        )
    }

    /// 永続化用のレコードに変換する
    /// IDが空白の場合は未指定とみなし、新しく生成する
    pub fn to_record(&self) -> ArticleRecord {
        let id = if self.id.trim().is_empty() {
            generate_article_id()
        } else {
            self.id.clone()
        };

        ArticleRecord {
            id,
            title: self.title.clone(),
            period: self.period,
            author: self.author.clone(),
            word_count: self.word_count,
            tags: self.tags.clone(),
        }
    }
}

impl ArticleRecord {
    /// 保存用に連結したタグ文字列
    pub fn encoded_tags(&self) -> String {
        encode_tags(&self.tags)
    }

    /// ドメイン表現に変換する
    pub fn to_article(&self) -> Article {
        Article::from(self.clone())
    }
}

impl From<ArticleRecord> for Article {
    fn from(record: ArticleRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            period: record.period,
            author: record.author,
            word_count: record.word_count,
            tags: record.tags,
        }
    }
}

impl From<&Article> for ArticleRecord {
    fn from(article: &Article) -> Self {
        article.to_record()
    }
}

/// タグを", "で連結する
pub fn encode_tags(tags: &[String]) -> String {
    tags.join(TAG_SEPARATOR)
}

/// 連結形式では元に戻せないタグを探す
/// 空文字列・前後の空白・区切り文字を含むタグは分解時に別の値になる
pub fn find_unencodable_tag(tags: &[String]) -> Option<&str> {
    tags.iter()
        .map(String::as_str)
        .find(|tag| tag.is_empty() || tag.trim() != *tag || tag.contains(TAG_SEPARATOR))
}

/// 保存されたタグ文字列を分解する（空文字列は空リスト）
pub fn decode_tags(data: &str) -> Vec<String> {
    if data.is_empty() {
        return Vec::new();
    }
    data.split(TAG_SEPARATOR)
        .map(|tag| tag.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ArticleRecord {
        ArticleRecord {
            id: "rec-1".to_string(),
            title: "Київська Русь".to_string(),
            period: HistoricalPeriod::KyivRus,
            author: "Нестор Літописець".to_string(),
            word_count: 900,
            tags: vec!["давня історія".to_string(), "релігія".to_string()],
        }
    }

    mod conversion {
        use super::*;

        #[test]
        fn test_record_article_round_trip() {
            let record = sample_record();
            let article = record.to_article();
            assert_eq!(article.to_record(), record);
        }

        #[test]
        fn test_to_record_preserves_caller_id() {
            let article = Article::with_id(
                "custom-id",
                "Утворення УНР",
                HistoricalPeriod::RevolutionPeriod,
                "Михайло Грушевський",
                1200,
                vec![],
            );
            assert_eq!(article.to_record().id, "custom-id");
        }

        #[test]
        fn test_to_record_generates_id_when_blank() {
            let article = Article::with_id("  ", "Без ID", HistoricalPeriod::SovietEra, "", 0, vec![]);
            let record = article.to_record();
            assert!(!record.id.trim().is_empty());
            assert!(Uuid::parse_str(&record.id).is_ok());
        }

        #[test]
        fn test_new_generates_unique_ids() {
            let a = Article::new("A", HistoricalPeriod::CossackEra, "x", 1, vec![]);
            let b = Article::new("A", HistoricalPeriod::CossackEra, "x", 1, vec![]);
            assert_ne!(a.id, b.id);
        }
    }

    mod derived_values {
        use super::*;

        #[test]
        fn test_read_time_minutes() {
            // 900 / 200 + 1 = 5（整数除算）
            let article = sample_record().to_article();
            assert_eq!(article.read_time_minutes(), 5);

            let short = Article::new("Коротка", HistoricalPeriod::Independence, "a", 199, vec![]);
            assert_eq!(short.read_time_minutes(), 1);
            let exact = Article::new("Рівно", HistoricalPeriod::Independence, "a", 200, vec![]);
            assert_eq!(exact.read_time_minutes(), 2);
            assert_eq!(sample_record().read_time_minutes(), 5);
        }

        #[test]
        fn test_full_info_and_difficulty() {
            let article = sample_record().to_article();
            assert_eq!(
                article.full_info(),
                "ID:rec-1, 'Київська Русь', період: KYIV_RUS, автор: Нестор Літописець, слів: 900"
            );
            assert_eq!(article.difficulty_level(), 3);
        }
    }

    mod tag_encoding {
        use super::*;

        #[test]
        fn test_encode_decode_tags() {
            let record = sample_record();
            assert_eq!(record.encoded_tags(), "давня історія, релігія");
            assert_eq!(decode_tags(&record.encoded_tags()), record.tags);
        }

        #[test]
        fn test_empty_tags() {
            assert_eq!(encode_tags(&[]), "");
            assert!(decode_tags("").is_empty());
        }

        #[test]
        fn test_find_unencodable_tag() {
            let tags = |list: &[&str]| -> Vec<String> { list.iter().map(|t| t.to_string()).collect() };

            assert_eq!(find_unencodable_tag(&sample_record().tags), None);
            assert_eq!(find_unencodable_tag(&tags(&["a,", "b"])), None);
            assert_eq!(find_unencodable_tag(&tags(&["ok", "a, b"])), Some("a, b"));
            assert_eq!(find_unencodable_tag(&tags(&[" x "])), Some(" x "));
            assert_eq!(find_unencodable_tag(&tags(&[""])), Some(""));
        }
    }
}
