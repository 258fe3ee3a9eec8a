//! Article Models
//!
//! ## Detail layout
//! An article detail renders as a flat list of [`BlockType`]s:
//! thumbnail, title, editor note, the body blocks in server order, end note.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Backend article identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(pub i64);

// ============================================================================
// Detail
// ============================================================================

/// One renderable article block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockType {
    Thumbnail {
        image_url: String,
        caption: String,
        is_marked: bool,
    },
    ArticleTitle {
        title: String,
        author: String,
    },
    EditorNote {
        note: String,
        required_time: u32,
    },
    ChapterTitle {
        text: String,
    },
    Body {
        text: String,
    },
    GeneralTitle {
        text: String,
    },
    Image {
        image_url: String,
        caption: String,
    },
    EndNote,
}

impl BlockType {
    /// Block kind as sent by the backend, for body blocks
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Thumbnail { .. } => "THUMBNAIL",
            Self::ArticleTitle { .. } => "ARTICLE_TITLE",
            Self::EditorNote { .. } => "EDITOR_NOTE",
            Self::ChapterTitle { .. } => "CHAPTER_TITLE",
            Self::Body { .. } => "BODY",
            Self::GeneralTitle { .. } => "GENERAL_TITLE",
            Self::Image { .. } => "IMAGE",
            Self::EndNote => "END_NOTE",
        }
    }
}

/// Full article as shown on the detail screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDetail {
    pub id: ArticleId,
    pub title: String,
    pub author: String,
    pub main_image_url: String,
    pub main_image_caption: String,
    pub editor_note: String,
    pub required_time: u32,
    pub is_marked: bool,
    /// Body blocks only (chapter titles, paragraphs, images)
    pub contents: Vec<BlockType>,
}

impl ArticleDetail {
    /// Flatten into the rendered block list
    pub fn blocks(&self) -> Vec<BlockType> {
        let mut blocks = Vec::with_capacity(self.contents.len() + 4);
        blocks.push(BlockType::Thumbnail {
            image_url: self.main_image_url.clone(),
            caption: self.main_image_caption.clone(),
            is_marked: self.is_marked,
        });
        blocks.push(BlockType::ArticleTitle {
            title: self.title.clone(),
            author: self.author.clone(),
        });
        blocks.push(BlockType::EditorNote {
            note: self.editor_note.clone(),
            required_time: self.required_time,
        });
        blocks.extend(self.contents.iter().cloned());
        blocks.push(BlockType::EndNote);
        blocks
    }
}

// ============================================================================
// Lists
// ============================================================================

/// Today's recommended article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodayArticle {
    pub baby_nickname: String,
    pub week: u8,
    pub day: u8,
    pub article_id: ArticleId,
    pub title: String,
    pub main_image_url: String,
    pub article_description: String,
    pub required_time: u32,
}

/// Article list row (category list, bookmarks)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleSummary {
    pub article_id: ArticleId,
    pub title: String,
    pub main_image_url: String,
    pub first_body_content: String,
    pub required_time: u32,
    pub is_marked: bool,
    pub tags: Vec<String>,
}

/// Article categories browsable from the category tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArticleCategory {
    Body,
    Emotion,
    Couple,
    Daddy,
    Baby,
    Finance,
    Policy,
    Checklist,
}

impl ArticleCategory {
    pub const ALL: [ArticleCategory; 8] = [
        Self::Body,
        Self::Emotion,
        Self::Couple,
        Self::Daddy,
        Self::Baby,
        Self::Finance,
        Self::Policy,
        Self::Checklist,
    ];

    /// Query value for `GET /v1/article?category=`
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Body => "BODY",
            Self::Emotion => "EMOTION",
            Self::Couple => "COUPLE",
            Self::Daddy => "DADDY",
            Self::Baby => "BABY",
            Self::Finance => "FINANCE",
            Self::Policy => "POLICY",
            Self::Checklist => "CHECKLIST",
        }
    }

    pub const fn title(&self) -> &'static str {
        match self {
            Self::Body => "Body changes",
            Self::Emotion => "Emotions",
            Self::Couple => "Couple",
            Self::Daddy => "Daddy's role",
            Self::Baby => "Baby",
            Self::Finance => "Finance",
            Self::Policy => "Policy and benefits",
            Self::Checklist => "Checklist",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail() -> ArticleDetail {
        ArticleDetail {
            id: ArticleId(3),
            title: "Week 12".into(),
            author: "editor".into(),
            main_image_url: "https://img/1.png".into(),
            main_image_caption: "cover".into(),
            editor_note: "note".into(),
            required_time: 5,
            is_marked: true,
            contents: vec![
                BlockType::ChapterTitle { text: "one".into() },
                BlockType::Body { text: "body".into() },
            ],
        }
    }

    #[test]
    fn test_blocks_layout() {
        let blocks = detail().blocks();
        let names: Vec<_> = blocks.iter().map(BlockType::wire_name).collect();
        assert_eq!(
            names,
            [
                "THUMBNAIL",
                "ARTICLE_TITLE",
                "EDITOR_NOTE",
                "CHAPTER_TITLE",
                "BODY",
                "END_NOTE"
            ]
        );
        assert!(matches!(
            blocks[0],
            BlockType::Thumbnail {
                is_marked: true,
                ..
            }
        ));
    }

    #[test]
    fn test_category_lookup_by_key() {
        for category in ArticleCategory::ALL {
            assert_eq!(ArticleCategory::from_key(category.key()), Some(category));
        }
        assert_eq!(ArticleCategory::from_key("UNKNOWN"), None);
        assert_eq!(
            serde_json::to_string(&ArticleCategory::Checklist).unwrap(),
            r#""CHECKLIST""#
        );
    }

    #[test]
    fn test_article_id_display() {
        assert_eq!(ArticleId(42).to_string(), "42");
        assert_eq!(serde_json::to_string(&ArticleId(42)).unwrap(), "42");
    }
}
