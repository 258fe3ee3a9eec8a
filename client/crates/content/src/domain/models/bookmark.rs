//! Bookmark Models

use super::article::{ArticleId, ArticleSummary};

/// Bookmarked articles of the member
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkList {
    pub baby_nickname: String,
    pub articles: Vec<ArticleSummary>,
}

impl BookmarkList {
    /// Drop an article after it was un-bookmarked
    pub fn remove(&mut self, article_id: ArticleId) -> bool {
        let before = self.articles.len();
        self.articles.retain(|a| a.article_id != article_id);
        self.articles.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: i64) -> ArticleSummary {
        ArticleSummary {
            article_id: ArticleId(id),
            title: format!("article {id}"),
            main_image_url: String::new(),
            first_body_content: String::new(),
            required_time: 3,
            is_marked: true,
            tags: vec![],
        }
    }

    #[test]
    fn test_remove() {
        let mut list = BookmarkList {
            baby_nickname: "콩콩이".into(),
            articles: vec![summary(1), summary(2)],
        };
        assert!(list.remove(ArticleId(1)));
        assert!(!list.remove(ArticleId(1)));
        assert_eq!(list.articles, vec![summary(2)]);
    }
}
