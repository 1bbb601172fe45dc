//! JSON file news adapter.
//!
//! Looks for `<stem>_news.json` under the base directory, an array of
//! article objects. News is decoration: a missing file, unreadable bytes or
//! malformed JSON all degrade to an empty list.

use std::fs;
use std::path::PathBuf;

use crate::adapters::symbol_file_stem;
use crate::domain::snapshot::Article;
use crate::ports::news_port::NewsSource;

pub struct FileNewsAdapter {
    base_path: PathBuf,
}

impl FileNewsAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn news_path(&self, symbol: &str) -> PathBuf {
        self.base_path
            .join(format!("{}_news.json", symbol_file_stem(symbol)))
    }
}

impl NewsSource for FileNewsAdapter {
    fn recent(&self, symbol: &str, limit: usize) -> Vec<Article> {
        let path = self.news_path(symbol);
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => return Vec::new(),
        };
        let mut articles: Vec<Article> = match serde_json::from_str(&content) {
            Ok(a) => a,
            Err(e) => {
                eprintln!("Warning: ignoring malformed news file {}: {}", path.display(), e);
                return Vec::new();
            }
        };
        articles.truncate(limit);
        articles
    }
}
