//! パス書き換えテーブル
//!
//! アクション形式のパス（`/update_jobs/:id/details` 等）を
//! フィクスチャのリソース形式のパス（`/update_jobs/:id`）に変換する。

use std::collections::HashMap;
use std::sync::Arc;

/// update job APIのアクションパス → フィクスチャのリソースパス
pub const UPDATE_JOB_REWRITES: &[(&str, &str)] = &[
    ("/update_jobs/:id/details", "/update_jobs/:id"),
    ("/update_jobs/:id/credentials", "/credentials/:id"),
    (
        "/update_jobs/:id/record_update_job_error",
        "/update_job_errors/:id",
    ),
    ("/update_jobs/:id/mark_as_processed", "/update_jobs/:id"),
    ("/update_jobs/:id/update_dependency_list", "/dependencies/:id"),
    (
        "/update_jobs/:id/record_package_manager_version",
        "/update_jobs/:id",
    ),
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

#[derive(Debug, Clone)]
struct RewriteRule {
    pattern: Vec<Segment>,
    target: Vec<Segment>,
}

impl RewriteRule {
    fn parse(from: &str, to: &str) -> Self {
        Self {
            pattern: parse_template(from),
            target: parse_template(to),
        }
    }

    fn apply(&self, segments: &[&str]) -> Option<String> {
        if segments.len() != self.pattern.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (segment, expected) in segments.iter().zip(&self.pattern) {
            match expected {
                Segment::Literal(literal) if literal == segment => {}
                Segment::Param(name) if !segment.is_empty() => {
                    params.insert(name.as_str(), *segment);
                }
                _ => return None,
            }
        }

        let mut rewritten = String::new();
        for segment in &self.target {
            rewritten.push('/');
            match segment {
                Segment::Literal(literal) => rewritten.push_str(literal),
                Segment::Param(name) => rewritten.push_str(params.get(name.as_str()).copied()?),
            }
        }
        if rewritten.is_empty() {
            rewritten.push('/');
        }
        Some(rewritten)
    }
}

fn parse_template(template: &str) -> Vec<Segment> {
    split_path(template)
        .into_iter()
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) => Segment::Param(name.to_string()),
            None => Segment::Literal(segment.to_string()),
        })
        .collect()
}

fn split_path(path: &str) -> Vec<&str> {
    let trimmed = path.trim_start_matches('/');
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('/').collect()
}

/// パス書き換えテーブル
///
/// 登録順に評価し、最初に一致したルールで書き換える。
#[derive(Debug, Clone)]
pub struct RewriteTable {
    rules: Arc<Vec<RewriteRule>>,
}

impl RewriteTable {
    /// `(from, to)` のテンプレート組からテーブルを作成
    ///
    /// `:name` のセグメントは任意の1セグメントに一致し、`to` 側の同名セグメントに代入される。
    pub fn new<'a>(rules: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            rules: Arc::new(
                rules
                    .into_iter()
                    .map(|(from, to)| RewriteRule::parse(from, to))
                    .collect(),
            ),
        }
    }

    /// update job API用のデフォルトテーブル
    pub fn update_jobs() -> Self {
        Self::new(UPDATE_JOB_REWRITES.iter().copied())
    }

    /// パスを書き換える（一致するルールがなければ `None`）
    pub fn rewrite(&self, path: &str) -> Option<String> {
        let segments = split_path(path);
        self.rules.iter().find_map(|rule| rule.apply(&segments))
    }
}

impl Default for RewriteTable {
    fn default() -> Self {
        Self::update_jobs()
    }
}
