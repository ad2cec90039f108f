//! Turn records into table rows and cards for the terminal.

use std::fmt;

use crate::client::model::{Example, NewsItem, Repository};
use crate::client::news::parse_date;
use crate::client::projects::{issue_url, TABLE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Check,
    Cross,
}

impl From<bool> for Mark {
    fn from(ok: bool) -> Self {
        if ok {
            Mark::Check
        } else {
            Mark::Cross
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mark::Check => "✓",
            Mark::Cross => "✗",
        })
    }
}

/// One repository as shown in the project tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRow {
    pub slug: String,
    pub no_code_of_conduct: Mark,
    pub master_branch: Mark,
    pub neutral: Mark,
    /// Only captured projects offer the issue action.
    pub issue_url: Option<String>,
}

impl RepoRow {
    fn new(repo: &Repository, with_issue: bool) -> Self {
        Self {
            slug: repo.slug.clone(),
            no_code_of_conduct: Mark::from(!repo.has_coc),
            master_branch: Mark::from(repo.default_branch_name == "master"),
            neutral: Mark::from(repo.orientation == "neutral"),
            issue_url: with_issue.then(|| issue_url(&repo.slug)),
        }
    }
}

pub fn captured_rows(repos: &[Repository]) -> Vec<RepoRow> {
    repos.iter().take(TABLE_SIZE).map(|r| RepoRow::new(r, true)).collect()
}

pub fn liberated_rows(repos: &[Repository]) -> Vec<RepoRow> {
    repos.iter().take(TABLE_SIZE).map(|r| RepoRow::new(r, false)).collect()
}

/// One news item as shown in the feed table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsRow {
    pub slug: String,
    pub orientation: String,
    pub classification: String,
    pub date: String,
}

pub fn news_rows(items: &[NewsItem]) -> Vec<NewsRow> {
    items
        .iter()
        .take(TABLE_SIZE)
        .map(|item| {
            let orientation = item.current_orientation.as_deref().unwrap_or_default();
            let orientation_label = if orientation.is_empty() { "Unknown" } else { orientation };
            let (label, status) = if item.is_political {
                ("Political", "captured")
            } else {
                ("Neutral", "liberated")
            };
            NewsRow {
                slug: item.slug.clone(),
                orientation: join_emoji(orientation_label, status_emoji(orientation)),
                classification: join_emoji(label, status_emoji(status)),
                date: format_date(&item.date),
            }
        })
        .collect()
}

fn join_emoji(text: &str, emoji: &str) -> String {
    if emoji.is_empty() {
        text.to_string()
    } else {
        format!("{text} {emoji}")
    }
}

pub fn status_emoji(status: &str) -> &'static str {
    match status {
        "liberated" => "🎉",
        "captured" => "⚠️",
        "neutral" => "✅",
        _ => "",
    }
}

/// `Month D, YYYY`, or `Invalid Date` when unparseable.
pub fn format_date(raw: &str) -> String {
    parse_date(raw)
        .map(|dt| dt.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| "Invalid Date".to_string())
}

/// A plain-text table. A table without rows shows a single message line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub title: String,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
    pub message: Option<String>,
}

impl Table {
    fn new(title: &str, headers: Vec<&'static str>, rows: Vec<Vec<String>>, empty: &str) -> Self {
        let message = rows.is_empty().then(|| empty.to_string());
        Self {
            title: title.to_string(),
            headers,
            rows,
            message,
        }
    }

    /// Same columns, rows replaced by an error line.
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.rows.clear();
        self.message = Some(message.into());
        self
    }
}

fn width(s: &str) -> usize {
    s.chars().count()
}

fn write_line<'a>(
    f: &mut fmt::Formatter<'_>,
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
) -> fmt::Result {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, w)| format!("{cell}{}", " ".repeat(w.saturating_sub(width(cell)))))
        .collect();
    writeln!(f, "  {}", padded.join("  ").trim_end())
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;

        let mut widths: Vec<usize> = self.headers.iter().map(|h| width(h)).collect();
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(width(cell));
            }
        }

        write_line(f, self.headers.iter().copied(), &widths)?;
        if let Some(message) = &self.message {
            return writeln!(f, "  {message}");
        }
        for row in &self.rows {
            write_line(f, row.iter().map(String::as_str), &widths)?;
        }
        Ok(())
    }
}

const PROJECT_HEADERS: [&str; 4] = ["Project", "No CoC", "Master", "Neutral"];

pub fn captured_table(repos: &[Repository]) -> Table {
    let mut headers = PROJECT_HEADERS.to_vec();
    headers.push("Issue");
    let rows = captured_rows(repos)
        .into_iter()
        .map(|r| {
            vec![
                r.slug,
                r.no_code_of_conduct.to_string(),
                r.master_branch.to_string(),
                r.neutral.to_string(),
                r.issue_url.unwrap_or_default(),
            ]
        })
        .collect();
    Table::new("Captured projects", headers, rows, "No captured projects found.")
}

pub fn liberated_table(repos: &[Repository]) -> Table {
    let rows = liberated_rows(repos)
        .into_iter()
        .map(|r| {
            vec![
                r.slug,
                r.no_code_of_conduct.to_string(),
                r.master_branch.to_string(),
                r.neutral.to_string(),
            ]
        })
        .collect();
    Table::new(
        "Liberated projects",
        PROJECT_HEADERS.to_vec(),
        rows,
        "No liberated projects found.",
    )
}

pub fn news_table(items: &[NewsItem]) -> Table {
    let rows = news_rows(items)
        .into_iter()
        .map(|r| vec![r.slug, r.orientation, r.classification, r.date])
        .collect();
    Table::new(
        "News",
        vec!["Project", "Orientation", "Status", "Date"],
        rows,
        "No news items found.",
    )
}

/// Carousel cards, one block per example.
pub fn example_cards(page: &[Example]) -> String {
    page.iter()
        .map(|e| format!("{}\n  {}\n  Source: {}\n", e.title, e.description, e.source))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(slug: &str, has_coc: bool, branch: &str, orientation: &str) -> Repository {
        Repository {
            slug: slug.into(),
            has_coc,
            default_branch_name: branch.into(),
            orientation: orientation.into(),
            ..Repository::default()
        }
    }

    #[test]
    fn test_repo_marks() {
        let rows = captured_rows(&[repo("a/b", false, "master", "neutral")]);
        assert_eq!(
            rows[0],
            RepoRow {
                slug: "a/b".into(),
                no_code_of_conduct: Mark::Check,
                master_branch: Mark::Check,
                neutral: Mark::Check,
                issue_url: Some("https://github.com/a/b/issues/new".into()),
            }
        );

        let rows = liberated_rows(&[repo("c/d", true, "main", "political")]);
        assert_eq!(rows[0].no_code_of_conduct, Mark::Cross);
        assert_eq!(rows[0].master_branch, Mark::Cross);
        assert_eq!(rows[0].neutral, Mark::Cross);
        assert_eq!(rows[0].issue_url, None);
    }

    #[test]
    fn test_news_row_labels() {
        let rows = news_rows(&[
            NewsItem {
                slug: "a/b".into(),
                current_orientation: Some("neutral".into()),
                is_political: false,
                date: "2025-10-25T18:06:43.377237570Z".into(),
            },
            NewsItem {
                slug: "c/d".into(),
                current_orientation: None,
                is_political: true,
                date: "2024-06-01".into(),
            },
        ]);

        assert_eq!(rows[0].orientation, "neutral ✅");
        assert_eq!(rows[0].classification, "Neutral 🎉");
        assert_eq!(rows[0].date, "October 25, 2025");
        assert_eq!(rows[1].orientation, "Unknown");
        assert_eq!(rows[1].classification, "Political ⚠️");
        assert_eq!(rows[1].date, "June 1, 2024");
    }

    #[test]
    fn test_rows_truncate_to_table_size() {
        let repos: Vec<_> = (0..30).map(|i| repo(&format!("o/{i}"), false, "main", "")).collect();
        assert_eq!(liberated_rows(&repos).len(), TABLE_SIZE);
    }

    #[test]
    fn test_empty_table_shows_message() {
        let text = captured_table(&[]).to_string();
        assert!(text.contains("No captured projects found."));

        let text = news_table(&[])
            .with_error("Failed to load news. Please try again later.")
            .to_string();
        assert!(text.ends_with("  Failed to load news. Please try again later.\n"));
    }

    #[test]
    fn test_table_layout() {
        let repos = [repo("microsoft/vscode", false, "main", "neutral")];
        let text = liberated_table(&repos).to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Liberated projects");
        assert_eq!(lines[1], "  Project           No CoC  Master  Neutral");
        assert_eq!(lines[2], "  microsoft/vscode  ✓       ✗       ✓");
    }
}
