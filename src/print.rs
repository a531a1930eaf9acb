//! Plain-text output for the `list` and `show` subcommands.
//!
//! These go through the degrading gateway reads: a failed fetch prints the
//! empty or not-found text while the warning notice goes to stderr.

use chrono::{DateTime, Utc};

use crate::api::{Comment, Issue, IssueGateway, IssueQuery, RepoRef};
use crate::i18n::{t, Language};
use crate::posts::format::{card_labels, long_date, preview, relative_time};
use crate::ui::markdown::to_plain_text;

/// Fetch one page of posts and format it.
pub async fn list_page(gateway: &IssueGateway, query: &IssueQuery, language: Language) -> String {
    let issues = gateway.list_issues(query).await;
    format_post_cards(&query.repo, &issues, language, Utc::now())
}

/// Fetch a post with its comments and format it.
pub async fn show_post(gateway: &IssueGateway, repo: &RepoRef, number: u64, language: Language) -> String {
    let (issue, comments) = tokio::join!(
        gateway.get_issue(repo, number),
        gateway.list_comments(repo, number)
    );
    match issue {
        Some(issue) => format_post(&issue, &comments, language, Utc::now()),
        None => format!("{}\n", t(language, "detail", "notFound")),
    }
}

/// The post list as text cards.
pub fn format_post_cards(repo: &RepoRef, issues: &[Issue], language: Language, now: DateTime<Utc>) -> String {
    let mut out = format!("{} {}\n", t(language, "posts", "title"), repo);

    if issues.is_empty() {
        out.push('\n');
        out.push_str(&t(language, "posts", "noResults"));
        out.push('\n');
        return out;
    }

    for issue in issues {
        out.push('\n');
        out.push_str(&format!("#{} {}\n", issue.number, issue.title));
        out.push_str(&format!(
            "    {} · {} · {} {}\n",
            relative_time(&issue.created_at, &now),
            issue.author.login,
            issue.comment_count,
            t(language, "detail", "comments").to_lowercase(),
        ));

        let body = to_plain_text(issue.body_text());
        let text = preview(body.trim()).unwrap_or_else(|| t(language, "posts", "noContent"));
        out.push_str(&format!("    {}\n", text.replace('\n', " ")));

        let (shown, hidden) = card_labels(issue.labels.iter().map(|l| l.name.as_str()));
        if !shown.is_empty() {
            let mut labels: Vec<String> = shown.iter().map(|name| format!("[{}]", name)).collect();
            if hidden > 0 {
                labels.push(format!("+{} {}", hidden, t(language, "posts", "more")));
            }
            out.push_str(&format!("    {}\n", labels.join(" ")));
        }
    }
    out
}

/// A full post followed by its comments.
pub fn format_post(issue: &Issue, comments: &[Comment], language: Language, now: DateTime<Utc>) -> String {
    let mut out = format!("{}\n", issue.title);
    out.push_str(&format!("{} · {}\n", issue.author.login, long_date(&issue.created_at)));
    if !issue.labels.is_empty() {
        let labels: Vec<String> = issue.labels.iter().map(|l| format!("[{}]", l.name)).collect();
        out.push_str(&labels.join(" "));
        out.push('\n');
    }
    out.push_str(&format!("{}: {}\n\n", t(language, "detail", "viewOnGithub"), issue.html_url));
    out.push_str(to_plain_text(issue.body_text()).trim_end());
    out.push_str("\n\n");

    out.push_str(&format!("{} ({})\n", t(language, "detail", "comments"), comments.len()));
    if comments.is_empty() {
        out.push_str(&format!(
            "\n{}\n{}\n",
            t(language, "comments", "none"),
            t(language, "comments", "beFirst")
        ));
        return out;
    }

    for comment in comments {
        out.push_str(&format!(
            "\n{} · {}\n",
            comment.author.login,
            relative_time(&comment.created_at, &now)
        ));
        for line in to_plain_text(comment.body_text()).trim_end().lines() {
            out.push_str(&format!("    {}\n", line));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;

    use super::*;
    use crate::api::testing::{comment, issue, FakeSource};
    use crate::api::notice_channel;
    use crate::api::types::Label;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 7, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_cards_show_meta_preview_and_labels() {
        let mut post = issue(3);
        post.body = Some("**Hello** there".to_string());
        post.labels = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|name| Label {
                name: name.to_string(),
                color: String::new(),
            })
            .collect();

        let out = format_post_cards(&RepoRef::default(), &[post], Language::En, now());

        assert!(out.starts_with("Blog Posts from facebook/react\n"));
        assert!(out.contains("#3 Post 3"));
        assert!(out.contains("3 days ago · octocat · 1 comments"));
        assert!(out.contains("    Hello there"));
        assert!(out.contains("[a] [b] [c] +2 more"));
    }

    #[test]
    fn test_cards_without_body_show_placeholder() {
        let mut post = issue(1);
        post.body = None;
        let out = format_post_cards(&RepoRef::default(), &[post], Language::Pt, now());
        assert!(out.contains("Nenhum conteúdo disponível"));
    }

    #[test]
    fn test_empty_list() {
        let out = format_post_cards(&RepoRef::new("a", "b"), &[], Language::En, now());
        assert!(out.contains("Blog Posts from a/b"));
        assert!(out.contains("No posts found"));
    }

    #[test]
    fn test_post_with_comments() {
        let post = issue(2);
        let comments = vec![comment(1, "Nice *post*"), comment(2, "line one\nline two")];
        let out = format_post(&post, &comments, Language::En, now());

        assert!(out.starts_with("Post 2\noctocat · March 4, 2024\n[blog]\n"));
        assert!(out.contains("View on GitHub: https://github.com/facebook/react/issues/2"));
        assert!(out.contains("Body of post 2"));
        assert!(out.contains("Comments (2)"));
        assert!(out.contains("hubot · 2 days ago"));
        assert!(out.contains("    Nice post"));
    }

    #[test]
    fn test_post_without_comments_invites_first() {
        let out = format_post(&issue(2), &[], Language::Pt, now());
        assert!(out.contains("Comentários (0)"));
        assert!(out.contains("Nenhum Comentário Ainda"));
    }

    #[tokio::test]
    async fn test_show_missing_post_prints_not_found() {
        let (tx, _rx) = notice_channel();
        let gateway = IssueGateway::new(Arc::new(FakeSource::with_issues(2)), tx);
        let out = show_post(&gateway, &RepoRef::default(), 9, Language::En).await;
        assert_eq!(out, "Post not found\n");
    }

    #[tokio::test]
    async fn test_list_failure_prints_empty_and_reports() {
        let (tx, mut rx) = notice_channel();
        let gateway = IssueGateway::new(Arc::new(FakeSource::failing()), tx);
        let query = IssueQuery::new(RepoRef::default(), 1, 10);

        let out = list_page(&gateway, &query, Language::En).await;

        assert!(out.contains("No posts found"));
        assert!(rx.try_recv().is_ok());
    }

    #[tokio::test]
    async fn test_list_page_formats_fetched_posts() {
        let (tx, _rx) = notice_channel();
        let gateway = IssueGateway::new(Arc::new(FakeSource::with_issues(12)), tx);
        let query = IssueQuery::new(RepoRef::default(), 2, 10);

        let out = list_page(&gateway, &query, Language::En).await;

        assert!(out.contains("#2 Post 2"));
        assert!(out.contains("#1 Post 1"));
        assert!(!out.contains("#3 "));
    }
}
