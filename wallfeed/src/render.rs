use chrono::{DateTime, Local};
use owo_colors::OwoColorize;

use crate::models::wall::{Post, Resolution};
use crate::resolver::HydratedFeed;

const INDENT: &str = "    ";

/// Human readable tree of the feed, reposts indented under their reposter.
pub fn format_feed(feed: &HydratedFeed) -> String {
    let mut lines = Vec::new();
    for post in &feed.items {
        format_post(post, 0, &mut lines);
    }

    lines.push(format!(
        "{} posts, {} fetches, {} unresolved",
        feed.items.len(),
        feed.stats.fetches,
        feed.stats.unresolved
    ));

    lines.join("\n")
}

fn format_post(post: &Post, depth: usize, lines: &mut Vec<String>) {
    let indent = INDENT.repeat(depth);
    let author = post
        .author
        .as_ref()
        .map(|profile| profile.name.as_str())
        .unwrap_or("unknown");

    let mut header = format!(
        "{}{} {} ({})",
        indent,
        post.key().bright_cyan(),
        author.bold(),
        format_date(post.date)
    );
    if post.is_pinned {
        header.push_str(&format!(" {}", "[pinned]".bright_green()));
    }
    if post.resolution == Resolution::Unresolved {
        header.push_str(&format!(" {}", "[unresolved]".yellow()));
    }
    lines.push(header);

    if let Some(first_line) = post.text.lines().find(|line| !line.trim().is_empty()) {
        lines.push(format!("{}{}{}", indent, INDENT, first_line.trim()));
    }
    if !post.attachments.is_empty() {
        lines.push(format!(
            "{}{}{}",
            indent,
            INDENT,
            format!("{} attachment(s)", post.attachments.len()).dimmed()
        ));
    }

    for entry in &post.copy_history {
        format_post(entry, depth + 1, lines);
    }
}

fn format_date(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|date| {
            date.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "no date".to_string())
}
