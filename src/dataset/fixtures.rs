//! Row builders shared by unit tests

use chrono::{DateTime, TimeZone, Utc};

use super::Row;

pub(crate) fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

/// Row in `category` published on the given day, trending two days later
pub(crate) fn row(video_id: &str, category_id: u32, category: &str, published: (i32, u32, u32)) -> Row {
    let (y, m, d) = published;
    let published_at = at(y, m, d);
    Row {
        video_id: video_id.to_string(),
        title: format!("Video {video_id}"),
        channel_title: format!("Channel {video_id}"),
        category_id,
        category_name: category.to_string(),
        published_at: Some(published_at),
        trending_date: Some(published_at + chrono::Duration::days(2)),
        view_count: 1000,
        likes: 100,
        dislikes: 10,
        comment_count: 20,
    }
}

/// Same row with explicit engagement counts (views, likes, comments, dislikes)
pub(crate) fn row_with_counts(
    video_id: &str,
    category_id: u32,
    category: &str,
    published: (i32, u32, u32),
    counts: (u64, u64, u64, u64),
) -> Row {
    let (views, likes, comments, dislikes) = counts;
    Row {
        view_count: views,
        likes,
        comment_count: comments,
        dislikes,
        ..row(video_id, category_id, category, published)
    }
}

/// Rows across three categories and five months (2021-01 .. 2021-05)
pub(crate) fn sample_rows() -> Vec<Row> {
    vec![
        row_with_counts("a", 10, "Music", (2021, 1, 5), (5_000, 400, 30, 5)),
        row_with_counts("b", 24, "Entertainment", (2021, 1, 20), (12_000, 900, 80, 40)),
        row_with_counts("c", 20, "Gaming", (2021, 2, 1), (800, 90, 12, 1)),
        row_with_counts("d", 10, "Music", (2021, 3, 14), (25_000, 2_000, 150, 60)),
        row_with_counts("e", 24, "Entertainment", (2021, 3, 31), (3_000, 120, 9, 30)),
        row_with_counts("f", 20, "Gaming", (2021, 4, 10), (7_500, 600, 70, 8)),
        row_with_counts("g", 10, "Music", (2021, 5, 2), (1_000_000, 50_000, 4_000, 900)),
        row_with_counts("h", 24, "Entertainment", (2021, 5, 28), (40, 3, 0, 0)),
    ]
}
