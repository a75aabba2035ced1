//! Common test utilities

use std::io::Write;
use std::path::Path;

pub const HEADER: &str = "video_id,title,publishedAt,channelId,channelTitle,categoryId,\
categoryName,trending_date,view_count,likes,dislikes,comment_count";

/// One CSV data row
pub struct Video<'a> {
    pub id: &'a str,
    pub channel: &'a str,
    pub category_id: u32,
    pub category: &'a str,
    /// publishedAt as written to the file
    pub published: &'a str,
    pub trending: &'a str,
    /// (views, likes, dislikes, comments)
    pub counts: (u64, u64, u64, u64),
}

impl Video<'_> {
    fn to_line(&self) -> String {
        let (views, likes, dislikes, comments) = self.counts;
        format!(
            "{id},\"Title {id}\",{published},UC{id},{channel},{cat_id},{cat},{trending},{views},{likes},{dislikes},{comments}",
            id = self.id,
            published = self.published,
            channel = self.channel,
            cat_id = self.category_id,
            cat = self.category,
            trending = self.trending,
        )
    }
}

/// Shorthand for a video with the given publish date and counts
pub fn video<'a>(
    id: &'a str,
    category_id: u32,
    category: &'a str,
    published: &'a str,
    counts: (u64, u64, u64, u64),
) -> Video<'a> {
    Video {
        id,
        channel: "Channel One",
        category_id,
        category,
        published,
        trending: "2021-12-31T00:00:00Z",
        counts,
    }
}

/// Videos in three categories spread over 2021-01 .. 2021-04
pub fn sample_videos() -> Vec<Video<'static>> {
    vec![
        Video {
            channel: "Beats",
            ..video("a", 10, "Music", "2021-01-05T10:00:00Z", (5000, 400, 5, 30))
        },
        Video {
            channel: "Funny",
            ..video("b", 24, "Entertainment", "2021-01-20T10:00:00Z", (12000, 900, 40, 80))
        },
        Video {
            channel: "Pixels",
            ..video("c", 20, "Gaming", "2021-02-01T10:00:00Z", (800, 90, 1, 12))
        },
        Video {
            channel: "Beats",
            ..video("d", 10, "Music", "2021-03-14T10:00:00Z", (25000, 2000, 60, 150))
        },
        Video {
            channel: "Funny",
            ..video("e", 24, "Entertainment", "2021-04-02T10:00:00Z", (3000, 120, 30, 9))
        },
    ]
}

/// Write raw CSV text to the given path
pub fn write_text(path: &Path, text: &str) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(text.as_bytes())
}

/// Write videos as a trending CSV to the given path
pub fn write_csv(path: &Path, videos: &[Video]) -> std::io::Result<()> {
    let mut text = String::from(HEADER);
    text.push('\n');
    for v in videos {
        text.push_str(&v.to_line());
        text.push('\n');
    }
    write_text(path, &text)
}
