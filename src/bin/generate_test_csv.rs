use std::path::Path;

use chrono::{Duration, NaiveDate};

const HEADER: [&str; 12] = [
    "video_id",
    "title",
    "publishedAt",
    "channelId",
    "channelTitle",
    "categoryId",
    "categoryName",
    "trending_date",
    "view_count",
    "likes",
    "dislikes",
    "comment_count",
];

const CATEGORIES: [(u32, &str); 8] = [
    (1, "Film & Animation"),
    (2, "Autos & Vehicles"),
    (10, "Music"),
    (17, "Sports"),
    (20, "Gaming"),
    (22, "People & Blogs"),
    (24, "Entertainment"),
    (28, "Science & Technology"),
];

/// Simple pseudo-random number generator (xorshift)
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }
}

struct Video {
    id: String,
    title: String,
    published: NaiveDate,
    channel: usize,
    category: (u32, &'static str),
    trending_after_days: i64,
    views: u64,
    likes: u64,
    dislikes: u64,
    comments: u64,
}

fn timestamp(date: NaiveDate, hour: u32) -> String {
    format!("{}T{:02}:00:00Z", date.format("%Y-%m-%d"), hour)
}

fn write_csv(path: &Path, videos: &[Video]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(HEADER)?;

    for v in videos {
        let trending = v.published + Duration::days(v.trending_after_days);
        writer.write_record([
            v.id.clone(),
            v.title.clone(),
            timestamp(v.published, 15),
            format!("UC{:06}", v.channel),
            format!("Channel {}", v.channel),
            v.category.0.to_string(),
            v.category.1.to_string(),
            timestamp(trending, 0),
            v.views.to_string(),
            v.likes.to_string(),
            v.dislikes.to_string(),
            v.comments.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// A year of trending videos across all categories
fn trending_year(count: usize, seed: u64) -> Vec<Video> {
    let mut rng = SimpleRng::new(seed);
    let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap_or_default();

    (0..count)
        .map(|i| {
            let category = CATEGORIES[rng.below(CATEGORIES.len() as u64) as usize];
            // Heavy tail: most videos are small, a few are huge
            let views = 1_000 + rng.below(50_000) * (1 + rng.below(4)).pow(4);
            let likes = views / (10 + rng.below(30));
            Video {
                id: format!("vid{:05}", i),
                title: format!("{} video #{}", category.1, i),
                published: start + Duration::days(rng.below(365) as i64),
                channel: rng.below(40) as usize,
                category,
                trending_after_days: 1 + rng.below(7) as i64,
                views,
                likes,
                dislikes: likes / (5 + rng.below(40)),
                comments: likes / (3 + rng.below(20)),
            }
        })
        .collect()
}

/// Three rows, one of them published after the others' window
fn window_example() -> Vec<Video> {
    let video = |id: &str, published: NaiveDate, category: (u32, &'static str)| Video {
        id: id.to_string(),
        title: format!("Window example {}", id),
        published,
        channel: 1,
        category,
        trending_after_days: 2,
        views: 1_000,
        likes: 100,
        dislikes: 10,
        comments: 20,
    };
    let day = |m, d| NaiveDate::from_ymd_opt(2022, m, d).unwrap_or_default();

    vec![
        video("in1", day(1, 10), CATEGORIES[2]),
        video("out", day(4, 2), CATEGORIES[6]),
        video("in2", day(2, 27), CATEGORIES[6]),
    ]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = Path::new("test_data");
    std::fs::create_dir_all(dir)?;

    // 2000 videos over 2021 in 8 categories and 40 channels
    write_csv(&dir.join("trending.csv"), &trending_year(2000, 12345))?;

    // Small dataset for --list-months and month window checks
    write_csv(&dir.join("window.csv"), &window_example())?;

    println!("Generated: trending.csv, window.csv");
    Ok(())
}
