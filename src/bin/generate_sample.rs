use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let platforms = ["twitter", "facebook", "instagram", "tiktok"];
    let authors = [
        "news_daily",
        "tech_talk",
        "foodie_fan",
        "sports_hub",
        "travel_bug",
        "meme_lord",
    ];
    let topics = [
        "breaking news about the local election results",
        "this recipe changed how I cook pasta forever",
        "incredible sunset from the mountain trail today",
        "the team pulled off an amazing comeback win",
        "new phone review: battery life is outstanding",
        "can't believe how fast this year is going",
        "weekend market finds and small business gems",
        "debate night highlights and reactions thread",
    ];

    // Posts spread over ninety days from a fixed origin.
    let origin = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .context("valid origin timestamp")?;
    let rows = 500;

    let output_path = "sample_social.csv";
    let mut writer = csv::Writer::from_path(output_path).context("creating output file")?;
    writer
        .write_record([
            "post_id", "timestamp", "platform", "author", "likes", "shares", "comments", "text",
        ])
        .context("writing header")?;

    for post_id in 0..rows {
        let day = (rng.next_u64() % 90) as i64;
        let minute = (rng.next_u64() % (24 * 60)) as i64;
        let ts = origin + Duration::days(day) + Duration::minutes(minute);

        let platform = rng.pick(&platforms);
        let author = rng.pick(&authors);
        let likes = rng.gauss(120.0, 60.0).max(0.0).round();
        let shares = rng.gauss(25.0, 15.0).max(0.0).round();
        let comments = rng.gauss(12.0, 8.0).max(0.0).round();
        let text = format!("{} #{}", rng.pick(&topics), platform);

        // Sprinkle missing cells so the missing-value report has work to do.
        let likes_field = if rng.next_f64() < 0.05 {
            String::new()
        } else {
            likes.to_string()
        };
        let text_field = if rng.next_f64() < 0.03 { String::new() } else { text };

        writer
            .write_record([
                post_id.to_string(),
                ts.format("%Y-%m-%d %H:%M:%S").to_string(),
                platform.to_string(),
                author.to_string(),
                likes_field,
                shares.to_string(),
                comments.to_string(),
                text_field,
            ])
            .with_context(|| format!("writing row {post_id}"))?;
    }

    writer.flush().context("flushing output")?;
    println!("Wrote {rows} posts to {output_path}");
    Ok(())
}
