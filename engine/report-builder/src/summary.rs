//! UTR distribution summary.
//!
//! Counts entrants per UTR value. Rounded placeholders like "12.xx" are
//! keyed under "12.0" so they sort with the numbers, but redisplay in their
//! original "12.xx" form. A bare "?" becomes the "? UTR" bucket. Buckets
//! order numerically with non-numeric keys last, and percentages are rounded
//! to two decimals.

/// One UTR bucket with its share of the field
#[derive(Debug, Clone, PartialEq)]
pub struct RatingBucket {
    /// Value as it should be shown (placeholders keep their ".xx" form)
    pub display: String,
    pub count: usize,
    /// Share of all entrants, rounded to two decimals
    pub percentage: f64,
}

/// True for the rounded placeholder form: digits, a dot, then "xx".
fn is_placeholder(value: &str) -> bool {
    match value.split_once('.') {
        Some((whole, "xx")) => !whole.is_empty() && whole.bytes().all(|b| b.is_ascii_digit()),
        _ => false,
    }
}

/// Numeric ordering key; non-numeric bucket keys sort last.
fn bucket_order(key: &str) -> f64 {
    key.parse().unwrap_or(f64::INFINITY)
}

/// Summarize UTR values into ordered buckets.
pub fn summarize_utrs<'a, I>(utrs: I) -> Vec<RatingBucket>
where
    I: IntoIterator<Item = &'a str>,
{
    // Counted in first-seen order so equal sort keys stay deterministic.
    let mut counts: Vec<(String, usize, bool)> = Vec::new();
    let mut total = 0usize;

    for utr in utrs {
        total += 1;
        let value = utr.trim();
        let (key, placeholder) = if value == "?" {
            ("? UTR".to_string(), false)
        } else if is_placeholder(value) {
            let whole = value.split('.').next().unwrap_or(value);
            (format!("{whole}.0"), true)
        } else {
            (value.to_string(), false)
        };

        match counts.iter_mut().find(|(existing, _, _)| *existing == key) {
            Some((_, count, _)) => *count += 1,
            None => counts.push((key, 1, placeholder)),
        }
    }

    if total == 0 {
        return Vec::new();
    }

    counts.sort_by(|a, b| bucket_order(&a.0).total_cmp(&bucket_order(&b.0)));

    counts
        .into_iter()
        .map(|(key, count, placeholder)| {
            let display = if placeholder {
                let whole = key.split('.').next().unwrap_or(&key);
                format!("{whole}.xx")
            } else {
                key
            };
            let percentage = (100.0 * count as f64 / total as f64 * 100.0).round() / 100.0;
            RatingBucket { display, count, percentage }
        })
        .collect()
}

/// Render buckets as the report's summary sentences.
pub fn summary_lines(buckets: &[RatingBucket]) -> Vec<String> {
    buckets
        .iter()
        .map(|bucket| {
            if bucket.count == 1 {
                format!(
                    "There is 1 UTR rated {} in this tournament ({}%).",
                    bucket.display, bucket.percentage
                )
            } else {
                format!(
                    "There are {} UTRs rated {} in this tournament ({}%).",
                    bucket.count, bucket.display, bucket.percentage
                )
            }
        })
        .collect()
}
