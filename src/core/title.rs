use std::sync::OnceLock;

use regex::Regex;

/// Normalization rules applied in order. These must match the naming used
/// when the enriched transcripts were generated, so the same title always
/// maps to the same resource key.
fn title_rules() -> &'static [(Regex, &'static str)] {
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RULES
        .get_or_init(|| {
            [
                // Leading ▶ marker some player pages prepend
                (r"^▶\s*", ""),
                // Fallback titles the host shows before the real one settles
                (r"(?i)^Plex.*$", ""),
                (r":", " -"),
                (r"\s+", "_"),
                // Han ideographs, CJK punctuation and fullwidth forms
                (r"[\x{4e00}-\x{9fff}\x{3000}-\x{303f}\x{ff00}-\x{ffef}]", "."),
                (r"#", ""),
                (r"[—'&,’]", "_"),
            ]
            .iter()
            .map(|(pattern, replacement)| {
                (Regex::new(pattern).expect("title rule pattern is valid"), *replacement)
            })
            .collect()
        })
        .as_slice()
}

/// Normalizes a media title into the key used to locate its enriched
/// transcript. Deterministic and idempotent: normalizing an already
/// normalized title is a no-op.
pub fn normalize_title(title: &str) -> String {
    let mut result = title.trim().to_string();
    for (re, replacement) in title_rules() {
        result = re.replace_all(&result, *replacement).into_owned();
    }
    result
}
