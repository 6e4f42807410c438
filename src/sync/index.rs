use std::cmp::Ordering;

use crate::core::SubtitleEntry;

/// Index of the entry covering `t` (`start <= t <= end`), if any. Entries
/// must be normalized (sorted, non-overlapping), so at most one matches.
pub fn active_index(t: f64, subs: &[SubtitleEntry]) -> Option<usize> {
    let idx = most_recent_index(t, subs)?;
    (t <= subs[idx].end).then_some(idx)
}

pub fn active_at(t: f64, subs: &[SubtitleEntry]) -> Option<&SubtitleEntry> {
    active_index(t, subs).map(|idx| &subs[idx])
}

/// Index of the entry with the greatest `start <= t`, scanning from the end
/// of the sequence backward. `None` when `t` precedes the first entry.
pub fn most_recent_index(t: f64, subs: &[SubtitleEntry]) -> Option<usize> {
    subs.iter().rposition(|entry| entry.start <= t)
}

pub fn most_recent_at(t: f64, subs: &[SubtitleEntry]) -> Option<&SubtitleEntry> {
    most_recent_index(t, subs).map(|idx| &subs[idx])
}

/// Sorts entries by start and drops the ones no selector could ever handle:
/// inverted ranges, non-finite bounds, and entries overlapping their
/// predecessor. The engine never trusts transcript ordering as-is.
pub fn normalize_entries(mut entries: Vec<SubtitleEntry>) -> Vec<SubtitleEntry> {
    entries.sort_by(|a, b| a.start.partial_cmp(&b.start).unwrap_or(Ordering::Equal));

    let mut kept: Vec<SubtitleEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        if !entry.start.is_finite() || !entry.end.is_finite() || entry.start >= entry.end {
            log::warn!(
                "Dropping subtitle with invalid range {:.3}..{:.3}: {:?}",
                entry.start,
                entry.end,
                entry.text
            );
            continue;
        }

        if let Some(prev) = kept.last() {
            if entry.start < prev.end {
                log::warn!(
                    "Dropping subtitle at {:.3} overlapping previous (ends {:.3}): {:?}",
                    entry.start,
                    prev.end,
                    entry.text
                );
                continue;
            }
        }

        kept.push(entry);
    }

    kept
}
