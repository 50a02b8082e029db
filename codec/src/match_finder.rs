//! Greedy backward match search within one block.

use wire::{MAX_LITERAL_LEN, MAX_MATCH_DISTANCE, MAX_MATCH_LEN, MIN_MATCH_LEN};

use crate::types::{Match, Step};

/// Finds the next literal run and match starting at `cursor`.
///
/// Tries each target `cursor + i` in turn and returns as soon as one has a
/// match of at least [`MIN_MATCH_LEN`] bytes, so the literal run is as short
/// as possible. Without a match the step is a literal run of up to
/// [`MAX_LITERAL_LEN`] bytes.
#[must_use]
pub fn find_step(block: &[u8], cursor: usize) -> Step {
    let literal_cap = block.len().saturating_sub(cursor).min(MAX_LITERAL_LEN);
    for i in 0..literal_cap {
        if let Some(found) = longest_match(block, cursor + i) {
            return Step {
                literal_len: i,
                found: Some(found),
            };
        }
    }
    Step {
        literal_len: literal_cap,
        found: None,
    }
}

/// Returns the longest match for the bytes at `target`.
///
/// Sources are scanned oldest first and a later source must be strictly
/// longer to win. Lengths are clamped to the block tail.
#[must_use]
pub fn longest_match(block: &[u8], target: usize) -> Option<Match> {
    let tail = block.len().checked_sub(target)?;
    if tail < MIN_MATCH_LEN {
        return None;
    }
    let max_len = tail.min(MAX_MATCH_LEN);
    let wanted = &block[target..target + max_len];
    let window_start = target.saturating_sub(MAX_MATCH_DISTANCE);

    let mut best: Option<Match> = None;
    for source in window_start..target {
        if block[source] != wanted[0] || block[source + 1] != wanted[1] {
            continue;
        }
        let length = block[source..]
            .iter()
            .zip(wanted)
            .take_while(|(a, b)| a == b)
            .count();
        if length >= MIN_MATCH_LEN && best.map_or(true, |b| length > b.length) {
            best = Some(Match::new(target - source, length));
            if length == max_len {
                break;
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_match_in_unique_bytes() {
        let block: Vec<u8> = (0..=255).collect();
        assert_eq!(longest_match(&block, 100), None);
        let step = find_step(&block, 0);
        assert_eq!(step.literal_len, 256);
        assert!(step.found.is_none());
    }

    #[test]
    fn literal_run_capped() {
        // Counting up by one, then by three: no 3-byte sequence repeats.
        let block: Vec<u8> = (0..400u32)
            .map(|i| if i < 256 { i as u8 } else { ((i - 256) * 3 + 1) as u8 })
            .collect();
        let step = find_step(&block, 0);
        assert_eq!(step.literal_len, MAX_LITERAL_LEN);
        assert!(step.found.is_none());
    }

    #[test]
    fn repeated_run_matches_at_distance_one() {
        let block = vec![0x41; 300];
        let step = find_step(&block, 0);
        assert_eq!(step.literal_len, 1);
        assert_eq!(step.found, Some(Match::new(1, MAX_MATCH_LEN)));
    }

    #[test]
    fn match_clamped_to_block_tail() {
        let block = b"abcdefabcde";
        assert_eq!(longest_match(block, 6), Some(Match::new(6, 5)));
    }

    #[test]
    fn short_tail_never_matches() {
        let block = b"abcab";
        assert_eq!(longest_match(block, 3), None);
        assert_eq!(longest_match(block, 5), None);
        assert_eq!(longest_match(block, 9), None);
    }

    #[test]
    fn oldest_source_wins_ties() {
        let block = b"xyzQxyzRxyz";
        assert_eq!(longest_match(block, 8), Some(Match::new(8, 3)));
    }

    #[test]
    fn longer_later_source_wins() {
        let block = b"xyzQxyzwRxyzw";
        assert_eq!(longest_match(block, 9), Some(Match::new(5, 4)));
    }

    #[test]
    fn sources_beyond_window_ignored() {
        let mut block = b"uniq".to_vec();
        block.extend((0..MAX_MATCH_DISTANCE).map(|i| if i % 2 == 0 { 0x00 } else { 0xFF }));
        block.extend_from_slice(b"uniq");
        let target = block.len() - 4;
        assert!(target > MAX_MATCH_DISTANCE);
        assert_eq!(longest_match(&block, target), None);
    }

    #[test]
    fn step_stops_at_first_match() {
        let block = b"12345abcabc";
        let step = find_step(block, 0);
        assert_eq!(step.literal_len, 8);
        assert_eq!(step.found, Some(Match::new(3, 3)));
        assert_eq!(step.consumed(), block.len());
    }

    #[test]
    fn step_at_end_is_empty() {
        let block = b"abc";
        assert_eq!(find_step(block, 3), Step::default());
    }
}
