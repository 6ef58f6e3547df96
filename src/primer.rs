//! Ungapped primer search near the start of a read.

/// Best placement of a primer within the search window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimerMatch {
    pub offset: usize,
    pub mismatches: usize,
}

impl PrimerMatch {
    /// First base after the matched primer span.
    #[inline]
    pub fn end(&self, primer_len: usize) -> usize {
        self.offset + primer_len
    }
}

/// Position-wise mismatch count over the shorter of the two slices.
#[inline]
pub fn hamming(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).filter(|(x, y)| x != y).count()
}

/// Find the start offset in `0..=min(window, seq.len() - primer.len())` with
/// the fewest mismatches against `primer`. The leftmost offset wins ties.
///
/// Only placements where the whole primer fits inside `seq` are candidates,
/// so a sequence shorter than the primer yields `None`.
pub fn locate(seq: &[u8], primer: &[u8], window: usize) -> Option<PrimerMatch> {
    let last = seq.len().checked_sub(primer.len())?.min(window);
    let mut best: Option<PrimerMatch> = None;

    for offset in 0..=last {
        let mismatches = hamming(&seq[offset..offset + primer.len()], primer);
        if best.is_none_or(|b| mismatches < b.mismatches) {
            best = Some(PrimerMatch { offset, mismatches });
            if mismatches == 0 {
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
    fn exact_match_after_one_base() {
        let m = locate(b"TAAAACATCATCATCAT", b"AAAA", 15).unwrap();
        assert_eq!(m, PrimerMatch { offset: 1, mismatches: 0 });
        assert_eq!(m.end(4), 5);
    }

    #[test]
    fn ties_go_left() {
        // offsets 0 (TAAAA) and 1 (AAAAC) both differ by one base
        let m = locate(b"TAAAACATCATCATCAT", b"AAAAA", 15).unwrap();
        assert_eq!(m, PrimerMatch { offset: 0, mismatches: 1 });
    }

    #[test]
    fn window_limits_search() {
        let seq = b"CCCCCCGGGG";
        assert_eq!(locate(seq, b"GGGG", 6).unwrap().offset, 6);
        let m = locate(seq, b"GGGG", 3).unwrap();
        assert_eq!(m.offset, 3);
        assert_eq!(m.mismatches, 3);
    }

    #[test]
    fn short_sequences() {
        assert_eq!(locate(b"ACG", b"ACGT", 15), None);
        assert_eq!(
            locate(b"ACGA", b"ACGT", 15),
            Some(PrimerMatch { offset: 0, mismatches: 1 })
        );
    }

    #[test]
    fn dropped_prefix_is_offset_plus_match() {
        let seq = b"GGACGTTTT";
        let m = locate(seq, b"ACGT", 15).unwrap();
        let end = m.end(4);
        let rebuilt = [&seq[..m.offset], &seq[m.offset..end]].concat();
        assert_eq!(rebuilt, seq[..end]);
        assert_eq!(&seq[m.offset..end], b"ACGT");
    }
}
