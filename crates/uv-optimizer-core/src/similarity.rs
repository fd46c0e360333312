/// Per-channel absolute difference (0-255) still counted as a match.
const MATCH_TOLERANCE: u8 = 1;

/// Fraction of pixel positions where all four channels differ by at most
/// `MATCH_TOLERANCE`. Buffers of length zero compare as fully similar.
///
/// Alpha is compared like any other channel: two fully transparent pixels
/// whose RGB values differ beyond tolerance do not match. Symmetric in its
/// arguments.
pub fn match_fraction(a: &[u8], b: &[u8]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    let total = a.len() / 4;
    if total == 0 {
        return 1.0;
    }
    let mut matching = 0usize;
    for (pa, pb) in a.chunks_exact(4).zip(b.chunks_exact(4)) {
        if pa
            .iter()
            .zip(pb)
            .all(|(x, y)| x.abs_diff(*y) <= MATCH_TOLERANCE)
        {
            matching += 1;
        }
    }
    matching as f32 / total as f32
}
