/// Rolling 31-based string hash with 32-bit signed wraparound.
///
/// The wraparound is load-bearing: seeds derived from long batch
/// signatures must overflow exactly like a 32-bit two's-complement
/// multiply-add, or every downstream draw diverges. `unsigned_abs`
/// keeps `|i32::MIN|` representable.
pub fn derive_seed(input: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in input.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit));
    }
    hash.unsigned_abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_seeds() {
        assert_eq!(derive_seed("a.png"), 91_063_068);
        assert_eq!(derive_seed("b.png"), 91_986_589);
        assert_eq!(derive_seed("image.tiff"), 1_488_026_968);
        assert_eq!(derive_seed("a.pngexisting"), 103_865_511);
        assert_eq!(derive_seed("patch_0001.pngproposed"), 133_691_079);
    }

    #[test]
    fn test_stable_across_calls() {
        let a = derive_seed("slide_042.tiff");
        let b = derive_seed("slide_042.tiff");
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_string_hashes_to_zero() {
        assert_eq!(derive_seed(""), 0);
    }

    #[test]
    fn test_distinct_names_distinct_seeds() {
        assert_ne!(derive_seed("a.png"), derive_seed("b.png"));
    }

    #[test]
    fn test_wraparound_on_long_input() {
        // Long enough to overflow i32 many times over; must stay finite
        // and reproducible rather than saturating or widening.
        let long = "x".repeat(10_000);
        assert_eq!(derive_seed(&long), derive_seed(&long));
    }
}
