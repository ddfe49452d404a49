pub mod hash;
pub mod rand;
pub mod shuffle;

pub use hash::derive_seed;
pub use rand::{int_in_range, unit_fraction};
pub use shuffle::shuffle_indices;
