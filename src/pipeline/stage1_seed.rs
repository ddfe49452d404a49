use crate::input::ImageFile;
use crate::model::AnalysisMode;
use crate::seeded::derive_seed;

#[derive(Debug, Clone, Copy)]
pub struct Stage1Output {
    pub folder_seed: u32,
}

/// Derives the batch-wide folder seed from the sorted concatenation of
/// all file names plus the mode string. Sorting makes the seed a
/// function of batch membership, not upload order.
pub fn run_stage1(files: &[ImageFile], mode: AnalysisMode) -> Stage1Output {
    let mut names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
    names.sort_unstable();

    let mut signature = String::with_capacity(
        names.iter().map(|n| n.len()).sum::<usize>() + mode.as_str().len(),
    );
    for name in names {
        signature.push_str(name);
    }
    signature.push_str(mode.as_str());

    Stage1Output {
        folder_seed: derive_seed(&signature),
    }
}

/// Per-file seed: the file's own identity combined with the mode.
pub fn file_seed(name: &str, mode: AnalysisMode) -> u32 {
    let mut keyed = String::with_capacity(name.len() + mode.as_str().len());
    keyed.push_str(name);
    keyed.push_str(mode.as_str());
    derive_seed(&keyed)
}

/// The seed all of one image's draw channels offset from.
pub fn combined_seed(folder_seed: u32, name: &str, mode: AnalysisMode) -> u64 {
    u64::from(folder_seed) + u64::from(file_seed(name, mode))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> ImageFile {
        ImageFile {
            name: name.to_string(),
            bytes: vec![0u8; 4],
        }
    }

    #[test]
    fn test_single_file_folder_seed_equals_file_seed() {
        let files = vec![image("a.png")];
        let out = run_stage1(&files, AnalysisMode::Existing);
        assert_eq!(out.folder_seed, 103_865_511);
        assert_eq!(out.folder_seed, file_seed("a.png", AnalysisMode::Existing));
    }

    #[test]
    fn test_combined_seed_is_twice_file_seed_for_singleton() {
        let files = vec![image("a.png")];
        let out = run_stage1(&files, AnalysisMode::Existing);
        assert_eq!(
            combined_seed(out.folder_seed, "a.png", AnalysisMode::Existing),
            2 * 103_865_511
        );
    }

    #[test]
    fn test_upload_order_does_not_change_folder_seed() {
        let forward = vec![image("a.png"), image("b.png"), image("c.png")];
        let backward = vec![image("c.png"), image("a.png"), image("b.png")];
        let a = run_stage1(&forward, AnalysisMode::Proposed);
        let b = run_stage1(&backward, AnalysisMode::Proposed);
        assert_eq!(a.folder_seed, b.folder_seed);
    }

    #[test]
    fn test_mode_changes_every_seed() {
        let files = vec![image("a.png"), image("b.png")];
        assert_ne!(
            run_stage1(&files, AnalysisMode::Proposed).folder_seed,
            run_stage1(&files, AnalysisMode::Existing).folder_seed
        );
        assert_ne!(
            file_seed("a.png", AnalysisMode::Proposed),
            file_seed("a.png", AnalysisMode::Existing)
        );
    }
}
