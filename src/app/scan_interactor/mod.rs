// Scan interactor - Finds the highest segment index of a variant

use std::path::Path;

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;

/// Scans a content directory for a variant's narration files
pub struct AssetScanner {
    known_suffixes: Vec<String>,
}

impl AssetScanner {
    /// Create a scanner aware of every registered variant suffix
    pub fn new(known_suffixes: Vec<String>) -> Self {
        Self { known_suffixes }
    }

    /// Highest index `i` with an `audio_<i><suffix>.wav` file, or 0 when none exist.
    ///
    /// Only the top level of `content_dir` is listed. Names whose index
    /// token does not parse are ignored.
    pub fn max_segment_index(
        &self,
        content_dir: &Path,
        variant: &Variant,
    ) -> Result<u32, PipelineError> {
        let others: Vec<&str> = self
            .known_suffixes
            .iter()
            .map(String::as_str)
            .filter(|s| *s != variant.suffix)
            .collect();

        let mut max_index = 0;
        for entry in WalkDir::new(content_dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| content_dir.to_path_buf());
                PipelineError::io(path, e.into())
            })?;
            // Follows symlinks; dangling links are skipped
            if !entry.path().is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            if !matches_variant_audio(&file_name, &variant.suffix, &others) {
                continue;
            }

            let stem = file_name.strip_suffix(".wav").unwrap_or(&file_name);
            match parse_segment_index(stem) {
                Some(index) => max_index = max_index.max(index),
                None => trace!("Ignoring {} (no segment index)", file_name),
            }
        }

        debug!("Variant {}: highest segment index {}", variant, max_index);
        Ok(max_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"x").unwrap();
    }

    fn scanner() -> AssetScanner {
        AssetScanner::new(vec![String::new(), "_es".to_string()])
    }

    #[test]
    fn test_empty_directory_yields_zero() {
        let temp = TempDir::new().unwrap();
        let max = scanner()
            .max_segment_index(temp.path(), &Variant::mandarin())
            .unwrap();
        assert_eq!(max, 0);
    }

    #[test]
    fn test_reports_largest_index_with_gaps() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "audio_1.wav");
        touch(temp.path(), "audio_4.wav");
        touch(temp.path(), "audio_10.wav");

        let max = scanner()
            .max_segment_index(temp.path(), &Variant::mandarin())
            .unwrap();
        assert_eq!(max, 10);
    }

    #[test]
    fn test_malformed_names_are_ignored() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "audio_2.wav");
        touch(temp.path(), "audio_abc.wav");
        touch(temp.path(), "audio.wav");
        touch(temp.path(), "audio_99.mp3");
        touch(temp.path(), "image_50.png");

        let max = scanner()
            .max_segment_index(temp.path(), &Variant::mandarin())
            .unwrap();
        assert_eq!(max, 2);
    }

    #[test]
    fn test_variants_do_not_cross_count() {
        let temp = TempDir::new().unwrap();
        for i in 1..=3 {
            touch(temp.path(), &format!("audio_{}.wav", i));
        }
        for i in 1..=5 {
            touch(temp.path(), &format!("audio_{}_es.wav", i));
        }

        let scanner = scanner();
        assert_eq!(
            scanner
                .max_segment_index(temp.path(), &Variant::mandarin())
                .unwrap(),
            3
        );
        assert_eq!(
            scanner
                .max_segment_index(temp.path(), &Variant::spanish())
                .unwrap(),
            5
        );
    }

    #[test]
    fn test_subdirectories_are_not_scanned() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("segments");
        fs::create_dir(&nested).unwrap();
        touch(&nested, "audio_8.wav");
        fs::create_dir(temp.path().join("audio_9.wav")).unwrap();

        let max = scanner()
            .max_segment_index(temp.path(), &Variant::mandarin())
            .unwrap();
        assert_eq!(max, 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_audio_is_counted() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        let recordings = TempDir::new().unwrap();
        touch(recordings.path(), "take_3.wav");
        touch(temp.path(), "audio_1.wav");
        symlink(
            recordings.path().join("take_3.wav"),
            temp.path().join("audio_3.wav"),
        )
        .unwrap();
        symlink(temp.path().join("gone.wav"), temp.path().join("audio_7.wav")).unwrap();
        symlink(recordings.path(), temp.path().join("audio_9.wav")).unwrap();

        let max = scanner()
            .max_segment_index(temp.path(), &Variant::mandarin())
            .unwrap();
        assert_eq!(max, 3);
    }
}
