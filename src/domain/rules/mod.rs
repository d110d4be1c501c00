// Domain rules - Filename conventions and variant validation

use crate::domain::errors::*;

/// Prefix shared by every narration file
pub const AUDIO_PREFIX: &str = "audio_";
/// Extension of narration files
pub const AUDIO_EXTENSION: &str = "wav";

/// Extract the segment index from an audio file stem.
///
/// The stem is split on `_` and the second component is parsed, so
/// `audio_12` and `audio_12_es` both yield 12. Anything that does not
/// parse to a positive integer yields `None`.
pub fn parse_segment_index(stem: &str) -> Option<u32> {
    let token = stem.split('_').nth(1)?;
    match token.parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(index) => Some(index),
    }
}

/// Decide whether an audio file name belongs to the variant with `suffix`.
///
/// For the default (empty) suffix, names ending in any of `other_suffixes`
/// are rejected so that e.g. `audio_3_es.wav` is not counted twice.
pub fn matches_variant_audio(file_name: &str, suffix: &str, other_suffixes: &[&str]) -> bool {
    let Some(stem) = file_name
        .strip_suffix(AUDIO_EXTENSION)
        .and_then(|s| s.strip_suffix('.'))
    else {
        return false;
    };
    if !stem.starts_with(AUDIO_PREFIX) {
        return false;
    }

    if suffix.is_empty() {
        !other_suffixes
            .iter()
            .filter(|other| !other.is_empty())
            .any(|other| stem.ends_with(other))
    } else {
        stem.len() > AUDIO_PREFIX.len() + suffix.len() && stem.ends_with(suffix)
    }
}

/// Validate a variant suffix.
///
/// Empty is the default variant; any other suffix must start with `_`
/// followed by a non-digit so it cannot be read as a segment index.
pub fn validate_suffix(suffix: &str) -> Result<(), PipelineError> {
    if suffix.is_empty() {
        return Ok(());
    }

    let mut chars = suffix.chars();
    if chars.next() != Some('_') {
        return Err(PipelineError::Config(format!(
            "Variant suffix '{}' must start with '_'",
            suffix
        )));
    }
    match chars.next() {
        Some(c) if !c.is_ascii_digit() => {}
        _ => {
            return Err(PipelineError::Config(format!(
                "Variant suffix '{}' must continue with a non-digit after '_'",
                suffix
            )))
        }
    }
    if suffix.contains(['/', '\\', '.']) {
        return Err(PipelineError::Config(format!(
            "Variant suffix '{}' contains path characters",
            suffix
        )));
    }

    Ok(())
}
