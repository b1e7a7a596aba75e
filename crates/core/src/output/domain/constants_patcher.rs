use regex::Regex;

use super::artifacts::ConstantPatch;
use super::persist_error::PersistError;

/// Rewrites `NAME = <integer>;` assignments in `source`, one per patch.
///
/// Each name must match exactly once. Everything else in the text, including
/// trailing comments on the patched lines, is left untouched. All patches
/// are applied to one in-memory copy; nothing is returned unless all succeed.
pub fn patch_constants(source: &str, patches: &[ConstantPatch]) -> Result<String, PersistError> {
    let mut patched = source.to_string();
    for patch in patches {
        let pattern = format!(r"\b({}\s*=\s*)-?\d+(?:\.\d+)?(\s*;)", regex::escape(&patch.name));
        let re = Regex::new(&pattern).map_err(|source| PersistError::InvalidPattern {
            key: patch.name.clone(),
            source,
        })?;

        let found = re.find_iter(&patched).count();
        if found != 1 {
            return Err(PersistError::PatchMismatch {
                key: patch.name.clone(),
                found,
            });
        }

        let replacement = format!("${{1}}{}${{2}}", patch.value);
        patched = re.replace(&patched, replacement.as_str()).into_owned();
    }
    Ok(patched)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONSTANTS: &str = "\
export const VIDEO_FPS = 30;
export const TITLE_DURATION = 230;            // audio ~6.3s
export const HACK_IDEA_DURATION = 350;        // audio ~10.2s
export const DEMO_DURATION = 300;
export const TRANSITION_DURATION = 25;
export const NUM_TRANSITIONS = DEMO_DURATION > 0 ? 6 : 5;
export const TOTAL_DURATION =
  TITLE_DURATION +
  HACK_IDEA_DURATION;
";

    fn patch(name: &str, value: u32) -> ConstantPatch {
        ConstantPatch {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn test_patches_values_and_keeps_comments() {
        let out = patch_constants(
            CONSTANTS,
            &[patch("TITLE_DURATION", 245), patch("HACK_IDEA_DURATION", 401)],
        )
        .unwrap();
        assert!(out.contains("export const TITLE_DURATION = 245;            // audio ~6.3s"));
        assert!(out.contains("export const HACK_IDEA_DURATION = 401;        // audio ~10.2s"));
        assert!(out.contains("export const DEMO_DURATION = 300;"));
        assert!(out.contains("  TITLE_DURATION +\n"));
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let patches = [patch("TITLE_DURATION", 245)];
        let once = patch_constants(CONSTANTS, &patches).unwrap();
        let twice = patch_constants(&once, &patches).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_missing_key_is_fatal() {
        let err = patch_constants(CONSTANTS, &[patch("OUTRO_DURATION", 100)]).unwrap_err();
        assert!(matches!(err, PersistError::PatchMismatch { ref key, found: 0 } if key == "OUTRO_DURATION"));
    }

    #[test]
    fn test_expression_is_not_a_match() {
        let err = patch_constants(CONSTANTS, &[patch("TOTAL_DURATION", 1)]).unwrap_err();
        assert!(matches!(err, PersistError::PatchMismatch { found: 0, .. }));
    }

    #[test]
    fn test_duplicate_key_is_fatal() {
        let source = "const A_DURATION = 1;\nconst A_DURATION = 2;\n";
        let err = patch_constants(source, &[patch("A_DURATION", 3)]).unwrap_err();
        assert!(matches!(err, PersistError::PatchMismatch { found: 2, .. }));
    }

    #[test]
    fn test_suffix_name_does_not_match_longer_name() {
        let source = "const SUBTITLE_DURATION = 1;\nconst TITLE_DURATION = 2;\n";
        let out = patch_constants(source, &[patch("TITLE_DURATION", 9)]).unwrap();
        assert_eq!(out, "const SUBTITLE_DURATION = 1;\nconst TITLE_DURATION = 9;\n");
    }

    #[test]
    fn test_failure_returns_no_partial_result() {
        let result = patch_constants(
            CONSTANTS,
            &[patch("TITLE_DURATION", 1), patch("MISSING_DURATION", 2)],
        );
        assert!(result.is_err());
    }
}
