use super::caption_error::CaptionError;

/// One spoken word with its time span in seconds, as reported by the
/// transcription service.
#[derive(Clone, Debug, PartialEq)]
pub struct Word {
    text: String,
    start_seconds: f64,
    end_seconds: f64,
}

impl Word {
    pub fn new(
        text: impl Into<String>,
        start_seconds: f64,
        end_seconds: f64,
    ) -> Result<Self, CaptionError> {
        let text = text.into();
        for value in [start_seconds, end_seconds] {
            if !value.is_finite() || value < 0.0 {
                return Err(CaptionError::InvalidTime { word: text, value });
            }
        }
        if end_seconds <= start_seconds {
            return Err(CaptionError::EmptyWordSpan {
                word: text,
                start: start_seconds,
                end: end_seconds,
            });
        }
        Ok(Self {
            text,
            start_seconds,
            end_seconds,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn start_seconds(&self) -> f64 {
        self.start_seconds
    }

    pub fn end_seconds(&self) -> f64 {
        self.end_seconds
    }

    pub fn duration(&self) -> f64 {
        self.end_seconds - self.start_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_word_fields() {
        let w = Word::new("hello", 1.0, 1.5).unwrap();
        assert_eq!(w.text(), "hello");
        assert_eq!(w.start_seconds(), 1.0);
        assert_eq!(w.end_seconds(), 1.5);
    }

    #[test]
    fn test_word_duration() {
        let w = Word::new("test", 2.0, 2.8).unwrap();
        assert_relative_eq!(w.duration(), 0.8, epsilon = 0.001);
    }

    #[rstest]
    #[case::negative_start(-0.1, 0.5)]
    #[case::negative_end(0.0, -0.5)]
    #[case::nan_start(f64::NAN, 0.5)]
    #[case::infinite_end(0.0, f64::INFINITY)]
    fn test_word_rejects_invalid_times(#[case] start: f64, #[case] end: f64) {
        let err = Word::new("bad", start, end).unwrap_err();
        assert!(matches!(err, CaptionError::InvalidTime { .. }));
    }

    #[rstest]
    #[case::zero_length(1.0, 1.0)]
    #[case::reversed(1.0, 0.5)]
    fn test_word_rejects_empty_span(#[case] start: f64, #[case] end: f64) {
        let err = Word::new("bad", start, end).unwrap_err();
        assert!(matches!(err, CaptionError::EmptyWordSpan { .. }));
    }

    #[test]
    fn test_error_message_names_word() {
        let err = Word::new("Copilot", 2.0, 1.0).unwrap_err();
        assert!(err.to_string().contains("Copilot"));
    }
}
