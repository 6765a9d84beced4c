/// Resolves a raw diarization speaker id into a human-readable label
pub trait SpeakerLabeler {
    fn label(&self, speaker: Option<&str>) -> String;
}

impl<F> SpeakerLabeler for F
where
    F: Fn(Option<&str>) -> String,
{
    fn label(&self, speaker: Option<&str>) -> String {
        self(speaker)
    }
}

/// Label used for segments without a speaker id
pub const UNKNOWN_SPEAKER: &str = "Unknown";

/// Default labeling: `prefix_N` becomes an ordinal such as "Speaker N+1"
#[derive(Debug, Clone)]
pub struct DefaultSpeakerLabeler {
    /// Localized word placed before the ordinal
    pub ordinal_word: String,
}

impl DefaultSpeakerLabeler {
    pub fn new(ordinal_word: impl Into<String>) -> Self {
        Self {
            ordinal_word: ordinal_word.into(),
        }
    }
}

impl Default for DefaultSpeakerLabeler {
    fn default() -> Self {
        Self::new("Speaker")
    }
}

impl SpeakerLabeler for DefaultSpeakerLabeler {
    fn label(&self, speaker: Option<&str>) -> String {
        let raw = match speaker {
            Some(raw) if !raw.is_empty() => raw,
            _ => return UNKNOWN_SPEAKER.to_string(),
        };

        match parse_ordinal(raw).and_then(|n| n.checked_add(1)) {
            Some(n) => format!("{} {}", self.ordinal_word, n),
            None => raw.to_string(),
        }
    }
}

/// Zero-based index from an id shaped like `SPEAKER_03`
fn parse_ordinal(raw: &str) -> Option<u64> {
    let (prefix, number) = raw.rsplit_once('_')?;
    if prefix.is_empty() || number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    number.parse().ok()
}
