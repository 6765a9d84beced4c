use std::time::Duration;

use tracing::debug;

use crate::error::RecapError;
use crate::llm::{meeting_type_table, LlmConfig, MeetingType};
use crate::models::SpeakerStatsMap;
use crate::transcript::describe_speaker;

/// Which summary template to use
#[derive(Debug, Clone, Copy)]
pub enum SummaryMode<'a> {
    /// Key themes, important details, overall summary
    Plain,
    /// Classify the meeting, then summarize with that type's section structure
    MeetingStructure { meeting_type: Option<MeetingType> },
    /// Meeting structure plus per-speaker statistics and mandatory speaker attribution
    Diarized {
        stats: &'a SpeakerStatsMap,
        meeting_type: Option<MeetingType>,
    },
}

/// Sampling and transport parameters attached to a mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeProfile {
    pub temperature: f64,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl SummaryMode<'_> {
    pub fn profile(&self) -> ModeProfile {
        match self {
            SummaryMode::Plain => ModeProfile {
                temperature: 0.7,
                max_tokens: 2000,
                timeout: Duration::from_secs(60),
            },
            SummaryMode::MeetingStructure { .. } => ModeProfile {
                temperature: 0.4,
                max_tokens: 4000,
                timeout: Duration::from_secs(60),
            },
            // Heavier prompt and longer output
            SummaryMode::Diarized { .. } => ModeProfile {
                temperature: 0.4,
                max_tokens: 4000,
                timeout: Duration::from_secs(120),
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SummaryMode::Plain => "plain",
            SummaryMode::MeetingStructure { .. } => "meeting",
            SummaryMode::Diarized { .. } => "diarized",
        }
    }
}

/// A fully built chat completion request
#[derive(Debug, Clone, PartialEq)]
pub struct SummarizationRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub timeout: Duration,
}

/// Builds summarization requests from the shared configuration
pub struct SummaryRequestBuilder<'c> {
    config: &'c LlmConfig,
}

impl<'c> SummaryRequestBuilder<'c> {
    pub fn new(config: &'c LlmConfig) -> Self {
        Self { config }
    }

    /// Build the request for `mode`
    ///
    /// Fails with `RecapError::Config` when no API key is configured, so no
    /// request is ever sent without a credential.
    pub fn build(
        &self,
        mode: &SummaryMode<'_>,
        transcript: &str,
    ) -> Result<SummarizationRequest, RecapError> {
        if self.config.credential().is_none() {
            return Err(RecapError::Config(
                "API key is not configured; set OPENAI_API_KEY".to_string(),
            ));
        }

        let language = self.config.language.as_str();
        let (system_prompt, user_prompt) = match mode {
            SummaryMode::Plain => (
                build_plain_system_prompt(language),
                format!(
                    "Please summarize the key points of the following text:\n\n{}",
                    transcript
                ),
            ),
            SummaryMode::MeetingStructure { meeting_type } => (
                build_meeting_system_prompt(language, *meeting_type),
                format!("Summarize this meeting:\n\n{}", transcript),
            ),
            SummaryMode::Diarized {
                stats,
                meeting_type,
            } => (
                build_diarized_system_prompt(language, stats.len(), *meeting_type),
                build_diarized_user_prompt(stats, transcript),
            ),
        };

        let profile = mode.profile();
        debug!(
            "Built {} summary request: {} system chars, {} user chars",
            mode.name(),
            system_prompt.len(),
            user_prompt.len()
        );

        Ok(SummarizationRequest {
            system_prompt,
            user_prompt,
            model: self.config.model.clone(),
            temperature: profile.temperature,
            max_tokens: profile.max_tokens,
            timeout: profile.timeout,
        })
    }
}

/// System prompt for plain summaries
pub fn build_plain_system_prompt(language: &str) -> String {
    format!(
        r#"You are an assistant that summarizes the key points of a text.
Summarize the content concisely while covering every important point.
Respond in {language}.
Summary format:
1. Main topics and key themes
2. Important details
3. Overall summary"#
    )
}

/// System prompt for meeting-structure summaries
pub fn build_meeting_system_prompt(language: &str, meeting_type: Option<MeetingType>) -> String {
    let mut prompt = String::from("You are an expert meeting summarizer. ");

    match meeting_type {
        Some(meeting_type) => {
            prompt.push_str(&format!(
                "The meeting type is {}. Summarize it using this structure: {}\n\n",
                meeting_type.name(),
                meeting_type.structure_line()
            ));
            prompt.push_str("**Output Format:**\n");
            prompt.push_str(&format!("**{}: [Meeting Title]**\n", meeting_type.name()));
        }
        None => {
            prompt.push_str("Follow these steps:\n");
            prompt.push_str("1. Identify the meeting type\n");
            prompt.push_str("2. Summarize using the structure for that type\n\n");
            prompt.push_str("**Meeting Types:**\n");
            prompt.push_str(&meeting_type_table());
            prompt.push('\n');
            prompt.push_str("**Output Format:**\n");
            prompt.push_str("**[Type]: [Meeting Title]**\n");
        }
    }

    prompt.push_str("(summary following the structure of that type)\n\n");
    prompt.push_str(&format!(
        "**Rules:** Write in {} | Use bullet points | Group by team or person | \
         State owners and deadlines | Skip sections with no information | \
         Finish with the resolutions",
        language
    ));
    prompt
}

/// System prompt for speaker-attributed summaries
pub fn build_diarized_system_prompt(
    language: &str,
    num_speakers: usize,
    meeting_type: Option<MeetingType>,
) -> String {
    let mut prompt = String::from("You are an expert at analyzing and summarizing meetings.\n\n");

    prompt.push_str("**Steps:**\n");
    prompt.push_str(
        "1. Use the speaker information to infer each speaker's role \
         (chair, presenter, participant)\n",
    );
    match meeting_type {
        Some(meeting_type) => prompt.push_str(&format!(
            "2. The meeting type is {}; use the structure: {}\n",
            meeting_type.name(),
            meeting_type.structure_line()
        )),
        None => prompt.push_str("2. Analyze the content to identify the meeting type\n"),
    }
    prompt.push_str("3. Summarize using the appropriate structure\n");
    prompt.push_str(
        "4. **Always name the speaker for every assignment, question, and agreement**\n\n",
    );

    if meeting_type.is_none() {
        prompt.push_str("**Meeting Types:**\n");
        prompt.push_str(&meeting_type_table());
        prompt.push('\n');
    }

    let title = match meeting_type {
        Some(meeting_type) => format!("**{}: [Title]**", meeting_type.name()),
        None => "**[Type]: [Title]**".to_string(),
    };

    prompt.push_str(&format!(
        r#"**Output Format:**
{title}

**👥 Participants ({num_speakers}):**
(roles inferred from what each speaker says)

**📋 Meeting Summary:**
(following the structure of the meeting type)

**📌 Assignments:** (if any)
- **[Assigner]** asked **[Assignee]** to: [task] (due: [date/time if stated])

**❓ Key Questions:** (if any)
- **[Asker]** asked: "[question]" → **[Responder]**: "[answer]"

**✅ Agreements and Resolutions:** (if any)
- [agreement] (proposed by: **[Proposer]**)

**Key Rules:**
- Write in {language}
- Use bullet points
- **Every assignment, question, and agreement must name the speaker (e.g. Speaker 1, Speaker 2)**
- State the owner and deadline whenever work is assigned
- Finish with the resolutions"#
    ));
    prompt
}

/// Speaker info block: one line per speaker, most talkative first
pub fn build_speaker_info(stats: &SpeakerStatsMap) -> String {
    stats
        .ranked()
        .iter()
        .map(|s| format!("- {}", describe_speaker(s)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// User prompt for speaker-attributed summaries
pub fn build_diarized_user_prompt(stats: &SpeakerStatsMap, transcript: &str) -> String {
    format!(
        "**Speaker Information:**\n{}\n\n**Meeting Transcript:**\n{}",
        build_speaker_info(stats),
        transcript
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn config() -> LlmConfig {
        LlmConfig::new(Some("sk-test".to_string()), "http://localhost/v1/chat/completions")
    }

    fn stats() -> SpeakerStatsMap {
        SpeakerStatsMap::from_totals(vec![
            ("Speaker 2".to_string(), 30.0, 40),
            ("Speaker 1".to_string(), 90.0, 150),
        ])
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let config = LlmConfig::new(None, "http://localhost");
        let err = SummaryRequestBuilder::new(&config)
            .build(&SummaryMode::Plain, "hello")
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("API key"));
    }

    #[test]
    fn test_plain_request() {
        let config = config().with_language("Thai");
        let request = SummaryRequestBuilder::new(&config)
            .build(&SummaryMode::Plain, "we agreed to ship")
            .unwrap();

        assert_eq!(request.model, "gpt-4o");
        assert_eq!(request.temperature, 0.7);
        assert_eq!(request.max_tokens, 2000);
        assert_eq!(request.timeout, Duration::from_secs(60));
        assert!(request.system_prompt.contains("Respond in Thai."));
        assert!(request.system_prompt.contains("3. Overall summary"));
        assert!(request.user_prompt.ends_with("\n\nwe agreed to ship"));
    }

    #[test]
    fn test_meeting_structure_request() {
        let config = config();
        let request = SummaryRequestBuilder::new(&config)
            .build(&SummaryMode::MeetingStructure { meeting_type: None }, "notes")
            .unwrap();

        assert_eq!(request.temperature, 0.4);
        assert_eq!(request.max_tokens, 4000);
        assert_eq!(request.timeout, Duration::from_secs(60));
        assert!(request.system_prompt.contains("1. Identify the meeting type"));
        assert!(request.system_prompt.contains("**[Type]: [Meeting Title]**"));
        for meeting_type in MeetingType::ALL {
            assert!(request.system_prompt.contains(meeting_type.name()));
        }
    }

    #[test]
    fn test_pinned_meeting_type() {
        let prompt = build_meeting_system_prompt("English", Some(MeetingType::IncidentReview));

        assert!(prompt.contains("The meeting type is Incident Review."));
        assert!(prompt.contains("**Incident Review: [Meeting Title]**"));
        assert!(!prompt.contains("Identify the meeting type"));
        assert!(!prompt.contains("Shareholder Meeting"));
    }

    #[test]
    fn test_diarized_request() {
        let config = config();
        let stats = stats();
        let mode = SummaryMode::Diarized {
            stats: &stats,
            meeting_type: None,
        };
        let request = SummaryRequestBuilder::new(&config)
            .build(&mode, "[Speaker 1]: hi")
            .unwrap();

        assert_eq!(request.temperature, 0.4);
        assert_eq!(request.max_tokens, 4000);
        assert_eq!(request.timeout, Duration::from_secs(120));
        assert!(request.system_prompt.contains("Participants (2)"));
        assert!(request.system_prompt.contains("must name the speaker"));
        assert!(request.user_prompt.contains("**Meeting Transcript:**\n[Speaker 1]: hi"));
    }

    #[test]
    fn test_speaker_info_ranked() {
        let info = build_speaker_info(&stats());
        assert_eq!(
            info,
            "- Speaker 1: 1:30 (75.0%), 150 words\n- Speaker 2: 0:30 (25.0%), 40 words"
        );
    }
}
