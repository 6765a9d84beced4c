/// Meeting categories used to pick a summary structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetingType {
    Shareholder,
    Board,
    Planning,
    ProgressUpdate,
    Strategy,
    IncidentReview,
    Client,
    Workshop,
    Executive,
    Team,
    General,
}

impl MeetingType {
    /// All categories in catalogue order (ids 1..=11)
    pub const ALL: [MeetingType; 11] = [
        MeetingType::Shareholder,
        MeetingType::Board,
        MeetingType::Planning,
        MeetingType::ProgressUpdate,
        MeetingType::Strategy,
        MeetingType::IncidentReview,
        MeetingType::Client,
        MeetingType::Workshop,
        MeetingType::Executive,
        MeetingType::Team,
        MeetingType::General,
    ];

    /// Look up by catalogue id; 0 means auto-detect and yields `None`
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1..=11 => Some(Self::ALL[usize::from(id) - 1]),
            _ => None,
        }
    }

    pub fn id(self) -> u8 {
        match self {
            MeetingType::Shareholder => 1,
            MeetingType::Board => 2,
            MeetingType::Planning => 3,
            MeetingType::ProgressUpdate => 4,
            MeetingType::Strategy => 5,
            MeetingType::IncidentReview => 6,
            MeetingType::Client => 7,
            MeetingType::Workshop => 8,
            MeetingType::Executive => 9,
            MeetingType::Team => 10,
            MeetingType::General => 11,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MeetingType::Shareholder => "Shareholder Meeting",
            MeetingType::Board => "Board Meeting",
            MeetingType::Planning => "Planning Meeting",
            MeetingType::ProgressUpdate => "Progress Update",
            MeetingType::Strategy => "Strategy Meeting",
            MeetingType::IncidentReview => "Incident Review",
            MeetingType::Client => "Client Meeting",
            MeetingType::Workshop => "Workshop",
            MeetingType::Executive => "Executive Meeting",
            MeetingType::Team => "Team Meeting",
            MeetingType::General => "General Meeting",
        }
    }

    /// Required summary sections, in order
    pub fn structure(self) -> &'static [&'static str] {
        match self {
            MeetingType::Shareholder => &["Agenda", "Resolutions", "Dividends", "Conclusions"],
            MeetingType::Board => &["Policy", "Approvals", "Board Resolutions"],
            MeetingType::Planning => &["Goals", "Work Plan", "Timeline", "Owners", "Risks"],
            MeetingType::ProgressUpdate => &[
                "Project Status",
                "Progress",
                "Issues",
                "Remedies",
                "Next Tasks",
            ],
            MeetingType::Strategy => &[
                "Business Direction",
                "Analysis",
                "Strategy",
                "Action Plan",
            ],
            MeetingType::IncidentReview => &[
                "Incident Details",
                "Root Cause",
                "Impact",
                "Remediation",
                "Prevention",
            ],
            MeetingType::Client => &["Proposal", "Feedback", "Agreements", "Next Steps"],
            MeetingType::Workshop => &["Topics", "Key Content", "Lessons Learned", "Action Items"],
            MeetingType::Executive => &["Key Issues", "Decisions", "Resolutions", "Owners"],
            MeetingType::Team => &["Work Updates", "Assignments", "Issues", "To-dos"],
            MeetingType::General => &[
                "Agenda",
                "Discussion Points",
                "Recommendations",
                "Resolutions",
            ],
        }
    }

    /// Sections joined with arrows, as shown to the model
    pub fn structure_line(self) -> String {
        self.structure().join(" → ")
    }
}

/// Markdown table of every meeting type and its structure
pub fn meeting_type_table() -> String {
    let mut table = String::from("| Type | Structure |\n|------|-----------|\n");
    for meeting_type in MeetingType::ALL {
        table.push_str(&format!(
            "| {} | {} |\n",
            meeting_type.name(),
            meeting_type.structure_line()
        ));
    }
    table
}

/// Plain-text listing of selectable meeting type ids, including 0 for auto-detection
pub fn meeting_type_listing() -> String {
    let mut listing = format!("{:>2}  {}\n", 0, "Auto (classified by the model)");
    for meeting_type in MeetingType::ALL {
        listing.push_str(&format!(
            "{:>2}  {}: {}\n",
            meeting_type.id(),
            meeting_type.name(),
            meeting_type.structure_line()
        ));
    }
    listing
}
