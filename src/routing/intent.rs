//! Keyword interpretation of free-text input while a conversation is idle.

/// What an idle-state message is asking for.
///
/// Only consulted outside capture steps; text typed while the bot is asking
/// for a name, email or inquiry is never run through this parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Greeting or an explicit menu request.
    Greeting,
    /// Option 1, bidding consultancy.
    ChooseBidding,
    /// Option 2, construction-project consultancy.
    ChooseProject,
    /// Option 3, talk to a representative.
    ChooseRepresentative,
    /// A bare "si"/"sí", answering a pending yes/no question.
    Affirm,
    /// A bare "no".
    Decline,
    /// Nothing recognized.
    Other,
}

impl Intent {
    /// Parse trimmed, lowercased text. Rules are evaluated top to bottom and
    /// the first match wins; substring checks are byte-literal ("licitación"
    /// with an accent does not match "licitacion"), yes/no answers are
    /// full-string matches only.
    pub fn parse(text: &str) -> Self {
        let t = text.trim().to_lowercase();

        if ["hola", "buenas", "menu", "menú"].iter().any(|k| t.contains(k)) {
            return Self::Greeting;
        }
        if t == "1" || t.contains("licitacion") {
            return Self::ChooseBidding;
        }
        if t == "2" || t.contains("proyecto") || t.contains("constructivo") {
            return Self::ChooseProject;
        }
        if t == "3" || t.contains("representante") || t.contains("hablar con") {
            return Self::ChooseRepresentative;
        }
        if t == "si" || t == "sí" {
            return Self::Affirm;
        }
        if t == "no" {
            return Self::Decline;
        }

        Self::Other
    }
}
