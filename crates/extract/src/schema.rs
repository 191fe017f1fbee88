use serde::{Deserialize, Serialize};

/// Polarity of an event mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    #[default]
    Positive,
    Negative,
}

impl Sign {
    pub fn from_negated(negated: bool) -> Self {
        if negated { Sign::Negative } else { Sign::Positive }
    }

    pub fn is_negative(self) -> bool {
        self == Sign::Negative
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceFrame {
    pub id: String,
    pub text: String,
}

/// External grounding of a mention, e.g. `uniprot:P01112`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Xref {
    pub namespace: String,
    pub id: String,
}

impl Xref {
    pub fn qualified(&self) -> String {
        format!("{}:{}", self.namespace, self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModificationRecord {
    #[serde(rename = "type")]
    pub modification_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMentionFrame {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub xrefs: Vec<Xref>,
    pub modifications: Vec<ModificationRecord>,
}

impl EntityMentionFrame {
    /// The primary grounding: the first cross-reference, if any.
    pub fn identifier(&self) -> Option<String> {
        self.xrefs.first().map(Xref::qualified)
    }
}

/// What an argument points at. Complex arguments map sub-role labels
/// (`theme1`, `theme2`, ...) to entity ids, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentTarget {
    Entity(String),
    Event(String),
    Complex(Vec<(String, String)>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentFrame {
    pub role: String,
    pub text: String,
    pub target: ArgumentTarget,
}

impl ArgumentFrame {
    pub fn kind(&self) -> &'static str {
        match self.target {
            ArgumentTarget::Entity(_) => "entity",
            ArgumentTarget::Event(_) => "event",
            ArgumentTarget::Complex(_) => "complex",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventMentionFrame {
    pub id: String,
    pub event_type: String,
    pub subtype: Option<String>,
    pub regulation_type: Option<String>,
    pub text: String,
    pub sign: Sign,
    pub is_direct: bool,
    pub is_hypothesis: bool,
    pub rule: Option<String>,
    pub sentence_ref: Option<String>,
    pub arguments: Vec<ArgumentFrame>,
}
