use crate::schema::{Sign, Xref};
use crate::site::SiteInfo;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regulation_type: Option<String>,
    pub sign: Sign,
    pub negative_information: bool,
    pub is_direct: bool,
    pub is_hypothesis: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub found_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantModification {
    #[serde(rename = "type")]
    pub modification_type: String,
    #[serde(default)]
    pub negated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<SiteInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityParticipant {
    pub entity_text: String,
    pub entity_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default)]
    pub xrefs: Vec<Xref>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifications: Vec<ParticipantModification>,
}

/// One side of a relation: a grounded mention, a whole nested relation, or,
/// past the nesting limit, the id of the nested event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "participant_type", rename_all = "lowercase")]
pub enum Participant {
    Entity(EntityParticipant),
    Event(Box<OutputRelation>),
    Reference { event_id: String },
}

impl Participant {
    pub fn as_entity(&self) -> Option<&EntityParticipant> {
        match self {
            Participant::Entity(entity) => Some(entity),
            _ => None,
        }
    }

    pub fn as_event(&self) -> Option<&OutputRelation> {
        match self {
            Participant::Event(relation) => Some(relation),
            _ => None,
        }
    }

    /// Mention text for entities, `None` for nested events and references.
    pub fn entity_text(&self) -> Option<&str> {
        self.as_entity().map(|e| e.entity_text.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

/// A single transformed interaction.
///
/// `participant_a` is the controller (or first theme), `participant_b` the
/// controlled, second theme, moved or modified entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRelation {
    pub event_id: String,
    pub predicate: Predicate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_a: Option<Participant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_b: Option<Participant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_location: Option<Location>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sites: Vec<SiteInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDocument {
    #[serde(rename = "docId")]
    pub doc_id: String,
    pub events: Vec<OutputRelation>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn participant(xrefs: Vec<Xref>) -> Participant {
        Participant::Entity(EntityParticipant {
            entity_text: "MEK".to_string(),
            entity_type: "protein".to_string(),
            identifier: None,
            xrefs,
            modifications: Vec::new(),
        })
    }

    #[test]
    fn test_entity_participant_always_carries_xrefs() {
        let value = serde_json::to_value(participant(Vec::new())).unwrap();
        assert_eq!(
            value,
            json!({"participant_type": "entity", "entity_text": "MEK",
                   "entity_type": "protein", "xrefs": []})
        );
    }

    #[test]
    fn test_reference_participant_shape() {
        let reference = Participant::Reference { event_id: "v5".to_string() };
        let value = serde_json::to_value(&reference).unwrap();
        assert_eq!(value, json!({"participant_type": "reference", "event_id": "v5"}));
        assert!(reference.as_entity().is_none() && reference.as_event().is_none());
        assert_eq!(serde_json::from_value::<Participant>(value).unwrap(), reference);
    }
}
