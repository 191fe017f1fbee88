use crate::error::FrameError;
use crate::schema::{
    ArgumentFrame, ArgumentTarget, EntityMentionFrame, EventMentionFrame, ModificationRecord,
    SentenceFrame, Sign, Xref,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{debug, warn};

pub const ENTITY_MENTION: &str = "entity-mention";
pub const SENTENCE: &str = "sentence";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawFrame {
    frame_id: Option<String>,
    frame_type: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    subtype: Option<String>,
    regulation_type: Option<String>,
    text: Option<String>,
    #[serde(default)]
    xrefs: Vec<RawXref>,
    #[serde(default)]
    modifications: Vec<RawModification>,
    #[serde(default)]
    arguments: Vec<Value>,
    is_negated: Option<bool>,
    is_direct: Option<bool>,
    is_hypothesis: Option<bool>,
    found_by: Option<String>,
    sentence: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawXref {
    namespace: Option<String>,
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawModification {
    #[serde(rename = "type")]
    kind: Option<String>,
    evidence: Option<String>,
    negated: Option<bool>,
    site: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawArgument {
    #[serde(rename = "type")]
    role: Option<String>,
    text: Option<String>,
    argument_type: Option<String>,
    arg: Option<String>,
    args: Option<Map<String, Value>>,
}

/// Kept/dropped frame counts for one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct GraphStats {
    pub sentences: usize,
    pub entities: usize,
    pub events: usize,
    pub dropped: usize,
}

/// Per-document index of sentence, entity and event frames by id.
///
/// Events keep their document order; that order drives output order.
#[derive(Debug, Default)]
pub struct FrameGraph {
    sentences: HashMap<String, SentenceFrame>,
    entities: HashMap<String, EntityMentionFrame>,
    events: Vec<EventMentionFrame>,
    event_index: HashMap<String, usize>,
    dropped: usize,
}

impl FrameGraph {
    /// Build the graph from the three parsed frame documents.
    ///
    /// Never fails: frames that are malformed or of the wrong frame type are
    /// skipped individually.
    pub fn build(entities: &Value, events: &Value, sentences: &Value) -> Self {
        let mut graph = FrameGraph::default();

        for raw in raw_frames(entities, "entities") {
            match parse_frame(raw).and_then(|frame| {
                if frame.frame_type.as_deref() == Some(ENTITY_MENTION) {
                    entity_from_raw(frame).map(Some)
                } else {
                    Ok(None)
                }
            }) {
                Ok(Some(entity)) => graph.insert_entity(entity),
                Ok(None) => {}
                Err(e) => graph.drop_frame("entities", &e),
            }
        }

        for raw in raw_frames(sentences, "sentences") {
            match parse_frame(raw).and_then(|frame| {
                if frame.frame_type.as_deref() == Some(SENTENCE) {
                    sentence_from_raw(frame).map(Some)
                } else {
                    Ok(None)
                }
            }) {
                Ok(Some(sentence)) => graph.insert_sentence(sentence),
                Ok(None) => {}
                Err(e) => graph.drop_frame("sentences", &e),
            }
        }

        for raw in raw_frames(events, "events") {
            match parse_frame(raw).and_then(event_from_raw) {
                Ok(event) => graph.insert_event(event),
                Err(e) => graph.drop_frame("events", &e),
            }
        }

        graph
    }

    pub fn insert_sentence(&mut self, sentence: SentenceFrame) {
        if self.sentences.contains_key(&sentence.id) {
            debug!(frame_id = %sentence.id, "Duplicate sentence frame ignored");
            return;
        }
        self.sentences.insert(sentence.id.clone(), sentence);
    }

    pub fn insert_entity(&mut self, entity: EntityMentionFrame) {
        if self.entities.contains_key(&entity.id) {
            debug!(frame_id = %entity.id, "Duplicate entity frame ignored");
            return;
        }
        self.entities.insert(entity.id.clone(), entity);
    }

    pub fn insert_event(&mut self, event: EventMentionFrame) {
        if self.event_index.contains_key(&event.id) {
            debug!(frame_id = %event.id, "Duplicate event frame ignored");
            return;
        }
        self.event_index.insert(event.id.clone(), self.events.len());
        self.events.push(event);
    }

    pub fn sentence(&self, id: &str) -> Option<&SentenceFrame> {
        self.sentences.get(id)
    }

    pub fn entity(&self, id: &str) -> Option<&EntityMentionFrame> {
        self.entities.get(id)
    }

    pub fn event(&self, id: &str) -> Option<&EventMentionFrame> {
        self.event_index.get(id).map(|&idx| &self.events[idx])
    }

    /// Events in document order.
    pub fn events(&self) -> impl Iterator<Item = &EventMentionFrame> {
        self.events.iter()
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            sentences: self.sentences.len(),
            entities: self.entities.len(),
            events: self.events.len(),
            dropped: self.dropped,
        }
    }

    fn drop_frame(&mut self, source: &str, error: &FrameError) {
        self.dropped += 1;
        debug!(source, error = %error, "Skipping frame");
    }
}

fn raw_frames<'a>(document: &'a Value, source: &str) -> &'a [Value] {
    match document.get("frames").and_then(Value::as_array) {
        Some(frames) => frames.as_slice(),
        None => {
            warn!(source, "Frame document has no `frames` array");
            &[]
        }
    }
}

fn parse_frame(raw: &Value) -> Result<RawFrame, FrameError> {
    Ok(RawFrame::deserialize(raw)?)
}

fn sentence_from_raw(raw: RawFrame) -> Result<SentenceFrame, FrameError> {
    Ok(SentenceFrame {
        id: raw.frame_id.ok_or(FrameError::MissingField("frame-id"))?,
        text: raw.text.ok_or(FrameError::MissingField("text"))?,
    })
}

fn entity_from_raw(raw: RawFrame) -> Result<EntityMentionFrame, FrameError> {
    let id = raw.frame_id.ok_or(FrameError::MissingField("frame-id"))?;
    let text = raw.text.ok_or(FrameError::MissingField("text"))?;
    let entity_type = raw.kind.ok_or(FrameError::MissingField("type"))?;

    let xrefs = raw
        .xrefs
        .into_iter()
        .filter_map(|x| match (x.namespace, x.id) {
            (Some(namespace), Some(id)) => Some(Xref { namespace, id }),
            _ => None,
        })
        .collect();

    let modifications = raw
        .modifications
        .into_iter()
        .filter_map(|m| {
            Some(ModificationRecord {
                modification_type: m.kind?,
                evidence: m.evidence,
                negated: m.negated,
                site_text: m.site,
            })
        })
        .collect();

    Ok(EntityMentionFrame {
        id,
        text,
        entity_type,
        xrefs,
        modifications,
    })
}

fn event_from_raw(raw: RawFrame) -> Result<EventMentionFrame, FrameError> {
    let id = raw.frame_id.ok_or(FrameError::MissingField("frame-id"))?;
    let event_type = raw.kind.ok_or(FrameError::MissingField("type"))?;

    let mut arguments = Vec::with_capacity(raw.arguments.len());
    for value in &raw.arguments {
        match parse_argument(value) {
            Ok(arg) => arguments.push(arg),
            Err(e) => debug!(event_id = %id, error = %e, "Skipping argument"),
        }
    }

    Ok(EventMentionFrame {
        id,
        event_type,
        subtype: raw.subtype,
        regulation_type: raw.regulation_type,
        text: raw.text.unwrap_or_default(),
        sign: Sign::from_negated(raw.is_negated.unwrap_or(false)),
        is_direct: raw.is_direct.unwrap_or(false),
        is_hypothesis: raw.is_hypothesis.unwrap_or(false),
        rule: raw.found_by,
        sentence_ref: raw.sentence,
        arguments,
    })
}

/// Turn one raw argument object into a tagged [`ArgumentFrame`].
///
/// The `argument-type` field picks the variant; when it is absent the shape
/// decides (`args` mapping means complex, a lone `arg` means entity).
pub fn parse_argument(value: &Value) -> Result<ArgumentFrame, FrameError> {
    let raw = RawArgument::deserialize(value)?;
    let role = raw.role.ok_or(FrameError::MissingField("type"))?;
    let text = raw.text.unwrap_or_default();

    let kind = match raw.argument_type.as_deref() {
        Some(kind) => kind.to_string(),
        None if raw.args.is_some() => "complex".to_string(),
        None => "entity".to_string(),
    };

    let target = match kind.as_str() {
        "entity" | "event" => {
            let reference = match (raw.arg, &raw.args) {
                (Some(arg), _) => arg,
                // single-member mapping used in place of `arg`
                (None, Some(args)) if args.len() == 1 => args
                    .values()
                    .next()
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .ok_or_else(|| FrameError::MissingReference { role: role.clone() })?,
                _ => return Err(FrameError::MissingReference { role }),
            };
            if kind == "entity" {
                ArgumentTarget::Entity(reference)
            } else {
                ArgumentTarget::Event(reference)
            }
        }
        "complex" => {
            let args = raw
                .args
                .ok_or_else(|| FrameError::MissingReference { role: role.clone() })?;
            let members = args
                .into_iter()
                .filter_map(|(label, v)| v.as_str().map(|id| (label, id.to_string())))
                .collect();
            ArgumentTarget::Complex(members)
        }
        other => {
            return Err(FrameError::UnknownArgumentKind {
                role,
                kind: other.to_string(),
            });
        }
    };

    Ok(ArgumentFrame { role, text, target })
}
