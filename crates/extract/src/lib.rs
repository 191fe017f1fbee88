//! Frame-graph resolution and event transformation for text-mining output.
//!
//! Takes the entity, event and sentence frame documents of one paper and
//! produces a flat list of interaction relations.

pub mod amino_acids;
pub mod assembler;
pub mod error;
pub mod graph;
pub mod relation;
pub mod resolver;
pub mod schema;
pub mod site;
pub mod transform;

pub use assembler::OutputAssembler;
pub use error::FrameError;
pub use graph::{FrameGraph, GraphStats};
pub use relation::{
    EntityParticipant, Location, OutputDocument, OutputRelation, Participant,
    ParticipantModification, Predicate,
};
pub use resolver::{Resolver, arguments_by_role, first_argument_by_role};
pub use schema::{
    ArgumentFrame, ArgumentTarget, EntityMentionFrame, EventMentionFrame, ModificationRecord,
    SentenceFrame, Sign, Xref,
};
pub use site::{SiteAnnotator, SiteInfo};
pub use transform::{EventKind, EventTransformer};

use serde_json::Value;
use tracing::debug;

/// Build the frame graph for one document and transform all of its events.
pub fn process_document(
    doc_id: &str,
    entities: &Value,
    events: &Value,
    sentences: &Value,
) -> OutputDocument {
    let graph = FrameGraph::build(entities, events, sentences);
    let stats = graph.stats();
    debug!(
        doc_id,
        sentences = stats.sentences,
        entities = stats.entities,
        events = stats.events,
        dropped = stats.dropped,
        "Built frame graph"
    );

    OutputAssembler::new(doc_id, &graph).assemble()
}
