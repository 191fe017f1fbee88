use crate::graph::FrameGraph;
use crate::relation::OutputDocument;
use crate::transform::EventTransformer;
use tracing::debug;

/// Collects the relations of every event, in graph order, into one document.
pub struct OutputAssembler<'g> {
    doc_id: &'g str,
    graph: &'g FrameGraph,
}

impl<'g> OutputAssembler<'g> {
    pub fn new(doc_id: &'g str, graph: &'g FrameGraph) -> Self {
        Self { doc_id, graph }
    }

    pub fn assemble(&self) -> OutputDocument {
        let transformer = EventTransformer::new(self.doc_id, self.graph);
        let events: Vec<_> = self
            .graph
            .events()
            .flat_map(|event| transformer.transform(event))
            .collect();

        debug!(
            doc_id = self.doc_id,
            event_frames = self.graph.stats().events,
            relations = events.len(),
            "Assembled document"
        );

        OutputDocument {
            doc_id: self.doc_id.to_string(),
            events,
        }
    }
}
