use crate::graph::FrameGraph;
use crate::schema::{ArgumentFrame, ArgumentTarget, EntityMentionFrame, EventMentionFrame};

/// All arguments of `event` with the given role, in declaration order.
pub fn arguments_by_role<'a>(event: &'a EventMentionFrame, role: &str) -> Vec<&'a ArgumentFrame> {
    event.arguments.iter().filter(|arg| arg.role == role).collect()
}

pub fn first_argument_by_role<'a>(
    event: &'a EventMentionFrame,
    role: &str,
) -> Option<&'a ArgumentFrame> {
    event.arguments.iter().find(|arg| arg.role == role)
}

/// Reference lookups against one document's [`FrameGraph`].
///
/// `None` always means a dangling reference; callers decide whether that
/// drops a participant or the whole relation.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'g> {
    graph: &'g FrameGraph,
}

impl<'g> Resolver<'g> {
    pub fn new(graph: &'g FrameGraph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &'g FrameGraph {
        self.graph
    }

    pub fn resolve_entity(&self, reference: &str) -> Option<&'g EntityMentionFrame> {
        self.graph.entity(reference)
    }

    pub fn resolve_event(&self, reference: &str) -> Option<&'g EventMentionFrame> {
        self.graph.event(reference)
    }

    /// Resolve every entity-kind argument, dropping dangling ones.
    pub fn resolve_entities(&self, arguments: &[&ArgumentFrame]) -> Vec<&'g EntityMentionFrame> {
        arguments
            .iter()
            .filter_map(|arg| match &arg.target {
                ArgumentTarget::Entity(reference) => self.resolve_entity(reference),
                _ => None,
            })
            .collect()
    }

    /// Entities behind the sub-roles of a complex argument whose label starts
    /// with `prefix`, in mapping order. Non-complex arguments yield nothing.
    pub fn complex_members(
        &self,
        argument: &ArgumentFrame,
        prefix: &str,
    ) -> Vec<&'g EntityMentionFrame> {
        match &argument.target {
            ArgumentTarget::Complex(members) => members
                .iter()
                .filter(|(label, _)| label.starts_with(prefix))
                .filter_map(|(_, reference)| self.resolve_entity(reference))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Entities an argument stands for: the entity itself, or the theme
    /// members of a complex. Event arguments contribute none.
    pub fn argument_entities(&self, argument: &ArgumentFrame) -> Vec<&'g EntityMentionFrame> {
        match &argument.target {
            ArgumentTarget::Entity(reference) => self.resolve_entity(reference).into_iter().collect(),
            ArgumentTarget::Complex(_) => self.complex_members(argument, "theme"),
            ArgumentTarget::Event(_) => Vec::new(),
        }
    }

    pub fn is_dangling(&self, argument: &ArgumentFrame) -> bool {
        match &argument.target {
            ArgumentTarget::Entity(reference) => self.resolve_entity(reference).is_none(),
            ArgumentTarget::Event(reference) => self.resolve_event(reference).is_none(),
            ArgumentTarget::Complex(members) => members
                .iter()
                .all(|(_, reference)| self.resolve_entity(reference).is_none()),
        }
    }
}
