use crate::graph::FrameGraph;
use crate::relation::{
    EntityParticipant, Location, OutputRelation, Participant, ParticipantModification, Predicate,
};
use crate::resolver::{Resolver, arguments_by_role, first_argument_by_role};
use crate::schema::{ArgumentFrame, ArgumentTarget, EntityMentionFrame, EventMentionFrame};
use crate::site::{SiteAnnotator, SiteInfo};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Transformation rule selected by event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Regulation,
    ComplexAssembly,
    Translocation,
    ProteinModification,
    Other,
}

impl From<&str> for EventKind {
    fn from(event_type: &str) -> Self {
        match event_type {
            "activation" | "regulation" => EventKind::Regulation,
            "complex-assembly" | "binding" => EventKind::ComplexAssembly,
            "translocation" => EventKind::Translocation,
            "protein-modification" => EventKind::ProteinModification,
            _ => EventKind::Other,
        }
    }
}

/// Deepest level at which a nested event is still embedded in full. Below it
/// the participant is a reference to the nested event's id.
pub const MAX_NESTING_DEPTH: usize = 4;

/// Turns event frames of one document into output relations.
///
/// Transforming the same event twice yields the same relations. Nested
/// results are memoised per (event id, depth) when they were computed without
/// hitting a cycle or the depth limit, so shared sub-events are transformed once.
pub struct EventTransformer<'g> {
    doc_id: &'g str,
    resolver: Resolver<'g>,
    sites: SiteAnnotator,
    memo: RefCell<HashMap<(String, usize), Vec<OutputRelation>>>,
    truncations: Cell<usize>,
}

/// Resolved side of a regulation: participants plus any subtype carried up
/// from a nested event.
struct Side {
    participants: Vec<Participant>,
    subtype: Option<String>,
}

impl<'g> EventTransformer<'g> {
    pub fn new(doc_id: &'g str, graph: &'g FrameGraph) -> Self {
        Self {
            doc_id,
            resolver: Resolver::new(graph),
            sites: SiteAnnotator::new(),
            memo: RefCell::new(HashMap::new()),
            truncations: Cell::new(0),
        }
    }

    /// Transform one event into zero or more relations.
    pub fn transform(&self, event: &EventMentionFrame) -> Vec<OutputRelation> {
        let mut visiting = HashSet::new();
        self.transform_guarded(event, &mut visiting, 0)
    }

    /// `visiting` holds the ids on the current controller/controlled chain;
    /// re-entering one of them ends that branch with no relations. `depth` is
    /// how far `event` sits below the top-level event.
    fn transform_guarded(
        &self,
        event: &EventMentionFrame,
        visiting: &mut HashSet<String>,
        depth: usize,
    ) -> Vec<OutputRelation> {
        if visiting.contains(&event.id) {
            debug!(doc_id = self.doc_id, event_id = %event.id, "Cyclic event reference, stopping");
            self.truncations.set(self.truncations.get() + 1);
            return Vec::new();
        }

        let key = (event.id.clone(), depth);
        let cached = self.memo.borrow().get(&key).cloned();
        if let Some(relations) = cached {
            return relations;
        }

        let truncations = self.truncations.get();
        visiting.insert(event.id.clone());
        let relations = match EventKind::from(event.event_type.as_str()) {
            EventKind::Regulation => self.regulation(event, visiting, depth),
            EventKind::ComplexAssembly => self.complex_assembly(event),
            EventKind::Translocation => self.translocation(event),
            EventKind::ProteinModification => self.protein_modification(event),
            EventKind::Other => self.generic(event),
        };

        visiting.remove(&event.id);

        // a truncated result depends on the path that led here
        if self.truncations.get() == truncations {
            self.memo.borrow_mut().insert(key, relations.clone());
        }
        relations
    }

    /// One relation per resolved controller, each paired with the first
    /// resolved controlled participant.
    fn regulation(
        &self,
        event: &EventMentionFrame,
        visiting: &mut HashSet<String>,
        depth: usize,
    ) -> Vec<OutputRelation> {
        let Some(controlled_arg) = first_argument_by_role(event, "controlled") else {
            debug!(doc_id = self.doc_id, event_id = %event.id, "Regulation without controlled argument");
            return Vec::new();
        };
        let controlled = self.side(event, controlled_arg, visiting, depth);
        let Some(controlled_participant) = controlled.participants.into_iter().next() else {
            return Vec::new();
        };

        let controllers = match first_argument_by_role(event, "controller") {
            Some(arg) => self.side(event, arg, visiting, depth).participants,
            None => Vec::new(),
        };
        if controllers.is_empty() {
            debug!(doc_id = self.doc_id, event_id = %event.id, "Regulation without resolvable controller");
        }

        let mut predicate = self.predicate(event);
        if predicate.subtype.is_none() {
            predicate.subtype = controlled.subtype;
        }
        let sites = self.event_sites(event);
        let evidence = self.evidence(event);

        controllers
            .into_iter()
            .map(|controller| OutputRelation {
                event_id: event.id.clone(),
                predicate: predicate.clone(),
                participant_a: Some(controller),
                participant_b: Some(controlled_participant.clone()),
                from_location: None,
                to_location: None,
                sites: sites.clone(),
                evidence: evidence.clone(),
            })
            .collect()
    }

    fn side(
        &self,
        event: &EventMentionFrame,
        argument: &ArgumentFrame,
        visiting: &mut HashSet<String>,
        depth: usize,
    ) -> Side {
        match &argument.target {
            ArgumentTarget::Event(reference) => {
                let Some(nested) = self.resolver.resolve_event(reference) else {
                    self.dangling(event, argument);
                    return Side { participants: Vec::new(), subtype: None };
                };
                if depth >= MAX_NESTING_DEPTH {
                    debug!(doc_id = self.doc_id, event_id = %event.id, nested = %nested.id, "Nesting limit reached, referencing event");
                    self.truncations.set(self.truncations.get() + 1);
                    return Side {
                        participants: vec![Participant::Reference { event_id: nested.id.clone() }],
                        subtype: nested.subtype.clone(),
                    };
                }
                let relations = self.transform_guarded(nested, visiting, depth + 1);
                let subtype = nested
                    .subtype
                    .clone()
                    .or_else(|| relations.first().and_then(|r| r.predicate.subtype.clone()));
                Side {
                    participants: relations
                        .into_iter()
                        .map(|r| Participant::Event(Box::new(r)))
                        .collect(),
                    subtype,
                }
            }
            _ => Side {
                participants: self.participants(event, argument),
                subtype: None,
            },
        }
    }

    /// Exactly two distinct themes produce a symmetric pair of relations.
    fn complex_assembly(&self, event: &EventMentionFrame) -> Vec<OutputRelation> {
        let mut seen = HashSet::new();
        let themes: Vec<&EntityMentionFrame> = self
            .theme_entities(event)
            .into_iter()
            .filter(|entity| seen.insert(entity.id.clone()))
            .collect();

        let [first, second] = themes.as_slice() else {
            debug!(
                doc_id = self.doc_id,
                event_id = %event.id,
                themes = themes.len(),
                "Complex assembly needs exactly two themes"
            );
            return Vec::new();
        };

        let a = self.entity_participant(first);
        let b = self.entity_participant(second);
        let mut forward = self.base_relation(event);
        forward.sites = self.event_sites(event);

        let mut reverse = forward.clone();
        forward.participant_a = Some(a.clone());
        forward.participant_b = Some(b.clone());
        reverse.participant_a = Some(b);
        reverse.participant_b = Some(a);

        vec![forward, reverse]
    }

    fn translocation(&self, event: &EventMentionFrame) -> Vec<OutputRelation> {
        let theme = self.first_entity(event, "theme");
        let destination = self.first_entity(event, "destination");
        let (Some(theme), Some(destination)) = (theme, destination) else {
            debug!(doc_id = self.doc_id, event_id = %event.id, "Translocation needs theme and destination");
            return Vec::new();
        };
        let source = self.first_entity(event, "source");

        let mut relation = self.base_relation(event);
        relation.participant_b = Some(self.entity_participant(theme));
        relation.from_location = source.map(location);
        relation.to_location = Some(location(destination));
        relation.sites = self.event_sites(event);
        vec![relation]
    }

    fn protein_modification(&self, event: &EventMentionFrame) -> Vec<OutputRelation> {
        let Some(modified) = self.theme_entities(event).into_iter().next() else {
            debug!(doc_id = self.doc_id, event_id = %event.id, "Modification without resolvable theme");
            return Vec::new();
        };

        let mut relation = self.base_relation(event);
        relation.participant_b = Some(self.entity_participant(modified));
        relation.sites = self.event_sites(event);
        vec![relation]
    }

    /// Fallback for unrecognised types: always one relation, with the first
    /// two resolvable entities in argument order.
    fn generic(&self, event: &EventMentionFrame) -> Vec<OutputRelation> {
        let mut entities = event
            .arguments
            .iter()
            .filter(|arg| arg.role != "site")
            .flat_map(|arg| self.resolver.argument_entities(arg));

        let mut relation = self.base_relation(event);
        relation.participant_a = entities.next().map(|e| self.entity_participant(e));
        relation.participant_b = entities.next().map(|e| self.entity_participant(e));
        relation.sites = self.event_sites(event);
        vec![relation]
    }

    fn base_relation(&self, event: &EventMentionFrame) -> OutputRelation {
        OutputRelation {
            event_id: event.id.clone(),
            predicate: self.predicate(event),
            participant_a: None,
            participant_b: None,
            from_location: None,
            to_location: None,
            sites: Vec::new(),
            evidence: self.evidence(event),
        }
    }

    fn predicate(&self, event: &EventMentionFrame) -> Predicate {
        Predicate {
            event_type: event.event_type.clone(),
            subtype: event.subtype.clone(),
            regulation_type: event.regulation_type.clone(),
            sign: event.sign,
            negative_information: event.sign.is_negative(),
            is_direct: event.is_direct,
            is_hypothesis: event.is_hypothesis,
            found_by: event.rule.clone(),
        }
    }

    fn evidence(&self, event: &EventMentionFrame) -> Option<String> {
        let reference = event.sentence_ref.as_deref()?;
        let sentence = self.resolver.graph().sentence(reference);
        if sentence.is_none() {
            debug!(doc_id = self.doc_id, event_id = %event.id, sentence = reference, "Dangling sentence reference");
        }
        sentence.map(|s| s.text.clone())
    }

    fn participants(&self, event: &EventMentionFrame, argument: &ArgumentFrame) -> Vec<Participant> {
        let entities = self.resolver.argument_entities(argument);
        if entities.is_empty() {
            self.dangling(event, argument);
        }
        entities
            .into_iter()
            .map(|e| self.entity_participant(e))
            .collect()
    }

    fn theme_entities(&self, event: &EventMentionFrame) -> Vec<&'g EntityMentionFrame> {
        arguments_by_role(event, "theme")
            .into_iter()
            .flat_map(|arg| {
                let entities = self.resolver.argument_entities(arg);
                if entities.is_empty() {
                    self.dangling(event, arg);
                }
                entities
            })
            .collect()
    }

    fn first_entity(&self, event: &EventMentionFrame, role: &str) -> Option<&'g EntityMentionFrame> {
        let argument = first_argument_by_role(event, role)?;
        let entity = self.resolver.argument_entities(argument).into_iter().next();
        if entity.is_none() {
            self.dangling(event, argument);
        }
        entity
    }

    /// Site annotations from every `site` argument that resolves.
    fn event_sites(&self, event: &EventMentionFrame) -> Vec<SiteInfo> {
        arguments_by_role(event, "site")
            .into_iter()
            .flat_map(|arg| {
                let entities = self.resolver.argument_entities(arg);
                if entities.is_empty() {
                    self.dangling(event, arg);
                }
                entities
            })
            .map(|entity| self.sites.annotate(&entity.text, entity.identifier()))
            .collect()
    }

    fn entity_participant(&self, entity: &EntityMentionFrame) -> Participant {
        let modifications = entity
            .modifications
            .iter()
            .map(|m| ParticipantModification {
                modification_type: m.modification_type.clone(),
                negated: m.negated.unwrap_or(false),
                evidence: m.evidence.clone(),
                site: m.site_text.as_deref().map(|text| self.sites.annotate(text, None)),
            })
            .collect();

        Participant::Entity(EntityParticipant {
            entity_text: entity.text.clone(),
            entity_type: entity.entity_type.clone(),
            identifier: entity.identifier(),
            xrefs: entity.xrefs.clone(),
            modifications,
        })
    }

    fn dangling(&self, event: &EventMentionFrame, argument: &ArgumentFrame) {
        let message = if self.resolver.is_dangling(argument) {
            "Unresolved argument reference"
        } else {
            "Argument resolved to no entities"
        };
        debug!(
            doc_id = self.doc_id,
            event_id = %event.id,
            role = %argument.role,
            kind = argument.kind(),
            "{message}"
        );
    }
}

fn location(entity: &EntityMentionFrame) -> Location {
    Location {
        text: entity.text.clone(),
        identifier: entity.identifier(),
    }
}
