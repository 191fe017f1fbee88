use extract::{Participant, Sign, process_document};
use serde_json::{Value, json};

fn sentences() -> Value {
    json!({"frames": [
        {"frame-id": "sen-1", "frame-type": "sentence", "text": "RAS activates MEK."},
        {"frame-id": "sen-2", "frame-type": "sentence", "text": "p53 binds MDM2."}
    ]})
}

fn entities() -> Value {
    json!({"frames": [
        {"frame-id": "ent-ras", "frame-type": "entity-mention", "type": "gene-or-gene-product",
         "text": "RAS", "xrefs": [{"namespace": "uniprot", "id": "P01112"}]},
        {"frame-id": "ent-mek", "frame-type": "entity-mention", "type": "gene-or-gene-product",
         "text": "MEK", "xrefs": [{"namespace": "uniprot", "id": "Q02750"}]},
        {"frame-id": "ent-p53", "frame-type": "entity-mention", "type": "gene-or-gene-product",
         "text": "p53", "xrefs": [{"namespace": "uniprot", "id": "P04637"}]},
        {"frame-id": "ent-mdm2", "frame-type": "entity-mention", "type": "gene-or-gene-product",
         "text": "MDM2", "xrefs": [{"namespace": "uniprot", "id": "Q00987"}]},
        {"frame-id": "ent-x", "frame-type": "entity-mention", "type": "gene-or-gene-product",
         "text": "Protein-X"},
        {"frame-id": "ent-nuc", "frame-type": "entity-mention", "type": "cellular-location",
         "text": "nucleus", "xrefs": [{"namespace": "go", "id": "GO:0005634"}]},
        {"frame-id": "ent-site", "frame-type": "entity-mention", "type": "site",
         "text": "Ser123", "xrefs": [{"namespace": "pubchem", "id": "5951"}]}
    ]})
}

fn argument(role: &str, kind: &str, reference: &str) -> Value {
    json!({"type": role, "text": reference, "argument-type": kind, "arg": reference})
}

fn events() -> Value {
    json!({"frames": [
        {"frame-id": "evt-act", "frame-type": "event-mention", "type": "activation",
         "sentence": "sen-1", "found-by": "Positive_activation_syntax_1",
         "arguments": [argument("controller", "entity", "ent-ras"),
                       argument("controlled", "entity", "ent-mek")]},
        {"frame-id": "evt-bind", "frame-type": "event-mention", "type": "complex-assembly",
         "sentence": "sen-2",
         "arguments": [argument("theme", "entity", "ent-p53"),
                       argument("theme", "entity", "ent-mdm2"),
                       argument("site", "entity", "ent-site")]},
        {"frame-id": "evt-trans", "frame-type": "event-mention", "type": "translocation",
         "arguments": [argument("theme", "entity", "ent-x"),
                       argument("destination", "entity", "ent-nuc")]},
        {"frame-id": "evt-broken", "frame-type": "event-mention", "type": "activation",
         "arguments": [argument("controller", "entity", "ent-ras"),
                       argument("controlled", "entity", "ent-missing")]},
        {"frame-id": "evt-mod", "frame-type": "event-mention", "type": "protein-modification",
         "subtype": "phosphorylation",
         "arguments": [argument("theme", "entity", "ent-missing"),
                       argument("theme", "entity", "ent-mek"),
                       argument("site", "entity", "ent-site")]}
    ]})
}

fn entity_text(participant: &Option<Participant>) -> Option<&str> {
    participant.as_ref().and_then(Participant::entity_text)
}

#[test]
fn test_activation_between_two_entities() {
    let doc = process_document("PMC1", &entities(), &events(), &sentences());
    let activation: Vec<_> = doc.events.iter().filter(|r| r.event_id == "evt-act").collect();

    assert_eq!(activation.len(), 1);
    let relation = activation[0];
    assert_eq!(relation.predicate.event_type, "activation");
    assert_eq!(relation.predicate.sign, Sign::Positive);
    assert!(!relation.predicate.negative_information);
    assert_eq!(entity_text(&relation.participant_a), Some("RAS"));
    assert_eq!(entity_text(&relation.participant_b), Some("MEK"));
    assert_eq!(relation.evidence.as_deref(), Some("RAS activates MEK."));
}

#[test]
fn test_complex_assembly_is_symmetric() {
    let doc = process_document("PMC1", &entities(), &events(), &sentences());
    let binding: Vec<_> = doc.events.iter().filter(|r| r.event_id == "evt-bind").collect();

    assert_eq!(binding.len(), 2);
    assert_eq!(entity_text(&binding[0].participant_a), Some("p53"));
    assert_eq!(entity_text(&binding[0].participant_b), Some("MDM2"));
    assert_eq!(entity_text(&binding[1].participant_a), Some("MDM2"));
    assert_eq!(entity_text(&binding[1].participant_b), Some("p53"));
    assert_eq!(binding[0].predicate, binding[1].predicate);
    assert_eq!(binding[0].sites, binding[1].sites);
}

#[test]
fn test_translocation_without_source_omits_key() {
    let doc = process_document("PMC1", &entities(), &events(), &sentences());
    let relation = doc.events.iter().find(|r| r.event_id == "evt-trans").unwrap();

    assert_eq!(relation.to_location.as_ref().unwrap().text, "nucleus");
    let value = serde_json::to_value(relation).unwrap();
    assert_eq!(value["to_location"]["text"], "nucleus");
    assert_eq!(value["to_location"]["identifier"], "go:GO:0005634");
    assert!(value.get("from_location").is_none());
}

#[test]
fn test_site_grounding_is_corrected() {
    let doc = process_document("PMC1", &entities(), &events(), &sentences());
    let relation = doc.events.iter().find(|r| r.event_id == "evt-mod").unwrap();

    let site = &relation.sites[0];
    assert_eq!(site.site_text, "Ser123");
    assert_eq!(site.amino_acid.as_deref(), Some("serine"));
    assert_eq!(site.position.as_deref(), Some("123"));
    assert_eq!(site.identifier.as_deref(), Some("CHEBI:17115"));
}

#[test]
fn test_dangling_reference_does_not_stop_document() {
    let doc = process_document("PMC1", &entities(), &events(), &sentences());

    assert!(doc.events.iter().all(|r| r.event_id != "evt-broken"));
    let ids: Vec<_> = doc.events.iter().map(|r| r.event_id.as_str()).collect();
    assert_eq!(ids, vec!["evt-act", "evt-bind", "evt-bind", "evt-trans", "evt-mod"]);

    let modification = doc.events.iter().find(|r| r.event_id == "evt-mod").unwrap();
    assert_eq!(entity_text(&modification.participant_b), Some("MEK"));
}

#[test]
fn test_processing_is_idempotent() {
    let first = process_document("PMC1", &entities(), &events(), &sentences());
    let second = process_document("PMC1", &entities(), &events(), &sentences());
    assert_eq!(first, second);
}

#[test]
fn test_output_document_shape() {
    let doc = process_document("PMC1", &entities(), &events(), &sentences());
    let value = serde_json::to_value(&doc).unwrap();

    assert_eq!(value["docId"], "PMC1");
    let first = &value["events"][0];
    assert_eq!(first["predicate"]["type"], "activation");
    assert_eq!(first["predicate"]["sign"], "positive");
    assert_eq!(first["predicate"]["found_by"], "Positive_activation_syntax_1");
    assert_eq!(first["participant_a"]["participant_type"], "entity");
    assert_eq!(first["participant_a"]["identifier"], "uniprot:P01112");
    assert!(first.get("sites").is_none());
}

#[test]
fn test_empty_documents() {
    let empty = json!({"frames": []});
    let doc = process_document("PMC0", &empty, &empty, &empty);
    assert_eq!(doc.doc_id, "PMC0");
    assert!(doc.events.is_empty());
}

#[test]
fn test_diamond_event_chain_stays_small() {
    // every regulation names the next event as both controller and controlled
    let length = 21;
    let mut frames: Vec<Value> = (0..length - 1)
        .map(|i| {
            let next = format!("evt-{}", i + 1);
            json!({"frame-id": format!("evt-{i}"), "frame-type": "event-mention", "type": "regulation",
                   "sentence": "sen-1",
                   "arguments": [argument("controller", "event", &next),
                                 argument("controlled", "event", &next)]})
        })
        .collect();
    frames.push(json!({"frame-id": format!("evt-{}", length - 1), "frame-type": "event-mention",
                       "type": "protein-modification", "subtype": "phosphorylation",
                       "arguments": [argument("theme", "entity", "ent-mek")]}));

    let doc = process_document("PMC9", &entities(), &json!({ "frames": frames }), &sentences());
    assert_eq!(doc.events.len(), length);
    assert_eq!(doc.events[length - 2].predicate.subtype.as_deref(), Some("phosphorylation"));

    let serialized = serde_json::to_string(&doc).unwrap();
    assert!(serialized.len() < 1_000_000, "output grew to {} bytes", serialized.len());
    assert!(serialized.contains(r#""participant_type":"reference""#));
}
