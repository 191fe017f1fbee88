use extract::OutputDocument;
use ingest::{FrameReader, PartType, discover_documents, output_path, write_output};
use serde_json::{Value, json};
use std::path::Path;

fn write(dir: &Path, name: &str, value: Value) {
    std::fs::write(dir.join(name), serde_json::to_string_pretty(&value).unwrap()).unwrap();
}

fn write_triple(dir: &Path, doc_id: &str) {
    write(dir, &format!("{doc_id}.uaz.entities.json"), json!({"frames": [
        {"frame-id": "ent-1", "frame-type": "entity-mention", "type": "protein", "text": "AKT",
         "xrefs": [{"namespace": "uniprot", "id": "P31749"}]},
        {"frame-id": "ent-2", "frame-type": "entity-mention", "type": "protein", "text": "GSK3B"},
        {"frame-id": "ent-3", "frame-type": "entity-mention", "type": "site", "text": "Ser9"}
    ]}));
    write(dir, &format!("{doc_id}.uaz.events.json"), json!({"frames": [
        {"frame-id": "evt-1", "frame-type": "event-mention", "type": "protein-modification",
         "subtype": "phosphorylation", "sentence": "sen-1", "arguments": [
            {"type": "theme", "argument-type": "entity", "arg": "ent-2"},
            {"type": "site", "argument-type": "entity", "arg": "ent-3"}]},
        {"frame-id": "evt-2", "frame-type": "event-mention", "type": "regulation",
         "sentence": "sen-1", "arguments": [
            {"type": "controller", "argument-type": "entity", "arg": "ent-1"},
            {"type": "controlled", "argument-type": "event", "arg": "evt-1"}]}
    ]}));
    write(dir, &format!("{doc_id}.uaz.sentences.json"), json!({"frames": [
        {"frame-id": "sen-1", "frame-type": "sentence", "text": "AKT phosphorylates GSK3B at Ser9."}
    ]}));
}

#[tokio::test]
async fn test_discover_read_convert_write() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let nested = input.path().join("batch");
    std::fs::create_dir(&nested).unwrap();
    write_triple(&nested, "PMC4000");

    let discovery = discover_documents(input.path(), true).unwrap();
    assert_eq!(discovery.duplicates, 0);
    let [parts] = discovery.documents.as_slice() else {
        panic!("expected one document, got {:?}", discovery.documents);
    };
    assert_eq!(parts.doc_id, "PMC4000");
    assert!(parts.path(PartType::Sentences).unwrap().starts_with(&nested));

    let raw = FrameReader::load_document(parts).await.unwrap();
    let document = extract::process_document(&raw.doc_id, &raw.entities, &raw.events, &raw.sentences);
    assert_eq!(document.events.len(), 2);

    let written = write_output(output.path(), &document, true).await.unwrap();
    assert_eq!(written, output_path(output.path(), "PMC4000"));

    let text = std::fs::read_to_string(&written).unwrap();
    let reread: OutputDocument = serde_json::from_str(&text).unwrap();
    assert_eq!(reread, document);

    let value: Value = serde_json::from_str(&text).unwrap();
    let regulation = &value["events"][1];
    assert_eq!(regulation["predicate"]["subtype"], "phosphorylation");
    assert_eq!(regulation["participant_a"]["xrefs"][0]["id"], "P31749");
    assert_eq!(regulation["participant_b"]["participant_type"], "event");
    assert_eq!(regulation["participant_b"]["sites"][0]["identifier"], "CHEBI:17115");
    assert_eq!(regulation["evidence"], "AKT phosphorylates GSK3B at Ser9.");
}

#[tokio::test]
async fn test_incomplete_document_is_not_converted() {
    let input = tempfile::tempdir().unwrap();
    write_triple(input.path(), "PMC1");
    std::fs::remove_file(input.path().join("PMC1.uaz.sentences.json")).unwrap();

    let discovery = discover_documents(input.path(), true).unwrap();
    assert!(discovery.documents.is_empty());
}
