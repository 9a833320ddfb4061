use std::fs;
use std::path::Path;

use rf2_graph::constants::starter::AUTHOR_NAME;
use rf2_graph::{
    FactPayload, FileOutcome, InMemoryStore, Pipeline, Status, TransformConfig, TransformError,
    Traversal, VersionedFact, Vocabulary, derive_from_code, derive_from_text,
};
use uuid::Uuid;

const NAMESPACE: &str = "3094dbd1-60cf-44a6-92e3-0bb32ca4d3de";
const CONCEPT_HEADER: &str = "id\teffectiveTime\tactive\tmoduleId\tdefinitionStatusId\n";
const DESCRIPTION_HEADER: &str =
    "id\teffectiveTime\tactive\tmoduleId\tconceptId\tlanguageCode\ttypeId\tterm\tcaseSignificanceId\n";
const AXIOM_HEADER: &str =
    "id\teffectiveTime\tactive\tmoduleId\trefsetId\treferencedComponentId\towlExpression\n";
const MODULE: &str = "900000000000207008";

fn namespace() -> Uuid {
    Uuid::parse_str(NAMESPACE).unwrap()
}

fn config() -> TransformConfig {
    TransformConfig::new(namespace())
}

fn write_file(dir: &Path, name: &str, header: &str, rows: &[String]) {
    let mut content = header.to_string();
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    fs::write(dir.join(name), content).unwrap();
}

fn concept_row(id: &str, time: &str, active: &str) -> String {
    format!("{id}\t{time}\t{active}\t{MODULE}\t900000000000074008")
}

fn description_row(id: &str, concept: &str, term: &str, case: &str) -> String {
    format!("{id}\t20020131\t1\t{MODULE}\t{concept}\ten\t900000000000013009\t{term}\t{case}")
}

fn uuid(text: &str) -> Uuid {
    Uuid::parse_str(text).unwrap()
}

fn concept_entities(facts: &[VersionedFact]) -> Vec<Uuid> {
    facts
        .iter()
        .filter(|fact| fact.fact.payload == FactPayload::Concept)
        .map(|fact| fact.fact.entity)
        .collect()
}

#[test]
fn single_concept_row_becomes_three_facts_with_one_stamp() {
    let temp = tempfile::tempdir().unwrap();
    write_file(
        temp.path(),
        "sct2_Concept_Snapshot_INT_20020131.txt",
        CONCEPT_HEADER,
        &[concept_row("609096000", "20020131", "1")],
    );
    let store = InMemoryStore::new();
    let report = Pipeline::new(&store, config()).run(temp.path()).unwrap();
    assert_eq!(report.succeeded(), 1);
    assert_eq!(store.commit_count(), 1);
    assert_eq!(store.load_phases_ended(), 1);
    assert!(!store.is_load_phase_open());

    let concept = uuid("051fbfed-3c40-3130-8c09-889cb7b7b5b6");
    let facts = store.committed_facts();
    assert_eq!(facts.len(), 3);
    assert!(facts.iter().all(|fact| fact.fact.entity == concept));
    assert_eq!(facts[0].fact.payload, FactPayload::Concept);
    assert_eq!(
        facts[1].fact.payload,
        FactPayload::Identifier {
            source: Vocabulary::UniversallyUniqueIdentifier.id(),
            value: "051fbfed-3c40-3130-8c09-889cb7b7b5b6".to_string(),
        }
    );
    assert_eq!(
        facts[2].fact.payload,
        FactPayload::Identifier {
            source: uuid("87360947-e603-3397-804b-efd0fcc509b9"),
            value: "609096000".to_string(),
        }
    );

    let stamp = facts[0].stamp;
    assert_eq!(stamp.status, Status::Active);
    assert_eq!(stamp.time, 1_012_435_200);
    assert_eq!(stamp.module, uuid("1b4f1ba5-b725-390f-8c3b-33ec7096bdca"));
    assert_eq!(stamp.author, derive_from_text(&namespace(), AUTHOR_NAME));
    assert_eq!(stamp.path, Vocabulary::DevelopmentPath.id());

    let records = store.raw_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].stamp, stamp);
    assert_eq!(records[0].status_concept, Vocabulary::ActiveState.id());
}

#[test]
fn grouped_rows_compose_one_concept_per_id() {
    let temp = tempfile::tempdir().unwrap();
    write_file(
        temp.path(),
        "sct2_Concept_Snapshot.txt",
        CONCEPT_HEADER,
        &[
            concept_row("100", "20020131", "1"),
            concept_row("100", "20050131", "0"),
            concept_row("200", "20020131", "1"),
        ],
    );
    let store = InMemoryStore::new();
    let report = Pipeline::new(&store, config()).run(temp.path()).unwrap();
    let commit = report.commit.unwrap();
    assert_eq!(commit.sessions, 3);
    assert_eq!(
        concept_entities(&store.committed_facts()),
        vec![derive_from_code("100").unwrap(), derive_from_code("200").unwrap()]
    );
    assert_eq!(report.distinct_stamps, 2);
}

#[test]
fn facts_sharing_a_tuple_persist_one_stamp() {
    let temp = tempfile::tempdir().unwrap();
    write_file(
        temp.path(),
        "sct2_Description_Snapshot-en.txt",
        DESCRIPTION_HEADER,
        &[
            description_row("11", "609096000", "Role group", "900000000000448009"),
            description_row("12", "609096000", "Role grouping", "900000000000448009"),
        ],
    );
    let store = InMemoryStore::new();
    Pipeline::new(&store, config()).run(temp.path()).unwrap();
    let facts = store.committed_facts();
    assert_eq!(facts.len(), 2);
    assert_eq!(facts[0].stamp, facts[1].stamp);
    assert_eq!(store.raw_records().len(), 1);
}

#[test]
fn lenient_runs_commit_the_files_that_succeeded() {
    let temp = tempfile::tempdir().unwrap();
    write_file(
        temp.path(),
        "sct2_Concept_Snapshot.txt",
        CONCEPT_HEADER,
        &[concept_row("609096000", "20020131", "1")],
    );
    write_file(
        temp.path(),
        "sct2_Description_Snapshot-en.txt",
        DESCRIPTION_HEADER,
        &[description_row("11", "609096000", "Role group", "999")],
    );
    let store = InMemoryStore::new();
    let report = Pipeline::new(&store, config()).run(temp.path()).unwrap();
    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.failed(), 1);
    let failure = report
        .files
        .iter()
        .find_map(|file| match &file.outcome {
            FileOutcome::Failed(err) => Some(err),
            _ => None,
        })
        .unwrap();
    assert!(matches!(
        failure,
        TransformError::Lookup { line: 2, source, .. } if source.table == "case significance"
    ));
    assert!(
        store
            .committed_facts()
            .iter()
            .all(|fact| !matches!(fact.fact.payload, FactPayload::Description { .. }))
    );
    assert_eq!(store.committed_facts().len(), 3);
}

#[test]
fn strict_runs_abort_without_committing() {
    let temp = tempfile::tempdir().unwrap();
    write_file(
        temp.path(),
        "sct2_Concept_Snapshot.txt",
        CONCEPT_HEADER,
        &[concept_row("609096000", "20020131", "1")],
    );
    write_file(
        temp.path(),
        "sct2_Description_Snapshot-en.txt",
        DESCRIPTION_HEADER,
        &[description_row("11", "609096000", "Role group", "999")],
    );
    let store = InMemoryStore::new();
    let err = Pipeline::new(&store, config().with_strict(true))
        .run(temp.path())
        .unwrap_err();
    assert!(matches!(err, TransformError::Lookup { .. }));
    assert_eq!(store.commit_count(), 0);
    assert!(store.committed_facts().is_empty());
    assert_eq!(store.load_phases_ended(), 1);
}

#[test]
fn nothing_is_committed_when_every_file_fails() {
    let temp = tempfile::tempdir().unwrap();
    write_file(
        temp.path(),
        "sct2_Concept_Snapshot.txt",
        CONCEPT_HEADER,
        &[concept_row("609096000", "2002-01-31", "1")],
    );
    write_file(
        temp.path(),
        "sct2_Description_Snapshot-en.txt",
        DESCRIPTION_HEADER,
        &["too\tfew\tcolumns".to_string()],
    );
    let store = InMemoryStore::new();
    let err = Pipeline::new(&store, config()).run(temp.path()).unwrap_err();
    assert!(matches!(err, TransformError::AllFilesFailed(2)));
    assert_eq!(store.commit_count(), 0);
    assert_eq!(store.load_phases_ended(), 1);
}

#[test]
fn overrides_address_entities_consistently_across_files() {
    let target = uuid("aa33b132-c8e7-58cd-8b03-40433de08ce9");
    let temp = tempfile::tempdir().unwrap();
    write_file(
        temp.path(),
        "sct2_Concept_Snapshot.txt",
        CONCEPT_HEADER,
        &[concept_row("138875005", "20020131", "1")],
    );
    write_file(
        temp.path(),
        "sct2_sRefset_OWLExpressionSnapshot.txt",
        AXIOM_HEADER,
        &[format!(
            "0b8e52d4-77a1-4c3f-8d26-e1f93a5bc408\t20020131\t1\t{MODULE}\t733073007\t609096000\tSubClassOf(:609096000 :138875005)"
        )],
    );
    let store = InMemoryStore::new();
    Pipeline::new(&store, config().with_override("138875005", target))
        .run(temp.path())
        .unwrap();
    let facts = store.committed_facts();
    assert_eq!(concept_entities(&facts), vec![target]);
    let axiom = facts
        .iter()
        .find_map(|fact| match &fact.fact.payload {
            FactPayload::Axiom { text, .. } => Some(text.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(
        axiom,
        format!(
            "SubClassOf(:{} :{target})",
            derive_from_code("609096000").unwrap()
        )
    );
}

#[test]
fn recursive_traversal_reaches_nested_release_directories() {
    let temp = tempfile::tempdir().unwrap();
    let nested = temp.path().join("Snapshot").join("Terminology");
    fs::create_dir_all(&nested).unwrap();
    write_file(
        &nested,
        "sct2_Concept_Snapshot.txt",
        CONCEPT_HEADER,
        &[concept_row("609096000", "20020131", "1")],
    );

    let top_level = InMemoryStore::new();
    let report = Pipeline::new(&top_level, config()).run(temp.path()).unwrap();
    assert!(report.files.is_empty());
    assert!(report.commit.is_none());

    let recursive = InMemoryStore::new();
    let report = Pipeline::new(&recursive, config().with_traversal(Traversal::Recursive))
        .run(temp.path())
        .unwrap();
    assert_eq!(report.succeeded(), 1);
    assert_eq!(recursive.committed_facts().len(), 3);
}

#[test]
fn parallel_runs_commit_the_same_facts() {
    let temp = tempfile::tempdir().unwrap();
    write_file(
        temp.path(),
        "sct2_Concept_Snapshot.txt",
        CONCEPT_HEADER,
        &[
            concept_row("100", "20020131", "1"),
            concept_row("200", "20020131", "1"),
        ],
    );
    write_file(
        temp.path(),
        "sct2_Description_Snapshot-en.txt",
        DESCRIPTION_HEADER,
        &[
            description_row("11", "100", "first", "900000000000448009"),
            description_row("12", "200", "second", "900000000000017005"),
        ],
    );

    let render = |store: &InMemoryStore| {
        let mut lines: Vec<String> = store
            .committed_facts()
            .iter()
            .map(|fact| serde_json::to_string(fact).unwrap())
            .collect();
        lines.sort();
        lines
    };
    let sequential = InMemoryStore::new();
    Pipeline::new(&sequential, config()).run(temp.path()).unwrap();
    let parallel = InMemoryStore::new();
    Pipeline::new(&parallel, config().with_parallel(true))
        .run(temp.path())
        .unwrap();
    assert_eq!(render(&sequential), render(&parallel));
    assert_eq!(parallel.raw_records().len(), 1);
}
