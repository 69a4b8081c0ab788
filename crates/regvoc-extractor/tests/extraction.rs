//! End-to-end extraction over the pre-parsed regulations corpus

use proptest::prelude::*;

use regvoc_core::{Predicate, Strategy, Triple, TripleSink, MIN_TERM_LENGTH};
use regvoc_extractor::{Coordinator, RelationExtractor, StopwordFilter};
use regvoc_parser::PreparsedSource;

const CORPUS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/regulations.json");

fn source() -> PreparsedSource {
    PreparsedSource::from_path(CORPUS).expect("fixture corpus loads")
}

fn run(strategy: Strategy, workers: usize) -> TripleSink {
    let source = source();
    let coordinator =
        Coordinator::new(RelationExtractor::new(strategy, StopwordFilter::default()), workers)
            .unwrap();
    let (sink, report) = coordinator.process_document("regulations", &source, &source.block_texts());
    assert_eq!(report.failed_blocks, 0);
    assert_eq!(report.failed_sentences, 0);
    assert_eq!(report.sentences, 4);
    sink
}

#[test]
fn test_constituency_fox() {
    let sink = run(Strategy::Constituency, 2);
    assert!(sink.contains(&Triple::custom("fox", "jumps", "dog")));
}

#[test]
fn test_constituency_squirrel() {
    let sink = run(Strategy::Constituency, 2);
    assert!(sink.contains(&Triple::custom("squirrel", "become", "visitor")));
    assert!(sink.contains(&Triple::narrower("squirrel", "rare squirrel")));
}

#[test]
fn test_reference_material_both_strategies() {
    for strategy in [Strategy::Dependency, Strategy::Constituency] {
        let sink = run(strategy, 2);
        let narrower = Triple::narrower("material", "reference material");
        assert!(sink.contains(&narrower), "{strategy}");
        assert!(sink.contains(&narrower.inversion()), "{strategy}");
    }
}

#[test]
fn test_dependency_relations() {
    let sink = run(Strategy::Dependency, 2);
    assert!(sink.contains(&Triple::custom("quick fox", "jumps", "lazy dog")));
    assert!(sink.contains(&Triple::related("reference material", "guide")));
    assert!(sink.contains(&Triple::related("records", "information")));
    assert!(sink.contains(&Triple::narrower("records", "emails")));
    assert!(sink.contains(&Triple::custom("agencies", "keep", "records")));
    assert!(sink.contains(&Triple::custom("bureaus", "keep", "records")));
}

#[test]
fn test_no_short_terms_stored() {
    for strategy in [Strategy::Dependency, Strategy::Constituency] {
        for triple in run(strategy, 1).into_sorted() {
            assert!(triple.subject().len() > MIN_TERM_LENGTH, "{triple}");
            assert!(triple.object().len() > MIN_TERM_LENGTH, "{triple}");
            assert!(triple.predicate().as_str().len() > MIN_TERM_LENGTH, "{triple}");
        }
    }
}

#[test]
fn test_qualification_inversions_present() {
    let sink = run(Strategy::Dependency, 2);
    for qualifier in ["quick fox", "brown fox", "lazy dog", "rare squirrel", "regular visitor"] {
        let triple = sink
            .snapshot()
            .into_iter()
            .find(|t| *t.predicate() == Predicate::Narrower && t.object() == qualifier)
            .unwrap_or_else(|| panic!("missing narrower for {qualifier}"));
        assert!(sink.contains(&triple.inversion()), "{triple}");
    }
}

#[test]
fn test_runs_are_deterministic() {
    for strategy in [Strategy::Dependency, Strategy::Constituency] {
        let first: Vec<String> = run(strategy, 4).into_sorted().iter().map(|t| t.to_string()).collect();
        let second: Vec<String> = run(strategy, 4).into_sorted().iter().map(|t| t.to_string()).collect();
        assert_eq!(first, second);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn prop_pool_size_does_not_change_result(workers in 1usize..=8, constituency in any::<bool>()) {
        let strategy = if constituency { Strategy::Constituency } else { Strategy::Dependency };
        let sequential = run(strategy, 1).into_sorted();
        let parallel = run(strategy, workers).into_sorted();
        prop_assert_eq!(sequential, parallel);
    }
}
