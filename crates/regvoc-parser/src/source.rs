//! Parse sources
//!
//! `ParseSource` is what the extraction coordinator calls from its worker
//! threads. Parsers that keep mutable model state implement `Parser` instead
//! and are shared through `SerializedParser`, which serializes every call.
//! `PreparsedSource` serves parses recorded ahead of time in a JSON corpus.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constituency::ConstituencyTree;
use crate::dependency::DependencyGraph;
use crate::{ParseForm, ParserError, Result, Sentence, SentenceParse};

// ============================================================================
// Collaborator Traits
// ============================================================================

/// Sentence segmentation and syntactic parsing, callable from many threads
pub trait ParseSource: Send + Sync {
    /// Split a text block into sentences
    fn segment(&self, block: &str) -> Result<Vec<Sentence>>;

    /// Parse one sentence into the requested form
    fn parse(&self, sentence: &Sentence, form: ParseForm) -> Result<SentenceParse>;
}

/// A non-reentrant parser holding mutable state between calls
pub trait Parser: Send {
    fn segment(&mut self, block: &str) -> Result<Vec<Sentence>>;

    fn parse(&mut self, sentence: &Sentence, form: ParseForm) -> Result<SentenceParse>;
}

/// Shares a `Parser` across threads; at most one call runs at a time
pub struct SerializedParser<P> {
    inner: Mutex<P>,
}

impl<P: Parser> SerializedParser<P> {
    pub fn new(parser: P) -> Self {
        Self {
            inner: Mutex::new(parser),
        }
    }

    pub fn into_inner(self) -> Result<P> {
        self.inner.into_inner().map_err(|_| ParserError::Unavailable)
    }

    fn with_parser<T>(&self, call: impl FnOnce(&mut P) -> Result<T>) -> Result<T> {
        let mut parser = self.inner.lock().map_err(|_| ParserError::Unavailable)?;
        call(&mut parser)
    }
}

impl<P: Parser> ParseSource for SerializedParser<P> {
    fn segment(&self, block: &str) -> Result<Vec<Sentence>> {
        self.with_parser(|p| p.segment(block))
    }

    fn parse(&self, sentence: &Sentence, form: ParseForm) -> Result<SentenceParse> {
        self.with_parser(|p| p.parse(sentence, form))
    }
}

// ============================================================================
// Pre-parsed Corpus
// ============================================================================

/// A corpus of text blocks with recorded parses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    #[serde(default)]
    pub id: String,
    pub blocks: Vec<CorpusBlock>,
}

/// One text block and its sentences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusBlock {
    pub text: String,
    pub sentences: Vec<CorpusSentence>,
}

/// One sentence with either or both parse notations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusSentence {
    pub text: String,
    /// `word/TAG` tokens separated by spaces
    #[serde(default)]
    pub tagged: Option<String>,
    /// Stanford typed dependencies, one per entry
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Penn-Treebank bracketed tree
    #[serde(default)]
    pub tree: Option<String>,
}

/// Serves segmentations and parses from a `Corpus`
#[derive(Debug, Clone)]
pub struct PreparsedSource {
    corpus: Corpus,
    blocks: HashMap<String, usize>,
    sentences: HashMap<String, (usize, usize)>,
}

impl PreparsedSource {
    pub fn new(corpus: Corpus) -> Self {
        let mut blocks = HashMap::new();
        let mut sentences = HashMap::new();
        for (b, block) in corpus.blocks.iter().enumerate() {
            blocks.entry(key(&block.text)).or_insert(b);
            for (s, sentence) in block.sentences.iter().enumerate() {
                sentences.entry(key(&sentence.text)).or_insert((b, s));
            }
        }
        Self {
            corpus,
            blocks,
            sentences,
        }
    }

    /// Load a JSON corpus file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ParserError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let corpus: Corpus = serde_json::from_str(json)?;
        debug!(id = %corpus.id, blocks = corpus.blocks.len(), "Loaded pre-parsed corpus");
        Ok(Self::new(corpus))
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Block texts in corpus order
    pub fn block_texts(&self) -> Vec<&str> {
        self.corpus.blocks.iter().map(|b| b.text.as_str()).collect()
    }

    fn lookup(&self, sentence: &Sentence) -> Option<&CorpusSentence> {
        self.sentences
            .get(&key(&sentence.text))
            .map(|&(b, s)| &self.corpus.blocks[b].sentences[s])
    }
}

impl ParseSource for PreparsedSource {
    fn segment(&self, block: &str) -> Result<Vec<Sentence>> {
        let index = self
            .blocks
            .get(&key(block))
            .ok_or_else(|| ParserError::UnknownBlock(block.chars().take(60).collect()))?;

        Ok(self.corpus.blocks[*index]
            .sentences
            .iter()
            .map(|s| Sentence::from_whitespace(s.text.clone()))
            .collect())
    }

    fn parse(&self, sentence: &Sentence, form: ParseForm) -> Result<SentenceParse> {
        let missing = || ParserError::MissingParse {
            form,
            sentence: sentence.text.clone(),
        };
        let recorded = self.lookup(sentence).ok_or_else(missing)?;

        match form {
            ParseForm::Dependency => {
                let tagged = recorded.tagged.as_deref().ok_or_else(missing)?;
                let graph =
                    DependencyGraph::from_stanford(tagged, &recorded.dependencies.join("\n"))?;
                Ok(SentenceParse::Dependencies(graph))
            }
            ParseForm::Constituency => {
                let tree = recorded.tree.as_deref().ok_or_else(missing)?;
                Ok(SentenceParse::Constituents(ConstituencyTree::from_bracketed(
                    tree,
                )?))
            }
        }
    }
}

/// Whitespace-insensitive lookup key
fn key(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    const CORPUS: &str = r#"{
        "id": "part-1",
        "blocks": [{
            "text": "Records exist.  Agencies keep records.",
            "sentences": [
                {
                    "text": "Records exist.",
                    "tagged": "Records/NNS exist/VBP ./.",
                    "dependencies": ["nsubj(exist-2, Records-1)", "root(ROOT-0, exist-2)"],
                    "tree": "(ROOT (S (NP (NNS Records)) (VP (VBP exist)) (. .)))"
                },
                {
                    "text": "Agencies keep records.",
                    "tree": "(ROOT (S (NP (NNS Agencies)) (VP (VBP keep) (NP (NNS records))) (. .)))"
                }
            ]
        }]
    }"#;

    #[test]
    fn test_preparsed_segment_and_parse() {
        let source = PreparsedSource::from_json(CORPUS).unwrap();
        assert_eq!(source.corpus().id, "part-1");

        let sentences = source
            .segment("Records exist. Agencies keep records.")
            .unwrap();
        assert_eq!(sentences.len(), 2);

        let parse = source.parse(&sentences[0], ParseForm::Dependency).unwrap();
        match parse {
            SentenceParse::Dependencies(graph) => assert_eq!(graph.edges().len(), 1),
            other => panic!("unexpected parse form {:?}", other.form()),
        }

        let parse = source.parse(&sentences[1], ParseForm::Constituency).unwrap();
        assert_eq!(parse.form(), ParseForm::Constituency);
    }

    #[test]
    fn test_preparsed_missing_parse() {
        let source = PreparsedSource::from_json(CORPUS).unwrap();
        let sentence = Sentence::from_whitespace("Agencies keep records.");
        assert!(matches!(
            source.parse(&sentence, ParseForm::Dependency),
            Err(ParserError::MissingParse { .. })
        ));
        assert!(matches!(
            source.segment("Unrelated text."),
            Err(ParserError::UnknownBlock(_))
        ));
    }

    #[test]
    fn test_preparsed_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CORPUS.as_bytes()).unwrap();
        let source = PreparsedSource::from_path(file.path()).unwrap();
        assert_eq!(source.block_texts(), vec!["Records exist.  Agencies keep records."]);

        assert!(matches!(
            PreparsedSource::from_path("/nonexistent/corpus.json"),
            Err(ParserError::Io { .. })
        ));
    }

    /// Panics if two calls ever overlap
    struct ExclusiveParser {
        busy: Arc<AtomicBool>,
        calls: Arc<AtomicUsize>,
    }

    impl Parser for ExclusiveParser {
        fn segment(&mut self, block: &str) -> Result<Vec<Sentence>> {
            assert!(!self.busy.swap(true, Ordering::SeqCst), "re-entered parser");
            std::thread::yield_now();
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.busy.store(false, Ordering::SeqCst);
            Ok(vec![Sentence::from_whitespace(block)])
        }

        fn parse(&mut self, _sentence: &Sentence, _form: ParseForm) -> Result<SentenceParse> {
            Err(ParserError::Unavailable)
        }
    }

    #[test]
    fn test_serialized_parser_never_reenters() {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = Arc::new(SerializedParser::new(ExclusiveParser {
            busy: Arc::new(AtomicBool::new(false)),
            calls: calls.clone(),
        }));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let source = source.clone();
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        source.segment("Records exist.").unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 400);
    }
}
