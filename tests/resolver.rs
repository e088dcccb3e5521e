//! Resolver selection properties: determinism, weight ordering, tie-breaks.

use async_trait::async_trait;
use regex::RegexSet;
use std::sync::Arc;

use delinkify::context::DelinkifyContext;
use delinkify::handlers::{AcquisitionError, Handler, HandlerRegistry, RegistryError};

#[derive(Debug)]
struct StubHandler {
    name: &'static str,
    patterns: RegexSet,
    weight: i32,
}

impl StubHandler {
    fn new(name: &'static str, patterns: &[&str], weight: i32) -> Arc<dyn Handler> {
        Arc::new(Self {
            name,
            patterns: RegexSet::new(patterns).unwrap(),
            weight,
        })
    }
}

#[async_trait]
impl Handler for StubHandler {
    fn name(&self) -> &'static str {
        self.name
    }

    fn url_patterns(&self) -> &RegexSet {
        &self.patterns
    }

    fn weight(&self) -> i32 {
        self.weight
    }

    async fn handle(&self, _url: &str, _ctx: &DelinkifyContext) -> Result<(), AcquisitionError> {
        Ok(())
    }
}

const REEL: &str = r"^https://(www\.)?video\.example/reel/([\w-]+)";
const POST: &str = r"^https://(www\.)?video\.example/post/([\w-]+)";
const CATCH_ALL: &str = r"^https://(www\.)?video\.example/";

#[test]
fn sole_matching_handler_wins_regardless_of_weight() {
    let mut registry = HandlerRegistry::new();
    registry.register(StubHandler::new("reel", &[REEL], 1)).unwrap();
    registry
        .register(StubHandler::new("other", &["^https://other.example/"], 9000))
        .unwrap();

    let resolved = registry.resolve("https://video.example/reel/abc").unwrap();
    assert_eq!(resolved.name(), "reel");
}

#[test]
fn higher_weight_wins_among_overlapping_matches() {
    // A specific post-type handler and a catch-all both match; the weight
    // decides, not pattern specificity.
    let mut registry = HandlerRegistry::new();
    registry
        .register(StubHandler::new("catch_all", &[CATCH_ALL], 100))
        .unwrap();
    registry.register(StubHandler::new("reel", &[REEL], 500)).unwrap();

    let resolved = registry.resolve("https://video.example/reel/abc").unwrap();
    assert_eq!(resolved.name(), "reel");

    // The catch-all still claims everything else on the host.
    let resolved = registry.resolve("https://video.example/profile/xyz").unwrap();
    assert_eq!(resolved.name(), "catch_all");
}

#[test]
fn equal_weights_resolve_to_first_registered() {
    let mut forward = HandlerRegistry::new();
    forward.register(StubHandler::new("first", &[REEL], 500)).unwrap();
    forward.register(StubHandler::new("second", &[REEL], 500)).unwrap();

    let mut reversed = HandlerRegistry::new();
    reversed.register(StubHandler::new("second", &[REEL], 500)).unwrap();
    reversed.register(StubHandler::new("first", &[REEL], 500)).unwrap();

    // The tie-break is registration order, and it holds on every call.
    for _ in 0..10 {
        assert_eq!(
            forward.resolve("https://video.example/reel/abc").unwrap().name(),
            "first"
        );
        assert_eq!(
            reversed.resolve("https://video.example/reel/abc").unwrap().name(),
            "second"
        );
    }
}

#[test]
fn resolution_is_deterministic_across_repeated_calls() {
    let mut registry = HandlerRegistry::new();
    registry.register(StubHandler::new("reel", &[REEL], 500)).unwrap();
    registry.register(StubHandler::new("post", &[POST], 500)).unwrap();
    registry
        .register(StubHandler::new("catch_all", &[CATCH_ALL], 100))
        .unwrap();

    let urls = [
        "https://video.example/reel/abc",
        "https://video.example/post/def",
        "https://www.video.example/anything",
    ];

    let first_pass: Vec<_> = urls
        .iter()
        .map(|url| registry.resolve(url).unwrap().name())
        .collect();

    for _ in 0..5 {
        let pass: Vec<_> = urls
            .iter()
            .map(|url| registry.resolve(url).unwrap().name())
            .collect();
        assert_eq!(pass, first_pass);
    }
    assert_eq!(first_pass, vec!["reel", "post", "catch_all"]);
}

#[test]
fn unmatched_url_is_an_unsupported_link() {
    let mut registry = HandlerRegistry::new();
    registry.register(StubHandler::new("reel", &[REEL], 500)).unwrap();

    let err = registry.resolve("https://example.com/unrelated").unwrap_err();
    match err {
        RegistryError::NoHandler(url) => assert_eq!(url, "https://example.com/unrelated"),
        other => panic!("expected NoHandler, got {other:?}"),
    }
}

#[test]
fn any_pattern_in_the_set_is_sufficient() {
    let mut registry = HandlerRegistry::new();
    registry
        .register(StubHandler::new("multi", &[REEL, POST], 500))
        .unwrap();

    assert!(registry.resolve("https://video.example/reel/abc").is_ok());
    assert!(registry.resolve("https://video.example/post/def").is_ok());
    assert!(registry.resolve("https://video.example/story/ghi").is_err());
}
