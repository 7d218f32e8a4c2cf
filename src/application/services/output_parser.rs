use std::sync::LazyLock;

use regex::Regex;

static SCORE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<score>(.*?)</score>").expect("valid score pattern"));
static CAUSE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<cause>(.*?)</cause>").expect("valid cause pattern"));

/// Fields pulled out of the model's free-form reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAnalysis {
    pub score: Option<String>,
    pub root_causes: Vec<String>,
}

/// Extracts the first `<score>` and every `<cause>` from `output`, trimmed.
///
/// Anything outside the tags (reasoning traces, `<think>` blocks, prose) is ignored.
pub fn parse_analysis_output(output: &str) -> ParsedAnalysis {
    let score = SCORE_PATTERN
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string());

    let root_causes = CAUSE_PATTERN
        .captures_iter(output)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect();

    ParsedAnalysis { score, root_causes }
}
