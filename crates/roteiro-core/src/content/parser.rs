//! Section extraction from raw provider completions.
//!
//! The provider is instructed to delimit each section with `#`-bracketed
//! markers, but frequently drops optional ones, so every rule here is
//! permissive: a failed extraction degrades to an empty/zero sentinel and
//! never raises. Callers decide whether a sentinel is acceptable.
//!
//! The three rules are independent; each can be tested on its own.

use super::model::AnalysisItem;
use once_cell::sync::Lazy;
use regex::Regex;

static SCRIPT_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)#+\s*script\s+results\s+start\s*#+").unwrap());
static SCRIPT_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)#+\s*script\s+results\s+ends\s*#+").unwrap());

static ANALYSES_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)#+\s*content\s+analyses\s+start\s*#+").unwrap());
static ANALYSES_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)#+\s*content\s+analyses\s+ends\s*#+").unwrap());

static SCORE_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)#+\s*viral\s+score\s+start\s*#+").unwrap());
static SCORE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)#+\s*viral\s+score\s+ends\s*#+").unwrap());

// One analysis line: dash, title (letters incl. accented, spaces, slashes,
// hyphens), parenthesized score out of 10, colon, description to end of line.
// The score word may come back in the prompt's working language ("Score") or
// in the content language ("Pontuação").
static ANALYSIS_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?im)^\s*-\s*([\p{L}][\p{L} /\-]*?)\s*\(\s*(?:pontua[çc][ãa]o|score)\s*:?\s*(\d{1,2})\s*/\s*10\s*\)\s*:\s*(.+?)\s*$",
    )
    .unwrap()
});

static SCORE_VALUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{1,3})").unwrap());

/// Returns the text between the first `start` match and the next `end` match
/// after it, or `None` when either marker is missing.
fn block_between<'a>(raw: &'a str, start: &Regex, end: &Regex) -> Option<&'a str> {
    let start_match = start.find(raw)?;
    let rest = &raw[start_match.end()..];
    let end_match = end.find(rest)?;
    Some(&rest[..end_match.start()])
}

/// Extracts the script body.
///
/// The start marker is optional: when absent, extraction treats the beginning
/// of the text as the implicit start. The end marker is mandatory; without
/// it the whole extraction fails and the empty string is returned.
///
/// Post-processing trims surrounding whitespace and strips every literal `*`
/// (provider emphasis, meaningless in the stored plain text).
pub fn extract_script(raw: &str) -> String {
    let Some(end_match) = SCRIPT_END.find(raw) else {
        return String::new();
    };

    let before_end = &raw[..end_match.start()];
    let body = match SCRIPT_START.find(before_end) {
        Some(start_match) => &before_end[start_match.end()..],
        None => before_end,
    };

    body.trim().replace('*', "")
}

/// Extracts the scored analysis dimensions, in source order.
///
/// An absent block yields an empty list, not an error at this stage; the
/// refinement gate is where emptiness becomes fatal. Lines inside the block
/// that do not match the expected shape are skipped rather than failing the
/// whole block.
pub fn extract_analysis_items(raw: &str) -> Vec<AnalysisItem> {
    let Some(block) = block_between(raw, &ANALYSES_START, &ANALYSES_END) else {
        return Vec::new();
    };

    ANALYSIS_LINE
        .captures_iter(block)
        .map(|captures| AnalysisItem {
            title: captures[1].trim().to_string(),
            score: captures[2].parse().unwrap_or(0),
            description: captures[3].trim().to_string(),
        })
        .collect()
}

/// Extracts the aggregate viral score (0-100).
///
/// Returns 0 when the block is absent or carries no integer. That 0 is the
/// documented "unparseable" sentinel; callers must not conflate it with a
/// legitimately scored zero.
pub fn extract_aggregate_score(raw: &str) -> u32 {
    let Some(block) = block_between(raw, &SCORE_START, &SCORE_END) else {
        return 0;
    };

    SCORE_VALUE
        .captures(block)
        .and_then(|captures| captures[1].parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::model::ParsedContent;

    const FULL_SAMPLE: &str = "## script results start ##\nHello *world*\n## script results ends ##\n## content analyses start ##\n- Gancho (Pontuação: 8/10): bom\n## content analyses ends ##\n## viral score start ##\nPontuação Viral: 77\n## viral score ends ##";

    #[test]
    fn test_extract_script_between_markers() {
        let script = extract_script(FULL_SAMPLE);
        assert_eq!(script, "Hello world");
    }

    #[test]
    fn test_extract_script_without_start_marker() {
        let raw = "Primeira linha\nSegunda linha\n## SCRIPT RESULTS ENDS ##\ntrailing";
        assert_eq!(extract_script(raw), "Primeira linha\nSegunda linha");
    }

    #[test]
    fn test_extract_script_missing_end_marker_fails() {
        let raw = "## script results start ##\nconteúdo sem fim";
        assert_eq!(extract_script(raw), "");

        // Still empty when not even a start marker is present
        assert_eq!(extract_script("texto livre qualquer"), "");
    }

    #[test]
    fn test_extract_script_strips_all_asterisks() {
        let raw = "**Muito** *importante*\n## script results ends ##";
        assert_eq!(extract_script(raw), "Muito importante");
    }

    #[test]
    fn test_extract_script_markers_are_case_insensitive() {
        let raw = "### Script Results Start ###\nOi\n### Script Results Ends ###";
        assert_eq!(extract_script(raw), "Oi");
    }

    #[test]
    fn test_extract_analysis_items_full_block() {
        let items = extract_analysis_items(FULL_SAMPLE);
        assert_eq!(
            items,
            vec![AnalysisItem {
                title: "Gancho".to_string(),
                score: 8,
                description: "bom".to_string(),
            }]
        );
    }

    #[test]
    fn test_extract_analysis_items_skips_malformed_lines() {
        let raw = "## content analyses start ##\n\
                   - Gancho (Pontuação: 8/10): prende nos primeiros segundos\n\
                   esta linha não tem o formato esperado\n\
                   - Retenção/Ritmo (Score: 7/10): mantém o espectador\n\
                   - sem pontuação nenhuma: quebrado\n\
                   - Call to Action (Pontuação 9/10): direto e claro\n\
                   ## content analyses ends ##";

        let items = extract_analysis_items(raw);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "Gancho");
        assert_eq!(items[0].score, 8);
        assert_eq!(items[1].title, "Retenção/Ritmo");
        assert_eq!(items[1].score, 7);
        assert_eq!(items[2].title, "Call to Action");
        assert_eq!(items[2].score, 9);
        assert_eq!(items[2].description, "direto e claro");
    }

    #[test]
    fn test_extract_analysis_items_absent_block_is_empty() {
        assert!(extract_analysis_items("nenhum marcador aqui").is_empty());

        // Start marker alone is not a block
        let raw = "## content analyses start ##\n- Gancho (Pontuação: 8/10): bom";
        assert!(extract_analysis_items(raw).is_empty());
    }

    #[test]
    fn test_extract_analysis_items_preserves_source_order() {
        let raw = "## content analyses start ##\n\
                   - Clareza (Pontuação: 5/10): mediana\n\
                   - Gancho (Pontuação: 9/10): forte\n\
                   - Emoção (Pontuação: 6/10): presente\n\
                   ## content analyses ends ##";

        let titles: Vec<_> = extract_analysis_items(raw)
            .into_iter()
            .map(|item| item.title)
            .collect();
        assert_eq!(titles, vec!["Clareza", "Gancho", "Emoção"]);
    }

    #[test]
    fn test_extract_aggregate_score_labeled_value() {
        assert_eq!(extract_aggregate_score(FULL_SAMPLE), 77);
    }

    #[test]
    fn test_extract_aggregate_score_bounds() {
        let zero = "## viral score start ##\nPontuação Viral: 0\n## viral score ends ##";
        assert_eq!(extract_aggregate_score(zero), 0);

        let hundred = "## viral score start ##\nScore: 100\n## viral score ends ##";
        assert_eq!(extract_aggregate_score(hundred), 100);
    }

    #[test]
    fn test_extract_aggregate_score_absent_block_is_zero() {
        assert_eq!(extract_aggregate_score("sem bloco de score"), 0);

        let empty_block = "## viral score start ##\nnada numérico\n## viral score ends ##";
        assert_eq!(extract_aggregate_score(empty_block), 0);
    }

    #[test]
    fn test_end_to_end_scenario_full_sample() {
        let parsed = ParsedContent::from_raw(FULL_SAMPLE);

        assert_eq!(parsed.script_body, "Hello world");
        assert_eq!(
            parsed.analysis_items,
            vec![AnalysisItem {
                title: "Gancho".to_string(),
                score: 8,
                description: "bom".to_string(),
            }]
        );
        assert_eq!(parsed.aggregate_score, 77);
        assert!(!parsed.is_parse_failure());
    }

    #[test]
    fn test_end_to_end_scenario_no_markers() {
        let parsed = ParsedContent::from_raw("resposta completamente livre, sem marcadores");

        assert_eq!(parsed.script_body, "");
        assert!(parsed.analysis_items.is_empty());
        assert_eq!(parsed.aggregate_score, 0);
        assert!(parsed.is_parse_failure());
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let first = ParsedContent::from_raw(FULL_SAMPLE);
        let second = ParsedContent::from_raw(FULL_SAMPLE);
        assert_eq!(first, second);
    }
}
