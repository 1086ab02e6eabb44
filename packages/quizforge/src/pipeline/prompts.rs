//! Generation instructions for the text-generation service.

use crate::types::page::PageText;
use crate::types::request::GenerationRequest;

/// Max whitespace tokens of page text inlined per page.
const CONTEXT_TOKENS_PER_PAGE: usize = 120;

/// Hard char cap per compacted page, applied after the token cut.
const CONTEXT_CHARS_PER_PAGE: usize = 400;

/// Prompt for grounded question generation.
pub const GENERATE_PROMPT: &str = r#"You create exam questions STRICTLY from the provided page text. Do not invent facts.
Return ONLY a JSON array of questions matching this shape:
[{"id":"string","kind":"single_select|multi_select|free_text","difficulty":"easy|medium|hard","prompt":"string","choices":[{"id":"string","text":"string","isCorrect":boolean}],"acceptedAnswers":["string"],"explanation":"string","evidence":{"pageNumbers":[number],"snippets":["string"]},"topicTags":["string"]}]
Rules: every question must cite pageNumbers from the given context and provide 1-3 short verbatim quotes as snippets from those same pages. Prefer single-page citations for at least 80% of questions. Kinds allowed: {kinds}. Desired count: {count}. Aim for a difficulty split of roughly {mix} (advisory). Each question must be unique.{exclusion_note}
Context:
{context}"#;

/// Compact the page text into a bounded prompt context.
///
/// Each page contributes at most 120 whitespace tokens, further capped
/// at 400 chars. When no page text is available the context is a note
/// that the raw document itself is attached.
pub fn compact_context(pages: &[PageText]) -> String {
    if pages.is_empty() {
        return "The document is attached. Extract text from it only.".to_string();
    }
    pages
        .iter()
        .map(|page| {
            let summary: String = page
                .text
                .split_whitespace()
                .take(CONTEXT_TOKENS_PER_PAGE)
                .collect::<Vec<_>>()
                .join(" ")
                .chars()
                .take(CONTEXT_CHARS_PER_PAGE)
                .collect();
            format!("[page {}] {}", page.page_number, summary)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Format the generation prompt for one round.
///
/// `count` is the remaining shortfall, not the original request size.
/// `exclusions` are previously produced prompt keys the service must
/// not repeat (already truncated by the caller).
pub fn format_generate_prompt(
    request: &GenerationRequest,
    count: usize,
    context: &str,
    exclusions: &[&str],
) -> String {
    let kinds = request
        .allowed_kinds
        .iter()
        .map(|k| k.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let exclusion_note = if exclusions.is_empty() {
        String::new()
    } else {
        format!(
            "\nImportant: Do NOT repeat any previously generated questions whose prompts match any of these (case-insensitive): {}",
            serde_json::to_string(exclusions).unwrap_or_default()
        )
    };

    let mix = request.difficulty_mix;
    GENERATE_PROMPT
        .replace("{kinds}", &kinds)
        .replace("{count}", &count.to_string())
        .replace(
            "{mix}",
            &format!(
                "{}% easy, {}% medium, {}% hard",
                mix.easy, mix.medium, mix.hard
            ),
        )
        .replace("{exclusion_note}", &exclusion_note)
        .replace("{context}", context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::question::QuestionKind;

    #[test]
    fn test_compact_context_caps_tokens_and_chars() {
        let long_text = "word ".repeat(500);
        let pages = vec![PageText::new(1, long_text)];
        let context = compact_context(&pages);
        assert!(context.starts_with("[page 1]"));
        assert!(context.len() <= CONTEXT_CHARS_PER_PAGE + "[page 1] ".len());
    }

    #[test]
    fn test_compact_context_without_pages_mentions_attachment() {
        let context = compact_context(&[]);
        assert!(context.contains("attached"));
    }

    #[test]
    fn test_format_prompt_includes_kinds_and_count() {
        let request = GenerationRequest::new("deck.pdf", 5)
            .with_kinds([QuestionKind::SingleSelect, QuestionKind::FreeText]);
        let prompt = format_generate_prompt(&request, 3, "[page 1] alpha", &[]);
        assert!(prompt.contains("single_select, free_text"));
        assert!(prompt.contains("Desired count: 3"));
        assert!(prompt.contains("40% easy, 40% medium, 20% hard"));
        assert!(prompt.contains("[page 1] alpha"));
        assert!(!prompt.contains("Do NOT repeat"));
    }

    #[test]
    fn test_format_prompt_lists_exclusions() {
        let request = GenerationRequest::new("deck.pdf", 5);
        let prompt =
            format_generate_prompt(&request, 5, "ctx", &["what is alpha?", "define beta"]);
        assert!(prompt.contains("Do NOT repeat"));
        assert!(prompt.contains("what is alpha?"));
        assert!(prompt.contains("define beta"));
    }
}
