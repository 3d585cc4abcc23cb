//! Prompt construction for generation and refinement.
//!
//! Pure construction: every builder returns exactly two messages, a fixed
//! system instruction and a templated user message. Input validation is the
//! caller's responsibility; these functions never fail.

use minijinja::render;
use roteiro_core::content::{ContextSample, RefinementRequest};
use roteiro_interaction::ChatMessage;

/// Fixed system instruction for first-time generation.
///
/// Mandates the output language, the section order and the three marker
/// blocks the parser relies on.
const GENERATION_SYSTEM: &str = "\
You are an expert short-form content scriptwriter for social platforms.

Rules:
- Write all generated content in Brazilian Portuguese, regardless of the request language.
- The script must contain these sections, in exactly this order: Hook, Introduction, Main Content, Engagement Prompt, Final Takeaway, Call to Action.
- Wrap the full script between these markers, exactly as written:
## SCRIPT RESULTS START ##
(script)
## SCRIPT RESULTS ENDS ##
- After the script, analyse the content dimension by dimension between these markers, one line per dimension:
## CONTENT ANALYSES START ##
- <dimension> (Pontuação: X/10): <short assessment>
## CONTENT ANALYSES ENDS ##
- Finally, give a single overall virality estimate between these markers:
## VIRAL SCORE START ##
Pontuação Viral: <0-100>
## VIRAL SCORE ENDS ##";

const GENERATION_USER_TEMPLATE: &str = "\
Topic: {{ topic }}
Platform: {{ platform }}
{% if format_hint %}
Platform format guidelines:
{{ format_hint }}
{% endif %}
Reference sample from earlier output (use it to steer tone and structure):
{% if context %}Title: {{ context.title }}
Viral score achieved: {{ context.aggregate_score }}
{{ context.body }}{% else %}None{% endif %}

Write the complete script for the topic above.";

/// Stricter system instruction for refinement: surgical edits only.
const REFINEMENT_SYSTEM: &str = "\
You are editing an existing script that is already section-delimited (Hook, Introduction, Main Content, Engagement Prompt, Final Takeaway, Call to Action).

Rules:
- Apply only the requested change, to the single section it names; every other section must be returned byte-identical to the input.
- Return the script IN FULL between these markers:
## SCRIPT RESULTS START ##
(full script)
## SCRIPT RESULTS ENDS ##
- Re-evaluate the modified script dimension by dimension between these markers, one line per dimension:
## CONTENT ANALYSES START ##
- <dimension> (Pontuação: X/10): <short assessment>
## CONTENT ANALYSES ENDS ##
- Re-estimate the overall virality between these markers:
## VIRAL SCORE START ##
Pontuação Viral: <0-100>
## VIRAL SCORE ENDS ##
- Keep writing in Brazilian Portuguese.";

const REFINEMENT_USER_TEMPLATE: &str = "\
Topic: {{ topic }}
Platform: {{ platform }}
{% if format_hint %}
Platform format guidelines:
{{ format_hint }}
{% endif %}
Current script:
## SCRIPT RESULTS START ##
{{ current_script }}
## SCRIPT RESULTS ENDS ##

Requested change: {{ instruction }}

Apply the change and return the full marked output.";

/// Builds the two-message payload for one platform's generation.
pub fn build_generation_messages(
    topic: &str,
    platform: &str,
    platform_format: &str,
    context: Option<&ContextSample>,
) -> Vec<ChatMessage> {
    let user = render!(
        GENERATION_USER_TEMPLATE,
        topic => topic,
        platform => platform,
        format_hint => platform_format,
        context => context
    );

    vec![ChatMessage::system(GENERATION_SYSTEM), ChatMessage::user(user)]
}

/// Builds the two-message payload for a refinement round-trip.
pub fn build_refinement_messages(
    request: &RefinementRequest,
    platform_format: &str,
) -> Vec<ChatMessage> {
    let user = render!(
        REFINEMENT_USER_TEMPLATE,
        topic => request.original_topic,
        platform => request.platform,
        format_hint => platform_format,
        current_script => request.current_script_body,
        instruction => request.instruction
    );

    vec![ChatMessage::system(REFINEMENT_SYSTEM), ChatMessage::user(user)]
}
