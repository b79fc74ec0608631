//! Prompt composer: deterministic rendering of generation and refinement
//! requests into a single instruction string for the provider.
//!
//! This is the designed behavior of the whole system, so the contract is
//! strict: optional constraint fields that are blank after trimming emit no
//! clause at all, non-blank fields emit exactly one clause with the value
//! interpolated verbatim, and the user's email text is appended last,
//! verbatim and un-escaped.

use std::str::FromStr;

use strum::{Display, EnumString};

use crate::error::PromptError;

/// System instruction sent with every provider call.
pub const SYSTEM_PROMPT: &str = "You are a professional email assistant. Your task is to \
     generate a response email based on provided email content and specified customization \
     options. Ensure your response is formatted as a proper email.";

const ROLE_GENERATE: &str =
    "You are a professional email assistant tasked with writing a response to an email.";

const ROLE_REFINE: &str = "You are a professional email assistant tasked with refining a \
     previously generated email response.";

/// The fixed output-shape block: salutation, blank line, body, blank line,
/// closing + signature, no commentary, no emphasis markup.
const FORMAT_BLOCK: &str = "Your response must strictly conform to a standard email format.\n\
     - Start with a salutation,\n\
     - Follow with a blank line,\n\
     - Provide the email content,\n\
     - Insert another blank line,\n\
     - End with a closing statement and signature.\n\
     Do not add any extra commentary. Do not use any bold, italic, or underlined text.";

const SHORTER_DIRECTIVE: &str =
    "The user has requested a slightly shorter and more concise version of the response.";

const LONGER_DIRECTIVE: &str =
    "The user has requested a slightly longer and more detailed version of the response.";

/// Requested tone of the generated reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Tone {
    Casual,
    Formal,
    Friendly,
    Professional,
}

/// Length directive for a refinement call.
///
/// Anything the wire carries that is not `shorter` or `longer` behaves like a
/// pure creativity re-roll: no length directive is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegenerateOption {
    Shorter,
    Longer,
    #[default]
    Temperature,
}

impl RegenerateOption {
    /// Map the raw wire value onto an option. Unknown and absent values both
    /// fall through to [`RegenerateOption::Temperature`].
    pub fn from_wire(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("shorter") => Self::Shorter,
            Some("longer") => Self::Longer,
            _ => Self::Temperature,
        }
    }
}

/// User-supplied customization, normalized: blank fields are absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplyConstraints {
    pub tone: Option<Tone>,
    pub essence: Option<String>,
    pub points_to_include: Option<String>,
}

impl ReplyConstraints {
    /// Build constraints from raw wire fields. Whitespace-only values are
    /// treated as absent; a non-blank tone that is not one of the four known
    /// tones is a validation error.
    pub fn from_parts(
        tone: Option<&str>,
        essence: Option<&str>,
        points_to_include: Option<&str>,
    ) -> Result<Self, PromptError> {
        let tone = match non_blank(tone) {
            Some(raw) => {
                Some(Tone::from_str(raw).map_err(|_| PromptError::UnknownTone(raw.to_string()))?)
            }
            None => None,
        };

        Ok(Self {
            tone,
            essence: non_blank(essence).map(str::to_string),
            points_to_include: non_blank(points_to_include).map(str::to_string),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn push_constraint_clauses(prompt: &mut String, constraints: &ReplyConstraints) {
    if let Some(tone) = constraints.tone {
        prompt.push_str(&format!("Write the response email in a {tone} tone.\n"));
    }
    if let Some(ref essence) = constraints.essence {
        prompt.push_str(&format!(
            "Make sure the essence of the response reflects this idea: {essence}.\n"
        ));
    }
    if let Some(ref points) = constraints.points_to_include {
        prompt.push_str(&format!(
            "Make sure to cover each of these points in your response: {points}.\n"
        ));
    }
}

/// Render the instruction string for an initial generation.
pub fn compose_reply_prompt(
    email: &str,
    constraints: &ReplyConstraints,
) -> Result<String, PromptError> {
    if email.trim().is_empty() {
        return Err(PromptError::EmptyEmail);
    }

    let mut prompt = String::from(ROLE_GENERATE);
    prompt.push('\n');
    push_constraint_clauses(&mut prompt, constraints);
    prompt.push_str(FORMAT_BLOCK);
    prompt.push_str("\n\nHere is the email you are tasked with generating a response for:\n");
    prompt.push_str(email);
    Ok(prompt)
}

/// Render the instruction string for a refinement call. The prior response is
/// embedded verbatim and the same constraint clauses are reapplied so the
/// refinement stays consistent with the original request.
pub fn compose_refinement_prompt(
    current_response: &str,
    option: RegenerateOption,
    constraints: &ReplyConstraints,
) -> Result<String, PromptError> {
    if current_response.trim().is_empty() {
        return Err(PromptError::EmptyReply);
    }

    let mut prompt = String::from(ROLE_REFINE);
    prompt.push_str("\n\nHere is the previously generated response:\n");
    prompt.push_str(current_response);
    prompt.push_str("\n\n");
    match option {
        RegenerateOption::Shorter => {
            prompt.push_str(SHORTER_DIRECTIVE);
            prompt.push('\n');
        }
        RegenerateOption::Longer => {
            prompt.push_str(LONGER_DIRECTIVE);
            prompt.push('\n');
        }
        RegenerateOption::Temperature => {}
    }
    push_constraint_clauses(&mut prompt, constraints);
    prompt.push_str(FORMAT_BLOCK);
    Ok(prompt)
}

/// Render the narrowly-scoped instruction for rewriting a single sentence in
/// place. The provider is asked for the replacement sentence alone.
pub fn compose_sentence_prompt(email: &str, sentence: &str) -> Result<String, PromptError> {
    if email.trim().is_empty() {
        return Err(PromptError::EmptyEmail);
    }
    if sentence.trim().is_empty() {
        return Err(PromptError::EmptySentence);
    }

    let mut prompt = String::from(
        "You are a professional email assistant. Rewrite only the sentence designated below so \
         that it fits naturally within the surrounding email response. Reply with the \
         replacement sentence alone. Do not add any extra commentary. Do not use any bold, \
         italic, or underlined text.",
    );
    prompt.push_str("\n\nHere is the full email response for context:\n");
    prompt.push_str(email);
    prompt.push_str("\n\nHere is the sentence to rewrite:\n");
    prompt.push_str(sentence);
    Ok(prompt)
}
