use indoc::formatdoc;

use crate::services::Match;

pub const SYSTEM_PROMPT: &str = "You are an expert in the mining and blasting industry.";
const MISSING_CONTENT: &str = "No content available";

/// Joins the stored text of each match into a single context block.
#[must_use]
pub fn build_context(matches: &[Match]) -> String {
    matches
        .iter()
        .map(|m| m.content().unwrap_or(MISSING_CONTENT))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[must_use]
pub fn build_prompt(query: &str, context: &str) -> String {
    formatdoc!(
        "You are a business strategist AI specialized in the mining and blasting industry.
        Based on the following knowledge base, provide a strategic answer to the question:

        Context:
        {context}

        Question: {query}",
        context = context,
        query = query
    )
}
