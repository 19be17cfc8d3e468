// file: src/pipeline/prompts.rs
// description: prompt templates for query writing, note taking and the research brief

use crate::models::{ExtractionSchema, QueryList};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{(\w+)\}").unwrap();
}

pub const QUERY_REQUEST_MESSAGE: &str =
    "Please generate a list of search queries, one for each company.";

const QUERY_WRITER_TEMPLATE: &str = r#"You are a search query generator tasked with creating targeted search queries to gather specific company information.

This list of companies: {company_list}

Generate a search query that will help gather the following information:
<schema>
{info}
</schema>

Your query should:
1. Focus on finding factual, up-to-date company information
2. Target official sources, news, and reliable business databases
3. Prioritize finding information that matches the schema requirements
4. Include the company name and relevant business terms
5. Be specific enough to avoid irrelevant results

Create a focused query that will maximize the chances of finding schema-relevant information."#;

const NOTES_TEMPLATE: &str = r#"You are doing web research on behalf of a user. You need to extract specific information based on this schema:

<schema>
{info}
</schema>

You have just scraped website content. Review the content below and take detailed notes that align with the extraction schema above. 

Focus only on information that matches the schema requirements.

<Website contents>
{content}
</Website contents>

Please provide well structured notes that:
1. Map directly to the schema fields
2. Include only relevant information from the content
3. Maintain the original facts and data points
4. Note any missing schema fields that weren't found in the content"#;

const RESEARCH_BRIEF_TEMPLATE: &str = r#"You are doing web research on behalf of a user. You are researching multiple companies to gather specific information:

<info>
{info}
</info>

You have access to the following tool:

- `perform_web_research`: write one search query per company, search the web and return notes aligned with the schema above

Here is the list of companies you are researching:

Companies: {companies}

Please research each company systematically to gather the requested information."#;

/// System prompt for step 1. The shape instructions are appended so the
/// reply can be parsed without provider-specific schema support.
pub fn query_writer_prompt(company_list: &str, schema: &ExtractionSchema) -> String {
    let prompt = fill(
        QUERY_WRITER_TEMPLATE,
        &[("company_list", company_list), ("info", &schema.to_prompt_json())],
    );

    format!("{}\n\n{}", prompt, QueryList::FORMAT_INSTRUCTIONS)
}

pub fn notes_prompt(schema: &ExtractionSchema, digest: &str) -> String {
    fill(
        NOTES_TEMPLATE,
        &[("info", &schema.to_prompt_json()), ("content", digest)],
    )
}

pub fn research_brief(schema: &ExtractionSchema, companies: &str) -> String {
    fill(
        RESEARCH_BRIEF_TEMPLATE,
        &[("info", &schema.to_prompt_json()), ("companies", companies)],
    )
}

/// Substitutes every `{name}` in one pass over the template. Inserted values
/// are never rescanned; unknown names are left as they are.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            values
                .iter()
                .find(|(name, _)| *name == &caps[1])
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> ExtractionSchema {
        ExtractionSchema::try_from(json!({
            "founded_year": "Year founded",
            "headquarters": "Head office location"
        }))
        .unwrap()
    }

    #[test]
    fn test_query_writer_prompt_embeds_inputs() {
        let prompt = query_writer_prompt("Acme Corp, Globex Inc", &schema());

        assert!(prompt.contains("This list of companies: Acme Corp, Globex Inc"));
        assert!(prompt.contains("<schema>\n{\n  \"founded_year\": \"Year founded\""));
        assert!(prompt.ends_with(QueryList::FORMAT_INSTRUCTIONS));
        assert!(!prompt.contains("{company_list}"));
    }

    #[test]
    fn test_notes_prompt_keeps_braces_in_content() {
        let digest = "Sources:\n\nSource Acme:\n===\nURL: https://acme.example\n===\nMost relevant content from source: {info} is literal here";
        let prompt = notes_prompt(&schema(), digest);

        assert!(prompt.contains("<Website contents>\nSources:"));
        assert!(prompt.contains("{info} is literal here"));
        assert!(prompt.contains("\"headquarters\": \"Head office location\""));
    }

    #[test]
    fn test_braces_in_targets_are_kept_literally() {
        let prompt = query_writer_prompt("Acme {info} Corp, {company_list} Ltd", &schema());

        assert!(prompt.contains("This list of companies: Acme {info} Corp, {company_list} Ltd\n"));
        assert_eq!(prompt.matches("\"founded_year\": \"Year founded\"").count(), 1);
    }

    #[test]
    fn test_braces_in_schema_values_are_kept_literally() {
        let schema = ExtractionSchema::try_from(json!({
            "summary": "Write {content} as a short paragraph",
            "ceo": "Name of the {companies}"
        }))
        .unwrap();

        let notes = notes_prompt(&schema, "Sources:\n\nSECRET DIGEST");
        assert_eq!(notes.matches("SECRET DIGEST").count(), 1);
        assert!(notes.contains("\"summary\": \"Write {content} as a short paragraph\""));

        let brief = research_brief(&schema, "Initech");
        assert!(brief.contains("\"ceo\": \"Name of the {companies}\""));
        assert_eq!(brief.matches("Initech").count(), 1);
    }

    #[test]
    fn test_unknown_placeholders_are_left_alone() {
        assert_eq!(
            fill("{a} and {b}", &[("a", "{b}")]),
            "{b} and {b}".to_string()
        );
    }

    #[test]
    fn test_research_brief_names_companies() {
        let brief = research_brief(&schema(), "Initech");
        assert!(brief.contains("Companies: Initech"));
        assert!(brief.contains("<info>\n{"));
    }
}
