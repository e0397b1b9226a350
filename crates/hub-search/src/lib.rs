//! Weighted catalogue search
//!
//! Free-text ranking over projected recipes. The query is split into
//! case-insensitive whitespace terms; each term accumulates a weighted
//! score per field it matches, and an exact full-field match on the name
//! or a tag earns a double-weight bonus on top of the substring score. Recipes
//! scoring zero for a non-empty query are excluded; the rest sort by
//! descending score with ties keeping catalogue order (stable sort). An
//! empty query returns the catalogue unfiltered, in order.
//!
//! At catalogue sizes of tens to low hundreds of recipes this runs
//! synchronously per keystroke; no index structure is needed.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

use hub_model::ProjectedRecipe;

/// Field weights, one substring hit per term per field
const WEIGHT_NAME: u32 = 10;
const WEIGHT_DESCRIPTION: u32 = 8;
const WEIGHT_TAGS: u32 = 6;
const WEIGHT_WORKFLOW: u32 = 5;
const WEIGHT_PARAMETERS: u32 = 4;
const WEIGHT_EXAMPLES: u32 = 3;

/// A ranked search hit
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<'a> {
    /// The matching recipe
    pub recipe: &'a ProjectedRecipe,
    /// Aggregate score across all query terms
    pub score: u32,
}

/// Rank the catalogue against a free-text query.
#[must_use]
pub fn search<'a>(catalogue: &'a [ProjectedRecipe], query: &str) -> Vec<Ranked<'a>> {
    let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();

    if terms.is_empty() {
        return catalogue
            .iter()
            .map(|recipe| Ranked { recipe, score: 0 })
            .collect();
    }

    let mut ranked: Vec<Ranked<'a>> = catalogue
        .iter()
        .filter_map(|recipe| {
            let score = score(recipe, &terms);
            (score > 0).then_some(Ranked { recipe, score })
        })
        .collect();

    // Stable: equal scores keep catalogue order
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// Aggregate weighted score of one recipe for the given lowercase terms.
#[must_use]
pub fn score(recipe: &ProjectedRecipe, terms: &[String]) -> u32 {
    let name = recipe.name.to_lowercase();
    let description = recipe.description.to_lowercase();
    let tags: Vec<String> = recipe.tags.iter().map(|t| t.to_lowercase()).collect();

    let workflow_text: Vec<String> = recipe
        .workflow
        .iter()
        .flat_map(|step| {
            let mut text = vec![
                step.name.to_lowercase(),
                step.description.to_lowercase(),
                step.tool.name.to_lowercase(),
                step.tool.id.to_lowercase(),
            ];
            if let Some(prompt) = &step.prompt {
                text.push(prompt.to_lowercase());
            }
            text
        })
        .collect();

    let parameter_text: Vec<String> = recipe
        .parameters
        .iter()
        .flat_map(|p| {
            [
                p.name.to_lowercase(),
                p.description.to_lowercase(),
                p.example.to_lowercase(),
            ]
        })
        .collect();

    let example_text: Vec<String> = recipe
        .examples
        .iter()
        .flat_map(|e| {
            e.sample_queries
                .iter()
                .map(|q| q.to_lowercase())
                .chain(e.parameters.values().map(|v| v.to_lowercase()))
        })
        .collect();

    let mut total = 0;
    for term in terms {
        if name.contains(term.as_str()) {
            total += WEIGHT_NAME;
            if name == *term {
                total += 2 * WEIGHT_NAME;
            }
        }
        if description.contains(term.as_str()) {
            total += WEIGHT_DESCRIPTION;
        }
        if tags.iter().any(|t| t.contains(term.as_str())) {
            total += WEIGHT_TAGS;
            if tags.iter().any(|t| t == term) {
                total += 2 * WEIGHT_TAGS;
            }
        }
        if workflow_text.iter().any(|t| t.contains(term.as_str())) {
            total += WEIGHT_WORKFLOW;
        }
        if parameter_text.iter().any(|t| t.contains(term.as_str())) {
            total += WEIGHT_PARAMETERS;
        }
        if example_text.iter().any(|t| t.contains(term.as_str())) {
            total += WEIGHT_EXAMPLES;
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(name: &str, description: &str, tags: &[&str]) -> ProjectedRecipe {
        ProjectedRecipe {
            name: name.to_string(),
            description: description.to_string(),
            path: format!("test/{}", name.to_lowercase().replace(' ', "-")),
            author: "test".to_string(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            parameters: vec![],
            workflow: vec![],
            tips: vec![],
            examples: vec![],
            readme: description.to_string(),
        }
    }

    #[test]
    fn exact_tag_match_outranks_description_substring() {
        let catalogue = vec![
            recipe("Uses the API", "uses claude api", &[]),
            recipe("Tagged", "something else", &["claude"]),
        ];

        let hits = search(&catalogue, "claude");

        assert_eq!(hits.len(), 2);
        // tag: 6 substring + 12 exact bonus = 18; description substring = 8
        assert_eq!(hits[0].recipe.name, "Tagged");
        assert_eq!(hits[0].score, 18);
        assert_eq!(hits[1].score, 8);
    }

    #[test]
    fn exact_name_match_gets_triple_name_weight() {
        let catalogue = vec![recipe("Claude", "assistant recipes", &[])];
        let hits = search(&catalogue, "claude");
        assert_eq!(hits[0].score, 30);
    }

    #[test]
    fn zero_score_recipes_are_excluded() {
        let catalogue = vec![
            recipe("Alpha", "first", &[]),
            recipe("Beta", "second", &[]),
        ];

        let hits = search(&catalogue, "alpha");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].recipe.name, "Alpha");
    }

    #[test]
    fn empty_query_returns_catalogue_in_order() {
        let catalogue = vec![
            recipe("Zulu", "z", &[]),
            recipe("Alpha", "a", &[]),
        ];

        let hits = search(&catalogue, "   ");
        let names: Vec<_> = hits.iter().map(|h| h.recipe.name.as_str()).collect();
        assert_eq!(names, vec!["Zulu", "Alpha"]);
    }

    #[test]
    fn ties_keep_catalogue_order() {
        let catalogue = vec![
            recipe("First research", "x", &[]),
            recipe("Second research", "y", &[]),
        ];

        let hits = search(&catalogue, "research");
        assert_eq!(hits[0].recipe.name, "First research");
        assert_eq!(hits[1].recipe.name, "Second research");
        assert_eq!(hits[0].score, hits[1].score);
    }

    #[test]
    fn multiple_terms_accumulate() {
        let catalogue = vec![recipe("Market scan", "weekly market overview", &["research"])];

        let one = search(&catalogue, "market");
        let two = search(&catalogue, "market research");
        assert!(two[0].score > one[0].score);
    }

    #[test]
    fn search_is_case_insensitive() {
        let catalogue = vec![recipe("Market Scan", "overview", &[])];
        assert_eq!(search(&catalogue, "MARKET")[0].score, search(&catalogue, "market")[0].score);
    }

    #[test]
    fn workflow_and_parameter_fields_contribute() {
        let mut with_step = recipe("Plain", "nothing here", &[]);
        with_step.workflow = vec![hub_model::ProjectedStep {
            id: "gather".to_string(),
            name: "Gather".to_string(),
            description: "collect with perplexity".to_string(),
            tool: hub_model::ResolvedTool {
                id: "perplexity".to_string(),
                name: "Perplexity".to_string(),
                description: String::new(),
                icon: String::new(),
                model: None,
                settings: Default::default(),
            },
            prompt: None,
            input_source: None,
            output_handling: None,
            notes: None,
            tool_usage: None,
        }];

        let catalogue = [with_step];
        let hits = search(&catalogue, "perplexity");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].score, 5);
    }
}
