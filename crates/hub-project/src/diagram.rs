//! Workflow diagram generation
//!
//! Derives a Mermaid `graph TD` description of a recipe's step order:
//! one node per step labeled with the step name and tool name, one edge per
//! consecutive pair labeled with the upstream step's `output_handling` (or
//! a generic label). The graph is always a single path matching workflow
//! order; this is a display aid, not a dependency graph, so `#id`
//! references in descriptive text never become edges.

use hub_model::Step;

/// Edge label used when a step declares no `output_handling`
const GENERIC_EDGE_LABEL: &str = "Output";

/// Render the workflow as a Mermaid diagram.
#[must_use]
pub fn workflow_diagram(steps: &[Step]) -> String {
    let mut diagram = String::from("graph TD\n");

    for (i, step) in steps.iter().enumerate() {
        diagram.push_str(&format!(
            "    {}[\"{}<br>({})\"]\n",
            step.id, step.name, step.tool.name
        ));

        if let Some(next) = steps.get(i + 1) {
            let label = step
                .output_handling
                .as_deref()
                .unwrap_or(GENERIC_EDGE_LABEL);
            diagram.push_str(&format!("    {} -->|{}| {}\n", step.id, label, next.id));
        }
    }

    diagram
}
