//! Recipe Hub command line
//!
//! `hub validate` checks the content trees, `hub build` emits the
//! catalogue and search index, `hub diagram` renders one recipe's workflow
//! as Mermaid, `hub search` ranks the built catalogue against a query, and
//! `hub new` prints a starter `recipe.yaml` for contributors.

use clap::{value_parser, Arg, ArgAction, Command};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod pipeline;

fn content_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("content-dir")
            .long("content-dir")
            .default_value(".")
            .value_parser(value_parser!(PathBuf))
            .help("Directory holding tools/ and recipes/"),
    )
    .arg(
        Arg::new("schema-dir")
            .long("schema-dir")
            .default_value("schemas")
            .value_parser(value_parser!(PathBuf))
            .help("Directory holding the JSON Schemas"),
    )
}

fn cli() -> Command {
    Command::new("hub")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Recipe Hub content pipeline")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(content_args(
            Command::new("validate").about("Validate tools and recipes without building"),
        ))
        .subcommand(
            content_args(Command::new("build").about("Validate and emit the catalogue"))
                .arg(
                    Arg::new("out")
                        .long("out")
                        .default_value("public/data")
                        .value_parser(value_parser!(PathBuf))
                        .help("Output directory for build artifacts"),
                )
                .arg(
                    Arg::new("readmes")
                        .long("readmes")
                        .action(ArgAction::SetTrue)
                        .help("Regenerate each valid recipe's README.md in place"),
                ),
        )
        .subcommand(
            Command::new("diagram")
                .about("Render a recipe's workflow as Mermaid")
                .arg(
                    Arg::new("path")
                        .required(true)
                        .help("Recipe path as <author>/<slug>"),
                )
                .arg(
                    Arg::new("content-dir")
                        .long("content-dir")
                        .default_value(".")
                        .value_parser(value_parser!(PathBuf))
                        .help("Directory holding tools/ and recipes/"),
                )
                .arg(
                    Arg::new("write")
                        .long("write")
                        .action(ArgAction::SetTrue)
                        .help("Write workflow.mmd next to the recipe instead of printing"),
                ),
        )
        .subcommand(
            Command::new("search")
                .about("Rank the built catalogue against a query")
                .arg(Arg::new("query").required(true).help("Free-text query"))
                .arg(
                    Arg::new("data")
                        .long("data")
                        .default_value("public/data")
                        .value_parser(value_parser!(PathBuf))
                        .help("Directory holding the built recipes.json"),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .default_value("10")
                        .value_parser(value_parser!(usize))
                        .help("Maximum number of results"),
                ),
        )
        .subcommand(
            Command::new("new")
                .about("Scaffold a starter recipe.yaml")
                .arg(
                    Arg::new("author")
                        .long("author")
                        .requires("slug")
                        .help("Author handle; scaffolds recipes/<author>/<slug>/recipe.yaml"),
                )
                .arg(
                    Arg::new("slug")
                        .long("slug")
                        .requires("author")
                        .help("URL-friendly recipe slug"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .value_parser(value_parser!(PathBuf))
                        .conflicts_with_all(["author", "slug"])
                        .help("Write the template here instead of stdout"),
                ),
        )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(2);
        }
    }
}

fn run() -> anyhow::Result<i32> {
    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("validate", args)) => {
            let content_dir = args.get_one::<PathBuf>("content-dir").unwrap();
            let schema_dir = args.get_one::<PathBuf>("schema-dir").unwrap();

            let content = pipeline::validate_content(content_dir, schema_dir)?;
            report_diagnostics(&content.diagnostics);
            println!(
                "{} tools, {} recipes valid, {} problem(s)",
                content.tools.len(),
                content.recipes.len(),
                content.diagnostics.len()
            );
            Ok(exit_code(&content.diagnostics))
        }
        Some(("build", args)) => {
            let content_dir = args.get_one::<PathBuf>("content-dir").unwrap();
            let schema_dir = args.get_one::<PathBuf>("schema-dir").unwrap();
            let out_dir = args.get_one::<PathBuf>("out").unwrap();
            let readmes = args.get_flag("readmes");

            let report = pipeline::build(content_dir, schema_dir, out_dir, readmes)?;
            report_diagnostics(&report.diagnostics);
            println!(
                "wrote {} recipe(s) and {} icon(s) to {}",
                report.emit.recipe_count,
                report.emit.icons_copied,
                out_dir.display()
            );
            if readmes {
                println!("regenerated {} README(s)", report.readmes_written);
            }
            Ok(exit_code(&report.diagnostics))
        }
        Some(("diagram", args)) => {
            let path = args.get_one::<String>("path").unwrap();
            let content_dir = args.get_one::<PathBuf>("content-dir").unwrap();
            let write = args.get_flag("write");

            diagram(path, content_dir, write)
        }
        Some(("search", args)) => {
            let query = args.get_one::<String>("query").unwrap();
            let data_dir = args.get_one::<PathBuf>("data").unwrap();
            let limit = *args.get_one::<usize>("limit").unwrap();

            let catalogue = pipeline::load_catalogue(data_dir)?;
            let hits = hub_search::search(&catalogue, query);
            for hit in hits.iter().take(limit) {
                println!(
                    "{:>4}  {}  {}",
                    hit.score, hit.recipe.path, hit.recipe.name
                );
            }
            if hits.is_empty() {
                println!("no matches for '{query}'");
            }
            Ok(0)
        }
        Some(("new", args)) => {
            let yaml = hub_model::to_submission_yaml(&hub_model::submission_template())?;

            let target = match (
                args.get_one::<String>("author"),
                args.get_one::<String>("slug"),
                args.get_one::<PathBuf>("output"),
            ) {
                (Some(author), Some(slug), _) => {
                    for (label, value) in [("author", author), ("slug", slug)] {
                        if !hub_model::slug::is_url_friendly(value) {
                            anyhow::bail!("{label} '{value}' is not url-friendly (expected ^[a-z0-9-]+$)");
                        }
                    }
                    Some(PathBuf::from(format!("recipes/{author}/{slug}/recipe.yaml")))
                }
                (_, _, Some(path)) => Some(path.clone()),
                _ => None,
            };

            match target {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, yaml)?;
                    println!("wrote {}", path.display());
                }
                None => print!("{yaml}"),
            }
            Ok(0)
        }
        _ => unreachable!("subcommand_required"),
    }
}

fn report_diagnostics(diagnostics: &[hub_content::Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("{diagnostic}");
    }
}

fn exit_code(diagnostics: &[hub_content::Diagnostic]) -> i32 {
    i32::from(!diagnostics.is_empty())
}

fn diagram(path: &str, content_dir: &Path, write: bool) -> anyhow::Result<i32> {
    let outcome = hub_content::loader::load_recipes(&content_dir.join("recipes"))?;

    let Some(source) = outcome.items.iter().find(|s| s.path() == path) else {
        anyhow::bail!("recipe '{path}' not found under {}", content_dir.display());
    };

    let recipe: hub_model::Recipe = serde_json::from_value(source.raw.clone())
        .map_err(|e| anyhow::anyhow!("recipe '{path}' does not decode: {e}"))?;

    let rendered = hub_project::workflow_diagram(&recipe.workflow);
    if write {
        let target = source.dir.join("workflow.mmd");
        std::fs::write(&target, &rendered)?;
        println!("wrote {}", target.display());
    } else {
        print!("{rendered}");
    }
    Ok(0)
}
