//! Compose the embedded pages and report any that fail to parse.
//!
//! ```text
//! parse-templates                      # every page, no partials
//! parse-templates terminal -p alert    # one page with the alert partial
//! ```

use anyhow::{bail, Context, Result};
use clap::Parser;
use vterm_service::templates::Renderer;
use vterm_web::{load_templates, template_functions};

/// Check that template compositions parse
#[derive(Debug, Parser)]
#[command(name = "parse-templates", version, about, long_about = None)]
struct Args {
    /// Pages to compose (defaults to every embedded page)
    pages: Vec<String>,

    /// Partial to compose into each page, in order (repeatable)
    #[arg(short, long = "partial", value_name = "NAME")]
    partials: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let store = load_templates().context("Failed to load embedded templates")?;
    let pages = if args.pages.is_empty() {
        store.pages()
    } else {
        args.pages
    };

    let renderer = Renderer::builder(store)
        .functions(template_functions())
        .build();
    let partials: Vec<&str> = args.partials.iter().map(String::as_str).collect();

    let mut failures = 0;
    for page in &pages {
        match renderer.composer().compose(page, &partials) {
            Ok(template) => println!(
                "Parsed templates OK: {} ({} documents)",
                template.page(),
                template.documents().len()
            ),
            Err(e) => {
                failures += 1;
                eprintln!("Parse error: {}", e);
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} pages failed to compose", failures, pages.len());
    }

    Ok(())
}
