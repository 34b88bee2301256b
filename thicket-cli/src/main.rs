//! Thicket CLI
//!
//! Runs a selector against a document tree described as JSON and prints the
//! matching nodes as HTML.

mod load;

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use thicket_common::warning::warn_once;
use thicket_dom::{NodeId, inner_html, outer_html};
use thicket_select::{Functions, matches, select_iter};

/// Thicket: query JSON document trees with selectors
#[derive(Parser, Debug)]
#[command(name = "thicket")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Every span below a .nav element
    thicket page.json '.nav span'

    # Inner HTML of the first direct child list item
    thicket page.json 'ul > li' --first --inner

    # Count elements that have no link inside
    thicket page.json 'p:not(:has(a))' --count

    # Test the document element
    thicket page.json 'html#root' --matches

    # Inline tree
    thicket --html-json '{"type":"element","tagName":"p"}' p
"#)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Path to the JSON tree (or the JSON itself with --html-json)
    #[arg(value_name = "TREE")]
    tree: String,

    /// Selector to run
    #[arg(value_name = "SELECTOR")]
    selector: String,

    /// Print only the first match
    #[arg(long, conflicts_with = "matches")]
    first: bool,

    /// Test whether the document element matches a simple selector
    #[arg(long)]
    matches: bool,

    /// Print inner HTML instead of outer HTML
    #[arg(long)]
    inner: bool,

    /// Print the number of matches instead of the matches
    #[arg(long, conflicts_with = "matches")]
    count: bool,

    /// Treat TREE as inline JSON instead of a path
    #[arg(long)]
    html_json: bool,
}

/// What a query produced, one variant per output mode.
#[derive(Debug, PartialEq, Eq)]
enum Output {
    /// `--matches`
    Matched(bool),
    /// `--count`
    Count(usize),
    /// Serialised matches, outer or inner HTML.
    Html(Vec<String>),
}

impl Output {
    fn print(&self) {
        match self {
            Self::Matched(true) => println!("{}", "true".green()),
            Self::Matched(false) => println!("{}", "false".red()),
            Self::Count(count) => println!("{count}"),
            Self::Html(lines) => {
                for line in lines {
                    println!("{line}");
                }
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(&cli)?.print();
    Ok(())
}

fn run(cli: &Cli) -> Result<Output> {
    let json = if cli.html_json {
        cli.tree.clone()
    } else {
        fs::read_to_string(&cli.tree)
            .with_context(|| format!("failed to read tree from '{}'", cli.tree))?
    };
    let tree = load::parse_tree(&json)?;
    let functions = Functions::new();

    if cli.matches {
        let root = tree
            .document_element()
            .context("the tree has no element to test")?;
        let matched = matches(&tree, root, cli.selector.as_str(), &functions)
            .with_context(|| format!("cannot test selector '{}'", cli.selector))?;
        return Ok(Output::Matched(matched));
    }

    let selected = select_iter(&tree, NodeId::ROOT, cli.selector.as_str(), &functions)
        .with_context(|| format!("invalid selector '{}'", cli.selector))?;
    let found: Vec<NodeId> = if cli.first {
        selected.take(1).collect()
    } else {
        selected.collect()
    };

    if found.is_empty() {
        let _ = warn_once("CLI", &format!("'{}' matched nothing", cli.selector));
    }

    if cli.count {
        return Ok(Output::Count(found.len()));
    }

    Ok(Output::Html(
        found
            .into_iter()
            .map(|node| {
                if cli.inner {
                    inner_html(&tree, node)
                } else {
                    outer_html(&tree, node)
                }
            })
            .collect(),
    ))
}
