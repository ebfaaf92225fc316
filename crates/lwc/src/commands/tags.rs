//! Tags command - Index a workspace and print the tag registry

use std::path::PathBuf;

use clap::Args;
use lwc_registry::server::{ServerState, TagEntry};

#[derive(Args)]
pub struct TagsArgs {
    /// Workspace root
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// Include built-in `lightning-*` tags
    #[arg(long)]
    pub builtins: bool,

    /// Log indexing progress and compiler diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn run(args: TagsArgs) {
    if args.verbose {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    let root = match args.dir.canonicalize() {
        Ok(root) => root,
        Err(e) => {
            eprintln!("Cannot open {}: {}", args.dir.display(), e);
            std::process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to create tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    let state = ServerState::new();
    state.set_workspace_root(&root);

    if let Err(e) = runtime.block_on(state.bootstrap()) {
        eprintln!("\x1b[33mWarning:\x1b[0m {}", e);
    }

    let entries: Vec<TagEntry> = TagEntry::collect(state.registry())
        .into_iter()
        .filter(|entry| args.builtins || !entry.name.starts_with("lightning-"))
        .collect();

    match args.format.as_str() {
        "json" => match serde_json::to_string_pretty(&entries) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize tags: {}", e);
                std::process::exit(1);
            }
        },
        _ => {
            for entry in &entries {
                if entry.attributes.is_empty() {
                    println!("{}", entry.name);
                } else {
                    println!("{} [{}]", entry.name, entry.attributes.join(", "));
                }
            }
            eprintln!("{} tags", entries.len());
        }
    }
}
