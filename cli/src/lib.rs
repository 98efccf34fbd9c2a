//! Command handling for the `fallthumb` binary.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use fallthumb_admin::{AdminContext, AdminSubmission, NewMapping, process_submission};
use fallthumb_engine::host::{DisplayAttrs, MediaLibrary};
use fallthumb_engine::{BuiltinFallbacks, ChainBuilder, SizePolicy, ThumbnailConfig};
use fallthumb_store::{SlugImageStore, SqliteSlugStore};
use fallthumb_types::{Dimensions, ImageRef, MappingId, ResolvedSize, SizeSpec};
use rusqlite::Connection;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "fallthumb")]
#[command(about = "Manage fallback thumbnails for taxonomy terms and the site")]
pub struct Cli {
    /// Path to the SQLite database holding the mapping table
    #[arg(short, long, default_value = "fallthumb.db")]
    pub db: PathBuf,

    /// Path to the resolver configuration
    #[arg(short, long, default_value = "fallthumb.toml")]
    pub config: PathBuf,

    /// Print machine-readable JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every slug mapping in insertion order
    List,
    /// Map a slug to an image; a random `test_` slug is used when none is given
    Add {
        #[arg(short, long)]
        slug: Option<String>,
        image: i64,
    },
    /// Point an existing mapping at another image
    Update { id: i64, image: i64 },
    /// Remove a mapping
    Delete { id: i64 },
    /// Show the fallback order
    Chain,
    /// Resolve a size name or `WIDTHxHEIGHT` pair to pixel targets
    Size {
        /// Defaults to the configured required size
        size: Option<String>,
    },    /// List every configured size name with its pixel targets
    Sizes,
}

#[derive(Serialize)]
struct SizeEntry<'a> {
    name: &'a str,
    size: ResolvedSize,
}

/// Size resolution only consults the registry, so the CLI runs without
/// image files.
struct HeadlessMedia;

impl MediaLibrary for HeadlessMedia {
    fn dimensions_at(&self, _image: ImageRef, _size: &SizeSpec) -> Option<Dimensions> {
        None
    }

    fn render_markup(&self, _image: ImageRef, _size: &SizeSpec, _attrs: &DisplayAttrs) -> String {
        String::new()
    }
}

/// Parses `64x48` as explicit dimensions, anything else as a size name.
pub fn parse_size(input: &str) -> SizeSpec {
    let explicit = input
        .split_once(['x', 'X'])
        .and_then(|(w, h)| Some((w.trim().parse::<u32>().ok()?, h.trim().parse::<u32>().ok()?)));
    match explicit {
        Some((width, height)) => SizeSpec::explicit(width, height),
        None => SizeSpec::named(input.trim()),
    }
}

fn open_store(cli: &Cli, config: &ThumbnailConfig) -> Result<SqliteSlugStore> {
    let conn = Connection::open(&cli.db)
        .with_context(|| format!("failed to open database {}", cli.db.display()))?;
    let store = SqliteSlugStore::open_with_prefix(Arc::new(Mutex::new(conn)), &config.table_prefix)?;
    debug!("using table {}", store.table_name());
    Ok(store)
}

fn operator() -> AdminContext {
    let user = std::env::var("USER").unwrap_or_else(|_| "cli".to_string());
    AdminContext::manager(user)
}

fn emit<T: Serialize>(out: &mut dyn Write, json: bool, value: &T, text: &str) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, value)?;
        writeln!(out)?;
    } else {
        write!(out, "{text}")?;
    }
    Ok(())
}

/// Executes one command, writing its output to `out`.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let config = ThumbnailConfig::load_from(&cli.config);

    match &cli.command {
        Command::List => {
            let store = open_store(cli, &config)?;
            let mappings = store.list()?;
            let mut text = String::new();
            for m in &mappings {
                text.push_str(&format!("{}\t{}\t{}\n", m.id, m.slug, m.image));
            }
            emit(out, cli.json, &mappings, &text)?;
        }
        Command::Add { slug, image } => {
            let store = open_store(cli, &config)?;
            let submission = AdminSubmission {
                new_mapping: Some(NewMapping {
                    slug: slug.clone(),
                    image: Some(ImageRef::new(*image)),
                }),
                ..Default::default()
            };
            let outcome = process_submission(&store, &operator(), &submission)?;
            let Some(added) = outcome.added else {
                bail!("mapping was not added");
            };
            info!("added mapping {} for {}", added.id, added.slug);
            let text = format!("{}\t{}\t{}\n", added.id, added.slug, added.image);
            emit(out, cli.json, &added, &text)?;
        }
        Command::Update { id, image } => {
            let store = open_store(cli, &config)?;
            let submission = AdminSubmission {
                updates: vec![(MappingId::new(*id), Some(ImageRef::new(*image)))],
                ..Default::default()
            };
            let outcome = process_submission(&store, &operator(), &submission)?;
            emit(out, cli.json, &outcome, &format!("updated {id}\n"))?;
        }
        Command::Delete { id } => {
            let store = open_store(cli, &config)?;
            let submission = AdminSubmission {
                delete: Some(MappingId::new(*id)),
                ..Default::default()
            };
            let outcome = process_submission(&store, &operator(), &submission)?;
            emit(out, cli.json, &outcome, &format!("deleted {id}\n"))?;
        }
        Command::Chain => {
            let mut builder = ChainBuilder::new();
            builder.apply(&BuiltinFallbacks::from_config(&config));
            let chain = builder.build()?;
            emit(out, cli.json, &chain.keys(), &format!("{}\n", chain.summary()))?;
        }
        Command::Size { size } => {
            let spec = match size {
                Some(s) => parse_size(s),
                None => config.required_size.clone(),
            };
            let registry = config.size_registry();
            let policy = SizePolicy::new(&registry, &HeadlessMedia);
            let resolved = policy.resolve(&spec)?;
            emit(out, cli.json, &resolved, &format!("{spec}: {resolved}\n"))?;
        }
        Command::Sizes => {
            let registry = config.size_registry();
            let policy = SizePolicy::new(&registry, &HeadlessMedia);
            let mut sizes = Vec::new();
            let mut text = String::new();
            for name in registry.names() {
                let resolved = policy.resolve(&SizeSpec::named(name))?;
                text.push_str(&format!("{name}: {resolved}\n"));
                sizes.push(SizeEntry { name, size: resolved });
            }
            emit(out, cli.json, &sizes, &text)?;
        }
    }

    Ok(())
}
