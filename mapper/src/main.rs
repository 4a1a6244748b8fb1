//! Metadata Mapper CLI - map harvested OAI-PMH records to flat fields
//!
//! # Main Commands
//!
//! ```bash
//! metadata-mapper map record.xml -r miami          # bag-info tags + transfer URLs
//! metadata-mapper map record.xml -r hbz-opus -f DC-Title -f DC-Creator
//! metadata-mapper map record.xml -d custom.json    # mapper from a JSON definition
//! ```
//!
//! # Inspection Commands
//!
//! ```bash
//! metadata-mapper convert record.xml     # nested mapping of the record
//! metadata-mapper fields -r miami        # fields a mapper resolves
//! metadata-mapper repositories           # supported repositories
//! metadata-mapper catalog                # standard field catalog as JSON
//! metadata-mapper operations             # available post-process operations
//! ```
//!
//! The repository defaults to `METADATA_MAPPER_REPOSITORY` (also read from
//! `.env`). Log verbosity follows `RUST_LOG`.

use clap::{Parser, Subcommand};
use metadata_mapper::{
    bag_info, operations_description, standard_catalog, transfer_urls, CliError, CliResult,
    EntryDefinition, LinearMapEntry, MapperDefinition, MetadataConverter, OaiPmhConverter, Repository,
    ResolvedMapper, Strategy,
};
use serde_json::{json, Map, Value};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "metadata-mapper")]
#[command(about = "Map harvested OAI-PMH records to flat archival metadata fields", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an OAI-PMH record and resolve its fields
    Map {
        /// Input XML file (GetRecord response)
        input: PathBuf,

        /// Source repository
        #[arg(short, long, env = "METADATA_MAPPER_REPOSITORY")]
        repository: Option<Repository>,

        /// Mapper definition JSON file (takes precedence over --repository)
        #[arg(short, long)]
        definition: Option<PathBuf>,

        /// Resolve only these fields (default: all bag-info tags)
        #[arg(short, long = "field")]
        fields: Vec<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert an OAI-PMH record to its nested mapping
    Convert {
        /// Input XML file (GetRecord response)
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the fields a mapper resolves
    Fields {
        /// Source repository
        #[arg(short, long, env = "METADATA_MAPPER_REPOSITORY")]
        repository: Option<Repository>,

        /// Mapper definition JSON file (takes precedence over --repository)
        #[arg(short, long)]
        definition: Option<PathBuf>,
    },

    /// List supported repositories
    Repositories,

    /// Show the standard field catalog
    Catalog,

    /// Show available post-process operations
    Operations,
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Map {
            input,
            repository,
            definition,
            fields,
            output,
        } => cmd_map(
            &input,
            repository,
            definition.as_deref(),
            &fields,
            output.as_deref(),
        ),

        Commands::Convert { input, output } => cmd_convert(&input, output.as_deref()),

        Commands::Fields {
            repository,
            definition,
        } => cmd_fields(repository, definition.as_deref()),

        Commands::Repositories => cmd_repositories(),

        Commands::Catalog => cmd_catalog(),

        Commands::Operations => cmd_operations(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// The mapper from a definition file, or the shared mapper of a repository
fn select_mapper(
    repository: Option<Repository>,
    definition: Option<&Path>,
) -> CliResult<Cow<'static, ResolvedMapper>> {
    if let Some(path) = definition {
        info!(path = %path.display(), "loading mapper definition");
        let mapper = MapperDefinition::from_file(path)?.build()?;
        return Ok(Cow::Owned(mapper));
    }

    let repository = repository.ok_or(CliError::NoRepository)?;
    Ok(Cow::Borrowed(repository.mapper()?))
}

fn read_record(input: &Path) -> CliResult<Value> {
    let xml = fs::read_to_string(input)?;
    Ok(OaiPmhConverter::new().get_dict(&xml)?)
}

fn cmd_map(
    input: &Path,
    repository: Option<Repository>,
    definition: Option<&Path>,
    fields: &[String],
    output: Option<&Path>,
) -> CliResult<()> {
    let mapper = select_mapper(repository, definition)?;
    eprintln!("Mapper: {} ({})", mapper.tag(), mapper.spec_version());

    let record = read_record(input)?;

    let result = if fields.is_empty() {
        json!({
            "mapper": mapper.tag(),
            "version": mapper.spec_version().to_string(),
            "bag_info": bag_info(&*mapper, &record),
            "transfer_urls": transfer_urls(&*mapper, &record),
        })
    } else {
        let resolved: Map<String, Value> = fields
            .iter()
            .map(|field| {
                let value = mapper.resolve(field, &record).unwrap_or(Value::Null);
                (field.clone(), value)
            })
            .collect();
        Value::Object(resolved)
    };

    write_output(&serde_json::to_string_pretty(&result)?, output)
}

fn cmd_convert(input: &Path, output: Option<&Path>) -> CliResult<()> {
    let converter = OaiPmhConverter::new();
    eprintln!(
        "Converter: {} ({})",
        converter.converter_tag(),
        converter.spec_version()
    );

    let record = read_record(input)?;
    write_output(&serde_json::to_string_pretty(&record)?, output)
}

fn cmd_fields(repository: Option<Repository>, definition: Option<&Path>) -> CliResult<()> {
    let mapper = select_mapper(repository, definition)?;
    eprintln!("Fields of {} ({}):\n", mapper.tag(), mapper.spec_version());

    for field in mapper.fields() {
        match (mapper.strategy(field), mapper.linear_entry(field)) {
            (Some(Strategy::Linear), Some(LinearMapEntry::Constant(value))) => {
                println!("  {field}  = {value}");
            }
            (Some(Strategy::Linear), Some(LinearMapEntry::Path { path, post_process })) => {
                let suffix = if post_process.is_some() { " (post-processed)" } else { "" };
                println!("  {field}  <- {}{suffix}", path.join("/"));
            }
            _ => println!("  {field}  (computed)"),
        }
    }
    Ok(())
}

fn cmd_repositories() -> CliResult<()> {
    for repository in Repository::ALL {
        let mapper = repository.mapper()?;
        println!(
            "  {:<10} {} ({})",
            repository.name(),
            mapper.tag(),
            mapper.spec_version()
        );
    }
    Ok(())
}

fn cmd_catalog() -> CliResult<()> {
    let catalog: BTreeMap<&str, EntryDefinition> = standard_catalog()
        .iter()
        .filter_map(|(field, entry)| Some((field.as_str(), entry.to_definition()?)))
        .collect();

    println!("{}", serde_json::to_string_pretty(&catalog)?);
    Ok(())
}

fn cmd_operations() -> CliResult<()> {
    println!("{}", operations_description());
    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> CliResult<()> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
