use caraway::cli::{self, CliError, GetOptions, ListOptions, ValidateOptions};
use caraway::store::Store;
use clap::{Parser as ClapParser, Subcommand};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "caraway")]
#[command(about = "Caraway - a flat hierarchical store for querying, validating, and converting settings files")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up the attributes of a hierarchical path
    Get {
        /// Bare key or parent:key path
        path: String,

        /// Settings file (reads from stdin if not provided)
        #[arg(short, long)]
        file: Option<String>,

        /// Emit a JSON object
        #[arg(long)]
        json: bool,
    },

    /// List keys and values, optionally filtered
    List {
        /// Substring (or regex with --regex) to filter keys
        pattern: Option<String>,

        /// Settings file (reads from stdin if not provided)
        #[arg(short, long)]
        file: Option<String>,

        /// List the immediate children of the pattern instead
        #[arg(short, long)]
        children: bool,

        /// Treat the pattern as a regular expression
        #[arg(long)]
        regex: bool,

        /// Emit a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Print an indented outline of the store
    Describe {
        /// Settings file (reads from stdin if not provided)
        #[arg(short, long)]
        file: Option<String>,

        /// Deepest level to show
        #[arg(long, default_value_t = 8)]
        max_level: u32,
    },

    /// Check required keys and declared types
    Validate {
        /// Settings file (reads from stdin if not provided)
        #[arg(short, long)]
        file: Option<String>,

        /// Required keys, comma-separated or repeated
        #[arg(long = "require", value_delimiter = ',')]
        required: Vec<String>,

        /// KEY:TYPE rules, repeatable
        #[arg(long = "type", value_name = "KEY:TYPE")]
        types: Vec<String>,
    },

    /// Convert settings text to JSON, or JSON back to settings text
    Convert {
        /// Input file (reads from stdin if not provided)
        #[arg(short, long)]
        file: Option<String>,

        /// Input is JSON; emit settings text
        #[arg(long)]
        from_json: bool,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("CARAWAY_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Get { path, file, json } => {
            load_store(file).and_then(|store| cli::execute_get(&store, &GetOptions { path, json }))
        }
        Commands::List {
            pattern,
            file,
            children,
            regex,
            json,
        } => load_store(file).and_then(|store| {
            cli::execute_list(
                &store,
                &ListOptions {
                    pattern,
                    children,
                    regex,
                    json,
                },
            )
        }),
        Commands::Describe { file, max_level } => {
            load_store(file).map(|store| cli::execute_describe(&store, max_level))
        }
        Commands::Validate {
            file,
            required,
            types,
        } => run_validate(file, required, types),
        Commands::Convert {
            file,
            from_json,
            pretty,
        } => run_convert(file, from_json, pretty),
    };

    match result {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Read the source text from a file or, when piped, from stdin, and parse
/// it into a store.
fn load_store(file: Option<String>) -> Result<Store, CliError> {
    let (text, source) = read_source(file)?;
    match source {
        Some(path) => Ok(caraway::parse_named(&text, "default", Some(&path))?),
        None => Ok(caraway::parse(&text)?),
    }
}

fn read_source(file: Option<String>) -> Result<(String, Option<String>), CliError> {
    match file {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .map_err(|error| CliError::Read { path: path.clone(), error })?;
            Ok((text, Some(path)))
        }
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Ok((buffer, None))
        }
        None => Err(CliError::NoInput),
    }
}

fn run_validate(
    file: Option<String>,
    required: Vec<String>,
    types: Vec<String>,
) -> Result<String, CliError> {
    let store = load_store(file)?;
    let report = cli::execute_validate(&store, &ValidateOptions { required, types })?;
    let rendered = cli::render_report(&report);
    if report.valid {
        Ok(rendered)
    } else {
        // a failed report is a result, not an error, but the process still
        // signals it through the exit code
        print!("{}", rendered);
        std::process::exit(1);
    }
}

fn run_convert(file: Option<String>, from_json: bool, pretty: bool) -> Result<String, CliError> {
    let (text, source) = read_source(file)?;

    if from_json {
        let value: serde_json::Value = serde_json::from_str(&text)?;
        let store = cli::json_to_store(&value, "default");
        return Ok(caraway::to_yaml(&store));
    }

    let store = match source {
        Some(path) => caraway::parse_named(&text, "default", Some(&path))?,
        None => caraway::parse(&text)?,
    };
    let value = cli::store_to_json(&store);
    let json = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(json + "\n")
}
