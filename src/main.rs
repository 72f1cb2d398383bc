use clap::{Parser, Subcommand, ValueEnum};
use config::{Config, Environment, File};
use jsonsql::{MappingStore, QueryError, Record, output, run_query};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// jsonsql - query JSON files with SQL
#[derive(Parser, Debug)]
#[command(name = "jsonsql")]
#[command(about = "Run SQL-shaped queries over schema-less JSON files", long_about = None)]
struct Args {
    /// Mappings file (default: ~/.jsonsql/mappings.json)
    #[arg(short, long)]
    mappings: Option<PathBuf>,

    /// Output format for query results
    #[arg(short, long)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one query and print the result set
    Query {
        sql: String,
        /// Write the result to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Map a table name to a JSON file (repeat for partitioned tables)
    Map {
        table: String,
        file: PathBuf,
        /// Path expression selecting the array of objects inside the file
        #[arg(long)]
        path: Option<String>,
    },
    /// Remove all source mappings for a table
    Unmap { table: String },
    /// List every table mapping
    Mappings,
    /// Interactive query shell
    Shell,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
enum OutputFormat {
    Json,
    Table,
}

/// Tool configuration
#[derive(Debug, Deserialize)]
struct ToolConfig {
    mappings: Option<PathBuf>,
    format: Option<OutputFormat>,
}

impl ToolConfig {
    /// Load configuration with priority: CLI args > ENV > config file > defaults
    fn load(args: &Args) -> Self {
        let config_paths = ["/etc/jsonsql/jsonsql.toml", "./jsonsql.toml"];

        let mut builder = Config::builder();
        for path in &config_paths {
            if Path::new(path).exists() {
                builder = builder.add_source(File::with_name(path));
                break;
            }
        }
        builder = builder.add_source(Environment::with_prefix("JSONSQL"));

        let base = builder
            .build()
            .ok()
            .and_then(|c| c.try_deserialize::<Self>().ok())
            .unwrap_or(Self { mappings: None, format: None });

        Self {
            mappings: args.mappings.clone().or(base.mappings),
            format: args.format.or(base.format),
        }
    }

    fn mappings_path(&self) -> PathBuf {
        self.mappings.clone().unwrap_or_else(MappingStore::default_path)
    }

    fn format(&self) -> OutputFormat {
        self.format.unwrap_or(OutputFormat::Json)
    }
}

fn main() {
    let args = Args::parse();
    let config = ToolConfig::load(&args);

    if let Err(e) = run(&args, &config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args, config: &ToolConfig) -> Result<(), QueryError> {
    let mappings_path = config.mappings_path();

    match &args.command {
        Command::Query { sql, output } => {
            let store = MappingStore::load(&mappings_path)?;
            let records = run_query(sql, &store)?;
            let rendered = render(&records, config.format());
            match output {
                Some(path) => std::fs::write(path, rendered)?,
                None => println!("{rendered}"),
            }
        }
        Command::Map { table, file, path } => {
            let mut store = MappingStore::load(&mappings_path)?;
            store.add(table, file.clone(), path.clone());
            store.save(&mappings_path)?;
            println!("Mapped '{table}' -> {}", file.display());
        }
        Command::Unmap { table } => {
            let mut store = MappingStore::load(&mappings_path)?;
            if store.remove(table) {
                store.save(&mappings_path)?;
                println!("Unmapped '{table}'");
            } else {
                println!("No mappings for '{table}'");
            }
        }
        Command::Mappings => {
            let store = MappingStore::load(&mappings_path)?;
            print_mappings(&store);
        }
        Command::Shell => shell(&mappings_path)?,
    }
    Ok(())
}

fn render(records: &[Record], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&output::to_json(records))
            .unwrap_or_else(|_| "[]".to_string()),
        OutputFormat::Table => output::render_table(records),
    }
}

fn print_mappings(store: &MappingStore) {
    if store.is_empty() {
        println!("No tables mapped");
        return;
    }
    for (table, locations) in store.iter() {
        for location in locations {
            match &location.path {
                Some(path) => println!("{table} -> {} :: {path}", location.file.display()),
                None => println!("{table} -> {}", location.file.display()),
            }
        }
    }
}

fn shell(mappings_path: &Path) -> Result<(), QueryError> {
    println!("jsonsql shell - \\q quits, \\mappings lists tables");

    let mut editor = DefaultEditor::new()
        .map_err(|e| QueryError::Parse(format!("Cannot initialize shell: {e}")))?;
    let history = dirs::home_dir().map(|home| home.join(".jsonsql").join("history.txt"));
    if let Some(path) = &history {
        let _ = editor.load_history(path);
    }

    loop {
        match editor.readline("jsonsql> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);

                match line {
                    "\\q" | "exit" | "quit" => break,
                    "\\mappings" => match MappingStore::load(mappings_path) {
                        Ok(store) => print_mappings(&store),
                        Err(e) => eprintln!("Error: {e}"),
                    },
                    sql => {
                        // Mappings reload per query so edits from another
                        // terminal are picked up without restarting.
                        let result = MappingStore::load(mappings_path)
                            .and_then(|store| run_query(sql, &store));
                        match result {
                            Ok(records) => {
                                println!("{}", output::render_table(&records));
                                println!("({} rows)", records.len());
                            }
                            Err(e) => eprintln!("Error: {e}"),
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Error: {e}");
                break;
            }
        }
    }

    if let Some(path) = &history {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = editor.save_history(path);
    }
    Ok(())
}
