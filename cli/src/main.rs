use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use droidgen_codegen::Generator;
use droidgen_sqlite::SchemaCheck;

mod project;

use project::ProjectFile;

#[derive(Debug, Parser)]
#[command(name = "droidgen")]
#[command(about = "Generate an Android SQLite ORM layer from a schema description")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate Java sources from a project file.
    Generate(GenerateArgs),
    /// Print the rendered DDL for every entity in a project file.
    Sql(SqlArgs),
    /// Execute the project's DDL against a disposable SQLite database.
    Check(CheckArgs),
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Project description file (.json, .yaml or .yml).
    #[arg(long)]
    project: PathBuf,
    /// Source root to generate under; overrides the project file.
    #[arg(long)]
    srcdir: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct SqlArgs {
    /// Project description file (.json, .yaml or .yml).
    #[arg(long)]
    project: PathBuf,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Project description file (.json, .yaml or .yml).
    #[arg(long)]
    project: PathBuf,
    /// Disposable database file; removed before and after the run.
    #[arg(long, default_value = "droidgen_check.db")]
    db: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Sql(args) => run_sql(args),
        Command::Check(args) => run_check(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn load_project(path: &Path) -> Result<ProjectFile, String> {
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    );
    if is_yaml {
        serde_yaml::from_str(&raw)
            .map_err(|err| format!("Failed to parse '{}': {err}", path.display()))
    } else {
        serde_json::from_str(&raw)
            .map_err(|err| format!("Failed to parse '{}': {err}", path.display()))
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), String> {
    let project = load_project(&args.project)?;
    let src_dir = args
        .srcdir
        .or_else(|| project.src_dir.clone())
        .unwrap_or_else(|| PathBuf::from("./src"));

    let mut generator =
        Generator::new(src_dir, &project.package).with_database_name(&project.database);
    generator.add_tables(project.tables.iter().map(project::build_table));
    generator.add_triggers(project.triggers.iter().map(project::build_trigger));
    generator.add_views(project.views.iter().map(project::build_view));
    for def in &project.fts {
        generator.add_fts_table(project::build_fts(def));
    }

    let report = generator.write().map_err(|err| err.to_string())?;

    println!(
        "Wrote {} file(s) under {}.",
        report.files.len(),
        report.directory.display()
    );
    println!("\nAdd this to AndroidManifest.xml inside <application>:\n");
    println!("{}", report.manifest_entry);
    Ok(())
}

fn run_sql(args: SqlArgs) -> Result<(), String> {
    let project = load_project(&args.project)?;

    for def in &project.tables {
        println!("{};\n", project::build_table(def));
    }
    for def in &project.fts {
        let fts = project::build_fts(def);
        println!("{};\n", fts.sql().map_err(|err| err.to_string())?);
        for trigger in fts.triggers().map_err(|err| err.to_string())? {
            println!("{};\n", trigger.sql().map_err(|err| err.to_string())?);
        }
    }
    for def in &project.views {
        let view = project::build_view(def);
        println!("{};\n", view.sql().map_err(|err| err.to_string())?);
    }
    for def in &project.triggers {
        let trigger = project::build_trigger(def);
        println!("{};\n", trigger.sql().map_err(|err| err.to_string())?);
    }
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<(), String> {
    let project = load_project(&args.project)?;

    let mut check = SchemaCheck::new();
    check.add_tables(project.tables.iter().map(project::build_table));
    for def in &project.fts {
        check.add_fts_table(project::build_fts(def));
    }
    check.add_views(project.views.iter().map(project::build_view));
    check.add_triggers(project.triggers.iter().map(project::build_trigger));

    check.run(&args.db).map_err(|err| err.to_string())?;

    println!(
        "Schema OK: {} table(s), {} fts mirror(s), {} view(s), {} trigger(s).",
        project.tables.len(),
        project.fts.len(),
        project.views.len(),
        project.triggers.len()
    );
    Ok(())
}
