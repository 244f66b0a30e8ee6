use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use waldiez_flow::{
    ExportOptions, export_flow,
    json_output::doctor_to_stdout_json,
    load_flow_from_path, load_flow_from_str,
    model::Flow,
    schema_validate::validate_flow_str,
};

#[derive(Parser, Debug)]
#[command(name = "waldiez-flow", about = "Waldiez flow document helpers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new flow skeleton at the given path.
    New(NewArgs),
    /// Strictly validate flow documents against the embedded schema.
    Doctor(DoctorArgs),
    /// Leniently import a document and re-export it normalized.
    Convert(ConvertArgs),
}

#[derive(Args, Debug)]
struct NewArgs {
    /// Path to write the new flow.
    #[arg(long = "flow")]
    flow_path: PathBuf,
    /// Flow identifier (generated when omitted).
    #[arg(long = "id")]
    flow_id: Option<String>,
    /// Optional flow name.
    #[arg(long = "name")]
    name: Option<String>,
    /// Optional flow description.
    #[arg(long = "description")]
    description: Option<String>,
    /// Overwrite the file if it already exists.
    #[arg(long)]
    force: bool,
}

#[derive(Args, Debug)]
struct DoctorArgs {
    /// Emit a machine-readable JSON payload for a single flow.
    #[arg(long)]
    json: bool,
    /// Read flow JSON from stdin instead of a file.
    #[arg(long)]
    stdin: bool,
    /// Flow files or directories to check.
    #[arg(required_unless_present = "stdin")]
    targets: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Flow file to convert; stdin when omitted.
    #[arg(long = "flow")]
    flow_path: Option<PathBuf>,
    /// Where to write the result; stdout when omitted.
    #[arg(long = "output")]
    output: Option<PathBuf>,
    /// Replace secret values with the redaction sentinel.
    #[arg(long)]
    hide_secrets: bool,
    /// Strip host-storage linkage from the exported document.
    #[arg(long)]
    skip_links: bool,
    /// Pretty-print the output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::New(args) => run_new(args),
        Commands::Doctor(args) => run_doctor(args),
        Commands::Convert(args) => run_convert(args),
    }
}

fn run_new(args: NewArgs) -> Result<()> {
    if args.flow_path.exists() && !args.force {
        bail!(
            "{} already exists (pass --force to overwrite)",
            args.flow_path.display()
        );
    }
    let mut flow = Flow::new();
    if let Some(id) = args.flow_id {
        flow.storage_id = id.clone();
        flow.meta.id = id;
    }
    if let Some(name) = args.name {
        flow.meta.name = name;
    }
    if let Some(description) = args.description {
        flow.meta.description = description;
    }
    let doc = export_flow(&flow, &ExportOptions::default());
    let text = serde_json::to_string_pretty(&doc).context("serialize new flow")?;
    if let Some(parent) = args.flow_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(&args.flow_path, text)
        .with_context(|| format!("write {}", args.flow_path.display()))?;
    println!("wrote {}", args.flow_path.display());
    Ok(())
}

fn run_doctor(args: DoctorArgs) -> Result<()> {
    if args.stdin {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("read flow from stdin")?;
        return doctor_one_text(&text, "<stdin>", args.json);
    }
    if args.json && args.targets.len() != 1 {
        bail!("--json expects exactly one target (or --stdin)");
    }

    let mut failures = 0usize;
    for target in &args.targets {
        for file in collect_flow_files(target)? {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("read {}", file.display()))?;
            let label = file.display().to_string();
            if args.json {
                println!("{}", doctor_to_stdout_json(&text, &label));
                match validate_flow_str(&text, &label) {
                    Ok(_) => {}
                    Err(_) => failures += 1,
                }
            } else {
                match validate_flow_str(&text, &label) {
                    Ok(_) => println!("ok: {label}"),
                    Err(err) => {
                        eprintln!("error: {label}\n{err}");
                        failures += 1;
                    }
                }
            }
        }
    }
    if failures > 0 {
        bail!("{failures} flow(s) failed validation");
    }
    Ok(())
}

fn doctor_one_text(text: &str, label: &str, json: bool) -> Result<()> {
    if json {
        println!("{}", doctor_to_stdout_json(text, label));
        if validate_flow_str(text, label).is_err() {
            bail!("flow failed validation");
        }
        return Ok(());
    }
    match validate_flow_str(text, label) {
        Ok(_) => {
            println!("ok: {label}");
            Ok(())
        }
        Err(err) => bail!("{err}"),
    }
}

fn collect_flow_files(target: &Path) -> Result<Vec<PathBuf>> {
    if target.is_file() {
        return Ok(vec![target.to_path_buf()]);
    }
    if !target.is_dir() {
        bail!("no such file or directory: {}", target.display());
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(target).with_context(|| format!("read {}", target.display()))? {
        let path = entry?.path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == "waldiez" || ext == "json");
        if path.is_file() && matches {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn run_convert(args: ConvertArgs) -> Result<()> {
    let flow = match &args.flow_path {
        Some(path) => load_flow_from_path(path)?,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("read flow from stdin")?;
            load_flow_from_str(&text)?
        }
    };
    let doc = export_flow(
        &flow,
        &ExportOptions::new(args.hide_secrets, args.skip_links),
    );
    let text = if args.pretty {
        serde_json::to_string_pretty(&doc).context("serialize flow")?
    } else {
        serde_json::to_string(&doc).context("serialize flow")?
    };
    match &args.output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
            println!("wrote {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}
