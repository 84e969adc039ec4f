//! `resumeforge` - CLI for building resumes
//!
//! Each invocation loads the saved record, runs one command and saves any
//! change back to local storage.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use resumeforge::cli::{
    Cli, Command, ConfigCommand, EntryCommand, ExportCommand, PreviewCommand, SkillCommand,
};
use resumeforge::export::EXPORT_FAILURE_MESSAGE;
use resumeforge::model::{PersonalInfo, Resume};
use resumeforge::{
    init_logging, Config, Error, Exporter, ResumeBuilder, ResumeStore, Section, Storage, Template,
};

/// Exit status for commands rejected because of bad input.
const EXIT_INPUT: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbosity());

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            match err.downcast_ref::<Error>() {
                Some(e) if e.is_input_error() => ExitCode::from(EXIT_INPUT),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

/// Loaded configuration plus the opened record store.
#[derive(Debug)]
struct Session {
    config: Config,
    store: ResumeStore,
}

impl Session {
    fn open(config_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let config = Config::load_from(config_path)?;
        let store = ResumeStore::new(Storage::open(config.database_path())?);
        Ok(Self { config, store })
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let Cli {
        config: config_path,
        command,
        ..
    } = cli;
    let open = || Session::open(config_path.clone());

    let outcome = match command {
        Command::Config(cmd) => return handle_config(config_path.clone(), cmd),
        Command::Export(cmd) => return handle_export(&open()?, cmd).await,
        Command::Show(flag) => handle_show(&open()?.store, flag.json),
        Command::Status(flag) => handle_status(&open()?, flag.json),
        Command::Set { field, value } => {
            edit(&open()?.store, |b| b.set_personal(&field, value)).map(drop)
        }
        Command::ClearSummary => edit(&open()?.store, |b| {
            b.clear_summary();
            Ok(())
        })
        .map(drop),
        Command::Skill(cmd) => handle_skill(&open()?.store, cmd),
        Command::Entry(cmd) => handle_entry(&open()?.store, cmd),
        Command::Preview(cmd) => handle_preview(&open()?, cmd),
        Command::Form { section } => {
            let builder = ResumeBuilder::from_record(open()?.store.load_or_blank()?);
            println!("{}", builder.form(section.into()));
            Ok(())
        }
        Command::Import { file } => handle_import(&open()?.store, &file),
        Command::Dump { output } => write_or_print(output, &open()?.store.export_json()?),
        Command::New { yes } => handle_new(&open()?.store, yes),
    };

    outcome.map(|()| ExitCode::SUCCESS)
}

fn handle_import(store: &ResumeStore, file: &Path) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let resume = store.import_json(&text)?;
    println!(
        "Imported resume for {}",
        resume.personal.display_name().unwrap_or("(no name)")
    );
    Ok(())
}

fn handle_new(store: &ResumeStore, yes: bool) -> anyhow::Result<()> {
    if yes {
        store.clear()?;
        println!("Started a new resume.");
    } else {
        println!("This will discard the saved resume.");
        println!("Use --yes to confirm.");
    }
    Ok(())
}

/// Load the record, apply one edit and save it.
fn edit<F>(store: &ResumeStore, apply: F) -> anyhow::Result<ResumeBuilder>
where
    F: FnOnce(&mut ResumeBuilder) -> resumeforge::Result<()>,
{
    let mut builder = ResumeBuilder::from_record(store.load_or_blank()?);
    apply(&mut builder)?;
    store.save(builder.record())?;
    Ok(builder)
}

fn handle_skill(store: &ResumeStore, cmd: SkillCommand) -> anyhow::Result<()> {
    match cmd {
        SkillCommand::Add { input } => {
            let mut added = 0;
            let builder = edit(store, |b| {
                added = b.add_skills(&input);
                Ok(())
            })?;
            println!(
                "Added {added} skill(s); {} total.",
                builder.record().skills.len()
            );
        }
        SkillCommand::Remove { skill } => {
            let mut removed = false;
            edit(store, |b| {
                removed = b.remove_skill(&skill);
                Ok(())
            })?;
            if removed {
                println!("Removed skill: {skill}");
            } else {
                println!("No such skill: {skill}");
            }
        }
    }
    Ok(())
}

fn handle_entry(store: &ResumeStore, cmd: EntryCommand) -> anyhow::Result<()> {
    match cmd {
        EntryCommand::Add { section } => {
            let section = Section::from(section);
            let mut index = 0;
            edit(store, |b| {
                index = b.add_entry(section);
                Ok(())
            })?;
            println!("Added {section} entry {index}");
        }
        EntryCommand::Remove { section, index } => {
            let section = Section::from(section);
            let builder = edit(store, |b| b.remove_entry(section, index))?;
            println!(
                "Removed {section} entry {index}; {} left.",
                builder.entry_count(section)
            );
        }
        EntryCommand::Set {
            section,
            index,
            field,
            value,
        } => {
            edit(store, |b| {
                b.set_entry_field(section.into(), index, &field, value)
            })?;
        }
        EntryCommand::Clear { section } => {
            let section = Section::from(section);
            edit(store, |b| {
                b.clear_section(section);
                Ok(())
            })?;
            println!("Cleared {section}");
        }
    }
    Ok(())
}

fn resolve_template(config: &Config, arg: Option<resumeforge::cli::TemplateArg>) -> Template {
    arg.map_or_else(|| config.template(), Template::from)
}

fn handle_preview(session: &Session, cmd: PreviewCommand) -> anyhow::Result<()> {
    let mut builder = ResumeBuilder::from_record(session.store.load_or_blank()?);
    builder.select_template(resolve_template(&session.config, cmd.template));
    write_or_print(cmd.output, &builder.preview())
}

async fn handle_export(session: &Session, cmd: ExportCommand) -> anyhow::Result<ExitCode> {
    let Session { config, store } = session;
    let template = resolve_template(config, cmd.template);
    let dir = cmd.dir.unwrap_or_else(|| config.output_dir());
    let resume = store.load_or_blank()?;

    let exporter = Exporter::html(config.export_options(), config.theme());
    match exporter.export(&resume, template, &dir).await {
        Ok(path) => {
            println!("{}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        Err(_) => {
            // The cause is already logged by the exporter.
            eprintln!("{EXPORT_FAILURE_MESSAGE}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn handle_show(store: &ResumeStore, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", store.export_json()?);
        return Ok(());
    }

    let resume = store.load_or_blank()?;
    print_record(&resume);
    Ok(())
}

fn print_record(resume: &Resume) {
    println!("[Personal]");
    for spec in PersonalInfo::FIELDS {
        println!(
            "  {:<10} {}",
            spec.name,
            resume.personal.field(spec.name).unwrap_or_default()
        );
    }

    for section in Section::ALL {
        let entries = resume.section(section);
        println!();
        println!("[{section}]");
        for index in 0..entries.len() {
            let values: Vec<String> = entries
                .fields()
                .iter()
                .filter_map(|spec| {
                    entries
                        .value(index, spec.name)
                        .filter(|v| !v.trim().is_empty())
                        .map(|v| format!("{}={v:?}", spec.name))
                })
                .collect();
            println!("  {index}: {}", values.join(" "));
        }
    }

    println!();
    println!("[Skills]");
    println!("  {}", resume.skills.join(", "));
}

fn handle_status(session: &Session, json: bool) -> anyhow::Result<()> {
    let Session { config, store } = session;
    let stats = store.storage().stats()?;
    let saved = store.load()?;
    let resume = saved.clone().unwrap_or_else(Resume::blank);
    let template = config.template();

    if json {
        let counts: serde_json::Map<String, serde_json::Value> = Section::ALL
            .iter()
            .map(|s| (s.to_string(), resume.section(*s).len().into()))
            .collect();
        let status = serde_json::json!({
            "database_path": store.storage().path(),
            "saved": saved.is_some(),
            "items": stats.items,
            "last_updated": stats.last_updated,
            "db_size_bytes": stats.db_size_bytes,
            "name": resume.personal.display_name(),
            "entries": counts,
            "skills": resume.skills.len(),
            "default_template": template,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("resumeforge status");
        println!("------------------");
        println!("Database:      {}", store.storage().path().display());
        println!("Saved resume:  {}", if saved.is_some() { "yes" } else { "no" });
        match stats.last_updated {
            Some(at) => println!("Last saved:    {}", at.to_rfc3339()),
            None => println!("Last saved:    never"),
        }
        println!("Size:          {} bytes", stats.db_size_bytes);
        println!(
            "Name:          {}",
            resume.personal.display_name().unwrap_or("-")
        );
        for section in Section::ALL {
            println!(
                "{:<14} {}",
                format!("{section}:"),
                resume.section(section).len()
            );
        }
        println!("{:<14} {}", "skills:", resume.skills.len());
        println!("Template:      {template}");
    }
    Ok(())
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> anyhow::Result<ExitCode> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:    {}", config.database_path().display());
                println!();
                println!("[Render]");
                println!("  Default template: {}", config.render.default_template);
                println!("  Primary color:    {}", config.render.primary_color);
                println!("  Font family:      {}", config.render.font_family);
                println!();
                println!("[Export]");
                println!("  Output dir:       {}", config.output_dir().display());
                println!(
                    "  Page:             {} ({} mm margin)",
                    config.export_options().page_size(),
                    config.export.margin_mm
                );
                println!("  Image quality:    {}", config.export.image_quality);
                println!("  Scale:            {}", config.export.scale);
                println!("  Timeout (secs):   {}", config.export.timeout_secs);
            }
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => {
                    println!("Configuration error: {e}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn write_or_print(output: Option<PathBuf>, text: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(&path, text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}
