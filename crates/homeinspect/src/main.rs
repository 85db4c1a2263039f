//! `hinspect` - CLI for homeinspect
//!
//! This binary records inspection entries in the local store and exports
//! them as a paginated report.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use clap::Parser;

use homeinspect::cli::{
    AddCommand, Cli, Command, ConfigCommand, ExportCommand, ExportFormat, ListCommand,
    OutputFormat,
};
use homeinspect::document::{format_timestamp, render_text};
use homeinspect::{
    compile, init_logging, Config, InspectionEntry, RecordStore, SqliteStore, SUGGESTED_ROOMS,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    // The config commands must still run when the layout is invalid.
    let config = if matches!(cli.command, Command::Config(_)) {
        Config::extract_from(cli.config.clone())?
    } else {
        Config::load_from(cli.config.clone())?
    };

    match cli.command {
        Command::Add(add_cmd) => handle_add(&config, &add_cmd),
        Command::List(list_cmd) => handle_list(&config, &list_cmd),
        Command::Rooms => handle_rooms(&config),
        Command::Export(export_cmd) => handle_export(&config, &export_cmd),
        Command::Status(status_cmd) => handle_status(&config, status_cmd.json),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn open_store(config: &Config) -> Result<SqliteStore, Box<dyn std::error::Error>> {
    Ok(SqliteStore::open(config.database_path())?)
}

fn handle_add(config: &Config, cmd: &AddCommand) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(config)?;
    let entry = store.append(cmd.to_new_entry())?;
    println!(
        "Saved entry {} for {} at {}",
        entry.id,
        entry.room,
        format_timestamp(&entry.timestamp)
    );
    Ok(())
}

fn handle_list(config: &Config, cmd: &ListCommand) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(config)?;
    let entries = match &cmd.room {
        Some(room) => store.list_by_room(room)?,
        None => store.list_all()?,
    };

    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Plain => {
            if entries.is_empty() {
                println!("No entries recorded.");
            }
            for entry in &entries {
                print_entry(entry);
            }
        }
    }
    Ok(())
}

fn print_entry(entry: &InspectionEntry) {
    println!(
        "{}  [{}]  {}",
        format_timestamp(&entry.timestamp),
        entry.room,
        entry.id
    );
    if let Some(photo) = &entry.photo {
        println!("    photo: {}", photo.as_str());
    }
    if let Some(checklist) = &entry.checklist {
        println!("    checklist: {} item(s)", checklist.len());
    }
    if let Some(notes) = entry.notes.as_deref().filter(|_| entry.has_notes()) {
        for line in notes.lines() {
            println!("    {line}");
        }
    }
}

fn handle_rooms(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(config)?;
    let recorded = store.rooms()?;

    println!("Suggested rooms:");
    for room in SUGGESTED_ROOMS {
        let marker = if recorded.iter().any(|r| r == room) {
            "*"
        } else {
            " "
        };
        println!("  {marker} {room}");
    }

    let others: Vec<_> = recorded
        .iter()
        .filter(|room| !SUGGESTED_ROOMS.contains(&room.as_str()))
        .collect();
    if !others.is_empty() {
        println!("Other recorded rooms:");
        for room in others {
            println!("  * {room}");
        }
    }
    Ok(())
}

fn handle_export(config: &Config, cmd: &ExportCommand) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(config)?;
    let entries = store.list_all()?;
    let document = compile(&entries, &config.layout)?;

    let rendered = match cmd.format {
        ExportFormat::Text => render_text(&document),
        ExportFormat::Json => serde_json::to_string_pretty(&document)?,
    };

    match &cmd.output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            tracing::info!(
                "Exported {} entries on {} pages to {}",
                entries.len(),
                document.page_count(),
                path.display()
            );
            println!(
                "Wrote {} page(s) for {} entries to {}",
                document.page_count(),
                entries.len(),
                path.display()
            );
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(config)?;
    let stats = store.stats()?;

    if json {
        let status = serde_json::json!({
            "database_path": store.path(),
            "total_entries": stats.total_entries,
            "distinct_rooms": stats.distinct_rooms,
            "oldest_entry": stats.oldest_entry,
            "newest_entry": stats.newest_entry,
            "db_size_bytes": stats.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("hinspect status");
        println!("---------------");
        println!("Database:      {}", store.path().display());
        println!("Entries:       {}", stats.total_entries);
        println!("Rooms:         {}", stats.distinct_rooms);
        if let Some(oldest) = stats.oldest_entry {
            println!("Oldest entry:  {}", format_timestamp(&oldest));
        }
        if let Some(newest) = stats.newest_entry {
            println!("Newest entry:  {}", format_timestamp(&newest));
        }
        println!("Size:          {} bytes", stats.db_size_bytes);
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                let layout = &config.layout;
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:        {}", config.database_path().display());
                println!();
                println!("[Layout]");
                println!("  Page content height:  {}", layout.page_content_height);
                println!("  Line height:          {}", layout.line_height);
                println!("  Margin top:           {}", layout.margin_top);
                println!("  Wrap width:           {}", layout.wrap_width);
                println!("  Entry spacing:        {}", layout.entry_spacing);
                println!(
                    "  Title:                {}",
                    layout.title.as_deref().unwrap_or("(none)")
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path))?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
