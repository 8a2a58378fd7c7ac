//! Binary entry point: config load, store construction, subcommand dispatch.

mod cli;

use clap::Parser;
use colored::Colorize;
use meetnote::core::config::Config;
use meetnote::core::driver::EditorDriver;
use meetnote::core::error::MeetnoteError;
use meetnote::core::meeting::{Meeting, MeetingQuery};
use meetnote::core::store::MeetingStore;
use meetnote::core::task::TaskQuery;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = cli::Cli::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".bright_red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<std::path::PathBuf>) -> Result<Config, MeetnoteError> {
    match path {
        Some(path) => Config::load(&path),
        None => Config::load(&Config::default_path()?),
    }
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

fn run(args: cli::Cli) -> Result<(), MeetnoteError> {
    let config = load_config(args.config)?;

    match args.command {
        cli::Command::Open {
            domain,
            name,
            date,
            template,
        } => {
            let driver = EditorDriver::new(&config.editor)?;
            let store = MeetingStore::new(&config, Box::new(driver))?;
            store.open(Meeting {
                name,
                date: date.unwrap_or_else(today),
                domain,
                template,
            })?;
        }
        cli::Command::List {
            name,
            domain,
            date,
            format,
        } => {
            let driver = EditorDriver::new(&config.editor)?;
            let store = MeetingStore::new(&config, Box::new(driver))?;
            let mut meetings = store.list(&MeetingQuery::new(&name, &domain, &date)?)?;
            meetings.sort_by(|a, b| a.to_string().cmp(&b.to_string()));

            if format == "json" {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&meetings)
                        .map_err(|e| MeetnoteError::Config(format!("rendering json: {e}")))?
                );
            } else {
                for meeting in meetings {
                    println!("{meeting}");
                }
            }
        }
        cli::Command::Remove { date, domain, name } => {
            let driver = EditorDriver::new(&config.editor)?;
            let store = MeetingStore::new(&config, Box::new(driver))?;
            store.remove(Meeting {
                name,
                date,
                domain,
                template: None,
            })?;
        }
        cli::Command::GroupBy { strategy } => {
            let driver = EditorDriver::new(&config.editor)?;
            let mut store = MeetingStore::new(&config, Box::new(driver))?;
            store.update_group_by(strategy)?;
            println!("grouping by {}", strategy.as_str().bright_green());
        }
        cli::Command::Template { command } => {
            let driver = EditorDriver::new(&config.editor)?;
            let store = MeetingStore::new(&config, Box::new(driver))?;
            match command {
                cli::TemplateCommand::Add { paths } => store.templates().add(&paths)?,
                cli::TemplateCommand::List => {
                    for name in store.templates().list()? {
                        println!("{name}");
                    }
                }
                cli::TemplateCommand::Remove { names } => store.templates().remove(&names)?,
            }
        }
        cli::Command::Tasks {
            name,
            domain,
            date,
            description,
            complete,
            format,
        } => {
            let driver = EditorDriver::new(&config.editor)?;
            let store = MeetingStore::new(&config, Box::new(driver))?;
            let query = TaskQuery::new(
                MeetingQuery::new(&name, &domain, &date)?,
                complete,
                &description,
            )?;
            let mut tasks = store.tasks(&query)?;
            tasks.sort_by(|a, b| a.to_string().cmp(&b.to_string()));

            if format == "json" {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&tasks)
                        .map_err(|e| MeetnoteError::Config(format!("rendering json: {e}")))?
                );
            } else {
                for task in tasks {
                    println!("{task}");
                }
            }
        }
    }

    Ok(())
}
