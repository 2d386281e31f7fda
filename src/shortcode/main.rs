use clap::Parser;
use colored::*;
use shortcode::api::{CmdMessage, MessageLevel, ShortenerApi};
use shortcode::config::ShortenerConfig;
use shortcode::error::Result;
use shortcode::model::Mapping;
use shortcode::store::fs::FileStore;
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod args;
mod shell;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut api = init_api(&cli)?;

    match cli.command {
        Some(Commands::Add { url }) => handle_add(&mut api, &url),
        Some(Commands::Get { code }) => handle_get(&api, &code),
        Some(Commands::List) => handle_list(&api),
        Some(Commands::Shell) | None => {
            let stdin = io::stdin();
            shell::run(&mut api, stdin.lock(), &mut io::stdout())
        }
    }
}

fn init_api(cli: &Cli) -> Result<ShortenerApi<FileStore>> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = ShortenerConfig::load(&cwd)?;

    let store_path = match &cli.store {
        Some(path) => path.clone(),
        None => config.store_path(&cwd),
    };
    info!(path = %store_path.display(), "using mapping file");

    let backend = FileStore::new(store_path);
    if cli.reset_corrupt {
        let (api, reset) = ShortenerApi::open_or_reset(backend, config.generator())?;
        if reset {
            warn!(path = %api.backend().path().display(), "discarded corrupt mapping file");
            print_messages(&[CmdMessage::warning(
                "Mapping file was unreadable and has been reset.",
            )]);
        }
        Ok(api)
    } else {
        ShortenerApi::open(backend, config.generator())
    }
}

fn handle_add(api: &mut ShortenerApi<FileStore>, url: &str) -> Result<()> {
    let result = api.shorten(url)?;
    api.save_if_dirty()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_get(api: &ShortenerApi<FileStore>, code: &str) -> Result<()> {
    let result = api.resolve(code)?;
    for m in &result.mappings {
        println!("{}", m.url);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(api: &ShortenerApi<FileStore>) -> Result<()> {
    let result = api.list()?;
    print_mappings(&result.mappings);
    print_messages(&result.messages);
    Ok(())
}

fn print_mappings(mappings: &[Mapping]) {
    for m in mappings {
        println!("{}: {}", m.code.yellow(), m.url);
    }
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}
