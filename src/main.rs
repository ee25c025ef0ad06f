use clap::Parser;
use loja_cli::cli::dispatcher::Dispatcher;
use loja_cli::cli::main_types::Cli;
use loja_cli::storage::config::{Config, Profile};
use loja_cli::storage::credentials::Credentials;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli
        .config_dir
        .as_ref()
        .map(|dir| PathBuf::from(dir).join("config.toml"));

    let mut config = match Config::load(config_path.clone()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error loading config: {}", err);
            std::process::exit(1);
        }
    };

    let profile_name = cli
        .profile
        .or(config.default_profile.clone())
        .unwrap_or_else(|| "default".to_string());

    // First run: seed a profile pointing at a local backend
    if config.get_profile(&profile_name).is_none() {
        Dispatcher::print_verbose(cli.verbose, &format!("Creating profile: {}", profile_name));

        config.set_profile(
            profile_name.clone(),
            Profile {
                api_url: "http://localhost:8000".to_string(),
                asset_base_url: None,
                page_size: None,
            },
        );
        if config.default_profile.is_none() {
            config.default_profile = Some(profile_name.clone());
        }

        if let Err(err) = config.save(config_path.clone()) {
            Dispatcher::print_verbose(cli.verbose, &format!("Failed to save config: {}", err));
        }
    }

    Dispatcher::print_verbose(cli.verbose, &format!("Using profile: {}", profile_name));
    if let Some(config_dir) = &cli.config_dir {
        Dispatcher::print_verbose(cli.verbose, &format!("Using config directory: {}", config_dir));
    }
    if cli.token.as_ref().is_some_and(|token| !token.is_empty()) {
        Dispatcher::print_verbose(cli.verbose, "Using token provided via env or command line");
    }

    // A broken keyring must not make the CLI unusable; --token still works
    let credentials = match Credentials::load(&profile_name) {
        Ok(credentials) => credentials,
        Err(err) => {
            Dispatcher::print_verbose(cli.verbose, &format!("Failed to load credentials: {}", err));
            Credentials::new(profile_name.clone())
        }
    };

    let mut dispatcher = Dispatcher::new(
        config,
        credentials,
        profile_name,
        cli.token,
        config_path,
        cli.verbose,
    );

    if let Err(err) = dispatcher.dispatch(cli.command).await {
        eprintln!("{} {}", err.severity().emoji(), err.display_friendly());
        if let Some(hint) = err.troubleshooting_hint() {
            eprintln!("Hint: {}", hint);
        }
        std::process::exit(1);
    }

    Ok(())
}
