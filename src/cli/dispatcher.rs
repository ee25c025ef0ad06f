use crate::cli::main_types::{AuthCommands, Commands, ConfigCommands};
use crate::core::menu::{Role, visible_items};
use crate::core::services::AuthService;
use crate::core::session::SessionContext;
use crate::error::{AppError, CliError, ConfigError};
use crate::storage::config::{Config, Profile};
use crate::storage::credentials::Credentials;
use crate::utils::validation::validate_url;
use std::path::PathBuf;

pub struct Dispatcher {
    config: Config,
    credentials: Credentials,
    profile_name: String,
    token_override: Option<String>,
    config_path: Option<PathBuf>,
    verbose: bool,
}

impl Dispatcher {
    // Static helper for verbose logging (used before self exists)
    pub fn print_verbose(verbose: bool, msg: &str) {
        if verbose {
            println!("Verbose: {}", msg);
        }
    }

    pub(crate) fn log_verbose(&self, msg: &str) {
        Self::print_verbose(self.verbose, msg);
    }

    pub fn new(
        config: Config,
        credentials: Credentials,
        profile_name: String,
        token_override: Option<String>,
        config_path: Option<PathBuf>,
        verbose: bool,
    ) -> Self {
        Self {
            config,
            credentials,
            profile_name,
            token_override,
            config_path,
            verbose,
        }
    }

    pub(crate) fn profile(&self) -> Result<&Profile, AppError> {
        self.config
            .get_profile(&self.profile_name)
            .ok_or_else(|| {
                ConfigError::MissingField {
                    field: format!("profiles.{}", self.profile_name),
                }
                .into()
            })
    }

    /// Session context threaded into every service: profile settings plus
    /// the bearer token (flag/env override wins over the keyring).
    pub(crate) fn session(&self) -> crate::Result<SessionContext> {
        let profile = self.profile()?;
        validate_url(&profile.api_url)?;

        let token = self
            .token_override
            .clone()
            .or_else(|| self.credentials.session_token().map(str::to_string));

        Ok(
            SessionContext::new(self.profile_name.clone(), profile.api_url.clone())
                .with_token(token)
                .with_asset_base_url(profile.asset_base_url.clone()),
        )
    }

    pub(crate) fn page_size(&self, override_value: Option<u32>) -> crate::Result<u32> {
        Ok(override_value.unwrap_or(self.profile()?.page_size()))
    }

    pub async fn dispatch(&mut self, command: Commands) -> crate::Result<()> {
        match command {
            Commands::Auth { command } => self.handle_auth_command(command).await,
            Commands::Config { command } => self.handle_config_command(command).await,
            Commands::User { command } => self.handle_user_command(command).await,
            Commands::Product { command } => self.handle_product_command(command).await,
            Commands::Company { command } => self.handle_company_command(command).await,
            Commands::Sale { command } => self.handle_sale_command(command).await,
            Commands::Menu { role_id } => self.handle_menu_command(role_id),
        }
    }

    async fn handle_auth_command(&self, command: AuthCommands) -> crate::Result<()> {
        match command {
            AuthCommands::Login { email, password } => {
                let session = self.session()?;
                let password = match password {
                    Some(password) => password,
                    None => rpassword::prompt_password("Password: ").map_err(|e| {
                        CliError::InvalidArguments(format!("Failed to read password: {}", e))
                    })?,
                };

                self.log_verbose(&format!("Logging in as {}", email));
                let service = AuthService::new(session.client()?, self.profile_name.clone());
                service.login(&email, &password).await?;
                println!("Logged in (profile '{}')", self.profile_name);
                Ok(())
            }
            AuthCommands::Logout => {
                let session = self.session()?;
                let service = AuthService::new(session.client()?, self.profile_name.clone());
                service.logout()?;
                println!("Logged out (profile '{}')", self.profile_name);
                Ok(())
            }
            AuthCommands::Status => {
                let session = self.session()?;
                let service = AuthService::new(session.client()?, self.profile_name.clone());
                let status = service.status();
                println!("Profile:       {}", status.profile_name);
                println!("API URL:       {}", session.api_url);
                println!(
                    "Authenticated: {}",
                    if status.is_authenticated { "yes" } else { "no" }
                );
                Ok(())
            }
        }
    }

    async fn handle_config_command(&mut self, command: ConfigCommands) -> crate::Result<()> {
        match command {
            ConfigCommands::Show => {
                let rendered = toml::to_string_pretty(&self.config).map_err(|e| {
                    CliError::InvalidArguments(format!("Failed to render config: {}", e))
                })?;
                println!("{}", rendered);
                Ok(())
            }
            ConfigCommands::Set { key, value } => {
                self.apply_config_value(&key, &value)?;
                self.config.save(self.config_path.clone())?;
                println!("Set {} for profile '{}'", key, self.profile_name);
                Ok(())
            }
        }
    }

    fn apply_config_value(&mut self, key: &str, value: &str) -> crate::Result<()> {
        if key == "default_profile" {
            self.config.default_profile = Some(value.to_string());
            return Ok(());
        }

        let profile = self
            .config
            .profiles
            .entry(self.profile_name.clone())
            .or_insert_with(|| Profile {
                api_url: String::new(),
                asset_base_url: None,
                page_size: None,
            });

        match key {
            "api_url" => {
                validate_url(value)?;
                profile.api_url = value.to_string();
            }
            "asset_base_url" => {
                validate_url(value)?;
                profile.asset_base_url = Some(value.to_string());
            }
            "page_size" => {
                let parsed: u32 = value.parse().map_err(|_| ConfigError::InvalidValue {
                    field: "page_size".to_string(),
                    value: value.to_string(),
                    reason: "must be a positive integer".to_string(),
                })?;
                if parsed == 0 {
                    return Err(ConfigError::InvalidValue {
                        field: "page_size".to_string(),
                        value: value.to_string(),
                        reason: "must be greater than 0".to_string(),
                    }
                    .into());
                }
                profile.page_size = Some(parsed);
            }
            other => {
                return Err(CliError::InvalidArguments(format!(
                    "Unknown config key '{}'. Use api_url, asset_base_url, page_size or default_profile",
                    other
                ))
                .into());
            }
        }
        Ok(())
    }

    fn handle_menu_command(&self, role_id: u32) -> crate::Result<()> {
        let role = Role::from_id(role_id).ok_or_else(|| {
            CliError::InvalidArguments(format!("Unknown role id: {}", role_id))
        })?;

        println!("Menu for role '{}':", role.label());
        for item in visible_items(role) {
            println!("  - {}", item.label());
        }
        Ok(())
    }
}
