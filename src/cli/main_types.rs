use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "loja-cli")]
#[command(about = "Command line admin tool for the Loja retail-management API")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    /// Bearer token override; skips the keyring entirely
    #[arg(long, global = true, env = "LOJA_TOKEN")]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Authentication commands
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// User administration
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Product catalog management
    Product {
        #[command(subcommand)]
        command: ProductCommands,
    },
    /// Company profile management
    Company {
        #[command(subcommand)]
        command: CompanyCommands,
    },
    /// Sales history
    Sale {
        #[command(subcommand)]
        command: SaleCommands,
    },
    /// Show the admin menu entries visible to a role
    Menu {
        /// Backend role id (1 admin, 2 manager, 3 seller)
        #[arg(long)]
        role_id: u32,
    },
}

#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Login and store the bearer token
    Login {
        #[arg(long)]
        email: String,
        /// Read from a prompt when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Logout and clear the stored token
    Logout,
    /// Show authentication status
    Status,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set a configuration value for the active profile
    Set {
        /// One of: api_url, asset_base_url, page_size, default_profile
        key: String,
        value: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List users
    List {
        /// Search term
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value = "1")]
        page: u32,
        /// Overrides the profile's page size
        #[arg(long)]
        page_size: Option<u32>,
        /// Filter by role id
        #[arg(long)]
        role_id: Option<u32>,
    },
    /// Show one user
    Show { id: u32 },
    /// Create a user
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Read from a prompt when omitted
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        cpf: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        role_id: Option<u32>,
    },
    /// Update a user; omitted flags keep their current values
    Update {
        id: u32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Left out means the password stays unchanged
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        cpf: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        role_id: Option<u32>,
    },
    /// Deactivate a user (asks for confirmation)
    Deactivate {
        id: u32,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Reactivate a user (asks for confirmation)
    Reactivate {
        id: u32,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    /// List products
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long)]
        page_size: Option<u32>,
        /// Filter by category id
        #[arg(long)]
        category_id: Option<u32>,
    },
    /// Show one product
    Show { id: u32 },
    /// Create a product
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category_id: Option<u32>,
        /// Stored path or absolute URL
        #[arg(long)]
        image: Option<String>,
    },
    /// Update a product; omitted flags keep their current values
    Update {
        id: u32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category_id: Option<u32>,
        #[arg(long)]
        image: Option<String>,
    },
    /// Deactivate a product (asks for confirmation)
    Deactivate {
        id: u32,
        #[arg(long)]
        yes: bool,
    },
    /// Reactivate a product (asks for confirmation)
    Reactivate {
        id: u32,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum CompanyCommands {
    /// Show the company profile
    Show { id: u32 },
    /// Update the company profile; omitted flags keep their current values
    Update {
        id: u32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        cnpj: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        whatsapp: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        logo: Option<String>,
        #[arg(long)]
        theme_color: Option<String>,
        /// PIX key stored inside the payment-keys blob
        #[arg(long)]
        pix: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum SaleCommands {
    /// List sales
    List {
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long)]
        page_size: Option<u32>,
    },
}
