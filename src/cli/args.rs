use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "fruit-cart")]
#[command(about = "A shopping cart for a small fruit catalog")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Catalog file path (JSON), overrides CART_CATALOG_PATH
    #[arg(short, long, global = true)]
    pub catalog: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the products in the catalog
    Catalog,
    /// Start an interactive cart session
    Shell,
    /// Run session commands from a script file ('-' reads stdin)
    Run {
        /// Script file path
        file: String,
    },
    /// Run session commands given as arguments, e.g. "add 990" "pay 3"
    Exec {
        /// Session commands, one per argument
        #[arg(required = true)]
        commands: Vec<String>,
    },
}
