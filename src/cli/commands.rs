use std::io::{BufRead, BufReader};

use anyhow::{Context, Result};
use console::{style, Emoji};
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::{
    cli::{
        args::{Args, Commands},
        session::{clean_line, SessionCommand, HELP_TEXT},
    },
    models::{catalog::Catalog, payment::PaymentOutcome, product::ProductId},
    services::CartStore,
    utils::{
        formatting::{format_cart_table, format_catalog_table, format_money, format_payment_outcome, format_receipt},
        Config,
    },
};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️ ", "");
static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "");
static CART: Emoji<'_, '_> = Emoji("🛒 ", "");

/// Whether a session should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionFlow {
    Continue,
    Stop,
}

pub struct CliApp {
    store: CartStore,
    config: Config,
    interactive: bool,
}

impl CliApp {
    pub fn new(config: Config) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_json_file(path)
                .with_context(|| format!("Failed to load catalog from {}", path))?,
            None => {
                if config.is_production() {
                    warn!("No CART_CATALOG_PATH configured, using the built-in catalog");
                }
                Catalog::seed()
            }
        };

        info!("Loaded catalog with {} products", catalog.len());
        Ok(Self::with_store(CartStore::new(catalog), config))
    }

    pub fn with_store(store: CartStore, config: Config) -> Self {
        Self {
            store,
            config,
            interactive: false,
        }
    }

    pub fn store(&self) -> &CartStore {
        &self.store
    }

    pub fn run(&mut self, args: Args) -> Result<()> {
        match args.command {
            Commands::Catalog => {
                self.show_catalog();
                Ok(())
            }
            Commands::Shell => self.run_shell(),
            Commands::Run { file } => self.run_file(&file),
            Commands::Exec { commands } => self.run_commands(&commands),
        }
    }

    fn run_shell(&mut self) -> Result<()> {
        self.interactive = true;
        println!("{} {}", CART, style("Fruit Cart").bold().cyan());
        println!("Type {} for a list of commands", style("help").cyan());

        let theme = ColorfulTheme::default();

        loop {
            let line: String = Input::with_theme(&theme)
                .with_prompt("cart")
                .allow_empty(true)
                .interact_text()?;

            let Some(line) = clean_line(&line) else {
                continue;
            };

            match line.parse::<SessionCommand>() {
                Ok(command) => {
                    if self.execute(command)? == SessionFlow::Stop {
                        break;
                    }
                }
                Err(e) => println!("{} {}", CROSS, style(&e).red()),
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    fn run_file(&mut self, file: &str) -> Result<()> {
        if file == "-" {
            let stdin = std::io::stdin();
            self.run_script(stdin.lock()).map(|_| ())
        } else {
            let handle = std::fs::File::open(file)
                .with_context(|| format!("Failed to open script {}", file))?;
            self.run_script(BufReader::new(handle)).map(|_| ())
        }
    }

    fn run_commands(&mut self, commands: &[String]) -> Result<()> {
        for (index, raw) in commands.iter().enumerate() {
            let Some(line) = clean_line(raw) else {
                continue;
            };

            let command = line
                .parse::<SessionCommand>()
                .with_context(|| format!("Argument {}: '{}'", index + 1, raw))?;

            if self.execute(command)? == SessionFlow::Stop {
                break;
            }
        }
        Ok(())
    }

    /// Executes a script of session commands; returns how many commands ran.
    pub fn run_script<R: BufRead>(&mut self, reader: R) -> Result<usize> {
        let mut executed = 0;

        for (number, line) in reader.lines().enumerate() {
            let line = line.context("Failed to read script")?;
            let Some(line) = clean_line(&line) else {
                continue;
            };

            let command = line
                .parse::<SessionCommand>()
                .with_context(|| format!("Line {}: '{}'", number + 1, line))?;

            executed += 1;
            if self.execute(command)? == SessionFlow::Stop {
                break;
            }
        }

        debug!("Script finished after {} commands", executed);
        Ok(executed)
    }

    pub fn execute(&mut self, command: SessionCommand) -> Result<SessionFlow> {
        debug!("Executing {:?}", command);

        match command {
            SessionCommand::Catalog => self.show_catalog(),
            SessionCommand::Show => self.show_cart(),
            SessionCommand::Add(id) => {
                if self.ensure_product(id) {
                    self.store.add_to_cart(id);
                    self.report_quantity(id, "Added");
                }
            }
            SessionCommand::Increase(id) => {
                if self.ensure_product(id) {
                    self.store.increase_quantity(id);
                    self.report_quantity(id, "Increased");
                }
            }
            SessionCommand::Decrease(id) => {
                if self.ensure_product(id) {
                    if self.store.contains(id) {
                        self.store.decrease_quantity(id);
                        self.report_quantity(id, "Decreased");
                    } else {
                        println!("{} Product {} is not in the cart", INFO, id);
                    }
                }
            }
            SessionCommand::Remove(id) => {
                if self.ensure_product(id) {
                    self.store.remove_from_cart(id);
                    println!("{} Removed product {} from the cart", CHECKMARK, id);
                }
            }
            SessionCommand::Total => self.show_total(),
            SessionCommand::Empty => self.handle_empty()?,
            SessionCommand::Pay(amount) => self.handle_pay(amount),
            SessionCommand::Export => {
                let json = serde_json::to_string_pretty(&self.store.snapshot())
                    .context("Failed to serialize cart")?;
                println!("{}", json);
            }
            SessionCommand::Receipt => match self.store.last_receipt() {
                Some(receipt) => {
                    println!("{} {}", INFO, style("Last Receipt").bold().cyan());
                    println!("{}", format_receipt(receipt, &self.config.currency_symbol));
                }
                None => println!("{} No payment has been completed yet", INFO),
            },
            SessionCommand::Help => println!("{}", HELP_TEXT),
            SessionCommand::Quit => return Ok(SessionFlow::Stop),
        }

        Ok(SessionFlow::Continue)
    }

    fn ensure_product(&self, id: ProductId) -> bool {
        if self.store.find_product(id).is_some() {
            true
        } else {
            println!("{} No product with id {}", WARNING, style(id).yellow());
            warn!("Unknown product id: {}", id);
            false
        }
    }

    fn report_quantity(&self, id: ProductId, action: &str) {
        if let Some(product) = self.store.find_product(id) {
            println!(
                "{} {} {} (quantity {})",
                CHECKMARK,
                action,
                style(&product.name).green(),
                product.quantity_in_cart
            );
        }
    }

    fn show_catalog(&self) {
        println!("{} {}", INFO, style("Catalog").bold().cyan());
        println!("{}", format_catalog_table(self.store.catalog(), &self.config.currency_symbol));
    }

    fn show_cart(&self) {
        if self.store.is_empty() {
            println!("{} The cart is empty", INFO);
            return;
        }

        let snapshot = self.store.snapshot();
        println!("{} {}", CART, style(format!("{} items in cart", snapshot.item_count)).bold());
        println!("{}", format_cart_table(&snapshot.lines, &self.config.currency_symbol));
        self.show_total();
    }

    fn show_total(&self) {
        let symbol = &self.config.currency_symbol;
        println!(
            "{}: {}",
            style("Total").bold(),
            style(format_money(self.store.cart_total(), symbol)).green()
        );

        let pending = self.store.pending_payment();
        if pending > Decimal::ZERO {
            println!("{}: {}", style("Paid so far").bold(), format_money(pending, symbol));
        }
    }

    fn handle_empty(&mut self) -> Result<()> {
        if self.interactive && !self.store.is_empty() {
            let theme = ColorfulTheme::default();
            let confirm = Confirm::with_theme(&theme)
                .with_prompt("Are you sure you want to empty the cart?")
                .default(false)
                .interact()?;

            if !confirm {
                println!("Empty cart cancelled");
                return Ok(());
            }
        }

        self.store.empty_cart();
        println!("{} Cart emptied", CHECKMARK);
        info!("Cart emptied");
        Ok(())
    }

    fn handle_pay(&mut self, amount: Decimal) {
        let remaining = self.store.pay(amount);
        let outcome = PaymentOutcome::from(remaining);

        println!("{}", format_payment_outcome(&outcome, &self.config.currency_symbol));
        match outcome {
            PaymentOutcome::BalanceDue(_) => info!("Partial payment of {}", amount),
            _ => info!("Payment completed ({})", outcome),
        }

        if self.store.is_empty() && outcome.is_complete() {
            warn!("Payment of {} returned in full, the cart is empty", amount);
        }
    }
}
