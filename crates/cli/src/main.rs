//! Interactive shell for the shop: dashboard, catalog, billing, sale
//! history, revenue chart and the advisory assistant. Takes no arguments;
//! all state lives in the SQLite file next to the binary.

use advisor::{AdvisorClient, AdvisorConfig, ShopDigest};
use anyhow::Result;
use chrono::{Duration, Utc};
use console::style;
use domain::{format_usd, Bill, DomainError, Product};
use std::io::{self, BufRead, Write};
use storage::InventoryStore;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

use commands::{Command, RevenueRange};

const DB_FILE: &str = "inventory.db";

const HELP: &str = "\
Commands:
  stats                     dashboard stat cards
  products                  list the catalog
  search <term>             find products by name or SKU
  add                       add a product (prompts for fields)
  edit <sku>                edit a product's name/price
  restock <sku> <delta>     adjust stock by a signed amount
  delete <sku>              remove a product
  bill                      show the current bill
  bill add <sku> [qty]      put units on the bill
  bill remove <sku>         drop a line from the bill
  bill clear                empty the bill
  checkout                  commit the bill as a sale
  tx                        list recorded sales
  tx <id>                   sale details
  tx delete <id>            delete a sale record (stock is not restored)
  revenue [week|month|year] revenue chart for the window
  ask <question>            ask the inventory advisor
  quit                      leave";

struct App {
    store: InventoryStore,
    bill: Bill,
    advisor: Option<AdvisorClient>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let store = InventoryStore::open(DB_FILE).await?;
    debug!("database ready at {}", DB_FILE);

    let mut app = App {
        store,
        bill: Bill::new(),
        advisor: None,
    };

    println!("{}", style("Shop Inventory Management").bold());
    println!("Type 'help' for the list of commands.\n");

    loop {
        print!("shop> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match Command::parse(line) {
            Ok(Command::Quit) => break,
            Ok(command) => {
                if let Err(err) = app.run(command).await {
                    report_error(&err);
                }
            }
            Err(err) => println!("{}", style(err).yellow()),
        }
    }

    Ok(())
}

/// Every error becomes one immediate human-readable line; nothing is
/// logged-and-swallowed or retried.
fn report_error(err: &anyhow::Error) {
    if let Some(domain_err) = err.root_cause().downcast_ref::<DomainError>() {
        println!("{}", style(format!("Error: {}", domain_err)).red());
    } else {
        println!("{}", style(format!("Unexpected error: {:#}", err)).red());
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn confirm(question: &str) -> Result<bool> {
    let answer = prompt(&format!("{} [y/N]", question))?;
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

impl App {
    async fn run(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Help => println!("{}", HELP),
            Command::Quit => {}

            Command::Stats => {
                let stats = self.store.dashboard_stats().await?;
                print!("{}", render::stats_summary(&stats));
            }

            Command::Products => {
                let products = self.store.list_products().await?;
                if products.is_empty() {
                    println!("The catalog is empty.");
                } else {
                    render::product_table(&products).printstd();
                }
            }

            Command::Search { term } => {
                let products = self.store.search_products(&term).await?;
                if products.is_empty() {
                    println!("No products match '{}'.", term);
                } else {
                    render::product_table(&products).printstd();
                }
            }

            Command::Add => self.add_product_form().await?,
            Command::Edit { sku } => self.edit_product_form(&sku).await?,

            Command::Restock { sku, delta } => {
                self.store.adjust_quantity(&sku, delta).await?;
                if let Some(product) = self.store.get_product(&sku).await? {
                    println!("'{}' now has {} units.", product.name, product.quantity);
                }
            }

            Command::Delete { sku } => {
                if !confirm(&format!("Delete product with SKU {}?", sku))? {
                    return Ok(());
                }
                if self.store.delete_product(&sku).await? {
                    println!("Product deleted.");
                } else {
                    println!("No product with SKU '{}'.", sku);
                }
            }

            Command::ShowBill => {
                if self.bill.is_empty() {
                    println!("The bill is empty.");
                } else {
                    render::bill_table(&self.bill).printstd();
                }
            }

            Command::BillAdd { sku, quantity } => {
                let product = self
                    .store
                    .get_product(&sku)
                    .await?
                    .ok_or_else(|| DomainError::NotFound(format!("product '{}'", sku)))?;

                // Courtesy check against current stock; checkout re-verifies
                // under its transaction either way.
                let wanted = self.bill.quantity_of(&sku) + quantity;
                if wanted > product.quantity {
                    println!(
                        "{}",
                        style(format!(
                            "Cannot add more '{}'. Only {} available in stock.",
                            product.name, product.quantity
                        ))
                        .yellow()
                    );
                    return Ok(());
                }

                self.bill.add(&product, quantity)?;
                println!(
                    "Added {} x '{}'. Bill total: {}",
                    quantity,
                    product.name,
                    format_usd(self.bill.total())
                );
            }

            Command::BillRemove { sku } => {
                if self.bill.remove(&sku) {
                    println!("Removed. Bill total: {}", format_usd(self.bill.total()));
                } else {
                    println!("'{}' is not on the bill.", sku);
                }
            }

            Command::BillClear => {
                self.bill.clear();
                println!("Bill cleared.");
            }

            Command::Checkout => {
                let tx = self.store.checkout(&self.bill).await?;
                self.bill.clear();
                println!(
                    "{}",
                    style(format!(
                        "Checkout complete. Transaction {} recorded ({}).",
                        tx.id,
                        format_usd(tx.total)
                    ))
                    .green()
                );
            }

            Command::Transactions => {
                let transactions = self.store.list_transactions().await?;
                if transactions.is_empty() {
                    println!("No transactions recorded yet.");
                } else {
                    render::transactions_table(&transactions).printstd();
                }
            }

            Command::ViewTransaction { id } => match self.store.get_transaction(id).await? {
                Some(tx) => print!("{}", render::transaction_details(&tx)),
                None => println!("No transaction with id {}.", id),
            },

            Command::DeleteTransaction { id } => {
                if !confirm(&format!(
                    "Delete transaction {}? This will not modify product stock.",
                    id
                ))? {
                    return Ok(());
                }
                if self.store.delete_transaction(id).await? {
                    println!("Transaction {} deleted.", id);
                } else {
                    println!("No transaction with id {}.", id);
                }
            }

            Command::Revenue { range } => self.show_revenue(range).await?,
            Command::Ask { question } => self.ask_advisor(&question).await?,
        }

        Ok(())
    }

    /// The add-product form, one field per line like the classic entry
    /// form. All fields are required.
    async fn add_product_form(&mut self) -> Result<()> {
        let sku = prompt("SKU")?;
        let name = prompt("Name")?;
        let price = prompt("Price")?;
        let quantity = prompt("Quantity")?;

        if sku.is_empty() || name.is_empty() || price.is_empty() || quantity.is_empty() {
            return Err(DomainError::InvalidInput("All fields are required".into()).into());
        }

        let price: f64 = price.parse().map_err(|_| {
            DomainError::InvalidInput("Price and Quantity must be valid numbers".into())
        })?;
        let quantity: i64 = quantity.parse().map_err(|_| {
            DomainError::InvalidInput("Price and Quantity must be valid numbers".into())
        })?;

        let product = Product::new(sku, name, price, quantity)?;
        self.store.add_product(&product).await?;
        println!("{}", style("Product added successfully.").green());

        Ok(())
    }

    /// Edit display name and price; empty input keeps the current value.
    async fn edit_product_form(&mut self, sku: &str) -> Result<()> {
        let current = self
            .store
            .get_product(sku)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("product '{}'", sku)))?;

        let name = prompt(&format!("Name [{}]", current.name))?;
        let price_input = prompt(&format!("Price [{}]", format_usd(current.price)))?;

        let name = if name.is_empty() { current.name } else { name };
        let price = if price_input.is_empty() {
            current.price
        } else {
            price_input.parse().map_err(|_| {
                DomainError::InvalidInput("Price must be a valid number".into())
            })?
        };

        self.store.update_product(sku, &name, price).await?;
        println!("{}", style("Product updated.").green());

        Ok(())
    }

    async fn show_revenue(&self, range: RevenueRange) -> Result<()> {
        let end = Utc::now().date_naive();
        let start = end - Duration::days(range.days());
        let series = self.store.revenue_by_day(start, end).await?;

        println!("Revenue over the last {}:", range.label());
        print!("{}", render::revenue_chart(&series));

        Ok(())
    }

    /// Advisory conversation. Failures are rendered inline in the chat
    /// and never abort the shell.
    async fn ask_advisor(&mut self, question: &str) -> Result<()> {
        let client = match self.advisor.clone() {
            Some(client) => client,
            None => match AdvisorConfig::from_env().and_then(AdvisorClient::new) {
                Ok(client) => {
                    self.advisor = Some(client.clone());
                    client
                }
                Err(err) => {
                    println!("{}", style(format!("Advisor: {}", err)).yellow());
                    return Ok(());
                }
            },
        };

        let digest = self.build_digest().await?;
        println!("Asking the advisor...");

        match client.ask(question, &digest).await {
            Ok(answer) => println!("Advisor: {}\n", answer),
            Err(err) => println!("{}", style(format!("Advisor: {}", err)).yellow()),
        }

        Ok(())
    }

    async fn build_digest(&self) -> Result<ShopDigest> {
        let low_stock = self
            .store
            .low_stock_items(10)
            .await?
            .into_iter()
            .map(|p| (p.name, p.quantity))
            .collect();
        let top_sellers = self
            .store
            .top_sellers(10)
            .await?
            .into_iter()
            .map(|s| (s.name, s.units))
            .collect();

        Ok(ShopDigest {
            low_stock,
            top_sellers,
        })
    }
}
