//! gbs-stock - CLI for sheet-stock yield and remnant tracking.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use gbs_stock::{
    append_orders_file, best_orientation_cut, load_stock_file, save_stock_file, sequential_cut,
    CutStrategy, LedgerConfig, MatchMode, OrderRequest, SheetSize, StockInput, StockKey, Unit,
};

/// Track corrugated sheet stock, order yields and remnants.
#[derive(Parser, Debug)]
#[command(name = "gbs-stock")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Ledger configuration (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Which stock entry to use. The ledger's match mode decides which fields count.
#[derive(clap::Args, Debug)]
struct SheetSelector {
    /// Sheet model label (matching by model)
    #[arg(long)]
    model: Option<String>,
    /// Sheet width (matching by dimensions)
    #[arg(long)]
    sheet_width: Option<f64>,
    /// Sheet length (matching by dimensions)
    #[arg(long)]
    sheet_length: Option<f64>,
    /// Unit of the sheet size (mm, cm, m)
    #[arg(long, default_value = "m", value_parser = parse_unit)]
    sheet_unit: Unit,
    /// Paper type of the stock entry
    #[arg(long)]
    paper: String,
    /// Basis weight of the stock entry (g/m²)
    #[arg(long)]
    gsm: f64,
}

impl SheetSelector {
    fn key(&self, mode: MatchMode) -> gbs_stock::Result<StockKey> {
        let size = match (self.sheet_width, self.sheet_length) {
            (Some(width), Some(length)) => Some(SheetSize::new(
                self.sheet_unit.to_mm(width),
                self.sheet_unit.to_mm(length),
            )),
            _ => None,
        };
        StockKey::for_mode(mode, self.model.as_deref(), size, &self.paper, self.gsm)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show how a cut size lays out on a base sheet
    Yield {
        /// Base sheet width
        #[arg(long)]
        base_width: f64,
        /// Base sheet length
        #[arg(long)]
        base_length: f64,
        /// Cut piece width
        #[arg(long)]
        cut_width: f64,
        /// Cut piece length
        #[arg(long)]
        cut_length: f64,
        /// Unit of all sizes (mm, cm, m)
        #[arg(long, default_value = "mm", value_parser = parse_unit)]
        unit: Unit,
        /// Try both orientations and keep the better one
        #[arg(long)]
        best_orientation: bool,
    },

    /// Add sheets to the stock file (creates the entry if needed)
    AddStock {
        /// Stock CSV file
        #[arg(short, long)]
        stock: PathBuf,
        /// Sheet model label
        #[arg(long)]
        model: String,
        /// Sheet width
        #[arg(long)]
        width: f64,
        /// Sheet length
        #[arg(long)]
        length: f64,
        /// Unit of width and length (mm, cm, m)
        #[arg(long, default_value = "m", value_parser = parse_unit)]
        unit: Unit,
        /// Paper type
        #[arg(long)]
        paper: String,
        /// Basis weight (g/m²)
        #[arg(long)]
        gsm: f64,
        /// Sheets to add (negative to remove)
        #[arg(long, allow_hyphen_values = true)]
        quantity: i64,
        /// Price per kg
        #[arg(long)]
        price: f64,
    },

    /// Compute an order against the stock file, and optionally confirm it
    Order {
        /// Stock CSV file
        #[arg(short, long)]
        stock: PathBuf,
        /// Order history CSV file (appended on confirm)
        #[arg(long, default_value = "pedidos.csv")]
        history: PathBuf,
        /// Order reference
        #[arg(long)]
        order_ref: String,
        /// Customer name
        #[arg(long)]
        customer: String,
        /// Order description
        #[arg(long, default_value = "")]
        description: String,
        /// Declared order value
        #[arg(long, default_value = "0")]
        value: f64,
        /// Cut piece width
        #[arg(long)]
        cut_width: f64,
        /// Cut piece length
        #[arg(long)]
        cut_length: f64,
        /// Unit of the cut size (mm, cm, m)
        #[arg(long, default_value = "m", value_parser = parse_unit)]
        unit: Unit,
        /// Finished pieces required
        #[arg(long)]
        quantity: u32,
        #[command(flatten)]
        sheet: SheetSelector,
        /// Cut against the configured reference sheet, best orientation
        #[arg(long)]
        reference_sheet: bool,
        /// Apply the order to the stock file
        #[arg(long)]
        confirm: bool,
        /// Print the proposal as JSON
        #[arg(long)]
        json: bool,
    },

    /// Correct the price per kg of a stock entry, e.g. a new remnant
    SetPrice {
        /// Stock CSV file
        #[arg(short, long)]
        stock: PathBuf,
        #[command(flatten)]
        sheet: SheetSelector,
        /// New price per kg
        #[arg(long)]
        price: f64,
    },

    /// Print inventory totals
    Report {
        /// Stock CSV file
        #[arg(short, long)]
        stock: PathBuf,
    },
}

fn parse_unit(s: &str) -> std::result::Result<Unit, String> {
    Unit::from_str_name(s).ok_or_else(|| format!("unknown unit '{}', expected mm, cm or m", s))
}

fn load_config(path: Option<&PathBuf>) -> Result<LedgerConfig> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            LedgerConfig::from_json(&json)
                .with_context(|| format!("Failed to parse {}", path.display()))
        }
        None => Ok(LedgerConfig::default()),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = load_config(args.config.as_ref())?;

    match args.command {
        Command::Yield {
            base_width,
            base_length,
            cut_width,
            cut_length,
            unit,
            best_orientation,
        } => {
            let base = SheetSize::new(unit.to_mm(base_width), unit.to_mm(base_length));
            let piece = SheetSize::new(unit.to_mm(cut_width), unit.to_mm(cut_length));
            let layout = if best_orientation {
                best_orientation_cut(base, piece)?
            } else {
                sequential_cut(base, piece, config.remnant_policy)?
            };

            println!("{}", layout);
            for remnant in &layout.remnants {
                println!("  remnant {}", remnant);
            }
        }

        Command::AddStock {
            stock,
            model,
            width,
            length,
            unit,
            paper,
            gsm,
            quantity,
            price,
        } => {
            let (mut ledger, _) = load_stock_file(&stock, config)
                .with_context(|| format!("Failed to load {}", stock.display()))?;

            let entry = ledger.add_or_update_stock(&StockInput {
                model,
                width,
                length,
                unit,
                paper_type: paper,
                basis_weight: gsm,
                quantity,
                price_per_kg: price,
            })?;

            save_stock_file(&stock, &ledger)
                .with_context(|| format!("Failed to write {}", stock.display()))?;

            info!(
                "{} {}: {} sheet(s), {:.3} kg, value {:.2}",
                entry.model,
                entry.dimensions_string(),
                entry.sheet_count(),
                entry.total_weight_kg(),
                entry.total_value()
            );
        }

        Command::Order {
            stock,
            history,
            order_ref,
            customer,
            description,
            value,
            cut_width,
            cut_length,
            unit,
            quantity,
            sheet,
            reference_sheet,
            confirm,
            json,
        } => {
            let match_mode = config.match_mode;
            let (mut ledger, _) = load_stock_file(&stock, config)
                .with_context(|| format!("Failed to load {}", stock.display()))?;

            let request = OrderRequest {
                order_ref,
                customer,
                description,
                order_value: value,
                cut_width,
                cut_length,
                unit,
                quantity,
                stock_key: sheet.key(match_mode)?,
                strategy: if reference_sheet {
                    CutStrategy::ReferenceSheet
                } else {
                    CutStrategy::Sequential
                },
            };

            let proposal = match ledger.compute_order(&request) {
                Ok(proposal) => proposal,
                Err(err) => {
                    error!("{}", err);
                    anyhow::bail!("Order {} rejected", request.order_ref);
                }
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&proposal)?);
            } else {
                println!("{}", proposal.layout);
                println!(
                    "Sheets needed: {} ({} surplus piece(s))",
                    proposal.sheets_needed,
                    proposal.surplus_pieces()
                );
                println!("Finished weight: {:.3} kg", proposal.finished_weight_kg);
                for remnant in &proposal.remnants {
                    println!("  remnant {}", remnant);
                }
            }

            if let Some(shortage) = &proposal.shortage {
                warn!("{}", shortage);
            }

            if !confirm {
                info!("Not confirmed, stock unchanged");
                return Ok(());
            }

            let outcome = ledger.commit_order(proposal)?;

            save_stock_file(&stock, &ledger)
                .with_context(|| format!("Failed to write {}", stock.display()))?;
            append_orders_file(&history, std::slice::from_ref(&outcome.record))
                .with_context(|| format!("Failed to write {}", history.display()))?;

            info!(
                "Order {} confirmed, {} entr(ies) updated",
                outcome.record.order_ref,
                outcome.touched.len()
            );
        }

        Command::SetPrice {
            stock,
            sheet,
            price,
        } => {
            let key = sheet.key(config.match_mode)?;
            let (mut ledger, _) = load_stock_file(&stock, config)
                .with_context(|| format!("Failed to load {}", stock.display()))?;

            let entry = ledger.set_price(&key, price)?;

            save_stock_file(&stock, &ledger)
                .with_context(|| format!("Failed to write {}", stock.display()))?;

            info!(
                "{} {}: price {}/kg, value {:.2}",
                entry.model,
                entry.dimensions_string(),
                entry.price_per_kg(),
                entry.total_value()
            );
        }

        Command::Report { stock } => {
            let (ledger, report) = load_stock_file(&stock, config)
                .with_context(|| format!("Failed to load {}", stock.display()))?;

            for err in &report.errors {
                error!("{}", err);
            }

            print!("{}", ledger.summary());
        }
    }

    Ok(())
}
