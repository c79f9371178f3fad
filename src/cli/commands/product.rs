//! `invm product` command - Product management

use clap::{Subcommand, ValueEnum};
use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{confirm, format_price, open_inventory, print_success, resolve_format};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, Inventory};
use crate::entities::{Part, Product};
use crate::forms::{self, ProductEditor, ProductFields};

#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    /// List products with filtering
    List(ListArgs),

    /// Show a product and its associated parts
    Show(ShowArgs),

    /// Create a new product
    New(NewArgs),

    /// Edit a product's fields and associated parts
    Edit(EditArgs),

    /// Delete a product (only when it has no associated parts)
    Delete(DeleteArgs),
}

/// Columns to display in list output
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ListColumn {
    Id,
    Name,
    Stock,
    Price,
    Min,
    Max,
    Parts,
}

impl ListColumn {
    fn key(self) -> &'static str {
        match self {
            ListColumn::Id => "id",
            ListColumn::Name => "name",
            ListColumn::Stock => "stock",
            ListColumn::Price => "price",
            ListColumn::Min => "min",
            ListColumn::Max => "max",
            ListColumn::Parts => "parts",
        }
    }
}

/// Column definitions for product tables
pub const PRODUCT_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 6),
    ColumnDef::new("name", "NAME", 30),
    ColumnDef::new("stock", "INV", 6),
    ColumnDef::new("price", "PRICE", 12),
    ColumnDef::new("min", "MIN", 6),
    ColumnDef::new("max", "MAX", 6),
    ColumnDef::new("parts", "PARTS", 6),
];

/// Columns shown when none are requested
pub const DEFAULT_PRODUCT_COLUMNS: &[&str] = &["id", "name", "stock", "price", "parts"];

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Search by product ID or name (case-insensitive)
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Show only products that have (true) or lack (false) associated parts
    #[arg(long)]
    pub with_parts: Option<bool>,

    /// Columns to display (can specify multiple)
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<ListColumn>,

    /// Sort by field
    #[arg(long, default_value = "id")]
    pub sort: ListColumn,

    /// Reverse sort order
    #[arg(long, short = 'r')]
    pub reverse: bool,

    /// Limit number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Product ID
    pub id: u32,
}

/// Form fields shared by `new` and `edit`
#[derive(clap::Args, Debug, Default)]
pub struct ProductFieldArgs {
    /// Product name
    #[arg(long)]
    pub name: Option<String>,

    /// Price per item (e.g. 299.99)
    #[arg(long, allow_hyphen_values = true)]
    pub price: Option<String>,

    /// Inventory level
    #[arg(long, visible_alias = "inv", allow_hyphen_values = true)]
    pub stock: Option<String>,

    /// Minimum inventory level
    #[arg(long, allow_hyphen_values = true)]
    pub min: Option<String>,

    /// Maximum inventory level
    #[arg(long, allow_hyphen_values = true)]
    pub max: Option<String>,

    /// Associate a part by ID (repeatable)
    #[arg(long = "part", value_name = "PART_ID")]
    pub parts: Vec<u32>,
}

impl ProductFieldArgs {
    pub fn apply(&self, fields: &mut ProductFields) {
        if let Some(ref name) = self.name {
            fields.name = name.clone();
        }
        if let Some(ref price) = self.price {
            fields.price = price.clone();
        }
        if let Some(ref stock) = self.stock {
            fields.stock = stock.clone();
        }
        if let Some(ref min) = self.min {
            fields.min = min.clone();
        }
        if let Some(ref max) = self.max {
            fields.max = max.clone();
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    #[command(flatten)]
    pub fields: ProductFieldArgs,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Product ID
    pub id: u32,

    #[command(flatten)]
    pub fields: ProductFieldArgs,

    /// Remove an associated part by ID (repeatable)
    #[arg(long = "remove-part", value_name = "PART_ID")]
    pub remove_parts: Vec<u32>,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Product ID
    pub id: u32,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Run a product subcommand
pub fn run(cmd: ProductCommands, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let mut inventory = open_inventory(global, &config);
    let format = resolve_format(global, &config);

    match cmd {
        ProductCommands::List(args) => run_list(&inventory, args, format),
        ProductCommands::Show(args) => run_show(&inventory, args, format),
        ProductCommands::New(args) => run_new(&mut inventory, args, global, format),
        ProductCommands::Edit(args) => run_edit(&mut inventory, args, global, format),
        ProductCommands::Delete(args) => run_delete(&mut inventory, args, global, &config),
    }
}

fn run_list(inventory: &Inventory, args: ListArgs, format: OutputFormat) -> Result<()> {
    let mut products: Vec<&Product> = inventory.search_products(args.search.as_deref().unwrap_or(""));

    if let Some(with_parts) = args.with_parts {
        products.retain(|p| p.associated_parts().is_empty() != with_parts);
    }

    sort_products(&mut products, args.sort);
    if args.reverse {
        products.reverse();
    }
    if let Some(limit) = args.limit {
        products.truncate(limit);
    }

    if args.count {
        println!("{}", products.len());
        return Ok(());
    }

    let columns: Vec<&str> = if args.columns.is_empty() {
        DEFAULT_PRODUCT_COLUMNS.to_vec()
    } else {
        args.columns.iter().map(|c| c.key()).collect()
    };
    print_products(&products, format, &columns)
}

fn sort_products(products: &mut [&Product], field: ListColumn) {
    match field {
        ListColumn::Id => products.sort_by_key(|p| p.id),
        ListColumn::Name => products.sort_by_key(|p| p.name.to_lowercase()),
        ListColumn::Stock => products.sort_by_key(|p| p.stock),
        ListColumn::Price => products.sort_by(|a, b| a.price.total_cmp(&b.price)),
        ListColumn::Min => products.sort_by_key(|p| p.min),
        ListColumn::Max => products.sort_by_key(|p| p.max),
        ListColumn::Parts => products.sort_by_key(|p| p.associated_parts().len()),
    }
}

/// Build the table row for a product
pub fn product_row(product: &Product) -> TableRow {
    TableRow::new(product.id)
        .cell("id", CellValue::Id(product.id))
        .cell("name", CellValue::Text(product.name.clone()))
        .cell(
            "stock",
            CellValue::Stock {
                level: product.stock,
                min: product.min,
                max: product.max,
            },
        )
        .cell("price", CellValue::Price(product.price))
        .cell("min", CellValue::Number(product.min as i64))
        .cell("max", CellValue::Number(product.max as i64))
        .cell(
            "parts",
            CellValue::Number(product.associated_parts().len() as i64),
        )
}

/// Print a list of products in any output format
pub fn print_products(products: &[&Product], format: OutputFormat, columns: &[&str]) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(products).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(products).into_diagnostic()?);
        }
        _ => {
            let rows: Vec<TableRow> = products.iter().map(|p| product_row(p)).collect();
            TableFormatter::new(PRODUCT_COLUMNS, "product").output(&rows, format, columns);
        }
    }
    Ok(())
}

/// Print a single product in any output format
pub fn print_product(product: &Product, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Yaml => print!("{}", serde_yml::to_string(product).into_diagnostic()?),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(product).into_diagnostic()?)
        }
        OutputFormat::Id => println!("{}", product.id),
        OutputFormat::Tsv | OutputFormat::Csv | OutputFormat::Md => {
            print_products(&[product], format, DEFAULT_PRODUCT_COLUMNS)?
        }
        OutputFormat::Auto => print_product_detail(product),
    }
    Ok(())
}

/// Render associated parts as a rounded table
pub fn associated_parts_table(parts: &[Part]) -> String {
    if parts.is_empty() {
        return "No parts associated yet with this product.".to_string();
    }
    let mut builder = Builder::default();
    builder.push_record(["Part ID", "Part Name", "Inventory Level", "Price/Cost Per Item"]);
    for part in parts {
        builder.push_record([
            part.id.to_string(),
            part.name.clone(),
            part.stock.to_string(),
            format_price(part.price),
        ]);
    }
    builder.build().with(Style::rounded()).to_string()
}

/// Pretty detail view
pub fn print_product_detail(product: &Product) {
    println!("{}", style("─".repeat(60)).dim());
    println!("{}: {}", style("ID").bold(), style(product.id).cyan());
    println!("{}: {}", style("Name").bold(), style(&product.name).yellow());
    println!("{}: {}", style("Price").bold(), format_price(product.price));
    println!("{}: {}", style("Inv").bold(), product.stock);
    println!("{}: {}", style("Min").bold(), product.min);
    println!("{}: {}", style("Max").bold(), product.max);
    println!();
    println!("{}", style("Associated Parts").bold());
    println!("{}", associated_parts_table(product.associated_parts()));
    println!("{}", style("─".repeat(60)).dim());
}

fn run_show(inventory: &Inventory, args: ShowArgs, format: OutputFormat) -> Result<()> {
    let product = inventory
        .lookup_product(args.id)
        .ok_or(forms::FormError::ProductNotFound(args.id))?;
    print_product(product, format)
}

fn run_new(
    inventory: &mut Inventory,
    args: NewArgs,
    global: &GlobalOpts,
    format: OutputFormat,
) -> Result<()> {
    let mut fields = ProductFields::default();
    args.fields.apply(&mut fields);
    let draft = fields.parse()?;

    let mut editor = ProductEditor::create();
    for part_id in &args.fields.parts {
        editor.add_part(inventory, *part_id)?;
    }
    let id = editor.submit(inventory, &draft)?;

    print_success(global, &format!("Created product {}", style(id).cyan()));
    if let Some(product) = inventory.lookup_product(id) {
        print_product(product, format)?;
    }
    Ok(())
}

fn run_edit(
    inventory: &mut Inventory,
    args: EditArgs,
    global: &GlobalOpts,
    format: OutputFormat,
) -> Result<()> {
    let mut editor = ProductEditor::edit(inventory, args.id)?;
    let mut fields = inventory
        .lookup_product(args.id)
        .map(ProductFields::from_product)
        .unwrap_or_default();
    args.fields.apply(&mut fields);
    let draft = fields.parse()?;

    for part_id in &args.remove_parts {
        if !editor.remove_part(*part_id) {
            tracing::warn!(part_id, product = args.id, "part was not associated");
        }
    }
    for part_id in &args.fields.parts {
        editor.add_part(inventory, *part_id)?;
    }
    let id = editor.submit(inventory, &draft)?;

    print_success(global, &format!("Updated product {}", style(id).cyan()));
    if let Some(product) = inventory.lookup_product(id) {
        print_product(product, format)?;
    }
    Ok(())
}

fn run_delete(
    inventory: &mut Inventory,
    args: DeleteArgs,
    global: &GlobalOpts,
    config: &Config,
) -> Result<()> {
    let product = inventory
        .lookup_product(args.id)
        .ok_or(forms::FormError::ProductNotFound(args.id))?;

    // products with parts are rejected below without a prompt
    if product.associated_parts().is_empty() && !args.yes && config.confirm_deletes() {
        let prompt = format!("Delete product {} ({})?", product.id, product.name);
        if !confirm(&prompt)? {
            println!("Aborted.");
            return Ok(());
        }
    }

    let removed = forms::delete_product(inventory, args.id)?;
    print_success(
        global,
        &format!("Deleted product {} ({})", style(removed.id).cyan(), removed.name),
    );
    Ok(())
}
