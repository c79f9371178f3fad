//! `invm part` command - Part management

use clap::{Subcommand, ValueEnum};
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{confirm, format_price, open_inventory, print_success, resolve_format};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, Inventory};
use crate::entities::{Part, PartSource, SourceKind};
use crate::forms::{self, FormMode, PartFields};

#[derive(Subcommand, Debug)]
pub enum PartCommands {
    /// List parts with filtering
    List(ListArgs),

    /// Show a part's details
    Show(ShowArgs),

    /// Create a new part
    New(NewArgs),

    /// Edit a part's fields
    Edit(EditArgs),

    /// Delete a part
    Delete(DeleteArgs),
}

/// Source filter for list command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SourceFilter {
    InHouse,
    Outsourced,
    All,
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
    Source,
    Detail,
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
            ListColumn::Source => "source",
            ListColumn::Detail => "detail",
        }
    }
}

/// Column definitions for part tables
pub const PART_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 6),
    ColumnDef::new("name", "NAME", 30),
    ColumnDef::new("stock", "INV", 6),
    ColumnDef::new("price", "PRICE", 12),
    ColumnDef::new("min", "MIN", 6),
    ColumnDef::new("max", "MAX", 6),
    ColumnDef::new("source", "SOURCE", 12),
    ColumnDef::new("detail", "MACHINE/COMPANY", 24),
];

/// Columns shown when none are requested
pub const DEFAULT_PART_COLUMNS: &[&str] = &["id", "name", "stock", "price", "source", "detail"];

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Search by part ID or name (case-insensitive)
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Filter by source
    #[arg(long, default_value = "all")]
    pub source: SourceFilter,

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
    /// Part ID
    pub id: u32,
}

/// Form fields shared by `new` and `edit`. Values stay text so the form's own
/// parsing reports bad numbers.
#[derive(clap::Args, Debug, Default)]
pub struct PartFieldArgs {
    /// Part name
    #[arg(long)]
    pub name: Option<String>,

    /// Price/cost per item (e.g. 15.00)
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

    /// Part is made in-house (requires --machine-id)
    #[arg(long)]
    pub in_house: bool,

    /// Part is outsourced (requires --company)
    #[arg(long)]
    pub outsourced: bool,

    /// Machine ID for in-house parts (must be greater than 999)
    #[arg(long, allow_hyphen_values = true)]
    pub machine_id: Option<String>,

    /// Company name for outsourced parts
    #[arg(long)]
    pub company: Option<String>,
}

impl PartFieldArgs {
    /// Overlay the given flags on existing form values
    pub fn apply(&self, fields: &mut PartFields) {
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
        if self.in_house || self.outsourced {
            fields.in_house = self.in_house;
            fields.outsourced = self.outsourced;
        }
        if let Some(ref machine_id) = self.machine_id {
            fields.machine_id = machine_id.clone();
        }
        if let Some(ref company) = self.company {
            fields.company_name = company.clone();
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    #[command(flatten)]
    pub fields: PartFieldArgs,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Part ID
    pub id: u32,

    #[command(flatten)]
    pub fields: PartFieldArgs,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Part ID
    pub id: u32,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Run a part subcommand
pub fn run(cmd: PartCommands, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let mut inventory = open_inventory(global, &config);
    let format = resolve_format(global, &config);

    match cmd {
        PartCommands::List(args) => run_list(&inventory, args, format),
        PartCommands::Show(args) => run_show(&inventory, args, format),
        PartCommands::New(args) => run_new(&mut inventory, args, global, format),
        PartCommands::Edit(args) => run_edit(&mut inventory, args, global, format),
        PartCommands::Delete(args) => run_delete(&mut inventory, args, global, &config),
    }
}

fn run_list(inventory: &Inventory, args: ListArgs, format: OutputFormat) -> Result<()> {
    let mut parts: Vec<&Part> = inventory.search_parts(args.search.as_deref().unwrap_or(""));

    parts.retain(|p| match args.source {
        SourceFilter::InHouse => p.source.kind() == SourceKind::InHouse,
        SourceFilter::Outsourced => p.source.kind() == SourceKind::Outsourced,
        SourceFilter::All => true,
    });

    sort_parts(&mut parts, args.sort);
    if args.reverse {
        parts.reverse();
    }
    if let Some(limit) = args.limit {
        parts.truncate(limit);
    }

    if args.count {
        println!("{}", parts.len());
        return Ok(());
    }

    let columns: Vec<&str> = if args.columns.is_empty() {
        DEFAULT_PART_COLUMNS.to_vec()
    } else {
        args.columns.iter().map(|c| c.key()).collect()
    };
    print_parts(&parts, format, &columns)
}

fn sort_parts(parts: &mut [&Part], field: ListColumn) {
    match field {
        ListColumn::Id => parts.sort_by_key(|p| p.id),
        ListColumn::Name => parts.sort_by_key(|p| p.name.to_lowercase()),
        ListColumn::Stock => parts.sort_by_key(|p| p.stock),
        ListColumn::Price => parts.sort_by(|a, b| a.price.total_cmp(&b.price)),
        ListColumn::Min => parts.sort_by_key(|p| p.min),
        ListColumn::Max => parts.sort_by_key(|p| p.max),
        ListColumn::Source => parts.sort_by_key(|p| p.source.kind().to_string()),
        ListColumn::Detail => parts.sort_by_key(|p| p.source.detail()),
    }
}

/// Build the table row for a part
pub fn part_row(part: &Part) -> TableRow {
    TableRow::new(part.id)
        .cell("id", CellValue::Id(part.id))
        .cell("name", CellValue::Text(part.name.clone()))
        .cell(
            "stock",
            CellValue::Stock {
                level: part.stock,
                min: part.min,
                max: part.max,
            },
        )
        .cell("price", CellValue::Price(part.price))
        .cell("min", CellValue::Number(part.min as i64))
        .cell("max", CellValue::Number(part.max as i64))
        .cell("source", CellValue::Source(part.source.kind()))
        .cell("detail", CellValue::Text(part.source.detail()))
}

/// Print a list of parts in any output format
pub fn print_parts(parts: &[&Part], format: OutputFormat, columns: &[&str]) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(parts).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(parts).into_diagnostic()?);
        }
        _ => {
            let rows: Vec<TableRow> = parts.iter().map(|p| part_row(p)).collect();
            TableFormatter::new(PART_COLUMNS, "part").output(&rows, format, columns);
        }
    }
    Ok(())
}

/// Print a single part in any output format
pub fn print_part(part: &Part, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Yaml => print!("{}", serde_yml::to_string(part).into_diagnostic()?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(part).into_diagnostic()?),
        OutputFormat::Id => println!("{}", part.id),
        OutputFormat::Tsv | OutputFormat::Csv | OutputFormat::Md => {
            print_parts(&[part], format, DEFAULT_PART_COLUMNS)?
        }
        OutputFormat::Auto => print_part_detail(part),
    }
    Ok(())
}

/// Pretty detail view
pub fn print_part_detail(part: &Part) {
    println!("{}", style("─".repeat(60)).dim());
    println!("{}: {}", style("ID").bold(), style(part.id).cyan());
    println!("{}: {}", style("Name").bold(), style(&part.name).yellow());
    println!("{}: {}", style("Price/Cost").bold(), format_price(part.price));
    println!("{}: {}", style("Inv").bold(), part.stock);
    println!("{}: {}", style("Min").bold(), part.min);
    println!("{}: {}", style("Max").bold(), part.max);
    match &part.source {
        PartSource::InHouse { machine_id } => {
            println!("{}: {}", style("Source").bold(), style("In House").green());
            println!("{}: {}", style("Machine ID").bold(), machine_id);
        }
        PartSource::Outsourced { company_name } => {
            println!("{}: {}", style("Source").bold(), style("Outsourced").yellow());
            println!("{}: {}", style("Company Name").bold(), company_name);
        }
    }
    println!("{}", style("─".repeat(60)).dim());
}

fn run_show(inventory: &Inventory, args: ShowArgs, format: OutputFormat) -> Result<()> {
    let part = inventory
        .lookup_part(args.id)
        .ok_or(forms::FormError::PartNotFound(args.id))?;
    print_part(part, format)
}

fn run_new(
    inventory: &mut Inventory,
    args: NewArgs,
    global: &GlobalOpts,
    format: OutputFormat,
) -> Result<()> {
    let mut fields = PartFields::default();
    args.fields.apply(&mut fields);

    let draft = fields.parse()?;
    let id = forms::submit_part(inventory, &draft, FormMode::Create)?;

    print_success(global, &format!("Created part {}", style(id).cyan()));
    if let Some(part) = inventory.lookup_part(id) {
        print_part(part, format)?;
    }
    Ok(())
}

fn run_edit(
    inventory: &mut Inventory,
    args: EditArgs,
    global: &GlobalOpts,
    format: OutputFormat,
) -> Result<()> {
    let current = inventory
        .lookup_part(args.id)
        .ok_or(forms::FormError::PartNotFound(args.id))?;
    let mut fields = PartFields::from_part(current);
    args.fields.apply(&mut fields);

    let draft = fields.parse()?;
    let id = forms::submit_part(inventory, &draft, FormMode::Edit(args.id))?;

    print_success(global, &format!("Updated part {}", style(id).cyan()));
    if let Some(part) = inventory.lookup_part(id) {
        print_part(part, format)?;
    }
    Ok(())
}

fn run_delete(
    inventory: &mut Inventory,
    args: DeleteArgs,
    global: &GlobalOpts,
    config: &Config,
) -> Result<()> {
    let part = inventory
        .lookup_part(args.id)
        .ok_or(forms::FormError::PartNotFound(args.id))?;

    if !args.yes && config.confirm_deletes() {
        let prompt = format!("Delete part {} ({})?", part.id, part.name);
        if !confirm(&prompt)? {
            println!("Aborted.");
            return Ok(());
        }
    }

    let removed = forms::delete_part(inventory, args.id)?;
    print_success(
        global,
        &format!("Deleted part {} ({})", style(removed.id).cyan(), removed.name),
    );
    if !global.quiet {
        println!("{} part(s) remaining", inventory.all_parts().len());
    }
    Ok(())
}
