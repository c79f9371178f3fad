//! `invm shell` - interactive session
//!
//! A menu loop over one in-memory inventory. The part and product screens
//! drive the same forms as the one-shot commands, so validation messages
//! and id assignment are identical; the only difference is that state
//! survives between actions until the session ends.

use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use miette::{Diagnostic, IntoDiagnostic, Result};

use crate::cli::commands::part::{print_parts, DEFAULT_PART_COLUMNS};
use crate::cli::commands::product::{associated_parts_table, print_products, DEFAULT_PRODUCT_COLUMNS};
use crate::cli::helpers::{confirm, open_inventory, resolve_format};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, Inventory};
use crate::entities::{Part, Product, SourceKind};
use crate::forms::{self, FormError, FormMode, PartFields, ProductEditor, ProductFields};

/// Main menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    ListParts,
    SearchParts,
    AddPart,
    ModifyPart,
    DeletePart,
    ListProducts,
    SearchProducts,
    AddProduct,
    ModifyProduct,
    DeleteProduct,
    Exit,
}

impl MenuAction {
    const ALL: [MenuAction; 11] = [
        MenuAction::ListParts,
        MenuAction::SearchParts,
        MenuAction::AddPart,
        MenuAction::ModifyPart,
        MenuAction::DeletePart,
        MenuAction::ListProducts,
        MenuAction::SearchProducts,
        MenuAction::AddProduct,
        MenuAction::ModifyProduct,
        MenuAction::DeleteProduct,
        MenuAction::Exit,
    ];

    fn label(self) -> &'static str {
        match self {
            MenuAction::ListParts => "List parts",
            MenuAction::SearchParts => "Search parts",
            MenuAction::AddPart => "Add part",
            MenuAction::ModifyPart => "Modify part",
            MenuAction::DeletePart => "Delete part",
            MenuAction::ListProducts => "List products",
            MenuAction::SearchProducts => "Search products",
            MenuAction::AddProduct => "Add product",
            MenuAction::ModifyProduct => "Modify product",
            MenuAction::DeleteProduct => "Delete product",
            MenuAction::Exit => "Exit",
        }
    }
}

/// Product screen entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProductAction {
    EditFields,
    AddPart,
    RemovePart,
    Save,
    Cancel,
}

impl ProductAction {
    const ALL: [ProductAction; 5] = [
        ProductAction::EditFields,
        ProductAction::AddPart,
        ProductAction::RemovePart,
        ProductAction::Save,
        ProductAction::Cancel,
    ];

    fn label(self) -> &'static str {
        match self {
            ProductAction::EditFields => "Edit fields",
            ProductAction::AddPart => "Add associated part",
            ProductAction::RemovePart => "Remove associated part",
            ProductAction::Save => "Save",
            ProductAction::Cancel => "Cancel",
        }
    }
}

struct Session {
    inventory: Inventory,
    format: OutputFormat,
    confirm_deletes: bool,
    theme: ColorfulTheme,
}

/// Run the interactive session until the user exits
pub fn run(global: &GlobalOpts) -> Result<()> {
    if !console::user_attended() {
        return Err(miette::miette!(
            help = "Use `invm part ...` or `invm product ...` for scripted use",
            "The interactive session needs a terminal"
        ));
    }

    let config = Config::load();
    let mut session = Session {
        inventory: open_inventory(global, &config),
        format: resolve_format(global, &config),
        confirm_deletes: config.confirm_deletes(),
        theme: ColorfulTheme::default(),
    };
    tracing::info!(
        parts = session.inventory.all_parts().len(),
        products = session.inventory.all_products().len(),
        "session started"
    );

    println!("{}", style("Inventory Management System").bold().underlined());
    loop {
        println!();
        let labels: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();
        let choice = Select::with_theme(&session.theme)
            .with_prompt("Main menu")
            .items(&labels)
            .default(0)
            .interact_opt()
            .into_diagnostic()?;

        let action = match choice {
            Some(idx) => MenuAction::ALL[idx],
            None => MenuAction::Exit,
        };

        match action {
            MenuAction::ListParts => session.list_parts("")?,
            MenuAction::SearchParts => {
                let query = session.prompt_search("Search by Part ID or Name")?;
                session.list_parts(&query)?;
            }
            MenuAction::AddPart => session.part_form(FormMode::Create)?,
            MenuAction::ModifyPart => {
                if let Some(id) = session.pick_part("Select the part to modify")? {
                    session.part_form(FormMode::Edit(id))?;
                }
            }
            MenuAction::DeletePart => session.delete_part()?,
            MenuAction::ListProducts => session.list_products("")?,
            MenuAction::SearchProducts => {
                let query = session.prompt_search("Search by Product ID or Name")?;
                session.list_products(&query)?;
            }
            MenuAction::AddProduct => session.product_form(FormMode::Create)?,
            MenuAction::ModifyProduct => {
                if let Some(id) = session.pick_product("Select the product to modify")? {
                    session.product_form(FormMode::Edit(id))?;
                }
            }
            MenuAction::DeleteProduct => session.delete_product()?,
            MenuAction::Exit => break,
        }
    }

    tracing::info!("session ended");
    Ok(())
}

impl Session {
    fn prompt_search(&self, prompt: &str) -> Result<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .into_diagnostic()
    }

    fn prompt_field(&self, label: &str, current: &str, hint: Option<&str>) -> Result<String> {
        let prompt = match hint {
            Some(hint) if current.is_empty() => format!("{} ({})", label, style(hint).dim()),
            _ => label.to_string(),
        };
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .with_initial_text(current)
            .allow_empty(true)
            .interact_text()
            .into_diagnostic()
    }

    fn list_parts(&self, query: &str) -> Result<()> {
        let parts = self.inventory.search_parts(query);
        if parts.is_empty() {
            println!("{}", style("No parts found.").yellow());
            return Ok(());
        }
        print_parts(&parts, self.format, DEFAULT_PART_COLUMNS)
    }

    fn list_products(&self, query: &str) -> Result<()> {
        let products = self.inventory.search_products(query);
        if products.is_empty() {
            println!("{}", style("No products found.").yellow());
            return Ok(());
        }
        print_products(&products, self.format, DEFAULT_PRODUCT_COLUMNS)
    }

    fn pick_part(&self, prompt: &str) -> Result<Option<u32>> {
        let parts = self.inventory.all_parts();
        if parts.is_empty() {
            println!("{}", style("There are no parts.").yellow());
            return Ok(None);
        }
        let labels: Vec<String> = parts.iter().map(part_label).collect();
        let choice = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(&labels)
            .default(0)
            .interact_opt()
            .into_diagnostic()?;
        Ok(choice.map(|idx| parts[idx].id))
    }

    fn pick_product(&self, prompt: &str) -> Result<Option<u32>> {
        let products = self.inventory.all_products();
        if products.is_empty() {
            println!("{}", style("There are no products.").yellow());
            return Ok(None);
        }
        let labels: Vec<String> = products.iter().map(product_label).collect();
        let choice = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(&labels)
            .default(0)
            .interact_opt()
            .into_diagnostic()?;
        Ok(choice.map(|idx| products[idx].id))
    }

    fn confirm_delete(&self, prompt: &str) -> Result<bool> {
        if !self.confirm_deletes {
            return Ok(true);
        }
        confirm(prompt)
    }

    fn part_form(&mut self, mode: FormMode) -> Result<()> {
        let mut fields = match mode {
            FormMode::Create => PartFields {
                in_house: true,
                ..Default::default()
            },
            FormMode::Edit(id) => match self.inventory.lookup_part(id) {
                Some(part) => PartFields::from_part(part),
                None => {
                    report(FormError::PartNotFound(id));
                    return Ok(());
                }
            },
        };

        loop {
            println!();
            match mode {
                FormMode::Create => {
                    println!("{}", style("Add Part").bold());
                    println!("ID: {}", style("Auto Gen - Disabled").dim());
                }
                FormMode::Edit(id) => {
                    println!("{}", style("Modify Part").bold());
                    println!("ID: {}", style(id).cyan());
                }
            }

            let sources = [SourceKind::InHouse, SourceKind::Outsourced];
            let source_labels = ["In-House", "Outsourced"];
            let selected = Select::with_theme(&self.theme)
                .with_prompt("Source")
                .items(&source_labels)
                .default(if fields.outsourced { 1 } else { 0 })
                .interact()
                .into_diagnostic()?;
            fields.in_house = sources[selected] == SourceKind::InHouse;
            fields.outsourced = sources[selected] == SourceKind::Outsourced;

            fields.name = self.prompt_field("Name", &fields.name, None)?;
            fields.stock = self.prompt_field("Inv", &fields.stock, None)?;
            fields.price = self.prompt_field("Price/Cost", &fields.price, Some("0.00"))?;
            fields.max = self.prompt_field("Max", &fields.max, Some("20"))?;
            fields.min = self.prompt_field("Min", &fields.min, Some("1"))?;
            if fields.in_house {
                fields.machine_id = self.prompt_field("Machine ID", &fields.machine_id, None)?;
            } else {
                fields.company_name =
                    self.prompt_field("Company Name", &fields.company_name, None)?;
            }

            let next = Select::with_theme(&self.theme)
                .items(&["Save", "Edit again", "Cancel"])
                .default(0)
                .interact()
                .into_diagnostic()?;
            match next {
                0 => {}
                1 => continue,
                _ => {
                    println!("{}", style("Cancelled.").dim());
                    return Ok(());
                }
            }

            let result = fields
                .parse()
                .map_err(FormError::from)
                .and_then(|draft| forms::submit_part(&mut self.inventory, &draft, mode));
            match result {
                Ok(id) => {
                    println!("{} Saved part {}", style("✓").green(), style(id).cyan());
                    return Ok(());
                }
                // only input mistakes reopen the form
                Err(e) if e.is_validation() => report(e),
                Err(e) => {
                    report(e);
                    return Ok(());
                }
            }
        }
    }

    fn delete_part(&mut self) -> Result<()> {
        let Some(id) = self.pick_part("Select the part to delete")? else {
            return Ok(());
        };
        let Some(part) = self.inventory.lookup_part(id) else {
            report(FormError::PartNotFound(id));
            return Ok(());
        };
        if !self.confirm_delete(&format!("Delete part {} ({})?", part.id, part.name))? {
            return Ok(());
        }
        match forms::delete_part(&mut self.inventory, id) {
            Ok(part) => println!("{} Deleted part {} ({})", style("✓").green(), part.id, part.name),
            Err(e) => report(e),
        }
        Ok(())
    }

    fn product_form(&mut self, mode: FormMode) -> Result<()> {
        let mut editor = match mode {
            FormMode::Create => ProductEditor::create(),
            FormMode::Edit(id) => match ProductEditor::edit(&self.inventory, id) {
                Ok(editor) => editor,
                Err(e) => {
                    report(e);
                    return Ok(());
                }
            },
        };
        let mut fields = match mode {
            FormMode::Create => ProductFields::default(),
            FormMode::Edit(id) => self
                .inventory
                .lookup_product(id)
                .map(ProductFields::from_product)
                .unwrap_or_default(),
        };

        loop {
            println!();
            self.print_product_form(&editor, &fields);

            let labels: Vec<&str> = ProductAction::ALL.iter().map(|a| a.label()).collect();
            let choice = Select::with_theme(&self.theme)
                .items(&labels)
                .default(0)
                .interact_opt()
                .into_diagnostic()?;
            let action = choice
                .map(|idx| ProductAction::ALL[idx])
                .unwrap_or(ProductAction::Cancel);

            match action {
                ProductAction::EditFields => {
                    fields.name = self.prompt_field("Name", &fields.name, None)?;
                    fields.stock = self.prompt_field("Inv", &fields.stock, None)?;
                    fields.price = self.prompt_field("Price", &fields.price, Some("0.00"))?;
                    fields.max = self.prompt_field("Max", &fields.max, Some("10"))?;
                    fields.min = self.prompt_field("Min", &fields.min, Some("1"))?;
                }
                ProductAction::AddPart => self.add_associated_part(&mut editor)?,
                ProductAction::RemovePart => self.remove_associated_part(&mut editor)?,
                ProductAction::Save => {
                    let result = fields
                        .parse()
                        .map_err(FormError::from)
                        .and_then(|draft| editor.submit(&mut self.inventory, &draft));
                    match result {
                        Ok(id) => {
                            println!("{} Saved product {}", style("✓").green(), style(id).cyan());
                            return Ok(());
                        }
                        Err(e) if e.is_validation() => report(e),
                        Err(e) => {
                            report(e);
                            return Ok(());
                        }
                    }
                }
                ProductAction::Cancel => {
                    let restored = editor.cancel();
                    tracing::debug!(restored = restored.len(), "product form cancelled");
                    println!("{}", style("Cancelled.").dim());
                    return Ok(());
                }
            }
        }
    }

    fn print_product_form(&self, editor: &ProductEditor, fields: &ProductFields) {
        match editor.mode() {
            FormMode::Create => {
                println!("{}", style("Add Product").bold());
                println!("ID: {}", style("Auto Gen - Disabled").dim());
            }
            FormMode::Edit(id) => {
                println!("{}", style("Modify Product").bold());
                println!("ID: {}", style(id).cyan());
            }
        }
        println!("Name:  {}", fields.name);
        println!("Inv:   {}", fields.stock);
        println!("Price: {}", fields.price);
        println!("Max:   {}", fields.max);
        println!("Min:   {}", fields.min);
        println!("{}", associated_parts_table(editor.associated_parts()));
    }

    fn add_associated_part(&self, editor: &mut ProductEditor) -> Result<()> {
        let query = self.prompt_search("Search by Part ID or Name")?;
        let matches = self.inventory.search_parts(&query);
        if matches.is_empty() {
            println!("{}", style("No parts found.").yellow());
            return Ok(());
        }
        let labels: Vec<String> = matches.iter().map(|p| part_label(p)).collect();
        let Some(idx) = Select::with_theme(&self.theme)
            .with_prompt("Select the part to add")
            .items(&labels)
            .default(0)
            .interact_opt()
            .into_diagnostic()?
        else {
            return Ok(());
        };

        match editor.add_part(&self.inventory, matches[idx].id) {
            Ok(true) => {}
            Ok(false) => println!("{}", style("That part is already associated.").yellow()),
            Err(e) => report(e),
        }
        Ok(())
    }

    fn remove_associated_part(&self, editor: &mut ProductEditor) -> Result<()> {
        let parts = editor.associated_parts();
        if parts.is_empty() {
            println!("{}", style("No parts associated yet with this product.").yellow());
            return Ok(());
        }
        let labels: Vec<String> = parts.iter().map(part_label).collect();
        let Some(idx) = Select::with_theme(&self.theme)
            .with_prompt("Select the part to remove")
            .items(&labels)
            .default(0)
            .interact_opt()
            .into_diagnostic()?
        else {
            return Ok(());
        };

        let part_id = parts[idx].id;
        let prompt = format!("Remove {} from this product?", parts[idx].name);
        if self.confirm_delete(&prompt)? {
            editor.remove_part(part_id);
        }
        Ok(())
    }

    fn delete_product(&mut self) -> Result<()> {
        let Some(id) = self.pick_product("Select the product to delete")? else {
            return Ok(());
        };
        let Some(product) = self.inventory.lookup_product(id) else {
            report(FormError::ProductNotFound(id));
            return Ok(());
        };
        if !product.associated_parts().is_empty() {
            report(FormError::HasAssociatedParts {
                id,
                count: product.associated_parts().len(),
            });
            return Ok(());
        }
        if !self.confirm_delete(&format!("Delete product {} ({})?", product.id, product.name))? {
            return Ok(());
        }
        match forms::delete_product(&mut self.inventory, id) {
            Ok(product) => println!(
                "{} Deleted product {} ({})",
                style("✓").green(),
                product.id,
                product.name
            ),
            Err(e) => report(e),
        }
        Ok(())
    }
}

/// Render a recoverable error through the installed miette handler
fn report<E: Diagnostic + Send + Sync + 'static>(err: E) {
    eprintln!("{:?}", miette::Report::new(err));
}

fn part_label(part: &Part) -> String {
    format!("{:>4}  {}  ({}, stock {})", part.id, part.name, part.source.kind(), part.stock)
}

fn product_label(product: &Product) -> String {
    format!(
        "{:>4}  {}  ({} part(s))",
        product.id,
        product.name,
        product.associated_parts().len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_menu_labels_are_unique() {
        let labels: HashSet<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();
        assert_eq!(labels.len(), MenuAction::ALL.len());
        assert_eq!(MenuAction::ALL.last(), Some(&MenuAction::Exit));

        let labels: HashSet<&str> = ProductAction::ALL.iter().map(|a| a.label()).collect();
        assert_eq!(labels.len(), ProductAction::ALL.len());
    }

    #[test]
    fn test_labels() {
        let inv = Inventory::with_sample_data();
        assert_eq!(
            part_label(inv.lookup_part(1).unwrap()),
            "   1  Wheel  (outsourced, stock 16)"
        );
        assert_eq!(
            product_label(inv.lookup_product(0).unwrap()),
            "   0  Giant Bicycle  (1 part(s))"
        );
    }
}
