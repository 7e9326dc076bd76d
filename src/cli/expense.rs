//! Expense CLI commands

use clap::Subcommand;

use super::{
    date_or_today, parse_category, parse_day, parse_funding_source, parse_mode, parse_money,
    parse_opt,
};
use crate::display::{format_expense_details, format_expense_list};
use crate::error::{SitebookError, SitebookResult};
use crate::models::{ExpenseCategory, ExpenseId, Money};
use crate::services::{CreateExpenseInput, ExpenseFilter, ExpenseService, ExpenseUpdate, VendorService};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record money spent on the site
    Add {
        /// Amount in rupees
        amount: String,
        /// Category (material, labour, food, transport, utility, contractor, other)
        #[arg(short, long, default_value = "material")]
        category: String,
        /// Sub-category (e.g., Cement, Saria, Lunch)
        #[arg(long = "sub")]
        sub_category: Option<String>,
        /// Who was paid (defaults to the vendor name)
        #[arg(short = 't', long = "to")]
        paid_to: Option<String>,
        /// Who paid (mujahir, salik, pool, other)
        #[arg(short = 'b', long = "by", default_value = "pool")]
        paid_by: String,
        /// Vendor name or ID
        #[arg(short, long)]
        vendor: Option<String>,
        /// Date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
        /// Payment mode (cash, bank, upi, check)
        #[arg(short, long)]
        mode: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List expenses, newest first
    List {
        #[arg(short, long)]
        category: Option<String>,
        /// Only expenses paid by this payer
        #[arg(short = 'b', long = "by")]
        paid_by: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Search payee, sub-category and notes
        #[arg(short, long)]
        search: Option<String>,
        /// Show at most this many
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Show one expense
    Show {
        /// Expense ID
        id: String,
    },
    /// Edit an expense
    Edit {
        /// Expense ID
        id: String,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        /// New sub-category; pass "" to clear it
        #[arg(long = "sub")]
        sub_category: Option<String>,
        #[arg(short = 't', long = "to")]
        paid_to: Option<String>,
        #[arg(short = 'b', long = "by")]
        paid_by: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        mode: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Delete an expense
    Delete {
        /// Expense ID
        id: String,
    },
    /// Spending per category and the usual sub-categories
    Categories,
}

/// Handle an expense command
pub fn handle_expense_command(storage: &Storage, cmd: ExpenseCommands) -> SitebookResult<()> {
    let service = ExpenseService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            sub_category,
            paid_to,
            paid_by,
            vendor,
            date,
            mode,
            notes,
        } => {
            let vendor_id = match vendor {
                Some(v) => Some(
                    VendorService::new(storage)
                        .find(&v)?
                        .ok_or_else(|| SitebookError::vendor_not_found(&v))?
                        .id,
                ),
                None => None,
            };

            let expense = service.create(CreateExpenseInput {
                date: date_or_today(date.as_deref())?,
                amount: parse_money(&amount)?,
                category: parse_category(&category)?,
                sub_category,
                paid_to: paid_to.unwrap_or_default(),
                paid_by: parse_funding_source(&paid_by)?,
                vendor_id,
                mode: parse_opt(mode.as_deref(), parse_mode)?,
                notes,
            })?;

            println!(
                "Recorded expense: {} to {} ({})",
                expense.amount, expense.paid_to, expense.category
            );
            println!("  Paid by: {}", expense.paid_by);
            println!("  Date: {}", expense.date);
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::List {
            category,
            paid_by,
            from,
            to,
            search,
            limit,
        } => {
            let filter = ExpenseFilter {
                category: parse_opt(category.as_deref(), parse_category)?,
                paid_by: parse_opt(paid_by.as_deref(), parse_funding_source)?,
                start_date: parse_opt(from.as_deref(), parse_day)?,
                end_date: parse_opt(to.as_deref(), parse_day)?,
                search,
                limit,
            };

            let expenses = service.list(&filter)?;
            println!("{}", format_expense_list(&expenses));
            if !expenses.is_empty() {
                let total: Money = expenses.iter().map(|e| e.amount).sum();
                println!("{} expense(s), total {}", expenses.len(), total);
            }
        }

        ExpenseCommands::Show { id } => {
            let expense = service
                .get(&ExpenseId::from(id.as_str()))?
                .ok_or_else(|| SitebookError::expense_not_found(&id))?;
            let vendor = match &expense.vendor_id {
                Some(vendor_id) => storage.vendors.get(vendor_id)?,
                None => None,
            };
            print!("{}", format_expense_details(&expense, vendor.as_ref()));
        }

        ExpenseCommands::Edit {
            id,
            amount,
            category,
            sub_category,
            paid_to,
            paid_by,
            date,
            mode,
            notes,
        } => {
            let changes = ExpenseUpdate {
                date: parse_opt(date.as_deref(), parse_day)?,
                amount: parse_opt(amount.as_deref(), parse_money)?,
                category: parse_opt(category.as_deref(), parse_category)?,
                sub_category: sub_category.map(Some),
                paid_to,
                paid_by: parse_opt(paid_by.as_deref(), parse_funding_source)?,
                mode: parse_opt(mode.as_deref(), parse_mode)?,
                notes,
            };

            let updated = service.update(&ExpenseId::from(id.as_str()), changes)?;
            println!(
                "Updated expense: {} to {} ({})",
                updated.amount, updated.paid_to, updated.category
            );
        }

        ExpenseCommands::Delete { id } => {
            let removed = service.delete(&ExpenseId::from(id.as_str()))?;
            println!(
                "Deleted expense: {} to {} on {}",
                removed.amount, removed.paid_to, removed.date
            );
        }

        ExpenseCommands::Categories => {
            let totals = service.totals_by_category()?;
            for category in ExpenseCategory::all() {
                let spent = totals
                    .iter()
                    .find(|(c, _)| c == category)
                    .map(|(_, total)| *total)
                    .unwrap_or_default();
                println!("{:<12} {:>14}", category.to_string(), spent.to_string());

                let subs = category.suggested_subcategories();
                if !subs.is_empty() {
                    println!("  {}", subs.join(", "));
                }
            }
        }
    }

    Ok(())
}
