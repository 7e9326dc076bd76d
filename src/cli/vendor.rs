//! Vendor CLI commands

use clap::Subcommand;

use super::{parse_category, parse_opt};
use crate::display::format_vendor_list;
use crate::error::{SitebookError, SitebookResult};
use crate::services::VendorService;
use crate::storage::Storage;

/// Vendor subcommands
#[derive(Subcommand)]
pub enum VendorCommands {
    /// Add a supplier
    Add {
        /// Vendor name
        name: String,
        /// What they supply (material, transport, contractor, ...)
        #[arg(short, long, default_value = "material")]
        category: String,
        #[arg(short, long)]
        mobile: Option<String>,
    },
    /// List vendors
    List,
    /// Edit a vendor
    Edit {
        /// Vendor name or ID
        vendor: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        /// New mobile number; pass "" to clear it
        #[arg(short, long)]
        mobile: Option<String>,
    },
    /// Delete a vendor (expenses keep their reference)
    Delete {
        /// Vendor name or ID
        vendor: String,
    },
}

/// Handle a vendor command
pub fn handle_vendor_command(storage: &Storage, cmd: VendorCommands) -> SitebookResult<()> {
    let service = VendorService::new(storage);

    match cmd {
        VendorCommands::Add {
            name,
            category,
            mobile,
        } => {
            let vendor = service.create(&name, parse_category(&category)?, mobile)?;
            println!("Added vendor: {} ({})", vendor.name, vendor.category);
            println!("  ID: {}", vendor.id);
        }

        VendorCommands::List => {
            println!("{}", format_vendor_list(&service.list()?));
        }

        VendorCommands::Edit {
            vendor,
            name,
            category,
            mobile,
        } => {
            let found = service
                .find(&vendor)?
                .ok_or_else(|| SitebookError::vendor_not_found(&vendor))?;

            if name.is_none() && category.is_none() && mobile.is_none() {
                println!("No changes specified. Use --name, --category or --mobile.");
                return Ok(());
            }

            let category = parse_opt(category.as_deref(), parse_category)?;
            let updated = service.update(&found.id, name, category, mobile)?;
            println!("Updated vendor: {}", updated.name);
        }

        VendorCommands::Delete { vendor } => {
            let found = service
                .find(&vendor)?
                .ok_or_else(|| SitebookError::vendor_not_found(&vendor))?;
            let removed = service.delete(&found.id)?;
            println!("Deleted vendor: {}", removed.name);
        }
    }

    Ok(())
}
