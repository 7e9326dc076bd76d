//! Labour CLI commands
//!
//! Worker profiles, daily attendance and wage payments.

use clap::Subcommand;

use super::{date_or_today, parse_day, parse_funding_source, parse_mode, parse_money, parse_opt};
use crate::display::{format_attendance_list, format_labour_list, format_payment_list};
use crate::error::{SitebookError, SitebookResult};
use crate::models::{AttendanceId, AttendanceStatus, LabourPaymentType, PaymentId};
use crate::reports::WorkerStatement;
use crate::services::{LabourService, LabourUpdate, RecordPaymentInput};
use crate::storage::Storage;

/// Labour subcommands
#[derive(Subcommand)]
pub enum LabourCommands {
    /// Add a worker
    Add {
        /// Worker name
        name: String,
        /// Daily wage in rupees
        #[arg(short, long)]
        wage: String,
        /// Trade (Mistry, Majdoor, Plumber, ...)
        #[arg(short = 't', long = "type", default_value = "Majdoor")]
        work_type: String,
        #[arg(short, long)]
        mobile: Option<String>,
    },
    /// List workers
    List,
    /// Show a worker's attendance, payments and balance
    Show {
        /// Worker name or ID
        worker: String,
    },
    /// Edit a worker
    Edit {
        /// Worker name or ID
        worker: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        wage: Option<String>,
        #[arg(short = 't', long = "type")]
        work_type: Option<String>,
        #[arg(short, long)]
        mobile: Option<String>,
    },
    /// Delete a worker; their attendance and payments are kept
    Delete {
        /// Worker name or ID
        worker: String,
    },
    /// Mark attendance for a worker
    Attend {
        /// Worker name or ID
        worker: String,
        /// present, absent or half-day
        #[arg(short, long, default_value = "present")]
        status: String,
        /// Overtime hours
        #[arg(long, default_value_t = 0.0)]
        ot: f64,
        /// Date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Show attendance for a day or for one worker
    Attendance {
        /// Date (YYYY-MM-DD, default today)
        #[arg(short, long, conflicts_with = "worker")]
        date: Option<String>,
        /// Worker name or ID
        #[arg(short, long)]
        worker: Option<String>,
    },
    /// Change an attendance mark
    EditAttendance {
        /// Attendance ID
        id: String,
        #[arg(short, long)]
        status: Option<String>,
        #[arg(long)]
        ot: Option<f64>,
    },
    /// Remove an attendance mark
    Unmark {
        /// Attendance ID
        id: String,
    },
    /// Pay a worker
    Pay {
        /// Worker name or ID
        worker: String,
        /// Amount in rupees
        amount: String,
        /// advance or full
        #[arg(short = 't', long = "type", default_value = "advance")]
        payment_type: String,
        /// Who paid (mujahir, salik, pool, other)
        #[arg(short = 'b', long = "by", default_value = "pool")]
        paid_by: String,
        #[arg(short, long)]
        mode: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List wage payments
    Payments {
        /// Only payments to this worker
        #[arg(short, long)]
        worker: Option<String>,
    },
    /// Edit a wage payment
    EditPayment {
        /// Payment ID
        id: String,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short = 'b', long = "by")]
        paid_by: Option<String>,
    },
    /// Delete a wage payment
    DeletePayment {
        /// Payment ID
        id: String,
    },
}

fn parse_status(s: &str) -> SitebookResult<AttendanceStatus> {
    AttendanceStatus::parse(s).ok_or_else(|| {
        SitebookError::Validation(format!(
            "Unknown attendance status: '{}'. Use present, absent or half-day",
            s
        ))
    })
}

/// Handle a labour command
pub fn handle_labour_command(storage: &Storage, cmd: LabourCommands) -> SitebookResult<()> {
    let service = LabourService::new(storage);

    match cmd {
        LabourCommands::Add {
            name,
            wage,
            work_type,
            mobile,
        } => {
            let labour = service.create(&name, &work_type, parse_money(&wage)?, mobile)?;
            println!("Added worker: {} ({})", labour.name, labour.work_type);
            println!("  Daily wage: {}", labour.daily_wage);
            println!("  ID: {}", labour.id);
        }

        LabourCommands::List => {
            println!("{}", format_labour_list(&service.list()?));
        }

        LabourCommands::Show { worker } => {
            let labour = service.require(&worker)?;
            let statement = WorkerStatement::new(
                service.stats_for(&labour)?,
                service.attendance_for(&labour.id)?,
                service.payments(Some(&labour.id))?,
            );
            print!("{}", statement.format_terminal());
        }

        LabourCommands::Edit {
            worker,
            name,
            wage,
            work_type,
            mobile,
        } => {
            let labour = service.require(&worker)?;
            let changes = LabourUpdate {
                name,
                mobile,
                work_type,
                daily_wage: parse_opt(wage.as_deref(), parse_money)?,
            };

            if changes.is_empty() {
                println!("No changes specified. Use --name, --wage, --type or --mobile.");
                return Ok(());
            }

            let updated = service.update(&labour.id, changes)?;
            println!("Updated worker: {} at {}/day", updated.name, updated.daily_wage);
        }

        LabourCommands::Delete { worker } => {
            let labour = service.require(&worker)?;
            let removed = service.delete(&labour.id)?;
            println!("Deleted worker: {}", removed.name);
        }

        LabourCommands::Attend {
            worker,
            status,
            ot,
            date,
        } => {
            let labour = service.require(&worker)?;
            let mark = service.mark_attendance(
                &labour.id,
                date_or_today(date.as_deref())?,
                parse_status(&status)?,
                ot,
            )?;
            println!("Marked {} {} on {}", labour.name, mark.status, mark.date);
            println!("  ID: {}", mark.id);
        }

        LabourCommands::Attendance { date, worker } => {
            let marks = match worker {
                Some(w) => service.attendance_for(&service.require(&w)?.id)?,
                None => service.attendance_on(date_or_today(date.as_deref())?)?,
            };
            println!("{}", format_attendance_list(&marks, &service.list()?));
        }

        LabourCommands::EditAttendance { id, status, ot } => {
            if status.is_none() && ot.is_none() {
                println!("No changes specified. Use --status or --ot.");
                return Ok(());
            }
            let mark = service.update_attendance(
                &AttendanceId::from(id.as_str()),
                parse_opt(status.as_deref(), parse_status)?,
                ot,
            )?;
            println!("Updated attendance on {}: {}", mark.date, mark.status);
        }

        LabourCommands::Unmark { id } => {
            let removed = service.delete_attendance(&AttendanceId::from(id.as_str()))?;
            println!("Removed attendance on {}", removed.date);
        }

        LabourCommands::Pay {
            worker,
            amount,
            payment_type,
            paid_by,
            mode,
            date,
        } => {
            let labour = service.require(&worker)?;
            let payment_type = LabourPaymentType::parse(&payment_type).ok_or_else(|| {
                SitebookError::Validation(format!(
                    "Unknown payment type: '{}'. Use advance or full",
                    payment_type
                ))
            })?;

            let payment = service.record_payment(RecordPaymentInput {
                labour_id: labour.id.clone(),
                date: date_or_today(date.as_deref())?,
                amount: parse_money(&amount)?,
                payment_type,
                mode: parse_opt(mode.as_deref(), parse_mode)?,
                paid_by: parse_funding_source(&paid_by)?,
            })?;

            let stats = service.stats_for(&labour)?;
            println!(
                "Paid {} {} ({}, from {})",
                labour.name, payment.amount, payment.payment_type, payment.paid_by
            );
            println!("  Balance due: {}", stats.outstanding);
            println!("  ID: {}", payment.id);
        }

        LabourCommands::Payments { worker } => {
            let payments = match worker {
                Some(w) => service.payments(Some(&service.require(&w)?.id))?,
                None => service.payments(None)?,
            };
            println!("{}", format_payment_list(&payments, &service.list()?));
        }

        LabourCommands::EditPayment {
            id,
            amount,
            date,
            paid_by,
        } => {
            if amount.is_none() && date.is_none() && paid_by.is_none() {
                println!("No changes specified. Use --amount, --date or --by.");
                return Ok(());
            }
            let payment = service.update_payment(
                &PaymentId::from(id.as_str()),
                parse_opt(amount.as_deref(), parse_money)?,
                parse_opt(date.as_deref(), parse_day)?,
                parse_opt(paid_by.as_deref(), parse_funding_source)?,
            )?;
            println!("Updated payment: {} on {}", payment.amount, payment.date);
        }

        LabourCommands::DeletePayment { id } => {
            let removed = service.delete_payment(&PaymentId::from(id.as_str()))?;
            println!("Deleted payment: {} on {}", removed.amount, removed.date);
        }
    }

    Ok(())
}
