use std::{error::Error, fs::File, path::PathBuf, process::ExitCode};

use clap::{Args as ClapArgs, Parser, Subcommand};
use time::Date;

use receiptify_rs::{
    AppState, RecordId,
    auth::{
        ProfileUpdate, current_user, delete_account, log_in, log_out, require_user, sign_up,
        update_profile,
    },
    category::{add_category, delete_category, get_category_usage, rename_category},
    dashboard::{DashboardSummary, Report, ReportFilter},
    export::write_transactions_csv,
    format::{format_currency, format_percent_change, truncate_graphemes},
    logging::init_logging,
    notification::{
        ChangeAction, clear_all, get_notifications, mark_all_as_read, notify_category, notify_tag,
    },
    pagination::{PaginationConfig, paginate},
    receipt::{
        NewReceipt, ReceiptFilter, ReceiptRow, delete_receipts_with_transactions, edit_receipt,
        filter_receipt_rows, get_all_receipts, receipt_rows, upload_receipt,
    },
    settings::{
        Channel, NotificationEvent, PaymentMethod, get_billing_history, get_billing_plan,
        get_integrations, get_payment_method, load_notification_settings, load_preferences,
        save_payment_method, save_preferences, toggle_integration, toggle_notification_setting,
        toggle_plan,
    },
    store::SqliteStore,
    tag::{add_tag, delete_tag, get_tag_usage, rename_tag},
    transaction::{TransactionStatus, get_all_transactions, parse_date},
};

/// Vendor names longer than this are cut short in tables.
const MAX_VENDOR_GRAPHEMES: usize = 24;

/// A local receipt and expense tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, env = "RECEIPTIFY_DB_PATH", default_value = "receiptify.db")]
    db_path: String,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    #[arg(long, env = "RECEIPTIFY_TIMEZONE", default_value = "Etc/UTC")]
    timezone: String,

    /// Append debug logs to this file.
    #[arg(long, env = "RECEIPTIFY_LOG_FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the user account and log in.
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Prompted for when not given.
        #[arg(long)]
        password: Option<String>,
    },
    /// Log in to the existing account.
    Login {
        #[arg(long)]
        email: String,
        /// Prompted for when not given.
        #[arg(long)]
        password: Option<String>,
    },
    /// Log out, keeping the account.
    Logout,
    /// Show the logged in user.
    Whoami,
    /// Log out and forget the account.
    DeleteAccount {
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
    /// Change the name, email or avatar of the account.
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// A data URI, or an empty string to remove the avatar.
        #[arg(long)]
        picture: Option<String>,
    },
    /// Add a receipt and its transaction.
    Upload(ReceiptArgs),
    /// Change a receipt and its transaction. Omitted fields keep their value.
    Edit {
        /// The ID of the receipt.
        id: String,
        #[command(flatten)]
        changes: EditArgs,
    },
    /// List receipts, optionally filtered.
    Receipts {
        /// Text to find in the vendor, category or amount.
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_parser = parse_date_arg)]
        from: Option<Date>,
        #[arg(long, value_parser = parse_date_arg)]
        to: Option<Date>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        page: Option<u64>,
    },
    /// Show one receipt in full.
    Show {
        /// The ID of the receipt.
        id: String,
    },
    /// Delete receipts and their transactions.
    Delete {
        /// The IDs of the receipts.
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Manage categories.
    Categories {
        #[command(subcommand)]
        command: LabelCommand,
    },
    /// Manage tags.
    Tags {
        #[command(subcommand)]
        command: LabelCommand,
    },
    /// Show this month's spending.
    Dashboard,
    /// Show spending over a date range.
    Report {
        #[arg(long, value_parser = parse_date_arg)]
        from: Option<Date>,
        #[arg(long, value_parser = parse_date_arg)]
        to: Option<Date>,
        #[arg(long)]
        category: Option<String>,
        /// Write the covered transactions to this CSV file.
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Show the notification feed.
    Notifications {
        #[arg(long)]
        mark_read: bool,
        #[arg(long, conflicts_with = "mark_read")]
        clear: bool,
    },
    /// Show or change which events send emails and push notifications.
    NotificationSettings {
        /// The event to change, e.g. "weekly-report".
        #[arg(long, requires = "channel")]
        toggle: Option<NotificationEvent>,
        /// "email" or "push".
        #[arg(long)]
        channel: Option<Channel>,
    },
    /// Show or change display preferences.
    Preferences {
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        currency: Option<String>,
        #[arg(long)]
        display_timezone: Option<String>,
        #[arg(long)]
        date_format: Option<String>,
        #[arg(long)]
        dark_mode: Option<bool>,
    },
    /// Show or toggle third-party integrations.
    Integrations {
        /// The name of the integration to connect or disconnect.
        #[arg(long)]
        toggle: Option<String>,
    },
    /// Show billing details.
    Billing {
        /// Switch between the Pro and Free Trial plans.
        #[arg(long)]
        toggle_plan: bool,
        /// Save a card given as TYPE,LAST4,EXPIRY, e.g. "VISA,4242,12/2024".
        #[arg(long, value_parser = parse_card_arg)]
        card: Option<PaymentMethod>,
    },
}

#[derive(Subcommand, Debug)]
enum LabelCommand {
    /// List labels with how often they are used.
    List,
    /// Create a label.
    Add { name: String },
    /// Rename a label everywhere it is used.
    Rename { id: String, name: String },
    /// Delete a label and remove it everywhere it is used.
    Delete { id: String },
}

#[derive(ClapArgs, Debug)]
struct ReceiptArgs {
    #[arg(long)]
    vendor: String,
    #[arg(long, allow_negative_numbers = true)]
    amount: f64,
    #[arg(long, default_value = "")]
    category: String,
    /// Defaults to today.
    #[arg(long)]
    date: Option<String>,
    #[arg(long, default_value = "pending")]
    status: TransactionStatus,
    /// The receipt file's name or a data URI.
    #[arg(long)]
    file: String,
    #[arg(long)]
    notes: Option<String>,
    /// Comma separated tag names.
    #[arg(long, value_delimiter = ',')]
    tags: Vec<String>,
}

impl ReceiptArgs {
    fn into_form(self, today: Date) -> NewReceipt {
        NewReceipt {
            vendor: self.vendor,
            amount: self.amount,
            category: self.category,
            date: self.date.unwrap_or_else(|| today.to_string()),
            status: self.status,
            file: self.file,
            notes: self.notes,
            tags: self.tags,
            image_preview: None,
        }
    }
}

#[derive(ClapArgs, Debug)]
struct EditArgs {
    #[arg(long)]
    vendor: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    amount: Option<f64>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    status: Option<TransactionStatus>,
    #[arg(long)]
    file: Option<String>,
    /// An empty string removes the notes.
    #[arg(long)]
    notes: Option<String>,
    /// Comma separated tag names replacing the current ones. An empty string
    /// removes every tag.
    #[arg(long, value_delimiter = ',')]
    tags: Option<Vec<String>>,
}

impl EditArgs {
    /// The form for `current` with these changes applied.
    fn into_form(self, current: &ReceiptRow) -> NewReceipt {
        NewReceipt {
            vendor: self.vendor.unwrap_or_else(|| current.vendor.clone()),
            amount: self.amount.unwrap_or(current.amount),
            category: self.category.unwrap_or_else(|| current.category.clone()),
            date: self.date.unwrap_or_else(|| current.date.clone()),
            status: self.status.or(current.status).unwrap_or_default(),
            file: self.file.unwrap_or_else(|| current.receipt.file.clone()),
            notes: self.notes.or_else(|| current.receipt.notes.clone()),
            tags: self
                .tags
                .unwrap_or_else(|| current.receipt.tag_names().to_vec()),
            image_preview: current.receipt.image_preview.clone(),
        }
    }
}

fn parse_date_arg(text: &str) -> Result<Date, String> {
    parse_date(text).ok_or_else(|| format!("\"{text}\" is not a date like 2024-01-05"))
}

fn parse_card_arg(text: &str) -> Result<PaymentMethod, String> {
    match text.split(',').map(str::trim).collect::<Vec<_>>().as_slice() {
        [kind, last4, expiry] => Ok(PaymentMethod {
            kind: kind.to_string(),
            last4: last4.to_string(),
            expiry: expiry.to_string(),
        }),
        _ => Err(format!("\"{text}\" is not TYPE,LAST4,EXPIRY")),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(error) = init_logging(args.log_file.as_deref()) {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::debug!("Command failed: {error:?}");
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut state = AppState::open(&args.db_path, &args.timezone, PaginationConfig::default())?;

    match args.command {
        Command::Signup {
            name,
            email,
            password,
        } => {
            let (password, confirm) = match password {
                Some(password) => (password.clone(), password),
                None => (
                    rpassword::prompt_password("Password: ")?,
                    rpassword::prompt_password("Confirm password: ")?,
                ),
            };
            let user = sign_up(&name, &email, &password, &confirm, &mut state.store)?;
            println!("Welcome, {}! You are logged in.", user.name);
        }
        Command::Login { email, password } => {
            let password = match password {
                Some(password) => password,
                None => rpassword::prompt_password("Password: ")?,
            };
            log_in(&email, &password, &mut state.store)?;
            println!("Logged in as {email}.");
        }
        command => {
            require_user(&state.store)?;
            run_authenticated(command, &mut state)?;
        }
    }

    Ok(())
}

fn run_authenticated(
    command: Command,
    state: &mut AppState<SqliteStore>,
) -> Result<(), Box<dyn Error>> {
    let store = &mut state.store;

    match command {
        Command::Signup { .. } | Command::Login { .. } => {}
        Command::Logout => {
            log_out(store)?;
            println!("Logged out.");
        }
        Command::Whoami => {
            if let Some(user) = current_user(store)? {
                println!("{} <{}>", user.name, user.email);
            }
        }
        Command::DeleteAccount { yes } => {
            if !yes {
                println!("This forgets your account. Run again with --yes to confirm.");
                return Ok(());
            }
            delete_account(store)?;
            println!("Account deleted.");
        }
        Command::Profile {
            name,
            email,
            picture,
        } => {
            let user = update_profile(
                ProfileUpdate {
                    name,
                    email,
                    profile_picture: picture,
                },
                store,
            )?;
            println!("{} <{}>", user.name, user.email);
        }
        Command::Upload(receipt) => {
            let form = receipt.into_form(state.today()?);
            let (transaction, receipt) = upload_receipt(&form, &mut state.store)?;
            println!(
                "Added receipt {} from {} ({}).",
                receipt.id,
                transaction.vendor,
                format_currency(transaction.amount)
            );
        }
        Command::Edit { id, changes } => {
            let id = RecordId::from(id);
            let Some(current) = receipt_rows(store)?
                .into_iter()
                .find(|row| row.receipt.id == id)
            else {
                println!("No receipt with ID {id}.");
                return Ok(());
            };

            let form = changes.into_form(&current);
            if let Some((transaction, _)) = edit_receipt(&id, &form, store)? {
                println!("Updated receipt from {}.", transaction.vendor);
            }
        }
        Command::Receipts {
            search,
            from,
            to,
            category,
            page,
        } => {
            let filter = ReceiptFilter {
                search,
                from,
                to,
                category,
            };
            let rows = filter_receipt_rows(receipt_rows(store)?, &filter);
            let page = paginate(
                rows,
                page.unwrap_or(state.pagination_config.default_page),
                &state.pagination_config,
            );

            for row in &page.items {
                println!(
                    "{:<36}  {:<12}  {:<24}  {:>12}  {:<14}  {}",
                    row.receipt.id,
                    row.date,
                    truncate_graphemes(&row.vendor, MAX_VENDOR_GRAPHEMES),
                    format_currency(row.amount),
                    row.category,
                    row.status.map(|status| status.to_string()).unwrap_or_default()
                );
            }
            println!(
                "Page {} of {} ({} receipts)",
                page.page, page.page_count, page.total_items
            );
        }
        Command::Show { id } => {
            let id = RecordId::from(id.as_str());
            let Some(row) = receipt_rows(store)?
                .into_iter()
                .find(|row| row.receipt.id == id)
            else {
                println!("No receipt with ID {id}.");
                return Ok(());
            };

            println!("Receipt:  {}", row.receipt.id);
            println!("Vendor:   {}", row.vendor);
            println!("Amount:   {}", format_currency(row.amount));
            println!("Date:     {}", row.date);
            println!("Category: {}", row.category);
            if let Some(status) = row.status {
                println!("Status:   {status}");
            }
            println!("File:     {}", row.receipt.file);
            if !row.receipt.tag_names().is_empty() {
                println!("Tags:     {}", row.receipt.tag_names().join(", "));
            }
            if let Some(notes) = &row.receipt.notes {
                println!("Notes:    {notes}");
            }
        }
        Command::Delete { ids } => {
            let ids: Vec<RecordId> = ids.into_iter().map(RecordId::from).collect();
            let deleted = delete_receipts_with_transactions(&ids, store)?;
            println!("Deleted {deleted} receipt(s).");
        }
        Command::Categories { command } => run_category_command(command, store)?,
        Command::Tags { command } => run_tag_command(command, store)?,
        Command::Dashboard => {
            let summary = DashboardSummary::compute(
                &get_all_transactions(&state.store)?,
                &get_all_receipts(&state.store)?,
                state.today()?,
            );
            print_dashboard(&summary);
        }
        Command::Report {
            from,
            to,
            category,
            export,
        } => {
            let report = Report::compute(
                &get_all_transactions(store)?,
                &get_all_receipts(store)?,
                &ReportFilter { from, to, category },
            );
            print_report(&report);

            if let Some(path) = export {
                write_transactions_csv(&report.transactions, File::create(&path)?)?;
                println!("Exported {} transactions to {}.", report.transactions.len(), path.display());
            }
        }
        Command::Notifications { mark_read, clear } => {
            if clear {
                clear_all(store)?;
            } else if mark_read {
                mark_all_as_read(store)?;
            }

            for notification in get_notifications(store)? {
                println!(
                    "{} {:<18} {}",
                    if notification.read { " " } else { "*" },
                    notification.title,
                    notification.message
                );
            }
        }
        Command::NotificationSettings { toggle, channel } => {
            let settings = match (toggle, channel) {
                (Some(event), Some(channel)) => toggle_notification_setting(event, channel, store)?,
                _ => load_notification_settings(store)?,
            };

            for event in NotificationEvent::ALL {
                let channels = settings.channels(event);
                println!(
                    "{:<16} email: {:<5} push: {:<5} {}",
                    event.to_string(),
                    channels.email,
                    channels.push,
                    event.description()
                );
            }
        }
        Command::Preferences {
            language,
            currency,
            display_timezone,
            date_format,
            dark_mode,
        } => {
            let mut preferences = load_preferences(store)?;
            let changed = language.is_some()
                || currency.is_some()
                || display_timezone.is_some()
                || date_format.is_some()
                || dark_mode.is_some();

            preferences.language = language.unwrap_or(preferences.language);
            preferences.currency = currency.unwrap_or(preferences.currency);
            preferences.timezone = display_timezone.unwrap_or(preferences.timezone);
            preferences.date_format = date_format.unwrap_or(preferences.date_format);
            preferences.dark_mode = dark_mode.unwrap_or(preferences.dark_mode);

            if changed {
                save_preferences(&preferences, store)?;
            }

            println!("Language:    {}", preferences.language);
            println!("Currency:    {}", preferences.currency);
            println!("Timezone:    {}", preferences.timezone);
            println!("Date format: {}", preferences.date_format);
            println!("Dark mode:   {}", preferences.dark_mode);
        }
        Command::Integrations { toggle } => {
            if let Some(name) = toggle
                && toggle_integration(&name, store)?.is_none()
            {
                println!("No integration called {name}.");
            }

            for integration in get_integrations(store)? {
                println!(
                    "{:<14} {:<12} {}",
                    integration.name,
                    if integration.connected { "connected" } else { "-" },
                    integration.desc
                );
            }
        }
        Command::Billing { toggle_plan: toggle, card } => {
            let plan = if toggle {
                toggle_plan(store)?
            } else {
                get_billing_plan(store)?
            };

            if let Some(card) = card {
                save_payment_method(&card, store)?;
            }

            println!("Plan: {plan}");
            match get_payment_method(store)? {
                Some(method) => println!(
                    "Card: {} ending in {} (expires {})",
                    method.kind, method.last4, method.expiry
                ),
                None => println!("Card: none"),
            }
            for item in get_billing_history(store)? {
                println!("{:<14} {:<20} {:>8}  {}", item.date, item.desc, item.amount, item.status);
            }
        }
    }

    Ok(())
}

fn run_category_command(
    command: LabelCommand,
    store: &mut SqliteStore,
) -> Result<(), Box<dyn Error>> {
    match command {
        LabelCommand::List => {
            for usage in get_category_usage(store)? {
                println!(
                    "{:<36}  {:<20}  {} transaction(s)",
                    usage.category.id, usage.category.name, usage.transaction_count
                );
            }
        }
        LabelCommand::Add { name } => {
            let category = add_category(&name, store)?;
            notify_category(ChangeAction::Added, category.name.as_ref(), store)?;
            println!("Created category {} ({}).", category.name, category.id);
        }
        LabelCommand::Rename { id, name } => {
            match rename_category(&RecordId::from(id.as_str()), &name, store)? {
                Some(category) => {
                    notify_category(ChangeAction::Updated, category.name.as_ref(), store)?;
                    println!("Renamed category to {}.", category.name);
                }
                None => println!("No category with ID {id}."),
            }
        }
        LabelCommand::Delete { id } => match delete_category(&RecordId::from(id.as_str()), store)? {
            Some(category) => {
                notify_category(ChangeAction::Deleted, category.name.as_ref(), store)?;
                println!("Deleted category {}.", category.name);
            }
            None => println!("No category with ID {id}."),
        },
    }

    Ok(())
}

fn run_tag_command(command: LabelCommand, store: &mut SqliteStore) -> Result<(), Box<dyn Error>> {
    match command {
        LabelCommand::List => {
            for usage in get_tag_usage(store)? {
                println!(
                    "{:<36}  {:<20}  {} receipt(s)",
                    usage.tag.id, usage.tag.name, usage.receipt_count
                );
            }
        }
        LabelCommand::Add { name } => {
            let tag = add_tag(&name, store)?;
            notify_tag(ChangeAction::Added, tag.name.as_ref(), store)?;
            println!("Created tag {} ({}).", tag.name, tag.id);
        }
        LabelCommand::Rename { id, name } => match rename_tag(&RecordId::from(id.as_str()), &name, store)? {
            Some(tag) => {
                notify_tag(ChangeAction::Updated, tag.name.as_ref(), store)?;
                println!("Renamed tag to {}.", tag.name);
            }
            None => println!("No tag with ID {id}."),
        },
        LabelCommand::Delete { id } => match delete_tag(&RecordId::from(id.as_str()), store)? {
            Some(tag) => {
                notify_tag(ChangeAction::Deleted, tag.name.as_ref(), store)?;
                println!("Deleted tag {}.", tag.name);
            }
            None => println!("No tag with ID {id}."),
        },
    }

    Ok(())
}

fn print_dashboard(summary: &DashboardSummary) {
    println!("{}", summary.month);
    println!(
        "Total spend:  {:>12}  {} vs. last month",
        format_currency(summary.total_spending),
        format_percent_change(summary.spending_change)
    );
    println!(
        "Receipts:     {:>12}  {:+} vs. last month",
        summary.receipt_count, summary.receipt_count_change
    );
    println!(
        "Average:      {:>12}  {} vs. last month",
        format_currency(summary.average_transaction),
        format_percent_change(summary.average_change)
    );
    if let Some((category, amount)) = &summary.top_category {
        println!("Top category: {category} ({})", format_currency(*amount));
    }

    println!();
    for (week, amount) in &summary.spending_by_week {
        println!("{week:<8} {:>12}", format_currency(*amount));
    }

    println!();
    for (category, amount) in &summary.spending_by_category {
        println!("{:<20} {:>12}", uncategorized_label(category), format_currency(*amount));
    }

    println!();
    println!("Recent activity");
    for transaction in &summary.recent_transactions {
        println!(
            "{:<14} {:<24} {:>12}  {}",
            transaction.date,
            truncate_graphemes(&transaction.vendor, MAX_VENDOR_GRAPHEMES),
            format_currency(transaction.amount),
            transaction.status
        );
    }
}

fn print_report(report: &Report) {
    println!("Total spend:  {}", format_currency(report.total_spending));
    println!("Receipts:     {}", report.receipt_count);
    println!("Average:      {}", format_currency(report.average_transaction));
    if let Some((category, _)) = &report.top_category {
        println!("Top category: {}", uncategorized_label(category));
    }

    println!();
    for (category, share) in &report.category_shares {
        println!("{:<20} {share:>5.1}%", uncategorized_label(category));
    }

    println!();
    for (day, amount) in &report.daily_spending {
        println!("{day:<12} {:>12}", format_currency(*amount));
    }
}

fn uncategorized_label(category: &str) -> &str {
    if category.is_empty() {
        "(uncategorized)"
    } else {
        category
    }
}
