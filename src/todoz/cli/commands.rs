//! # CLI Layer
//!
//! This module is **one possible UI client** for todoz; the library does not
//! depend on it.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `load_config()`: Config file plus command-line overrides
//! - `handle_*()`: Per-command handlers that call the service and print
//!
//! Every handler that changes todos ends with `TodoService::save`, so the todo
//! file and the summary are rewritten after each command.

use super::logging;
use super::print::{print_files, print_info, print_success, print_todo, print_todos, print_warning};
use super::setup::{AddArgs, Cli, Commands, UpdateArgs};
use clap::Parser;
use todoz::catalog;
use todoz::config::Config;
use todoz::error::Result;
use todoz::service::{TodoService, TodoUpdate};

struct AppContext {
    config: Config,
    file: String,
}

impl AppContext {
    fn open_service(&self) -> Result<TodoService> {
        let name = catalog::normalize_file_name(&self.file)?;
        TodoService::new(self.config.full_path(&name), self.config.clone())
    }

    fn save(&self, service: &TodoService) -> Result<()> {
        self.config.ensure_storage_dir()?;
        service.save()
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let _logger = logging::init(cli.verbose);

    let ctx = AppContext {
        config: load_config(&cli)?,
        file: cli.file.clone(),
    };

    match cli.command {
        Some(Commands::New { name }) => handle_new(&ctx, &name),
        Some(Commands::Files) => handle_files(&ctx),
        Some(Commands::RmFile { name }) => handle_rm_file(&ctx, &name),
        Some(Commands::Add(args)) => handle_add(&ctx, args),
        Some(Commands::Show { id }) => handle_show(&ctx, &id),
        Some(Commands::Update(args)) => handle_update(&ctx, args),
        Some(Commands::Delete { id }) => handle_delete(&ctx, &id),
        Some(Commands::List) | None => handle_list(&ctx),
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match cli.config_dir.clone().or_else(Config::default_dir) {
        Some(dir) => Config::load(dir)?,
        None => Config::default(),
    };

    if let Some(dir) = &cli.storage_dir {
        config.storage_dir = dir.clone();
    }
    if let Some(summary) = &cli.summary {
        config.summary_file = summary.clone();
    }
    Ok(config)
}

/// Accepts any case and the one-letter forms; the service itself only takes
/// canonical names.
fn normalize_priority_arg(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    match upper.as_str() {
        "L" => "LOW".to_string(),
        "M" => "MEDIUM".to_string(),
        "H" => "HIGH".to_string(),
        _ => upper,
    }
}

fn handle_new(ctx: &AppContext, name: &str) -> Result<()> {
    let path = catalog::create_file(&ctx.config, name)?;
    let service = TodoService::new(&path, ctx.config.clone())?;
    ctx.save(&service)?;
    print_success(&format!("Todo file created: {}", path.display()));
    Ok(())
}

fn handle_files(ctx: &AppContext) -> Result<()> {
    let files = catalog::list_files(&ctx.config)?;
    print_files(&files);
    Ok(())
}

fn handle_rm_file(ctx: &AppContext, name: &str) -> Result<()> {
    let path = catalog::delete_file(&ctx.config, name)?;
    print_success(&format!("File deleted: {}", path.display()));
    Ok(())
}

fn handle_add(ctx: &AppContext, args: AddArgs) -> Result<()> {
    let mut service = ctx.open_service()?;
    let todo = service.create_todo(
        &args.task,
        &args.due,
        &args.completed,
        &normalize_priority_arg(&args.priority),
        &args.labels,
    )?;
    ctx.save(&service)?;
    print_success(&format!("Todo created ({}): {}", todo.id, todo.task));
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let service = ctx.open_service()?;
    print_todos(&service.list_todos());
    Ok(())
}

fn handle_show(ctx: &AppContext, id: &str) -> Result<()> {
    let service = ctx.open_service()?;
    print_todo(&service.get_todo(id.trim())?);
    Ok(())
}

fn handle_update(ctx: &AppContext, args: UpdateArgs) -> Result<()> {
    let updates = TodoUpdate {
        task: args.task,
        due_date: args.due,
        priority: args.priority.as_deref().map(normalize_priority_arg),
        labels: args.labels,
        completed: args.completed,
    };
    if updates.is_empty() {
        print_warning("Nothing to update: pass at least one field to change.");
        return Ok(());
    }

    let mut service = ctx.open_service()?;
    let todo = service.update_todo(args.id.trim(), &updates)?;
    ctx.save(&service)?;
    print_success(&format!("Todo updated ({}): {}", todo.id, todo.task));
    print_info(&format!("changed: {}", updates.field_names().join(", ")));
    Ok(())
}

fn handle_delete(ctx: &AppContext, id: &str) -> Result<()> {
    let mut service = ctx.open_service()?;
    let removed = service.delete_todo(id.trim())?;
    ctx.save(&service)?;
    print_success(&format!("Todo deleted ({}): {}", removed.id, removed.task));
    Ok(())
}
