use super::layout::TerminalLayout;
use super::print::{print_divisions, print_form, print_messages, print_templates, TerminalNotifier};
use super::setup::{Cli, Commands, Edits, Selection, Target};
use anyhow::{Context, Result};
use chartpad::api::ChartpadApi;
use chartpad::clipboard::{Clipboard, FallbackClipboard, Osc52Clipboard, SystemClipboard};
use chartpad::config::{self, ChartpadConfig, ConfigAction};
use chartpad::copy::{NOTHING_TO_COPY, NO_TEMPLATE};
use chartpad::notify::Notifier;
use chartpad::source::fs::FsSource;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Log filter environment variable, e.g. `CHARTPAD_LOG=chartpad=debug`.
const LOG_ENV: &str = "CHARTPAD_LOG";

struct AppContext {
    api: ChartpadApi<FsSource>,
    config: ChartpadConfig,
    notifier: TerminalNotifier,
}

/// Runs the CLI. `Ok(false)` means an error was reported to the user.
pub fn run() -> Result<bool> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_dir = ChartpadConfig::dir()?;
    if let Some(Commands::Config { key, value }) = &cli.command {
        return handle_config(&config_dir, key.clone(), value.clone());
    }

    let config = ChartpadConfig::load(&config_dir).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable config");
        ChartpadConfig::default()
    });
    let mut ctx = init_context(&cli, config)?;

    match cli.command {
        Some(Commands::Divisions) => handle_divisions(&mut ctx),
        Some(Commands::Templates { selection }) => handle_templates(&mut ctx, &selection),
        Some(Commands::Show { selection, edits }) => handle_show(&mut ctx, &selection, &edits)?,
        Some(Commands::Text {
            selection,
            edits,
            target,
        }) => handle_text(&mut ctx, &selection, &edits, &target)?,
        Some(Commands::Copy {
            selection,
            edits,
            target,
        }) => handle_copy(&mut ctx, &selection, &edits, &target)?,
        Some(Commands::Config { .. }) => {}
        None => handle_show(&mut ctx, &Selection::default(), &Edits::default())?,
    }

    Ok(!ctx.notifier.had_error())
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("chartpad=warn")),
        1 => EnvFilter::new("chartpad=info"),
        _ => EnvFilter::new("chartpad=debug"),
    };
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

fn init_context(cli: &Cli, config: ChartpadConfig) -> Result<AppContext> {
    let root = match cli.root.clone().or_else(|| config.root.clone()) {
        Some(root) => root,
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    tracing::info!(root = %root.display(), "using template root");

    Ok(AppContext {
        api: ChartpadApi::new(FsSource::new(root)),
        config,
        notifier: TerminalNotifier::default(),
    })
}

/// Loads divisions and applies the selection. Returns `false` when nothing usable
/// could be selected.
fn open(ctx: &mut AppContext, selection: &Selection) -> bool {
    let preferred = selection
        .division
        .clone()
        .or_else(|| ctx.config.default_division.clone());
    if !ctx.api.init(preferred.as_deref(), &mut ctx.notifier) {
        return false;
    }
    if let Some(template) = &selection.template {
        if ctx.api.template_file() != Some(template.as_str()) {
            return ctx.api.select_template(template, &mut ctx.notifier);
        }
    }
    ctx.api.form().is_some()
}

fn apply_edits(ctx: &mut AppContext, edits: &Edits) -> Result<()> {
    for id in &edits.check {
        ctx.api
            .set_checked(id, true)
            .with_context(|| format!("--check {}", id))?;
    }
    for id in &edits.uncheck {
        ctx.api
            .set_checked(id, false)
            .with_context(|| format!("--uncheck {}", id))?;
    }
    for (id, text) in &edits.set {
        ctx.api
            .set_value(id, text)
            .with_context(|| format!("--set {}", id))?;
    }
    Ok(())
}

fn handle_divisions(ctx: &mut AppContext) {
    if ctx.api.load_divisions(&mut ctx.notifier) {
        print_divisions(ctx.api.divisions());
    }
}

fn handle_templates(ctx: &mut AppContext, selection: &Selection) {
    let preferred = selection
        .division
        .clone()
        .or_else(|| ctx.config.default_division.clone());
    if !ctx.api.load_divisions(&mut ctx.notifier) {
        return;
    }
    let folder = match preferred {
        Some(folder) => folder,
        None => match ctx.api.divisions().first() {
            Some(division) => division.folder.clone(),
            None => return,
        },
    };
    if ctx.api.select_division(&folder, &mut ctx.notifier) {
        if let Some(division) = ctx.api.division() {
            println!("{}", division.display_name());
        }
        print_templates(ctx.api.templates(), ctx.api.template_file());
    }
}

fn handle_show(ctx: &mut AppContext, selection: &Selection, edits: &Edits) -> Result<()> {
    if !open(ctx, selection) {
        return Ok(());
    }
    apply_edits(ctx, edits)?;

    let layout = TerminalLayout::new(&ctx.config);
    ctx.api.run_frame(&layout);
    if let Some(form) = ctx.api.form() {
        print_form(form);
    }
    Ok(())
}

fn handle_text(
    ctx: &mut AppContext,
    selection: &Selection,
    edits: &Edits,
    target: &Target,
) -> Result<()> {
    if !open(ctx, selection) {
        return Ok(());
    }
    apply_edits(ctx, edits)?;

    let text = match target.key() {
        Some(key) => ctx.api.copy_text(key),
        None => ctx.api.all_text(),
    };
    match text {
        Some(text) => println!("{}", text),
        None if ctx.api.form().is_none() => ctx.notifier.notify_error(NO_TEMPLATE),
        None => ctx.notifier.notify_error(NOTHING_TO_COPY),
    }
    Ok(())
}

fn handle_copy(
    ctx: &mut AppContext,
    selection: &Selection,
    edits: &Edits,
    target: &Target,
) -> Result<()> {
    if !open(ctx, selection) {
        return Ok(());
    }
    apply_edits(ctx, edits)?;

    let mut clipboard: Box<dyn Clipboard> = if ctx.config.osc52_fallback {
        Box::new(FallbackClipboard::new(SystemClipboard, Osc52Clipboard))
    } else {
        Box::new(SystemClipboard)
    };
    match target.key() {
        Some(key) => ctx
            .api
            .copy_section(key, clipboard.as_mut(), &mut ctx.notifier),
        None => ctx.api.copy_all(clipboard.as_mut(), &mut ctx.notifier),
    };
    Ok(())
}

fn handle_config(dir: &Path, key: Option<String>, value: Option<String>) -> Result<bool> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let messages = config::run(dir, action)
        .with_context(|| format!("config in {}", dir.display()))?;
    print_messages(&messages);
    Ok(!messages.iter().any(|m| m.is_error()))
}
