//! Top-level CLI definition and dispatch.

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell as CompletionShell, generate};
use colored::{Colorize, control};
use serde_json::{Value, json};
use thiserror::Error;

use folio_showcase::core::config::Config;
use folio_showcase::core::errors::FolioError;
use folio_showcase::logger::jsonl::{EventType, JsonlConfig, JsonlWriter, LogEntry, Severity};
use folio_showcase::showcase::contact::{ContactForm, FieldKind};
use folio_showcase::showcase::content::ShowcaseContent;
use folio_showcase::showcase::filter::{FilterState, FilterTag};
use folio_showcase::showcase::modal::{ModalPresenter, OpenOutcome};
use folio_showcase::tui::preferences::{self, UserPreferences};
use folio_showcase::tui::theme::{AccessibilityProfile, ThemeMode};
use folio_showcase::tui::{ShowcaseRuntimeConfig, open_uri, run_showcase};

const LOG_SOURCE: &str = "cli";

/// folio: a terminal portfolio showcase.
#[derive(Debug, Parser)]
#[command(
    name = "folio",
    author,
    version,
    about = "Terminal portfolio showcase",
    long_about = None
)]
pub struct Cli {
    /// Override config file path.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Force JSON output mode.
    #[arg(long, global = true)]
    json: bool,
    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
    /// Subcommand to execute. Defaults to `browse`.
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Open the interactive showcase.
    Browse(BrowseArgs),
    /// List portfolio items and whether a filter shows them.
    Projects(ProjectsArgs),
    /// Print one project's details.
    Show(ShowArgs),
    /// Validate a contact message and print its mailto: link.
    Contact(ContactArgs),
    /// Show or change the saved color theme.
    Theme(ThemeArgs),
    /// Inspect configuration.
    Config(ConfigArgs),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Debug, Clone, Args, Default)]
struct BrowseArgs {
    /// Start with the testimonial carousel paused.
    #[arg(long)]
    no_autoplay: bool,
    /// Print composed mailto: links instead of opening the mail client.
    #[arg(long)]
    no_mail_client: bool,
}

#[derive(Debug, Clone, Args)]
struct ProjectsArgs {
    /// Category tag to filter by (`all` shows everything).
    #[arg(long, short, default_value = "all", value_name = "TAG")]
    filter: String,
}

#[derive(Debug, Clone, Args)]
struct ShowArgs {
    /// Project identifier, e.g. `project3`.
    id: String,
}

#[derive(Debug, Clone, Args)]
struct ContactArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    subject: String,
    #[arg(long, default_value = "")]
    message: String,
    /// Hand the link to the desktop mail client.
    #[arg(long)]
    open: bool,
}

#[derive(Debug, Clone, Args, Default)]
struct ThemeArgs {
    #[command(subcommand)]
    command: Option<ThemeCommand>,
}

#[derive(Debug, Clone, Subcommand)]
enum ThemeCommand {
    /// Print the saved theme.
    Show,
    /// Switch between dark and light.
    Toggle,
    /// Save a specific theme.
    Set {
        #[arg(value_enum)]
        mode: ThemeChoice,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ThemeChoice {
    Dark,
    Light,
}

impl From<ThemeChoice> for ThemeMode {
    fn from(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Dark => Self::Dark,
            ThemeChoice::Light => Self::Light,
        }
    }
}

#[derive(Debug, Clone, Args, Default)]
struct ConfigArgs {
    #[command(subcommand)]
    command: Option<ConfigCommand>,
}

#[derive(Debug, Clone, Subcommand)]
enum ConfigCommand {
    /// Print resolved config file path.
    Path,
    /// Print effective merged configuration.
    Show,
    /// Validate configuration and exit.
    Validate,
}

#[derive(Debug, Clone, Args)]
struct CompletionsArgs {
    /// Shell to generate completion script for.
    #[arg(value_enum)]
    shell: CompletionShell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

/// CLI error type with explicit exit-code mapping.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input.
    #[error("{0}")]
    User(String),
    /// Environment/runtime failure.
    #[error("{0}")]
    Runtime(String),
    /// Internal bug or invariant violation.
    #[error("{0}")]
    Internal(String),
    /// JSON serialization failed.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
    /// Output write failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Process exit code contract for the CLI.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::User(_) => 1,
            Self::Runtime(_) | Self::Io(_) => 2,
            Self::Internal(_) | Self::Json(_) => 3,
        }
    }
}

impl From<FolioError> for CliError {
    fn from(error: FolioError) -> Self {
        let message = format!("[{}] {error}", error.code());
        if error.is_user_error() {
            Self::User(message)
        } else {
            Self::Runtime(message)
        }
    }
}

/// Dispatch CLI commands.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    if cli.no_color {
        control::set_override(false);
    }

    match &cli.command {
        None => run_browse(cli, &BrowseArgs::default()),
        Some(Command::Browse(args)) => run_browse(cli, args),
        Some(Command::Projects(args)) => run_projects(cli, args),
        Some(Command::Show(args)) => run_show(cli, args),
        Some(Command::Contact(args)) => run_contact(cli, args),
        Some(Command::Theme(args)) => run_theme(cli, args),
        Some(Command::Config(args)) => run_config(cli, args),
        Some(Command::Completions(args)) => {
            let mut command = Cli::command();
            let binary_name = command.get_name().to_string();
            generate(args.shell, &mut command, binary_name, &mut io::stdout());
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config, CliError> {
    Ok(Config::load(cli.config.as_deref())?)
}

fn load_content(config: &Config) -> Result<ShowcaseContent, CliError> {
    Ok(ShowcaseContent::load(config.content.file.as_deref())?)
}

fn activity_log(config: &Config) -> JsonlWriter {
    JsonlWriter::open(JsonlConfig::new(&config.paths.activity_log))
}

fn accessibility(cli: &Cli) -> AccessibilityProfile {
    if cli.no_color {
        AccessibilityProfile::from_no_color_flag(true)
    } else {
        AccessibilityProfile::from_environment()
    }
}

// ──────────────────── browse ────────────────────

fn run_browse(cli: &Cli, args: &BrowseArgs) -> Result<(), CliError> {
    if !io::stdout().is_terminal() {
        return Err(CliError::User(
            "browse needs an interactive terminal; try `folio projects`".to_string(),
        ));
    }
    let config = load_config(cli)?;
    let content = load_content(&config)?;

    let mut runtime = ShowcaseRuntimeConfig::from_config(&config, accessibility(cli));
    if args.no_autoplay {
        runtime.autoplay = false;
    }
    if args.no_mail_client {
        runtime.open_mail_client = false;
    }
    run_showcase(&runtime, content).map_err(|e| CliError::Runtime(format!("terminal: {e}")))
}

// ──────────────────── projects / show ────────────────────

fn run_projects(cli: &Cli, args: &ProjectsArgs) -> Result<(), CliError> {
    let config = load_config(cli)?;
    let content = load_content(&config)?;
    let mut filter = FilterState::new(content.items);
    filter.set_filter(FilterTag::parse(&args.filter));

    match output_mode(cli) {
        OutputMode::Human => {
            println!(
                "{} {}  ({} of {} visible)",
                "Filter:".bold(),
                filter.active_filter(),
                filter.visible_count(),
                filter.items().len()
            );
            for (i, item) in filter.items().iter().enumerate() {
                if filter.is_visible(i) {
                    println!(
                        "  {} {:<12} {:<28} {}",
                        "●".green(),
                        item.project_id,
                        item.title,
                        format!("#{}", item.category).cyan()
                    );
                } else {
                    let line = format!(
                        "  ○ {:<12} {:<28} #{}",
                        item.project_id, item.title, item.category
                    );
                    println!("{}", line.dimmed());
                }
            }
        }
        OutputMode::Json => {
            let items: Vec<Value> = filter
                .items()
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    json!({
                        "id": item.project_id,
                        "title": item.title,
                        "category": item.category,
                        "visible": filter.is_visible(i),
                    })
                })
                .collect();
            let payload = json!({
                "command": "projects",
                "filter": filter.active_filter().as_str(),
                "visible_count": filter.visible_count(),
                "items": items,
            });
            write_json_line(&payload)?;
        }
    }
    Ok(())
}

fn run_show(cli: &Cli, args: &ShowArgs) -> Result<(), CliError> {
    let config = load_config(cli)?;
    let content = load_content(&config)?;
    let mut modal = ModalPresenter::new();
    if modal.open(&content.catalog, &args.id) == OpenOutcome::NotFound {
        return Err(CliError::User(format!("unknown project id: {}", args.id)));
    }
    let view = modal
        .view()
        .ok_or_else(|| CliError::Internal("modal opened without a view".to_string()))?;

    match output_mode(cli) {
        OutputMode::Human => {
            println!("{} {}", view.icon, view.title.bold());
            println!();
            println!("{}", view.description);
            print_list("Technologies", view.technologies);
            print_list("Key features", view.features);
            print_list("Achievements", view.achievements);
        }
        OutputMode::Json => {
            let payload = json!({
                "command": "show",
                "id": view.project_id,
                "icon": view.icon,
                "title": view.title,
                "description": view.description,
                "technologies": view.technologies,
                "features": view.features,
                "achievements": view.achievements,
            });
            write_json_line(&payload)?;
        }
    }
    Ok(())
}

fn print_list(heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!();
    println!("{}", heading.cyan().bold());
    for item in items {
        println!("  • {item}");
    }
}

// ──────────────────── contact ────────────────────

fn run_contact(cli: &Cli, args: &ContactArgs) -> Result<(), CliError> {
    let config = load_config(cli)?;
    let mut log = activity_log(&config);
    let mut form = ContactForm::new();
    form.set(FieldKind::Name, args.name.as_str());
    form.set(FieldKind::Email, args.email.as_str());
    form.set(FieldKind::Subject, args.subject.as_str());
    form.set(FieldKind::Message, args.message.as_str());

    let link = match form.submit(&config.contact) {
        Ok(link) => link,
        Err(failures) => {
            let mut entry = LogEntry::new(EventType::ContactRejected, Severity::Warning)
                .with_source(LOG_SOURCE);
            entry.count = Some(failures.len());
            log.write_entry(&entry);

            match output_mode(cli) {
                OutputMode::Human => {
                    for (field, message) in &failures {
                        eprintln!("  {} {}: {message}", "✗".red(), field.label());
                    }
                }
                OutputMode::Json => {
                    let errors: Vec<Value> = failures
                        .iter()
                        .map(|(field, message)| json!({ "field": field, "message": message }))
                        .collect();
                    write_json_line(&json!({
                        "command": "contact",
                        "valid": false,
                        "errors": errors,
                    }))?;
                }
            }
            return Err(CliError::User(format!(
                "{} field(s) failed validation",
                failures.len()
            )));
        }
    };

    log.write_entry(
        &LogEntry::info(EventType::ContactPrepared)
            .with_source(LOG_SOURCE)
            .with_details(link.recipient.clone()),
    );

    let uri = link.uri();
    match output_mode(cli) {
        OutputMode::Human => println!("{uri}"),
        OutputMode::Json => write_json_line(&json!({
            "command": "contact",
            "valid": true,
            "recipient": link.recipient,
            "subject": link.subject,
            "body": link.body,
            "uri": uri,
        }))?,
    }

    if args.open {
        open_uri(&uri).map_err(|e| CliError::Runtime(format!("could not open mail client: {e}")))?;
    }
    Ok(())
}

// ──────────────────── theme ────────────────────

fn run_theme(cli: &Cli, args: &ThemeArgs) -> Result<(), CliError> {
    let config = load_config(cli)?;
    let path = &config.paths.preferences_file;
    let outcome = preferences::load(path);
    if let Some(warning) = outcome.warning() {
        eprintln!("[FOLIO-PREFS] {warning}; using defaults");
    }
    let current = outcome.into_prefs();

    let next = match &args.command {
        None | Some(ThemeCommand::Show) => None,
        Some(ThemeCommand::Toggle) => Some(current.theme.toggle()),
        Some(ThemeCommand::Set { mode }) => Some(ThemeMode::from(*mode)),
    };

    let theme = match next {
        None => current.theme,
        Some(theme) => {
            let prefs = UserPreferences { theme, ..current };
            preferences::save(&prefs, path).map_err(|e| FolioError::io(path, e))?;
            let mut entry = LogEntry::info(EventType::ThemeChanged).with_source(LOG_SOURCE);
            entry.theme = Some(theme.label().to_string());
            activity_log(&config).write_entry(&entry);
            theme
        }
    };

    match output_mode(cli) {
        OutputMode::Human => println!("{}", theme.label()),
        OutputMode::Json => write_json_line(&json!({
            "command": "theme",
            "theme": theme.label(),
            "changed": next.is_some(),
            "path": path.to_string_lossy(),
        }))?,
    }
    Ok(())
}

// ──────────────────── config ────────────────────

fn run_config(cli: &Cli, args: &ConfigArgs) -> Result<(), CliError> {
    match &args.command {
        None | Some(ConfigCommand::Path) => {
            let path = cli.config.clone().unwrap_or_else(Config::default_path);
            let exists = path.exists();

            match output_mode(cli) {
                OutputMode::Human => {
                    println!("{}", path.display());
                    if !exists {
                        println!("  (file does not exist; defaults will be used)");
                    }
                }
                OutputMode::Json => {
                    let payload = json!({
                        "command": "config path",
                        "path": path.to_string_lossy(),
                        "exists": exists,
                    });
                    write_json_line(&payload)?;
                }
            }
            Ok(())
        }
        Some(ConfigCommand::Show) => {
            let config = load_config(cli)?;

            match output_mode(cli) {
                OutputMode::Human => {
                    let toml_str = toml::to_string_pretty(&config)
                        .map_err(|e| CliError::Runtime(format!("serialize config: {e}")))?;
                    println!("{toml_str}");
                }
                OutputMode::Json => {
                    let value = serde_json::to_value(&config)?;
                    let payload = json!({
                        "command": "config show",
                        "config": value,
                    });
                    write_json_line(&payload)?;
                }
            }
            Ok(())
        }
        Some(ConfigCommand::Validate) => match Config::load(cli.config.as_deref()) {
            Ok(config) => {
                let hash = config.stable_hash()?;
                let content = load_content(&config)?;

                match output_mode(cli) {
                    OutputMode::Human => {
                        println!("{}", "Configuration is valid.".green());
                        println!("  Source: {}", config.paths.config_file.display());
                        println!("  Hash: {hash}");
                        println!(
                            "  Content: {} projects, {} testimonials",
                            content.items.len(),
                            content.testimonials.len()
                        );
                    }
                    OutputMode::Json => {
                        let payload = json!({
                            "command": "config validate",
                            "valid": true,
                            "path": config.paths.config_file.to_string_lossy(),
                            "hash": hash,
                            "projects": content.items.len(),
                            "testimonials": content.testimonials.len(),
                        });
                        write_json_line(&payload)?;
                    }
                }
                Ok(())
            }
            Err(e) => {
                match output_mode(cli) {
                    OutputMode::Human => {
                        eprintln!("{} {e}", "Configuration is INVALID:".red());
                    }
                    OutputMode::Json => {
                        let payload = json!({
                            "command": "config validate",
                            "valid": false,
                            "code": e.code(),
                            "error": e.to_string(),
                        });
                        write_json_line(&payload)?;
                    }
                }
                Err(CliError::User(format!("invalid config: {e}")))
            }
        },
    }
}

// ──────────────────── output ────────────────────

fn write_json_line(payload: &Value) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, payload)?;
    writeln!(stdout)?;
    Ok(())
}

fn output_mode(cli: &Cli) -> OutputMode {
    let env_mode = std::env::var("FOLIO_OUTPUT_FORMAT").ok();
    resolve_output_mode(cli.json, env_mode.as_deref(), io::stdout().is_terminal())
}

fn resolve_output_mode(json_flag: bool, env_mode: Option<&str>, stdout_is_tty: bool) -> OutputMode {
    if json_flag {
        return OutputMode::Json;
    }

    let fallback = if stdout_is_tty {
        OutputMode::Human
    } else {
        OutputMode::Json
    };

    match env_mode
        .map(str::trim)
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("json") => OutputMode::Json,
        Some("human") => OutputMode::Human,
        _ => fallback,
    }
}
