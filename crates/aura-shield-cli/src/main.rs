// crates/aura-shield-cli/src/main.rs
// ============================================================================
// Module: Aura Shield CLI Entry Point
// Description: Command dispatcher for rule management and classification.
// Purpose: Provide an operator CLI over the filter engine and rule store.
// Dependencies: clap, aura-shield-config, aura-shield-core, aura-shield-store-sqlite
// ============================================================================

//! ## Overview
//! The Aura Shield CLI manages per-app rules in the `SQLite` store and
//! replays classification decisions against them. All commands resolve
//! configuration the same way: explicit `--config` path, then the
//! `AURA_SHIELD_CONFIG` environment variable, then `aura-shield.toml`.
//! Output is human-readable by default; `--json` switches to structured
//! output for scripting.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use aura_shield_config::ShieldConfig;
use aura_shield_core::BulkApplyReport;
use aura_shield_core::BulkConfig;
use aura_shield_core::FilterEngine;
use aura_shield_core::HeuristicTagClassifier;
use aura_shield_core::Notification;
use aura_shield_core::PackageName;
use aura_shield_core::ProfileId;
use aura_shield_core::Rule;
use aura_shield_core::RuleDraft;
use aura_shield_core::ShieldLevel;
use aura_shield_core::SharedRuleStore;
use aura_shield_core::SharedTagClassifier;
use aura_shield_core::TagId;
use aura_shield_core::TagRegistry;
use aura_shield_core::Timestamp;
use aura_shield_core::is_allowed;
use aura_shield_store_sqlite::SqliteRuleStore;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "aura-shield", version, disable_help_subcommand = true)]
struct Cli {
    /// Optional config file path (defaults to aura-shield.toml or env override).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Emit structured JSON output instead of text.
    #[arg(long, global = true)]
    json: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the category tag catalog.
    Tags,
    /// Rule management operations.
    Rule {
        /// Selected rule subcommand.
        #[command(subcommand)]
        command: RuleCommand,
    },
    /// Apply one configuration to a batch of packages.
    BulkApply(BulkApplyCommand),
    /// Classify a notification against the stored rules.
    Classify(ClassifyCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Rule subcommands.
#[derive(Subcommand, Debug)]
enum RuleCommand {
    /// Create or overwrite the rule for a `(package, profile)` pair.
    Set(RuleSetCommand),
    /// Show the rule configured for a `(package, profile)` pair.
    Get(RuleKeyCommand),
    /// Remove the rule for a `(package, profile)` pair.
    Remove(RuleKeyCommand),
    /// List all rules configured under a profile.
    List(RuleListCommand),
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a configuration file.
    Validate(ConfigValidateCommand),
}

/// Shield level argument.
#[derive(ValueEnum, Debug, Clone, Copy)]
enum LevelArg {
    /// Allow every notification through.
    Open,
    /// Filter by categories and keywords.
    Smart,
    /// Block everything except keyword matches.
    Fortress,
}

impl From<LevelArg> for ShieldLevel {
    fn from(value: LevelArg) -> Self {
        match value {
            LevelArg::Open => Self::Open,
            LevelArg::Smart => Self::Smart,
            LevelArg::Fortress => Self::Fortress,
        }
    }
}

/// Arguments for `rule set`.
#[derive(Args, Debug)]
struct RuleSetCommand {
    /// Package the rule applies to.
    #[arg(long, value_name = "PACKAGE")]
    package: String,
    /// Profile the rule applies under.
    #[arg(long, value_name = "PROFILE")]
    profile: String,
    /// Shield level for the rule.
    #[arg(long, value_enum, value_name = "LEVEL")]
    level: LevelArg,
    /// Category tag allowed through under smart (repeatable).
    #[arg(long = "category", value_name = "TAG")]
    categories: Vec<String>,
    /// Keyword that forces notifications through (repeatable).
    #[arg(long = "keyword", value_name = "WORD")]
    keywords: Vec<String>,
}

/// Key arguments shared by `rule get` and `rule remove`.
#[derive(Args, Debug)]
struct RuleKeyCommand {
    /// Package the rule applies to.
    #[arg(long, value_name = "PACKAGE")]
    package: String,
    /// Profile the rule applies under.
    #[arg(long, value_name = "PROFILE")]
    profile: String,
}

/// Arguments for `rule list`.
#[derive(Args, Debug)]
struct RuleListCommand {
    /// Profile to list rules for.
    #[arg(long, value_name = "PROFILE")]
    profile: String,
}

/// Arguments for `bulk-apply`.
#[derive(Args, Debug)]
struct BulkApplyCommand {
    /// Package to configure (repeatable, at least one).
    #[arg(long = "package", value_name = "PACKAGE", required = true)]
    packages: Vec<String>,
    /// Profile the rules apply under.
    #[arg(long, value_name = "PROFILE")]
    profile: String,
    /// Shield level for every package.
    #[arg(long, value_enum, value_name = "LEVEL")]
    level: LevelArg,
    /// Category tag allowed through under smart (repeatable).
    #[arg(long = "category", value_name = "TAG")]
    categories: Vec<String>,
    /// Keyword that forces notifications through (repeatable).
    #[arg(long = "keyword", value_name = "WORD")]
    keywords: Vec<String>,
}

/// Arguments for `classify`.
#[derive(Args, Debug)]
struct ClassifyCommand {
    /// Package that posted the notification.
    #[arg(long, value_name = "PACKAGE")]
    package: String,
    /// Profile to classify under.
    #[arg(long, value_name = "PROFILE")]
    profile: String,
    /// Notification title.
    #[arg(long, value_name = "TEXT", default_value = "")]
    title: String,
    /// Notification body.
    #[arg(long, value_name = "TEXT", default_value = "")]
    content: String,
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Path of the config file to validate.
    #[arg(long, value_name = "PATH")]
    path: PathBuf,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying a user-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Installs the stderr tracing subscriber with env-filter control.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Tags => command_tags(cli.json),
        Commands::Rule {
            command,
        } => command_rule(command, cli.config.as_deref(), cli.json),
        Commands::BulkApply(command) => command_bulk_apply(command, cli.config.as_deref(), cli.json),
        Commands::Classify(command) => command_classify(command, cli.config.as_deref(), cli.json),
        Commands::Config {
            command,
        } => command_config(command),
    }
}

// ============================================================================
// SECTION: Tags Command
// ============================================================================

/// Executes the `tags` command.
fn command_tags(json: bool) -> CliResult<ExitCode> {
    let registry = TagRegistry::builtin();
    if json {
        print_json(registry.sections())?;
        return Ok(ExitCode::SUCCESS);
    }
    for section in registry.sections() {
        write_stdout_line(&section.section)?;
        for tag in &section.tags {
            write_stdout_line(&format!("  {} ({}): {}", tag.label, tag.id, tag.description))?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Rule Commands
// ============================================================================

/// Executes a `rule` subcommand.
fn command_rule(
    command: RuleCommand,
    config_path: Option<&std::path::Path>,
    json: bool,
) -> CliResult<ExitCode> {
    let engine = build_engine(config_path)?;
    match command {
        RuleCommand::Set(command) => {
            let draft = RuleDraft {
                package_name: PackageName::new(command.package),
                profile_id: ProfileId::new(command.profile),
                shield_level: command.level.into(),
                active_categories: tag_set(&command.categories),
                custom_keywords: command.keywords.into_iter().collect(),
            };
            let rule = engine
                .upsert_rule(draft, now()?)
                .map_err(|err| CliError::new(format!("rule set failed: {err}")))?;
            if json {
                print_json(&rule)?;
            } else {
                write_stdout_line(&format!(
                    "rule saved: {} under {} ({})",
                    rule.package_name,
                    rule.profile_id,
                    rule.shield_level.as_str()
                ))?;
            }
            Ok(ExitCode::SUCCESS)
        }
        RuleCommand::Get(command) => {
            let package = PackageName::new(command.package);
            let profile = ProfileId::new(command.profile);
            let rule = engine
                .rule(&package, &profile)
                .map_err(|err| CliError::new(format!("rule get failed: {err}")))?;
            if json {
                print_json(&rule)?;
                return Ok(ExitCode::SUCCESS);
            }
            match rule {
                Some(rule) => print_rule(&rule)?,
                None => write_stdout_line(&format!(
                    "no rule configured for {package} under {profile}; default policy applies"
                ))?,
            }
            Ok(ExitCode::SUCCESS)
        }
        RuleCommand::Remove(command) => {
            let package = PackageName::new(command.package);
            let profile = ProfileId::new(command.profile);
            engine
                .remove_rule(&package, &profile)
                .map_err(|err| CliError::new(format!("rule remove failed: {err}")))?;
            write_stdout_line(&format!("rule removed: {package} under {profile}"))?;
            Ok(ExitCode::SUCCESS)
        }
        RuleCommand::List(command) => {
            let profile = ProfileId::new(command.profile);
            let rules = engine
                .rules_for_profile(&profile)
                .map_err(|err| CliError::new(format!("rule list failed: {err}")))?;
            if json {
                print_json(&rules)?;
                return Ok(ExitCode::SUCCESS);
            }
            if rules.is_empty() {
                write_stdout_line(&format!("no rules configured under {profile}"))?;
                return Ok(ExitCode::SUCCESS);
            }
            for rule in &rules {
                print_rule(rule)?;
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

// ============================================================================
// SECTION: Bulk Apply Command
// ============================================================================

/// Executes the `bulk-apply` command.
fn command_bulk_apply(
    command: BulkApplyCommand,
    config_path: Option<&std::path::Path>,
    json: bool,
) -> CliResult<ExitCode> {
    let engine = build_engine(config_path)?;
    let request = BulkConfig {
        packages: command.packages.into_iter().map(PackageName::new).collect(),
        profile_id: ProfileId::new(command.profile),
        shield_level: command.level.into(),
        active_categories: tag_set(&command.categories),
        custom_keywords: command.keywords.into_iter().collect(),
    };
    let report = engine.apply_bulk_config(&request, now()?);
    if json {
        print_json(&report)?;
    } else {
        print_bulk_report(&report)?;
    }
    if report.applied.is_empty() && !report.failed.is_empty() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Prints a bulk application report as text.
fn print_bulk_report(report: &BulkApplyReport) -> CliResult<()> {
    write_stdout_line(&format!(
        "applied {} rule(s), {} failure(s)",
        report.applied.len(),
        report.failed.len()
    ))?;
    for (package, error) in &report.failed {
        write_stdout_line(&format!("  failed {package}: {error}"))?;
    }
    Ok(())
}

// ============================================================================
// SECTION: Classify Command
// ============================================================================

/// Classification output record for JSON mode.
#[derive(Debug, Serialize)]
struct ClassifyOutput {
    /// Whether the notification is surfaced.
    allowed: bool,
    /// Full engine decision.
    decided: aura_shield_core::Decided,
}

/// Executes the `classify` command.
fn command_classify(
    command: ClassifyCommand,
    config_path: Option<&std::path::Path>,
    json: bool,
) -> CliResult<ExitCode> {
    let engine = build_engine(config_path)?;
    let notification =
        Notification::new(command.package.as_str(), &command.title, &command.content, now()?);
    let profile = ProfileId::new(command.profile);
    let decided = engine
        .decide(&notification, &profile)
        .map_err(|err| CliError::new(format!("classify failed: {err}")))?;
    if json {
        print_json(&ClassifyOutput {
            allowed: is_allowed(&decided),
            decided,
        })?;
        return Ok(ExitCode::SUCCESS);
    }
    let outcome = if is_allowed(&decided) { "allow" } else { "suppress" };
    write_stdout_line(&format!(
        "{outcome} ({:?} via {:?})",
        decided.verdict.reason, decided.rule_source
    ))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Command
// ============================================================================

/// Executes a `config` subcommand.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => {
            ShieldConfig::load(Some(&command.path))
                .map_err(|err| CliError::new(format!("config invalid: {err}")))?;
            write_stdout_line("config ok")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

// ============================================================================
// SECTION: Engine Construction
// ============================================================================

/// Loads configuration and builds the filter engine over the `SQLite` store.
fn build_engine(config_path: Option<&std::path::Path>) -> CliResult<FilterEngine> {
    let config = ShieldConfig::load(config_path)
        .map_err(|err| CliError::new(format!("config load failed: {err}")))?;
    let store = SqliteRuleStore::open(&config.store_config())
        .map_err(|err| CliError::new(format!("store open failed: {err}")))?;
    let classifier = HeuristicTagClassifier::builtin()
        .map_err(|err| CliError::new(format!("classifier init failed: {err}")))?;
    Ok(FilterEngine::new(
        SharedRuleStore::from_store(store),
        SharedTagClassifier::from_classifier(classifier),
    )
    .with_default_policy(config.default_policy()))
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the current wall-clock time as a millisecond timestamp.
fn now() -> CliResult<Timestamp> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| CliError::new(format!("system clock before epoch: {err}")))?;
    let millis = i64::try_from(elapsed.as_millis())
        .map_err(|err| CliError::new(format!("system clock out of range: {err}")))?;
    Ok(Timestamp::UnixMillis(millis))
}

/// Collects repeated tag arguments into an identifier set.
fn tag_set(values: &[String]) -> BTreeSet<TagId> {
    values.iter().map(|value| TagId::new(value.as_str())).collect()
}

/// Prints a rule as a single text line.
fn print_rule(rule: &Rule) -> CliResult<()> {
    let categories: Vec<&str> =
        rule.active_categories.iter().map(aura_shield_core::TagId::as_str).collect();
    let keywords: Vec<&str> = rule.custom_keywords.iter().map(String::as_str).collect();
    write_stdout_line(&format!(
        "{} under {}: {} categories=[{}] keywords=[{}]",
        rule.package_name,
        rule.profile_id,
        rule.shield_level.as_str(),
        categories.join(", "),
        keywords.join(", ")
    ))
}

/// Serializes a value as pretty JSON.
fn render_json<T: Serialize + ?Sized>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| CliError::new(format!("json encoding failed: {err}")))
}

/// Prints a value as pretty JSON to stdout.
fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    write_stdout_line(&render_json(value)?)
}

/// Writes a line to stdout, surfacing failures as CLI errors.
fn write_stdout_line(message: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
        .map_err(|err| CliError::new(format!("stdout write failed: {err}")))
}

/// Writes a line to stderr, ignoring failures.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
