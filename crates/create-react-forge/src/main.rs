//! create-react-forge - Project scaffolding for React front ends

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use react_forge_core::choices::{
    ApiClient, Deployment, Framework, NextRouter, PackageManager, Routing, StateManagement,
    Styling, Testing,
};
use react_forge_core::tui::{self, CreateArgs, UPGRADE_COMMAND};
use react_forge_core::wizard::{self, AcceptDefaults, WizardOutcome};
use react_forge_core::{project, ChoiceDraft, ProjectOptions, VersionCatalog};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "create-react-forge")]
#[command(about = "CLI for scaffolding React projects with Vite or Next.js")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Log resolution details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new React project
    Create(CliCreateArgs),
    /// Print the resolved dependencies and file list without prompting or writing
    Plan(CliCreateArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Language {
    Typescript,
    Javascript,
}

#[derive(Parser, Debug, Default)]
pub struct CliCreateArgs {
    /// Project directory to create
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// package.json name (defaults to the directory name)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Build tool: vite or nextjs
    #[arg(short, long)]
    pub framework: Option<Framework>,

    /// Next.js router: app or pages
    #[arg(long = "next-router")]
    pub next_router: Option<NextRouter>,

    /// Client-side routing for Vite: react-router or none
    #[arg(long)]
    pub routing: Option<Routing>,

    #[arg(short, long, value_enum)]
    pub language: Option<Language>,

    /// Add ESLint
    #[arg(long, conflicts_with = "no_linting")]
    pub linting: bool,

    #[arg(long = "no-linting")]
    pub no_linting: bool,

    /// css, tailwind or styled-components
    #[arg(short, long)]
    pub styling: Option<Styling>,

    /// redux, zustand or none
    #[arg(long)]
    pub state: Option<StateManagement>,

    /// axios-react-query, axios-only, fetch-react-query, fetch-only or none
    #[arg(long)]
    pub api: Option<ApiClient>,

    /// vitest, jest or none
    #[arg(long)]
    pub testing: Option<Testing>,

    /// vercel, netlify or none
    #[arg(long)]
    pub deploy: Option<Deployment>,

    /// npm or yarn
    #[arg(short, long = "package-manager")]
    pub package_manager: Option<PackageManager>,

    /// Suggest `git init` in the next steps
    #[arg(long, conflicts_with = "no_git")]
    pub git: bool,

    #[arg(long = "no-git")]
    pub no_git: bool,

    /// Suggest opening the project in an editor
    #[arg(long, conflicts_with = "no_editor")]
    pub editor: bool,

    #[arg(long = "no-editor")]
    pub no_editor: bool,

    /// YAML answers file; flags win over its values
    #[arg(short, long)]
    pub answers: Option<PathBuf>,

    /// Version catalog to use instead of the embedded one (also REACT_FORGE_CATALOG)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Extra or replacement package.json script (NAME=COMMAND, repeatable)
    #[arg(long = "script", value_parser = parse_script)]
    pub scripts: Vec<(String, String)>,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,

    /// Write into a non-empty directory
    #[arg(long)]
    pub force: bool,

    /// Show what would be generated without writing anything
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

fn parse_script(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, command)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), command.to_string()))
        }
        _ => Err(format!("expected NAME=COMMAND, got '{}'", raw)),
    }
}

fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

impl CliCreateArgs {
    fn preset(&self) -> ChoiceDraft {
        ChoiceDraft {
            package_manager: self.package_manager,
            framework: self.framework,
            next_routing: self.next_router,
            routing: self.routing,
            typescript: self.language.map(|l| l == Language::Typescript),
            linting: switch(self.linting, self.no_linting),
            styling: self.styling,
            state_management: self.state,
            api: self.api,
            testing: self.testing,
            deployment: self.deploy,
            init_git: switch(self.git, self.no_git),
            open_editor: switch(self.editor, self.no_editor),
        }
    }
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            preset: args.preset(),
            directory: args.directory,
            name: args.name,
            answers_file: args.answers,
            catalog: args.catalog,
            scripts: args.scripts,
            yes: args.yes,
            force: args.force,
            dry_run: args.dry_run,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Resolve every unanswered axis to its default and print the plan
fn print_plan(args: CreateArgs) -> Result<()> {
    let preset = tui::load_preset(&args)?;
    let schema = match wizard::run(preset, Vec::new(), &mut AcceptDefaults)? {
        WizardOutcome::Completed(schema) => schema,
        WizardOutcome::Cancelled => return Ok(()),
    };

    let catalog = VersionCatalog::load(args.catalog.as_deref())?;
    if let Some(warning) = catalog.compatibility_warning(CLI_VERSION, UPGRADE_COMMAND) {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }

    let project_name = match (&args.name, &args.directory) {
        (Some(name), _) => name.clone(),
        (None, Some(dir)) => tui::default_project_name(dir),
        (None, None) => "react-app".to_string(),
    };
    let options = ProjectOptions {
        project_name,
        script_overrides: args.scripts,
    };
    let plan = project::plan(&schema, &catalog, &options)?;

    println!("{} {}", "Framework:".bold(), schema.framework().display_name());
    print!("{}", project::summary(&plan));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_tracing(args.verbose);
    tracing::debug!(version = CLI_VERSION, command = ?args.command, "starting");

    let create_args: CreateArgs = match args.command {
        Some(Command::Plan(plan_args)) => return print_plan(plan_args.into()),
        Some(Command::Create(create_args)) => create_args.into(),
        // No subcommand provided, default to create behavior (interactive mode)
        None => CreateArgs::default(),
    };

    let result = tui::run(create_args, CLI_VERSION).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
