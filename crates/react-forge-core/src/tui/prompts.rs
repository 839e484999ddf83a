//! Charm-style CLI prompts using cliclack

use crate::catalog::VersionCatalog;
use crate::choices::{ChoiceDraft, ChoiceSchema, PackageManager};
use crate::config::{validate_project_name, ProjectOptions};
use crate::project::{self, ProjectPlan};
use crate::runtime::check;
use crate::wizard::{self, AcceptDefaults, PromptReply, Prompter, StepPrompt, WizardOutcome};
use anyhow::{Context, Result};
use std::io;
use std::path::{Path, PathBuf};

/// Value of the synthetic "go back" item
const BACK: &str = "__back__";

/// Upgrade command shown in catalog version warnings
pub const UPGRADE_COMMAND: &str = "cargo install create-react-forge --force";

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project directory to create
    pub directory: Option<PathBuf>,

    /// package.json name; defaults to the directory name
    pub name: Option<String>,

    /// Answers given as flags; these win over the answers file
    pub preset: ChoiceDraft,

    /// YAML answers file
    pub answers_file: Option<PathBuf>,

    /// Version catalog overriding the embedded one
    pub catalog: Option<PathBuf>,

    /// Scripts added to or replacing the generated defaults
    pub scripts: Vec<(String, String)>,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,

    /// Write into a non-empty directory
    pub force: bool,

    /// Print the plan instead of writing
    pub dry_run: bool,
}

/// Prompts each wizard step with a cliclack select
#[derive(Debug, Default)]
pub struct CliclackPrompter;

impl Prompter for CliclackPrompter {
    fn prompt(&mut self, prompt: &StepPrompt) -> Result<PromptReply> {
        let mut select = cliclack::select(prompt.heading());
        for choice in &prompt.choices {
            select = select.item(choice.value, choice.label, choice.hint);
        }
        if prompt.allow_back {
            select = select.item(BACK, "← Go back", "");
        }

        match select.initial_value(prompt.initial).interact() {
            Ok(BACK) => Ok(PromptReply::Back),
            Ok(value) => Ok(PromptReply::Selected(value.to_string())),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(PromptReply::Interrupted),
            Err(e) => Err(e.into()),
        }
    }
}

/// Flags over the answers file; either may be absent
pub fn load_preset(args: &CreateArgs) -> Result<ChoiceDraft> {
    let from_file = match &args.answers_file {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read answers file: {}", path.display()))?;
            ChoiceDraft::from_yaml(&content)
                .with_context(|| format!("Invalid answers file: {}", path.display()))?
        }
        None => ChoiceDraft::default(),
    };
    Ok(from_file.overlay(&args.preset)?)
}

/// Run the CLI with interactive prompts
pub async fn run(args: CreateArgs, cli_version: &str) -> Result<()> {
    check_name_flag(&args)?;
    cliclack::intro("create-react-forge")?;

    // Step 1: Detect package managers
    let package_managers = detect_package_managers()?;

    // Step 2: Load the version catalog
    let catalog = load_catalog(&args, cli_version)?;

    // Step 3: Collect answers
    let preset = load_preset(&args)?;
    let outcome = if args.yes {
        wizard::run(preset, package_managers, &mut AcceptDefaults)?
    } else {
        wizard::run(preset, package_managers, &mut CliclackPrompter)?
    };
    let schema = match outcome {
        WizardOutcome::Completed(schema) => schema,
        WizardOutcome::Cancelled => {
            cliclack::outro_cancel("Setup cancelled.")?;
            return Ok(());
        }
    };

    // Step 4: Select directory
    let (project_dir, force) = select_directory(&args)?;
    let project_name = args
        .name
        .clone()
        .unwrap_or_else(|| default_project_name(&project_dir));

    // Step 5: Plan the project
    let options = ProjectOptions {
        project_name,
        script_overrides: args.scripts.clone(),
    };
    let plan = project::plan(&schema, &catalog, &options)?;
    for warning in &plan.warnings {
        cliclack::log::warning(warning)?;
    }

    if args.dry_run {
        cliclack::note("Dry run", project::summary(&plan))?;
        cliclack::outro("Nothing was written.")?;
        return Ok(());
    }

    // Step 6: Write files
    create_project(&plan, &project_dir, force).await?;

    // Step 7: Show next steps
    print_next_steps(&schema, &project_dir)?;

    Ok(())
}

fn detect_package_managers() -> Result<Vec<PackageManager>> {
    let spinner = cliclack::spinner();
    spinner.start("Detecting package managers...");

    let detected = check::detect_package_managers();
    let info: Vec<String> = detected.iter().map(|i| i.describe()).collect();
    spinner.stop(format!("Package managers: {}", info.join(", ")));

    if detected.iter().all(|i| !i.available) {
        cliclack::log::warning(
            "No package manager found; install npm or Yarn before running the project",
        )?;
    }
    Ok(check::available(&detected))
}

fn load_catalog(args: &CreateArgs, cli_version: &str) -> Result<VersionCatalog> {
    let catalog = VersionCatalog::load(args.catalog.as_deref())?;
    if let Some(warning) = catalog.compatibility_warning(cli_version, UPGRADE_COMMAND) {
        cliclack::log::warning(format!(
            "Version warning: {}",
            warning.lines().next().unwrap_or(&warning)
        ))?;
    }
    Ok(catalog)
}

/// Last path component turned into a valid package name: lowercased, with
/// runs of other characters collapsed to `-`
pub fn default_project_name(dir: &Path) -> String {
    let raw = dir
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let mut slug = String::new();
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '~') {
            slug.push(c);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.truncate(214);

    let slug = slug.trim_matches(|c| matches!(c, '-' | '.' | '_'));
    if slug.is_empty() {
        "react-app".to_string()
    } else {
        slug.to_string()
    }
}

/// Reject a bad `--name` before any prompt is shown
fn check_name_flag(args: &CreateArgs) -> Result<()> {
    if let Some(name) = &args.name {
        validate_project_name(name).with_context(|| format!("Invalid --name '{}'", name))?;
    }
    Ok(())
}

fn select_directory(args: &CreateArgs) -> Result<(PathBuf, bool)> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    // Use --directory flag if provided
    let path = if let Some(dir) = &args.directory {
        let p = if dir.is_absolute() {
            dir.clone()
        } else {
            current_dir.join(dir)
        };
        cliclack::log::info(format!("Using directory: {}", p.display()))?;
        p
    } else if args.yes {
        current_dir.join("react-app")
    } else {
        let input: String = cliclack::input("Project directory")
            .placeholder("my-app")
            .default_input("my-app")
            .interact()?;

        if input.is_empty() || input == "." {
            current_dir
        } else {
            let p = PathBuf::from(&input);
            if p.is_absolute() {
                p
            } else {
                current_dir.join(p)
            }
        }
    };

    // Validate parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.exists() && parent != Path::new("") {
            anyhow::bail!("Parent directory does not exist: {}", parent.display());
        }
    }

    let mut force = args.force;
    if path.is_dir() && !force {
        if let Ok(entries) = std::fs::read_dir(&path) {
            let count = entries.count();
            if count > 0 {
                cliclack::log::warning(format!("Directory has {} existing items", count))?;

                // --yes never overwrites on its own
                if args.yes {
                    anyhow::bail!("Directory is not empty; pass --force to write into it.");
                }
                let confirm: bool = cliclack::confirm("Write into it anyway?")
                    .initial_value(false)
                    .interact()?;

                if !confirm {
                    anyhow::bail!("Setup cancelled.");
                }
                force = true;
            }
        }
    }

    Ok((path, force))
}

async fn create_project(plan: &ProjectPlan, project_dir: &Path, force: bool) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Creating project...");

    match project::write_project(plan, project_dir, force).await {
        Ok(written) => {
            spinner.stop(format!(
                "Created {} files in {}",
                written.len(),
                project_dir.display()
            ));
            Ok(())
        }
        Err(e) => {
            spinner.error("Failed to create project");
            Err(e)
        }
    }
}

fn print_next_steps(schema: &ChoiceSchema, project_dir: &Path) -> Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let steps = project::next_steps(schema, project_dir, &cwd);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy hacking!")?;

    Ok(())
}
