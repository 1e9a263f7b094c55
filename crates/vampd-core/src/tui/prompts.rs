//! Charm-style CLI prompts using cliclack

use crate::collector::Collector;
use crate::error::CollectError;
use crate::product::ProductConfig;
use crate::prompt::{
    ask_until_valid, Answer, Answers, Choice, DefaultsPrompter, Prompter, Question, QuestionKind,
};
use crate::scaffold::{self, GenerateOptions};
use crate::site::{ConfigDefaults, SiteConfig};
use crate::vcs::{resolve_clone_url, GitTool};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Directory the `<machine id>` project is created in (defaults to the current directory)
    pub directory: Option<PathBuf>,

    /// YAML file overriding the configuration defaults
    pub defaults_file: Option<PathBuf>,

    /// Skip cloning the provisioning repository
    pub skip_install: bool,

    /// Answer every prompt with its default (non-interactive mode)
    pub yes: bool,
}

/// Prompter backed by cliclack terminal widgets
#[derive(Debug, Default)]
pub struct ClackPrompter;

impl ClackPrompter {
    pub fn new() -> Self {
        Self
    }

    fn label(question: &Question) -> String {
        if question.required.is_some() && question.kind == QuestionKind::Text {
            format!("{} {}", question.message, console::style("(Required)").red())
        } else {
            question.message.clone()
        }
    }

    fn ask_one(question: &Question) -> Result<Answer, CollectError> {
        let label = Self::label(question);

        let answer = match question.kind {
            QuestionKind::Text => {
                let mut input = cliclack::input(label).required(false);
                if let Some(Answer::Text(default)) = &question.default {
                    input = input.placeholder(default).default_input(default);
                }
                if let Some(message) = question.required {
                    input = input.validate(move |value: &String| {
                        if value.is_empty() {
                            Err(message)
                        } else {
                            Ok(())
                        }
                    });
                }
                let value: String = input.interact()?;
                Answer::Text(value)
            }
            QuestionKind::Confirm => {
                let initial = matches!(question.default, Some(Answer::Confirm(true)));
                let value: bool = cliclack::confirm(label).initial_value(initial).interact()?;
                Answer::Confirm(value)
            }
            QuestionKind::Select => {
                let mut select = cliclack::select(label);
                for choice in &question.choices {
                    select = select.item(choice.value.clone(), &choice.label, &choice.hint);
                }
                if let Some(Answer::Choice(initial)) = question.default_answer() {
                    select = select.initial_value(initial);
                }
                let value: String = select.interact()?;
                Answer::Choice(value)
            }
            QuestionKind::MultiSelect => {
                let mut multi = cliclack::multiselect(label);
                for choice in &question.choices {
                    multi = multi.item(choice.value.clone(), &choice.label, &choice.hint);
                }
                if let Some(Answer::Choices(initial)) = question.default_answer() {
                    multi = multi.initial_values(initial);
                }
                let values: Vec<String> = multi.required(false).interact()?;
                Answer::Choices(values)
            }
        };

        Ok(answer)
    }
}

impl Prompter for ClackPrompter {
    fn ask(&mut self, questions: &[Question]) -> Result<Answers, CollectError> {
        let mut answers = Answers::new();
        for question in questions {
            let answer = ask_until_valid(
                question,
                || Self::ask_one(question),
                |message| {
                    cliclack::log::error(message)?;
                    Ok(())
                },
            )?;
            answers.insert(question.name, answer);
        }
        Ok(answers)
    }

    fn note(&mut self, message: &str) -> Result<(), CollectError> {
        cliclack::log::info(message)?;
        Ok(())
    }
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs) -> Result<()> {
    cliclack::intro(config.display_name())?;

    let defaults = ConfigDefaults::load_or_default(args.defaults_file.as_deref())?;
    if let Some(path) = &args.defaults_file {
        cliclack::log::info(format!("Using defaults from {}", path.display()))?;
    }

    let base_dir = resolve_base_dir(&args)?;
    let clone_url = resolve_clone_url(config)?;
    let git = GitTool::default();

    // Step 1: Check git (skip if --skip-install)
    let mut skip_clone = args.skip_install;
    if skip_clone {
        cliclack::log::info("Skipping repository clone")?;
    } else {
        skip_clone = handle_git_check(&git, &args)?;
    }

    // Step 2: Collect site answers
    let site = match collect_site(&defaults, &args) {
        Ok(site) => site,
        Err(CollectError::NoSource) => {
            cliclack::log::error(CollectError::NoSource.to_string())?;
            cliclack::outro_cancel("No role file generated.")?;
            anyhow::bail!("Setup cancelled.");
        }
        Err(e) => return Err(e.into()),
    };

    // Step 3: Make sure the clone target is usable
    if !skip_clone {
        skip_clone = check_project_dir(&site.project_dir(&base_dir), &args)?;
    }

    // Step 4: Clone and render
    cliclack::log::info("Thank you so much! Your site role file will generate in a few moments")?;
    let generated = scaffold::generate(
        &site,
        &defaults,
        &GenerateOptions {
            base_dir,
            clone_url,
            skip_clone,
        },
        &git,
    )
    .await?;

    cliclack::log::success(format!(
        "Role file written to {}",
        generated.role_path.display()
    ))?;

    // Step 5: Show next steps
    print_next_steps(config, &generated.project_dir, &site)?;

    Ok(())
}

fn collect_site(defaults: &ConfigDefaults, args: &CreateArgs) -> Result<SiteConfig, CollectError> {
    let collector = Collector::standard();
    if args.yes {
        cliclack::log::info("Using defaults for every answer (--yes mode)")?;
        collector.collect(&mut DefaultsPrompter::new(defaults.clone()))
    } else {
        collector.collect(&mut ClackPrompter::new())
    }
}

fn resolve_base_dir(args: &CreateArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let path = match &args.directory {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };

    if !path.is_dir() {
        anyhow::bail!("Directory does not exist: {}", path.display());
    }

    Ok(path)
}

const GIT_MISSING: &str = "git_missing";

fn git_missing_question() -> Question {
    Question::select(
        GIT_MISSING,
        "What would you like to do?",
        vec![
            Choice::new("docs").label("Open the git download page"),
            Choice::new("skip").label("Skip the clone and only write the role file"),
        ],
    )
}

/// Whether the user asked to open the git download page instead of continuing
fn wants_git_docs(prompter: &mut impl Prompter) -> Result<bool, CollectError> {
    let answers = prompter.ask(&[git_missing_question()])?;
    Ok(answers.choice(GIT_MISSING)? == "docs")
}

/// Returns true when the clone should be skipped
fn handle_git_check(git: &GitTool, args: &CreateArgs) -> Result<bool> {
    if git.is_installed() {
        let version = git.version().unwrap_or_else(|| "unknown version".to_string());
        cliclack::log::success(format!("git installed ({})", version))?;
        return Ok(false);
    }

    cliclack::log::warning("git is not installed")?;

    // In non-interactive mode, just skip
    if args.yes {
        cliclack::log::info("Continuing without cloning (--yes mode)")?;
        return Ok(true);
    }

    if wants_git_docs(&mut ClackPrompter::new())? {
        git.open_docs()?;
        cliclack::outro("After installing git, run this command again.")?;
        std::process::exit(0);
    }

    cliclack::log::info("Continuing without cloning")?;
    Ok(true)
}

/// Returns true when the clone should be skipped
fn check_project_dir(project_dir: &Path, args: &CreateArgs) -> Result<bool> {
    let occupied = std::fs::read_dir(project_dir)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false);
    if !occupied {
        return Ok(false);
    }

    cliclack::log::warning(format!(
        "{} already exists and is not empty, git cannot clone into it",
        project_dir.display()
    ))?;

    // Auto-confirm with --yes flag
    let confirm = if args.yes {
        true
    } else {
        cliclack::confirm("Skip the clone and only write the role file?")
            .initial_value(true)
            .interact()?
    };

    if !confirm {
        anyhow::bail!("Setup cancelled.");
    }

    Ok(true)
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    project_dir: &Path,
    site: &SiteConfig,
) -> Result<()> {
    let steps = config.next_steps(project_dir, site);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy provisioning!")?;

    Ok(())
}
