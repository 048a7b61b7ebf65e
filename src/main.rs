use clap::{error::ErrorKind, ArgGroup, CommandFactory, Parser};
use codebase_switcher::commands::*;
use codebase_switcher::core::{
    config::SwitcherConfig, error::Result, git::GitRepo, print_error, state::State,
    switcher::Switcher,
};
use std::env;

#[derive(Parser)]
#[command(name = "codebase-switcher")]
#[command(about = "Compare model outputs against a baseline using git branches")]
#[command(disable_version_flag = true)]
#[command(group(
    ArgGroup::new("action")
        .required(true)
        .args(["init", "beetle", "sonnet", "rewrite", "status", "zip", "version"])
))]
struct Cli {
    /// Initialize the repository with preedit, beetle and sonnet branches
    #[arg(short, long)]
    init: bool,

    /// Switch to the beetle model branch
    #[arg(short = '2', long)]
    beetle: bool,

    /// Switch to the sonnet model branch
    #[arg(short = '3', long)]
    sonnet: bool,

    /// Switch to the rewrite branch, creating it on first use
    #[arg(short = '4', long)]
    rewrite: bool,

    /// Show the current state and pending changes
    #[arg(short, long)]
    status: bool,

    /// Archive the baseline and clean up all switcher branches
    #[arg(short, long)]
    zip: bool,

    /// Print version information
    #[arg(short, long)]
    version: bool,

    /// Branch a new rewrite starts from: preedit, beetle or sonnet
    #[arg(long, value_name = "BRANCH", value_parser = parse_base_branch)]
    base_branch: Option<State>,

    /// Branch whose content remains after zipping: preedit, beetle, sonnet or rewrite
    #[arg(long, value_name = "BRANCH", value_parser = parse_state)]
    keep_branch: Option<State>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

enum Action {
    Init,
    Switch { target: State, base: Option<State> },
    Status,
    Zip { keep: Option<State> },
    Version,
}

impl Cli {
    /// Selectors only make sense alongside the action they modify
    fn validate_selectors(&self) {
        if self.base_branch.is_some() && !self.rewrite {
            Cli::command()
                .error(
                    ErrorKind::ArgumentConflict,
                    "--base-branch can only be used with --rewrite",
                )
                .exit();
        }
        if self.keep_branch.is_some() && !self.zip {
            Cli::command()
                .error(
                    ErrorKind::ArgumentConflict,
                    "--keep-branch can only be used with --zip",
                )
                .exit();
        }
    }

    fn action(&self) -> Action {
        if self.init {
            Action::Init
        } else if self.beetle {
            Action::Switch {
                target: State::Beetle,
                base: None,
            }
        } else if self.sonnet {
            Action::Switch {
                target: State::Sonnet,
                base: None,
            }
        } else if self.rewrite {
            Action::Switch {
                target: State::Rewrite,
                base: self.base_branch,
            }
        } else if self.status {
            Action::Status
        } else if self.zip {
            Action::Zip {
                keep: self.keep_branch,
            }
        } else {
            Action::Version
        }
    }
}

fn parse_state(value: &str) -> std::result::Result<State, String> {
    value.parse::<State>().map_err(|e| e.to_string())
}

fn parse_base_branch(value: &str) -> std::result::Result<State, String> {
    match parse_state(value)? {
        State::Rewrite => Err("rewrite cannot be its own base. Use preedit, beetle or sonnet".to_string()),
        state => Ok(state),
    }
}

fn run(action: Action) -> Result<()> {
    let gateway = GitRepo::new(env::current_dir()?);
    let mut switcher = Switcher::new(gateway, SwitcherConfig::load());

    match action {
        Action::Init => execute_init(&mut switcher),
        Action::Switch { target, base } => execute_switch(&mut switcher, target, base),
        Action::Status => execute_status(&mut switcher),
        Action::Zip { keep } => execute_zip(&mut switcher, keep).map(|_| ()),
        Action::Version => {
            execute_version();
            Ok(())
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.validate_selectors();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    if let Err(e) = run(cli.action()) {
        print_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}
