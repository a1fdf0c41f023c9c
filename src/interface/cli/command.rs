//! CLI 명령 파싱 모듈.

use clap::{Parser, Subcommand};

use crate::domain::session::RunOptions;

#[derive(Debug, Parser)]
#[command(name = "dexter")]
#[command(about = "Interactive terminal assistant")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Question to answer once, skipping the interactive shell
    query: Option<String>,

    /// Disable colors and spinner animations
    #[arg(long)]
    plain: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show effective merged config
    Config,
    /// Run the scripted interactive demo session
    Demo,
    /// Run the menu selection demo
    Menu,
}

pub enum CliAction {
    Interactive(RunOptions),
    InspectConfig,
    Demo(RunOptions),
    Menu(RunOptions),
    Ask(RunOptions),
}

impl Cli {
    pub fn parse_action() -> CliAction {
        let cli = Cli::parse();
        let options = RunOptions {
            query: cli.query.clone(),
            plain: cli.plain,
        };

        match cli.command {
            Some(Commands::Config) => CliAction::InspectConfig,
            Some(Commands::Demo) => CliAction::Demo(options),
            Some(Commands::Menu) => CliAction::Menu(options),
            None => {
                if options.query.is_some() {
                    CliAction::Ask(options)
                } else {
                    CliAction::Interactive(options)
                }
            }
        }
    }
}
