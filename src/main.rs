//! `dexter` 바이너리 진입점.

use dexter::infrastructure::intro;
use dexter::interface::cli::{AppComposition, Cli, CliAction, run_repl};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let action = Cli::parse_action();

    match action {
        CliAction::InspectConfig => {
            let composition = AppComposition::default();
            match composition.inspect_config_usecase().execute() {
                Ok(json) => println!("{json}"),
                Err(err) => {
                    eprintln!("error: {err:#}");
                    std::process::exit(1);
                }
            }
        }
        CliAction::Ask(options) => {
            let composition = AppComposition::new(options.plain);
            let question = options.query.unwrap_or_default();
            if let Err(err) = composition.ask_usecase().execute(&question).await {
                eprintln!("error: {err:#}");
                std::process::exit(1);
            }
        }
        CliAction::Demo(options) => {
            let composition = AppComposition::new(options.plain);
            if let Err(err) = composition.demo_usecase().execute().await {
                eprintln!("error: {err:#}");
                std::process::exit(1);
            }
        }
        CliAction::Menu(options) => {
            let composition = AppComposition::new(options.plain);
            if let Err(err) = composition.menu_usecase().execute().await {
                eprintln!("error: {err:#}");
                std::process::exit(1);
            }
        }
        CliAction::Interactive(options) => {
            let composition = AppComposition::new(options.plain);
            if composition.config().show_intro() {
                intro::print_intro(&composition.config().intro_tagline());
            }
            if let Err(err) = run_repl(&composition).await {
                eprintln!("error: {err:#}");
                std::process::exit(1);
            }
        }
    }
}
