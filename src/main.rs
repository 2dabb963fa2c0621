use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use lampstack::cli::{Cli, Commands};
use lampstack::{Context, commands, ui};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    match dispatch(&ctx, cli.command) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(rc) => ExitCode::from(u8::try_from(rc).unwrap_or(1)),
        Err(e) => {
            ui::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn dispatch(ctx: &Context, command: Commands) -> Result<i32> {
    log::trace!("verbosity {}", ctx.verbose);
    match command {
        Commands::Run(args) => commands::run::run(ctx, args),
        Commands::Actions => commands::actions::run(ctx).map(|()| 0),
        Commands::Banner => {
            ui::banner();
            Ok(0)
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "lampstack", &mut io::stdout());
            Ok(0)
        }
    }
}
