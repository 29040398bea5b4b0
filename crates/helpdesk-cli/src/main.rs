// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow};
use config::Config;
use helpdesk_app::AppState;
use helpdesk_store::{Seed, Stores};
use helpdesk_tui::UiOptions;
use runtime::DemoRuntime;
use std::env;
use std::path::PathBuf;
use tracing::info;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `helpdesk --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;
    let delays = config.assist_delays()?;

    let log_path = logging::init(&config)?;
    info!(
        config = %options.config_path.display(),
        log = ?log_path,
        "starting helpdesk"
    );

    let seed_path = options.seed_path.clone().or_else(|| config.seed_path());
    let seed = match &seed_path {
        Some(path) => Seed::load(path).with_context(|| {
            format!(
                "load seed {}; fix the file or drop --seed / [data].seed_path to use the demo seed",
                path.display()
            )
        })?,
        None => Seed::demo()?,
    };
    let stores = Stores::from_seed(seed)?;
    if options.check_only {
        return Ok(());
    }

    let seed_label = seed_path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "built-in demo".to_owned());
    let settings = config.settings_rows(&options.config_path, &seed_label);
    let mut runtime =
        DemoRuntime::new(stores, settings).with_assist(config.assist_enabled(), delays);

    let mut state = AppState {
        active_view: config.start_view(),
        ..AppState::default()
    };
    let ui = UiOptions {
        narrow_width: config.narrow_width(),
        force_narrow: options.narrow,
    };
    helpdesk_tui::run_app(&mut state, &mut runtime, ui)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    seed_path: Option<PathBuf>,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    narrow: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        seed_path: None,
        print_config_path: false,
        print_example: false,
        check_only: false,
        narrow: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--seed" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--seed requires a JSON file path"))?;
                options.seed_path = Some(PathBuf::from(value.as_ref()));
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--narrow" => {
                options.narrow = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("helpdesk");
    println!("  --config <path>          Use a specific config path");
    println!("  --seed <path>            Load conversations and customers from a JSON seed");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --check                  Validate config and seed, then exit");
    println!("  --narrow                 Force the stacked single-pane layout");
    println!("  --help                   Show this help");
}
