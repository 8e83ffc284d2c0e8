// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod runtime;

use anyhow::{Context, Result, anyhow};
use config::Config;
use fiscaliza_app::{ViewKind, landing_page};
use fiscaliza_store::{KeyValueStorage, MemoryStorage, Store};
use runtime::{Records, Session, ViewRequest};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

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
            "load config {}; run `fiscaliza --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;
    init_logging(config.log_filter())?;

    let db_path = if options.demo {
        PathBuf::from(":memory:")
    } else {
        config.db_path()?
    };
    if options.print_db_path {
        println!("{}", db_path.display());
        return Ok(());
    }

    if options.demo {
        if options.check_only {
            return Ok(());
        }
        let session = Session::open(MemoryStorage::new(), Records::demo(), config.default_view());
        return execute(session, &options);
    }

    let store = Store::open(&db_path).with_context(|| {
        format!(
            "open database {} -- if this path is wrong, set [storage].db_path or FISCALIZA_DB_PATH",
            db_path.display()
        )
    })?;
    store.bootstrap()?;
    if options.check_only {
        return Ok(());
    }

    let session = Session::open(store, Records::demo(), config.default_view());
    execute(session, &options)
}

fn init_logging(configured: &str) -> Result<()> {
    let filter = match env::var("RUST_LOG") {
        Ok(raw) if !raw.trim().is_empty() => {
            EnvFilter::try_new(&raw).with_context(|| format!("invalid RUST_LOG filter {raw:?}"))?
        }
        _ => EnvFilter::try_new(configured)
            .with_context(|| format!("invalid [log].filter {configured:?}"))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|error| anyhow!("install log subscriber: {error}"))
}

fn execute<S: KeyValueStorage>(mut session: Session<S>, options: &CliOptions) -> Result<()> {
    if options.reset_settings {
        session.reset_settings();
    }
    for assignment in &options.set {
        session.set_setting(assignment)?;
    }
    if let Some(accent) = &options.set_accent {
        session.set_accent(accent)?;
    }
    if let Some(action) = &options.alert_action {
        session.alert_action(action)?;
    }
    if options.show_settings {
        print!("{}", session.render_settings());
    }

    if options.view.view.is_some() || options.view.narrows() || !options.acts_on_settings() {
        print!("{}", session.render_view(&options.view)?);
    }

    for notice in session.notices() {
        match &notice.description {
            Some(description) => {
                eprintln!("[{}] {}: {description}", notice.level, notice.title);
            }
            None => eprintln!("[{}] {}", notice.level, notice.title),
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_db_path: bool,
    demo: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
    view: ViewRequest,
    set: Vec<String>,
    set_accent: Option<String>,
    reset_settings: bool,
    show_settings: bool,
    alert_action: Option<String>,
}

impl CliOptions {
    fn acts_on_settings(&self) -> bool {
        self.reset_settings
            || self.show_settings
            || !self.set.is_empty()
            || self.set_accent.is_some()
            || self.alert_action.is_some()
    }
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_db_path: false,
        demo: false,
        print_example: false,
        check_only: false,
        show_help: false,
        view: ViewRequest::default(),
        set: Vec::new(),
        set_accent: None,
        reset_settings: false,
        show_settings: false,
        alert_action: None,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let raw = value_for(&mut iter, "--config", "a file path")?;
                options.config_path = PathBuf::from(raw);
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-path" => {
                options.print_db_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            "--view" => {
                let raw = value_for(&mut iter, "--view", "a view name")?;
                options.view.view = Some(parse_view(&raw)?);
            }
            "--search" => {
                options.view.search = Some(value_for(&mut iter, "--search", "search text")?);
            }
            "--filter" => {
                options
                    .view
                    .filters
                    .push(value_for(&mut iter, "--filter", "a field=value pair")?);
            }
            "--tab" => {
                options.view.tab = Some(value_for(&mut iter, "--tab", "a tab name")?);
            }
            "--set" => {
                options.set.push(value_for(&mut iter, "--set", "a key=value pair")?);
            }
            "--set-accent" => {
                options.set_accent =
                    Some(value_for(&mut iter, "--set-accent", "a #rrggbb color")?);
            }
            "--reset-settings" => {
                options.reset_settings = true;
            }
            "--show-settings" => {
                options.show_settings = true;
            }
            "--alert-action" => {
                let raw = value_for(&mut iter, "--alert-action", "an <id>:<action> pair")?;
                options.alert_action = Some(raw);
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

fn value_for<S: AsRef<str>>(
    iter: &mut impl Iterator<Item = S>,
    flag: &str,
    what: &str,
) -> Result<String> {
    iter.next()
        .map(|value| value.as_ref().to_owned())
        .ok_or_else(|| anyhow!("{flag} requires {what}"))
}

fn parse_view(raw: &str) -> Result<ViewKind> {
    if raw == ViewKind::Settings.as_str() {
        return Ok(ViewKind::Settings);
    }
    landing_page(raw).ok_or_else(|| {
        anyhow!(
            "unknown view {raw:?}; expected one of {}",
            ViewKind::values().join(", ")
        )
    })
}

fn print_help() {
    println!("fiscaliza");
    println!("  --config <path>            Use a specific config path");
    println!("  --print-config-path        Print resolved config path");
    println!("  --print-path               Print resolved database path");
    println!("  --print-example-config     Print a config template");
    println!("  --demo                     Keep settings in memory for this run");
    println!("  --check                    Validate config + DB and exit");
    println!("  --view <name>              dashboard, casos, contribuyentes, alertas, reportes,");
    println!("                             ia-analytics or settings");
    println!("  --search <text>            Case-insensitive search within the view");
    println!("  --filter <field>=<value>   Narrow the view (repeatable)");
    println!("  --tab <name>               Alerts tab: all, nuevas, proceso, resueltas");
    println!("  --set <key>=<value>        Change one setting (repeatable)");
    println!("  --set-accent <#rrggbb>     Change the accent color");
    println!("  --reset-settings           Restore every setting to its default");
    println!("  --show-settings            Print current settings and accent palette");
    println!("  --alert-action <id>:<act>  mark-reviewed, assign or archive an alert");
    println!("  --help                     Show this help");
}

#[cfg(test)]
mod tests {
    use super::{CliOptions, parse_cli_args};
    use crate::runtime::ViewRequest;
    use anyhow::Result;
    use fiscaliza_app::ViewKind;
    use std::path::PathBuf;

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/fiscaliza-config.toml")
    }

    #[test]
    fn parse_cli_args_defaults_to_provided_config_path() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        assert_eq!(
            options,
            CliOptions {
                config_path: default_options_path(),
                print_config_path: false,
                print_db_path: false,
                demo: false,
                print_example: false,
                check_only: false,
                show_help: false,
                view: ViewRequest::default(),
                set: Vec::new(),
                set_accent: None,
                reset_settings: false,
                show_settings: false,
                alert_action: None,
            }
        );
        assert!(!options.acts_on_settings());
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_config_path_override() -> Result<()> {
        let options = parse_cli_args(
            vec!["--config", "/custom/config.toml"],
            default_options_path(),
        )?;
        assert_eq!(options.config_path, PathBuf::from("/custom/config.toml"));
        Ok(())
    }

    #[test]
    fn parse_cli_args_errors_for_missing_values() {
        for (args, expected) in [
            (vec!["--config"], "--config requires a file path"),
            (vec!["--filter"], "--filter requires a field=value pair"),
            (vec!["--set-accent"], "--set-accent requires a #rrggbb color"),
        ] {
            let error = parse_cli_args(args, default_options_path())
                .expect_err("missing value should fail");
            assert!(error.to_string().contains(expected), "{error}");
        }
    }

    #[test]
    fn parse_cli_args_errors_for_unknown_argument() {
        let error = parse_cli_args(vec!["--wat"], default_options_path())
            .expect_err("unknown arg should fail");
        let message = error.to_string();
        assert!(message.contains("unknown argument"));
        assert!(message.contains("--help"));
    }

    #[test]
    fn parse_cli_args_collects_view_request() -> Result<()> {
        let options = parse_cli_args(
            vec![
                "--view",
                "alertas",
                "--search",
                "fraude",
                "--filter",
                "type=crítica",
                "--filter",
                "category=fraude",
                "--tab",
                "nuevas",
            ],
            default_options_path(),
        )?;
        assert_eq!(options.view.view, Some(ViewKind::Alerts));
        assert_eq!(options.view.search.as_deref(), Some("fraude"));
        assert_eq!(options.view.filters, vec!["type=crítica", "category=fraude"]);
        assert_eq!(options.view.tab.as_deref(), Some("nuevas"));
        assert!(!options.acts_on_settings());
        Ok(())
    }

    #[test]
    fn parse_cli_args_rejects_unknown_view() {
        let error = parse_cli_args(vec!["--view", "mapa"], default_options_path())
            .expect_err("unknown view should fail");
        assert!(error.to_string().contains("contribuyentes"));
    }

    #[test]
    fn parse_cli_args_accepts_settings_view() -> Result<()> {
        let options = parse_cli_args(vec!["--view", "settings"], default_options_path())?;
        assert_eq!(options.view.view, Some(ViewKind::Settings));
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_settings_actions() -> Result<()> {
        let options = parse_cli_args(
            vec![
                "--set",
                "darkMode=on",
                "--set",
                "fontSize=large",
                "--set-accent",
                "#10b981",
                "--reset-settings",
                "--show-settings",
            ],
            default_options_path(),
        )?;
        assert_eq!(options.set, vec!["darkMode=on", "fontSize=large"]);
        assert_eq!(options.set_accent.as_deref(), Some("#10b981"));
        assert!(options.reset_settings);
        assert!(options.show_settings);
        assert!(options.acts_on_settings());
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_demo_and_check_flags() -> Result<()> {
        let options = parse_cli_args(
            vec!["--demo", "--print-path", "--check", "--print-example-config"],
            default_options_path(),
        )?;
        assert!(options.demo);
        assert!(options.print_db_path);
        assert!(options.check_only);
        assert!(options.print_example);
        assert!(!options.print_config_path);
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_help_flag_for_long_and_short_variants() -> Result<()> {
        let long = parse_cli_args(vec!["--help"], default_options_path())?;
        assert!(long.show_help);

        let short = parse_cli_args(vec!["-h"], default_options_path())?;
        assert!(short.show_help);
        Ok(())
    }
}
