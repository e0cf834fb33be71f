use clap::ArgMatches;
use colored::Colorize;
use commands::command_argument_builder;
use navbanner::handlers::{
    InjectOptions, MenuFormat, collect_pages, print_inject_summary, run_inject, run_menu,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use url::Url;

mod commands;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    let result = match chosen_command.subcommand() {
        Some(("inject", primary_command)) => handle_inject(primary_command, quiet).await,
        Some(("menu", primary_command)) => handle_menu(primary_command).await,
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

async fn handle_inject(sub_matches: &ArgMatches, quiet: bool) -> anyhow::Result<()> {
    let args: Vec<PathBuf> = sub_matches
        .get_many::<PathBuf>("PAGES")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let pages_file = sub_matches.get_one::<PathBuf>("pages-file");
    let base_url = sub_matches.get_one::<Url>("base-url").cloned();
    let root = sub_matches
        .get_one::<PathBuf>("root")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));
    let dry_run = sub_matches.get_flag("dry-run");
    let to_stdout = sub_matches.get_flag("stdout");

    let pages = collect_pages(&args, pages_file.map(PathBuf::as_path))?;
    let show_progress = !quiet && !to_stdout && pages.len() > 1;

    let summary = run_inject(InjectOptions {
        pages,
        root,
        base_url,
        dry_run,
        to_stdout,
        show_progress,
    })
    .await?;

    if !quiet && !to_stdout {
        print_inject_summary(&summary, dry_run);
    }
    Ok(())
}

async fn handle_menu(sub_matches: &ArgMatches) -> anyhow::Result<()> {
    let index = sub_matches
        .get_one::<String>("INDEX")
        .expect("INDEX is required");
    let format = sub_matches
        .get_one::<String>("format")
        .and_then(|f| MenuFormat::from_str(f))
        .unwrap_or(MenuFormat::Json);

    let output = run_menu(index, format).await?;
    println!("{}", output.trim_end());
    Ok(())
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
