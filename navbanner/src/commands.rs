use crate::CLAP_STYLING;
use clap::{arg, command};
use std::path::PathBuf;
use url::Url;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("navbanner")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("navbanner")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress progress and summary output").required(false))
        .subcommand_required(true)
        .subcommand(
            command!("inject")
                .about(
                    "Injects the navigation banner into HTML pages. The menu is read from the \
                index page next to each page's directory.",
                )
                .arg(
                    arg!([PAGES] ...)
                        .required(false)
                        .help("Pages or directories of pages to update")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(-p --"pages-file" <PATH>)
                        .required(false)
                        .help("Path to a newline-delimited file of pages to update")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(-b --"base-url" <URL>)
                        .required(false)
                        .help(
                            "Public URL of the site root. The index is then fetched over HTTP \
                        instead of read from disk.",
                        )
                        .value_parser(clap::value_parser!(Url)),
                )
                .arg(
                    arg!(-r --"root" <DIR>)
                        .required(false)
                        .help("Local directory matching --base-url")
                        .value_parser(clap::value_parser!(PathBuf))
                        .default_value("."),
                )
                .arg(
                    arg!(-n --"dry-run")
                        .required(false)
                        .help("Report what would change without writing any page")
                        .action(clap::ArgAction::SetTrue)
                        .conflicts_with("stdout"),
                )
                .arg(
                    arg!(--"stdout")
                        .required(false)
                        .help("Print updated pages instead of writing them")
                        .action(clap::ArgAction::SetTrue)
                        .conflicts_with("dry-run"),
                ),
        )
        .subcommand(
            command!("menu")
                .about("Prints the menu extracted from an index page")
                .arg(
                    arg!(<INDEX>)
                        .required(true)
                        .help("URL or path of the index page"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Output format: json, text")
                        .value_parser(["json", "text"])
                        .default_value("json"),
                ),
        )
}
