use crate::CLAP_STYLING;
use clap::arg;
use jobflow::handlers::DEFAULT_INPUT;
use jobflow_core::report::DEFAULT_TITLE;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("jobflow")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("jobflow")
        .about("Draws a Sankey diagram of where your job applications went")
        .styles(CLAP_STYLING)
        .arg(
            arg!([INPUT])
                .required(false)
                .help("The application tracker CSV export")
                .default_value(DEFAULT_INPUT),
        )
        .arg(
            arg!(-o --"output" <PATH>)
                .required(false)
                .help(
                    "Where to save the report (default: job_application_sankey.html; text \
                reports go to the screen)",
                ),
        )
        .arg(
            arg!(-f --"format" <FORMAT>)
                .required(false)
                .help("Report format: html, json, text")
                .value_parser(["html", "json", "text"])
                .default_value("html"),
        )
        .arg(
            arg!(-t --"title" <TITLE>)
                .required(false)
                .help("Diagram title")
                .default_value(DEFAULT_TITLE),
        )
        .arg(
            arg!(--"no-show")
                .required(false)
                .help("Don't open the generated page in the default viewer")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .arg(
            arg!(-v --"verbose" "Log every aggregation pass")
                .required(false)
                .conflicts_with("quiet"),
        )
}
