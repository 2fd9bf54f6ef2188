use commands::command_argument_builder;
use jobflow::handlers::{handle_render, init_logging};
use jobflow_core::print_banner;

mod commands;

fn main() {
    let cmd = command_argument_builder();
    let matches = cmd.get_matches();
    let quiet = matches.get_flag("quiet");

    init_logging(matches.get_flag("verbose"), quiet);

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    handle_render(&matches);
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
