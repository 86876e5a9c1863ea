use colored::Colorize;
use regroup::commands::command_argument_builder;
use regroup::handlers::{handle_group, init_logging};
use regroup_core::print_banner;

fn main() {
    let matches = command_argument_builder().get_matches();
    let quiet = matches.get_flag("quiet");

    init_logging(matches.get_flag("verbose"));

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    if let Err(e) = handle_group(&matches) {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}
