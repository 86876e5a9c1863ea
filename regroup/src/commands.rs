use crate::CLAP_STYLING;
use clap::arg;

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("regroup")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("regroup")
        .about(
            "Regroups targets from EyeWitness report pages by page title, Server header and \
            Content-Length.",
        )
        .styles(CLAP_STYLING)
        .arg(
            arg!(-d --"directory" <PATH>)
                .required(true)
                .help("Directory containing the EyeWitness .html report pages"),
        )
        .arg(
            arg!(-c --"csv" <PATH>)
                .required(true)
                .help("Filename of the CSV output"),
        )
        .arg(arg!(-q --"quiet" "Suppress banner, progress and the JSON dump").required(false))
        .arg(
            arg!(-v --"verbose" "Log every grouping decision (overridden by RUST_LOG)")
                .required(false),
        )
}
