use colored::Colorize;

pub mod error;
pub mod index;
pub mod report;
pub mod walk;

pub use error::CoreError;
pub use index::{RecordOutcome, SignalIndex};
pub use regroup_scanner::{SignalKind, Triple};

const BANNER: &str = r#"
  ____  _____ ____ ____   ___  _   _ ____
 |  _ \| ____/ ___|  _ \ / _ \| | | |  _ \
 | |_) |  _|| |  _| |_) | | | | | | | |_) |
 |  _ <| |__| |_| |  _ <| |_| | |_| |  __/
 |_| \_\_____\____|_| \_\\___/ \___/|_|
"#;

pub fn print_banner() {
    eprintln!("{}", BANNER.bright_cyan().bold());
    eprintln!(
        "  {} {}\n",
        "cluster EyeWitness targets by shared signals".bright_white(),
        format!("v{}", env!("CARGO_PKG_VERSION")).bright_black()
    );
}
