//! Main binary entry point for the `FernStyle` checker.
//!
//! This binary simply delegates to the shared `entry_point::run_with_args()` function
//! so it behaves exactly like the `fernstyle` binary from `fernstyle-cli`.

use anyhow::Result;

fn main() -> Result<()> {
    let code = fernstyle::entry_point::run_with_args(std::env::args().skip(1).collect())?;
    std::process::exit(code);
}
