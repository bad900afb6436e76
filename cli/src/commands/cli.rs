use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "watchdog", version, about = "Detects watchdog terminations of the previous run")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct LaunchArgs {
    /// The crash reporter saw a crash in the previous run.
    #[arg(long)]
    pub did_crash: bool,

    /// Start without a launch report: the previous run is not classified.
    #[arg(long, conflicts_with = "did_crash")]
    pub no_launch_report: bool,

    /// Keep running and relay lifecycle states read from stdin
    /// (active, inactive, background, terminated). Ctrl-C publishes `terminated`.
    #[arg(long)]
    pub watch: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify the previous run and persist a new baseline.
    Launch(LaunchArgs),
    /// Print the persisted app state.
    Inspect,
    /// Print a freshly probed app state.
    Probe,
    /// Delete the persisted app state.
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_launch_flags() {
        let args = Args::try_parse_from(["watchdog", "launch", "--did-crash", "--watch"]).unwrap();
        let Commands::Launch(launch) = args.command else {
            panic!("expected launch");
        };
        assert!(launch.did_crash);
        assert!(launch.watch);
        assert!(!launch.no_launch_report);
    }

    #[test]
    fn crash_flag_conflicts_with_missing_report() {
        let res = Args::try_parse_from(["watchdog", "launch", "--did-crash", "--no-launch-report"]);
        assert!(res.is_err());
    }
}
