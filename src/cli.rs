use clap::Parser;

/// Train a decision tree on Cars.csv, print it as pseudo-code and draw it.
///
/// Reads `Cars.csv` from the working directory, downloading it first if it is
/// missing, and writes `dt.dot` and `dt.png` next to it. Rendering needs the
/// graphviz `dot` program on PATH.
#[derive(Parser, Debug)]
#[command(name = "dtprobe", version)]
pub struct Cli {}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory as _;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["dtprobe", "--depth", "3"]).is_err());
        assert!(Cli::try_parse_from(["dtprobe"]).is_ok());
    }
}
