//! Command line interface for the `pageframe` publisher binary.

use std::path::PathBuf;

use clap::Parser;

/// Command line arguments for the `pageframe` binary.
#[derive(Debug, Parser)]
#[command(
    name = "pageframe",
    version,
    about = "Frame story text into barcode-ready wire fragments"
)]
pub struct Cli {
    /// Input text file path.
    #[arg(short, long, conflicts_with = "text")]
    pub input: Option<PathBuf>,

    /// Direct text input (alternative to --input).
    #[arg(short, long)]
    pub text: Option<String>,

    /// Page identifier stamped into every fragment header.
    #[arg(short, long)]
    pub page_id: String,

    /// Output directory for wire-text files.
    #[arg(short, long, default_value = "./fragments/")]
    pub output: PathBuf,

    /// Maximum wire-encoded bytes per fragment, header included.
    #[arg(short, long, default_value_t = 2400)]
    pub byte_budget: usize,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Cli;

    #[test]
    fn parses_page_id_and_budget() {
        let cli = Cli::parse_from([
            "pageframe",
            "--page-id",
            "story-1",
            "--text",
            "hello",
            "--byte-budget",
            "120",
        ]);
        assert_eq!(cli.page_id, "story-1");
        assert_eq!(cli.text.as_deref(), Some("hello"));
        assert_eq!(cli.byte_budget, 120);
    }

    #[test]
    fn defaults_cover_output_and_budget() {
        let cli = Cli::parse_from(["pageframe", "--page-id", "story-1", "--text", "hi"]);
        assert_eq!(cli.output.to_string_lossy(), "./fragments/");
        assert_eq!(cli.byte_budget, 2400);
    }
}
