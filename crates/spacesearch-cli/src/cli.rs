use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "spacesearch")]
#[command(about = "Quick search across local document spaces", version)]
pub struct Cli {
    /// Directory holding `SearchIndex_*.sqlite` files. Overrides `INDEX_PATH_DIR`.
    #[arg(long, value_name = "DIR")]
    pub index_dir: Option<PathBuf>,
    /// Maximum number of results across all spaces. Overrides `SPACESEARCH_RESULT_LIMIT`.
    #[arg(long)]
    pub limit: Option<usize>,
    /// Exit non-zero on failure instead of emitting a warning item.
    #[arg(long, default_value_t = false)]
    pub strict: bool,
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub terms: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terms_are_collected_verbatim_after_flags() {
        let cli = Cli::try_parse_from([
            "spacesearch",
            "--index-dir",
            "/tmp/idx",
            "--limit",
            "5",
            "project",
            "-draft",
        ])
        .expect("parse");
        assert_eq!(cli.index_dir, Some(PathBuf::from("/tmp/idx")));
        assert_eq!(cli.limit, Some(5));
        assert!(!cli.strict);
        assert_eq!(cli.terms, vec!["project", "-draft"]);
    }

    #[test]
    fn no_terms_is_allowed() {
        let cli = Cli::try_parse_from(["spacesearch"]).expect("parse");
        assert!(cli.terms.is_empty());
    }
}
