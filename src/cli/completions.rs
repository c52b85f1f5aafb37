use clap::Parser;

/// Arguments for the completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use clap::Parser;

    #[test]
    fn test_cli_parsing_completions_shell() {
        let cli = super::super::Cli::try_parse_from(["strata", "completions", "zsh"])
            .unwrap_or_else(|e| {
                panic!("Failed to parse CLI arguments: {}", e);
            });
        match cli.command {
            super::super::Commands::Completions(args) => assert_eq!(args.shell, "zsh"),
            _ => panic!("Expected Completions command"),
        }
    }
}
