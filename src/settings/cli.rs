use super::Parser;

#[derive(Parser, Debug)]
pub struct Cli {
    /// Path to a settings file, e.g. settings/dev.toml
    #[arg(long)]
    pub settings: Option<String>,
}
