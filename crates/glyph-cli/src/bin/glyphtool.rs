use clap::{Parser, Subcommand};

use glyph_cli::commands::{config_ops, feed_ops, translit_ops};

#[derive(Parser)]
#[command(name = "glyphtool", about = "Script combiner diagnostics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Feed keys through a script's combiner chain and show every response
    Feed {
        /// Script: latin, hangul, tibetan or bengali
        #[arg(short, long, default_value = "latin")]
        script: String,
        /// Keys to type; named keys go in angle brackets (<del>, <enter>, <U+0301>)
        keys: String,
        /// Settings TOML to use instead of the defaults
        #[arg(long)]
        settings: Option<String>,
        /// Output one JSON object per key
        #[arg(long)]
        json: bool,
    },
    /// Convert Khipro Latin text to Bengali (reads stdin when no text is given)
    Khipro {
        text: Vec<String>,
        /// Mapping TOML to use instead of the defaults
        #[arg(long)]
        config: Option<String>,
    },
    /// Convert Extended Wylie to Tibetan (reads stdin when no text is given)
    Wylie { text: Vec<String> },
    /// Export default Khipro mapping table as TOML
    KhiproExport,
    /// Validate a Khipro mapping TOML file
    KhiproValidate {
        /// Path to TOML file
        file: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a settings TOML file
    SettingsValidate {
        /// Path to TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Feed {
            script,
            keys,
            settings,
            json,
        } => feed_ops::feed_cmd(&script, &keys, settings.as_deref(), json),
        Command::Khipro { text, config } => translit_ops::khipro_cmd(&text, config.as_deref()),
        Command::Wylie { text } => translit_ops::wylie_cmd(&text),
        Command::KhiproExport => config_ops::khipro_export(),
        Command::KhiproValidate { file } => config_ops::khipro_validate(&file),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
