use clap::{Parser, Subcommand};

use henkan_cli::commands::{config_ops, convert_ops, dict_ops};

#[derive(Parser)]
#[command(name = "henkantool", about = "Henkan conversion diagnostics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a reading into the best sentence
    Convert {
        /// Dictionary directory (word lists, matrix, pos.toml)
        dict_dir: String,
        /// Reading to convert
        text: String,
        /// Language profile (ja, zh, en)
        #[arg(long, default_value = "ja")]
        lang: String,
        /// Units before the cursor form a single head clause
        #[arg(long, default_value = "0")]
        cursor: usize,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List every clause candidate for a reading
    Clauses {
        /// Dictionary directory
        dict_dir: String,
        /// Reading of one clause
        text: String,
        /// Language profile (ja, zh, en)
        #[arg(long, default_value = "ja")]
        lang: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show prediction candidates for a reading
    Predict {
        /// Dictionary directory
        dict_dir: String,
        /// Reading typed so far
        text: String,
        /// Language profile (ja, zh, en)
        #[arg(long, default_value = "ja")]
        lang: String,
        /// Minimum input length in units
        #[arg(long, default_value = "0")]
        min_len: usize,
        /// Cut the input to this many units and match exactly
        #[arg(long)]
        max_len: Option<usize>,
        /// Number of candidates to show
        #[arg(short, long, default_value = "20")]
        n: usize,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Compile a text connection matrix into the binary format
    CompileMatrix {
        /// Input text file
        input_txt: String,
        /// Output binary file
        output_file: String,
    },
    /// Show connection matrix statistics
    MatrixInfo {
        /// Binary matrix file
        file: String,
    },
    /// Manage the user dictionary of a dictionary directory
    UserDict {
        /// Dictionary directory
        dict_dir: String,
        #[command(subcommand)]
        action: UserDictAction,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

#[derive(Subcommand)]
enum UserDictAction {
    /// Add a word
    Add { reading: String, surface: String },
    /// Remove a word
    Remove { reading: String, surface: String },
    /// List all registered words
    List,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Convert {
            dict_dir,
            text,
            lang,
            cursor,
            json,
        } => convert_ops::convert_cmd(&dict_dir, &lang, &text, cursor, json),
        Command::Clauses {
            dict_dir,
            text,
            lang,
            json,
        } => convert_ops::clauses_cmd(&dict_dir, &lang, &text, json),
        Command::Predict {
            dict_dir,
            text,
            lang,
            min_len,
            max_len,
            n,
            json,
        } => convert_ops::predict_cmd(&dict_dir, &lang, &text, min_len, max_len, n, json),
        Command::CompileMatrix {
            input_txt,
            output_file,
        } => dict_ops::compile_matrix(&input_txt, &output_file),
        Command::MatrixInfo { file } => dict_ops::matrix_info(&file),
        Command::UserDict { dict_dir, action } => match action {
            UserDictAction::Add { reading, surface } => {
                dict_ops::user_word_add(&dict_dir, &reading, &surface)
            }
            UserDictAction::Remove { reading, surface } => {
                dict_ops::user_word_remove(&dict_dir, &reading, &surface)
            }
            UserDictAction::List => dict_ops::user_word_list(&dict_dir),
        },
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
