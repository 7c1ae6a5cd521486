use std::env;
use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::IntoEnumIterator;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::GeneratorName;
use crate::domain::services::actions::help_text;
use crate::domain::services::CrisisScanner;
use crate::infrastructure::providers::ProviderManager;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if !config_file_path.parent().unwrap().exists() {
        fs::create_dir_all(config_file_path.parent().unwrap()).await?;
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    let config_path_display = config_file_path.as_os_str().to_str().unwrap();
    println!("Created default config file at {config_path_display}");
    return Ok(());
}

fn log_dir() -> String {
    return env::var("SOLACE_LOG_DIR").unwrap_or_else(|_| {
        return dirs::cache_dir()
            .unwrap()
            .join("solace")
            .to_string_lossy()
            .to_string();
    });
}

async fn healthcheck_generator() -> Result<()> {
    let generator_name = GeneratorName::parse(Config::get(ConfigKey::Generator));
    if generator_name.is_none() {
        bail!(format!(
            "No generation provider named {}",
            Config::get(ConfigKey::Generator)
        ));
    }

    let generator = ProviderManager::get_generator(generator_name.unwrap())?;
    if let Err(err) = generator.health_check().await {
        tracing::warn!(error = ?err, "Generation provider failed its health check");
        println!(
            "{}",
            Paint::yellow(format!(
                "Heads up: {err}. Replies will use the built-in supportive fallback until this is fixed."
            ))
        );
    }

    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    let mut cmd = Command::new("debug");
    cmd = cmd
        .about("Debug helpers for Solace")
        .hide(true)
        .subcommand(Command::new("log-path").about(
            "Output path to debug log file generated when running Solace with environment variable RUST_LOG=solace",
        ))
        .subcommand(Command::new("enum-config").about("List all config keys as strings."))
        .subcommand(
            Command::new("crisis-phrases")
                .about("List the effective crisis phrase set, honoring --crisis-phrases-file."),
        );

    return cmd;
}

fn arg_generator() -> Arg {
    return Arg::new(ConfigKey::Generator.to_string())
        .short('g')
        .long(ConfigKey::Generator.to_string())
        .env("SOLACE_GENERATOR")
        .num_args(1)
        .help(format!(
            "The text generation provider replies come from. [default: {}]",
            Config::default(ConfigKey::Generator)
        ))
        .value_parser(PossibleValuesParser::new(GeneratorName::VARIANTS));
}

fn arg_model() -> Arg {
    return Arg::new(ConfigKey::Model.to_string())
        .short('m')
        .long(ConfigKey::Model.to_string())
        .env("SOLACE_MODEL")
        .num_args(1)
        .help(format!(
            "The model to request from the generation provider. [default: {}]",
            Config::default(ConfigKey::Model)
        ));
}

fn subcommand_chat() -> Command {
    return Command::new("chat")
        .about("Start a new chat session.")
        .arg(arg_generator())
        .arg(arg_model());
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") || line.starts_with("SAFETY:") {
                return Paint::new(format!("CHAT {line}")).underline().bold().to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION")
    );

    return Command::new("solace")
        .about(about)
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_chat())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .arg(arg_generator())
        .arg(arg_model())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("SOLACE_CONFIG_FILE")
                .num_args(1)
                .help(format!(
                    "Path to configuration file [default: {}]",
                    Config::default(ConfigKey::ConfigFile)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Username.to_string())
                .short('u')
                .long(ConfigKey::Username.to_string())
                .env("SOLACE_USERNAME")
                .num_args(1)
                .help("Your user name displayed in all chat messages. Defaults to your system username.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::PivotLanguage.to_string())
                .long(ConfigKey::PivotLanguage.to_string())
                .env("SOLACE_PIVOT_LANGUAGE")
                .num_args(1)
                .help(format!(
                    "The language all input is normalized to before safety checks and generation. [default: {}]",
                    Config::default(ConfigKey::PivotLanguage)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ReplyLanguage.to_string())
                .short('l')
                .long(ConfigKey::ReplyLanguage.to_string())
                .env("SOLACE_REPLY_LANGUAGE")
                .num_args(1)
                .help(format!(
                    "The language replies are translated to. Pass \"auto\" to mirror the language you write in. [default: {}]",
                    Config::default(ConfigKey::ReplyLanguage)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::TranslateURL.to_string())
                .long(ConfigKey::TranslateURL.to_string())
                .env("SOLACE_TRANSLATE_URL")
                .num_args(1)
                .help(format!(
                    "LibreTranslate instance used for language detection and translation. [default: {}]",
                    Config::default(ConfigKey::TranslateURL)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::TranslateTimeout.to_string())
                .long(ConfigKey::TranslateTimeout.to_string())
                .env("SOLACE_TRANSLATE_TIMEOUT")
                .num_args(1)
                .help(format!(
                    "Time to wait in milliseconds before timing out a detection or translation request. [default: {}]",
                    Config::default(ConfigKey::TranslateTimeout)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::HuggingFaceURL.to_string())
                .long(ConfigKey::HuggingFaceURL.to_string())
                .env("SOLACE_HUGGING_FACE_URL")
                .num_args(1)
                .help(format!(
                    "Hugging Face inference API URL when using the huggingface provider. [default: {}]",
                    Config::default(ConfigKey::HuggingFaceURL)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::HuggingFaceToken.to_string())
                .long(ConfigKey::HuggingFaceToken.to_string())
                .env("SOLACE_HUGGING_FACE_TOKEN")
                .num_args(1)
                .help("Hugging Face API token when using the huggingface provider.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::OpenAiURL.to_string())
                .long(ConfigKey::OpenAiURL.to_string())
                .env("SOLACE_OPENAI_URL")
                .num_args(1)
                .help(format!(
                    "OpenAI API URL when using the openai provider. Can be swapped to a compatible proxy. [default: {}]",
                    Config::default(ConfigKey::OpenAiURL)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::OpenAiToken.to_string())
                .long(ConfigKey::OpenAiToken.to_string())
                .env("SOLACE_OPENAI_TOKEN")
                .num_args(1)
                .help("OpenAI API token when using the openai provider.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::GenerateTimeout.to_string())
                .long(ConfigKey::GenerateTimeout.to_string())
                .env("SOLACE_GENERATE_TIMEOUT")
                .num_args(1)
                .help(format!(
                    "Time to wait in milliseconds before timing out a generation request. [default: {}]",
                    Config::default(ConfigKey::GenerateTimeout)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::GenerateMaxTokens.to_string())
                .long(ConfigKey::GenerateMaxTokens.to_string())
                .env("SOLACE_GENERATE_MAX_TOKENS")
                .num_args(1)
                .help(format!(
                    "Maximum number of tokens requested per generated reply. [default: {}]",
                    Config::default(ConfigKey::GenerateMaxTokens)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::GenerateTemperature.to_string())
                .long(ConfigKey::GenerateTemperature.to_string())
                .env("SOLACE_GENERATE_TEMPERATURE")
                .num_args(1)
                .help(format!(
                    "Sampling temperature for generated replies. [default: {}]",
                    Config::default(ConfigKey::GenerateTemperature)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::CrisisPhrasesFile.to_string())
                .long(ConfigKey::CrisisPhrasesFile.to_string())
                .env("SOLACE_CRISIS_PHRASES_FILE")
                .num_args(1)
                .help("Path to a newline-delimited file of crisis phrases, replacing the built-in set.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::EmergencyContact.to_string())
                .long(ConfigKey::EmergencyContact.to_string())
                .env("SOLACE_EMERGENCY_CONTACT")
                .num_args(1)
                .help(format!(
                    "Jurisdiction-specific emergency contact line appended to crisis replies. [default: {}]",
                    Config::default(ConfigKey::EmergencyContact)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::FallbackReply.to_string())
                .long(ConfigKey::FallbackReply.to_string())
                .env("SOLACE_FALLBACK_REPLY")
                .num_args(1)
                .help(format!(
                    "Reply delivered when the generation provider is unavailable. [default: {}]",
                    Config::default(ConfigKey::FallbackReply)
                ))
                .global(true),
        );
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = path::PathBuf::from(log_dir()).join("debug.log");
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let keys = ConfigKey::iter()
                        .map(|key| {
                            return key.to_string();
                        })
                        .collect::<Vec<String>>();
                    println!("{}", keys.join("\n"));
                }
                Some(("crisis-phrases", _)) => {
                    Config::load(build(), vec![&matches]).await?;
                    let scanner = CrisisScanner::from_config().await?;
                    println!("{}", scanner.phrases().join("\n"));
                }
                _ => {}
            }

            return Ok(false);
        }
        Some(("completions", completions_matches)) => {
            if let Some(shell) = completions_matches.get_one::<Shell>("shell") {
                print_completions(*shell, &mut build());
            }

            return Ok(false);
        }
        Some(("config", config_matches)) => {
            match config_matches.subcommand() {
                Some(("create", _)) => {
                    create_config_file().await?;
                }
                Some(("default", _)) => {
                    println!("{}", Config::serialize_default(build()));
                }
                Some(("path", _)) => {
                    println!("{}", Config::default(ConfigKey::ConfigFile));
                }
                _ => {}
            }

            return Ok(false);
        }
        Some(("chat", chat_matches)) => {
            Config::load(build(), vec![&matches, chat_matches]).await?;
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    healthcheck_generator().await?;

    return Ok(true);
}
