use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use super::commands;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ProgramKind;
use crate::domain::services::SessionStore;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

async fn set_dark_mode(value: &str) -> Result<()> {
    let dark_mode = value == "on";
    SessionStore::default().set_dark_mode(dark_mode).await?;
    println!("Dark mode turned {value}");

    return Ok(());
}

fn config_value(key: ConfigKey) -> impl Fn(&str) -> Result<String, String> + Clone + Send + Sync + 'static {
    return move |val: &str| {
        Config::validate(key, val)?;
        return Ok(val.to_string());
    };
}

fn arg_yes() -> Arg {
    return Arg::new("yes")
        .short('y')
        .long("yes")
        .help("Skip the confirmation prompt.")
        .action(ArgAction::SetTrue);
}

fn arg_id(help: &'static str) -> Arg {
    return Arg::new("id")
        .short('i')
        .long("id")
        .help(help)
        .value_parser(value_parser!(i64))
        .required(true);
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
        .about("Configuration file and preference options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        )
        .subcommand(
            Command::new("dark-mode")
                .about("Turns dark mode on or off. Stored with your session.")
                .arg(
                    Arg::new("value")
                        .help("on or off")
                        .value_parser(PossibleValuesParser::new(["on", "off"]))
                        .required(true),
                ),
        );
}

fn subcommand_login() -> Command {
    return Command::new("login")
        .about("Log in with your GradPath username and password.")
        .arg(
            Arg::new("username")
                .short('u')
                .long("username")
                .help("Username. Prompted for when omitted."),
        );
}

fn subcommand_register() -> Command {
    return Command::new("register")
        .about("Create a GradPath account and log in.")
        .arg(Arg::new("username").short('u').long("username").help("Username."))
        .arg(Arg::new("email").short('e').long("email").help("Email address."))
        .arg(
            Arg::new("major")
                .short('m')
                .long("major")
                .help("Major. Picked from the available majors when omitted."),
        );
}

fn subcommand_courses() -> Command {
    let course_args = [
        Arg::new("department")
            .short('d')
            .long("department")
            .help("Department code, such as CS."),
        Arg::new("number")
            .short('n')
            .long("number")
            .help("Course number, such as 310."),
        Arg::new("name").long("name").help("Course name."),
        Arg::new("term")
            .short('t')
            .long("term")
            .help("Term the course was taken, such as Fall 2023."),
    ];

    return Command::new("courses")
        .about("Manage the courses you have taken.")
        .arg_required_else_help(true)
        .subcommand(Command::new("list").about("List your courses."))
        .subcommand(
            Command::new("add")
                .about("Add a course. Missing fields are prompted for.")
                .args(course_args.clone()),
        )
        .subcommand(
            Command::new("update")
                .about("Replace a course. Fields not passed keep their current value.")
                .arg(arg_id("Id of the course to update."))
                .args(course_args),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove a course.")
                .arg(arg_id("Id of the course to remove."))
                .arg(arg_yes()),
        );
}

fn subcommand_majors() -> Command {
    return Command::new("majors")
        .about("Manage your majors.")
        .arg_required_else_help(true)
        .subcommand(Command::new("list").about("List your majors."))
        .subcommand(Command::new("available").about("List every major you can add."))
        .subcommand(
            Command::new("add")
                .about("Add a major. Picked from the available majors when omitted.")
                .arg(Arg::new("name").help("Major name.")),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove a major.")
                .arg(arg_id("Id of the major to remove."))
                .arg(arg_yes()),
        );
}

fn subcommand_programs() -> Command {
    return Command::new("programs")
        .about("Manage your majors, minors, certificates and concentrations.")
        .arg_required_else_help(true)
        .subcommand(Command::new("list").about("List your programs."))
        .subcommand(Command::new("templates").about("List the program templates."))
        .subcommand(
            Command::new("assign")
                .about("Add a program from a template. Picked interactively when omitted.")
                .arg(Arg::new("template").help("Template id.")),
        )
        .subcommand(
            Command::new("create")
                .about("Add a custom program.")
                .arg(
                    Arg::new("type")
                        .short('t')
                        .long("type")
                        .help("Program type.")
                        .value_parser(PossibleValuesParser::new(ProgramKind::VARIANTS))
                        .required(true),
                )
                .arg(
                    Arg::new("name")
                        .short('n')
                        .long("name")
                        .help("Program name.")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("update")
                .about("Rename or retype a program.")
                .arg(Arg::new("name").help("Current program name.").required(true))
                .arg(
                    Arg::new("type")
                        .short('t')
                        .long("type")
                        .help("New program type.")
                        .value_parser(PossibleValuesParser::new(ProgramKind::VARIANTS)),
                )
                .arg(
                    Arg::new("new-name")
                        .short('n')
                        .long("new-name")
                        .help("New program name."),
                ),
        )
        .subcommand(Command::new("progress").about("Show the requirements left in each program."))
        .subcommand(
            Command::new("remove")
                .about("Remove a program by name.")
                .arg(Arg::new("name").help("Program name.").required(true))
                .arg(arg_yes()),
        );
}

pub fn build() -> Command {
    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    let chat_help = format!(
        "{}\n  /details - Show full details for the last course recommendations.\n  /help - Show chat commands.\n  /quit /exit (/q) - Leave the chat.",
        Paint::new("CHAT COMMANDS:").underline().bold()
    );

    return Command::new("gradpath")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(chat_help)
        .arg_required_else_help(false)
        .subcommand(Command::new("chat").about("Chat with your academic advisor. This is the default."))
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_courses())
        .subcommand(subcommand_login())
        .subcommand(Command::new("logout").about("Forget the stored login."))
        .subcommand(subcommand_majors())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .subcommand(subcommand_programs())
        .subcommand(
            Command::new("recommend")
                .about("Get course recommendations from your completed courses."),
        )
        .subcommand(subcommand_register())
        .subcommand(Command::new("whoami").about("Show the logged in user."))
        .arg(
            Arg::new(ConfigKey::ApiURL.to_string())
                .long(ConfigKey::ApiURL.to_string())
                .env("GRADPATH_API_URL")
                .num_args(1)
                .help(format!("Base URL of the GradPath API. [default: {}]", Config::default(ConfigKey::ApiURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("GRADPATH_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::NotificationDuration.to_string())
                .long(ConfigKey::NotificationDuration.to_string())
                .env("GRADPATH_NOTIFICATION_DURATION")
                .num_args(1)
                .value_parser(config_value(ConfigKey::NotificationDuration))
                .help(format!("Time in milliseconds a notification stays visible. [default: {}]", Config::default(ConfigKey::NotificationDuration)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::PollInterval.to_string())
                .long(ConfigKey::PollInterval.to_string())
                .env("GRADPATH_POLL_INTERVAL")
                .num_args(1)
                .value_parser(config_value(ConfigKey::PollInterval))
                .help(format!("Time in milliseconds between checks for a pending advisor answer. [default: {}]", Config::default(ConfigKey::PollInterval)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::PollMaxAttempts.to_string())
                .long(ConfigKey::PollMaxAttempts.to_string())
                .env("GRADPATH_POLL_MAX_ATTEMPTS")
                .num_args(1)
                .value_parser(config_value(ConfigKey::PollMaxAttempts))
                .help(format!("Number of checks for a pending advisor answer before giving up. [default: {}]", Config::default(ConfigKey::PollMaxAttempts)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::RequestTimeout.to_string())
                .long(ConfigKey::RequestTimeout.to_string())
                .env("GRADPATH_REQUEST_TIMEOUT")
                .num_args(1)
                .value_parser(config_value(ConfigKey::RequestTimeout))
                .help(format!("Time in milliseconds to wait for a single API request. [default: {}]", Config::default(ConfigKey::RequestTimeout)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::SessionFile.to_string())
                .long(ConfigKey::SessionFile.to_string())
                .env("GRADPATH_SESSION_FILE")
                .num_args(1)
                .help(format!("Path to the file holding the login and preferences. [default: {}]", Config::default(ConfigKey::SessionFile)))
                .global(true),
        );
}

/// Runs the chosen subcommand. Returns true when the chat should start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();
    return dispatch(&matches).await;
}

async fn dispatch(matches: &ArgMatches) -> Result<bool> {
    match matches.subcommand() {
        Some(("chat", subcmd_matches)) => {
            Config::load(build(), vec![matches, subcmd_matches]).await?;
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(false);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            Some(("dark-mode", dark_mode_matches)) => {
                Config::load(build(), vec![matches, subcmd_matches, dark_mode_matches]).await?;
                if let Some(value) = dark_mode_matches.get_one::<String>("value") {
                    set_dark_mode(value).await?;
                }
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(false);
        }
        Some((name, subcmd_matches)) => {
            let mut layers = vec![matches, subcmd_matches];
            if let Some((_, action_matches)) = subcmd_matches.subcommand() {
                layers.push(action_matches);
            }
            Config::load(build(), layers).await?;
            commands::run(name, subcmd_matches).await?;
            return Ok(false);
        }
        None => {
            Config::load(build(), vec![matches]).await?;
        }
    }

    return Ok(true);
}
