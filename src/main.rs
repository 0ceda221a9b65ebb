#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::process;

use anyhow::Error;
use yansi::Paint;

use crate::application::cli;
use crate::application::commands::ReportedError;
use crate::application::ui;

fn handle_error(err: Error) {
    if err.downcast_ref::<ReportedError>().is_none() {
        eprintln!("{}", Paint::red(format!("Error: {err}")));
    }

    let backtrace = err.backtrace();
    if backtrace.to_string() != "disabled backtrace" {
        eprintln!("\n{}", backtrace);
    } else if env::var("RUST_LOG").is_err() {
        let args = env::args().collect::<Vec<String>>().join(" ");
        eprintln!(
            "\nRunning the following writes a debug log to {}:",
            log_dir()
        );
        eprintln!("\nRUST_LOG=gradpath {args}");
    }

    process::exit(1);
}

fn log_dir() -> String {
    return env::var("GRADPATH_LOG_DIR").unwrap_or_else(|_| {
        return dirs::cache_dir()
            .unwrap_or_else(env::temp_dir)
            .join("gradpath")
            .to_string_lossy()
            .to_string();
    });
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let file_appender = tracing_appender::rolling::never(log_dir(), "debug.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    if env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("gradpath")
    {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(writer)
            .init();
    }

    let start_chat = match cli::parse().await {
        Ok(start_chat) => start_chat,
        Err(err) => {
            handle_error(err);
            return;
        }
    };
    if !start_chat {
        return;
    }

    if let Err(err) = ui::start().await {
        handle_error(err);
    }
}
