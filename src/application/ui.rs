use std::io;
use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use yansi::Color;
use yansi::Paint;

use crate::domain::models::Author;
use crate::domain::models::ChatMessage;
use crate::domain::models::MessageContent;
use crate::domain::models::MessageType;
use crate::domain::services::rendering;
use crate::domain::services::AuthService;
use crate::domain::services::ChatState;
use crate::domain::services::Notifications;
use crate::domain::services::PollSettings;
use crate::domain::services::SessionStore;
use crate::infrastructure::api::ApiClient;

fn author_color(author: Author, dark_mode: bool) -> Color {
    match (author, dark_mode) {
        (Author::User, true) => return Color::Yellow,
        (Author::User, false) => return Color::Magenta,
        (Author::Advisor, true) => return Color::Cyan,
        (Author::Advisor, false) => return Color::Blue,
        (Author::GradPath, _) => return Color::Green,
    }
}

pub fn print_message(message: &ChatMessage, expanded: bool, dark_mode: bool) {
    let lines = rendering::message_lines(message, expanded);
    let (header, body) = match lines.split_first() {
        Some(res) => res,
        None => return,
    };

    let mut color = author_color(message.author, dark_mode);
    if message.message_type() == MessageType::Error {
        color = Color::Red;
    }

    println!("{}", Paint::new(header).fg(color).bold());
    for line in body {
        println!("{line}");
    }
    println!();
}

/// Prints the pending notice once, if it has not expired yet. Returns whether
/// anything was printed.
pub fn print_notification(notifications: &Notifications) -> bool {
    let notification = match notifications.take() {
        Some(notification) => notification,
        None => return false,
    };

    if notification.is_success {
        println!("{}", Paint::green(format!("✔ {}", notification.message)));
    } else {
        eprintln!("{}", Paint::red(format!("✖ {}", notification.message)));
    }

    return true;
}

fn print_prompt() {
    print!("{} ", Paint::new(">").bold());
    if let Err(err) = io::stdout().flush() {
        tracing::warn!(error = ?err, "Failed to flush stdout");
    }
}

fn print_new_messages(chat: &ChatState, from: usize, dark_mode: bool) {
    for message in chat.messages.iter().skip(from) {
        if message.is_user() {
            continue;
        }
        print_message(message, false, dark_mode);
    }
}

fn print_help() {
    println!("  /details - Show full details for the last course recommendations.");
    println!("  /help - Show chat commands.");
    println!("  /quit /exit (/q) - Leave the chat.");
    println!();
}

fn print_details(chat: &ChatState, dark_mode: bool) {
    let last = chat.messages.iter().rev().find(|message| {
        return matches!(message.content, MessageContent::CourseRecommendations(_));
    });

    match last {
        Some(message) => print_message(message, true, dark_mode),
        None => println!("There are no course recommendations yet.\n"),
    }
}

/// Line based chat with the advisor. Input is read while an answer is being
/// polled for, but sending is refused until it arrives.
pub async fn start() -> Result<()> {
    let sessions = SessionStore::default();
    let session = sessions.load().await?;
    let dark_mode = session.dark_mode;

    let api = AuthService::new(ApiClient::default(), SessionStore::default())
        .client()
        .await?;
    let notifications = Notifications::default();
    let mut chat = ChatState::new(Arc::new(api), notifications.clone(), PollSettings::default());

    if let Some(user) = session.user {
        let major = user.major.unwrap_or_else(|| return "Undeclared".to_string());
        println!(
            "{}\n",
            Paint::new(format!("{} · Major: {major}", user.username)).dimmed()
        );
    }
    for message in &chat.messages {
        print_message(message, false, dark_mode);
    }
    print_prompt();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line? {
                    Some(line) => line,
                    None => break,
                };

                match line.trim() {
                    "/quit" | "/exit" | "/q" => break,
                    "/help" | "/h" => print_help(),
                    "/details" => print_details(&chat, dark_mode),
                    _ => {
                        let from = chat.messages.len();
                        match chat.send(&line).await {
                            Ok(()) => print_new_messages(&chat, from, dark_mode),
                            Err(err) => {
                                tracing::debug!(error = ?err, "Message not sent");
                                if !line.trim().is_empty() {
                                    eprintln!("{}", Paint::red(err.to_string()));
                                }
                            }
                        }
                    }
                }

                print_notification(&notifications);
                print_prompt();
            }
            Some(event) = chat.next_event() => {
                let from = chat.messages.len();
                if chat.handle_event(event) {
                    println!();
                    print_new_messages(&chat, from, dark_mode);
                    print_notification(&notifications);
                    print_prompt();
                }
            }
        }
    }

    chat.close();
    println!();

    return Ok(());
}
