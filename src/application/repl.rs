use std::io::Write;

use anyhow::Result;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::ConversationHistory;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::PipelinePrompt;
use crate::domain::models::SlashCommand;
use crate::domain::services::actions::help_text;
use crate::domain::services::AUTO_LANGUAGE;

fn render_message(message: &Message) {
    let label = message.author.to_string();
    let painted_label = match message.author {
        Author::User => Paint::cyan(label).bold().to_string(),
        Author::Solace => Paint::magenta(label).bold().to_string(),
        Author::Model => Paint::green(label).bold().to_string(),
    };

    let text = match message.message_type() {
        MessageType::Error => Paint::red(message.text.to_string()).to_string(),
        MessageType::Crisis => Paint::yellow(message.text.to_string()).bold().to_string(),
        MessageType::Normal => message.text.to_string(),
    };

    match message.language() {
        Some(lang) => println!("{painted_label} ({lang}): {text}"),
        None => println!("{painted_label}: {text}"),
    }
}

fn render_history(history: &ConversationHistory) {
    if history.is_empty() {
        println!("Nothing here yet. Say hi!");
        return;
    }

    for message in history.messages() {
        render_message(message);
    }
}

fn prompt_user() {
    let username = Config::get(ConfigKey::Username);
    print!("{}> ", Paint::cyan(username).bold());
    let _ = std::io::stdout().flush();
}

fn set_reply_language(command: &SlashCommand) {
    if command.args.is_empty() {
        println!(
            "Replies are currently in \"{}\". Pass a language code, or \"{AUTO_LANGUAGE}\" to mirror your input.",
            Config::get(ConfigKey::ReplyLanguage)
        );
        return;
    }

    let code = command.args[0].to_lowercase();
    Config::set(ConfigKey::ReplyLanguage, &code);
    if code == AUTO_LANGUAGE {
        println!("Replies will mirror the language you write in.");
    } else {
        println!("Replies will be translated to \"{code}\".");
    }
}

async fn wait_for_reply(
    rx: &mut mpsc::UnboundedReceiver<Event>,
    history: &mut ConversationHistory,
) {
    // One request in flight per session; the service answers every request
    // with exactly one event.
    if let Some(Event::ConversationMessage(message)) = rx.recv().await {
        render_message(&message);
        if message.message_type() != MessageType::Error {
            history.append(message);
        }
    }
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    mut rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut history = ConversationHistory::default();
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    println!(
        "{}",
        Paint::magenta(
            "Solace is ready. Type how you feel, in any supported language. Run /help for commands."
        )
    );

    loop {
        prompt_user();
        let line = lines.next_line().await?;
        if line.is_none() {
            return Ok(());
        }

        let text = line.unwrap().trim().to_string();
        if text.is_empty() {
            println!("Please enter a message.");
            continue;
        }

        if let Some(command) = SlashCommand::parse(&text) {
            if command.is_quit() {
                return Ok(());
            }
            if command.is_help() {
                println!("{}", help_text());
                continue;
            }
            if command.is_history() {
                render_history(&history);
                continue;
            }
            if command.is_reply_language() {
                set_reply_language(&command);
                continue;
            }

            // Model commands need the generation provider, which lives with
            // the actions service.
            tx.send(Action::PipelineRequest(PipelinePrompt::new(
                text,
                Config::get(ConfigKey::ReplyLanguage),
            )))?;
            wait_for_reply(&mut rx, &mut history).await;
            continue;
        }

        history.append(Message::new(Author::User, &text));
        tx.send(Action::PipelineRequest(PipelinePrompt::new(
            text,
            Config::get(ConfigKey::ReplyLanguage),
        )))?;
        wait_for_reply(&mut rx, &mut history).await;
    }
}
