use anyhow::Result;
use tokio::sync::mpsc;

use super::crisis::CrisisScanner;
use super::pipeline::MessagePipeline;
use super::pipeline::PipelineSettings;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::Event;
use crate::domain::models::GeneratorName;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::PipelineError;
use crate::domain::models::PipelinePrompt;
use crate::domain::models::SlashCommand;
use crate::infrastructure::providers::GeneratorBox;
use crate::infrastructure::providers::ProviderManager;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /lang (/l) [LANGUAGE_CODE] - Sets the language replies are translated to. Pass "auto" to mirror the language you write in.
- /modellist (/ml) - Lists all available models from the generation provider.
- /model (/m) [MODEL_NAME,MODEL_INDEX] - Sets the specified model as the active model. You can pass either the model name, or the index from /modellist.
- /history (/hist) - Prints the conversation so far.
- /quit /exit (/q) - Exit Solace.
- /help (/h) - Provides this help menu.

SAFETY:
Solace is a companion, not a medical service. When a message mentions self-harm, the reply is a fixed supportive note with an emergency contact instead of generated text. Configure the contact line for your region with --emergency-contact.
        "#;

    return text.trim().to_string();
}

async fn model_list(generator: &GeneratorBox, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    let models = match generator.list_models().await {
        Ok(mut models) => {
            models.sort();
            models
        }
        Err(err) => {
            tracing::error!(error = ?err, "Failed to list models");
            let msg = Message::new_with_type(
                Author::Solace,
                MessageType::Error,
                "The generation provider did not return a model list. Check your credentials and try again.",
            );
            tx.send(Event::ConversationMessage(msg))?;
            return Ok(());
        }
    };

    let res = models
        .iter()
        .enumerate()
        .map(|(idx, model)| {
            let n = idx + 1;
            return format!("- ({n}) {model}");
        })
        .collect::<Vec<String>>();

    tx.send(Event::ConversationMessage(Message::new(
        Author::Solace,
        res.join("\n").as_str(),
    )))?;

    return Ok(());
}

async fn model_set(
    generator: &GeneratorBox,
    tx: &mpsc::UnboundedSender<Event>,
    text: &str,
) -> Result<()> {
    let mut model_name = text.split(' ').last().unwrap().to_string();
    if SlashCommand::parse(&model_name).is_some() {
        let msg = Message::new_with_type(
            Author::Solace,
            MessageType::Error,
            "You must specify a model name with `/model` or `/m`. Run `/help` for more details.",
        );
        tx.send(Event::ConversationMessage(msg))?;
        return Ok(());
    }

    let mut models = match generator.list_models().await {
        Ok(models) => models,
        Err(err) => {
            tracing::error!(error = ?err, "Failed to list models");
            let msg = Message::new_with_type(
                Author::Solace,
                MessageType::Error,
                "The generation provider did not return a model list. Check your credentials and try again.",
            );
            tx.send(Event::ConversationMessage(msg))?;
            return Ok(());
        }
    };
    models.sort();

    if let Ok(idx) = model_name.parse::<usize>() {
        if idx < 1 || idx > models.len() {
            let msg = Message::new_with_type(
                Author::Solace,
                MessageType::Error,
                &format!("{idx} is not a valid index from the model list."),
            );
            tx.send(Event::ConversationMessage(msg))?;
            return Ok(());
        }
        model_name = models[idx - 1].to_string();
    }

    if !models.contains(&model_name) {
        let generator_name = Config::get(ConfigKey::Generator);
        let msg = Message::new_with_type(
            Author::Solace,
            MessageType::Error,
            &format!(
                "No model named {model_name} found in provider {generator_name}. Did you mistype it?"
            ),
        );
        tx.send(Event::ConversationMessage(msg))?;
        return Ok(());
    }

    Config::set(ConfigKey::Model, &model_name);

    tx.send(Event::ConversationMessage(Message::new(
        Author::Model,
        &format!("{model_name} has entered the chat."),
    )))?;

    return Ok(());
}

fn empty_input_error(tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    tx.send(Event::ConversationMessage(Message::new_with_type(
        Author::Solace,
        MessageType::Error,
        "Your message is empty. Type how you feel and press enter.",
    )))?;

    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let generator_name = GeneratorName::parse(Config::get(ConfigKey::Generator))
            .ok_or_else(|| {
                return anyhow::anyhow!(
                    "No generation provider named {}",
                    Config::get(ConfigKey::Generator)
                );
            })?;

        let generator = ProviderManager::get_generator(generator_name)?;
        let pipeline = MessagePipeline::new(
            ProviderManager::get_detector()?,
            ProviderManager::get_translator()?,
            ProviderManager::get_generator(generator_name)?,
            CrisisScanner::from_config().await?,
            PipelineSettings::from_config()?,
        );

        loop {
            let event = rx.recv().await;
            if event.is_none() {
                continue;
            }

            match event.unwrap() {
                Action::PipelineRequest(prompt) => {
                    if let Some(command) = SlashCommand::parse(&prompt.text) {
                        if command.is_model_list() {
                            model_list(&generator, &tx).await?;
                            continue;
                        }
                        if command.is_model_set() {
                            model_set(&generator, &tx, &prompt.text).await?;
                            continue;
                        }
                    }

                    Self::run_pipeline(&pipeline, prompt, &tx).await?;
                }
            }
        }
    }

    async fn run_pipeline(
        pipeline: &MessagePipeline,
        prompt: PipelinePrompt,
        tx: &mpsc::UnboundedSender<Event>,
    ) -> Result<()> {
        match pipeline
            .handle(&prompt.text, Some(&prompt.reply_language))
            .await
        {
            Ok(reply) => {
                let mtype = if reply.crisis {
                    MessageType::Crisis
                } else {
                    MessageType::Normal
                };
                let msg =
                    Message::new_with_language(Author::Model, mtype, &reply.text, &reply.language);
                tx.send(Event::ConversationMessage(msg))?;
            }
            Err(PipelineError::EmptyInput) => {
                empty_input_error(tx)?;
            }
        }

        return Ok(());
    }
}
