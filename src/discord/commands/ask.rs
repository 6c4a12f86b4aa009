use poise::serenity_prelude as serenity;

pub const QUESTION_OPTION: &str = "question";

/// `/ask question:<string>`
pub fn create_ask_command() -> serenity::CreateCommand {
    serenity::CreateCommand::new("ask")
        .description("Ask the AI a question")
        .add_option(
            serenity::CreateCommandOption::new(
                serenity::CommandOptionType::String,
                QUESTION_OPTION,
                "The question you want to ask",
            )
            .required(true),
        )
}
