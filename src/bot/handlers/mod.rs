pub mod callback;
pub mod message;

use std::sync::Arc;

use teloxide::{dispatching::UpdateHandler, prelude::*};

use crate::bot::commands::Command;
use crate::bot::AppContext;

type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub struct BotHandler {
    pub ctx: Arc<AppContext>,
}

impl BotHandler {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx }
    }

    /// Dispatch schema: commands first, then plain text (menu buttons and
    /// wizard input), then inline-keyboard callbacks.
    pub fn schema(&self) -> UpdateHandler<HandlerError> {
        use teloxide::dispatching::UpdateFilterExt;

        let ctx_command = self.ctx.clone();
        let ctx_text = self.ctx.clone();
        let ctx_callback = self.ctx.clone();

        dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(move |bot, msg, cmd| {
                        let ctx = ctx_command.clone();
                        async move {
                            message::command_handler(bot, msg, cmd, ctx)
                                .await
                                .map_err(Into::into)
                        }
                    }),
            )
            .branch(Update::filter_message().endpoint(move |bot, msg| {
                let ctx = ctx_text.clone();
                async move { message::text_handler(bot, msg, ctx).await.map_err(Into::into) }
            }))
            .branch(Update::filter_callback_query().endpoint(move |bot, q| {
                let ctx = ctx_callback.clone();
                async move { callback::callback_handler(bot, q, ctx).await.map_err(Into::into) }
            }))
    }
}
