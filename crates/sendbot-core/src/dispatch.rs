//! Comment Dispatcher: picks the content, renders the template and hands the
//! result to a [`CommentSink`] exactly once.

use crate::action::{Action, ContentSource};
use crate::client::CommentSink;
use crate::config::CiEnv;
use crate::error::Result;
use crate::template::{self, RenderedComment};
use crate::translators::TranslatorSource;
use serde::Serialize;
use std::io::Read;

/// What would be (or was) sent for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryRequest {
    pub action: Action,
    pub pr_id: String,
    pub body: String,
    pub once: bool,
}

pub struct Dispatcher<'a> {
    env: &'a CiEnv,
    sink: &'a dyn CommentSink,
    translators: &'a dyn TranslatorSource,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        env: &'a CiEnv,
        sink: &'a dyn CommentSink,
        translators: &'a dyn TranslatorSource,
    ) -> Self {
        Self {
            env,
            sink,
            translators,
        }
    }

    /// Gather the content for `action`: translator output verbatim, or all of
    /// `input` with surrounding whitespace removed.
    pub fn content(&self, action: Action, input: &mut dyn Read) -> Result<String> {
        match action.content_source() {
            ContentSource::Translators => self.translators.comment_body(),
            ContentSource::Stdin => {
                let mut buf = String::new();
                input.read_to_string(&mut buf)?;
                Ok(buf.trim().to_string())
            }
        }
    }

    /// Render the comment without sending it.
    pub fn prepare(&self, action: Action, content: &str) -> DeliveryRequest {
        let RenderedComment { body, once } =
            template::render(action, content, &self.env.build_id);
        DeliveryRequest {
            action,
            pr_id: self.env.pr_id.clone(),
            body,
            once,
        }
    }

    /// Render and post the comment. Failures are returned, never retried.
    pub fn dispatch(&self, action: Action, content: &str) -> Result<DeliveryRequest> {
        let request = self.prepare(action, content);
        tracing::info!(
            %action,
            repo = %self.env.repo_slug,
            pr_id = %request.pr_id,
            once = request.once,
            "sending comment to tldr-bot"
        );
        self.sink
            .post_comment(&request.pr_id, &request.body, request.once)?;
        Ok(request)
    }
}
