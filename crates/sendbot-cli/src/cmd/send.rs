use crate::output::print_json;
use anyhow::Context;
use serde::Serialize;
use sendbot_core::{
    action::Action,
    client::BotClient,
    config::{CiEnv, PullRequestContext},
    dispatch::{DeliveryRequest, Dispatcher},
    translators::{CommandTranslatorSource, TranslatorSource, Unconfigured},
};
use std::time::Duration;

/// JSON output: the delivery request plus what happened to it.
#[derive(Serialize)]
struct Report<'a> {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    endpoint: Option<&'a str>,
    #[serde(flatten)]
    request: &'a DeliveryRequest,
}

pub struct SendOptions {
    pub args: Vec<String>,
    pub bot_url: String,
    pub translators_cmd: Option<String>,
    pub timeout: Option<u64>,
    pub dry_run: bool,
}

pub fn run(opts: SendOptions, json: bool) -> anyhow::Result<()> {
    // Environment first: a non-PR build is a no-op whatever the arguments say.
    let env = match CiEnv::from_env()? {
        PullRequestContext::PullRequest(env) => env,
        PullRequestContext::NotAPullRequest => {
            if json {
                print_json(&serde_json::json!({ "status": "skipped" }))?;
            }
            eprintln!("Not a pull request, refusing to run.");
            return Ok(());
        }
    };

    let action = parse_action(&opts.args)?;
    tracing::debug!(%action, repo = %env.repo_slug, "validated invocation");

    let client = match opts.timeout {
        Some(secs) => BotClient::with_timeout(&opts.bot_url, Duration::from_secs(secs)),
        None => BotClient::new(&opts.bot_url),
    }
    .context("failed to build HTTP client")?;

    let translators: Box<dyn TranslatorSource> = match opts.translators_cmd {
        Some(command) => Box::new(CommandTranslatorSource::new(command)),
        None => Box::new(Unconfigured),
    };

    let dispatcher = Dispatcher::new(&env, &client, translators.as_ref());
    let content = dispatcher
        .content(action, &mut std::io::stdin().lock())
        .with_context(|| format!("failed to read content for {action}"))?;

    if opts.dry_run {
        let request = dispatcher.prepare(action, &content);
        return print_request(&request, &client.endpoint(request.once), json);
    }

    match dispatcher.dispatch(action, &content) {
        Ok(request) => {
            if json {
                print_json(&Report {
                    status: "sent",
                    endpoint: None,
                    request: &request,
                })?;
            } else {
                println!("Success.");
            }
            Ok(())
        }
        Err(e) if e.is_delivery() => {
            Err(anyhow::Error::new(e).context("Error sending data to tldr-bot!"))
        }
        Err(e) => Err(e.into()),
    }
}

fn parse_action(args: &[String]) -> anyhow::Result<Action> {
    let [action] = args else {
        let names: Vec<&str> = Action::all().iter().map(|a| a.as_str()).collect();
        anyhow::bail!("usage: send-to-bot <ACTION>  (one of: {})", names.join(", "));
    };
    Ok(action.parse::<Action>()?)
}

fn print_request(request: &DeliveryRequest, endpoint: &str, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&Report {
            status: "dry_run",
            endpoint: Some(endpoint),
            request,
        });
    }
    println!("POST {endpoint}");
    println!("pr_id: {}", request.pr_id);
    println!("{}", request.body);
    Ok(())
}
