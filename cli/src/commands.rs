//! Subcommand handlers.

use anyhow::Context;
use clap::{Args, Subcommand};
use helix_client::api::HelixApiClient;
use helix_client::emotes::{parse_emote_offsets, parse_placement_range};
use helix_client::eventsub::{
    ConditionParams, EventSubStatus, EventSubSubscription, EventSubTransportOptions,
    SUBSCRIPTION_TYPES, SubscriptionFilter,
};

use crate::config::CliConfig;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List EventSub subscriptions
    List {
        /// Only subscriptions with this status
        #[arg(long, value_parser = parse_status, conflicts_with_all = ["event_type", "user"])]
        status: Option<EventSubStatus>,

        /// Only subscriptions of this event type
        #[arg(long = "type", conflicts_with = "user")]
        event_type: Option<String>,

        /// Only subscriptions whose condition references this user ID
        #[arg(long)]
        user: Option<String>,

        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Create a subscription from the built-in type table
    Create(CreateArgs),

    /// Delete one subscription by ID
    Delete { id: String },

    /// Delete every subscription
    DeleteAll,

    /// Delete subscriptions that are neither enabled nor pending verification
    DeleteBroken,

    /// Show the built-in subscription types
    Types,

    /// Parse an emote offset string such as `25:0-4,12-16/1902:6-10`
    ParseEmotes {
        raw: Option<String>,

        /// Also print numeric ranges for each placement
        #[arg(long)]
        ranges: bool,
    },
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Friendly name (e.g. `channel_follow`) or event type (e.g. `channel.follow`)
    pub name: String,

    #[arg(long)]
    pub broadcaster: Option<String>,
    #[arg(long)]
    pub moderator: Option<String>,
    #[arg(long)]
    pub user: Option<String>,
    #[arg(long)]
    pub reward: Option<String>,
    /// Client ID for authorization grant/revoke conditions
    #[arg(long = "condition-client-id")]
    pub condition_client_id: Option<String>,
    #[arg(long)]
    pub extension_client_id: Option<String>,

    /// WebSocket session ID
    #[arg(long, conflicts_with_all = ["callback", "conduit_id"])]
    pub session_id: Option<String>,
    /// Webhook callback URL
    #[arg(long, requires = "secret", conflicts_with = "conduit_id")]
    pub callback: Option<String>,
    /// Webhook secret (10-100 characters)
    #[arg(long)]
    pub secret: Option<String>,
    #[arg(long)]
    pub conduit_id: Option<String>,
}

impl CreateArgs {
    /// Condition IDs from the flags. `--broadcaster` and `--user` fall back to
    /// the token owner when given.
    fn condition_params(&self, token_user: Option<&str>) -> ConditionParams {
        let token_user = token_user.map(str::to_string);
        ConditionParams {
            broadcaster_id: self.broadcaster.clone().or_else(|| token_user.clone()),
            moderator_id: self.moderator.clone(),
            user_id: self.user.clone().or(token_user),
            reward_id: self.reward.clone(),
            client_id: self.condition_client_id.clone(),
            extension_client_id: self.extension_client_id.clone(),
        }
    }

    fn transport(&self) -> Result<EventSubTransportOptions, anyhow::Error> {
        if let Some(session_id) = &self.session_id {
            return Ok(EventSubTransportOptions::Websocket {
                session_id: session_id.clone(),
            });
        }
        if let Some(callback) = &self.callback {
            let secret = self
                .secret
                .clone()
                .context("--secret is required with --callback")?;
            return Ok(EventSubTransportOptions::Webhook {
                callback: callback.clone(),
                secret,
            });
        }
        if let Some(conduit_id) = &self.conduit_id {
            return Ok(EventSubTransportOptions::Conduit {
                conduit_id: conduit_id.clone(),
            });
        }
        anyhow::bail!("one of --session-id, --callback or --conduit-id is required")
    }
}

fn parse_status(value: &str) -> Result<EventSubStatus, String> {
    match serde_json::from_value(serde_json::Value::String(value.to_string())) {
        Ok(EventSubStatus::Unknown) | Err(_) => Err(format!("unknown status: {value}")),
        Ok(status) => Ok(status),
    }
}

/// Whether the command needs Helix credentials.
pub fn needs_api(command: &Commands) -> bool {
    !matches!(command, Commands::Types | Commands::ParseEmotes { .. })
}

pub async fn run(command: Commands, config: Option<CliConfig>) -> Result<(), anyhow::Error> {
    let api = || -> Result<(HelixApiClient, CliConfig), anyhow::Error> {
        let config = config.clone().context("Helix credentials are not configured")?;
        let client = HelixApiClient::with_base_url(config.client_id.clone(), config.base_url.clone());
        Ok((client, config))
    };

    match command {
        Commands::List {
            status,
            event_type,
            user,
            json,
        } => {
            let filter = match (status, event_type, user) {
                (Some(status), _, _) => SubscriptionFilter::Status(status),
                (_, Some(event_type), _) => SubscriptionFilter::Type(event_type),
                (_, _, Some(user)) => SubscriptionFilter::User(user),
                _ => SubscriptionFilter::All,
            };
            let (client, config) = api()?;
            let subs = client.get_all_subscriptions(&config.token, filter).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&subs)?);
            } else {
                print_subscriptions(&subs);
            }
        }
        Commands::Create(args) => {
            let (client, config) = api()?;
            let transport = args.transport()?;
            let params = args.condition_params(config.token.user_id.as_deref());
            let created = client
                .subscribe(&config.token, &args.name, &params, transport)
                .await?;
            println!("{}", serde_json::to_string_pretty(&created)?);
        }
        Commands::Delete { id } => {
            let (client, config) = api()?;
            client.delete_subscription(&config.token, &id).await?;
            println!("Deleted {id}");
        }
        Commands::DeleteAll => {
            let (client, config) = api()?;
            let removed = client.delete_all_subscriptions(&config.token).await?;
            println!("Deleted {removed} subscription(s)");
        }
        Commands::DeleteBroken => {
            let (client, config) = api()?;
            let removed = client.delete_broken_subscriptions(&config.token).await?;
            println!("Deleted {removed} broken subscription(s)");
        }
        Commands::Types => {
            for t in SUBSCRIPTION_TYPES {
                let scopes = if t.scopes.is_empty() {
                    "-".to_string()
                } else {
                    t.scopes.join(" | ")
                };
                println!("{:<36} {:<56} v{}  {}", t.name, t.event_type, t.version, scopes);
            }
        }
        Commands::ParseEmotes { raw, ranges } => {
            let offsets = parse_emote_offsets(raw.as_deref());
            if ranges {
                for (emote_id, placements) in offsets.iter() {
                    let parsed: Vec<String> = placements
                        .iter()
                        .map(|p| match parse_placement_range(p) {
                            Some(range) => format!("{}..={}", range.start(), range.end()),
                            None => format!("{p} (invalid)"),
                        })
                        .collect();
                    println!("{emote_id}: {}", parsed.join(", "));
                }
            } else {
                println!("{}", serde_json::to_string_pretty(&offsets)?);
            }
        }
    }

    Ok(())
}

fn print_subscriptions(subs: &[EventSubSubscription]) {
    if subs.is_empty() {
        println!("No subscriptions");
        return;
    }
    for sub in subs {
        println!(
            "{}  {:<40} v{}  {:<38} {}",
            sub.id, sub.event_type, sub.version, sub.status, sub.transport.method
        );
    }
    println!("{} subscription(s)", subs.len());
}
