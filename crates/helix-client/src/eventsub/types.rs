use serde_json::{Map, Value};

use super::{CreateSubscriptionRequest, EventSubTransportOptions};
use crate::HelixError;

/// Which IDs a subscription condition is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionShape {
    /// `broadcaster_user_id`
    Broadcaster,
    /// `broadcaster_user_id` + `moderator_user_id` (defaults to the broadcaster)
    BroadcasterModerator,
    /// `broadcaster_user_id` + `user_id` (defaults to the broadcaster)
    BroadcasterUser,
    /// `to_broadcaster_user_id`
    ToBroadcaster,
    /// `from_broadcaster_user_id`
    FromBroadcaster,
    /// `broadcaster_user_id` + optional `reward_id`
    Reward,
    /// `user_id`
    User,
    /// `client_id`
    ClientId,
    /// `extension_client_id`
    ExtensionClient,
}

/// IDs supplied by the caller when subscribing.
#[derive(Debug, Clone, Default)]
pub struct ConditionParams {
    pub broadcaster_id: Option<String>,
    pub moderator_id: Option<String>,
    pub user_id: Option<String>,
    pub reward_id: Option<String>,
    pub client_id: Option<String>,
    pub extension_client_id: Option<String>,
}

impl ConditionParams {
    pub fn broadcaster(broadcaster_id: impl Into<String>) -> Self {
        Self {
            broadcaster_id: Some(broadcaster_id.into()),
            ..Self::default()
        }
    }

    pub fn user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Self::default()
        }
    }

    pub fn client(client_id: impl Into<String>) -> Self {
        Self {
            client_id: Some(client_id.into()),
            ..Self::default()
        }
    }

    pub fn with_moderator(mut self, moderator_id: impl Into<String>) -> Self {
        self.moderator_id = Some(moderator_id.into());
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_reward(mut self, reward_id: impl Into<String>) -> Self {
        self.reward_id = Some(reward_id.into());
        self
    }

    pub fn with_extension_client(mut self, extension_client_id: impl Into<String>) -> Self {
        self.extension_client_id = Some(extension_client_id.into());
        self
    }
}

/// One row of the subscription type table.
#[derive(Debug)]
pub struct SubscriptionType {
    /// Friendly name, e.g. `channel_follow`.
    pub name: &'static str,
    pub event_type: &'static str,
    pub version: &'static str,
    pub condition: ConditionShape,
    /// The token needs any one of these. Empty means no scope is required.
    pub scopes: &'static [&'static str],
}

const fn sub(
    name: &'static str,
    event_type: &'static str,
    version: &'static str,
    condition: ConditionShape,
    scopes: &'static [&'static str],
) -> SubscriptionType {
    SubscriptionType {
        name,
        event_type,
        version,
        condition,
        scopes,
    }
}

const SUBSCRIPTIONS_READ: &[&str] = &["channel:read:subscriptions"];
const REDEMPTIONS: &[&str] = &["channel:read:redemptions", "channel:manage:redemptions"];
const POLLS: &[&str] = &["channel:read:polls", "channel:manage:polls"];
const PREDICTIONS: &[&str] = &["channel:read:predictions", "channel:manage:predictions"];
const GOALS: &[&str] = &["channel:read:goals"];
const HYPE_TRAIN: &[&str] = &["channel:read:hype_train"];
const CHARITY: &[&str] = &["channel:read:charity"];
const SHIELD_MODE: &[&str] = &["moderator:read:shield_mode", "moderator:manage:shield_mode"];
const SHOUTOUTS: &[&str] = &["moderator:read:shoutouts", "moderator:manage:shoutouts"];
const CHAT_READ: &[&str] = &["user:read:chat"];
const UNBAN_REQUESTS: &[&str] = &[
    "moderator:read:unban_requests",
    "moderator:manage:unban_requests",
];
const WARNINGS: &[&str] = &["moderator:read:warnings", "moderator:manage:warnings"];
const SUSPICIOUS_USERS: &[&str] = &["moderator:read:suspicious_users"];
const AUTOMOD: &[&str] = &["moderator:manage:automod"];

use ConditionShape::*;

/// Known EventSub subscription types.
#[rustfmt::skip]
pub static SUBSCRIPTION_TYPES: &[SubscriptionType] = &[
    sub("stream_online", "stream.online", "1", Broadcaster, &[]),
    sub("stream_offline", "stream.offline", "1", Broadcaster, &[]),
    sub("channel_update", "channel.update", "2", Broadcaster, &[]),
    sub("channel_follow", "channel.follow", "2", BroadcasterModerator, &["moderator:read:followers"]),
    sub("channel_subscribe", "channel.subscribe", "1", Broadcaster, SUBSCRIPTIONS_READ),
    sub("channel_subscription_end", "channel.subscription.end", "1", Broadcaster, SUBSCRIPTIONS_READ),
    sub("channel_subscription_gift", "channel.subscription.gift", "1", Broadcaster, SUBSCRIPTIONS_READ),
    sub("channel_subscription_message", "channel.subscription.message", "1", Broadcaster, SUBSCRIPTIONS_READ),
    sub("channel_cheer", "channel.cheer", "1", Broadcaster, &["bits:read"]),
    sub("channel_raid_to", "channel.raid", "1", ToBroadcaster, &[]),
    sub("channel_raid_from", "channel.raid", "1", FromBroadcaster, &[]),
    sub("channel_ban", "channel.ban", "1", Broadcaster, &["channel:moderate"]),
    sub("channel_unban", "channel.unban", "1", Broadcaster, &["channel:moderate"]),
    sub("channel_moderator_add", "channel.moderator.add", "1", Broadcaster, &["moderation:read"]),
    sub("channel_moderator_remove", "channel.moderator.remove", "1", Broadcaster, &["moderation:read"]),
    sub("channel_reward_add", "channel.channel_points_custom_reward.add", "1", Broadcaster, REDEMPTIONS),
    sub("channel_reward_update", "channel.channel_points_custom_reward.update", "1", Reward, REDEMPTIONS),
    sub("channel_reward_remove", "channel.channel_points_custom_reward.remove", "1", Reward, REDEMPTIONS),
    sub("channel_redemption_add", "channel.channel_points_custom_reward_redemption.add", "1", Reward, REDEMPTIONS),
    sub("channel_redemption_update", "channel.channel_points_custom_reward_redemption.update", "1", Reward, REDEMPTIONS),
    sub("channel_poll_begin", "channel.poll.begin", "1", Broadcaster, POLLS),
    sub("channel_poll_progress", "channel.poll.progress", "1", Broadcaster, POLLS),
    sub("channel_poll_end", "channel.poll.end", "1", Broadcaster, POLLS),
    sub("channel_prediction_begin", "channel.prediction.begin", "1", Broadcaster, PREDICTIONS),
    sub("channel_prediction_progress", "channel.prediction.progress", "1", Broadcaster, PREDICTIONS),
    sub("channel_prediction_lock", "channel.prediction.lock", "1", Broadcaster, PREDICTIONS),
    sub("channel_prediction_end", "channel.prediction.end", "1", Broadcaster, PREDICTIONS),
    sub("channel_goal_begin", "channel.goal.begin", "1", Broadcaster, GOALS),
    sub("channel_goal_progress", "channel.goal.progress", "1", Broadcaster, GOALS),
    sub("channel_goal_end", "channel.goal.end", "1", Broadcaster, GOALS),
    sub("channel_hype_train_begin", "channel.hype_train.begin", "1", Broadcaster, HYPE_TRAIN),
    sub("channel_hype_train_progress", "channel.hype_train.progress", "1", Broadcaster, HYPE_TRAIN),
    sub("channel_hype_train_end", "channel.hype_train.end", "1", Broadcaster, HYPE_TRAIN),
    sub("channel_charity_donation", "channel.charity_campaign.donate", "1", Broadcaster, CHARITY),
    sub("channel_charity_start", "channel.charity_campaign.start", "1", Broadcaster, CHARITY),
    sub("channel_charity_progress", "channel.charity_campaign.progress", "1", Broadcaster, CHARITY),
    sub("channel_charity_stop", "channel.charity_campaign.stop", "1", Broadcaster, CHARITY),
    sub("channel_shield_mode_begin", "channel.shield_mode.begin", "1", BroadcasterModerator, SHIELD_MODE),
    sub("channel_shield_mode_end", "channel.shield_mode.end", "1", BroadcasterModerator, SHIELD_MODE),
    sub("channel_shoutout_create", "channel.shoutout.create", "1", BroadcasterModerator, SHOUTOUTS),
    sub("channel_shoutout_receive", "channel.shoutout.receive", "1", BroadcasterModerator, SHOUTOUTS),
    sub("channel_chat_message", "channel.chat.message", "1", BroadcasterUser, CHAT_READ),
    sub("channel_chat_notification", "channel.chat.notification", "1", BroadcasterUser, CHAT_READ),
    sub("channel_chat_clear", "channel.chat.clear", "1", BroadcasterUser, CHAT_READ),
    sub("channel_chat_clear_user_messages", "channel.chat.clear_user_messages", "1", BroadcasterUser, CHAT_READ),
    sub("channel_chat_message_delete", "channel.chat.message_delete", "1", BroadcasterUser, CHAT_READ),
    sub("channel_chat_settings_update", "channel.chat_settings.update", "1", BroadcasterUser, CHAT_READ),
    sub("channel_ad_break_begin", "channel.ad_break.begin", "1", Broadcaster, &["channel:read:ads"]),
    sub("channel_unban_request_create", "channel.unban_request.create", "1", BroadcasterModerator, UNBAN_REQUESTS),
    sub("channel_unban_request_resolve", "channel.unban_request.resolve", "1", BroadcasterModerator, UNBAN_REQUESTS),
    sub("channel_warning_acknowledge", "channel.warning.acknowledge", "1", BroadcasterModerator, WARNINGS),
    sub("channel_warning_send", "channel.warning.send", "1", BroadcasterModerator, WARNINGS),
    sub("channel_suspicious_user_message", "channel.suspicious_user.message", "1", BroadcasterModerator, SUSPICIOUS_USERS),
    sub("channel_suspicious_user_update", "channel.suspicious_user.update", "1", BroadcasterModerator, SUSPICIOUS_USERS),
    sub("automod_message_hold", "automod.message.hold", "1", BroadcasterModerator, AUTOMOD),
    sub("automod_message_update", "automod.message.update", "1", BroadcasterModerator, AUTOMOD),
    sub("automod_settings_update", "automod.settings.update", "1", BroadcasterModerator, &["moderator:read:automod_settings", "moderator:manage:automod_settings"]),
    sub("automod_terms_update", "automod.terms.update", "1", BroadcasterModerator, AUTOMOD),
    sub("user_update", "user.update", "1", User, &[]),
    sub("user_whisper_message", "user.whisper.message", "1", User, &["user:read:whispers", "user:manage:whispers"]),
    sub("user_authorization_grant", "user.authorization.grant", "1", ClientId, &[]),
    sub("user_authorization_revoke", "user.authorization.revoke", "1", ClientId, &[]),
    sub("extension_bits_transaction_create", "extension.bits_transaction.create", "1", ExtensionClient, &[]),
];

impl SubscriptionType {
    /// Look up a type by friendly name, falling back to the first row with that event type.
    pub fn find(name_or_event_type: &str) -> Option<&'static SubscriptionType> {
        SUBSCRIPTION_TYPES
            .iter()
            .find(|t| t.name == name_or_event_type)
            .or_else(|| {
                SUBSCRIPTION_TYPES
                    .iter()
                    .find(|t| t.event_type == name_or_event_type)
            })
    }

    /// Build the condition object for this type from the caller's IDs.
    pub fn build_condition(&self, params: &ConditionParams) -> Result<Value, HelixError> {
        let mut condition = Map::new();
        let mut put = |key: &str, value: &str| {
            condition.insert(key.to_string(), Value::String(value.to_string()));
        };

        match self.condition {
            Broadcaster => {
                put("broadcaster_user_id", self.require(&params.broadcaster_id, "broadcaster_id")?);
            }
            BroadcasterModerator => {
                let broadcaster = self.require(&params.broadcaster_id, "broadcaster_id")?;
                let moderator = non_empty(&params.moderator_id).unwrap_or(broadcaster);
                put("broadcaster_user_id", broadcaster);
                put("moderator_user_id", moderator);
            }
            BroadcasterUser => {
                let broadcaster = self.require(&params.broadcaster_id, "broadcaster_id")?;
                let user = non_empty(&params.user_id).unwrap_or(broadcaster);
                put("broadcaster_user_id", broadcaster);
                put("user_id", user);
            }
            ToBroadcaster => {
                put("to_broadcaster_user_id", self.require(&params.broadcaster_id, "broadcaster_id")?);
            }
            FromBroadcaster => {
                put("from_broadcaster_user_id", self.require(&params.broadcaster_id, "broadcaster_id")?);
            }
            Reward => {
                put("broadcaster_user_id", self.require(&params.broadcaster_id, "broadcaster_id")?);
                if let Some(reward) = non_empty(&params.reward_id) {
                    put("reward_id", reward);
                }
            }
            User => put("user_id", self.require(&params.user_id, "user_id")?),
            ClientId => put("client_id", self.require(&params.client_id, "client_id")?),
            ExtensionClient => put(
                "extension_client_id",
                self.require(&params.extension_client_id, "extension_client_id")?,
            ),
        }

        Ok(Value::Object(condition))
    }

    /// Build a full create request for this type.
    pub fn request(
        &self,
        params: &ConditionParams,
        transport: EventSubTransportOptions,
    ) -> Result<CreateSubscriptionRequest, HelixError> {
        Ok(CreateSubscriptionRequest {
            event_type: self.event_type.to_string(),
            version: self.version.to_string(),
            condition: self.build_condition(params)?,
            transport,
            scopes: self.scopes.iter().map(|s| s.to_string()).collect(),
            batched: false,
        })
    }

    fn require<'a>(
        &self,
        value: &'a Option<String>,
        field: &'static str,
    ) -> Result<&'a str, HelixError> {
        non_empty(value).ok_or_else(|| HelixError::MissingCondition {
            event_type: self.event_type.to_string(),
            field,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
