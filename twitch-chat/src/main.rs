use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use twitch_api::{
    auth::{self, Scope},
    client::Client,
    events::{
        chat::{message::ChatMessage, notification::ChatNotification},
        stream::{StreamOffline, StreamOnline},
        subscription::{DeleteSubscriptionRequest, GetSubscriptionsRequest},
    },
    secret::Secret,
    user::UsersRequest,
};
use twitch_eventsub::{
    codec::{Metadata, SessionWelcomeInfo},
    config::ControllerConfig,
    Controller, Listener,
};

mod cmd;

#[derive(Debug, Parser)]
#[clap(version)]
/// Twitch chat in the terminal
enum Cmd {
    Auth(auth::Auth),
    Run(cmd::Run),
    #[clap(subcommand)]
    Eventsub(cmd::Eventsub),
}

fn main() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(run())
}

async fn run() -> Result<()> {
    let cmd = Cmd::parse();

    match cmd {
        Cmd::Auth(cmd) => {
            cmd.run([
                Scope::UserReadChat,
                Scope::UserWriteChat,
                Scope::ModeratorManageAnnouncements,
                Scope::ModeratorReadFollowers,
            ])
            .await
        }
        Cmd::Run(cmd) => cmd.run().await,
        Cmd::Eventsub(cmd) => cmd.run().await,
    }
}

/// Prints every event it's handed; stands in for a real chat UI.
struct LoggingListener;

impl Listener for LoggingListener {
    fn on_session_welcome(&mut self, _metadata: &Metadata, welcome: &SessionWelcomeInfo) {
        eprintln!("session welcome: {}", welcome.session_id);
    }

    fn on_notification(&mut self, _metadata: &Metadata, _event: &Value) {}

    fn on_channel_chat_message(&mut self, _metadata: &Metadata, event: &ChatMessage) {
        println!("{}: {}", event.chatter_user_login, event.message.text);
    }

    fn on_channel_chat_notification(&mut self, _metadata: &Metadata, event: &ChatNotification) {
        println!("* {} ({:?})", event.chatter_user_name, event.notice_type);
    }

    fn on_stream_online(&mut self, _metadata: &Metadata, event: &StreamOnline) {
        println!("{} went live", event.broadcaster_user_login);
    }

    fn on_stream_offline(&mut self, _metadata: &Metadata, event: &StreamOffline) {
        println!("{} went offline", event.broadcaster_user_login);
    }
}

impl cmd::Run {
    async fn run(&self) -> Result<()> {
        let client = Client::new().authenticated_from_env()?;

        let mut lookup = Client::new().authenticated_from_env()?;
        let user = lookup
            .send(&UsersRequest::me())
            .await
            .context("fetch user me")?
            .into_user()
            .context("missing me user")?;
        eprintln!("user id: {}", user.id);

        let config = ControllerConfig::load_from_env().unwrap_or_else(|err| {
            eprintln!("eventsub: using default config ({err})");
            ControllerConfig::default()
        });

        let controller = Controller::new(config, client, Box::new(LoggingListener));

        let _chat_message = controller.subscribe::<ChatMessage>(
            user.id.clone(),
            twitch_api::events::chat::message::ChatMessageCondition {
                broadcaster_user_id: user.id.clone(),
                user_id: user.id.clone(),
            },
        );
        let _chat_notification = controller.subscribe::<ChatNotification>(
            user.id.clone(),
            twitch_api::events::chat::notification::ChatNotificationCondition {
                broadcaster_user_id: user.id.clone(),
                user_id: user.id.clone(),
            },
        );
        let _stream_online = controller.subscribe::<StreamOnline>(
            user.id.clone(),
            twitch_api::events::stream::StreamOnlineCondition {
                broadcaster_user_id: user.id.clone(),
            },
        );
        let _stream_offline = controller.subscribe::<StreamOffline>(
            user.id.clone(),
            twitch_api::events::stream::StreamOfflineCondition {
                broadcaster_user_id: user.id.clone(),
            },
        );

        controller.start();

        eprintln!("running, press ctrl-c to exit");
        tokio::signal::ctrl_c().await.context("wait for ctrl-c")?;

        Ok(())
    }
}

impl cmd::Eventsub {
    async fn run(self) -> Result<()> {
        let mut client = Client::new().authenticated_from_env()?;

        match self {
            Self::List {} => {
                let res = client
                    .send(&GetSubscriptionsRequest {
                        ..Default::default()
                    })
                    .await
                    .context("get subscriptions")?;
                eprintln!("{res:#?}");
            }
            Self::Delete { all, id } => {
                let ids = if all {
                    let res = client
                        .send(&GetSubscriptionsRequest {
                            ..Default::default()
                        })
                        .await
                        .context("get subscriptions")?;

                    res.data.into_iter().map(|i| i.id).collect()
                } else {
                    Vec::from_iter(id.map(Secret::new))
                };

                let num_ids = ids.len();
                for id in ids {
                    client
                        .send(&DeleteSubscriptionRequest { id })
                        .await
                        .context("delete subscription")?;
                }

                eprintln!("deleted {num_ids} ids",);
            }
        }

        Ok(())
    }
}
