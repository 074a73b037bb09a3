mod cache;
mod codeforces;
mod commands;
mod config;
mod init;
mod store;
mod utils;

use init::init_logger;

use cache::UpdateCache;
use codeforces::api::{ApiClient, ReqwestFetcher};
use commands::cf;
use config::Config;
use dotenvy::dotenv;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use std::time::Duration;
use store::{HandleStore, JsonHandleStore};
use tokio::runtime::Builder;
use tokio::sync::Mutex;

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, Data, Error>;

#[derive(Clone)]
pub struct Data {
    api: Arc<ApiClient>,
    store: Arc<Mutex<JsonHandleStore>>,
    cache: Arc<Mutex<UpdateCache>>,
    contest_window_hours: i64,
}

/// Runs one refresh cycle off the async threads and stores the result.
pub async fn refresh_cache(data: &Data) -> Result<i64, Error> {
    let handles = data.store.lock().await.get();
    let api = Arc::clone(&data.api);
    let now = commands::now();
    let snapshot = tokio::task::spawn_blocking(move || cache::refresh(&api, &handles, now)).await??;
    if !snapshot.changes.skipped.is_empty() {
        log::warn!("no rating history for {}", snapshot.changes.skipped.join(", "));
    }
    data.cache.lock().await.store(snapshot);
    Ok(now)
}

async fn interval(data: Data, period: Duration) {
    log::info!("regular update every {}s", period.as_secs());
    let mut ticker = tokio::time::interval(period);
    loop {
        ticker.tick().await;
        log::info!("regular update started");
        match refresh_cache(&data).await {
            Ok(_) => log::info!("regular update finished"),
            Err(e) => log::error!("regular update failed: {}", e),
        }
    }
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            log::error!("command {} failed: {}", ctx.command().name, error);
            if let Err(e) = ctx.say("An error occurred, see the bot log.").await {
                log::error!("failed to report the error: {}", e);
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                log::error!("error while handling an error: {}", e);
            }
        }
    }
}

async fn run(config: Config, api: Arc<ApiClient>) -> Result<(), Error> {
    let data = Data {
        api,
        store: Arc::new(Mutex::new(JsonHandleStore::open(&config.handles_file)?)),
        cache: Arc::new(Mutex::new(UpdateCache::default())),
        contest_window_hours: config.contest_window_hours,
    };
    let update_interval = config.update_interval;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![cf::cf()],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some("/".into()),
                ..Default::default()
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                tokio::spawn(interval(data.clone(), update_interval));
                log::info!("Bot started as \"{}\"", ready.user.name);
                ctx.set_activity(Option::from(serenity::ActivityData::watching("Codeforces")));
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT;
    let mut client = serenity::ClientBuilder::new(&config.discord_token, intents).framework(framework).await?;
    client.start().await?;
    Ok(())
}

fn main() -> Result<(), Error> {
    dotenv().ok();
    let config = Config::load()?;
    init_logger(&config)?;

    // the blocking client has to be created and dropped outside the async runtime
    let api = Arc::new(ApiClient::new(
        config.api_base.clone(),
        Box::new(ReqwestFetcher::new(config.request_timeout)?),
    ));

    let runtime = Builder::new_multi_thread().enable_all().build()?;
    let result = runtime.block_on(run(config, Arc::clone(&api)));
    drop(runtime);
    drop(api);

    if let Err(e) = &result {
        log::error!("bot stopped: {}", e);
    }
    result
}
