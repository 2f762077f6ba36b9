use sentry::{types::Dsn, SessionMode};
use std::{borrow::Cow, env, str::FromStr};
use tracing_subscriber::{
    prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

/// Installs the fmt subscriber, reporting to Sentry too when `$SENTRY_DSN` is set.
pub fn setup() -> sentry::ClientInitGuard {
    let dsn = env::var("SENTRY_DSN")
        .ok()
        .and_then(|dsn| Dsn::from_str(&dsn).ok());

    let guard = sentry::init(sentry::ClientOptions {
        dsn,
        traces_sample_rate: 1.0,
        attach_stacktrace: true,
        session_mode: SessionMode::Request,
        environment: env::var("APP_ENV").ok().map(Cow::Owned),
        release: Some(Cow::Borrowed(env!("STATIC_BUILD_DATE"))),
        ..sentry::ClientOptions::default()
    });

    tracing_subscriber::registry()
        .with(sentry_tracing::layer())
        .with(
            tracing_subscriber::fmt::layer().with_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "api=info,strategist=info,tower_http=debug".into()),
            ),
        )
        .init();

    guard
}
