//! Unit tests for the session guard and theme persistence.

use super::{A11yTheme, AppSession, InMemoryPreferenceStore, PreferenceStore, SessionError};
use crate::auth::{
    adapters::memory::InMemoryAuthProvider,
    domain::{SignInForm, SignUpForm},
    ports::AuthProvider,
};
use eyre::{OptionExt, ensure};
use rstest::{fixture, rstest};
use std::sync::Arc;

type TestSession = AppSession<InMemoryAuthProvider, InMemoryPreferenceStore>;

#[fixture]
fn provider() -> Arc<InMemoryAuthProvider> {
    Arc::new(InMemoryAuthProvider::new())
}

async fn register(provider: &InMemoryAuthProvider) -> eyre::Result<()> {
    let request = SignUpForm {
        name: "Ada".to_owned(),
        email: "ada@example.com".to_owned(),
        password: "secret1".to_owned(),
        confirm_password: "secret1".to_owned(),
    }
    .validate()?;
    provider.sign_up(&request).await?;
    Ok(())
}

#[rstest]
#[case("default", A11yTheme::Default)]
#[case("high-contrast", A11yTheme::HighContrast)]
#[case("large-text", A11yTheme::LargeText)]
fn themes_round_trip_their_identifiers(#[case] raw: &str, #[case] theme: A11yTheme) {
    assert_eq!(A11yTheme::try_from(raw), Ok(theme));
    assert_eq!(theme.css_class(), format!("a11y-theme-{raw}"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn guard_rejects_anonymous_sessions(provider: Arc<InMemoryAuthProvider>) -> eyre::Result<()> {
    let session: TestSession =
        AppSession::start(provider, Arc::new(InMemoryPreferenceStore::new())).await?;

    ensure!(matches!(
        session.require_user(),
        Err(SessionError::Unauthenticated)
    ));
    ensure!(session.theme() == A11yTheme::Default);
    session.shutdown();
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn session_follows_sign_in_and_sign_out(
    provider: Arc<InMemoryAuthProvider>,
) -> eyre::Result<()> {
    let mut session: TestSession =
        AppSession::start(Arc::clone(&provider), Arc::new(InMemoryPreferenceStore::new())).await?;

    register(&provider).await?;
    let signed_in = session
        .user_changed()
        .await?
        .ok_or_eyre("registration signs the user in")?;
    ensure!(session.require_user()? == signed_in);

    session.sign_out().await?;
    ensure!(session.user_changed().await?.is_none());
    ensure!(session.require_user().is_err());

    let request = SignInForm::new("ada@example.com", "secret1").validate()?;
    provider.sign_in(&request).await?;
    ensure!(session.user_changed().await?.is_some());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn already_signed_in_user_is_visible_at_start(
    provider: Arc<InMemoryAuthProvider>,
) -> eyre::Result<()> {
    register(&provider).await?;

    let session: TestSession =
        AppSession::start(provider, Arc::new(InMemoryPreferenceStore::new())).await?;

    let user = session.require_user()?;
    ensure!(user.greeting_name() == "Ada");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn theme_is_persisted_and_restored(provider: Arc<InMemoryAuthProvider>) -> eyre::Result<()> {
    let preferences = Arc::new(InMemoryPreferenceStore::new());
    let mut session: TestSession =
        AppSession::start(Arc::clone(&provider), Arc::clone(&preferences)).await?;

    session.set_theme(A11yTheme::HighContrast).await?;
    session.shutdown();

    ensure!(preferences.load_theme().await? == Some(A11yTheme::HighContrast));
    let restarted: TestSession = AppSession::start(provider, preferences).await?;
    ensure!(restarted.theme() == A11yTheme::HighContrast);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unreadable_saved_theme_falls_back_to_default(
    provider: Arc<InMemoryAuthProvider>,
) -> eyre::Result<()> {
    let preferences = Arc::new(InMemoryPreferenceStore::with_raw_theme("neon"));

    let session: TestSession = AppSession::start(provider, Arc::clone(&preferences)).await?;

    ensure!(session.theme() == A11yTheme::Default);
    ensure!(preferences.load_theme().await.is_err());
    Ok(())
}
