use racket_session::application_port::*;
use racket_session::domain_model::{AuthType, Subject};
use racket_session::logger::*;
use racket_session::server::*;
use racket_session::settings::*;

// Walks one subject through sign-in, reissue, sign-out and a replayed reissue.
// $ cargo run --bin session_demo -- --settings=settings/dev.toml
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logger = Logger::new_bootstrap();

    let project_settings = parse_settings(cli.settings.as_deref())?;
    info!(?project_settings);
    logger.reload_from_config(&LogConfig::from(&project_settings.log))?;

    let server = Server::try_new(&project_settings).await?;

    let subject = Subject::from("u1@example.com");
    match server
        .account_service
        .register(RegisterInput {
            subject: subject.clone(),
            nickname: "u1".to_string(),
            phone_number: Some("010-0000-0001".to_string()),
            auth_type: AuthType::General,
            password: "demo-password".to_string(),
        })
        .await
    {
        Ok(_) | Err(AuthError::SubjectAlreadyExists) => {}
        Err(e) => return Err(e.into()),
    }

    let signed_in = server
        .auth_service
        .sign_in(SignInInput {
            subject: subject.clone(),
            secret: "demo-password".to_string(),
        })
        .await?;
    info!(%subject, expires_at = %signed_in.tokens.access_token_expires_at, "sign-in ok");

    let reissued = server
        .auth_service
        .reissue(&signed_in.tokens.access_token.0)
        .await?;
    info!(%subject, expires_at = %reissued.access_token_expires_at, "reissue ok");

    let message = server
        .auth_service
        .sign_out(&reissued.access_token.0)
        .await?;
    info!(%subject, %message, "sign-out ok");

    match server.auth_service.reissue(&reissued.access_token.0).await {
        Err(AuthError::InvalidToken) => info!(%subject, "replayed token refused"),
        other => warn!(%subject, ?other, "replayed token was not refused"),
    }

    server.shutdown().await;
    Ok(())
}
