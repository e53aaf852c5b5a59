use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_memory::*;
use crate::infra_mysql::*;
use crate::infra_redis::*;
use crate::logger::*;
use crate::settings::Settings;
use sqlx::{MySql, Pool};
use std::sync::Arc;
use std::time::Duration;

const DEV_SIGNING_KEY: &str = "my-dev-secret-key";

pub struct Server {
    pub auth_service: Arc<dyn AuthService>,
    pub account_service: Arc<dyn AccountService>,
    pool: Option<Pool<MySql>>,
}

impl Server {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let session_store: Arc<dyn SessionStore> = match settings.session.store.as_str() {
            "memory" => Arc::new(MemorySessionStore::new()),
            "redis" => {
                let dsn = settings
                    .session
                    .redis_url
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("session.redis_url is required for redis"))?;
                let redis_client = redis::Client::open(dsn)?;
                let redis_manager = redis_client.get_connection_manager().await?;
                Arc::new(RedisSessionStore::new(
                    redis_manager,
                    settings.session.key_prefix.clone(),
                    Duration::from_millis(settings.session.op_timeout_ms),
                ))
            }
            other => return Err(anyhow::anyhow!("Unknown session store: {}", other)),
        };

        let mut pool = None;
        let accounts: Arc<dyn AccountDirectory> = match settings.account.directory.as_str() {
            "memory" => Arc::new(MemoryAccountDirectory::new()),
            "mysql" => {
                let dsn = settings
                    .account
                    .mysql_url
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("account.mysql_url is required for mysql"))?;
                let mysql = Pool::<MySql>::connect(dsn).await?;
                pool = Some(mysql.clone());
                Arc::new(MySqlAccountDirectory::new(mysql))
            }
            other => return Err(anyhow::anyhow!("Unknown account directory: {}", other)),
        };

        let signing_key = match std::env::var("JWT_SIGNING_KEY") {
            Ok(key) => key,
            Err(_) => {
                warn!("JWT_SIGNING_KEY is not set, using the development key");
                DEV_SIGNING_KEY.to_string()
            }
        };
        let token_codec: Arc<dyn TokenCodec> = Arc::new(JwtHs256Codec::new(JwtConfig {
            issuer: settings.token.issuer.clone(),
            audience: settings.token.audience.clone(),
            access_ttl: Duration::from_secs(settings.token.access_ttl_secs),
            refresh_ttl: Duration::from_secs(settings.token.refresh_ttl_secs),
            signing_key: signing_key.into_bytes(),
        }));

        let credential_hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2PasswordHasher);

        let policy = SessionPolicy {
            revocation_ttl: settings
                .session
                .revocation_ttl_secs
                .map(Duration::from_secs),
            replay: settings.session.replay_policy,
        };

        let auth_service: Arc<dyn AuthService> = Arc::new(SessionManager::new(
            accounts.clone(),
            credential_hasher.clone(),
            token_codec,
            session_store.clone(),
            policy,
        ));
        let account_service: Arc<dyn AccountService> = Arc::new(RealAccountService::new(
            accounts,
            credential_hasher,
            session_store,
        ));

        info!(
            session_store = %settings.session.store,
            account_directory = %settings.account.directory,
            "server ready"
        );

        Ok(Server {
            auth_service,
            account_service,
            pool,
        })
    }

    pub async fn shutdown(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
        info!("server shut down");
    }
}
