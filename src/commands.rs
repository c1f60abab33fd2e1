//! Command runners.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each command enters its route through the [`Router`] first, so the same
//! guard that protects screens protects commands. A guard redirect to the
//! login route turns into [`CliError::LoginRequired`] carrying the path to
//! return to.

use std::sync::Arc;

use admin_client::net::api;
use admin_client::net::transport::ReqwestTransport;
use admin_client::net::types::{CreateUserRequest, UpdateUserRequest, UserQuery};
use admin_client::router::routes::{DASHBOARD_PATH, DEFAULT_LANDING_PATH, LOGIN_PATH, USER_EDIT_PATH, USERS_PATH};
use admin_client::router::{Location, Navigation, REDIRECT_QUERY_KEY};
use admin_client::util::auth::mask_token;
use admin_client::util::notify::{Notifier, TracingNotifier};
use admin_client::util::storage::FileStorage;
use admin_client::{ClientConfig, HttpClient, Router, Session, SessionStore};
use serde::Serialize;
use serde_json::json;

use crate::CliError;
use crate::cli::{Command, LoginArgs, UsersSubcommand};
use crate::output::{StderrNotifier, TerminalTitle};

/// Everything a command needs, wired around one session.
pub struct App {
    config: ClientConfig,
    router: Arc<Router>,
    http: HttpClient,
    store: SessionStore,
}

impl App {
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be built.
    pub fn build(config: ClientConfig, quiet: bool) -> Result<Self, CliError> {
        let storage = Arc::new(FileStorage::new(config.storage_path.clone()));
        let session = Session::load(storage);
        let router = Arc::new(Router::new(session.clone(), config.app_title.clone()).with_title_sink(Arc::new(TerminalTitle)));
        let transport = Arc::new(ReqwestTransport::new(&config.api_base_url, config.request_timeout())?);
        let notifier: Arc<dyn Notifier> = if quiet { Arc::new(TracingNotifier) } else { Arc::new(StderrNotifier) };
        let http = HttpClient::new(transport, session, notifier, router.clone());

        tracing::debug!(base_url = %config.api_base_url, storage = %config.storage_path.display(), "console ready");
        Ok(Self { config, router, store: SessionStore::new(http.clone()), http })
    }

    /// Dispatch a parsed command.
    ///
    /// # Errors
    ///
    /// Returns the routing, API or output failure of the command.
    pub async fn run(&self, command: Command) -> Result<(), CliError> {
        match command {
            Command::Login(args) => self.login(args).await,
            Command::Logout => self.logout().await,
            Command::Status => self.status(),
            Command::Dashboard => self.dashboard(),
            Command::Users(users) => self.users(users.command).await,
        }
    }

    /// Push `target` and fail if the guard sent us to the login route.
    fn enter(&self, target: Location) -> Result<Navigation, CliError> {
        let nav = self.router.push(target)?;
        if nav.location.path == LOGIN_PATH && nav.requested.path != LOGIN_PATH {
            let redirect = nav
                .location
                .query_value(REDIRECT_QUERY_KEY)
                .map_or_else(|| nav.requested.full_path(), str::to_owned);
            return Err(CliError::LoginRequired { redirect });
        }
        Ok(nav)
    }

    async fn login(&self, args: LoginArgs) -> Result<(), CliError> {
        let nav = self.router.push(Location::new(LOGIN_PATH))?;
        if nav.redirected() {
            tracing::info!("already logged in; requesting a fresh token");
        }

        if !self.store.login(&args.username, &args.password).await {
            return Err(CliError::LoginFailed);
        }

        let landing = args.redirect.as_deref().map_or_else(|| Location::new(DEFAULT_LANDING_PATH), Location::parse);
        let nav = self.enter(landing)?;
        print_json(&json!({ "loggedIn": true, "location": nav.location.full_path(), "title": self.router.title() }))
    }

    async fn logout(&self) -> Result<(), CliError> {
        let result = self.store.logout().await;
        eprintln!("local session cleared");
        result?;
        Ok(())
    }

    fn status(&self) -> Result<(), CliError> {
        let session = self.store.session().snapshot();
        print_json(&json!({
            "loggedIn": session.token.is_some(),
            "token": session.token.as_deref().map(mask_token),
            "profile": session.profile,
            "baseUrl": self.config.api_base_url,
            "storagePath": self.config.storage_path.display().to_string(),
        }))
    }

    fn dashboard(&self) -> Result<(), CliError> {
        let nav = self.enter(Location::new(DASHBOARD_PATH))?;
        print_json(&json!({ "location": nav.location.full_path(), "title": self.router.title() }))
    }

    async fn users(&self, command: UsersSubcommand) -> Result<(), CliError> {
        match command {
            UsersSubcommand::List { page, size, username } => {
                self.enter(Location::new(USERS_PATH))?;
                let page = api::get_user_page(&self.http, &UserQuery { page, size, username }).await?;
                print_json(&page)
            }
            UsersSubcommand::Get { user_id, as_profile } => {
                self.enter(Location::new(USER_EDIT_PATH).with_query("id", user_id.as_str()))?;
                let user = if as_profile {
                    self.store.fetch_profile(&user_id).await?
                } else {
                    api::get_user_by_id(&self.http, &user_id).await?
                };
                print_json(&user)
            }
            UsersSubcommand::Create { username, password, email } => {
                self.enter(Location::new(USER_EDIT_PATH))?;
                api::create_user(&self.http, &CreateUserRequest { username: username.clone(), password, email }).await?;
                eprintln!("created user: {username}");
                Ok(())
            }
            UsersSubcommand::Update { user_id, email } => {
                self.enter(Location::new(USER_EDIT_PATH).with_query("id", user_id.as_str()))?;
                api::update_user(&self.http, &user_id, &UpdateUserRequest { email }).await?;
                eprintln!("updated user: {user_id}");
                Ok(())
            }
            UsersSubcommand::Delete { user_id } => {
                self.enter(Location::new(USERS_PATH))?;
                api::delete_user(&self.http, &user_id).await?;
                eprintln!("deleted user: {user_id}");
                Ok(())
            }
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
