use std::env;
use std::str::FromStr;
use std::time::Duration;
use std::{fs::File, net::SocketAddr};

use dotenv::dotenv;
use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, TermLogger, TerminalMode, WriteLogger};

use crate::session::Token;

pub mod gql;
pub mod poll;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug)]
pub enum Env {
    Local,
    Dev,
    Stage,
    Production,
}

impl Env {
    pub fn addr(&self) -> SocketAddr {
        match self {
            Env::Local => SocketAddr::from(([127, 0, 0, 1], 8000)),
            Env::Dev | Env::Stage | Env::Production => SocketAddr::from(([0, 0, 0, 0], 8000)),
        }
    }
}

impl FromStr for Env {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "local" => Ok(Env::Local),
            "dev" => Ok(Env::Dev),
            "stg" => Ok(Env::Stage),
            "prod" => Ok(Env::Production),
            _ => Err(format!("Invalid environment: {s}")),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub env: Env,

    pub gql: gql::Config,
    pub poll: poll::Config,

    pub token: Option<Token>,
}

impl Config {
    pub fn new(env: Env, gql: gql::Config, poll: poll::Config, token: Option<Token>) -> Self {
        Self {
            env,
            gql,
            poll,
            token,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        dotenv().ok();

        init_logger();

        let env = env::var("ENV")
            .map(|env| match env.parse::<Env>() {
                Ok(env) => env,
                Err(e) => panic!("{e}"),
            })
            .unwrap_or(Env::Local);

        let gql = match gql::Config::env() {
            Ok(cfg) => cfg,
            Err(Error::_Var(_)) => gql::Config::default(),
            Err(e) => panic!("Failed to read GraphQL config: {e}"),
        };

        let token = env::var("BACKEND_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
            .map(Token::new);

        Self {
            env,
            gql,
            poll: poll::Config::env(),
            token,
        }
    }
}

fn init_logger() {
    let rust_log = env::var("RUST_LOG").unwrap_or("info".into());
    let level = LevelFilter::from_str(&rust_log).unwrap_or(LevelFilter::Info);
    let log_file = env::var("SERVICE_NAME")
        .map(|pkg| format!("{pkg}.log"))
        .unwrap_or("service.log".into());

    CombinedLogger::init(vec![
        TermLogger::new(
            level,
            simplelog::Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(
            level,
            simplelog::Config::default(),
            File::create(log_file).expect("Failed to create log file"),
        ),
    ])
    .expect("Failed to initialize logger");
}

pub fn init_http_client() -> reqwest::Client {
    match reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(2))
        .timeout(Duration::from_secs(5))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            panic!("Failed to initialize HTTP client: {e}")
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("backend responded with {0}")]
    Status(reqwest::StatusCode),
    #[error("backend rejected the request: {}", .0.join("; "))]
    Graphql(Vec<String>),
    #[error("backend response carried no data")]
    MissingData,

    #[error(transparent)]
    _Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    _Url(#[from] url::ParseError),
    #[error(transparent)]
    _Var(#[from] env::VarError),
}
