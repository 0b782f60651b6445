use thiserror::Error;
use tracing::{error, info};

use crate::connection::M2Connection;
use crate::handler::Handler;
use crate::protocol::{M2Error, RequestConfig};
use crate::transport::Transport;

#[derive(Debug)]
pub struct ServerBuilder {
    identity: Option<String>,
    pull_address: Option<String>,
    publish_address: Option<String>,
    request_config: RequestConfig,
}

impl ServerBuilder {
    fn new() -> Self {
        Self { identity: None, pull_address: None, publish_address: None, request_config: RequestConfig::default() }
    }

    /// Identity of the publish socket, mongrel2 uses it to tell handlers apart.
    pub fn identity<S: Into<String>>(mut self, identity: S) -> Self {
        self.identity = Some(identity.into());
        self
    }

    /// Where mongrel2 pushes requests, its `send_spec`.
    pub fn pull_address<S: Into<String>>(mut self, address: S) -> Self {
        self.pull_address = Some(address.into());
        self
    }

    /// Where mongrel2 listens for replies, its `recv_spec`.
    pub fn publish_address<S: Into<String>>(mut self, address: S) -> Self {
        self.publish_address = Some(address.into());
        self
    }

    pub fn request_config(mut self, request_config: RequestConfig) -> Self {
        self.request_config = request_config;
        self
    }

    pub fn build(self) -> Result<Server, ServerBuildError> {
        let identity = self.identity.ok_or(ServerBuildError::MissingIdentity)?;
        let pull_address = self.pull_address.ok_or(ServerBuildError::MissingPullAddress)?;
        let publish_address = self.publish_address.ok_or(ServerBuildError::MissingPublishAddress)?;
        Ok(Server { identity, pull_address, publish_address, request_config: self.request_config })
    }
}

#[derive(Debug, Clone)]
pub struct Server {
    identity: String,
    pull_address: String,
    publish_address: String,
    request_config: RequestConfig,
}

#[derive(Error, Debug)]
pub enum ServerBuildError {
    #[error("identity must be set")]
    MissingIdentity,
    #[error("pull address must be set")]
    MissingPullAddress,
    #[error("publish address must be set")]
    MissingPublishAddress,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn pull_address(&self) -> &str {
        &self.pull_address
    }

    pub fn publish_address(&self) -> &str {
        &self.publish_address
    }

    /// Connects both transports and serves `handler` until the pull side fails.
    pub async fn start<P, S, H>(self, mut pull: P, mut publish: S, handler: H) -> Result<(), M2Error>
    where
        P: Transport,
        S: Transport,
        H: Handler,
    {
        if let Err(e) = pull.connect(&self.pull_address).await {
            error!(cause = %e, address = %self.pull_address, "connect pull transport error");
            return Err(e.into());
        }

        publish.set_identity(&self.identity);
        if let Err(e) = publish.connect(&self.publish_address).await {
            error!(cause = %e, address = %self.publish_address, "connect publish transport error");
            return Err(e.into());
        }

        info!(identity = %self.identity, pull = %self.pull_address, publish = %self.publish_address, "start serving");
        let connection = M2Connection::with_config(pull, publish, self.request_config);
        let result = connection.process(handler).await;
        info!("finished serving");
        result
    }
}
