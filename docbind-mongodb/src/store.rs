use bson::Document;
use mongodb::{
    IndexModel,
    options::{ClientOptions, Credential, IndexOptions, ServerAddress},
    sync::{Client, Collection as MongoCollection},
};

use docbind_core::{
    backend::{IndexSettings, StoreBackend, StoreBackendBuilder},
    error::{DocBindError, DocBindResult},
};

/// Host used when the builder is given none.
pub const DEFAULT_HOST: &str = "localhost";
/// Port used when the builder is given none.
pub const DEFAULT_PORT: u16 = 27017;

/// Schema backend over a blocking MongoDB client.
#[derive(Debug, Clone)]
pub struct MongoBackend {
    client: Client,
    database: String,
}

impl MongoBackend {
    /// Creates a backend over an existing client and database name.
    pub fn new(client: Client, database: String) -> Self {
        Self { client, database }
    }

    /// Creates a builder for connection bootstrap.
    pub fn builder() -> MongoBackendBuilder {
        MongoBackendBuilder::new()
    }

    /// Returns the name of the database this backend targets.
    pub fn database(&self) -> &str {
        &self.database
    }

    fn get_collection(&self, collection_name: &str) -> MongoCollection<Document> {
        self.client
            .database(&self.database)
            .collection(collection_name)
    }
}

impl StoreBackend for MongoBackend {
    fn ensure_index(
        &self,
        collection: &str,
        keys: Document,
        settings: IndexSettings,
    ) -> DocBindResult<()> {
        self.get_collection(collection)
            .create_index(
                IndexModel::builder()
                    .keys(keys)
                    .options(
                        IndexOptions::builder()
                            .unique(settings.unique)
                            .background(settings.background)
                            .build(),
                    )
                    .build(),
            )
            .run()
            .map_err(|e| DocBindError::Backend(e.to_string()))?;

        Ok(())
    }

    fn shutdown(self) -> DocBindResult<()> {
        self.client.shutdown();

        Ok(())
    }
}

/// Connection bootstrap builder for [`MongoBackend`].
///
/// Collects host (default `localhost`), port (default `27017`), the required
/// database name, and optional credentials. `build()` validates the
/// configuration and raises [`DocBindError::InvalidConfiguration`] before
/// any connection handle is constructed.
#[derive(Debug, Clone)]
pub struct MongoBackendBuilder {
    host: String,
    port: u16,
    database: Option<String>,
    username: Option<String>,
    password: Option<String>,
}

impl MongoBackendBuilder {
    /// Creates a builder with default host and port.
    pub fn new() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: None,
            username: None,
            password: None,
        }
    }

    /// Sets the host of the MongoDB server.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the port of the MongoDB server.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the database name (required).
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Sets the credentials for the database (optional).
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    fn validate(&self) -> DocBindResult<String> {
        if self.host.trim().is_empty() {
            return Err(DocBindError::InvalidConfiguration(
                "host can't be blank".to_string(),
            ));
        }
        if self.port == 0 {
            return Err(DocBindError::InvalidConfiguration(
                "port can't be 0".to_string(),
            ));
        }
        match &self.database {
            Some(database) if !database.trim().is_empty() => Ok(database.clone()),
            _ => Err(DocBindError::InvalidConfiguration(
                "database can't be blank".to_string(),
            )),
        }
    }
}

impl Default for MongoBackendBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreBackendBuilder for MongoBackendBuilder {
    type Backend = MongoBackend;

    fn build(self) -> DocBindResult<Self::Backend> {
        let database = self.validate()?;

        let mut options = ClientOptions::builder()
            .hosts(vec![ServerAddress::Tcp {
                host: self.host.clone(),
                port: Some(self.port),
            }])
            .build();

        if let (Some(username), Some(password)) = (self.username, self.password) {
            options.credential = Some(
                Credential::builder()
                    .username(username)
                    .password(password)
                    .source(database.clone())
                    .build(),
            );
        }

        log::debug!("connecting to {}:{} / {}", self.host, self.port, database);
        let client = Client::with_options(options)
            .map_err(|e| DocBindError::Initialization(e.to_string()))?;

        Ok(MongoBackend::new(client, database))
    }
}
