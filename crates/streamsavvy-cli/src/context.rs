use catalog_config::{Config, PathManager, TMDB_API_KEY_ENV};
use catalog_core::{FileStore, KeyValueStore, SessionManager};
use catalog_models::SessionPhase;
use catalog_sources::{CatalogSource, ImageUrls, MockCatalogClient, TmdbClient};
use clap::ValueEnum;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// The TMDB metadata API
    Tmdb,
    /// The local json-server mock backend
    Mock,
}

/// Everything a command needs: configuration, paths and the record store
pub struct AppContext {
    pub config: Config,
    pub paths: PathManager,
    pub config_file: PathBuf,
    pub store: Arc<dyn KeyValueStore>,
    source_kind: SourceKind,
}

impl AppContext {
    pub fn load(config_path: Option<PathBuf>, source_kind: SourceKind) -> Result<Self> {
        let paths = PathManager::default();
        paths
            .ensure_directories()
            .map_err(|e| eyre!("Failed to create directories under {}: {}", paths.config_dir().display(), e))?;

        let config_file = config_path.unwrap_or_else(|| paths.config_file());
        let config = Config::load_or_default(&config_file)
            .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
        config
            .validate()
            .map_err(|e| eyre!("Invalid configuration in {}: {}", config_file.display(), e))?;

        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(paths.records_dir()));
        tracing::debug!(config = %config_file.display(), records = %paths.records_dir().display(), "Context loaded");

        Ok(Self {
            config,
            paths,
            config_file,
            store,
            source_kind,
        })
    }

    pub fn session(&self) -> SessionManager {
        SessionManager::load(self.store.clone())
    }

    /// Session that has passed sign-up, payment and sign-in
    pub fn require_home(&self) -> Result<SessionManager> {
        let session = self.session();
        if session.can_access_home() {
            return Ok(session);
        }
        let hint = match session.phase() {
            SessionPhase::Anonymous => "Create an account first: streamsavvy account signup",
            SessionPhase::SignedUpUnpaid => "Complete your membership first: streamsavvy account pay",
            _ => "Sign in first: streamsavvy account signin",
        };
        Err(eyre!("{}", hint))
    }

    pub fn images(&self) -> ImageUrls {
        ImageUrls::new(self.config.tmdb.image_base_url.clone())
    }

    pub fn tmdb(&self) -> Result<TmdbClient> {
        if !self.config.is_tmdb_configured() {
            return Err(eyre!(
                "Missing TMDB API key. Set tmdb.api_key in {} or the {} environment variable.",
                self.config_file.display(),
                TMDB_API_KEY_ENV
            ));
        }
        TmdbClient::new(&self.config.tmdb).map_err(|e| eyre!("Failed to create TMDB client: {}", e))
    }

    pub fn mock(&self) -> MockCatalogClient {
        MockCatalogClient::new(&self.config.mock_server)
    }

    pub fn source(&self) -> Result<Arc<dyn CatalogSource>> {
        let source: Arc<dyn CatalogSource> = match self.source_kind {
            SourceKind::Tmdb => Arc::new(self.tmdb()?),
            SourceKind::Mock => Arc::new(self.mock()),
        };
        Ok(source)
    }
}
