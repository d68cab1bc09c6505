use color_eyre::eyre::eyre;
use color_eyre::Result;
use movieflix_config::{Config, CredentialStore, PathManager};
use movieflix_models::MovieId;
use movieflix_sources::{TmdbClient, YouTubeClient};
use movieflix_store::{store_dir, FileStore, KeyValueStore, MemoryStore, PreferenceStore};
use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;
use tracing::{debug, info};

pub type Store = PreferenceStore<Box<dyn KeyValueStore>>;

/// Everything a command needs: paths, config and the preference store
pub struct App {
    pub paths: PathManager,
    pub config: Config,
    pub store: Store,
    changes: Rc<Cell<usize>>,
}

impl App {
    pub fn load(ephemeral: bool) -> Result<Self> {
        let paths = PathManager::default();
        let config = load_config(&paths)?;

        let backend: Box<dyn KeyValueStore> = if ephemeral {
            info!("Using in-memory preference store; nothing will be saved");
            Box::new(MemoryStore::new())
        } else {
            let dir = store_dir(&config, &paths);
            let backend = FileStore::open(&dir).map_err(|e| {
                eyre!("Failed to open preference store at {}: {}", dir.display(), e)
            })?;
            debug!("Opened preference store at {}", backend.dir().display());
            Box::new(backend)
        };

        let mut store = PreferenceStore::new(backend, config.storage.key_prefix.clone());
        let changes = Rc::new(Cell::new(0));
        let counter = Rc::clone(&changes);
        store.subscribe(move |_| counter.set(counter.get() + 1));

        Ok(Self {
            paths,
            config,
            store,
            changes,
        })
    }

    /// Number of preference changes saved during this run
    pub fn changes(&self) -> usize {
        self.changes.get()
    }

    pub fn credentials(&self) -> Result<CredentialStore> {
        load_credentials(&self.paths)
    }

    pub fn catalog(&self) -> Result<TmdbClient> {
        let api_key = self.credentials()?.tmdb_api_key().ok_or_else(|| {
            eyre!(
                "TMDB API key not configured. Run 'movieflix config tmdb' or set MOVIEFLIX_TMDB_API_KEY"
            )
        })?;
        Ok(TmdbClient::new(api_key, &self.config.tmdb, &self.config.http)?)
    }

    /// YouTube search client, if enabled and a key is available
    pub fn trailer_search(&self) -> Result<Option<YouTubeClient>> {
        if !self.config.youtube.enabled {
            debug!("YouTube trailer search disabled in config");
            return Ok(None);
        }
        let Some(api_key) = self.credentials()?.youtube_api_key() else {
            debug!("No YouTube API key; trailer search fallback unavailable");
            return Ok(None);
        };
        Ok(Some(YouTubeClient::new(
            api_key,
            &self.config.youtube,
            &self.config.http,
        )?))
    }

    pub fn watchlist_ids(&mut self) -> HashSet<MovieId> {
        self.store.watchlist().list().iter().map(|m| m.id).collect()
    }
}

pub fn load_config(paths: &PathManager) -> Result<Config> {
    let config_file = paths.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    config
        .validate()
        .map_err(|e| eyre!("Invalid config in {}: {}", config_file.display(), e))?;
    Ok(config)
}

pub fn load_credentials(paths: &PathManager) -> Result<CredentialStore> {
    let mut store = CredentialStore::new(paths.credentials_file());
    store
        .load()
        .map_err(|e| eyre!("Failed to load credentials from {}: {}", store.path().display(), e))?;
    Ok(store)
}
