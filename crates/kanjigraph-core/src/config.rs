use std::{
    env,
    path::{Path, PathBuf},
};

use config as cfg;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{Direction, KanjiGraphError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
        }
    }
}

/// Locations of the graph and dictionary files. Relative file names are
/// resolved against `dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "DataConfig::default_dir")]
    pub dir: PathBuf,
    #[serde(default = "DataConfig::default_graph")]
    pub graph: PathBuf,
    #[serde(default = "DataConfig::default_heisig")]
    pub heisig: PathBuf,
    #[serde(default = "DataConfig::default_kanjidic")]
    pub kanjidic: PathBuf,
    #[serde(default = "DataConfig::default_kradfile")]
    pub kradfile: PathBuf,
    #[serde(default = "DataConfig::default_radicals")]
    pub radicals: PathBuf,
    #[serde(default = "DataConfig::default_ids")]
    pub ids: PathBuf,
}

impl DataConfig {
    fn default_dir() -> PathBuf {
        PathBuf::from("data")
    }

    fn default_graph() -> PathBuf {
        PathBuf::from("graph.yml")
    }

    fn default_heisig() -> PathBuf {
        PathBuf::from("heisig-data.txt.gz")
    }

    fn default_kanjidic() -> PathBuf {
        PathBuf::from("kanjidic.gz")
    }

    fn default_kradfile() -> PathBuf {
        PathBuf::from("kradfile.gz")
    }

    fn default_radicals() -> PathBuf {
        PathBuf::from("radicals.json")
    }

    fn default_ids() -> PathBuf {
        PathBuf::from("IDS-UCS-Basic.txt")
    }

    pub fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.dir.join(file)
        }
    }

    pub fn graph_path(&self) -> PathBuf {
        self.resolve(&self.graph)
    }

    pub fn heisig_path(&self) -> PathBuf {
        self.resolve(&self.heisig)
    }

    pub fn kanjidic_path(&self) -> PathBuf {
        self.resolve(&self.kanjidic)
    }

    pub fn kradfile_path(&self) -> PathBuf {
        self.resolve(&self.kradfile)
    }

    pub fn radicals_path(&self) -> PathBuf {
        self.resolve(&self.radicals)
    }

    pub fn ids_path(&self) -> PathBuf {
        self.resolve(&self.ids)
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: Self::default_dir(),
            graph: Self::default_graph(),
            heisig: Self::default_heisig(),
            kanjidic: Self::default_kanjidic(),
            kradfile: Self::default_kradfile(),
            radicals: Self::default_radicals(),
            ids: Self::default_ids(),
        }
    }
}

/// Stopping policy for the adaptive ego network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubgraphConfig {
    #[serde(default = "SubgraphConfig::default_min_depth")]
    pub min_depth: usize,
    #[serde(default = "SubgraphConfig::default_max_depth")]
    pub max_depth: usize,
    /// A depth is accepted once the collected neighbourhood has fewer nodes than this
    #[serde(default = "SubgraphConfig::default_threshold")]
    pub threshold: usize,
    #[serde(default)]
    pub direction: Direction,
}

impl SubgraphConfig {
    fn default_min_depth() -> usize {
        2
    }

    fn default_max_depth() -> usize {
        4
    }

    fn default_threshold() -> usize {
        20
    }
}

impl Default for SubgraphConfig {
    fn default() -> Self {
        Self {
            min_depth: Self::default_min_depth(),
            max_depth: Self::default_max_depth(),
            threshold: Self::default_threshold(),
            direction: Direction::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Upper bound on the cartesian product of per-word candidate sets
    #[serde(default = "SearchConfig::default_max_combinations")]
    pub max_combinations: usize,
}

impl SearchConfig {
    fn default_max_combinations() -> usize {
        4096
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_combinations: Self::default_max_combinations(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "Settings::default_env")]
    pub env: String,
    /// Kanji shown when a request names none
    #[serde(default = "Settings::default_kanji")]
    pub default_kanji: String,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub subgraph: SubgraphConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env: Self::default_env(),
            default_kanji: Self::default_kanji(),
            server: ServerConfig::default(),
            data: DataConfig::default(),
            subgraph: SubgraphConfig::default(),
            search: SearchConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

fn ensure(cond: bool, msg: &str) -> Result<()> {
    if cond {
        Ok(())
    } else {
        Err(KanjiGraphError::Config(msg.to_string()))
    }
}

impl Settings {
    fn default_env() -> String {
        env::var("APP_ENV")
            .ok()
            .or_else(|| env::var("RUST_ENV").ok())
            .unwrap_or_else(|| "development".to_string())
    }

    fn default_kanji() -> String {
        "露".to_string()
    }

    pub fn validate(&self) -> Result<()> {
        ensure(
            !self.server.host.trim().is_empty(),
            "server.host cannot be empty",
        )?;
        ensure(self.server.port > 0, "server.port must be > 0")?;
        ensure(self.subgraph.min_depth > 0, "subgraph.min_depth must be > 0")?;
        ensure(
            self.subgraph.min_depth <= self.subgraph.max_depth,
            "subgraph.min_depth must not exceed subgraph.max_depth",
        )?;
        ensure(self.subgraph.threshold > 0, "subgraph.threshold must be > 0")?;
        ensure(
            self.search.max_combinations > 0,
            "search.max_combinations must be > 0",
        )?;
        ensure(
            !self.default_kanji.trim().is_empty(),
            "default_kanji cannot be empty",
        )?;
        Ok(())
    }
}

/// Loads layered [`Settings`] from a config directory and the environment.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    settings: Settings,
    config_dir: PathBuf,
    env: String,
}

impl ConfigManager {
    /// Load from the default config directory using the ambient environment name.
    pub fn new() -> Result<Self> {
        Self::from_dir(Self::default_config_dir(), None)
    }

    pub fn from_dir(config_dir: PathBuf, env_override: Option<String>) -> Result<Self> {
        let env_name = env_override.unwrap_or_else(Settings::default_env);
        let settings = Self::load_from_sources(&config_dir, &env_name)?;
        settings.validate()?;
        Ok(Self {
            settings,
            config_dir,
            env: env_name,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn into_settings(self) -> Settings {
        self.settings
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn env(&self) -> &str {
        &self.env
    }

    /// Get the default configuration directory.
    ///
    /// Priority order:
    /// 1. ~/.kanjigraph/ (user-level config)
    /// 2. ./config/ (project-level config)
    /// 3. Current directory (fallback)
    pub fn default_config_dir() -> PathBuf {
        if let Some(home_dir) = dirs::home_dir() {
            let user_dir = home_dir.join(".kanjigraph");
            if user_dir.exists() {
                info!("Using config directory: {:?}", user_dir);
                return user_dir;
            }
        }

        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let project_config = cwd.join("config");
        if project_config.exists() {
            info!("Using config directory: {:?}", project_config);
            return project_config;
        }

        info!("Using config directory: {:?}", cwd);
        cwd
    }

    pub fn load_from_sources(config_dir: &Path, env_name: &str) -> Result<Settings> {
        let mut builder = cfg::Config::builder();
        for stem in ["default", env_name] {
            for ext in ["toml", "yaml", "yml", "json"] {
                builder = builder.add_source(
                    cfg::File::from(config_dir.join(format!("{}.{}", stem, ext))).required(false),
                );
            }
        }
        builder = builder
            .add_source(cfg::File::from(config_dir.join("local.toml")).required(false))
            .add_source(cfg::Environment::with_prefix("KANJIGRAPH").separator("__"));

        builder
            .build()
            .map_err(|e| KanjiGraphError::Config(format!("building configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| KanjiGraphError::Config(format!("deserializing configuration: {}", e)))
    }
}
