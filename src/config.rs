use crate::builder::BuilderState;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "ESCAPE_QUIZ_CONFIG";
pub const CONFIG_FILE: &str = "escape_quiz.yaml";

/// Ajustes del reproductor. Cualquier campo que falte toma su valor por defecto.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PlayerConfig {
    pub data_dir: PathBuf,
    pub default_theme: String,
    pub questions_per_checkpoint: usize,
    pub default_checkpoints: usize,
    /// Pausa entre abrir el candado y la pantalla final.
    pub escape_delay_ms: u64,
    pub user_id: Option<String>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("escape_quiz_data"),
            default_theme: crate::builder::DEFAULT_THEME.to_string(),
            questions_per_checkpoint: crate::parser::DEFAULT_QUESTIONS_PER_CHECKPOINT as usize,
            default_checkpoints: crate::builder::DEFAULT_CHECKPOINTS,
            escape_delay_ms: 500,
            user_id: None,
        }
    }
}

impl PlayerConfig {
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        // Un fichero vacío es un documento nulo para serde_yaml
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// Ruta de `ESCAPE_QUIZ_CONFIG` o `escape_quiz.yaml` junto al ejecutable.
    pub fn default_path() -> PathBuf {
        std::env::var(CONFIG_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                std::env::current_exe()
                    .ok()
                    .and_then(|exe| exe.parent().map(|dir| dir.join(CONFIG_FILE)))
                    .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
            })
    }

    /// Escape room en blanco para el editor, con el tema y el tamaño configurados.
    pub fn empty_escape_room(&self) -> BuilderState {
        BuilderState {
            theme: self.default_theme.clone(),
            ..BuilderState::empty(self.default_checkpoints, self.questions_per_checkpoint)
        }
    }

    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    /// Nunca falla: sin fichero o con un fichero roto se usan los valores por defecto.
    pub fn load_from(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                if path.exists() {
                    log::warn!("no se pudo leer {}: {e}", path.display());
                } else {
                    log::debug!("sin configuración en {}", path.display());
                }
                return Self::default();
            }
        };
        match Self::from_yaml(&text) {
            Ok(config) => {
                log::info!("configuración cargada de {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("configuración no válida en {}: {e}", path.display());
                Self::default()
            }
        }
    }
}
