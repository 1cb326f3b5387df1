//! Servicios externos: documentos, imágenes, usuario y fin de sesión.
//!
//! El reproductor trabaja contra [`Backend`]; [`DirBackend`] lo implementa
//! sobre un directorio con un JSON por documento.

use crate::model::Document;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("error de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON no válido: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML no válido: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("no existe el documento {0:?}")]
    NotFound(String),

    #[error("hay que iniciar sesión para guardar")]
    Unauthenticated,

    #[error("identificador no válido: {0:?}")]
    InvalidId(String),

    #[error("no se ha encontrado ninguna pregunta ni tarjeta")]
    Empty,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
}

pub trait Backend {
    /// `id` puede ser el identificador del documento o su código para compartir.
    fn load_document(&self, id: &str) -> Result<Document, BackendError>;

    fn save_document(&mut self, id: &str, document: &Document) -> Result<(), BackendError>;

    /// Guarda una imagen y devuelve una URL estable para usarla en las preguntas.
    fn upload_image(&mut self, file_name: &str, bytes: &[u8]) -> Result<String, BackendError>;

    fn current_user(&self) -> Option<User>;

    fn mark_session_complete(&mut self, session_id: &str) -> Result<(), BackendError>;
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionRecord {
    session_id: String,
    completed: bool,
}

/// Backend local:
/// - `documents/<id>.json`
/// - `images/<nombre>`
/// - `sessions/<id>.json`
#[derive(Clone, Debug)]
pub struct DirBackend {
    root: PathBuf,
    user: Option<User>,
}

impl DirBackend {
    pub fn new(root: impl Into<PathBuf>, user_id: Option<String>) -> Self {
        Self {
            root: root.into(),
            user: user_id
                .filter(|id| !id.trim().is_empty())
                .map(|id| User { id }),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry(&self, dir: &str, id: &str, extension: &str) -> Result<PathBuf, BackendError> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(BackendError::InvalidId(id.to_string()));
        }
        Ok(self.root.join(dir).join(format!("{id}{extension}")))
    }

    fn write(path: &Path, contents: &[u8]) -> Result<(), BackendError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn is_session_complete(&self, session_id: &str) -> Result<bool, BackendError> {
        let path = self.entry("sessions", session_id, ".json")?;
        if !path.exists() {
            return Ok(false);
        }
        let record: SessionRecord = serde_json::from_str(&fs::read_to_string(path)?)?;
        Ok(record.completed)
    }
}

impl Backend for DirBackend {
    fn load_document(&self, id: &str) -> Result<Document, BackendError> {
        let path = self.entry("documents", id, ".json")?;
        if !path.exists() {
            return Err(BackendError::NotFound(id.to_string()));
        }
        let document: Document = serde_json::from_str(&fs::read_to_string(&path)?)?;
        log::debug!("documento {id} cargado de {}", path.display());
        Ok(document)
    }

    fn save_document(&mut self, id: &str, document: &Document) -> Result<(), BackendError> {
        if self.user.is_none() {
            return Err(BackendError::Unauthenticated);
        }
        if document.item_count() == 0 {
            return Err(BackendError::Empty);
        }
        let path = self.entry("documents", id, ".json")?;
        Self::write(&path, serde_json::to_string_pretty(document)?.as_bytes())?;
        log::info!("documento {id} guardado");
        Ok(())
    }

    fn upload_image(&mut self, file_name: &str, bytes: &[u8]) -> Result<String, BackendError> {
        let path = Path::new(file_name);
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("imagen");
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();

        // No se pisa nunca una imagen ya subida
        let mut target = self.root.join("images").join(format!("{stem}{extension}"));
        let mut n = 1;
        while target.exists() {
            target = self.root.join("images").join(format!("{stem}-{n}{extension}"));
            n += 1;
        }
        Self::write(&target, bytes)?;
        Ok(format!("file://{}", target.display()))
    }

    fn current_user(&self) -> Option<User> {
        self.user.clone()
    }

    fn mark_session_complete(&mut self, session_id: &str) -> Result<(), BackendError> {
        let path = self.entry("sessions", session_id, ".json")?;
        let record = SessionRecord {
            session_id: session_id.to_string(),
            completed: true,
        };
        Self::write(&path, serde_json::to_string(&record)?.as_bytes())?;
        log::info!("sesión {session_id} completada");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Flashcard, FlashcardContent};

    fn deck() -> Document {
        Document::Flashcards(FlashcardContent {
            cards: vec![Flashcard {
                id: 1,
                front: "uno".into(),
                back: "one".into(),
                ..Flashcard::default()
            }],
            ..FlashcardContent::default()
        })
    }

    #[test]
    fn saved_documents_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = DirBackend::new(dir.path(), Some("profe".into()));
        backend.save_document("mazo-1", &deck()).unwrap();
        assert_eq!(backend.load_document("mazo-1").unwrap(), deck());
        assert!(matches!(
            backend.load_document("otro"),
            Err(BackendError::NotFound(_))
        ));
    }

    #[test]
    fn saving_requires_a_user_and_content() {
        let dir = tempfile::tempdir().unwrap();
        let mut anonymous = DirBackend::new(dir.path(), None);
        assert!(matches!(
            anonymous.save_document("x", &deck()),
            Err(BackendError::Unauthenticated)
        ));

        let mut backend = DirBackend::new(dir.path(), Some("profe".into()));
        let empty = Document::Flashcards(FlashcardContent::default());
        assert!(matches!(backend.save_document("x", &empty), Err(BackendError::Empty)));
    }

    #[test]
    fn ids_cannot_escape_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let backend = DirBackend::new(dir.path(), None);
        assert!(matches!(
            backend.load_document("../secreto"),
            Err(BackendError::InvalidId(_))
        ));
    }

    #[test]
    fn uploads_never_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = DirBackend::new(dir.path(), None);
        let first = backend.upload_image("mapa.png", b"1").unwrap();
        let second = backend.upload_image("mapa.png", b"2").unwrap();
        assert_ne!(first, second);
        assert!(second.ends_with("mapa-1.png"));
        assert_eq!(fs::read(dir.path().join("images/mapa.png")).unwrap(), b"1");
    }

    #[test]
    fn completed_sessions_are_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = DirBackend::new(dir.path(), None);
        assert!(!backend.is_session_complete("s1").unwrap());
        backend.mark_session_complete("s1").unwrap();
        assert!(backend.is_session_complete("s1").unwrap());
    }
}
