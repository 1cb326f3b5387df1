use escape_quiz::PlayerApp;
use escape_quiz::config::PlayerConfig;
use escape_quiz::data::{load_document_file, read_sample_escape_room};
use escape_quiz::model::Document;
use escape_quiz::storage::MemoryStore;
use std::path::PathBuf;

/// Qué abrir al arrancar.
enum Launch {
    File(PathBuf),
    Id(String),
    Sample,
}

fn launch_from_args() -> Launch {
    let mut args = std::env::args().skip(1);
    match args.next() {
        Some(flag) if flag == "--id" => match args.next() {
            Some(id) => Launch::Id(id),
            None => Launch::Sample,
        },
        Some(path) => Launch::File(PathBuf::from(path)),
        None => Launch::Sample,
    }
}

fn open_sample(app: &mut PlayerApp) {
    match read_sample_escape_room() {
        Ok(content) => app.open_document("muestra", Document::EscapeRoom(content)),
        Err(e) => {
            log::error!("el escape room de muestra no es válido: {e}");
            app.message = format!("No se pudo cargar la muestra: {e}");
        }
    }
}

fn main() -> eframe::Result<()> {
    env_logger::init();
    let config = PlayerConfig::load();
    let launch = launch_from_args();
    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "Escape Quiz",
        options,
        Box::new(move |cc| {
            // Progreso guardado de ejecuciones anteriores
            let saved = cc
                .storage
                .and_then(|storage| eframe::get_value::<PlayerApp>(storage, eframe::APP_KEY))
                .map(|app| app.saved)
                .unwrap_or_else(MemoryStore::new);
            let mut app = PlayerApp::new(saved, config);

            match launch {
                Launch::File(path) => match load_document_file(&path, &app.config) {
                    Ok(document) => {
                        let id = path
                            .file_stem()
                            .map(|s| s.to_string_lossy().into_owned())
                            .unwrap_or_else(|| "documento".to_string());
                        app.open_document(&id, document);
                    }
                    Err(e) => {
                        log::warn!("no se pudo leer {}: {e}", path.display());
                        open_sample(&mut app);
                        app.message = format!("No se pudo leer {}: {e}", path.display());
                    }
                },
                Launch::Id(id) => {
                    if !app.open_from_backend(&id) {
                        let message = std::mem::take(&mut app.message);
                        open_sample(&mut app);
                        app.message = message;
                    }
                }
                Launch::Sample => open_sample(&mut app),
            }
            Ok(Box::new(app))
        }),
    )
}
